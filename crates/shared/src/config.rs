//! Application configuration management.

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::types::Rate;

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Pricing defaults.
    #[serde(default)]
    pub pricing: PricingConfig,
    /// Installment balancing configuration.
    #[serde(default)]
    pub balancing: BalancingConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Pricing configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct PricingConfig {
    /// Adjustment percentages used when a document does not carry its own.
    #[serde(default)]
    pub default_profile: ProfileDefaults,
    /// Withholding rate applied when a document does not specify one.
    /// Zero disables withholding.
    #[serde(default)]
    pub default_withholding_rate: Rate,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            default_profile: ProfileDefaults::default(),
            default_withholding_rate: Rate::ZERO,
        }
    }
}

/// Default adjustment percentages, in percent units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct ProfileDefaults {
    /// Material waste allowance.
    #[serde(default = "default_waste")]
    pub waste: Rate,
    /// Site overhead.
    #[serde(default = "default_overhead")]
    pub overhead: Rate,
    /// Contingency for estimation error.
    #[serde(default = "default_contingency")]
    pub contingency: Rate,
    /// Profit markup.
    #[serde(default = "default_markup")]
    pub markup: Rate,
    /// Value-added tax.
    #[serde(default = "default_vat")]
    pub vat: Rate,
}

impl Default for ProfileDefaults {
    fn default() -> Self {
        Self {
            waste: default_waste(),
            overhead: default_overhead(),
            contingency: default_contingency(),
            markup: default_markup(),
            vat: default_vat(),
        }
    }
}

fn default_waste() -> Rate {
    Rate::percent(Decimal::from(5))
}

fn default_overhead() -> Rate {
    Rate::percent(Decimal::from(10))
}

fn default_contingency() -> Rate {
    Rate::percent(Decimal::from(5))
}

fn default_markup() -> Rate {
    Rate::percent(Decimal::from(15))
}

fn default_vat() -> Rate {
    Rate::percent(Decimal::from(7))
}

/// Installment balancing configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct BalancingConfig {
    /// Largest absolute difference still considered balanced.
    #[serde(default = "default_epsilon")]
    pub epsilon: Decimal,
    /// Decimal places used when rounding figures for display.
    #[serde(default = "default_decimal_places")]
    pub decimal_places: u32,
}

impl Default for BalancingConfig {
    fn default() -> Self {
        Self {
            epsilon: default_epsilon(),
            decimal_places: default_decimal_places(),
        }
    }
}

fn default_epsilon() -> Decimal {
    Decimal::new(1, 2) // 0.01
}

fn default_decimal_places() -> u32 {
    2
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is not set.
    #[serde(default = "default_filter")]
    pub filter: String,
    /// Emit JSON lines instead of human-readable output.
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_filter(),
            json: false,
        }
    }
}

fn default_filter() -> String {
    "buildcost=info".to_string()
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// Every section has defaults, so a missing `config/` directory is not an
    /// error.
    ///
    /// # Errors
    ///
    /// Returns an error if a source exists but cannot be parsed.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("BUILDCOST").separator("__"))
            .build()?;

        config.try_deserialize()
    }

    /// Loads `.env` (if present) and then the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load_with_dotenv() -> Result<Self, config::ConfigError> {
        dotenvy::dotenv().ok();
        Self::load()
    }
}
