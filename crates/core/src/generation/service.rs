//! Quantity generator.

use rust_decimal::Decimal;

use super::error::GenerationError;
use super::types::{BuildingParameters, GenerationReport, ItemTemplate, SkippedTemplate};
use crate::formula::Formula;
use crate::pricing::LineItem;

/// Generates line items from templates and building parameters.
pub struct QuantityGenerator;

impl QuantityGenerator {
    /// Evaluates every template's quantity formula against `params`.
    ///
    /// Successful templates become line items in template order. A failing
    /// template is recorded in `skipped` and does not stop the others.
    #[must_use]
    pub fn generate(templates: &[ItemTemplate], params: &BuildingParameters) -> GenerationReport {
        let mut report = GenerationReport::default();

        for template in templates {
            match Self::generate_one(template, params) {
                Ok(item) => report.items.push(item),
                Err(error) => {
                    tracing::warn!(
                        item = %template.description,
                        formula = %template.quantity_formula,
                        %error,
                        "Skipping generated item"
                    );
                    report.skipped.push(SkippedTemplate::new(template, error));
                }
            }
        }

        tracing::debug!(
            generated = report.items.len(),
            skipped = report.skipped.len(),
            "Generated line items from templates"
        );

        report
    }

    /// Builds a single line item from a template.
    ///
    /// # Errors
    ///
    /// Returns `GenerationError::Formula` if the formula cannot be evaluated
    /// and `GenerationError::NonPositiveQuantity` if it yields a quantity of
    /// zero or less.
    pub fn generate_one(
        template: &ItemTemplate,
        params: &BuildingParameters,
    ) -> Result<LineItem, GenerationError> {
        let quantity = Formula::parse(&template.quantity_formula)?
            .evaluate(params)?
            .normalize();

        if quantity <= Decimal::ZERO {
            return Err(GenerationError::NonPositiveQuantity(quantity));
        }

        Ok(LineItem::new(
            template.description.clone(),
            template.material_cost,
            template.labor_cost,
            quantity,
        )
        .with_category(template.category.clone(), template.subcategory.clone())
        .with_unit(template.unit.clone()))
    }
}
