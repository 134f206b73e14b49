//! Property-based tests for formula evaluation.
//!
//! - Literal arithmetic agrees with direct decimal arithmetic
//! - Evaluation is deterministic
//! - Unbound variables always fail

use std::collections::HashMap;

use proptest::prelude::*;
use rust_decimal::Decimal;

use super::{EvalError, Formula, evaluate};

/// Strategy to generate non-negative quantities (0.00 to 10,000.00).
fn quantity() -> impl Strategy<Value = Decimal> {
    (0i64..1_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy to generate identifiers outside the function set.
fn variable_name() -> impl Strategy<Value = String> {
    "[a-z_][a-z0-9_]{0,8}".prop_filter("function names are reserved", |name| {
        !matches!(name.as_str(), "min" | "max" | "round" | "ceil" | "floor")
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Precedence: `a + b * c` equals `a + (b * c)`.
    #[test]
    fn prop_multiplication_binds_tighter(
        a in quantity(),
        b in quantity(),
        c in quantity(),
    ) {
        let source = format!("{a} + {b} * {c}");
        prop_assert_eq!(evaluate(&source, &HashMap::new()).unwrap(), a + b * c);
    }

    /// Left associativity: `a - b - c` equals `(a - b) - c`.
    #[test]
    fn prop_subtraction_is_left_associative(
        a in quantity(),
        b in quantity(),
        c in quantity(),
    ) {
        let source = format!("{a} - {b} - {c}");
        prop_assert_eq!(evaluate(&source, &HashMap::new()).unwrap(), a - b - c);
    }

    /// Variables evaluate to their bound values.
    #[test]
    fn prop_variable_lookup(
        name in variable_name(),
        value in quantity(),
    ) {
        let mut bindings = HashMap::new();
        bindings.insert(name.clone(), value);
        prop_assert_eq!(evaluate(&name, &bindings).unwrap(), value);
    }

    /// Missing variables are never replaced with a default.
    #[test]
    fn prop_unbound_variable_fails(name in variable_name()) {
        let result = evaluate(&format!("{name} * 2"), &HashMap::<String, Decimal>::new());
        prop_assert_eq!(result, Err(EvalError::UnknownIdentifier(name)));
    }

    /// A compiled formula gives the same answer every time.
    #[test]
    fn prop_evaluation_is_deterministic(
        area in quantity(),
        perimeter in quantity(),
    ) {
        let formula = Formula::parse("ceil(max(area, perimeter) / 3) + floor(area % 7)").unwrap();
        let bindings = [("area", area), ("perimeter", perimeter)];
        let first = formula.evaluate(&bindings);
        let second = formula.evaluate(&bindings);
        prop_assert_eq!(first, second);
    }

    /// `min` and `max` agree with decimal ordering.
    #[test]
    fn prop_min_max(a in quantity(), b in quantity()) {
        let bindings = [("a", a), ("b", b)];
        prop_assert_eq!(evaluate("min(a, b)", &bindings).unwrap(), a.min(b));
        prop_assert_eq!(evaluate("max(a, b)", &bindings).unwrap(), a.max(b));
    }
}
