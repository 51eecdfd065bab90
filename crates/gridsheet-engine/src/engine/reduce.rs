//! Numeric folds behind each [`Operator`].

use super::Operator;

/// Fold operand values with the operator's reduction.
///
/// `Sum` of nothing is `0`, `Product` of nothing is `1`.
pub fn reduce(operator: Operator, values: &[f64]) -> f64 {
    match operator {
        Operator::Sum => values.iter().fold(0.0, |acc, v| acc + v),
        Operator::Product => values.iter().fold(1.0, |acc, v| acc * v),
    }
}
