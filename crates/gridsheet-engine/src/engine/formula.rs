//! Formula recognition.
//!
//! A formula cell has the shape `#(OPERATOR REF REF ...)`:
//!
//! - whitespace inside the parentheses is free-form
//! - the operator is a run of letters, matched case-insensitively
//! - at least one operand token must be present
//!
//! Operand tokens that are not a valid cell reference (`A0`, `1A`, `A1:B2`)
//! are dropped and reported in [`Recognition::skipped`] instead of failing
//! the whole formula. Text that does not have the formula shape, or names an
//! operator the engine does not implement, is not a formula at all and
//! [`recognize`] returns `None`.

use regex::Regex;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use super::CellRef;
use crate::error::{EngineError, Result};

/// Reduction applied to a formula's operand values.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operator {
    Sum,
    Product,
}

impl Operator {
    /// Resolve an operator name (`sum`, `prod`, `product`; any case).
    pub fn from_name(name: &str) -> Result<Operator> {
        match name.to_ascii_uppercase().as_str() {
            "SUM" => Ok(Operator::Sum),
            "PROD" | "PRODUCT" => Ok(Operator::Product),
            _ => Err(EngineError::UnsupportedOperator(name.to_string())),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Operator::Sum => "SUM",
            Operator::Product => "PRODUCT",
        }
    }
}

impl FromStr for Operator {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self> {
        Operator::from_name(s)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A recognized formula: operator plus operand cells in source order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Formula {
    operator: Operator,
    operands: Vec<CellRef>,
}

impl Formula {
    pub fn new(operator: Operator, operands: Vec<CellRef>) -> Formula {
        Formula { operator, operands }
    }

    pub fn operator(&self) -> Operator {
        self.operator
    }

    pub fn operands(&self) -> &[CellRef] {
        &self.operands
    }

    pub fn into_parts(self) -> (Operator, Vec<CellRef>) {
        (self.operator, self.operands)
    }
}

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#({}", self.operator)?;
        for operand in &self.operands {
            write!(f, " {}", operand)?;
        }
        f.write_str(")")
    }
}

/// An operand token that was dropped during recognition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SkippedToken {
    /// Zero-based position of the token in the operand list.
    pub position: usize,
    pub token: String,
}

/// Result of recognizing formula text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Recognition {
    pub formula: Formula,
    pub skipped: Vec<SkippedToken>,
}

impl Recognition {
    pub fn into_formula(self) -> Formula {
        self.formula
    }
}

/// Recognize formula text, logging each dropped operand token.
pub fn recognize(text: &str) -> Option<Recognition> {
    let caps = formula_re().captures(text.trim())?;

    let op_name = &caps["op"];
    let operator = match Operator::from_name(op_name) {
        Ok(op) => op,
        Err(err) => {
            tracing::warn!("{} in {:?}", err, text);
            return None;
        }
    };

    let mut operands = Vec::new();
    let mut skipped = Vec::new();
    for (position, token) in caps["refs"].split_whitespace().enumerate() {
        match CellRef::parse_a1(token) {
            Some(cell) => operands.push(cell),
            None => {
                tracing::warn!("Invalid cell reference {:?} in {:?}; skipping", token, text);
                skipped.push(SkippedToken {
                    position,
                    token: token.to_string(),
                });
            }
        }
    }

    let formula = Formula::new(operator, operands);
    tracing::debug!(%formula, skipped = skipped.len(), "recognized formula");
    Some(Recognition { formula, skipped })
}

/// Whether `text` would be recognized as a formula. Does not log.
pub fn is_formula(text: &str) -> bool {
    formula_re()
        .captures(text.trim())
        .is_some_and(|caps| Operator::from_name(&caps["op"]).is_ok())
}

fn formula_re() -> &'static Regex {
    static FORMULA_RE: OnceLock<Regex> = OnceLock::new();
    FORMULA_RE.get_or_init(|| {
        Regex::new(r"^#\(\s*(?<op>[A-Za-z]+)\s+(?<refs>\S+(?:\s+\S+)*)\s*\)$")
            .expect("formula regex must compile")
    })
}
