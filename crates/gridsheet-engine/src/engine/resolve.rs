//! Dependency resolution for formula cells.
//!
//! Every formula cell is resolved by walking its operands depth-first. The
//! walk keeps the chain of cells currently being resolved; meeting a cell that
//! is already on the chain is a circular dependency. Failing cells are
//! quarantined in the [`Sheet`] and keep their original text. A cell whose
//! operand is already quarantined is quarantined in turn, without walking the
//! cycle again.
//!
//! The walk runs on an explicit stack of frames rather than the call stack,
//! so long reference chains cannot overflow the thread stack.

use indexmap::IndexSet;

use super::{CellRef, Operator, Sheet, format_number, parse_number, recognize, reduce};
use crate::error::{EngineError, Result};

/// Outcome of one [`evaluate_all`] pass.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EvalReport {
    /// Formula cells that resolved, with their values, in evaluation order.
    pub evaluated: Vec<(CellRef, f64)>,
    /// Formula cells skipped because they were already quarantined.
    pub skipped: Vec<CellRef>,
    /// Resolution failures; each one quarantined [`EngineError::cell`].
    pub failures: Vec<EngineError>,
    /// Field width used for horizontal rules.
    pub field_width: usize,
}

impl EvalReport {
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty() && self.failures.is_empty()
    }
}

/// Resolve every formula cell in `sheet` and write results back.
///
/// Formula cells are visited in the order they were recorded. Cells that
/// cannot be resolved are quarantined and left untouched; a failure never
/// stops the pass. Afterwards the field width is recomputed and every
/// horizontal-rule marker is expanded to that width.
pub fn evaluate_all(sheet: &mut Sheet) -> EvalReport {
    let mut report = EvalReport::default();
    let cells: Vec<CellRef> = sheet.formulas().map(|(cell, _)| cell.clone()).collect();

    for cell in cells {
        if sheet.is_quarantined(&cell) {
            tracing::warn!(%cell, "skipping evaluation: cell is quarantined");
            report.skipped.push(cell);
            continue;
        }

        match Resolver::new(sheet).resolve(&cell) {
            Ok(value) => {
                sheet.set(&cell, format_number(value));
                tracing::debug!(%cell, value, "evaluated");
                report.evaluated.push((cell, value));
            }
            Err(err) => {
                if let Some(failed) = err.cell() {
                    sheet.quarantine(failed.clone());
                }
                report.failures.push(err);
            }
        }
    }

    report.field_width = sheet.refresh_field_width();
    sheet.finalize_horizontal_rules();

    tracing::info!(
        evaluated = report.evaluated.len(),
        skipped = report.skipped.len(),
        failed = report.failures.len(),
        field_width = report.field_width,
        "evaluation pass complete"
    );
    report
}

/// Resolves single cells against a borrowed sheet.
pub struct Resolver<'a> {
    sheet: &'a mut Sheet,
}

/// A formula cell whose operands are being resolved.
struct Frame {
    cell: CellRef,
    operator: Operator,
    operands: Vec<CellRef>,
    values: Vec<f64>,
}

enum Entered {
    Value(f64),
    Formula(Frame),
}

impl<'a> Resolver<'a> {
    pub fn new(sheet: &'a mut Sheet) -> Self {
        Resolver { sheet }
    }

    /// Resolve the numeric value of `cell`.
    ///
    /// - numeric text is returned as-is, formula or not
    /// - a non-numeric cell without a formula counts as `0`
    /// - a formula is the reduction of its resolved operands; the result is
    ///   written back into the sheet
    ///
    /// On failure the offending cell has already been quarantined.
    pub fn resolve(&mut self, cell: &CellRef) -> Result<f64> {
        // Cells currently on the resolution chain, outermost first.
        let mut visiting: IndexSet<CellRef> = IndexSet::new();
        let mut parents: Vec<Frame> = Vec::new();

        let mut current = match self.enter(cell, &mut visiting)? {
            Entered::Value(value) => return Ok(value),
            Entered::Formula(frame) => frame,
        };

        loop {
            if let Some(operand) = current.operands.get(current.values.len()).cloned() {
                if self.sheet.is_quarantined(&operand) {
                    visiting.shift_remove(&current.cell);
                    self.sheet.quarantine(current.cell.clone());
                    tracing::warn!(
                        cell = %current.cell,
                        dependency = %operand,
                        "skipping evaluation: references quarantined cell"
                    );
                    return Err(EngineError::PropagatedFailure {
                        cell: current.cell,
                        dependency: operand,
                    });
                }

                match self.enter(&operand, &mut visiting)? {
                    Entered::Value(value) => current.values.push(value),
                    Entered::Formula(frame) => parents.push(std::mem::replace(&mut current, frame)),
                }
                continue;
            }

            let value = self.complete(&current, &mut visiting);
            match parents.pop() {
                Some(parent) => {
                    current = parent;
                    current.values.push(value);
                }
                None => return Ok(value),
            }
        }
    }

    /// Push `cell` onto the chain and classify it.
    fn enter(&mut self, cell: &CellRef, visiting: &mut IndexSet<CellRef>) -> Result<Entered> {
        if let Some(start) = visiting.get_index_of(cell) {
            let mut path: Vec<CellRef> = visiting.iter().skip(start).cloned().collect();
            path.push(cell.clone());
            self.sheet.quarantine(cell.clone());
            tracing::error!(
                %cell,
                path = %display_path(&path),
                "circular dependency detected"
            );
            return Err(EngineError::CircularDependency {
                cell: cell.clone(),
                path,
            });
        }

        if let Some(value) = parse_number(self.sheet.get(cell)) {
            return Ok(Entered::Value(value));
        }

        let Some(text) = self.sheet.formula(cell) else {
            return Ok(Entered::Value(0.0));
        };

        let Some(recognition) = recognize(text) else {
            tracing::warn!(%cell, formula = text, "cached formula is not recognized; treating as 0");
            return Ok(Entered::Value(0.0));
        };

        let (operator, operands) = recognition.into_formula().into_parts();
        visiting.insert(cell.clone());
        Ok(Entered::Formula(Frame {
            cell: cell.clone(),
            operator,
            values: Vec::with_capacity(operands.len()),
            operands,
        }))
    }

    /// Pop a fully resolved frame off the chain and store its value.
    fn complete(&mut self, frame: &Frame, visiting: &mut IndexSet<CellRef>) -> f64 {
        visiting.shift_remove(&frame.cell);
        let value = reduce(frame.operator, &frame.values);
        self.sheet.set(&frame.cell, format_number(value));
        value
    }
}

fn display_path(path: &[CellRef]) -> String {
    path.iter()
        .map(CellRef::to_string)
        .collect::<Vec<_>>()
        .join(" -> ")
}
