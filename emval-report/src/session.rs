//! Explicit calculator session for the manual data-entry tool.
//!
//! The session replaces the source environment's ambient per-session
//! key/value store with an owned object: a `calculate` that fails leaves
//! the previously displayed result untouched, and export is only possible
//! after at least one successful calculation.

use emval_core::calculator::{compute, MonetizedResult};
use emval_core::config::MonetizationConfig;
use emval_core::errors::{EmvalError, EmvalResult};
use emval_core::record::{CompanyRecord, RecordInput};

use crate::csv_export::{to_csv_row, CsvRow};
use crate::format::DisplaySet;

#[derive(Debug, Clone)]
struct SessionEntry {
    record: CompanyRecord,
    result: MonetizedResult,
    display: DisplaySet,
}

/// One interactive calculation session.
#[derive(Debug, Default)]
pub struct CalculatorSession {
    config: MonetizationConfig,
    current: Option<SessionEntry>,
}

impl CalculatorSession {
    pub fn new(config: MonetizationConfig) -> Self {
        Self {
            config,
            current: None,
        }
    }

    /// Parse the typed fields, compute, and replace the displayed result.
    ///
    /// On failure the previous result (if any) stays displayed unchanged
    /// until corrected input is resubmitted.
    pub fn calculate(&mut self, input: &RecordInput) -> EmvalResult<DisplaySet> {
        let (record, result) = compute(input, &self.config)?;
        let display = DisplaySet::new(&result);
        self.current = Some(SessionEntry {
            record,
            result,
            display: display.clone(),
        });
        Ok(display)
    }

    /// The currently displayed result, if a calculation has succeeded.
    pub fn display(&self) -> Option<&DisplaySet> {
        self.current.as_ref().map(|entry| &entry.display)
    }

    /// The most recent computed metrics, if a calculation has succeeded.
    pub fn result(&self) -> Option<&MonetizedResult> {
        self.current.as_ref().map(|entry| &entry.result)
    }

    /// Export the current record as a CSV header and data line.
    ///
    /// Fails with [`EmvalError::EmptyRecord`] when nothing has been
    /// calculated yet.
    pub fn export_csv(&self) -> EmvalResult<CsvRow> {
        match &self.current {
            Some(entry) => to_csv_row(&entry.record, &entry.result),
            None => Err(EmvalError::EmptyRecord),
        }
    }

    /// Drop the stored record, result and display.
    pub fn clear(&mut self) {
        self.current = None;
    }
}
