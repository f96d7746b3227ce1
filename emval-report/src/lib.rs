//! Display formatting, CSV export, and report tables for emissions
//! valuation.
//!
//! Builds on [`emval_core`]: [`session::CalculatorSession`] drives the
//! manual data-entry tool, [`report::DatasetReport`] the table-driven
//! dashboards.

pub mod csv_export;
pub mod format;
pub mod report;
pub mod session;
