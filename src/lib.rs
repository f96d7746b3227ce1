//! Monetized GHG emissions valuation.
//!
//! Converts self-reported scope 1/2/3 emissions into dollar terms at a
//! fixed carbon price and compares the result against EBITDA, for both a
//! single manually entered record and a loaded company dataset.

pub use emval_core::{calculator, config, dataset, errors, record};
pub use emval_report::{csv_export, format, report, session};
