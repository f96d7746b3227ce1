//! Core record model and monetization calculator for GHG emissions
//! valuation.
//!
//! Emissions reported under the GHG Protocol (scope 1/2/3, in million
//! metric tons of CO2e) are valued at a fixed carbon price and compared
//! against EBITDA. See [`calculator::monetize`] for the formula and
//! [`dataset::CompanyDataset`] for the table-driven path.

pub mod calculator;
pub mod config;
pub mod dataset;
pub mod record;

pub mod errors;
