//! Display formatting for monetized values.
//!
//! Monetary figures use a short form chosen by a threshold at one billion
//! dollars ("$1.23 B" / "$456.00 M") plus an optional full-precision form
//! with thousands separators. The threshold applies to the signed value,
//! so negative figures always render in millions, matching the published
//! calculator output.

use num_format::{Locale, ToFormattedString};
use serde::{Deserialize, Serialize};

use emval_core::calculator::MonetizedResult;
use emval_core::config::{BILLION, MILLION};

/// Short money form: billions at two decimals from $1B upward, otherwise
/// millions at two decimals. No currency symbol.
pub fn format_money_short(value: f64) -> String {
    if value >= BILLION {
        format!("{:.2} B", value / BILLION)
    } else {
        format!("{:.2} M", value / MILLION)
    }
}

/// Comma-grouped dollar figure at two decimals, e.g. `8,260,000,000.00`.
pub fn format_grouped(value: f64) -> String {
    let negative = value < 0.0;
    let cents_total = (value.abs() * 100.0).round() as i128;
    let whole = cents_total / 100;
    let cents = (cents_total % 100) as u8;
    let grouped = whole.to_formatted_string(&Locale::en);
    if negative {
        format!("-{grouped}.{cents:02}")
    } else {
        format!("{grouped}.{cents:02}")
    }
}

/// One-line money display: `$<short> (<comma-grouped full>)`.
pub fn format_money(value: f64) -> String {
    format!("${} ({})", format_money_short(value), format_grouped(value))
}

/// Short form with a parenthesised fuller form on a second line.
///
/// Above the billion threshold the fuller form is the millions rendering;
/// below it, the comma-grouped dollar value.
pub fn format_money_with_full(value: f64) -> String {
    if value >= BILLION {
        format!("${:.2} B\n(${:.2} M)", value / BILLION, value / MILLION)
    } else {
        format!("${:.2} M\n(${})", value / MILLION, format_grouped(value))
    }
}

/// Emissions figure at two decimals with its unit label.
pub fn format_emissions(value: f64) -> String {
    format!("{value:.2} million tons of CO2e")
}

/// `$X.XXB` table cell for values already denominated in billions.
pub fn format_billions_cell(value_billions: f64) -> String {
    format!("${value_billions:.2}B")
}

/// The calculated-values panel of the manual tool, as display strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplaySet {
    pub total_emissions: String,
    pub total_scope12_emissions: String,
    pub monetized_scope12: String,
    pub monetized_scope12_full: String,
    pub monetized_total_emissions: String,
    pub monetized_total_emissions_full: String,
    pub ebitda: String,
    pub ebitda_minus_monetized_emissions: String,
    pub emissions_intensity_ratio: String,
    pub emissions_intensity_percentage: String,
}

impl DisplaySet {
    pub fn new(result: &MonetizedResult) -> Self {
        Self {
            total_emissions: format_emissions(result.total_emissions),
            total_scope12_emissions: format_emissions(result.total_scope12_emissions),
            monetized_scope12: format_money(result.monetized_scope12),
            monetized_scope12_full: format_money_with_full(result.monetized_scope12),
            monetized_total_emissions: format_money(result.monetized_total_emissions),
            monetized_total_emissions_full: format_money_with_full(result.monetized_total_emissions),
            ebitda: format_money_with_full(result.ebitda_normalized),
            ebitda_minus_monetized_emissions: format_money_with_full(
                result.ebitda_minus_monetized_emissions,
            ),
            emissions_intensity_ratio: format!("{:.2}", result.emissions_intensity_ratio),
            emissions_intensity_percentage: format!(
                "{:.2}%",
                result.emissions_intensity_percentage
            ),
        }
    }
}
