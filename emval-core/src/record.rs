//! Company record model and manual-entry parsing.
//!
//! A [`CompanyRecord`] is one company's GHG disclosure paired with its
//! EBITDA figure, whether loaded from a dataset row or typed manually.
//! [`RecordInput`] is the string-typed manual form; parsing it reports the
//! first offending field rather than producing a partial record.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::MonetizationConfig;
use crate::errors::{EmvalError, EmvalResult};

/// Unit in which a company's EBITDA figure is denominated.
///
/// This is a validated enumeration: unknown unit strings are rejected at
/// parse time instead of silently falling through to a no-op multiplier.
/// Raw-dollar figures must use [`EbitdaUnit::Dollars`] explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EbitdaUnit {
    /// Billions of dollars ("BN").
    Billions,
    /// Millions of dollars ("MN").
    Millions,
    /// Raw dollars ("USD"); no-op multiplier.
    Dollars,
}

impl EbitdaUnit {
    /// The factor that normalizes an EBITDA figure in this unit to dollars.
    pub fn multiplier(&self, config: &MonetizationConfig) -> f64 {
        match self {
            EbitdaUnit::Billions => config.billion_multiplier,
            EbitdaUnit::Millions => config.million_multiplier,
            EbitdaUnit::Dollars => 1.0,
        }
    }

    /// The short code used in input forms and reports.
    pub fn code(&self) -> &'static str {
        match self {
            EbitdaUnit::Billions => "BN",
            EbitdaUnit::Millions => "MN",
            EbitdaUnit::Dollars => "USD",
        }
    }
}

impl fmt::Display for EbitdaUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for EbitdaUnit {
    type Err = EmvalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "BN" => Ok(EbitdaUnit::Billions),
            "MN" => Ok(EbitdaUnit::Millions),
            "USD" => Ok(EbitdaUnit::Dollars),
            other => Err(EmvalError::invalid_input(
                "ebitda_unit",
                format!("unrecognized unit '{other}', expected BN, MN or USD"),
            )),
        }
    }
}

/// One company's disclosure record.
///
/// Emissions are in million metric tons of CO2e (MtCO2e). The descriptive
/// fields (`sector`, `headquarters_country`, the report URLs) are carried
/// through unchanged and never computed on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyRecord {
    pub company_name: String,
    /// Free text; a year in practice but never interpreted numerically.
    #[serde(default)]
    pub reporting_year: String,
    #[serde(default)]
    pub emissions_report_url: String,
    #[serde(default)]
    pub ebitda_report_url: String,
    #[serde(default)]
    pub sector: Option<String>,
    #[serde(default)]
    pub headquarters_country: Option<String>,
    /// Scope 1 (direct) emissions, MtCO2e.
    pub scope_1_emissions: f64,
    /// Scope 2 (purchased energy) emissions, MtCO2e.
    pub scope_2_emissions: f64,
    /// Scope 3 (value chain) emissions, MtCO2e.
    pub scope_3_emissions: f64,
    /// EBITDA in the unit given by `ebitda_unit`; negative for a
    /// loss-making company.
    pub ebitda: f64,
    pub ebitda_unit: EbitdaUnit,
    /// Prior-year total emissions (MtCO2e), when the source table carries
    /// them, for trend deltas.
    #[serde(default)]
    pub prior_year_emissions: Option<f64>,
}

impl CompanyRecord {
    /// Check the record's field constraints.
    ///
    /// Scope emissions must be finite and non-negative, EBITDA finite, and
    /// the company name non-empty.
    pub fn validate(&self) -> EmvalResult<()> {
        if self.company_name.trim().is_empty() {
            return Err(EmvalError::invalid_input(
                "company_name",
                "company name must not be empty",
            ));
        }
        for (field, value) in [
            ("scope_1_emissions", self.scope_1_emissions),
            ("scope_2_emissions", self.scope_2_emissions),
            ("scope_3_emissions", self.scope_3_emissions),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(EmvalError::invalid_input(
                    field,
                    format!("emissions must be a non-negative number, got {value}"),
                ));
            }
        }
        if !self.ebitda.is_finite() {
            return Err(EmvalError::invalid_input(
                "ebitda",
                format!("EBITDA must be a finite number, got {}", self.ebitda),
            ));
        }
        Ok(())
    }
}

/// The manual tool's string-typed entry form, one field per text input.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordInput {
    pub company_name: String,
    pub reporting_year: String,
    pub emissions_report_url: String,
    pub ebitda_report_url: String,
    pub scope_1_emissions: String,
    pub scope_2_emissions: String,
    pub scope_3_emissions: String,
    pub ebitda: String,
    pub ebitda_unit: String,
}

impl RecordInput {
    /// Parse the typed fields into a validated [`CompanyRecord`].
    ///
    /// Fails with [`EmvalError::InvalidInput`] naming the first field that
    /// does not parse; no partial record is produced.
    pub fn parse(&self) -> EmvalResult<CompanyRecord> {
        let scope_1_emissions = parse_numeric("scope_1_emissions", &self.scope_1_emissions)?;
        let scope_2_emissions = parse_numeric("scope_2_emissions", &self.scope_2_emissions)?;
        let scope_3_emissions = parse_numeric("scope_3_emissions", &self.scope_3_emissions)?;
        let ebitda = parse_numeric("ebitda", &self.ebitda)?;
        let ebitda_unit = self.ebitda_unit.parse()?;

        let record = CompanyRecord {
            company_name: self.company_name.trim().to_string(),
            reporting_year: self.reporting_year.trim().to_string(),
            emissions_report_url: self.emissions_report_url.trim().to_string(),
            ebitda_report_url: self.ebitda_report_url.trim().to_string(),
            sector: None,
            headquarters_country: None,
            scope_1_emissions,
            scope_2_emissions,
            scope_3_emissions,
            ebitda,
            ebitda_unit,
            prior_year_emissions: None,
        };
        record.validate()?;
        Ok(record)
    }
}

fn parse_numeric(field: &str, raw: &str) -> EmvalResult<f64> {
    raw.trim().parse::<f64>().map_err(|_| {
        EmvalError::invalid_input(field, format!("'{raw}' is not numeric; enter a numeric value"))
    })
}
