//! Consolidated dataset report.
//!
//! The source system grew many near-duplicate dashboard variants, all of
//! which derive the same few tables from the same columns. This module
//! consolidates them into one report built from a [`CompanyDataset`] and a
//! [`MonetizationConfig`]: plain rows and pre-formatted labels, with no
//! rendering concerns.

use log::debug;
use serde::{Deserialize, Serialize};

use emval_core::calculator::{monetize, scope_shares};
use emval_core::config::MonetizationConfig;
use emval_core::dataset::{CompanyDataset, CountrySummary, SectorSummary, TrendSummary};

use crate::format::{format_billions_cell, format_emissions};

/// Per-company emissions table row: scope values plus the percentage split.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmissionsBreakdownRow {
    pub company_name: String,
    pub scope_1_emissions: f64,
    pub scope_2_emissions: f64,
    pub scope_3_emissions: f64,
    pub total_emissions: f64,
    pub total_emissions_label: String,
    /// Percent contribution of scopes 1, 2 and 3 to the total.
    pub scope_shares: [f64; 3],
}

/// Per-company financial impact row, denominated in billions of dollars.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialImpactRow {
    pub company_name: String,
    pub ebitda_billions: f64,
    pub carbon_cost_billions: f64,
    pub adjusted_ebitda_billions: f64,
    pub ebitda_label: String,
    pub carbon_cost_label: String,
    pub adjusted_ebitda_label: String,
    pub emissions_intensity_ratio: f64,
}

/// Every table the dashboard variants derive from one loaded dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetReport {
    pub emissions_breakdown: Vec<EmissionsBreakdownRow>,
    pub financial_impact: Vec<FinancialImpactRow>,
    pub sector_summary: Vec<SectorSummary>,
    pub country_summary: Vec<CountrySummary>,
    pub trend_summary: Vec<TrendSummary>,
    /// Sign-flipped intensity/EBITDA correlation; see
    /// [`CompanyDataset::intensity_ebitda_correlation`].
    pub intensity_correlation: Option<f64>,
}

impl DatasetReport {
    pub fn build(dataset: &CompanyDataset, config: &MonetizationConfig) -> Self {
        let mut emissions_breakdown = Vec::with_capacity(dataset.len());
        let mut financial_impact = Vec::with_capacity(dataset.len());

        for (record, result) in dataset.monetize_all(config) {
            emissions_breakdown.push(EmissionsBreakdownRow {
                company_name: record.company_name.clone(),
                scope_1_emissions: record.scope_1_emissions,
                scope_2_emissions: record.scope_2_emissions,
                scope_3_emissions: record.scope_3_emissions,
                total_emissions: result.total_emissions,
                total_emissions_label: format_emissions(result.total_emissions),
                scope_shares: scope_shares(record),
            });

            let ebitda_billions = result.ebitda_normalized / config.billion_multiplier;
            let carbon_cost_billions =
                result.monetized_total_emissions / config.billion_multiplier;
            let adjusted_ebitda_billions = ebitda_billions - carbon_cost_billions;
            financial_impact.push(FinancialImpactRow {
                company_name: record.company_name.clone(),
                ebitda_billions,
                carbon_cost_billions,
                adjusted_ebitda_billions,
                ebitda_label: format_billions_cell(ebitda_billions),
                carbon_cost_label: format_billions_cell(carbon_cost_billions),
                adjusted_ebitda_label: format_billions_cell(adjusted_ebitda_billions),
                emissions_intensity_ratio: result.emissions_intensity_ratio,
            });
        }

        debug!("built dataset report for {} companies", dataset.len());
        Self {
            emissions_breakdown,
            financial_impact,
            sector_summary: dataset.sector_summary(config),
            country_summary: dataset.country_summary(),
            trend_summary: dataset.trend_summary(),
            intensity_correlation: dataset.intensity_ebitda_correlation(config),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use is_close::is_close;

    const CSV_TEXT: &str = "\
company_name,sector,headquarters_country,scope_1_emissions,scope_2_emissions,scope_3_emissions,ebitda_2022,emissions_2021
Acme Industrial,Industrials,United States,10,5,20,2,40
Borealis Energy,Energy,Norway,50,10,100,30,150
";

    fn report() -> DatasetReport {
        let dataset = CompanyDataset::from_reader(CSV_TEXT.as_bytes()).unwrap();
        DatasetReport::build(&dataset, &MonetizationConfig::default())
    }

    #[test]
    fn breakdown_rows_cover_every_company() {
        let report = report();
        assert_eq!(report.emissions_breakdown.len(), 2);
        let acme = &report.emissions_breakdown[0];
        assert_eq!(acme.company_name, "Acme Industrial");
        assert_eq!(acme.total_emissions, 35.0);
        assert_eq!(acme.total_emissions_label, "35.00 million tons of CO2e");
        assert!(is_close!(acme.scope_shares.iter().sum::<f64>(), 100.0));
    }

    #[test]
    fn financial_impact_in_billions() {
        let report = report();
        let acme = &report.financial_impact[0];
        assert_eq!(acme.ebitda_billions, 2.0);
        assert!(is_close!(acme.carbon_cost_billions, 8.26));
        assert!(is_close!(acme.adjusted_ebitda_billions, -6.26));
        assert_eq!(acme.ebitda_label, "$2.00B");
        assert_eq!(acme.carbon_cost_label, "$8.26B");
        assert_eq!(acme.adjusted_ebitda_label, "$-6.26B");
    }

    #[test]
    fn summaries_are_carried_through() {
        let report = report();
        assert_eq!(report.sector_summary.len(), 2);
        assert_eq!(report.country_summary.len(), 2);
        assert_eq!(report.trend_summary.len(), 2);
        assert!(report.intensity_correlation.is_some());
    }
}
