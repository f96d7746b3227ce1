//! Dataset ingestion and descriptive aggregates.
//!
//! A [`CompanyDataset`] is the table-driven counterpart of the manual tool:
//! a small CSV of company disclosures, one row per company, to which the
//! calculator is applied independently per row. The aggregates here (sector
//! means, geographic totals, trend deltas, the intensity correlation) are
//! read-only descriptive statistics over the loaded table, not part of the
//! per-record contract.

use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use log::{debug, warn};
use ndarray::Array1;
use serde::{Deserialize, Serialize};

use crate::calculator::{monetize, MonetizedResult};
use crate::config::MonetizationConfig;
use crate::errors::EmvalResult;
use crate::record::{CompanyRecord, EbitdaUnit};

/// One row of the source table. Dataset EBITDA figures are denominated in
/// billions of dollars.
#[derive(Debug, Clone, Deserialize)]
struct DatasetRow {
    company_name: String,
    #[serde(default)]
    sector: Option<String>,
    #[serde(default)]
    headquarters_country: Option<String>,
    scope_1_emissions: f64,
    scope_2_emissions: f64,
    scope_3_emissions: f64,
    ebitda_2022: f64,
    #[serde(default)]
    emissions_2021: Option<f64>,
}

impl DatasetRow {
    fn into_record(self) -> CompanyRecord {
        CompanyRecord {
            company_name: self.company_name,
            reporting_year: String::new(),
            emissions_report_url: String::new(),
            ebitda_report_url: String::new(),
            sector: self.sector,
            headquarters_country: self.headquarters_country,
            scope_1_emissions: self.scope_1_emissions,
            scope_2_emissions: self.scope_2_emissions,
            scope_3_emissions: self.scope_3_emissions,
            ebitda: self.ebitda_2022,
            ebitda_unit: EbitdaUnit::Billions,
            prior_year_emissions: self.emissions_2021,
        }
    }
}

/// Mean emissions and intensity for one sector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectorSummary {
    pub sector: String,
    pub company_count: usize,
    /// Mean of total emissions across the sector's companies, MtCO2e.
    pub mean_total_emissions: f64,
    /// Mean of the per-company intensity ratios.
    pub mean_intensity_ratio: f64,
}

/// Summed emissions and company count for one headquarters country.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountrySummary {
    pub country: String,
    pub company_count: usize,
    /// Sum of total emissions across the country's companies, MtCO2e.
    pub total_emissions: f64,
}

/// Year-over-year change in a company's total emissions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendSummary {
    pub company_name: String,
    /// Prior-year total emissions, MtCO2e.
    pub prior_year_emissions: f64,
    /// Current total emissions, MtCO2e.
    pub total_emissions: f64,
    /// Absolute change, MtCO2e.
    pub change: f64,
    /// Percent change versus the prior year; 0 when the prior year is 0.
    pub percent_change: f64,
}

/// A loaded table of company records.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompanyDataset {
    records: Vec<CompanyRecord>,
    /// Rows dropped during ingestion because they failed to parse or
    /// validate.
    pub skipped_rows: usize,
}

impl CompanyDataset {
    /// Build a dataset from records that are already validated.
    pub fn from_records(records: Vec<CompanyRecord>) -> Self {
        Self {
            records,
            skipped_rows: 0,
        }
    }

    /// Load a dataset from CSV text.
    ///
    /// Rows that fail to parse or validate are skipped with a warning and
    /// counted in [`skipped_rows`](Self::skipped_rows); a malformed row
    /// never aborts the load.
    pub fn from_reader<R: Read>(reader: R) -> EmvalResult<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut records = Vec::new();
        let mut skipped_rows = 0usize;
        for (index, row) in csv_reader.deserialize::<DatasetRow>().enumerate() {
            let row = match row {
                Ok(row) => row,
                Err(e) => {
                    warn!("row {}: skipping unparseable row: {e}", index + 1);
                    skipped_rows += 1;
                    continue;
                }
            };
            let record = row.into_record();
            if let Err(e) = record.validate() {
                warn!("row {}: skipping invalid row: {e}", index + 1);
                skipped_rows += 1;
                continue;
            }
            records.push(record);
        }
        debug!(
            "loaded {} company records ({skipped_rows} skipped)",
            records.len()
        );
        Ok(Self {
            records,
            skipped_rows,
        })
    }

    /// Load a dataset from a CSV file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> EmvalResult<Self> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn records(&self) -> &[CompanyRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Apply the calculator independently to every row.
    pub fn monetize_all(
        &self,
        config: &MonetizationConfig,
    ) -> Vec<(&CompanyRecord, MonetizedResult)> {
        self.records
            .iter()
            .map(|record| (record, monetize(record, config)))
            .collect()
    }

    /// Per-sector means of total emissions and intensity ratio, sorted by
    /// sector name. Companies without a sector are excluded.
    pub fn sector_summary(&self, config: &MonetizationConfig) -> Vec<SectorSummary> {
        let mut groups: BTreeMap<&str, Vec<&CompanyRecord>> = BTreeMap::new();
        for record in &self.records {
            if let Some(sector) = &record.sector {
                groups.entry(sector.as_str()).or_default().push(record);
            }
        }
        groups
            .into_iter()
            .map(|(sector, members)| {
                let count = members.len();
                let mut emissions_sum = 0.0;
                let mut intensity_sum = 0.0;
                for record in &members {
                    let result = monetize(record, config);
                    emissions_sum += result.total_emissions;
                    intensity_sum += result.emissions_intensity_ratio;
                }
                SectorSummary {
                    sector: sector.to_string(),
                    company_count: count,
                    mean_total_emissions: emissions_sum / count as f64,
                    mean_intensity_ratio: intensity_sum / count as f64,
                }
            })
            .collect()
    }

    /// Per-country emission totals and company counts, sorted by country
    /// name. Companies without a headquarters country are excluded.
    pub fn country_summary(&self) -> Vec<CountrySummary> {
        let mut groups: BTreeMap<&str, (usize, f64)> = BTreeMap::new();
        for record in &self.records {
            if let Some(country) = &record.headquarters_country {
                let total = record.scope_1_emissions
                    + record.scope_2_emissions
                    + record.scope_3_emissions;
                let entry = groups.entry(country.as_str()).or_insert((0, 0.0));
                entry.0 += 1;
                entry.1 += total;
            }
        }
        groups
            .into_iter()
            .map(|(country, (company_count, total_emissions))| CountrySummary {
                country: country.to_string(),
                company_count,
                total_emissions,
            })
            .collect()
    }

    /// Year-over-year trend deltas, for the companies that carry prior-year
    /// data.
    pub fn trend_summary(&self) -> Vec<TrendSummary> {
        self.records
            .iter()
            .filter_map(|record| {
                let prior = record.prior_year_emissions?;
                let total = record.scope_1_emissions
                    + record.scope_2_emissions
                    + record.scope_3_emissions;
                let change = total - prior;
                let percent_change = if prior == 0.0 {
                    0.0
                } else {
                    change / prior * 100.0
                };
                Some(TrendSummary {
                    company_name: record.company_name.clone(),
                    prior_year_emissions: prior,
                    total_emissions: total,
                    change,
                    percent_change,
                })
            })
            .collect()
    }

    /// Pearson correlation between emissions intensity (total emissions per
    /// billion dollars of EBITDA) and normalized EBITDA, sign-flipped.
    ///
    /// The flip is a presentation convention carried over from the source
    /// dashboards so that "better sustainability alongside higher profit"
    /// reads as a positive coefficient; it is not a statistical necessity.
    ///
    /// Companies with zero EBITDA are excluded. Returns `None` when fewer
    /// than two usable rows remain or either column has zero variance.
    pub fn intensity_ebitda_correlation(&self, config: &MonetizationConfig) -> Option<f64> {
        let mut intensity = Vec::new();
        let mut ebitda = Vec::new();
        for record in &self.records {
            let normalized = record.ebitda * record.ebitda_unit.multiplier(config);
            if normalized == 0.0 {
                continue;
            }
            let total =
                record.scope_1_emissions + record.scope_2_emissions + record.scope_3_emissions;
            intensity.push(total / (normalized / config.billion_multiplier));
            ebitda.push(normalized);
        }
        pearson(&Array1::from(intensity), &Array1::from(ebitda)).map(|r| -r)
    }
}

/// Pearson correlation coefficient between two equal-length columns.
fn pearson(x: &Array1<f64>, y: &Array1<f64>) -> Option<f64> {
    if x.len() < 2 {
        return None;
    }
    let mean_x = x.mean()?;
    let mean_y = y.mean()?;
    let dx = x.mapv(|v| v - mean_x);
    let dy = y.mapv(|v| v - mean_y);
    let variance_x = dx.dot(&dx);
    let variance_y = dy.dot(&dy);
    if variance_x == 0.0 || variance_y == 0.0 {
        return None;
    }
    Some(dx.dot(&dy) / (variance_x * variance_y).sqrt())
}
