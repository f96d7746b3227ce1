//! Single-record CSV export: one header line, one data line.
//!
//! The field order and names are a fixed schema so exported rows can be
//! pasted into a shared spreadsheet. Numeric fields are rounded to two
//! decimal places except the intensity ratio, which keeps full precision;
//! the percentage is rounded to two decimals.

use emval_core::calculator::MonetizedResult;
use emval_core::errors::{EmvalError, EmvalResult};
use emval_core::record::CompanyRecord;

/// Field names of the export schema, in their fixed order.
pub const CSV_FIELDS: [&str; 15] = [
    "Company Name",
    "Emissions Reporting Year",
    "Emissions Report URL",
    "EBITDA Report URL",
    "Scope One Emissions",
    "Scope Two Emissions",
    "Scope Three Emissions",
    "Total Emissions",
    "Total Scope 1 & 2 Emissions",
    "Monetized Scope 1 & 2 Emissions",
    "Monetized Total Emissions",
    "EBITDA",
    "EBITDA Minus Total Monetized Emissions",
    "Emissions Intensity Ratio",
    "Emissions Intensity Percentage",
];

/// One exported record: a header line and exactly one data line.
#[derive(Debug, Clone, PartialEq)]
pub struct CsvRow {
    pub header_line: String,
    pub data_line: String,
}

/// Serialize a computed record to its CSV header and data lines.
pub fn to_csv_row(record: &CompanyRecord, result: &MonetizedResult) -> EmvalResult<CsvRow> {
    let values: [String; 15] = [
        record.company_name.clone(),
        record.reporting_year.clone(),
        record.emissions_report_url.clone(),
        record.ebitda_report_url.clone(),
        format!("{:.2}", record.scope_1_emissions),
        format!("{:.2}", record.scope_2_emissions),
        format!("{:.2}", record.scope_3_emissions),
        format!("{:.2}", result.total_emissions),
        format!("{:.2}", result.total_scope12_emissions),
        format!("{:.2}", result.monetized_scope12),
        format!("{:.2}", result.monetized_total_emissions),
        format!("{:.2}", result.ebitda_normalized),
        format!("{:.2}", result.ebitda_minus_monetized_emissions),
        result.emissions_intensity_ratio.to_string(),
        format!("{:.2}", result.emissions_intensity_percentage),
    ];

    Ok(CsvRow {
        header_line: write_line(CSV_FIELDS.iter())?,
        data_line: write_line(values.iter())?,
    })
}

/// Write one CSV record to a string, without the trailing line terminator.
fn write_line<I, S>(fields: I) -> EmvalResult<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<[u8]>,
{
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    writer.write_record(fields)?;
    let bytes = writer
        .into_inner()
        .map_err(|e| EmvalError::Io(std::io::Error::other(e.to_string())))?;
    let line = String::from_utf8(bytes)
        .map_err(|e| EmvalError::Io(std::io::Error::other(e.to_string())))?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}
