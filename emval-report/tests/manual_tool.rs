//! End-to-end flow of the manual data-entry calculator: typed fields in,
//! display strings and a CSV row out.

use emval_core::config::MonetizationConfig;
use emval_core::errors::EmvalError;
use emval_core::record::RecordInput;
use emval_report::csv_export::CSV_FIELDS;
use emval_report::session::CalculatorSession;

fn reference_input() -> RecordInput {
    RecordInput {
        company_name: "Acme Industrial".to_string(),
        reporting_year: "2023".to_string(),
        emissions_report_url: "https://example.com/ghg".to_string(),
        ebitda_report_url: "https://example.com/ebitda".to_string(),
        scope_1_emissions: "10".to_string(),
        scope_2_emissions: "5".to_string(),
        scope_3_emissions: "20".to_string(),
        ebitda: "2".to_string(),
        ebitda_unit: "BN".to_string(),
    }
}

#[test]
fn full_calculate_and_export_flow() {
    let mut session = CalculatorSession::new(MonetizationConfig::default());

    let display = session.calculate(&reference_input()).unwrap();
    assert_eq!(display.total_emissions, "35.00 million tons of CO2e");
    assert_eq!(display.monetized_total_emissions, "$8.26 B (8,260,000,000.00)");
    assert_eq!(display.emissions_intensity_percentage, "413.00%");

    let row = session.export_csv().unwrap();
    assert_eq!(row.header_line.split(',').count(), CSV_FIELDS.len());
    assert_eq!(
        row.data_line.split(',').count(),
        row.header_line.split(',').count()
    );

    let fields: Vec<&str> = row.data_line.split(',').collect();
    assert_eq!(fields[0], "Acme Industrial");
    assert_eq!(fields[10], "8260000000.00");
    assert_eq!(fields[12], "-6260000000.00");
}

#[test]
fn invalid_entry_leaves_previous_results_standing() {
    let mut session = CalculatorSession::new(MonetizationConfig::default());
    session.calculate(&reference_input()).unwrap();

    let mut bad = reference_input();
    bad.ebitda = "two billion".to_string();
    let err = session.calculate(&bad).unwrap_err();
    match err {
        EmvalError::InvalidInput { field, .. } => assert_eq!(field, "ebitda"),
        other => panic!("unexpected error: {other}"),
    }

    // The earlier calculation is still displayed and exportable.
    let display = session.display().unwrap();
    assert_eq!(display.total_emissions, "35.00 million tons of CO2e");
    assert!(session.export_csv().is_ok());
}

#[test]
fn export_without_calculation_is_rejected() {
    let session = CalculatorSession::new(MonetizationConfig::default());
    assert!(matches!(session.export_csv(), Err(EmvalError::EmptyRecord)));
}

#[test]
fn zero_ebitda_is_a_defined_output_not_an_error() {
    let mut session = CalculatorSession::new(MonetizationConfig::default());
    let mut input = reference_input();
    input.ebitda = "0".to_string();

    let display = session.calculate(&input).unwrap();
    assert_eq!(display.emissions_intensity_ratio, "0.00");
    assert_eq!(display.emissions_intensity_percentage, "0.00%");
}
