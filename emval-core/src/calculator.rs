//! The emissions monetization calculator.
//!
//! Turns a company's scope 1/2/3 emissions and EBITDA into monetized
//! values and intensity ratios:
//!
//! $$ M = E_{total} \cdot p \cdot 10^6 $$
//!
//! where $E_{total}$ is total emissions in MtCO2e, $p$ the carbon price in
//! $/ton, and the $10^6$ factor converts million tons to tons. The
//! intensity ratio divides $M$ by EBITDA normalized to dollars.
//!
//! Everything here is a pure function of `(record, config)`: no side
//! effects, safe to call repeatedly or concurrently on independent records.

use serde::{Deserialize, Serialize};

use crate::config::MonetizationConfig;
use crate::errors::EmvalResult;
use crate::record::{CompanyRecord, RecordInput};

/// Monetized metrics derived from a single [`CompanyRecord`].
///
/// Never persisted independently: recompute on demand with [`monetize`]
/// whenever the record or the configuration changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonetizedResult {
    /// Scope 1 + 2 + 3 emissions, MtCO2e.
    pub total_emissions: f64,
    /// Scope 1 + 2 emissions, MtCO2e.
    pub total_scope12_emissions: f64,
    /// Scope 1 + 2 emissions valued at the carbon price, dollars.
    pub monetized_scope12: f64,
    /// Total emissions valued at the carbon price, dollars.
    pub monetized_total_emissions: f64,
    /// EBITDA normalized to dollars.
    pub ebitda_normalized: f64,
    /// Normalized EBITDA minus monetized total emissions, dollars.
    pub ebitda_minus_monetized_emissions: f64,
    /// Monetized total emissions divided by normalized EBITDA.
    ///
    /// Defined as `0.0` when normalized EBITDA is exactly zero. That is a
    /// display-zero policy so callers never face a division fault, not a
    /// numerically meaningful result.
    pub emissions_intensity_ratio: f64,
    /// The intensity ratio expressed as a percentage.
    pub emissions_intensity_percentage: f64,
}

/// Compute the monetized metrics for a validated record.
pub fn monetize(record: &CompanyRecord, config: &MonetizationConfig) -> MonetizedResult {
    let total_emissions =
        record.scope_1_emissions + record.scope_2_emissions + record.scope_3_emissions;
    let total_scope12_emissions = record.scope_1_emissions + record.scope_2_emissions;

    // Emissions are in million metric tons; scale to tons before pricing.
    let tons_per_mt = config.million_multiplier;
    let monetized_scope12 = total_scope12_emissions * config.carbon_price_usd_per_ton * tons_per_mt;
    let monetized_total_emissions = total_emissions * config.carbon_price_usd_per_ton * tons_per_mt;

    let ebitda_normalized = record.ebitda * record.ebitda_unit.multiplier(config);
    let ebitda_minus_monetized_emissions = ebitda_normalized - monetized_total_emissions;

    let emissions_intensity_ratio = if ebitda_normalized == 0.0 {
        0.0
    } else {
        monetized_total_emissions / ebitda_normalized
    };

    MonetizedResult {
        total_emissions,
        total_scope12_emissions,
        monetized_scope12,
        monetized_total_emissions,
        ebitda_normalized,
        ebitda_minus_monetized_emissions,
        emissions_intensity_ratio,
        emissions_intensity_percentage: emissions_intensity_ratio * 100.0,
    }
}

/// Parse a manual entry and compute its monetized metrics in one step.
///
/// Fails with [`EmvalError::InvalidInput`](crate::errors::EmvalError) if any
/// field does not parse; no partial result is produced.
pub fn compute(
    input: &RecordInput,
    config: &MonetizationConfig,
) -> EmvalResult<(CompanyRecord, MonetizedResult)> {
    let record = input.parse()?;
    let result = monetize(&record, config);
    Ok((record, result))
}

/// Percent contribution of scopes 1, 2 and 3 to a record's total emissions.
///
/// All zeros when the total is zero.
pub fn scope_shares(record: &CompanyRecord) -> [f64; 3] {
    let total = record.scope_1_emissions + record.scope_2_emissions + record.scope_3_emissions;
    if total == 0.0 {
        return [0.0; 3];
    }
    [
        record.scope_1_emissions / total * 100.0,
        record.scope_2_emissions / total * 100.0,
        record.scope_3_emissions / total * 100.0,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::EbitdaUnit;
    use is_close::is_close;

    fn record(scope_1: f64, scope_2: f64, scope_3: f64, ebitda: f64, unit: EbitdaUnit) -> CompanyRecord {
        CompanyRecord {
            company_name: "Test Co".to_string(),
            reporting_year: "2023".to_string(),
            emissions_report_url: String::new(),
            ebitda_report_url: String::new(),
            sector: None,
            headquarters_country: None,
            scope_1_emissions: scope_1,
            scope_2_emissions: scope_2,
            scope_3_emissions: scope_3,
            ebitda,
            ebitda_unit: unit,
            prior_year_emissions: None,
        }
    }

    #[test]
    fn monetized_total_is_exact_under_default_price() {
        let config = MonetizationConfig::default();
        let result = monetize(&record(1.0, 2.0, 3.0, 4.0, EbitdaUnit::Billions), &config);
        assert_eq!(result.monetized_total_emissions, 6.0 * 236_000_000.0);
        assert_eq!(result.monetized_scope12, 3.0 * 236_000_000.0);
    }

    #[test]
    fn reference_scenario() {
        let config = MonetizationConfig::default();
        let result = monetize(&record(10.0, 5.0, 20.0, 2.0, EbitdaUnit::Billions), &config);
        assert_eq!(result.total_emissions, 35.0);
        assert_eq!(result.total_scope12_emissions, 15.0);
        assert_eq!(result.monetized_total_emissions, 8_260_000_000.0);
        assert_eq!(result.ebitda_normalized, 2_000_000_000.0);
        assert_eq!(result.ebitda_minus_monetized_emissions, -6_260_000_000.0);
        assert!(is_close!(result.emissions_intensity_ratio, 4.13));
        assert!(is_close!(result.emissions_intensity_percentage, 413.0));
    }

    #[test]
    fn unit_normalization() {
        let config = MonetizationConfig::default();
        let bn = monetize(&record(1.0, 1.0, 1.0, 5.0, EbitdaUnit::Billions), &config);
        assert_eq!(bn.ebitda_normalized, 5_000_000_000.0);
        let mn = monetize(&record(1.0, 1.0, 1.0, 5.0, EbitdaUnit::Millions), &config);
        assert_eq!(mn.ebitda_normalized, 5_000_000.0);
        let usd = monetize(&record(1.0, 1.0, 1.0, 5.0, EbitdaUnit::Dollars), &config);
        assert_eq!(usd.ebitda_normalized, 5.0);
    }

    #[test]
    fn zero_ebitda_yields_zero_ratio() {
        let config = MonetizationConfig::default();
        let result = monetize(&record(10.0, 5.0, 20.0, 0.0, EbitdaUnit::Billions), &config);
        assert_eq!(result.emissions_intensity_ratio, 0.0);
        assert_eq!(result.emissions_intensity_percentage, 0.0);
        assert_eq!(
            result.ebitda_minus_monetized_emissions,
            -result.monetized_total_emissions
        );
    }

    #[test]
    fn negative_ebitda_flows_through() {
        let config = MonetizationConfig::default();
        let result = monetize(&record(1.0, 0.0, 0.0, -2.0, EbitdaUnit::Billions), &config);
        assert_eq!(result.ebitda_normalized, -2_000_000_000.0);
        assert!(result.emissions_intensity_ratio < 0.0);
    }

    #[test]
    fn ratio_matches_quotient_when_defined() {
        let config = MonetizationConfig::default();
        let result = monetize(&record(3.0, 1.0, 7.5, 12.0, EbitdaUnit::Millions), &config);
        assert!(is_close!(
            result.emissions_intensity_ratio,
            result.monetized_total_emissions / result.ebitda_normalized
        ));
    }

    #[test]
    fn custom_carbon_price() {
        let config = MonetizationConfig {
            carbon_price_usd_per_ton: 100.0,
            ..MonetizationConfig::default()
        };
        let result = monetize(&record(1.0, 0.0, 0.0, 1.0, EbitdaUnit::Billions), &config);
        assert_eq!(result.monetized_total_emissions, 100_000_000.0);
    }

    #[test]
    fn compute_rejects_bad_input_without_result() {
        let config = MonetizationConfig::default();
        let input = RecordInput {
            company_name: "Test Co".to_string(),
            scope_1_emissions: "abc".to_string(),
            scope_2_emissions: "1".to_string(),
            scope_3_emissions: "1".to_string(),
            ebitda: "1".to_string(),
            ebitda_unit: "BN".to_string(),
            ..RecordInput::default()
        };
        assert!(compute(&input, &config).is_err());
    }

    #[test]
    fn scope_share_split() {
        let shares = scope_shares(&record(10.0, 5.0, 20.0, 1.0, EbitdaUnit::Billions));
        assert!(is_close!(shares[0], 10.0 / 35.0 * 100.0));
        assert!(is_close!(shares[1], 5.0 / 35.0 * 100.0));
        assert!(is_close!(shares[2], 20.0 / 35.0 * 100.0));
        assert!(is_close!(shares.iter().sum::<f64>(), 100.0));
    }

    #[test]
    fn scope_shares_of_zero_total() {
        let shares = scope_shares(&record(0.0, 0.0, 0.0, 1.0, EbitdaUnit::Billions));
        assert_eq!(shares, [0.0; 3]);
    }
}
