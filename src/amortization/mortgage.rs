//! Mortgage payment with escrow add-ons
//!
//! The principal-and-interest part is a regular amortized loan on
//! `property_price - down_payment`. Property tax, home insurance and PMI are
//! flat monthly add-ons: they accrue no interest and are simply summed.

use serde::{Deserialize, Serialize};

use super::loan::{amortized_payment, LoanTerm, MONTHS_PER_YEAR};
use crate::error::{CalcError, Result};
use crate::validation::{require_non_negative, require_positive, require_rate};

/// Down payments below this share of the price carry PMI
pub const PMI_THRESHOLD_PERCENT: f64 = 20.0;

/// Annual PMI as a fraction of the loan amount
pub const PMI_ANNUAL_RATE: f64 = 0.005;

/// Inputs for a home purchase
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MortgageParameters {
    pub property_price: f64,
    pub down_payment: f64,
    /// Nominal annual rate in percent
    pub annual_rate_percent: f64,
    pub term: LoanTerm,
    /// Annual property tax
    pub property_tax: f64,
    /// Annual home insurance premium
    pub home_insurance: f64,
    /// Add tax, insurance and PMI to the monthly payment
    pub include_escrow: bool,
}

impl Default for MortgageParameters {
    fn default() -> Self {
        Self {
            property_price: 300_000.0,
            down_payment: 60_000.0,
            annual_rate_percent: 4.5,
            term: LoanTerm::Years(30),
            property_tax: 2_400.0,
            home_insurance: 1_000.0,
            include_escrow: true,
        }
    }
}

impl MortgageParameters {
    /// Amount financed
    pub fn loan_amount(&self) -> f64 {
        self.property_price - self.down_payment
    }

    pub fn down_payment_percent(&self) -> f64 {
        self.down_payment / self.property_price * 100.0
    }

    pub fn validate(&self) -> Result<()> {
        require_positive("property_price", self.property_price)?;
        require_non_negative("down_payment", self.down_payment)?;
        if self.down_payment > self.property_price {
            return Err(CalcError::invalid(
                "down_payment",
                format!(
                    "must not exceed the property price ({} > {})",
                    self.down_payment, self.property_price
                ),
            ));
        }
        require_rate("annual_rate_percent", self.annual_rate_percent)?;
        self.term.validated_months()?;
        require_non_negative("property_tax", self.property_tax)?;
        require_non_negative("home_insurance", self.home_insurance)?;
        Ok(())
    }
}

/// Monthly breakdown and lifetime totals of a mortgage
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MortgageResult {
    pub loan_amount: f64,
    pub down_payment_percent: f64,
    pub principal_and_interest: f64,
    pub monthly_property_tax: f64,
    pub monthly_insurance: f64,
    pub monthly_pmi: f64,
    /// Everything due each month
    pub monthly_payment: f64,
    /// All monthly payments plus the down payment
    pub total_payment: f64,
    /// Interest on the financed amount only
    pub total_interest: f64,
}

/// Monthly PMI, zero once the down payment reaches the threshold
pub fn monthly_pmi(property_price: f64, down_payment: f64) -> f64 {
    // Compared as scaled products so an exact 20% never trips PMI
    if down_payment * 100.0 < property_price * PMI_THRESHOLD_PERCENT {
        (property_price - down_payment) * PMI_ANNUAL_RATE / MONTHS_PER_YEAR as f64
    } else {
        0.0
    }
}

pub fn mortgage_payment(params: &MortgageParameters) -> Result<MortgageResult> {
    params.validate()?;

    let months = params.term.validated_months()?;
    let loan_amount = params.loan_amount();
    let principal_and_interest = amortized_payment(loan_amount, params.annual_rate_percent, months)?;

    let (monthly_property_tax, monthly_insurance, monthly_pmi) = if params.include_escrow {
        (
            params.property_tax / MONTHS_PER_YEAR as f64,
            params.home_insurance / MONTHS_PER_YEAR as f64,
            monthly_pmi(params.property_price, params.down_payment),
        )
    } else {
        (0.0, 0.0, 0.0)
    };

    let monthly_payment = principal_and_interest + monthly_property_tax + monthly_insurance + monthly_pmi;
    let total_payment = monthly_payment * months as f64 + params.down_payment;
    if !total_payment.is_finite() {
        log::warn!("Mortgage totals out of range for {:?}, reporting 0", params);
        return Ok(MortgageResult::default());
    }
    let total_interest = if principal_and_interest == 0.0 {
        0.0
    } else {
        (principal_and_interest * months as f64 - loan_amount).max(0.0)
    };

    log::debug!(
        "Mortgage {:.2} financed over {}m: P&I {:.2}, total monthly {:.2}",
        loan_amount, months, principal_and_interest, monthly_payment
    );

    Ok(MortgageResult {
        loan_amount,
        down_payment_percent: params.down_payment_percent(),
        principal_and_interest,
        monthly_property_tax,
        monthly_insurance,
        monthly_pmi,
        monthly_payment,
        total_payment,
        total_interest,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    #[test]
    fn test_no_pmi_at_twenty_percent_down() {
        let result = mortgage_payment(&MortgageParameters::default()).unwrap();

        assert_eq!(result.monthly_pmi, 0.0);
        assert_relative_eq!(result.loan_amount, 240_000.0);
        assert_relative_eq!(result.down_payment_percent, 20.0, epsilon = 1e-9);
        assert_abs_diff_eq!(result.principal_and_interest, 1_216.04, epsilon = 0.01);
        assert_abs_diff_eq!(result.monthly_property_tax, 200.0, epsilon = 1e-9);
        assert_abs_diff_eq!(result.monthly_insurance, 1_000.0 / 12.0, epsilon = 1e-9);
        assert_abs_diff_eq!(
            result.monthly_payment,
            result.principal_and_interest + 200.0 + 1_000.0 / 12.0,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_pmi_below_threshold() {
        let params = MortgageParameters {
            down_payment: 30_000.0,
            ..MortgageParameters::default()
        };
        let result = mortgage_payment(&params).unwrap();

        // 0.5% of 270,000 per year
        assert_abs_diff_eq!(result.monthly_pmi, 112.5, epsilon = 1e-9);
        assert!(monthly_pmi(300_000.0, 59_999.0) > 0.0);
        assert_eq!(monthly_pmi(300_000.0, 60_001.0), 0.0);
    }

    #[test]
    fn test_escrow_excluded() {
        let params = MortgageParameters {
            down_payment: 15_000.0,
            include_escrow: false,
            ..MortgageParameters::default()
        };
        let result = mortgage_payment(&params).unwrap();

        assert_eq!(result.monthly_pmi, 0.0);
        assert_eq!(result.monthly_property_tax, 0.0);
        assert_eq!(result.monthly_payment, result.principal_and_interest);
    }

    #[test]
    fn test_totals_include_down_payment() {
        let params = MortgageParameters::default();
        let result = mortgage_payment(&params).unwrap();

        assert_abs_diff_eq!(
            result.total_payment,
            result.monthly_payment * 360.0 + 60_000.0,
            epsilon = 1e-6
        );
        assert_abs_diff_eq!(
            result.total_interest,
            result.principal_and_interest * 360.0 - 240_000.0,
            epsilon = 1e-6
        );
    }

    #[test]
    fn test_overflowing_totals_report_zero() {
        let params = MortgageParameters {
            property_price: 1e308,
            down_payment: 0.0,
            annual_rate_percent: 5.0,
            ..MortgageParameters::default()
        };
        assert_eq!(mortgage_payment(&params).unwrap(), MortgageResult::default());
    }

    #[test]
    fn test_paid_in_full_has_no_loan() {
        let params = MortgageParameters {
            down_payment: 300_000.0,
            ..MortgageParameters::default()
        };
        let result = mortgage_payment(&params).unwrap();

        assert_eq!(result.loan_amount, 0.0);
        assert_eq!(result.principal_and_interest, 0.0);
        assert_eq!(result.total_interest, 0.0);
        assert_eq!(result.monthly_pmi, 0.0);
    }

    #[test]
    fn test_invalid_mortgages() {
        let cases = [
            (MortgageParameters { property_price: 0.0, ..Default::default() }, "property_price"),
            (MortgageParameters { down_payment: -1.0, ..Default::default() }, "down_payment"),
            (MortgageParameters { down_payment: 300_001.0, ..Default::default() }, "down_payment"),
            (MortgageParameters { annual_rate_percent: -4.5, ..Default::default() }, "annual_rate_percent"),
            (MortgageParameters { term: LoanTerm::Years(0), ..Default::default() }, "term"),
            (MortgageParameters { term: LoanTerm::Years(101), ..Default::default() }, "term"),
            (MortgageParameters { term: LoanTerm::Years(u32::MAX), ..Default::default() }, "term"),
            (MortgageParameters { annual_rate_percent: 1e6, ..Default::default() }, "annual_rate_percent"),
            (MortgageParameters { property_tax: f64::NAN, ..Default::default() }, "property_tax"),
            (MortgageParameters { home_insurance: -10.0, ..Default::default() }, "home_insurance"),
        ];
        for (params, field) in cases.iter() {
            assert_eq!(mortgage_payment(params).unwrap_err().field(), *field);
        }
    }
}
