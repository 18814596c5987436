//! Fixed-payment loan amortization

use serde::{Deserialize, Serialize};

use crate::error::{CalcError, Result};
use crate::validation::{
    require_bounded_term, require_non_negative, require_positive, require_rate, MAX_TERM_MONTHS,
};

/// Months in a year; payments are always monthly
pub const MONTHS_PER_YEAR: u32 = 12;

/// Length of a loan, in the unit the borrower quoted it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoanTerm {
    Months(u32),
    Years(u32),
}

impl LoanTerm {
    /// Number of monthly payments
    pub fn months(&self) -> Result<u32> {
        match *self {
            LoanTerm::Months(m) => Ok(m),
            LoanTerm::Years(y) => y
                .checked_mul(MONTHS_PER_YEAR)
                .ok_or_else(|| CalcError::invalid("term", format!("{} years does not fit in months", y))),
        }
    }

    /// Month count checked against the supported range
    pub fn validated_months(&self) -> Result<u32> {
        require_bounded_term("term", self.months()?, MAX_TERM_MONTHS)
    }
}

/// Inputs for a personal loan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanParameters {
    /// Amount borrowed
    pub principal: f64,
    /// Nominal annual rate in percent (5.0 = 5%)
    pub annual_rate_percent: f64,
    pub term: LoanTerm,
}

impl Default for LoanParameters {
    fn default() -> Self {
        Self {
            principal: 10_000.0,
            annual_rate_percent: 5.0,
            term: LoanTerm::Months(36),
        }
    }
}

impl LoanParameters {
    pub fn new(principal: f64, annual_rate_percent: f64, term: LoanTerm) -> Self {
        Self { principal, annual_rate_percent, term }
    }

    pub fn validate(&self) -> Result<()> {
        require_positive("principal", self.principal)?;
        require_rate("annual_rate_percent", self.annual_rate_percent)?;
        self.term.validated_months()?;
        Ok(())
    }
}

/// Outputs of a loan calculation
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LoanResult {
    pub monthly_payment: f64,
    pub total_payment: f64,
    pub total_interest: f64,
}

impl LoanResult {
    pub fn zero() -> Self {
        Self::default()
    }
}

/// Monthly rate from an annual percentage
pub fn monthly_rate(annual_rate_percent: f64) -> f64 {
    annual_rate_percent / 100.0 / MONTHS_PER_YEAR as f64
}

/// Payment that retires `principal` in `term_months` equal instalments.
///
/// A zero rate falls back to straight division. A non-finite result is
/// reported as 0 rather than NaN.
pub fn amortized_payment(principal: f64, annual_rate_percent: f64, term_months: u32) -> Result<f64> {
    require_non_negative("principal", principal)?;
    require_rate("annual_rate_percent", annual_rate_percent)?;
    require_bounded_term("term_months", term_months, MAX_TERM_MONTHS)?;

    let payment = raw_payment(principal, monthly_rate(annual_rate_percent), term_months);
    if !payment.is_finite() {
        log::warn!(
            "Non-finite payment for principal={} rate={}% term={}m, reporting 0",
            principal, annual_rate_percent, term_months
        );
        return Ok(0.0);
    }
    Ok(payment)
}

fn raw_payment(principal: f64, rate: f64, term_months: u32) -> f64 {
    let n = term_months as f64;
    if rate == 0.0 {
        return principal / n;
    }
    // P * r / (1 - (1 + r)^-n), with the discount term kept accurate for rates near zero
    let discounted = -(-n * rate.ln_1p()).exp_m1();
    principal * rate / discounted
}

/// Full loan calculation: payment, total paid and interest cost
pub fn calculate_loan(params: &LoanParameters) -> Result<LoanResult> {
    params.validate()?;

    let months = params.term.validated_months()?;
    let monthly_payment = amortized_payment(params.principal, params.annual_rate_percent, months)?;
    let total_payment = monthly_payment * months as f64;
    if monthly_payment == 0.0 || !total_payment.is_finite() {
        log::warn!("Loan totals out of range for {:?}, reporting 0", params);
        return Ok(LoanResult::zero());
    }

    // Rounding can leave a hair below zero when the rate is 0
    let total_interest = (total_payment - params.principal).max(0.0);

    log::debug!(
        "Loan {:.2} @ {}% over {}m: payment {:.2}, interest {:.2}",
        params.principal, params.annual_rate_percent, months, monthly_payment, total_interest
    );

    Ok(LoanResult {
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
    fn test_reference_loan() {
        // 10,000 at 5% over 36 months
        let result = calculate_loan(&LoanParameters::default()).unwrap();
        assert_abs_diff_eq!(result.monthly_payment, 299.71, epsilon = 0.005);
        assert_abs_diff_eq!(result.total_payment, 10_789.56, epsilon = 0.05);
        assert_abs_diff_eq!(result.total_interest, 789.56, epsilon = 0.05);
    }

    #[test]
    fn test_zero_rate_is_linear() {
        let payment = amortized_payment(12_000.0, 0.0, 48).unwrap();
        assert_relative_eq!(payment, 12_000.0 / 48.0);

        let result = calculate_loan(&LoanParameters::new(12_000.0, 0.0, LoanTerm::Months(48))).unwrap();
        assert_eq!(result.total_interest, 0.0);
        assert_relative_eq!(result.total_payment, 12_000.0, epsilon = 1e-9);
    }

    #[test]
    fn test_total_never_below_principal() {
        for &rate in &[0.0, 0.1, 2.5, 7.0, 19.99, 36.0] {
            for &months in &[1, 12, 60, 360] {
                let p = 25_000.0;
                let payment = amortized_payment(p, rate, months).unwrap();
                assert!(payment * months as f64 >= p - 1e-6, "rate {} months {}", rate, months);
            }
        }
    }

    #[test]
    fn test_interest_increases_with_rate() {
        let mut last = -1.0;
        for &rate in &[0.0, 1.0, 3.0, 5.0, 10.0] {
            let result = calculate_loan(&LoanParameters::new(50_000.0, rate, LoanTerm::Years(5))).unwrap();
            assert!(result.total_interest > last);
            last = result.total_interest;
        }
    }

    #[test]
    fn test_pure_function() {
        let params = LoanParameters::new(8_500.0, 6.25, LoanTerm::Months(27));
        assert_eq!(calculate_loan(&params).unwrap(), calculate_loan(&params).unwrap());
    }

    #[test]
    fn test_single_month_loan() {
        // One payment covers principal plus one month of interest
        let payment = amortized_payment(1_200.0, 12.0, 1).unwrap();
        assert_relative_eq!(payment, 1_212.0, epsilon = 1e-9);
    }

    #[test]
    fn test_term_units() {
        assert_eq!(LoanTerm::Years(30).months().unwrap(), 360);
        assert_eq!(LoanTerm::Months(36).months().unwrap(), 36);
        assert_eq!(LoanTerm::Years(u32::MAX).months().unwrap_err().field(), "term");
    }

    #[test]
    fn test_tiny_rate_behaves_like_zero_rate() {
        // 1 + r rounds to 1 here; the payment must still retire the principal
        let payment = amortized_payment(10_000.0, 1e-15, 36).unwrap();
        assert_relative_eq!(payment, 10_000.0 / 36.0, max_relative = 1e-12);

        let result = calculate_loan(&LoanParameters::new(10_000.0, 1e-15, LoanTerm::Months(36))).unwrap();
        assert!(result.monthly_payment > 0.0);
        assert!(result.total_payment >= 10_000.0 - 1e-6);
    }

    #[test]
    fn test_longest_term_at_highest_rate() {
        // (1 + r)^n alone would overflow; the payment tends to P * r
        let payment = amortized_payment(1_000.0, 1_000.0, 1_200).unwrap();
        assert_relative_eq!(payment, 1_000.0 * 1_000.0 / 1_200.0, max_relative = 1e-12);
    }

    #[test]
    fn test_overflowing_totals_report_zero() {
        let result = calculate_loan(&LoanParameters::new(1e308, 1_000.0, LoanTerm::Months(1_200))).unwrap();
        assert_eq!(result, LoanResult::zero());
    }

    #[test]
    fn test_invalid_inputs() {
        let bad = [
            (LoanParameters::new(-1.0, 5.0, LoanTerm::Months(12)), "principal"),
            (LoanParameters::new(0.0, 5.0, LoanTerm::Months(12)), "principal"),
            (LoanParameters::new(f64::NAN, 5.0, LoanTerm::Months(12)), "principal"),
            (LoanParameters::new(1_000.0, -0.5, LoanTerm::Months(12)), "annual_rate_percent"),
            (LoanParameters::new(1_000.0, f64::INFINITY, LoanTerm::Months(12)), "annual_rate_percent"),
            (LoanParameters::new(1_000.0, 5.0, LoanTerm::Months(0)), "term"),
            (LoanParameters::new(1_000.0, 5.0, LoanTerm::Years(0)), "term"),
            (LoanParameters::new(1_000.0, 5.0, LoanTerm::Months(1_201)), "term"),
            (LoanParameters::new(1_000.0, 5.0, LoanTerm::Years(101)), "term"),
            (LoanParameters::new(1_000.0, 5.0, LoanTerm::Years(400_000_000)), "term"),
            (LoanParameters::new(1_000.0, 5.0, LoanTerm::Months(u32::MAX)), "term"),
            (LoanParameters::new(1_000.0, 1e6, LoanTerm::Months(12)), "annual_rate_percent"),
        ];
        for (params, field) in bad.iter() {
            let err = calculate_loan(params).unwrap_err();
            assert_eq!(err.field(), *field);
        }
        assert!(amortized_payment(1_000.0, 5.0, 0).is_err());
        assert!(amortized_payment(1_000.0, 5.0, u32::MAX).is_err());
    }
}
