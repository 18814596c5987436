//! Month-by-month amortization table

use serde::{Deserialize, Serialize};

use super::loan::{amortized_payment, monthly_rate, LoanParameters};
use crate::error::Result;

/// A single payment in an amortization table
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AmortizationRow {
    pub month: u32,
    pub payment: f64,
    pub principal: f64,
    pub interest: f64,
    /// Balance outstanding after this payment
    pub balance: f64,
}

/// Split every payment of the loan into its interest and principal portions
pub fn amortization_schedule(params: &LoanParameters) -> Result<Vec<AmortizationRow>> {
    params.validate()?;

    let months = params.term.validated_months()?;
    let payment = amortized_payment(params.principal, params.annual_rate_percent, months)?;
    if payment == 0.0 {
        return Ok(Vec::new());
    }

    let rate = monthly_rate(params.annual_rate_percent);
    let mut balance = params.principal;
    let mut rows = Vec::with_capacity(months as usize);

    for month in 1..=months {
        let interest = balance * rate;
        let mut principal = payment - interest;

        // Last payment absorbs accumulated rounding drift
        if month == months {
            principal = balance;
        }
        balance = (balance - principal).max(0.0);

        rows.push(AmortizationRow {
            month,
            payment: principal + interest,
            principal,
            interest,
            balance,
        });
    }

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::amortization::loan::{calculate_loan, LoanTerm};
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_schedule_pays_off_loan() {
        let params = LoanParameters::default();
        let rows = amortization_schedule(&params).unwrap();

        assert_eq!(rows.len(), 36);
        assert_eq!(rows.last().unwrap().balance, 0.0);

        let principal_paid: f64 = rows.iter().map(|r| r.principal).sum();
        assert_abs_diff_eq!(principal_paid, params.principal, epsilon = 1e-6);
    }

    #[test]
    fn test_schedule_matches_loan_totals() {
        let params = LoanParameters::new(240_000.0, 4.5, LoanTerm::Years(30));
        let rows = amortization_schedule(&params).unwrap();
        let result = calculate_loan(&params).unwrap();

        let interest_paid: f64 = rows.iter().map(|r| r.interest).sum();
        assert_abs_diff_eq!(interest_paid, result.total_interest, epsilon = 0.01);

        // Interest share shrinks as the balance is paid down
        assert!(rows[0].interest > rows[1].interest);
        assert!(rows[0].principal < rows[359].principal);
    }

    #[test]
    fn test_zero_rate_schedule_is_flat() {
        let params = LoanParameters::new(1_200.0, 0.0, LoanTerm::Months(12));
        let rows = amortization_schedule(&params).unwrap();
        for row in &rows {
            assert_eq!(row.interest, 0.0);
            assert_abs_diff_eq!(row.principal, 100.0, epsilon = 1e-9);
        }
        assert_abs_diff_eq!(rows[5].balance, 600.0, epsilon = 1e-9);
    }

    #[test]
    fn test_schedule_rejects_invalid_loan() {
        let params = LoanParameters::new(1_000.0, 5.0, LoanTerm::Months(0));
        assert!(amortization_schedule(&params).is_err());

        // Rejected before any rows are allocated
        let huge = LoanParameters::new(1_000.0, 0.0, LoanTerm::Months(u32::MAX));
        assert_eq!(amortization_schedule(&huge).unwrap_err().field(), "term");
    }

    #[test]
    fn test_longest_supported_schedule() {
        let params = LoanParameters::new(500_000.0, 3.0, LoanTerm::Years(100));
        let rows = amortization_schedule(&params).unwrap();
        assert_eq!(rows.len(), 1_200);
        assert_eq!(rows.last().unwrap().balance, 0.0);
    }
}
