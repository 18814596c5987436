//! Period-by-period balance roll-forward shared by savings and investments
//!
//! Order within each compounding period:
//! 1. the period's share of the monthly contribution is deposited
//! 2. the management fee (if any) is deducted
//! 3. one period of interest is credited
//!
//! so a deposit earns interest in the period it is made.
//!
//! A roll-forward that overflows `f64` is rejected rather than returning
//! infinity or NaN.

use super::frequency::CompoundingFrequency;
use crate::amortization::MONTHS_PER_YEAR;
use crate::error::{CalcError, Result};

/// Inputs to the roll-forward, already validated by the caller
#[derive(Debug, Clone, Copy)]
pub(crate) struct GrowthInputs {
    pub initial_deposit: f64,
    pub monthly_contribution: f64,
    pub annual_rate_percent: f64,
    pub annual_fee_percent: f64,
    pub years: u32,
    pub frequency: CompoundingFrequency,
}

/// Balance state at a year boundary
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct YearEnd {
    pub year: u32,
    pub balance: f64,
    pub contributions: f64,
    pub fees: f64,
}

impl GrowthInputs {
    pub fn contribution_per_period(&self) -> f64 {
        self.monthly_contribution * MONTHS_PER_YEAR as f64 / self.frequency.periods_per_year() as f64
    }

    /// Deposits made by the end of `year`, including the initial deposit
    pub fn contributions_through(&self, year: u32) -> f64 {
        self.initial_deposit + self.monthly_contribution * MONTHS_PER_YEAR as f64 * year as f64
    }
}

/// Roll the balance forward, returning year 0 through `years` inclusive
pub(crate) fn accumulate(inputs: &GrowthInputs) -> Result<Vec<YearEnd>> {
    let k = inputs.frequency.periods_per_year();
    let rate = inputs.annual_rate_percent / 100.0 / k as f64;
    let fee_rate = inputs.annual_fee_percent / 100.0 / k as f64;
    let deposit = inputs.contribution_per_period();

    let mut balance = inputs.initial_deposit;
    let mut fees = 0.0;
    let mut year_ends = Vec::with_capacity(inputs.years as usize + 1);
    year_ends.push(YearEnd {
        year: 0,
        balance,
        contributions: inputs.initial_deposit,
        fees,
    });

    for year in 1..=inputs.years {
        for _period in 0..k {
            balance += deposit;

            let fee = balance * fee_rate;
            balance -= fee;
            fees += fee;

            balance *= 1.0 + rate;
        }

        let year_end = YearEnd {
            year,
            balance,
            contributions: inputs.contributions_through(year),
            fees,
        };
        check_finite(&year_end)?;
        year_ends.push(year_end);
    }

    Ok(year_ends)
}

fn check_finite(year_end: &YearEnd) -> Result<()> {
    if !year_end.contributions.is_finite() {
        return Err(CalcError::invalid(
            "monthly_contribution",
            format!("deposits overflow by year {}", year_end.year),
        ));
    }
    // inf * 0 fee turns an overflowed balance into NaN, so both are caught here
    if !year_end.balance.is_finite() || !year_end.fees.is_finite() {
        return Err(CalcError::invalid(
            "annual_rate_percent",
            format!("balance overflows in year {}", year_end.year),
        ));
    }
    Ok(())
}
