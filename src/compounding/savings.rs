//! Savings growth with regular deposits

use serde::{Deserialize, Serialize};

use super::accumulate::{accumulate, GrowthInputs};
use super::frequency::CompoundingFrequency;
use super::validate_horizon;
use crate::error::{CalcError, Result};
use crate::validation::{require_non_negative, require_percent_range, require_rate};

/// Inputs for a savings account projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavingsParameters {
    pub initial_deposit: f64,
    /// Deposit per month; spread evenly over the compounding periods
    pub monthly_contribution: f64,
    /// Nominal annual rate in percent
    pub annual_rate_percent: f64,
    pub years: u32,
    pub compounding: CompoundingFrequency,
    /// Tax charged on interest earned, in percent
    pub tax_rate_percent: Option<f64>,
}

impl Default for SavingsParameters {
    fn default() -> Self {
        Self {
            initial_deposit: 1_000.0,
            monthly_contribution: 200.0,
            annual_rate_percent: 5.0,
            years: 10,
            compounding: CompoundingFrequency::Monthly,
            tax_rate_percent: None,
        }
    }
}

impl SavingsParameters {
    pub fn validate(&self) -> Result<()> {
        require_non_negative("initial_deposit", self.initial_deposit)?;
        require_non_negative("monthly_contribution", self.monthly_contribution)?;
        require_rate("annual_rate_percent", self.annual_rate_percent)?;
        validate_horizon(self.years)?;
        if let Some(tax) = self.tax_rate_percent {
            require_percent_range("tax_rate_percent", tax)?;
        }
        Ok(())
    }
}

/// Balance at the end of a year
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YearlySnapshot {
    pub year: u32,
    pub balance: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavingsResult {
    pub final_balance: f64,
    pub total_contributions: f64,
    pub total_interest_earned: f64,
    /// Tax on positive interest; zero when no tax rate is given
    pub tax_paid: f64,
    pub after_tax_balance: f64,
    /// Year 0 (initial deposit) through the final year
    pub snapshots: Vec<YearlySnapshot>,
}

/// Lump sum growth without deposits, closed form `P * (1 + r/k)^(k*years)`
pub fn compound_growth(
    principal: f64,
    annual_rate_percent: f64,
    years: u32,
    compounding: CompoundingFrequency,
) -> Result<f64> {
    require_non_negative("principal", principal)?;
    require_rate("annual_rate_percent", annual_rate_percent)?;
    validate_horizon(years)?;

    let k = compounding.periods_per_year() as f64;
    let grown = principal * (1.0 + annual_rate_percent / 100.0 / k).powf(k * years as f64);
    if !grown.is_finite() {
        return Err(CalcError::invalid(
            "annual_rate_percent",
            format!("growth over {} years overflows", years),
        ));
    }
    Ok(grown)
}

/// Project a savings balance with periodic deposits, recording each year end
pub fn compounding_schedule_with_contributions(params: &SavingsParameters) -> Result<SavingsResult> {
    params.validate()?;

    let inputs = GrowthInputs {
        initial_deposit: params.initial_deposit,
        monthly_contribution: params.monthly_contribution,
        annual_rate_percent: params.annual_rate_percent,
        annual_fee_percent: 0.0,
        years: params.years,
        frequency: params.compounding,
    };
    let year_ends = accumulate(&inputs)?;

    let final_balance = year_ends.last().map(|y| y.balance).unwrap_or(params.initial_deposit);
    let total_contributions = inputs.contributions_through(params.years);
    let total_interest_earned = final_balance - total_contributions;

    let tax_paid = match params.tax_rate_percent {
        Some(tax) => total_interest_earned.max(0.0) * tax / 100.0,
        None => 0.0,
    };

    log::debug!(
        "Savings over {}y ({}): balance {:.2}, interest {:.2}",
        params.years, params.compounding, final_balance, total_interest_earned
    );

    Ok(SavingsResult {
        final_balance,
        total_contributions,
        total_interest_earned,
        tax_paid,
        after_tax_balance: final_balance - tax_paid,
        snapshots: year_ends
            .iter()
            .map(|y| YearlySnapshot { year: y.year, balance: y.balance })
            .collect(),
    })
}
