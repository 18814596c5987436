//! Investment portfolio projection net of fees and inflation

use serde::{Deserialize, Serialize};

use super::accumulate::{accumulate, GrowthInputs};
use super::frequency::CompoundingFrequency;
use super::savings::compound_growth;
use super::validate_horizon;
use crate::error::Result;
use crate::validation::{require_non_negative, require_percent_range, require_rate};

/// Asset mix of a portfolio, in percent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Allocation {
    pub bonds: u8,
    pub stocks: u8,
    pub cash: u8,
}

/// Preset risk profiles offered on the investment planner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PortfolioTemplate {
    Conservative,
    Balanced,
    Growth,
    Aggressive,
}

impl PortfolioTemplate {
    pub const ALL: [PortfolioTemplate; 4] = [
        PortfolioTemplate::Conservative,
        PortfolioTemplate::Balanced,
        PortfolioTemplate::Growth,
        PortfolioTemplate::Aggressive,
    ];

    /// Expected annual return in percent
    pub fn expected_return_percent(&self) -> f64 {
        match self {
            PortfolioTemplate::Conservative => 4.0,
            PortfolioTemplate::Balanced => 6.0,
            PortfolioTemplate::Growth => 8.0,
            PortfolioTemplate::Aggressive => 10.0,
        }
    }

    pub fn risk(&self) -> &'static str {
        match self {
            PortfolioTemplate::Conservative => "Low",
            PortfolioTemplate::Balanced => "Medium",
            PortfolioTemplate::Growth => "Medium-High",
            PortfolioTemplate::Aggressive => "High",
        }
    }

    pub fn allocation(&self) -> Allocation {
        match self {
            PortfolioTemplate::Conservative => Allocation { bonds: 60, stocks: 30, cash: 10 },
            PortfolioTemplate::Balanced => Allocation { bonds: 40, stocks: 50, cash: 10 },
            PortfolioTemplate::Growth => Allocation { bonds: 20, stocks: 70, cash: 10 },
            PortfolioTemplate::Aggressive => Allocation { bonds: 5, stocks: 90, cash: 5 },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvestmentParameters {
    pub initial_investment: f64,
    pub monthly_contribution: f64,
    /// Expected annual return in percent
    pub annual_rate_percent: f64,
    pub years: u32,
    pub compounding: CompoundingFrequency,
    /// Annual management fee in percent of the balance
    pub annual_fee_percent: f64,
    /// Annual inflation in percent, used to deflate the final balance
    pub inflation_rate_percent: f64,
}

impl Default for InvestmentParameters {
    fn default() -> Self {
        Self {
            initial_investment: 10_000.0,
            monthly_contribution: 500.0,
            annual_rate_percent: 7.0,
            years: 20,
            compounding: CompoundingFrequency::Monthly,
            annual_fee_percent: 0.5,
            inflation_rate_percent: 2.5,
        }
    }
}

impl InvestmentParameters {
    /// Take the expected return from a preset portfolio
    pub fn with_portfolio(mut self, template: PortfolioTemplate) -> Self {
        self.annual_rate_percent = template.expected_return_percent();
        self
    }

    pub fn validate(&self) -> Result<()> {
        require_non_negative("initial_investment", self.initial_investment)?;
        require_non_negative("monthly_contribution", self.monthly_contribution)?;
        require_rate("annual_rate_percent", self.annual_rate_percent)?;
        validate_horizon(self.years)?;
        require_percent_range("annual_fee_percent", self.annual_fee_percent)?;
        require_rate("inflation_rate_percent", self.inflation_rate_percent)?;
        Ok(())
    }
}

/// Portfolio state at the end of a year
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InvestmentSnapshot {
    pub year: u32,
    pub balance: f64,
    /// Cumulative deposits including the initial investment
    pub contributions: f64,
    /// Cumulative fees deducted
    pub fees: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvestmentResult {
    /// Balance after fees
    pub final_balance: f64,
    pub total_contributions: f64,
    /// Growth net of fees
    pub total_return: f64,
    pub total_fees: f64,
    /// Final balance in today's money
    pub inflation_adjusted_balance: f64,
    pub snapshots: Vec<InvestmentSnapshot>,
}

pub fn project_investment(params: &InvestmentParameters) -> Result<InvestmentResult> {
    params.validate()?;

    let inputs = GrowthInputs {
        initial_deposit: params.initial_investment,
        monthly_contribution: params.monthly_contribution,
        annual_rate_percent: params.annual_rate_percent,
        annual_fee_percent: params.annual_fee_percent,
        years: params.years,
        frequency: params.compounding,
    };
    let year_ends = accumulate(&inputs)?;

    let (final_balance, total_fees) = year_ends
        .last()
        .map(|y| (y.balance, y.fees))
        .unwrap_or((params.initial_investment, 0.0));
    let total_contributions = inputs.contributions_through(params.years);

    // Inflation compounds annually
    let inflation_factor = compound_growth(
        1.0,
        params.inflation_rate_percent,
        params.years,
        CompoundingFrequency::Annually,
    )?;
    let inflation_adjusted_balance = final_balance / inflation_factor;

    log::debug!(
        "Investment over {}y: balance {:.2}, fees {:.2}, real {:.2}",
        params.years, final_balance, total_fees, inflation_adjusted_balance
    );

    Ok(InvestmentResult {
        final_balance,
        total_contributions,
        total_return: final_balance - total_contributions,
        total_fees,
        inflation_adjusted_balance,
        snapshots: year_ends
            .iter()
            .map(|y| InvestmentSnapshot {
                year: y.year,
                balance: y.balance,
                contributions: y.contributions,
                fees: y.fees,
            })
            .collect(),
    })
}
