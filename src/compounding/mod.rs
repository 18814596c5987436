//! Compound growth for savings accounts and investment portfolios

mod accumulate;
mod frequency;
mod investment;
mod savings;

pub use frequency::CompoundingFrequency;
pub use investment::{
    project_investment, Allocation, InvestmentParameters, InvestmentResult, InvestmentSnapshot,
    PortfolioTemplate,
};
pub use savings::{
    compound_growth, compounding_schedule_with_contributions, SavingsParameters, SavingsResult,
    YearlySnapshot,
};

pub use crate::validation::MAX_YEARS;

use crate::error::Result;
use crate::validation::require_bounded_term;

fn validate_horizon(years: u32) -> Result<u32> {
    require_bounded_term("years", years, MAX_YEARS)
}
