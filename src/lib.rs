//! Bank Calculators - calculation engine behind the loan, mortgage, savings and investment tools
//!
//! This library provides:
//! - Fixed-payment amortization for loans and mortgages (with tax, insurance and PMI add-ons)
//! - Month-by-month amortization tables
//! - Compound growth with periodic contributions at any compounding frequency
//! - Investment projections net of fees, deflated for inflation
//! - Parallel comparison of scenario variations
//!
//! Every entry point is a pure function from a parameter record to a result record.
//! Invalid inputs are rejected with [`CalcError::InvalidInput`] naming the field.

pub mod error;
pub mod validation;
pub mod amortization;
pub mod compounding;
pub mod scenario;

// Re-export commonly used types
pub use error::{CalcError, Result};
pub use amortization::{
    amortized_payment, amortization_schedule, calculate_loan, mortgage_payment, AmortizationRow,
    LoanParameters, LoanResult, LoanTerm, MortgageParameters, MortgageResult,
};
pub use compounding::{
    compound_growth, compounding_schedule_with_contributions, project_investment,
    CompoundingFrequency, InvestmentParameters, InvestmentResult, PortfolioTemplate,
    SavingsParameters, SavingsResult,
};
pub use scenario::{Calculation, ScenarioRunner};
