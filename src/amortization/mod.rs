//! Loan and mortgage amortization

mod loan;
mod mortgage;
mod schedule;

pub use loan::{
    amortized_payment, calculate_loan, monthly_rate, LoanParameters, LoanResult, LoanTerm,
    MONTHS_PER_YEAR,
};
pub use mortgage::{
    monthly_pmi, mortgage_payment, MortgageParameters, MortgageResult, PMI_ANNUAL_RATE,
    PMI_THRESHOLD_PERCENT,
};
pub use schedule::{amortization_schedule, AmortizationRow};
