//! Side-by-side comparison of calculator scenarios
//!
//! Every calculation is pure, so variations of a base scenario are run in
//! parallel with no coordination. Results come back in input order.

use rayon::prelude::*;

use crate::amortization::{
    calculate_loan, mortgage_payment, LoanParameters, LoanResult, MortgageParameters, MortgageResult,
};
use crate::compounding::{
    compounding_schedule_with_contributions, project_investment, InvestmentParameters,
    InvestmentResult, SavingsParameters, SavingsResult,
};
use crate::error::Result;

/// A parameter record that knows which calculator to run
pub trait Calculation {
    type Output: Send;

    fn calculate(&self) -> Result<Self::Output>;
}

impl Calculation for LoanParameters {
    type Output = LoanResult;

    fn calculate(&self) -> Result<LoanResult> {
        calculate_loan(self)
    }
}

impl Calculation for MortgageParameters {
    type Output = MortgageResult;

    fn calculate(&self) -> Result<MortgageResult> {
        mortgage_payment(self)
    }
}

impl Calculation for SavingsParameters {
    type Output = SavingsResult;

    fn calculate(&self) -> Result<SavingsResult> {
        compounding_schedule_with_contributions(self)
    }
}

impl Calculation for InvestmentParameters {
    type Output = InvestmentResult;

    fn calculate(&self) -> Result<InvestmentResult> {
        project_investment(self)
    }
}

/// Runs variations of a base scenario
///
/// # Example
/// ```
/// use bank_calculators::{LoanParameters, ScenarioRunner};
///
/// let runner = ScenarioRunner::new(LoanParameters::default());
/// let results = runner.run_sweep(&[3.0, 5.0, 7.0], |p, &rate| p.annual_rate_percent = rate);
/// assert_eq!(results.len(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct ScenarioRunner<P> {
    base: P,
}

impl<P> ScenarioRunner<P>
where
    P: Calculation + Clone + Sync,
{
    pub fn new(base: P) -> Self {
        Self { base }
    }

    /// Run the base scenario unchanged
    pub fn run(&self) -> Result<P::Output> {
        self.base.calculate()
    }

    /// Run one scenario per value, each a copy of the base with `apply` used to vary it
    pub fn run_sweep<T, F>(&self, values: &[T], apply: F) -> Vec<Result<P::Output>>
    where
        T: Sync,
        F: Fn(&mut P, &T) + Sync,
    {
        log::debug!("Running {} scenario variations", values.len());
        values
            .par_iter()
            .map(|value| {
                let mut params = self.base.clone();
                apply(&mut params, value);
                params.calculate()
            })
            .collect()
    }

    /// Run unrelated scenarios of the same kind
    pub fn run_batch(scenarios: &[P]) -> Vec<Result<P::Output>> {
        scenarios.par_iter().map(|p| p.calculate()).collect()
    }

    pub fn base(&self) -> &P {
        &self.base
    }

    pub fn base_mut(&mut self) -> &mut P {
        &mut self.base
    }
}
