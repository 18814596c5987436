//! Compare loan costs across a range of interest rates
//!
//! Usage: cargo run --bin rate_sweep [-- --json]
//!
//! Environment:
//!   SWEEP_PRINCIPAL    amount borrowed (default 10000)
//!   SWEEP_TERM_MONTHS  loan term in months (default 36)

use anyhow::Result;
use bank_calculators::{LoanParameters, LoanResult, LoanTerm, ScenarioRunner};
use serde::Serialize;
use std::env;
use std::time::Instant;

/// Rates swept, in percent
const RATES: [f64; 11] = [0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 8.0, 10.0, 15.0, 20.0];

#[derive(Debug, Serialize)]
struct SweepRow {
    rate_percent: f64,
    #[serde(flatten)]
    result: LoanResult,
}

fn main() -> Result<()> {
    env_logger::init();

    let json_output = env::args().any(|arg| arg == "--json");
    let start = Instant::now();

    let principal: f64 = env::var("SWEEP_PRINCIPAL")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(10_000.0);

    let term_months: u32 = env::var("SWEEP_TERM_MONTHS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(36);

    let runner = ScenarioRunner::new(LoanParameters::new(principal, 0.0, LoanTerm::Months(term_months)));
    let results = runner.run_sweep(&RATES, |p, &rate| p.annual_rate_percent = rate);

    let rows = RATES
        .iter()
        .zip(results)
        .map(|(&rate_percent, result)| -> Result<SweepRow> {
            Ok(SweepRow { rate_percent, result: result? })
        })
        .collect::<Result<Vec<_>>>()?;

    log::debug!("Swept {} rates in {:?}", rows.len(), start.elapsed());

    if json_output {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    println!("Loan of ${:.2} over {} months", principal, term_months);
    println!("{:>7} {:>12} {:>14} {:>14}", "Rate", "Payment", "Total", "Interest");
    println!("{}", "-".repeat(50));
    for row in &rows {
        println!(
            "{:>6.2}% {:>12.2} {:>14.2} {:>14.2}",
            row.rate_percent, row.result.monthly_payment, row.result.total_payment, row.result.total_interest
        );
    }

    Ok(())
}
