//! Bank calculators CLI
//!
//! Runs any of the four calculators from the command line. Defaults match the
//! values the website tools open with.

use anyhow::{Context, Result};
use bank_calculators::{
    amortization_schedule, calculate_loan, compounding_schedule_with_contributions, mortgage_payment,
    project_investment, CompoundingFrequency, InvestmentParameters, LoanParameters, LoanTerm,
    MortgageParameters, PortfolioTemplate, SavingsParameters,
};
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "bank-calc", version, about = "Loan, mortgage, savings and investment calculators")]
struct Cli {
    /// Print the result as JSON instead of a summary
    #[arg(long, global = true)]
    json: bool,

    /// Write the amortization table or yearly snapshots to a CSV file
    #[arg(long, global = true, value_name = "PATH")]
    csv: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fixed-payment personal loan
    Loan(LoanArgs),
    /// Home loan with tax, insurance and PMI
    Mortgage(MortgageArgs),
    /// Savings account with monthly deposits
    Savings(SavingsArgs),
    /// Investment portfolio net of fees and inflation
    Investment(InvestmentArgs),
}

#[derive(Args, Debug)]
struct LoanArgs {
    #[arg(long, default_value_t = 10_000.0)]
    amount: f64,
    /// Annual interest rate in percent
    #[arg(long, default_value_t = 5.0)]
    rate: f64,
    #[arg(long, default_value_t = 36)]
    months: u32,
}

#[derive(Args, Debug)]
struct MortgageArgs {
    #[arg(long, default_value_t = 300_000.0)]
    price: f64,
    #[arg(long, default_value_t = 60_000.0)]
    down_payment: f64,
    #[arg(long, default_value_t = 4.5)]
    rate: f64,
    #[arg(long, default_value_t = 30)]
    years: u32,
    /// Annual property tax
    #[arg(long, default_value_t = 2_400.0)]
    property_tax: f64,
    /// Annual home insurance
    #[arg(long, default_value_t = 1_000.0)]
    insurance: f64,
    /// Report principal and interest only
    #[arg(long)]
    no_escrow: bool,
}

#[derive(Args, Debug)]
struct SavingsArgs {
    #[arg(long, default_value_t = 1_000.0)]
    initial: f64,
    #[arg(long, default_value_t = 200.0)]
    monthly: f64,
    #[arg(long, default_value_t = 5.0)]
    rate: f64,
    #[arg(long, default_value_t = 10)]
    years: u32,
    /// daily, weekly, monthly, quarterly, semi-annually or annually
    #[arg(long, default_value_t = CompoundingFrequency::Monthly)]
    compounding: CompoundingFrequency,
    /// Tax on interest earned, in percent
    #[arg(long)]
    tax_rate: Option<f64>,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum Portfolio {
    Conservative,
    Balanced,
    Growth,
    Aggressive,
}

impl From<Portfolio> for PortfolioTemplate {
    fn from(p: Portfolio) -> Self {
        match p {
            Portfolio::Conservative => PortfolioTemplate::Conservative,
            Portfolio::Balanced => PortfolioTemplate::Balanced,
            Portfolio::Growth => PortfolioTemplate::Growth,
            Portfolio::Aggressive => PortfolioTemplate::Aggressive,
        }
    }
}

#[derive(Args, Debug)]
struct InvestmentArgs {
    #[arg(long, default_value_t = 10_000.0)]
    initial: f64,
    #[arg(long, default_value_t = 500.0)]
    monthly: f64,
    /// Expected annual return in percent; overridden by --portfolio
    #[arg(long, default_value_t = 7.0)]
    rate: f64,
    #[arg(long, value_enum)]
    portfolio: Option<Portfolio>,
    #[arg(long, default_value_t = 20)]
    years: u32,
    /// daily, weekly, monthly, quarterly, semi-annually or annually
    #[arg(long, default_value_t = CompoundingFrequency::Monthly)]
    compounding: CompoundingFrequency,
    /// Annual management fee in percent
    #[arg(long, default_value_t = 0.5)]
    fee: f64,
    /// Annual inflation in percent
    #[arg(long, default_value_t = 2.5)]
    inflation: f64,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    match &cli.command {
        Command::Loan(args) => run_loan(&cli, args),
        Command::Mortgage(args) => run_mortgage(&cli, args),
        Command::Savings(args) => run_savings(&cli, args),
        Command::Investment(args) => run_investment(&cli, args),
    }
}

fn run_loan(cli: &Cli, args: &LoanArgs) -> Result<()> {
    let params = LoanParameters::new(args.amount, args.rate, LoanTerm::Months(args.months));
    let result = calculate_loan(&params)?;

    if let Some(path) = &cli.csv {
        write_csv(path, &amortization_schedule(&params)?)?;
    }
    if cli.json {
        return print_json(&result);
    }

    println!("Loan: ${:.2} at {}% over {} months", params.principal, params.annual_rate_percent, args.months);
    println!("  Monthly Payment: ${:.2}", result.monthly_payment);
    println!("  Total Payment:   ${:.2}", result.total_payment);
    println!("  Total Interest:  ${:.2}", result.total_interest);
    Ok(())
}

fn run_mortgage(cli: &Cli, args: &MortgageArgs) -> Result<()> {
    let params = MortgageParameters {
        property_price: args.price,
        down_payment: args.down_payment,
        annual_rate_percent: args.rate,
        term: LoanTerm::Years(args.years),
        property_tax: args.property_tax,
        home_insurance: args.insurance,
        include_escrow: !args.no_escrow,
    };
    let result = mortgage_payment(&params)?;

    if let Some(path) = &cli.csv {
        let loan = LoanParameters::new(result.loan_amount, params.annual_rate_percent, params.term);
        // A fully paid-for home has nothing to amortize
        let rows = if result.loan_amount > 0.0 { amortization_schedule(&loan)? } else { Vec::new() };
        write_csv(path, &rows)?;
    }
    if cli.json {
        return print_json(&result);
    }

    println!("Mortgage: ${:.2} financed ({:.1}% down) over {} years", result.loan_amount, result.down_payment_percent, args.years);
    println!("  Principal & Interest: ${:.2}", result.principal_and_interest);
    println!("  Property Tax:         ${:.2}", result.monthly_property_tax);
    println!("  Home Insurance:       ${:.2}", result.monthly_insurance);
    println!("  PMI:                  ${:.2}", result.monthly_pmi);
    println!("  Monthly Payment:      ${:.2}", result.monthly_payment);
    println!("  Total Payment:        ${:.2}", result.total_payment);
    println!("  Total Interest:       ${:.2}", result.total_interest);
    Ok(())
}

fn run_savings(cli: &Cli, args: &SavingsArgs) -> Result<()> {
    let params = SavingsParameters {
        initial_deposit: args.initial,
        monthly_contribution: args.monthly,
        annual_rate_percent: args.rate,
        years: args.years,
        compounding: args.compounding,
        tax_rate_percent: args.tax_rate,
    };
    let result = compounding_schedule_with_contributions(&params)?;

    if let Some(path) = &cli.csv {
        write_csv(path, &result.snapshots)?;
    }
    if cli.json {
        return print_json(&result);
    }

    println!("Savings over {} years, compounded {}", params.years, params.compounding);
    println!("{:>5} {:>16}", "Year", "Balance");
    for snapshot in &result.snapshots {
        println!("{:>5} {:>16.2}", snapshot.year, snapshot.balance);
    }
    println!("  Final Balance:     ${:.2}", result.final_balance);
    println!("  Total Deposits:    ${:.2}", result.total_contributions);
    println!("  Interest Earned:   ${:.2}", result.total_interest_earned);
    if params.tax_rate_percent.is_some() {
        println!("  Tax on Interest:   ${:.2}", result.tax_paid);
        println!("  After-Tax Balance: ${:.2}", result.after_tax_balance);
    }
    Ok(())
}

fn run_investment(cli: &Cli, args: &InvestmentArgs) -> Result<()> {
    let mut params = InvestmentParameters {
        initial_investment: args.initial,
        monthly_contribution: args.monthly,
        annual_rate_percent: args.rate,
        years: args.years,
        compounding: args.compounding,
        annual_fee_percent: args.fee,
        inflation_rate_percent: args.inflation,
    };
    if let Some(portfolio) = args.portfolio {
        let template = PortfolioTemplate::from(portfolio);
        let allocation = template.allocation();
        log::info!(
            "Using {:?} portfolio ({} risk): {}% bonds, {}% stocks, {}% cash",
            template, template.risk(), allocation.bonds, allocation.stocks, allocation.cash
        );
        params = params.with_portfolio(template);
    }
    let result = project_investment(&params)?;

    if let Some(path) = &cli.csv {
        write_csv(path, &result.snapshots)?;
    }
    if cli.json {
        return print_json(&result);
    }

    println!("Investment over {} years at {}% expected return", params.years, params.annual_rate_percent);
    println!("{:>5} {:>16} {:>16} {:>12}", "Year", "Balance", "Contributions", "Fees");
    for s in &result.snapshots {
        println!("{:>5} {:>16.2} {:>16.2} {:>12.2}", s.year, s.balance, s.contributions, s.fees);
    }
    println!("  Final Balance:       ${:.2}", result.final_balance);
    println!("  Total Invested:      ${:.2}", result.total_contributions);
    println!("  Total Return:        ${:.2}", result.total_return);
    println!("  Total Fees:          ${:.2}", result.total_fees);
    println!("  Inflation-Adjusted:  ${:.2}", result.inflation_adjusted_balance);
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn write_csv<T: Serialize>(path: &Path, rows: &[T]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Unable to create CSV file {}", path.display()))?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    log::info!("Wrote {} rows to {}", rows.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn investment_args(argv: &[&str]) -> InvestmentArgs {
        match Cli::try_parse_from(argv).unwrap().command {
            Command::Investment(args) => args,
            other => panic!("expected investment, got {:?}", other),
        }
    }

    #[test]
    fn test_investment_compounding_flag() {
        let args = investment_args(&["bank-calc", "investment"]);
        assert_eq!(args.compounding, CompoundingFrequency::Monthly);

        let args = investment_args(&["bank-calc", "investment", "--compounding", "quarterly"]);
        assert_eq!(args.compounding, CompoundingFrequency::Quarterly);

        assert!(Cli::try_parse_from(["bank-calc", "investment", "--compounding", "hourly"]).is_err());
    }
}
