/// refinance - compare the current loan with a new one
use loan_calc_rs::chrono::NaiveDate;
use loan_calc_rs::{analyze_refinance, CurrencyFormat, Money, Rate, RefinanceInputs};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "loan_calc_rs=debug".into());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let inputs = RefinanceInputs {
        current_balance: Money::from_major(250_000),
        current_rate: Rate::from_percentage(7),
        remaining_periods: 300,
        new_rate: Rate::from_bps(550),
        new_term_periods: 360,
        closing_costs: Money::from_major(4_000),
        cash_out: Money::ZERO,
        roll_costs_into_loan: false,
        start_date: NaiveDate::from_ymd_opt(2024, 6, 1).ok_or("bad date")?,
    };

    let analysis = analyze_refinance(&inputs)?;
    let format = CurrencyFormat::us();

    println!("current payment: {}", format.format(analysis.current_payment));
    println!("new payment:     {}", format.format(analysis.new_payment));
    println!("monthly savings: {}", format.format(analysis.monthly_savings));
    match analysis.break_even_periods {
        Some(periods) => println!("break even after {} months", periods),
        None => println!("never breaks even"),
    }
    println!("lifetime savings: {}", format.format(analysis.lifetime_savings));

    Ok(())
}
