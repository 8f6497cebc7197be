/// extra payments - monthly, yearly and one-time prepayments
use loan_calc_rs::chrono::NaiveDate;
use loan_calc_rs::{
    compare, generate_schedule, summarize, CurrencyFormat, ExtraPayments, LoanParameters, Money,
    Rate,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "loan_calc_rs=debug".into());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let start = NaiveDate::from_ymd_opt(2024, 1, 1).ok_or("bad date")?;
    let principal = Money::from_major(200_000);
    let loan = LoanParameters::new(principal, Rate::from_percentage(6), 360, start);

    let baseline = summarize(&generate_schedule(&loan)?)?;

    let yearly_from = NaiveDate::from_ymd_opt(2025, 1, 1).ok_or("bad date")?;
    let lump_sum_on = NaiveDate::from_ymd_opt(2026, 6, 15).ok_or("bad date")?;
    let extras = ExtraPayments::none()
        .with_monthly(Money::from_major(200), start)
        .with_yearly(Money::from_major(1_000), yearly_from)
        .with_one_time(Money::from_major(5_000), lump_sum_on);
    let accelerated = summarize(&generate_schedule(&loan.clone().with_extra_payments(extras))?)?;

    let comparison = compare(&baseline, &accelerated);
    let format = CurrencyFormat::us();

    println!(
        "baseline:    {} periods, {} interest",
        baseline.periods_used,
        format.format(baseline.total_interest)
    );
    println!(
        "accelerated: {} periods, {} interest",
        accelerated.periods_used,
        format.format(accelerated.total_interest)
    );
    println!(
        "saved {} periods and {}; payoff moves from {} to {}",
        comparison.periods_saved,
        format.format(comparison.interest_saved),
        comparison.baseline_payoff_date,
        comparison.accelerated_payoff_date
    );

    Ok(())
}
