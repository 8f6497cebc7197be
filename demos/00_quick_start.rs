/// quick start - minimal example to get started
use loan_calc_rs::{Money, Rate, LoanBuilder, CurrencyFormat, SafeTimeProvider, TimeSource};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "loan_calc_rs=info".into());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    // $200,000 at 6% over 30 years, starting today
    let time = SafeTimeProvider::new(TimeSource::System);
    let calculation = LoanBuilder::new()
        .principal(Money::from_major(200_000))
        .rate(Rate::from_percentage(6))
        .term_years(30)
        .calculate_with_time(&time)?;

    let format = CurrencyFormat::us();
    println!("monthly payment: {}", format.format(calculation.monthly_payment));
    println!("total interest:  {}", format.format(calculation.summary.total_interest));
    println!("payoff date:     {}", calculation.summary.payoff_date);

    // first year of the schedule
    let view = calculation.view(&format);
    for line in view.to_table().lines().take(13) {
        println!("{}", line);
    }

    Ok(())
}
