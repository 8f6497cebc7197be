/// mortgage - housing costs, PMI and the yearly breakdown
use loan_calc_rs::chrono::NaiveDate;
use loan_calc_rs::payments::annual_breakdown;
use loan_calc_rs::{
    quote_mortgage, CurrencyFormat, Decimal, DownPayment, Money, MortgageInputs, Rate,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "loan_calc_rs=info".into());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let inputs = MortgageInputs::new(
        Money::from_major(400_000),
        DownPayment::Percent(Decimal::from(10)),
        Rate::from_bps(650),
        30,
        NaiveDate::from_ymd_opt(2024, 1, 1).ok_or("bad date")?,
    )
    .with_property_tax(Rate::from_bps(120))
    .with_insurance(Money::from_major(1_500))
    .with_pmi(Rate::from_bps(50))
    .with_hoa(Money::from_major(75));

    let quote = quote_mortgage(&inputs)?;
    let format = CurrencyFormat::us();

    println!("loan amount:         {}", format.format(quote.loan_amount));
    println!("principal+interest:  {}", format.format(quote.monthly.principal_and_interest));
    println!("property tax:        {}", format.format(quote.monthly.property_tax));
    println!("insurance:           {}", format.format(quote.monthly.insurance));
    println!(
        "pmi:                 {} for {} months",
        format.format(quote.monthly.pmi),
        quote.pmi_periods
    );
    println!("hoa:                 {}", format.format(quote.monthly.hoa));
    println!("total monthly:       {}", format.format(quote.monthly.total));
    println!("total cost:          {}", format.format(quote.total_cost));

    for year in annual_breakdown(&quote.schedule).iter().take(5) {
        println!(
            "{}: principal {} interest {} balance {}",
            year.year,
            format.format(year.principal),
            format.format(year.interest),
            format.format(year.closing_balance)
        );
    }

    Ok(())
}
