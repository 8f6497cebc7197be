/// json request - drive the calculator from a serialized request
use loan_calc_rs::{calculate, CalculationRequest, CurrencyFormat};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "loan_calc_rs=info".into());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let json = r#"{
        "mode": "payment_override",
        "loan": {
            "principal": "25000",
            "annual_rate": "0.079",
            "term_periods": 60,
            "start_date": "2024-09-01",
            "extra_payments": {
                "one_time": [{ "amount": "2500", "date": "2025-09-01" }]
            }
        },
        "monthly_payment": "600"
    }"#;

    let request = CalculationRequest::from_json(json)?;
    let calculation = calculate(&request)?;

    // formatted schedule as json
    println!("{}", calculation.view(&CurrencyFormat::euro()).to_json()?);

    Ok(())
}
