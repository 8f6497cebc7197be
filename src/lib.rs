pub mod calculators;
pub mod config;
pub mod decimal;
pub mod errors;
pub mod format;
pub mod interest;
pub mod payments;
pub mod serialization;
pub mod types;

// re-export key types
pub use calculators::{
    analyze_refinance, calculate, quote_auto_loan, quote_mortgage, AutoLoanInputs, AutoLoanQuote,
    LoanBuilder, LoanCalculation, MonthlyCost, MortgageInputs, MortgageQuote, RefinanceAnalysis,
    RefinanceInputs,
};
pub use config::{CalculationRequest, LoanParameters};
pub use decimal::{Money, Rate};
pub use errors::{LoanError, Result};
pub use format::{format_currency, format_percent, CurrencyFormat};
pub use interest::{annual_percentage_yield, periodic_rate, CompoundingFrequency};
pub use payments::{
    annual_breakdown, compare, compute_payment, compute_term, generate_schedule,
    generate_schedule_with_payment, summarize, AnnualTotals, ExtraPayments, OneTimePayment,
    PayoffComparison, RecurringExtra, ScheduleEntry, ScheduleSummary, MAX_TERM_PERIODS,
};
pub use serialization::ScheduleView;
pub use types::DownPayment;

// re-export external dependencies that users will need
pub use chrono;
pub use hourglass_rs::{SafeTimeProvider, TimeSource};
pub use rust_decimal::Decimal;
