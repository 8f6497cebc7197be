pub mod amortization;
pub mod extra;
pub mod summary;

use chrono::{Months, NaiveDate};

use crate::errors::{LoanError, Result};

pub use amortization::{
    compute_payment, compute_payment_with, compute_term, compute_term_with, generate_schedule,
    generate_schedule_with_payment, ScheduleEntry, MAX_TERM_PERIODS,
};
pub use extra::{ExtraPayments, OneTimePayment, RecurringExtra};
pub use summary::{
    annual_breakdown, compare, summarize, AnnualTotals, PayoffComparison, ScheduleSummary,
};

/// calendar date of a 1-based period, clamped to the end of shorter months
pub fn period_date(start_date: NaiveDate, period: u32) -> Result<NaiveDate> {
    let offset = period.saturating_sub(1);
    start_date
        .checked_add_months(Months::new(offset))
        .ok_or_else(|| LoanError::InvalidDate {
            message: format!("period {period} from {start_date} is out of range"),
        })
}

/// total monthly periods for a term given in years and months
pub fn term_periods(years: u32, months: u32) -> Result<u32> {
    let total = years
        .checked_mul(12)
        .and_then(|m| m.checked_add(months))
        .ok_or_else(|| LoanError::invalid_input("term_periods", "term is too long"))?;

    if total == 0 {
        return Err(LoanError::invalid_input("term_periods", "term must be at least one month"));
    }
    if total > MAX_TERM_PERIODS {
        return Err(LoanError::invalid_input(
            "term_periods",
            format!("term cannot exceed {MAX_TERM_PERIODS} months"),
        ));
    }

    Ok(total)
}
