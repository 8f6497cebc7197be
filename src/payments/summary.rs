use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::errors::{LoanError, Result};

use super::amortization::ScheduleEntry;

/// headline totals of a completed schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleSummary {
    pub periods_used: u32,
    pub total_principal: Money,
    pub total_interest: Money,
    pub total_extra: Money,
    pub total_payments: Money,
    pub payoff_date: NaiveDate,
    pub interest_percentage: Decimal,
    pub principal_percentage: Decimal,
}

/// schedule totals for one calendar year
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnualTotals {
    pub year: i32,
    pub periods: u32,
    pub principal: Money,
    pub interest: Money,
    pub extra: Money,
    pub total_payments: Money,
    pub closing_balance: Money,
}

/// savings of an accelerated schedule against its baseline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayoffComparison {
    pub periods_saved: u32,
    pub interest_saved: Money,
    pub baseline_payoff_date: NaiveDate,
    pub accelerated_payoff_date: NaiveDate,
}

/// reduce a schedule into its headline totals
pub fn summarize(schedule: &[ScheduleEntry]) -> Result<ScheduleSummary> {
    let last = schedule.last().ok_or(LoanError::EmptySchedule)?;

    let total_payments: Money = schedule.iter().map(|e| e.total_payment).sum();
    let total_extra: Money = schedule.iter().map(|e| e.extra_payment).sum();
    let interest_percentage = last.total_interest_paid.percentage_of(total_payments);

    Ok(ScheduleSummary {
        periods_used: schedule.len() as u32,
        total_principal: last.total_principal_paid,
        total_interest: last.total_interest_paid,
        total_extra,
        total_payments,
        payoff_date: last.date,
        interest_percentage,
        principal_percentage: Decimal::ONE_HUNDRED - interest_percentage,
    })
}

/// group a schedule by calendar year, in schedule order
pub fn annual_breakdown(schedule: &[ScheduleEntry]) -> Vec<AnnualTotals> {
    let mut years: Vec<AnnualTotals> = Vec::new();

    for entry in schedule {
        let year = entry.date.year();
        match years.last_mut() {
            Some(current) if current.year == year => {
                current.periods += 1;
                current.principal += entry.principal_portion + entry.extra_payment;
                current.interest += entry.interest_portion;
                current.extra += entry.extra_payment;
                current.total_payments += entry.total_payment;
                current.closing_balance = entry.remaining_balance;
            }
            _ => years.push(AnnualTotals {
                year,
                periods: 1,
                principal: entry.principal_portion + entry.extra_payment,
                interest: entry.interest_portion,
                extra: entry.extra_payment,
                total_payments: entry.total_payment,
                closing_balance: entry.remaining_balance,
            }),
        }
    }

    years
}

/// compare a baseline summary with one that includes extra payments
pub fn compare(baseline: &ScheduleSummary, accelerated: &ScheduleSummary) -> PayoffComparison {
    PayoffComparison {
        periods_saved: baseline.periods_used.saturating_sub(accelerated.periods_used),
        interest_saved: (baseline.total_interest - accelerated.total_interest).max(Money::ZERO),
        baseline_payoff_date: baseline.payoff_date,
        accelerated_payoff_date: accelerated.payoff_date,
    }
}
