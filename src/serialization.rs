/// serialization support for schedules
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::errors::Result;
use crate::format::{format_percent, CurrencyFormat};
use crate::payments::{ScheduleEntry, ScheduleSummary};

/// one schedule row with amounts rounded and formatted for display
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleRowView {
    pub period: u32,
    pub date: NaiveDate,
    pub payment: String,
    pub principal: String,
    pub interest: String,
    pub extra: String,
    pub total_payment: String,
    pub balance: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryView {
    pub monthly_payment: String,
    pub periods_used: u32,
    pub payoff_date: NaiveDate,
    pub total_principal: String,
    pub total_interest: String,
    pub total_extra: String,
    pub total_payments: String,
    pub interest_percentage: String,
    pub principal_percentage: String,
}

/// serializable view of a whole schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleView {
    pub summary: SummaryView,
    pub rows: Vec<ScheduleRowView>,
}

impl ScheduleView {
    pub fn new(
        monthly_payment: Money,
        schedule: &[ScheduleEntry],
        summary: &ScheduleSummary,
        format: &CurrencyFormat,
    ) -> Self {
        let rows = schedule
            .iter()
            .map(|entry| ScheduleRowView {
                period: entry.period,
                date: entry.date,
                payment: format.format(entry.scheduled_payment),
                principal: format.format(entry.principal_portion),
                interest: format.format(entry.interest_portion),
                extra: format.format(entry.extra_payment),
                total_payment: format.format(entry.total_payment),
                balance: format.format(entry.remaining_balance),
            })
            .collect();

        ScheduleView {
            summary: SummaryView {
                monthly_payment: format.format(monthly_payment),
                periods_used: summary.periods_used,
                payoff_date: summary.payoff_date,
                total_principal: format.format(summary.total_principal),
                total_interest: format.format(summary.total_interest),
                total_extra: format.format(summary.total_extra),
                total_payments: format.format(summary.total_payments),
                interest_percentage: format_percent(summary.interest_percentage, 2),
                principal_percentage: format_percent(summary.principal_percentage, 2),
            },
            rows,
        }
    }

    /// convert to pretty-printed json string
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// fixed-width text table, one line per period
    pub fn to_table(&self) -> String {
        let mut out = format!(
            "{:>6}  {:<10}  {:>14}  {:>14}  {:>14}  {:>12}  {:>16}\n",
            "period", "date", "payment", "principal", "interest", "extra", "balance"
        );
        for row in &self.rows {
            out.push_str(&format!(
                "{:>6}  {:<10}  {:>14}  {:>14}  {:>14}  {:>12}  {:>16}\n",
                row.period,
                row.date.format("%Y-%m-%d").to_string(),
                row.payment,
                row.principal,
                row.interest,
                row.extra,
                row.balance
            ));
        }
        out
    }
}
