use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::errors::{LoanError, Result};

/// extra amount paid every month (or every year) from an activation date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecurringExtra {
    pub amount: Money,
    pub start_date: NaiveDate,
}

/// single lump-sum payment toward principal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OneTimePayment {
    pub amount: Money,
    pub date: NaiveDate,
}

/// Extra principal payments layered on top of the scheduled payment.
///
/// Recurring extras activate by calendar month: a monthly extra applies to
/// every period whose month is at or after the activation month, a yearly
/// extra to each anniversary of the activation month. A one-time payment
/// applies to the period whose `[date, next date)` window contains it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ExtraPayments {
    #[serde(default)]
    pub monthly: Option<RecurringExtra>,
    #[serde(default)]
    pub yearly: Option<RecurringExtra>,
    #[serde(default)]
    pub one_time: Vec<OneTimePayment>,
}

impl ExtraPayments {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn with_monthly(mut self, amount: Money, start_date: NaiveDate) -> Self {
        self.monthly = Some(RecurringExtra { amount, start_date });
        self
    }

    pub fn with_yearly(mut self, amount: Money, start_date: NaiveDate) -> Self {
        self.yearly = Some(RecurringExtra { amount, start_date });
        self
    }

    pub fn with_one_time(mut self, amount: Money, date: NaiveDate) -> Self {
        self.one_time.push(OneTimePayment { amount, date });
        self
    }

    pub fn is_empty(&self) -> bool {
        self.monthly.is_none() && self.yearly.is_none() && self.one_time.is_empty()
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(monthly) = &self.monthly {
            if monthly.amount.is_negative() {
                return Err(LoanError::invalid_input("monthly_extra", "amount cannot be negative"));
            }
        }
        if let Some(yearly) = &self.yearly {
            if yearly.amount.is_negative() {
                return Err(LoanError::invalid_input("yearly_extra", "amount cannot be negative"));
            }
        }
        if self.one_time.iter().any(|p| p.amount.is_negative()) {
            return Err(LoanError::invalid_input("one_time_extra", "amount cannot be negative"));
        }
        Ok(())
    }

    /// Extra amount due for the period starting at `period_date`.
    ///
    /// `next_period_date` is the start of the following period and bounds the
    /// window one-time payments are matched against. The result is not
    /// clamped to the outstanding balance; the schedule generator does that.
    pub fn amount_for_period(&self, period_date: NaiveDate, next_period_date: NaiveDate) -> Money {
        let mut amount = Money::ZERO;

        if let Some(monthly) = &self.monthly {
            if period_date >= monthly.start_date {
                amount += monthly.amount;
            }
        }

        if let Some(yearly) = &self.yearly {
            if period_date.month() == yearly.start_date.month()
                && month_index(period_date) >= month_index(yearly.start_date)
            {
                amount += yearly.amount;
            }
        }

        amount += self
            .one_time
            .iter()
            .filter(|p| p.date >= period_date && p.date < next_period_date)
            .map(|p| p.amount)
            .sum::<Money>();

        amount
    }
}

fn month_index(date: NaiveDate) -> i32 {
    date.year() * 12 + date.month0() as i32
}
