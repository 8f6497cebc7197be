use chrono::NaiveDate;
use hourglass_rs::{SafeTimeProvider, TimeSource};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::{CalculationRequest, LoanParameters};
use crate::decimal::{Money, Rate};
use crate::errors::{LoanError, Result};
use crate::format::CurrencyFormat;
use crate::interest::CompoundingFrequency;
use crate::payments::{
    annual_breakdown, compute_payment_with, compute_term_with, generate_schedule,
    generate_schedule_with_payment, summarize, term_periods, AnnualTotals, ExtraPayments,
    ScheduleEntry, ScheduleSummary,
};
use crate::serialization::ScheduleView;

/// payment, schedule and totals for one request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanCalculation {
    pub monthly_payment: Money,
    pub term_periods: u32,
    pub schedule: Vec<ScheduleEntry>,
    pub summary: ScheduleSummary,
}

impl LoanCalculation {
    fn from_schedule(
        monthly_payment: Money,
        term_periods: u32,
        schedule: Vec<ScheduleEntry>,
    ) -> Result<Self> {
        let summary = summarize(&schedule)?;
        Ok(Self {
            monthly_payment,
            term_periods,
            schedule,
            summary,
        })
    }

    pub fn annual_breakdown(&self) -> Vec<AnnualTotals> {
        annual_breakdown(&self.schedule)
    }

    /// rounded, formatted view for tables
    pub fn view(&self, format: &CurrencyFormat) -> ScheduleView {
        ScheduleView::new(self.monthly_payment, &self.schedule, &self.summary, format)
    }
}

/// run a calculation request in whichever mode it names
pub fn calculate(request: &CalculationRequest) -> Result<LoanCalculation> {
    match request {
        CalculationRequest::FixedTerm { loan } => {
            let payment = compute_payment_with(
                loan.principal,
                loan.annual_rate,
                loan.term_periods,
                loan.compounding,
            )?;
            let schedule = generate_schedule(loan)?;
            LoanCalculation::from_schedule(payment, loan.term_periods, schedule)
        }
        CalculationRequest::FixedPayment {
            principal,
            annual_rate,
            monthly_payment,
            start_date,
            extra_payments,
            compounding,
        } => {
            let term = compute_term_with(*principal, *annual_rate, *monthly_payment, *compounding)?;
            debug!(term_periods = term, payment = %monthly_payment, "term derived from payment");

            let loan = LoanParameters {
                principal: *principal,
                annual_rate: *annual_rate,
                term_periods: term,
                start_date: *start_date,
                extra_payments: extra_payments.clone(),
                compounding: *compounding,
            };
            let schedule = generate_schedule_with_payment(&loan, *monthly_payment)?;
            LoanCalculation::from_schedule(*monthly_payment, term, schedule)
        }
        CalculationRequest::PaymentOverride { loan, monthly_payment } => {
            let schedule = generate_schedule_with_payment(loan, *monthly_payment)?;
            LoanCalculation::from_schedule(*monthly_payment, loan.term_periods, schedule)
        }
    }
}

/// fluent construction of a calculation request
#[derive(Debug, Clone, Default)]
pub struct LoanBuilder {
    principal: Option<Money>,
    rate: Option<Rate>,
    term_years: Option<u32>,
    term_months: Option<u32>,
    monthly_payment: Option<Money>,
    start_date: Option<NaiveDate>,
    monthly_extra: Option<Money>,
    extra_payments: ExtraPayments,
    compounding: CompoundingFrequency,
}

impl LoanBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn principal(mut self, principal: Money) -> Self {
        self.principal = Some(principal);
        self
    }

    pub fn rate(mut self, rate: Rate) -> Self {
        self.rate = Some(rate);
        self
    }

    pub fn term_years(mut self, years: u32) -> Self {
        self.term_years = Some(years);
        self
    }

    pub fn term_months(mut self, months: u32) -> Self {
        self.term_months = Some(months);
        self
    }

    pub fn monthly_payment(mut self, payment: Money) -> Self {
        self.monthly_payment = Some(payment);
        self
    }

    pub fn start_date(mut self, date: NaiveDate) -> Self {
        self.start_date = Some(date);
        self
    }

    /// recurring extra applied from the first period
    pub fn monthly_extra(mut self, amount: Money) -> Self {
        self.monthly_extra = Some(amount);
        self
    }

    pub fn extra_payments(mut self, extra_payments: ExtraPayments) -> Self {
        self.extra_payments = extra_payments;
        self
    }

    pub fn compounding(mut self, compounding: CompoundingFrequency) -> Self {
        self.compounding = compounding;
        self
    }

    /// build with system time for the default start date
    pub fn build(self) -> Result<CalculationRequest> {
        let time = SafeTimeProvider::new(TimeSource::System);
        self.build_with_time(&time)
    }

    /// build with an explicit time provider
    pub fn build_with_time(self, time_provider: &SafeTimeProvider) -> Result<CalculationRequest> {
        let principal = self.principal.ok_or(LoanError::InvalidConfiguration {
            message: "principal required".to_string(),
        })?;

        let annual_rate = self.rate.ok_or(LoanError::InvalidConfiguration {
            message: "rate required".to_string(),
        })?;

        let start_date = self.start_date.unwrap_or_else(|| time_provider.now().date_naive());

        let mut extra_payments = self.extra_payments;
        if let Some(amount) = self.monthly_extra {
            extra_payments = extra_payments.with_monthly(amount, start_date);
        }

        let term = match (self.term_years, self.term_months) {
            (None, None) => None,
            (years, months) => Some(term_periods(years.unwrap_or(0), months.unwrap_or(0))?),
        };

        let request = match (term, self.monthly_payment) {
            (Some(term_periods), None) => CalculationRequest::FixedTerm {
                loan: LoanParameters {
                    principal,
                    annual_rate,
                    term_periods,
                    start_date,
                    extra_payments,
                    compounding: self.compounding,
                },
            },
            (None, Some(monthly_payment)) => CalculationRequest::FixedPayment {
                principal,
                annual_rate,
                monthly_payment,
                start_date,
                extra_payments,
                compounding: self.compounding,
            },
            (Some(term_periods), Some(monthly_payment)) => CalculationRequest::PaymentOverride {
                loan: LoanParameters {
                    principal,
                    annual_rate,
                    term_periods,
                    start_date,
                    extra_payments,
                    compounding: self.compounding,
                },
                monthly_payment,
            },
            (None, None) => {
                return Err(LoanError::InvalidConfiguration {
                    message: "term or monthly payment required".to_string(),
                })
            }
        };

        Ok(request)
    }

    /// build and calculate in one step
    pub fn calculate_with_time(self, time_provider: &SafeTimeProvider) -> Result<LoanCalculation> {
        calculate(&self.build_with_time(time_provider)?)
    }
}
