use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::config::LoanParameters;
use crate::decimal::{Money, Rate};
use crate::errors::{LoanError, Result};
use crate::payments::{
    compute_payment, generate_schedule, summarize, ScheduleEntry, ScheduleSummary,
};

/// auto loan inputs; the vehicle price is taxed after the trade-in credit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AutoLoanInputs {
    pub vehicle_price: Money,
    #[serde(default)]
    pub cash_incentives: Money,
    #[serde(default)]
    pub down_payment: Money,
    #[serde(default)]
    pub trade_in_value: Money,
    /// still owed on the trade-in, rolled into the new loan
    #[serde(default)]
    pub trade_in_owed: Money,
    #[serde(default)]
    pub sales_tax_rate: Rate,
    #[serde(default)]
    pub fees: Money,
    #[serde(default)]
    pub finance_taxes_and_fees: bool,
    pub annual_rate: Rate,
    pub term_months: u32,
    pub start_date: NaiveDate,
}

impl AutoLoanInputs {
    pub fn new(
        vehicle_price: Money,
        annual_rate: Rate,
        term_months: u32,
        start_date: NaiveDate,
    ) -> Self {
        Self {
            vehicle_price,
            cash_incentives: Money::ZERO,
            down_payment: Money::ZERO,
            trade_in_value: Money::ZERO,
            trade_in_owed: Money::ZERO,
            sales_tax_rate: Rate::ZERO,
            fees: Money::ZERO,
            finance_taxes_and_fees: false,
            annual_rate,
            term_months,
            start_date,
        }
    }

    pub fn with_down_payment(mut self, amount: Money) -> Self {
        self.down_payment = amount;
        self
    }

    pub fn with_incentives(mut self, amount: Money) -> Self {
        self.cash_incentives = amount;
        self
    }

    pub fn with_trade_in(mut self, value: Money, owed: Money) -> Self {
        self.trade_in_value = value;
        self.trade_in_owed = owed;
        self
    }

    pub fn with_taxes_and_fees(
        mut self,
        sales_tax_rate: Rate,
        fees: Money,
        financed: bool,
    ) -> Self {
        self.sales_tax_rate = sales_tax_rate;
        self.fees = fees;
        self.finance_taxes_and_fees = financed;
        self
    }

    fn validate(&self) -> Result<()> {
        if !self.vehicle_price.is_positive() {
            return Err(LoanError::invalid_input(
                "vehicle_price",
                "price must be greater than zero",
            ));
        }
        let amounts = [
            ("cash_incentives", self.cash_incentives),
            ("down_payment", self.down_payment),
            ("trade_in_value", self.trade_in_value),
            ("trade_in_owed", self.trade_in_owed),
            ("fees", self.fees),
        ];
        for (field, amount) in amounts {
            if amount.is_negative() {
                return Err(LoanError::invalid_input(field, "amount cannot be negative"));
            }
        }
        if self.sales_tax_rate.is_negative() {
            return Err(LoanError::invalid_input("sales_tax_rate", "rate cannot be negative"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AutoLoanQuote {
    pub loan_amount: Money,
    pub sales_tax: Money,
    /// cash due at signing
    pub upfront_payment: Money,
    pub monthly_payment: Money,
    /// cash paid at signing plus every loan payment
    pub total_cost: Money,
    pub schedule: Vec<ScheduleEntry>,
    pub summary: ScheduleSummary,
}

pub fn quote_auto_loan(inputs: &AutoLoanInputs) -> Result<AutoLoanQuote> {
    inputs.validate()?;

    let taxable = (inputs.vehicle_price - inputs.trade_in_value).max(Money::ZERO);
    let sales_tax = taxable.apply_rate(inputs.sales_tax_rate);
    let taxes_and_fees = sales_tax + inputs.fees;

    let mut loan_amount = inputs.vehicle_price
        - inputs.cash_incentives
        - inputs.down_payment
        - inputs.trade_in_value
        + inputs.trade_in_owed;
    let mut upfront_payment = inputs.down_payment;
    if inputs.finance_taxes_and_fees {
        loan_amount += taxes_and_fees;
    } else {
        upfront_payment += taxes_and_fees;
    }

    if !loan_amount.is_positive() {
        return Err(LoanError::invalid_input("loan_amount", "nothing left to finance"));
    }

    let loan = LoanParameters::new(
        loan_amount,
        inputs.annual_rate,
        inputs.term_months,
        inputs.start_date,
    );
    let monthly_payment = compute_payment(loan_amount, inputs.annual_rate, inputs.term_months)?;
    let schedule = generate_schedule(&loan)?;
    let summary = summarize(&schedule)?;

    Ok(AutoLoanQuote {
        loan_amount,
        sales_tax,
        upfront_payment,
        monthly_payment,
        total_cost: upfront_payment + summary.total_payments,
        schedule,
        summary,
    })
}
