use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::LoanParameters;
use crate::decimal::{Money, Rate};
use crate::errors::{LoanError, Result};
use crate::payments::{compute_payment, generate_schedule, summarize, ScheduleSummary};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RefinanceInputs {
    pub current_balance: Money,
    pub current_rate: Rate,
    pub remaining_periods: u32,
    pub new_rate: Rate,
    pub new_term_periods: u32,
    #[serde(default)]
    pub closing_costs: Money,
    #[serde(default)]
    pub cash_out: Money,
    #[serde(default)]
    pub roll_costs_into_loan: bool,
    pub start_date: NaiveDate,
}

/// current loan against the proposed one, both run from the same date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RefinanceAnalysis {
    pub current_payment: Money,
    pub new_loan_amount: Money,
    pub new_payment: Money,
    /// negative when the new payment is higher
    pub monthly_savings: Money,
    /// periods of savings needed to recover the closing costs; costs rolled
    /// into the new loan still count since they are repaid through it
    pub break_even_periods: Option<u32>,
    pub current_total_interest: Money,
    pub new_total_interest: Money,
    pub upfront_costs: Money,
    /// remaining payments on the current loan less the cost of the new one,
    /// with cash out counted as money received
    pub lifetime_savings: Money,
    pub current: ScheduleSummary,
    pub proposed: ScheduleSummary,
}

pub fn analyze_refinance(inputs: &RefinanceInputs) -> Result<RefinanceAnalysis> {
    if inputs.closing_costs.is_negative() {
        return Err(LoanError::invalid_input("closing_costs", "amount cannot be negative"));
    }
    if inputs.cash_out.is_negative() {
        return Err(LoanError::invalid_input("cash_out", "amount cannot be negative"));
    }

    let current_loan = LoanParameters::new(
        inputs.current_balance,
        inputs.current_rate,
        inputs.remaining_periods,
        inputs.start_date,
    );
    let current = summarize(&generate_schedule(&current_loan)?)?;
    let current_payment = compute_payment(
        inputs.current_balance,
        inputs.current_rate,
        inputs.remaining_periods,
    )?;

    let (new_loan_amount, upfront_costs) = if inputs.roll_costs_into_loan {
        (inputs.current_balance + inputs.cash_out + inputs.closing_costs, Money::ZERO)
    } else {
        (inputs.current_balance + inputs.cash_out, inputs.closing_costs)
    };
    let new_loan = LoanParameters::new(
        new_loan_amount,
        inputs.new_rate,
        inputs.new_term_periods,
        inputs.start_date,
    );
    let proposed = summarize(&generate_schedule(&new_loan)?)?;
    let new_payment = compute_payment(new_loan_amount, inputs.new_rate, inputs.new_term_periods)?;

    let monthly_savings = current_payment - new_payment;
    let break_even_periods = break_even(inputs.closing_costs, monthly_savings);
    let new_cost = proposed.total_payments + upfront_costs - inputs.cash_out;
    let lifetime_savings = current.total_payments - new_cost;

    debug!(
        savings = %monthly_savings,
        break_even = ?break_even_periods,
        "refinance analyzed"
    );

    Ok(RefinanceAnalysis {
        current_payment,
        new_loan_amount,
        new_payment,
        monthly_savings,
        break_even_periods,
        current_total_interest: current.total_interest,
        new_total_interest: proposed.total_interest,
        upfront_costs,
        lifetime_savings,
        current,
        proposed,
    })
}

fn break_even(closing_costs: Money, monthly_savings: Money) -> Option<u32> {
    if !monthly_savings.is_positive() {
        return None;
    }
    (closing_costs.as_decimal() / monthly_savings.as_decimal()).ceil().to_u32()
}
