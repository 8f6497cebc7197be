use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};
use crate::errors::Result;
use crate::interest::CompoundingFrequency;
use crate::payments::amortization::validate_loan_terms;
use crate::payments::ExtraPayments;

/// inputs for one amortization computation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanParameters {
    pub principal: Money,
    pub annual_rate: Rate,
    pub term_periods: u32,
    pub start_date: NaiveDate,
    #[serde(default)]
    pub extra_payments: ExtraPayments,
    #[serde(default)]
    pub compounding: CompoundingFrequency,
}

impl LoanParameters {
    pub fn new(
        principal: Money,
        annual_rate: Rate,
        term_periods: u32,
        start_date: NaiveDate,
    ) -> Self {
        Self {
            principal,
            annual_rate,
            term_periods,
            start_date,
            extra_payments: ExtraPayments::none(),
            compounding: CompoundingFrequency::Monthly,
        }
    }

    pub fn with_extra_payments(mut self, extra_payments: ExtraPayments) -> Self {
        self.extra_payments = extra_payments;
        self
    }

    pub fn with_compounding(mut self, compounding: CompoundingFrequency) -> Self {
        self.compounding = compounding;
        self
    }

    pub fn validate(&self) -> Result<()> {
        validate_loan_terms(self.principal, self.annual_rate, self.term_periods)?;
        self.extra_payments.validate()
    }
}

/// calculator mode; each variant carries only the inputs it needs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum CalculationRequest {
    /// payment derived from principal, rate and term
    FixedTerm { loan: LoanParameters },
    /// term derived from the payment the borrower can afford
    FixedPayment {
        principal: Money,
        annual_rate: Rate,
        monthly_payment: Money,
        start_date: NaiveDate,
        #[serde(default)]
        extra_payments: ExtraPayments,
        #[serde(default)]
        compounding: CompoundingFrequency,
    },
    /// payment forced by the caller, term kept as the upper bound
    PaymentOverride {
        loan: LoanParameters,
        monthly_payment: Money,
    },
}

impl CalculationRequest {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
