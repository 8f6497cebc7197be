use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::config::LoanParameters;
use crate::decimal::{Money, Rate};
use crate::errors::{LoanError, Result};
use crate::payments::{
    compute_payment, generate_schedule, summarize, term_periods, ExtraPayments, ScheduleEntry,
    ScheduleSummary,
};
use crate::types::DownPayment;

/// PMI is charged while the balance is above this share of the home price
const PMI_LTV_LIMIT_PERCENT: Decimal = dec!(80);

/// mortgage calculator inputs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MortgageInputs {
    pub home_price: Money,
    pub down_payment: DownPayment,
    pub annual_rate: Rate,
    pub term_years: u32,
    pub start_date: NaiveDate,
    /// annual property tax as a fraction of the home price
    #[serde(default)]
    pub property_tax_rate: Rate,
    #[serde(default)]
    pub annual_insurance: Money,
    /// annual PMI premium as a fraction of the loan amount
    #[serde(default)]
    pub pmi_rate: Rate,
    #[serde(default)]
    pub monthly_hoa: Money,
    #[serde(default)]
    pub extra_payments: ExtraPayments,
}

impl MortgageInputs {
    pub fn new(
        home_price: Money,
        down_payment: DownPayment,
        annual_rate: Rate,
        term_years: u32,
        start_date: NaiveDate,
    ) -> Self {
        Self {
            home_price,
            down_payment,
            annual_rate,
            term_years,
            start_date,
            property_tax_rate: Rate::ZERO,
            annual_insurance: Money::ZERO,
            pmi_rate: Rate::ZERO,
            monthly_hoa: Money::ZERO,
            extra_payments: ExtraPayments::none(),
        }
    }

    pub fn with_property_tax(mut self, rate: Rate) -> Self {
        self.property_tax_rate = rate;
        self
    }

    pub fn with_insurance(mut self, annual: Money) -> Self {
        self.annual_insurance = annual;
        self
    }

    pub fn with_pmi(mut self, rate: Rate) -> Self {
        self.pmi_rate = rate;
        self
    }

    pub fn with_hoa(mut self, monthly: Money) -> Self {
        self.monthly_hoa = monthly;
        self
    }

    pub fn with_extra_payments(mut self, extra_payments: ExtraPayments) -> Self {
        self.extra_payments = extra_payments;
        self
    }

    fn validate(&self) -> Result<()> {
        if !self.home_price.is_positive() {
            return Err(LoanError::invalid_input(
                "home_price",
                "home price must be greater than zero",
            ));
        }
        if self.property_tax_rate.is_negative() {
            return Err(LoanError::invalid_input("property_tax_rate", "rate cannot be negative"));
        }
        if self.pmi_rate.is_negative() {
            return Err(LoanError::invalid_input("pmi_rate", "rate cannot be negative"));
        }
        if self.annual_insurance.is_negative() {
            return Err(LoanError::invalid_input("annual_insurance", "amount cannot be negative"));
        }
        if self.monthly_hoa.is_negative() {
            return Err(LoanError::invalid_input("monthly_hoa", "amount cannot be negative"));
        }
        Ok(())
    }
}

/// first-month housing cost breakdown
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyCost {
    pub principal_and_interest: Money,
    pub property_tax: Money,
    pub insurance: Money,
    pub pmi: Money,
    pub hoa: Money,
    pub total: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MortgageQuote {
    pub loan_amount: Money,
    pub down_payment: Money,
    /// loan amount as a percentage of the home price
    pub loan_to_value: Decimal,
    pub monthly: MonthlyCost,
    pub pmi_periods: u32,
    pub total_pmi: Money,
    pub total_property_tax: Money,
    pub total_insurance: Money,
    pub total_hoa: Money,
    /// down payment plus every payment and housing cost until payoff
    pub total_cost: Money,
    pub schedule: Vec<ScheduleEntry>,
    pub summary: ScheduleSummary,
}

pub fn quote_mortgage(inputs: &MortgageInputs) -> Result<MortgageQuote> {
    inputs.validate()?;

    let price = inputs.home_price;
    let down_payment = inputs.down_payment.amount_for(price)?;
    let loan_amount = price - down_payment;
    let term = term_periods(inputs.term_years, 0)?;

    let loan = LoanParameters::new(loan_amount, inputs.annual_rate, term, inputs.start_date)
        .with_extra_payments(inputs.extra_payments.clone());
    let principal_and_interest = compute_payment(loan_amount, inputs.annual_rate, term)?;
    let schedule = generate_schedule(&loan)?;
    let summary = summarize(&schedule)?;

    let months_per_year = Decimal::from(12);
    let pmi_limit = price.percentage(PMI_LTV_LIMIT_PERCENT);
    let pmi = if loan_amount > pmi_limit {
        loan_amount.apply_rate(inputs.pmi_rate) / months_per_year
    } else {
        Money::ZERO
    };
    let pmi_periods = if pmi.is_zero() {
        0
    } else {
        schedule.iter().filter(|e| e.opening_balance > pmi_limit).count() as u32
    };

    let property_tax = price.apply_rate(inputs.property_tax_rate) / months_per_year;
    let insurance = inputs.annual_insurance / months_per_year;
    let hoa = inputs.monthly_hoa;

    let periods = Decimal::from(summary.periods_used);
    let total_pmi = pmi * Decimal::from(pmi_periods);
    let total_property_tax = property_tax * periods;
    let total_insurance = insurance * periods;
    let total_hoa = hoa * periods;
    let total_cost = down_payment
        + summary.total_payments
        + total_pmi
        + total_property_tax
        + total_insurance
        + total_hoa;

    Ok(MortgageQuote {
        loan_amount,
        down_payment,
        loan_to_value: loan_amount.percentage_of(price),
        monthly: MonthlyCost {
            principal_and_interest,
            property_tax,
            insurance,
            pmi,
            hoa,
            total: principal_and_interest + property_tax + insurance + pmi + hoa,
        },
        pmi_periods,
        total_pmi,
        total_property_tax,
        total_insurance,
        total_hoa,
        total_cost,
        schedule,
        summary,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    #[test]
    fn test_monthly_breakdown() {
        let inputs = MortgageInputs::new(
            Money::from_major(400_000),
            DownPayment::Percent(dec!(20)),
            Rate::from_percent(dec!(6.5)),
            30,
            start(),
        )
        .with_property_tax(Rate::from_percent(dec!(1.2)))
        .with_insurance(Money::from_major(1_500))
        .with_hoa(Money::from_major(100));

        let quote = quote_mortgage(&inputs).unwrap();

        assert_eq!(quote.loan_amount, Money::from_major(320_000));
        assert_eq!(quote.loan_to_value, dec!(80));
        assert_eq!(quote.monthly.property_tax, Money::from_major(400));
        assert_eq!(quote.monthly.insurance, Money::from_major(125));
        assert_eq!(quote.monthly.pmi, Money::ZERO);
        assert_eq!(quote.pmi_periods, 0);
        // 320k at 6.5% over 30 years
        assert_eq!(
            quote.monthly.principal_and_interest.round_currency(),
            Money::from_decimal(dec!(2022.62))
        );
        assert_eq!(
            quote.monthly.total.round_currency(),
            Money::from_decimal(dec!(2647.62))
        );
        assert_eq!(quote.total_hoa, Money::from_major(36_000));
    }

    #[test]
    fn test_pmi_until_eighty_percent_ltv() {
        let inputs = MortgageInputs::new(
            Money::from_major(400_000),
            DownPayment::Amount(Money::from_major(40_000)),
            Rate::from_percent(dec!(6.5)),
            30,
            start(),
        )
        .with_pmi(Rate::from_percent(dec!(0.5)));

        let quote = quote_mortgage(&inputs).unwrap();
        let limit = Money::from_major(320_000);

        assert_eq!(quote.monthly.pmi, Money::from_major(150));
        assert!(quote.pmi_periods > 0 && quote.pmi_periods < 360);
        let last_charged = &quote.schedule[quote.pmi_periods as usize - 1];
        let first_free = &quote.schedule[quote.pmi_periods as usize];
        assert!(last_charged.opening_balance > limit);
        assert!(first_free.opening_balance <= limit);
        assert_eq!(quote.total_pmi, Money::from_major(150) * Decimal::from(quote.pmi_periods));
    }

    #[test]
    fn test_total_cost_includes_down_payment() {
        let inputs = MortgageInputs::new(
            Money::from_major(300_000),
            DownPayment::Percent(dec!(25)),
            Rate::from_percentage(5),
            15,
            start(),
        );
        let quote = quote_mortgage(&inputs).unwrap();

        assert_eq!(quote.down_payment, Money::from_major(75_000));
        assert_eq!(quote.total_cost, quote.down_payment + quote.summary.total_payments);
    }

    #[test]
    fn test_extra_payments_shorten_mortgage() {
        let base = MortgageInputs::new(
            Money::from_major(300_000),
            DownPayment::Percent(dec!(20)),
            Rate::from_percentage(6),
            30,
            start(),
        );
        let yearly = ExtraPayments::none().with_yearly(Money::from_major(5_000), start());
        let accelerated = base.clone().with_extra_payments(yearly);

        let base_quote = quote_mortgage(&base).unwrap();
        let fast_quote = quote_mortgage(&accelerated).unwrap();
        assert!(fast_quote.summary.periods_used < base_quote.summary.periods_used);
        assert!(fast_quote.summary.total_interest < base_quote.summary.total_interest);
    }

    #[test]
    fn test_invalid_mortgage_inputs() {
        let inputs = MortgageInputs::new(
            Money::ZERO,
            DownPayment::Percent(dec!(20)),
            Rate::from_percentage(6),
            30,
            start(),
        );
        assert!(matches!(
            quote_mortgage(&inputs),
            Err(LoanError::InvalidInput { field: "home_price", .. })
        ));

        let inputs = MortgageInputs::new(
            Money::from_major(100_000),
            DownPayment::Percent(dec!(20)),
            Rate::from_percentage(6),
            30,
            start(),
        )
        .with_hoa(Money::from_major(-10));
        assert!(matches!(
            quote_mortgage(&inputs),
            Err(LoanError::InvalidInput { field: "monthly_hoa", .. })
        ));
    }
}
