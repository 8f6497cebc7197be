use chrono::NaiveDate;
use rust_decimal::{Decimal, MathematicalOps};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::LoanParameters;
use crate::decimal::{Money, Rate};
use crate::errors::{LoanError, Result};
use crate::interest::{periodic_rate, CompoundingFrequency};

use super::extra::ExtraPayments;
use super::period_date;

/// longest schedule the engine will generate (100 years of monthly periods)
pub const MAX_TERM_PERIODS: u32 = 1200;

/// one period of an amortization schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    pub period: u32,
    pub date: NaiveDate,
    pub opening_balance: Money,
    pub scheduled_payment: Money,
    pub interest_portion: Money,
    pub principal_portion: Money,
    pub extra_payment: Money,
    pub total_payment: Money,
    pub remaining_balance: Money,
    pub total_principal_paid: Money,
    pub total_interest_paid: Money,
}

/// fixed monthly payment that fully amortizes the loan (monthly compounding)
pub fn compute_payment(principal: Money, annual_rate: Rate, term_periods: u32) -> Result<Money> {
    compute_payment_with(principal, annual_rate, term_periods, CompoundingFrequency::Monthly)
}

/// fixed monthly payment under the given compounding convention
pub fn compute_payment_with(
    principal: Money,
    annual_rate: Rate,
    term_periods: u32,
    compounding: CompoundingFrequency,
) -> Result<Money> {
    validate_loan_terms(principal, annual_rate, term_periods)?;
    let rate = periodic_rate(annual_rate, compounding)?;
    level_payment(principal, rate, term_periods)
}

/// number of monthly periods a fixed payment needs to retire the loan
pub fn compute_term(principal: Money, annual_rate: Rate, payment: Money) -> Result<u32> {
    compute_term_with(principal, annual_rate, payment, CompoundingFrequency::Monthly)
}

/// number of periods under the given compounding convention
pub fn compute_term_with(
    principal: Money,
    annual_rate: Rate,
    payment: Money,
    compounding: CompoundingFrequency,
) -> Result<u32> {
    validate_loan_terms(principal, annual_rate, 1)?;
    if !payment.is_positive() {
        return Err(LoanError::invalid_input(
            "monthly_payment",
            "payment must be greater than zero",
        ));
    }

    let rate = periodic_rate(annual_rate, compounding)?;
    check_covers_interest(principal, rate, payment)?;

    // same balance recurrence as the schedule loop, so both agree on the count
    let mut balance = principal;
    let mut periods = 0;
    while balance >= Money::HALF_CENT {
        if periods == MAX_TERM_PERIODS {
            return Err(LoanError::invalid_input(
                "monthly_payment",
                format!("payment would take more than {MAX_TERM_PERIODS} months"),
            ));
        }
        let interest = balance.apply_rate(rate);
        balance -= (payment - interest).min(balance);
        periods += 1;
    }

    Ok(periods)
}

/// generate the schedule with the payment derived from the loan terms
pub fn generate_schedule(loan: &LoanParameters) -> Result<Vec<ScheduleEntry>> {
    loan.validate()?;
    let rate = periodic_rate(loan.annual_rate, loan.compounding)?;
    let payment = level_payment(loan.principal, rate, loan.term_periods)?;

    ScheduleGenerator::new(loan, rate, payment).run()
}

/// Generate the schedule with a caller-supplied monthly payment.
///
/// `term_periods` still bounds the loop: if the payment has not retired the
/// loan by then, the final entry carries the outstanding balance as a balloon.
pub fn generate_schedule_with_payment(
    loan: &LoanParameters,
    payment: Money,
) -> Result<Vec<ScheduleEntry>> {
    loan.validate()?;
    if !payment.is_positive() {
        return Err(LoanError::invalid_input(
            "monthly_payment",
            "payment must be greater than zero",
        ));
    }
    let rate = periodic_rate(loan.annual_rate, loan.compounding)?;

    ScheduleGenerator::new(loan, rate, payment).run()
}

pub(crate) fn validate_loan_terms(
    principal: Money,
    annual_rate: Rate,
    term_periods: u32,
) -> Result<()> {
    if !principal.is_positive() {
        return Err(LoanError::invalid_input("principal", "principal must be greater than zero"));
    }
    if annual_rate.is_negative() {
        return Err(LoanError::invalid_input("annual_rate", "rate cannot be negative"));
    }
    if term_periods == 0 {
        return Err(LoanError::invalid_input("term_periods", "term must be at least one period"));
    }
    if term_periods > MAX_TERM_PERIODS {
        return Err(LoanError::invalid_input(
            "term_periods",
            format!("term cannot exceed {MAX_TERM_PERIODS} periods"),
        ));
    }
    Ok(())
}

/// P * r * (1 + r)^n / ((1 + r)^n - 1), or P / n when r is zero
fn level_payment(principal: Money, rate: Rate, periods: u32) -> Result<Money> {
    let r = rate.as_decimal();
    if r.is_zero() {
        return Ok(principal / Decimal::from(periods));
    }

    let compound = (Decimal::ONE + r)
        .checked_powu(periods as u64)
        .ok_or_else(|| LoanError::overflow("payment calculation"))?;
    let factor = (r * compound)
        .checked_div(compound - Decimal::ONE)
        .ok_or_else(|| LoanError::overflow("payment calculation"))?;

    Ok(principal * factor)
}

fn check_covers_interest(principal: Money, rate: Rate, payment: Money) -> Result<()> {
    let interest = principal.apply_rate(rate);
    if !rate.is_zero() && payment <= interest {
        warn!(
            payment = %payment,
            interest = %interest,
            "payment does not cover first period interest"
        );
        return Err(LoanError::Underpayment { payment, interest });
    }
    Ok(())
}

/// balance-reduction loop shared by both schedule entry points
struct ScheduleGenerator<'a> {
    principal: Money,
    rate: Rate,
    payment: Money,
    term_periods: u32,
    start_date: NaiveDate,
    extras: &'a ExtraPayments,
}

impl<'a> ScheduleGenerator<'a> {
    fn new(loan: &'a LoanParameters, rate: Rate, payment: Money) -> Self {
        Self {
            principal: loan.principal,
            rate,
            payment,
            term_periods: loan.term_periods,
            start_date: loan.start_date,
            extras: &loan.extra_payments,
        }
    }

    fn run(&self) -> Result<Vec<ScheduleEntry>> {
        check_covers_interest(self.principal, self.rate, self.payment)?;

        let mut entries = Vec::with_capacity(self.term_periods as usize);
        let mut balance = self.principal;
        let mut total_principal = Money::ZERO;
        let mut total_interest = Money::ZERO;

        for period in 1..=self.term_periods {
            let date = period_date(self.start_date, period)?;
            let next_date = period_date(self.start_date, period + 1)?;

            let opening_balance = balance;
            let interest_portion = opening_balance.apply_rate(self.rate);
            let mut principal_portion = (self.payment - interest_portion).min(opening_balance);

            let extra_payment = self
                .extras
                .amount_for_period(date, next_date)
                .min(opening_balance - principal_portion)
                .max(Money::ZERO);

            balance -= principal_portion + extra_payment;

            // sweep sub-cent residue (or the balloon at the term bound) into this period
            if balance < Money::HALF_CENT || period == self.term_periods {
                principal_portion += balance;
                balance = Money::ZERO;
            }

            let scheduled_payment = principal_portion + interest_portion;
            total_principal += principal_portion + extra_payment;
            total_interest += interest_portion;

            entries.push(ScheduleEntry {
                period,
                date,
                opening_balance,
                scheduled_payment,
                interest_portion,
                principal_portion,
                extra_payment,
                total_payment: scheduled_payment + extra_payment,
                remaining_balance: balance,
                total_principal_paid: total_principal,
                total_interest_paid: total_interest,
            });

            if balance.is_zero() {
                break;
            }
        }

        debug!(
            periods = entries.len(),
            term_periods = self.term_periods,
            payment = %self.payment,
            total_interest = %total_interest,
            "amortization schedule generated"
        );

        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    fn mortgage() -> LoanParameters {
        LoanParameters::new(Money::from_major(200_000), Rate::from_percentage(6), 360, start())
    }

    fn with_monthly_extra(amount: i64, from: NaiveDate) -> LoanParameters {
        let extras = ExtraPayments::none().with_monthly(Money::from_major(amount), from);
        mortgage().with_extra_payments(extras)
    }

    fn twelve_percent_loan(term_periods: u32) -> LoanParameters {
        let principal = Money::from_major(100_000);
        LoanParameters::new(principal, Rate::from_percentage(12), term_periods, start())
    }

    fn total_payments(schedule: &[ScheduleEntry]) -> Money {
        schedule.iter().map(|e| e.total_payment).sum()
    }

    #[test]
    fn test_payment_for_thirty_year_mortgage() {
        let payment =
            compute_payment(Money::from_major(200_000), Rate::from_percentage(6), 360).unwrap();
        assert_eq!(payment.round_currency(), Money::from_decimal(dec!(1199.10)));
    }

    #[test]
    fn test_payment_zero_interest() {
        let payment = compute_payment(Money::from_major(12_000), Rate::ZERO, 12).unwrap();
        assert_eq!(payment, Money::from_major(1_000));
    }

    #[test]
    fn test_payment_rejects_invalid_input() {
        let rate = Rate::from_percentage(5);
        assert!(matches!(
            compute_payment(Money::ZERO, rate, 12),
            Err(LoanError::InvalidInput { field: "principal", .. })
        ));
        assert!(matches!(
            compute_payment(Money::from_major(-10), rate, 12),
            Err(LoanError::InvalidInput { field: "principal", .. })
        ));
        assert!(matches!(
            compute_payment(Money::from_major(1_000), rate, 0),
            Err(LoanError::InvalidInput { field: "term_periods", .. })
        ));
        assert!(matches!(
            compute_payment(Money::from_major(1_000), Rate::from_decimal(dec!(-0.01)), 12),
            Err(LoanError::InvalidInput { field: "annual_rate", .. })
        ));
    }

    #[test]
    fn test_first_and_last_period() {
        let schedule = generate_schedule(&mortgage()).unwrap();
        assert_eq!(schedule.len(), 360);

        let first = &schedule[0];
        assert_eq!(first.period, 1);
        assert_eq!(first.date, start());
        assert_eq!(first.opening_balance, Money::from_major(200_000));
        assert_eq!(first.interest_portion.round_currency(), Money::from_decimal(dec!(1000.00)));
        assert_eq!(first.principal_portion.round_currency(), Money::from_decimal(dec!(199.10)));
        assert_eq!(first.extra_payment, Money::ZERO);

        let last = &schedule[359];
        assert_eq!(last.period, 360);
        assert_eq!(last.date, NaiveDate::from_ymd_opt(2053, 12, 1).unwrap());
        assert_eq!(last.remaining_balance, Money::ZERO);
        assert!((last.scheduled_payment - first.scheduled_payment).abs() < Money::from_minor(1));
    }

    #[test]
    fn test_balance_is_monotonic_and_ends_at_zero() {
        let cases = [
            (Money::from_major(200_000), Rate::from_percentage(6), 360),
            (Money::from_major(25_000), Rate::from_percent(dec!(4.9)), 60),
            (Money::from_major(1_000), Rate::from_percentage(29), 7),
            (Money::from_minor(12_345), Rate::from_percentage(3), 1),
        ];

        for (principal, rate, term) in cases {
            let yearly = ExtraPayments::none().with_yearly(Money::from_major(300), start());
            let loan =
                LoanParameters::new(principal, rate, term, start()).with_extra_payments(yearly);
            let schedule = generate_schedule(&loan).unwrap();

            let mut previous = principal;
            for entry in &schedule {
                assert!(entry.remaining_balance <= previous);
                assert!(!entry.remaining_balance.is_negative());
                previous = entry.remaining_balance;
            }
            assert_eq!(schedule.last().unwrap().remaining_balance, Money::ZERO);
        }
    }

    #[test]
    fn test_totals_are_conserved() {
        let monthly_from = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        let lump_sum_on = NaiveDate::from_ymd_opt(2030, 5, 12).unwrap();
        let loan = mortgage().with_extra_payments(
            ExtraPayments::none()
                .with_monthly(Money::from_major(150), monthly_from)
                .with_one_time(Money::from_major(10_000), lump_sum_on),
        );
        let schedule = generate_schedule(&loan).unwrap();
        let last = schedule.last().unwrap();

        let paid = last.total_principal_paid + last.total_interest_paid;
        assert!((paid - total_payments(&schedule)).abs() < Money::from_minor(1));
        assert!((last.total_principal_paid - loan.principal).abs() < Money::from_minor(1));

        for entry in &schedule {
            assert_eq!(entry.scheduled_payment, entry.principal_portion + entry.interest_portion);
            assert_eq!(entry.total_payment, entry.scheduled_payment + entry.extra_payment);
            let payable = entry.opening_balance + entry.interest_portion + Money::HALF_CENT;
            assert!(entry.total_payment <= payable);
        }
    }

    #[test]
    fn test_zero_rate_schedule() {
        let loan = LoanParameters::new(Money::from_major(200_000), Rate::ZERO, 360, start());
        let schedule = generate_schedule(&loan).unwrap();
        let expected = Money::from_major(200_000) / Decimal::from(360);

        assert_eq!(schedule.len(), 360);
        for entry in &schedule {
            assert_eq!(entry.interest_portion, Money::ZERO);
            assert!((entry.principal_portion - expected).abs() < Money::from_minor(1));
        }
        assert_eq!(schedule.last().unwrap().total_interest_paid, Money::ZERO);
    }

    #[test]
    fn test_monthly_extra_accelerates_payoff() {
        let baseline = generate_schedule(&mortgage()).unwrap();
        let accelerated = generate_schedule(&with_monthly_extra(200, start())).unwrap();

        assert!(accelerated.len() < 360);
        assert_eq!(accelerated[0].extra_payment, Money::from_major(200));
        assert!(
            accelerated.last().unwrap().total_interest_paid
                < baseline.last().unwrap().total_interest_paid
        );
        assert_eq!(accelerated.last().unwrap().remaining_balance, Money::ZERO);
    }

    #[test]
    fn test_monthly_extra_waits_for_activation_day() {
        let mid_month = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        let schedule = generate_schedule(&with_monthly_extra(200, mid_month)).unwrap();

        assert_eq!(schedule[0].date, start());
        assert_eq!(schedule[0].extra_payment, Money::ZERO);
        assert_eq!(schedule[1].extra_payment, Money::from_major(200));
    }

    #[test]
    fn test_extra_payments_never_slow_payoff() {
        let baseline = generate_schedule(&mortgage()).unwrap();
        let baseline_interest = baseline.last().unwrap().total_interest_paid;

        for extra in [1, 50, 500, 5_000] {
            let schedule = generate_schedule(&with_monthly_extra(extra, start())).unwrap();
            assert!(schedule.len() <= baseline.len());
            assert!(schedule.last().unwrap().total_interest_paid <= baseline_interest);
        }
    }

    #[test]
    fn test_extra_payment_clamped_to_balance() {
        let lump_sum_on = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        let extras = ExtraPayments::none().with_one_time(Money::from_major(50_000), lump_sum_on);
        let principal = Money::from_major(10_000);
        let loan = LoanParameters::new(principal, Rate::from_percentage(5), 24, start())
            .with_extra_payments(extras);
        let schedule = generate_schedule(&loan).unwrap();

        assert_eq!(schedule.len(), 3);
        let last = &schedule[2];
        assert_eq!(last.remaining_balance, Money::ZERO);
        let retired = last.principal_portion + last.extra_payment;
        assert!((retired - last.opening_balance).abs() < Money::from_minor(1));
        assert!(last.extra_payment < Money::from_major(50_000));
    }

    #[test]
    fn test_underpayment_detected() {
        let loan = twelve_percent_loan(360);

        let result = generate_schedule_with_payment(&loan, Money::from_decimal(dec!(999.99)));
        assert!(matches!(result, Err(LoanError::Underpayment { .. })));

        // interest-only payment never amortizes either
        let result = generate_schedule_with_payment(&loan, Money::from_major(1_000));
        match result {
            Err(LoanError::Underpayment { payment, interest }) => {
                assert_eq!(payment, Money::from_major(1_000));
                assert_eq!(interest, Money::from_major(1_000));
            }
            other => panic!("expected underpayment, got {:?}", other),
        }
    }

    #[test]
    fn test_payment_override_retires_early() {
        let loan = twelve_percent_loan(360);
        let payment = Money::from_major(2_000);
        let schedule = generate_schedule_with_payment(&loan, payment).unwrap();

        assert!(schedule.len() < 360);
        let term = compute_term(loan.principal, loan.annual_rate, payment).unwrap();
        assert_eq!(schedule.len() as u32, term);
        assert_eq!(schedule.last().unwrap().remaining_balance, Money::ZERO);
    }

    #[test]
    fn test_payment_override_balloon_at_term() {
        let loan = twelve_percent_loan(12);
        let schedule = generate_schedule_with_payment(&loan, Money::from_major(1_500)).unwrap();

        assert_eq!(schedule.len(), 12);
        let last = &schedule[11];
        assert_eq!(last.remaining_balance, Money::ZERO);
        assert!(last.principal_portion > Money::from_major(90_000));
        let owed = last.opening_balance + last.interest_portion;
        assert!((last.total_payment - owed).abs() < Money::from_minor(1));
    }

    #[test]
    fn test_non_positive_override_rejected() {
        let result = generate_schedule_with_payment(&mortgage(), Money::ZERO);
        assert!(matches!(result, Err(LoanError::InvalidInput { field: "monthly_payment", .. })));
    }

    #[test]
    fn test_term_calculation() {
        let principal = Money::from_major(100_000);
        let rate = Rate::from_percentage(12);

        let term = compute_term(principal, rate, Money::from_major(10_000)).unwrap();
        assert_eq!(term, 11);

        // the amortizing payment reproduces the original term
        let principal = Money::from_major(200_000);
        let rate = Rate::from_percentage(6);
        let payment = compute_payment(principal, rate, 360).unwrap();
        assert_eq!(compute_term(principal, rate, payment).unwrap(), 360);

        let installment = Money::from_major(1_000);
        assert_eq!(compute_term(Money::from_major(12_000), Rate::ZERO, installment).unwrap(), 12);
        assert_eq!(compute_term(Money::from_major(12_001), Rate::ZERO, installment).unwrap(), 13);
    }

    #[test]
    fn test_term_calculation_errors() {
        let principal = Money::from_major(100_000);
        let rate = Rate::from_percentage(12);

        assert!(matches!(
            compute_term(principal, rate, Money::from_major(900)),
            Err(LoanError::Underpayment { .. })
        ));
        // barely covers interest, still inside the term cap
        let barely_enough = Money::from_decimal(dec!(1000.01));
        assert_eq!(compute_term(principal, rate, barely_enough).unwrap(), 1158);
        // would run past the term cap
        assert!(matches!(
            compute_term(principal, rate, Money::from_decimal(dec!(1000.001))),
            Err(LoanError::InvalidInput { field: "monthly_payment", .. })
        ));
    }

    #[test]
    fn test_semi_annual_compounding_lowers_payment() {
        let principal = Money::from_major(300_000);
        let rate = Rate::from_percentage(5);

        let monthly = compute_payment(principal, rate, 300).unwrap();
        let semi_annual =
            compute_payment_with(principal, rate, 300, CompoundingFrequency::SemiAnnual).unwrap();
        assert!(semi_annual < monthly);

        let loan = LoanParameters::new(principal, rate, 300, start())
            .with_compounding(CompoundingFrequency::SemiAnnual);
        let schedule = generate_schedule(&loan).unwrap();
        assert_eq!(schedule.len(), 300);
        assert!((schedule[0].scheduled_payment - semi_annual).abs() < Money::from_minor(1));
    }
}
