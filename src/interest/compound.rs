use rust_decimal::{Decimal, MathematicalOps};
use serde::{Deserialize, Serialize};

use crate::decimal::Rate;
use crate::errors::{LoanError, Result};

/// compounding frequency of the nominal annual rate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CompoundingFrequency {
    Daily,
    Weekly,
    #[default]
    Monthly,
    Quarterly,
    SemiAnnual,
    Annual,
    Continuous,
}

impl CompoundingFrequency {
    /// get number of compounding periods per year
    pub fn periods_per_year(&self) -> u32 {
        match self {
            CompoundingFrequency::Daily => 365,
            CompoundingFrequency::Weekly => 52,
            CompoundingFrequency::Monthly => 12,
            CompoundingFrequency::Quarterly => 4,
            CompoundingFrequency::SemiAnnual => 2,
            CompoundingFrequency::Annual => 1,
            CompoundingFrequency::Continuous => 0, // special case
        }
    }
}

/// Monthly rate equivalent to `annual_rate` compounded at `frequency`.
///
/// Monthly compounding is the plain nominal split (annual / 12). Every other
/// convention is converted through the effective rate, so a loan paid
/// monthly accrues exactly what the stated compounding would produce.
pub fn periodic_rate(annual_rate: Rate, frequency: CompoundingFrequency) -> Result<Rate> {
    if annual_rate.is_negative() {
        return Err(LoanError::invalid_input("annual_rate", "rate cannot be negative"));
    }
    if annual_rate.is_zero() {
        return Ok(Rate::ZERO);
    }

    let annual = annual_rate.as_decimal();
    let monthly = match frequency {
        CompoundingFrequency::Monthly => annual / Decimal::from(12),
        CompoundingFrequency::Continuous => {
            let growth = (annual / Decimal::from(12))
                .checked_exp()
                .ok_or_else(|| LoanError::overflow("continuous compounding"))?;
            growth - Decimal::ONE
        }
        _ => {
            let m = Decimal::from(frequency.periods_per_year());
            let base = Decimal::ONE + annual / m;
            let growth = base
                .checked_powd(m / Decimal::from(12))
                .ok_or_else(|| LoanError::overflow("periodic rate conversion"))?;
            growth - Decimal::ONE
        }
    };

    Ok(Rate::from_decimal(monthly))
}

/// effective annual yield of a nominal rate
pub fn annual_percentage_yield(annual_rate: Rate, frequency: CompoundingFrequency) -> Result<Rate> {
    let annual = annual_rate.as_decimal();
    let growth = match frequency {
        CompoundingFrequency::Continuous => annual.checked_exp(),
        _ => {
            let n = frequency.periods_per_year();
            (Decimal::ONE + annual / Decimal::from(n)).checked_powu(n as u64)
        }
    }
    .ok_or_else(|| LoanError::overflow("annual percentage yield"))?;

    Ok(Rate::from_decimal(growth - Decimal::ONE))
}
