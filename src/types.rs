use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::errors::{LoanError, Result};

/// down payment entered either as an amount or as a percentage of the price
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum DownPayment {
    Amount(Money),
    Percent(Decimal),
}

impl DownPayment {
    /// resolve against the purchase price
    pub fn amount_for(&self, price: Money) -> Result<Money> {
        let amount = match *self {
            DownPayment::Amount(amount) => amount,
            DownPayment::Percent(percent) => {
                if percent < Decimal::ZERO || percent > Decimal::ONE_HUNDRED {
                    return Err(LoanError::invalid_input(
                        "down_payment",
                        "percentage must be between 0 and 100",
                    ));
                }
                price.percentage(percent)
            }
        };

        if amount.is_negative() {
            return Err(LoanError::invalid_input("down_payment", "amount cannot be negative"));
        }
        if amount >= price {
            return Err(LoanError::invalid_input(
                "down_payment",
                "down payment covers the full price",
            ));
        }
        Ok(amount)
    }
}
