use thiserror::Error;

use crate::decimal::Money;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LoanError {
    #[error("invalid input for {field}: {message}")]
    InvalidInput {
        field: &'static str,
        message: String,
    },

    #[error("payment too low to pay off loan: payment {payment}, first period interest {interest}")]
    Underpayment {
        payment: Money,
        interest: Money,
    },

    #[error("schedule is empty")]
    EmptySchedule,

    #[error("calculation error: {message}")]
    CalculationError {
        message: String,
    },

    #[error("invalid date: {message}")]
    InvalidDate {
        message: String,
    },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration {
        message: String,
    },
}

impl LoanError {
    pub(crate) fn invalid_input(field: &'static str, message: impl Into<String>) -> Self {
        LoanError::InvalidInput {
            field,
            message: message.into(),
        }
    }

    pub(crate) fn overflow(operation: &str) -> Self {
        LoanError::CalculationError {
            message: format!("decimal overflow in {operation}"),
        }
    }
}

impl From<serde_json::Error> for LoanError {
    fn from(err: serde_json::Error) -> Self {
        LoanError::InvalidConfiguration {
            message: err.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, LoanError>;
