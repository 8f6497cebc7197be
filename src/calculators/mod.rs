pub mod auto_loan;
pub mod loan;
pub mod mortgage;
pub mod refinance;

pub use auto_loan::{quote_auto_loan, AutoLoanInputs, AutoLoanQuote};
pub use loan::{calculate, LoanBuilder, LoanCalculation};
pub use mortgage::{quote_mortgage, MonthlyCost, MortgageInputs, MortgageQuote};
pub use refinance::{analyze_refinance, RefinanceAnalysis, RefinanceInputs};
