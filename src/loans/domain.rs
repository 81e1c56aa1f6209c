use crate::core::library::LibraryResult;
use crate::loans::domain::model::LoanEntity;

pub mod model;
pub mod service;

pub trait LoanService {
    fn loan_book(&mut self, member_id: &str, isbn: &str) -> LibraryResult<LoanEntity>;
    fn return_book(&mut self, loan_id: &str) -> LibraryResult<LoanEntity>;
    fn renew_loan(&mut self, loan_id: &str, extra_days: Option<i64>) -> LibraryResult<LoanEntity>;
    fn cancel_loan(&mut self, loan_id: &str) -> LibraryResult<()>;
    fn find_loan(&self, loan_id: &str) -> LibraryResult<LoanEntity>;
    fn list_active_loans(&self) -> Vec<LoanEntity>;
    fn list_overdue_loans(&self) -> Vec<LoanEntity>;
    fn count_loans(&self) -> usize;
}
