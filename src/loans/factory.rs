use serde_json::Value;
use crate::core::library::LibraryResult;
use crate::loans::domain::model::LoanEntity;
use crate::core::domain::Configuration;
use crate::core::repository::LibraryStore;
use crate::loans::domain::LoanService;
use crate::loans::domain::service::LoanServiceImpl;

pub fn loan_factory(rec: &Value) -> LibraryResult<LoanEntity> {
    let loan: LoanEntity = serde_json::from_value(rec.clone())?;
    Ok(loan)
}

pub fn create_loan_service<'a>(config: &Configuration, store: &'a mut LibraryStore) -> Box<dyn LoanService + 'a> {
    Box::new(LoanServiceImpl::new(config, store))
}
