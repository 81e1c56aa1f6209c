use chrono::Duration;
use tracing::{info, warn};
use uuid::Uuid;
use crate::books::domain::Book;
use crate::books::domain::model::BookEntity;
use crate::core::domain::Configuration;
use crate::core::library::{LibraryError, LibraryResult};
use crate::core::repository::LibraryStore;
use crate::loans::domain::LoanService;
use crate::loans::domain::model::LoanEntity;
use crate::members::domain::model::MemberEntity;
use crate::utils::date::today;

pub struct LoanServiceImpl<'a> {
    loan_days: i64,
    max_renewals: u32,
    store: &'a mut LibraryStore,
}

impl<'a> LoanServiceImpl<'a> {
    pub fn new(config: &Configuration, store: &'a mut LibraryStore) -> Self {
        Self {
            loan_days: config.loan_days,
            max_renewals: config.max_renewals,
            store,
        }
    }

    fn find_book(&self, isbn: &str) -> LibraryResult<BookEntity> {
        self.store.get::<BookEntity>(isbn).ok_or_else(|| {
            LibraryError::not_found(format!("Book {} not found", isbn).as_str())
        })
    }

    fn find_member(&self, member_id: &str) -> LibraryResult<MemberEntity> {
        self.store.get::<MemberEntity>(member_id).ok_or_else(|| {
            LibraryError::member_not_found(format!("Member {} not found", member_id).as_str())
        })
    }
}

// Each multi-entity operation below first prepares every mutated copy and
// only then writes them back, so a refused operation leaves the store as is.
impl<'a> LoanService for LoanServiceImpl<'a> {
    fn loan_book(&mut self, member_id: &str, isbn: &str) -> LibraryResult<LoanEntity> {
        let mut member = self.find_member(member_id)?;
        let mut book = self.store.get::<BookEntity>(isbn).ok_or_else(|| {
            LibraryError::book_not_available(format!("Book {} not found in catalog", isbn).as_str())
        })?;
        if !book.is_available() {
            return Err(LibraryError::book_not_available(
                format!("Book {} is not available", isbn).as_str()));
        }
        book.mark_loaned()?;
        let loan_date = today();
        let loan = LoanEntity::new(Uuid::new_v4().to_string().as_str(), member_id, isbn,
                                   loan_date, loan_date + Duration::days(self.loan_days));
        member.add_loan(loan.loan_id.as_str())?;

        self.store.update(book)?;
        self.store.add(loan.clone())?;
        self.store.update(member)?;
        info!(loan_id = %loan.loan_id, member_id, isbn, due_date = %loan.due_date, "loaned book");
        Ok(loan)
    }

    fn return_book(&mut self, loan_id: &str) -> LibraryResult<LoanEntity> {
        let mut loan = self.find_loan(loan_id)?;
        let mut book = self.find_book(loan.isbn.as_str())?;
        let mut member = self.find_member(loan.member_id.as_str())?;
        loan.mark_returned(today())?;
        book.mark_returned();
        member.remove_loan(loan_id)?;

        self.store.update(loan.clone())?;
        self.store.update(book)?;
        self.store.update(member)?;
        info!(loan_id, isbn = %loan.isbn, "returned book");
        Ok(loan)
    }

    fn renew_loan(&mut self, loan_id: &str, extra_days: Option<i64>) -> LibraryResult<LoanEntity> {
        let mut loan = self.find_loan(loan_id)?;
        loan.renew(extra_days.unwrap_or(self.loan_days), self.max_renewals)?;
        self.store.update(loan.clone())?;
        info!(loan_id, due_date = %loan.due_date, renew_count = loan.renew_count, "renewed loan");
        Ok(loan)
    }

    fn cancel_loan(&mut self, loan_id: &str) -> LibraryResult<()> {
        let loan = self.find_loan(loan_id)?;
        let mut book = self.find_book(loan.isbn.as_str())?;
        book.mark_returned();
        let member = self.store.get::<MemberEntity>(loan.member_id.as_str())
            .filter(|m| m.current_loans.iter().any(|id| id == loan_id))
            .map(|mut m| m.remove_loan(loan_id).map(|_| m))
            .transpose()?;

        self.store.update(book)?;
        if let Some(member) = member {
            self.store.update(member)?;
        }
        self.store.delete::<LoanEntity>(loan_id)?;
        if loan.is_returned() {
            warn!(loan_id, "cancelled a loan that was already returned");
        }
        info!(loan_id, isbn = %loan.isbn, "cancelled loan");
        Ok(())
    }

    fn find_loan(&self, loan_id: &str) -> LibraryResult<LoanEntity> {
        self.store.get::<LoanEntity>(loan_id).ok_or_else(|| {
            LibraryError::not_found(format!("Loan {} not found", loan_id).as_str())
        })
    }

    fn list_active_loans(&self) -> Vec<LoanEntity> {
        self.store.all::<LoanEntity>().into_iter()
            .filter(|loan| !loan.is_returned())
            .collect()
    }

    fn list_overdue_loans(&self) -> Vec<LoanEntity> {
        self.list_active_loans().into_iter()
            .filter(|loan| loan.is_overdue())
            .collect()
    }

    fn count_loans(&self) -> usize {
        self.store.count::<LoanEntity>()
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use crate::books::domain::model::BookEntity;
    use crate::core::domain::Configuration;
    use crate::core::library::{BookStatus, LibraryError};
    use crate::core::repository::LibraryStore;
    use crate::loans::domain::LoanService;
    use crate::loans::domain::model::LoanEntity;
    use crate::loans::domain::service::LoanServiceImpl;
    use crate::members::domain::model::MemberEntity;
    use crate::utils::date::today;

    fn seeded_store() -> LibraryStore {
        let mut store = LibraryStore::new();
        store.add(BookEntity::new("B1", "Dune", "Herbert")).expect("should add book");
        store.add(MemberEntity::new("M1", "Ada", today())).expect("should add member");
        store
    }

    #[test]
    fn test_should_loan_book() {
        let mut store = seeded_store();
        let config = Configuration::new();
        let loan = LoanServiceImpl::new(&config, &mut store).loan_book("M1", "B1").expect("should loan");
        assert_eq!("M1", loan.member_id);
        assert_eq!("B1", loan.isbn);
        assert_eq!(loan.loan_date + Duration::days(config.loan_days), loan.due_date);

        let book: BookEntity = store.get("B1").expect("should return book");
        assert_eq!(BookStatus::Loaned, book.status);
        let member: MemberEntity = store.get("M1").expect("should return member");
        assert!(member.current_loans.contains(&loan.loan_id));
        assert_eq!(Some(loan), store.get::<LoanEntity>(member.current_loans[0].as_str()));
    }

    #[test]
    fn test_should_fail_loan_for_missing_parties() {
        let mut store = seeded_store();
        let config = Configuration::new();
        let mut svc = LoanServiceImpl::new(&config, &mut store);
        assert!(matches!(svc.loan_book("M9", "B1"), Err(LibraryError::MemberNotFound { .. })));
        assert!(matches!(svc.loan_book("M1", "B9"), Err(LibraryError::BookNotAvailable { .. })));
        assert_eq!(0, svc.count_loans());
    }

    #[test]
    fn test_should_fail_loan_of_unavailable_book() {
        let mut store = seeded_store();
        let config = Configuration::new();
        let mut svc = LoanServiceImpl::new(&config, &mut store);
        svc.loan_book("M1", "B1").expect("should loan");
        assert!(matches!(svc.loan_book("M1", "B1"), Err(LibraryError::BookNotAvailable { .. })));
        assert_eq!(1, svc.count_loans());
    }

    #[test]
    fn test_should_leave_store_untouched_for_expired_member() {
        let mut store = seeded_store();
        let mut member: MemberEntity = store.get("M1").expect("should return member");
        member.membership_expiry = today() - Duration::days(1);
        store.update(member).expect("should update member");

        let res = LoanServiceImpl::new(&Configuration::new(), &mut store).loan_book("M1", "B1");
        assert!(matches!(res, Err(LibraryError::MembershipExpired { .. })));
        assert_eq!(BookStatus::Available, store.get::<BookEntity>("B1").expect("should return book").status);
        assert_eq!(0, store.count::<LoanEntity>());
    }

    #[test]
    fn test_should_return_book() {
        let mut store = seeded_store();
        let config = Configuration::new();
        let mut svc = LoanServiceImpl::new(&config, &mut store);
        let loan = svc.loan_book("M1", "B1").expect("should loan");
        let returned = svc.return_book(loan.loan_id.as_str()).expect("should return");
        assert_eq!(Some(today()), returned.returned_on);
        assert!(matches!(svc.return_book(loan.loan_id.as_str()), Err(LibraryError::Validation { .. })));
        assert!(matches!(svc.return_book("nope"), Err(LibraryError::NotFound { .. })));
        assert!(svc.list_active_loans().is_empty());

        assert_eq!(BookStatus::Available, store.get::<BookEntity>("B1").expect("should return book").status);
        assert!(store.get::<MemberEntity>("M1").expect("should return member").current_loans.is_empty());
    }

    #[test]
    fn test_should_renew_loan() {
        let mut store = seeded_store();
        let config = Configuration::new();
        let mut svc = LoanServiceImpl::new(&config, &mut store);
        let loan = svc.loan_book("M1", "B1").expect("should loan");
        let renewed = svc.renew_loan(loan.loan_id.as_str(), Some(3)).expect("should renew");
        assert_eq!(loan.due_date + Duration::days(3), renewed.due_date);
        let renewed = svc.renew_loan(loan.loan_id.as_str(), None).expect("should renew");
        assert_eq!(loan.due_date + Duration::days(3 + config.loan_days), renewed.due_date);
        let res = svc.renew_loan(loan.loan_id.as_str(), Some(1));
        assert!(matches!(res, Err(LibraryError::MaxRenewalsExceeded { .. })));
        assert_eq!(2, svc.find_loan(loan.loan_id.as_str()).expect("should find").renew_count);
    }

    #[test]
    fn test_should_cancel_loan() {
        let mut store = seeded_store();
        let config = Configuration::new();
        let mut svc = LoanServiceImpl::new(&config, &mut store);
        let loan = svc.loan_book("M1", "B1").expect("should loan");
        svc.cancel_loan(loan.loan_id.as_str()).expect("should cancel");
        assert!(matches!(svc.cancel_loan(loan.loan_id.as_str()), Err(LibraryError::NotFound { .. })));
        assert_eq!(0, svc.count_loans());

        assert_eq!(BookStatus::Available, store.get::<BookEntity>("B1").expect("should return book").status);
        assert!(store.get::<MemberEntity>("M1").expect("should return member").current_loans.is_empty());
    }

    #[test]
    fn test_should_list_overdue_loans() {
        let mut store = seeded_store();
        let mut overdue = LoanEntity::new("L1", "M1", "B1", today() - Duration::days(30), today() - Duration::days(2));
        store.add(overdue.clone()).expect("should add loan");
        overdue.loan_id = "L2".to_string();
        overdue.returned_on = Some(today());
        store.add(overdue).expect("should add loan");
        store.add(LoanEntity::new("L3", "M1", "B1", today(), today() + Duration::days(14))).expect("should add loan");

        let svc = LoanServiceImpl::new(&Configuration::new(), &mut store);
        assert_eq!(2, svc.list_active_loans().len());
        let overdue = svc.list_overdue_loans();
        assert_eq!(1, overdue.len());
        assert_eq!("L1", overdue[0].loan_id);
        assert_eq!(3, svc.count_loans());
    }
}
