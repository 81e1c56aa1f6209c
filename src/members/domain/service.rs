use chrono::Duration;
use tracing::info;
use crate::core::domain::Configuration;
use crate::core::library::{LibraryError, LibraryResult};
use crate::core::repository::LibraryStore;
use crate::members::domain::MemberService;
use crate::members::domain::model::MemberEntity;

pub struct MemberServiceImpl<'a> {
    membership_days: i64,
    store: &'a mut LibraryStore,
}

impl<'a> MemberServiceImpl<'a> {
    pub fn new(config: &Configuration, store: &'a mut LibraryStore) -> Self {
        Self {
            membership_days: config.membership_days,
            store,
        }
    }
}

impl<'a> MemberService for MemberServiceImpl<'a> {
    fn register_member(&mut self, member: MemberEntity) -> LibraryResult<MemberEntity> {
        member.validate()?;
        if self.store.get::<MemberEntity>(member.member_id.as_str()).is_some() {
            return Err(LibraryError::duplicate_key(
                format!("Member {} already registered", member.member_id).as_str()));
        }
        self.store.add(member.clone())?;
        info!(member_id = %member.member_id, "registered member");
        Ok(member)
    }

    fn deregister_member(&mut self, member_id: &str) -> LibraryResult<()> {
        let member = self.find_member(member_id)?;
        if !member.current_loans.is_empty() {
            return Err(LibraryError::validation(
                format!("Cannot deregister member {} with active loans", member_id).as_str()));
        }
        self.store.delete::<MemberEntity>(member_id)?;
        info!(member_id, "deregistered member");
        Ok(())
    }

    fn renew_membership(&mut self, member_id: &str, extra_days: Option<i64>) -> LibraryResult<MemberEntity> {
        let mut member = self.find_member(member_id)?;
        member.renew_membership(extra_days.unwrap_or(self.membership_days))?;
        self.store.update(member.clone())?;
        info!(member_id, expiry = %member.membership_expiry, "renewed membership");
        Ok(member)
    }

    // expiry moves to the day before registration
    fn force_expire(&mut self, member_id: &str) -> LibraryResult<MemberEntity> {
        let mut member = self.find_member(member_id)?;
        member.membership_expiry = member.registered_on - Duration::days(1);
        if member.is_membership_active() {
            return Err(LibraryError::membership_expired(
                format!("Cannot force expire membership of {} registered on {}",
                        member_id, member.registered_on).as_str()));
        }
        self.store.update(member.clone())?;
        info!(member_id, "forced membership expiry");
        Ok(member)
    }

    fn find_member(&self, member_id: &str) -> LibraryResult<MemberEntity> {
        self.store.get::<MemberEntity>(member_id).ok_or_else(|| {
            LibraryError::member_not_found(format!("Member {} not found", member_id).as_str())
        })
    }

    fn list_active(&self) -> Vec<MemberEntity> {
        self.store.all::<MemberEntity>().into_iter()
            .filter(|m| m.is_membership_active())
            .collect()
    }

    fn list_expired(&self) -> Vec<MemberEntity> {
        self.store.all::<MemberEntity>().into_iter()
            .filter(|m| !m.is_membership_active())
            .collect()
    }

    fn count_members(&self) -> usize {
        self.store.count::<MemberEntity>()
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use crate::core::domain::Configuration;
    use crate::core::library::LibraryError;
    use crate::core::repository::LibraryStore;
    use crate::members::domain::MemberService;
    use crate::members::domain::model::MemberEntity;
    use crate::members::domain::service::MemberServiceImpl;
    use crate::utils::date::today;

    #[test]
    fn test_should_register_and_find() {
        let mut store = LibraryStore::new();
        let mut svc = MemberServiceImpl::new(&Configuration::new(), &mut store);
        svc.register_member(MemberEntity::new("M1", "Ada", today())).expect("should register");
        let res = svc.register_member(MemberEntity::new("M1", "Other", today()));
        assert!(matches!(res, Err(LibraryError::DuplicateKey { .. })));
        assert_eq!("Ada", svc.find_member("M1").expect("should find").name);
        assert!(matches!(svc.find_member("M2"), Err(LibraryError::MemberNotFound { .. })));
        assert_eq!(1, svc.count_members());
    }

    #[test]
    fn test_should_reject_invalid_contact_on_register() {
        let mut store = LibraryStore::new();
        let mut svc = MemberServiceImpl::new(&Configuration::new(), &mut store);
        let mut member = MemberEntity::new("M1", "Ada", today());
        member.email = Some("nope".to_string());
        assert!(matches!(svc.register_member(member), Err(LibraryError::Validation { .. })));
        assert_eq!(0, svc.count_members());
    }

    #[test]
    fn test_should_not_deregister_with_loans() {
        let mut store = LibraryStore::new();
        let mut member = MemberEntity::new("M1", "Ada", today());
        member.current_loans.push("L1".to_string());
        store.add(member).expect("should add member");
        let mut svc = MemberServiceImpl::new(&Configuration::new(), &mut store);
        assert!(matches!(svc.deregister_member("M1"), Err(LibraryError::Validation { .. })));
        assert!(matches!(svc.deregister_member("M9"), Err(LibraryError::MemberNotFound { .. })));
    }

    #[test]
    fn test_should_deregister() {
        let mut store = LibraryStore::new();
        store.add(MemberEntity::new("M1", "Ada", today())).expect("should add member");
        MemberServiceImpl::new(&Configuration::new(), &mut store).deregister_member("M1").expect("should deregister");
        assert_eq!(0, store.count::<MemberEntity>());
    }

    #[test]
    fn test_should_renew_with_configured_default() {
        let mut store = LibraryStore::new();
        let member = MemberEntity::new("M1", "Ada", today());
        let expiry = member.membership_expiry;
        store.add(member).expect("should add member");
        let mut svc = MemberServiceImpl::new(&Configuration::new(), &mut store);
        let renewed = svc.renew_membership("M1", None).expect("should renew");
        assert_eq!(expiry + Duration::days(365), renewed.membership_expiry);
        let renewed = svc.renew_membership("M1", Some(10)).expect("should renew");
        assert_eq!(expiry + Duration::days(375), renewed.membership_expiry);
    }

    #[test]
    fn test_should_force_expire_and_split_lists() {
        let mut store = LibraryStore::new();
        store.add(MemberEntity::new("M1", "Ada", today())).expect("should add member");
        store.add(MemberEntity::new("M2", "Alan", today())).expect("should add member");
        let mut svc = MemberServiceImpl::new(&Configuration::new(), &mut store);
        let expired = svc.force_expire("M1").expect("should expire");
        assert_eq!(today() - Duration::days(1), expired.membership_expiry);
        assert_eq!(1, svc.list_active().len());
        assert_eq!("M1", svc.list_expired()[0].member_id);
    }

    #[test]
    fn test_should_not_force_expire_future_registration() {
        let mut store = LibraryStore::new();
        store.add(MemberEntity::new("M1", "Ada", today() + Duration::days(10))).expect("should add member");
        let mut svc = MemberServiceImpl::new(&Configuration::new(), &mut store);
        assert!(matches!(svc.force_expire("M1"), Err(LibraryError::MembershipExpired { .. })));
        assert!(svc.find_member("M1").expect("should find").is_membership_active());
    }
}
