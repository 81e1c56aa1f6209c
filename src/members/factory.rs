use serde_json::Value;
use crate::core::library::LibraryResult;
use crate::members::domain::model::MemberEntity;
use crate::core::domain::Configuration;
use crate::core::repository::LibraryStore;
use crate::members::domain::MemberService;
use crate::members::domain::service::MemberServiceImpl;

// Rebuilds a member and re-checks its contact details.
pub fn member_factory(rec: &Value) -> LibraryResult<MemberEntity> {
    let member: MemberEntity = serde_json::from_value(rec.clone())?;
    member.validate()?;
    Ok(member)
}

pub fn create_member_service<'a>(config: &Configuration, store: &'a mut LibraryStore) -> Box<dyn MemberService + 'a> {
    Box::new(MemberServiceImpl::new(config, store))
}
