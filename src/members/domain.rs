use crate::core::library::LibraryResult;
use crate::members::domain::model::MemberEntity;

pub mod model;
pub mod service;

pub trait MemberService {
    fn register_member(&mut self, member: MemberEntity) -> LibraryResult<MemberEntity>;
    fn deregister_member(&mut self, member_id: &str) -> LibraryResult<()>;
    fn renew_membership(&mut self, member_id: &str, extra_days: Option<i64>) -> LibraryResult<MemberEntity>;
    fn force_expire(&mut self, member_id: &str) -> LibraryResult<MemberEntity>;
    fn find_member(&self, member_id: &str) -> LibraryResult<MemberEntity>;
    fn list_active(&self) -> Vec<MemberEntity>;
    fn list_expired(&self) -> Vec<MemberEntity>;
    fn count_members(&self) -> usize;
}
