use crate::core::library::{LibraryResult, Role};
use crate::users::domain::model::UserEntity;

pub mod model;
pub mod service;

pub trait UserService {
    fn create_user(&mut self, name: &str, role: Role) -> LibraryResult<UserEntity>;
    fn get_user(&self, user_id: &str) -> LibraryResult<UserEntity>;
    fn change_role(&mut self, admin_id: &str, target_user_id: &str, role: Role) -> LibraryResult<UserEntity>;
    fn deactivate_user(&mut self, admin_id: &str, target_user_id: &str) -> LibraryResult<UserEntity>;
    fn activate_user(&mut self, admin_id: &str, target_user_id: &str) -> LibraryResult<UserEntity>;
    fn login_user(&mut self, user_id: &str) -> LibraryResult<UserEntity>;
    fn list_users_by_role(&self, role: Role) -> Vec<UserEntity>;
    fn list_active_users(&self) -> Vec<UserEntity>;
    fn count_users(&self) -> usize;
}
