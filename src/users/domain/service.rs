use tracing::{info, warn};
use uuid::Uuid;
use crate::core::domain::Configuration;
use crate::core::library::{LibraryError, LibraryResult, Role};
use crate::core::repository::LibraryStore;
use crate::users::domain::UserService;
use crate::users::domain::model::UserEntity;

pub struct UserServiceImpl<'a> {
    store: &'a mut LibraryStore,
}

impl<'a> UserServiceImpl<'a> {
    pub fn new(_config: &Configuration, store: &'a mut LibraryStore) -> Self {
        Self {
            store,
        }
    }

    // acting user must exist and be an active admin
    fn check_admin(&self, admin_id: &str, what: &str) -> LibraryResult<()> {
        let admin = self.get_user(admin_id)?;
        if !admin.is_admin() {
            warn!(admin_id, what, "refused user management request");
            return Err(LibraryError::access_denied(format!("Only ADMIN can {}", what).as_str()));
        }
        Ok(())
    }

    fn modify<F>(&mut self, admin_id: &str, target_user_id: &str, what: &str, change: F) -> LibraryResult<UserEntity>
        where F: FnOnce(&mut UserEntity) {
        self.check_admin(admin_id, what)?;
        let mut user = self.get_user(target_user_id)?;
        change(&mut user);
        self.store.update(user.clone())?;
        info!(admin_id, user_id = target_user_id, what, "modified user");
        Ok(user)
    }
}

impl<'a> UserService for UserServiceImpl<'a> {
    fn create_user(&mut self, name: &str, role: Role) -> LibraryResult<UserEntity> {
        let user = UserEntity::new(Uuid::new_v4().to_string().as_str(), name, role);
        self.store.add(user.clone())?;
        info!(user_id = %user.user_id, role = %role, "created user");
        Ok(user)
    }

    fn get_user(&self, user_id: &str) -> LibraryResult<UserEntity> {
        self.store.get::<UserEntity>(user_id).ok_or_else(|| {
            LibraryError::user_not_found(format!("User {} not found", user_id).as_str())
        })
    }

    fn change_role(&mut self, admin_id: &str, target_user_id: &str, role: Role) -> LibraryResult<UserEntity> {
        self.modify(admin_id, target_user_id, "change roles", |user| user.role = role)
    }

    fn deactivate_user(&mut self, admin_id: &str, target_user_id: &str) -> LibraryResult<UserEntity> {
        self.modify(admin_id, target_user_id, "deactivate users", |user| user.deactivate())
    }

    fn activate_user(&mut self, admin_id: &str, target_user_id: &str) -> LibraryResult<UserEntity> {
        self.modify(admin_id, target_user_id, "activate users", |user| user.activate())
    }

    fn login_user(&mut self, user_id: &str) -> LibraryResult<UserEntity> {
        let mut user = self.get_user(user_id)?;
        user.login();
        self.store.update(user.clone())?;
        info!(user_id, "user logged in");
        Ok(user)
    }

    fn list_users_by_role(&self, role: Role) -> Vec<UserEntity> {
        self.store.all::<UserEntity>().into_iter()
            .filter(|u| u.role == role)
            .collect()
    }

    fn list_active_users(&self) -> Vec<UserEntity> {
        self.store.all::<UserEntity>().into_iter()
            .filter(|u| u.is_active)
            .collect()
    }

    fn count_users(&self) -> usize {
        self.store.count::<UserEntity>()
    }
}
