use serde_json::Value;
use crate::core::library::LibraryResult;
use crate::users::domain::model::UserEntity;
use crate::core::domain::Configuration;
use crate::core::repository::LibraryStore;
use crate::users::domain::UserService;
use crate::users::domain::service::UserServiceImpl;

pub fn user_factory(rec: &Value) -> LibraryResult<UserEntity> {
    Ok(serde_json::from_value(rec.clone())?)
}

pub fn create_user_service<'a>(config: &Configuration, store: &'a mut LibraryStore) -> Box<dyn UserService + 'a> {
    Box::new(UserServiceImpl::new(config, store))
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use crate::core::library::Role;
    use crate::users::factory::user_factory;

    #[test]
    fn test_should_build_user() {
        let user = user_factory(&json!({
            "user_id": "U1", "name": "Ada", "role": "Role.ADMIN",
            "joined_on": "2024-03-01 08:00:00+00:00", "last_login": null}))
            .expect("should build user");
        assert_eq!(Role::Admin, user.role);
        assert!(user.is_active);
        assert_eq!(None, user.last_login);
        assert_eq!("2024-03-01T08:00:00+00:00", user.joined_on.to_rfc3339());
    }

    #[test]
    fn test_should_default_unknown_role() {
        let user = user_factory(&json!({
            "user_id": "U2", "name": "Bob", "role": "JANITOR", "is_active": false,
            "joined_on": "2024-03-01T08:00:00Z", "last_login": "2024-03-02T09:30:00Z"}))
            .expect("should build user");
        assert_eq!(Role::Guest, user.role);
        assert!(!user.is_active);
        assert!(user.last_login.is_some());
    }

    #[test]
    fn test_should_reject_bad_timestamp() {
        let res = user_factory(&json!({
            "user_id": "U3", "name": "Eve", "role": "GUEST", "joined_on": "someday"}));
        assert!(res.is_err());
    }
}
