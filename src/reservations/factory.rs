use chrono::{Duration, NaiveDate};
use serde::Deserialize;
use serde_json::Value;
use crate::core::library::LibraryResult;
use crate::reservations::domain::model::ReservationEntity;
use crate::core::domain::Configuration;
use crate::core::repository::LibraryStore;
use crate::reservations::domain::ReservationService;
use crate::reservations::domain::service::ReservationServiceImpl;

#[derive(Deserialize)]
struct ReservationRecord {
    reservation_id: String,
    member_id: String,
    isbn: String,
    reserved_on: NaiveDate,
    #[serde(default)]
    expiration_date: Option<NaiveDate>,
    #[serde(default)]
    active: Option<bool>,
}

/// Builds a reservation factory; records lacking `expiration_date` get
/// `reserved_on + duration_days`, records lacking `active` are active.
pub fn reservation_factory(duration_days: i64) -> impl Fn(&Value) -> LibraryResult<ReservationEntity> {
    move |rec: &Value| {
        let rec: ReservationRecord = serde_json::from_value(rec.clone())?;
        Ok(ReservationEntity {
            expiration_date: rec.expiration_date
                .unwrap_or(rec.reserved_on + Duration::days(duration_days)),
            active: rec.active.unwrap_or(true),
            reservation_id: rec.reservation_id,
            member_id: rec.member_id,
            isbn: rec.isbn,
            reserved_on: rec.reserved_on,
        })
    }
}

pub fn create_reservation_service<'a>(config: &Configuration, store: &'a mut LibraryStore) -> Box<dyn ReservationService + 'a> {
    Box::new(ReservationServiceImpl::new(config, store))
}
