use crate::core::library::LibraryResult;
use crate::reservations::domain::model::ReservationEntity;

pub mod model;
pub mod service;

pub trait ReservationService {
    fn reserve_book(&mut self, member_id: &str, isbn: &str) -> LibraryResult<ReservationEntity>;
    fn cancel_reservation(&mut self, reservation_id: &str) -> LibraryResult<ReservationEntity>;
    fn expire_reservations(&mut self) -> LibraryResult<Vec<ReservationEntity>>;
    fn list_active_reservations(&self) -> Vec<ReservationEntity>;
    fn list_expired_reservations(&self) -> Vec<ReservationEntity>;
    fn count_reservations(&self) -> usize;
}
