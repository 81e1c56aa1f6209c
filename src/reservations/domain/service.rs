use tracing::{info, warn};
use uuid::Uuid;
use crate::books::domain::model::BookEntity;
use crate::core::domain::Configuration;
use crate::core::library::{LibraryError, LibraryResult};
use crate::core::repository::LibraryStore;
use crate::reservations::domain::ReservationService;
use crate::reservations::domain::model::ReservationEntity;
use crate::utils::date::today;

pub struct ReservationServiceImpl<'a> {
    reservation_days: i64,
    store: &'a mut LibraryStore,
}

impl<'a> ReservationServiceImpl<'a> {
    pub fn new(config: &Configuration, store: &'a mut LibraryStore) -> Self {
        Self {
            reservation_days: config.reservation_days,
            store,
        }
    }

    fn find_reservation(&self, reservation_id: &str) -> LibraryResult<ReservationEntity> {
        self.store.get::<ReservationEntity>(reservation_id).ok_or_else(|| {
            LibraryError::not_found(format!("Reservation {} not found", reservation_id).as_str())
        })
    }
}

impl<'a> ReservationService for ReservationServiceImpl<'a> {
    fn reserve_book(&mut self, member_id: &str, isbn: &str) -> LibraryResult<ReservationEntity> {
        let mut book = self.store.get::<BookEntity>(isbn).ok_or_else(|| {
            LibraryError::book_not_available(format!("Book {} not found in catalog", isbn).as_str())
        })?;
        book.mark_reserved()?;
        let reservation = ReservationEntity::new(Uuid::new_v4().to_string().as_str(), member_id, isbn,
                                                 today(), self.reservation_days);

        self.store.update(book)?;
        self.store.add(reservation.clone())?;
        info!(reservation_id = %reservation.reservation_id, member_id, isbn, "reserved book");
        Ok(reservation)
    }

    // the book goes back on the shelf together with the cancellation
    fn cancel_reservation(&mut self, reservation_id: &str) -> LibraryResult<ReservationEntity> {
        let mut reservation = self.find_reservation(reservation_id)?;
        reservation.cancel()?;
        let book = self.store.get::<BookEntity>(reservation.isbn.as_str()).map(|mut book| {
            book.mark_returned();
            book
        });

        self.store.update(reservation.clone())?;
        match book {
            Some(book) => self.store.update(book)?,
            None => warn!(reservation_id, isbn = %reservation.isbn, "reserved book is no longer catalogued"),
        }
        info!(reservation_id, isbn = %reservation.isbn, "cancelled reservation");
        Ok(reservation)
    }

    // Only reservation state changes here; the reserved books keep their status.
    fn expire_reservations(&mut self) -> LibraryResult<Vec<ReservationEntity>> {
        let mut expired = vec![];
        for mut reservation in self.store.all::<ReservationEntity>() {
            if reservation.active && reservation.is_expired() {
                reservation.expire();
                self.store.update(reservation.clone())?;
                expired.push(reservation);
            }
        }
        info!(count = expired.len(), "expired reservations");
        Ok(expired)
    }

    fn list_active_reservations(&self) -> Vec<ReservationEntity> {
        self.store.all::<ReservationEntity>().into_iter()
            .filter(|r| r.active)
            .collect()
    }

    fn list_expired_reservations(&self) -> Vec<ReservationEntity> {
        self.store.all::<ReservationEntity>().into_iter()
            .filter(|r| r.is_expired())
            .collect()
    }

    fn count_reservations(&self) -> usize {
        self.store.count::<ReservationEntity>()
    }
}
