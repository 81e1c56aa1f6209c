use std::path::Path;
use serde_json::Value;
use tracing::debug;
use crate::books::domain::model::BookEntity;
use crate::books::factory::book_factory;
use crate::core::domain::Configuration;
use crate::core::library::LibraryResult;
use crate::core::repository::{Entity, EntityKind, LibraryStore};
use crate::loans::domain::model::LoanEntity;
use crate::loans::factory::loan_factory;
use crate::members::domain::model::MemberEntity;
use crate::members::factory::member_factory;
use crate::reservations::domain::model::ReservationEntity;
use crate::reservations::factory::reservation_factory;
use crate::users::domain::model::UserEntity;
use crate::users::factory::user_factory;

// AppState carries what a single CLI invocation works on: the configuration
// and the store loaded from the data files.
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: Configuration,
    pub store: LibraryStore,
}

impl AppState {
    pub fn new(config: Configuration) -> AppState {
        AppState {
            config,
            store: LibraryStore::new(),
        }
    }

    /// Imports every table from its data file. A table whose file does not
    /// exist yet starts out empty; any other import failure is returned so
    /// that nothing gets written over an unreadable file.
    pub fn load(&mut self) -> LibraryResult<()> {
        let files = self.config.data_files.clone();
        let reservation_days = self.config.reservation_days;
        self.load_table(files.books.as_path(), book_factory)?;
        self.load_table(files.members.as_path(), member_factory)?;
        self.load_table(files.loans.as_path(), loan_factory)?;
        self.load_table(files.reservations.as_path(), reservation_factory(reservation_days))?;
        self.load_table(files.users.as_path(), user_factory)
    }

    fn load_table<T, F>(&mut self, path: &Path, factory: F) -> LibraryResult<()>
        where T: Entity, F: Fn(&Value) -> LibraryResult<T> {
        if !path.is_file() {
            debug!(kind = %T::KIND, path = %path.display(), "no data file, starting empty");
            return Ok(());
        }
        self.store.import_from_file(path, factory)?;
        debug!(kind = %T::KIND, path = %path.display(), count = self.store.count::<T>(), "loaded table");
        Ok(())
    }

    /// Writes the given tables back to their data files.
    pub fn save(&self, kinds: &[EntityKind]) -> LibraryResult<()> {
        let files = &self.config.data_files;
        for kind in kinds {
            match kind {
                EntityKind::Book => self.store.export_to_file::<BookEntity>(files.books.as_path())?,
                EntityKind::Member => self.store.export_to_file::<MemberEntity>(files.members.as_path())?,
                EntityKind::Loan => self.store.export_to_file::<LoanEntity>(files.loans.as_path())?,
                EntityKind::Reservation => self.store.export_to_file::<ReservationEntity>(files.reservations.as_path())?,
                EntityKind::User => self.store.export_to_file::<UserEntity>(files.users.as_path())?,
            }
        }
        Ok(())
    }
}
