use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::fmt::{Display, Formatter};
use std::fs;
use std::path::Path;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info};
use crate::books::domain::model::BookEntity;
use crate::core::domain::Identifiable;
use crate::core::library::{LibraryError, LibraryResult};
use crate::loans::domain::model::LoanEntity;
use crate::members::domain::model::MemberEntity;
use crate::reservations::domain::model::ReservationEntity;
use crate::users::domain::model::UserEntity;

#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub enum EntityKind {
    Book,
    Member,
    Loan,
    Reservation,
    User,
}

impl Display for EntityKind {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            EntityKind::Book => write!(f, "Book"),
            EntityKind::Member => write!(f, "Member"),
            EntityKind::Loan => write!(f, "Loan"),
            EntityKind::Reservation => write!(f, "Reservation"),
            EntityKind::User => write!(f, "User"),
        }
    }
}

pub type Table<T> = BTreeMap<String, T>;

// Entity maps each stored type onto its own table in the store.
pub trait Entity: Identifiable + Clone + Serialize + DeserializeOwned {
    const KIND: EntityKind;

    fn table(store: &LibraryStore) -> &Table<Self>;
    fn table_mut(store: &mut LibraryStore) -> &mut Table<Self>;
}

/// In-memory tables for every entity kind, keyed by each entity's primary key.
///
/// The store owns the canonical copy of every entity: reads hand out clones,
/// and a mutation only becomes visible after it is written back with
/// [`LibraryStore::update`].
#[derive(Debug, Default, Clone)]
pub struct LibraryStore {
    books: Table<BookEntity>,
    members: Table<MemberEntity>,
    loans: Table<LoanEntity>,
    reservations: Table<ReservationEntity>,
    users: Table<UserEntity>,
}

impl LibraryStore {
    pub fn new() -> Self {
        Self::default()
    }

    // create an entity
    pub fn add<T: Entity>(&mut self, entity: T) -> LibraryResult<()> {
        let key = entity.id();
        let table = T::table_mut(self);
        if table.contains_key(&key) {
            return Err(LibraryError::duplicate_key(
                format!("{} with key {} already exists", T::KIND, key).as_str()));
        }
        table.insert(key, entity);
        Ok(())
    }

    // get an entity
    pub fn get<T: Entity>(&self, key: &str) -> Option<T> {
        T::table(self).get(key).cloned()
    }

    pub fn all<T: Entity>(&self) -> Vec<T> {
        T::table(self).values().cloned().collect()
    }

    // entities whose serialized attributes equal every predicate value
    pub fn list<T: Entity>(&self, predicate: &HashMap<String, String>) -> Vec<T> {
        if predicate.is_empty() {
            return self.all();
        }
        T::table(self).values()
            .filter(|entity| {
                let json = serde_json::to_value(entity).unwrap_or(Value::Null);
                predicate.iter().all(|(attr, expected)| {
                    attribute(&json, attr).as_deref() == Some(expected.as_str())
                })
            })
            .cloned()
            .collect()
    }

    // case-insensitive substring search over one string attribute
    pub fn find_by_pattern<T: Entity>(&self, attr: &str, pattern: &str) -> Vec<T> {
        let pattern = pattern.to_lowercase();
        T::table(self).values()
            .filter(|entity| {
                match serde_json::to_value(entity) {
                    Ok(Value::Object(map)) => match map.get(attr) {
                        Some(Value::String(s)) => s.to_lowercase().contains(pattern.as_str()),
                        _ => false,
                    },
                    _ => false,
                }
            })
            .cloned()
            .collect()
    }

    // updates an entity
    pub fn update<T: Entity>(&mut self, entity: T) -> LibraryResult<()> {
        let key = entity.id();
        let table = T::table_mut(self);
        match table.get_mut(&key) {
            Some(existing) => {
                *existing = entity;
                Ok(())
            }
            None => Err(LibraryError::not_found(
                format!("{} with key {} not found", T::KIND, key).as_str())),
        }
    }

    // delete an entity
    pub fn delete<T: Entity>(&mut self, key: &str) -> LibraryResult<()> {
        T::table_mut(self).remove(key).map(|_| ()).ok_or_else(|| {
            LibraryError::not_found(format!("{} with key {} not found", T::KIND, key).as_str())
        })
    }

    pub fn clear<T: Entity>(&mut self) {
        T::table_mut(self).clear();
    }

    pub fn clear_all(&mut self) {
        *self = LibraryStore::default();
    }

    pub fn count<T: Entity>(&self) -> usize {
        T::table(self).len()
    }

    pub fn count_all(&self) -> usize {
        self.books.len() + self.members.len() + self.loans.len()
            + self.reservations.len() + self.users.len()
    }

    /// Writes every entity of one kind to `path` as a JSON array.
    pub fn export_to_file<T: Entity>(&self, path: &Path) -> LibraryResult<()> {
        let records: Vec<&T> = T::table(self).values().collect();
        let json = serde_json::to_string_pretty(&records).map_err(|err| {
            LibraryError::export(format!("Failed to export {} to {}: {}",
                                         T::KIND, path.display(), err).as_str())
        })?;
        fs::write(path, json).map_err(|err| {
            LibraryError::export(format!("Failed to export {} to {}: {}",
                                         T::KIND, path.display(), err).as_str())
        })?;
        info!(kind = %T::KIND, path = %path.display(), records = records.len(), "exported table");
        Ok(())
    }

    /// Replaces the table of one kind with the records read from `path`.
    ///
    /// Every record goes through `factory`; the current table is only
    /// swapped out once all of them were rebuilt, so a failed import leaves
    /// the store as it was.
    pub fn import_from_file<T, F>(&mut self, path: &Path, factory: F) -> LibraryResult<()>
        where T: Entity, F: Fn(&Value) -> LibraryResult<T> {
        if !path.is_file() {
            return Err(LibraryError::import(
                format!("No such file: {}", path.display()).as_str()));
        }
        let failed = |reason: String| {
            LibraryError::import(format!("Failed to import {} from {}: {}",
                                         T::KIND, path.display(), reason).as_str())
        };
        let contents = fs::read_to_string(path).map_err(|err| failed(err.to_string()))?;
        let records: Vec<Value> = serde_json::from_str(contents.as_str())
            .map_err(|err| failed(err.to_string()))?;

        let mut table = Table::new();
        for rec in records.iter() {
            let entity = factory(rec).map_err(|err| failed(err.to_string()))?;
            let key = entity.id();
            if table.contains_key(&key) {
                return Err(failed(format!("{} with key {} already exists", T::KIND, key)));
            }
            table.insert(key, entity);
        }
        debug!(kind = %T::KIND, path = %path.display(), records = table.len(), "imported table");
        *T::table_mut(self) = table;
        Ok(())
    }
}

fn attribute(json: &Value, attr: &str) -> Option<String> {
    match json.get(attr)? {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

impl Entity for BookEntity {
    const KIND: EntityKind = EntityKind::Book;

    fn table(store: &LibraryStore) -> &Table<Self> {
        &store.books
    }

    fn table_mut(store: &mut LibraryStore) -> &mut Table<Self> {
        &mut store.books
    }
}

impl Entity for MemberEntity {
    const KIND: EntityKind = EntityKind::Member;

    fn table(store: &LibraryStore) -> &Table<Self> {
        &store.members
    }

    fn table_mut(store: &mut LibraryStore) -> &mut Table<Self> {
        &mut store.members
    }
}

impl Entity for LoanEntity {
    const KIND: EntityKind = EntityKind::Loan;

    fn table(store: &LibraryStore) -> &Table<Self> {
        &store.loans
    }

    fn table_mut(store: &mut LibraryStore) -> &mut Table<Self> {
        &mut store.loans
    }
}

impl Entity for ReservationEntity {
    const KIND: EntityKind = EntityKind::Reservation;

    fn table(store: &LibraryStore) -> &Table<Self> {
        &store.reservations
    }

    fn table_mut(store: &mut LibraryStore) -> &mut Table<Self> {
        &mut store.reservations
    }
}

impl Entity for UserEntity {
    const KIND: EntityKind = EntityKind::User;

    fn table(store: &LibraryStore) -> &Table<Self> {
        &store.users
    }

    fn table_mut(store: &mut LibraryStore) -> &mut Table<Self> {
        &mut store.users
    }
}
