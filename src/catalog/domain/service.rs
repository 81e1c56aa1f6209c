use std::collections::HashMap;
use tracing::info;
use crate::books::domain::Book;
use crate::books::domain::model::{BookEntity, BookUpdate};
use crate::catalog::domain::CatalogService;
use crate::core::domain::Configuration;
use crate::core::library::{Action, LibraryError, LibraryResult, Role};
use crate::core::repository::LibraryStore;

pub struct CatalogServiceImpl<'a> {
    store: &'a mut LibraryStore,
}

impl<'a> CatalogServiceImpl<'a> {
    pub fn new(_config: &Configuration, store: &'a mut LibraryStore) -> Self {
        Self {
            store,
        }
    }
}

// Catalog changes are checked against the role only when the caller states one.
fn check_role(acting_role: Option<Role>, action: Action) -> LibraryResult<()> {
    match acting_role {
        Some(role) if !role.permits(action) => Err(LibraryError::access_denied(
            format!("Role {} is not allowed to {}", role, action).as_str())),
        _ => Ok(()),
    }
}

impl<'a> CatalogService for CatalogServiceImpl<'a> {
    fn add_book(&mut self, book: BookEntity, acting_role: Option<Role>) -> LibraryResult<BookEntity> {
        check_role(acting_role, Action::AddBook)?;
        if self.store.get::<BookEntity>(book.isbn.as_str()).is_some() {
            return Err(LibraryError::duplicate_key(
                format!("Book with ISBN {} already exists", book.isbn).as_str()));
        }
        self.store.add(book.clone())?;
        info!(isbn = %book.isbn, title = %book.title, "added book");
        Ok(book)
    }

    fn remove_book(&mut self, isbn: &str, acting_role: Option<Role>) -> LibraryResult<()> {
        check_role(acting_role, Action::RemoveBook)?;
        let book = self.find_book(isbn)?;
        if !book.is_available() {
            return Err(LibraryError::book_not_available(
                format!("Cannot remove book {} while status is {}", isbn, book.status).as_str()));
        }
        self.store.delete::<BookEntity>(isbn)?;
        info!(isbn, "removed book");
        Ok(())
    }

    fn update_book_info(&mut self, isbn: &str, update: BookUpdate) -> LibraryResult<BookEntity> {
        let mut book = self.find_book(isbn)?;
        book.update_info(update);
        self.store.update(book.clone())?;
        info!(isbn, "updated book");
        Ok(book)
    }

    fn find_book(&self, isbn: &str) -> LibraryResult<BookEntity> {
        self.store.get::<BookEntity>(isbn).ok_or_else(|| {
            LibraryError::not_found(format!("Book {} not found", isbn).as_str())
        })
    }

    fn list_books(&self) -> Vec<BookEntity> {
        self.store.all()
    }

    fn list_available(&self) -> Vec<BookEntity> {
        self.store.all::<BookEntity>().into_iter()
            .filter(|b| b.is_available())
            .collect()
    }

    fn list_by_author(&self, author: &str) -> Vec<BookEntity> {
        self.store.list(&HashMap::from([("author".to_string(), author.to_string())]))
    }

    fn list_by_genre(&self, genre: &str) -> Vec<BookEntity> {
        self.store.list(&HashMap::from([("genre".to_string(), genre.to_string())]))
    }

    fn search_title_contains(&self, fragment: &str) -> Vec<BookEntity> {
        self.store.find_by_pattern("title", fragment)
    }

    fn count_books(&self) -> usize {
        self.store.count::<BookEntity>()
    }
}
