pub mod service;

use crate::books::domain::model::{BookEntity, BookUpdate};
use crate::core::library::{LibraryResult, Role};

pub trait CatalogService {
    fn add_book(&mut self, book: BookEntity, acting_role: Option<Role>) -> LibraryResult<BookEntity>;
    fn remove_book(&mut self, isbn: &str, acting_role: Option<Role>) -> LibraryResult<()>;
    fn update_book_info(&mut self, isbn: &str, update: BookUpdate) -> LibraryResult<BookEntity>;
    fn find_book(&self, isbn: &str) -> LibraryResult<BookEntity>;
    fn list_books(&self) -> Vec<BookEntity>;
    fn list_available(&self) -> Vec<BookEntity>;
    fn list_by_author(&self, author: &str) -> Vec<BookEntity>;
    fn list_by_genre(&self, genre: &str) -> Vec<BookEntity>;
    fn search_title_contains(&self, fragment: &str) -> Vec<BookEntity>;
    fn count_books(&self) -> usize;
}
