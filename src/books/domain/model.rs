use std::fmt;
use std::fmt::{Display, Formatter};
use serde::{Deserialize, Serialize};
use crate::books::domain::Book;
use crate::core::domain::Identifiable;
use crate::core::library::{BookStatus, LibraryError, LibraryResult};

// BookEntity abstracts a catalogued title; the isbn doubles as its key
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct BookEntity {
    pub isbn: String,
    pub title: String,
    pub author: String,
    #[serde(default)]
    pub publication_year: Option<i32>,
    #[serde(default)]
    pub genre: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub cover_url: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub status: BookStatus,
}

/// Metadata patch for [`BookEntity::update_info`]; `None` leaves a field as is.
#[derive(Debug, Default, PartialEq, Clone)]
pub struct BookUpdate {
    pub title: Option<String>,
    pub author: Option<String>,
    pub publication_year: Option<i32>,
    pub genre: Option<String>,
    pub description: Option<String>,
    pub cover_url: Option<String>,
    pub location: Option<String>,
}

impl BookEntity {
    pub fn new(isbn: &str, title: &str, author: &str) -> Self {
        Self {
            isbn: isbn.to_string(),
            title: title.to_string(),
            author: author.to_string(),
            publication_year: None,
            genre: None,
            description: None,
            cover_url: None,
            location: None,
            status: BookStatus::Available,
        }
    }

    pub fn mark_loaned(&mut self) -> LibraryResult<()> {
        if !self.is_available() {
            return Err(LibraryError::book_not_available(
                format!("Book {} is not available for loan", self.isbn).as_str()));
        }
        self.status = BookStatus::Loaned;
        Ok(())
    }

    pub fn mark_reserved(&mut self) -> LibraryResult<()> {
        if !self.is_available() {
            return Err(LibraryError::book_not_available(
                format!("Book {} cannot be reserved", self.isbn).as_str()));
        }
        self.status = BookStatus::Reserved;
        Ok(())
    }

    // back on the shelf, whether it was loaned or reserved
    pub fn mark_returned(&mut self) {
        self.status = BookStatus::Available;
    }

    pub fn update_info(&mut self, update: BookUpdate) {
        if let Some(title) = update.title {
            self.title = title;
        }
        if let Some(author) = update.author {
            self.author = author;
        }
        if let Some(year) = update.publication_year {
            self.publication_year = Some(year);
        }
        if let Some(genre) = update.genre {
            self.genre = Some(genre);
        }
        if let Some(description) = update.description {
            self.description = Some(description);
        }
        if let Some(cover_url) = update.cover_url {
            self.cover_url = Some(cover_url);
        }
        if let Some(location) = update.location {
            self.location = Some(location);
        }
    }
}

impl Identifiable for BookEntity {
    fn id(&self) -> String {
        self.isbn.to_string()
    }
}

impl Book for BookEntity {
    fn status(&self) -> BookStatus {
        self.status
    }
}

impl Display for BookEntity {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{} by {} ({})", self.title, self.author, self.isbn)
    }
}
