use serde_json::Value;
use crate::books::domain::model::BookEntity;
use crate::core::library::LibraryResult;

// Rebuilds a book from an exported record. Legacy status values such as
// `BookStatus.LOANED` are accepted; unknown ones are rejected.
pub fn book_factory(rec: &Value) -> LibraryResult<BookEntity> {
    let book: BookEntity = serde_json::from_value(rec.clone())?;
    Ok(book)
}
