pub mod authors;
pub mod books;
pub mod collections;
pub mod covers;
pub mod health;

use bookshelf_model::BookID;

use crate::AppError;

pub(crate) fn parse_book_id(raw: &str) -> Result<BookID, AppError> {
    raw.parse()
        .map_err(|_| AppError::bad_request(format!("Invalid book id: {raw}")))
}
