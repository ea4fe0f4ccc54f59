pub const HEALTH: &str = "/health";

pub const BOOKS: &str = "/api/books";
pub const BOOK: &str = "/api/books/{id}";
pub const BOOK_COVERS: &str = "/api/books/{id}/covers";
pub const BOOK_COVER: &str = "/api/books/{id}/covers/{cover_id}";

pub const BOOK_COLLECTIONS: &str = "/api/bookcollections";
pub const BOOK_COLLECTION: &str = "/api/bookcollections/{ids}";

pub const AUTHORS: &str = "/api/authors";

/// Replace a `{name}` placeholder in a route template.
pub fn replace_param(template: &str, name: &str, value: &str) -> String {
    template.replace(&format!("{{{name}}}"), value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replaces_named_placeholder() {
        assert_eq!(replace_param(BOOK, "id", "42"), "/api/books/42");
        assert_eq!(
            replace_param(BOOK_COLLECTION, "ids", "(1,2)"),
            "/api/bookcollections/(1,2)"
        );
    }
}
