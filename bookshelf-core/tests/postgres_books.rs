#![cfg(feature = "pg-tests")]

use bookshelf_core::{
    BooksError,
    database::{PostgresDatabase, ports::books::BooksRepository, seed},
};
use bookshelf_model::{AuthorID, BookForCreation, BookID};
use sqlx::PgPool;

fn request(author_id: AuthorID, title: &str) -> BookForCreation {
    BookForCreation {
        author_id,
        title: title.to_string(),
        description: Some("test".into()),
    }
}

#[sqlx::test(migrator = "bookshelf_core::MIGRATOR")]
async fn seeded_books_match_the_in_memory_seed(pool: PgPool) {
    let repo = PostgresDatabase::from_pool(pool).books();

    let books = repo.list_books().await.unwrap();
    let mut expected = seed::books();
    expected.sort_by(|a, b| a.title.cmp(&b.title));

    assert_eq!(books, expected);
    assert_eq!(repo.list_authors().await.unwrap().len(), 4);
}

#[sqlx::test(migrator = "bookshelf_core::MIGRATOR")]
async fn get_books_returns_requested_order(pool: PgPool) {
    let repo = PostgresDatabase::from_pool(pool).books();

    let books = repo
        .get_books(&[seed::HITCHHIKERS_GUIDE, BookID::new(), seed::MYTHOS])
        .await
        .unwrap();

    let ids: Vec<BookID> = books.iter().map(|b| b.id).collect();
    assert_eq!(ids, vec![seed::HITCHHIKERS_GUIDE, seed::MYTHOS]);
    assert_eq!(books[0].author.full_name(), "Douglas Adams");
}

#[sqlx::test(migrator = "bookshelf_core::MIGRATOR")]
async fn add_book_round_trips_through_get_book(pool: PgPool) {
    let repo = PostgresDatabase::from_pool(pool).books();

    let added = repo
        .add_book(request(seed::STEPHEN_FRY, "Troy"))
        .await
        .unwrap();
    let loaded = repo.get_book(added.id).await.unwrap();

    assert_eq!(loaded, Some(added));
}

#[sqlx::test(migrator = "bookshelf_core::MIGRATOR")]
async fn unknown_author_is_not_found(pool: PgPool) {
    let repo = PostgresDatabase::from_pool(pool).books();

    let err = repo
        .add_book(request(AuthorID::new(), "Ghost"))
        .await
        .unwrap_err();

    assert!(matches!(err, BooksError::NotFound(_)));
}

#[sqlx::test(migrator = "bookshelf_core::MIGRATOR")]
async fn failed_batch_leaves_no_rows_behind(pool: PgPool) {
    let repo = PostgresDatabase::from_pool(pool).books();

    let err = repo
        .add_books(vec![
            request(seed::JAMES_ELROY, "The Black Dahlia"),
            request(AuthorID::new(), "Ghost"),
        ])
        .await
        .unwrap_err();
    assert!(matches!(err, BooksError::NotFound(_)));
    assert_eq!(repo.list_books().await.unwrap().len(), 5);

    let added = repo
        .add_books(vec![
            request(seed::JAMES_ELROY, "The Black Dahlia"),
            request(seed::DOUGLAS_ADAMS, "Mostly Harmless"),
        ])
        .await
        .unwrap();
    assert_eq!(added.len(), 2);
    assert_eq!(repo.list_books().await.unwrap().len(), 7);
}
