use std::{fmt, sync::Arc};

use bookshelf_config::Config;
use bookshelf_core::{
    covers::CoverOrchestrator, database::ports::books::BooksRepository,
};

#[derive(Clone)]
pub struct AppState {
    pub books: Arc<dyn BooksRepository>,
    pub covers: Arc<CoverOrchestrator>,
    pub config: Arc<Config>,
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("books", &self.books)
            .field("covers", &self.covers)
            .finish_non_exhaustive()
    }
}

impl AppState {
    pub fn new(
        books: Arc<dyn BooksRepository>,
        covers: Arc<CoverOrchestrator>,
        config: Arc<Config>,
    ) -> Self {
        Self {
            books,
            covers,
            config,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}
