pub mod app_state;
pub mod covers;
pub mod errors;
