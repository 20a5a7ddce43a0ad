pub mod errors;
pub mod record;
pub mod repository;
pub mod state;
