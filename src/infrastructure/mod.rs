pub mod database;
pub mod identity;
pub mod notification;
pub mod repositories;
