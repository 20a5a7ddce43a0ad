pub mod identity;
pub mod like;
pub mod notification;
pub mod shared;
