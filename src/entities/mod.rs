//! Entity models: static field tables, validation and filter declarations

pub mod treasure;
pub mod user;

pub use treasure::{Treasure, TREASURE_FILTERS};
pub use user::{User, USER_FILTERS};
