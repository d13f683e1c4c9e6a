pub mod autocomplete;
pub mod catalog;
pub mod clipboard;
pub mod config;
pub mod coordinator;
pub mod generator;
pub mod page;
pub mod quiz;
pub mod resources;
pub mod session;

pub use session::{drive, Session, ValidationError};
