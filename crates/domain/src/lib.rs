pub mod errors;
pub mod models;
pub mod repositories;
pub mod services;

pub use errors::{DomainError, DomainResult};
