pub mod error;
pub mod model;
pub mod repos;
pub mod sections;
pub mod service;
pub mod workflow;

pub use error::DomainError;
pub use model::Identity;
