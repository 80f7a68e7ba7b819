//! # Inkwell Core
//!
//! The domain layer of the Inkwell blogging backend.
//! This crate contains pure business logic with zero infrastructure dependencies:
//! the user and blog model, the like/dislike state machine, input validation,
//! the ports adapters must implement, and the services wired on top of them.

pub mod domain;
pub mod error;
pub mod ports;
pub mod services;
pub mod validation;

pub use error::DomainError;
