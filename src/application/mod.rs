//! Application layer
//!
//! Use cases orchestrate domain services and translate between transport
//! shaped commands/responses and domain types.

pub mod auth;
pub mod business;
pub mod dashboard;
pub mod invoice;
