//! Customer reviews of business users, one per pair.

pub mod dto;
pub mod handlers;
pub mod service;
