//! Platform-wide aggregate numbers.

pub mod dto;
pub mod handlers;
pub mod service;
