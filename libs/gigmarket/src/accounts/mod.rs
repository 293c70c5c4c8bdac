//! Registration and login.

pub mod dto;
pub mod handlers;
pub mod service;
