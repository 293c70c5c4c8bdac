//! Orders, taken as immutable snapshots of a package at purchase time.

pub mod dto;
pub mod handlers;
pub mod service;
