//! Offers and their three package tiers.

pub mod dto;
pub mod handlers;
pub mod service;
