//! gigmarket: a freelance gig-marketplace backend.
//!
//! Business users publish offers with three package tiers; customers buy a
//! tier, which freezes its fields into an order, and review the business
//! afterwards. The HTTP surface is JSON over axum, storage is SeaORM.

pub mod accounts;
pub mod auth;
pub mod config;
pub mod error;
pub mod extract;
pub mod infra;
pub mod logging;
pub mod offers;
pub mod orders;
pub mod pagination;
pub mod problem;
pub mod profiles;
pub mod reviews;
pub mod router;
pub mod state;
pub mod stats;
