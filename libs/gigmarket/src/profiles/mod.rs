//! User profiles: owner-editable contact/business metadata plus the
//! role that gates every other mutation.

pub mod dto;
pub mod handlers;
pub mod service;
