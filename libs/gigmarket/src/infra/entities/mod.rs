//! SeaORM entities for the relational schema.

pub mod offer_details;
pub mod offers;
pub mod orders;
pub mod profiles;
pub mod reviews;
pub mod users;
