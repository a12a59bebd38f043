//! Domain entities and value objects for the back-office catalog.

pub mod category;
pub mod customer;
pub mod product;
pub mod types;
