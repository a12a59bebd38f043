//! View models handed to the presentation layer, serialized in the
//! backend's camelCase dialect.

pub mod categories;
pub mod customers;
pub mod products;
