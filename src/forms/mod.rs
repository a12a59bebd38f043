//! Raw input forms and their validated payload counterparts.
//!
//! Each raw form is a deserializable struct checked with `validator`, then
//! converted into a strongly-typed payload via `TryFrom`; services only
//! ever see payloads.

pub mod categories;
pub mod customers;
pub mod products;
