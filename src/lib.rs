//! Core library of the back-office console.
//!
//! This crate exposes the domain model, category tree, product editor
//! session, forms, DTOs and service layers used by the admin console.

pub mod domain;
pub mod dto;
pub mod editor;
pub mod forms;
pub mod pagination;
pub mod repository;
pub mod services;
pub mod tree;

mod error_conversions;
