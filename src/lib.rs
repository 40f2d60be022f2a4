//! Headless admin console for the Quillboard blogging platform API.
//!
//! The `application` layer holds the resource-agnostic list management core
//! (query state, debounced search, confirmation gate, list controller); the
//! `infra` layer adapts the platform's HTTP/JSON wire shapes onto it.

pub mod application;
pub mod config;
pub mod domain;
pub mod infra;
pub mod presentation;
