//! services/api/src/lib.rs
//!
//! The study planner web service: adapters for the two external collaborators,
//! configuration, and the axum web layer that renders the form.

pub mod adapters;
pub mod config;
pub mod error;
pub mod web;
