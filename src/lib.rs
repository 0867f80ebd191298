//! Programming language registry.
//!
//! A small CRUD service over a single resource, split into three stages:
//!
//! - [`api`]: axum handlers that parse requests and map errors to status codes.
//! - [`service`]: business rules (name validation, uniqueness, existence, limit policy).
//! - [`repository`] / [`db`]: the persistence gateway and its SQLite implementation.
//!
//! [`models`] and [`error`] are shared by every stage.

pub mod api;
pub mod config;
pub mod context;
pub mod db;
pub mod error;
pub mod models;
pub mod repository;
pub mod service;
