//! # Services Module
//!
//! Use cases sitting between the HTTP handlers and the repositories.

pub mod authentication;
