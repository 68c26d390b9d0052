//! # Authentication Module
//!
//! Token issuance and verification, password hashing, the API auth middleware
//! and the presence-only route guard for dashboard navigation.

pub mod guard;
pub mod jwt;
pub mod middleware;
pub mod models;
pub mod password;
