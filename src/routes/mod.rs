// # Routes Module
//
// HTTP route handlers, grouped by functionality.
//
// - `health`: liveness endpoint
// - `auth`: login, logout and session endpoints
// - `pages`: guarded dashboard pages

/// Health check and monitoring endpoints
pub mod health;

/// Login, logout and current-session endpoints
pub mod auth;

/// Dashboard bundle behind the route guard
pub mod pages;
