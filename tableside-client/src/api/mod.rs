//! Endpoint catalogue
//!
//! Typed wrappers over the REST API, split by namespace. Public endpoints
//! (menu, order placement, table sessions) work without an admin token;
//! everything under `/api/admin` and the kitchen order endpoints require one.

mod auth;
mod menu;
mod orders;
mod restaurant;
mod tables;
