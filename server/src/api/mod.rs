//! API routing modules
//!
//! # Structure
//!
//! - [`health`] - health check
//! - [`auth`] - register / login / me
//! - [`menu`] - public catalog + admin CRUD and ingestion
//! - [`cart`] - per-user cart operations
//! - [`orders`] - checkout, order query/cancel, admin status workflow

pub mod auth;
pub mod cart;
pub mod health;
pub mod menu;
pub mod orders;
