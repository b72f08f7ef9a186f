//! HTTP gateway for the widget stack service.
//!
//! Puts a fixed-window rate limiter in front of the ordered widget store and
//! exposes create, update, read, and delete endpoints over axum.

#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]

pub mod config;
pub mod error;
pub mod extract;
pub mod rate;
pub mod routes;
