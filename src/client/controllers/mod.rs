//! # Controllers
//!
//! Flow orchestration: each controller maps input and settled requests
//! to session mutations plus a list of effects for the event loop.

pub mod auth;
pub mod search;
