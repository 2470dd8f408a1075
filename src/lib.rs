//! # Seekline - Terminal Client for a Document Search Service
//!
//! An interactive client that searches a remote document corpus and
//! manages account signup, login and password reset against the same
//! service.
//!
//! The interesting part is the interaction controller: raw input is
//! validated locally, request lifecycles are tracked per flow, derived
//! UI state (loading, results, errors, notifications) is re-rendered
//! from a single session model, and partial form state plus an opt-in
//! remembered identity survive across runs.

pub mod client;
pub mod cmd_args;
pub mod config;

pub use client::AppController;
