//! # Client
//!
//! The interaction controller stack: models, validation, services,
//! controllers and views, wired together by [`AppController`].
//!
//! ```text
//! input events ──▶ AppController ──▶ controllers ──▶ Session + Effects
//!                        │                               │
//!                        │        spawned posts/timers ◀─┘
//!                        ▼
//!                   ViewRenderer (derived frame)
//! ```

pub mod controller;
pub mod controllers;
pub mod events;
pub mod io;
pub mod models;
pub mod password;
pub mod services;
pub mod testing;
pub mod validate;
pub mod views;

pub use controller::AppController;
pub use models::Session;
