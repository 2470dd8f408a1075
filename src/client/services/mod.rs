//! # Services
//!
//! Shared service objects used by the controllers: the request gateway,
//! the single-slot notification surface, and the two session stores.

pub mod gateway;
pub mod notification;
pub mod store;

pub use gateway::{Gateway, GatewayError, GatewayFuture, GatewayResult, RequestGateway};
pub use notification::NotificationService;
pub use store::{
    DraftField, DraftStore, FileIdentityStore, IdentityStore, MemoryDraftStore,
    MemoryIdentityStore,
};
