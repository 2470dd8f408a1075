//! # Models
//!
//! Plain data and aggregate state for the client surfaces.

pub mod auth;
pub mod notification;
pub mod search;
pub mod session;

pub use auth::{FieldValidationState, LoginField, LoginForm, SignupField, SignupForm};
pub use notification::{NotificationMessage, Severity};
pub use search::{SearchOutcome, SearchResponse, SearchResult, SearchState};
pub use session::{Modal, Page, Session};
