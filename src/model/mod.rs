//! Domain model types (pure).

pub mod error;
pub mod key_action;
pub mod listing;

// Re-export for convenience
pub use error::{AppError, FetchError, LocationError};
pub use key_action::KeyAction;
pub use listing::Listing;
