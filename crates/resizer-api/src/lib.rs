//! Resizer API Library
//!
//! HTTP surface for the resize handler: routes, error rendering and
//! application setup.

pub mod constants;
pub mod error;
mod handlers;
pub mod setup;
pub mod state;
mod telemetry;

pub use error::{ErrorResponse, HttpError};
pub use state::AppState;
