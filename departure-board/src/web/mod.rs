//! Web layer for the departure board.
//!
//! JSON endpoints drive the configuration wizard; the board itself is
//! server-rendered.

mod dto;
mod routes;
mod state;
pub mod templates;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::WebState;
