//! Document state and logic (UI-agnostic).

mod io;
mod ops;
mod state;

pub use crate::storage::LoadSource;
pub use state::Document;
