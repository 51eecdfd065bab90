//! Document state and logic (UI-agnostic).

mod io;
mod state;

pub use state::{Document, DocumentOptions};
