//! Sheet state and logic.

mod deps;
mod layout;
mod ops;
mod print;
mod state;

pub use state::{CellView, Sheet};
