//! Reusable UI components

mod button;
mod field;

pub use button::{button, ButtonKind};
pub use field::{checkbox, select_field, text_field};
