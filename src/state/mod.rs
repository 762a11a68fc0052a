//! Front-end state: keyboard focus and screen geometry

mod focus;
mod screen_area;

pub use focus::*;
pub use screen_area::*;
