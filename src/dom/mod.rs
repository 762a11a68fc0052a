//! Page model the site behaviors act on
//!
//! The document stands in for the browser's rendering surface: element
//! lookup, classes, inline styles, form values, scrolling, timers and
//! typed event dispatch.

mod document;
mod element;
mod event;
mod observer;
mod selector;
mod timers;

pub use document::{Document, ScrollBehavior, Viewport, CELL_HEIGHT_PX};
pub use element::{Element, ElementId, LayoutBox, SelectOption};
pub use event::{
    Effect, EventBus, EventContext, EventKind, EventListener, EventResponse, PageEvent,
};
pub use observer::VisibilityObserver;
pub use timers::{TimerAction, TimerId};
