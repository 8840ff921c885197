//! Domain Value Objects - Immutable values that describe characteristics
//!
//! Value objects have no identity and are compared by their values.

pub mod css;
pub mod gesture;
pub mod selector;
pub mod template;
pub mod viewport;

pub use gesture::{classify_swipe, Key, Point, SwipeTracker};
pub use selector::{ElementView, Selector};
pub use template::ElementTemplate;
pub use viewport::{Breakpoints, Viewport, ViewportClass};
