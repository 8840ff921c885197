//! Domain Entities - Core business objects
//!
//! The rotation state machines and the product tables they render.

pub mod marquee;
pub mod product;
pub mod rotator;

pub use marquee::Marquee;
pub use product::{Catalog, ProductEntry, RankedEntry, RankingTable};
pub use rotator::{Direction, Rotator};
