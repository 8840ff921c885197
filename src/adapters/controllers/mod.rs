//! Controllers - translate page events into widget calls

pub mod event_table;
pub mod page_controller;

pub use event_table::{Binding, BindingTarget, EventKind, EventTable, Handler, Routed};
pub use page_controller::{DispatchOutcome, PageEvent, Storefront};
