//! Semantic passes over the declaration tree.

mod bind;

pub use bind::{BindError, Binder, UseBinder};
