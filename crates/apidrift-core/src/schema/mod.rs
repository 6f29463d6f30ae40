//! Schema tree model.
//!
//! Scraped schema documents arrive as untyped JSON. They are converted once,
//! at the boundary, into [`SchemaTree`] so the diff engine works over a closed
//! sum type and type-tag derivation is exhaustive.

pub mod model;
pub mod parse;

pub use model::{SchemaNode, SchemaTree, TypeTag};
