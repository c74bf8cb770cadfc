//! Owned DOM tree used as the host-page model.

pub mod build;
pub mod dom_utils;
pub mod mutation;
pub mod traverse;

mod types;

pub use crate::mutation::{Document, MutationKind, MutationRecord};
pub use crate::types::{Id, Node, NodeId};
