//! Data models for the circuits backend.
//!
//! These models define the JSON wire shape shared by the API and the editor client.

mod circuit;

pub use circuit::*;
