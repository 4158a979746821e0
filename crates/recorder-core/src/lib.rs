//! Core rendering abstractions for the MQTT recorder web front-end.
//!
//! This crate provides the fundamental types and traits:
//! - `Node` / `Component` - Document tree and the components producing it
//! - `RenderOptions` - Renderer configuration forwarded by the entries
//! - `RenderError` - The single renderer failure class
//! - `TimingContext` / `RenderTiming` - Render timing marks

mod error;
mod lifecycle;
mod node;
mod options;

pub use error::*;
pub use lifecycle::*;
pub use node::*;
pub use options::*;
