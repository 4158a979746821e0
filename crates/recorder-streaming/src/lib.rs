//! String and shell-first streaming renderers.
//!
//! This crate turns a root `Component` into HTML in one of two modes:
//! - `render_to_string` - One buffered document
//! - `render_to_stream` - Ordered chunks written to a `futures::Sink`
//!
//! Building blocks:
//! - `Shell` - Document parts surrounding the root component
//! - `StreamingSink` - Shell-first sink wrapper
//! - `FlushController` - Explicit flush control

mod flush;
mod renderer;
mod shell;
mod sink;

pub use flush::*;
pub use renderer::*;
pub use shell::*;
pub use sink::*;
