//! MQTT recorder web front-end.
//!
//! A single static page, rendered through one of two entries:
//!
//! ```rust,ignore
//! use recorder_web::prelude::*;
//!
//! // Whole document at once (previews, static generation).
//! let page = render_preview(RenderOptions::default()).await?;
//!
//! // Progressive delivery into any `Sink<Vec<u8>>`.
//! let done = render_ssr(RenderToStreamOptions::new(sink)).await?;
//! ```

mod entry;
mod routes;

pub use entry::*;
pub use routes::*;

/// Prelude for convenient imports.
pub mod prelude {
    pub use recorder_core::{Component, Node, RenderError, RenderOptions};
    pub use recorder_streaming::{
        FlushStrategy, RenderToStreamOptions, RenderToStreamResult, RenderToStringResult,
        StreamingOptions,
    };

    pub use crate::{index_page, render_preview, render_ssr, Root};
}
