//! Render entries.
//!
//! Both entries forward their options to the renderer unchanged and pass
//! renderer failures straight through.

use std::fmt::Display;

use futures::Sink;
use recorder_core::{RenderError, RenderOptions};
use recorder_streaming::{
    render_to_stream, render_to_string, RenderToStreamOptions, RenderToStreamResult,
    RenderToStringResult,
};

use crate::routes::Root;

/// Render the whole document in one step.
pub async fn render_preview(options: RenderOptions) -> Result<RenderToStringResult, RenderError> {
    render_to_string(&Root, options).await
}

/// Stream the document into the sink carried by `options`.
pub async fn render_ssr<S>(
    options: RenderToStreamOptions<S>,
) -> Result<RenderToStreamResult, RenderError>
where
    S: Sink<Vec<u8>> + Unpin + Send,
    S::Error: Display,
{
    tracing::trace!(strategy = ?options.streaming.strategy, "stream render requested");
    render_to_stream(&Root, options).await
}
