//! The render capability and its two implementations.

use std::fmt::Display;

use async_trait::async_trait;
use futures::Sink;
use recorder_core::{Component, RenderError, RenderOptions, RenderTiming, TimingContext};

use crate::flush::{FlushController, StreamingOptions};
use crate::shell::Shell;
use crate::sink::StreamingSink;

/// Section name used for the root component's output.
pub const ROOT_SECTION: &str = "root";

/// Produce a document from a root component, given options.
#[async_trait]
pub trait Renderer: Send {
    /// What a finished render hands back to the caller.
    type Output: Send;

    /// Render `root` with `options`. Options are validated before any
    /// output is produced.
    async fn render(
        &mut self,
        root: &dyn Component,
        options: &RenderOptions,
    ) -> Result<Self::Output, RenderError>;
}

/// Result of a string render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderToStringResult {
    /// The complete serialized document.
    pub html: String,
    /// Render timing.
    pub timing: RenderTiming,
}

/// Completion signal of a stream render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderToStreamResult {
    /// Number of chunks written to the sink.
    pub flushes: usize,
    /// Total bytes written to the sink.
    pub size: usize,
    /// Render timing.
    pub timing: RenderTiming,
}

/// Options for a stream render: render options plus the destination.
pub struct RenderToStreamOptions<S> {
    /// Options forwarded to the renderer.
    pub render: RenderOptions,
    /// Flush configuration.
    pub streaming: StreamingOptions,
    /// Destination for emitted chunks.
    pub stream: S,
}

impl<S> RenderToStreamOptions<S> {
    /// Create stream options with default render and streaming settings.
    pub fn new(stream: S) -> Self {
        Self {
            render: RenderOptions::default(),
            streaming: StreamingOptions::default(),
            stream,
        }
    }

    /// Replace the render options.
    pub fn with_render(mut self, render: RenderOptions) -> Self {
        self.render = render;
        self
    }

    /// Replace the streaming options.
    pub fn with_streaming(mut self, streaming: StreamingOptions) -> Self {
        self.streaming = streaming;
        self
    }
}

/// Buffers the whole document and returns it as one string.
#[derive(Debug, Clone, Copy, Default)]
pub struct StringRenderer;

#[async_trait]
impl Renderer for StringRenderer {
    type Output = RenderToStringResult;

    async fn render(
        &mut self,
        root: &dyn Component,
        options: &RenderOptions,
    ) -> Result<Self::Output, RenderError> {
        let timing = TimingContext::new();
        options.validate()?;

        let shell = Shell::from_options(options);
        let html = shell.wrap(&root.render().to_html());
        let timing = timing.finish();

        tracing::debug!(
            size = html.len(),
            render_us = timing.render.as_micros() as u64,
            "rendered document to string"
        );

        Ok(RenderToStringResult { html, timing })
    }
}

/// Writes the document to a sink as ordered chunks.
///
/// Single-shot: the shell can only be sent once, so a second `render`
/// call on the same renderer fails.
pub struct StreamRenderer<S>
where
    S: Sink<Vec<u8>> + Unpin,
    S::Error: Display,
{
    sink: StreamingSink<S>,
    streaming: StreamingOptions,
}

impl<S> StreamRenderer<S>
where
    S: Sink<Vec<u8>> + Unpin,
    S::Error: Display,
{
    /// Create a stream renderer writing to `sink`.
    pub fn new(sink: S, streaming: StreamingOptions) -> Self {
        Self {
            sink: StreamingSink::new(sink, TimingContext::new()),
            streaming,
        }
    }

    /// Consume the renderer and return the destination sink.
    pub fn into_inner(self) -> S {
        self.sink.into_inner()
    }
}

#[async_trait]
impl<S> Renderer for StreamRenderer<S>
where
    S: Sink<Vec<u8>> + Unpin + Send,
    S::Error: Display,
{
    type Output = RenderToStreamResult;

    async fn render(
        &mut self,
        root: &dyn Component,
        options: &RenderOptions,
    ) -> Result<Self::Output, RenderError> {
        options.validate()?;

        let shell = Shell::from_options(options);
        self.sink.send_shell(shell.render_opening()).await?;

        let mut controller = FlushController::new(self.streaming);
        let mut buffer = String::new();
        for token in root.render().tokens() {
            controller.add_bytes(token.len());
            buffer.push_str(&token);
            if controller.should_flush() {
                self.sink.send_section(ROOT_SECTION, &buffer).await?;
                buffer.clear();
                controller.reset();
            }
        }

        buffer.push_str(shell.render_closing());
        self.sink.send_closing(&buffer).await?;

        let result = RenderToStreamResult {
            flushes: self.sink.flushes(),
            size: self.sink.bytes_sent(),
            timing: self.sink.timing().finish(),
        };

        tracing::debug!(
            strategy = ?controller.strategy(),
            flushes = result.flushes,
            size = result.size,
            render_us = result.timing.render.as_micros() as u64,
            "streamed document"
        );

        Ok(result)
    }
}

/// Render `root` to a complete HTML string.
pub async fn render_to_string(
    root: &dyn Component,
    options: RenderOptions,
) -> Result<RenderToStringResult, RenderError> {
    StringRenderer.render(root, &options).await
}

/// Render `root` as ordered chunks into the sink carried by `options`.
pub async fn render_to_stream<S>(
    root: &dyn Component,
    options: RenderToStreamOptions<S>,
) -> Result<RenderToStreamResult, RenderError>
where
    S: Sink<Vec<u8>> + Unpin + Send,
    S::Error: Display,
{
    let RenderToStreamOptions {
        render,
        streaming,
        stream,
    } = options;

    StreamRenderer::new(stream, streaming)
        .render(root, &render)
        .await
}

#[cfg(test)]
mod tests {
    use recorder_core::Node;

    use super::*;
    use crate::flush::FlushStrategy;

    struct Page;

    impl Component for Page {
        fn render(&self) -> Node {
            Node::element("main")
                .with_child(Node::element("h1").with_child(Node::text("Title")))
                .with_child(Node::element("p").with_child(Node::text("Body")))
        }
    }

    async fn stream_chunks(
        options: RenderOptions,
        streaming: StreamingOptions,
    ) -> (RenderToStreamResult, Vec<Vec<u8>>) {
        let mut chunks: Vec<Vec<u8>> = Vec::new();
        let result = render_to_stream(
            &Page,
            RenderToStreamOptions::new(&mut chunks)
                .with_render(options)
                .with_streaming(streaming),
        )
        .await
        .unwrap();
        (result, chunks)
    }

    #[tokio::test]
    async fn test_string_render_wraps_root_in_shell() {
        let result = render_to_string(&Page, RenderOptions::default()).await.unwrap();

        assert!(result.html.starts_with("<!DOCTYPE html>\n"));
        assert!(result
            .html
            .contains("<body>\n<main><h1>Title</h1><p>Body</p></main>\n</body>"));
        assert!(result.timing.first_flush.is_none());
        assert!(result.timing.shell.is_none());
    }

    #[tokio::test]
    async fn test_stream_matches_string_for_every_strategy() {
        let expected = render_to_string(&Page, RenderOptions::default())
            .await
            .unwrap()
            .html;

        for strategy in [FlushStrategy::Auto, FlushStrategy::Direct, FlushStrategy::Disabled] {
            let (result, chunks) =
                stream_chunks(RenderOptions::default(), StreamingOptions::new(strategy)).await;

            let streamed = String::from_utf8(chunks.concat()).unwrap();
            assert_eq!(streamed, expected, "strategy {:?}", strategy);
            assert_eq!(result.size, expected.len());
            assert_eq!(result.flushes, chunks.len());
            assert!(result.timing.first_flush.is_some());
            assert!(result.timing.shell.is_some());
        }
    }

    #[tokio::test]
    async fn test_disabled_flushes_shell_then_remainder() {
        let (result, chunks) = stream_chunks(
            RenderOptions::default(),
            StreamingOptions::new(FlushStrategy::Disabled),
        )
        .await;

        assert_eq!(result.flushes, 2);
        assert!(String::from_utf8_lossy(&chunks[0]).ends_with("<body>\n"));
        assert!(String::from_utf8_lossy(&chunks[1]).starts_with("<main>"));
    }

    #[tokio::test]
    async fn test_direct_flushes_each_token() {
        let (result, chunks) = stream_chunks(
            RenderOptions::default(),
            StreamingOptions::new(FlushStrategy::Direct),
        )
        .await;

        // shell + 8 tokens + closing
        assert_eq!(result.flushes, 10);
        assert_eq!(chunks[1], b"<main>".to_vec());
        assert_eq!(chunks[9], b"\n</body>\n</html>\n".to_vec());
    }

    #[tokio::test]
    async fn test_auto_flushes_at_chunk_threshold() {
        let streaming = StreamingOptions::new(FlushStrategy::Auto).with_chunk_sizes(10, 10);
        let (result, chunks) = stream_chunks(RenderOptions::default(), streaming).await;

        assert!(result.flushes > 2);
        assert!(result.flushes < 10);
        for chunk in &chunks[1..chunks.len() - 1] {
            assert!(chunk.len() >= 10);
        }
    }

    #[tokio::test]
    async fn test_invalid_options_fail_before_output() {
        let options = RenderOptions::new().with_base("build");

        let string_result = render_to_string(&Page, options.clone()).await;
        assert!(matches!(string_result, Err(RenderError::InvalidOptions(_))));

        let mut chunks: Vec<Vec<u8>> = Vec::new();
        let stream_result = render_to_stream(
            &Page,
            RenderToStreamOptions::new(&mut chunks).with_render(options),
        )
        .await;
        assert!(matches!(stream_result, Err(RenderError::InvalidOptions(_))));
        assert!(chunks.is_empty());
    }

    #[tokio::test]
    async fn test_closed_destination_fails() {
        let (tx, rx) = futures::channel::mpsc::unbounded::<Vec<u8>>();
        drop(rx);

        let result = render_to_stream(&Page, RenderToStreamOptions::new(tx)).await;
        assert!(matches!(result, Err(RenderError::StreamError(_))));
    }

    #[tokio::test]
    async fn test_stream_renderer_is_single_shot() {
        let mut renderer = StreamRenderer::new(Vec::<Vec<u8>>::new(), StreamingOptions::default());
        renderer.render(&Page, &RenderOptions::default()).await.unwrap();

        let second = renderer.render(&Page, &RenderOptions::default()).await;
        assert!(matches!(second, Err(RenderError::StreamError(_))));
        assert_eq!(renderer.into_inner().len(), 2);
    }
}
