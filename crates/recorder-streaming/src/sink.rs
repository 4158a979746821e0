//! Shell-first streaming sink.

use std::fmt::Display;

use futures::{Sink, SinkExt};
use recorder_core::{RenderError, TimingContext};

/// State of the streaming sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SinkState {
    /// Initial state, shell not yet sent.
    Initial,
    /// Shell has been sent, sections can be streamed.
    ShellSent,
    /// Response has been completed.
    Completed,
}

/// Streaming sink that enforces the shell-first pattern.
///
/// Generic over any `Sink<Vec<u8>>`: channel senders, `Vec<Vec<u8>>`
/// collectors, or writers adapted with `futures::sink::unfold`.
pub struct StreamingSink<S>
where
    S: Sink<Vec<u8>> + Unpin,
    S::Error: Display,
{
    inner: S,
    state: SinkState,
    timing: TimingContext,
    flushes: usize,
    bytes_sent: usize,
}

impl<S> StreamingSink<S>
where
    S: Sink<Vec<u8>> + Unpin,
    S::Error: Display,
{
    /// Create a new streaming sink.
    pub fn new(sink: S, timing: TimingContext) -> Self {
        Self {
            inner: sink,
            state: SinkState::Initial,
            timing,
            flushes: 0,
            bytes_sent: 0,
        }
    }

    async fn write(&mut self, html: &str) -> Result<(), RenderError> {
        if html.is_empty() {
            return Ok(());
        }

        self.inner
            .send(html.as_bytes().to_vec())
            .await
            .map_err(|e| RenderError::StreamError(e.to_string()))?;
        self.timing.mark("first_flush");
        self.flushes += 1;
        self.bytes_sent += html.len();

        Ok(())
    }

    /// Send the shell HTML. Must be called before any sections.
    pub async fn send_shell(&mut self, html: &str) -> Result<(), RenderError> {
        if self.state != SinkState::Initial {
            return Err(RenderError::StreamError(
                "Shell already sent or sink completed".to_string(),
            ));
        }

        self.write(html).await?;
        self.timing.mark("shell_sent");
        self.state = SinkState::ShellSent;

        Ok(())
    }

    /// Send a chunk of a named section. Shell must be sent first.
    pub async fn send_section(&mut self, name: &str, html: &str) -> Result<(), RenderError> {
        match self.state {
            SinkState::Initial => return Err(RenderError::ShellNotSent),
            SinkState::Completed => {
                return Err(RenderError::StreamError(
                    "Sink already completed".to_string(),
                ))
            }
            SinkState::ShellSent => {}
        }

        self.write(html).await?;
        tracing::trace!(section = name, bytes = html.len(), "section chunk sent");

        Ok(())
    }

    /// Send the closing HTML and complete the response.
    pub async fn send_closing(&mut self, html: &str) -> Result<(), RenderError> {
        match self.state {
            SinkState::Initial => return Err(RenderError::ShellNotSent),
            SinkState::Completed => {
                return Err(RenderError::StreamError(
                    "Sink already completed".to_string(),
                ))
            }
            SinkState::ShellSent => {}
        }

        self.write(html).await?;
        self.inner
            .flush()
            .await
            .map_err(|e| RenderError::StreamError(e.to_string()))?;
        self.state = SinkState::Completed;
        self.timing.mark("complete");

        Ok(())
    }

    /// Number of chunks written to the inner sink.
    pub fn flushes(&self) -> usize {
        self.flushes
    }

    /// Total bytes written to the inner sink.
    pub fn bytes_sent(&self) -> usize {
        self.bytes_sent
    }

    /// Get timing context reference.
    pub fn timing(&self) -> &TimingContext {
        &self.timing
    }

    /// Consume the sink and return the inner value.
    pub fn into_inner(self) -> S {
        self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collector() -> StreamingSink<Vec<Vec<u8>>> {
        StreamingSink::new(Vec::new(), TimingContext::new())
    }

    #[tokio::test]
    async fn test_shell_first_order() {
        let mut sink = collector();

        sink.send_shell("<body>").await.unwrap();
        sink.send_section("root", "<p>").await.unwrap();
        sink.send_section("root", "</p>").await.unwrap();
        sink.send_closing("</body>").await.unwrap();

        assert_eq!(sink.flushes(), 4);
        assert_eq!(sink.bytes_sent(), 20);
        assert!(sink.timing().time_to_shell().is_some());

        let chunks = sink.into_inner();
        assert_eq!(chunks.concat(), b"<body><p></p></body>".to_vec());
    }

    #[tokio::test]
    async fn test_section_before_shell_rejected() {
        let mut sink = collector();

        let result = sink.send_section("root", "<p>").await;
        assert_eq!(result, Err(RenderError::ShellNotSent));
        assert!(sink.into_inner().is_empty());
    }

    #[tokio::test]
    async fn test_closing_before_shell_rejected() {
        let mut sink = collector();

        assert_eq!(sink.send_closing("</html>").await, Err(RenderError::ShellNotSent));
    }

    #[tokio::test]
    async fn test_shell_sent_twice_rejected() {
        let mut sink = collector();
        sink.send_shell("a").await.unwrap();

        assert!(matches!(
            sink.send_shell("b").await,
            Err(RenderError::StreamError(_))
        ));
    }

    #[tokio::test]
    async fn test_writes_after_completion_rejected() {
        let mut sink = collector();
        sink.send_shell("a").await.unwrap();
        sink.send_closing("b").await.unwrap();

        assert!(matches!(
            sink.send_section("root", "c").await,
            Err(RenderError::StreamError(_))
        ));
        assert!(matches!(
            sink.send_closing("d").await,
            Err(RenderError::StreamError(_))
        ));
    }

    #[tokio::test]
    async fn test_empty_chunks_are_skipped() {
        let mut sink = collector();
        sink.send_shell("a").await.unwrap();
        sink.send_section("root", "").await.unwrap();
        sink.send_closing("").await.unwrap();

        assert_eq!(sink.flushes(), 1);
        assert_eq!(sink.into_inner().len(), 1);
    }

    #[tokio::test]
    async fn test_inner_sink_error_surfaces() {
        let (tx, rx) = futures::channel::mpsc::unbounded::<Vec<u8>>();
        drop(rx);
        let mut sink = StreamingSink::new(tx, TimingContext::new());

        assert!(matches!(
            sink.send_shell("a").await,
            Err(RenderError::StreamError(_))
        ));
    }
}
