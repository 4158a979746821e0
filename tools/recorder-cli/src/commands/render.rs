//! Render the page through either entry.

use std::time::Duration;

use anyhow::{Context as _, Result};
use futures::Sink;
use recorder_core::RenderOptions;
use recorder_streaming::{RenderToStreamOptions, StreamingOptions};
use recorder_web::{render_preview, render_ssr};
use serde::Serialize;
use tokio::io::{AsyncWrite, AsyncWriteExt};

use super::{RenderArgs, RenderMode};
use crate::context::Context;
use crate::output::{format_bytes, Output};

type Writer = Box<dyn AsyncWrite + Unpin + Send>;

/// What a render produced, for reporting.
#[derive(Debug, Clone, Serialize)]
struct RenderSummary {
    mode: &'static str,
    size: usize,
    flushes: usize,
    render_us: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    first_flush_us: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    shell_us: Option<u64>,
}

/// Run the render command.
pub async fn run(args: RenderArgs, ctx: &Context) -> Result<()> {
    let mut streaming = ctx.config.stream;
    if let Some(strategy) = args.strategy {
        streaming.strategy = strategy.into();
    }

    let writer = open_output(args.output.as_deref(), ctx).await?;
    let options = ctx.config.render.clone();

    tracing::info!(mode = ?args.mode, output = ?args.output, "rendering page");

    let summary = match args.mode {
        RenderMode::String => render_string(options, writer).await?,
        RenderMode::Stream => render_stream(options, streaming, writer).await?,
    };

    report(&summary, &status_output(args.output.as_deref(), &ctx.output));
    Ok(())
}

/// Output for the render summary; keeps stdout free when the document goes there.
fn status_output(path: Option<&str>, output: &Output) -> Output {
    match path {
        Some(_) => output.clone(),
        None => output.clone().with_json_on_stderr(),
    }
}

async fn open_output(path: Option<&str>, ctx: &Context) -> Result<Writer> {
    match path {
        Some(path) => {
            let path = ctx.resolve_path(path);
            ctx.output.debug(&format!("Writing to {}", path.display()));
            let file = tokio::fs::File::create(&path)
                .await
                .with_context(|| format!("Failed to create output file: {}", path.display()))?;
            Ok(Box::new(file))
        }
        None => Ok(Box::new(tokio::io::stdout())),
    }
}

async fn render_string(options: RenderOptions, mut writer: Writer) -> Result<RenderSummary> {
    let result = render_preview(options)
        .await
        .context("String render failed")?;

    writer
        .write_all(result.html.as_bytes())
        .await
        .context("Failed to write document")?;
    writer.flush().await.context("Failed to flush document")?;

    Ok(RenderSummary {
        mode: "string",
        size: result.html.len(),
        flushes: 1,
        render_us: micros(result.timing.render),
        first_flush_us: None,
        shell_us: None,
    })
}

async fn render_stream(
    options: RenderOptions,
    streaming: StreamingOptions,
    writer: Writer,
) -> Result<RenderSummary> {
    let done = render_ssr(RenderToStreamOptions {
        render: options,
        streaming,
        stream: writer_sink(writer),
    })
    .await
    .context("Stream render failed")?;

    Ok(RenderSummary {
        mode: "stream",
        size: done.size,
        flushes: done.flushes,
        render_us: micros(done.timing.render),
        first_flush_us: done.timing.first_flush.map(micros),
        shell_us: done.timing.shell.map(micros),
    })
}

/// Adapt an async writer into a chunk sink that flushes after every chunk.
fn writer_sink<W>(writer: W) -> impl Sink<Vec<u8>, Error = std::io::Error> + Unpin + Send
where
    W: AsyncWrite + Unpin + Send + 'static,
{
    Box::pin(futures::sink::unfold(
        writer,
        |mut writer, chunk: Vec<u8>| async move {
            writer.write_all(&chunk).await?;
            writer.flush().await?;
            Ok::<_, std::io::Error>(writer)
        },
    ))
}

fn micros(duration: Duration) -> u64 {
    duration.as_micros() as u64
}

fn report(summary: &RenderSummary, output: &Output) {
    if output.is_json() {
        output.json(summary);
        return;
    }

    output.success(&format!(
        "Rendered {} in {} mode ({} flush{})",
        format_bytes(summary.size as u64),
        summary.mode,
        summary.flushes,
        if summary.flushes == 1 { "" } else { "es" }
    ));
    output.debug(&format!("render time: {}us", summary.render_us));
    if let Some(first) = summary.first_flush_us {
        output.debug(&format!("first flush: {}us", first));
    }
}
