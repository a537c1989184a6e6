use futures::{Stream, StreamExt};
use std::pin::Pin;

use super::buffering::LineBuffer;
use crate::error::{LlmError, Result};
use crate::openai::ResponseStreamEvent;

/// Boxed stream of decoded Responses API events
pub type EventStream = Pin<Box<dyn Stream<Item = Result<ResponseStreamEvent>> + Send>>;

enum LineOutcome {
    Skip,
    Done,
    Event(Result<ResponseStreamEvent>),
}

/// Decode an SSE byte stream into Responses API events.
///
/// Only `data:` fields are read; each carries one JSON event with its own
/// `type`, so `event:` lines are redundant. The stream ends after the first
/// error, after `data: [DONE]`, or when the bytes run out.
pub fn parse_sse_stream<S, B, E>(bytes: S) -> EventStream
where
    S: Stream<Item = std::result::Result<B, E>> + Send + 'static,
    B: AsRef<[u8]> + Send + 'static,
    E: Into<LlmError> + Send + 'static,
{
    Box::pin(async_stream::stream! {
        let mut byte_chunks = Box::pin(bytes);
        let mut buffer = LineBuffer::with_capacity(4096);
        let mut finished = false;

        while !finished {
            let Some(chunk_result) = byte_chunks.next().await else {
                break;
            };

            match chunk_result {
                Ok(chunk) => {
                    buffer.extend(chunk.as_ref());

                    while let Some(line_result) = buffer.next_line() {
                        match classify_line(line_result) {
                            LineOutcome::Skip => continue,
                            LineOutcome::Done => {
                                finished = true;
                                break;
                            }
                            LineOutcome::Event(event) => {
                                finished = event.is_err();
                                yield event;
                                if finished {
                                    break;
                                }
                            }
                        }
                    }
                }
                Err(e) => {
                    finished = true;
                    yield Err(e.into());
                }
            }
        }

        // Trailing event without a final newline
        if !finished {
            if let Some(line_result) = buffer.take_remainder() {
                if let LineOutcome::Event(event) = classify_line(line_result) {
                    yield event;
                }
            }
        }
    })
}

fn classify_line(line_result: Result<String>) -> LineOutcome {
    let line = match line_result {
        Ok(line) => line,
        Err(e) => return LineOutcome::Event(Err(e)),
    };

    if line.is_empty() || line.starts_with(':') {
        return LineOutcome::Skip;
    }

    let Some(data) = line.strip_prefix("data:") else {
        // event:, id:, retry:
        return LineOutcome::Skip;
    };
    let data = data.strip_prefix(' ').unwrap_or(data);

    if data == "[DONE]" {
        return LineOutcome::Done;
    }

    LineOutcome::Event(parse_data_line(data))
}

/// Parse one `data:` payload. Server-reported failures become errors.
pub fn parse_data_line(data: &str) -> Result<ResponseStreamEvent> {
    let event: ResponseStreamEvent = serde_json::from_str(data)
        .map_err(|e| LlmError::MalformedEvent(format!("{}: {}", e, data)))?;

    tracing::trace!(kind = event.kind(), "stream event");

    match event {
        ResponseStreamEvent::Error { code, message, .. } => Err(LlmError::Stream { code, message }),
        ResponseStreamEvent::Failed { response } => {
            let message = response
                .error
                .map(|e| e.message)
                .unwrap_or_else(|| format!("response {} failed", response.id));
            Err(LlmError::ResponseFailed(message))
        }
        event => Ok(event),
    }
}
