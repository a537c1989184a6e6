use futures::{Stream, StreamExt};

use crate::buffer_utils::EventStream;
use crate::error::{LlmError, Result};
use crate::openai::{ResponseStreamEvent, ResponsesResponse};

/// Scoped handle over one streaming Responses API call.
///
/// The handle owns the event stream and, through it, the HTTP connection.
/// The connection is released by `close()`, by the first error, by the end
/// of the events, or on drop, whichever comes first.
pub struct ResponseStream {
    events: Option<EventStream>,
    final_response: Option<ResponsesResponse>,
}

impl ResponseStream {
    pub fn new(events: EventStream) -> Self {
        Self {
            events: Some(events),
            final_response: None,
        }
    }

    /// Wrap any event stream, e.g. a synthetic one in tests
    pub fn from_events<S>(events: S) -> Self
    where
        S: Stream<Item = Result<ResponseStreamEvent>> + Send + 'static,
    {
        Self::new(Box::pin(events))
    }

    /// Pull the next event in arrival order
    pub async fn next_event(&mut self) -> Option<Result<ResponseStreamEvent>> {
        let events = self.events.as_mut()?;

        match events.next().await {
            Some(Ok(event)) => {
                if let ResponseStreamEvent::Completed { response } = &event {
                    self.final_response = Some(response.clone());
                }
                Some(Ok(event))
            }
            Some(Err(e)) => {
                self.close();
                Some(Err(e))
            }
            None => {
                self.close();
                None
            }
        }
    }

    /// Drain whatever is left and return the response carried by
    /// `response.completed`. Deferred stream errors surface here.
    pub async fn final_response(mut self) -> Result<ResponsesResponse> {
        while let Some(event) = self.next_event().await {
            event?;
        }
        self.final_response.take().ok_or(LlmError::Incomplete)
    }

    /// Release the underlying connection. Idempotent.
    pub fn close(&mut self) {
        if self.events.take().is_some() {
            tracing::debug!("response stream closed");
        }
    }

    pub fn is_closed(&self) -> bool {
        self.events.is_none()
    }
}

impl Drop for ResponseStream {
    fn drop(&mut self) {
        self.close();
    }
}

impl std::fmt::Debug for ResponseStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResponseStream")
            .field("closed", &self.is_closed())
            .field("final_response", &self.final_response)
            .finish()
    }
}
