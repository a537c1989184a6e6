use std::io::Write;

use modelprobe_llm::{
    ResponseRequest, ResponseStream, ResponseStreamEvent, ResponsesClient, ResponsesResponse, Result,
};

/// Write streamed text to `out` as it arrives.
///
/// Each delta is flushed before the next event is pulled; completion adds a
/// single newline. Every other event kind is skipped.
pub async fn print_stream<W: Write>(stream: &mut ResponseStream, out: &mut W) -> Result<()> {
    while let Some(event) = stream.next_event().await {
        match event? {
            ResponseStreamEvent::OutputTextDelta { delta, .. } => {
                out.write_all(delta.as_bytes())?;
                out.flush()?;
            }
            ResponseStreamEvent::Completed { .. } => {
                writeln!(out)?;
                out.flush()?;
            }
            other => tracing::trace!(kind = other.kind(), "skipping event"),
        }
    }
    Ok(())
}

/// Issue one streaming request, print it, and drain the final response.
///
/// The stream handle is dropped on every return path, which closes the
/// connection even when printing fails halfway.
pub async fn run_probe<C, W>(client: &C, request: ResponseRequest, out: &mut W) -> Result<ResponsesResponse>
where
    C: ResponsesClient + ?Sized,
    W: Write,
{
    let mut stream = client.stream_response(request).await?;
    print_stream(&mut stream, out).await?;
    let response = stream.final_response().await?;

    tracing::debug!(
        id = %response.id,
        status = response.status.as_deref().unwrap_or("unknown"),
        input_tokens = response.usage.as_ref().map(|u| u.input_tokens),
        output_tokens = response.usage.as_ref().map(|u| u.output_tokens),
        reasoning_tokens = response.reasoning_tokens(),
        "response finished"
    );

    Ok(response)
}
