use std::io::Write;

use modelprobe_llm::{
    Content, Message, OpenAIClient, ResponseRequest, ResponseStreamEvent, ResponsesClient, Result,
};

#[tokio::main]
async fn main() -> Result<()> {
    let api_key = std::env::var("OPENAI_API_KEY").unwrap_or_default();
    let client = OpenAIClient::new(api_key)?;

    let request = ResponseRequest::new(
        "gpt-5",
        vec![
            Message::system("Answer in one sentence."),
            Message::human(Content::input_text("Explain server-sent events.")),
        ],
    );

    let mut stream = client.stream_response(request).await?;
    let mut stdout = std::io::stdout();

    while let Some(event) = stream.next_event().await {
        match event? {
            ResponseStreamEvent::OutputTextDelta { delta, .. } => {
                print!("{}", delta);
                stdout.flush()?;
            }
            ResponseStreamEvent::Completed { .. } => println!(),
            _ => {}
        }
    }

    let response = stream.final_response().await?;
    if let Some(usage) = response.usage {
        println!("Tokens used: {}", usage.total_tokens);
    }

    Ok(())
}
