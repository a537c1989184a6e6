mod client;
mod responses;

pub use client::{OpenAIClient, OpenAIClientBuilder, OPENAI_API_BASE};
pub use responses::{
    OutputContent, OutputItem, OutputTokensDetails, ResponseError, ResponseStreamEvent,
    ResponsesResponse, SummaryText, Usage,
};
