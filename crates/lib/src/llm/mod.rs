//! Model inference client (Bedrock-style Converse endpoint).

mod bedrock;

pub use bedrock::{BedrockClient, BedrockError};
