//! Bedrock Converse client used for translation.
//!
//! One blocking round-trip per call: build the instruction prompt, POST to the
//! model's converse endpoint, pull the first text block out of the response.
//! No retries, no streaming, no caching — identical inputs always hit the
//! model again.

use serde::Deserialize;

use crate::translate::Lang;

#[derive(Debug, thiserror::Error)]
pub enum BedrockError {
    #[error("bedrock request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("bedrock api error: {0}")]
    Api(String),
    #[error("bedrock response error: {0}")]
    Response(String),
}

/// Client for one configured model. Credentials only; no mutable state.
#[derive(Clone)]
pub struct BedrockClient {
    base_url: String,
    model_id: String,
    api_key: Option<String>,
    client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct ConverseResponse {
    output: ConverseOutput,
}

#[derive(Debug, Deserialize)]
struct ConverseOutput {
    message: OutputMessage,
}

#[derive(Debug, Deserialize)]
struct OutputMessage {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(default)]
    text: String,
}

/// Instruction prompt for one translation. The language is picked by the
/// target side of the trigger, not the source.
fn build_prompt(target: Lang, text: &str) -> String {
    format!(
        "Translate the following text to {}. Only provide the translation, no explanations:\n\n{}",
        target.name(),
        text
    )
}

impl BedrockClient {
    /// `base_url` overrides the regional default (tests, proxies).
    pub fn new(
        region: &str,
        model_id: &str,
        api_key: Option<String>,
        base_url: Option<String>,
    ) -> Self {
        let base_url = base_url
            .map(|u| u.trim_end_matches('/').to_string())
            .unwrap_or_else(|| format!("https://bedrock-runtime.{}.amazonaws.com", region));
        Self {
            base_url,
            model_id: model_id.to_string(),
            api_key,
            client: reqwest::Client::new(),
        }
    }

    /// POST /model/{id}/converse — translate `text` into `target`'s language.
    pub async fn translate(&self, text: &str, target: Lang) -> Result<String, BedrockError> {
        let url = format!("{}/model/{}/converse", self.base_url, self.model_id);
        let body = serde_json::json!({
            "messages": [{ "role": "user", "content": [{ "text": build_prompt(target, text) }] }],
        });
        let mut req = self.client.post(&url).json(&body);
        if let Some(ref key) = self.api_key {
            req = req.bearer_auth(key);
        }
        let res = req.send().await?;
        if !res.status().is_success() {
            let status = res.status();
            let body = res.text().await.unwrap_or_default();
            return Err(BedrockError::Api(format!(
                "converse failed: {} {}",
                status, body
            )));
        }
        let data: ConverseResponse = res
            .json()
            .await
            .map_err(|e| BedrockError::Response(format!("decoding converse response: {}", e)))?;
        data.output
            .message
            .content
            .first()
            .map(|c| c.text.trim().to_string())
            .filter(|t| !t.is_empty())
            .ok_or_else(|| BedrockError::Response("no text content in model response".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_names_the_target_language() {
        let p = build_prompt(Lang::Ja, "Hello");
        assert_eq!(
            p,
            "Translate the following text to Japanese. Only provide the translation, no explanations:\n\nHello"
        );
        assert!(build_prompt(Lang::En, "こんにちは").contains("to English."));
    }

    #[test]
    fn converse_response_first_text_block() {
        let body = r#"{
            "output": { "message": { "role": "assistant", "content": [{ "text": " Hello \n" }] } },
            "stopReason": "end_turn"
        }"#;
        let res: ConverseResponse = serde_json::from_str(body).expect("decode");
        assert_eq!(res.output.message.content[0].text.trim(), "Hello");
    }

    #[test]
    fn converse_response_without_content_decodes_empty() {
        let body = r#"{ "output": { "message": { "role": "assistant" } } }"#;
        let res: ConverseResponse = serde_json::from_str(body).expect("decode");
        assert!(res.output.message.content.is_empty());
    }
}
