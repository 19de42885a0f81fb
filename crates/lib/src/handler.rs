//! Webhook handler: one synchronous pass per inbound delivery.
//!
//! Signature check, payload decode, then per-message processing. An error while
//! handling one message is logged and answered with a best-effort error reply;
//! it never aborts the other events in the delivery or the request itself.

use crate::config::Config;
use crate::line::{LineClient, LineError, TextMessageEvent, WebhookPayload};
use crate::llm::BedrockClient;
use crate::translate::{self, compose_failure_reply, compose_reply, resolve_trigger};

/// HTTP-style handler outcome. `body` is a JSON-encoded string; `status` is
/// always 200, 500, or 502.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebhookResponse {
    pub status: u16,
    pub body: String,
}

impl WebhookResponse {
    pub fn ok() -> Self {
        Self {
            status: 200,
            body: json_body("OK"),
        }
    }

    pub fn not_configured() -> Self {
        Self {
            status: 500,
            body: json_body("Bot is not configured. Check the required environment variables."),
        }
    }

    pub fn invalid_signature() -> Self {
        Self {
            status: 502,
            body: json_body("Invalid signature. Check the channel secret."),
        }
    }

    pub fn malformed_payload() -> Self {
        Self {
            status: 500,
            body: json_body("Failed to decode webhook payload."),
        }
    }
}

fn json_body(message: &str) -> String {
    serde_json::to_string(message).unwrap_or_else(|_| "\"\"".to_string())
}

/// The configured bot. Both clients are built once at startup and injected
/// here; `handle` keeps no state between calls.
pub struct TranslateBot {
    line: LineClient,
    bedrock: BedrockClient,
}

impl TranslateBot {
    pub fn new(line: LineClient, bedrock: BedrockClient) -> Self {
        Self { line, bedrock }
    }

    /// Build both clients from a complete configuration, using the production
    /// endpoints.
    pub fn from_config(config: &Config) -> Self {
        let line = LineClient::new(
            config.channel_access_token.clone(),
            config.channel_secret.clone(),
            None,
        );
        let bedrock = BedrockClient::new(
            &config.bedrock_region,
            &config.bedrock_model_id,
            config.bedrock_api_key.clone(),
            None,
        );
        Self::new(line, bedrock)
    }

    /// Handle one webhook delivery: verify the signature, decode the payload,
    /// process each text message, answer 200 OK.
    pub async fn handle(&self, signature: Option<&str>, body: &[u8]) -> WebhookResponse {
        if !self.line.verify_signature(signature.unwrap_or(""), body) {
            log::error!("webhook rejected: invalid x-line-signature");
            return WebhookResponse::invalid_signature();
        }
        let payload: WebhookPayload = match serde_json::from_slice(body) {
            Ok(p) => p,
            Err(e) => {
                log::error!("webhook rejected: undecodable payload: {}", e);
                return WebhookResponse::malformed_payload();
            }
        };
        for event in payload.text_messages() {
            if let Err(e) = self.process_message(&event).await {
                log::error!("processing message from {} failed: {}", event.user_id, e);
                let sent = self
                    .line
                    .reply(&event.reply_token, translate::PROCESSING_ERROR_REPLY)
                    .await;
                if let Err(send_err) = sent {
                    log::error!("error reply to {} failed: {}", event.user_id, send_err);
                }
            }
        }
        WebhookResponse::ok()
    }

    /// One message: profile lookup, trigger resolution, translation, reply.
    /// Returns Ok(()) without replying when the message carries no trigger —
    /// the bot never echoes.
    async fn process_message(&self, event: &TextMessageEvent) -> Result<(), LineError> {
        let profile = self.line.get_profile(&event.user_id).await?;
        let Some(trigger) = resolve_trigger(event.text.trim()) else {
            return Ok(());
        };
        log::info!(
            "translating {} -> {} for {}",
            trigger.source,
            trigger.target,
            profile.display_name
        );
        let reply_text = match self.bedrock.translate(&trigger.text, trigger.target).await {
            Ok(translated) => compose_reply(
                &profile.display_name,
                trigger.source,
                trigger.target,
                &translated,
            ),
            Err(e) => {
                log::error!(
                    "translation {} -> {} failed: {}",
                    trigger.source,
                    trigger.target,
                    e
                );
                compose_failure_reply(trigger.source, trigger.target)
            }
        };
        self.line.reply(&event.reply_token, &reply_text).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_bodies_are_json_encoded_strings() {
        assert_eq!(WebhookResponse::ok().status, 200);
        assert_eq!(WebhookResponse::ok().body, "\"OK\"");
        assert_eq!(WebhookResponse::not_configured().status, 500);
        assert_eq!(WebhookResponse::invalid_signature().status, 502);
        assert_eq!(WebhookResponse::malformed_payload().status, 500);
        // Every body round-trips as a JSON string.
        for r in [
            WebhookResponse::ok(),
            WebhookResponse::not_configured(),
            WebhookResponse::invalid_signature(),
            WebhookResponse::malformed_payload(),
        ] {
            let decoded: String = serde_json::from_str(&r.body).expect("JSON string body");
            assert!(!decoded.is_empty());
        }
    }
}
