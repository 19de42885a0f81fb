//! Webhook payload types (LINE webhook schema, camelCase JSON).

use serde::Deserialize;

/// Top-level webhook body: zero or more events per delivery.
#[derive(Debug, Deserialize)]
pub struct WebhookPayload {
    #[serde(default)]
    pub events: Vec<WebhookEvent>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookEvent {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub reply_token: Option<String>,
    #[serde(default)]
    pub source: Option<EventSource>,
    #[serde(default)]
    pub message: Option<MessagePayload>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventSource {
    #[serde(default)]
    pub user_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct MessagePayload {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub text: Option<String>,
}

/// One actionable inbound message: a text message with a sender and a
/// single-use reply token. Everything needed to answer lives here; nothing is
/// kept once the request completes.
#[derive(Debug, Clone)]
pub struct TextMessageEvent {
    pub user_id: String,
    pub reply_token: String,
    pub text: String,
}

impl WebhookPayload {
    /// Keep only text message events that carry a sender id and a reply token.
    /// Stickers, follows, joins, and group-sourced events without a user id are
    /// skipped.
    pub fn text_messages(self) -> Vec<TextMessageEvent> {
        self.events
            .into_iter()
            .filter_map(|e| {
                if e.kind != "message" {
                    return None;
                }
                let message = e.message?;
                if message.kind != "text" {
                    return None;
                }
                Some(TextMessageEvent {
                    user_id: e.source.and_then(|s| s.user_id)?,
                    reply_token: e.reply_token?,
                    text: message.text?,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_only_text_messages() {
        let body = r#"{
            "destination": "U0000",
            "events": [
                {
                    "type": "message",
                    "replyToken": "r1",
                    "source": { "type": "user", "userId": "U1" },
                    "message": { "id": "1", "type": "text", "text": "hi #e2j" }
                },
                {
                    "type": "message",
                    "replyToken": "r2",
                    "source": { "type": "user", "userId": "U2" },
                    "message": { "id": "2", "type": "sticker" }
                },
                { "type": "follow", "source": { "type": "user", "userId": "U3" } }
            ]
        }"#;
        let payload: WebhookPayload = serde_json::from_str(body).expect("decode");
        let messages = payload.text_messages();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].user_id, "U1");
        assert_eq!(messages[0].reply_token, "r1");
        assert_eq!(messages[0].text, "hi #e2j");
    }

    #[test]
    fn empty_events_decodes_to_no_messages() {
        let payload: WebhookPayload = serde_json::from_str(r#"{"events":[]}"#).expect("decode");
        assert!(payload.text_messages().is_empty());
    }

    #[test]
    fn missing_reply_token_is_skipped() {
        let body = r#"{
            "events": [{
                "type": "message",
                "source": { "type": "user", "userId": "U1" },
                "message": { "id": "1", "type": "text", "text": "hi" }
            }]
        }"#;
        let payload: WebhookPayload = serde_json::from_str(body).expect("decode");
        assert!(payload.text_messages().is_empty());
    }
}
