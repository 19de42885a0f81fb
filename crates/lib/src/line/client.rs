//! Profile lookup and reply send against the LINE Messaging API.

use serde::Deserialize;

use super::signature;

const LINE_API_BASE: &str = "https://api.line.me";

#[derive(Debug, thiserror::Error)]
pub enum LineError {
    #[error("line request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("line api error: {0}")]
    Api(String),
}

/// LINE Messaging API client: bearer access token for API calls plus the
/// channel secret used for webhook signature verification. Holds no other
/// state and is safely shared across requests.
#[derive(Clone)]
pub struct LineClient {
    base_url: String,
    access_token: String,
    channel_secret: String,
    client: reqwest::Client,
}

/// Sender profile; only the display name is used.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub display_name: String,
}

impl LineClient {
    /// `base_url` overrides the production endpoint (tests, proxies).
    pub fn new(access_token: String, channel_secret: String, base_url: Option<String>) -> Self {
        let base_url = base_url
            .map(|u| u.trim_end_matches('/').to_string())
            .unwrap_or_else(|| LINE_API_BASE.to_string());
        Self {
            base_url,
            access_token,
            channel_secret,
            client: reqwest::Client::new(),
        }
    }

    /// Verify an `x-line-signature` header value against the raw request body.
    pub fn verify_signature(&self, sig: &str, body: &[u8]) -> bool {
        signature::verify_signature(&self.channel_secret, sig, body)
    }

    /// GET /v2/bot/profile/{userId} — resolve the sender's display name.
    pub async fn get_profile(&self, user_id: &str) -> Result<Profile, LineError> {
        let url = format!("{}/v2/bot/profile/{}", self.base_url, user_id);
        let res = self
            .client
            .get(&url)
            .bearer_auth(&self.access_token)
            .send()
            .await?;
        if !res.status().is_success() {
            let status = res.status();
            let body = res.text().await.unwrap_or_default();
            return Err(LineError::Api(format!(
                "get profile failed: {} {}",
                status, body
            )));
        }
        Ok(res.json().await?)
    }

    /// POST /v2/bot/message/reply — send one text message for a reply token.
    /// Reply tokens are single-use, so a failed send cannot be retried.
    pub async fn reply(&self, reply_token: &str, text: &str) -> Result<(), LineError> {
        let url = format!("{}/v2/bot/message/reply", self.base_url);
        let body = serde_json::json!({
            "replyToken": reply_token,
            "messages": [{ "type": "text", "text": text }],
        });
        let res = self
            .client
            .post(&url)
            .bearer_auth(&self.access_token)
            .json(&body)
            .send()
            .await?;
        if !res.status().is_success() {
            let status = res.status();
            let body = res.text().await.unwrap_or_default();
            return Err(LineError::Api(format!("reply failed: {} {}", status, body)));
        }
        Ok(())
    }
}
