//! LINE Messaging API channel.
//!
//! Webhook payload types, `x-line-signature` verification, and the client used
//! for profile lookup and reply send.

mod client;
mod signature;
mod webhook;

pub use client::{LineClient, LineError, Profile};
pub use signature::{sign, verify_signature};
pub use webhook::{TextMessageEvent, WebhookPayload};
