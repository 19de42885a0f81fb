//! Transline core library — configuration, LINE channel, model client, and the
//! webhook handler shared by the CLI binary and the integration tests.

pub mod config;
pub mod handler;
pub mod line;
pub mod llm;
pub mod server;
pub mod translate;
