//! Transport and host adapters behind the application ports.

#![forbid(unsafe_code)]

mod config;
mod console;
mod rest_client;
mod telemetry;

pub use config::ClientConfig;
pub use console::{AutoPrompt, ConsoleMessenger};
pub use rest_client::RestCentralServerClient;
pub use telemetry::init_tracing;
