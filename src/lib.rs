//! OMNIS library root.

pub mod assistant;
pub mod cli;
pub mod config;
pub mod credentials;
pub mod diagnose;
pub mod error;
pub mod logging;
pub mod providers;
pub mod rules;
pub mod speech;

pub use assistant::Assistant;
pub use cli::Commands;
pub use config::Settings;
pub use error::{Error, Result};
pub use providers::Provider;
pub use rules::Resolver;
pub use speech::SpeechQueue;
