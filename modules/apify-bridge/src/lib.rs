pub mod actions;
pub mod bridge;
pub mod callback;
pub mod config;
pub mod error;
pub mod kind;
pub mod manifest;
pub mod platform;
pub mod provider;
pub mod registrar;
pub mod server;

pub use actions::{ScrapeInstagramInput, ScrapeStarted, ScrapeWebsiteInput, ScrapeYoutubeInput};
pub use bridge::Bridge;
pub use callback::{parse_callback, CallbackBody, CallbackOutcome};
pub use config::Config;
pub use error::{BridgeError, Result};
pub use kind::ScrapeKind;
pub use platform::{CompletionEvent, EventSink};
pub use provider::ScrapeProvider;
