#![deny(warnings)]

pub mod config;
pub mod tts;
pub mod voice;

pub use config::ApiKey;
pub use tts::{GoogleTtsClient, TtsError};
pub use voice::{resolve, SynthesisRequest, VoiceCatalog, CATALOG};
