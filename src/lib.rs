//! Aria - a spoken-command voice assistant
//!
//! Aria listens for short spoken commands, recognizes them through a
//! two-tier pipeline (a networked transcription service with an offline
//! Vosk fallback), routes the transcript through a spoken-alias table, and
//! dispatches one action per turn: smalltalk, browser searches, encyclopedia
//! lookups, translation, weather reports, and a persistent speech language
//! toggle.
//!
//! The binary entry point is in `main.rs`; the library exposes the pipeline
//! stages so each can be exercised on its own.

pub mod assistant;
pub mod audio;
pub mod config;
pub mod error;
pub mod handlers;
pub mod recognize;
pub mod router;
pub mod speech;
pub mod state;

pub use assistant::Assistant;
pub use config::Config;
pub use error::{Error, Result};
pub use recognize::{Recognition, RecognitionEngine};
pub use router::{Command, CommandTable, RoutedCommand};
pub use state::{AssistantState, Language, OwnerProfile, Sex};
