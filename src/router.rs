//! Command routing
//!
//! Recognized text is split into a command token and arguments; the token is
//! resolved through an alias table built once at startup. Alias collisions
//! are rejected at construction time, so dispatch is deterministic and never
//! depends on table iteration order.

use std::collections::HashMap;

use crate::{Error, Result};

/// Canonical command identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    /// Spoken greeting
    Greeting,
    /// Spoken farewell, then shutdown
    Farewell,
    /// Web search in the browser
    WebSearch,
    /// Video search in the browser
    VideoSearch,
    /// Encyclopedia definition lookup
    Encyclopedia,
    /// Translation between the owner's native and target languages
    Translate,
    /// Toggle the assistant's speech language
    SwitchLanguage,
    /// Weather report
    Weather,
}

/// Spoken alias tokens per command, mixed-language by design
const DEFAULT_ALIASES: &[(Command, &[&str])] = &[
    (Command::Greeting, &["hello", "hi", "morning", "привет"]),
    (
        Command::Farewell,
        &["bye", "goodbye", "quit", "exit", "stop", "пока"],
    ),
    (Command::WebSearch, &["search", "google", "find", "найди"]),
    (Command::VideoSearch, &["video", "youtube", "watch", "видео"]),
    (
        Command::Encyclopedia,
        &["wikipedia", "definition", "about", "определение", "википедия"],
    ),
    (
        Command::Translate,
        &[
            "translate",
            "interpretation",
            "translation",
            "перевод",
            "перевести",
            "переведи",
        ],
    ),
    (Command::SwitchLanguage, &["language", "язык"]),
    (Command::Weather, &["weather", "forecast", "погода", "прогноз"]),
];

/// A routed utterance: the matched command and its argument tokens
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutedCommand {
    /// Matched canonical command
    pub command: Command,
    /// Remaining tokens, order-preserving
    pub args: Vec<String>,
}

/// Alias-to-command lookup built once at startup
pub struct CommandTable {
    aliases: HashMap<String, Command>,
}

impl CommandTable {
    /// Build the table from the default alias sets
    ///
    /// # Errors
    ///
    /// Returns error if an alias appears in more than one set
    pub fn new() -> Result<Self> {
        Self::with_aliases(DEFAULT_ALIASES)
    }

    /// Build a table from explicit alias sets, rejecting collisions
    fn with_aliases(sets: &[(Command, &[&str])]) -> Result<Self> {
        let mut aliases = HashMap::new();

        for (command, tokens) in sets {
            for token in *tokens {
                let token = token.to_lowercase();
                if let Some(existing) = aliases.insert(token.clone(), *command) {
                    return Err(Error::Config(format!(
                        "alias '{token}' bound to both {existing:?} and {command:?}"
                    )));
                }
            }
        }

        tracing::debug!(aliases = aliases.len(), "command table built");

        Ok(Self { aliases })
    }

    /// Split recognized text into a command token and arguments, and resolve
    /// the token against the alias table
    ///
    /// Returns `None` for empty text or an unknown command token; unknown
    /// utterances are intentionally dropped without surfacing an error.
    #[must_use]
    pub fn route(&self, text: &str) -> Option<RoutedCommand> {
        let mut tokens = text.split_whitespace();
        let command_token = tokens.next()?;
        let command = *self.aliases.get(command_token)?;

        Some(RoutedCommand {
            command,
            args: tokens.map(str::to_string).collect(),
        })
    }
}
