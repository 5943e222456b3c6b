//! Validated identifier types used throughout Voxa.
//!
//! All identifiers follow the parse-don't-validate pattern: constructors
//! return `Result` instead of panicking, and the newtypes prevent mixing a
//! tool name with an agent slug at compile time.
//!
//! # Validation Rules
//!
//! - Non-empty, at most 128 characters
//! - Only alphanumeric characters, hyphens (`-`) and underscores (`_`)
//!
//! Model-facing tool names are camelCase (`getTokenData`); agent slugs are
//! kebab-case by convention (`token-analyst`). Both are covered by the same
//! character set.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const MAX_IDENTIFIER_LEN: usize = 128;

/// Errors produced when parsing an identifier from untrusted input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdentifierError {
    #[error("identifier must not be empty")]
    Empty,

    #[error("identifier is {len} characters long, maximum is {MAX_IDENTIFIER_LEN}")]
    TooLong { len: usize },

    #[error("identifier contains invalid character '{ch}'")]
    InvalidCharacter { ch: char },
}

fn validate(raw: &str) -> Result<(), IdentifierError> {
    if raw.is_empty() {
        return Err(IdentifierError::Empty);
    }
    if raw.len() > MAX_IDENTIFIER_LEN {
        return Err(IdentifierError::TooLong { len: raw.len() });
    }
    if let Some(ch) = raw
        .chars()
        .find(|c| !c.is_ascii_alphanumeric() && *c != '-' && *c != '_')
    {
        return Err(IdentifierError::InvalidCharacter { ch });
    }
    Ok(())
}

macro_rules! identifier_type {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Parse and validate from a string.
            pub fn parse(raw: impl AsRef<str>) -> Result<Self, IdentifierError> {
                let raw = raw.as_ref();
                validate(raw)?;
                Ok(Self(raw.to_string()))
            }

            /// Get the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Create without validation.
            ///
            /// Only for inputs known to be valid (literals in startup wiring,
            /// test fixtures). User input must go through `parse()`.
            #[doc(hidden)]
            pub fn new_unchecked(raw: impl Into<String>) -> Self {
                Self(raw.into())
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = IdentifierError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::parse(s)
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = IdentifierError;

            fn try_from(s: String) -> Result<Self, Self::Error> {
                Self::parse(s)
            }
        }
    };
}

identifier_type! {
    /// Name half of a tool's composite identity.
    ///
    /// The full identity of a tool is the `(ToolName, ResultTag)` pair; see
    /// [`crate::tool::ToolKey`]. The name is what the language model calls,
    /// so it matches the function name advertised in the tool's schema.
    ToolName
}

identifier_type! {
    /// Unique slug identifying an agent, a curated subset of tools.
    AgentSlug
}

/// Identifier for one conversational turn.
///
/// Threaded through every tool invocation so handlers can correlate their
/// side effects (loader items, upstream requests) with the turn that caused
/// them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TurnId(uuid::Uuid);

impl TurnId {
    /// Generate a fresh random turn id.
    pub fn random() -> Self {
        Self(uuid::Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &uuid::Uuid {
        &self.0
    }
}

impl fmt::Display for TurnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<uuid::Uuid> for TurnId {
    fn from(id: uuid::Uuid) -> Self {
        Self(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_camel_case_tool_names() {
        assert!(ToolName::parse("getTokenData").is_ok());
        assert!(ToolName::parse("sendTransaction").is_ok());
        assert!(ToolName::parse("swap_agent-v2").is_ok());
    }

    #[test]
    fn accepts_kebab_case_slugs() {
        let slug = AgentSlug::parse("token-analyst").unwrap();
        assert_eq!(slug.as_str(), "token-analyst");
    }

    #[test]
    fn rejects_invalid_identifiers() {
        assert_eq!(ToolName::parse(""), Err(IdentifierError::Empty));
        assert_eq!(
            ToolName::parse("has space"),
            Err(IdentifierError::InvalidCharacter { ch: ' ' })
        );
        assert_eq!(
            AgentSlug::parse("slash/slug"),
            Err(IdentifierError::InvalidCharacter { ch: '/' })
        );
        let long = "a".repeat(129);
        assert_eq!(
            ToolName::parse(&long),
            Err(IdentifierError::TooLong { len: 129 })
        );
    }

    #[test]
    fn serde_round_trip_validates() {
        let json = serde_json::to_string(&ToolName::new_unchecked("getTokenData")).unwrap();
        assert_eq!(json, "\"getTokenData\"");
        let back: ToolName = serde_json::from_str(&json).unwrap();
        assert_eq!(back.as_str(), "getTokenData");

        let bad: Result<AgentSlug, _> = serde_json::from_str("\"not a slug\"");
        assert!(bad.is_err());
    }

    #[test]
    fn turn_ids_are_unique() {
        assert_ne!(TurnId::random(), TurnId::random());
    }
}
