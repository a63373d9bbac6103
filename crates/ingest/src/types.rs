//! Data model for chat exports.
//!
//! ```text
//! ChatExport
//! ├── name: Option<Value>
//! ├── kind: Option<Value>           ("type" in JSON)
//! ├── id: Option<Value>
//! └── messages: Vec<Message>
//!     ├── id: Option<Value>
//!     ├── kind: Option<Value>       ("type" in JSON)
//!     ├── from: Option<Value>
//!     ├── date: Option<Value>
//!     └── text: MessageText
//!         ├── Plain(String)         string-valued text
//!         ├── Rich(Value)           lists of entities, links, anything else
//!         └── Missing               absent or null
//! ```
//!
//! Unknown fields at either level are ignored. Metadata fields are optional
//! and keep whatever JSON value they hold, since nothing reads them; `messages`
//! is the one required key.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// A parsed chat export. Read once, never mutated.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ChatExport {
    #[serde(default)]
    pub name: Option<Value>,
    #[serde(default, rename = "type")]
    pub kind: Option<Value>,
    #[serde(default)]
    pub id: Option<Value>,
    pub messages: Vec<Message>,
}

impl ChatExport {
    /// Iterates the string-valued message texts in export order.
    ///
    /// Rich and missing texts are skipped entirely, including any string
    /// fragments nested inside rich content.
    pub fn plain_texts(&self) -> impl Iterator<Item = &str> + '_ {
        self.messages.iter().filter_map(|message| message.text.as_plain())
    }

    /// Number of message records, whatever their text.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// True when the export holds no messages.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

/// One message record.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Message {
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default, rename = "type")]
    pub kind: Option<Value>,
    #[serde(default)]
    pub from: Option<Value>,
    #[serde(default)]
    pub date: Option<Value>,
    #[serde(default)]
    pub text: MessageText,
}

/// The `text` field of a message.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum MessageText {
    Plain(String),
    Rich(Value),
    #[default]
    Missing,
}

impl MessageText {
    /// The text when it is a plain string.
    pub fn as_plain(&self) -> Option<&str> {
        match self {
            MessageText::Plain(text) => Some(text.as_str()),
            MessageText::Rich(_) | MessageText::Missing => None,
        }
    }

    /// True for string-valued text.
    pub fn is_plain(&self) -> bool {
        matches!(self, MessageText::Plain(_))
    }
}

impl<'de> Deserialize<'de> for MessageText {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Value::deserialize(deserializer)? {
            Value::String(text) => MessageText::Plain(text),
            Value::Null => MessageText::Missing,
            other => MessageText::Rich(other),
        })
    }
}
