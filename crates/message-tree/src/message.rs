//! Messages accepted by the tree.

use indexmap::IndexMap;
use serde_json::Value;

use crate::error::MessageTreeError;
use crate::path::Segment;

/// A message to write into the tree.
///
/// `Batch` keys decide placement: `Segment::Key` entries are written under
/// that name, `Segment::Index` entries are appended to the sequence.
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    Text(String),
    Batch(IndexMap<Segment, Message>),
}

impl Message {
    /// A batch of sequence entries.
    ///
    /// # Example
    ///
    /// ```
    /// use message_tree::{Message, Segment};
    ///
    /// let msg = Message::list(["too short", "needs a digit"]);
    /// let Message::Batch(entries) = msg else { unreachable!() };
    /// assert_eq!(entries.get(&Segment::Index(1)), Some(&Message::from("needs a digit")));
    /// ```
    pub fn list<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Message::Batch(
            items
                .into_iter()
                .enumerate()
                .map(|(i, text)| (Segment::from(i), Message::Text(text.into())))
                .collect(),
        )
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Message::Text(text) => Some(text),
            Message::Batch(_) => None,
        }
    }

    pub fn is_batch(&self) -> bool {
        matches!(self, Message::Batch(_))
    }

    /// An empty text or a batch with no entries.
    pub fn is_empty(&self) -> bool {
        match self {
            Message::Text(text) => text.is_empty(),
            Message::Batch(entries) => entries.is_empty(),
        }
    }

    pub fn to_value(&self) -> Value {
        match self {
            Message::Text(text) => Value::String(text.clone()),
            Message::Batch(entries) => Value::Object(
                entries
                    .iter()
                    .map(|(key, msg)| (key.to_string(), msg.to_value()))
                    .collect(),
            ),
        }
    }
}

impl From<&str> for Message {
    fn from(text: &str) -> Self {
        Message::Text(text.to_string())
    }
}

impl From<String> for Message {
    fn from(text: String) -> Self {
        Message::Text(text)
    }
}

impl<K: Into<Segment>, M: Into<Message>> FromIterator<(K, M)> for Message {
    fn from_iter<I: IntoIterator<Item = (K, M)>>(iter: I) -> Self {
        Message::Batch(
            iter.into_iter()
                .map(|(key, msg)| (key.into(), msg.into()))
                .collect(),
        )
    }
}

impl TryFrom<&Value> for Message {
    type Error = MessageTreeError;

    /// Strings become texts, arrays and objects become batches. Numbers,
    /// booleans and null are rejected.
    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        match value {
            Value::String(text) => Ok(Message::Text(text.clone())),
            Value::Array(items) => items
                .iter()
                .enumerate()
                .map(|(i, item)| Ok((Segment::from(i), Message::try_from(item)?)))
                .collect::<Result<IndexMap<_, _>, _>>()
                .map(Message::Batch),
            Value::Object(map) => map
                .iter()
                .map(|(key, item)| Ok((Segment::from(key), Message::try_from(item)?)))
                .collect::<Result<IndexMap<_, _>, _>>()
                .map(Message::Batch),
            other => Err(MessageTreeError::InvalidMessage(format!(
                "expected a string or a nested structure, got {other}"
            ))),
        }
    }
}

impl TryFrom<Value> for Message {
    type Error = MessageTreeError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Message::try_from(&value)
    }
}
