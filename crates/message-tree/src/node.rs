//! Tree nodes and their exported shape.

use indexmap::IndexMap;
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

use crate::error::MessageTreeError;
use crate::path::{Path, Segment, RESERVED_SEGMENT};

/// A value stored under a node key.
#[derive(Debug, Clone, PartialEq)]
pub enum Entry {
    Text(String),
    Node(Node),
}

impl Entry {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Entry::Text(text) => Some(text),
            Entry::Node(_) => None,
        }
    }

    pub fn as_node(&self) -> Option<&Node> {
        match self {
            Entry::Node(node) => Some(node),
            Entry::Text(_) => None,
        }
    }

    pub fn to_value(&self) -> Value {
        match self {
            Entry::Text(text) => Value::String(text.clone()),
            Entry::Node(node) => node.to_value(),
        }
    }
}

/// A container of named and sequenced entries with an optional validity flag.
///
/// Appending uses the next free sequence index, which is one past the largest
/// index ever stored in this node.
#[derive(Debug, Clone, Default)]
pub struct Node {
    children: IndexMap<Segment, Entry>,
    valid: Option<bool>,
    next_index: u64,
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.valid == other.valid && self.children == other.children
    }
}

impl Node {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty() && self.valid.is_none()
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn valid(&self) -> Option<bool> {
        self.valid
    }

    pub fn set_valid(&mut self, valid: bool) {
        self.valid = Some(valid);
    }

    pub fn get(&self, segment: &Segment) -> Option<&Entry> {
        self.children.get(&segment.clone().normalize())
    }

    pub fn entries(&self) -> impl Iterator<Item = (&Segment, &Entry)> {
        self.children.iter()
    }

    /// Append a text as the next sequence entry and return its index.
    pub fn push(&mut self, text: impl Into<String>) -> Segment {
        let segment = Segment::Index(self.next_index);
        self.insert(segment.clone(), Entry::Text(text.into()));
        segment
    }

    /// Set `segment` to `entry`, replacing whatever was there.
    pub fn insert(&mut self, segment: Segment, entry: Entry) -> Option<Entry> {
        let segment = segment.normalize();
        self.track_index(&segment);
        self.children.insert(segment, entry)
    }

    fn track_index(&mut self, segment: &Segment) {
        if let Segment::Index(idx) = segment {
            self.next_index = self.next_index.max(idx.saturating_add(1));
        }
    }

    /// Null-safe lookup. `None` if any step is missing or passes through a
    /// text.
    pub fn lookup(&self, path: &Path) -> Option<&Entry> {
        let mut segments = path.iter();
        let first = segments.next()?;
        let mut entry = self.children.get(first)?;
        for segment in segments {
            entry = match entry {
                Entry::Node(node) => node.children.get(segment)?,
                Entry::Text(_) => return None,
            };
        }
        Some(entry)
    }

    /// Length of the shortest prefix of `path` that ends on a text entry.
    pub(crate) fn text_depth(&self, path: &Path) -> Option<usize> {
        let mut node = self;
        for (depth, segment) in path.iter().enumerate() {
            match node.children.get(segment) {
                None => return None,
                Some(Entry::Node(child)) => node = child,
                Some(Entry::Text(_)) => return Some(depth + 1),
            }
        }
        None
    }

    /// Walk `path` creating empty nodes for missing steps.
    ///
    /// # Errors
    ///
    /// `PathConflict` if the walk lands on or passes through a text. The tree
    /// is left untouched in that case.
    pub fn node_mut_or_create(&mut self, path: &Path) -> Result<&mut Node, MessageTreeError> {
        if let Some(depth) = self.text_depth(path) {
            return Err(MessageTreeError::PathConflict(path.prefix(depth)));
        }
        let mut node = self;
        for (depth, segment) in path.iter().enumerate() {
            node.track_index(segment);
            let entry = node
                .children
                .entry(segment.clone())
                .or_insert_with(|| Entry::Node(Node::new()));
            node = match entry {
                Entry::Node(child) => child,
                Entry::Text(_) => return Err(MessageTreeError::PathConflict(path.prefix(depth + 1))),
            };
        }
        Ok(node)
    }

    fn is_sequence(&self) -> bool {
        self.valid.is_none()
            && self
                .children
                .keys()
                .enumerate()
                .all(|(i, segment)| segment.as_index() == Some(i as u64))
    }

    /// Export as plain JSON.
    ///
    /// A node without a validity flag whose keys are `0..n` in order becomes
    /// an array (the empty node included); anything else becomes an object,
    /// with `isValid` after the children when the flag is set.
    ///
    /// # Example
    ///
    /// ```
    /// use message_tree::{Node, Path};
    /// use serde_json::json;
    ///
    /// let mut root = Node::new();
    /// root.node_mut_or_create(&Path::parse("a/b")).unwrap().push("hello");
    /// assert_eq!(root.to_value(), json!({"a": {"b": ["hello"]}}));
    /// ```
    pub fn to_value(&self) -> Value {
        if self.is_sequence() {
            return Value::Array(self.children.values().map(Entry::to_value).collect());
        }
        let mut map = Map::with_capacity(self.children.len() + 1);
        for (segment, entry) in &self.children {
            map.insert(segment.to_string(), entry.to_value());
        }
        if let Some(valid) = self.valid {
            map.insert(RESERVED_SEGMENT.to_string(), Value::Bool(valid));
        }
        Value::Object(map)
    }
}

impl TryFrom<&Value> for Node {
    type Error = MessageTreeError;

    /// Import an exported shape. Leaves must be strings and `isValid` must be
    /// a boolean.
    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        let mut node = Node::new();
        match value {
            Value::Array(items) => {
                for (i, item) in items.iter().enumerate() {
                    node.insert(Segment::from(i), Entry::try_from(item)?);
                }
            }
            Value::Object(map) => {
                for (key, item) in map {
                    if key == RESERVED_SEGMENT {
                        match item {
                            Value::Bool(valid) => node.valid = Some(*valid),
                            other => {
                                return Err(MessageTreeError::InvalidMessage(format!(
                                    "isValid must be a boolean, got {other}"
                                )))
                            }
                        }
                        continue;
                    }
                    node.insert(Segment::from(key), Entry::try_from(item)?);
                }
            }
            other => {
                return Err(MessageTreeError::InvalidMessage(format!(
                    "expected an object or an array, got {other}"
                )))
            }
        }
        Ok(node)
    }
}

impl TryFrom<&Value> for Entry {
    type Error = MessageTreeError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        match value {
            Value::String(text) => Ok(Entry::Text(text.clone())),
            Value::Array(_) | Value::Object(_) => Node::try_from(value).map(Entry::Node),
            other => Err(MessageTreeError::InvalidMessage(format!(
                "expected a string message, got {other}"
            ))),
        }
    }
}

impl Serialize for Entry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Entry::Text(text) => serializer.serialize_str(text),
            Entry::Node(node) => node.serialize(serializer),
        }
    }
}

impl Serialize for Node {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.is_sequence() {
            let mut seq = serializer.serialize_seq(Some(self.children.len()))?;
            for entry in self.children.values() {
                seq.serialize_element(entry)?;
            }
            return seq.end();
        }
        let len = self.children.len() + usize::from(self.valid.is_some());
        let mut map = serializer.serialize_map(Some(len))?;
        for (segment, entry) in &self.children {
            map.serialize_entry(&segment.to_string(), entry)?;
        }
        if let Some(valid) = self.valid {
            map.serialize_entry(RESERVED_SEGMENT, &valid)?;
        }
        map.end()
    }
}
