//! The message tree aggregate: root node, cursor and saved cursors.

use std::collections::{HashMap, HashSet};

use serde_json::Value;
use tracing::trace;

use crate::alias::{Alias, CursorTarget, SavedCursor};
use crate::error::MessageTreeError;
use crate::message::Message;
use crate::node::{Entry, Node};
use crate::path::{Location, Path, Segment};

/// A path-addressable tree of messages with a navigation cursor.
///
/// Every write takes a [`Location`]: the cursor itself, an absolute path, or
/// a path relative to the cursor. Paths are validated before anything is
/// written.
///
/// # Example
///
/// ```
/// use message_tree::{Location, MessageTree};
/// use serde_json::json;
///
/// let mut tree = MessageTree::new();
/// tree.set_path("user/address").unwrap();
/// tree.add_message("unknown city", Location::relative("city")).unwrap();
/// tree.set_valid(false, Location::Cursor).unwrap();
///
/// assert_eq!(
///     tree.to_value(),
///     json!({"user": {"address": {"city": ["unknown city"], "isValid": false}}})
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct MessageTree {
    root: Node,
    cursor: Path,
    saved: HashMap<Alias, SavedCursor>,
}

impl MessageTree {
    pub fn new() -> Self {
        Self::default()
    }

    // ------------------------------------------------------------------ cursor

    /// The live cursor.
    pub fn cursor(&self) -> &Path {
        &self.cursor
    }

    /// The path saved under `alias`, or the root path if nothing usable is
    /// saved there.
    pub fn saved_cursor(&self, alias: &Alias) -> Path {
        self.resolve_alias(alias).unwrap_or_default()
    }

    /// Slash-joined form of the live cursor.
    pub fn path(&self) -> String {
        self.cursor.to_string()
    }

    /// Slash-joined form of [`saved_cursor`](Self::saved_cursor).
    pub fn saved_path(&self, alias: &Alias) -> String {
        self.saved_cursor(alias).to_string()
    }

    /// Move the cursor to a path, or to the path saved under an alias.
    ///
    /// Alias chains are followed at call time.
    ///
    /// # Errors
    ///
    /// - `InvalidCursorFormat` for a path with a reserved segment
    /// - `UnknownAlias` if an alias in the chain was never saved
    /// - `AliasCycle` if the chain loops
    pub fn set_cursor(&mut self, target: impl Into<CursorTarget>) -> Result<(), MessageTreeError> {
        let path = match target.into() {
            CursorTarget::Path(path) => {
                if !path.is_valid() {
                    return Err(MessageTreeError::InvalidCursorFormat(path));
                }
                path
            }
            CursorTarget::Alias(alias) => self.resolve_alias(&alias)?,
        };
        trace!(target: "message_tree", cursor = %path, "set cursor");
        self.cursor = path;
        Ok(())
    }

    /// Parse `path` and move the cursor there.
    pub fn set_path(&mut self, path: impl Into<Path>) -> Result<(), MessageTreeError> {
        self.set_cursor(CursorTarget::Path(path.into()))
    }

    /// Append every segment of `path` to the cursor.
    ///
    /// # Errors
    ///
    /// `PathInvalid` if any appended segment is reserved; the cursor is not
    /// changed.
    pub fn append_path(&mut self, path: impl Into<Path>) -> Result<(), MessageTreeError> {
        let path = path.into();
        path.validate()?;
        self.cursor = self.cursor.join(&path);
        trace!(target: "message_tree", cursor = %self.cursor, "append path");
        Ok(())
    }

    /// Drop the last cursor segment. `None` if the cursor is at the root.
    pub fn pop_cursor(&mut self) -> Option<Segment> {
        self.cursor.pop()
    }

    /// Save a snapshot of the current cursor under `alias`.
    pub fn save_cursor(&mut self, alias: impl Into<Alias>) {
        let cursor = self.cursor.clone();
        self.save(alias.into(), SavedCursor::Path(cursor));
    }

    /// Save an explicit path under `alias`.
    pub fn save_cursor_at(
        &mut self,
        alias: impl Into<Alias>,
        path: impl Into<Path>,
    ) -> Result<(), MessageTreeError> {
        let path = path.into();
        path.validate()?;
        self.save(alias.into(), SavedCursor::Path(path));
        Ok(())
    }

    /// Make `alias` refer to whatever `target` holds when the cursor is
    /// restored.
    ///
    /// # Errors
    ///
    /// `InvalidAlias` if `target` has not been saved yet.
    pub fn link_alias(
        &mut self,
        alias: impl Into<Alias>,
        target: impl Into<Alias>,
    ) -> Result<(), MessageTreeError> {
        let target = target.into();
        if !self.saved.contains_key(&target) {
            return Err(MessageTreeError::InvalidAlias(target));
        }
        self.save(alias.into(), SavedCursor::Alias(target));
        Ok(())
    }

    fn save(&mut self, alias: Alias, saved: SavedCursor) {
        trace!(target: "message_tree", alias = %alias, "save cursor");
        self.saved.insert(alias, saved);
    }

    fn resolve_alias(&self, alias: &Alias) -> Result<Path, MessageTreeError> {
        let mut seen = HashSet::new();
        let mut current = alias;
        loop {
            if !seen.insert(current) {
                return Err(MessageTreeError::AliasCycle(alias.clone()));
            }
            match self.saved.get(current) {
                None => return Err(MessageTreeError::UnknownAlias(current.clone())),
                Some(SavedCursor::Path(path)) => return Ok(path.clone()),
                Some(SavedCursor::Alias(next)) => current = next,
            }
        }
    }

    /// Resolve and validate a location against the cursor.
    pub fn resolve(&self, location: &Location) -> Result<Path, MessageTreeError> {
        let path = location.resolve(&self.cursor);
        path.validate()?;
        Ok(path)
    }

    // ---------------------------------------------------------------- messages

    /// Write a message at `location`.
    ///
    /// A text is appended to the node's sequence. A batch must hold only
    /// texts: named entries overwrite that key, indexed entries are appended.
    ///
    /// # Errors
    ///
    /// `PathInvalid`, `InvalidMessage` or `PathConflict`; nothing is written
    /// when any of them is returned.
    pub fn add_message(
        &mut self,
        message: impl Into<Message>,
        location: impl Into<Location>,
    ) -> Result<(), MessageTreeError> {
        let path = self.resolve(&location.into())?;
        let message = message.into();
        check_flat(&message)?;
        write_message(&mut self.root, &path, &message)
    }

    /// Merge a nested structure into the tree starting at `location`.
    ///
    /// Each entry extends the path by its key: nested batches recurse, texts
    /// are written as by [`add_message`](Self::add_message). A bare text is
    /// written at `location` itself.
    ///
    /// # Errors
    ///
    /// `PathInvalid` or `PathConflict`; the tree is unchanged on error.
    pub fn add_messages(
        &mut self,
        messages: impl Into<Message>,
        location: impl Into<Location>,
    ) -> Result<(), MessageTreeError> {
        let path = self.resolve(&location.into())?;
        let messages = messages.into();
        check_keys(&path, &messages)?;
        let mut staged = self.root.clone();
        merge_messages(&mut staged, &path, &messages)?;
        self.root = staged;
        Ok(())
    }

    /// Set the validity flag of the node at `location`, creating it if needed.
    pub fn set_valid(
        &mut self,
        valid: bool,
        location: impl Into<Location>,
    ) -> Result<(), MessageTreeError> {
        let path = self.resolve(&location.into())?;
        trace!(target: "message_tree", path = %path, valid, "set valid");
        self.root.node_mut_or_create(&path)?.set_valid(valid);
        Ok(())
    }

    /// `true` only if the node at `location` exists and is flagged valid.
    ///
    /// # Errors
    ///
    /// `PathInvalid` for a reserved segment. Missing nodes are not an error.
    pub fn is_valid(&self, location: impl Into<Location>) -> Result<bool, MessageTreeError> {
        let path = self.resolve(&location.into())?;
        let valid = if path.is_empty() {
            self.root.valid()
        } else {
            self.root
                .lookup(&path)
                .and_then(Entry::as_node)
                .and_then(Node::valid)
        };
        Ok(valid == Some(true))
    }

    /// Null-safe read of the entry at `path`.
    pub fn get(&self, path: &Path) -> Option<&Entry> {
        self.root.lookup(path)
    }

    /// Remove all messages. The cursor and saved cursors are kept.
    pub fn clear(&mut self) {
        self.root = Node::new();
    }

    /// The root node.
    pub fn messages(&self) -> &Node {
        &self.root
    }

    /// Replace the whole tree.
    pub fn set_messages(&mut self, root: Node) {
        self.root = root;
    }

    /// Export the tree as plain JSON.
    pub fn to_value(&self) -> Value {
        self.root.to_value()
    }

    pub fn into_messages(self) -> Node {
        self.root
    }
}

fn check_flat(message: &Message) -> Result<(), MessageTreeError> {
    let Message::Batch(entries) = message else {
        return Ok(());
    };
    for (key, entry) in entries {
        if !key.is_valid() {
            return Err(MessageTreeError::PathInvalid(Path::from(key.clone())));
        }
        if entry.is_batch() {
            return Err(MessageTreeError::InvalidMessage(format!(
                "entry \"{key}\" is not a string"
            )));
        }
    }
    Ok(())
}

fn check_keys(path: &Path, message: &Message) -> Result<(), MessageTreeError> {
    let Message::Batch(entries) = message else {
        return Ok(());
    };
    for (key, entry) in entries {
        let child = path.child(key.clone());
        child.validate()?;
        check_keys(&child, entry)?;
    }
    Ok(())
}

fn write_message(root: &mut Node, path: &Path, message: &Message) -> Result<(), MessageTreeError> {
    trace!(target: "message_tree", path = %path, "add message");
    let node = root.node_mut_or_create(path)?;
    match message {
        Message::Text(text) => {
            node.push(text.clone());
        }
        Message::Batch(entries) => {
            for (key, entry) in entries {
                let Message::Text(text) = entry else {
                    continue;
                };
                match key.clone().normalize() {
                    key @ Segment::Key(_) => {
                        node.insert(key, Entry::Text(text.clone()));
                    }
                    Segment::Index(_) => {
                        node.push(text.clone());
                    }
                }
            }
        }
    }
    Ok(())
}

fn merge_messages(root: &mut Node, path: &Path, message: &Message) -> Result<(), MessageTreeError> {
    match message {
        Message::Text(_) => write_message(root, path, message),
        Message::Batch(entries) => {
            for (key, entry) in entries {
                merge_messages(root, &path.child(key.clone()), entry)?;
            }
            Ok(())
        }
    }
}
