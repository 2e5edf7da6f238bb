//! Path-addressable message tree.
//!
//! Builds hierarchical response payloads (messages plus per-node validity
//! flags) addressed by slash-delimited paths such as `"user/address/city"`.
//! A cursor marks the default write location; it can be moved absolutely,
//! relative to itself, or restored from a saved alias.
//!
//! # Example
//!
//! ```
//! use message_tree::{Location, MessageTree};
//! use serde_json::json;
//!
//! let mut tree = MessageTree::new();
//! tree.add_message("hello", "a/b").unwrap();
//!
//! tree.save_cursor("top");
//! tree.append_path("a").unwrap();
//! tree.add_message("next to b", Location::relative("c")).unwrap();
//! tree.set_cursor("top").unwrap();
//!
//! assert_eq!(tree.path(), "");
//! assert_eq!(tree.to_value(), json!({"a": {"b": ["hello"], "c": ["next to b"]}}));
//! ```

pub mod alias;
pub mod error;
pub mod message;
pub mod node;
pub mod path;
pub mod tree;

pub use alias::{Alias, CursorTarget, SavedCursor};
pub use error::MessageTreeError;
pub use message::Message;
pub use node::{Entry, Node};
pub use path::{is_index_key, Location, Path, Segment, RESERVED_SEGMENT};
pub use tree::MessageTree;
