//! Cursor bookmarks.

use std::fmt;

use crate::path::Path;

/// Name of a saved cursor.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Alias {
    Name(String),
    Id(i64),
}

impl From<&str> for Alias {
    fn from(name: &str) -> Self {
        Alias::Name(name.to_string())
    }
}

impl From<String> for Alias {
    fn from(name: String) -> Self {
        Alias::Name(name)
    }
}

impl From<i64> for Alias {
    fn from(id: i64) -> Self {
        Alias::Id(id)
    }
}

impl fmt::Display for Alias {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Alias::Name(name) => f.write_str(name),
            Alias::Id(id) => write!(f, "{id}"),
        }
    }
}

/// What a saved alias points at. Alias references are followed when the
/// cursor is restored, not when they are saved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SavedCursor {
    Path(Path),
    Alias(Alias),
}

/// Argument of [`MessageTree::set_cursor`](crate::MessageTree::set_cursor).
///
/// Text converts to an alias; build a [`Path`] explicitly to move the cursor
/// to a literal location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CursorTarget {
    Path(Path),
    Alias(Alias),
}

impl From<Path> for CursorTarget {
    fn from(path: Path) -> Self {
        CursorTarget::Path(path)
    }
}

impl From<&Path> for CursorTarget {
    fn from(path: &Path) -> Self {
        CursorTarget::Path(path.clone())
    }
}

impl From<Alias> for CursorTarget {
    fn from(alias: Alias) -> Self {
        CursorTarget::Alias(alias)
    }
}

impl From<&str> for CursorTarget {
    fn from(name: &str) -> Self {
        CursorTarget::Alias(Alias::from(name))
    }
}

impl From<String> for CursorTarget {
    fn from(name: String) -> Self {
        CursorTarget::Alias(Alias::from(name))
    }
}

impl From<i64> for CursorTarget {
    fn from(id: i64) -> Self {
        CursorTarget::Alias(Alias::Id(id))
    }
}
