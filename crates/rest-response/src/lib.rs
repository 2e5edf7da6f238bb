//! REST response envelope built on [`message_tree`].
//!
//! A [`Response`] carries a status code, a validity flag, an optional info
//! payload and a message tree. Status setters such as
//! [`Response::set_not_found`] translate a status intent into tree mutations;
//! serialization of the result is left to the caller.
//!
//! # Example
//!
//! ```
//! use rest_response::Response;
//! use serde_json::json;
//!
//! let mut response = Response::new();
//! response.set_path("user").unwrap();
//! response.set_property_required("email").unwrap();
//!
//! assert_eq!(response.code(), 422);
//! assert_eq!(
//!     response.messages().to_value(),
//!     json!({"user": {"email": ["property required"]}})
//! );
//! ```

pub mod defaults;
pub mod response;
pub mod status;

pub use defaults::ResponseDefaults;
pub use message_tree::{Alias, Location, Message, MessageTree, MessageTreeError, Path};
pub use response::Response;
pub use status::Status;
