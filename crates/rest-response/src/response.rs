//! The response envelope.

use message_tree::{Alias, Location, Message, MessageTree, MessageTreeError, Node, Path};
use serde_json::{json, Value};
use tracing::debug;

use crate::defaults::ResponseDefaults;
use crate::status::Status;

/// A status code, a validity flag, an optional info payload and a
/// [`MessageTree`].
///
/// The named setters translate a status intent into tree mutations: the
/// failure setters replace the whole tree with a single root message.
///
/// # Example
///
/// ```
/// use rest_response::{Response, Status};
/// use serde_json::json;
///
/// let mut response = Response::new();
/// response.set_not_found(None);
///
/// assert_eq!(response.code(), Status::NotFound.code());
/// assert!(!response.is_valid());
/// assert_eq!(response.messages().to_value(), json!(["resource not found"]));
/// ```
#[derive(Debug, Clone)]
pub struct Response {
    messages: MessageTree,
    code: u16,
    is_valid: bool,
    info: Option<Value>,
    defaults: ResponseDefaults,
}

impl Default for Response {
    fn default() -> Self {
        Self::with_defaults(ResponseDefaults::default())
    }
}

impl Response {
    pub fn new() -> Self {
        Self::default()
    }

    /// A response whose failure setters fall back to `defaults`.
    pub fn with_defaults(defaults: ResponseDefaults) -> Self {
        Self {
            messages: MessageTree::new(),
            code: Status::Ok.code(),
            is_valid: true,
            info: None,
            defaults,
        }
    }

    // ----------------------------------------------------------------- status

    pub fn set_not_found(&mut self, message: Option<&str>) -> &mut Self {
        self.fail(Status::NotFound, message)
    }

    pub fn set_bad_request(&mut self, message: Option<&str>) -> &mut Self {
        self.fail(Status::BadRequest, message)
    }

    pub fn set_forbidden(&mut self, message: Option<&str>) -> &mut Self {
        self.fail(Status::Forbidden, message)
    }

    pub fn set_internal_server_error(&mut self, message: Option<&str>) -> &mut Self {
        self.fail(Status::InternalServerError, message)
    }

    /// Replace the tree with `message`, or the default text for `status`
    /// when it is missing or empty.
    fn fail(&mut self, status: Status, message: Option<&str>) -> &mut Self {
        let text = match message {
            Some(text) if !text.is_empty() => text.to_string(),
            _ => self.defaults.failure_text(status).to_string(),
        };
        debug!(target: "rest_response", code = status.code(), message = %text, "failure status");
        let mut root = Node::new();
        root.push(text);
        self.messages.set_messages(root);
        self.is_valid = false;
        self.code = status.code();
        self
    }

    /// Same as the failure setters, but a batch message replaces the tree
    /// instead of a single text.
    fn fail_with(
        &mut self,
        status: Status,
        message: Option<Message>,
    ) -> Result<(), MessageTreeError> {
        match message {
            Some(batch @ Message::Batch(_)) if !batch.is_empty() => {
                let mut staged = self.messages.clone();
                staged.clear();
                staged.add_message(batch, Location::Absolute(Path::root()))?;
                self.messages = staged;
                self.is_valid = false;
                self.code = status.code();
            }
            other => {
                self.fail(status, other.as_ref().and_then(Message::as_text));
            }
        }
        Ok(())
    }

    /// Flag a missing property: 422 with the required-property text written
    /// at `property`, relative to the cursor.
    ///
    /// # Errors
    ///
    /// Whatever the tree reports for the resulting path; nothing changes on
    /// error.
    pub fn set_property_required(&mut self, property: &str) -> Result<(), MessageTreeError> {
        let text = self.defaults.property_required.clone();
        self.messages.add_message(text, Location::relative(property))?;
        debug!(target: "rest_response", property, "property required");
        self.is_valid = false;
        self.code = Status::UnprocessableEntity.code();
        Ok(())
    }

    /// 422, optionally with a message at `location`. An empty message is not
    /// written.
    pub fn set_not_valid(
        &mut self,
        message: Option<Message>,
        location: impl Into<Location>,
    ) -> Result<(), MessageTreeError> {
        if let Some(message) = message.filter(|message| !message.is_empty()) {
            self.messages.add_message(message, location)?;
        }
        self.is_valid = false;
        self.code = Status::UnprocessableEntity.code();
        Ok(())
    }

    /// 201, storing `{"id": id}` as info when a non-blank id is given.
    ///
    /// Blank ids are `null`, `false`, zero, `""`, `"0"` and empty arrays or
    /// objects; they leave the info untouched.
    pub fn set_created(&mut self, id: Option<Value>) -> &mut Self {
        self.code = Status::Created.code();
        if let Some(id) = id.filter(|id| !is_blank_id(id)) {
            self.info = Some(json!({ "id": id }));
        }
        self
    }

    /// Dispatch `code` to the matching setter, then apply `code` itself.
    ///
    /// Dispatched codes are 200, 201, 403, 404, 422 and 500; every other code,
    /// 400 included, only changes the code. For 201 the message is used as the
    /// created id. For 422 the cursor node is flagged invalid and a non-empty
    /// message is written at `location`. For the failure codes the message
    /// replaces the tree.
    pub fn set_status(
        &mut self,
        code: u16,
        message: Option<Message>,
        location: impl Into<Location>,
    ) -> Result<(), MessageTreeError> {
        debug!(target: "rest_response", code, "set status");
        match Status::from_code(code) {
            Some(Status::Created) => {
                self.set_created(message.as_ref().map(Message::to_value));
            }
            Some(Status::UnprocessableEntity) => {
                let mut staged = self.messages.clone();
                staged.set_valid(false, Location::Cursor)?;
                if let Some(message) = message.filter(|message| !message.is_empty()) {
                    staged.add_message(message, location)?;
                }
                self.messages = staged;
                self.is_valid = false;
            }
            Some(Status::Ok) => {
                self.is_valid = true;
            }
            Some(status @ (Status::NotFound | Status::Forbidden | Status::InternalServerError)) => {
                self.fail_with(status, message)?;
            }
            Some(Status::BadRequest) | None => {}
        }
        self.code = code;
        Ok(())
    }

    /// Back to 200, valid, no info and no messages. Cursor and saved paths
    /// are kept.
    pub fn reset(&mut self) -> &mut Self {
        self.messages.clear();
        self.code = Status::Ok.code();
        self.is_valid = true;
        self.info = None;
        self
    }

    // -------------------------------------------------------------- accessors

    pub fn code(&self) -> u16 {
        self.code
    }

    pub fn status(&self) -> Option<Status> {
        Status::from_code(self.code)
    }

    pub fn set_code(&mut self, code: u16) -> &mut Self {
        self.code = code;
        self
    }

    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    pub fn set_is_valid(&mut self, is_valid: bool) -> &mut Self {
        self.is_valid = is_valid;
        self
    }

    pub fn info(&self) -> Option<&Value> {
        self.info.as_ref()
    }

    pub fn set_info(&mut self, info: Value) -> &mut Self {
        self.info = Some(info);
        self
    }

    pub fn messages(&self) -> &MessageTree {
        &self.messages
    }

    pub fn messages_mut(&mut self) -> &mut MessageTree {
        &mut self.messages
    }

    // ------------------------------------------------------------- forwarders

    pub fn add_message(
        &mut self,
        message: impl Into<Message>,
        location: impl Into<Location>,
    ) -> Result<(), MessageTreeError> {
        self.messages.add_message(message, location)
    }

    pub fn add_messages(
        &mut self,
        messages: impl Into<Message>,
        location: impl Into<Location>,
    ) -> Result<(), MessageTreeError> {
        self.messages.add_messages(messages, location)
    }

    pub fn append_path(&mut self, path: impl Into<Path>) -> Result<(), MessageTreeError> {
        self.messages.append_path(path)
    }

    pub fn set_path(&mut self, path: impl Into<Path>) -> Result<(), MessageTreeError> {
        self.messages.set_path(path)
    }

    pub fn path(&self) -> String {
        self.messages.path()
    }

    pub fn saved_path(&self, alias: &Alias) -> String {
        self.messages.saved_path(alias)
    }

    /// Save the current cursor under `alias`.
    pub fn save_path(&mut self, alias: impl Into<Alias>) -> &mut Self {
        self.messages.save_cursor(alias);
        self
    }
}

fn is_blank_id(id: &Value) -> bool {
    match id {
        Value::Null => true,
        Value::Bool(flag) => !flag,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty() || s == "0",
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
    }
}
