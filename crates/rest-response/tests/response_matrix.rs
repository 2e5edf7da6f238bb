use rest_response::{Alias, Location, Message, Response, ResponseDefaults, Status};
use serde_json::json;

#[test]
fn test_failure_setters_matrix() {
    type Setter = for<'a> fn(&'a mut Response, Option<&str>) -> &'a mut Response;
    let cases: [(Setter, u16, &str); 4] = [
        (Response::set_not_found, 404, "resource not found"),
        (Response::set_bad_request, 400, "bad request"),
        (Response::set_forbidden, 403, "access denied"),
        (Response::set_internal_server_error, 500, "internal server error"),
    ];

    for (setter, code, default) in cases {
        let mut response = Response::new();
        response.add_message("stale", "field").unwrap();
        setter(&mut response, None);
        assert_eq!(response.code(), code);
        assert!(!response.is_valid());
        assert_eq!(response.messages().to_value(), json!([default]));

        setter(&mut response, Some("custom"));
        assert_eq!(response.messages().to_value(), json!(["custom"]));
    }
}

#[test]
fn test_property_required_is_relative_to_cursor() {
    let mut response = Response::new();
    response.set_path("user/address").unwrap();
    response.set_property_required("city").unwrap();
    response.set_property_required("zip").unwrap();

    assert_eq!(response.code(), 422);
    assert!(!response.is_valid());
    assert_eq!(
        response.messages().to_value(),
        json!({"user": {"address": {"city": ["property required"], "zip": ["property required"]}}})
    );
}

#[test]
fn test_property_required_rejects_reserved_segment() {
    let mut response = Response::new();
    assert!(response.set_property_required("isValid").is_err());
    assert_eq!(response.code(), 200);
    assert!(response.is_valid());
}

#[test]
fn test_set_created_stores_id() {
    let mut response = Response::new();
    response.set_created(Some(json!(42)));
    assert_eq!(response.code(), 201);
    assert_eq!(response.info(), Some(&json!({"id": 42})));

    let mut response = Response::new();
    response.set_created(None);
    assert_eq!(response.code(), 201);
    assert_eq!(response.info(), None);

    let mut response = Response::new();
    response.set_created(Some(json!(0)));
    assert_eq!(response.info(), None);
}

#[test]
fn test_set_status_dispatch() {
    let mut response = Response::new();
    response
        .set_status(404, Some(Message::from("no user")), Location::Cursor)
        .unwrap();
    assert_eq!(response.code(), 404);
    assert_eq!(response.messages().to_value(), json!(["no user"]));

    response.set_status(200, None, Location::Cursor).unwrap();
    assert_eq!(response.code(), 200);
    assert!(response.is_valid());

    response
        .set_status(201, Some(Message::from("abc")), Location::Cursor)
        .unwrap();
    assert_eq!(response.info(), Some(&json!({"id": "abc"})));

    response.set_status(500, None, Location::Cursor).unwrap();
    assert_eq!(response.code(), 500);
    assert_eq!(response.messages().to_value(), json!(["internal server error"]));
}

#[test]
fn test_set_status_bad_request_only_changes_code() {
    let mut response = Response::new();
    response.add_message("kept", "a").unwrap();
    response
        .set_status(400, Some(Message::from("x")), Location::Cursor)
        .unwrap();
    assert_eq!(response.code(), 400);
    assert_eq!(response.status(), Some(Status::BadRequest));
    assert!(response.is_valid());
    assert_eq!(response.messages().to_value(), json!({"a": ["kept"]}));
}

#[test]
fn test_set_status_unprocessable_flags_cursor_node() {
    let mut response = Response::new();
    response.set_path("form").unwrap();
    response
        .set_status(422, Some(Message::from("too short")), Location::relative("name"))
        .unwrap();
    assert_eq!(response.code(), 422);
    assert!(!response.is_valid());
    assert!(!response.messages().is_valid(Location::Cursor).unwrap());
    assert_eq!(
        response.messages().to_value(),
        json!({"form": {"name": ["too short"], "isValid": false}})
    );
}

#[test]
fn test_set_status_unprocessable_skips_empty_message() {
    let mut response = Response::new();
    response.set_path("form").unwrap();
    response
        .set_status(422, Some(Message::from("")), Location::relative("name"))
        .unwrap();
    assert_eq!(response.code(), 422);
    assert_eq!(response.messages().to_value(), json!({"form": {"isValid": false}}));
}

#[test]
fn test_set_status_unknown_code_only_changes_code() {
    let mut response = Response::new();
    response.add_message("kept", "a").unwrap();
    response
        .set_status(418, Some(Message::from("ignored")), Location::Cursor)
        .unwrap();
    assert_eq!(response.code(), 418);
    assert_eq!(response.status(), None);
    assert!(response.is_valid());
    assert_eq!(response.messages().to_value(), json!({"a": ["kept"]}));
}

#[test]
fn test_set_not_valid_with_and_without_message() {
    let mut response = Response::new();
    response.set_not_valid(None, Location::Cursor).unwrap();
    assert_eq!(response.code(), Status::UnprocessableEntity.code());
    assert!(response.messages().messages().is_empty());

    response
        .set_not_valid(Some(Message::from("")), Location::Cursor)
        .unwrap();
    assert!(response.messages().messages().is_empty());

    let batch = Message::try_from(json!({"email": "taken"})).unwrap();
    response.set_not_valid(Some(batch), "account").unwrap();
    assert_eq!(
        response.messages().to_value(),
        json!({"account": {"email": "taken"}})
    );
}

#[test]
fn test_reset_restores_defaults_but_keeps_cursor() {
    let mut response = Response::new();
    response.set_path("user").unwrap();
    response.save_path("user");
    response.set_created(Some(json!(1)));
    response.set_not_found(None);

    response.reset();
    assert_eq!(response.code(), 200);
    assert!(response.is_valid());
    assert_eq!(response.info(), None);
    assert!(response.messages().messages().is_empty());
    assert_eq!(response.path(), "user");
    assert_eq!(response.saved_path(&Alias::from("user")), "user");
}

#[test]
fn test_forwarders_share_the_cursor() {
    let mut response = Response::new();
    response.set_path("a").unwrap();
    response.append_path("b").unwrap();
    response.add_message("x", Location::Cursor).unwrap();
    let nested = Message::try_from(json!({"c": "y"})).unwrap();
    response.add_messages(nested, Location::Cursor).unwrap();
    assert_eq!(response.path(), "a/b");
    assert_eq!(
        response.messages().to_value(),
        json!({"a": {"b": {"0": "x", "c": ["y"]}}})
    );

    response.messages_mut().pop_cursor();
    assert_eq!(response.path(), "a");
}

#[test]
fn test_defaults_from_toml() {
    let defaults: ResponseDefaults = toml::from_str(
        r#"
        not_found = "nie znaleziono"
        property_required = "field is mandatory"
        "#,
    )
    .unwrap();
    assert_eq!(defaults.bad_request, "bad request");

    let mut response = Response::with_defaults(defaults);
    response.set_not_found(None);
    assert_eq!(response.messages().to_value(), json!(["nie znaleziono"]));

    response.reset();
    response.set_property_required("name").unwrap();
    assert_eq!(
        response.messages().to_value(),
        json!({"name": ["field is mandatory"]})
    );
}

#[test]
fn test_set_info_and_flags() {
    let mut response = Response::new();
    response
        .set_info(json!({"total": 3}))
        .set_code(206)
        .set_is_valid(false);
    assert_eq!(response.info(), Some(&json!({"total": 3})));
    assert_eq!(response.code(), 206);
    assert!(!response.is_valid());
}
