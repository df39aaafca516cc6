use news_portal::error::AppError;
use news_portal::ingest::{FieldMap, FieldValue};
use news_portal::models::{News, UserRecord};
use news_portal::validation::{
    validate_name, validate_news, validate_payload, validate_submission, validate_user,
    LoginPayload,
};
use uuid::Uuid;

// --- Test Utilities ---

fn text_map(pairs: &[(&str, &str)]) -> FieldMap {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), FieldValue::Text(v.to_string())))
        .collect()
}

fn list_entry(map: &mut FieldMap, key: &str, items: &[&str]) {
    map.insert(
        key.to_string(),
        FieldValue::Items(items.iter().map(|s| s.to_string()).collect()),
    );
}

/// Unwraps the Validation variant and asserts the given field carries an error.
fn assert_field_error(result: Result<impl Sized, AppError>, field: &str) {
    match result {
        Err(AppError::Validation(errors)) => {
            assert!(
                errors.field_errors().contains_key(field),
                "expected an error for field '{field}', got {errors:?}"
            );
        }
        Err(other) => panic!("expected a validation error, got {other:?}"),
        Ok(_) => panic!("expected a validation error for field '{field}', got Ok"),
    }
}

// --- News Schema ---

#[test]
fn test_news_schema_accepts_complete_form() {
    let mut fields = text_map(&[
        ("name", "Budget Announced"),
        ("author_name", "Jane Reporter"),
        ("publish_date", "2025-03-01"),
        ("short_description", "The annual budget."),
    ]);
    list_entry(
        &mut fields,
        "tags",
        &[&Uuid::new_v4().to_string(), &Uuid::new_v4().to_string()],
    );

    let payload = validate_news(&fields).unwrap();
    assert_eq!(payload.name.as_deref(), Some("Budget Announced"));
    assert_eq!(payload.tags.unwrap().len(), 2);
}

#[test]
fn test_news_schema_requires_name() {
    let fields = text_map(&[
        ("author_name", "Jane Reporter"),
        ("publish_date", "2025-03-01"),
    ]);

    assert_field_error(validate_news(&fields), "name");
}

#[test]
fn test_news_schema_bounds_name_length() {
    let fields = text_map(&[
        ("name", "ab"),
        ("author_name", "Jane Reporter"),
        ("publish_date", "2025-03-01"),
    ]);

    assert_field_error(validate_news(&fields), "name");
}

#[test]
fn test_news_schema_rejects_non_iso_publish_date() {
    let fields = text_map(&[
        ("name", "Budget Announced"),
        ("author_name", "Jane Reporter"),
        ("publish_date", "01/03/2025"),
    ]);

    assert_field_error(validate_news(&fields), "publish_date");
}

#[test]
fn test_news_schema_accepts_rfc3339_publish_date() {
    let fields = text_map(&[
        ("name", "Budget Announced"),
        ("author_name", "Jane Reporter"),
        ("publish_date", "2025-03-01T09:30:00Z"),
    ]);

    assert!(validate_news(&fields).is_ok());
}

#[test]
fn test_news_schema_rejects_malformed_tag_ids() {
    let mut fields = text_map(&[
        ("name", "Budget Announced"),
        ("author_name", "Jane Reporter"),
        ("publish_date", "2025-03-01"),
    ]);
    list_entry(&mut fields, "tags", &["not-a-uuid"]);

    assert_field_error(validate_news(&fields), "tags");
}

#[test]
fn test_news_schema_tolerates_unknown_fields() {
    let fields = text_map(&[
        ("name", "Budget Announced"),
        ("author_name", "Jane Reporter"),
        ("publish_date", "2025-03-01"),
        ("campaign", "spring"),
    ]);

    assert!(validate_news(&fields).is_ok());
}

// --- User Schema ---

#[test]
fn test_user_schema_create_requires_password_pair() {
    let fields = text_map(&[
        ("name", "New Publisher"),
        ("email", "p@portal.example"),
        ("role", "publisher"),
    ]);

    assert_field_error(validate_user(&fields, false), "password");
}

#[test]
fn test_user_schema_update_allows_missing_password() {
    let fields = text_map(&[
        ("name", "New Publisher"),
        ("email", "p@portal.example"),
        ("role", "publisher"),
    ]);

    assert!(validate_user(&fields, true).is_ok());
}

#[test]
fn test_user_schema_rejects_password_mismatch() {
    let fields = text_map(&[
        ("name", "New Publisher"),
        ("email", "p@portal.example"),
        ("role", "publisher"),
        ("password", "correct-horse-42"),
        ("confirm_password", "wrong-horse-42"),
    ]);

    assert_field_error(validate_user(&fields, false), "confirm_password");
}

#[test]
fn test_user_schema_rejects_invalid_email() {
    let fields = text_map(&[
        ("name", "New Publisher"),
        ("email", "not-an-email"),
        ("role", "publisher"),
        ("password", "correct-horse-42"),
        ("confirm_password", "correct-horse-42"),
    ]);

    assert_field_error(validate_user(&fields, false), "email");
}

#[test]
fn test_user_schema_restricts_role_values() {
    let fields = text_map(&[
        ("name", "New Publisher"),
        ("email", "p@portal.example"),
        ("role", "superuser"),
        ("password", "correct-horse-42"),
        ("confirm_password", "correct-horse-42"),
    ]);

    assert_field_error(validate_user(&fields, false), "role");
}

// --- Name Schema (tags & categories) ---

#[test]
fn test_name_schema_requires_name() {
    assert_field_error(validate_name(&FieldMap::new()), "name");
}

#[test]
fn test_name_schema_accepts_valid_name() {
    let payload = validate_name(&text_map(&[("name", "Politics")])).unwrap();
    assert_eq!(payload.name.as_deref(), Some("Politics"));
}

// --- Login Schema ---

#[test]
fn test_login_schema_requires_well_formed_email() {
    let payload = LoginPayload {
        email: Some("nope".to_string()),
        password: Some("Secret#Pass1".to_string()),
    };

    match validate_payload(&payload) {
        Err(AppError::Validation(errors)) => {
            assert!(errors.field_errors().contains_key("email"));
        }
        other => panic!("expected email validation error, got {other:?}"),
    }
}

// --- Submission Schema ---

#[test]
fn test_submission_schema_accepts_the_contact_form() {
    let fields = text_map(&[
        ("name", "Reader"),
        ("mobile", "0871234567"),
        ("title", "Story tip"),
        ("message", "Something happened."),
    ]);

    assert!(validate_submission(&fields).is_ok());
}

#[test]
fn test_submission_schema_requires_mobile() {
    let fields = text_map(&[
        ("name", "Reader"),
        ("title", "Story tip"),
        ("message", "Something happened."),
    ]);

    assert_field_error(validate_submission(&fields), "mobile");
}

#[test]
fn test_submission_schema_rejects_unknown_fields() {
    let fields = text_map(&[
        ("name", "Reader"),
        ("mobile", "0871234567"),
        ("title", "Story tip"),
        ("message", "Something happened."),
        ("attachment", "virus.exe"),
    ]);

    match validate_submission(&fields) {
        Err(AppError::UnknownField(field)) => assert_eq!(field, "attachment"),
        other => panic!("expected UnknownField, got {other:?}"),
    }
}

#[test]
fn test_submission_schema_bounds_message_length() {
    let long_message = "x".repeat(3001);
    let fields = text_map(&[
        ("name", "Reader"),
        ("mobile", "0871234567"),
        ("title", "Story tip"),
        ("message", &long_message),
    ]);

    assert_field_error(validate_submission(&fields), "message");
}

// --- Model Serialization ---

#[test]
fn test_user_record_public_shape_drops_credentials() {
    let record = UserRecord {
        id: Uuid::new_v4(),
        name: "Test".to_string(),
        email: "t@portal.example".to_string(),
        role: "admin".to_string(),
        password_hash: "$argon2id$fake".to_string(),
        image: None,
        mobile: None,
        created_at: Default::default(),
        updated_at: Default::default(),
    };

    let json = serde_json::to_string(&record.into_public()).unwrap();
    assert!(!json.contains("password"));
    assert!(json.contains("t@portal.example"));
}

#[test]
fn test_news_serializes_tags_as_array() {
    let news = News {
        tags: vec![Uuid::new_v4(), Uuid::new_v4()],
        ..Default::default()
    };

    let value = serde_json::to_value(&news).unwrap();
    assert_eq!(value["tags"].as_array().unwrap().len(), 2);
}
