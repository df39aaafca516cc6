use axum::extract::Multipart;
use axum::extract::multipart::MultipartError;
use serde_json::{Map, Value};
use std::collections::HashMap;
use thiserror::Error;

use crate::storage::{FileUpload, StorageError, StorageService, StorageState, StoredFile};

/// FieldValue
///
/// One entry of a field map: a scalar value part, a stored file part, or an
/// ordered sequence recovered from indexed keys by `reconstruct_arrays`.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    File(StoredFile),
    Items(Vec<String>),
}

impl FieldValue {
    /// The scalar rendering used when an indexed key is collapsed into a sequence:
    /// text values as-is, files by their retrievable location.
    fn into_scalar(self) -> String {
        match self {
            FieldValue::Text(value) => value,
            FieldValue::File(stored) => stored.public_location().to_string(),
            FieldValue::Items(items) => items.join(","),
        }
    }
}

/// FieldMap
///
/// Flat mapping of field name to value/descriptor — the raw output of consuming a
/// multipart stream. Created empty per request and discarded once the request
/// completes; key order carries no meaning (indexed keys encode order explicitly).
pub type FieldMap = HashMap<String, FieldValue>;

/// IngestError
///
/// Failures of the ingestion pipeline. Stream and storage failures are request
/// fatal (500-class); a malformed indexed key is a client error and is reported
/// against the offending field.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("failed to read multipart stream: {0}")]
    Stream(#[from] MultipartError),
    #[error("failed to store uploaded file: {0}")]
    Storage(#[from] StorageError),
    #[error("field '{key}' does not have a valid numeric array index")]
    BadArrayIndex { key: String },
}

/// collect_fields
///
/// Consumes a multipart stream part-by-part into a FieldMap. File parts (those
/// carrying a filename) are handed to the storage backend and recorded as the
/// returned descriptor; value parts are recorded as text.
///
/// Parts are processed strictly one at a time: the next part is not pulled off the
/// stream until the previous file part has been durably stored, so backpressure
/// from a slow storage write propagates into stream consumption. A field name
/// supplied more than once overwrites the earlier entry (last write wins).
///
/// Files stored before a mid-stream failure stay stored; there is no compensating
/// delete.
pub async fn collect_fields(
    mut multipart: Multipart,
    storage: &StorageState,
    prefix: Option<&str>,
) -> Result<FieldMap, IngestError> {
    let mut fields = FieldMap::new();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        let file_name = field.file_name().map(|s| s.to_string());

        if let Some(file_name) = file_name {
            let mime_type = field
                .content_type()
                .unwrap_or("application/octet-stream")
                .to_string();
            let encoding = field
                .headers()
                .get("content-transfer-encoding")
                .and_then(|v| v.to_str().ok())
                .unwrap_or("7bit")
                .to_string();

            let upload = FileUpload {
                field_name: name.clone(),
                file_name,
                mime_type,
                encoding,
                data: field.bytes().await?,
            };
            let stored = storage.store(upload, prefix).await?;
            fields.insert(name, FieldValue::File(stored));
        } else {
            let value = field.text().await?;
            fields.insert(name, FieldValue::Text(value));
        }
    }

    Ok(fields)
}

/// reconstruct_arrays
///
/// Normalizes a FieldMap by collapsing indexed keys (`tags[0]`, `tags[1]`, ...)
/// into one ordered sequence under the base name, sorted by ascending numeric
/// index. The sort is numeric, not lexicographic: indexes 1, 10, 2 order as
/// 1, 2, 10. Arrival order of the parts is irrelevant.
///
/// Non-indexed keys pass through unchanged, so applying this to an
/// already-normalized map is a no-op. Pure and synchronous.
pub fn reconstruct_arrays(mut fields: FieldMap) -> Result<FieldMap, IngestError> {
    let indexed_keys: Vec<String> = fields
        .keys()
        .filter(|key| looks_indexed(key))
        .cloned()
        .collect();

    let mut groups: HashMap<String, Vec<(usize, String)>> = HashMap::new();

    for key in indexed_keys {
        let (base, index) =
            parse_indexed_key(&key).ok_or_else(|| IngestError::BadArrayIndex { key: key.clone() })?;
        let value = fields
            .remove(&key)
            .map(FieldValue::into_scalar)
            .unwrap_or_default();
        groups.entry(base).or_default().push((index, value));
    }

    for (base, mut items) in groups {
        items.sort_by_key(|(index, _)| *index);
        fields.insert(
            base,
            FieldValue::Items(items.into_iter().map(|(_, value)| value).collect()),
        );
    }

    Ok(fields)
}

/// to_json
///
/// Bridges a (normalized) FieldMap into a JSON object for schema validation and
/// payload deserialization. Files are rendered by their retrievable location.
pub fn to_json(fields: &FieldMap) -> Value {
    let mut object = Map::new();
    for (name, value) in fields {
        let json_value = match value {
            FieldValue::Text(text) => Value::String(text.clone()),
            FieldValue::File(stored) => Value::String(stored.public_location().to_string()),
            FieldValue::Items(items) => Value::Array(
                items
                    .iter()
                    .map(|item| Value::String(item.clone()))
                    .collect(),
            ),
        };
        object.insert(name.clone(), json_value);
    }
    Value::Object(object)
}

/// A key is a reconstruction candidate when it has the `base[...]` shape.
fn looks_indexed(key: &str) -> bool {
    key.ends_with(']') && key.contains('[')
}

/// Splits `base[index]` into its parts. Returns None when the index segment is
/// not a valid non-negative integer or the base is empty.
fn parse_indexed_key(key: &str) -> Option<(String, usize)> {
    let inner = key.strip_suffix(']')?;
    let (base, index) = inner.split_once('[')?;
    if base.is_empty() {
        return None;
    }
    let index = index.parse::<usize>().ok()?;
    Some((base.to_string(), index))
}
