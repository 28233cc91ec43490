use serde_json::{Map, Value};

use crate::error::HandlerError;
use crate::record::{CollectionSchema, Record};

/// Extracts the JSON object carried by an API-gateway style event.
///
/// A missing or null `body` is treated as an empty object so that the
/// validator reports every required field. Direct invocations may pass the
/// body as an already-parsed object.
pub fn parse_request_body(event: &Value) -> Result<Map<String, Value>, HandlerError> {
    let Some(object) = event.as_object() else {
        return Err(HandlerError::MalformedInput(
            "Request event must be a JSON object".to_string(),
        ));
    };

    let body = match object.get("body") {
        None | Some(Value::Null) => return Ok(Map::new()),
        Some(Value::String(text)) => serde_json::from_str::<Value>(text)
            .map_err(|error| HandlerError::MalformedInput(error.to_string()))?,
        Some(other) => other.clone(),
    };

    match body {
        Value::Object(map) => Ok(map),
        _ => Err(HandlerError::MalformedInput(
            "Request body must be a JSON object".to_string(),
        )),
    }
}

/// Names of required fields that are absent or null, in declaration order.
pub fn missing_fields(payload: &Map<String, Value>, schema: &CollectionSchema) -> Vec<String> {
    schema
        .required_fields
        .iter()
        .filter(|field| !matches!(payload.get(**field), Some(value) if !value.is_null()))
        .map(|field| (*field).to_string())
        .collect()
}

/// Checks required fields and projects the payload onto the schema.
///
/// Derived fields (identifier, timestamp, status) are never taken from the
/// caller; they are added later by [`crate::stamp::RecordStamp::apply`].
pub fn validate_fields(
    payload: Map<String, Value>,
    schema: &CollectionSchema,
) -> Result<Record, HandlerError> {
    let missing = missing_fields(&payload, schema);
    if !missing.is_empty() {
        return Err(HandlerError::Validation { missing });
    }

    if schema.retain_unknown_fields {
        return Ok(payload
            .into_iter()
            .filter(|(name, _)| !schema.is_derived(name))
            .collect());
    }

    let mut payload = payload;
    let mut record = Record::new();
    for field in schema.required_fields {
        if let Some(value) = payload.remove(*field) {
            record.insert((*field).to_string(), value);
        }
    }

    for field in schema.optional_fields {
        match payload.remove(field.name) {
            Some(value) if !value.is_null() => {
                record.insert(field.name.to_string(), value);
            }
            _ => {
                if let Some(default) = field.default {
                    record.insert(field.name.to_string(), Value::from(default));
                }
            }
        }
    }

    Ok(record)
}
