use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::HandlerError;
use crate::record::{CollectionSchema, Record};

pub const ALLOWED_HEADERS: &str =
    "Content-Type,X-Amz-Date,Authorization,X-Api-Key,X-Amz-Security-Token";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiGatewayResponse {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub headers: BTreeMap<String, String>,
    pub body: String,
}

impl ApiGatewayResponse {
    /// Parses the serialized body back into JSON; used by callers and tests
    /// that inspect responses.
    pub fn body_json(&self) -> Result<Value, serde_json::Error> {
        serde_json::from_str(&self.body)
    }
}

/// Methods advertised in the cross-origin headers of an endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AllowedMethods {
    Read,
    Create,
}

impl AllowedMethods {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Read => "GET,HEAD,OPTIONS",
            Self::Create => "POST,OPTIONS",
        }
    }
}

pub fn cors_headers(methods: AllowedMethods) -> BTreeMap<String, String> {
    BTreeMap::from([
        ("Content-Type".to_string(), "application/json".to_string()),
        ("Access-Control-Allow-Origin".to_string(), "*".to_string()),
        (
            "Access-Control-Allow-Headers".to_string(),
            ALLOWED_HEADERS.to_string(),
        ),
        (
            "Access-Control-Allow-Methods".to_string(),
            methods.as_str().to_string(),
        ),
    ])
}

pub fn created_response(schema: &CollectionSchema, record: &Record) -> ApiGatewayResponse {
    let mut body = serde_json::Map::new();
    body.insert("message".to_string(), Value::from(schema.created_message));
    body.insert(schema.item_key.to_string(), Value::Object(record.clone()));
    envelope(201, AllowedMethods::Create, Value::Object(body))
}

pub fn listed_response(schema: &CollectionSchema, items: Vec<Record>) -> ApiGatewayResponse {
    let count = items.len();
    let mut body = serde_json::Map::new();
    body.insert("message".to_string(), Value::from(schema.listed_message()));
    body.insert(
        schema.list_key.to_string(),
        Value::Array(items.into_iter().map(Value::Object).collect()),
    );
    body.insert("count".to_string(), Value::from(count));
    envelope(200, AllowedMethods::Read, Value::Object(body))
}

pub fn error_response(methods: AllowedMethods, error: &HandlerError) -> ApiGatewayResponse {
    let body = match error {
        HandlerError::MalformedInput(detail) => json!({
            "message": "Invalid JSON in request body",
            "error": detail,
        }),
        HandlerError::Validation { missing } => json!({
            "message": "Bad request - missing required fields",
            "missing_fields": missing,
        }),
        HandlerError::Store { .. } | HandlerError::Unexpected(_) => json!({
            "message": "Internal server error",
            "error": error.to_string(),
        }),
    };
    envelope(error.status_code(), methods, body)
}

fn envelope(status_code: u16, methods: AllowedMethods, body: Value) -> ApiGatewayResponse {
    ApiGatewayResponse {
        status_code,
        headers: cors_headers(methods),
        body: body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use crate::record::{APPLICATIONS, PETS};

    use super::*;

    fn record(value: Value) -> Record {
        match value {
            Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    #[test]
    fn created_response_wraps_record_under_item_key() {
        let response = created_response(
            &APPLICATIONS,
            &record(json!({"applicationId": "abc", "status": "pending"})),
        );

        assert_eq!(response.status_code, 201);
        assert_eq!(
            response.headers.get("Access-Control-Allow-Methods"),
            Some(&"POST,OPTIONS".to_string())
        );
        let body = response.body_json().expect("body should parse");
        assert_eq!(body["message"], "Application submitted successfully");
        assert_eq!(body["application"]["applicationId"], "abc");
    }

    #[test]
    fn listed_response_carries_items_and_count() {
        let response = listed_response(
            &PETS,
            vec![record(json!({"id": "1"})), record(json!({"id": "2"}))],
        );

        assert_eq!(response.status_code, 200);
        assert_eq!(
            response.headers.get("Access-Control-Allow-Methods"),
            Some(&"GET,HEAD,OPTIONS".to_string())
        );
        let body = response.body_json().expect("body should parse");
        assert_eq!(body["message"], "Successfully got pets");
        assert_eq!(body["count"], 2);
        assert_eq!(body["pets"].as_array().map(Vec::len), Some(2));
    }

    #[test]
    fn every_response_allows_any_origin() {
        let error = HandlerError::Unexpected("boom".to_string());
        for response in [
            error_response(AllowedMethods::Read, &error),
            error_response(AllowedMethods::Create, &error),
            listed_response(&PETS, Vec::new()),
        ] {
            assert_eq!(
                response.headers.get("Access-Control-Allow-Origin"),
                Some(&"*".to_string())
            );
        }
    }

    #[test]
    fn validation_error_lists_missing_fields() {
        let response = error_response(
            AllowedMethods::Create,
            &HandlerError::Validation {
                missing: vec!["email".to_string(), "phone".to_string()],
            },
        );

        assert_eq!(response.status_code, 400);
        let body = response.body_json().expect("body should parse");
        assert_eq!(body["message"], "Bad request - missing required fields");
        assert_eq!(body["missing_fields"], json!(["email", "phone"]));
    }

    #[test]
    fn store_error_body_quotes_code_and_message() {
        let response = error_response(
            AllowedMethods::Read,
            &HandlerError::Store {
                code: "ResourceNotFoundException".to_string(),
                message: "Requested resource not found".to_string(),
            },
        );

        assert_eq!(response.status_code, 500);
        let body = response.body_json().expect("body should parse");
        assert_eq!(body["message"], "Internal server error");
        assert_eq!(
            body["error"],
            "ResourceNotFoundException: Requested resource not found"
        );
    }

    #[test]
    fn serializes_with_api_gateway_field_names() {
        let response = listed_response(&PETS, Vec::new());
        let wire = serde_json::to_value(&response).expect("response should serialize");
        assert_eq!(wire["statusCode"], 200);
        assert!(wire["body"].is_string());
    }
}
