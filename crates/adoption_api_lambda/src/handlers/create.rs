use adoption_api_core::error::HandlerError;
use adoption_api_core::record::{CollectionSchema, Record};
use adoption_api_core::response::{
    created_response, error_response, AllowedMethods, ApiGatewayResponse,
};
use adoption_api_core::stamp::RecordStamp;
use adoption_api_core::store::RecordStore;
use adoption_api_core::validation::{parse_request_body, validate_fields};
use serde_json::Value;

/// Handles one create invocation end to end.
///
/// Never fails: parse, validation and store errors all become envelopes
/// carrying the create endpoint's cross-origin headers.
pub fn handle_create_event(
    event: Value,
    schema: &CollectionSchema,
    table: &str,
    store: &impl RecordStore,
    stamp: RecordStamp,
) -> ApiGatewayResponse {
    match create_record(&event, schema, table, store, stamp) {
        Ok(record) => {
            tracing::info!(
                collection = schema.kind.as_str(),
                table,
                record_id = %stamp.id,
                "record created"
            );
            created_response(schema, &record)
        }
        Err(error) => {
            let response = error_response(AllowedMethods::Create, &error);
            if error.is_client_error() {
                tracing::warn!(
                    collection = schema.kind.as_str(),
                    status_code = response.status_code,
                    error = %error,
                    "create rejected"
                );
            } else {
                tracing::error!(
                    collection = schema.kind.as_str(),
                    table,
                    status_code = response.status_code,
                    error = %error,
                    "create failed"
                );
            }
            response
        }
    }
}

fn create_record(
    event: &Value,
    schema: &CollectionSchema,
    table: &str,
    store: &impl RecordStore,
    stamp: RecordStamp,
) -> Result<Record, HandlerError> {
    let payload = parse_request_body(event)?;
    let fields = validate_fields(payload, schema)?;
    let record = stamp.apply(schema, fields);
    store.put_record(table, &record)?;
    Ok(record)
}
