//! Process bootstrap shared by every deployed function.

use adoption_api_core::record::CollectionKind;
use adoption_api_core::response::ApiGatewayResponse;
use adoption_api_core::stamp::RecordStamp;
use adoption_api_core::store::RecordStore;
use lambda_runtime::{service_fn, Error, LambdaEvent};
use serde_json::Value;
use tracing_subscriber::EnvFilter;

use crate::adapters::dynamodb::DynamoRecordStore;
use crate::config::RuntimeConfig;
use crate::handlers::create::handle_create_event;
use crate::handlers::list::handle_list_event;

/// The operation a deployed function performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Create(CollectionKind),
    List(CollectionKind),
}

impl Endpoint {
    pub fn collection(self) -> CollectionKind {
        match self {
            Self::Create(kind) | Self::List(kind) => kind,
        }
    }
}

/// Routes one event to its handler. Every outcome is an envelope.
pub fn dispatch(
    endpoint: Endpoint,
    event: Value,
    table: &str,
    store: &impl RecordStore,
) -> ApiGatewayResponse {
    let schema = endpoint.collection().schema();
    match endpoint {
        Endpoint::Create(_) => {
            handle_create_event(event, schema, table, store, RecordStamp::fresh())
        }
        Endpoint::List(_) => handle_list_event(schema, table, store),
    }
}

pub fn init_tracing() {
    tracing_subscriber::fmt()
        .json()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_current_span(false)
        .with_target(false)
        .without_time()
        .init();
}

/// Initialises logging, configuration and the shared DynamoDB client once,
/// then serves invocations until the process is torn down.
pub async fn serve(endpoint: Endpoint) -> Result<(), Error> {
    init_tracing();

    let config = RuntimeConfig::from_env();
    let table = config.table_for(endpoint.collection()).to_string();
    let store = DynamoRecordStore::from_config(&config).await;
    tracing::info!(
        ?endpoint,
        table = %table,
        region = %config.region,
        endpoint_url = config.endpoint_url.as_deref(),
        "adoption api function starting"
    );

    lambda_runtime::run(service_fn(|event: LambdaEvent<Value>| {
        handle_request(event, endpoint, &table, &store)
    }))
    .await
}

async fn handle_request(
    event: LambdaEvent<Value>,
    endpoint: Endpoint,
    table: &str,
    store: &DynamoRecordStore,
) -> Result<ApiGatewayResponse, Error> {
    let (payload, context) = event.into_parts();
    let response = dispatch(endpoint, payload, table, store);
    tracing::info!(
        request_id = %context.request_id,
        status_code = response.status_code,
        "invocation completed"
    );
    Ok(response)
}
