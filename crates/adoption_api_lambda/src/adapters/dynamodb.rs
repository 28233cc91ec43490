use std::collections::{BTreeMap, HashMap};

use adoption_api_core::record::Record;
use adoption_api_core::store::{RecordStore, ScanPage, StoreError};
use aws_sdk_dynamodb::config::Region;
use aws_sdk_dynamodb::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_sdk_dynamodb::types::AttributeValue;
use serde_json::{Number, Value};

use crate::config::RuntimeConfig;

pub type Item = HashMap<String, AttributeValue>;

/// DynamoDB-backed [`RecordStore`].
///
/// The client is cheap to clone and is shared by every invocation served by
/// the process. Calls block the current worker thread on the multi-threaded
/// runtime, so handlers stay synchronous.
#[derive(Debug, Clone)]
pub struct DynamoRecordStore {
    client: aws_sdk_dynamodb::Client,
}

impl DynamoRecordStore {
    pub fn new(client: aws_sdk_dynamodb::Client) -> Self {
        Self { client }
    }

    pub async fn from_config(config: &RuntimeConfig) -> Self {
        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(Region::new(config.region.clone()));
        if let Some(endpoint_url) = &config.endpoint_url {
            loader = loader.endpoint_url(endpoint_url.clone());
        }
        let sdk_config = loader.load().await;
        Self::new(aws_sdk_dynamodb::Client::new(&sdk_config))
    }
}

impl RecordStore for DynamoRecordStore {
    type Cursor = Item;

    fn put_record(&self, collection: &str, record: &Record) -> Result<(), StoreError> {
        let client = self.client.clone();
        let table_name = collection.to_string();
        let item = record_to_item(record);

        tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(async move {
                client
                    .put_item()
                    .table_name(table_name)
                    .set_item(Some(item))
                    .send()
                    .await
                    .map(|_| ())
                    .map_err(store_error)
            })
        })
    }

    fn scan_page(
        &self,
        collection: &str,
        cursor: Option<Item>,
    ) -> Result<ScanPage<Item>, StoreError> {
        let client = self.client.clone();
        let table_name = collection.to_string();

        let output = tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(async move {
                client
                    .scan()
                    .table_name(table_name)
                    .set_exclusive_start_key(cursor)
                    .send()
                    .await
                    .map_err(store_error)
            })
        })?;

        let items = output
            .items
            .unwrap_or_default()
            .into_iter()
            .map(item_to_record)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(ScanPage {
            items,
            next: output.last_evaluated_key.filter(|key| !key.is_empty()),
        })
    }
}

fn store_error<E, R>(error: SdkError<E, R>) -> StoreError
where
    E: ProvideErrorMetadata + std::error::Error + 'static,
    R: std::fmt::Debug,
{
    let service = error
        .as_service_error()
        .map(|service| (service.code(), service.message()));
    match service {
        Some((Some(code), message)) => {
            StoreError::service(code, message.unwrap_or_default())
        }
        _ => StoreError::Unexpected(DisplayErrorContext(&error).to_string()),
    }
}

pub fn record_to_item(record: &Record) -> Item {
    record
        .iter()
        .map(|(name, value)| (name.clone(), value_to_attribute(value)))
        .collect()
}

/// Numbers are written as their exact decimal text, never through `f64`.
pub fn value_to_attribute(value: &Value) -> AttributeValue {
    match value {
        Value::Null => AttributeValue::Null(true),
        Value::Bool(flag) => AttributeValue::Bool(*flag),
        Value::Number(number) => AttributeValue::N(number.to_string()),
        Value::String(text) => AttributeValue::S(text.clone()),
        Value::Array(values) => AttributeValue::L(values.iter().map(value_to_attribute).collect()),
        Value::Object(map) => AttributeValue::M(record_to_item(map)),
    }
}

/// Converts a scanned item, ordering fields by name for stable output.
pub fn item_to_record(item: Item) -> Result<Record, StoreError> {
    item.into_iter()
        .collect::<BTreeMap<_, _>>()
        .into_iter()
        .map(|(name, attribute)| attribute_to_value(attribute).map(|value| (name, value)))
        .collect()
}

pub fn attribute_to_value(attribute: AttributeValue) -> Result<Value, StoreError> {
    match attribute {
        AttributeValue::S(text) => Ok(Value::String(text)),
        AttributeValue::N(text) => parse_number(&text),
        AttributeValue::Bool(flag) => Ok(Value::Bool(flag)),
        AttributeValue::Null(_) => Ok(Value::Null),
        AttributeValue::L(values) => values
            .into_iter()
            .map(attribute_to_value)
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array),
        AttributeValue::M(map) => item_to_record(map).map(Value::Object),
        AttributeValue::Ss(values) => Ok(Value::Array(
            values.into_iter().map(Value::String).collect(),
        )),
        AttributeValue::Ns(values) => values
            .iter()
            .map(|text| parse_number(text))
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array),
        AttributeValue::B(_) | AttributeValue::Bs(_) => Err(StoreError::Unexpected(
            "binary attributes cannot be represented as JSON".to_string(),
        )),
        other => Err(StoreError::Unexpected(format!(
            "unsupported attribute value: {other:?}"
        ))),
    }
}

fn parse_number(text: &str) -> Result<Value, StoreError> {
    serde_json::from_str::<Number>(text)
        .map(Value::Number)
        .map_err(|error| StoreError::Unexpected(format!("invalid number attribute {text:?}: {error}")))
}
