use thiserror::Error;

use crate::record::Record;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// Reported by the store itself (throttling, access denied, missing table).
    #[error("{}", coded_message(code, message))]
    Service { code: String, message: String },

    /// Anything the store did not classify: timeouts, transport, decoding.
    #[error("{0}")]
    Unexpected(String),
}

impl StoreError {
    pub fn service(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Service {
            code: code.into(),
            message: message.into(),
        }
    }
}

/// `"<code>: <message>"`, or just the code when the store sent no message.
pub(crate) fn coded_message(code: &str, message: &str) -> String {
    if message.is_empty() {
        code.to_string()
    } else {
        format!("{code}: {message}")
    }
}

/// One page of a scan plus the cursor to resume from, if any.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanPage<C> {
    pub items: Vec<Record>,
    pub next: Option<C>,
}

/// The two operations this layer ever performs against a collection.
///
/// Implementations must be safe to call from concurrent invocations; they
/// hold no per-call mutable state beyond what the backing client manages.
pub trait RecordStore {
    /// Opaque continuation token understood only by the implementation.
    type Cursor;

    /// Writes one record unconditionally, overwriting any record with the
    /// same key.
    fn put_record(&self, collection: &str, record: &Record) -> Result<(), StoreError>;

    fn scan_page(
        &self,
        collection: &str,
        cursor: Option<Self::Cursor>,
    ) -> Result<ScanPage<Self::Cursor>, StoreError>;
}

/// Scans a collection to exhaustion, following cursors page by page.
///
/// Pages are bounded by the store (by size, not row count), so stopping
/// after the first page would silently truncate large collections.
pub fn scan_all<S>(store: &S, collection: &str) -> Result<Vec<Record>, StoreError>
where
    S: RecordStore + ?Sized,
{
    let mut items = Vec::new();
    let mut cursor = None;
    let mut pages = 0usize;

    loop {
        let page = store.scan_page(collection, cursor)?;
        pages += 1;
        tracing::debug!(
            collection,
            page = pages,
            page_items = page.items.len(),
            has_more = page.next.is_some(),
            "scan page received"
        );
        items.extend(page.items);

        match page.next {
            Some(next) => cursor = Some(next),
            None => break,
        }
    }

    tracing::debug!(collection, pages, count = items.len(), "scan exhausted");
    Ok(items)
}
