use adoption_api_core::record::CollectionKind;

pub const DEFAULT_REGION: &str = "us-east-1";
pub const DEFAULT_APPLICATIONS_TABLE: &str = "Applications";
pub const DEFAULT_PETS_TABLE: &str = "Pets";
pub const DEFAULT_ADOPTIONS_TABLE: &str = "Adoptions";

/// Settings resolved once at process start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    pub region: String,
    pub applications_table: String,
    pub pets_table: String,
    pub adoptions_table: String,
    /// Overrides the DynamoDB endpoint, e.g. for a local emulator.
    pub endpoint_url: Option<String>,
}

impl RuntimeConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let setting = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        Self {
            region: setting("AWS_REGION").unwrap_or_else(|| DEFAULT_REGION.to_string()),
            applications_table: setting("APPLICATIONS_TABLE_NAME")
                .unwrap_or_else(|| DEFAULT_APPLICATIONS_TABLE.to_string()),
            pets_table: setting("PETS_TABLE_NAME")
                .unwrap_or_else(|| DEFAULT_PETS_TABLE.to_string()),
            adoptions_table: setting("ADOPTIONS_TABLE")
                .unwrap_or_else(|| DEFAULT_ADOPTIONS_TABLE.to_string()),
            endpoint_url: setting("DYNAMODB_ENDPOINT_URL"),
        }
    }

    pub fn table_for(&self, kind: CollectionKind) -> &str {
        match kind {
            CollectionKind::Applications => &self.applications_table,
            CollectionKind::Pets => &self.pets_table,
            CollectionKind::Adoptions => &self.adoptions_table,
        }
    }
}
