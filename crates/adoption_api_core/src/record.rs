use serde_json::{Map, Value};

/// One stored entity as an ordered field mapping.
pub type Record = Map<String, Value>;

pub const PENDING_STATUS: &str = "pending";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollectionKind {
    Applications,
    Pets,
    Adoptions,
}

impl CollectionKind {
    pub fn schema(self) -> &'static CollectionSchema {
        match self {
            Self::Applications => &APPLICATIONS,
            Self::Pets => &PETS,
            Self::Adoptions => &ADOPTIONS,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Applications => "applications",
            Self::Pets => "pets",
            Self::Adoptions => "adoptions",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptionalField {
    pub name: &'static str,
    pub default: Option<&'static str>,
}

impl OptionalField {
    const fn plain(name: &'static str) -> Self {
        Self {
            name,
            default: None,
        }
    }

    const fn defaulted(name: &'static str, default: &'static str) -> Self {
        Self {
            name,
            default: Some(default),
        }
    }
}

/// Field layout and wording for one collection.
///
/// The store itself is schema-less; this is the only place a collection's
/// shape is enforced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionSchema {
    pub kind: CollectionKind,
    pub id_field: &'static str,
    /// Checked in declaration order; missing-field reports keep this order.
    pub required_fields: &'static [&'static str],
    pub optional_fields: &'static [OptionalField],
    pub timestamp_field: Option<&'static str>,
    pub status_field: Option<(&'static str, &'static str)>,
    /// Keep caller fields that the schema does not declare.
    pub retain_unknown_fields: bool,
    pub item_key: &'static str,
    pub list_key: &'static str,
    pub created_message: &'static str,
}

impl CollectionSchema {
    pub fn listed_message(&self) -> String {
        format!("Successfully got {}", self.list_key)
    }

    pub(crate) fn is_derived(&self, field: &str) -> bool {
        field == self.id_field
            || self.timestamp_field == Some(field)
            || self.status_field.map(|(name, _)| name) == Some(field)
    }
}

pub static APPLICATIONS: CollectionSchema = CollectionSchema {
    kind: CollectionKind::Applications,
    id_field: "applicationId",
    required_fields: &[
        "pet_id",
        "pet_name",
        "species",
        "applicant_name",
        "email",
        "phone",
    ],
    optional_fields: &[OptionalField::defaulted("pet_image", "")],
    timestamp_field: Some("submitted_at"),
    status_field: Some(("status", PENDING_STATUS)),
    retain_unknown_fields: false,
    item_key: "application",
    list_key: "applications",
    created_message: "Application submitted successfully",
};

/// Pets are keyed on a string `id`; the table's partition key must be of
/// type `S`. Tables seeded with numeric ids need re-provisioning before
/// `create_pet` can write to them.
pub static PETS: CollectionSchema = CollectionSchema {
    kind: CollectionKind::Pets,
    id_field: "id",
    required_fields: &["name", "species", "age"],
    optional_fields: &[
        OptionalField::plain("breed"),
        OptionalField::plain("date_entered"),
        OptionalField::defaulted("image", ""),
    ],
    timestamp_field: None,
    status_field: None,
    retain_unknown_fields: false,
    item_key: "pet",
    list_key: "pets",
    created_message: "Pet created successfully",
};

pub static ADOPTIONS: CollectionSchema = CollectionSchema {
    kind: CollectionKind::Adoptions,
    id_field: "id",
    required_fields: &[],
    optional_fields: &[],
    timestamp_field: None,
    status_field: None,
    retain_unknown_fields: true,
    item_key: "adoption",
    list_key: "adoptions",
    created_message: "Adoption created successfully",
};
