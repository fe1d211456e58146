//! Per-type exception policy.
//!
//! Resolution order, most permissive first:
//! - `disabled` skips the type entirely
//! - `disable_mismatch` / `disable_missing_on_empty` drop a whole violation class
//! - `allow_field_mismatch` + `allowed_fields` drop mismatches for named fields only

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Deserializer, Serialize};

/// Options narrowing which violation classes are enforced for one type.
/// The default value is fully strict.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExceptionPolicy {
    pub disabled: bool,
    pub disable_mismatch: bool,
    pub disable_missing_on_empty: bool,
    pub allow_field_mismatch: bool,
    #[serde(
        deserialize_with = "deserialize_allowed_fields",
        skip_serializing_if = "BTreeSet::is_empty"
    )]
    pub allowed_fields: BTreeSet<String>,
}

impl ExceptionPolicy {
    pub fn strict() -> Self {
        Self::default()
    }

    pub fn disabled() -> Self {
        Self {
            disabled: true,
            ..Self::default()
        }
    }

    /// Allow mismatches on the named fields.
    pub fn allowing<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            allow_field_mismatch: true,
            allowed_fields: fields.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn is_strict(&self) -> bool {
        *self == Self::default()
    }

    /// Whether a mismatch on this field is an audited exception.
    ///
    /// A key matches the field identifier case-insensitively, or the declared
    /// tag name exactly.
    pub fn permits_mismatch(&self, identifier: &str, declared: &str) -> bool {
        if !self.allow_field_mismatch {
            return false;
        }
        let ident = identifier.to_lowercase();
        self.allowed_fields
            .iter()
            .any(|key| key.to_lowercase() == ident || key == declared)
    }
}

/// `allowed_fields` accepts a list of names or a `{ "name": true }` map.
#[derive(Deserialize)]
#[serde(untagged)]
enum AllowedFieldsRepr {
    List(Vec<String>),
    Map(BTreeMap<String, bool>),
}

fn deserialize_allowed_fields<'de, D>(deserializer: D) -> Result<BTreeSet<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match AllowedFieldsRepr::deserialize(deserializer)? {
        AllowedFieldsRepr::List(names) => names.into_iter().collect(),
        AllowedFieldsRepr::Map(map) => map
            .into_iter()
            .filter_map(|(name, allowed)| allowed.then_some(name))
            .collect(),
    })
}
