//! Domain model types for persistence operations

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entity::country;

/// Country schema as it appears in the JSON seed file.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CountryLoad {
    pub code: String,
    pub name: String,
    pub phone: String,
    pub svg_image: String,
}

/// Country read model.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CountryInfo {
    pub id: Uuid,
    pub name: String,
    pub code: String,
    pub phone: String,
    pub default: bool,
}

impl From<country::Model> for CountryInfo {
    fn from(value: country::Model) -> Self {
        Self {
            id: value.id,
            name: value.name,
            code: value.code,
            phone: value.phone,
            default: value.default,
        }
    }
}

/// Country lookup schema for dropdown menus.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CountryLookup {
    pub id: Uuid,
    pub name: String,
    #[serde(rename = "country_code", alias = "code")]
    pub code: String,
}

impl From<country::Model> for CountryLookup {
    fn from(value: country::Model) -> Self {
        Self {
            id: value.id,
            name: value.name,
            code: value.code,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_country_load_parses_seed_entry() {
        let entry: CountryLoad = serde_json::from_str(
            r#"{"code": "CH", "name": "Switzerland", "phone": "41", "svg_image": "<svg/>"}"#,
        )
        .unwrap();
        assert_eq!(entry.code, "CH");
        assert_eq!(entry.phone, "41");
    }

    #[test]
    fn test_country_lookup_serializes_country_code() {
        let lookup = CountryLookup {
            id: Uuid::nil(),
            name: "Switzerland".to_string(),
            code: "CH".to_string(),
        };
        let json = serde_json::to_value(&lookup).unwrap();
        assert_eq!(json["country_code"], "CH");
    }
}
