use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Temperature in both units, as stored in the catalog
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Temperature {
    pub celsius: f64,
    pub fahrenheit: f64,
}

/// A catalog record
///
/// Field names on the wire follow the catalog documents (`latin`, `ideallight`,
/// `use`, ...). Only `id` and `latin` are required. A wrongly typed optional field
/// reads as absent instead of rejecting the record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Plant {
    pub id: i64,
    #[serde(rename = "latin")]
    pub latin_name: String,
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub family: Option<String>,
    #[serde(default, deserialize_with = "lenient_string_list")]
    pub common: Vec<String>,
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub category: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub origin: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub climate: Option<String>,
    #[serde(
        default,
        rename = "tempmax",
        deserialize_with = "lenient_temperature",
        skip_serializing_if = "Option::is_none"
    )]
    pub temp_max: Option<Temperature>,
    #[serde(
        default,
        rename = "tempmin",
        deserialize_with = "lenient_temperature",
        skip_serializing_if = "Option::is_none"
    )]
    pub temp_min: Option<Temperature>,
    #[serde(
        default,
        rename = "ideallight",
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub ideal_light: Option<String>,
    #[serde(
        default,
        rename = "toleratedlight",
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub tolerated_light: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub watering: Option<String>,
    #[serde(default, deserialize_with = "lenient_string_list")]
    pub insects: Vec<String>,
    #[serde(default, deserialize_with = "lenient_string_list")]
    pub diseases: Vec<String>,
    #[serde(default, rename = "use", deserialize_with = "lenient_string_list")]
    pub uses: Vec<String>,
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub image: Option<String>,
}

/// Strings pass through, numbers and booleans are stringified, anything else is absent
fn scalar_to_string(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(scalar_to_string(Value::deserialize(deserializer)?))
}

/// A non-array reads as empty; non-scalar elements are dropped
fn lenient_string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Array(values) => Ok(values.into_iter().filter_map(scalar_to_string).collect()),
        _ => Ok(Vec::new()),
    }
}

fn lenient_temperature<'de, D>(deserializer: D) -> Result<Option<Temperature>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(serde_json::from_value(Value::deserialize(deserializer)?).ok())
}

impl Plant {
    /// Creates a plant with only the required fields set
    pub fn new(id: i64, latin_name: impl Into<String>) -> Self {
        Self {
            id,
            latin_name: latin_name.into(),
            ..Self::default()
        }
    }

    /// Name shown to users: the second common name, then the first, then the latin name
    pub fn display_name(&self) -> &str {
        self.common
            .get(1)
            .or_else(|| self.common.first())
            .map(String::as_str)
            .unwrap_or(&self.latin_name)
    }

    /// Last listed common name, if any
    pub fn last_common_name(&self) -> Option<&str> {
        self.common.last().map(String::as_str)
    }
}
