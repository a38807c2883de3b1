//! JSON representation of Firestore documents and values (REST v1).

use std::collections::HashMap;

use serde::de::{self, Deserializer};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

/// A single Firestore value. Exactly one field is set.
///
/// Value kinds this service never reads (references, geo points, bytes)
/// are ignored on deserialization and the value then reads as absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Value {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub string_value: Option<String>,

    /// Non-finite doubles travel as the strings `NaN`, `Infinity` and `-Infinity`.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_double",
        deserialize_with = "deserialize_double"
    )]
    pub double_value: Option<f64>,

    /// int64 values are encoded as decimal strings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub integer_value: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub boolean_value: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp_value: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub array_value: Option<ArrayValue>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub map_value: Option<MapValue>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum JsonDouble {
    Number(f64),
    Text(String),
}

fn deserialize_double<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    match JsonDouble::deserialize(deserializer)? {
        JsonDouble::Number(n) => Ok(Some(n)),
        JsonDouble::Text(text) => match text.as_str() {
            "NaN" => Ok(Some(f64::NAN)),
            "Infinity" => Ok(Some(f64::INFINITY)),
            "-Infinity" => Ok(Some(f64::NEG_INFINITY)),
            other => Err(de::Error::custom(format!("invalid double value {:?}", other))),
        },
    }
}

fn serialize_double<S>(value: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match value {
        Some(d) if d.is_nan() => serializer.serialize_str("NaN"),
        Some(d) if d.is_infinite() && *d > 0.0 => serializer.serialize_str("Infinity"),
        Some(d) if d.is_infinite() => serializer.serialize_str("-Infinity"),
        Some(d) => serializer.serialize_f64(*d),
        None => serializer.serialize_none(),
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArrayValue {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub values: Vec<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MapValue {
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub fields: HashMap<String, Value>,
}

impl Value {
    pub fn string(s: impl Into<String>) -> Self {
        Self {
            string_value: Some(s.into()),
            ..Default::default()
        }
    }

    pub fn double(d: f64) -> Self {
        Self {
            double_value: Some(d),
            ..Default::default()
        }
    }

    pub fn array(values: Vec<Value>) -> Self {
        Self {
            array_value: Some(ArrayValue { values }),
            ..Default::default()
        }
    }

    /// Encode a float vector as an array of doubles.
    pub fn vector(values: &[f64]) -> Self {
        Self::array(values.iter().map(|v| Self::double(*v)).collect())
    }

    pub fn as_str(&self) -> Option<&str> {
        self.string_value.as_deref()
    }

    /// Numeric value of a double or integer.
    pub fn as_f64(&self) -> Option<f64> {
        if let Some(d) = self.double_value {
            return Some(d);
        }
        self.integer_value
            .as_deref()
            .and_then(|i| i.parse::<i64>().ok())
            .map(|i| i as f64)
    }

    /// Scalar rendered as text, so a name stored as a number still reads back.
    pub fn as_text(&self) -> Option<String> {
        if let Some(s) = &self.string_value {
            return Some(s.clone());
        }
        if let Some(i) = &self.integer_value {
            return Some(i.clone());
        }
        if let Some(d) = self.double_value {
            return Some(d.to_string());
        }
        self.boolean_value.map(|b| b.to_string())
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        self.array_value.as_ref().map(|a| a.values.as_slice())
    }

    /// Decode an array of numbers into a float vector.
    ///
    /// Returns `None` when the value is not an array or holds a non-numeric element.
    pub fn as_vector(&self) -> Option<Vec<f64>> {
        self.as_array()?
            .iter()
            .map(Value::as_f64)
            .collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    /// Full resource name: `projects/{p}/databases/{d}/documents/{path}`.
    #[serde(default)]
    pub name: String,

    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub fields: HashMap<String, Value>,

    #[serde(default, skip_serializing)]
    pub create_time: Option<String>,

    #[serde(default, skip_serializing)]
    pub update_time: Option<String>,
}

impl Document {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_field(mut self, key: impl Into<String>, value: Value) -> Self {
        self.fields.insert(key.into(), value);
        self
    }

    /// Last segment of the resource name.
    pub fn id(&self) -> &str {
        self.name.rsplit('/').next().unwrap_or_default()
    }

    pub fn field(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListDocumentsResponse {
    #[serde(default)]
    pub documents: Vec<Document>,

    #[serde(default)]
    pub next_page_token: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentMask {
    pub field_paths: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Precondition {
    pub exists: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldTransform {
    pub field_path: String,
    pub set_to_server_value: ServerValue,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ServerValue {
    RequestTime,
}

/// One write of a commit request.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Write {
    pub update: Document,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub update_mask: Option<DocumentMask>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_document: Option<Precondition>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub update_transforms: Vec<FieldTransform>,
}

impl Write {
    /// Replace the whole document.
    pub fn set(document: Document) -> Self {
        Self {
            update: document,
            update_mask: None,
            current_document: None,
            update_transforms: Vec::new(),
        }
    }

    /// Write only the document's own fields, keeping any others already stored.
    pub fn merge(document: Document) -> Self {
        let mut field_paths: Vec<String> = document.fields.keys().cloned().collect();
        field_paths.sort();
        Self {
            update_mask: Some(DocumentMask { field_paths }),
            ..Self::set(document)
        }
    }

    /// Fail the commit if the document already exists.
    pub fn must_not_exist(mut self) -> Self {
        self.current_document = Some(Precondition { exists: false });
        self
    }

    pub fn with_request_time(mut self, field_path: impl Into<String>) -> Self {
        self.update_transforms.push(FieldTransform {
            field_path: field_path.into(),
            set_to_server_value: ServerValue::RequestTime,
        });
        self
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CommitRequest {
    pub writes: Vec<Write>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitResponse {
    #[serde(default)]
    pub commit_time: Option<String>,
}
