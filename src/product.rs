use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const PLACEHOLDER_IMAGE: &str = "https://via.placeholder.com/300x400?text=Medical+Product";
pub const PLACEHOLDER_ALT: &str = "Medical Product";
pub const PLACEHOLDER_NAME: &str = "Unnamed Medical Product";
pub const PLACEHOLDER_FIELD: &str = "N/A";
pub const PLACEHOLDER_MANUFACTURER: &str = "Manufacturer Not Provided";

/// Product identifier taken from the page query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductId(String);

impl ProductId {
    /// Reads the first `id` from the query pairs. An empty first value counts as absent.
    pub fn from_query(query: &[(String, String)]) -> Option<Self> {
        query
            .iter()
            .find(|(key, _)| key == "id")
            .map(|(_, id)| id)
            .filter(|id| !id.is_empty())
            .map(|id| Self(id.clone()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Raw product record as returned by the lookup service. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductRecord {
    pub name: Option<String>,
    pub product_id: Option<String>,
    pub manufacturer: Option<String>,
    pub batch_number: Option<String>,
    pub expiry_date: Option<String>,
    pub certification: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
}

impl ProductRecord {
    /// Picks the known fields out of a parsed body. Non-objects yield an empty record.
    pub fn from_json(body: &Value) -> Self {
        let field = |key: &str| body.get(key).and_then(display_text);
        Self {
            name: field("name"),
            product_id: field("product_id"),
            manufacturer: field("manufacturer"),
            batch_number: field("batch_number"),
            expiry_date: field("expiry_date"),
            certification: field("certification"),
            description: field("description"),
            image: field("image"),
        }
    }
}

/// Text shown for a JSON value, or `None` when the value counts as absent.
///
/// `null`, `""`, `false` and numeric zero are absent; other scalars use their JSON text.
/// Arrays and objects are shown in their compact JSON form.
pub fn display_text(value: &Value) -> Option<String> {
    match value {
        Value::Null | Value::Bool(false) => None,
        Value::Bool(true) => Some("true".to_string()),
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        Value::Number(n) => Some(n.to_string()),
        other => Some(other.to_string()),
    }
}

/// Normalized passport fields with every fallback applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayModel {
    pub image: String,
    pub image_alt: String,
    pub name: String,
    pub product_id: String,
    pub manufacturer: String,
    pub batch_number: String,
    pub expiry_date: String,
    pub certification: String,
    pub description: String,
    pub footer_details: String,
}

impl From<ProductRecord> for DisplayModel {
    fn from(record: ProductRecord) -> Self {
        let or_na = |v: Option<String>| v.unwrap_or_else(|| PLACEHOLDER_FIELD.to_string());
        Self {
            image: record
                .image
                .unwrap_or_else(|| PLACEHOLDER_IMAGE.to_string()),
            image_alt: record
                .name
                .clone()
                .unwrap_or_else(|| PLACEHOLDER_ALT.to_string()),
            name: record
                .name
                .unwrap_or_else(|| PLACEHOLDER_NAME.to_string()),
            footer_details: record
                .manufacturer
                .clone()
                .unwrap_or_else(|| PLACEHOLDER_MANUFACTURER.to_string()),
            product_id: or_na(record.product_id),
            manufacturer: or_na(record.manufacturer),
            batch_number: or_na(record.batch_number),
            expiry_date: or_na(record.expiry_date),
            certification: or_na(record.certification),
            description: or_na(record.description),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_id_is_absent() {
        let pair = |k: &str, v: &str| (k.to_string(), v.to_string());
        assert!(ProductId::from_query(&[]).is_none());
        assert!(ProductId::from_query(&[pair("lang", "en")]).is_none());
        assert!(ProductId::from_query(&[pair("id", "")]).is_none());
        assert_eq!(
            ProductId::from_query(&[pair("lang", "en"), pair("id", "P123")])
                .unwrap()
                .as_str(),
            "P123"
        );
    }

    #[test]
    fn first_id_wins() {
        let pair = |k: &str, v: &str| (k.to_string(), v.to_string());
        let query = [pair("id", "FIRST"), pair("id", "SECOND")];
        assert_eq!(ProductId::from_query(&query).unwrap().as_str(), "FIRST");
        let query = [pair("id", ""), pair("id", "SECOND")];
        assert!(ProductId::from_query(&query).is_none());
    }

    #[test]
    fn absent_fields_fall_back() {
        let record = ProductRecord::from_json(&json!({"name": "Aspirin", "manufacturer": "Acme"}));
        let model = DisplayModel::from(record);
        assert_eq!(model.name, "Aspirin");
        assert_eq!(model.image_alt, "Aspirin");
        assert_eq!(model.manufacturer, "Acme");
        assert_eq!(model.footer_details, "Acme");
        assert_eq!(model.batch_number, "N/A");
        assert_eq!(model.expiry_date, "N/A");
        assert_eq!(model.image, PLACEHOLDER_IMAGE);
    }

    #[test]
    fn empty_record_uses_every_placeholder() {
        let model = DisplayModel::from(ProductRecord::from_json(&json!({})));
        assert_eq!(model.name, PLACEHOLDER_NAME);
        assert_eq!(model.image_alt, PLACEHOLDER_ALT);
        assert_eq!(model.footer_details, PLACEHOLDER_MANUFACTURER);
        assert_eq!(model.product_id, PLACEHOLDER_FIELD);
        assert_eq!(model.certification, PLACEHOLDER_FIELD);
        assert_eq!(model.description, PLACEHOLDER_FIELD);
    }

    #[test]
    fn falsy_values_count_as_absent() {
        assert_eq!(display_text(&json!(null)), None);
        assert_eq!(display_text(&json!("")), None);
        assert_eq!(display_text(&json!(false)), None);
        assert_eq!(display_text(&json!(0)), None);
        assert_eq!(display_text(&json!(42)), Some("42".to_string()));
        assert_eq!(display_text(&json!("B-7")), Some("B-7".to_string()));
    }

    #[test]
    fn non_object_body_gives_empty_record() {
        assert_eq!(ProductRecord::from_json(&json!([1, 2])), ProductRecord::default());
    }
}
