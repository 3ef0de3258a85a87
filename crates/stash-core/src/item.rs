use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Opaque, store-assigned item identifier.
pub type ItemId = String;

/// Dynamic value type for opaque display fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    Array(Vec<Value>),
    Object(BTreeMap<String, Value>),
}

/// The `series` field as it appears in a stored document: a bare label or a
/// list of labels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SeriesField {
    One(String),
    Many(Vec<String>),
}

/// Category labels of an item. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Series(Vec<String>);

impl Series {
    /// Normalize a stored `series` field into a non-empty label list.
    ///
    /// A missing field or an empty list becomes `[""]`.
    pub fn normalize(field: Option<SeriesField>) -> Self {
        let labels = match field {
            Some(SeriesField::One(label)) => vec![label],
            Some(SeriesField::Many(labels)) if !labels.is_empty() => labels,
            Some(SeriesField::Many(_)) | None => vec![String::new()],
        };
        Self(labels)
    }

    /// The primary category: the first label.
    pub fn first(&self) -> &str {
        &self.0[0]
    }

    pub fn labels(&self) -> &[String] {
        &self.0
    }

    /// Exact, case-sensitive membership.
    pub fn contains(&self, label: &str) -> bool {
        self.0.iter().any(|l| l == label)
    }
}

impl From<Vec<String>> for Series {
    fn from(labels: Vec<String>) -> Self {
        Self::normalize(Some(SeriesField::Many(labels)))
    }
}

impl From<&str> for Series {
    fn from(label: &str) -> Self {
        Self::normalize(Some(SeriesField::One(label.to_string())))
    }
}

/// A document as read from the backing collection, before normalization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ItemId>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub series: Option<SeriesField>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    /// Any other display fields, kept untouched.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// A catalog entry.
///
/// Built once from an [`ItemDocument`] by [`Item::from_document`]; the
/// lowercase mirrors used for matching are derived there and never
/// serialized. `name` and `series` are only writable through setters that
/// keep the mirrors in step.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Item {
    pub id: ItemId,
    name: String,
    series: Series,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,

    #[serde(skip)]
    name_lower: String,
    #[serde(skip)]
    series_lower: Vec<String>,
}

impl Item {
    /// Minimal constructor, mostly for stores and tests.
    pub fn new(id: impl Into<ItemId>, name: impl Into<String>, series: impl Into<Series>) -> Self {
        let name = name.into();
        let series = series.into();
        Self {
            id: id.into(),
            name_lower: name.to_lowercase(),
            series_lower: lowercase_labels(&series),
            name,
            series,
            image: None,
            description: None,
            price: None,
            brand: None,
            size: None,
            extra: BTreeMap::new(),
        }
    }

    /// Normalize a stored document under the given id.
    ///
    /// An `id` field inside the document is ignored; the store's key wins.
    pub fn from_document(id: impl Into<ItemId>, doc: ItemDocument) -> Self {
        let mut item = Self::new(
            id,
            doc.name.unwrap_or_default(),
            Series::normalize(doc.series),
        );
        item.image = doc.image;
        item.description = doc.description;
        item.price = doc.price;
        item.brand = doc.brand;
        item.size = doc.size;
        item.extra = doc.extra;
        item
    }

    /// Convert back to the stored shape (always with an array `series`).
    pub fn to_document(&self) -> ItemDocument {
        ItemDocument {
            id: Some(self.id.clone()),
            name: Some(self.name.clone()),
            series: Some(SeriesField::Many(self.series.labels().to_vec())),
            image: self.image.clone(),
            description: self.description.clone(),
            price: self.price.clone(),
            brand: self.brand.clone(),
            size: self.size.clone(),
            extra: self.extra.clone(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
        self.name_lower = self.name.to_lowercase();
    }

    pub fn series(&self) -> &Series {
        &self.series
    }

    pub fn set_series(&mut self, series: impl Into<Series>) {
        self.series = series.into();
        self.series_lower = lowercase_labels(&self.series);
    }

    pub fn primary_series(&self) -> &str {
        self.series.first()
    }

    pub fn name_lower(&self) -> &str {
        &self.name_lower
    }

    pub fn series_lower(&self) -> &[String] {
        &self.series_lower
    }
}

fn lowercase_labels(series: &Series) -> Vec<String> {
    series.labels().iter().map(|s| s.to_lowercase()).collect()
}
