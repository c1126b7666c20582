use serde::{Deserialize, Serialize};

use super::TasteCategory;

/// One raw nested record as delivered by the acquisition side.
pub type RawRecord = serde_json::Value;

/// Column order of the flat table, excluding the derived `taste_category`.
pub const FLAT_COLUMNS: [&str; 25] = [
    "wine_id",
    "vintage_id",
    "category_label",
    "region_id",
    "region_name",
    "country_name",
    "used_grapes",
    "relevant_food",
    "top_flavors",
    "vintage_name",
    "wine_name",
    "varietal_name",
    "style_name",
    "year",
    "price",
    "currency_code",
    "acidity",
    "intensity",
    "sweetness",
    "tannin",
    "fizziness",
    "rating_avg",
    "rating_count",
    "product_url",
    "style_description",
];

pub const TASTE_CATEGORY_COLUMN: &str = "taste_category";

/// A batch of raw records sharing one category label.
#[derive(Debug, Clone, PartialEq)]
pub struct Partition {
    pub name: String,
    pub label: String,
    pub records: Vec<RawRecord>,
}

impl Partition {
    pub fn new(name: impl Into<String>, label: impl Into<String>, records: Vec<RawRecord>) -> Self {
        Partition {
            name: name.into(),
            label: label.into(),
            records,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlatRow {
    pub wine_id: Option<String>,
    pub vintage_id: Option<String>,
    pub category_label: String,
    pub region_id: Option<String>,
    pub region_name: Option<String>,
    pub country_name: Option<String>,
    pub used_grapes: String,
    pub relevant_food: String,
    pub top_flavors: String,
    pub vintage_name: Option<String>,
    pub wine_name: Option<String>,
    pub varietal_name: Option<String>,
    pub style_name: Option<String>,
    pub year: Option<i32>,
    pub price: Option<f64>,
    pub currency_code: Option<String>,
    pub acidity: Option<f64>,
    pub intensity: Option<f64>,
    pub sweetness: Option<f64>,
    pub tannin: Option<f64>,
    pub fizziness: Option<f64>,
    pub rating_avg: Option<f64>,
    pub rating_count: Option<i64>,
    pub product_url: Option<String>,
    pub style_description: Option<String>,
    pub taste_category: Option<TasteCategory>,
}

/// Text columns usable as grouping keys or multi-valued sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextField {
    CategoryLabel,
    RegionName,
    CountryName,
    VarietalName,
    StyleName,
    UsedGrapes,
    RelevantFood,
    TopFlavors,
}

impl TextField {
    pub fn column_name(&self) -> &'static str {
        match self {
            TextField::CategoryLabel => "category_label",
            TextField::RegionName => "region_name",
            TextField::CountryName => "country_name",
            TextField::VarietalName => "varietal_name",
            TextField::StyleName => "style_name",
            TextField::UsedGrapes => "used_grapes",
            TextField::RelevantFood => "relevant_food",
            TextField::TopFlavors => "top_flavors",
        }
    }
}

impl FlatRow {
    pub fn text(&self, field: TextField) -> Option<&str> {
        match field {
            TextField::CategoryLabel => Some(self.category_label.as_str()),
            TextField::RegionName => self.region_name.as_deref(),
            TextField::CountryName => self.country_name.as_deref(),
            TextField::VarietalName => self.varietal_name.as_deref(),
            TextField::StyleName => self.style_name.as_deref(),
            TextField::UsedGrapes => Some(self.used_grapes.as_str()),
            TextField::RelevantFood => Some(self.relevant_food.as_str()),
            TextField::TopFlavors => Some(self.top_flavors.as_str()),
        }
    }
}

/// Ordered rows of one pipeline run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlatTable {
    rows: Vec<FlatRow>,
    taste_derived: bool,
}

impl FlatTable {
    pub fn new(rows: Vec<FlatRow>) -> Self {
        FlatTable {
            rows,
            taste_derived: false,
        }
    }

    pub fn rows(&self) -> &[FlatRow] {
        &self.rows
    }

    pub fn rows_mut(&mut self) -> &mut [FlatRow] {
        &mut self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has_taste_categories(&self) -> bool {
        self.taste_derived
    }

    /// Appends the derived taste column, computing each label with `derive`.
    pub fn with_taste_categories<F>(mut self, derive: F) -> Self
    where
        F: Fn(&FlatRow) -> TasteCategory,
    {
        for row in &mut self.rows {
            row.taste_category = Some(derive(row));
        }
        self.taste_derived = true;
        self
    }

    /// A table holding clones of the given rows, keeping the derived-column flag.
    pub fn subset<'a>(&self, rows: impl IntoIterator<Item = &'a FlatRow>) -> FlatTable {
        FlatTable {
            rows: rows.into_iter().cloned().collect(),
            taste_derived: self.taste_derived,
        }
    }

    pub fn into_rows(self) -> Vec<FlatRow> {
        self.rows
    }
}
