use serde_json::Value;

use super::flavor_aggregator::FlavorAggregator;
use super::path_extractor::{get, get_array, get_f64, get_i64, get_str, get_text};
use crate::models::FlatRow;

pub const TOP_FLAVORS: usize = 10;
pub const LIST_SEPARATOR: &str = "; ";
pub const PRODUCT_URL_BASE: &str = "https://www.vivino.com/US/en";

pub const VINTAGE_ID_PATH: &str = "vintage.id";
pub const WINE_ID_PATH: &str = "vintage.wine.id";
const GRAPES_PATH: &str = "vintage.wine.region.country.most_used_grapes";
const FOOD_PATH: &str = "vintage.wine.style.food";
const STRUCTURE_PATH: &str = "vintage.wine.taste.structure";

/// Maps one raw record plus its partition label onto a flat row.
pub struct RecordProjector {
    flavors: FlavorAggregator,
}

impl RecordProjector {
    pub fn new() -> Self {
        RecordProjector {
            flavors: FlavorAggregator::new(TOP_FLAVORS),
        }
    }

    pub fn project(&self, record: &Value, category_label: &str) -> FlatRow {
        let wine_id = get_text(record, WINE_ID_PATH);
        let vintage_id = get_text(record, VINTAGE_ID_PATH);
        let (price, currency_code) = Self::pick_price(record);
        let product_url = Self::product_url(record, wine_id.as_deref(), vintage_id.as_deref());

        let structure = |metric: &str| get_f64(record, &format!("{}.{}", STRUCTURE_PATH, metric));

        FlatRow {
            category_label: category_label.to_string(),
            region_id: get_text(record, "vintage.wine.region.id"),
            region_name: get_text(record, "vintage.wine.region.name"),
            country_name: get_text(record, "vintage.wine.region.country.name"),
            used_grapes: Self::join_names(get_array(record, GRAPES_PATH)),
            relevant_food: Self::join_names(get_array(record, FOOD_PATH)),
            top_flavors: self.flavors.top_flavors(record),
            vintage_name: get_text(record, "vintage.name"),
            wine_name: get_text(record, "vintage.wine.name"),
            varietal_name: get_text(record, "vintage.wine.style.varietal_name"),
            style_name: get_text(record, "vintage.wine.style.name"),
            year: Self::parse_year(get(record, "vintage.year")),
            price,
            currency_code,
            acidity: structure("acidity"),
            intensity: structure("intensity"),
            sweetness: structure("sweetness"),
            tannin: structure("tannin"),
            fizziness: structure("fizziness"),
            rating_avg: get_f64(record, "vintage.statistics.ratings_average"),
            rating_count: get_i64(record, "vintage.statistics.ratings_count"),
            product_url,
            style_description: get_text(record, "vintage.wine.style.description"),
            wine_id,
            vintage_id,
            taste_category: None,
        }
    }

    /// `name` of every entry joined with `"; "`; entries without a name are skipped.
    pub fn join_names(entries: &[Value]) -> String {
        entries
            .iter()
            .filter_map(|entry| get_str(entry, "name"))
            .collect::<Vec<_>>()
            .join(LIST_SEPARATOR)
    }

    /// Only all-digit renderings count as a year; "N.V." and friends are absent.
    pub fn parse_year(raw: Option<&Value>) -> Option<i32> {
        let text = match raw? {
            Value::String(s) => s.clone(),
            Value::Number(n) => n.to_string(),
            _ => return None,
        };
        if text.is_empty() || !text.chars().all(|c| c.is_ascii_digit()) {
            return None;
        }
        text.parse::<i32>().ok()
    }

    /// Cheapest valid offer, falling back to the single `price` block.
    pub fn pick_price(record: &Value) -> (Option<f64>, Option<String>) {
        let cheapest = get_array(record, "prices")
            .iter()
            .filter_map(|offer| get_f64(offer, "amount").map(|amount| (amount, offer)))
            .min_by(|a, b| a.0.total_cmp(&b.0));

        match cheapest {
            Some((amount, offer)) => (Some(amount), get_text(offer, "currency.code")),
            None => (
                get_f64(record, "price.amount"),
                get_text(record, "price.currency.code"),
            ),
        }
    }

    /// SEO name minus its trailing hyphen token.
    pub fn seo_slug(record: &Value) -> Option<String> {
        let seo_name = get_str(record, "vintage.seo_name")?;
        let parts: Vec<&str> = seo_name.split('-').collect();
        let slug = parts[..parts.len() - 1].join("-");
        (!slug.is_empty()).then_some(slug)
    }

    /// The gate checks the vintage id while the link embeds the wine id.
    pub fn product_url(record: &Value, wine_id: Option<&str>, vintage_id: Option<&str>) -> Option<String> {
        let slug = Self::seo_slug(record)?;
        if vintage_id.is_none() {
            return None;
        }
        Some(format!(
            "{}/{}/w/{}",
            PRODUCT_URL_BASE,
            slug,
            wine_id.unwrap_or_default()
        ))
    }
}

impl Default for RecordProjector {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn full_record() -> Value {
        json!({
            "vintage": {
                "id": 155_001,
                "name": "Domaine Rouge Côtes-du-Rhône 2019",
                "seo_name": "domaine-rouge-cotes-du-rhone-2019",
                "year": 2019,
                "statistics": { "ratings_average": 3.9, "ratings_count": 1250 },
                "wine": {
                    "id": 7788,
                    "name": "Côtes-du-Rhône",
                    "region": {
                        "id": 412,
                        "name": "Côtes-du-Rhône",
                        "country": {
                            "name": "France",
                            "most_used_grapes": [
                                {"name": "Grenache"},
                                {"name": "Syrah"},
                                {"name": "Mourvèdre"}
                            ]
                        }
                    },
                    "style": {
                        "name": "Southern Rhône Red",
                        "varietal_name": "Rhône Red Blend",
                        "description": "Spicy and ripe.",
                        "food": [ {"name": "Beef"}, {"name": "Lamb"} ]
                    },
                    "taste": {
                        "structure": {
                            "acidity": 3.2,
                            "intensity": 4.1,
                            "sweetness": 1.6,
                            "tannin": 3.4,
                            "fizziness": null
                        },
                        "flavor": [
                            {"primary_keywords": [{"name": "plum", "count": 12}, {"name": "pepper", "count": 7}]},
                            {"primary_keywords": [{"name": "oak", "count": 9}]}
                        ]
                    }
                }
            },
            "prices": [
                {"amount": 42.0, "currency": {"code": "USD"}},
                {"amount": 19.0, "currency": {"code": "USD"}},
                {"amount": null, "currency": {"code": "USD"}}
            ]
        })
    }

    #[test]
    fn test_full_projection() {
        let projector = RecordProjector::new();
        let row = projector.project(&full_record(), "Red");

        assert_eq!(row.wine_id.as_deref(), Some("7788"));
        assert_eq!(row.vintage_id.as_deref(), Some("155001"));
        assert_eq!(row.category_label, "Red");
        assert_eq!(row.region_id.as_deref(), Some("412"));
        assert_eq!(row.country_name.as_deref(), Some("France"));
        assert_eq!(row.used_grapes, "Grenache; Syrah; Mourvèdre");
        assert_eq!(row.relevant_food, "Beef; Lamb");
        assert_eq!(row.top_flavors, "plum; oak; pepper");
        assert_eq!(row.varietal_name.as_deref(), Some("Rhône Red Blend"));
        assert_eq!(row.year, Some(2019));
        assert_eq!(row.price, Some(19.0));
        assert_eq!(row.currency_code.as_deref(), Some("USD"));
        assert_eq!(row.sweetness, Some(1.6));
        assert_eq!(row.fizziness, None);
        assert_eq!(row.rating_avg, Some(3.9));
        assert_eq!(row.rating_count, Some(1250));
        assert_eq!(
            row.product_url.as_deref(),
            Some("https://www.vivino.com/US/en/domaine-rouge-cotes-du-rhone/w/7788")
        );
        assert_eq!(row.taste_category, None);
    }

    #[test]
    fn test_empty_record_does_not_fail() {
        let row = RecordProjector::new().project(&json!({}), "White");
        assert_eq!(row.category_label, "White");
        assert_eq!(row.vintage_id, None);
        assert_eq!(row.used_grapes, "");
        assert_eq!(row.relevant_food, "");
        assert_eq!(row.top_flavors, "");
        assert_eq!(row.year, None);
        assert_eq!(row.price, None);
        assert_eq!(row.product_url, None);
    }

    #[test]
    fn test_year_parsing() {
        assert_eq!(RecordProjector::parse_year(Some(&json!("2019"))), Some(2019));
        assert_eq!(RecordProjector::parse_year(Some(&json!(2015))), Some(2015));
        assert_eq!(RecordProjector::parse_year(Some(&json!("N.V."))), None);
        assert_eq!(RecordProjector::parse_year(Some(&json!(2019.5))), None);
        assert_eq!(RecordProjector::parse_year(Some(&json!("-1999"))), None);
        assert_eq!(RecordProjector::parse_year(Some(&json!(""))), None);
        assert_eq!(RecordProjector::parse_year(None), None);
    }

    #[test]
    fn test_price_fallback_logic() {
        // offers present but none valid: fall back to the single price block
        let record = json!({
            "prices": [{"amount": null}, "junk"],
            "price": {"amount": 25.5, "currency": {"code": "CAD"}}
        });
        assert_eq!(
            RecordProjector::pick_price(&record),
            (Some(25.5), Some("CAD".to_string()))
        );

        // ties keep the first cheapest offer
        let record = json!({
            "prices": [
                {"amount": 10, "currency": {"code": "EUR"}},
                {"amount": 10, "currency": {"code": "USD"}}
            ]
        });
        assert_eq!(
            RecordProjector::pick_price(&record),
            (Some(10.0), Some("EUR".to_string()))
        );

        assert_eq!(RecordProjector::pick_price(&json!({})), (None, None));
    }

    #[test]
    fn test_product_url_gate() {
        let with_ids = json!({"vintage": {"id": 5, "seo_name": "some-wine-2018", "wine": {"id": 9}}});
        let row = RecordProjector::new().project(&with_ids, "Rose");
        assert_eq!(
            row.product_url.as_deref(),
            Some("https://www.vivino.com/US/en/some-wine/w/9")
        );

        // no vintage id: no link even though the wine id is known
        let no_vintage = json!({"vintage": {"seo_name": "some-wine-2018", "wine": {"id": 9}}});
        assert_eq!(RecordProjector::new().project(&no_vintage, "Rose").product_url, None);

        // single-token seo name leaves an empty slug
        let bare = json!({"vintage": {"id": 5, "seo_name": "wine", "wine": {"id": 9}}});
        assert_eq!(RecordProjector::new().project(&bare, "Rose").product_url, None);
    }

    #[test]
    fn test_join_names_skips_unnamed_entries() {
        let entries = vec![json!({"name": "Pork"}), json!({"id": 3}), json!(null), json!({"name": "Shellfish"})];
        assert_eq!(RecordProjector::join_names(&entries), "Pork; Shellfish");
    }
}
