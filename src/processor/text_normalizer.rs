use serde_json::Value;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

use crate::models::FlatTable;

/// Splits a `;`-delimited field into trimmed, non-empty tokens.
pub fn split_multi(value: &str, lower: bool, limit: Option<usize>) -> Vec<String> {
    value
        .split(';')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(|token| if lower { token.to_lowercase() } else { token.to_string() })
        .take(limit.unwrap_or(usize::MAX))
        .collect()
}

/// Accent stripping and case folding for categorical text.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextNormalizer {
    pub multi_valued: bool,
}

impl TextNormalizer {
    pub fn new(multi_valued: bool) -> Self {
        TextNormalizer { multi_valued }
    }

    /// Lower-case, canonical decomposition, combining marks dropped, trimmed.
    pub fn normalize(text: &str) -> String {
        text.to_lowercase()
            .nfd()
            .filter(|c| !is_combining_mark(*c))
            .collect::<String>()
            .trim()
            .to_string()
    }

    /// Non-string values pass through unchanged.
    pub fn normalize_value(value: &Value) -> Value {
        match value {
            Value::String(s) => Value::String(Self::normalize(s)),
            other => other.clone(),
        }
    }

    /// Normalizes every token of a `;`-delimited field, rejoined with `"; "`.
    pub fn normalize_multi(text: &str) -> String {
        split_multi(text, false, None)
            .iter()
            .map(|token| Self::normalize(token))
            .filter(|token| !token.is_empty())
            .collect::<Vec<_>>()
            .join("; ")
    }

    pub fn normalize_table(&self, table: &mut FlatTable) {
        for row in table.rows_mut() {
            for field in [&mut row.varietal_name, &mut row.region_name, &mut row.country_name] {
                if let Some(text) = field.as_mut() {
                    *text = Self::normalize(text);
                }
            }

            if self.multi_valued {
                row.used_grapes = Self::normalize_multi(&row.used_grapes);
                row.relevant_food = Self::normalize_multi(&row.relevant_food);
                row.top_flavors = Self::normalize_multi(&row.top_flavors);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FlatRow;
    use serde_json::json;

    #[test]
    fn test_accent_stripping() {
        assert_eq!(TextNormalizer::normalize("Côtes-du-Rhône"), "cotes-du-rhone");
        assert_eq!(TextNormalizer::normalize("  Grüner Veltliner "), "gruner veltliner");
        assert_eq!(TextNormalizer::normalize("España"), "espana");
        assert_eq!(TextNormalizer::normalize(""), "");
    }

    #[test]
    fn test_idempotent() {
        for input in ["Côtes-du-Rhône", "MOURVÈDRE", "İstanbul", "Ångström  ", "plain"] {
            let once = TextNormalizer::normalize(input);
            assert_eq!(TextNormalizer::normalize(&once), once);
        }
    }

    #[test]
    fn test_non_string_values_unchanged() {
        assert_eq!(TextNormalizer::normalize_value(&json!(3.5)), json!(3.5));
        assert_eq!(TextNormalizer::normalize_value(&Value::Null), Value::Null);
        assert_eq!(TextNormalizer::normalize_value(&json!("Rosé")), json!("rose"));
    }

    #[test]
    fn test_split_multi() {
        assert_eq!(split_multi(" Beef; ;Lamb ;", true, None), vec!["beef", "lamb"]);
        assert_eq!(split_multi("A;B;C", false, Some(2)), vec!["A", "B"]);
        assert!(split_multi("", true, None).is_empty());
    }

    #[test]
    fn test_normalize_table() {
        let mut table = FlatTable::new(vec![FlatRow {
            varietal_name: Some("Rhône Red Blend".to_string()),
            region_name: Some(" Côte de Nuits".to_string()),
            country_name: None,
            top_flavors: "Crème brûlée; Oak".to_string(),
            ..Default::default()
        }]);

        TextNormalizer::new(false).normalize_table(&mut table);
        let row = &table.rows()[0];
        assert_eq!(row.varietal_name.as_deref(), Some("rhone red blend"));
        assert_eq!(row.region_name.as_deref(), Some("cote de nuits"));
        assert_eq!(row.country_name, None);
        assert_eq!(row.top_flavors, "Crème brûlée; Oak");

        TextNormalizer::new(true).normalize_table(&mut table);
        assert_eq!(table.rows()[0].top_flavors, "creme brulee; oak");
    }
}
