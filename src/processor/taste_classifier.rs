//! Rule-based taste classification from the five structure metrics.
//!
//! The cascade is ordered: dessert/fortified, sparkling, red, then everything
//! else. An absent metric never satisfies a threshold on its own; a few
//! "not too sweet" guards explicitly accept an absent sweetness.

use crate::models::{FlatRow, TasteCategory};

pub const SWEET_DRY_MAX: f64 = 1.80;
pub const SWEET_OFF_MAX: f64 = 2.60;
pub const SWEET_DESSERT_MIN: f64 = 4.0;
pub const RED_TANNIC_SWEET_MAX: f64 = 2.20;
pub const ACID_HIGH_MIN: f64 = 3.80;
pub const TANNIN_HIGH_MIN: f64 = 3.60;
pub const TANNIN_LOW_MAX: f64 = 2.80;
pub const BODY_FULL_MIN: f64 = 4.30;
pub const FIZZ_MIN: f64 = 3.50;

/// Sensory structure of one wine; `None` means not measured.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TasteProfile {
    pub sweetness: Option<f64>,
    pub acidity: Option<f64>,
    pub tannin: Option<f64>,
    pub intensity: Option<f64>,
    pub fizziness: Option<f64>,
}

impl TasteProfile {
    pub fn from_row(row: &FlatRow) -> Self {
        TasteProfile {
            sweetness: row.sweetness,
            acidity: row.acidity,
            tannin: row.tannin,
            intensity: row.intensity,
            fizziness: row.fizziness,
        }
    }
}

fn measured(value: Option<f64>) -> Option<f64> {
    value.filter(|v| !v.is_nan())
}

fn at_least(value: Option<f64>, threshold: f64) -> bool {
    matches!(value, Some(v) if v >= threshold)
}

fn at_most(value: Option<f64>, threshold: f64) -> bool {
    matches!(value, Some(v) if v <= threshold)
}

fn absent_or_at_most(value: Option<f64>, threshold: f64) -> bool {
    value.is_none_or(|v| v <= threshold)
}

pub struct TasteClassifier;

impl TasteClassifier {
    pub fn classify(wine_type: &str, profile: &TasteProfile) -> TasteCategory {
        let wine_type = wine_type.trim().to_lowercase();
        let sw = measured(profile.sweetness);
        let ac = measured(profile.acidity);
        let tn = measured(profile.tannin);
        let it = measured(profile.intensity);
        let fz = measured(profile.fizziness);

        if matches!(wine_type.as_str(), "dessert" | "fortified") || at_least(sw, SWEET_DESSERT_MIN) {
            return TasteCategory::DessertOrFortified;
        }

        if at_least(fz, FIZZ_MIN) || wine_type == "sparkling" {
            return Self::sparkling(sw, ac);
        }

        if wine_type == "red" {
            return Self::red(sw, tn, it);
        }

        Self::white_rose_or_other(sw, ac, it)
    }

    pub fn classify_row(row: &FlatRow) -> TasteCategory {
        Self::classify(&row.category_label, &TasteProfile::from_row(row))
    }

    fn sparkling(sw: Option<f64>, ac: Option<f64>) -> TasteCategory {
        match sw {
            Some(s) if s <= SWEET_DRY_MAX => TasteCategory::SparklingBrut,
            Some(s) if s <= SWEET_OFF_MAX => TasteCategory::SparklingDemiSec,
            Some(_) => TasteCategory::SparklingDoux,
            None if at_least(ac, ACID_HIGH_MIN) => TasteCategory::SparklingBrut,
            None => TasteCategory::SparklingUnspecified,
        }
    }

    fn red(sw: Option<f64>, tn: Option<f64>, it: Option<f64>) -> TasteCategory {
        if at_least(tn, TANNIN_HIGH_MIN) && absent_or_at_most(sw, RED_TANNIC_SWEET_MAX) {
            return TasteCategory::TannicStructuredRed;
        }
        if at_most(tn, TANNIN_LOW_MAX) && absent_or_at_most(sw, SWEET_OFF_MAX) {
            return TasteCategory::SoftSmoothRed;
        }
        if at_least(it, BODY_FULL_MIN) && absent_or_at_most(sw, SWEET_OFF_MAX) {
            return TasteCategory::RichFullRed;
        }
        match sw {
            Some(s) if s <= SWEET_DRY_MAX => TasteCategory::DryRed,
            Some(s) if s <= SWEET_OFF_MAX => TasteCategory::OffDryRed,
            Some(_) => TasteCategory::SweetLeaningRed,
            None => TasteCategory::RedUnspecified,
        }
    }

    fn white_rose_or_other(sw: Option<f64>, ac: Option<f64>, it: Option<f64>) -> TasteCategory {
        if at_least(ac, ACID_HIGH_MIN) && at_most(sw, SWEET_DRY_MAX) {
            return TasteCategory::CrispDry;
        }
        if matches!(sw, Some(s) if s > SWEET_OFF_MAX) {
            return TasteCategory::LushSweet;
        }
        if at_least(it, BODY_FULL_MIN) && absent_or_at_most(sw, SWEET_OFF_MAX) {
            return TasteCategory::RichFullBodied;
        }
        if matches!(sw, Some(s) if s > SWEET_DRY_MAX && s <= SWEET_OFF_MAX) {
            return TasteCategory::BalancedOffDry;
        }
        if at_most(sw, SWEET_DRY_MAX) {
            return TasteCategory::DryBalanced;
        }
        if at_least(ac, ACID_HIGH_MIN) {
            return TasteCategory::BrightZesty;
        }
        TasteCategory::NeutralUnspecified
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(
        sweetness: Option<f64>,
        acidity: Option<f64>,
        tannin: Option<f64>,
        intensity: Option<f64>,
        fizziness: Option<f64>,
    ) -> TasteProfile {
        TasteProfile {
            sweetness,
            acidity,
            tannin,
            intensity,
            fizziness,
        }
    }

    fn sweet(s: f64) -> TasteProfile {
        profile(Some(s), None, None, None, None)
    }

    #[test]
    fn test_dessert_or_fortified() {
        let none = TasteProfile::default();
        assert_eq!(TasteClassifier::classify("dessert", &none), TasteCategory::DessertOrFortified);
        assert_eq!(TasteClassifier::classify(" Fortified ", &none), TasteCategory::DessertOrFortified);
        // sweetness alone is enough, even for a red
        assert_eq!(TasteClassifier::classify("red", &sweet(4.0)), TasteCategory::DessertOrFortified);
        // outranks sparkling
        let fizzy_sweet = profile(Some(4.2), None, None, None, Some(4.0));
        assert_eq!(TasteClassifier::classify("sparkling", &fizzy_sweet), TasteCategory::DessertOrFortified);
    }

    #[test]
    fn test_sparkling_bands() {
        assert_eq!(TasteClassifier::classify("sparkling", &sweet(1.0)), TasteCategory::SparklingBrut);
        assert_eq!(TasteClassifier::classify("Sparkling", &sweet(1.8)), TasteCategory::SparklingBrut);
        assert_eq!(TasteClassifier::classify("sparkling", &sweet(2.2)), TasteCategory::SparklingDemiSec);
        assert_eq!(TasteClassifier::classify("sparkling", &sweet(3.0)), TasteCategory::SparklingDoux);

        let acidic = profile(None, Some(4.0), None, None, None);
        assert_eq!(TasteClassifier::classify("sparkling", &acidic), TasteCategory::SparklingBrut);
        assert_eq!(
            TasteClassifier::classify("sparkling", &TasteProfile::default()),
            TasteCategory::SparklingUnspecified
        );

        // fizziness makes a white sparkling
        let fizzy_white = profile(Some(2.0), None, None, None, Some(3.5));
        assert_eq!(TasteClassifier::classify("white", &fizzy_white), TasteCategory::SparklingDemiSec);
    }

    #[test]
    fn test_red_cascade() {
        let tannic = profile(Some(1.0), None, Some(4.0), None, None);
        assert_eq!(TasteClassifier::classify("red", &tannic), TasteCategory::TannicStructuredRed);

        let tannic_unknown_sweetness = profile(None, None, Some(3.6), None, None);
        assert_eq!(
            TasteClassifier::classify("Red", &tannic_unknown_sweetness),
            TasteCategory::TannicStructuredRed
        );

        let soft = profile(Some(2.5), None, Some(2.0), None, None);
        assert_eq!(TasteClassifier::classify("red", &soft), TasteCategory::SoftSmoothRed);

        // too sweet for "tannic", falls through to intensity
        let rich = profile(Some(2.4), None, Some(3.9), Some(4.5), None);
        assert_eq!(TasteClassifier::classify("red", &rich), TasteCategory::RichFullRed);

        let mid_tannin = |s| profile(Some(s), None, Some(3.2), Some(3.0), None);
        assert_eq!(TasteClassifier::classify("red", &mid_tannin(1.5)), TasteCategory::DryRed);
        assert_eq!(TasteClassifier::classify("red", &mid_tannin(2.3)), TasteCategory::OffDryRed);
        assert_eq!(TasteClassifier::classify("red", &mid_tannin(3.1)), TasteCategory::SweetLeaningRed);
        assert_eq!(
            TasteClassifier::classify("red", &TasteProfile::default()),
            TasteCategory::RedUnspecified
        );
    }

    #[test]
    fn test_white_rose_and_other() {
        let crisp = profile(Some(1.2), Some(4.1), None, None, None);
        assert_eq!(TasteClassifier::classify("white", &crisp), TasteCategory::CrispDry);
        assert_eq!(TasteClassifier::classify("rose", &sweet(3.0)), TasteCategory::LushSweet);

        let full = profile(None, None, None, Some(4.4), None);
        assert_eq!(TasteClassifier::classify("white", &full), TasteCategory::RichFullBodied);

        assert_eq!(TasteClassifier::classify("white", &sweet(2.0)), TasteCategory::BalancedOffDry);
        assert_eq!(TasteClassifier::classify("white", &sweet(1.5)), TasteCategory::DryBalanced);

        let zesty = profile(None, Some(3.9), None, None, None);
        assert_eq!(TasteClassifier::classify("white", &zesty), TasteCategory::BrightZesty);
    }

    #[test]
    fn test_all_absent_unknown_type() {
        assert_eq!(
            TasteClassifier::classify("orange", &TasteProfile::default()),
            TasteCategory::NeutralUnspecified
        );
        assert_eq!(
            TasteClassifier::classify("", &TasteProfile::default()),
            TasteCategory::NeutralUnspecified
        );
    }

    #[test]
    fn test_nan_is_treated_as_absent() {
        let nan = profile(Some(f64::NAN), Some(f64::NAN), Some(f64::NAN), Some(f64::NAN), Some(f64::NAN));
        assert_eq!(TasteClassifier::classify("red", &nan), TasteCategory::RedUnspecified);
    }

    #[test]
    fn test_every_presence_combination_yields_a_label() {
        let values = [None, Some(0.0), Some(1.8), Some(2.6), Some(3.7), Some(4.5)];
        for wine_type in ["red", "white", "rose", "sparkling", "dessert", "fortified", "other"] {
            for &sw in &values {
                for &ac in &values {
                    for &tn in &values {
                        for &it in &values {
                            for &fz in &values {
                                let label = TasteClassifier::classify(wine_type, &profile(sw, ac, tn, it, fz));
                                assert!(TasteCategory::ALL.contains(&label));
                            }
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn test_classify_row_uses_category_label() {
        let row = FlatRow {
            category_label: "Red".to_string(),
            sweetness: Some(1.0),
            tannin: Some(4.0),
            ..Default::default()
        };
        assert_eq!(TasteClassifier::classify_row(&row), TasteCategory::TannicStructuredRed);
    }
}
