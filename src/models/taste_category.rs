use serde::{Deserialize, Serialize};
use std::fmt;

/// Closed set of taste labels produced by the taste classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TasteCategory {
    #[serde(rename = "dessert or fortified")]
    DessertOrFortified,
    #[serde(rename = "sparkling brut (dry)")]
    SparklingBrut,
    #[serde(rename = "sparkling demi-sec (off-dry)")]
    SparklingDemiSec,
    #[serde(rename = "sparkling doux (sweet)")]
    SparklingDoux,
    #[serde(rename = "sparkling (unspecified)")]
    SparklingUnspecified,
    #[serde(rename = "tannic & structured red")]
    TannicStructuredRed,
    #[serde(rename = "soft & smooth red")]
    SoftSmoothRed,
    #[serde(rename = "rich & full red")]
    RichFullRed,
    #[serde(rename = "dry red")]
    DryRed,
    #[serde(rename = "off-dry red")]
    OffDryRed,
    #[serde(rename = "sweet-leaning red")]
    SweetLeaningRed,
    #[serde(rename = "red (unspecified)")]
    RedUnspecified,
    #[serde(rename = "crisp & dry")]
    CrispDry,
    #[serde(rename = "lush & sweet")]
    LushSweet,
    #[serde(rename = "rich & full-bodied")]
    RichFullBodied,
    #[serde(rename = "balanced (off-dry)")]
    BalancedOffDry,
    #[serde(rename = "dry & balanced")]
    DryBalanced,
    #[serde(rename = "bright & zesty")]
    BrightZesty,
    #[serde(rename = "neutral or unspecified")]
    NeutralUnspecified,
}

impl TasteCategory {
    pub const ALL: [TasteCategory; 19] = [
        TasteCategory::DessertOrFortified,
        TasteCategory::SparklingBrut,
        TasteCategory::SparklingDemiSec,
        TasteCategory::SparklingDoux,
        TasteCategory::SparklingUnspecified,
        TasteCategory::TannicStructuredRed,
        TasteCategory::SoftSmoothRed,
        TasteCategory::RichFullRed,
        TasteCategory::DryRed,
        TasteCategory::OffDryRed,
        TasteCategory::SweetLeaningRed,
        TasteCategory::RedUnspecified,
        TasteCategory::CrispDry,
        TasteCategory::LushSweet,
        TasteCategory::RichFullBodied,
        TasteCategory::BalancedOffDry,
        TasteCategory::DryBalanced,
        TasteCategory::BrightZesty,
        TasteCategory::NeutralUnspecified,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TasteCategory::DessertOrFortified => "dessert or fortified",
            TasteCategory::SparklingBrut => "sparkling brut (dry)",
            TasteCategory::SparklingDemiSec => "sparkling demi-sec (off-dry)",
            TasteCategory::SparklingDoux => "sparkling doux (sweet)",
            TasteCategory::SparklingUnspecified => "sparkling (unspecified)",
            TasteCategory::TannicStructuredRed => "tannic & structured red",
            TasteCategory::SoftSmoothRed => "soft & smooth red",
            TasteCategory::RichFullRed => "rich & full red",
            TasteCategory::DryRed => "dry red",
            TasteCategory::OffDryRed => "off-dry red",
            TasteCategory::SweetLeaningRed => "sweet-leaning red",
            TasteCategory::RedUnspecified => "red (unspecified)",
            TasteCategory::CrispDry => "crisp & dry",
            TasteCategory::LushSweet => "lush & sweet",
            TasteCategory::RichFullBodied => "rich & full-bodied",
            TasteCategory::BalancedOffDry => "balanced (off-dry)",
            TasteCategory::DryBalanced => "dry & balanced",
            TasteCategory::BrightZesty => "bright & zesty",
            TasteCategory::NeutralUnspecified => "neutral or unspecified",
        }
    }
}

impl fmt::Display for TasteCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
