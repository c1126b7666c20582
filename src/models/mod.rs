pub mod data_models;
pub mod taste_category;

pub use data_models::*;
pub use taste_category::TasteCategory;
