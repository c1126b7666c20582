pub mod category_report;
pub mod corpus_summarizer;
pub mod deduplicator;
pub mod flavor_aggregator;
pub mod frequency;
pub mod path_extractor;
pub mod record_projector;
pub mod table_writer;
pub mod taste_classifier;
pub mod text_normalizer;

pub use category_report::*;
pub use corpus_summarizer::*;
pub use deduplicator::*;
pub use flavor_aggregator::*;
pub use frequency::*;
pub use record_projector::*;
pub use table_writer::*;
pub use taste_classifier::*;
pub use text_normalizer::*;
