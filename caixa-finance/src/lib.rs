//! caixa-finance: text normalizer, amount extractor, keyword pattern table,
//! transaction classifier and summary aggregation

pub mod amount;
pub mod classifier;
pub mod normalize;
pub mod patterns;
pub mod summary;

pub use amount::{AmountError, AmountLocale, extract_amount, extract_chat_amount, parse_csv_amount};
pub use classifier::{ClassificationInput, ClassificationResult, Classifier};
pub use normalize::{normalize, normalize_csv};
pub use patterns::{CategoryPattern, PatternTable, TableError};
pub use summary::summarize;
