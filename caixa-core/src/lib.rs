//! caixa-core: Core record types shared by the classifier, importers and webhook

pub mod money;
pub mod summary;
pub mod transaction;

pub use money::format_brl;
pub use summary::{CategoryTotal, MonthTotal, Summary};
pub use transaction::{RecordError, Source, TransactionRecord, TransactionType, FALLBACK_CATEGORY};
