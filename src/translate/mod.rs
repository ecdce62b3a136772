//! Machine-translation layer: the oracle abstraction, providers, and the
//! batching engine that drives them.

mod azure;
mod batch;
mod mock;
mod oracle;

pub use azure::AzureTranslator;
pub use batch::{BatchOptions, BatchOutcome, ChunkSink, DiscardSink, translate_batches};
pub use mock::{MockMode, MockTranslator};
pub use oracle::{OracleError, Translator, validate_locale};
