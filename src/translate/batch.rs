//! Batched oracle orchestration.
//!
//! Partitions a keyed entry list into fixed-size chunks, drives the oracle
//! chunk by chunk, retries rate-limited chunks with exponential backoff, and
//! pauses between successful chunks to respect upstream throughput limits.
//! Individual chunk failures never abort the whole list; only sink
//! (persistence) failures propagate.

use std::collections::BTreeMap;
use std::time::Duration;

use tokio::time::sleep;

use super::oracle::{OracleError, Translator};
use crate::store::StoreError;

/// Chunking and pacing knobs.
#[derive(Debug, Clone)]
pub struct BatchOptions {
    /// Maximum entries per oracle call.
    pub batch_size: usize,
    /// Oracle invocations per chunk before a rate-limited chunk is given up.
    pub max_retries: u32,
    /// First backoff delay; doubles on each further rate-limited attempt.
    pub base_delay: Duration,
    /// Pause after each successful chunk that is not the last.
    pub batch_pause: Duration,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            batch_size: 100,
            max_retries: 3,
            base_delay: Duration::from_secs(10),
            batch_pause: Duration::from_secs(3),
        }
    }
}

/// Result of one batched run: successfully translated entries and the keys of
/// every chunk that failed.
#[derive(Debug, Default)]
pub struct BatchOutcome {
    pub merged: BTreeMap<String, String>,
    pub failed_keys: Vec<String>,
}

/// Receives each successfully translated chunk before the next chunk starts,
/// so partial progress is durable if the process dies mid-list.
pub trait ChunkSink {
    fn commit(&mut self, chunk: &[(String, String)]) -> Result<(), StoreError>;
}

/// Sink for callers that only want the merged outcome.
#[derive(Debug, Default)]
pub struct DiscardSink;

impl ChunkSink for DiscardSink {
    fn commit(&mut self, _chunk: &[(String, String)]) -> Result<(), StoreError> {
        Ok(())
    }
}

/// Translate `entries` from `from` to `to` in chunks of at most
/// `opts.batch_size`.
///
/// Each chunk is zipped key-to-result in order (the oracle contract is
/// order-preserving and 1:1; only the length is re-checked). A mismatched
/// length or a generic oracle failure fails the chunk without retry; rate
/// limiting retries the same chunk up to `opts.max_retries` invocations with
/// doubling backoff. Failed chunks land in `failed_keys` and processing
/// continues.
pub async fn translate_batches(
    oracle: &dyn Translator,
    from: &str,
    to: &str,
    entries: &[(String, String)],
    opts: &BatchOptions,
    sink: &mut dyn ChunkSink,
) -> Result<BatchOutcome, StoreError> {
    let mut outcome = BatchOutcome::default();
    let chunk_size = opts.batch_size.max(1);
    let chunks: Vec<&[(String, String)]> = entries.chunks(chunk_size).collect();
    let total = chunks.len();

    for (index, chunk) in chunks.iter().enumerate() {
        match translate_chunk(oracle, from, to, chunk, opts).await {
            Ok(translated) => {
                sink.commit(&translated)?;
                outcome.merged.extend(translated);
                if index + 1 < total {
                    sleep(opts.batch_pause).await;
                }
            }
            Err(_) => {
                outcome
                    .failed_keys
                    .extend(chunk.iter().map(|(key, _)| key.clone()));
            }
        }
    }
    Ok(outcome)
}

async fn translate_chunk(
    oracle: &dyn Translator,
    from: &str,
    to: &str,
    chunk: &[(String, String)],
    opts: &BatchOptions,
) -> Result<Vec<(String, String)>, OracleError> {
    let texts: Vec<String> = chunk.iter().map(|(_, value)| value.clone()).collect();
    let mut delay = opts.base_delay;

    for _attempt in 0..opts.max_retries {
        match oracle.translate(from, to, &texts).await {
            Ok(results) => {
                if results.len() != texts.len() {
                    return Err(OracleError::Failed(format!(
                        "expected {} translations, got {}",
                        texts.len(),
                        results.len()
                    )));
                }
                return Ok(chunk
                    .iter()
                    .zip(results)
                    .map(|((key, _), value)| (key.clone(), value))
                    .collect());
            }
            Err(OracleError::RateLimited) => {
                sleep(delay).await;
                delay *= 2;
            }
            Err(err) => return Err(err),
        }
    }
    Err(OracleError::RateLimited)
}
