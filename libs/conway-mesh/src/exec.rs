//! # Parallel Executor
//!
//! Chunked fan-out/merge over an index range. Both the geometry calculators
//! and the canonicalizer route their per-face and per-edge work through
//! [`try_map_chunked`], which guarantees:
//!
//! - results are merged in index order regardless of chunk completion order;
//! - a failing work item fails the whole call (fail-fast), discarding the
//!   results of completed chunks;
//! - serial and chunked execution produce identical output, so the
//!   configuration only affects wall-clock time.
//!
//! The configuration is an explicit [`Copy`] value passed at each call site
//! rather than process-wide state, so a call always sees one consistent
//! snapshot.

use rayon::prelude::*;

use config::constants::{DEFAULT_MAX_CHUNKS, DEFAULT_MIN_PARALLEL_WORK};

use crate::error::Result;

// =============================================================================
// CONFIG
// =============================================================================

/// Parallel execution configuration.
///
/// # Example
///
/// ```rust
/// use conway_mesh::ExecConfig;
///
/// let cfg = ExecConfig::default();
/// assert!(cfg.parallel);
/// assert!(!ExecConfig::serial().parallel);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExecConfig {
    /// Master switch; when false every call runs as a single chunk.
    pub parallel: bool,
    /// Upper bound on the number of concurrently processed chunks.
    pub max_chunks: usize,
    /// Minimum workload before fan-out is worth the overhead.
    pub min_parallel_work: usize,
}

impl ExecConfig {
    /// A configuration that always executes serially.
    pub fn serial() -> Self {
        Self {
            parallel: false,
            ..Self::default()
        }
    }
}

impl Default for ExecConfig {
    fn default() -> Self {
        Self {
            parallel: true,
            max_chunks: DEFAULT_MAX_CHUNKS,
            min_parallel_work: DEFAULT_MIN_PARALLEL_WORK,
        }
    }
}

// =============================================================================
// CHUNKED MAP
// =============================================================================

/// Applies `work` to every index in `[0, count)` and collects the results in
/// index order.
///
/// Below the configured workload threshold (or with parallelism disabled)
/// the whole range runs as one chunk on the calling thread. Otherwise the
/// range is split into at most `max_chunks` contiguous chunks executed on
/// the rayon pool; the first failing item aborts the call.
pub fn try_map_chunked<T, F>(count: usize, cfg: &ExecConfig, work: F) -> Result<Vec<T>>
where
    T: Send,
    F: Fn(usize) -> Result<T> + Sync,
{
    if count == 0 {
        return Ok(Vec::new());
    }
    if !cfg.parallel || cfg.max_chunks <= 1 || count < cfg.min_parallel_work {
        return (0..count).map(&work).collect();
    }

    let chunk_count = cfg.max_chunks.min(count);
    let chunk_len = count.div_ceil(chunk_count);
    let chunks: Vec<std::ops::Range<usize>> = (0..chunk_count)
        .map(|c| (c * chunk_len)..((c + 1) * chunk_len).min(count))
        .filter(|range| !range.is_empty())
        .collect();

    // Chunk results come back tagged by position in `chunks`, so the merge
    // below reassembles index order no matter which chunk finished first.
    let parts: Vec<Vec<T>> = chunks
        .into_par_iter()
        .map(|range| range.map(&work).collect::<Result<Vec<T>>>())
        .collect::<Result<Vec<Vec<T>>>>()?;

    let mut merged = Vec::with_capacity(count);
    for part in parts {
        merged.extend(part);
    }
    Ok(merged)
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConwayError;

    fn forced_parallel(max_chunks: usize) -> ExecConfig {
        ExecConfig {
            parallel: true,
            max_chunks,
            min_parallel_work: 1,
        }
    }

    #[test]
    fn test_zero_count_is_empty_for_any_config() {
        for cfg in [ExecConfig::default(), ExecConfig::serial(), forced_parallel(3)] {
            let result: Vec<usize> = try_map_chunked(0, &cfg, |i| Ok(i)).unwrap();
            assert!(result.is_empty());
        }
    }

    #[test]
    fn test_output_matches_serial_for_any_chunking() {
        let expected: Vec<usize> = (0..97).map(|i| i * i).collect();
        for chunks in [1, 2, 3, 8, 97, 200] {
            let cfg = forced_parallel(chunks);
            let result = try_map_chunked(97, &cfg, |i| Ok(i * i)).unwrap();
            assert_eq!(result, expected, "chunk count {chunks}");
        }
    }

    #[test]
    fn test_below_threshold_runs_serially() {
        let cfg = ExecConfig {
            parallel: true,
            max_chunks: 4,
            min_parallel_work: 1000,
        };
        let result = try_map_chunked(10, &cfg, |i| Ok(i + 1)).unwrap();
        assert_eq!(result, (1..=10).collect::<Vec<_>>());
    }

    #[test]
    fn test_fail_fast_surfaces_error() {
        let cfg = forced_parallel(4);
        let result: Result<Vec<usize>> = try_map_chunked(50, &cfg, |i| {
            if i == 33 {
                Err(ConwayError::internal("boom"))
            } else {
                Ok(i)
            }
        });
        assert!(matches!(result, Err(ConwayError::Internal { .. })));
    }

    #[test]
    fn test_serial_failure_also_fails() {
        let result: Result<Vec<usize>> =
            try_map_chunked(5, &ExecConfig::serial(), |_| Err(ConwayError::internal("boom")));
        assert!(result.is_err());
    }
}
