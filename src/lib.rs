//! Exhaustive search for fifth-power counterexamples to Euler's
//! sum-of-powers conjecture.
//!
//! Euler conjectured that at least k kth powers are needed to sum to a kth
//! power. Lander and Parkin disproved it for k = 5 in 1966 by direct search:
//! `27^5 + 84^5 + 110^5 + 133^5 = 144^5`. This crate re-runs that hunt over
//! a configurable base range `[2, N)`: it precomputes every fifth power,
//! enumerates all 4-multisets of bases with four nested counters, and tests
//! each candidate sum for membership in the power table through a bitmap
//! pre-filter backed by an exact index.
//!
//! The library core performs no I/O; progress and discoveries are pushed
//! into a caller-supplied [`EventSink`].

pub mod config;
pub mod engine;
pub mod error;
pub mod filter;
pub mod index;
pub mod powers;
pub mod report;
pub mod wide;

use std::time::Instant;

pub use config::{IndexStrategy, ResolvedWidth, SearchConfig, Width, MAX_BASE_U64};
pub use engine::{combination_count, DuplicateList, SearchEngine};
pub use error::QuinticError;
pub use filter::BitFilter;
pub use index::{HashIndex, Lookup, MembershipIndex, ScanIndex};
pub use powers::PowerTable;
pub use report::{Discovery, EventSink, NullSink, Progress, Summary};
pub use wide::{Wide128, WideInt};

/// Validate the configuration, build the table and index, and run the
/// search to completion.
///
/// Scalar width and index strategy are resolved here, so callers only deal
/// in configuration values. Invalid parameters are reported before any
/// table construction starts.
pub fn run_search(
    config: &SearchConfig,
    sink: &mut dyn EventSink,
) -> Result<Summary, QuinticError> {
    config.validate()?;
    match config.resolved_width()? {
        ResolvedWidth::U64 => run_with_width::<u64>(config, sink),
        ResolvedWidth::U128 => run_with_width::<Wide128>(config, sink),
    }
}

fn run_with_width<W: WideInt>(
    config: &SearchConfig,
    sink: &mut dyn EventSink,
) -> Result<Summary, QuinticError> {
    let build_start = Instant::now();
    let table: PowerTable<W> = PowerTable::build(config.limit);

    let summary = match config.strategy {
        IndexStrategy::Hash => {
            let index = HashIndex::build(&table, config.filter_bits);
            sink.on_table_ready(config.limit, build_start.elapsed());
            SearchEngine::new(&table, index, config).run(sink)
        }
        IndexStrategy::Scan => {
            let index = ScanIndex::build(&table, config.filter_bits);
            sink.on_table_ready(config.limit, build_start.elapsed());
            SearchEngine::new(&table, index, config).run(sink)
        }
    };
    Ok(summary)
}
