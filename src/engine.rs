//! The exhaustive search loop.
//!
//! Four nested counters enumerate every multiset of four bases from
//! `[2, limit)` exactly once. `ind0` is the innermost and largest counter;
//! on overflow it carries outward into `ind1`, `ind2`, `ind3`, each carry
//! resuming the inner counters at the carried value so the chain
//! `ind3 <= ind2 <= ind1 <= ind0` holds throughout. The three outer powers
//! are cached in `base_sum` and only recomputed on a carry, so the hot path
//! is one wide addition and one membership lookup per candidate.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::config::SearchConfig;
use crate::index::{Lookup, MembershipIndex};
use crate::powers::PowerTable;
use crate::report::{Discovery, EventSink, Progress, Summary};
use crate::wide::WideInt;

/// Number of candidate sums a search over `[2, limit)` evaluates: the count
/// of 4-multisets over `limit - 2` values, `C(limit - 2 + 3, 4)`.
pub fn combination_count(limit: u32) -> u64 {
    let m = limit.saturating_sub(2) as u128;
    ((m * (m + 1) * (m + 2) * (m + 3)) / 24) as u64
}

/// Result bases already reported, used to suppress scaled repeats.
///
/// Any solution multiplied through by a constant is another valid but
/// non-primitive solution; its right-hand base is an exact multiple of the
/// primitive one, so a divisibility check against prior results drops it.
#[derive(Debug, Clone, Default)]
pub struct DuplicateList {
    bases: Vec<u32>,
}

impl DuplicateList {
    pub fn is_duplicate(&self, base: u32) -> bool {
        self.bases.iter().any(|&known| base % known == 0)
    }

    pub fn record(&mut self, base: u32) {
        self.bases.push(base);
    }

    pub fn len(&self) -> usize {
        self.bases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bases.is_empty()
    }
}

pub struct SearchEngine<'a, W, I> {
    powers: &'a PowerTable<W>,
    index: I,
    progress_mask: u64,
    distinct_only: bool,
    stop: Option<Arc<AtomicBool>>,
    duplicates: DuplicateList,
}

impl<'a, W: WideInt, I: MembershipIndex<W>> SearchEngine<'a, W, I> {
    pub fn new(powers: &'a PowerTable<W>, index: I, config: &SearchConfig) -> Self {
        SearchEngine {
            powers,
            index,
            progress_mask: config.progress_mask(),
            distinct_only: config.distinct_only,
            stop: config.stop.clone(),
            duplicates: DuplicateList::default(),
        }
    }

    /// Run the search to exhaustion (or until the stop flag is raised) and
    /// return the final summary. Total and infallible for any table the
    /// config layer admits.
    pub fn run(&mut self, sink: &mut dyn EventSink) -> Summary {
        let limit = self.powers.len();
        let start = Instant::now();
        let mut iterations = 0u64;
        let mut filter_hits = 0u64;
        let mut discoveries = Vec::new();
        let mut interrupted = false;

        // Bases below 2 are excluded, so limits of 2 or less leave nothing
        // to enumerate.
        if limit > 2 {
            let mut ind0 = 2u32;
            let mut ind1 = 2u32;
            let mut ind2 = 2u32;
            let mut ind3 = 2u32;
            let mut base_sum =
                self.powers.value(ind1) + self.powers.value(ind2) + self.powers.value(ind3);

            loop {
                iterations += 1;
                let sum = base_sum + self.powers.value(ind0);
                let hit = self.index.lookup(sum);
                if hit.passed_filter() {
                    filter_hits += 1;
                    if let Lookup::Present(e) = hit {
                        let found = Discovery {
                            a: ind3,
                            b: ind2,
                            c: ind1,
                            d: ind0,
                            e,
                            iterations,
                            elapsed: start.elapsed(),
                        };
                        if self.admits(ind0, ind1, ind2, ind3) {
                            if self.duplicates.is_duplicate(e) {
                                sink.on_duplicate(&found);
                            } else {
                                self.duplicates.record(e);
                                sink.on_discovery(&found);
                                discoveries.push(found);
                            }
                        }
                    }
                }

                if iterations & self.progress_mask == 0 {
                    let elapsed = start.elapsed();
                    sink.on_progress(&Progress {
                        counters: [ind3, ind2, ind1, ind0],
                        iterations,
                        elapsed,
                        per_ms: per_ms(iterations, elapsed),
                        filter_ratio: iterations / filter_hits.max(1),
                    });
                }

                ind0 += 1;
                if ind0 < limit {
                    continue;
                }
                ind1 += 1;
                ind0 = ind1;
                if ind1 >= limit {
                    ind2 += 1;
                    ind1 = ind2;
                    ind0 = ind2;
                }
                if ind2 >= limit {
                    ind3 += 1;
                    ind2 = ind3;
                    ind1 = ind3;
                    ind0 = ind3;
                }
                if ind3 >= limit {
                    break;
                }
                if self.stopped() {
                    interrupted = true;
                    break;
                }
                base_sum =
                    self.powers.value(ind1) + self.powers.value(ind2) + self.powers.value(ind3);
            }
        }

        let elapsed = start.elapsed();
        Summary {
            limit,
            iterations,
            filter_hits,
            discoveries,
            elapsed,
            per_ms: per_ms(iterations, elapsed),
            interrupted,
        }
    }

    fn admits(&self, ind0: u32, ind1: u32, ind2: u32, ind3: u32) -> bool {
        // Counters are sorted, so repeated addends are always adjacent.
        !self.distinct_only || (ind3 != ind2 && ind2 != ind1 && ind1 != ind0)
    }

    fn stopped(&self) -> bool {
        self.stop
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::Relaxed))
    }
}

fn per_ms(iterations: u64, elapsed: Duration) -> u64 {
    iterations / (elapsed.as_millis().max(1) as u64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SearchConfig;
    use crate::index::HashIndex;
    use crate::report::NullSink;

    #[test]
    fn combination_counts() {
        assert_eq!(combination_count(2), 0);
        assert_eq!(combination_count(3), 1);
        assert_eq!(combination_count(4), 5);
        // N = 150 is the Lander-Parkin range.
        assert_eq!(combination_count(150), 20_811_575);
    }

    #[test]
    fn duplicate_list_suppresses_multiples() {
        let mut list = DuplicateList::default();
        assert!(list.is_empty());
        assert!(!list.is_duplicate(144));
        list.record(144);
        assert_eq!(list.len(), 1);
        assert!(list.is_duplicate(144));
        assert!(list.is_duplicate(288));
        assert!(list.is_duplicate(1440));
        assert!(!list.is_duplicate(145));
        assert!(!list.is_duplicate(72));
    }

    fn run_to_exhaustion(limit: u32) -> Summary {
        let config = SearchConfig::with_limit(limit);
        let table: PowerTable<u64> = PowerTable::build(limit);
        let index = HashIndex::build(&table, 16);
        SearchEngine::new(&table, index, &config).run(&mut NullSink)
    }

    #[test]
    fn limit_two_is_an_empty_search() {
        let summary = run_to_exhaustion(2);
        assert_eq!(summary.iterations, 0);
        assert!(summary.discoveries.is_empty());
        assert!(!summary.interrupted);
    }

    #[test]
    fn tiny_searches_visit_every_combination() {
        for limit in [3, 4, 7, 20] {
            let summary = run_to_exhaustion(limit);
            assert_eq!(summary.iterations, combination_count(limit));
            assert!(summary.discoveries.is_empty());
        }
    }

    #[test]
    fn raised_stop_flag_interrupts_after_first_carry() {
        let flag = Arc::new(AtomicBool::new(true));
        let config = SearchConfig {
            stop: Some(flag),
            ..SearchConfig::with_limit(60)
        };
        let table: PowerTable<u64> = PowerTable::build(60);
        let index = HashIndex::build(&table, 16);
        let summary = SearchEngine::new(&table, index, &config).run(&mut NullSink);
        assert!(summary.interrupted);
        // One inner sweep runs before the first carry checks the flag.
        assert_eq!(summary.iterations, 58);
    }
}
