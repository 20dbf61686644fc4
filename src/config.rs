//! Runtime configuration for a search run.

use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use crate::error::QuinticError;

/// Largest base whose fifth power still fits in a `u64`.
pub const MAX_BASE_U64: u64 = 7131;

/// Scalar width the search runs at. `Auto` picks the narrowest width that
/// cannot wrap for the configured limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Width {
    #[default]
    Auto,
    U64,
    U128,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolvedWidth {
    U64,
    U128,
}

/// Exact-stage strategy behind the bit filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IndexStrategy {
    #[default]
    Hash,
    Scan,
}

/// Parameters of one search run. Validation happens up front, before any
/// table is built; a config that passes [`SearchConfig::validate`] cannot
/// fail later.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Exclusive upper bound on tested bases; counters range over `[2, limit)`.
    pub limit: u32,
    pub width: Width,
    pub strategy: IndexStrategy,
    /// log2 of the rejection bitmap size in bits.
    pub filter_bits: u8,
    /// Progress is emitted every `2^progress_shift` iterations.
    pub progress_shift: u8,
    /// Reject solutions in which two or more addends coincide.
    pub distinct_only: bool,
    /// Cooperative cancellation flag, checked between outer-loop carries.
    pub stop: Option<Arc<AtomicBool>>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            limit: 150,
            width: Width::default(),
            strategy: IndexStrategy::default(),
            filter_bits: 24,
            progress_shift: 26,
            distinct_only: false,
            stop: None,
        }
    }
}

impl SearchConfig {
    pub fn with_limit(limit: u32) -> Self {
        SearchConfig {
            limit,
            ..SearchConfig::default()
        }
    }

    fn fits_u64(&self) -> bool {
        self.limit as u64 <= MAX_BASE_U64 + 1
    }

    pub fn validate(&self) -> Result<(), QuinticError> {
        if self.limit <= 1 {
            return Err(QuinticError::Config(format!(
                "search limit must be at least 2, got {}",
                self.limit
            )));
        }
        if self.width == Width::U64 && !self.fits_u64() {
            return Err(QuinticError::Config(format!(
                "limit {} exceeds the 64-bit range: bases above {} need 128-bit arithmetic",
                self.limit, MAX_BASE_U64
            )));
        }
        if !(8..=30).contains(&self.filter_bits) {
            return Err(QuinticError::Config(format!(
                "filter_bits must be within 8..=30, got {}",
                self.filter_bits
            )));
        }
        if self.progress_shift > 62 {
            return Err(QuinticError::Config(format!(
                "progress_shift must be at most 62, got {}",
                self.progress_shift
            )));
        }
        Ok(())
    }

    /// Concrete width for this run. Errors exactly when [`validate`] does.
    ///
    /// [`validate`]: SearchConfig::validate
    pub fn resolved_width(&self) -> Result<ResolvedWidth, QuinticError> {
        match self.width {
            Width::U64 if self.fits_u64() => Ok(ResolvedWidth::U64),
            Width::U64 => Err(QuinticError::Config(format!(
                "limit {} exceeds the 64-bit range: bases above {} need 128-bit arithmetic",
                self.limit, MAX_BASE_U64
            ))),
            Width::U128 => Ok(ResolvedWidth::U128),
            Width::Auto if self.fits_u64() => Ok(ResolvedWidth::U64),
            Width::Auto => Ok(ResolvedWidth::U128),
        }
    }

    pub fn progress_mask(&self) -> u64 {
        (1u64 << self.progress_shift) - 1
    }
}
