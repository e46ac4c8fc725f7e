//! Sample-to-band allocation.
//!
//! Every band first receives a guaranteed floor of samples; whatever is left
//! is handed out in proportion to `2 * 2^i`, so each higher band gets twice
//! the marginal share of the one below it (roughly one octave per band).
//! Integer truncation is absorbed by the last band, which keeps
//! `sum(counts) == sample_count` exact.

use std::ops::Range;

use log::debug;

/// Integer linear interpolation of `value` from one range onto another.
///
/// The product is formed in 128-bit arithmetic before dividing and the
/// quotient truncates toward zero. A degenerate source range maps to `to_min`.
pub fn remap(value: i64, from_min: i64, from_max: i64, to_min: i64, to_max: i64) -> i64 {
    if from_max == from_min {
        return to_min;
    }
    let scaled = (value - from_min) as i128 * (to_max - to_min) as i128
        / (from_max - from_min) as i128;
    to_min + scaled as i64
}

/// Number of raw samples assigned to each band, in band order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BandAllocation {
    counts: Vec<usize>,
}

impl BandAllocation {
    /// Compute the allocation for a configuration triple.
    ///
    /// This is a pure function of its arguments and does not clamp them.
    /// `band_count` is expected to be small (the analyser caps it at 16);
    /// a `band_count` of zero yields an empty allocation.
    pub fn compute(sample_count: usize, band_count: usize, minimum_sample_count: usize) -> Self {
        if band_count == 0 {
            return Self::default();
        }
        debug_assert!(band_count < 62, "band weights would overflow");

        let total = sample_count as i64;
        let (mut counts, available) = initial_counts(total, band_count, minimum_sample_count as i64);

        if available > 0 {
            distribute_remainder(&mut counts, available);
        }

        correct_total(&mut counts, total);

        Self {
            counts: counts
                .into_iter()
                .map(|count| usize::try_from(count).unwrap_or(0))
                .collect(),
        }
    }

    /// Per-band sample counts
    pub fn counts(&self) -> &[usize] {
        &self.counts
    }

    /// Number of bands
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Total samples consumed by all bands
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    /// Contiguous sample index range consumed by each band, in band order
    pub fn ranges(&self) -> impl Iterator<Item = Range<usize>> + '_ {
        self.counts.iter().scan(0usize, |start, &count| {
            let range = *start..*start + count;
            *start += count;
            Some(range)
        })
    }
}

/// Phase 1: hand every band the floor, or an even split when the floor
/// cannot be honoured. Returns the counts and the samples still unassigned.
fn initial_counts(sample_count: i64, band_count: usize, minimum_sample_count: i64) -> (Vec<i64>, i64) {
    let bands = band_count as i64;
    let can_honour_floor = minimum_sample_count * bands < sample_count;
    let base = if can_honour_floor {
        minimum_sample_count
    } else {
        sample_count / bands
    };

    (vec![base; band_count], sample_count - base * bands)
}

/// Phase 2: spread `available` samples with weights `2 * 2^i`
fn distribute_remainder(counts: &mut [i64], available: i64) {
    let weights: Vec<i64> = (0..counts.len()).map(|i| (1i64 << i) * 2).collect();
    let total_weight: i64 = weights.iter().sum();

    for (count, &weight) in counts.iter_mut().zip(&weights) {
        *count += remap(weight, 0, total_weight, 0, available);
    }
}

/// Phase 3: the last band absorbs whatever truncation left over
fn correct_total(counts: &mut [i64], sample_count: i64) {
    let assigned: i64 = counts.iter().sum();
    if assigned != sample_count {
        if let Some(last) = counts.last_mut() {
            *last += sample_count - assigned;
        }
    }
}

/// Allocation memoised per `(sample_count, band_count, minimum_sample_count)`
#[derive(Debug, Default)]
pub struct AllocationCache {
    key: Option<(usize, usize, usize)>,
    allocation: BandAllocation,
}

impl AllocationCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocation for the triple, recomputed only when the triple changes
    pub fn get(
        &mut self,
        sample_count: usize,
        band_count: usize,
        minimum_sample_count: usize,
    ) -> &BandAllocation {
        let key = (sample_count, band_count, minimum_sample_count);
        if self.key != Some(key) {
            self.allocation = BandAllocation::compute(sample_count, band_count, minimum_sample_count);
            self.key = Some(key);
            debug!(
                "band allocation for {} samples / {} bands (floor {}): {:?}",
                sample_count,
                band_count,
                minimum_sample_count,
                self.allocation.counts()
            );
        }
        &self.allocation
    }

    /// Forget the cached allocation
    pub fn invalidate(&mut self) {
        self.key = None;
    }
}
