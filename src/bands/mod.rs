//! Spectral-to-band reduction.
//!
//! Converts a fixed-size magnitude spectrum into a handful of bands whose
//! widths grow exponentially with frequency.

mod allocation;
mod reducer;

pub use allocation::{remap, AllocationCache, BandAllocation};
pub use reducer::{average_bands, BandReducer};
