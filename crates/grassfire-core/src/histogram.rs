//! Gray-level histograms
//!
//! A [`Histogram`] counts how many pixels take each of the 256 gray values.
//! Besides the raw counts it offers the derived quantities the enhancement
//! and binarization filters need: occupied range, cumulative counts and
//! the iterative-mean threshold.

use crate::pix::Pix;

/// Maximum number of refinement rounds for [`Histogram::iterative_threshold`].
const MAX_THRESHOLD_ITERATIONS: usize = 256;

/// 256-bin gray-level histogram
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Histogram {
    bins: [u32; 256],
}

impl Default for Histogram {
    fn default() -> Self {
        Self { bins: [0; 256] }
    }
}

impl Histogram {
    /// Count the gray values of `pix`.
    ///
    /// # Example
    ///
    /// ```
    /// use grassfire_core::{Histogram, Pix};
    ///
    /// let pix = Pix::new_with_value(4, 4, 7).unwrap();
    /// let hist = Histogram::from_pix(&pix);
    /// assert_eq!(hist.count(7), 16);
    /// assert_eq!(hist.total(), 16);
    /// ```
    pub fn from_pix(pix: &Pix) -> Self {
        Self::from_data(pix.data())
    }

    /// Count the gray values of a raw buffer.
    pub fn from_data(data: &[u8]) -> Self {
        let mut hist = Self::default();
        for &v in data {
            hist.bins[v as usize] += 1;
        }
        hist
    }

    /// Number of pixels with value `value`.
    #[inline]
    pub fn count(&self, value: u8) -> u32 {
        self.bins[value as usize]
    }

    /// All 256 counts, indexed by gray value.
    pub fn bins(&self) -> &[u32; 256] {
        &self.bins
    }

    /// Total number of pixels counted.
    pub fn total(&self) -> u64 {
        self.bins.iter().map(|&c| c as u64).sum()
    }

    /// Lowest gray value that occurs, `None` for an empty histogram.
    pub fn min_value(&self) -> Option<u8> {
        self.bins.iter().position(|&c| c != 0).map(|i| i as u8)
    }

    /// Highest gray value that occurs, `None` for an empty histogram.
    pub fn max_value(&self) -> Option<u8> {
        self.bins.iter().rposition(|&c| c != 0).map(|i| i as u8)
    }

    /// Running totals: entry `i` is the number of pixels with value `<= i`.
    pub fn cumulative(&self) -> [u64; 256] {
        let mut out = [0u64; 256];
        let mut acc = 0u64;
        for (slot, &c) in out.iter_mut().zip(self.bins.iter()) {
            acc += c as u64;
            *slot = acc;
        }
        out
    }

    /// Integer mean of the values in `lo..=hi`.
    ///
    /// An empty range counts as a single pixel, so its mean is 0.
    pub fn mean_in_range(&self, lo: u8, hi: u8) -> u32 {
        if lo > hi {
            return 0;
        }
        let (sum, count) = (lo..=hi).fold((0u64, 0u64), |(s, n), v| {
            let c = self.bins[v as usize] as u64;
            (s + c * v as u64, n + c)
        });
        (sum / count.max(1)) as u32
    }

    /// Select a binarization threshold by iterative mean refinement.
    ///
    /// Starts from the midpoint of the occupied range and repeatedly splits
    /// the histogram into `[min..=t]` and `(t..=max]`, moving `t` to the
    /// average of the two group means. Stops once the threshold moves by
    /// less than `epsilon`, returning the last computed value.
    ///
    /// Returns `None` for an empty histogram.
    pub fn iterative_threshold(&self, epsilon: u32) -> Option<u8> {
        let low = self.min_value()?;
        let high = self.max_value()?;
        let mut threshold = ((low as u32 + high as u32) / 2) as u8;
        log::debug!("iterative threshold: range {low}..={high}, initial {threshold}");

        for _ in 0..MAX_THRESHOLD_ITERATIONS {
            let mean_low = self.mean_in_range(low, threshold);
            let mean_high = match threshold.checked_add(1) {
                Some(next) => self.mean_in_range(next, high),
                None => 0,
            };
            let next = ((mean_low + mean_high) / 2) as u8;
            let delta = (next as i32 - threshold as i32).unsigned_abs();
            threshold = next;
            if delta < epsilon {
                log::debug!("iterative threshold converged at {threshold}");
                return Some(threshold);
            }
        }
        log::warn!("iterative threshold did not converge, using {threshold}");
        Some(threshold)
    }
}
