//! Label store
//!
//! Owns the per-pixel label buffer and the per-label area table for one
//! labeling pass. Coordinates are `(row, col)`; a pixel's slot is
//! `row * width + col`, checked against the image extent on every access.
//!
//! Label 0 means "background or not yet visited". Labels are handed out
//! sequentially from 1, each pixel is labeled at most once, and the area
//! table holds exactly one entry per allocated label.

use crate::error::{RegionError, RegionResult};

/// Region identifier. 0 is reserved for background.
pub type LabelId = u32;

/// Default maximum number of regions per pass
pub const DEFAULT_LABEL_CAPACITY: u32 = 999;

/// Label buffer plus per-label area table
#[derive(Debug, Clone)]
pub struct LabelStore {
    width: u32,
    height: u32,
    capacity: u32,
    labels: Vec<LabelId>,
    /// `areas[l - 1]` is the pixel count of label `l`
    areas: Vec<usize>,
}

impl Default for LabelStore {
    fn default() -> Self {
        Self::new(DEFAULT_LABEL_CAPACITY)
    }
}

impl LabelStore {
    /// Create an empty store that allows at most `capacity` labels.
    ///
    /// The store has no image extent until [`reset`](Self::reset) is called.
    pub fn new(capacity: u32) -> Self {
        Self {
            width: 0,
            height: 0,
            capacity,
            labels: Vec::new(),
            areas: Vec::new(),
        }
    }

    /// Prepare the store for a `width x height` image.
    ///
    /// Every label is cleared to 0 and the area table is emptied. On
    /// failure the previous contents are left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`RegionError::InvalidDimensions`] if either dimension is 0 or
    /// the pixel count overflows, and a core allocation error if the label
    /// buffer cannot be allocated.
    pub fn reset(&mut self, width: u32, height: u32) -> RegionResult<()> {
        if width == 0 || height == 0 {
            return Err(RegionError::InvalidDimensions { width, height });
        }
        let len = (width as usize)
            .checked_mul(height as usize)
            .ok_or(RegionError::InvalidDimensions { width, height })?;

        if len == self.labels.len() {
            self.labels.fill(0);
        } else {
            let mut labels = Vec::new();
            labels
                .try_reserve_exact(len)
                .map_err(|_| grassfire_core::Error::AllocationFailed)?;
            labels.resize(len, 0);
            self.labels = labels;
        }
        self.width = width;
        self.height = height;
        self.areas.clear();
        Ok(())
    }

    /// Image width of the current pass.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Image height of the current pass.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Maximum number of labels per pass.
    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    /// Number of labels allocated so far.
    pub fn label_count(&self) -> u32 {
        self.areas.len() as u32
    }

    /// The label buffer, row-major.
    pub fn labels(&self) -> &[LabelId] {
        &self.labels
    }

    /// Areas of labels `1..=label_count()`, in label order.
    pub fn areas(&self) -> &[usize] {
        &self.areas
    }

    #[inline]
    fn index(&self, row: u32, col: u32) -> RegionResult<usize> {
        if row >= self.height || col >= self.width {
            return Err(RegionError::OutOfBounds {
                row,
                col,
                width: self.width,
                height: self.height,
            });
        }
        Ok(row as usize * self.width as usize + col as usize)
    }

    /// Label at `(row, col)`; 0 for background or unvisited pixels.
    ///
    /// # Errors
    ///
    /// Returns [`RegionError::OutOfBounds`] outside the image.
    pub fn get_label(&self, row: u32, col: u32) -> RegionResult<LabelId> {
        Ok(self.labels[self.index(row, col)?])
    }

    /// Assign `label` to the unlabeled pixel `(row, col)`.
    ///
    /// # Errors
    ///
    /// - [`RegionError::OutOfBounds`] outside the image
    /// - [`RegionError::AlreadyLabeled`] if the pixel already has a label
    /// - [`RegionError::UnknownLabel`] if `label` is 0 or not yet allocated
    pub fn set_label(&mut self, row: u32, col: u32, label: LabelId) -> RegionResult<()> {
        let i = self.index(row, col)?;
        if label == 0 || label > self.label_count() {
            return Err(RegionError::UnknownLabel(label));
        }
        let current = self.labels[i];
        if current != 0 {
            return Err(RegionError::AlreadyLabeled {
                row,
                col,
                label: current,
            });
        }
        self.labels[i] = label;
        Ok(())
    }

    /// Allocate the next label with an area of 0.
    ///
    /// # Errors
    ///
    /// Returns [`RegionError::LabelCapacityExceeded`] once `capacity` labels
    /// have been handed out in this pass.
    pub fn new_label(&mut self) -> RegionResult<LabelId> {
        if self.label_count() >= self.capacity {
            return Err(RegionError::LabelCapacityExceeded {
                capacity: self.capacity,
            });
        }
        self.areas.push(0);
        Ok(self.label_count())
    }

    /// Add one pixel to the area of `label`.
    ///
    /// # Errors
    ///
    /// Returns [`RegionError::UnknownLabel`] if `label` is not allocated.
    pub fn increment_area(&mut self, label: LabelId) -> RegionResult<()> {
        let slot = label
            .checked_sub(1)
            .and_then(|i| self.areas.get_mut(i as usize))
            .ok_or(RegionError::UnknownLabel(label))?;
        *slot += 1;
        Ok(())
    }

    /// Pixel count of `label`; 0 for background or unallocated labels.
    pub fn area_of(&self, label: LabelId) -> usize {
        label
            .checked_sub(1)
            .and_then(|i| self.areas.get(i as usize))
            .copied()
            .unwrap_or(0)
    }

    /// Label with the largest area, ties going to the lowest label.
    ///
    /// Returns `None` when no labels have been allocated.
    pub fn largest_label(&self) -> Option<LabelId> {
        let mut best: Option<(LabelId, usize)> = None;
        for (i, &area) in self.areas.iter().enumerate() {
            if best.is_none_or(|(_, a)| area > a) {
                best = Some((i as LabelId + 1, area));
            }
        }
        best.map(|(label, _)| label)
    }
}
