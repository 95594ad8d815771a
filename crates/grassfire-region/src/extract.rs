//! Region extraction
//!
//! Discovers the 8-connected foreground regions of a binary image and
//! records them in a [`LabelStore`].
//!
//! The image is scanned row-major. Each unlabeled foreground pixel seeds a
//! new region that is grown depth-first with an explicit coordinate stack:
//! the walk always steps to the first unlabeled foreground neighbor of the
//! pixel on top of the stack, and backs up one entry when there is none.
//! Every pixel is pushed and popped at most once, so a pass costs
//! O(width * height) regardless of region shape.

use crate::classify::{LabelingMode, render};
use crate::error::{RegionError, RegionResult};
use crate::store::{DEFAULT_LABEL_CAPACITY, LabelId, LabelStore};

/// Default area above which a region survives [`LabelingMode::AreaThreshold`]
pub const DEFAULT_AREA_THRESHOLD: usize = 500;

/// 8-neighborhood offsets as `(d_row, d_col)`
const NEIGHBORS: [(i32, i32); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Options for connected-component labeling
#[derive(Debug, Clone)]
pub struct LabelingOptions {
    /// Maximum number of regions in one pass
    pub capacity: u32,
    /// Regions with more pixels than this survive `AreaThreshold`
    pub area_threshold: usize,
    /// Input value that marks a foreground pixel
    pub foreground: u8,
    /// Output value for pixels of selected regions
    pub object_value: u8,
    /// Output value everything else is reset to
    pub blank_value: u8,
}

impl Default for LabelingOptions {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_LABEL_CAPACITY,
            area_threshold: DEFAULT_AREA_THRESHOLD,
            foreground: 255,
            object_value: 0,
            blank_value: 255,
        }
    }
}

impl LabelingOptions {
    /// Create options with the default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the label capacity
    pub fn with_capacity(mut self, capacity: u32) -> Self {
        self.capacity = capacity;
        self
    }

    /// Set the area threshold
    pub fn with_area_threshold(mut self, threshold: usize) -> Self {
        self.area_threshold = threshold;
        self
    }

    /// Set the foreground input value
    pub fn with_foreground(mut self, value: u8) -> Self {
        self.foreground = value;
        self
    }

    /// Set the object and blank output values
    pub fn with_output_values(mut self, object: u8, blank: u8) -> Self {
        self.object_value = object;
        self.blank_value = blank;
        self
    }
}

/// Check `len == width * height`, with both dimensions nonzero.
pub(crate) fn check_buffer(len: usize, width: u32, height: u32) -> RegionResult<()> {
    if width == 0 || height == 0 {
        return Err(RegionError::InvalidDimensions { width, height });
    }
    let expected = (width as usize)
        .checked_mul(height as usize)
        .ok_or(RegionError::InvalidDimensions { width, height })?;
    if len != expected {
        return Err(RegionError::DimensionMismatch {
            width,
            height,
            expected,
            actual: len,
        });
    }
    Ok(())
}

/// Connected-component extractor
///
/// Holds the label store and the traversal stack so both can be reused
/// across passes.
///
/// # Examples
///
/// ```
/// use grassfire_region::{LabelingOptions, RegionExtractor};
///
/// let input = [
///     255, 0, 0,
///     0, 255, 0,
///     0, 0, 0,
/// ];
/// let mut extractor = RegionExtractor::new(LabelingOptions::default());
/// let regions = extractor.extract(&input, 3, 3).unwrap();
/// assert_eq!(regions, 1);
/// assert_eq!(extractor.store().area_of(1), 2);
/// ```
#[derive(Debug)]
pub struct RegionExtractor {
    options: LabelingOptions,
    store: LabelStore,
    stack: Vec<(u32, u32)>,
}

impl Default for RegionExtractor {
    fn default() -> Self {
        Self::new(LabelingOptions::default())
    }
}

impl RegionExtractor {
    /// Create an extractor with the given options
    pub fn new(options: LabelingOptions) -> Self {
        let store = LabelStore::new(options.capacity);
        Self {
            options,
            store,
            stack: Vec::new(),
        }
    }

    /// Labeling options in use
    pub fn options(&self) -> &LabelingOptions {
        &self.options
    }

    /// Label store of the most recent pass
    ///
    /// After a failed pass this still holds every region completed before
    /// the failure.
    pub fn store(&self) -> &LabelStore {
        &self.store
    }

    /// Label every 8-connected foreground region of `input`.
    ///
    /// Pixels equal to `options.foreground` are foreground; any other value
    /// is background. Returns the number of regions found.
    ///
    /// # Errors
    ///
    /// - [`RegionError::InvalidDimensions`] / [`RegionError::DimensionMismatch`]
    ///   before any traversal if the buffer does not describe a `width x height` image
    /// - [`RegionError::LabelCapacityExceeded`] if the image has more regions
    ///   than `options.capacity`
    pub fn extract(&mut self, input: &[u8], width: u32, height: u32) -> RegionResult<u32> {
        check_buffer(input.len(), width, height)?;
        self.store.reset(width, height)?;
        self.stack.clear();

        let fg = self.options.foreground;
        for row in 0..height {
            for col in 0..width {
                let i = row as usize * width as usize + col as usize;
                if input[i] != fg || self.store.labels()[i] != 0 {
                    continue;
                }
                let label = match self.store.new_label() {
                    Ok(label) => label,
                    Err(e) => {
                        log::warn!(
                            "labeling stopped at ({row}, {col}): {} regions already found",
                            self.store.label_count()
                        );
                        return Err(e);
                    }
                };
                self.grow(input, row, col, label)?;
            }
        }

        log::debug!(
            "labeled {}x{} image: {} regions, {} foreground pixels",
            width,
            height,
            self.store.label_count(),
            self.store.areas().iter().sum::<usize>()
        );
        Ok(self.store.label_count())
    }

    /// Grow region `label` from the seed `(row, col)`.
    fn grow(&mut self, input: &[u8], row: u32, col: u32, label: LabelId) -> RegionResult<()> {
        let (width, height) = (self.store.width(), self.store.height());
        let fg = self.options.foreground;

        self.store.set_label(row, col, label)?;
        self.store.increment_area(label)?;
        self.stack.push((row, col));

        while let Some(&(r, c)) = self.stack.last() {
            let next = NEIGHBORS.iter().find_map(|&(dr, dc)| {
                let nr = r.checked_add_signed(dr).filter(|&v| v < height)?;
                let nc = c.checked_add_signed(dc).filter(|&v| v < width)?;
                let i = nr as usize * width as usize + nc as usize;
                (input[i] == fg && self.store.labels()[i] == 0).then_some((nr, nc))
            });

            match next {
                Some((nr, nc)) => {
                    self.store.set_label(nr, nc, label)?;
                    self.store.increment_area(label)?;
                    self.stack.push((nr, nc));
                }
                None => {
                    self.stack.pop();
                }
            }
        }
        Ok(())
    }

    /// Render the most recent pass according to `mode`.
    ///
    /// Reads whatever the last [`extract`](Self::extract) left in the
    /// store. Before any successful extraction the store is 0x0 and the
    /// result is an empty buffer.
    pub fn render(&self, mode: LabelingMode) -> Vec<u8> {
        render(&self.store, mode, &self.options)
    }

    /// Extract regions and render them in one step.
    ///
    /// Returns a fresh output buffer; nothing is produced if extraction fails.
    pub fn label(
        &mut self,
        input: &[u8],
        width: u32,
        height: u32,
        mode: LabelingMode,
    ) -> RegionResult<Vec<u8>> {
        self.extract(input, width, height)?;
        Ok(self.render(mode))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(input: &[u8], w: u32, h: u32) -> RegionExtractor {
        let mut ex = RegionExtractor::default();
        ex.extract(input, w, h).unwrap();
        ex
    }

    #[test]
    fn test_empty_image() {
        let ex = extract(&[0; 25], 5, 5);
        assert_eq!(ex.store().label_count(), 0);
        assert!(ex.store().areas().is_empty());
    }

    #[test]
    fn test_diagonal_is_connected() {
        #[rustfmt::skip]
        let input = [
            255, 0,
            0, 255,
        ];
        let ex = extract(&input, 2, 2);
        assert_eq!(ex.store().label_count(), 1);
        assert_eq!(ex.store().labels(), &[1, 0, 0, 1]);
    }

    #[test]
    fn test_scan_order_assigns_labels() {
        #[rustfmt::skip]
        let input = [
            0,   0, 255,
            255, 0, 0,
            255, 0, 255,
        ];
        let ex = extract(&input, 3, 3);
        assert_eq!(ex.store().label_count(), 3);
        assert_eq!(ex.store().labels(), &[0, 0, 1, 2, 0, 0, 2, 0, 3]);
        assert_eq!(ex.store().areas(), &[1, 2, 1]);
    }

    #[test]
    fn test_u_shape_needs_backtracking() {
        // The walk dives down the left arm first and must back up through
        // the bottom row to reach the right arm.
        #[rustfmt::skip]
        let input = [
            255, 0,   0,   0,   255,
            255, 0,   0,   0,   255,
            255, 255, 255, 255, 255,
        ];
        let ex = extract(&input, 5, 3);
        assert_eq!(ex.store().label_count(), 1);
        assert_eq!(ex.store().area_of(1), 9);
    }

    #[test]
    fn test_non_foreground_values_are_background() {
        let input = [255, 128, 255, 1];
        let ex = extract(&input, 4, 1);
        assert_eq!(ex.store().label_count(), 2);
    }

    #[test]
    fn test_custom_foreground() {
        let mut ex = RegionExtractor::new(LabelingOptions::new().with_foreground(0));
        assert_eq!(ex.extract(&[0, 255, 0, 0], 2, 2).unwrap(), 1);
        assert_eq!(ex.store().area_of(1), 3);
    }

    #[test]
    fn test_dimension_mismatch_rejected() {
        let mut ex = RegionExtractor::default();
        assert!(matches!(
            ex.extract(&[255; 5], 2, 3),
            Err(RegionError::DimensionMismatch {
                expected: 6,
                actual: 5,
                ..
            })
        ));
        assert!(matches!(
            ex.extract(&[], 0, 3),
            Err(RegionError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn test_capacity_keeps_completed_regions() {
        let input = [255, 0, 255, 0, 255];
        let mut ex = RegionExtractor::new(LabelingOptions::new().with_capacity(2));
        let err = ex.extract(&input, 5, 1).unwrap_err();
        assert!(matches!(
            err,
            RegionError::LabelCapacityExceeded { capacity: 2 }
        ));
        assert_eq!(ex.store().label_count(), 2);
        assert_eq!(ex.store().area_of(1), 1);
        assert_eq!(ex.store().area_of(2), 1);
        assert_eq!(ex.store().labels(), &[1, 0, 2, 0, 0]);
    }

    #[test]
    fn test_reuse_across_passes() {
        let mut ex = RegionExtractor::default();
        assert_eq!(ex.extract(&[255; 9], 3, 3).unwrap(), 1);
        assert_eq!(ex.extract(&[255, 0, 0, 255], 4, 1).unwrap(), 2);
        assert_eq!(ex.store().areas(), &[1, 1]);
        assert_eq!(ex.store().width(), 4);
    }

    #[test]
    fn test_render_before_extract() {
        let ex = RegionExtractor::default();
        assert!(ex.render(LabelingMode::LargestOnly).is_empty());
        assert!(ex.render(LabelingMode::GrayCoded).is_empty());
    }
}
