//! Region classification
//!
//! Turns a finished label store into an output image. The output starts
//! out entirely blank; the mode decides which pixels are drawn.

use crate::error::{RegionError, RegionResult};
use crate::extract::LabelingOptions;
use crate::store::{LabelId, LabelStore};
use std::fmt;
use std::str::FromStr;

/// How labeled regions are rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LabelingMode {
    /// Draw only the region with the largest area (lowest label on ties)
    LargestOnly,
    /// Draw every region whose area exceeds the configured threshold
    AreaThreshold,
    /// Draw every region with a gray level proportional to its label
    GrayCoded,
}

impl LabelingMode {
    /// Map the numeric mode codes 1, 2 and 3 to a mode.
    ///
    /// # Errors
    ///
    /// Returns [`RegionError::InvalidLabelingMode`] for any other code.
    pub fn from_code(code: u32) -> RegionResult<Self> {
        match code {
            1 => Ok(Self::LargestOnly),
            2 => Ok(Self::AreaThreshold),
            3 => Ok(Self::GrayCoded),
            other => Err(RegionError::InvalidLabelingMode(format!(
                "mode code {other} (expected 1, 2 or 3)"
            ))),
        }
    }

    /// Numeric code of this mode.
    pub fn code(self) -> u32 {
        match self {
            Self::LargestOnly => 1,
            Self::AreaThreshold => 2,
            Self::GrayCoded => 3,
        }
    }
}

impl FromStr for LabelingMode {
    type Err = RegionError;

    /// Accepts `largest`, `area`, `gray` (case-insensitive) or a numeric code.
    fn from_str(s: &str) -> RegionResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "largest" | "largest-only" => Ok(Self::LargestOnly),
            "area" | "area-threshold" => Ok(Self::AreaThreshold),
            "gray" | "grey" | "gray-coded" => Ok(Self::GrayCoded),
            other => match other.parse::<u32>() {
                Ok(code) => Self::from_code(code),
                Err(_) => Err(RegionError::InvalidLabelingMode(other.to_string())),
            },
        }
    }
}

impl fmt::Display for LabelingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::LargestOnly => "largest",
            Self::AreaThreshold => "area",
            Self::GrayCoded => "gray",
        })
    }
}

/// Gray level of `label` when `count` labels exist: `round(label * 255 / count)`.
#[inline]
fn gray_level(label: LabelId, count: u32) -> u8 {
    let (l, n) = (label as u64, count as u64);
    ((l * 255 + n / 2) / n).min(255) as u8
}

/// Render `store` into a new output buffer.
///
/// With no regions the output is entirely `options.blank_value`.
pub fn render(store: &LabelStore, mode: LabelingMode, options: &LabelingOptions) -> Vec<u8> {
    let mut out = vec![options.blank_value; store.labels().len()];
    let count = store.label_count();
    if count == 0 {
        return out;
    }

    match mode {
        LabelingMode::LargestOnly => {
            if let Some(max_label) = store.largest_label() {
                for (o, &l) in out.iter_mut().zip(store.labels()) {
                    if l == max_label {
                        *o = options.object_value;
                    }
                }
            }
        }
        LabelingMode::AreaThreshold => {
            let keep: Vec<bool> = store
                .areas()
                .iter()
                .map(|&a| a > options.area_threshold)
                .collect();
            for (o, &l) in out.iter_mut().zip(store.labels()) {
                if l != 0 && keep[l as usize - 1] {
                    *o = options.object_value;
                }
            }
        }
        LabelingMode::GrayCoded => {
            for (o, &l) in out.iter_mut().zip(store.labels()) {
                *o = if l == 0 { 0 } else { gray_level(l, count) };
            }
        }
    }
    out
}
