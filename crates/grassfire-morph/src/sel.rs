//! Structuring Element (SEL) for morphological operations
//!
//! A structuring element defines the neighborhood used in morphological
//! operations as a grid of hits around an origin.

use crate::{MorphError, MorphResult};

/// Structuring Element (SEL)
///
/// The origin (cx, cy) is the reference point for the operation.
#[derive(Debug, Clone)]
pub struct Sel {
    width: u32,
    height: u32,
    cx: u32,
    cy: u32,
    data: Vec<bool>,
    name: Option<String>,
}

impl Sel {
    /// Create a new structuring element with no hits, origin at the center
    pub fn new(width: u32, height: u32) -> MorphResult<Self> {
        if width == 0 || height == 0 {
            return Err(MorphError::InvalidSel(format!(
                "dimensions must be positive, got {width}x{height}"
            )));
        }
        Ok(Self {
            width,
            height,
            cx: width / 2,
            cy: height / 2,
            data: vec![false; (width * height) as usize],
            name: None,
        })
    }

    /// Create a rectangular "brick" structuring element with all hits
    pub fn brick(width: u32, height: u32) -> MorphResult<Self> {
        let mut sel = Self::new(width, height)?;
        sel.data.fill(true);
        sel.name = Some(format!("brick_{width}x{height}"));
        Ok(sel)
    }

    /// 3x3 cross (+): the origin and its four direct neighbors
    pub fn cross() -> Self {
        let data = [false, true, false, true, true, true, false, true, false];
        Self {
            width: 3,
            height: 3,
            cx: 1,
            cy: 1,
            data: data.to_vec(),
            name: Some("cross".to_string()),
        }
    }

    /// Build a SEL from hit offsets relative to the origin.
    ///
    /// The grid is sized to the bounding box of the offsets and the origin.
    pub fn from_offsets(offsets: &[(i32, i32)]) -> MorphResult<Self> {
        if offsets.is_empty() {
            return Err(MorphError::InvalidSel("no hit offsets".to_string()));
        }
        let (mut min_x, mut max_x, mut min_y, mut max_y) = (0, 0, 0, 0);
        for &(dx, dy) in offsets {
            min_x = min_x.min(dx);
            max_x = max_x.max(dx);
            min_y = min_y.min(dy);
            max_y = max_y.max(dy);
        }
        let mut sel = Self::new((max_x - min_x + 1) as u32, (max_y - min_y + 1) as u32)?;
        sel.cx = (-min_x) as u32;
        sel.cy = (-min_y) as u32;
        for &(dx, dy) in offsets {
            sel.set_hit((dx - min_x) as u32, (dy - min_y) as u32, true);
        }
        Ok(sel)
    }

    /// Get the width
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the height
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get the origin x coordinate
    #[inline]
    pub fn origin_x(&self) -> u32 {
        self.cx
    }

    /// Get the origin y coordinate
    #[inline]
    pub fn origin_y(&self) -> u32 {
        self.cy
    }

    /// Set the origin
    pub fn set_origin(&mut self, cx: u32, cy: u32) -> MorphResult<()> {
        if cx >= self.width || cy >= self.height {
            return Err(MorphError::InvalidSel(format!(
                "origin ({cx}, {cy}) outside {}x{}",
                self.width, self.height
            )));
        }
        self.cx = cx;
        self.cy = cy;
        Ok(())
    }

    /// Get the name
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Set the name
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = Some(name.into());
    }

    /// Whether (x, y) is a hit; `None` outside the grid
    #[inline]
    pub fn is_hit(&self, x: u32, y: u32) -> Option<bool> {
        if x < self.width && y < self.height {
            Some(self.data[(y * self.width + x) as usize])
        } else {
            None
        }
    }

    /// Mark or clear a hit at (x, y); ignored outside the grid
    #[inline]
    pub fn set_hit(&mut self, x: u32, y: u32, hit: bool) {
        if x < self.width && y < self.height {
            self.data[(y * self.width + x) as usize] = hit;
        }
    }

    /// Count the number of hit elements
    pub fn hit_count(&self) -> usize {
        self.data.iter().filter(|&&h| h).count()
    }

    /// Create the reflected (180-degree rotated) SEL
    pub fn reflect(&self) -> Self {
        let offsets: Vec<(i32, i32)> = self.hit_offsets().map(|(dx, dy)| (-dx, -dy)).collect();
        match Self::from_offsets(&offsets) {
            Ok(mut sel) => {
                sel.name = self.name.clone();
                sel
            }
            Err(_) => self.clone(),
        }
    }

    /// Iterate over hit positions relative to origin
    pub fn hit_offsets(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        let cx = self.cx as i32;
        let cy = self.cy as i32;
        let width = self.width;

        self.data.iter().enumerate().filter_map(move |(idx, &hit)| {
            if hit {
                let x = (idx as u32 % width) as i32;
                let y = (idx as u32 / width) as i32;
                Some((x - cx, y - cy))
            } else {
                None
            }
        })
    }
}
