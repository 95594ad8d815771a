//! Convolution kernels
//!
//! A [`Kernel`] is a small row-major grid of weights with a designated
//! center. Besides arbitrary kernels built from slices, the classic 3x3
//! smoothing and derivative presets are provided.

use crate::{FilterError, FilterResult};

/// A 2D convolution kernel
#[derive(Debug, Clone, PartialEq)]
pub struct Kernel {
    /// Width of the kernel
    width: u32,
    /// Height of the kernel
    height: u32,
    /// X coordinate of the center
    cx: u32,
    /// Y coordinate of the center
    cy: u32,
    /// Kernel data (row-major order)
    data: Vec<f32>,
}

impl Kernel {
    /// Create a zero kernel with the given dimensions, centered at `(width/2, height/2)`.
    pub fn new(width: u32, height: u32) -> FilterResult<Self> {
        if width == 0 || height == 0 {
            return Err(FilterError::InvalidKernel(format!(
                "kernel dimensions must be > 0, got {width}x{height}"
            )));
        }
        Ok(Self {
            width,
            height,
            cx: width / 2,
            cy: height / 2,
            data: vec![0.0; width as usize * height as usize],
        })
    }

    /// Create a kernel from row-major values.
    pub fn from_slice(width: u32, height: u32, data: &[f32]) -> FilterResult<Self> {
        let mut kernel = Self::new(width, height)?;
        if data.len() != kernel.data.len() {
            return Err(FilterError::InvalidKernel(format!(
                "expected {} values for a {width}x{height} kernel, got {}",
                kernel.data.len(),
                data.len()
            )));
        }
        kernel.data.copy_from_slice(data);
        Ok(kernel)
    }

    /// 3x3 kernel from a literal; used by the presets.
    fn preset(data: [f32; 9]) -> Self {
        Self {
            width: 3,
            height: 3,
            cx: 1,
            cy: 1,
            data: data.to_vec(),
        }
    }

    /// Create a box (averaging) kernel.
    ///
    /// All values are `1/(size*size)`.
    pub fn box_kernel(size: u32) -> FilterResult<Self> {
        let mut kernel = Self::new(size, size)?;
        let v = 1.0 / (size * size) as f32;
        kernel.data.fill(v);
        Ok(kernel)
    }

    /// 3x3 averaging kernel.
    pub fn average() -> Self {
        Self::preset([1.0 / 9.0; 9])
    }

    /// 3x3 Gaussian smoothing kernel, `[1 2 1; 2 4 2; 1 2 1] / 16`.
    pub fn gaussian3() -> Self {
        let mut k = Self::preset([1.0, 2.0, 1.0, 2.0, 4.0, 2.0, 1.0, 2.0, 1.0]);
        k.normalize();
        k
    }

    /// 8-neighbor Laplacian: `-1` around an `8` center.
    pub fn laplacian() -> Self {
        Self::preset([-1.0, -1.0, -1.0, -1.0, 8.0, -1.0, -1.0, -1.0, -1.0])
    }

    /// High-pass sharpening kernel: `-1` around a `9` center (sums to 1).
    pub fn laplacian_sharpen() -> Self {
        Self::preset([-1.0, -1.0, -1.0, -1.0, 9.0, -1.0, -1.0, -1.0, -1.0])
    }

    /// Prewitt kernel responding to horizontal intensity change.
    pub fn prewitt_x() -> Self {
        Self::preset([-1.0, 0.0, 1.0, -1.0, 0.0, 1.0, -1.0, 0.0, 1.0])
    }

    /// Prewitt kernel responding to vertical intensity change.
    pub fn prewitt_y() -> Self {
        Self::preset([-1.0, -1.0, -1.0, 0.0, 0.0, 0.0, 1.0, 1.0, 1.0])
    }

    /// Sobel kernel responding to horizontal intensity change.
    pub fn sobel_x() -> Self {
        Self::preset([-1.0, 0.0, 1.0, -2.0, 0.0, 2.0, -1.0, 0.0, 1.0])
    }

    /// Sobel kernel responding to vertical intensity change.
    pub fn sobel_y() -> Self {
        Self::preset([-1.0, -2.0, -1.0, 0.0, 0.0, 0.0, 1.0, 2.0, 1.0])
    }

    /// Look up a preset by name.
    ///
    /// Known names: `average`, `gaussian`, `laplacian`, `sharpen`,
    /// `prewitt-x`, `prewitt-y`, `sobel-x`, `sobel-y`.
    pub fn by_name(name: &str) -> FilterResult<Self> {
        Ok(match name.to_ascii_lowercase().as_str() {
            "average" | "box" => Self::average(),
            "gaussian" => Self::gaussian3(),
            "laplacian" => Self::laplacian(),
            "sharpen" => Self::laplacian_sharpen(),
            "prewitt-x" => Self::prewitt_x(),
            "prewitt-y" => Self::prewitt_y(),
            "sobel-x" => Self::sobel_x(),
            "sobel-y" => Self::sobel_y(),
            other => {
                return Err(FilterError::InvalidKernel(format!(
                    "unknown kernel '{other}'"
                )));
            }
        })
    }

    /// Get the kernel width.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the kernel height.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get the center X coordinate.
    #[inline]
    pub fn center_x(&self) -> u32 {
        self.cx
    }

    /// Get the center Y coordinate.
    #[inline]
    pub fn center_y(&self) -> u32 {
        self.cy
    }

    /// Set the center coordinates.
    pub fn set_center(&mut self, cx: u32, cy: u32) -> FilterResult<()> {
        if cx >= self.width || cy >= self.height {
            return Err(FilterError::InvalidKernel(format!(
                "center ({cx}, {cy}) outside {}x{} kernel",
                self.width, self.height
            )));
        }
        self.cx = cx;
        self.cy = cy;
        Ok(())
    }

    /// Get the kernel data.
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// Get a value at (x, y).
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> Option<f32> {
        (x < self.width && y < self.height)
            .then(|| self.data[(y * self.width + x) as usize])
    }

    /// Set a value at (x, y). Out-of-range coordinates are ignored.
    #[inline]
    pub fn set(&mut self, x: u32, y: u32, value: f32) {
        if x < self.width && y < self.height {
            self.data[(y * self.width + x) as usize] = value;
        }
    }

    /// Normalize the kernel so that values sum to 1.
    ///
    /// Kernels that sum to zero are left unchanged.
    pub fn normalize(&mut self) {
        let sum = self.sum();
        if sum.abs() > f32::EPSILON {
            for v in &mut self.data {
                *v /= sum;
            }
        }
    }

    /// Get the sum of all kernel values.
    pub fn sum(&self) -> f32 {
        self.data.iter().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_and_from_slice() {
        let k = Kernel::new(5, 3).unwrap();
        assert_eq!((k.center_x(), k.center_y()), (2, 1));
        assert!(Kernel::new(0, 3).is_err());

        let k = Kernel::from_slice(2, 2, &[1.0, 2.0, 3.0, 4.0]).unwrap();
        assert_eq!(k.get(1, 1), Some(4.0));
        assert_eq!(k.get(2, 0), None);
        assert!(Kernel::from_slice(2, 2, &[1.0]).is_err());
    }

    #[test]
    fn test_preset_sums() {
        assert!((Kernel::average().sum() - 1.0).abs() < 1e-5);
        assert!((Kernel::gaussian3().sum() - 1.0).abs() < 1e-6);
        assert_eq!(Kernel::gaussian3().get(1, 1), Some(0.25));
        assert_eq!(Kernel::laplacian().sum(), 0.0);
        assert_eq!(Kernel::laplacian_sharpen().sum(), 1.0);
        assert_eq!(Kernel::sobel_x().sum(), 0.0);
        assert_eq!(Kernel::prewitt_y().get(0, 2), Some(1.0));
    }

    #[test]
    fn test_box_kernel() {
        let k = Kernel::box_kernel(5).unwrap();
        assert_eq!(k.data().len(), 25);
        assert!((k.sum() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_set_center_and_set() {
        let mut k = Kernel::new(3, 3).unwrap();
        k.set(0, 0, 2.0);
        k.set(9, 9, 5.0);
        assert_eq!(k.sum(), 2.0);
        assert!(k.set_center(0, 0).is_ok());
        assert!(k.set_center(3, 0).is_err());
    }

    #[test]
    fn test_by_name() {
        assert_eq!(Kernel::by_name("Sobel-X").unwrap(), Kernel::sobel_x());
        assert!(Kernel::by_name("emboss").is_err());
    }
}
