//! Integer translation

use crate::TransformResult;
use grassfire_core::Pix;

/// Shift an image by whole pixels on a same-sized canvas.
///
/// Positive `tx` moves content right and positive `ty` moves it up.
/// Pixels uncovered by the shift are set to `fill`; content shifted past
/// the edge is dropped.
pub fn translate(pix: &Pix, tx: i32, ty: i32, fill: u8) -> TransformResult<Pix> {
    let w = pix.width() as i64;
    let h = pix.height() as i64;
    let mut out_mut = Pix::new_with_value(pix.width(), pix.height(), fill)?.to_mut();

    // destination columns that receive a source pixel
    let x0 = (tx as i64).clamp(0, w);
    let x1 = (w + tx as i64).clamp(0, w);
    if x0 < x1 {
        for y in 0..h {
            let src_y = y + ty as i64;
            if !(0..h).contains(&src_y) {
                continue;
            }
            let src_row = pix.row_data(src_y as u32);
            let src = &src_row[(x0 - tx as i64) as usize..(x1 - tx as i64) as usize];
            out_mut.row_data_mut(y as u32)[x0 as usize..x1 as usize].copy_from_slice(src);
        }
    }

    Ok(out_mut.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Pix {
        // 3x3: 1..=9
        Pix::from_vec(3, 3, (1..=9).collect()).unwrap()
    }

    #[test]
    fn test_shift_right_and_up() {
        let out = translate(&sample(), 1, 1, 0).unwrap();
        assert_eq!(out.data(), &[0, 4, 5, 0, 7, 8, 0, 0, 0]);
    }

    #[test]
    fn test_shift_left_and_down() {
        let out = translate(&sample(), -2, -1, 9).unwrap();
        assert_eq!(out.data(), &[9, 9, 9, 3, 9, 9, 6, 9, 9]);
    }

    #[test]
    fn test_shift_off_canvas() {
        let out = translate(&sample(), 5, 0, 42).unwrap();
        assert_eq!(out.count_pixels_with_value(42), 9);
        assert!(translate(&sample(), 0, 0, 0).unwrap().equals(&sample()));
    }
}
