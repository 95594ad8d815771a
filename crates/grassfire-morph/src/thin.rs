//! Zhang-Suen thinning
//!
//! Peels object pixels off in alternating passes until every object is one
//! pixel wide. Each pass only removes pixels that have between two and six
//! object neighbors and exactly one non-object to object transition around
//! them, so endpoints and connections survive.

use crate::MorphResult;
use grassfire_core::Pix;

/// The eight neighbors P2..P9, clockwise from north.
const RING: [(i64, i64); 8] = [
    (0, -1),
    (1, -1),
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
];

/// Object mask with out-of-image reads as non-object
struct Mask {
    width: i64,
    height: i64,
    bits: Vec<bool>,
}

impl Mask {
    fn from_pix(pix: &Pix, object_value: u8) -> Self {
        Self {
            width: pix.width() as i64,
            height: pix.height() as i64,
            bits: pix.data().iter().map(|&v| v == object_value).collect(),
        }
    }

    #[inline]
    fn get(&self, x: i64, y: i64) -> bool {
        x >= 0
            && y >= 0
            && x < self.width
            && y < self.height
            && self.bits[(y * self.width + x) as usize]
    }

    fn ring(&self, x: i64, y: i64) -> [bool; 8] {
        RING.map(|(dx, dy)| self.get(x + dx, y + dy))
    }
}

/// Number of object pixels among the eight neighbors of `(x, y)`.
pub fn object_neighbor_count(pix: &Pix, x: u32, y: u32, object_value: u8) -> u32 {
    let mask = Mask::from_pix(pix, object_value);
    neighbors(&mask.ring(x as i64, y as i64))
}

/// Number of non-object to object transitions walking once around the
/// eight neighbors of `(x, y)`.
pub fn transition_count(pix: &Pix, x: u32, y: u32, object_value: u8) -> u32 {
    let mask = Mask::from_pix(pix, object_value);
    transitions(&mask.ring(x as i64, y as i64))
}

fn neighbors(ring: &[bool; 8]) -> u32 {
    ring.iter().filter(|&&b| b).count() as u32
}

fn transitions(ring: &[bool; 8]) -> u32 {
    (0..8).filter(|&i| !ring[i] && ring[(i + 1) % 8]).count() as u32
}

/// One sub-iteration; returns the number of pixels removed.
fn thin_pass(mask: &mut Mask, first: bool) -> usize {
    let mut removals = Vec::new();
    for y in 0..mask.height {
        for x in 0..mask.width {
            if !mask.get(x, y) {
                continue;
            }
            let p = mask.ring(x, y);
            let b = neighbors(&p);
            if !(2..=6).contains(&b) || transitions(&p) != 1 {
                continue;
            }
            // p[0]=N, p[2]=E, p[4]=S, p[6]=W
            let keep = if first {
                (p[0] && p[2] && p[4]) || (p[2] && p[4] && p[6])
            } else {
                (p[0] && p[2] && p[6]) || (p[0] && p[4] && p[6])
            };
            if !keep {
                removals.push((y * mask.width + x) as usize);
            }
        }
    }
    for &idx in &removals {
        mask.bits[idx] = false;
    }
    removals.len()
}

/// Thin objects to one-pixel-wide skeletons.
///
/// Pixels equal to `object_value` are objects. The result keeps skeleton
/// pixels at `object_value` and writes everything else as `255 - object_value`.
pub fn thin_zhang_suen(pix: &Pix, object_value: u8) -> MorphResult<Pix> {
    let mut mask = Mask::from_pix(pix, object_value);
    let mut iterations = 0u32;
    loop {
        iterations += 1;
        let removed = thin_pass(&mut mask, true) + thin_pass(&mut mask, false);
        if removed == 0 {
            break;
        }
    }
    log::debug!("thin_zhang_suen: converged after {iterations} iterations");

    let blank = !object_value;
    let data = mask
        .bits
        .iter()
        .map(|&on| if on { object_value } else { blank })
        .collect();
    Ok(Pix::from_vec(pix.width(), pix.height(), data)?)
}
