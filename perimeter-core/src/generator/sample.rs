//! Bounded rejection sampling of shape parameters.
//!
//! Every draw either passes its validity check within [`MAX_ATTEMPTS`] or falls back to a
//! fixed parameter set known to be valid, so sampling always terminates.

use log::{debug, warn};
use rand::Rng;

use crate::catalogue::{isosceles_height, ShapeKind};

pub const MAX_ATTEMPTS: usize = 50;

/// Sides of a rectangle or parallelogram must differ by this much to read as unequal.
pub const MIN_SIDE_GAP: u32 = 2;
/// Isosceles height over base.
pub const MIN_ISOSCELES_RATIO: f64 = 0.35;
/// Scalene height (over the longest side) over the longest side.
pub const MIN_SCALENE_RATIO: f64 = 0.25;

pub const RECTANGLE_FALLBACK: [u32; 2] = [9, 6];
pub const PARALLELOGRAM_FALLBACK: [u32; 2] = [10, 6];
pub const ISOSCELES_FALLBACK: [u32; 2] = [6, 8];
pub const SCALENE_FALLBACK: [u32; 3] = [10, 8, 6];

pub fn sides_differ(a: u32, b: u32) -> bool {
    a.abs_diff(b) >= MIN_SIDE_GAP
}

/// `base < 2·leg`, and tall enough not to look like a sliver.
pub fn isosceles_ok(base: u32, leg: u32) -> bool {
    base < 2 * leg && isosceles_height(base as f64, leg as f64) / base as f64 >= MIN_ISOSCELES_RATIO
}

/// Distinct sides, longest first, strict triangle inequality, not a sliver.
pub fn scalene_ok(a: u32, b: u32, c: u32) -> bool {
    if !(a > b && b > c) || a >= b + c {
        return false;
    }
    let (a, b, c) = (a as f64, b as f64, c as f64);
    // Heron
    let s = (a + b + c) / 2.;
    let area = (s * (s - a) * (s - b) * (s - c)).max(0.).sqrt();
    let height = 2. * area / a;
    height / a >= MIN_SCALENE_RATIO
}

fn sample_until<R, F, A>(rng: &mut R, name: &str, mut draw: F, accept: A, fallback: &[u32]) -> Vec<u32>
where
    R: Rng + ?Sized,
    F: FnMut(&mut R) -> Vec<u32>,
    A: Fn(&[u32]) -> bool,
{
    for attempt in 0..MAX_ATTEMPTS {
        let params = draw(rng);
        if accept(&params) {
            return params;
        }
        debug!("{}: rejected {:?} (attempt {})", name, params, attempt + 1);
    }
    warn!("{}: no valid draw in {} attempts, using {:?}", name, MAX_ATTEMPTS, fallback);
    fallback.to_vec()
}

/// Draw parameters for `kind`, in the order documented on [`ShapeKind`].
pub fn params<R: Rng + ?Sized>(kind: ShapeKind, rng: &mut R) -> Vec<u32> {
    match kind {
        ShapeKind::Regular => vec![rng.gen_range(3..=12)],
        ShapeKind::Rectangle => sample_until(
            rng,
            "rectangle",
            |rng| vec![rng.gen_range(4..=15), rng.gen_range(3..=12)],
            |p| sides_differ(p[0], p[1]),
            &RECTANGLE_FALLBACK,
        ),
        ShapeKind::Parallelogram => sample_until(
            rng,
            "parallelogram",
            |rng| vec![rng.gen_range(5..=14), rng.gen_range(3..=10)],
            |p| sides_differ(p[0], p[1]),
            &PARALLELOGRAM_FALLBACK,
        ),
        ShapeKind::Isosceles => sample_until(
            rng,
            "isosceles triangle",
            |rng| vec![rng.gen_range(3..=16), rng.gen_range(4..=12)],
            |p| isosceles_ok(p[0], p[1]),
            &ISOSCELES_FALLBACK,
        ),
        ShapeKind::Scalene => sample_until(
            rng,
            "scalene triangle",
            |rng| {
                let mut sides: Vec<u32> = (0..3).map(|_| rng.gen_range(4..=15)).collect();
                sides.sort_unstable_by(|a, b| b.cmp(a));
                sides
            },
            |p| scalene_ok(p[0], p[1], p[2]),
            &SCALENE_FALLBACK,
        ),
        // Rectilinear templates: each range keeps cuts strictly inside the outer rectangle,
        // so every draw is valid
        ShapeKind::Ell => {
            let w = rng.gen_range(6..=14);
            let h = rng.gen_range(6..=14);
            let cw = rng.gen_range(2..=w - 3);
            let ch = rng.gen_range(2..=h - 3);
            vec![w, h, cw, ch]
        }
        ShapeKind::UniformStaircase => vec![rng.gen_range(2..=5), rng.gen_range(2..=5)],
        ShapeKind::Notch => {
            let w = rng.gen_range(8..=15);
            let h = rng.gen_range(5..=12);
            let nw = rng.gen_range(2..=w - 4);
            let ox = rng.gen_range(2..=w - nw - 2);
            let nd = rng.gen_range(2..=h - 2);
            vec![w, h, ox, nw, nd]
        }
        ShapeKind::Staircase => (0..6).map(|_| rng.gen_range(2..=5)).collect(),
    }
}
