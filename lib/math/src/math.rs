pub mod vector;

use std::ops::RangeInclusive;

use rand::{Rng as _, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;
use vector::vec2;

pub const PI: f64 = std::f64::consts::PI;

#[inline]
pub fn length(a: &vec2) -> f64 {
    a.length()
}

#[inline]
pub fn distance(a: &vec2, b: &vec2) -> f64 {
    (*a - *b).length()
}

#[inline]
pub fn distance_squared(a: &vec2, b: &vec2) -> f64 {
    (*a - *b).length_squared()
}

#[inline]
pub fn dot(a: &vec2, b: &vec2) -> f64 {
    a.dot(b)
}

#[inline]
pub fn cross(a: &vec2, b: &vec2) -> f64 {
    a.cross(b)
}

#[inline]
pub fn normalize(a: &vec2) -> vec2 {
    a.normalize()
}

/// Linear interpolation, `amount` of `0.0` is `a`, `1.0` is `b`.
#[inline]
pub fn mix(a: &vec2, b: &vec2, amount: f64) -> vec2 {
    *a + (*b - *a) * amount
}

/// Rounds half away from zero.
#[inline]
pub fn round_to_int(f: f64) -> i32 {
    if f > 0.0 {
        (f + 0.5) as i32
    } else {
        (f - 0.5) as i32
    }
}

/// The point on the segment `line_point_a`..`line_point_b` closest to `target_point`.
///
/// Returns `None` for a degenerated segment.
pub fn closest_point_on_line(
    line_point_a: &vec2,
    line_point_b: &vec2,
    target_point: &vec2,
) -> Option<vec2> {
    let ab = *line_point_b - *line_point_a;
    let squared_magnitude_ab = dot(&ab, &ab);
    if squared_magnitude_ab > 0.0 {
        let ap = *target_point - *line_point_a;
        let t = dot(&ap, &ab) / squared_magnitude_ab;
        Some(*line_point_a + ab * t.clamp(0.0, 1.0))
    } else {
        None
    }
}

/// Seeded random generator, same seed gives the same sequence on every platform.
#[derive(Debug, Clone)]
pub struct Rng {
    rng: Xoshiro256PlusPlus,
}

impl Rng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Xoshiro256PlusPlus::seed_from_u64(seed),
        }
    }

    pub fn random_int(&mut self) -> u64 {
        self.rng.gen()
    }

    pub fn random_int_in(&mut self, range: RangeInclusive<i64>) -> i64 {
        self.rng.gen_range(range)
    }

    /// Value in `[0, 1)`.
    pub fn random_float(&mut self) -> f64 {
        self.rng.gen()
    }

    pub fn random_float_in(&mut self, min: f64, max: f64) -> f64 {
        min + (max - min) * self.random_float()
    }
}

#[cfg(test)]
mod test {
    use super::{closest_point_on_line, mix, round_to_int, vector::vec2, Rng};

    #[test]
    fn closest_point() {
        let a = vec2::new(0.0, 0.0);
        let b = vec2::new(10.0, 0.0);
        assert_eq!(
            closest_point_on_line(&a, &b, &vec2::new(5.0, 3.0)),
            Some(vec2::new(5.0, 0.0))
        );
        assert_eq!(
            closest_point_on_line(&a, &b, &vec2::new(-5.0, 3.0)),
            Some(a)
        );
        assert_eq!(
            closest_point_on_line(&a, &b, &vec2::new(15.0, -3.0)),
            Some(b)
        );
        assert_eq!(closest_point_on_line(&a, &a, &b), None);
    }

    #[test]
    fn rounding_and_mix() {
        assert_eq!(round_to_int(1.5), 2);
        assert_eq!(round_to_int(-1.5), -2);
        assert_eq!(round_to_int(0.49), 0);
        assert_eq!(
            mix(&vec2::new(0.0, 0.0), &vec2::new(2.0, 4.0), 0.5),
            vec2::new(1.0, 2.0)
        );
    }

    #[test]
    fn rng_is_reproducible() {
        let mut a = Rng::new(42);
        let mut b = Rng::new(42);
        for _ in 0..100 {
            assert_eq!(a.random_int(), b.random_int());
            let v = a.random_int_in(-1..=1);
            assert_eq!(v, b.random_int_in(-1..=1));
            assert!((-1..=1).contains(&v));
            let f = a.random_float();
            assert_eq!(f.to_bits(), b.random_float().to_bits());
            assert!((0.0..1.0).contains(&f));
        }
    }
}
