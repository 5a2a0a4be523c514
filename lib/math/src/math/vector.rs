use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use num_traits::Float;
use serde::{Deserialize, Serialize};

/// Two vectors closer than this are considered equal.
pub const VEC2_EPSILON: f64 = 1e-6;

#[allow(non_camel_case_types)]
#[derive(Debug, Default, Copy, Clone, Serialize, Deserialize)]
pub struct vector2_base<T> {
    pub x: T,
    pub y: T,
}

#[allow(non_camel_case_types)]
pub type vec2 = vector2_base<f64>;
#[allow(non_camel_case_types)]
pub type ivec2 = vector2_base<i32>;

impl<T> vector2_base<T> {
    pub const fn new(x: T, y: T) -> Self {
        Self { x, y }
    }
}

impl<T: Add<Output = T>> Add for vector2_base<T> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl<T: Sub<Output = T>> Sub for vector2_base<T> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl<T: Neg<Output = T>> Neg for vector2_base<T> {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self::new(-self.x, -self.y)
    }
}

impl<T: Mul<Output = T> + Copy> Mul<T> for vector2_base<T> {
    type Output = Self;

    fn mul(self, rhs: T) -> Self::Output {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

impl<T: Div<Output = T> + Copy> Div<T> for vector2_base<T> {
    type Output = Self;

    fn div(self, rhs: T) -> Self::Output {
        Self::new(self.x / rhs, self.y / rhs)
    }
}

impl<T: AddAssign> AddAssign for vector2_base<T> {
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl<T: SubAssign> SubAssign for vector2_base<T> {
    fn sub_assign(&mut self, rhs: Self) {
        self.x -= rhs.x;
        self.y -= rhs.y;
    }
}

impl<T: MulAssign + Copy> MulAssign<T> for vector2_base<T> {
    fn mul_assign(&mut self, rhs: T) {
        self.x *= rhs;
        self.y *= rhs;
    }
}

impl<T: DivAssign + Copy> DivAssign<T> for vector2_base<T> {
    fn div_assign(&mut self, rhs: T) {
        self.x /= rhs;
        self.y /= rhs;
    }
}

impl<T: Float> vector2_base<T> {
    pub fn length_squared(&self) -> T {
        self.x * self.x + self.y * self.y
    }

    pub fn length(&self) -> T {
        self.length_squared().sqrt()
    }

    /// Unit vector in the same direction, or the zero vector if `self` has no length.
    pub fn normalize(&self) -> Self {
        let len = self.length();
        if len <= T::zero() {
            return Self::new(T::zero(), T::zero());
        }
        Self::new(self.x / len, self.y / len)
    }

    pub fn dot(&self, other: &Self) -> T {
        self.x * other.x + self.y * other.y
    }

    /// z component of the 3d cross product.
    pub fn cross(&self, other: &Self) -> T {
        self.x * other.y - self.y * other.x
    }

    /// Rotates counter clockwise by `angle` radians.
    pub fn rotate(&self, angle: T) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self::new(self.x * cos - self.y * sin, self.x * sin + self.y * cos)
    }

    pub fn clamp_length(&self, max_length: T) -> Self {
        let len = self.length();
        if len > max_length && len > T::zero() {
            *self * (max_length / len)
        } else {
            *self
        }
    }

    pub fn is_zero(&self) -> bool {
        self.x == T::zero() && self.y == T::zero()
    }
}

impl PartialEq for vec2 {
    fn eq(&self, other: &Self) -> bool {
        (*self - *other).length() < VEC2_EPSILON
    }
}

impl PartialEq for ivec2 {
    fn eq(&self, other: &Self) -> bool {
        self.x == other.x && self.y == other.y
    }
}

impl Eq for ivec2 {}

impl From<ivec2> for vec2 {
    fn from(value: ivec2) -> Self {
        Self::new(value.x as f64, value.y as f64)
    }
}

#[cfg(test)]
mod test {
    use super::{ivec2, vec2};

    #[test]
    fn normalize_zero_is_zero() {
        assert!(vec2::default().normalize().is_zero());
        let n = vec2::new(3.0, -4.0).normalize();
        assert!((n.length() - 1.0).abs() < 1e-12);
        assert_eq!(n, vec2::new(0.6, -0.8));
    }

    #[test]
    fn equality_is_tolerant() {
        assert_eq!(vec2::new(1.0, 2.0), vec2::new(1.0 + 1e-8, 2.0 - 1e-8));
        assert_ne!(vec2::new(1.0, 2.0), vec2::new(1.0 + 1e-4, 2.0));
        assert_eq!(ivec2::new(1, 2), ivec2::new(1, 2));
    }

    #[test]
    fn rotate_and_clamp() {
        let r = vec2::new(1.0, 0.0).rotate(std::f64::consts::FRAC_PI_2);
        assert_eq!(r, vec2::new(0.0, 1.0));

        let c = vec2::new(30.0, 40.0).clamp_length(5.0);
        assert_eq!(c, vec2::new(3.0, 4.0));
        let unchanged = vec2::new(1.0, 1.0).clamp_length(5.0);
        assert_eq!(unchanged, vec2::new(1.0, 1.0));
    }

    #[test]
    fn dot_and_cross() {
        let a = vec2::new(1.0, 2.0);
        let b = vec2::new(3.0, 4.0);
        assert_eq!(a.dot(&b), 11.0);
        assert_eq!(a.cross(&b), -2.0);
        assert_eq!(a + b, vec2::new(4.0, 6.0));
        assert_eq!(b - a, vec2::new(2.0, 2.0));
        assert_eq!(-a * 2.0, vec2::new(-2.0, -4.0));
        assert_eq!(b / 2.0, vec2::new(1.5, 2.0));
    }
}
