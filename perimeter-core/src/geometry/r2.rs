use std::{ops::{Sub, Mul, Add, Div, Neg}, fmt::{Display, Formatter, self}};
use approx::{AbsDiffEq, RelativeEq};

use serde::{Deserialize, Serialize};
use tsify::Tsify;

#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize, Tsify)]
pub struct R2<D> {
    pub x: D,
    pub y: D,
}

impl<D: Display> Display for R2<D> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "({:.3}, {:.3})", self.x, self.y)
    }
}

impl R2<f64> {
    pub fn new(x: f64, y: f64) -> Self {
        R2 { x, y }
    }

    pub fn zero() -> Self {
        R2 { x: 0., y: 0. }
    }

    pub fn dot(&self, o: &R2<f64>) -> f64 {
        self.x * o.x + self.y * o.y
    }

    /// z-component of the 3D cross product.
    pub fn cross(&self, o: &R2<f64>) -> f64 {
        self.x * o.y - self.y * o.x
    }

    pub fn norm2(&self) -> f64 {
        self.dot(self)
    }

    pub fn norm(&self) -> f64 {
        self.norm2().sqrt()
    }

    pub fn distance(&self, o: &R2<f64>) -> f64 {
        (*self - *o).norm()
    }

    /// Unit vector in the same direction; the zero vector maps to itself.
    pub fn normalize(&self) -> R2<f64> {
        let n = self.norm();
        if n == 0. {
            *self
        } else {
            *self / n
        }
    }

    /// Counter-clockwise quarter turn.
    pub fn perp(&self) -> R2<f64> {
        R2 { x: -self.y, y: self.x }
    }

    /// Counter-clockwise rotation by `theta` radians.
    pub fn rotate(&self, theta: f64) -> R2<f64> {
        let (sin, cos) = theta.sin_cos();
        R2 {
            x: self.x * cos - self.y * sin,
            y: self.x * sin + self.y * cos,
        }
    }

    pub fn midpoint(&self, o: &R2<f64>) -> R2<f64> {
        R2 {
            x: (self.x + o.x) / 2.,
            y: (self.y + o.y) / 2.,
        }
    }
}

impl AbsDiffEq for R2<f64> {
    type Epsilon = f64;
    fn default_epsilon() -> Self::Epsilon {
        f64::default_epsilon()
    }
    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        self.x.abs_diff_eq(&other.x, epsilon) && self.y.abs_diff_eq(&other.y, epsilon)
    }
}

impl RelativeEq for R2<f64> {
    fn default_max_relative() -> Self::Epsilon {
        f64::default_max_relative()
    }
    fn relative_eq(&self, other: &Self, epsilon: Self::Epsilon, max_relative: Self::Epsilon) -> bool {
        self.x.relative_eq(&other.x, epsilon, max_relative) && self.y.relative_eq(&other.y, epsilon, max_relative)
    }
}

impl<D: Add<Output = D>> Add for R2<D> {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        R2 {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
        }
    }
}

impl<D: Sub<Output = D>> Sub for R2<D> {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self::Output {
        R2 {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
        }
    }
}

impl<D: Neg<Output = D>> Neg for R2<D> {
    type Output = Self;
    fn neg(self) -> Self::Output {
        R2 {
            x: -self.x,
            y: -self.y,
        }
    }
}

impl<D: Mul<D, Output = D> + Clone> Mul<D> for R2<D> {
    type Output = Self;
    fn mul(self, rhs: D) -> Self::Output {
        R2 {
            x: self.x * rhs.clone(),
            y: self.y * rhs,
        }
    }
}

impl<D: Div<D, Output = D> + Clone> Div<D> for R2<D> {
    type Output = Self;
    fn div(self, rhs: D) -> Self::Output {
        R2 {
            x: self.x / rhs.clone(),
            y: self.y / rhs,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::FRAC_PI_2;

    use super::*;
    use test_log::test;

    #[test]
    fn rotate_quarter_turn() {
        let v = R2::new(1., 0.).rotate(FRAC_PI_2);
        assert_relative_eq!(v, R2::new(0., 1.), epsilon = 1e-12);
        assert_relative_eq!(v, R2::new(1., 0.).perp(), epsilon = 1e-12);
    }

    #[test]
    fn norms_and_products() {
        let a = R2::new(3., 4.);
        assert_eq!(a.norm(), 5.);
        assert_eq!(a.dot(&R2::new(1., 1.)), 7.);
        assert_eq!(a.cross(&R2::new(1., 0.)), -4.);
        assert_relative_eq!(a.normalize().norm(), 1., epsilon = 1e-12);
        assert_eq!(R2::zero().normalize(), R2::zero());
        assert_eq!(a.midpoint(&R2::new(5., 0.)), R2::new(4., 2.));
    }
}
