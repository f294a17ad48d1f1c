//! Vector kernel helpers on top of `glam::DVec3`.
//!
//! glam supplies the arithmetic operators, dot/cross and length. This module
//! adds the operations whose numeric policy differs from glam's: divisions
//! add a small epsilon to the divisor so degenerate inputs produce large but
//! finite values instead of infinities or NaNs.

use glam::DVec3;

use crate::Interval;

/// Added to every divisor in [`VectorExt::safe_div`] and friends.
pub const DIV_EPSILON: f64 = 1e-8;

/// Scalar division with [`DIV_EPSILON`] added to the divisor.
#[inline]
pub fn safe_div(numerator: f64, denominator: f64) -> f64 {
    numerator / (denominator + DIV_EPSILON)
}

/// Extension trait for `DVec3` used throughout the tracer.
pub trait VectorExt {
    /// Divide every component by `rhs + DIV_EPSILON`.
    fn safe_div(self, rhs: f64) -> DVec3;

    /// Component-wise division with `DIV_EPSILON` added to each divisor.
    fn safe_div_vec(self, rhs: DVec3) -> DVec3;

    /// Normalize without failing on zero length.
    ///
    /// A zero vector stays zero; a tiny one grows large but stays finite.
    fn safe_normalize(self) -> DVec3;

    /// Reflect about a unit normal: `v - 2 (v . n) n`.
    fn reflect(self, normal: DVec3) -> DVec3;

    /// Clamp each channel to `[0, 1]` and scale to `[0, 255]`. No gamma.
    fn to_rgb(self) -> DVec3;

    /// [`VectorExt::to_rgb`] truncated to bytes.
    fn to_rgb8(self) -> [u8; 3];
}

impl VectorExt for DVec3 {
    #[inline]
    fn safe_div(self, rhs: f64) -> DVec3 {
        self / (rhs + DIV_EPSILON)
    }

    #[inline]
    fn safe_div_vec(self, rhs: DVec3) -> DVec3 {
        self / (rhs + DVec3::splat(DIV_EPSILON))
    }

    #[inline]
    fn safe_normalize(self) -> DVec3 {
        self.safe_div(self.length())
    }

    #[inline]
    fn reflect(self, normal: DVec3) -> DVec3 {
        self - normal * (2.0 * self.dot(normal))
    }

    fn to_rgb(self) -> DVec3 {
        let unit = Interval::UNIT;
        DVec3::new(unit.clamp(self.x), unit.clamp(self.y), unit.clamp(self.z)) * 255.0
    }

    fn to_rgb8(self) -> [u8; 3] {
        let c = self.to_rgb();
        [c.x as u8, c.y as u8, c.z as u8]
    }
}
