//! Angle encoding and polar projection helpers.
//!
//! Angles are stored as a fraction of a full turn (`TRIG_MAX_ANGLE` per turn),
//! with 0 at 12 o'clock growing clockwise. Projections are done in half-pixel
//! integer units so that cardinal directions land on exact pixels.

use core::f32::consts::PI;

use embedded_graphics::{
    geometry::Angle,
    prelude::{Point, Size},
    primitives::Rectangle,
};

/// One full turn in angle units.
pub const TRIG_MAX_ANGLE: i32 = 0x10000;
/// Fixed-point scale for sine/cosine ratios.
pub const TRIG_MAX_RATIO: i32 = 0xffff;

/// An angle in full-turn units. `FULL_TURN` and zero are distinct values.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct TrigAngle(pub i32);

impl TrigAngle {
    pub const ZERO: TrigAngle = TrigAngle(0);
    pub const FULL_TURN: TrigAngle = TrigAngle(TRIG_MAX_ANGLE);

    /// Integer degrees to angle units, truncating toward zero.
    pub const fn from_degrees(deg: i32) -> Self {
        TrigAngle(deg * TRIG_MAX_ANGLE / 360)
    }

    pub fn to_degrees(self) -> f32 {
        self.0 as f32 * 360.0 / TRIG_MAX_ANGLE as f32
    }

    fn to_radians(self) -> f32 {
        self.0 as f32 * (2.0 * PI / TRIG_MAX_ANGLE as f32)
    }

    /// (sin, cos) scaled to `TRIG_MAX_RATIO`, rounded to the nearest step.
    pub fn ratios(self) -> (i32, i32) {
        let rad = self.to_radians();
        let scale = TRIG_MAX_RATIO as f32;
        (
            libm::roundf(libm::sinf(rad) * scale) as i32,
            libm::roundf(libm::cosf(rad) * scale) as i32,
        )
    }
}

/// End angle for a radial fill spanning `deg` degrees from zero.
///
/// A whole number of turns must stay a full circle; `from_degrees(360 % 360)`
/// would be an empty sweep.
pub const fn sweep_end(deg: i32) -> TrigAngle {
    if deg % 360 == 0 {
        TrigAngle::FULL_TURN
    } else {
        TrigAngle::from_degrees(deg)
    }
}

/// Center point of a bounding rectangle: origin + size / 2.
pub fn center_point(bounds: &Rectangle) -> Point {
    bounds.top_left + Point::new(bounds.size.width as i32 / 2, bounds.size.height as i32 / 2)
}

/// A rectangle of `size` whose `center_point` is `center`.
pub fn centered_rect(center: Point, size: Size) -> Rectangle {
    let top_left = center - Point::new(size.width as i32 / 2, size.height as i32 / 2);
    Rectangle::new(top_left, size)
}

/// Point on the circle fitted into `rect` (diameter = shorter side) at `angle`.
pub fn point_from_polar(rect: &Rectangle, angle: TrigAngle) -> Point {
    let w = rect.size.width as i64;
    let h = rect.size.height as i64;
    if w == 0 || h == 0 {
        return rect.top_left;
    }

    // half-pixel units
    let cx2 = 2 * rect.top_left.x as i64 + (w - 1);
    let cy2 = 2 * rect.top_left.y as i64 + (h - 1);
    let r2 = w.min(h) - 1;

    let (sin, cos) = angle.ratios();
    let ratio = TRIG_MAX_RATIO as i64;

    let x = (cx2 * ratio + r2 * sin as i64 + ratio).div_euclid(2 * ratio);
    let y = (cy2 * ratio - r2 * cos as i64 + ratio).div_euclid(2 * ratio);
    Point::new(x as i32, y as i32)
}

/// Convert a dial angle (0 at 12 o'clock) to an embedded-graphics angle (0 at 3 o'clock).
pub fn to_graphics_angle(angle: TrigAngle) -> Angle {
    Angle::from_degrees(angle.to_degrees() - 90.0)
}

/// Sweep between two dial angles as an embedded-graphics angle.
pub fn to_graphics_sweep(start: TrigAngle, end: TrigAngle) -> Angle {
    Angle::from_degrees(TrigAngle(end.0 - start.0).to_degrees())
}
