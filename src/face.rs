//! Sunburst face layout and rendering.
//!
//! This module provides:
//! - The fixed geometric zones every radial line is projected onto
//! - Hand angle math for the hour and minute indicators
//! - `FacePlan`, the ordered list of fills and lines for one frame
//! - `render`, which draws a frame onto any `DrawTarget<Color = Rgb565>`
//!
//! Zones are laid out for a 180x180 face layer; the layer can sit anywhere on
//! the display, all zones are offset by its origin.

use embedded_graphics::{
    draw_target::DrawTarget,
    pixelcolor::Rgb565,
    prelude::{Point, Primitive, Size},
    primitives::{Arc, Circle, Line, PrimitiveStyle, Rectangle, Sector},
    Drawable,
};

use crate::clock::ClockTime;
use crate::geometry::{
    point_from_polar, sweep_end, to_graphics_angle, to_graphics_sweep, TrigAngle, TRIG_MAX_ANGLE,
};

pub const DEGREES_IN_HOUR: i32 = 30;
pub const DEGREES_IN_MINUTE: i32 = 6;

pub const FACE_SIZE: Size = Size::new(180, 180);

/// A named bounding box, relative to the face layer origin.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Zone {
    pub name: &'static str,
    pub rect: Rectangle,
}

impl Zone {
    const fn new(name: &'static str, x: i32, y: i32, w: u32, h: u32) -> Self {
        Self {
            name,
            rect: Rectangle::new(Point::new(x, y), Size::new(w, h)),
        }
    }

    /// This zone in display coordinates for a layer placed at `layer`.
    pub fn within(&self, layer: &Rectangle) -> Rectangle {
        Rectangle::new(layer.top_left + self.rect.top_left, self.rect.size)
    }
}

pub const FULL_FACE: Zone = Zone::new("full_face", 0, 0, 180, 180);
pub const FULL_FACE_SHORT: Zone = Zone::new("full_face_short", 15, 15, 150, 150);
pub const INNER_CIRCLE: Zone = Zone::new("inner_circle", 30, 30, 120, 120);
pub const INNER_CIRCLE_SHORT: Zone = Zone::new("inner_circle_short", 40, 40, 100, 100);
pub const HOUR_HAND: Zone = Zone::new("hour_hand", 70, 70, 40, 40);
pub const MINUTE_HAND: Zone = Zone::new("minute_hand", 50, 50, 80, 80);

/// One ring of alternating long/short ticks, sampled from `start` up to (not including) 360.
#[derive(Copy, Clone, Debug)]
pub struct TickRing {
    pub long: Zone,
    pub short: Zone,
    pub start: i32,
    pub stride: i32,
}

impl TickRing {
    pub fn angles(&self) -> impl Iterator<Item = i32> {
        (self.start..360).step_by(self.stride as usize)
    }

    /// Number of samples, ceil((360 - start) / stride).
    pub const fn len(&self) -> usize {
        ((360 - self.start + self.stride - 1) / self.stride) as usize
    }
}

pub const OUTER_RING: TickRing = TickRing {
    long: FULL_FACE,
    short: FULL_FACE_SHORT,
    start: -3,
    stride: 15,
};
pub const INNER_RING: TickRing = TickRing {
    long: INNER_CIRCLE,
    short: INNER_CIRCLE_SHORT,
    start: 0,
    stride: 10,
};

pub const MAX_LINES: usize = 64;
const _: () = assert!(OUTER_RING.len() + INNER_RING.len() + 2 <= MAX_LINES);

/// How the long/short alternation behaves between the two tick rings.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum TickParity {
    /// The inner ring continues from wherever the outer ring left off.
    #[default]
    Carried,
    /// Each ring starts on a long tick.
    PerRing,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Stroke {
    pub color: Rgb565,
    pub width: u32,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Palette {
    pub window: Rgb565,
    pub face: Rgb565,
    pub outer_ticks: Stroke,
    pub inner_ticks: Stroke,
    pub hands: Stroke,
}

// 0x555555
const DARK_GRAY: Rgb565 = Rgb565::new(10, 21, 10);
// 0x00AAAA
const TIFFANY_BLUE: Rgb565 = Rgb565::new(0, 42, 21);

pub const SUNBURST: Palette = Palette {
    window: Rgb565::new(0, 0, 0),
    face: Rgb565::new(31, 63, 31),
    outer_ticks: Stroke {
        color: DARK_GRAY,
        width: 6,
    },
    inner_ticks: Stroke {
        color: Rgb565::new(0, 0, 0),
        width: 4,
    },
    hands: Stroke {
        color: TIFFANY_BLUE,
        width: 4,
    },
};

/// Hour indicator in degrees: whole hours plus a truncated fraction of the hour.
pub fn hour_hand_degrees(time: ClockTime) -> i32 {
    DEGREES_IN_HOUR * time.hour12() as i32 + DEGREES_IN_HOUR * time.minute() as i32 / 60
}

/// Minute indicator in degrees. Seconds are not applied.
pub fn minute_hand_degrees(time: ClockTime) -> i32 {
    DEGREES_IN_MINUTE * time.minute() as i32
}

/// A filled sector of the circle fitted into `rect`, `inset` pixels deep from the edge.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RadialFill {
    pub rect: Rectangle,
    pub color: Rgb565,
    pub inset: u32,
    pub start: TrigAngle,
    pub end: TrigAngle,
}

impl RadialFill {
    pub fn is_full_turn(&self) -> bool {
        self.end.0 - self.start.0 >= TRIG_MAX_ANGLE
    }

    pub fn draw<D>(&self, target: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        let diameter = self.rect.size.width.min(self.rect.size.height);
        let center = self.rect.center();
        if self.end <= self.start || diameter == 0 {
            return Ok(());
        }

        if self.inset >= diameter / 2 {
            let style = PrimitiveStyle::with_fill(self.color);
            if self.is_full_turn() {
                Circle::with_center(center, diameter).into_styled(style).draw(target)
            } else {
                Sector::with_center(
                    center,
                    diameter,
                    to_graphics_angle(self.start),
                    to_graphics_sweep(self.start, self.end),
                )
                .into_styled(style)
                .draw(target)
            }
        } else {
            // band along the edge: centered stroke on a circle shrunk by the inset
            let style = PrimitiveStyle::with_stroke(self.color, self.inset);
            let band = diameter - self.inset;
            if self.is_full_turn() {
                Circle::with_center(center, band).into_styled(style).draw(target)
            } else {
                Arc::with_center(
                    center,
                    band,
                    to_graphics_angle(self.start),
                    to_graphics_sweep(self.start, self.end),
                )
                .into_styled(style)
                .draw(target)
            }
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LineKind {
    OuterTick,
    InnerTick,
    HourHand,
    MinuteHand,
}

/// A straight line from a projected point to the face center.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RadialLine {
    pub kind: LineKind,
    pub degrees: i32,
    pub from: Point,
    pub to: Point,
    pub stroke: Stroke,
}

impl RadialLine {
    fn project(
        kind: LineKind,
        zone: &Zone,
        layer: &Rectangle,
        degrees: i32,
        center: Point,
        stroke: Stroke,
    ) -> Self {
        let from = point_from_polar(&zone.within(layer), TrigAngle::from_degrees(degrees));
        Self {
            kind,
            degrees,
            from,
            to: center,
            stroke,
        }
    }

    pub fn draw<D>(&self, target: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        Line::new(self.from, self.to)
            .into_styled(PrimitiveStyle::with_stroke(self.stroke.color, self.stroke.width))
            .draw(target)
    }
}

/// Everything drawn for one frame, in paint order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FacePlan {
    pub background: RadialFill,
    pub lines: heapless::Vec<RadialLine, MAX_LINES>,
}

impl FacePlan {
    pub fn build(
        layer: &Rectangle,
        time: ClockTime,
        center: Point,
        palette: &Palette,
        parity: TickParity,
    ) -> Self {
        let background = RadialFill {
            rect: FULL_FACE.within(layer),
            color: palette.face,
            inset: FACE_SIZE.width / 2,
            start: TrigAngle::ZERO,
            end: sweep_end(360),
        };

        let mut lines = heapless::Vec::new();
        let mut shorter = false;

        push_ring(
            &mut lines,
            &OUTER_RING,
            LineKind::OuterTick,
            layer,
            center,
            palette.outer_ticks,
            &mut shorter,
        );
        if parity == TickParity::PerRing {
            shorter = false;
        }
        push_ring(
            &mut lines,
            &INNER_RING,
            LineKind::InnerTick,
            layer,
            center,
            palette.inner_ticks,
            &mut shorter,
        );

        let hour = RadialLine::project(
            LineKind::HourHand,
            &HOUR_HAND,
            layer,
            hour_hand_degrees(time),
            center,
            palette.hands,
        );
        let minute = RadialLine::project(
            LineKind::MinuteHand,
            &MINUTE_HAND,
            layer,
            minute_hand_degrees(time),
            center,
            palette.hands,
        );
        lines.push(hour).ok();
        lines.push(minute).ok();

        Self { background, lines }
    }

    pub fn lines_of(&self, kind: LineKind) -> impl Iterator<Item = &RadialLine> + '_ {
        self.lines.iter().filter(move |l| l.kind == kind)
    }

    pub fn draw<D>(&self, target: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        self.background.draw(target)?;
        for line in &self.lines {
            line.draw(target)?;
        }
        Ok(())
    }
}

fn push_ring(
    lines: &mut heapless::Vec<RadialLine, MAX_LINES>,
    ring: &TickRing,
    kind: LineKind,
    layer: &Rectangle,
    center: Point,
    stroke: Stroke,
    shorter: &mut bool,
) {
    for deg in ring.angles() {
        let zone = if *shorter { &ring.short } else { &ring.long };
        *shorter = !*shorter;
        lines.push(RadialLine::project(kind, zone, layer, deg, center, stroke)).ok();
    }
}

/// Draw the sunburst face for `time` into `layer`, with every line meeting at `center`.
pub fn render<D>(
    target: &mut D,
    layer: Rectangle,
    time: ClockTime,
    center: Point,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb565>,
{
    FacePlan::build(&layer, time, center, &SUNBURST, TickParity::default()).draw(target)
}

#[cfg(test)]
mod tests {
    use super::*;

    const LAYER: Rectangle = Rectangle::new(Point::new(0, 0), FACE_SIZE);
    const CENTER: Point = Point::new(90, 90);

    fn t(h: u8, m: u8) -> ClockTime {
        ClockTime::new(h, m, 0).unwrap()
    }

    fn plan(time: ClockTime, parity: TickParity) -> FacePlan {
        FacePlan::build(&LAYER, time, CENTER, &SUNBURST, parity)
    }

    #[test]
    fn hand_angles_for_known_times() {
        assert_eq!(hour_hand_degrees(t(14, 0)), 60);
        assert_eq!(minute_hand_degrees(t(14, 0)), 0);
        assert_eq!(hour_hand_degrees(t(0, 30)), 15);
        assert_eq!(minute_hand_degrees(t(0, 30)), 180);
        assert_eq!(hour_hand_degrees(t(23, 59)), 359);
        assert_eq!(minute_hand_degrees(t(23, 59)), 354);
    }

    #[test]
    fn hour_hand_stays_within_one_turn() {
        for h in 0..24 {
            for m in 0..60 {
                let deg = hour_hand_degrees(t(h, m));
                assert!((0..360).contains(&deg));
                assert_eq!(deg, 30 * (h as i32 % 12) + 30 * m as i32 / 60);
            }
        }
    }

    #[test]
    fn minute_hand_steps_by_six() {
        for m in 0..60u8 {
            let deg = minute_hand_degrees(t(0, m));
            assert_eq!(deg, 6 * m as i32);
            assert!(deg <= 354);
        }
    }

    #[test]
    fn hour_hand_ignores_partial_two_minute_steps() {
        assert_eq!(hour_hand_degrees(t(3, 0)), hour_hand_degrees(t(3, 1)));
        assert_eq!(hour_hand_degrees(t(3, 2)), 91);
    }

    #[test]
    fn ring_sample_counts() {
        assert_eq!(OUTER_RING.len(), 25);
        assert_eq!(OUTER_RING.angles().count(), 25);
        assert_eq!(OUTER_RING.angles().next(), Some(-3));
        assert_eq!(OUTER_RING.angles().last(), Some(357));

        assert_eq!(INNER_RING.len(), 36);
        assert_eq!(INNER_RING.angles().last(), Some(350));
    }

    #[test]
    fn plan_keeps_paint_order() {
        let p = plan(t(10, 10), TickParity::Carried);
        assert_eq!(p.lines.len(), 63);

        let kinds: heapless::Vec<LineKind, MAX_LINES> = p.lines.iter().map(|l| l.kind).collect();
        assert!(kinds[..25].iter().all(|k| *k == LineKind::OuterTick));
        assert!(kinds[25..61].iter().all(|k| *k == LineKind::InnerTick));
        assert_eq!(kinds[61], LineKind::HourHand);
        assert_eq!(kinds[62], LineKind::MinuteHand);

        let outer_width = Stroke {
            color: DARK_GRAY,
            width: 6,
        };
        let inner_width = Stroke {
            color: Rgb565::new(0, 0, 0),
            width: 4,
        };
        assert!(p.lines_of(LineKind::OuterTick).all(|l| l.stroke == outer_width));
        assert!(p.lines_of(LineKind::InnerTick).all(|l| l.stroke == inner_width));
        assert!(p.lines[61..].iter().all(|l| l.stroke.width == 4));
    }

    #[test]
    fn every_line_ends_at_center() {
        let p = plan(t(8, 45), TickParity::Carried);
        assert!(p.lines.iter().all(|l| l.to == CENTER));
    }

    #[test]
    fn outer_ticks_alternate_long_short() {
        let p = plan(t(0, 0), TickParity::Carried);
        let ticks: heapless::Vec<&RadialLine, MAX_LINES> =
            p.lines_of(LineKind::OuterTick).collect();

        // 12 o'clock neighbourhood: -3 deg on the full rect, 12 deg on the short one
        let long = point_from_polar(&FULL_FACE.rect, TrigAngle::from_degrees(-3));
        let short = point_from_polar(&FULL_FACE_SHORT.rect, TrigAngle::from_degrees(12));
        assert_eq!(ticks[0].from, long);
        assert_eq!(ticks[1].from, short);
        // 25 samples: the last one is long again
        let last = point_from_polar(&FULL_FACE.rect, TrigAngle::from_degrees(357));
        assert_eq!(ticks[24].from, last);
    }

    #[test]
    fn carried_parity_starts_inner_ring_short() {
        let p = plan(t(0, 0), TickParity::Carried);
        let first = p.lines_of(LineKind::InnerTick).next().unwrap();
        assert_eq!(first.degrees, 0);
        assert_eq!(first.from, Point::new(90, 40));
    }

    #[test]
    fn per_ring_parity_starts_inner_ring_long() {
        let p = plan(t(0, 0), TickParity::PerRing);
        let first = p.lines_of(LineKind::InnerTick).next().unwrap();
        assert_eq!(first.from, Point::new(90, 30));
        // outer ring is unaffected
        assert_eq!(
            plan(t(0, 0), TickParity::PerRing).lines_of(LineKind::OuterTick).count(),
            plan(t(0, 0), TickParity::Carried).lines_of(LineKind::OuterTick).count()
        );
    }

    #[test]
    fn hands_project_onto_their_zones() {
        let p = plan(t(15, 0), TickParity::Carried);
        let hour = p.lines_of(LineKind::HourHand).next().unwrap();
        let minute = p.lines_of(LineKind::MinuteHand).next().unwrap();

        assert_eq!(hour.degrees, 90);
        assert_eq!(hour.from, Point::new(109, 90));
        assert_eq!(minute.degrees, 0);
        assert_eq!(minute.from, Point::new(90, 50));
        assert_eq!(hour.stroke, SUNBURST.hands);
    }

    #[test]
    fn background_is_a_full_turn() {
        let p = plan(t(6, 0), TickParity::Carried);
        assert!(p.background.is_full_turn());
        assert_eq!(p.background.end, TrigAngle::FULL_TURN);
        assert_eq!(p.background.rect, LAYER);
    }

    #[test]
    fn zones_follow_layer_origin() {
        let layer = Rectangle::new(Point::new(30, 30), FACE_SIZE);
        assert_eq!(
            HOUR_HAND.within(&layer),
            Rectangle::new(Point::new(100, 100), Size::new(40, 40))
        );

        let center = Point::new(120, 120);
        let shifted = FacePlan::build(&layer, t(3, 0), center, &SUNBURST, TickParity::Carried);
        let hour = shifted.lines_of(LineKind::HourHand).next().unwrap();
        assert_eq!(hour.from, Point::new(139, 120));
    }

    #[test]
    fn plan_is_pure() {
        assert_eq!(
            plan(t(4, 20), TickParity::Carried),
            plan(t(4, 20), TickParity::Carried)
        );
    }
}
