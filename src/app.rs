//! Watch face application object.
//!
//! `SunburstApp` owns the only long-lived state (the sampled time and the
//! face center) and exposes the lifecycle a host adapter drives:
//! `on_start`, `on_tick`, `on_draw`, `on_stop`. Nothing here touches board types.

use core::fmt;

use embedded_graphics::{
    draw_target::DrawTarget, pixelcolor::Rgb565, prelude::Point, primitives::Rectangle,
};
use log::{debug, info, warn};

use crate::clock::{refresh_time, ClockTime, MinuteTicker, WallClock};
use crate::face::{FacePlan, Palette, TickParity, FACE_SIZE, SUNBURST};
use crate::geometry::{center_point, centered_rect};

/// Errors from `on_draw`.
#[derive(Debug, PartialEq, Eq)]
pub enum DrawError<E> {
    /// Drawn before `on_start` or after `on_stop`.
    NotStarted,
    Surface(E),
}

impl<E> From<E> for DrawError<E> {
    fn from(e: E) -> Self {
        DrawError::Surface(e)
    }
}

impl<E: fmt::Debug> fmt::Display for DrawError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DrawError::NotStarted => f.write_str("face drawn before it was started"),
            DrawError::Surface(e) => write!(f, "drawing surface error: {:?}", e),
        }
    }
}

/// Errors from one `poll` step.
#[derive(Debug, PartialEq, Eq)]
pub enum PollError<C, D> {
    Clock(C),
    Draw(DrawError<D>),
}

impl<C: fmt::Debug, D: fmt::Debug> fmt::Display for PollError<C, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PollError::Clock(e) => write!(f, "clock read failed: {:?}", e),
            PollError::Draw(e) => write!(f, "redraw failed: {}", e),
        }
    }
}

/// State shared between the sampler and the renderer.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct FaceContext {
    pub time: ClockTime,
    pub center: Option<Point>,
}

impl FaceContext {
    /// The face layer, centered on the display center.
    pub fn layer(&self) -> Option<Rectangle> {
        self.center.map(|c| centered_rect(c, FACE_SIZE))
    }
}

pub struct SunburstApp {
    ctx: FaceContext,
    palette: Palette,
    parity: TickParity,
}

impl Default for SunburstApp {
    fn default() -> Self {
        Self::new()
    }
}

impl SunburstApp {
    pub const fn new() -> Self {
        Self::with_parity(TickParity::Carried)
    }

    pub const fn with_parity(parity: TickParity) -> Self {
        Self::with_style(SUNBURST, parity)
    }

    pub const fn with_style(palette: Palette, parity: TickParity) -> Self {
        Self {
            ctx: FaceContext {
                time: ClockTime::MIDNIGHT,
                center: None,
            },
            palette,
            parity,
        }
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn context(&self) -> &FaceContext {
        &self.ctx
    }

    pub fn is_started(&self) -> bool {
        self.ctx.center.is_some()
    }

    /// Sample the clock once and cache the center of `display`.
    ///
    /// A clock error leaves the app unstarted.
    pub fn on_start<C: WallClock>(
        &mut self,
        clock: &mut C,
        display: Rectangle,
    ) -> Result<ClockTime, C::Error> {
        let now = refresh_time(clock, &mut self.ctx.time)?;
        let center = center_point(&display);
        self.ctx.center = Some(center);
        info!("sunburst started at {} center=({}, {})", now, center.x, center.y);
        Ok(now)
    }

    /// Minute boundary: re-sample the clock.
    pub fn on_tick<C: WallClock>(&mut self, clock: &mut C) -> Result<ClockTime, C::Error> {
        let now = refresh_time(clock, &mut self.ctx.time)?;
        debug!("tick {}", now);
        Ok(now)
    }

    /// Repaint the whole surface: window background, then the face.
    pub fn on_draw<D>(&self, target: &mut D) -> Result<(), DrawError<D::Error>>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        let (Some(center), Some(layer)) = (self.ctx.center, self.ctx.layer()) else {
            warn!("draw requested before start");
            return Err(DrawError::NotStarted);
        };

        target.clear(self.palette.window)?;
        FacePlan::build(&layer, self.ctx.time, center, &self.palette, self.parity)
            .draw(target)?;
        debug!("redraw {}", self.ctx.time);
        Ok(())
    }

    /// One poll of the wall clock. On a new minute, ticks and redraws.
    ///
    /// The minute is committed to `ticker` only after both succeed, so a
    /// failure is retried by the next poll. Returns whether a frame was drawn.
    pub fn poll<C, D>(
        &mut self,
        clock: &mut C,
        ticker: &mut MinuteTicker,
        target: &mut D,
    ) -> Result<bool, PollError<C::Error, D::Error>>
    where
        C: WallClock,
        D: DrawTarget<Color = Rgb565>,
    {
        let now = clock.local_time().map_err(PollError::Clock)?;
        if !ticker.is_new(now) {
            return Ok(false);
        }

        self.on_tick(clock).map_err(PollError::Clock)?;
        self.on_draw(target).map_err(PollError::Draw)?;
        ticker.commit(self.ctx.time);
        Ok(true)
    }

    pub fn on_stop(&mut self) {
        self.ctx.center = None;
        info!("sunburst stopped");
    }
}
