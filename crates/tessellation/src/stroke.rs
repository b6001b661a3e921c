use core::mem;

use crate::geom::fixed::{self, translate};
use crate::geom::utils::is_ccw;
use crate::geom::{FixedTransform, PenPolygon, Wedge};
use crate::join::{cap, configured_join, round_join, OutlineWriter, INTERIOR_JOIN_THRESHOLD};
use crate::math::{Point, Transform, Vector};
use crate::reverse::ReverseStack;
use crate::sink::PolygonSink;
use crate::{Color, StrokeError, StrokeEvent, StrokeOptions, StrokeResult};

/// A Context object that converts polylines into the outline polygons of
/// their stroke.
///
/// ## Overview
///
/// The tessellator walks each sub-path once. It emits one side of the stroke
/// directly to the output as the segments come in and stacks the other side,
/// which is emitted in reverse when the sub-path is closed or ended. Each
/// sub-path thus produces a single polygon, which may overlap itself at sharp
/// turns and where the path crosses itself. Filling it with the non-zero rule
/// gives the stroke.
///
/// The tessellator must be configured before use. The configuration holds
/// the stroke options and the transform that was applied to the input
/// positions, and caches the pen used for round joins and caps. It can be
/// changed at any time between two paths.
///
/// All of the arithmetic on positions is done in 16.16 fixed point, the
/// output only depends on the input and the configuration.
///
/// # Examples
///
/// ```
/// use strokepen_tessellation::{LineJoin, PolygonBuffers, StrokeOptions, StrokeTessellator};
/// use strokepen_tessellation::geom::fixed;
/// use strokepen_tessellation::math::{point, Transform};
///
/// let u = fixed::ONE;
/// let options = StrokeOptions::line_width(2.0).with_line_join(LineJoin::Round);
/// let mut tessellator = StrokeTessellator::with_options(&options, &Transform::identity()).unwrap();
///
/// let mut output = PolygonBuffers::new();
/// {
///     let mut builder = tessellator.builder(&mut output).unwrap();
///     builder.move_to(point(0, 0), 0xff0000ff);
///     builder.line_join();
///     builder.line_to(point(10 * u, 0), 0xff0000ff);
///     builder.line_join();
///     builder.line_to(point(10 * u, 10 * u), 0x00ff00ff);
///     builder.end();
/// }
///
/// assert_eq!(output.outlines.len(), 1);
/// assert_eq!(output.ends, 1);
/// println!("The outline is: {:?}.", output.outlines[0].vertices);
/// ```
pub struct StrokeTessellator {
    config: Option<StrokeConfig>,
    reverse: ReverseStack,
}

impl StrokeTessellator {
    /// Creates a tessellator that must be configured before use.
    pub fn new() -> Self {
        StrokeTessellator {
            config: None,
            reverse: ReverseStack::new(),
        }
    }

    /// Creates a configured tessellator.
    pub fn with_options(options: &StrokeOptions, transform: &Transform) -> StrokeResult<Self> {
        let mut tessellator = StrokeTessellator::new();
        tessellator.configure(options, transform)?;

        Ok(tessellator)
    }

    /// Sets the stroke options and the transform of the input positions.
    ///
    /// Only the linear part of the transform is used. On error the
    /// tessellator is left unconfigured.
    pub fn configure(&mut self, options: &StrokeOptions, transform: &Transform) -> StrokeResult {
        let config = match self.config.take() {
            Some(mut config) => {
                config.update(options, transform)?;
                config
            }
            None => StrokeConfig::new(options, transform)?,
        };

        log::debug!(
            "stroke: configured width {} ({:#x} raw, {:?}, {:?}), pen of {} vertices",
            options.line_width,
            config.line_width,
            options.line_cap,
            options.line_join,
            config.pen.len(),
        );

        self.config = Some(config);

        Ok(())
    }

    pub fn is_configured(&self) -> bool {
        self.config.is_some()
    }

    /// The current options, if configured.
    pub fn options(&self) -> Option<&StrokeOptions> {
        self.config.as_ref().map(|config| &config.options)
    }

    /// The pen used for round joins and caps, if configured.
    pub fn pen(&self) -> Option<&PenPolygon> {
        self.config.as_ref().map(|config| &config.pen)
    }

    /// Returns a builder that tessellates the commands it receives into `output`.
    pub fn builder<'l>(
        &'l mut self,
        output: &'l mut dyn PolygonSink,
    ) -> StrokeResult<StrokeBuilder<'l>> {
        let StrokeTessellator { config, reverse } = self;
        let config = config.as_ref().ok_or(StrokeError::NotConfigured)?;

        Ok(StrokeBuilder::new(config, reverse, output))
    }

    /// Tessellates a sequence of stroke commands.
    ///
    /// `end` is called on the builder after the last event if the sequence
    /// does not end with `StrokeEvent::End`.
    pub fn tessellate(
        &mut self,
        events: impl IntoIterator<Item = StrokeEvent>,
        output: &mut dyn PolygonSink,
    ) -> StrokeResult {
        let mut builder = self.builder(output)?;
        let mut ended = false;
        for event in events {
            builder.event(event);
            ended = event == StrokeEvent::End;
        }

        if !ended {
            builder.end();
        }

        Ok(())
    }

    /// Tessellates a single polyline with the configured join at every vertex.
    pub fn tessellate_polyline(
        &mut self,
        points: &[(Point, Color)],
        closed: bool,
        output: &mut dyn PolygonSink,
    ) -> StrokeResult {
        let mut builder = self.builder(output)?;

        let mut iter = points.iter();
        if let Some(&(first, color)) = iter.next() {
            builder.move_to(first, color);
            for &(to, color) in iter {
                builder.line_join();
                builder.line_to(to, color);
            }

            if closed {
                builder.line_join();
                builder.close();
            }
        }

        builder.end();

        Ok(())
    }
}

impl Default for StrokeTessellator {
    fn default() -> Self {
        Self::new()
    }
}

/// Parameters derived from the options and the transform.
pub(crate) struct StrokeConfig {
    pub options: StrokeOptions,
    pub transform: FixedTransform,
    pub line_width: i32,
    pub half_width: i32,
    /// Squared miter limit, in the units of
    /// `FixedTransform::untransformed_square_length_scaled`.
    pub miter_limit_sq: i128,
    pub pen: PenPolygon,
}

impl StrokeConfig {
    fn new(options: &StrokeOptions, transform: &Transform) -> StrokeResult<Self> {
        let mut config = StrokeConfig {
            options: *options,
            transform: FixedTransform::identity(),
            line_width: 0,
            half_width: 0,
            miter_limit_sq: 0,
            pen: PenPolygon::new(),
        };
        config.update(options, transform)?;

        Ok(config)
    }

    /// Reconfigures in place. Nothing is changed on error.
    fn update(&mut self, options: &StrokeOptions, transform: &Transform) -> StrokeResult {
        let width = options.line_width;
        if !width.is_finite() || width < 0.0 {
            return Err(StrokeError::InvalidLineWidth(width));
        }
        let line_width =
            fixed::try_from_f64(f64::from(width)).ok_or(StrokeError::InvalidLineWidth(width))?;

        // NaN fails the comparison.
        if !(options.miter_limit >= StrokeOptions::MINIMUM_MITER_LIMIT) {
            return Err(StrokeError::InvalidMiterLimit(options.miter_limit));
        }

        let transform = FixedTransform::from_transform(transform).ok_or(StrokeError::InvalidTransform)?;
        if !transform.is_invertible() {
            return Err(StrokeError::SingularTransform);
        }

        let half_width = line_width >> 1;
        // Squared below, the sign of the determinant doesn't matter.
        let limit = f64::from(options.miter_limit) * fixed::to_f64(half_width) * transform.determinant();
        let miter_limit_sq = (limit * limit * 4_294_967_296.0) as i128;

        self.options = *options;
        self.transform = transform;
        self.line_width = line_width;
        self.half_width = half_width;
        self.miter_limit_sq = miter_limit_sq;
        self.pen.rebuild(line_width, &self.transform);

        Ok(())
    }

    #[inline]
    fn offset(&self, from: Point, to: Point) -> Vector {
        self.transform.offset(from, to, self.half_width)
    }
}

/// A segment to the start of the sub-path, kept until we know whether the
/// sub-path is closed.
#[derive(Copy, Clone, Debug)]
struct PendingLine {
    color: Color,
    join: bool,
}

/// Receives the stroke commands of a path and writes the outline polygons to
/// the output as it goes.
///
/// Created by `StrokeTessellator::builder`. A path is a sequence of
/// sub-paths, each starting with `move_to`, followed by `end`. Positions are
/// in 16.16 fixed point and are expected to already be transformed.
pub struct StrokeBuilder<'l> {
    config: &'l StrokeConfig,
    out: OutlineWriter<'l>,
    /// Whether a sub-path was begun and the path not ended.
    open: bool,
    /// Whether a segment was emitted in the current sub-path.
    started: bool,
    join_requested: bool,
    pending: Option<PendingLine>,

    start: Point,
    start_color: Color,
    /// Second position of the sub-path.
    second: Point,
    /// Offset of the first segment.
    start_offset: Vector,

    previous: Point,
    current: Point,
    current_color: Color,
    /// Offset of the last segment.
    previous_offset: Vector,
}

impl<'l> StrokeBuilder<'l> {
    fn new(
        config: &'l StrokeConfig,
        reverse: &'l mut ReverseStack,
        output: &'l mut dyn PolygonSink,
    ) -> Self {
        reverse.clear();

        let origin = Point::origin();
        StrokeBuilder {
            config,
            out: OutlineWriter { output, reverse },
            open: false,
            started: false,
            join_requested: false,
            pending: None,
            start: origin,
            start_color: 0,
            second: origin,
            start_offset: Vector::zero(),
            previous: origin,
            current: origin,
            current_color: 0,
            previous_offset: Vector::zero(),
        }
    }

    /// Forwards a command to the method of the same name.
    pub fn event(&mut self, event: StrokeEvent) {
        match event {
            StrokeEvent::MoveTo { at, color } => self.move_to(at, color),
            StrokeEvent::Join => self.line_join(),
            StrokeEvent::LineTo { to, color } => self.line_to(to, color),
            StrokeEvent::Close => self.close(),
            StrokeEvent::End => self.end(),
        }
    }

    /// Starts a new sub-path at `at`, finishing the current one with caps.
    pub fn move_to(&mut self, at: Point, color: Color) {
        self.flush_pending();
        if self.started {
            self.finish_open();
        }

        log::trace!("stroke: move_to {:?}", at);

        self.open = true;
        self.started = false;
        self.join_requested = false;
        self.start = at;
        self.start_color = color;
        self.previous = at;
        self.current = at;
        self.current_color = color;
        self.out.reverse.clear();
    }

    /// Requests the configured join between the previous segment and the next
    /// one.
    ///
    /// Without it the segments are joined with a round join that is only
    /// drawn for noticeable turns, which suits flattened curves.
    pub fn line_join(&mut self) {
        self.join_requested = true;
    }

    /// Adds a segment from the current position to `to`.
    ///
    /// Segments of length zero are skipped.
    pub fn line_to(&mut self, to: Point, color: Color) {
        debug_assert!(self.open, "line_to must follow move_to");
        if !self.open {
            let (at, at_color) = (self.current, self.current_color);
            self.move_to(at, at_color);
        }

        if self.pending.is_some() {
            if to == self.start {
                return;
            }
            self.flush_pending();
        } else {
            if to == self.current {
                return;
            }

            if to == self.start {
                // Maybe the closing segment, see `close`.
                self.pending = Some(PendingLine {
                    color,
                    join: mem::take(&mut self.join_requested),
                });
                return;
            }
        }

        let join = mem::take(&mut self.join_requested);
        self.segment_to(to, color, join);
    }

    /// Closes the current sub-path with a segment back to its start.
    ///
    /// The next segment starts from the sub-path's start.
    pub fn close(&mut self) {
        let pending = self.pending.take();
        let join = pending.map_or(false, |p| p.join) | mem::take(&mut self.join_requested);

        if self.started {
            self.close_outline(join);
            log::trace!("stroke: close");
        }

        self.started = false;
        self.previous = self.start;
        self.current = self.start;
        self.current_color = self.start_color;
        self.out.reverse.clear();
    }

    /// Ends the path, finishing the current sub-path with caps.
    pub fn end(&mut self) {
        self.flush_pending();
        if self.started {
            self.finish_open();
        }

        self.open = false;
        self.started = false;
        self.join_requested = false;
        self.out.reverse.clear();
        self.out.end();
    }

    fn flush_pending(&mut self) {
        if let Some(pending) = self.pending.take() {
            self.segment_to(self.start, pending.color, pending.join);
        }
    }

    fn segment_to(&mut self, to: Point, color: Color, join: bool) {
        let config = self.config;
        let m = config.offset(self.current, to);

        if !self.started {
            self.out.begin(translate(self.current, m), self.current_color);
            self.second = to;
            self.start_offset = m;
            self.started = true;
        } else {
            self.join(to, m, join);
            self.out.near(translate(self.current, m), self.current_color);
        }

        self.out.near(translate(to, m), color);
        self.out.far(translate(self.current, -m), self.current_color);
        self.out.far(translate(to, -m), color);

        self.previous = self.current;
        self.current = to;
        self.current_color = color;
        self.previous_offset = m;
    }

    /// Joins the last segment with the one going to `to`, whose offset is `m`.
    ///
    /// The join is drawn on the outer side of the turn and the inner side goes
    /// through the current position.
    fn join(&mut self, to: Point, m: Vector, join: bool) {
        let config = self.config;
        let (p0, p1) = (self.previous, self.current);
        let om = self.previous_offset;
        let color = self.current_color;
        let far = is_ccw(p0, p1, to);

        if join {
            configured_join(config, &mut self.out, p0, p1, to, om, m, color, far);
        } else {
            round_join(
                config,
                &mut self.out,
                p1,
                om,
                m,
                Wedge::Join,
                color,
                far,
                INTERIOR_JOIN_THRESHOLD,
            );
        }

        self.out.add(p1, color, !far);
    }

    fn close_outline(&mut self, join: bool) {
        let config = self.config;
        let (start, second) = (self.start, self.second);
        let start_color = self.start_color;
        let m0 = self.start_offset;

        let last = self.current;
        let m = config.offset(last, start);

        self.join(start, m, join);
        self.out.near(translate(last, m), self.current_color);
        self.out.near(translate(start, m), start_color);

        // The join at the start is on the near side if the last turn goes
        // clockwise, otherwise it is drawn while crossing to the far side.
        let ccw = is_ccw(last, start, second);
        if !ccw {
            configured_join(config, &mut self.out, last, start, second, m, m0, start_color, false);
        }

        self.out.near(translate(start, m0), start_color);
        self.out.near(translate(start, -m0), start_color);

        if ccw {
            configured_join(config, &mut self.out, second, start, last, -m0, -m, start_color, false);
        }

        self.out.near(translate(start, -m), start_color);
        self.out.near(translate(last, -m), self.current_color);
        self.out.walk_back();
        self.out.close();
    }

    /// Adds the caps at both ends of the current sub-path and closes its
    /// outline.
    fn finish_open(&mut self) {
        let config = self.config;

        cap(
            config,
            &mut self.out,
            self.current,
            self.previous,
            self.previous_offset,
            self.current_color,
        );

        self.out.walk_back();

        cap(
            config,
            &mut self.out,
            self.start,
            self.second,
            -self.start_offset,
            self.start_color,
        );

        self.out.close();
        self.started = false;

        log::trace!("stroke: finished sub-path at {:?}", self.current);
    }
}
