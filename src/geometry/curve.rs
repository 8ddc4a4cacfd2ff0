use crate::error::CurveError;
use crate::math::Point3;

/// Cumulative arclength span of one polyline edge.
///
/// For edge `i` (from point `i` to point `i + 1`), `start` is the arclength
/// at point `i` and `end` the arclength at point `i + 1`. Spans are
/// contiguous: `spans[i].end == spans[i + 1].start`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcSpan {
    /// Arclength at the edge's start point.
    pub start: f64,
    /// Arclength at the edge's end point.
    pub end: f64,
}

/// An ordered 3D polyline parameterized by arclength.
///
/// A `Curve` is immutable once constructed; every transformation
/// (resampling, translation, rotation, ...) produces a new `Curve`.
#[derive(Debug, Clone)]
pub struct Curve {
    points: Vec<Point3>,
    spans: Vec<ArcSpan>,
    arc_length: f64,
}

impl Curve {
    /// Creates a curve from an ordered list of points.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::InvalidPointCount`] if fewer than 2 points
    /// are given.
    pub fn new(points: Vec<Point3>) -> Result<Self, CurveError> {
        if points.len() < 2 {
            return Err(CurveError::InvalidPointCount {
                count: points.len(),
            });
        }

        let mut spans = Vec::with_capacity(points.len() - 1);
        let mut cumulative = 0.0;
        for pair in points.windows(2) {
            let start = cumulative;
            cumulative += (pair[1] - pair[0]).norm();
            spans.push(ArcSpan {
                start,
                end: cumulative,
            });
        }

        Ok(Self {
            points,
            spans,
            arc_length: cumulative,
        })
    }

    /// Creates a curve from a flat `x, y, z, x, y, z, ...` coordinate array,
    /// the shape produced by curve-file loaders.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::DimensionMismatch`] if the array length is not
    /// a multiple of 3, or [`CurveError::InvalidPointCount`] if it holds
    /// fewer than 2 points.
    pub fn from_flat(coords: &[f64]) -> Result<Self, CurveError> {
        if coords.len() % 3 != 0 {
            return Err(CurveError::DimensionMismatch { len: coords.len() });
        }
        let points = coords
            .chunks_exact(3)
            .map(|c| Point3::new(c[0], c[1], c[2]))
            .collect();
        Self::new(points)
    }

    /// Returns the point at arclength `t` along the curve, linearly
    /// interpolated between the two enclosing polyline vertices.
    ///
    /// Endpoints short-circuit: `t == 0` yields the first point and
    /// `t == arc_length` the last. Interior values are located with a
    /// binary search over the cumulative spans; a value exactly on a span
    /// boundary belongs to the span that starts there.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::ArcLengthOutOfRange`] if `t` is outside
    /// `[0, arc_length]`.
    #[allow(clippy::float_cmp)]
    pub fn value_at_arc_length(&self, t: f64) -> Result<Point3, CurveError> {
        if t == 0.0 {
            return Ok(self.points[0]);
        }
        if t == self.arc_length {
            return Ok(self.points[self.points.len() - 1]);
        }
        if !(0.0..=self.arc_length).contains(&t) {
            return Err(CurveError::ArcLengthOutOfRange {
                value: t,
                max: self.arc_length,
            });
        }

        // First span whose end lies beyond t; zero-length spans are skipped
        // because their end is never beyond t.
        let i = self.spans.partition_point(|s| s.end <= t);
        let span = self.spans[i];
        let fraction = (t - span.start) / (span.end - span.start);
        let a = self.points[i];
        let b = self.points[i + 1];
        Ok(a + (b - a) * fraction)
    }

    /// Resamples the curve to exactly `count` points at evenly spaced
    /// arclengths spanning `[0, arc_length]` inclusive.
    ///
    /// Downsampling discards shape detail, so it must be opted into with
    /// `allow_lossy`.
    ///
    /// # Errors
    ///
    /// Returns [`CurveError::LossyResampleRejected`] if `count` is smaller
    /// than the current point count and `allow_lossy` is false, or
    /// [`CurveError::InvalidPointCount`] if `count < 2`.
    pub fn resample(&self, count: usize, allow_lossy: bool) -> Result<Self, CurveError> {
        if count < self.points.len() && !allow_lossy {
            return Err(CurveError::LossyResampleRejected {
                requested: count,
                current: self.points.len(),
            });
        }
        if count < 2 {
            return Err(CurveError::InvalidPointCount { count });
        }

        let mut points = Vec::with_capacity(count);
        for i in 0..count {
            #[allow(clippy::cast_precision_loss)]
            let fraction = i as f64 / (count - 1) as f64;
            points.push(self.value_at_arc_length(self.arc_length * fraction)?);
        }
        Self::new(points)
    }

    /// Applies `f` to every point, producing a new curve with recomputed
    /// arclength spans.
    #[must_use]
    pub fn map_points<F>(&self, f: F) -> Self
    where
        F: Fn(&Point3) -> Point3,
    {
        let points: Vec<Point3> = self.points.iter().map(f).collect();
        let mut spans = Vec::with_capacity(points.len() - 1);
        let mut cumulative = 0.0;
        for pair in points.windows(2) {
            let start = cumulative;
            cumulative += (pair[1] - pair[0]).norm();
            spans.push(ArcSpan {
                start,
                end: cumulative,
            });
        }
        Self {
            points,
            spans,
            arc_length: cumulative,
        }
    }

    /// Returns the curve's points in order.
    #[must_use]
    pub fn points(&self) -> &[Point3] {
        &self.points
    }

    /// Returns the number of points in the curve (always ≥ 2).
    #[must_use]
    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    /// Returns the per-edge cumulative arclength spans.
    #[must_use]
    pub fn spans(&self) -> &[ArcSpan] {
        &self.spans
    }

    /// Returns the total arclength of the curve.
    #[must_use]
    pub fn arc_length(&self) -> f64 {
        self.arc_length
    }
}
