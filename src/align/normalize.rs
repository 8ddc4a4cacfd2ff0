use crate::error::AlignError;
use crate::geometry::Curve;
use crate::math::{Point3, Vector3, TOLERANCE};

/// Returns the centroid (arithmetic mean) of the curve's points.
#[must_use]
pub fn centroid(curve: &Curve) -> Point3 {
    let sum: Vector3 = curve.points().iter().map(|p| p.coords).sum();
    #[allow(clippy::cast_precision_loss)]
    let n = curve.point_count() as f64;
    Point3::from(sum / n)
}

/// Translates the curve so that its centroid lies at the origin.
#[must_use]
pub fn translate(curve: &Curve) -> Curve {
    let center = centroid(curve).coords;
    curve.map_points(|p| p - center)
}

/// Returns the root-mean-square distance of the curve's points from the
/// origin: `sqrt(Σ|p|² / n)`.
#[must_use]
pub fn rmsd(curve: &Curve) -> f64 {
    let sum_sq: f64 = curve.points().iter().map(|p| p.coords.norm_squared()).sum();
    #[allow(clippy::cast_precision_loss)]
    let n = curve.point_count() as f64;
    (sum_sq / n).sqrt()
}

/// Scales the curve so that its RMS distance from the origin is 1.
///
/// # Errors
///
/// Returns [`AlignError::DegenerateCurve`] if the RMS distance is zero,
/// i.e. every point coincides with the origin.
pub fn scale(curve: &Curve) -> Result<Curve, AlignError> {
    let factor = rmsd(curve);
    if factor < TOLERANCE {
        return Err(AlignError::DegenerateCurve);
    }
    Ok(curve.map_points(|p| Point3::from(p.coords / factor)))
}
