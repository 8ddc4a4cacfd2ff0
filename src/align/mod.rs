pub mod kabsch;
pub mod normalize;

pub use kabsch::{rotate, rotation_matrix};
pub use normalize::{centroid, rmsd, scale, translate};

use crate::error::Result;
use crate::geometry::Curve;

/// Superimposes `curve` onto `reference` (partial ordinary Procrustes
/// analysis), returning both in a common normalized frame.
///
/// When the point counts differ, the curve with fewer points is resampled
/// up to the larger count via arclength interpolation; detail is never
/// discarded by downsampling. Both curves are then translated to the
/// origin, scaled to unit RMS distance, and the sample is rotated onto the
/// reference with the Kabsch rotation.
///
/// # Errors
///
/// Returns an error if either curve is degenerate (zero RMS distance) or
/// if resampling or the rotation fails.
pub fn superpose(reference: &Curve, curve: &Curve) -> Result<(Curve, Curve)> {
    let count = reference.point_count().max(curve.point_count());
    let reference = if reference.point_count() < count {
        reference.resample(count, false)?
    } else {
        reference.clone()
    };
    let curve = if curve.point_count() < count {
        curve.resample(count, false)?
    } else {
        curve.clone()
    };

    let reference = scale(&translate(&reference))?;
    let curve = scale(&translate(&curve))?;
    let curve = rotate(&reference, &curve)?;
    Ok((reference, curve))
}
