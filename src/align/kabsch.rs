use nalgebra::Vector3;

use crate::error::AlignError;
use crate::geometry::Curve;
use crate::math::{Matrix3, Point3};

/// Computes the optimal rotation matrix superimposing `curve` onto
/// `reference` (Kabsch algorithm).
///
/// The cross-covariance matrix `H = Σ cᵢ·rᵢᵗ` (curve first, so that the
/// result acts on column vectors of the curve) is decomposed as
/// `H = U·S·Vᵗ`; the rotation is `R = V·diag(1, 1, d)·Uᵗ` with
/// `d = sign(det(V·Uᵗ))`, which corrects a reflection into a proper
/// rotation. A determinant of exactly zero keeps `d = 1`.
///
/// # Errors
///
/// Returns [`AlignError::PointCountMismatch`] if the curves have different
/// point counts, or [`AlignError::SvdFailed`] if the decomposition does not
/// produce both factors.
pub fn rotation_matrix(reference: &Curve, curve: &Curve) -> Result<Matrix3, AlignError> {
    if reference.point_count() != curve.point_count() {
        return Err(AlignError::PointCountMismatch {
            reference: reference.point_count(),
            curve: curve.point_count(),
        });
    }

    let mut covariance = Matrix3::zeros();
    for (r, c) in reference.points().iter().zip(curve.points()) {
        covariance += c.coords * r.coords.transpose();
    }

    let svd = covariance.svd(true, true);
    let u = svd.u.ok_or(AlignError::SvdFailed)?;
    let v_t = svd.v_t.ok_or(AlignError::SvdFailed)?;
    let v = v_t.transpose();

    let d = if (v * u.transpose()).determinant() < 0.0 {
        -1.0
    } else {
        1.0
    };
    let correction = Matrix3::from_diagonal(&Vector3::new(1.0, 1.0, d));
    Ok(v * correction * u.transpose())
}

/// Rotates `curve` onto `reference` with the optimal Kabsch rotation.
///
/// # Errors
///
/// Propagates the errors of [`rotation_matrix`].
pub fn rotate(reference: &Curve, curve: &Curve) -> Result<Curve, AlignError> {
    let rotation = rotation_matrix(reference, curve)?;
    Ok(curve.map_points(|p| Point3::from(rotation * p.coords)))
}
