// ─────────────────────────────────────────────────────────────────────
// SCPN Fusion Core — Miller Geometry
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Miller parametrization of a single flux-surface cross-section.
//!
//! With minor radius r = R0 / A:
//!
//! ```text
//! R(θ) = R0 + r·cos(θ + arcsin(δ)·sin θ)
//! Z(θ) = κ·r·sin θ
//! ```

use miller_types::error::MillerResult;
use miller_types::params::ShapingParameters;
use miller_types::state::{AngularGrid, FluxSurfaceCoordinates};

/// Boundary point at a single poloidal angle.
///
/// Validates the parameters first (arcsin domain of δ, A ≠ 0, finite
/// derived extents), so the returned point is always finite.
pub fn surface_point(params: &ShapingParameters, theta: f64) -> MillerResult<(f64, f64)> {
    params.validate()?;
    Ok(evaluate(params, params.delta.asin(), theta))
}

/// Flux-surface coordinates over the whole angular grid.
///
/// Pure: identical inputs always give identical outputs.
pub fn flux_surface(
    params: &ShapingParameters,
    grid: &AngularGrid,
) -> MillerResult<FluxSurfaceCoordinates> {
    params.validate()?;
    let x = params.delta.asin();

    let theta = grid.theta().clone();
    let r = theta.mapv(|t| evaluate(params, x, t).0);
    let z = theta.mapv(|t| evaluate(params, x, t).1);

    FluxSurfaceCoordinates::new(theta, r, z)
}

#[inline]
fn evaluate(params: &ShapingParameters, asin_delta: f64, theta: f64) -> (f64, f64) {
    let r_minor = params.minor_radius();
    let r = params.r0 + r_minor * (theta + asin_delta * theta.sin()).cos();
    let z = params.kappa * r_minor * theta.sin();
    (r, z)
}

/// Shape measured back from a sampled boundary.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceSummary {
    pub r_min: f64,
    pub r_max: f64,
    pub z_min: f64,
    pub z_max: f64,
    /// Poloidal cross-section area (m²)
    pub area: f64,
    /// (Z_max - Z_min) / (R_max - R_min)
    pub elongation: f64,
    /// (R_geo - R at Z_max) / a
    pub triangularity: f64,
}

/// `(r_min, r_max, z_min, z_max)`, or `None` for an empty curve.
pub fn bounding_box(coords: &FluxSurfaceCoordinates) -> Option<(f64, f64, f64, f64)> {
    if coords.is_empty() {
        return None;
    }
    Some(coords.points().fold(
        (
            f64::INFINITY,
            f64::NEG_INFINITY,
            f64::INFINITY,
            f64::NEG_INFINITY,
        ),
        |(r_lo, r_hi, z_lo, z_hi), (r, z)| (r_lo.min(r), r_hi.max(r), z_lo.min(z), z_hi.max(z)),
    ))
}

/// Bounding box, enclosed area and measured κ, δ of a sampled boundary.
/// Returns `None` for fewer than three points or a degenerate R extent.
pub fn summarize(coords: &FluxSurfaceCoordinates) -> Option<SurfaceSummary> {
    if coords.len() < 3 {
        return None;
    }
    let (r_min, r_max, z_min, z_max) = bounding_box(coords)?;
    // R at the first sample reaching the top of the box
    let r_top = coords
        .points()
        .find(|&(_, z)| z == z_max)
        .map_or(coords.r[0], |(r, _)| r);

    let width = r_max - r_min;
    if width <= 0.0 {
        return None;
    }
    let a = 0.5 * width;
    let r_geo = 0.5 * (r_max + r_min);

    Some(SurfaceSummary {
        r_min,
        r_max,
        z_min,
        z_max,
        area: enclosed_area(coords),
        elongation: (z_max - z_min) / width,
        triangularity: (r_geo - r_top) / a,
    })
}

/// Shoelace area of the polygon through the samples (closed implicitly).
pub fn enclosed_area(coords: &FluxSurfaceCoordinates) -> f64 {
    let n = coords.len();
    if n < 3 {
        return 0.0;
    }
    let mut twice_area = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        twice_area += coords.r[i] * coords.z[j] - coords.r[j] * coords.z[i];
    }
    0.5 * twice_area.abs()
}

/// Log the derived shape at info level.
pub fn log_summary(params: &ShapingParameters, coords: &FluxSurfaceCoordinates) {
    match summarize(coords) {
        Some(s) => log::info!(
            "Flux surface: {} points, R in [{:.3}, {:.3}] m, Z in [{:.3}, {:.3}] m, \
             area {:.3} m², measured kappa {:.3}, delta {:.3}",
            coords.len(),
            s.r_min,
            s.r_max,
            s.z_min,
            s.z_max,
            s.area,
            s.elongation,
            s.triangularity
        ),
        None => log::warn!("Degenerate flux surface for {params} ({} points)", coords.len()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use miller_types::error::MillerError;
    use std::f64::consts::PI;

    #[test]
    fn test_outboard_midplane() {
        let p = ShapingParameters::default();
        let coords = flux_surface(&p, &AngularGrid::default()).unwrap();
        assert_eq!(coords.len(), 50);
        assert!(coords.z[0].abs() < 1e-15);
        assert!((coords.r[0] - (p.r0 + p.r0 / p.aspect_ratio)).abs() < 1e-12);
    }

    #[test]
    fn test_default_curve_closes() {
        let coords = flux_surface(&ShapingParameters::default(), &AngularGrid::default()).unwrap();
        assert!(coords.is_closed(1e-12));
    }

    #[test]
    fn test_matches_reference_values() {
        // R0=2.5, A=2.2, κ=1.5, δ=0.3 at θ=π/2:
        // R = R0 + r·cos(π/2 + asin 0.3) = R0 - r·0.3, Z = κ·r
        let p = ShapingParameters::default();
        let r = p.minor_radius();
        let (rr, zz) = surface_point(&p, PI / 2.0).unwrap();
        assert!((rr - (2.5 - 0.3 * r)).abs() < 1e-12);
        assert!((zz - 1.5 * r).abs() < 1e-12);
    }

    #[test]
    fn test_invalid_triangularity_is_error_not_nan() {
        let p = ShapingParameters {
            delta: 1.5,
            ..Default::default()
        };
        let err = flux_surface(&p, &AngularGrid::default()).unwrap_err();
        assert!(matches!(err, MillerError::Parameter { ref field, .. } if field == "delta"));
        assert!(surface_point(&p, 0.3).is_err());
    }

    #[test]
    fn test_zero_aspect_ratio_is_error() {
        let p = ShapingParameters {
            aspect_ratio: 0.0,
            ..Default::default()
        };
        let err = flux_surface(&p, &AngularGrid::default()).unwrap_err();
        assert!(matches!(err, MillerError::Parameter { ref field, .. } if field == "A"));
    }

    #[test]
    fn test_overflowing_minor_radius_is_error() {
        let p = ShapingParameters {
            aspect_ratio: 1e-320,
            ..Default::default()
        };
        let err = flux_surface(&p, &AngularGrid::default()).unwrap_err();
        assert!(matches!(err, MillerError::Parameter { ref field, .. } if field == "A"));
        assert!(surface_point(&p, 0.0).is_err());
    }

    #[test]
    fn test_tiny_aspect_ratio_stays_finite() {
        let p = ShapingParameters::new(1e-6, 1.5, 0.3, 2.5).unwrap();
        let coords = flux_surface(&p, &AngularGrid::default()).unwrap();
        assert!(coords.points().all(|(r, z)| r.is_finite() && z.is_finite()));
    }

    #[test]
    fn test_circle_limit() {
        // κ=1, δ=0: circle of radius r about (R0, 0)
        let p = ShapingParameters::new(3.0, 1.0, 0.0, 6.0).unwrap();
        let coords = flux_surface(&p, &AngularGrid::closed(2001).unwrap()).unwrap();
        for (r, z) in coords.points() {
            let rho = ((r - 6.0).powi(2) + z * z).sqrt();
            assert!((rho - 2.0).abs() < 1e-12);
        }
        let s = summarize(&coords).unwrap();
        assert!((s.area - PI * 4.0).abs() < 1e-3, "area {}", s.area);
        assert!((s.elongation - 1.0).abs() < 1e-6);
        assert!(s.triangularity.abs() < 1e-3);
    }

    #[test]
    fn test_summary_recovers_shape() {
        let p = ShapingParameters::new(3.0, 1.7, 0.4, 6.2).unwrap();
        let coords = flux_surface(&p, &AngularGrid::closed(4001).unwrap()).unwrap();
        let s = summarize(&coords).unwrap();
        let r = p.minor_radius();
        assert!((s.r_max - (p.r0 + r)).abs() < 1e-9);
        assert!((s.z_max - p.kappa * r).abs() < 1e-6);
        assert!((s.elongation - p.kappa).abs() < 1e-3);
        assert!((s.triangularity - p.delta).abs() < 1e-2);
    }

    #[test]
    fn test_bounding_box_default() {
        let p = ShapingParameters::default();
        let coords = flux_surface(&p, &AngularGrid::default()).unwrap();
        let (r_lo, r_hi, z_lo, z_hi) = bounding_box(&coords).unwrap();
        let r = p.minor_radius();
        assert!((r_hi - (p.r0 + r)).abs() < 1e-12);
        assert!(r_lo >= p.r0 - r - 1e-12);
        assert!(z_hi <= p.kappa * r + 1e-12);
        assert!((z_lo + z_hi).abs() < 1e-9);
    }

    #[test]
    fn test_summary_degenerate() {
        let p = ShapingParameters::default();
        let coords = flux_surface(&p, &AngularGrid::closed(2).unwrap()).unwrap();
        assert!(summarize(&coords).is_none());
        assert_eq!(enclosed_area(&coords), 0.0);
    }
}
