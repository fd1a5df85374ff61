// ─────────────────────────────────────────────────────────────────────
// SCPN Fusion Core — Miller State
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use crate::constants::{DEFAULT_POINTS, MIN_POINTS};
use crate::error::{MillerError, MillerResult};
use ndarray::Array1;
use std::f64::consts::PI;

/// Poloidal angle samples on the closed interval [0, 2π].
/// Matches numpy: theta = linspace(0, 2*pi, n), endpoint included, so the
/// first and last samples describe the same point on the surface.
#[derive(Debug, Clone, PartialEq)]
pub struct AngularGrid {
    theta: Array1<f64>,
}

impl AngularGrid {
    pub fn closed(n_points: usize) -> MillerResult<Self> {
        if n_points < MIN_POINTS {
            return Err(MillerError::parameter(
                "points",
                n_points,
                format!("need at least {MIN_POINTS} angular samples"),
            ));
        }
        Ok(AngularGrid {
            theta: Array1::linspace(0.0, 2.0 * PI, n_points),
        })
    }

    pub fn theta(&self) -> &Array1<f64> {
        &self.theta
    }

    pub fn len(&self) -> usize {
        self.theta.len()
    }

    pub fn is_empty(&self) -> bool {
        self.theta.is_empty()
    }

    /// Uniform spacing between consecutive samples.
    pub fn spacing(&self) -> f64 {
        2.0 * PI / (self.theta.len() - 1) as f64
    }
}

impl Default for AngularGrid {
    fn default() -> Self {
        AngularGrid {
            theta: Array1::linspace(0.0, 2.0 * PI, DEFAULT_POINTS),
        }
    }
}

/// Flux-surface boundary (R, Z) sampled at each θ of an [`AngularGrid`].
#[derive(Debug, Clone, PartialEq)]
pub struct FluxSurfaceCoordinates {
    pub theta: Array1<f64>, // poloidal angle [rad]
    pub r: Array1<f64>,     // major-radius coordinate [m]
    pub z: Array1<f64>,     // vertical coordinate [m]
}

impl FluxSurfaceCoordinates {
    /// Assemble from parallel arrays; all three must have the same length.
    pub fn new(theta: Array1<f64>, r: Array1<f64>, z: Array1<f64>) -> MillerResult<Self> {
        let n = theta.len();
        for len in [r.len(), z.len()] {
            if len != n {
                return Err(MillerError::Shape {
                    expected: n,
                    got: len,
                });
            }
        }
        Ok(FluxSurfaceCoordinates { theta, r, z })
    }

    pub fn len(&self) -> usize {
        self.theta.len()
    }

    pub fn is_empty(&self) -> bool {
        self.theta.is_empty()
    }

    /// (R, Z) pairs in θ order.
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.r.iter().copied().zip(self.z.iter().copied())
    }

    /// First and last points coincide within `tol`.
    pub fn is_closed(&self, tol: f64) -> bool {
        let n = self.len();
        if n < 2 {
            return false;
        }
        (self.r[0] - self.r[n - 1]).abs() <= tol && (self.z[0] - self.z[n - 1]).abs() <= tol
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_grid_is_closed_linspace() {
        let grid = AngularGrid::default();
        assert_eq!(grid.len(), 50);
        assert_eq!(grid.theta()[0], 0.0);
        assert!((grid.theta()[49] - 2.0 * PI).abs() < 1e-12);
        assert!((grid.spacing() - 2.0 * PI / 49.0).abs() < 1e-15);
    }

    #[test]
    fn test_too_few_points() {
        assert!(AngularGrid::closed(1).is_err());
        assert!(AngularGrid::closed(0).is_err());
        assert_eq!(AngularGrid::closed(2).unwrap().len(), 2);
    }

    #[test]
    fn test_coordinates_length_mismatch() {
        let theta = Array1::linspace(0.0, 1.0, 4);
        let err = FluxSurfaceCoordinates::new(theta, Array1::zeros(4), Array1::zeros(3))
            .unwrap_err();
        assert!(matches!(err, MillerError::Shape { expected: 4, got: 3 }));
    }

    #[test]
    fn test_closure_check() {
        let theta = Array1::linspace(0.0, 2.0 * PI, 5);
        let r = theta.mapv(|t| 3.0 + t.cos());
        let z = theta.mapv(f64::sin);
        let coords = FluxSurfaceCoordinates::new(theta, r, z).unwrap();
        assert!(coords.is_closed(1e-12));
        assert_eq!(coords.points().count(), 5);
    }
}
