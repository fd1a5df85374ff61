// ─────────────────────────────────────────────────────────────────────
// SCPN Fusion Core — Property-Based Tests (proptest) for miller-core
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Property-based tests for miller-core using proptest.
//!
//! Covers: outboard midplane point, up-down antisymmetry of Z, purity,
//! closure of the curve, finiteness, and bounds on R.

use miller_core::geometry::{flux_surface, surface_point};
use miller_types::params::ShapingParameters;
use miller_types::state::AngularGrid;
use proptest::prelude::*;
use std::f64::consts::PI;

fn shaping() -> impl Strategy<Value = ShapingParameters> {
    (1.05f64..10.0, 0.5f64..3.0, -1.0f64..=1.0, 0.3f64..12.0).prop_map(|(a, kappa, delta, r0)| {
        ShapingParameters {
            aspect_ratio: a,
            kappa,
            delta,
            r0,
        }
    })
}

proptest! {
    /// Z(0) = 0 and R(0) = R0 + R0/A.
    #[test]
    fn outboard_midplane(p in shaping(), n in 2usize..200) {
        let coords = flux_surface(&p, &AngularGrid::closed(n).unwrap()).unwrap();
        prop_assert!(coords.z[0].abs() < 1e-12);
        prop_assert!((coords.r[0] - (p.r0 + p.r0 / p.aspect_ratio)).abs() < 1e-12);
    }

    /// Z(θ) = -Z(-θ mod 2π).
    #[test]
    fn z_antisymmetric(p in shaping(), theta in 0.0f64..(2.0 * PI)) {
        let (_, z_pos) = surface_point(&p, theta).unwrap();
        let (_, z_neg) = surface_point(&p, (2.0 * PI - theta) % (2.0 * PI)).unwrap();
        let scale = p.kappa * p.minor_radius();
        prop_assert!((z_pos + z_neg).abs() < 1e-9 * scale.max(1.0),
            "Z({}) = {}, Z(-θ) = {}", theta, z_pos, z_neg);
    }

    /// Same input twice gives bit-identical output.
    #[test]
    fn flux_surface_is_pure(p in shaping(), n in 2usize..300) {
        let grid = AngularGrid::closed(n).unwrap();
        let first = flux_surface(&p, &grid).unwrap();
        let second = flux_surface(&p, &grid).unwrap();
        prop_assert_eq!(first, second);
    }

    /// Closed grid gives a closed curve with finite samples inside the
    /// radial band [R0 - r, R0 + r].
    #[test]
    fn closed_finite_and_bounded(p in shaping(), n in 2usize..300) {
        let coords = flux_surface(&p, &AngularGrid::closed(n).unwrap()).unwrap();
        let r_minor = p.minor_radius();
        prop_assert!(coords.is_closed(1e-9 * p.r0.max(1.0)));
        for (r, z) in coords.points() {
            prop_assert!(r.is_finite() && z.is_finite());
            prop_assert!(r <= p.r0 + r_minor + 1e-12);
            prop_assert!(r >= p.r0 - r_minor - 1e-12);
            prop_assert!(z.abs() <= p.kappa * r_minor + 1e-12);
        }
    }

    /// |δ| > 1 never yields coordinates.
    #[test]
    fn invalid_delta_rejected(p in shaping(), excess in 1e-6f64..5.0) {
        let bad = ShapingParameters { delta: p.delta.signum() * (1.0 + excess), ..p };
        prop_assert!(flux_surface(&bad, &AngularGrid::default()).is_err());
    }
}
