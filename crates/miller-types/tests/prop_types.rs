// ─────────────────────────────────────────────────────────────────────
// SCPN Fusion Core — Property-Based Tests (proptest) for miller-types
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Property-based tests for miller-types using proptest.
//!
//! Covers: AngularGrid construction, override precedence, delta domain check.

use miller_types::config::resolve;
use miller_types::params::{Field, ParameterOverrides, ShapingParameters};
use miller_types::state::AngularGrid;
use proptest::prelude::*;
use std::f64::consts::PI;

// ── AngularGrid Invariants ───────────────────────────────────────────

proptest! {
    /// Grid spans [0, 2π] inclusive with the requested number of samples.
    #[test]
    fn grid_spans_full_turn(n in 2usize..512) {
        let grid = AngularGrid::closed(n).unwrap();
        prop_assert_eq!(grid.len(), n);
        prop_assert_eq!(grid.theta()[0], 0.0);
        prop_assert!((grid.theta()[n - 1] - 2.0 * PI).abs() < 1e-12);
    }

    /// Samples are strictly increasing and uniformly spaced.
    #[test]
    fn grid_uniform_spacing(n in 3usize..256) {
        let grid = AngularGrid::closed(n).unwrap();
        let theta = grid.theta();
        for i in 1..n {
            let step = theta[i] - theta[i - 1];
            prop_assert!(step > 0.0);
            prop_assert!((step - grid.spacing()).abs() < 1e-12,
                "Non-uniform spacing at {}: step={}, spacing={}", i, step, grid.spacing());
        }
    }
}

// ── Resolution Precedence ────────────────────────────────────────────

proptest! {
    /// Flag overrides replace exactly the fields they name.
    #[test]
    fn overrides_win_field_by_field(
        kappa in proptest::option::of(0.5f64..4.0),
        delta in proptest::option::of(-1.0f64..=1.0),
        r0 in proptest::option::of(0.5f64..10.0),
    ) {
        let defaults = ShapingParameters::default();
        let cli = ParameterOverrides { aspect_ratio: None, kappa, delta, r0 };
        let p = resolve(&defaults, None, &cli).unwrap();

        prop_assert_eq!(p.aspect_ratio, defaults.aspect_ratio);
        prop_assert_eq!(p.kappa, kappa.unwrap_or(defaults.kappa));
        prop_assert_eq!(p.delta, delta.unwrap_or(defaults.delta));
        prop_assert_eq!(p.r0, r0.unwrap_or(defaults.r0));
    }

    /// Any |delta| > 1 is rejected as a parameter error on delta.
    #[test]
    fn delta_outside_unit_interval_rejected(mag in 1.0001f64..100.0, negative in any::<bool>()) {
        let delta = if negative { -mag } else { mag };
        let err = Field::Triangularity.validate(delta).unwrap_err();
        prop_assert!(err.to_string().contains("delta"));
    }
}
