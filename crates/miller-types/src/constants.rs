// ─────────────────────────────────────────────────────────────────────
// SCPN Fusion Core — Miller Constants
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
/// Default aspect ratio A = R0 / r.
pub const DEFAULT_ASPECT_RATIO: f64 = 2.2;

/// Default elongation κ.
pub const DEFAULT_ELONGATION: f64 = 1.5;

/// Default triangularity δ.
pub const DEFAULT_TRIANGULARITY: f64 = 0.3;

/// Default major radius R0 (m).
pub const DEFAULT_MAJOR_RADIUS: f64 = 2.5;

/// Default number of poloidal angle samples on [0, 2π].
pub const DEFAULT_POINTS: usize = 50;

/// Fewest samples that still describe a curve.
pub const MIN_POINTS: usize = 2;

/// Image written when no `--filename` is given.
pub const DEFAULT_IMAGE_PATH: &str = "miller.png";

/// Table in the configuration file holding the shaping parameters.
pub const CONFIG_SECTION: &str = "miller";
