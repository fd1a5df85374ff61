// ─────────────────────────────────────────────────────────────────────
// SCPN Fusion Core — Miller CLI
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Argument surface and run orchestration behind the `miller` binary.

pub mod cli;
pub mod dispatch;
