// ─────────────────────────────────────────────────────────────────────
// SCPN Fusion Core — Miller Surface Plot
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Raster plot of a flux-surface boundary in the poloidal (R, Z) plane.
//!
//! Axes share one metres-to-pixel scale, so circles stay circles.

use crate::atomic::write_atomically;
use crate::glyphs::{glyph, lit, text_width, GLYPH_HEIGHT, GLYPH_SPACING, GLYPH_WIDTH};
use image::{ImageFormat, Rgb, RgbImage};
use miller_types::error::{MillerError, MillerResult};
use ndarray::Array1;
use std::path::Path;

const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
const BLACK: Rgb<u8> = Rgb([0, 0, 0]);
const CURVE_BLUE: Rgb<u8> = Rgb([31, 119, 180]);

/// Fraction of the data extent added on every side.
const DATA_PADDING: f64 = 0.05;
/// Preferred number of major ticks per axis.
const TARGET_TICKS: f64 = 6.0;
const TICK_LENGTH: u32 = 6;

pub const R_AXIS_LABEL: &str = "R [m]";
pub const Z_AXIS_LABEL: &str = "Z [m]";

/// Canvas geometry and colours.
#[derive(Debug, Clone)]
pub struct PlotStyle {
    pub width: u32,
    pub height: u32,
    pub margin_left: u32,
    pub margin_right: u32,
    pub margin_top: u32,
    pub margin_bottom: u32,
    pub line_width: u32,
    pub line_color: Rgb<u8>,
    /// Integer upscaling of the 5×7 glyphs
    pub text_scale: u32,
}

impl Default for PlotStyle {
    fn default() -> Self {
        PlotStyle {
            width: 800,
            height: 600,
            margin_left: 90,
            margin_right: 30,
            margin_top: 30,
            margin_bottom: 75,
            line_width: 2,
            line_color: CURVE_BLUE,
            text_scale: 2,
        }
    }
}

/// Affine map from metres to pixel coordinates, equal in both axes.
#[derive(Debug, Clone, Copy)]
struct Viewport {
    left: f64,
    top: f64,
    r_lo: f64,
    z_hi: f64,
    scale: f64, // pixels per metre
    r_span: f64,
    z_span: f64,
}

impl Viewport {
    fn fit(r: &Array1<f64>, z: &Array1<f64>, style: &PlotStyle) -> Viewport {
        let (r_min, r_max) = min_max(r);
        let (z_min, z_max) = min_max(z);

        let r_pad = ((r_max - r_min) * DATA_PADDING).max(1e-3);
        let z_pad = ((z_max - z_min) * DATA_PADDING).max(1e-3);
        let (r_lo, r_hi) = (r_min - r_pad, r_max + r_pad);
        let (z_lo, z_hi) = (z_min - z_pad, z_max + z_pad);

        let plot_w = style.width.saturating_sub(style.margin_left + style.margin_right).max(1) as f64;
        let plot_h = style.height.saturating_sub(style.margin_top + style.margin_bottom).max(1) as f64;

        // Equal aspect: the tighter axis sets the scale, the other is widened
        // symmetrically to fill the frame.
        let scale = (plot_w / (r_hi - r_lo)).min(plot_h / (z_hi - z_lo));
        let r_span = plot_w / scale;
        let z_span = plot_h / scale;
        let r_mid = 0.5 * (r_lo + r_hi);
        let z_mid = 0.5 * (z_lo + z_hi);

        Viewport {
            left: style.margin_left as f64,
            top: style.margin_top as f64,
            r_lo: r_mid - 0.5 * r_span,
            z_hi: z_mid + 0.5 * z_span,
            scale,
            r_span,
            z_span,
        }
    }

    fn to_pixel(&self, r: f64, z: f64) -> (f64, f64) {
        (
            self.left + (r - self.r_lo) * self.scale,
            self.top + (self.z_hi - z) * self.scale,
        )
    }

    fn r_range(&self) -> (f64, f64) {
        (self.r_lo, self.r_lo + self.r_span)
    }

    fn z_range(&self) -> (f64, f64) {
        (self.z_hi - self.z_span, self.z_hi)
    }
}

fn min_max(values: &Array1<f64>) -> (f64, f64) {
    values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        })
}

/// Draw (R, Z) as a closed curve with labelled equal-aspect axes and save
/// it as a PNG at `path`, replacing any existing file.
pub fn plot_surface(r: &Array1<f64>, z: &Array1<f64>, path: &Path) -> MillerResult<()> {
    plot_surface_with(r, z, path, &PlotStyle::default())
}

pub fn plot_surface_with(
    r: &Array1<f64>,
    z: &Array1<f64>,
    path: &Path,
    style: &PlotStyle,
) -> MillerResult<()> {
    let img = render_surface(r, z, path, style)?;
    write_atomically(path, |tmp| {
        img.save_with_format(tmp, ImageFormat::Png)
            .map_err(|e| MillerError::Render {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })
    })?;
    log::info!(
        "Saved {}x{} flux-surface plot to '{}'",
        style.width,
        style.height,
        path.display()
    );
    Ok(())
}

/// Rasterize without touching the filesystem. `path` only labels errors.
pub fn render_surface(
    r: &Array1<f64>,
    z: &Array1<f64>,
    path: &Path,
    style: &PlotStyle,
) -> MillerResult<RgbImage> {
    if r.len() != z.len() {
        return Err(MillerError::Shape {
            expected: r.len(),
            got: z.len(),
        });
    }
    if r.is_empty() {
        return Err(MillerError::Render {
            path: path.to_path_buf(),
            reason: "no points to plot".into(),
        });
    }
    if r.iter().chain(z.iter()).any(|v| !v.is_finite()) {
        return Err(MillerError::Render {
            path: path.to_path_buf(),
            reason: "coordinates contain non-finite values".into(),
        });
    }

    let mut img = RgbImage::from_pixel(style.width, style.height, WHITE);
    let view = Viewport::fit(r, z, style);

    draw_frame(&mut img, style);
    draw_r_ticks(&mut img, &view, style);
    draw_z_ticks(&mut img, &view, style);
    draw_axis_labels(&mut img, style);

    let pixels: Vec<(f64, f64)> = r
        .iter()
        .zip(z.iter())
        .map(|(&ri, &zi)| view.to_pixel(ri, zi))
        .collect();
    for pair in pixels.windows(2) {
        draw_line(&mut img, pair[0], pair[1], style.line_width, style.line_color);
    }

    Ok(img)
}

fn draw_frame(img: &mut RgbImage, style: &PlotStyle) {
    let x0 = style.margin_left as f64;
    let y0 = style.margin_top as f64;
    let x1 = style.width.saturating_sub(style.margin_right) as f64;
    let y1 = style.height.saturating_sub(style.margin_bottom) as f64;
    draw_line(img, (x0, y0), (x1, y0), 1, BLACK);
    draw_line(img, (x1, y0), (x1, y1), 1, BLACK);
    draw_line(img, (x1, y1), (x0, y1), 1, BLACK);
    draw_line(img, (x0, y1), (x0, y0), 1, BLACK);
}

fn draw_r_ticks(img: &mut RgbImage, view: &Viewport, style: &PlotStyle) {
    let (lo, hi) = view.r_range();
    let step = nice_step(hi - lo);
    let y = style.height.saturating_sub(style.margin_bottom) as f64;
    for value in ticks(lo, hi, step) {
        let (x, _) = view.to_pixel(value, 0.0);
        draw_line(img, (x, y), (x, y + TICK_LENGTH as f64), 1, BLACK);
        let label = format_tick(value, step);
        let w = text_width(&label, style.text_scale) as f64;
        draw_text(
            img,
            (x - 0.5 * w).round() as i64,
            (y + TICK_LENGTH as f64 + 4.0) as i64,
            &label,
            style.text_scale,
            BLACK,
        );
    }
}

fn draw_z_ticks(img: &mut RgbImage, view: &Viewport, style: &PlotStyle) {
    let (lo, hi) = view.z_range();
    let step = nice_step(hi - lo);
    let x = style.margin_left as f64;
    let glyph_h = (GLYPH_HEIGHT * style.text_scale) as f64;
    for value in ticks(lo, hi, step) {
        let (_, y) = view.to_pixel(0.0, value);
        draw_line(img, (x - TICK_LENGTH as f64, y), (x, y), 1, BLACK);
        let label = format_tick(value, step);
        let w = text_width(&label, style.text_scale) as f64;
        draw_text(
            img,
            (x - TICK_LENGTH as f64 - 4.0 - w).round() as i64,
            (y - 0.5 * glyph_h).round() as i64,
            &label,
            style.text_scale,
            BLACK,
        );
    }
}

fn draw_axis_labels(img: &mut RgbImage, style: &PlotStyle) {
    let s = style.text_scale;
    let plot_left = style.margin_left;
    let plot_right = style.width.saturating_sub(style.margin_right);
    let plot_top = style.margin_top;
    let plot_bottom = style.height.saturating_sub(style.margin_bottom);

    // R label centred under the tick labels.
    let w = text_width(R_AXIS_LABEL, s) as i64;
    let cx = (plot_left as i64 + plot_right as i64) / 2;
    let y = style.height as i64 - (GLYPH_HEIGHT * s) as i64 - 12;
    draw_text(img, cx - w / 2, y, R_AXIS_LABEL, s, BLACK);

    // Z label rotated a quarter turn, reading bottom to top.
    let h = text_width(Z_AXIS_LABEL, s) as i64;
    let cy = (plot_top as i64 + plot_bottom as i64) / 2;
    draw_text_vertical(img, 10, cy + h / 2, Z_AXIS_LABEL, s, BLACK);
}

/// Step of 1, 2 or 5 × 10^k giving roughly `TARGET_TICKS` intervals.
fn nice_step(span: f64) -> f64 {
    if span.is_nan() || span <= 0.0 {
        return 1.0;
    }
    let raw = span / TARGET_TICKS;
    let magnitude = 10f64.powf(raw.log10().floor());
    let norm = raw / magnitude;
    let nice = if norm < 1.5 {
        1.0
    } else if norm < 3.5 {
        2.0
    } else if norm < 7.5 {
        5.0
    } else {
        10.0
    };
    nice * magnitude
}

fn ticks(lo: f64, hi: f64, step: f64) -> Vec<f64> {
    let first = (lo / step).ceil() as i64;
    let last = (hi / step).floor() as i64;
    (first..=last).map(|k| k as f64 * step).collect()
}

fn format_tick(value: f64, step: f64) -> String {
    let decimals = (-step.log10().floor()).max(0.0) as usize;
    // Avoid "-0.0" at the origin.
    let value = if value.abs() < 0.5 * step * 1e-6 { 0.0 } else { value };
    format!("{:.*}", decimals, value)
}

fn put(img: &mut RgbImage, x: i64, y: i64, color: Rgb<u8>) {
    if x >= 0 && y >= 0 && (x as u32) < img.width() && (y as u32) < img.height() {
        img.put_pixel(x as u32, y as u32, color);
    }
}

/// Bresenham line stamped with a square pen of side `width`.
fn draw_line(img: &mut RgbImage, from: (f64, f64), to: (f64, f64), width: u32, color: Rgb<u8>) {
    let (mut x0, mut y0) = (from.0.round() as i64, from.1.round() as i64);
    let (x1, y1) = (to.0.round() as i64, to.1.round() as i64);
    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;
    let w = width.max(1) as i64;
    let offset = (w - 1) / 2;

    loop {
        for ox in 0..w {
            for oy in 0..w {
                put(img, x0 + ox - offset, y0 + oy - offset, color);
            }
        }
        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}

fn draw_text(img: &mut RgbImage, x: i64, y: i64, text: &str, scale: u32, color: Rgb<u8>) {
    let advance = ((GLYPH_WIDTH + GLYPH_SPACING) * scale) as i64;
    for (i, c) in text.chars().enumerate() {
        let Some(g) = glyph(c) else { continue };
        let gx = x + i as i64 * advance;
        for row in 0..GLYPH_HEIGHT {
            for col in 0..GLYPH_WIDTH {
                if !lit(g, col, row) {
                    continue;
                }
                for sx in 0..scale {
                    for sy in 0..scale {
                        put(
                            img,
                            gx + (col * scale + sx) as i64,
                            y + (row * scale + sy) as i64,
                            color,
                        );
                    }
                }
            }
        }
    }
}

/// Text rotated 90° counter-clockwise; (`x`, `y`) is the bottom-left corner.
fn draw_text_vertical(img: &mut RgbImage, x: i64, y: i64, text: &str, scale: u32, color: Rgb<u8>) {
    let advance = ((GLYPH_WIDTH + GLYPH_SPACING) * scale) as i64;
    for (i, c) in text.chars().enumerate() {
        let Some(g) = glyph(c) else { continue };
        let gy = y - i as i64 * advance;
        for row in 0..GLYPH_HEIGHT {
            for col in 0..GLYPH_WIDTH {
                if !lit(g, col, row) {
                    continue;
                }
                for sx in 0..scale {
                    for sy in 0..scale {
                        put(
                            img,
                            x + (row * scale + sy) as i64,
                            gy - (col * scale + sx) as i64,
                            color,
                        );
                    }
                }
            }
        }
    }
}
