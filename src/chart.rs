//! Chart Rendering
//!
//! Turns the aggregated series into PNG bytes for the report page. Rendering
//! sits behind a trait so the numeric aggregation stays testable without
//! producing a single pixel. The renderer rasterizes directly onto an
//! `image` buffer: axes, horizontal gridlines, a line-with-markers series,
//! numeric y-tick labels, and 1-based x index labels (the page prints the
//! index-to-pair legend next to the chart).

use anyhow::{ensure, Result};
use image::{Rgb, RgbImage};
use std::io::Cursor;

const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);
const FRAME: Rgb<u8> = Rgb([60, 60, 60]);
const GRID: Rgb<u8> = Rgb([220, 220, 220]);
const SERIES: Rgb<u8> = Rgb([31, 119, 180]);

const MARGIN_LEFT: u32 = 80;
const MARGIN_RIGHT: u32 = 30;
const MARGIN_TOP: u32 = 30;
const MARGIN_BOTTOM: u32 = 50;

/// The numeric series the aggregator hands over: one label and one value per
/// group, in group order.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSeries {
    pub labels: Vec<String>,
    pub values: Vec<i64>,
}

/// Renders a series into opaque image bytes.
pub trait ChartRenderer: Send + Sync {
    fn render(&self, series: &ChartSeries) -> Result<Vec<u8>>;
}

/// Line-with-markers PNG renderer. Pure function of the series, so repeated
/// renders of the same data are byte-identical.
pub struct PngChartRenderer {
    width: u32,
    height: u32,
}

impl Default for PngChartRenderer {
    fn default() -> Self {
        Self {
            width: 1000,
            height: 600,
        }
    }
}

impl ChartRenderer for PngChartRenderer {
    fn render(&self, series: &ChartSeries) -> Result<Vec<u8>> {
        ensure!(!series.values.is_empty(), "chart series is empty");
        ensure!(
            series.labels.len() == series.values.len(),
            "chart series has {} labels for {} values",
            series.labels.len(),
            series.values.len()
        );

        let mut img = RgbImage::from_pixel(self.width, self.height, BACKGROUND);

        let plot_left = MARGIN_LEFT;
        let plot_right = self.width - MARGIN_RIGHT;
        let plot_top = MARGIN_TOP;
        let plot_bottom = self.height - MARGIN_BOTTOM;
        let plot_width = plot_right - plot_left;
        let plot_height = plot_bottom - plot_top;

        let max_value = series.values.iter().copied().max().unwrap_or(0).max(1);

        // Horizontal gridlines and y-tick labels at five even steps.
        for tick in 0..=4 {
            let value = max_value * tick / 4;
            let y = plot_bottom - (plot_height * tick as u32 / 4);
            if tick > 0 {
                draw_hline(&mut img, plot_left, plot_right, y, GRID);
            }
            let label = value.to_string();
            let label_width = text_width(&label);
            let x = plot_left.saturating_sub(label_width + 8);
            draw_text(&mut img, x, y.saturating_sub(GLYPH_HEIGHT / 2), &label, FRAME);
        }

        // Frame: x and y axes.
        draw_hline(&mut img, plot_left, plot_right, plot_bottom, FRAME);
        draw_vline(&mut img, plot_left, plot_top, plot_bottom, FRAME);

        // Data points, evenly spaced; a single group sits centered.
        let n = series.values.len();
        let points: Vec<(i64, i64)> = series
            .values
            .iter()
            .enumerate()
            .map(|(i, &value)| {
                let x = if n == 1 {
                    plot_left + plot_width / 2
                } else {
                    plot_left + (plot_width as u64 * i as u64 / (n as u64 - 1)) as u32
                };
                let y = plot_bottom
                    - ((plot_height as u64 * value.max(0) as u64) / max_value as u64) as u32;
                (x as i64, y as i64)
            })
            .collect();

        for pair in points.windows(2) {
            draw_line(&mut img, pair[0], pair[1], SERIES);
        }
        for (i, &(x, y)) in points.iter().enumerate() {
            draw_marker(&mut img, x, y, SERIES);
            // 1-based index label under the axis.
            let label = (i + 1).to_string();
            let lx = (x as u32).saturating_sub(text_width(&label) / 2);
            draw_text(&mut img, lx, plot_bottom + 10, &label, FRAME);
        }

        let mut bytes = Vec::new();
        image::DynamicImage::ImageRgb8(img)
            .write_to(&mut Cursor::new(&mut bytes), image::ImageOutputFormat::Png)?;
        Ok(bytes)
    }
}

fn put_pixel(img: &mut RgbImage, x: i64, y: i64, color: Rgb<u8>) {
    if x >= 0 && y >= 0 && (x as u32) < img.width() && (y as u32) < img.height() {
        img.put_pixel(x as u32, y as u32, color);
    }
}

fn draw_hline(img: &mut RgbImage, x0: u32, x1: u32, y: u32, color: Rgb<u8>) {
    for x in x0..=x1 {
        put_pixel(img, x as i64, y as i64, color);
    }
}

fn draw_vline(img: &mut RgbImage, x: u32, y0: u32, y1: u32, color: Rgb<u8>) {
    for y in y0..=y1 {
        put_pixel(img, x as i64, y as i64, color);
    }
}

/// Bresenham segment between two points.
fn draw_line(img: &mut RgbImage, (x0, y0): (i64, i64), (x1, y1): (i64, i64), color: Rgb<u8>) {
    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;
    let (mut x, mut y) = (x0, y0);

    loop {
        put_pixel(img, x, y, color);
        if x == x1 && y == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
}

/// Filled square marker, 7px across.
fn draw_marker(img: &mut RgbImage, cx: i64, cy: i64, color: Rgb<u8>) {
    for dy in -3..=3 {
        for dx in -3..=3 {
            put_pixel(img, cx + dx, cy + dy, color);
        }
    }
}

// 3x5 digit glyphs, row-major bits, rendered at 2x scale. Enough for tick
// and index labels; pair-key text lives in the HTML legend instead.
const GLYPH_ROWS: usize = 5;
const GLYPH_COLS: usize = 3;
const GLYPH_SCALE: u32 = 2;
const GLYPH_HEIGHT: u32 = GLYPH_ROWS as u32 * GLYPH_SCALE;
const GLYPH_ADVANCE: u32 = (GLYPH_COLS as u32 + 1) * GLYPH_SCALE;

const DIGITS: [[u8; GLYPH_ROWS]; 10] = [
    [0b111, 0b101, 0b101, 0b101, 0b111], // 0
    [0b010, 0b110, 0b010, 0b010, 0b111], // 1
    [0b111, 0b001, 0b111, 0b100, 0b111], // 2
    [0b111, 0b001, 0b111, 0b001, 0b111], // 3
    [0b101, 0b101, 0b111, 0b001, 0b001], // 4
    [0b111, 0b100, 0b111, 0b001, 0b111], // 5
    [0b111, 0b100, 0b111, 0b101, 0b111], // 6
    [0b111, 0b001, 0b001, 0b001, 0b001], // 7
    [0b111, 0b101, 0b111, 0b101, 0b111], // 8
    [0b111, 0b101, 0b111, 0b001, 0b111], // 9
];

fn text_width(text: &str) -> u32 {
    text.chars().count() as u32 * GLYPH_ADVANCE
}

fn draw_text(img: &mut RgbImage, x: u32, y: u32, text: &str, color: Rgb<u8>) {
    let mut cursor_x = x;
    for ch in text.chars() {
        if let Some(digit) = ch.to_digit(10) {
            let glyph = &DIGITS[digit as usize];
            for (row, bits) in glyph.iter().enumerate() {
                for col in 0..GLYPH_COLS {
                    if bits >> (GLYPH_COLS - 1 - col) & 1 == 1 {
                        for sy in 0..GLYPH_SCALE {
                            for sx in 0..GLYPH_SCALE {
                                put_pixel(
                                    img,
                                    (cursor_x + col as u32 * GLYPH_SCALE + sx) as i64,
                                    (y + row as u32 * GLYPH_SCALE + sy) as i64,
                                    color,
                                );
                            }
                        }
                    }
                }
            }
        }
        cursor_x += GLYPH_ADVANCE;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(values: &[i64]) -> ChartSeries {
        ChartSeries {
            labels: values.iter().map(|v| format!("group {v}")).collect(),
            values: values.to_vec(),
        }
    }

    const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

    #[test]
    fn test_render_produces_png_bytes() {
        let renderer = PngChartRenderer::default();
        let bytes = renderer.render(&series(&[30, 5, 120])).unwrap();
        assert!(bytes.len() > PNG_SIGNATURE.len());
        assert_eq!(&bytes[..8], &PNG_SIGNATURE);
    }

    #[test]
    fn test_render_is_deterministic() {
        let renderer = PngChartRenderer::default();
        let a = renderer.render(&series(&[10, 20, 15])).unwrap();
        let b = renderer.render(&series(&[10, 20, 15])).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_single_point_series_renders() {
        let renderer = PngChartRenderer::default();
        let bytes = renderer.render(&series(&[36525])).unwrap();
        assert_eq!(&bytes[..8], &PNG_SIGNATURE);
    }

    #[test]
    fn test_empty_series_is_an_error() {
        let renderer = PngChartRenderer::default();
        assert!(renderer.render(&series(&[])).is_err());
    }

    #[test]
    fn test_mismatched_labels_are_an_error() {
        let renderer = PngChartRenderer::default();
        let bad = ChartSeries {
            labels: vec!["only one".to_string()],
            values: vec![1, 2],
        };
        assert!(renderer.render(&bad).is_err());
    }
}
