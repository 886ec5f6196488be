use anyhow::Result;
use lazy_static::lazy_static;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::collections::HashMap;
use std::path::Path;
use crate::config::defs::PipelineError;
use crate::utils::histogram::{ReadLengthHistogram, TickMarks};

const METRICS_FONT_SIZE: f64 = 18.0;
const METRICS_LINE_HEIGHT: i32 = 22;

lazy_static! {
    static ref NAMED_COLORS: HashMap<&'static str, (u8, u8, u8)> = {
        let mut m = HashMap::new();
        m.insert("green", (0, 128, 0));
        m.insert("darkgreen", (0, 100, 0));
        m.insert("lime", (0, 255, 0));
        m.insert("red", (255, 0, 0));
        m.insert("darkred", (139, 0, 0));
        m.insert("blue", (0, 0, 255));
        m.insert("navy", (0, 0, 128));
        m.insert("steelblue", (70, 130, 180));
        m.insert("orange", (255, 165, 0));
        m.insert("darkorange", (255, 140, 0));
        m.insert("purple", (128, 0, 128));
        m.insert("magenta", (255, 0, 255));
        m.insert("cyan", (0, 255, 255));
        m.insert("teal", (0, 128, 128));
        m.insert("yellow", (255, 255, 0));
        m.insert("gold", (255, 215, 0));
        m.insert("brown", (165, 42, 42));
        m.insert("pink", (255, 192, 203));
        m.insert("gray", (128, 128, 128));
        m.insert("grey", (128, 128, 128));
        m.insert("black", (0, 0, 0));
        m
    };
}

/// Image encodings the renderer can write, picked from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Bitmap,
    Svg,
}

impl ImageFormat {
    pub fn from_path(path: &Path) -> Result<Self, PipelineError> {
        let ext = path
            .extension()
            .map(|e| e.to_string_lossy().to_ascii_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "png" | "jpg" | "jpeg" | "bmp" => Ok(ImageFormat::Bitmap),
            "svg" => Ok(ImageFormat::Svg),
            _ => Err(PipelineError::InvalidConfig(format!(
                "Unsupported plot format for {}; use png, jpg, bmp or svg",
                path.display()
            ))),
        }
    }
}

/// Parses a color name or `#rrggbb` hex code.
pub fn parse_color(color: &str) -> Result<RGBColor, PipelineError> {
    let lowered = color.trim().to_ascii_lowercase();
    if let Some(&(r, g, b)) = NAMED_COLORS.get(lowered.as_str()) {
        return Ok(RGBColor(r, g, b));
    }

    if let Some(hex) = lowered.strip_prefix('#') {
        if hex.len() == 6 && hex.chars().all(|c| c.is_ascii_hexdigit()) {
            let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16);
            if let (Ok(r), Ok(g), Ok(b)) = (channel(0), channel(2), channel(4)) {
                return Ok(RGBColor(r, g, b));
            }
        }
    }

    Err(PipelineError::InvalidConfig(format!("Unknown color '{}'", color)))
}

/// Everything the bar chart needs besides the data.
pub struct ChartStyle<'a> {
    pub title: &'a str,
    pub color: RGBColor,
    pub width_px: u32,
    pub height_px: u32,
}

/// Renders the read length histogram as a bar chart with a metrics block.
///
/// # Arguments
///
/// * `histogram` - Binned total bases.
/// * `ticks` - Which bins get an x-axis label.
/// * `metrics` - Lines of the metrics block, drawn monospace, right-aligned.
/// * `style` - Title, bar color and pixel size.
/// * `output_path` - Target file.
/// * `format` - Backend to draw with, as resolved from the file name.
pub fn plot_read_lengths(
    histogram: &ReadLengthHistogram,
    ticks: &TickMarks,
    metrics: &[String],
    style: &ChartStyle,
    output_path: &Path,
    format: ImageFormat,
) -> Result<()> {
    let size = (style.width_px, style.height_px);
    match format {
        ImageFormat::Bitmap => {
            let root = BitMapBackend::new(output_path, size).into_drawing_area();
            draw_histogram(root, histogram, ticks, metrics, style)
        }
        ImageFormat::Svg => {
            let root = SVGBackend::new(output_path, size).into_drawing_area();
            draw_histogram(root, histogram, ticks, metrics, style)
        }
    }
}

fn draw_histogram<DB: DrawingBackend>(
    root: DrawingArea<DB, Shift>,
    histogram: &ReadLengthHistogram,
    ticks: &TickMarks,
    metrics: &[String],
    style: &ChartStyle,
) -> Result<()>
where
    DB::ErrorType: 'static,
{
    root.fill(&WHITE)?;

    let num_bins = histogram.bins().len() as i32;
    let max_bin_value = histogram.max_megabases();
    let y_top = if max_bin_value > 0.0 { max_bin_value * 1.05 } else { 1.0 };

    let mut chart = ChartBuilder::on(&root)
        .caption(style.title, ("sans-serif", 24))
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(80)
        .build_cartesian_2d(0..num_bins, 0f64..y_top)?;

    let tick_labels: HashMap<i32, &str> = ticks
        .positions
        .iter()
        .zip(&ticks.labels)
        .map(|(&pos, label)| (pos as i32, label.as_str()))
        .collect();
    let x_formatter = |x: &i32| tick_labels.get(x).map(|l| l.to_string()).unwrap_or_default();

    chart.configure_mesh()
        .disable_x_mesh()
        .x_labels(num_bins as usize + 1)
        .x_label_formatter(&x_formatter)
        .x_desc("Read sizes")
        .y_desc("Total bases (in Mb)")
        .draw()?;

    chart.draw_series(histogram.bins().iter().map(|bin| {
        let x = bin.index as i32;
        Rectangle::new([(x, 0.0), (x + 1, bin.megabases)], style.color.filled())
    }))?;

    // top-right corner of the metrics block sits one bin left of the last tick
    let anchor_x = ticks.positions.last().map(|&p| p as i32 - 1).unwrap_or(0).max(0);
    let (px, py) = chart.backend_coord(&(anchor_x, max_bin_value));
    let text_style = TextStyle::from(("monospace", METRICS_FONT_SIZE).into_font())
        .pos(Pos::new(HPos::Right, VPos::Top));
    for (i, line) in metrics.iter().enumerate() {
        root.draw(&Text::new(
            line.clone(),
            (px, py + i as i32 * METRICS_LINE_HEIGHT),
            text_style.clone(),
        ))?;
    }

    root.present()?;
    Ok(())
}
