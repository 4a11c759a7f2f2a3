use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use gc_canny::{
    CannyConfig, LinkStats, apply_double_threshold, collapse_weak, detect_edges,
    link_edges_rescan, suppress_non_maxima,
};
use gc_core::{BorderPolicy, Gradient, GradientField};
use image::{GrayImage, ImageReader, Luma, Rgb, RgbImage};
use log::info;
use serde::Serialize;

// ── CLI ───────────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "gc_gallery")]
#[command(about = "Run the gradient-canny chain on images and render the stages")]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write the final binary edge map.
    Edges(EdgesArgs),
    /// Write every intermediate stage plus a false-color direction image.
    Stages(StagesArgs),
}

#[derive(Args, Debug, Clone)]
struct CommonArgs {
    /// Input PNG; a synthetic disk scene is used when omitted.
    #[arg(long)]
    input: Option<PathBuf>,
    #[arg(long, default_value = "out")]
    out: PathBuf,
    /// Low threshold: magnitudes below become suppressed.
    #[arg(long, default_value_t = 0.3)]
    low: f32,
    /// High threshold: magnitudes above become strong.
    #[arg(long, default_value_t = 0.8)]
    high: f32,
    #[arg(long, value_enum, default_value = "clamp")]
    border: BorderArg,
}

#[derive(Args, Debug, Clone)]
struct EdgesArgs {
    #[command(flatten)]
    common: CommonArgs,
}

#[derive(Args, Debug, Clone)]
struct StagesArgs {
    #[command(flatten)]
    common: CommonArgs,
    /// Magnitude emphasis for the false-color direction rendering.
    #[arg(long, default_value_t = 2.0)]
    emphasis: f32,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
enum BorderArg {
    Clamp,
    Wrap,
}

impl From<BorderArg> for BorderPolicy {
    fn from(arg: BorderArg) -> Self {
        match arg {
            BorderArg::Clamp => BorderPolicy::Clamp,
            BorderArg::Wrap => BorderPolicy::Wrap,
        }
    }
}

// ── JSON metadata ─────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct MetaEdges {
    source: String,
    width: u32,
    height: u32,
    low: f32,
    high: f32,
    border: String,
    strong_pixels: usize,
}

#[derive(Debug, Serialize)]
struct MetaStages {
    source: String,
    width: u32,
    height: u32,
    low: f32,
    high: f32,
    border: String,
    link: LinkStats,
    strong_pixels: usize,
}

// ── Upstream collaborator ─────────────────────────────────────────────────────

/// Scharr gradients of a grayscale image, with the magnitude channel
/// normalized to [0, 1] and the direction channel in the East-
/// counterclockwise convention. This is the gradient producer the core
/// crates deliberately exclude.
fn scharr_gradient_field(gray: &GrayImage) -> GradientField {
    let w = gray.width() as usize;
    let h = gray.height() as usize;

    let mut lum = vec![0.0f32; w * h];
    for (i, px) in gray.pixels().enumerate() {
        lum[i] = px.0[0] as f32 / 255.0;
    }

    let mut cells = vec![Gradient::default(); w * h];
    let mut max_mag = 0.0f32;

    for y in 0..h {
        let ym1 = y.saturating_sub(1);
        let yp1 = (y + 1).min(h - 1);
        for x in 0..w {
            let xm1 = x.saturating_sub(1);
            let xp1 = (x + 1).min(w - 1);

            let p00 = lum[ym1 * w + xm1];
            let p01 = lum[ym1 * w + x];
            let p02 = lum[ym1 * w + xp1];
            let p10 = lum[y * w + xm1];
            let p12 = lum[y * w + xp1];
            let p20 = lum[yp1 * w + xm1];
            let p21 = lum[yp1 * w + x];
            let p22 = lum[yp1 * w + xp1];

            let gx = (3.0 * p02 + 10.0 * p12 + 3.0 * p22) - (3.0 * p00 + 10.0 * p10 + 3.0 * p20);
            let gy = (3.0 * p20 + 10.0 * p21 + 3.0 * p22) - (3.0 * p00 + 10.0 * p01 + 3.0 * p02);

            let magnitude = (gx * gx + gy * gy).sqrt();
            max_mag = max_mag.max(magnitude);
            // Image y grows downward; negate gy so 0 = East, PI/2 = North.
            cells[y * w + x] = Gradient::new(magnitude, (-gy).atan2(gx));
        }
    }

    if max_mag > 0.0 {
        for cell in &mut cells {
            cell.magnitude /= max_mag;
        }
    }

    GradientField::from_vec(w, h, cells).expect("gradient buffer matches image size")
}

/// Bright disk on a dark background with a smoothstep rim a few pixels
/// wide, so the rim gradient peaks strictly at one pixel and every
/// direction occurs.
fn synthetic_disk(width: u32, height: u32) -> GrayImage {
    let cx = width as f32 / 2.0;
    let cy = height as f32 / 2.0;
    let radius = 0.3 * width.min(height) as f32;

    GrayImage::from_fn(width, height, |x, y| {
        let dx = x as f32 - cx;
        let dy = y as f32 - cy;
        let d = (dx * dx + dy * dy).sqrt() - radius;
        let s = ((d / 3.0).clamp(-1.0, 1.0) + 1.0) / 2.0;
        let v = 1.0 - (3.0 * s * s - 2.0 * s * s * s);
        Luma([(v * 255.0).round() as u8])
    })
}

// ── Renderings ────────────────────────────────────────────────────────────────

fn magnitude_to_gray(field: &GradientField) -> GrayImage {
    let view = field.as_view();
    GrayImage::from_fn(field.width() as u32, field.height() as u32, |x, y| {
        let m = view.row(y as usize)[x as usize].magnitude;
        Luma([(m.clamp(0.0, 1.0) * 255.0).round() as u8])
    })
}

/// False-color rendering of a gradient field: direction maps to hue,
/// magnitude (scaled by `emphasis`) to value.
fn direction_false_color(field: &GradientField, emphasis: f32) -> RgbImage {
    let view = field.as_view();
    RgbImage::from_fn(field.width() as u32, field.height() as u32, |x, y| {
        let cell = view.row(y as usize)[x as usize];
        if !cell.direction.is_finite() {
            return Rgb([0, 0, 0]);
        }
        let hue = (cell.direction.to_degrees() + 360.0) % 360.0;
        let value = (cell.magnitude * emphasis).clamp(0.0, 1.0);
        hsv_to_rgb(hue, 1.0, value)
    })
}

fn hsv_to_rgb(hue: f32, saturation: f32, value: f32) -> Rgb<u8> {
    let c = value * saturation;
    let hp = (hue / 60.0).clamp(0.0, 5.999);
    let x = c * (1.0 - (hp % 2.0 - 1.0).abs());
    let (r, g, b) = match hp as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    let m = value - c;
    Rgb([
        ((r + m) * 255.0).round() as u8,
        ((g + m) * 255.0).round() as u8,
        ((b + m) * 255.0).round() as u8,
    ])
}

// ── Commands ──────────────────────────────────────────────────────────────────

fn load_or_synthesize(input: &Option<PathBuf>) -> Result<(GrayImage, String)> {
    match input {
        Some(path) => {
            let gray = ImageReader::open(path)
                .with_context(|| format!("opening {}", path.display()))?
                .decode()
                .with_context(|| format!("decoding {}", path.display()))?
                .into_luma8();
            Ok((gray, path.display().to_string()))
        }
        None => Ok((synthetic_disk(320, 240), "synthetic-disk".to_string())),
    }
}

fn count_strong(field: &GradientField) -> usize {
    field
        .data()
        .iter()
        .filter(|cell| cell.magnitude >= 1.0)
        .count()
}

fn save_gray(img: &GrayImage, path: &Path) -> Result<()> {
    img.save(path)
        .with_context(|| format!("writing {}", path.display()))
}

fn write_meta<T: Serialize>(path: &Path, meta: &T) -> Result<()> {
    let file = fs::File::create(path).with_context(|| format!("creating {}", path.display()))?;
    serde_json::to_writer_pretty(file, meta)
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

fn run_edges(args: &EdgesArgs) -> Result<()> {
    let common = &args.common;
    let (gray, source) = load_or_synthesize(&common.input)?;
    let field = scharr_gradient_field(&gray);

    let cfg = CannyConfig {
        low_thresh: common.low,
        high_thresh: common.high,
        border: common.border.into(),
        binarize: true,
    };
    let edges = detect_edges(&field.as_view(), &cfg);
    let strong_pixels = count_strong(&edges);
    info!("{source}: {strong_pixels} edge pixels");

    fs::create_dir_all(&common.out)
        .with_context(|| format!("creating {}", common.out.display()))?;
    save_gray(&magnitude_to_gray(&edges), &common.out.join("edges.png"))?;
    write_meta(
        &common.out.join("edges_meta.json"),
        &MetaEdges {
            source,
            width: gray.width(),
            height: gray.height(),
            low: common.low,
            high: common.high,
            border: format!("{:?}", cfg.border),
            strong_pixels,
        },
    )?;

    println!("edge map written to {}", common.out.display());
    Ok(())
}

fn run_stages(args: &StagesArgs) -> Result<()> {
    let common = &args.common;
    let (gray, source) = load_or_synthesize(&common.input)?;
    let field = scharr_gradient_field(&gray);
    let border: BorderPolicy = common.border.into();

    let thinned = suppress_non_maxima(&field.as_view(), border);
    let classified = apply_double_threshold(&thinned.as_view(), common.low, common.high);

    let mut linked = classified.clone();
    let link = link_edges_rescan(&mut linked, border);
    info!(
        "{source}: {} promotions over {} scans",
        link.promoted, link.scans
    );

    let edges = collapse_weak(&linked.as_view(), 1.0);
    let strong_pixels = count_strong(&edges);

    fs::create_dir_all(&common.out)
        .with_context(|| format!("creating {}", common.out.display()))?;
    save_gray(&gray, &common.out.join("input.png"))?;
    save_gray(&magnitude_to_gray(&field), &common.out.join("gradient.png"))?;
    direction_false_color(&field, args.emphasis)
        .save(common.out.join("direction.png"))
        .context("writing direction.png")?;
    save_gray(&magnitude_to_gray(&thinned), &common.out.join("nms.png"))?;
    save_gray(&magnitude_to_gray(&classified), &common.out.join("threshold.png"))?;
    save_gray(&magnitude_to_gray(&linked), &common.out.join("linked.png"))?;
    save_gray(&magnitude_to_gray(&edges), &common.out.join("edges.png"))?;

    write_meta(
        &common.out.join("stages_meta.json"),
        &MetaStages {
            source,
            width: gray.width(),
            height: gray.height(),
            low: common.low,
            high: common.high,
            border: format!("{border:?}"),
            link,
            strong_pixels,
        },
    )?;

    println!("stage renderings written to {}", common.out.display());
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match &cli.cmd {
        Command::Edges(args) => run_edges(args),
        Command::Stages(args) => run_stages(args),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
