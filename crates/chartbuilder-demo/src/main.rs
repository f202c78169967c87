// File: crates/chartbuilder-demo/src/main.rs
// Summary: Demo renders one chart of every kind from synthetic samples, plus tracks over prepared maps.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chartbuilder_core::{
    count_occurrences, crop, prepare_map, to_percentages, Bar, BarData, Chart, Configure, HistData, Histogram,
    LineData, LineGraph, Pie, PieData, Scatter, ScatterData,
};
use clap::{Parser, ValueEnum};
use log::{info, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};

#[derive(Parser)]
#[command(name = "chartbuilder-demo", about = "Render sample charts with chartbuilder")]
struct Cli {
    /// Directory that receives the rendered charts
    #[arg(short, long, default_value = "target/chartbuilder-out")]
    out_dir: PathBuf,
    /// Output file extension (png, jpg, svg, ...)
    #[arg(short, long, default_value = "svg")]
    format: String,
    /// Optional CSV with `x` and `y` columns, plotted as an extra scatter chart
    #[arg(long)]
    points: Option<PathBuf>,
    /// Present each chart instead of saving it
    #[arg(long)]
    show: bool,
    /// Seed for the synthetic samples
    #[arg(long, default_value_t = 7)]
    seed: u64,
    /// Log level; falls back to RUST_LOG, then `info`
    #[arg(long, value_enum)]
    log_level: Option<LogLevel>,
}

#[derive(Clone, Copy, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn to_level_filter(self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// `n` points drawn from a round gaussian cloud centered at `center`.
fn cloud(rng: &mut StdRng, n: usize, (mx, my): (f64, f64), sigma: f64) -> Result<Vec<(f64, f64)>> {
    let (nx, ny) = (Normal::new(mx, sigma)?, Normal::new(my, sigma)?);
    Ok((0..n).map(|_| (nx.sample(rng), ny.sample(rng))).collect())
}

struct Demo {
    out_dir: PathBuf,
    format: String,
    show: bool,
}

impl Demo {
    fn target(&self, stem: &str) -> PathBuf {
        self.out_dir.join(format!("{stem}.{}", self.format))
    }

    /// Shared look for the cartesian samples.
    fn style<C: Configure>(&self, chart: &mut C, stem: &str) -> Result<()> {
        chart.set_face_color("darkgray", 0.5)?.set_bg_color("whitesmoke", 0.9)?;
        self.route(chart, stem);
        Ok(())
    }

    fn route<C: Configure>(&self, chart: &mut C, stem: &str) {
        if !self.show {
            chart.file_to_save(self.target(stem));
        }
    }

    fn finish<C: Chart>(&self, chart: &C, data: &[C::Data], stem: &str) -> Result<()> {
        chart.plot(data).with_context(|| format!("rendering {stem}"))?;
        if !self.show {
            info!("Wrote {}", self.target(stem).display());
        }
        Ok(())
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut log_builder = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if let Some(level) = cli.log_level {
        log_builder.filter_level(level.to_level_filter());
    }
    log_builder.format_module_path(false).init();

    std::fs::create_dir_all(&cli.out_dir).with_context(|| format!("creating {}", cli.out_dir.display()))?;
    let demo = Demo { out_dir: cli.out_dir.clone(), format: cli.format.to_lowercase(), show: cli.show };
    let mut rng = StdRng::seed_from_u64(cli.seed);

    // 1) Three gaussian clouds
    let clouds = [
        ("Dataset A", "g", cloud(&mut rng, 400, (3.0, 7.0), 1.2)?),
        ("Dataset B", "b", cloud(&mut rng, 400, (5.0, 3.0), 1.2)?),
        ("Dataset C", "r", cloud(&mut rng, 400, (7.0, 5.0), 1.2)?),
    ];
    let mut p1 = Scatter::with_labels("Sample 1 - Scatter", "Value X", "Value Y");
    demo.style(&mut p1, "01_scatter-1")?;
    let data: Vec<ScatterData> = clouds
        .iter()
        .map(|(label, color, pts)| ScatterData::new(pts.iter().copied()).with_label(*label).with_color(color))
        .collect();
    demo.finish(&p1, &data, "01_scatter-1")?;

    // 2) and 3) Counts of rounded samples with growing spread
    let spreads = [(1.1, "g", "o", "r"), (1.2, "r", "d", "g"), (1.5, "b", "v", "b"), (1.7, "m", "s", "m")];
    let counted: Vec<(f64, Vec<(i64, usize)>)> = spreads
        .iter()
        .map(|&(sigma, ..)| -> Result<_> {
            let normal = Normal::new(7.0, sigma)?;
            let values: Vec<i64> = (0..400).map(|_| normal.sample(&mut rng).round() as i64).collect();
            Ok((sigma, count_occurrences(&values)))
        })
        .collect::<Result<_>>()?;

    let mut p2 = Scatter::with_labels("Sample 2 - Scatter", "Value", "Count");
    demo.style(&mut p2, "02_scatter-2")?;
    let data: Vec<ScatterData> = counted
        .iter()
        .zip(&spreads)
        .zip(["A", "B", "C", "D"])
        .map(|(((sigma, counts), (_, color, marker, _)), name)| {
            ScatterData::new(counts.iter().copied())
                .with_label(format!("Dataset {name} (sigma {sigma})"))
                .with_color(color)
                .with_marker(marker)
        })
        .collect();
    demo.finish(&p2, &data, "02_scatter-2")?;

    let mut p3 = LineGraph::with_labels("Sample 3 - Line Diagram", "Value", "Count");
    demo.style(&mut p3, "03_linegraph")?;
    let data: Vec<LineData> = counted
        .iter()
        .zip(&spreads)
        .zip(["A", "B", "C", "D"])
        .map(|(((sigma, counts), (.., color)), name)| {
            LineData::new(counts.iter().copied())
                .with_label(format!("Dataset {name} (sigma {sigma})"))
                .with_color(color)
        })
        .collect();
    demo.finish(&p3, &data, "03_linegraph")?;

    // 4) and 5) Uniform integers as bars and as a histogram
    let a: Vec<i64> = (0..400).map(|_| rng.random_range(1..=99)).collect();
    let b: Vec<i64> = (0..400).map(|_| rng.random_range(1..=99)).collect();

    let mut p4 = Bar::with_labels("Sample 4 - Bar Diagram", "Value", "Count");
    demo.style(&mut p4, "04_bar")?;
    let data = [
        BarData::new(count_occurrences(&a)).with_title("Dataset A").with_color("b"),
        BarData::new(count_occurrences(&b)).with_title("Dataset B").with_color("y"),
    ];
    demo.finish(&p4, &data, "04_bar")?;

    let mut p5 = Histogram::with_labels("Sample 5 - Histogram", "Value", "Count");
    demo.style(&mut p5, "05_histogram")?;
    let data = [
        HistData::new(a.iter().copied()).with_step(10.0).with_title("Dataset A").with_color("r"),
        HistData::new(b.iter().copied()).with_step(10.0).with_title("Dataset B").with_color("g"),
    ];
    demo.finish(&p5, &data, "05_histogram")?;

    // 6) and 7) The same values grouped in tens, as counts then as percentages
    let group = |values: &[i64]| -> Vec<(f64, usize)> {
        let centers: Vec<f64> = values.iter().map(|v| (v / 10) as f64 + 0.5).collect();
        count_occurrences(&centers)
    };
    let (ag, bg) = (group(&a), group(&b));

    let mut p6 = Bar::with_labels(
        "Sample 6 - Bar Diagram with values groups in ranges (Another way to build histogram)",
        "Value, x10",
        "Count",
    );
    demo.style(&mut p6, "06_bar")?;
    let data = [
        BarData::new(ag.iter().copied()).with_title("Dataset A").with_color("b"),
        BarData::new(bg.iter().copied()).with_title("Dataset B").with_color("y"),
    ];
    demo.finish(&p6, &data, "06_bar")?;

    let item_names: Vec<String> = (0..100).step_by(10).map(|i| format!("{i} - {}", i + 9)).collect();
    let mut p7 = Bar::with_labels(
        "Sample 7 - Bar diagram with custom names on x-axis and % on y-axis (histogram in %)",
        "Range",
        "% of values",
    );
    demo.style(&mut p7, "07_bar")?;
    p7.set_x_ticks(item_names.iter().cloned());
    let data = [
        BarData::new(to_percentages(&ag)).with_title("Dataset A").with_color("c"),
        BarData::new(to_percentages(&bg)).with_title("Dataset B").with_color("m"),
    ];
    demo.finish(&p7, &data, "07_bar")?;

    // 8) and 9) Pies, the second one filtered and then renamed
    let pies = [
        PieData::new(ag.iter().copied()).with_title("Dataset A"),
        PieData::new(bg.iter().copied()).with_min_percent(8.0).with_title("Dataset B (filtered)"),
    ];
    let mut p8 = Pie::with_labels("Sample 8 - Pie Diagramm", "", "");
    p8.set_face_color("darkgray", 0.5)?;
    demo.route(&mut p8, "08_pie");
    demo.finish(&p8, &pies, "08_pie")?;

    let mut p9 = Pie::with_labels("Sample 9 - Pie Diagramm with custom names", "", "");
    p9.set_face_color("darkgray", 0.5)?;
    p9.set_item_names(item_names.iter().cloned());
    demo.route(&mut p9, "09_pie");
    demo.finish(&p9, &pies, "09_pie")?;

    // 10) and 11) Routes over prepared maps
    let routes = [route_a(&mut rng)?, route_b(&mut rng)?];
    let maps_dir = demo.out_dir.join("maps");
    for (stem, title, w, h) in [("10_square_map", "Square Map", 600, 600), ("11_rectangular_map", "Rectangular Map", 800, 520)] {
        let source = synthetic_map(&maps_dir, stem, w, h)?;
        plot_routes(&demo, &source, &routes, stem, title)?;
    }

    // 12) Optional user points
    if let Some(path) = cli.points.as_deref() {
        let points = load_points_csv(path).with_context(|| format!("failed to load CSV '{}'", path.display()))?;
        if points.is_empty() {
            warn!("{} holds no usable x,y rows", path.display());
        } else {
            let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("points").to_string();
            let mut chart = Scatter::with_labels(&stem, "x", "y");
            demo.style(&mut chart, "12_points")?;
            demo.finish(&chart, &[ScatterData::new(points).with_label(stem.as_str())], "12_points")?;
        }
    }

    Ok(())
}

/// Gaussian sample around `center` after a uniform jitter of up to 10 units per axis.
fn jittered(rng: &mut StdRng, (cx, cy): (f64, f64), sigma: f64) -> Result<(f64, f64)> {
    let jx = f64::from(rng.random_range(-10i32..=10));
    let jy = f64::from(rng.random_range(-10i32..=10));
    Ok((Normal::new(cx + jx, sigma)?.sample(rng), Normal::new(cy + jy, sigma)?.sample(rng)))
}

/// Start cluster, a diagonal walk, an end cluster and one point far off the map.
fn route_a(rng: &mut StdRng) -> Result<Vec<(f64, f64)>> {
    let mut pts = cloud(rng, 50, (100.0, 100.0), 20.0)?;
    for i in (100..500).step_by(10) {
        pts.push(jittered(rng, (f64::from(i), f64::from(i)), 7.0)?);
    }
    pts.extend(cloud(rng, 100, (500.0, 500.0), 20.0)?);
    pts.push((1000.0, 800.0));
    Ok(pts)
}

fn route_b(rng: &mut StdRng) -> Result<Vec<(f64, f64)>> {
    let mut pts = cloud(rng, 50, (100.0, 400.0), 20.0)?;
    for i in (100..300).step_by(10) {
        pts.push(jittered(rng, (f64::from(i), 500.0 - f64::from(i)), 7.0)?);
    }
    pts.extend(cloud(rng, 100, (300.0, 200.0), 20.0)?);
    pts.push((1000.0, 800.0));
    Ok(pts)
}

/// Paint a terrain-like gradient with a road grid so the map has something to show.
fn synthetic_map(dir: &Path, stem: &str, width: u32, height: u32) -> Result<PathBuf> {
    std::fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    let path = dir.join(format!("{stem}.png"));
    let img = image::RgbImage::from_fn(width, height, |x, y| {
        if x % 100 < 3 || y % 100 < 3 {
            image::Rgb([240, 230, 200])
        } else {
            let g = 120 + ((x + y) * 100 / (width + height)) as u8;
            image::Rgb([90, g, 110])
        }
    });
    img.save(&path).with_context(|| format!("writing {}", path.display()))?;
    Ok(path)
}

fn plot_routes(demo: &Demo, source: &Path, routes: &[Vec<(f64, f64)>; 2], stem: &str, title: &str) -> Result<()> {
    let map = prepare_map(source).with_context(|| format!("preparing map {}", source.display()))?;
    let (w, h) = (f64::from(map.width), f64::from(map.height));

    let mut chart = Scatter::with_labels(title, "", "");
    chart.set_size(map.width, map.height).set_bg_image(&map.path).hide_ticks();
    demo.route(&mut chart, stem);
    let data = [
        ScatterData::new(map.corners.iter().copied()).with_color("k").with_marker("+"),
        ScatterData::new(crop(&routes[0], 0.0, 0.0, w, h)).with_label("Route A track").with_color("r"),
        ScatterData::new(crop(&routes[1], 0.0, 0.0, w, h)).with_label("Route B track").with_color("b"),
    ];
    demo.finish(&chart, &data, stem)
}

/// Load `x,y` rows from a headered CSV. Rows that fail to parse are skipped.
fn load_points_csv(path: &Path) -> Result<Vec<(f64, f64)>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;

    let headers = rdr.headers()?.iter().map(|h| h.to_lowercase()).collect::<Vec<_>>();
    let column = |name: &str| headers.iter().position(|h| h == name);
    let (Some(ix), Some(iy)) = (column("x"), column("y")) else {
        anyhow::bail!("expected `x` and `y` columns, found {headers:?}");
    };

    let mut points = Vec::new();
    for (row, record) in rdr.records().enumerate() {
        let record = record.with_context(|| format!("reading row {}", row + 1))?;
        let parse = |i: usize| record.get(i).and_then(|s| s.parse::<f64>().ok());
        match (parse(ix), parse(iy)) {
            (Some(x), Some(y)) => points.push((x, y)),
            _ => warn!("skipping row {}: {:?}", row + 1, record),
        }
    }
    info!("Loaded {} points from {}", points.len(), path.display());
    Ok(points)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_samples() {
        let a = cloud(&mut StdRng::seed_from_u64(3), 20, (5.0, -5.0), 1.0).unwrap();
        let b = cloud(&mut StdRng::seed_from_u64(3), 20, (5.0, -5.0), 1.0).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn routes_end_off_the_map() {
        let mut rng = StdRng::seed_from_u64(7);
        let route = route_a(&mut rng).unwrap();
        assert_eq!(route.len(), 50 + 40 + 100 + 1);
        assert_eq!(route.last(), Some(&(1000.0, 800.0)));
        let inside = crop(&route, 0.0, 0.0, 600.0, 600.0);
        assert!(inside.len() < route.len());
    }

    #[test]
    fn cloud_centers_on_mean() {
        let pts = cloud(&mut StdRng::seed_from_u64(11), 2000, (3.0, 7.0), 1.2).unwrap();
        let mx = pts.iter().map(|p| p.0).sum::<f64>() / pts.len() as f64;
        let my = pts.iter().map(|p| p.1).sum::<f64>() / pts.len() as f64;
        assert!((mx - 3.0).abs() < 0.2 && (my - 7.0).abs() < 0.2);
    }
}
