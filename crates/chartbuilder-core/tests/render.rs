// File: crates/chartbuilder-core/tests/render.rs
// Purpose: End-to-end rendering: output files per format, canvas sizes, fills and background images.

use std::path::PathBuf;

use chartbuilder_core::{
    Bar, BarData, Chart, ChartError, Configure, HistData, Histogram, LineData, LineGraph, Pie, PieData, Scatter,
    ScatterData,
};

fn out(name: &str) -> PathBuf {
    let path = PathBuf::from("target/test_out").join(name);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    path
}

fn sample_scatter() -> Vec<ScatterData> {
    vec![
        ScatterData::new([(1.0, 2.0), (2.0, 3.5), (3.0, 1.0)]).with_label("a").with_color("g").with_marker("o"),
        ScatterData::new([(1.5, 1.5), (2.5, 2.5)]).with_label("b").with_marker("^"),
    ]
}

/// Chart whose panel center is guaranteed to be empty background.
fn bare_scatter() -> Scatter {
    let mut chart = Scatter::new();
    chart.set_size(200, 100).disable_grid().hide_ticks();
    chart
}

#[test]
fn png_has_requested_size() {
    let path = out("scatter.png");
    let mut chart = Scatter::with_labels("Scatter", "x", "y");
    chart.set_size(320, 240).file_to_save(&path);
    chart.plot(&sample_scatter()).expect("plot png");

    let img = image::open(&path).expect("decode png");
    assert_eq!((img.width(), img.height()), (320, 240));
}

#[test]
fn stacked_png_is_one_panel_high_per_dataset() {
    let path = out("hist_stack.png");
    let mut chart = Histogram::with_labels("Hist", "value", "count");
    chart.set_size(300, 200).file_to_save(&path);
    chart
        .plot(&[
            HistData::new([1, 3, 3, 8, 12, 15]).with_step(5.0).with_title("one"),
            HistData::new([4, 4, 5]).with_title("two"),
            HistData::new([10.5, 11.0, 30.25]).with_title("three"),
        ])
        .expect("plot histogram");

    let img = image::open(&path).expect("decode png");
    assert_eq!((img.width(), img.height()), (300, 600));
}

#[test]
fn every_supported_extension_writes_a_file() {
    let data = [LineData::new([(0, 0), (1, 2), (2, 1)]).with_label("line")];
    for ext in ["png", "jpg", "jpeg", "bmp", "gif", "tif", "tiff", "webp", "svg"] {
        let path = out(&format!("formats/line.{ext}"));
        let mut chart = LineGraph::with_labels("Formats", "", "");
        chart.set_size(160, 120).file_to_save(&path);
        chart.plot(&data).unwrap_or_else(|e| panic!("{ext}: {e}"));
        assert!(std::fs::metadata(&path).map(|m| m.len() > 0).unwrap_or(false), "{ext} not written");
        if ext != "svg" {
            let img = image::open(&path).unwrap_or_else(|e| panic!("{ext}: {e}"));
            assert_eq!((img.width(), img.height()), (160, 120), "{ext}");
        }
    }
}

#[test]
fn svg_is_a_document() {
    let path = out("pie.svg");
    let mut chart = Pie::with_labels("Pie", "", "");
    chart.file_to_save(&path);
    chart.plot(&[PieData::new([("a", 2), ("b", 1)])]).expect("plot svg");
    let text = std::fs::read_to_string(&path).expect("read svg");
    assert!(text.contains("<svg"));
}

#[test]
fn unsupported_extension_is_an_error() {
    let mut chart = Bar::new();
    chart.file_to_save(out("bar.pdf"));
    let err = chart.plot(&[BarData::new([(1, 1)])]).unwrap_err();
    assert!(matches!(err, ChartError::UnsupportedFormat(_)));
    assert!(!out("bar.pdf").exists());
}

#[test]
fn face_and_background_colors_are_painted() {
    let mut chart = bare_scatter();
    chart.set_face_color("red", 1.0).unwrap().set_bg_color("blue", 1.0).unwrap();
    let img = chart.render_rgba(&[ScatterData::new([(0.0, 0.0), (10.0, 10.0)])]).unwrap();
    assert_eq!(img.dimensions(), (200, 100));
    assert_eq!(img.get_pixel(0, 0).0, [255, 0, 0, 255]);
    assert_eq!(img.get_pixel(100, 50).0, [0, 0, 255, 255]);
}

#[test]
fn translucent_face_keeps_alpha() {
    let mut chart = bare_scatter();
    chart.set_face_color("white", 0.0).unwrap();
    let img = chart.render_rgba(&[]).unwrap();
    assert_eq!(img.get_pixel(0, 0).0[3], 0);
}

#[test]
fn background_image_is_stretched_over_the_panel() {
    let bg = out("bg/green.png");
    image::RgbaImage::from_pixel(4, 4, image::Rgba([0, 200, 0, 255])).save(&bg).unwrap();

    let mut chart = bare_scatter();
    chart.set_bg_image(&bg);
    let img = chart.render_rgba(&[ScatterData::new([(0.0, 0.0), (10.0, 10.0)])]).unwrap();
    assert_eq!(img.get_pixel(100, 50).0, [0, 200, 0, 255]);
    // Outside the panel the figure face shows.
    assert_eq!(img.get_pixel(1, 1).0, [255, 255, 255, 255]);
}

#[test]
fn missing_background_image_does_not_fail() {
    let path = out("missing_bg.png");
    let mut chart = Bar::with_labels("Bars", "x", "y");
    chart.set_bg_image("target/test_out/does/not/exist.png").file_to_save(&path);
    chart.plot(&[BarData::new([(1, 3), (2, 5)]).with_title("t")]).expect("render despite missing image");
    assert!(path.exists());
}

#[test]
fn every_chart_type_renders() {
    let mut bar = Bar::with_labels("Bars", "month", "sales");
    bar.set_x_ticks(["jan", "feb", "mar"]);
    assert_eq!(bar.render_rgba(&[BarData::new([(1, 10), (2, 14), (3, 9)])]).unwrap().height(), 600);

    let mut pie = Pie::with_labels("Share", "", "");
    pie.set_face_color("lavender", 0.8).unwrap();
    let pies = [
        PieData::new([("x", 10), ("y", 30), ("z", 60)]).with_title("p1"),
        PieData::new([(2020, 1.5), (2021, 2.5)]).with_min_percent(5.0).with_title("p2"),
    ];
    assert_eq!(pie.render_rgba(&pies).unwrap().height(), 1200);

    let mut scatter = Scatter::with_labels("Markers", "", "");
    let all: Vec<ScatterData> = Scatter::markers_list()
        .into_iter()
        .enumerate()
        .map(|(i, m)| ScatterData::new([(i as f64, (i % 5) as f64)]).with_marker(m))
        .collect();
    scatter.set_font_color("dimgray").unwrap();
    assert_eq!(scatter.render_rgba(&all).unwrap().width(), 800);
}
