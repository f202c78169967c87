// File: crates/chartbuilder-core/tests/snapshot.rs
// Purpose: Golden snapshot harness with bless flow.
// Behavior:
// - Renders small text-free charts (no titles, hidden ticks) to RGBA.
// - If env UPDATE_SNAPSHOTS=1, (re)writes the snapshot PNGs.
// - Else, if a snapshot exists, compares decoded pixels for an exact match.
// - Else, logs a note; the pixel checks each test makes still apply.

use chartbuilder_core::{Bar, BarData, Chart, Configure, LineData, LineGraph};

fn updating() -> bool {
    std::env::var("UPDATE_SNAPSHOTS")
        .ok()
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(false)
}

fn count(img: &image::RgbaImage, rgba: [u8; 4]) -> usize {
    img.pixels().filter(|p| p.0 == rgba).count()
}

fn check(name: &str, got: image::RgbaImage) {
    let snap_dir = std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/__snapshots__");
    let snap_path = snap_dir.join(name);

    if updating() {
        std::fs::create_dir_all(&snap_dir).expect("create snapshots dir");
        got.save(&snap_path).expect("write snapshot");
        eprintln!("[snapshot] Updated {}", snap_path.display());
        return;
    }

    if snap_path.exists() {
        let want = image::open(&snap_path).expect("decode snapshot").to_rgba8();
        assert_eq!(got.dimensions(), want.dimensions(), "snapshot size differs: {}", snap_path.display());
        assert_eq!(got.as_raw(), want.as_raw(), "rendered pixels differ from golden snapshot: {}", snap_path.display());
    } else {
        eprintln!("[snapshot] Missing snapshot {}; set UPDATE_SNAPSHOTS=1 to bless.", snap_path.display());
    }
}

#[test]
fn golden_line_chart() {
    let mut chart = LineGraph::new();
    chart.set_size(240, 160).hide_ticks();
    let img = chart
        .render_rgba(&[
            LineData::new([(0.0, 0.0), (1.0, 1.0), (2.0, 0.0), (3.0, 1.5), (4.0, 1.0)]),
            LineData::new([(0.0, 1.0), (4.0, 0.5)]).with_color("orange"),
        ])
        .expect("render line chart");
    assert_eq!(img.dimensions(), (240, 160));
    // Something besides the white face and panel got painted.
    assert!(count(&img, [255, 255, 255, 255]) < 240 * 160);
    check("line_chart.png", img);
}

#[test]
fn golden_bar_chart() {
    let mut chart = Bar::new();
    chart.set_size(240, 160).hide_ticks();
    chart.set_bg_color("whitesmoke", 1.0).unwrap();
    let img = chart
        .render_rgba(&[BarData::new([(1, 3), (2, 5), (3, 2), (4, 4)]).with_color("teal")])
        .expect("render bar chart");
    assert_eq!(img.dimensions(), (240, 160));
    assert!(count(&img, [0, 128, 128, 255]) > 100, "bar interiors are solid teal");
    assert!(count(&img, [245, 245, 245, 255]) > 100, "panel background shows around the bars");
    check("bar_chart.png", img);
}
