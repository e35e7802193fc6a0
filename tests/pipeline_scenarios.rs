//! End-to-end pipeline scenarios.
//!
//! Each test drives the public API from dataset to panel, layout or SVG
//! document, the way a slide example does.

#![allow(clippy::unwrap_used, clippy::float_cmp)]

use std::sync::Arc;

use approx::assert_relative_eq;
use figure_grammar::grammar::{resolve, Mark};
use figure_grammar::prelude::*;

fn mpg() -> Arc<Dataset> {
    DatasetProvider::new().load("mpg").unwrap()
}

// ============================================================================
// Rendering scenarios
// ============================================================================

/// Three records, point geometry: three marks at the record coordinates.
#[test]
fn scenario_points_at_record_coordinates() {
    let data = Dataset::builder().numeric("x", &[3.0, 1.0, 5.0]).numeric("y", &[2.0, 4.0, 6.0]).build().unwrap();
    let panel = (Figure::new(data) + Aes::new().x("x").y("y") + Geom::point()).render().unwrap();

    let coords: Vec<(f32, f32)> = panel.marks().flat_map(Mark::coordinates).collect();
    assert_eq!(coords, vec![(3.0, 2.0), (1.0, 4.0), (5.0, 6.0)]);
}

/// Bar geometry without an explicit statistic counts records per category.
#[test]
fn scenario_bar_counts_categories() {
    let data = Dataset::builder().categorical("category", &["a", "a", "b"]).build().unwrap();
    let panel = (Figure::new(data) + Aes::new().x("category") + Geom::bar()).render().unwrap();

    let heights: Vec<f32> = panel.marks().filter_map(Mark::height).collect();
    assert_eq!(heights.len(), 2);
    assert_relative_eq!(heights[0], 2.0);
    assert_relative_eq!(heights[1], 1.0);
}

/// A point layer without `y` names the missing channel.
#[test]
fn scenario_missing_y_is_reported() {
    let data = Dataset::from_xy(&[1.0], &[2.0]);
    let err = resolve(&Geom::point(), &Aes::new().x("x"), &data).unwrap_err();
    match err {
        Error::MissingRequiredChannel { channels } => assert_eq!(channels, vec!["y".to_string()]),
        other => panic!("unexpected error: {other}"),
    }
}

/// Four panels do not fit a three-cell template.
#[test]
fn scenario_more_panels_than_template_cells() {
    let panel = (Figure::new(mpg()) + Aes::new().x("displ").y("hwy") + Geom::point()).render().unwrap();
    let spec = LayoutSpec::new().grid(Grid::template("abc").unwrap());
    let err = compose(vec![panel.clone(), panel.clone(), panel.clone(), panel], &spec).unwrap_err();
    assert!(matches!(err, Error::LayoutPanelCountMismatch { panels: 4, cells: 3 }));
}

#[test]
fn empty_dataset_renders_empty_panel() {
    let data = Dataset::from_xy(&[], &[]);
    for geom in [Geom::point(), Geom::line(), Geom::area()] {
        let panel = (Figure::new(data.clone()) + Aes::new().x("x").y("y") + geom).render().unwrap();
        assert!(panel.is_empty());
    }
}

// ============================================================================
// Dataset provider
// ============================================================================

#[test]
fn load_is_memoized_and_deterministic() {
    let provider = DatasetProvider::new();
    let first = provider.load("economics").unwrap();
    let second = provider.load("economics").unwrap();
    assert!(Arc::ptr_eq(&first, &second));

    let other = DatasetProvider::new().load("economics").unwrap();
    assert_eq!(first.schema(), other.schema());
    assert_eq!(first.nrow(), other.nrow());
}

#[test]
fn unknown_dataset_is_not_found() {
    assert!(matches!(DatasetProvider::new().load("titanic"), Err(Error::DatasetNotFound(_))));
}

#[test]
fn csv_directory_feeds_figures() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("sales.csv"), "region,revenue\nnorth,12\nsouth,7\nnorth,3\n").unwrap();

    let provider = DatasetProvider::new().with_directory(dir.path());
    let figure = Figure::from_dataset(&provider, "sales").unwrap()
        + Aes::new().x("region").y("revenue")
        + Geom::col();
    let panel = figure.render().unwrap();

    let heights: Vec<f32> = panel.marks().filter_map(Mark::height).collect();
    assert_eq!(heights.len(), 2);
    assert_relative_eq!(heights[0], 15.0);
    assert_relative_eq!(heights[1], 7.0);
}

// ============================================================================
// Layout composition
// ============================================================================

#[test]
fn composed_cells_return_panels_unchanged() {
    let base = Figure::new(mpg()) + Aes::new().x("displ").y("hwy");
    let panels = vec![
        (base.clone() + Geom::point()).render().unwrap(),
        (base.clone() + Geom::line()).render().unwrap(),
        (Figure::new(mpg()) + Aes::new().x("class") + Geom::bar()).render().unwrap(),
    ];

    let spec = LayoutSpec::new().grid(Grid::template("aab\nc#b").unwrap());
    let layout = compose(panels.clone(), &spec).unwrap();

    for (i, panel) in panels.iter().enumerate() {
        assert_eq!(layout.panel(i), Some(panel));
    }
    assert_eq!(layout.panel_for('b'), Some(&panels[1]));
    assert_eq!(layout.cell(0, 1).and_then(|c| c.panel.as_ref()), Some(&panels[0]));
    assert!(layout.cell(1, 1).and_then(|c| c.panel.as_ref()).is_none());
}

#[test]
fn explicit_claims_and_tags() {
    let panel = (Figure::new(mpg()) + Aes::new().x("displ").y("hwy") + Geom::point()).render().unwrap();
    let titled = panel.clone().with_title("claimed");
    let spec = LayoutSpec::new()
        .grid(Grid::Dims { rows: 1, cols: 2 })
        .tags(Tags::Sequential { style: TagStyle::Roman, prefix: "(".into(), suffix: ")".into() });

    let items = vec![LayoutItem::new(panel), LayoutItem::at(titled, CellRef::Position { row: 0, col: 0 })];
    let layout = compose(items, &spec).unwrap();

    assert_eq!(layout.cell(0, 0).and_then(|c| c.panel.as_ref()).and_then(Panel::title), Some("claimed"));
    assert_eq!(layout.tag_for(1), Some("(I)"));
    assert_eq!(layout.tag_for(0), Some("(II)"));
}

#[test]
fn conflicting_claims_are_rejected() {
    let panel = (Figure::new(mpg()) + Aes::new().x("displ").y("hwy") + Geom::point()).render().unwrap();
    let items = vec![
        LayoutItem::at(panel.clone(), CellRef::Named('a')),
        LayoutItem::at(panel, CellRef::Named('a')),
    ];
    let spec = LayoutSpec::new().grid(Grid::template("ab").unwrap());
    assert!(matches!(compose(items, &spec), Err(Error::LayoutCellConflict { .. })));
}

#[test]
fn facets_compose_into_layout() {
    let figure = Figure::new(mpg())
        + Aes::new().x("displ").y("hwy").color("class")
        + Geom::point()
        + Facet::wrap("drv").ncol(2);
    let layout = figure.render_layout(&LayoutSpec::new()).unwrap();

    assert_eq!(layout.cols(), 2);
    assert_eq!(layout.panel_count(), mpg().levels("drv").len());
    assert_eq!(layout.guides().len(), 1);
}

// ============================================================================
// Configuration and SVG handoff
// ============================================================================

#[test]
fn configured_svg_written_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("render.yaml");
    std::fs::write(
        &config_path,
        "width: 320\nheight: 240\ntheme: minimal\nlayout:\n  grid:\n    dims: { rows: 1, cols: 2 }\n  tags:\n    sequential: { style: upper_alpha }\n",
    )
    .unwrap();
    let config = RenderConfig::load(Some(&config_path)).unwrap();

    let data = config.provider().load("faithful").unwrap();
    let figure = Figure::new(data) + Aes::new().x("eruptions").y("waiting") + config.theme().unwrap();
    let panels = vec![
        (figure.clone() + Geom::point()).renderer(config.renderer()).render().unwrap(),
        (figure + Geom::line()).render().unwrap(),
    ];
    let layout = compose(panels, &config.layout).unwrap();

    let out = dir.path().join("figure.svg");
    let encoder = SvgEncoder::from_config(&config).unwrap();
    encoder.write_layout(&layout, &out).unwrap();

    let svg = std::fs::read_to_string(&out).unwrap();
    assert!(svg.contains(r#"width="640""#));
    assert!(svg.contains(">A</text>"));
    assert!(svg.contains(">B</text>"));
    assert!(svg.contains("<polyline"));
}
