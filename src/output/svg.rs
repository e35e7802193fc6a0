//! SVG handoff encoder.
//!
//! Serializes a rendered [`Panel`] or a composed [`Layout`] into a standalone
//! SVG document. Marks are placed with linear scales over the panel axes;
//! the [`Theme`] decides everything that is not data.

use std::fmt::Write as FmtWrite;
use std::fs::File;
use std::io::Write;
use std::path::Path;

use log::debug;

use crate::color::Rgba;
use crate::compose::{GuideCollection, Layout};
use crate::config::RenderConfig;
use crate::error::Result;
use crate::grammar::{Axis, Guide, LegendKey, Mark, Panel, PointShape, Theme};
use crate::scale::{LinearScale, Scale};

const LEGEND_WIDTH: f32 = 120.0;
const LEGEND_ROW: f32 = 18.0;
const AXIS_EXPANSION: f32 = 0.05;

/// One primitive SVG element.
///
/// Field names follow the SVG attribute names.
#[derive(Debug, Clone, PartialEq)]
#[allow(missing_docs)]
pub enum SvgElement {
    /// Rectangle.
    Rect { x: f32, y: f32, width: f32, height: f32, fill: Rgba, stroke: Option<Rgba> },
    /// Circle.
    Circle { cx: f32, cy: f32, r: f32, fill: Rgba },
    /// Straight line segment.
    Line { x1: f32, y1: f32, x2: f32, y2: f32, stroke: Rgba, stroke_width: f32 },
    /// Open polyline.
    Polyline { points: Vec<(f32, f32)>, stroke: Rgba, stroke_width: f32 },
    /// Closed filled polygon.
    Polygon { points: Vec<(f32, f32)>, fill: Rgba, stroke: Option<Rgba> },
    /// Text.
    Text { x: f32, y: f32, text: String, font_size: f32, fill: Rgba, anchor: TextAnchor },
}

/// Horizontal alignment of text relative to its position.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TextAnchor {
    /// Text starts at the position.
    #[default]
    Start,
    /// Text is centered on the position.
    Middle,
    /// Text ends at the position.
    End,
}

impl TextAnchor {
    fn as_str(self) -> &'static str {
        match self {
            TextAnchor::Start => "start",
            TextAnchor::Middle => "middle",
            TextAnchor::End => "end",
        }
    }
}

/// Pixel rectangle a panel is drawn into.
#[derive(Debug, Clone, Copy)]
struct Region {
    x: f32,
    y: f32,
    width: f32,
    height: f32,
}

/// Encodes panels and layouts as SVG.
#[derive(Debug, Clone)]
pub struct SvgEncoder {
    width: u32,
    height: u32,
    theme: Theme,
}

impl Default for SvgEncoder {
    fn default() -> Self {
        let config = RenderConfig::default();
        Self::new(config.width, config.height)
    }
}

impl SvgEncoder {
    /// An encoder drawing each panel at `width` x `height` pixels.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width: width.max(1), height: height.max(1), theme: Theme::default() }
    }

    /// An encoder using the configured panel size and theme.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Config`] if the configured theme is unknown.
    pub fn from_config(config: &RenderConfig) -> Result<Self> {
        Ok(Self::new(config.width, config.height).theme(config.theme()?))
    }

    /// Set the theme.
    #[must_use]
    pub fn theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Encode a single panel, with its own legends.
    #[must_use]
    pub fn encode_panel(&self, panel: &Panel) -> String {
        let legend = if panel.guides().is_empty() { 0.0 } else { LEGEND_WIDTH };
        let width = self.width as f32 + legend;
        let height = self.height as f32;

        let mut elements = Vec::new();
        let region = Region { x: 0.0, y: 0.0, width: self.width as f32, height };
        self.draw_panel(&mut elements, panel, region);
        self.draw_legends(&mut elements, panel.guides(), self.width as f32, 0.0);
        debug!("encoded panel with {} marks into {} svg elements", panel.mark_count(), elements.len());
        self.document(width, height, &elements)
    }

    /// Encode a layout. Each cell gets `width * col_span` by
    /// `height * row_span` pixels; merged legends are drawn once at the right.
    #[must_use]
    pub fn encode_layout(&self, layout: &Layout) -> String {
        let merged = layout.guide_collection() == GuideCollection::Merge;
        let legend = if merged && !layout.guides().is_empty() { LEGEND_WIDTH } else { 0.0 };
        let (cell_w, cell_h) = (self.width as f32, self.height as f32);
        let width = cell_w * layout.cols() as f32 + legend;
        let height = cell_h * layout.rows() as f32;

        let mut elements = Vec::new();
        for cell in layout.cells() {
            let region = Region {
                x: cell.area.col as f32 * cell_w,
                y: cell.area.row as f32 * cell_h,
                width: cell.area.col_span as f32 * cell_w,
                height: cell.area.row_span as f32 * cell_h,
            };
            let Some(panel) = &cell.panel else { continue };

            if merged || panel.guides().is_empty() {
                self.draw_panel(&mut elements, panel, region);
            } else {
                let inner = Region { width: (region.width - LEGEND_WIDTH).max(1.0), ..region };
                self.draw_panel(&mut elements, panel, inner);
                self.draw_legends(&mut elements, panel.guides(), inner.x + inner.width, region.y);
            }

            if let Some(tag) = &cell.tag {
                elements.push(SvgElement::Text {
                    x: region.x + 6.0,
                    y: region.y + self.theme.base_size * 1.4,
                    text: tag.clone(),
                    font_size: self.theme.base_size * 1.2,
                    fill: self.theme.text_color,
                    anchor: TextAnchor::Start,
                });
            }
        }
        if merged {
            self.draw_legends(&mut elements, layout.guides(), cell_w * layout.cols() as f32, 0.0);
        }
        debug!(
            "encoded {}x{} layout with {} panels into {} svg elements",
            layout.rows(),
            layout.cols(),
            layout.panel_count(),
            elements.len()
        );
        self.document(width, height, &elements)
    }

    /// Write a panel as an SVG file.
    ///
    /// # Errors
    ///
    /// Returns an error if file writing fails.
    pub fn write_panel<P: AsRef<Path>>(&self, panel: &Panel, path: P) -> Result<()> {
        write_file(path.as_ref(), &self.encode_panel(panel))
    }

    /// Write a layout as an SVG file.
    ///
    /// # Errors
    ///
    /// Returns an error if file writing fails.
    pub fn write_layout<P: AsRef<Path>>(&self, layout: &Layout, path: P) -> Result<()> {
        write_file(path.as_ref(), &self.encode_layout(layout))
    }

    fn document(&self, width: f32, height: f32, elements: &[SvgElement]) -> String {
        let mut svg = String::with_capacity(4096 + elements.len() * 96);
        let (w, h) = (num(width), num(height));
        let _ = writeln!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#
        );
        let _ = writeln!(
            svg,
            r#"  <rect width="100%" height="100%" fill="{}"/>"#,
            css(self.theme.background)
        );
        for element in elements {
            let _ = writeln!(svg, "  {}", element_to_svg(element));
        }
        svg.push_str("</svg>\n");
        svg
    }

    fn draw_panel(&self, out: &mut Vec<SvgElement>, panel: &Panel, region: Region) {
        let theme = &self.theme;
        let margin = theme.margin as f32;
        let title_height = if panel.title().is_some() { theme.base_size * 1.8 } else { 0.0 };

        if let Some(title) = panel.title() {
            out.push(SvgElement::Rect {
                x: region.x + margin,
                y: region.y,
                width: (region.width - margin * 1.5).max(1.0),
                height: title_height,
                fill: theme.strip_background,
                stroke: None,
            });
            out.push(SvgElement::Text {
                x: region.x + margin + (region.width - margin * 1.5) / 2.0,
                y: region.y + title_height * 0.7,
                text: title.to_string(),
                font_size: theme.base_size,
                fill: theme.text_color,
                anchor: TextAnchor::Middle,
            });
        }

        let left = region.x + margin;
        let right = (region.x + region.width - margin * 0.5).max(left + 1.0);
        let top = region.y + title_height + margin * 0.25;
        let bottom = (region.y + region.height - margin).max(top + 1.0);

        out.push(SvgElement::Rect {
            x: left,
            y: top,
            width: right - left,
            height: bottom - top,
            fill: theme.panel_background,
            stroke: theme.panel_border,
        });

        let x_limits = expanded(panel.x_axis());
        let y_limits = expanded(panel.y_axis());
        let xs = LinearScale::padded(x_limits, (left, right));
        let ys = LinearScale::padded(y_limits, (bottom, top));

        let x_ticks = ticks(panel.x_axis(), xs.domain());
        let y_ticks = ticks(panel.y_axis(), ys.domain());

        if let Some(grid) = theme.grid {
            for (value, _) in &x_ticks {
                let x = xs.scale(*value);
                out.push(line(x, top, x, bottom, grid, 1.0));
            }
            for (value, _) in &y_ticks {
                let y = ys.scale(*value);
                out.push(line(left, y, right, y, grid, 1.0));
            }
        }

        for mark in panel.marks() {
            draw_mark(out, mark, &xs, &ys);
        }

        if let Some(axis) = theme.axis_line {
            out.push(line(left, bottom, right, bottom, axis, 1.0));
            out.push(line(left, top, left, bottom, axis, 1.0));
        }

        if theme.show_axis_text {
            let size = theme.base_size * 0.8;
            for (value, label) in &x_ticks {
                out.push(text(xs.scale(*value), bottom + size + 4.0, label, size, theme.text_color, TextAnchor::Middle));
            }
            for (value, label) in &y_ticks {
                out.push(text(left - 4.0, ys.scale(*value) + size * 0.35, label, size, theme.text_color, TextAnchor::End));
            }
            if let Some(label) = panel.x_label() {
                let y = (region.y + region.height - 4.0).max(bottom + size * 2.0);
                out.push(text((left + right) / 2.0, y, label, theme.base_size, theme.text_color, TextAnchor::Middle));
            }
            if let Some(label) = panel.y_label() {
                out.push(text(region.x + 4.0, top - 4.0, label, theme.base_size, theme.text_color, TextAnchor::Start));
            }
        }
    }

    fn draw_legends(&self, out: &mut Vec<SvgElement>, guides: &[Guide], x: f32, y: f32) {
        let theme = &self.theme;
        let mut cursor = y + self.theme.margin as f32 * 0.5;
        for guide in guides {
            cursor += LEGEND_ROW;
            out.push(text(x + 10.0, cursor, &guide.title, theme.base_size, theme.text_color, TextAnchor::Start));
            for entry in &guide.entries {
                cursor += LEGEND_ROW;
                let (cx, cy) = (x + 18.0, cursor - theme.base_size * 0.35);
                match &entry.key {
                    LegendKey::Color(color) => out.push(SvgElement::Rect {
                        x: cx - 6.0,
                        y: cy - 6.0,
                        width: 12.0,
                        height: 12.0,
                        fill: *color,
                        stroke: None,
                    }),
                    LegendKey::Shape(shape) => draw_symbol(out, *shape, cx, cy, 8.0, theme.text_color),
                    LegendKey::Size(size) => draw_symbol(out, PointShape::Circle, cx, cy, *size, theme.text_color),
                }
                out.push(text(x + 30.0, cursor, &entry.label, theme.base_size * 0.8, theme.text_color, TextAnchor::Start));
            }
            cursor += LEGEND_ROW * 0.5;
        }
    }
}

fn write_file(path: &Path, svg: &str) -> Result<()> {
    let mut file = File::create(path)?;
    file.write_all(svg.as_bytes())?;
    debug!("wrote {} bytes of svg to {}", svg.len(), path.display());
    Ok(())
}

/// Axis limits widened by 5% each side; discrete limits are kept as is.
fn expanded(axis: &Axis) -> (f32, f32) {
    match axis {
        Axis::Empty => (0.0, 1.0),
        Axis::Discrete { .. } => axis.limits().unwrap_or((0.0, 1.0)),
        Axis::Continuous { min, max } => {
            let pad = (max - min) * AXIS_EXPANSION;
            (min - pad, max + pad)
        }
    }
}

/// Tick positions and labels. Discrete axes tick every level.
fn ticks(axis: &Axis, domain: (f32, f32)) -> Vec<(f32, String)> {
    match axis {
        Axis::Empty => Vec::new(),
        Axis::Discrete { levels } => {
            levels.iter().enumerate().map(|(i, level)| ((i + 1) as f32, level.clone())).collect()
        }
        Axis::Continuous { .. } => nice_ticks(domain.0, domain.1, 5).into_iter().map(|v| (v, num(v))).collect(),
    }
}

/// Round tick values (1, 2 or 5 times a power of ten) inside `[lo, hi]`.
fn nice_ticks(lo: f32, hi: f32, target: usize) -> Vec<f32> {
    let span = hi - lo;
    if !span.is_finite() || span <= 0.0 {
        return Vec::new();
    }
    let raw = span / target.max(1) as f32;
    let magnitude = 10f32.powf(raw.log10().floor());
    let step = [1.0, 2.0, 5.0, 10.0]
        .into_iter()
        .map(|m| m * magnitude)
        .find(|s| *s >= raw)
        .unwrap_or(magnitude * 10.0);

    let first = (lo / step).ceil() as i64;
    let last = (hi / step).floor() as i64;
    (first..=last).map(|i| i as f32 * step).collect()
}

fn draw_mark(out: &mut Vec<SvgElement>, mark: &Mark, xs: &LinearScale, ys: &LinearScale) {
    let at = |(x, y): (f32, f32)| (xs.scale(x), ys.scale(y));
    match mark {
        Mark::Point { x, y, color, shape, size } => {
            let (px, py) = at((*x, *y));
            draw_symbol(out, *shape, px, py, *size, *color);
        }
        Mark::Text { x, y, text: label, color, size, boxed } => {
            let (px, py) = at((*x, *y));
            if *boxed {
                let width = label.chars().count() as f32 * size * 0.6 + 6.0;
                out.push(SvgElement::Rect {
                    x: px - width / 2.0,
                    y: py - size * 0.9,
                    width,
                    height: size * 1.3,
                    fill: Rgba::WHITE,
                    stroke: Some(*color),
                });
            }
            out.push(text(px, py, label, *size, *color, TextAnchor::Middle));
        }
        Mark::Path { points, color, width } => out.push(SvgElement::Polyline {
            points: points.iter().copied().map(at).collect(),
            stroke: *color,
            stroke_width: *width,
        }),
        Mark::Rect { xmin, xmax, ymin, ymax, fill, outline } => {
            let (x0, y0) = at((*xmin, *ymax));
            let (x1, y1) = at((*xmax, *ymin));
            out.push(SvgElement::Rect {
                x: x0.min(x1),
                y: y0.min(y1),
                width: (x1 - x0).abs(),
                height: (y1 - y0).abs(),
                fill: *fill,
                stroke: *outline,
            });
        }
        Mark::Polygon { points, fill, outline } => out.push(SvgElement::Polygon {
            points: points.iter().copied().map(at).collect(),
            fill: *fill,
            stroke: *outline,
        }),
    }
}

/// Draw a point symbol of diameter `size` centered on `(cx, cy)`.
fn draw_symbol(out: &mut Vec<SvgElement>, shape: PointShape, cx: f32, cy: f32, size: f32, color: Rgba) {
    let r = size / 2.0;
    match shape {
        PointShape::Circle => out.push(SvgElement::Circle { cx, cy, r, fill: color }),
        PointShape::Square => out.push(SvgElement::Rect {
            x: cx - r,
            y: cy - r,
            width: size,
            height: size,
            fill: color,
            stroke: None,
        }),
        PointShape::Triangle => out.push(SvgElement::Polygon {
            points: vec![(cx, cy - r), (cx + r, cy + r), (cx - r, cy + r)],
            fill: color,
            stroke: None,
        }),
        PointShape::Diamond => out.push(SvgElement::Polygon {
            points: vec![(cx, cy - r), (cx + r, cy), (cx, cy + r), (cx - r, cy)],
            fill: color,
            stroke: None,
        }),
        PointShape::Cross => {
            out.push(line(cx - r, cy, cx + r, cy, color, 1.5));
            out.push(line(cx, cy - r, cx, cy + r, color, 1.5));
        }
        PointShape::X => {
            out.push(line(cx - r, cy - r, cx + r, cy + r, color, 1.5));
            out.push(line(cx - r, cy + r, cx + r, cy - r, color, 1.5));
        }
    }
}

fn line(x1: f32, y1: f32, x2: f32, y2: f32, stroke: Rgba, stroke_width: f32) -> SvgElement {
    SvgElement::Line { x1, y1, x2, y2, stroke, stroke_width }
}

fn text(x: f32, y: f32, text: &str, font_size: f32, fill: Rgba, anchor: TextAnchor) -> SvgElement {
    SvgElement::Text { x, y, text: text.to_string(), font_size, fill, anchor }
}

/// Compact number formatting: at most two decimals, no trailing zeros.
fn num(value: f32) -> String {
    let s = format!("{value:.2}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" { "0".to_string() } else { s.to_string() }
}

/// CSS color; alpha only when not opaque.
fn css(color: Rgba) -> String {
    if color.a == 255 {
        format!("rgb({},{},{})", color.r, color.g, color.b)
    } else {
        format!("rgba({},{},{},{:.3})", color.r, color.g, color.b, color.opacity())
    }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;").replace('"', "&quot;")
}

fn points_attr(points: &[(f32, f32)]) -> String {
    points.iter().map(|(x, y)| format!("{},{}", num(*x), num(*y))).collect::<Vec<_>>().join(" ")
}

fn stroke_attr(stroke: Option<Rgba>) -> String {
    stroke.map(|s| format!(r#" stroke="{}" stroke-width="1""#, css(s))).unwrap_or_default()
}

fn element_to_svg(element: &SvgElement) -> String {
    match element {
        SvgElement::Rect { x, y, width, height, fill, stroke } => format!(
            r#"<rect x="{}" y="{}" width="{}" height="{}" fill="{}"{}/>"#,
            num(*x),
            num(*y),
            num(*width),
            num(*height),
            css(*fill),
            stroke_attr(*stroke)
        ),
        SvgElement::Circle { cx, cy, r, fill } => format!(
            r#"<circle cx="{}" cy="{}" r="{}" fill="{}"/>"#,
            num(*cx),
            num(*cy),
            num(*r),
            css(*fill)
        ),
        SvgElement::Line { x1, y1, x2, y2, stroke, stroke_width } => format!(
            r#"<line x1="{}" y1="{}" x2="{}" y2="{}" stroke="{}" stroke-width="{}"/>"#,
            num(*x1),
            num(*y1),
            num(*x2),
            num(*y2),
            css(*stroke),
            num(*stroke_width)
        ),
        SvgElement::Polyline { points, stroke, stroke_width } => format!(
            r#"<polyline points="{}" fill="none" stroke="{}" stroke-width="{}"/>"#,
            points_attr(points),
            css(*stroke),
            num(*stroke_width)
        ),
        SvgElement::Polygon { points, fill, stroke } => format!(
            r#"<polygon points="{}" fill="{}"{}/>"#,
            points_attr(points),
            css(*fill),
            stroke_attr(*stroke)
        ),
        SvgElement::Text { x, y, text, font_size, fill, anchor } => format!(
            r#"<text x="{}" y="{}" font-size="{}" fill="{}" text-anchor="{}" font-family="sans-serif">{}</text>"#,
            num(*x),
            num(*y),
            num(*font_size),
            css(*fill),
            anchor.as_str(),
            escape(text)
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use crate::compose::{compose, Grid, LayoutSpec, TagStyle, Tags};
    use crate::grammar::{Aes, Dataset, DatasetProvider, Figure, Geom, PanelLayer};

    fn scatter() -> Panel {
        let data = Dataset::from_xy(&[1.0, 2.0, 3.0], &[2.0, 4.0, 8.0]);
        (Figure::new(data) + Aes::new().x("x").y("y") + Geom::point()).render().unwrap()
    }

    #[test]
    fn test_num_formatting() {
        assert_eq!(num(10.0), "10");
        assert_eq!(num(2.5), "2.5");
        assert_eq!(num(1.0 / 3.0), "0.33");
        assert_eq!(num(-0.001), "0");
    }

    #[test]
    fn test_css_alpha() {
        assert_eq!(css(Rgba::RED), "rgb(255,0,0)");
        let translucent = css(Rgba::new(255, 0, 0, 128));
        assert!(translucent.starts_with("rgba("));
        assert!(translucent.contains("0.502"));
    }

    #[test]
    fn test_nice_ticks() {
        assert_eq!(nice_ticks(0.0, 10.0, 5), vec![0.0, 2.0, 4.0, 6.0, 8.0, 10.0]);
        let fine = nice_ticks(0.3, 0.9, 5);
        assert_eq!(fine.len(), 3);
        assert_relative_eq!(fine[0], 0.4, epsilon = 1e-5);
        assert_relative_eq!(fine[2], 0.8, epsilon = 1e-5);
        assert!(nice_ticks(1.0, 1.0, 5).is_empty());
    }

    #[test]
    fn test_discrete_ticks_follow_levels() {
        let axis = Axis::Discrete { levels: vec!["a".into(), "b".into()] };
        let t = ticks(&axis, (0.5, 2.5));
        assert_eq!(t, vec![(1.0, "a".to_string()), (2.0, "b".to_string())]);
    }

    #[test]
    fn test_encode_panel_draws_every_point() {
        let svg = SvgEncoder::new(400, 300).encode_panel(&scatter());
        assert!(svg.starts_with("<svg"));
        assert!(svg.trim_end().ends_with("</svg>"));
        assert!(svg.contains(r#"width="400""#));
        assert_eq!(svg.matches("<circle").count(), 3);
        assert!(svg.contains(">x</text>"));
    }

    #[test]
    fn test_points_inside_plot_area() {
        let panel = scatter();
        let encoder = SvgEncoder::new(200, 100);
        let mut elements = Vec::new();
        encoder.draw_panel(&mut elements, &panel, Region { x: 0.0, y: 0.0, width: 200.0, height: 100.0 });
        for element in &elements {
            if let SvgElement::Circle { cx, cy, .. } = element {
                assert!((0.0..=200.0).contains(cx));
                assert!((0.0..=100.0).contains(cy));
            }
        }
    }

    #[test]
    fn test_theme_controls_background() {
        let dark = SvgEncoder::new(100, 100).theme(Theme::dark()).encode_panel(&scatter());
        assert!(dark.contains(&css(Theme::dark().background)));
        let void = SvgEncoder::new(100, 100).theme(Theme::void()).encode_panel(&scatter());
        assert!(!void.contains(">x</text>"));
    }

    #[test]
    fn test_text_escaping() {
        let mark = Mark::Text {
            x: 1.0,
            y: 1.0,
            text: "<b>&</b>".to_string(),
            color: Rgba::BLACK,
            size: 11.0,
            boxed: false,
        };
        let panel = Panel::new(
            PanelLayer { geom: "text", marks: vec![mark] },
            Axis::Continuous { min: 0.0, max: 2.0 },
            Axis::Continuous { min: 0.0, max: 2.0 },
        );
        let svg = SvgEncoder::default().encode_panel(&panel);
        assert!(!svg.contains("<b>"));
        assert!(svg.contains("&lt;b&gt;&amp;&lt;/b&gt;"));
    }

    #[test]
    fn test_empty_panel_encodes() {
        let svg = SvgEncoder::default().encode_panel(&Panel::empty());
        assert!(svg.contains("</svg>"));
        assert_eq!(svg.matches("<circle").count(), 0);
    }

    #[test]
    fn test_encode_layout_with_tags() {
        let spec = LayoutSpec::new()
            .grid(Grid::Dims { rows: 1, cols: 2 })
            .tags(Tags::sequential(TagStyle::UpperAlpha));
        let layout = compose(vec![scatter(), scatter()], &spec).unwrap();
        let svg = SvgEncoder::new(200, 150).encode_layout(&layout);
        assert!(svg.contains(r#"width="400""#));
        assert!(svg.contains(r#"height="150""#));
        assert!(svg.contains(">A</text>"));
        assert!(svg.contains(">B</text>"));
        assert_eq!(svg.matches("<circle").count(), 6);
    }

    #[test]
    fn test_merged_legend_drawn_once() {
        let mpg = DatasetProvider::new().load("mpg").unwrap();
        let colored = |geom: Geom| {
            (Figure::new(mpg.clone()) + Aes::new().x("displ").y("hwy").color("drv") + geom).render().unwrap()
        };
        let layout = compose(vec![colored(Geom::point()), colored(Geom::point())], &LayoutSpec::new()).unwrap();
        assert_eq!(layout.guides().len(), 1);
        let svg = SvgEncoder::new(300, 200).encode_layout(&layout);
        assert_eq!(svg.matches(">drv</text>").count(), 1);
    }

    #[test]
    fn test_write_panel_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("panel.svg");
        let encoder = SvgEncoder::from_config(&RenderConfig::default()).unwrap();
        encoder.write_panel(&scatter(), &path).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, encoder.encode_panel(&scatter()));
    }
}
