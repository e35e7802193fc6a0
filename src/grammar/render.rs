//! Geometry rendering.
//!
//! Turns a [`ResolvedMapping`] and its [`Dataset`] into a [`Panel`] of marks
//! in data coordinates. Every geometry variant has exactly one rendering rule.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use log::{debug, trace};

use super::aes::{Channel, Constant};
use super::data::{DataValue, Dataset};
use super::geom::{GeomType, PointShape, Position};
use super::panel::{Axis, Guide, LegendEntry, LegendKey, Mark, Panel, PanelLayer};
use super::resolve::{ResolvedChannel, ResolvedMapping};
use super::stat::{DensityEstimator, Stat};
use crate::color::{hue_palette, Rgba};
use crate::error::{Error, Result};
use crate::scale::{extent, ColorScale, DiscreteScale, LinearScale, PositionScale, Scale};

/// Color of records whose mapped value is missing.
const NA_COLOR: Rgba = Rgba::rgb(127, 127, 127);
/// Default stroke of contour lines.
const CONTOUR_COLOR: Rgba = Rgba::rgb(51, 102, 255);
const TEXT_SIZE: f32 = 11.0;
const SIZE_RANGE: (f32, f32) = (1.5, 6.0);
const ALPHA_RANGE: (f32, f32) = (0.1, 1.0);

/// Renders resolved layers into panels.
///
/// Contour layers need a [`DensityEstimator`]; without one they fail with
/// [`Error::StatUnavailable`].
#[derive(Debug, Clone)]
pub struct Renderer {
    estimator: Option<Arc<dyn DensityEstimator>>,
    point_size: f32,
}

impl Default for Renderer {
    fn default() -> Self {
        Self { estimator: None, point_size: 3.0 }
    }
}

impl Renderer {
    /// A renderer with default point size and no density estimator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `estimator` for contour layers.
    #[must_use]
    pub fn with_estimator(mut self, estimator: Arc<dyn DensityEstimator>) -> Self {
        self.estimator = Some(estimator);
        self
    }

    /// Point diameter used when size is not mapped.
    #[must_use]
    pub fn with_point_size(mut self, size: f32) -> Self {
        self.point_size = size;
        self
    }

    /// Render one layer.
    ///
    /// A dataset with no records renders to an empty panel.
    pub fn render(&self, mapping: &ResolvedMapping, dataset: &Dataset) -> Result<Panel> {
        let shared = SharedLevels::collect(std::slice::from_ref(mapping), dataset);
        self.render_with(mapping, dataset, &shared)
    }

    /// Render layers over one dataset onto a single panel, in order.
    ///
    /// Discrete x and y positions come from the union of every layer's
    /// levels, so a level sits at the same coordinate in all layers.
    pub fn render_layers(&self, mappings: &[ResolvedMapping], dataset: &Dataset) -> Result<Panel> {
        let shared = SharedLevels::collect(mappings, dataset);
        mappings.iter().try_fold(Panel::empty(), |panel, mapping| {
            Ok(panel.overlay(self.render_with(mapping, dataset, &shared)?))
        })
    }

    fn render_with(&self, mapping: &ResolvedMapping, dataset: &Dataset, shared: &SharedLevels) -> Result<Panel> {
        let geom = mapping.geom();
        let name = geom.geom_type.name();
        if dataset.is_empty() {
            debug!("{name} layer has no records; rendering an empty panel");
            return Ok(Panel::empty());
        }

        let layer = LayerData::new(mapping, dataset, shared, self.point_size);
        let marks = match &geom.geom_type {
            GeomType::Point { shape } => layer.points(*shape),
            GeomType::Text => layer.text(false),
            GeomType::Label => layer.text(true),
            GeomType::Line { width } => layer.lines(*width, Connect::XOrder),
            GeomType::Path { width } => layer.lines(*width, Connect::RecordOrder),
            GeomType::Step { width } => layer.lines(*width, Connect::Stairs),
            GeomType::Bar { width } | GeomType::Col { width } => {
                layer.bars(*width, geom.stat, geom.position)?
            }
            GeomType::Area { alpha } => layer.areas(*alpha, geom.position),
            GeomType::Ribbon { alpha } => layer.ribbons(*alpha),
            GeomType::Contour { bins } => {
                let estimator = self.estimator.as_deref().ok_or_else(|| {
                    Error::StatUnavailable("contour layers need a density estimator".to_string())
                })?;
                layer.contours(estimator, *bins)?
            }
        };

        let (xs, ys): (Vec<f32>, Vec<f32>) = marks.iter().flat_map(Mark::coordinates).unzip();
        let x_axis = layer.x.axis(&xs);
        let y_axis = layer.y.axis(&ys);
        debug!("rendered {name} layer: {} marks", marks.len());

        Ok(Panel::new(PanelLayer { geom: name, marks }, x_axis, y_axis)
            .with_labels(layer.x_title(), layer.y_title())
            .with_guides(layer.guides()))
    }
}

/// Render one layer with a default [`Renderer`].
pub fn render(mapping: &ResolvedMapping, dataset: &Dataset) -> Result<Panel> {
    Renderer::default().render(mapping, dataset)
}

/// Discrete x and y levels shared by the layers of one panel.
#[derive(Debug, Default)]
struct SharedLevels {
    x: Option<DiscreteScale>,
    y: Option<DiscreteScale>,
}

impl SharedLevels {
    fn collect(mappings: &[ResolvedMapping], dataset: &Dataset) -> Self {
        Self { x: union_levels(mappings, dataset, Channel::X), y: union_levels(mappings, dataset, Channel::Y) }
    }

    fn get(&self, channel: Channel) -> Option<&DiscreteScale> {
        match channel {
            Channel::X => self.x.as_ref(),
            Channel::Y => self.y.as_ref(),
            _ => None,
        }
    }
}

/// Levels a channel takes across layers, in first-seen order. `None` when
/// no layer puts discrete data on the channel.
fn union_levels(mappings: &[ResolvedMapping], dataset: &Dataset, channel: Channel) -> Option<DiscreteScale> {
    let mut shared: Option<DiscreteScale> = None;
    for mapping in mappings {
        let levels = match mapping.get(channel) {
            Some(ResolvedChannel::Variable { name, kind }) if kind.is_discrete() => dataset.levels(name),
            Some(ResolvedChannel::Constant(Constant::Text(t))) => vec![t.clone()],
            _ => continue,
        };
        shared.get_or_insert_with(DiscreteScale::default).extend(levels);
    }
    shared
}

/// How a position channel is read per record.
enum Locator<'a> {
    Mapped { values: &'a [DataValue], scale: PositionScale },
    Fixed(f32),
    Level { value: DataValue, scale: DiscreteScale },
    Unmapped,
}

impl<'a> Locator<'a> {
    fn new(
        mapping: &ResolvedMapping,
        dataset: &'a Dataset,
        channel: Channel,
        shared: Option<&DiscreteScale>,
    ) -> Self {
        match mapping.get(channel) {
            Some(ResolvedChannel::Variable { name, kind }) => match dataset.get(name) {
                Some(values) => {
                    let scale = match shared {
                        Some(levels) if kind.is_discrete() => PositionScale::Discrete(levels.clone()),
                        _ => PositionScale::for_variable(dataset, name, *kind),
                    };
                    Locator::Mapped { values, scale }
                }
                None => Locator::Unmapped,
            },
            Some(ResolvedChannel::Constant(Constant::Number(v))) => Locator::Fixed(*v),
            Some(ResolvedChannel::Constant(Constant::Text(t))) => Locator::Level {
                value: DataValue::Text(t.clone()),
                scale: shared.cloned().unwrap_or_else(|| DiscreteScale::new(vec![t.clone()])),
            },
            _ => Locator::Unmapped,
        }
    }

    fn at(&self, row: usize) -> Option<f32> {
        match self {
            Locator::Mapped { values, scale } => values.get(row).and_then(|v| scale.map(v)),
            Locator::Fixed(v) => Some(*v),
            Locator::Level { value, scale } => scale.position(value),
            Locator::Unmapped => None,
        }
    }

    fn is_discrete(&self) -> bool {
        matches!(
            self,
            Locator::Level { .. } | Locator::Mapped { scale: PositionScale::Discrete(_), .. }
        )
    }

    fn axis(&self, coords: &[f32]) -> Axis {
        match self {
            Locator::Mapped { scale: PositionScale::Discrete(scale), .. } | Locator::Level { scale, .. } => {
                Axis::Discrete { levels: scale.levels().to_vec() }
            }
            _ => Axis::spanning(coords),
        }
    }
}

/// Per-record values of one non-position channel, plus its legend.
struct Encoding<T> {
    values: Vec<T>,
    guide: Option<Guide>,
}

impl<T: Clone> Encoding<T> {
    fn constant(value: T, rows: usize) -> Self {
        Self { values: vec![value; rows], guide: None }
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Connect {
    XOrder,
    RecordOrder,
    Stairs,
}

/// A resolved layer with its encodings computed once.
struct LayerData<'a> {
    mapping: &'a ResolvedMapping,
    dataset: &'a Dataset,
    rows: usize,
    x: Locator<'a>,
    y: Locator<'a>,
    color: Option<Encoding<Rgba>>,
    fill: Option<Encoding<Rgba>>,
    shape: Option<Encoding<PointShape>>,
    size: Option<Encoding<f32>>,
    alpha: Option<Vec<f32>>,
    point_size: f32,
}

impl<'a> LayerData<'a> {
    fn new(mapping: &'a ResolvedMapping, dataset: &'a Dataset, shared: &SharedLevels, point_size: f32) -> Self {
        let mut layer = Self {
            mapping,
            dataset,
            rows: dataset.nrow(),
            x: Locator::new(mapping, dataset, Channel::X, shared.get(Channel::X)),
            y: Locator::new(mapping, dataset, Channel::Y, shared.get(Channel::Y)),
            color: None,
            fill: None,
            shape: None,
            size: None,
            alpha: None,
            point_size,
        };
        layer.color = layer.encode_color(Channel::Color);
        layer.fill = layer.encode_color(Channel::Fill);
        layer.shape = layer.encode_shape();
        layer.size = layer.encode_size();
        layer.alpha = layer.encode_alpha();
        layer
    }

    fn column(&self, channel: Channel) -> Option<(&'a str, &'a [DataValue])> {
        let (name, _) = self.mapping.variable(channel)?;
        let (name, values) = self.dataset.column(name).map(|c| (c.name(), c.values()))?;
        Some((name, values))
    }

    fn encode_color(&self, channel: Channel) -> Option<Encoding<Rgba>> {
        if let Some(Constant::Color(c)) = self.mapping.constant(channel) {
            return Some(Encoding::constant(*c, self.rows));
        }
        let (name, values) = self.column(channel)?;
        let (_, kind) = self.mapping.variable(channel)?;

        if kind.is_discrete() {
            let scale = DiscreteScale::from_variable(self.dataset, name);
            let palette = hue_palette(scale.levels().len());
            let values = values
                .iter()
                .map(|v| scale.index_of(v).and_then(|i| palette.get(i).copied()).unwrap_or(NA_COLOR))
                .collect();
            let entries = scale
                .levels()
                .iter()
                .zip(&palette)
                .map(|(level, c)| LegendEntry { label: level.clone(), key: LegendKey::Color(*c) })
                .collect();
            return Some(Encoding { values, guide: Some(guide(channel, name, entries)) });
        }

        let numbers: Vec<f32> = values.iter().filter_map(DataValue::as_f32).collect();
        let (lo, hi) = extent(&numbers).unwrap_or((0.0, 0.0));
        let scale = ColorScale::gradient((lo, hi));
        let values = values.iter().map(|v| v.as_f32().map_or(NA_COLOR, |n| scale.scale(n))).collect();
        let entries = range_entries(lo, hi, |v| LegendKey::Color(scale.scale(v)));
        Some(Encoding { values, guide: Some(guide(channel, name, entries)) })
    }

    fn encode_shape(&self) -> Option<Encoding<PointShape>> {
        if let Some(Constant::Shape(s)) = self.mapping.constant(Channel::Shape) {
            return Some(Encoding::constant(*s, self.rows));
        }
        let (name, values) = self.column(Channel::Shape)?;
        let scale = DiscreteScale::from_variable(self.dataset, name);
        let shape_at = |i: usize| PointShape::PALETTE[i % PointShape::PALETTE.len()];
        let values = values.iter().map(|v| scale.index_of(v).map_or(PointShape::Circle, shape_at)).collect();
        let entries = scale
            .levels()
            .iter()
            .enumerate()
            .map(|(i, level)| LegendEntry { label: level.clone(), key: LegendKey::Shape(shape_at(i)) })
            .collect();
        Some(Encoding { values, guide: Some(guide(Channel::Shape, name, entries)) })
    }

    fn encode_size(&self) -> Option<Encoding<f32>> {
        if let Some(Constant::Number(n)) = self.mapping.constant(Channel::Size) {
            return Some(Encoding::constant(*n, self.rows));
        }
        let (name, values) = self.column(Channel::Size)?;
        let numbers: Vec<f32> = values.iter().filter_map(DataValue::as_f32).collect();
        let (lo, hi) = extent(&numbers).unwrap_or((0.0, 0.0));
        let scale = LinearScale::padded((lo, hi), SIZE_RANGE);
        let values = values.iter().map(|v| v.as_f32().map_or(SIZE_RANGE.0, |n| scale.scale(n))).collect();
        let entries = range_entries(lo, hi, |v| LegendKey::Size(scale.scale(v)));
        Some(Encoding { values, guide: Some(guide(Channel::Size, name, entries)) })
    }

    fn encode_alpha(&self) -> Option<Vec<f32>> {
        if let Some(Constant::Number(n)) = self.mapping.constant(Channel::Alpha) {
            return Some(vec![n.clamp(0.0, 1.0); self.rows]);
        }
        let (_, values) = self.column(Channel::Alpha)?;
        let numbers: Vec<f32> = values.iter().filter_map(DataValue::as_f32).collect();
        let scale = LinearScale::padded(extent(&numbers).unwrap_or((0.0, 0.0)), ALPHA_RANGE);
        Some(values.iter().map(|v| v.as_f32().map_or(1.0, |n| scale.scale(n))).collect())
    }

    fn alpha(&self, row: usize) -> f32 {
        self.alpha.as_ref().and_then(|a| a.get(row).copied()).unwrap_or(1.0)
    }

    fn stroke(&self, row: usize, default: Rgba) -> Rgba {
        let color = pick(self.color.as_ref(), row).unwrap_or(default);
        fade(color, self.alpha(row))
    }

    fn outline(&self, row: usize) -> Option<Rgba> {
        pick(self.color.as_ref(), row)
    }

    fn fill(&self, row: usize, alpha: f32) -> Rgba {
        let color = pick(self.fill.as_ref(), row).unwrap_or(Rgba::GREY35);
        fade(color, alpha * self.alpha(row))
    }

    fn size(&self, row: usize, default: f32) -> f32 {
        pick(self.size.as_ref(), row).unwrap_or(default)
    }

    fn position(&self, row: usize) -> Option<(f32, f32)> {
        match (self.x.at(row), self.y.at(row)) {
            (Some(x), Some(y)) => Some((x, y)),
            _ => {
                trace!("skipping record {row}: missing position");
                None
            }
        }
    }

    /// Record indices split by the discrete group, color and fill variables,
    /// groups in first-appearance order. Missing values form their own group.
    fn groups(&self) -> Vec<Vec<usize>> {
        let keys: Vec<&[DataValue]> = [Channel::Group, Channel::Color, Channel::Fill]
            .into_iter()
            .filter(|c| self.mapping.variable(*c).is_some_and(|(_, kind)| kind.is_discrete()))
            .filter_map(|c| self.column(c).map(|(_, values)| values))
            .collect();

        let mut groups: Vec<Vec<usize>> = Vec::new();
        let mut index: HashMap<Vec<Option<String>>, usize> = HashMap::new();
        for row in 0..self.rows {
            let key: Vec<Option<String>> = keys
                .iter()
                .map(|col| col.get(row).filter(|v| !v.is_null()).map(ToString::to_string))
                .collect();
            let slot = *index.entry(key).or_insert_with(|| {
                groups.push(Vec::new());
                groups.len() - 1
            });
            groups[slot].push(row);
        }
        groups
    }

    fn points(&self, default_shape: PointShape) -> Vec<Mark> {
        (0..self.rows)
            .filter_map(|row| {
                let (x, y) = self.position(row)?;
                Some(Mark::Point {
                    x,
                    y,
                    color: self.stroke(row, Rgba::INK),
                    shape: pick(self.shape.as_ref(), row).unwrap_or(default_shape),
                    size: self.size(row, self.point_size),
                })
            })
            .collect()
    }

    fn label_at(&self, row: usize) -> String {
        match self.mapping.get(Channel::Label) {
            Some(ResolvedChannel::Constant(Constant::Text(t))) => t.clone(),
            Some(ResolvedChannel::Constant(Constant::Number(n))) => n.to_string(),
            _ => self
                .column(Channel::Label)
                .and_then(|(_, values)| values.get(row))
                .map(ToString::to_string)
                .unwrap_or_default(),
        }
    }

    fn text(&self, boxed: bool) -> Vec<Mark> {
        (0..self.rows)
            .filter_map(|row| {
                let (x, y) = self.position(row)?;
                Some(Mark::Text {
                    x,
                    y,
                    text: self.label_at(row),
                    color: self.stroke(row, Rgba::BLACK),
                    size: self.size(row, TEXT_SIZE),
                    boxed,
                })
            })
            .collect()
    }

    fn sorted_points(&self, rows: &[usize], y: &Locator<'_>) -> Vec<(f32, f32)> {
        let mut points: Vec<(f32, f32)> =
            rows.iter().filter_map(|&r| Some((self.x.at(r)?, y.at(r)?))).collect();
        points.sort_by(|a, b| a.0.total_cmp(&b.0));
        points
    }

    fn lines(&self, width: f32, connect: Connect) -> Vec<Mark> {
        self.groups()
            .into_iter()
            .filter_map(|rows| {
                let first = *rows.first()?;
                let points = match connect {
                    Connect::RecordOrder => rows.iter().filter_map(|&r| self.position(r)).collect(),
                    Connect::XOrder => self.sorted_points(&rows, &self.y),
                    Connect::Stairs => stairstep(&self.sorted_points(&rows, &self.y)),
                };
                if points.len() < 2 {
                    debug!("dropping a line group with fewer than two points");
                    return None;
                }
                Some(Mark::Path { points, color: self.stroke(first, Rgba::INK), width: self.size(first, width) })
            })
            .collect()
    }

    fn bars(&self, width: f32, stat: Stat, position: Position) -> Result<Vec<Mark>> {
        let xs: Vec<Option<f32>> = (0..self.rows).map(|r| self.x.at(r)).collect();
        let mut slots: Vec<f32> = xs.iter().flatten().copied().collect();
        slots.sort_by(f32::total_cmp);
        slots.dedup_by(|a, b| a.to_bits() == b.to_bits());
        let slot_index: HashMap<u32, usize> = slots.iter().enumerate().map(|(i, s)| (s.to_bits(), i)).collect();

        let bar_width = width * resolution(&slots, self.x.is_discrete());
        let groups = self.groups();
        let dodge_width = bar_width / groups.len().max(1) as f32;
        let mut positive = vec![0.0f32; slots.len()];
        let mut negative = vec![0.0f32; slots.len()];
        let mut marks = Vec::new();

        for (g, rows) in groups.iter().enumerate() {
            let Some(&first) = rows.first() else { continue };
            let mut by_slot: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
            for &r in rows {
                if let Some(&s) = xs[r].and_then(|x| slot_index.get(&x.to_bits())) {
                    by_slot.entry(s).or_default().push(r);
                }
            }
            for (s, in_slot) in by_slot {
                let slot = slots[s];
                let ys: Vec<f32> = in_slot.iter().filter_map(|&r| self.y.at(r)).collect();
                let height = stat.reduce(&ys, in_slot.len())?;

                let (xmin, xmax) = match position {
                    Position::Dodge => {
                        let left = slot - bar_width / 2.0 + dodge_width * g as f32;
                        (left, left + dodge_width)
                    }
                    Position::Stack | Position::Identity => (slot - bar_width / 2.0, slot + bar_width / 2.0),
                };
                let (ymin, ymax) = if position == Position::Stack {
                    let base = if height >= 0.0 { &mut positive[s] } else { &mut negative[s] };
                    let start = *base;
                    *base += height;
                    (start.min(*base), start.max(*base))
                } else {
                    (height.min(0.0), height.max(0.0))
                };

                trace!("bar at {slot}: {ymin}..{ymax}");
                marks.push(Mark::Rect {
                    xmin,
                    xmax,
                    ymin,
                    ymax,
                    fill: self.fill(first, 1.0),
                    outline: self.outline(first),
                });
            }
        }
        Ok(marks)
    }

    fn areas(&self, alpha: f32, position: Position) -> Vec<Mark> {
        let stack = position == Position::Stack;
        let mut baseline: HashMap<u32, f32> = HashMap::new();
        self.groups()
            .into_iter()
            .filter_map(|rows| {
                let first = *rows.first()?;
                let points = self.sorted_points(&rows, &self.y);
                if points.is_empty() {
                    return None;
                }
                let mut upper = Vec::with_capacity(points.len() * 2);
                let mut lower = Vec::with_capacity(points.len());
                for (x, y) in points {
                    let base = if stack { baseline.get(&x.to_bits()).copied().unwrap_or(0.0) } else { 0.0 };
                    upper.push((x, base + y));
                    lower.push((x, base));
                    if stack {
                        baseline.insert(x.to_bits(), base + y);
                    }
                }
                upper.extend(lower.into_iter().rev());
                Some(Mark::Polygon { points: upper, fill: self.fill(first, alpha), outline: self.outline(first) })
            })
            .collect()
    }

    fn ribbons(&self, alpha: f32) -> Vec<Mark> {
        let ymin = Locator::new(self.mapping, self.dataset, Channel::Ymin, None);
        let ymax = Locator::new(self.mapping, self.dataset, Channel::Ymax, None);
        self.groups()
            .into_iter()
            .filter_map(|rows| {
                let first = *rows.first()?;
                let mut upper = self.sorted_points(&rows, &ymax);
                let lower = self.sorted_points(&rows, &ymin);
                if upper.is_empty() || lower.is_empty() {
                    return None;
                }
                upper.extend(lower.into_iter().rev());
                Some(Mark::Polygon { points: upper, fill: self.fill(first, alpha), outline: self.outline(first) })
            })
            .collect()
    }

    fn contours(&self, estimator: &dyn DensityEstimator, bins: usize) -> Result<Vec<Mark>> {
        let mut marks = Vec::new();
        for rows in self.groups() {
            let Some(&first) = rows.first() else { continue };
            let (xs, ys): (Vec<f32>, Vec<f32>) = rows.iter().filter_map(|&r| self.position(r)).unzip();
            for line in estimator.contours(&xs, &ys, bins)? {
                if line.points.len() < 2 {
                    continue;
                }
                trace!("contour at level {}", line.level);
                marks.push(Mark::Path {
                    points: line.points,
                    color: self.stroke(first, CONTOUR_COLOR),
                    width: 0.5,
                });
            }
        }
        Ok(marks)
    }

    fn x_title(&self) -> Option<String> {
        self.mapping.variable(Channel::X).map(|(name, _)| name.to_string())
    }

    fn y_title(&self) -> Option<String> {
        let geom = self.mapping.geom();
        if matches!(geom.geom_type, GeomType::Bar { .. }) && geom.stat == Stat::Count {
            return Some("count".to_string());
        }
        self.mapping
            .variable(Channel::Y)
            .or_else(|| self.mapping.variable(Channel::Ymin))
            .map(|(name, _)| name.to_string())
    }

    fn guides(&self) -> Vec<Guide> {
        [
            self.color.as_ref().and_then(|e| e.guide.clone()),
            self.fill.as_ref().and_then(|e| e.guide.clone()),
            self.shape.as_ref().and_then(|e| e.guide.clone()),
            self.size.as_ref().and_then(|e| e.guide.clone()),
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}

fn pick<T: Copy>(encoding: Option<&Encoding<T>>, row: usize) -> Option<T> {
    encoding.and_then(|e| e.values.get(row).copied())
}

fn fade(color: Rgba, alpha: f32) -> Rgba {
    if alpha >= 1.0 {
        return color;
    }
    color.with_alpha((f32::from(color.a) * alpha.max(0.0)).round() as u8)
}

fn guide(channel: Channel, title: &str, entries: Vec<LegendEntry>) -> Guide {
    Guide { channel, title: title.to_string(), entries }
}

/// Legend entries at the ends of a continuous range.
fn range_entries(lo: f32, hi: f32, key: impl Fn(f32) -> LegendKey) -> Vec<LegendEntry> {
    let ends = if (hi - lo).abs() < f32::EPSILON { vec![lo] } else { vec![lo, hi] };
    ends.into_iter().map(|v| LegendEntry { label: v.to_string(), key: key(v) }).collect()
}

/// Smallest gap between neighbouring bar slots.
fn resolution(slots: &[f32], discrete: bool) -> f32 {
    if discrete {
        return 1.0;
    }
    slots
        .windows(2)
        .map(|w| w[1] - w[0])
        .filter(|gap| *gap > 0.0)
        .min_by(f32::total_cmp)
        .unwrap_or(1.0)
}

/// Stairstep through x-sorted points: horizontal first, then vertical.
fn stairstep(points: &[(f32, f32)]) -> Vec<(f32, f32)> {
    let mut out: Vec<(f32, f32)> = points.first().copied().into_iter().collect();
    for pair in points.windows(2) {
        let (x1, y1) = pair[1];
        out.push((x1, pair[0].1));
        out.push((x1, y1));
    }
    out
}
