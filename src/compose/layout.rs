//! Panel layouts.
//!
//! [`compose`] places panels into the cells of a [`Grid`], optionally
//! collects their legends into shared guides and tags each placed panel.

use log::debug;
use serde::Deserialize;

use super::grid::{Area, Grid};
use crate::error::{Error, Result};
use crate::grammar::{Guide, Panel};

/// Whether legends are drawn once per layout or once per panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GuideCollection {
    /// Identical legends across panels are merged into layout-level guides.
    #[default]
    Merge,
    /// Every panel keeps its own legends.
    PerPanel,
}

/// Numbering style for panel tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TagStyle {
    /// A, B, C, ...
    #[default]
    UpperAlpha,
    /// a, b, c, ...
    LowerAlpha,
    /// 1, 2, 3, ...
    Arabic,
    /// I, II, III, ...
    Roman,
}

impl TagStyle {
    /// The tag text for the `n`th placed panel, counting from 1.
    #[must_use]
    pub fn format(self, n: usize) -> String {
        match self {
            TagStyle::UpperAlpha => alpha(n),
            TagStyle::LowerAlpha => alpha(n).to_lowercase(),
            TagStyle::Arabic => n.to_string(),
            TagStyle::Roman => roman(n),
        }
    }
}

/// Panel tagging.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tags {
    /// No tags.
    #[default]
    None,
    /// Number placed panels in placement order.
    Sequential {
        /// Numbering style.
        #[serde(default)]
        style: TagStyle,
        /// Text before each tag.
        #[serde(default)]
        prefix: String,
        /// Text after each tag.
        #[serde(default)]
        suffix: String,
    },
}

impl Tags {
    /// Sequential tags without prefix or suffix.
    #[must_use]
    pub fn sequential(style: TagStyle) -> Self {
        Tags::Sequential { style, prefix: String::new(), suffix: String::new() }
    }

    fn label(&self, n: usize) -> Option<String> {
        match self {
            Tags::None => None,
            Tags::Sequential { style, prefix, suffix } => {
                Some(format!("{prefix}{}{suffix}", style.format(n)))
            }
        }
    }
}

/// How panels are arranged.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct LayoutSpec {
    /// Grid shape.
    #[serde(default)]
    pub grid: Grid,
    /// Legend collection.
    #[serde(default)]
    pub guides: GuideCollection,
    /// Panel tags.
    #[serde(default)]
    pub tags: Tags,
}

impl LayoutSpec {
    /// Auto grid, merged guides, no tags.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the grid.
    #[must_use]
    pub fn grid(mut self, grid: Grid) -> Self {
        self.grid = grid;
        self
    }

    /// Set legend collection.
    #[must_use]
    pub fn guides(mut self, guides: GuideCollection) -> Self {
        self.guides = guides;
        self
    }

    /// Set panel tags.
    #[must_use]
    pub fn tags(mut self, tags: Tags) -> Self {
        self.tags = tags;
        self
    }
}

/// A grid cell named by a panel that wants a specific place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellRef {
    /// The template area with this name.
    Named(char),
    /// The area covering this grid position (0-based).
    Position {
        /// Row.
        row: usize,
        /// Column.
        col: usize,
    },
}

/// A panel to place, optionally in a specific cell.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutItem {
    panel: Panel,
    at: Option<CellRef>,
}

impl LayoutItem {
    /// Place `panel` in the next free cell.
    #[must_use]
    pub fn new(panel: Panel) -> Self {
        Self { panel, at: None }
    }

    /// Place `panel` in `cell`.
    #[must_use]
    pub fn at(panel: Panel, cell: CellRef) -> Self {
        Self { panel, at: Some(cell) }
    }
}

impl From<Panel> for LayoutItem {
    fn from(panel: Panel) -> Self {
        Self::new(panel)
    }
}

/// One cell of a composed layout.
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    /// The grid area the cell occupies.
    pub area: Area,
    /// The placed panel, if any.
    pub panel: Option<Panel>,
    /// Position of the panel in the input sequence.
    pub index: Option<usize>,
    /// Tag text.
    pub tag: Option<String>,
}

/// Panels arranged in a grid. Terminal artifact of the pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
    guides: Vec<Guide>,
    collection: GuideCollection,
}

impl Layout {
    /// Grid rows.
    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Grid columns.
    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Cells in placement order, occupied or not.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> + '_ {
        self.cells.iter()
    }

    /// The cell covering grid position `(row, col)`.
    #[must_use]
    pub fn cell(&self, row: usize, col: usize) -> Option<&Cell> {
        self.cells.iter().find(|c| c.area.covers(row, col))
    }

    /// The panel in the template area `name`.
    #[must_use]
    pub fn panel_for(&self, name: char) -> Option<&Panel> {
        self.cells.iter().find(|c| c.area.name == Some(name)).and_then(|c| c.panel.as_ref())
    }

    /// The `index`th input panel.
    #[must_use]
    pub fn panel(&self, index: usize) -> Option<&Panel> {
        self.placed(index).and_then(|c| c.panel.as_ref())
    }

    /// Tag of the `index`th input panel.
    #[must_use]
    pub fn tag_for(&self, index: usize) -> Option<&str> {
        self.placed(index).and_then(|c| c.tag.as_deref())
    }

    /// Number of placed panels.
    #[must_use]
    pub fn panel_count(&self) -> usize {
        self.cells.iter().filter(|c| c.panel.is_some()).count()
    }

    /// Layout-level legends (empty unless guides are merged).
    #[must_use]
    pub fn guides(&self) -> &[Guide] {
        &self.guides
    }

    /// Legend collection mode.
    #[must_use]
    pub fn guide_collection(&self) -> GuideCollection {
        self.collection
    }

    fn placed(&self, index: usize) -> Option<&Cell> {
        self.cells.iter().find(|c| c.index == Some(index))
    }
}

/// Arrange panels into a layout.
///
/// Panels with an explicit [`CellRef`] are placed first; the rest fill the
/// free cells in order. Fewer panels than cells leaves cells empty.
///
/// # Errors
///
/// - [`Error::LayoutPanelCountMismatch`] if there are more panels than cells.
/// - [`Error::LayoutCellConflict`] if two panels claim the same cell.
/// - [`Error::InvalidTemplate`] for a bad template or a claim naming no cell.
pub fn compose<I>(items: I, spec: &LayoutSpec) -> Result<Layout>
where
    I: IntoIterator,
    I::Item: Into<LayoutItem>,
{
    let items: Vec<LayoutItem> = items.into_iter().map(Into::into).collect();
    let shape = spec.grid.shape(items.len())?;
    if items.len() > shape.areas.len() {
        return Err(Error::LayoutPanelCountMismatch { panels: items.len(), cells: shape.areas.len() });
    }

    let mut slots: Vec<Option<usize>> = vec![None; shape.areas.len()];
    for (i, item) in items.iter().enumerate() {
        let Some(cell) = item.at else { continue };
        let slot = match cell {
            CellRef::Named(name) => shape.areas.iter().position(|a| a.name == Some(name)),
            CellRef::Position { row, col } => shape.areas.iter().position(|a| a.covers(row, col)),
        }
        .ok_or_else(|| Error::InvalidTemplate(format!("no cell {}", describe(cell))))?;
        if slots[slot].is_some() {
            return Err(Error::LayoutCellConflict { cell: describe(cell) });
        }
        slots[slot] = Some(i);
    }

    let mut free = (0..slots.len()).filter(|s| slots[*s].is_none()).collect::<Vec<_>>().into_iter();
    for (i, item) in items.iter().enumerate() {
        if item.at.is_some() {
            continue;
        }
        // count check above guarantees a free slot
        if let Some(slot) = free.next() {
            slots[slot] = Some(i);
        }
    }

    let mut panels: Vec<Option<Panel>> = items.into_iter().map(|item| Some(item.panel)).collect();
    let mut placed = 0;
    let cells: Vec<Cell> = shape
        .areas
        .iter()
        .zip(&slots)
        .map(|(area, slot)| {
            let panel = slot.and_then(|i| panels.get_mut(i).and_then(Option::take));
            let tag = panel.as_ref().and_then(|_| {
                placed += 1;
                spec.tags.label(placed)
            });
            Cell { area: *area, panel, index: *slot, tag }
        })
        .collect();

    let guides = match spec.guides {
        GuideCollection::Merge => merge_guides(cells.iter().filter_map(|c| c.panel.as_ref())),
        GuideCollection::PerPanel => Vec::new(),
    };

    debug!(
        "composed {placed} panels into a {}x{} grid ({} guides)",
        shape.rows,
        shape.cols,
        guides.len()
    );
    Ok(Layout { rows: shape.rows, cols: shape.cols, cells, guides, collection: spec.guides })
}

fn merge_guides<'a>(panels: impl Iterator<Item = &'a Panel>) -> Vec<Guide> {
    let mut merged: Vec<Guide> = Vec::new();
    for guide in panels.flat_map(Panel::guides) {
        match merged.iter_mut().find(|g| g.same_scale(guide)) {
            Some(existing) => existing.absorb(guide),
            None => merged.push(guide.clone()),
        }
    }
    merged
}

fn describe(cell: CellRef) -> String {
    match cell {
        CellRef::Named(name) => format!("'{name}'"),
        CellRef::Position { row, col } => format!("({row}, {col})"),
    }
}

fn alpha(mut n: usize) -> String {
    let mut out = Vec::new();
    while n > 0 {
        n -= 1;
        out.push(char::from(b'A' + (n % 26) as u8));
        n /= 26;
    }
    out.iter().rev().collect()
}

fn roman(mut n: usize) -> String {
    const NUMERALS: [(usize, &str); 13] = [
        (1000, "M"),
        (900, "CM"),
        (500, "D"),
        (400, "CD"),
        (100, "C"),
        (90, "XC"),
        (50, "L"),
        (40, "XL"),
        (10, "X"),
        (9, "IX"),
        (5, "V"),
        (4, "IV"),
        (1, "I"),
    ];
    let mut out = String::new();
    for (value, numeral) in NUMERALS {
        while n >= value {
            out.push_str(numeral);
            n -= value;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgba;
    use crate::grammar::{Channel, LegendEntry, LegendKey};

    fn panel(title: &str) -> Panel {
        Panel::empty().with_title(title)
    }

    fn titles(layout: &Layout) -> Vec<Option<String>> {
        layout
            .cells()
            .map(|c| c.panel.as_ref().and_then(|p| p.title().map(str::to_string)))
            .collect()
    }

    #[test]
    fn test_auto_in_order() {
        let layout = compose(vec![panel("a"), panel("b"), panel("c")], &LayoutSpec::new()).unwrap();
        assert_eq!((layout.rows(), layout.cols()), (2, 2));
        assert_eq!(layout.panel_count(), 3);
        assert_eq!(layout.cell(0, 1).unwrap().panel.as_ref().unwrap().title(), Some("b"));
        assert!(layout.cell(1, 1).unwrap().panel.is_none());
    }

    #[test]
    fn test_too_many_panels() {
        let spec = LayoutSpec::new().grid(Grid::Template("AB\nC#".into()));
        let err = compose(vec![panel("1"), panel("2"), panel("3"), panel("4")], &spec).unwrap_err();
        assert!(matches!(err, Error::LayoutPanelCountMismatch { panels: 4, cells: 3 }));
    }

    #[test]
    fn test_fewer_panels_than_cells() {
        let spec = LayoutSpec::new().grid(Grid::Dims { rows: 1, cols: 3 });
        let layout = compose(vec![panel("a")], &spec).unwrap();
        assert_eq!(layout.cells().count(), 3);
        assert_eq!(layout.panel_count(), 1);
    }

    #[test]
    fn test_named_claims_first() {
        let spec = LayoutSpec::new().grid(Grid::Template("AB".into()));
        let items = vec![LayoutItem::new(panel("free")), LayoutItem::at(panel("claimed"), CellRef::Named('A'))];
        let layout = compose(items, &spec).unwrap();
        assert_eq!(layout.panel_for('A').and_then(Panel::title), Some("claimed"));
        assert_eq!(layout.panel_for('B').and_then(Panel::title), Some("free"));
        assert_eq!(layout.panel(0).and_then(Panel::title), Some("free"));
    }

    #[test]
    fn test_cell_conflict() {
        let spec = LayoutSpec::new().grid(Grid::Template("AAB".into()));
        let items = vec![
            LayoutItem::at(panel("1"), CellRef::Named('A')),
            LayoutItem::at(panel("2"), CellRef::Position { row: 0, col: 1 }),
        ];
        assert!(matches!(compose(items, &spec), Err(Error::LayoutCellConflict { .. })));
    }

    #[test]
    fn test_claim_unknown_cell() {
        let spec = LayoutSpec::new().grid(Grid::Template("AB".into()));
        let items = vec![LayoutItem::at(panel("1"), CellRef::Named('Z'))];
        assert!(matches!(compose(items, &spec), Err(Error::InvalidTemplate(_))));
    }

    #[test]
    fn test_sequential_tags() {
        let spec = LayoutSpec::new()
            .grid(Grid::Template("B\nA".into()))
            .tags(Tags::Sequential { style: TagStyle::UpperAlpha, prefix: "(".into(), suffix: ")".into() });
        let layout = compose(vec![panel("first"), panel("second")], &spec).unwrap();
        assert_eq!(layout.tag_for(0), Some("(A)"));
        assert_eq!(layout.tag_for(1), Some("(B)"));
        assert_eq!(layout.panel_for('A').and_then(Panel::title), Some("first"));
    }

    #[test]
    fn test_tag_styles() {
        assert_eq!(TagStyle::UpperAlpha.format(28), "AB");
        assert_eq!(TagStyle::LowerAlpha.format(3), "c");
        assert_eq!(TagStyle::Arabic.format(12), "12");
        assert_eq!(TagStyle::Roman.format(14), "XIV");
    }

    fn legend(labels: &[&str]) -> Guide {
        Guide {
            channel: Channel::Fill,
            title: "drv".into(),
            entries: labels
                .iter()
                .map(|l| LegendEntry { label: (*l).into(), key: LegendKey::Color(Rgba::BLUE) })
                .collect(),
        }
    }

    #[test]
    fn test_merge_guides_leaves_panels_alone() {
        let a = Panel::empty().with_guides(vec![legend(&["4", "f"])]);
        let b = Panel::empty().with_guides(vec![legend(&["f", "r"])]);
        let layout = compose(vec![a.clone(), b], &LayoutSpec::new()).unwrap();
        assert_eq!(layout.guides().len(), 1);
        assert_eq!(layout.guides()[0].entries.len(), 3);
        assert_eq!(layout.panel(0), Some(&a));

        let per_panel = LayoutSpec::new().guides(GuideCollection::PerPanel);
        let layout = compose(vec![a], &per_panel).unwrap();
        assert!(layout.guides().is_empty());
    }

    #[test]
    fn test_empty_input() {
        let layout = compose(Vec::<Panel>::new(), &LayoutSpec::new()).unwrap();
        assert_eq!(layout.panel_count(), 0);
        assert_eq!(layout.cell(0, 0), None);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Every input panel comes back unchanged from its cell.
        #[test]
        fn prop_round_trip(n in 0usize..20) {
            let panels: Vec<Panel> = (0..n).map(|i| Panel::empty().with_title(i.to_string())).collect();
            let layout = compose(panels.clone(), &LayoutSpec::new()).unwrap();
            prop_assert_eq!(layout.panel_count(), n);
            for (i, panel) in panels.iter().enumerate() {
                prop_assert_eq!(layout.panel(i), Some(panel));
            }
        }

        /// Dims grids accept exactly rows * cols panels or fewer.
        #[test]
        fn prop_dims_capacity(rows in 0usize..4, cols in 0usize..4, n in 0usize..12) {
            let spec = LayoutSpec::new().grid(Grid::Dims { rows, cols });
            let panels: Vec<Panel> = (0..n).map(|_| Panel::empty()).collect();
            prop_assert_eq!(compose(panels, &spec).is_ok(), n <= rows * cols);
        }
    }
}
