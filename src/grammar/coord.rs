//! Coordinate systems for Grammar of Graphics.
//!
//! Cartesian coordinates with optional zoom limits and an x/y flip. Limits
//! only change the visible range; marks outside them are kept.

use log::warn;

use super::panel::{Axis, Panel};

/// Cartesian coordinate system.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Coord {
    /// X axis limits.
    pub xlim: Option<(f32, f32)>,
    /// Y axis limits.
    pub ylim: Option<(f32, f32)>,
    /// Whether to flip x and y.
    pub flip: bool,
}

impl Coord {
    /// Create a Cartesian coordinate system.
    #[must_use]
    pub fn cartesian() -> Self {
        Self::default()
    }

    /// Cartesian coordinates with x and y swapped.
    #[must_use]
    pub fn flipped() -> Self {
        Self { flip: true, ..Self::default() }
    }

    /// Set x-axis limits.
    #[must_use]
    pub fn xlim(mut self, min: f32, max: f32) -> Self {
        self.xlim = Some((min.min(max), min.max(max)));
        self
    }

    /// Set y-axis limits.
    #[must_use]
    pub fn ylim(mut self, min: f32, max: f32) -> Self {
        self.ylim = Some((min.min(max), min.max(max)));
        self
    }

    /// Flip x and y axes.
    #[must_use]
    pub fn flip(mut self) -> Self {
        self.flip = true;
        self
    }

    /// Apply to a rendered panel. Limits refer to the axes after flipping.
    #[must_use]
    pub fn apply(&self, panel: Panel) -> Panel {
        let panel = if self.flip { panel.flipped() } else { panel };
        let x_axis = limit(panel.x_axis(), self.xlim, "x");
        let y_axis = limit(panel.y_axis(), self.ylim, "y");
        panel.with_axes(x_axis, y_axis)
    }
}

fn limit(axis: &Axis, lim: Option<(f32, f32)>, name: &str) -> Axis {
    match (axis, lim) {
        (_, None) => axis.clone(),
        (Axis::Discrete { .. }, Some(_)) => {
            warn!("{name} limits ignored on a discrete axis");
            axis.clone()
        }
        (_, Some((min, max))) => Axis::Continuous { min, max },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgba;
    use crate::grammar::panel::{Mark, PanelLayer};

    fn panel() -> Panel {
        let marks = vec![Mark::Rect {
            xmin: 0.55,
            xmax: 1.45,
            ymin: 0.0,
            ymax: 4.0,
            fill: Rgba::GREY35,
            outline: None,
        }];
        Panel::new(
            PanelLayer { geom: "bar", marks },
            Axis::Discrete { levels: vec!["a".into()] },
            Axis::Continuous { min: 0.0, max: 4.0 },
        )
        .with_labels(Some("class".into()), Some("count".into()))
    }

    #[test]
    fn test_default_is_identity() {
        assert_eq!(Coord::default().apply(panel()), panel());
    }

    #[test]
    fn test_limits_set_visible_range() {
        let p = Coord::cartesian().ylim(10.0, -2.0).apply(panel());
        assert_eq!(p.y_axis(), &Axis::Continuous { min: -2.0, max: 10.0 });
        assert_eq!(p.mark_count(), 1);
    }

    #[test]
    fn test_limits_ignored_on_discrete() {
        let p = Coord::cartesian().xlim(0.0, 1.0).apply(panel());
        assert_eq!(p.x_axis(), &Axis::Discrete { levels: vec!["a".into()] });
    }

    #[test]
    fn test_flip_swaps_axes_and_labels() {
        let p = Coord::flipped().apply(panel());
        assert_eq!(p.x_axis(), &Axis::Continuous { min: 0.0, max: 4.0 });
        assert_eq!(p.y_label(), Some("class"));
    }

    #[test]
    fn test_flip_then_limit() {
        let p = Coord::cartesian().flip().xlim(0.0, 8.0).apply(panel());
        assert_eq!(p.x_axis(), &Axis::Continuous { min: 0.0, max: 8.0 });
    }
}
