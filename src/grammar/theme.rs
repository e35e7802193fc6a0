//! Theme presets.
//!
//! Themes only control non-data appearance: backgrounds, grid, axes, text
//! and facet strips. They are read by the SVG encoder and never affect marks.

use crate::color::Rgba;
use crate::error::{Error, Result};

/// Non-data appearance of a figure.
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    /// Preset the theme started from.
    pub name: &'static str,
    /// Figure background.
    pub background: Rgba,
    /// Plotting area background.
    pub panel_background: Rgba,
    /// Major grid line color; `None` hides the grid.
    pub grid: Option<Rgba>,
    /// Axis line color; `None` hides axis lines.
    pub axis_line: Option<Rgba>,
    /// Border around the plotting area.
    pub panel_border: Option<Rgba>,
    /// Text and tick label color.
    pub text_color: Rgba,
    /// Background of facet strips and panel titles.
    pub strip_background: Rgba,
    /// Base font size in points.
    pub base_size: f32,
    /// Whether tick labels and axis titles are drawn.
    pub show_axis_text: bool,
    /// Margin around each panel, in pixels.
    pub margin: u32,
}

impl Default for Theme {
    fn default() -> Self {
        Self::grey()
    }
}

impl Theme {
    /// Names accepted by [`Theme::by_name`].
    pub const NAMES: [&'static str; 6] = ["grey", "minimal", "bw", "classic", "dark", "void"];

    /// Grey panel with white grid lines.
    #[must_use]
    pub fn grey() -> Self {
        Self {
            name: "grey",
            background: Rgba::WHITE,
            panel_background: Rgba::rgb(235, 235, 235),
            grid: Some(Rgba::WHITE),
            axis_line: None,
            panel_border: None,
            text_color: Rgba::rgb(77, 77, 77),
            strip_background: Rgba::rgb(217, 217, 217),
            base_size: 11.0,
            show_axis_text: true,
            margin: 40,
        }
    }

    /// White panel, light grid, no border.
    #[must_use]
    pub fn minimal() -> Self {
        Self {
            name: "minimal",
            panel_background: Rgba::WHITE,
            grid: Some(Rgba::rgb(235, 235, 235)),
            strip_background: Rgba::WHITE,
            ..Self::grey()
        }
    }

    /// White panel with a dark border.
    #[must_use]
    pub fn bw() -> Self {
        Self {
            name: "bw",
            panel_border: Some(Rgba::rgb(51, 51, 51)),
            grid: Some(Rgba::rgb(235, 235, 235)),
            strip_background: Rgba::rgb(217, 217, 217),
            ..Self::minimal()
        }
    }

    /// Axis lines and no grid.
    #[must_use]
    pub fn classic() -> Self {
        Self {
            name: "classic",
            grid: None,
            axis_line: Some(Rgba::BLACK),
            text_color: Rgba::BLACK,
            ..Self::minimal()
        }
    }

    /// Dark panel for dark slides.
    #[must_use]
    pub fn dark() -> Self {
        Self {
            name: "dark",
            panel_background: Rgba::rgb(127, 127, 127),
            grid: Some(Rgba::rgb(66, 66, 66)),
            strip_background: Rgba::rgb(38, 38, 38),
            ..Self::grey()
        }
    }

    /// Nothing but the data.
    #[must_use]
    pub fn void() -> Self {
        Self {
            name: "void",
            panel_background: Rgba::TRANSPARENT,
            grid: None,
            strip_background: Rgba::TRANSPARENT,
            show_axis_text: false,
            margin: 10,
            ..Self::grey()
        }
    }

    /// Look up a preset by name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] for an unknown name.
    pub fn by_name(name: &str) -> Result<Self> {
        match name {
            "grey" | "gray" => Ok(Self::grey()),
            "minimal" => Ok(Self::minimal()),
            "bw" => Ok(Self::bw()),
            "classic" => Ok(Self::classic()),
            "dark" => Ok(Self::dark()),
            "void" => Ok(Self::void()),
            other => Err(Error::Config(format!(
                "unknown theme '{other}' (expected one of {})",
                Self::NAMES.join(", ")
            ))),
        }
    }

    /// Set the base font size.
    #[must_use]
    pub fn base_size(mut self, size: f32) -> Self {
        self.base_size = size.max(1.0);
        self
    }

    /// Set the figure background.
    #[must_use]
    pub fn background(mut self, color: Rgba) -> Self {
        self.background = color;
        self
    }

    /// Show or hide the grid.
    #[must_use]
    pub fn grid(mut self, color: Option<Rgba>) -> Self {
        self.grid = color;
        self
    }
}
