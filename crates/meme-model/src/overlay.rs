//! Text overlays and their positions.

use serde::{Deserialize, Serialize};

/// A point in canvas pixel space. Unconstrained; may lie off-canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Which of the two text lines an edit applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverlaySlot {
    Top,
    Bottom,
}

impl OverlaySlot {
    pub fn as_str(self) -> &'static str {
        match self {
            OverlaySlot::Top => "top",
            OverlaySlot::Bottom => "bottom",
        }
    }
}

impl std::str::FromStr for OverlaySlot {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "top" => Ok(OverlaySlot::Top),
            "bottom" => Ok(OverlaySlot::Bottom),
            other => Err(format!("unknown overlay '{other}', expected top or bottom")),
        }
    }
}

/// One line of text anchored at its horizontal centre and baseline.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TextOverlay {
    pub text: String,
    pub position: Position,
}

impl TextOverlay {
    pub fn new(text: impl Into<String>, position: Position) -> Self {
        Self {
            text: text.into(),
            position,
        }
    }

    /// Whether drawing this overlay would put nothing on the surface.
    pub fn is_blank(&self) -> bool {
        self.text.is_empty()
    }
}

/// The top and bottom lines, drawn in that order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Overlays {
    pub top: TextOverlay,
    pub bottom: TextOverlay,
}

impl Overlays {
    /// Empty lines positioned for a canvas of the given size.
    pub fn for_canvas(width: u32, height: u32, edge_margin: i32) -> Self {
        let (top, bottom) = default_positions(width, height, edge_margin);
        Self {
            top: TextOverlay::new("", top),
            bottom: TextOverlay::new("", bottom),
        }
    }

    pub fn get(&self, slot: OverlaySlot) -> &TextOverlay {
        match slot {
            OverlaySlot::Top => &self.top,
            OverlaySlot::Bottom => &self.bottom,
        }
    }

    pub fn get_mut(&mut self, slot: OverlaySlot) -> &mut TextOverlay {
        match slot {
            OverlaySlot::Top => &mut self.top,
            OverlaySlot::Bottom => &mut self.bottom,
        }
    }

    /// Re-centre both lines for a newly selected image, keeping their text.
    pub fn recenter(&mut self, width: u32, height: u32, edge_margin: i32) {
        let (top, bottom) = default_positions(width, height, edge_margin);
        self.top.position = top;
        self.bottom.position = bottom;
    }

    /// Overlays in drawing order.
    pub fn iter(&self) -> impl Iterator<Item = &TextOverlay> {
        [&self.top, &self.bottom].into_iter()
    }
}

impl Default for Overlays {
    fn default() -> Self {
        Self::for_canvas(500, 500, 40)
    }
}

/// `(top, bottom)` anchors: horizontally centred, `edge_margin` from the edges.
pub fn default_positions(width: u32, height: u32, edge_margin: i32) -> (Position, Position) {
    let center_x = (width / 2) as i32;
    let height = i32::try_from(height).unwrap_or(i32::MAX);
    (
        Position::new(center_x, edge_margin),
        Position::new(center_x, height.saturating_sub(edge_margin)),
    )
}
