//! Canvas viewport: pan, zoom and the minimap frame.
//!
//! Screen and flow coordinates relate by `screen = flow * zoom + pan`.

use crate::settings::EditorSettings;
use flowdeck_workflow::{GraphNode, Position};

/// An axis-aligned rectangle in flow coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: Position,
    pub max: Position,
}

impl Bounds {
    #[must_use]
    pub fn new(min: Position, max: Position) -> Self {
        Self { min, max }
    }

    /// The rectangle covered by every node, each taken as `node_width` by
    /// `node_height` from its position. `None` for an empty canvas.
    pub fn of_nodes<'a>(
        nodes: impl IntoIterator<Item = &'a GraphNode>,
        settings: &EditorSettings,
    ) -> Option<Self> {
        nodes
            .into_iter()
            .map(|node| {
                Self::new(
                    node.position,
                    node.position
                        .offset(settings.node_width, settings.node_height),
                )
            })
            .reduce(Self::union)
    }

    #[must_use]
    pub fn union(self, other: Self) -> Self {
        Self::new(
            Position::new(self.min.x.min(other.min.x), self.min.y.min(other.min.y)),
            Position::new(self.max.x.max(other.max.x), self.max.y.max(other.max.y)),
        )
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    #[must_use]
    pub fn center(&self) -> Position {
        Position::new(
            (self.min.x + self.max.x) / 2.0,
            (self.min.y + self.max.y) / 2.0,
        )
    }
}

/// Pan offset and zoom factor of the canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub pan: Position,
    pub zoom: f64,
    min_zoom: f64,
    max_zoom: f64,
}

impl Viewport {
    /// An unpanned viewport at zoom 1, clamped to the settings' zoom range.
    #[must_use]
    pub fn new(settings: &EditorSettings) -> Self {
        let mut viewport = Self {
            pan: Position::default(),
            zoom: 1.0,
            min_zoom: settings.min_zoom,
            max_zoom: settings.max_zoom,
        };
        viewport.zoom = viewport.clamp_zoom(1.0);
        viewport
    }

    /// Limits `zoom` to the settings' range. Never panics, even on a range
    /// that [`EditorSettings::validate`] would reject.
    fn clamp_zoom(&self, zoom: f64) -> f64 {
        zoom.max(self.min_zoom).min(self.max_zoom)
    }

    #[must_use]
    pub fn screen_to_flow(&self, point: Position) -> Position {
        Position::new(
            (point.x - self.pan.x) / self.zoom,
            (point.y - self.pan.y) / self.zoom,
        )
    }

    #[must_use]
    pub fn flow_to_screen(&self, point: Position) -> Position {
        Position::new(
            point.x * self.zoom + self.pan.x,
            point.y * self.zoom + self.pan.y,
        )
    }

    /// Moves the canvas by a screen-space delta.
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.pan = self.pan.offset(dx, dy);
    }

    /// Multiplies the zoom by `factor`, keeping the flow point under the
    /// screen-space `anchor` in place.
    pub fn zoom_at(&mut self, factor: f64, anchor: Position) {
        if !factor.is_finite() || factor <= 0.0 {
            return;
        }
        let fixed = self.screen_to_flow(anchor);
        self.zoom = self.clamp_zoom(self.zoom * factor);
        self.pan = Position::new(
            anchor.x - fixed.x * self.zoom,
            anchor.y - fixed.y * self.zoom,
        );
    }

    /// Centers `bounds` in a `width` by `height` canvas, zooming as far as
    /// the padding and zoom range allow. With no bounds the view resets.
    pub fn fit(&mut self, bounds: Option<Bounds>, width: f64, height: f64, padding: f64) {
        let Some(bounds) = bounds else {
            self.reset();
            return;
        };

        let avail_w = (width - 2.0 * padding).max(1.0);
        let avail_h = (height - 2.0 * padding).max(1.0);
        let zoom_x = if bounds.width() > 0.0 {
            avail_w / bounds.width()
        } else {
            self.max_zoom
        };
        let zoom_y = if bounds.height() > 0.0 {
            avail_h / bounds.height()
        } else {
            self.max_zoom
        };
        self.zoom = self.clamp_zoom(zoom_x.min(zoom_y));

        let center = bounds.center();
        self.pan = Position::new(
            width / 2.0 - center.x * self.zoom,
            height / 2.0 - center.y * self.zoom,
        );
    }

    /// Back to zoom 1 with no pan.
    pub fn reset(&mut self) {
        self.pan = Position::default();
        self.zoom = self.clamp_zoom(1.0);
    }

    /// The part of the flow plane visible in a `width` by `height` canvas.
    #[must_use]
    pub fn visible_area(&self, width: f64, height: f64) -> Bounds {
        Bounds::new(
            self.screen_to_flow(Position::default()),
            self.screen_to_flow(Position::new(width, height)),
        )
    }
}

/// What the minimap draws.
#[derive(Debug, Clone, PartialEq)]
pub struct Minimap {
    /// The region the minimap scales to fit.
    pub frame: Bounds,
    /// The viewport rectangle inside the frame.
    pub visible: Bounds,
    pub nodes: Vec<Bounds>,
}

impl Minimap {
    #[must_use]
    pub fn build<'a>(
        nodes: impl IntoIterator<Item = &'a GraphNode>,
        viewport: &Viewport,
        width: f64,
        height: f64,
        settings: &EditorSettings,
    ) -> Self {
        let nodes: Vec<Bounds> = nodes
            .into_iter()
            .map(|node| {
                Bounds::new(
                    node.position,
                    node.position
                        .offset(settings.node_width, settings.node_height),
                )
            })
            .collect();
        let visible = viewport.visible_area(width, height);
        let frame = nodes.iter().copied().fold(visible, Bounds::union);
        Self {
            frame,
            visible,
            nodes,
        }
    }
}
