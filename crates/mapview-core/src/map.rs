use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{MapError, Result};
use crate::geometry::{BBox, Feature, Point};
use crate::layer::{Layer, LayerStack, SelectionMove};
use crate::viewport::Viewport;

/// The map aggregate: the layer stack, the current viewport, and the extent of
/// everything loaded. One per viewer session, owned by the host.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Map {
    pub id: Uuid,
    pub name: String,
    layers: LayerStack,
    pub viewport: Viewport,
    /// Bounding box of all layers, `None` while nothing is loaded.
    full_extent: Option<BBox>,
}

impl Map {
    pub fn new(name: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.to_string(),
            layers: LayerStack::new(),
            viewport: Viewport::default(),
            full_extent: None,
        }
    }

    pub fn with_viewport(mut self, viewport: Viewport) -> Self {
        self.viewport = viewport;
        self
    }

    pub fn layers(&self) -> &LayerStack {
        &self.layers
    }

    /// Mutable access to the stack. Feature edits made through it do not touch
    /// the full extent: prefer [`Map::add_feature`], or call
    /// [`Map::update_full_extent`] afterwards.
    pub fn layers_mut(&mut self) -> &mut LayerStack {
        &mut self.layers
    }

    pub fn full_extent(&self) -> Option<BBox> {
        self.full_extent
    }

    // ── Layer management ─────────────────────────────────────────────

    pub fn add_layer(&mut self, layer: Layer) {
        self.layers.add_layer(layer);
        self.update_full_extent();
    }

    pub fn remove_layer(&mut self, index: usize) -> Result<Layer> {
        let removed = self.layers.remove_layer(index)?;
        self.update_full_extent();
        Ok(removed)
    }

    /// Append `feature` to the layer at `index` and grow the full extent.
    pub fn add_feature(&mut self, index: usize, feature: Feature) -> Result<()> {
        let len = self.layers.len();
        let layer = self
            .layers
            .layer_mut(index)
            .ok_or(MapError::IndexOutOfRange { index, len })?;
        layer.add_feature(feature);
        self.update_full_extent();
        Ok(())
    }

    pub fn clear_layers(&mut self) {
        self.layers.clear();
        self.full_extent = None;
    }

    pub fn select_layer(&mut self, index: usize) -> Result<()> {
        self.layers.select_layer(index)
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.layers.selected_index()
    }

    pub fn move_selected_up(&mut self) -> SelectionMove {
        self.layers.move_selected_up()
    }

    pub fn move_selected_down(&mut self) -> SelectionMove {
        self.layers.move_selected_down()
    }

    pub fn raise_selected(&mut self) -> SelectionMove {
        self.layers.raise_selected()
    }

    pub fn lower_selected(&mut self) -> SelectionMove {
        self.layers.lower_selected()
    }

    // ── Extent / navigation ──────────────────────────────────────────

    pub fn update_full_extent(&mut self) {
        self.full_extent = self.layers.bbox();
    }

    /// Fit the viewport to the full extent on a canvas of the given size.
    /// Returns `false` when there is nothing to fit.
    pub fn zoom_to_full_extent(&mut self, canvas_width: f64, canvas_height: f64, fill: f64) -> bool {
        match self.full_extent {
            Some(extent) => {
                self.viewport
                    .fit_bbox(&extent, canvas_width, canvas_height, fill);
                true
            }
            None => false,
        }
    }

    pub fn to_screen(&self, map: Point) -> Point {
        self.viewport.to_screen(map)
    }

    pub fn to_map(&self, screen: Point) -> Point {
        self.viewport.to_map(screen)
    }
}
