use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{MapError, Result};
use crate::geometry::{BBox, Feature, GeometryKind};
use crate::symbol::Symbol;

/// Stable layer identifier, independent of the layer's position in the stack.
pub type LayerId = Uuid;

/// A named set of features drawn with one symbol.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Layer {
    pub id: LayerId,
    pub name: String,
    pub features: Vec<Feature>,
    symbol: Symbol,
    pub visible: bool,
}

impl Layer {
    pub fn new(name: &str, symbol: impl Into<Symbol>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.to_string(),
            features: Vec::new(),
            symbol: symbol.into(),
            visible: true,
        }
    }

    pub fn with_features(mut self, features: impl IntoIterator<Item = Feature>) -> Self {
        self.features.extend(features);
        self
    }

    pub fn with_visibility(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    pub fn add_feature(&mut self, feature: Feature) {
        self.features.push(feature);
    }

    pub fn symbol(&self) -> &Symbol {
        &self.symbol
    }

    /// Replace the layer's symbol wholesale.
    pub fn set_symbol(&mut self, symbol: impl Into<Symbol>) {
        self.symbol = symbol.into();
    }

    pub fn kind(&self) -> GeometryKind {
        self.symbol.kind()
    }

    pub fn feature_count(&self) -> usize {
        self.features.len()
    }

    /// Bounding box over all feature vertices, `None` when there are none.
    pub fn bbox(&self) -> Option<BBox> {
        self.features
            .iter()
            .filter_map(Feature::bbox)
            .reduce(|a, b| a.union(&b))
    }
}

/// Outcome of moving the selection or the selected layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SelectionMove {
    Moved { from: usize, to: usize },
    AlreadyAtTop,
    AlreadyAtBottom,
    NoLayers,
}

impl SelectionMove {
    pub fn is_moved(self) -> bool {
        matches!(self, SelectionMove::Moved { .. })
    }
}

/// Ordered layers, front to back: index 0 is the topmost layer.
///
/// Exactly one layer is selected whenever the stack is non-empty; the selected
/// index is always in bounds.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(try_from = "LayerStackRepr")]
pub struct LayerStack {
    layers: Vec<Layer>,
    selected: usize,
}

/// Unchecked wire form of [`LayerStack`].
#[derive(Deserialize)]
struct LayerStackRepr {
    layers: Vec<Layer>,
    #[serde(default)]
    selected: usize,
}

impl TryFrom<LayerStackRepr> for LayerStack {
    type Error = MapError;

    fn try_from(repr: LayerStackRepr) -> Result<Self> {
        let mut stack = LayerStack {
            layers: repr.layers,
            selected: 0,
        };
        if !stack.layers.is_empty() {
            stack.select_layer(repr.selected)?;
        }
        Ok(stack)
    }
}

impl LayerStack {
    pub fn new() -> Self {
        Self::default()
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index < self.layers.len() {
            Ok(())
        } else {
            Err(MapError::IndexOutOfRange {
                index,
                len: self.layers.len(),
            })
        }
    }

    /// Insert `layer` on top of the stack. The selection keeps pointing at the
    /// layer it pointed at before.
    pub fn add_layer(&mut self, layer: Layer) {
        log::debug!("add layer '{}' ({})", layer.name, layer.id);
        let had_layers = !self.layers.is_empty();
        self.layers.insert(0, layer);
        if had_layers {
            self.selected += 1;
        }
    }

    pub fn remove_layer(&mut self, index: usize) -> Result<Layer> {
        self.check_index(index)?;
        let removed = self.layers.remove(index);
        if index < self.selected {
            self.selected -= 1;
        }
        self.selected = self.selected.min(self.layers.len().saturating_sub(1));
        log::debug!("removed layer '{}' at {index}", removed.name);
        Ok(removed)
    }

    pub fn clear(&mut self) {
        self.layers.clear();
        self.selected = 0;
    }

    pub fn select_layer(&mut self, index: usize) -> Result<()> {
        self.check_index(index)?;
        self.selected = index;
        Ok(())
    }

    pub fn selected_index(&self) -> Option<usize> {
        (!self.layers.is_empty()).then_some(self.selected)
    }

    pub fn selected_layer(&self) -> Option<&Layer> {
        self.layers.get(self.selected)
    }

    pub fn selected_layer_mut(&mut self) -> Option<&mut Layer> {
        self.layers.get_mut(self.selected)
    }

    /// Move the selection one layer toward the top. Layer order is unchanged.
    pub fn move_selected_up(&mut self) -> SelectionMove {
        match self.step_up() {
            Ok(to) => {
                let from = self.selected;
                self.selected = to;
                SelectionMove::Moved { from, to }
            }
            Err(outcome) => outcome,
        }
    }

    /// Move the selection one layer toward the bottom. Layer order is unchanged.
    pub fn move_selected_down(&mut self) -> SelectionMove {
        match self.step_down() {
            Ok(to) => {
                let from = self.selected;
                self.selected = to;
                SelectionMove::Moved { from, to }
            }
            Err(outcome) => outcome,
        }
    }

    /// Swap the selected layer with the one above it; it stays selected.
    pub fn raise_selected(&mut self) -> SelectionMove {
        match self.step_up() {
            Ok(to) => self.swap_selected(to),
            Err(outcome) => outcome,
        }
    }

    /// Swap the selected layer with the one below it; it stays selected.
    pub fn lower_selected(&mut self) -> SelectionMove {
        match self.step_down() {
            Ok(to) => self.swap_selected(to),
            Err(outcome) => outcome,
        }
    }

    fn step_up(&self) -> std::result::Result<usize, SelectionMove> {
        if self.layers.is_empty() {
            Err(SelectionMove::NoLayers)
        } else if self.selected == 0 {
            Err(SelectionMove::AlreadyAtTop)
        } else {
            Ok(self.selected - 1)
        }
    }

    fn step_down(&self) -> std::result::Result<usize, SelectionMove> {
        if self.layers.is_empty() {
            Err(SelectionMove::NoLayers)
        } else if self.selected + 1 >= self.layers.len() {
            Err(SelectionMove::AlreadyAtBottom)
        } else {
            Ok(self.selected + 1)
        }
    }

    fn swap_selected(&mut self, to: usize) -> SelectionMove {
        let from = self.selected;
        self.layers.swap(from, to);
        self.selected = to;
        log::debug!("layer '{}' moved {from} -> {to}", self.layers[to].name);
        SelectionMove::Moved { from, to }
    }

    pub fn layer(&self, index: usize) -> Option<&Layer> {
        self.layers.get(index)
    }

    pub fn layer_mut(&mut self, index: usize) -> Option<&mut Layer> {
        self.layers.get_mut(index)
    }

    pub fn get_by_id(&self, id: LayerId) -> Option<&Layer> {
        self.layers.iter().find(|l| l.id == id)
    }

    pub fn index_of(&self, id: LayerId) -> Option<usize> {
        self.layers.iter().position(|l| l.id == id)
    }

    pub fn all_layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn visible_layers(&self) -> impl Iterator<Item = &Layer> {
        self.layers.iter().filter(|l| l.visible)
    }

    /// Visible layers bottom to top, the order they must be painted in.
    pub fn draw_order(&self) -> impl Iterator<Item = &Layer> {
        self.layers.iter().rev().filter(|l| l.visible)
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Flip a layer's visibility and return the new state.
    pub fn toggle_visibility(&mut self, index: usize) -> Result<bool> {
        self.check_index(index)?;
        let layer = &mut self.layers[index];
        layer.visible = !layer.visible;
        Ok(layer.visible)
    }

    pub fn set_all_visible(&mut self, visible: bool) {
        for layer in &mut self.layers {
            layer.visible = visible;
        }
    }

    /// Bounding box over every layer, visible or not.
    pub fn bbox(&self) -> Option<BBox> {
        self.layers
            .iter()
            .filter_map(Layer::bbox)
            .reduce(|a, b| a.union(&b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use crate::geometry::Point;
    use crate::symbol::{PointSymbol, ShapeKind};

    fn layer(name: &str) -> Layer {
        Layer::new(
            name,
            PointSymbol::new(ShapeKind::HOLLOW_CIRCLE, Color::rgb(255, 0, 0), 6.0),
        )
    }

    fn names(stack: &LayerStack) -> Vec<&str> {
        stack.all_layers().iter().map(|l| l.name.as_str()).collect()
    }

    fn stack_of(names: &[&str]) -> LayerStack {
        let mut stack = LayerStack::new();
        for name in names.iter().rev() {
            stack.add_layer(layer(name));
        }
        if !stack.is_empty() {
            stack.select_layer(0).unwrap();
        }
        stack
    }

    #[test]
    fn test_add_layer_goes_on_top() {
        let mut stack = stack_of(&["a", "b", "c"]);
        stack.add_layer(layer("new"));
        assert_eq!(names(&stack), vec!["new", "a", "b", "c"]);
    }

    #[test]
    fn test_add_layer_keeps_selected_layer() {
        let mut stack = stack_of(&["a", "b"]);
        stack.select_layer(1).unwrap();
        stack.add_layer(layer("top"));
        assert_eq!(stack.selected_index(), Some(2));
        assert_eq!(stack.selected_layer().unwrap().name, "b");
    }

    #[test]
    fn test_remove_layer_bounds() {
        let mut stack = stack_of(&["a", "b"]);
        assert_eq!(
            stack.remove_layer(2).unwrap_err(),
            MapError::IndexOutOfRange { index: 2, len: 2 }
        );
        assert_eq!(stack.remove_layer(0).unwrap().name, "a");
        assert_eq!(names(&stack), vec!["b"]);
    }

    #[test]
    fn test_remove_adjusts_selection() {
        let mut stack = stack_of(&["a", "b", "c"]);
        stack.select_layer(2).unwrap();
        stack.remove_layer(0).unwrap();
        assert_eq!(stack.selected_layer().unwrap().name, "c");

        stack.remove_layer(1).unwrap();
        assert_eq!(stack.selected_index(), Some(0));
        stack.remove_layer(0).unwrap();
        assert_eq!(stack.selected_index(), None);
    }

    #[test]
    fn test_select_layer_bounds() {
        let mut stack = stack_of(&["a"]);
        assert!(matches!(
            stack.select_layer(3),
            Err(MapError::IndexOutOfRange { index: 3, len: 1 })
        ));
        assert_eq!(stack.selected_index(), Some(0));
    }

    #[test]
    fn test_move_selection_bounds() {
        let mut stack = stack_of(&["a", "b", "c"]);
        assert_eq!(stack.move_selected_up(), SelectionMove::AlreadyAtTop);
        assert_eq!(stack.selected_index(), Some(0));

        assert_eq!(stack.move_selected_down(), SelectionMove::Moved { from: 0, to: 1 });
        assert_eq!(stack.move_selected_down(), SelectionMove::Moved { from: 1, to: 2 });
        assert_eq!(stack.move_selected_down(), SelectionMove::AlreadyAtBottom);
        assert_eq!(stack.selected_index(), Some(2));
        // cursor only: order untouched
        assert_eq!(names(&stack), vec!["a", "b", "c"]);

        let mut empty = LayerStack::new();
        assert_eq!(empty.move_selected_up(), SelectionMove::NoLayers);
        assert_eq!(empty.move_selected_down(), SelectionMove::NoLayers);
    }

    #[test]
    fn test_raise_and_lower_reorder() {
        let mut stack = stack_of(&["a", "b", "c"]);
        stack.select_layer(2).unwrap();
        assert!(stack.raise_selected().is_moved());
        assert_eq!(names(&stack), vec!["a", "c", "b"]);
        assert_eq!(stack.selected_layer().unwrap().name, "c");
        stack.raise_selected();
        assert_eq!(stack.raise_selected(), SelectionMove::AlreadyAtTop);
        assert_eq!(names(&stack), vec!["c", "a", "b"]);

        stack.lower_selected();
        stack.lower_selected();
        assert_eq!(stack.lower_selected(), SelectionMove::AlreadyAtBottom);
        assert_eq!(names(&stack), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_clear_resets_selection() {
        let mut stack = stack_of(&["a", "b"]);
        stack.select_layer(1).unwrap();
        stack.clear();
        assert!(stack.is_empty());
        assert_eq!(stack.selected_index(), None);
        stack.add_layer(layer("x"));
        assert_eq!(stack.selected_index(), Some(0));
    }

    #[test]
    fn test_visibility_and_draw_order() {
        let mut stack = stack_of(&["a", "b", "c"]);
        assert!(!stack.toggle_visibility(1).unwrap());
        let order: Vec<&str> = stack.draw_order().map(|l| l.name.as_str()).collect();
        assert_eq!(order, vec!["c", "a"]);
        assert!(stack.toggle_visibility(5).is_err());

        stack.set_all_visible(false);
        assert_eq!(stack.visible_layers().count(), 0);
    }

    #[test]
    fn test_bbox_over_layers() {
        let mut stack = LayerStack::new();
        stack.add_layer(layer("a").with_features([Feature::point(Point::new(-5.0, 2.0))]));
        stack.add_layer(layer("b").with_features([Feature::new(vec![
            Point::new(0.0, 0.0),
            Point::new(10.0, 8.0),
        ])]));
        stack.add_layer(layer("empty"));
        let bb = stack.bbox().unwrap();
        assert_eq!(bb.min, Point::new(-5.0, 0.0));
        assert_eq!(bb.max, Point::new(10.0, 8.0));
        assert!(LayerStack::new().bbox().is_none());
    }

    #[test]
    fn test_lookup_by_id() {
        let stack = stack_of(&["a", "b"]);
        let id = stack.layer(1).unwrap().id;
        assert_eq!(stack.index_of(id), Some(1));
        assert_eq!(stack.get_by_id(id).unwrap().name, "b");
    }

    #[test]
    fn test_deserialize_checks_selection() {
        let mut stack = stack_of(&["a", "b", "c"]);
        stack.select_layer(2).unwrap();
        let json = serde_json::to_value(&stack).unwrap();
        let restored: LayerStack = serde_json::from_value(json.clone()).unwrap();
        assert_eq!(names(&restored), vec!["a", "b", "c"]);
        assert_eq!(restored.selected_index(), Some(2));

        let mut bad = json;
        bad["selected"] = 7.into();
        let err = serde_json::from_value::<LayerStack>(bad).unwrap_err();
        assert!(err.to_string().contains("Layer index 7 out of range for 3 layer(s)"), "{err}");

        let empty: LayerStack = serde_json::from_str(r#"{"layers":[],"selected":4}"#).unwrap();
        assert_eq!(empty.selected_index(), None);
        assert!(empty.selected_layer().is_none());
    }
}
