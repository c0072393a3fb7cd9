use serde::{Deserialize, Serialize};

use mapview_core::{BBox, Brush, DrawingSurface, Pen, Point, Viewport};

/// One drawing call captured from a render pass, in screen coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawCommand {
    StrokeEllipse { bounds: BBox, pen: Pen },
    FillEllipse { bounds: BBox, brush: Brush },
    StrokeRect { bounds: BBox, pen: Pen },
    FillRect { bounds: BBox, brush: Brush },
    StrokePolyline { points: Vec<Point>, pen: Pen, closed: bool },
    FillPolygon { points: Vec<Point>, brush: Brush },
    AntiAlias { enabled: bool },
}

/// Complete render frame data handed from Rust to a frontend that does the
/// actual painting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderFrame {
    pub viewport: Viewport,
    pub commands: Vec<DrawCommand>,
}

impl RenderFrame {
    pub fn empty(viewport: Viewport) -> Self {
        Self {
            viewport,
            commands: Vec::new(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// A surface that records every call instead of painting.
#[derive(Debug)]
pub struct CommandRecorder {
    frame: RenderFrame,
    anti_alias: bool,
}

impl CommandRecorder {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            frame: RenderFrame::empty(viewport),
            anti_alias: false,
        }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.frame.commands
    }

    pub fn finish(self) -> RenderFrame {
        self.frame
    }

    fn push(&mut self, command: DrawCommand) {
        self.frame.commands.push(command);
    }
}

impl DrawingSurface for CommandRecorder {
    fn stroke_ellipse(&mut self, bounds: BBox, pen: &Pen) {
        self.push(DrawCommand::StrokeEllipse { bounds, pen: *pen });
    }

    fn fill_ellipse(&mut self, bounds: BBox, brush: &Brush) {
        self.push(DrawCommand::FillEllipse {
            bounds,
            brush: *brush,
        });
    }

    fn stroke_rect(&mut self, bounds: BBox, pen: &Pen) {
        self.push(DrawCommand::StrokeRect { bounds, pen: *pen });
    }

    fn fill_rect(&mut self, bounds: BBox, brush: &Brush) {
        self.push(DrawCommand::FillRect {
            bounds,
            brush: *brush,
        });
    }

    fn stroke_polyline(&mut self, points: &[Point], pen: &Pen, closed: bool) {
        self.push(DrawCommand::StrokePolyline {
            points: points.to_vec(),
            pen: *pen,
            closed,
        });
    }

    fn fill_polygon(&mut self, points: &[Point], brush: &Brush) {
        self.push(DrawCommand::FillPolygon {
            points: points.to_vec(),
            brush: *brush,
        });
    }

    fn set_anti_alias(&mut self, enabled: bool) {
        self.anti_alias = enabled;
        self.push(DrawCommand::AntiAlias { enabled });
    }

    fn anti_alias(&self) -> bool {
        self.anti_alias
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mapview_core::{Color, PolygonSymbol};

    #[test]
    fn test_recorder_keeps_call_order() {
        let mut rec = CommandRecorder::new(Viewport::default());
        let bounds = BBox::centered(Point::new(5.0, 5.0), 2.0, 2.0);
        rec.fill_ellipse(bounds, &Brush::new(Color::rgb(255, 0, 0)));
        rec.stroke_ellipse(bounds, &Pen::default());
        let frame = rec.finish();
        assert!(matches!(frame.commands[0], DrawCommand::FillEllipse { .. }));
        assert!(matches!(frame.commands[1], DrawCommand::StrokeEllipse { .. }));
    }

    #[test]
    fn test_frame_json_is_tagged() {
        let mut rec = CommandRecorder::new(Viewport::default());
        rec.set_anti_alias(true);
        let json = rec.finish().to_json().unwrap();
        assert!(json.contains(r#""op":"anti_alias""#));
        let back: RenderFrame = serde_json::from_str(&json).unwrap();
        assert_eq!(back.commands, vec![DrawCommand::AntiAlias { enabled: true }]);
    }

    #[test]
    fn test_polygon_hands_back_anti_alias() {
        let mut rec = CommandRecorder::new(Viewport::default());
        let ring = [
            Point::new(0.0, 0.0),
            Point::new(8.0, 0.0),
            Point::new(4.0, 6.0),
        ];
        PolygonSymbol::new(Color::BLACK, Color::rgb(255, 255, 0))
            .draw(&mut rec, &ring)
            .unwrap();
        assert!(!rec.anti_alias());
        assert_eq!(
            rec.commands().last(),
            Some(&DrawCommand::AntiAlias { enabled: false })
        );
    }
}
