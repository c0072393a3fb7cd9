use serde::{Deserialize, Serialize};

use mapview_core::{DrawingSurface, Map};

use crate::error::Result;
use crate::pixmap::PixmapSurface;
use crate::render_data::{CommandRecorder, RenderFrame};
use crate::settings::RenderSettings;

/// Counters from one render pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderStats {
    pub layers_drawn: usize,
    pub features_drawn: usize,
    /// Features with too few vertices for their layer's symbol.
    pub features_skipped: usize,
}

/// Draw every visible layer of `map` onto `surface`, bottom layer first so the
/// topmost layer (index 0) ends up on top.
///
/// A malformed feature is skipped with a warning; it never aborts the pass.
pub fn render<S: DrawingSurface + ?Sized>(map: &Map, surface: &mut S) -> RenderStats {
    let mut stats = RenderStats::default();
    let viewport = &map.viewport;

    for layer in map.layers().draw_order() {
        let symbol = layer.symbol();
        for (i, feature) in layer.features.iter().enumerate() {
            let screen = viewport.path_to_screen(&feature.vertices);
            match symbol.draw(surface, &screen) {
                Ok(()) => stats.features_drawn += 1,
                Err(e) => {
                    log::warn!("layer '{}': skipping feature {i}: {e}", layer.name);
                    stats.features_skipped += 1;
                }
            }
        }
        stats.layers_drawn += 1;
    }

    log::debug!(
        "rendered {} layer(s), {} feature(s), {} skipped",
        stats.layers_drawn,
        stats.features_drawn,
        stats.features_skipped
    );
    stats
}

/// Record a render pass as a serializable frame.
pub fn render_frame(map: &Map) -> (RenderFrame, RenderStats) {
    let mut recorder = CommandRecorder::new(map.viewport);
    let stats = render(map, &mut recorder);
    (recorder.finish(), stats)
}

/// Rasterize `map` with the given output settings.
pub fn render_pixmap(map: &Map, settings: &RenderSettings) -> Result<(PixmapSurface, RenderStats)> {
    let mut surface = PixmapSurface::new(settings.width, settings.height)?;
    surface.clear(settings.background);
    surface.set_anti_alias(settings.anti_alias);
    let stats = render(map, &mut surface);
    log::info!(
        "rasterized '{}' at {}x{}: {} feature(s) drawn",
        map.name,
        settings.width,
        settings.height,
        stats.features_drawn
    );
    Ok((surface, stats))
}
