//! Render a small sample map to a PNG.
//!
//! Usage: `mapview-demo [OUTPUT.png] [SETTINGS.json]`

use std::process::ExitCode;

use mapview_core::{
    Color, DashPattern, Feature, Layer, LineSymbol, Map, Point, PointSymbol, PolygonSymbol,
    ShapeKind, Symbol,
};
use mapview_renderer::{render_pixmap, RenderError, RenderSettings};

fn sample_map() -> Map {
    let mut map = Map::new("demo");

    let lakes = Layer::new(
        "lakes",
        PolygonSymbol::new(Color::rgb(0, 0, 139), Color::rgb(173, 216, 230)),
    )
    .with_features([
        Feature::new(vec![
            Point::new(100.0, 120.0),
            Point::new(340.0, 90.0),
            Point::new(420.0, 260.0),
            Point::new(180.0, 330.0),
        ]),
        Feature::new(vec![
            Point::new(520.0, 380.0),
            Point::new(680.0, 360.0),
            Point::new(640.0, 520.0),
        ]),
    ]);

    let roads = Layer::new(
        "roads",
        LineSymbol::new(Color::rgb(139, 69, 19), 3.0, DashPattern::Solid),
    )
    .with_features([
        Feature::new(vec![
            Point::new(20.0, 560.0),
            Point::new(300.0, 420.0),
            Point::new(760.0, 80.0),
        ]),
        Feature::new(vec![Point::new(60.0, 40.0), Point::new(720.0, 560.0)]),
    ]);

    let town = PointSymbol::new(ShapeKind::DOTTED_CIRCLE, Color::rgb(220, 20, 60), 14.0);
    let towns = Layer::new("towns", town).with_features([Feature::new(vec![
        Point::new(300.0, 420.0),
        Point::new(450.0, 300.0),
        Point::new(620.0, 160.0),
    ])]);

    // Sites drawn with one random variant of the town marker each.
    let mut rng = rand::rng();
    let sites = [(150.0, 480.0), (560.0, 250.0), (700.0, 460.0)];
    let variants = Symbol::Point(town).random_variants(sites.len(), &mut rng);
    for (symbol, (x, y)) in variants.into_iter().zip(sites) {
        map.add_layer(Layer::new("site", symbol).with_features([Feature::point(Point::new(x, y))]));
    }

    map.add_layer(lakes);
    map.add_layer(roads);
    map.add_layer(towns);
    map
}

fn run() -> Result<(), RenderError> {
    let mut args = std::env::args().skip(1);
    let output = args.next().unwrap_or_else(|| "map.png".to_string());
    let settings = match args.next() {
        Some(path) => RenderSettings::from_json(&std::fs::read_to_string(path)?)?,
        None => RenderSettings::default(),
    };

    let mut map = sample_map();
    map.zoom_to_full_extent(
        settings.width as f64,
        settings.height as f64,
        settings.fit_margin,
    );

    let (surface, stats) = render_pixmap(&map, &settings)?;
    surface.save_png(&output)?;
    log::info!(
        "wrote {output} ({} layers, {} features)",
        stats.layers_drawn,
        stats.features_drawn
    );
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
