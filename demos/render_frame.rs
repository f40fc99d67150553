//! Load a catalogue, place it over an observing site and print the resulting draw list.
//!
//! ```text
//! cargo run --example render_frame -- [catalog.csv] [site name]
//! ```
//!
//! Without a CSV path the generated mock sky is used.
use std::env;
use std::sync::Arc;

use skymap::catalog::csv_reader::CsvCatalog;
use skymap::catalog::mock::MockCatalog;
use skymap::catalog::CatalogLoader;
use skymap::config::ViewConfig;
use skymap::gesture::GestureEvent;
use skymap::locations::{Location, LocationBook};
use skymap::scene::renderer::DrawCommand;
use skymap::settings::Settings;
use skymap::sky_view::SkyView;
use skymap::skymap_errors::SkyMapError;

const SITES: &str = r#"[
    {"name": "Islamabad", "latitude": 33.6844, "longitude": 73.0479},
    {"name": "Karachi", "latitude": 24.8607, "longitude": 67.0011},
    {"name": "Lahore", "latitude": 31.5204, "longitude": 74.3587},
    {"name": "Quetta", "latitude": 30.1798, "longitude": 66.9750}
]"#;

#[tokio::main]
async fn main() -> Result<(), SkyMapError> {
    tracing_subscriber::fmt::init();

    let mut args = env::args().skip(1);
    let catalog_path = args.next();
    let site_name = args.next().unwrap_or_else(|| "Islamabad".to_string());

    let book = LocationBook::from_json(SITES)?;
    let site: Location = book.by_name(&site_name);

    let mut view = SkyView::new(ViewConfig::default());
    view.set_viewport_size(1080.0, 1920.0);
    view.set_observer_location(site.latitude, site.longitude)?;
    view.apply_settings(Settings {
        show_faint_stars: true,
        ..Settings::default()
    });

    let mut loader = CatalogLoader::current()?;
    match catalog_path {
        Some(path) => view.begin_load(&mut loader, Arc::new(CsvCatalog::new(path))),
        None => view.begin_load(&mut loader, Arc::new(MockCatalog::default())),
    };
    let outcome = loader.next_outcome().await?;
    view.apply_load_outcome(outcome);
    println!("{} at {site:?}: {:?}", site.name, view.load_state());

    // pinch out so labels show up
    view.handle_gesture(GestureEvent::Scale { raw_factor: 1.6 }, std::time::Instant::now());

    let frame = view.render();
    println!(
        "zoom {:.2}: {} commands, {} drawn, {} culled, {} hidden, {} glows, {} lines",
        view.transform().zoom(),
        frame.commands.len(),
        frame.drawn,
        frame.culled,
        frame.hidden,
        frame.glow_count(),
        frame.line_count(),
    );

    for command in frame.commands.iter().take(15) {
        match command {
            DrawCommand::Background { width, height, .. } => {
                println!("background {width}x{height}")
            }
            DrawCommand::Glow { id, radius, color, .. } => {
                println!("  glow  {id:<18} r={radius:6.2} {}", color.to_hex())
            }
            DrawCommand::Body { id, center, radius, color } => println!(
                "  body  {id:<18} ({:7.1}, {:7.1}) r={radius:5.2} {}",
                center.x,
                center.y,
                color.to_hex()
            ),
            DrawCommand::Label { text, anchor, .. } => {
                println!("  label {text:<18} ({:7.1}, {:7.1})", anchor.x, anchor.y)
            }
            DrawCommand::Line { id, from, to, .. } => println!(
                "  line  {id:<18} ({:.0}, {:.0}) -> ({:.0}, {:.0})",
                from.x, from.y, to.x, to.y
            ),
        }
    }
    Ok(())
}
