use ringscore::{MetricsText, PaneType, RenderConfig, RenderCoordinator, ResultSet};
use std::error::Error;
use std::path::Path;

fn main() -> Result<(), Box<dyn Error>> {
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: {} <results.json> [rifle|pistol]", args[0]);
        std::process::exit(2);
    }

    let results = ResultSet::from_json_file(Path::new(&args[1]))?;
    let pane_type = match args.get(2).map(String::as_str) {
        Some("pistol") => PaneType::AirPistol,
        _ => PaneType::AirRifle,
    };

    let mut coordinator = RenderCoordinator::new(results, RenderConfig::default());
    let frame = coordinator.set_pane_type(pane_type)?;

    match (&frame.selection, &frame.report) {
        (Some(key), Some(report)) => {
            println!("{} / {}", key.shooter_name, key.timestamp);
            print!("{}", MetricsText(report));
        }
        _ => println!("No panes loaded."),
    }
    println!(
        "{} primitives at {:.3} px/mm",
        frame.primitives.len(),
        frame.resize_factor
    );
    Ok(())
}
