//! ringscore CLI — score shot groups and plan target-face drawings.

use clap::{Args, Parser, Subcommand, ValueEnum};
use ringscore::{
    MetricsText, PaneType, RenderConfig, RenderCoordinator, ResultSet, ZoomDirection,
    LABELED_RINGS,
};
use std::path::{Path, PathBuf};

type CliError = Box<dyn std::error::Error>;
type CliResult<T> = Result<T, CliError>;

#[derive(Parser)]
#[command(name = "ringscore")]
#[command(about = "Score air rifle / air pistol shot groups and lay out the target face")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List shooters found in a result file.
    Shooters {
        /// Path to the parsed results (JSON).
        #[arg(long)]
        results: PathBuf,
    },

    /// List pane timestamps of one shooter.
    Panes {
        /// Path to the parsed results (JSON).
        #[arg(long)]
        results: PathBuf,
        /// Shooter name (defaults to the first shooter).
        #[arg(long)]
        shooter: Option<String>,
    },

    /// Print the metrics report for a pane.
    Evaluate(SelectionArgs),

    /// Replay a view session and write the resulting frame (JSON).
    Render(CliRenderArgs),

    /// Print the ring table of a target face.
    PaneInfo {
        #[arg(long, value_enum, default_value_t = PaneTypeArg::Rifle)]
        pane_type: PaneTypeArg,
    },
}

#[derive(Debug, Clone, Args)]
struct SelectionArgs {
    /// Path to the parsed results (JSON).
    #[arg(long)]
    results: PathBuf,

    /// Shooter name (defaults to the first shooter).
    #[arg(long)]
    shooter: Option<String>,

    /// Pane timestamp (defaults to the shooter's first pane).
    #[arg(long)]
    pane: Option<String>,

    /// Target face used for scoring and layout.
    #[arg(long, value_enum, default_value_t = PaneTypeArg::Rifle)]
    pane_type: PaneTypeArg,
}

#[derive(Debug, Clone, Args)]
struct CliRenderArgs {
    #[command(flatten)]
    selection: SelectionArgs,

    /// Path to write the frame (JSON).
    #[arg(long)]
    out: PathBuf,

    /// Optional render configuration (JSON).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Canvas width in pixels.
    #[arg(long)]
    width: Option<f64>,

    /// Canvas height in pixels.
    #[arg(long)]
    height: Option<f64>,

    /// Pellet diameter in mm.
    #[arg(long)]
    bullet_diameter: Option<f64>,

    /// Zoom steps applied in order, e.g. `--zoom in,in,out`.
    #[arg(long, value_enum, value_delimiter = ',')]
    zoom: Vec<ZoomArg>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum PaneTypeArg {
    Rifle,
    Pistol,
}

impl PaneTypeArg {
    fn to_core(self) -> PaneType {
        match self {
            Self::Rifle => PaneType::AirRifle,
            Self::Pistol => PaneType::AirPistol,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ZoomArg {
    In,
    Out,
}

impl ZoomArg {
    fn to_core(self) -> ZoomDirection {
        match self {
            Self::In => ZoomDirection::In,
            Self::Out => ZoomDirection::Out,
        }
    }
}

fn main() -> CliResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Shooters { results } => run_shooters(&results),
        Commands::Panes { results, shooter } => run_panes(&results, shooter.as_deref()),
        Commands::Evaluate(args) => run_evaluate(&args),
        Commands::Render(args) => run_render(&args),
        Commands::PaneInfo { pane_type } => run_pane_info(pane_type.to_core()),
    }
}

// ── shooters / panes ───────────────────────────────────────────────────

fn run_shooters(path: &Path) -> CliResult<()> {
    let results = ResultSet::from_json_file(path)?;
    for name in results.shooter_names() {
        println!("{}", name);
    }
    Ok(())
}

fn run_panes(path: &Path, shooter: Option<&str>) -> CliResult<()> {
    let results = ResultSet::from_json_file(path)?;
    let shooter = match shooter {
        Some(s) => s.to_string(),
        None => results
            .shooter_names()
            .into_iter()
            .next()
            .ok_or_else(|| -> CliError { "result file contains no shooters".into() })?,
    };

    let panes = results.pane_timestamps(&shooter);
    if panes.is_empty() {
        return Err(format!("no panes for shooter '{}'", shooter).into());
    }
    println!("{}", shooter);
    for ts in panes {
        println!("  {}", ts);
    }
    Ok(())
}

// ── evaluate ───────────────────────────────────────────────────────────

fn open_session(args: &SelectionArgs, mut config: RenderConfig) -> CliResult<RenderCoordinator> {
    let results = ResultSet::from_json_file(&args.results)?;
    config.pane_type = args.pane_type.to_core();
    let mut coordinator = RenderCoordinator::new(results, config);

    match (&args.shooter, &args.pane) {
        (Some(shooter), Some(pane)) => {
            coordinator.select_pane(shooter, pane)?;
        }
        (Some(shooter), None) => {
            coordinator.select_shooter(shooter)?;
        }
        (None, Some(_)) => return Err("--pane requires --shooter".into()),
        (None, None) => {}
    }
    Ok(coordinator)
}

fn run_evaluate(args: &SelectionArgs) -> CliResult<()> {
    let mut coordinator = open_session(args, RenderConfig::default())?;
    let frame = coordinator.redraw()?;

    let (Some(key), Some(report)) = (&frame.selection, &frame.report) else {
        return Err("selection does not match any pane".into());
    };
    println!(
        "{} / {} ({})",
        key.shooter_name, key.timestamp, report.pane_type
    );
    print!("{}", MetricsText(report));
    Ok(())
}

// ── render ─────────────────────────────────────────────────────────────

fn run_render(args: &CliRenderArgs) -> CliResult<()> {
    let mut config = match &args.config {
        Some(path) => RenderConfig::from_json_file(path)?,
        None => RenderConfig::default(),
    };
    if let Some(d) = args.bullet_diameter {
        config.bullet_diameter_mm = d;
    }
    config.validate()?;

    let mut coordinator = open_session(&args.selection, config)?;
    let mut frame = coordinator.redraw()?;

    let canvas = coordinator.state().canvas;
    let (width, height) = (
        args.width.unwrap_or(canvas[0]),
        args.height.unwrap_or(canvas[1]),
    );
    if [width, height] != canvas {
        frame = coordinator.on_resize(width, height)?;
    }

    for step in &args.zoom {
        frame = coordinator.zoom(step.to_core())?;
    }

    tracing::info!(
        "Frame: {} primitives, {:.3} px/mm on {}x{}",
        frame.primitives.len(),
        frame.resize_factor,
        frame.canvas[0],
        frame.canvas[1],
    );
    if frame.report.is_none() {
        tracing::warn!("no pane selected; frame holds the empty face only");
    }

    let json = serde_json::to_string_pretty(&frame)?;
    std::fs::write(&args.out, &json)?;
    tracing::info!("Frame written to {}", args.out.display());
    Ok(())
}

// ── pane-info ──────────────────────────────────────────────────────────

fn run_pane_info(pane_type: PaneType) -> CliResult<()> {
    pane_type.validate()?;

    println!("{}", pane_type);
    println!("  outer diameter:   {} mm", pane_type.default_outer_diameter_mm());
    println!("  aiming black:     {} mm", pane_type.inner_diameter_mm());
    println!("  scoring divisor:  {}", pane_type.scoring_divisor());
    let t = pane_type.marker_thresholds();
    println!("  marker bands:     < {} red, < {} yellow", t.inner, t.outer);

    let widths = pane_type.ring_widths_mm();
    let radii = pane_type.boundary_radii_mm();
    println!("  rings (outside in):");
    for (i, (w, r)) in widths.iter().zip(&radii).rev().enumerate() {
        let label = if i < LABELED_RINGS {
            (i + 1).to_string()
        } else {
            "-".to_string()
        };
        println!("    {:>2}  radius {:>6.2} mm  width {:>5.2} mm", label, r, w);
    }
    Ok(())
}
