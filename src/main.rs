use anyhow::{Context, Result};
use camino::Utf8PathBuf;
use clap::Parser;
use floorwright::config::{RouteMode, load_config};
use floorwright::ingest::load_csv;
use floorwright::{EditorState, Scene};

#[derive(Parser, Debug)]
#[command(author, version, about = "Lay out a hardmacro adjacency matrix and print the routed floorplan as JSON", long_about = None)]
struct Cli {
    /// Adjacency matrix CSV (header row of labels, one labelled row per block)
    #[arg(value_name = "MATRIX_CSV")]
    matrix: Utf8PathBuf,

    /// JSON config overriding layout, port, routing and handle constants
    #[arg(long, value_name = "FILE")]
    config: Option<Utf8PathBuf>,

    /// Bridge style between the two Z-jogs of every connection
    #[arg(long, value_name = "straight|manhattan")]
    mode: Option<RouteMode>,

    /// Pointer gesture script replayed before the scene is printed
    #[arg(long, value_name = "FILE")]
    script: Option<Utf8PathBuf>,

    /// Print single-line JSON
    #[arg(long)]
    compact: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut config = load_config(cli.config.as_deref().map(|p| p.as_std_path()))?;
    if let Some(mode) = cli.mode {
        config.route.mode = mode;
    }

    let floorplan = load_csv(&cli.matrix, &config.layout)?;
    let mut state = EditorState::new(floorplan, config);

    if let Some(script) = &cli.script {
        let text = std::fs::read_to_string(script).with_context(|| format!("Open {}", script))?;
        let applied = state
            .replay(&text)
            .with_context(|| format!("Failed to replay {}", script))?;
        log::info!("replayed {} pointer events from {}", applied, script);
    }

    let scene = Scene::build(&mut state);
    let json = if cli.compact {
        serde_json::to_string(&scene)?
    } else {
        serde_json::to_string_pretty(&scene)?
    };
    println!("{}", json);
    Ok(())
}
