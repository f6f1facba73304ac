use std::io::IsTerminal;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use filelist::app::App;
use filelist::config::{self, Overrides};
use filelist::logging::{self, Target};
use filelist::{output, tui, DirectoryModel};

#[derive(Parser, Debug)]
#[command(name = "filelist", version, about = "Browse a directory: folders first, hidden files left out")]
struct Cli {
    /// Directory to open (default: start_dir from config, else the working directory)
    path: Option<String>,

    /// Print the listing and exit instead of starting the UI
    #[arg(long)]
    list: bool,

    /// With --list, print JSON
    #[arg(long, requires = "list")]
    json: bool,

    /// Config file (default: <config dir>/filelist/config.json)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Show why a path was rejected instead of ignoring it
    #[arg(long)]
    report_invalid: bool,

    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(if cli.list { Target::Stderr } else { Target::Tui }, cli.verbose);

    let config = config::load(
        cli.config.clone(),
        Overrides {
            start_dir: cli.path.clone(),
            report_invalid_paths: cli.report_invalid.then_some(true),
        },
    )
    .context("failed to load configuration")?;

    let start = if config.start_dir.is_empty() {
        std::env::current_dir()
            .context("failed to resolve working directory")?
            .to_string_lossy()
            .to_string()
    } else {
        config.start_dir.clone()
    };

    if cli.list {
        let mut model = DirectoryModel::new();
        model
            .try_change_directory(&start)
            .with_context(|| format!("cannot list {}", start))?;
        let rendered = if cli.json {
            output::render_json(model.state())?
        } else {
            output::render_text(model.state(), std::io::stdout().is_terminal())
        };
        print!("{}", rendered);
        return Ok(());
    }

    info!(start = %start, "starting");
    let mut app = App::new(config);
    app.change_directory(&start);
    if app.model.path().is_empty() {
        app.input.set_text(&start);
    }

    let mut terminal = tui::init().context("failed to initialise terminal")?;
    let result = app.run(&mut terminal);
    tui::restore().context("failed to restore terminal")?;
    result.context("terminal error")?;
    Ok(())
}
