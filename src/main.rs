use clap::Parser;
use log::{error, info};
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::error::Error;
use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::sync::mpsc;

use panenav::core::config::{self, CliOverrides};
use panenav::core::{Navigator, Notification, TypeSectionGrouper};
use panenav::demo::{self, DeploymentDetails, DeploymentFeed};
use panenav::headless;
use panenav::render::theme::{Palette, Theme};
use panenav::tui;

#[derive(Parser)]
#[command(name = "panenav", about = "Two-pane navigator for hierarchical data")]
struct Args {
    /// JSON tree to browse (defaults to a built-in sample deployment)
    #[arg(short, long)]
    tree: Option<PathBuf>,

    /// Print a single snapshot instead of running interactively
    #[arg(long)]
    headless: bool,

    /// Colour palette
    #[arg(short, long, value_enum)]
    palette: Option<Palette>,

    /// Levels shown inline before Enter drills down instead
    #[arg(long)]
    max_expand_depth: Option<usize>,

    /// Title shown above the list
    #[arg(long)]
    title: Option<String>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, value_parser = parse_level)]
    log_level: Option<LevelFilter>,
}

fn parse_level(s: &str) -> Result<LevelFilter, String> {
    s.parse().map_err(|_| format!("invalid log level '{s}'"))
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let file_config = config::load_config()?;
    let resolved = config::resolve(
        &file_config,
        &CliOverrides {
            palette: args.palette,
            headless: args.headless.then_some(true),
            max_expand_depth: args.max_expand_depth,
            title: args.title.clone(),
            log_level: args.log_level,
        },
    );

    // Initialize file logger; the terminal belongs to the UI
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();
    if let Ok(log_file) = File::create(&resolved.log_file) {
        let _ = WriteLogger::init(resolved.log_level, log_config, log_file);
    }

    info!("Panenav starting up with palette: {}", resolved.palette);

    let nodes = match &args.tree {
        Some(path) => demo::load_tree(path)?,
        None => demo::sample_deployment(),
    };

    let theme = Theme::new(resolved.palette);
    let feed = DeploymentFeed::new(nodes, theme);

    let mut navigator = Navigator::new(resolved.navigator_config(), DeploymentDetails)
        .with_grouper(TypeSectionGrouper::new(resolved.section_names.clone()));
    navigator.set_items(feed.items());

    if headless::is_headless(resolved.headless) {
        info!("Running headless");
        headless::print_snapshot(&mut navigator, &mut io::stdout().lock())?;
        return Ok(());
    }

    let (tx, rx) = mpsc::channel();
    let _feed = feed.spawn(resolved.refresh_interval, tx);

    tui::run(&mut navigator, rx, |notification| match notification {
        Notification::SelectionChanged(item) => info!("Selected {}", item.id()),
        Notification::Expanded { item, expanded } => {
            info!("{} {}", if *expanded { "Expanded" } else { "Collapsed" }, item.id())
        }
        Notification::DrilledDown(item) => info!("Drilled into {}", item.id()),
        Notification::NavigatedBack { parent_id } => info!("Back out of {}", parent_id),
        Notification::BackAtRoot | Notification::Quit => {}
    })
    .inspect_err(|e| error!("Terminal error: {}", e))?;

    info!("Panenav shutting down");
    Ok(())
}
