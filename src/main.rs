use std::{
    io::{self, Write},
    path::{Path, PathBuf},
};

use anyhow::{bail, Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use tracing::instrument;

use menuctl::{
    config::{self, Config},
    menu::{path_string, Menu, PathIndex, TextWrapper},
    platform,
    session::Session,
};

#[derive(Parser, Debug)]
#[command(name = "menuctl", version, about = "Hierarchical console menus")]
struct Cli {
    /// Verbosity (-v, -vv, -vvv). Logs go to stderr.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Menu definition to use instead of `MENUCTL_CONFIG` / the default locations.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Navigates the menu interactively.
    Run {
        /// Never clear the terminal between renders.
        #[arg(long)]
        no_clear: bool,
    },
    /// Prints the menu opened down to a path of zero-based child indices.
    Show {
        path: Vec<PathIndex>,
        /// Also list the entries under the last one in the path.
        #[arg(long)]
        expand: bool,
    },
    /// Prints the detail text of one entry.
    Details {
        #[arg(required = true)]
        path: Vec<PathIndex>,
    },
    /// Loads the menu definition and reports what it contains.
    Check,
    /// Writes a starter menu definition if none exists yet.
    Init,
    /// Prints the config path that would be used (if any).
    ConfigPath,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);
    let explicit = cli.config.as_deref();

    match cli.command {
        Command::Run { no_clear } => run(explicit, no_clear)?,
        Command::Show { path, expand } => {
            let mut menu = load_menu(explicit)?.0;
            ensure_path(&menu, &path)?;
            menu.set_expand_target(expand);
            let mut out = TextWrapper::string();
            menu.render_path(&mut out, &path).context("render menu")?;
            print!("{}", out.into_inner());
        }
        Command::Details { path } => {
            let menu = load_menu(explicit)?.0;
            ensure_path(&menu, &path)?;
            let mut out = TextWrapper::string();
            menu.render_details(&mut out, &path).context("render details")?;
            print!("{}", out.into_inner());
        }
        Command::Check => {
            let (menu, cfg) = load_menu(explicit)?;
            println!(
                "{} entries, {} at the top level",
                cfg.count_items(),
                menu.root().child_count()
            );
        }
        Command::Init => {
            let path = config::ensure_config_file_exists(explicit)?;
            println!("{}", path.display());
        }
        Command::ConfigPath => {
            if let Some(path) = config::resolve_config_path(explicit) {
                println!("{}", path.display());
            }
        }
    }

    Ok(())
}

#[instrument]
fn run(explicit: Option<&Path>, no_clear: bool) -> Result<()> {
    let (menu, cfg) = load_menu(explicit)?;
    let clear = !no_clear && cfg.clear_screen.unwrap_or(true);
    let mut screen = platform::screen(clear);

    let mut session = Session::new(menu).with_title(cfg.title.clone());
    session.run(io::stdin().lock(), io::stdout().lock(), screen.as_mut())?;
    io::stdout().flush().context("flush stdout")?;
    println!();
    Ok(())
}

fn load_menu(explicit: Option<&Path>) -> Result<(Menu, Config)> {
    let cfg = config::load_optional(explicit)?.unwrap_or_else(Config::sample);
    let menu = cfg.build_menu().context("build menu")?;
    Ok((menu, cfg))
}

fn ensure_path(menu: &Menu, path: &[PathIndex]) -> Result<()> {
    if !menu.is_valid_path(path) {
        bail!("no menu entry at path '{}'", path_string(path));
    }
    Ok(())
}

fn setup_logging(verbosity: u8) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let level = match verbosity {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(io::stderr)
        .with_target(false);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}
