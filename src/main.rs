use clap::{
    CommandFactory, Parser,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};
use std::path::PathBuf;

use gmplayer::{
    cli, config, error, location,
    types::{ResultKind, Scope},
    warning,
};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  author=env!("CARGO_PKG_AUTHORS"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    /// The song you want to download/play
    #[clap(short, long, num_args = 0.., value_name = "QUERY", conflicts_with = "album")]
    song: Option<Vec<String>>,

    /// The album you want to download/play
    #[clap(short, long, num_args = 0.., value_name = "QUERY")]
    album: Option<Vec<String>>,

    /// Only search the songs in your own library
    #[clap(short, long)]
    library: bool,

    /// Only download (and tag) instead of playing
    #[clap(short, long)]
    downloadonly: bool,

    /// Print shell completions and exit
    #[clap(long, value_name = "SHELL")]
    completions: Option<Shell>,

    /// Search query, appended to the words given after --song/--album
    query: Vec<String>,
}

#[tokio::main]
async fn main() {
    if let Err(e) = config::load_env().await {
        warning!("Cannot load environment. Err: {}", e);
    }

    let cli = Cli::parse();

    if let Some(shell) = cli.completions {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        generate(shell, &mut cmd, name, &mut std::io::stdout());
        return;
    }

    let (kind, words) = match (cli.song, cli.album) {
        (Some(words), None) => (ResultKind::Track, words),
        (None, Some(words)) => (ResultKind::Album, words),
        _ => {
            let _ = Cli::command().print_help();
            std::process::exit(1);
        }
    };

    let query = words
        .into_iter()
        .chain(cli.query)
        .collect::<Vec<_>>()
        .join(" ");
    if query.trim().is_empty() {
        error!("Tell me what to look for, e.g. gmplayer --song <query>");
    }

    let settings_path =
        location::settings_path(std::env::var_os(config::ENV_SETTINGS).map(PathBuf::from));
    let settings = match config::load_settings(&settings_path).await {
        Ok(settings) => settings,
        Err(e) => error!("{}", e),
    };

    let options = cli::Options {
        scope: if cli.library {
            Scope::Library
        } else {
            Scope::Catalog
        },
        download_only: cli.downloadonly,
    };

    match kind {
        ResultKind::Track => cli::song(&settings, &query, options).await,
        ResultKind::Album => cli::album(&settings, &query, options).await,
    }
}
