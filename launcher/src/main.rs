use std::path::PathBuf;

use clap::{Parser, Subcommand};
use launcher::{
    client::ForjaClient,
    config::{LauncherConfig, DEFAULT_API_URL},
    error::LauncherError,
    install::{Installer, UpdateStatus},
    launch::GameRunner,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// `forja-launcher` command arguments.
#[derive(Debug, Parser)]
#[command(
    name = "forja-launcher",
    about = "Install, update and play games from your Forja library",
    version
)]
struct Cli {
    /// Base URL of the Forja API.
    #[arg(long, env = "FORJA_API_URL", default_value = DEFAULT_API_URL)]
    api_url: String,
    /// Access token from `POST /api/auth/login`.
    #[arg(long, env = "FORJA_TOKEN", hide_env_values = true)]
    token: Option<String>,
    /// Directory games are installed into.
    #[arg(long, env = "FORJA_INSTALL_DIR", default_value = "./games")]
    install_dir: PathBuf,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List owned games.
    Library,
    /// Show whether an installed game has an update.
    Status { game_id: i32 },
    /// Download and install the latest version.
    Install { game_id: i32 },
    /// Install the latest version if it is newer.
    Update { game_id: i32 },
    /// Run an installed game and report play time.
    Play {
        game_id: i32,
        /// Arguments passed to the game after `--`.
        #[arg(last = true)]
        args: Vec<String>,
    },
    /// Remove an installed game.
    Uninstall { game_id: i32 },
}

#[tokio::main]
async fn main() -> Result<(), LauncherError> {
    init_tracing();

    let cli = Cli::parse();
    let config = LauncherConfig::new(&cli.api_url, cli.token, cli.install_dir);
    let client = ForjaClient::new(&config)?;
    let installer = Installer::new(&client, &config.install_dir);

    match cli.command {
        Command::Library => {
            for entry in client.library().await? {
                tracing::info!(
                    "{:>6}  {}  latest {}  played {}m",
                    entry.game_id,
                    entry.title,
                    entry.latest_version.as_deref().unwrap_or("-"),
                    entry.play_time_seconds / 60
                );
            }
        }
        Command::Status { game_id } => match installer.check_update(game_id).await? {
            UpdateStatus::NotInstalled => tracing::info!("Game {} is not installed", game_id),
            UpdateStatus::NoRelease => tracing::info!("Game {} has no release", game_id),
            UpdateStatus::UpToDate { version } => {
                tracing::info!("Game {} is up to date ({})", game_id, version)
            }
            UpdateStatus::UpdateAvailable { local, remote } => {
                tracing::info!("Game {} can update from {} to {}", game_id, local, remote)
            }
        },
        Command::Install { game_id } => {
            let installed = installer.install(game_id, progress_printer()).await?;
            tracing::info!("Installed {}", installed.version);
        }
        Command::Update { game_id } => {
            match installer.update(game_id, progress_printer()).await? {
                Some(installed) => tracing::info!("Updated to {}", installed.version),
                None => tracing::info!("Nothing to update"),
            }
        }
        Command::Play { game_id, args } => {
            let session = GameRunner::new(&client, &config.install_dir)
                .play(game_id, &args)
                .await?;
            tracing::info!("Played for {}s", session.seconds);
        }
        Command::Uninstall { game_id } => installer.uninstall(game_id).await?,
    }

    Ok(())
}

fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info".into());
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Logs download progress in steps of 10%.
fn progress_printer() -> impl FnMut(u64, Option<u64>) {
    let mut last_step = None;

    move |written, total| {
        let Some(total) = total.filter(|total| *total > 0) else {
            return;
        };
        let step = written.saturating_mul(10) / total;
        if last_step != Some(step) {
            last_step = Some(step);
            tracing::info!("Downloading... {}%", step * 10);
        }
    }
}
