mod args;
mod commands;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;
use workout_app::{
    AppConfig, AppPaths, AppState, ensure_app_data_dir, env_lookup, resolve_data_dir,
};

use args::{CliArgs, Command};

/// Everything a subcommand needs once settings are resolved.
pub struct Session {
    pub config: AppConfig,
    pub app_state: AppState,
}

fn main() -> Result<()> {
    let args = CliArgs::parse();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let session = start_session(&args)?;
    match args.command {
        Command::Ingest(ingest) => commands::ingest(&session, &ingest),
        Command::Render(render) => commands::render(&session, &render),
        Command::Serve(serve) => {
            let runtime = tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()
                .context("start async runtime")?;
            runtime.block_on(commands::serve(session, serve))
        }
    }
}

fn start_session(args: &CliArgs) -> Result<Session> {
    let data_dir = resolve_data_dir(args.data_dir.clone(), env_lookup)?;
    let paths = AppPaths::new(data_dir).with_config_path(args.config.clone());
    ensure_app_data_dir(&paths)
        .with_context(|| format!("create data dir {}", paths.app_data_dir.display()))?;

    let load = AppConfig::load(&paths.config_path, env_lookup)?;
    if load.created {
        tracing::info!(path = %load.path.display(), "created default config");
    }
    tracing::info!(
        data_dir = %paths.app_data_dir.display(),
        config = %load.path.display(),
        "settings loaded"
    );

    let app_state = AppState::from_config(&paths, &load.config);
    app_state.initialize()?;
    Ok(Session {
        config: load.config,
        app_state,
    })
}
