use std::fs;
use std::io;
use std::net::SocketAddr;
use std::process::Command;

use anyhow::{Context, Result};
use http_api::HttpState;
use ingest::JsonExportProvider;

use crate::Session;
use crate::args::{IngestArgs, RenderArgs, ServeArgs};

pub fn ingest(session: &Session, args: &IngestArgs) -> Result<()> {
    let provider = JsonExportProvider::from_arg(&args.input);
    let stats = session
        .app_state
        .services
        .ingest
        .run(&provider)
        .with_context(|| format!("ingest from {}", args.input))?;
    println!(
        "Stored {} new workouts ({} already stored, {} excluded, {} skipped, {} unreadable, \
         {} field warnings).",
        stats.inserted,
        stats.already_present,
        stats.excluded,
        stats.skipped,
        stats.rejected.len(),
        stats.issues.len()
    );
    Ok(())
}

pub fn render(session: &Session, args: &RenderArgs) -> Result<()> {
    let views = session.app_state.services.dashboard.views()?;
    let page = http_api::render_dashboard_page(&views).context("render dashboard")?;
    if let Some(parent) = args.output.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("create {}", parent.display()))?;
    }
    fs::write(&args.output, page)
        .with_context(|| format!("write {}", args.output.display()))?;
    tracing::info!(
        output = %args.output.display(),
        workouts = views.summary.total_workouts,
        "dashboard written"
    );
    Ok(())
}

pub async fn serve(session: Session, args: ServeArgs) -> Result<()> {
    let port = args.port.unwrap_or(session.config.dashboard.port);
    let router = http_api::router(HttpState::new(session.app_state));

    let (listener, actual_port, used_fallback) = bind_port(port).await?;
    let url = format!("http://127.0.0.1:{actual_port}");

    if used_fallback {
        tracing::warn!(
            configured = port,
            actual = actual_port,
            "configured port was unavailable, using an ephemeral port for this run"
        );
    }

    println!("Workout dashboard is running at {url}");
    println!("Press Ctrl+C to stop.");

    if !args.no_open {
        if let Err(err) = open_url(&url) {
            tracing::warn!(error = %err, "failed to open browser");
        }
    }

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    tracing::info!("dashboard stopped");
    Ok(())
}

async fn bind_port(port: u16) -> Result<(tokio::net::TcpListener, u16, bool), io::Error> {
    if port == 0 {
        let listener = tokio::net::TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        let actual_port = listener.local_addr()?.port();
        return Ok((listener, actual_port, false));
    }

    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => Ok((listener, port, false)),
        Err(_) => {
            let listener =
                tokio::net::TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
            let actual_port = listener.local_addr()?.port();
            Ok((listener, actual_port, true))
        }
    }
}

fn open_url(url: &str) -> Result<(), io::Error> {
    let status = if cfg!(target_os = "macos") {
        Command::new("open").arg(url).status()?
    } else if cfg!(target_os = "windows") {
        Command::new("cmd").args(["/C", "start", "", url]).status()?
    } else {
        Command::new("xdg-open").arg(url).status()?
    };
    if status.success() {
        Ok(())
    } else {
        Err(io::Error::other("open command failed"))
    }
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}
