use std::sync::Arc;

mod backend_bridge;
mod controller;
mod ui;

use admin_core::Command;
use anyhow::{anyhow, Context, Result};
use clap::Parser;
use client_core::{load_settings, ApiClient, LookupFailurePolicy, Settings};
use crossbeam_channel::bounded;
use eframe::egui;

use crate::{controller::events::UiEvent, ui::AdminApp};

const APP_TITLE: &str = "Hifz School Admin";

/// Flags override `admin.toml` and the environment.
#[derive(Parser, Debug)]
#[command(name = "hifz-admin", about = "Desktop admin for the Hifz school API")]
struct Args {
    /// Base url of the REST API, e.g. http://127.0.0.1:8000/api
    #[arg(long)]
    api_base_url: Option<String>,
    /// render_empty or block_submit
    #[arg(long)]
    lookup_failure_policy: Option<LookupFailurePolicy>,
    /// tracing filter directive, e.g. "info,client_core=debug"
    #[arg(long)]
    log_filter: Option<String>,
}

impl Args {
    fn apply(self, settings: &mut Settings) {
        if let Some(url) = self.api_base_url {
            settings.api_base_url = url;
        }
        if let Some(policy) = self.lookup_failure_policy {
            settings.lookup_failure_policy = policy;
        }
        if let Some(filter) = self.log_filter {
            settings.log_filter = filter;
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    let mut settings = load_settings();
    args.apply(&mut settings);

    tracing_subscriber::fmt()
        .with_env_filter(settings.log_filter.as_str())
        .init();
    tracing::info!(
        api_base_url = %settings.api_base_url,
        lookup_failure_policy = %settings.lookup_failure_policy,
        "starting admin desktop"
    );

    let api = ApiClient::new(&settings.api_base_url).context("invalid api base url")?;
    let (cmd_tx, cmd_rx) = bounded::<Command>(256);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(1024);
    backend_bridge::runtime::launch(Arc::new(api), cmd_rx, ui_tx);

    let policy = settings.lookup_failure_policy;
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(APP_TITLE)
            .with_inner_size([1180.0, 760.0])
            .with_min_inner_size([860.0, 560.0]),
        ..Default::default()
    };
    eframe::run_native(
        APP_TITLE,
        options,
        Box::new(move |_cc| Ok(Box::new(AdminApp::new(cmd_tx, ui_rx, policy)))),
    )
    .map_err(|err| anyhow!("desktop shell failed: {err}"))
}
