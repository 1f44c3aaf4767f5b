//! Runtime bridge between the UI command queue and backend outcomes.

use std::{sync::Arc, thread};

use admin_core::{execute, Command};
use client_core::ResourceApi;
use crossbeam_channel::{Receiver, Sender};
use tracing::{debug, error, info, warn};

use crate::controller::events::{UiError, UiErrorContext, UiEvent};

/// Starts the worker thread. Each command runs as its own task, so a slow
/// request never holds up the ones queued behind it.
pub fn launch(api: Arc<dyn ResourceApi>, cmd_rx: Receiver<Command>, ui_tx: Sender<UiEvent>) {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                error!("failed to build backend runtime: {err}");
                let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                    UiErrorContext::BackendStartup,
                    format!("backend worker startup failure: {err}"),
                )));
                return;
            }
        };

        runtime.block_on(async move {
            info!("backend worker ready");
            while let Ok(command) = cmd_rx.recv() {
                let api = Arc::clone(&api);
                let ui_tx = ui_tx.clone();
                tokio::spawn(async move {
                    let name = command.name();
                    let resource = command.resource();
                    debug!(command = name, resource = resource.path(), "running backend command");
                    let outcome = execute(api.as_ref(), command).await;
                    if ui_tx.send(UiEvent::Outcome(outcome)).is_err() {
                        warn!(command = name, "ui closed before outcome was delivered");
                    }
                });
            }
            info!("command queue closed; backend worker stopping");
        });
    });
}
