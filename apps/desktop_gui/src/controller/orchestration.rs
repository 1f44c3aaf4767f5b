//! Command orchestration from UI actions to the backend command queue.

use admin_core::Command;
use crossbeam_channel::{Sender, TrySendError};

use crate::controller::events::{UiError, UiErrorContext};

pub fn dispatch_backend_command(cmd_tx: &Sender<Command>, cmd: Command) -> Result<(), UiError> {
    let cmd_name = cmd.name();
    let resource = cmd.resource().path();

    match cmd_tx.try_send(cmd) {
        Ok(()) => {
            tracing::debug!(command = cmd_name, resource, "queued ui->backend command");
            Ok(())
        }
        Err(TrySendError::Full(_)) => Err(UiError::from_message(
            UiErrorContext::CommandQueue,
            "UI command queue is full; please retry",
        )),
        Err(TrySendError::Disconnected(_)) => Err(UiError::from_message(
            UiErrorContext::CommandQueue,
            "Backend command processor disconnected; restart the application",
        )),
    }
}

#[cfg(test)]
#[path = "tests/orchestration_tests.rs"]
mod tests;
