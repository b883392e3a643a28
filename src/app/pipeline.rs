use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use super::state::{AppContext, BackendEvent};
use crate::gateway::SummarizeClient;
use crate::input::{AttachError, AttachedFile, MAX_FILE_BYTES};

/// Dispatch the current input to the summarization service on the tokio
/// runtime. The outcome comes back as a [`BackendEvent`].
pub fn dispatch_summarize(ctx: &Rc<RefCell<AppContext>>) {
    let c = ctx.borrow();
    let client = SummarizeClient::new(&c.config.api_base_url);
    let input = c.state.transcript.clone();
    let sender = c.backend_sender.clone();

    c.tokio_rt.spawn(async move {
        match client.create_summary(&input).await {
            Ok(result) => {
                let _ = sender.send(BackendEvent::SummaryReady(result)).await;
            }
            Err(e) => {
                log::warn!("Summarization failed: {e}");
                let _ = sender
                    .send(BackendEvent::SummaryFailed(e.to_string()))
                    .await;
            }
        }
    });
}

/// Read a picked file off the main thread. `epoch` ties the completion
/// to the input generation it was started under; the receiver drops
/// completions whose epoch no longer matches.
pub fn dispatch_file_load(ctx: &Rc<RefCell<AppContext>>, path: PathBuf, epoch: u64) {
    let c = ctx.borrow();
    let sender = c.backend_sender.clone();

    c.tokio_rt.spawn(async move {
        match read_attachment(&path).await {
            Ok(file) => {
                let _ = sender.send(BackendEvent::FileLoaded { epoch, file }).await;
            }
            Err(message) => {
                let _ = sender
                    .send(BackendEvent::FileLoadFailed { epoch, message })
                    .await;
            }
        }
    });
}

/// Load a picked file into memory. Oversized files are refused from
/// their metadata, before any contents are read. `Err` carries the
/// user-facing message.
async fn read_attachment(path: &Path) -> Result<AttachedFile, String> {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "transcript".to_string());

    let len = tokio::fs::metadata(path)
        .await
        .map_err(|e| format!("Could not read file: {e}"))?
        .len();
    if len > MAX_FILE_BYTES as u64 {
        return Err(AttachError::TooLarge { size: len as usize }.to_string());
    }

    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| format!("Could not read file: {e}"))?;
    AttachedFile::from_bytes(name, bytes).map_err(|e| e.to_string())
}

/// Probe the service health endpoint and report reachability.
pub fn dispatch_health_check(ctx: &Rc<RefCell<AppContext>>) {
    let c = ctx.borrow();
    let client = SummarizeClient::new(&c.config.api_base_url);
    let sender = c.backend_sender.clone();

    c.tokio_rt.spawn(async move {
        let healthy = match client.health().await {
            Ok(()) => true,
            Err(e) => {
                log::debug!("Health check failed: {e}");
                false
            }
        };
        let _ = sender.send(BackendEvent::HealthChecked(healthy)).await;
    });
}
