use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

use chrono::Utc;

use super::pipeline::{dispatch_file_load, dispatch_health_check, dispatch_summarize};
use super::state::{AppContext, BackendEvent, show_toast};
use super::store::{transition, AppEvent, Screen};
use crate::ui;
use crate::ui::upload::UploadView;

/// Run one event through the store and bring the widgets in line.
pub fn dispatch(ctx: &Rc<RefCell<AppContext>>, event: AppEvent) {
    {
        let mut c = ctx.borrow_mut();
        let current = std::mem::take(&mut c.state);
        c.state = transition(current, event);
    }
    render(ctx);
}

/// Handle an event coming back from a background task.
pub fn handle_backend_event(ctx: &Rc<RefCell<AppContext>>, event: BackendEvent) {
    match event {
        BackendEvent::SummaryReady(result) => {
            // Only an outstanding submit lands; record it before the
            // render that shows the new totals.
            if ctx.borrow().state.is_processing {
                record_summary(ctx, result.processing_stats.words_processed);
            }
            dispatch(
                ctx,
                AppEvent::GatewayResolved {
                    result,
                    received_at: Utc::now(),
                },
            );
        }
        BackendEvent::SummaryFailed(message) => {
            log::error!("Summarization failed: {message}");
            dispatch(ctx, AppEvent::GatewayRejected(message));
        }
        BackendEvent::FileLoaded { epoch, file } => {
            if !ctx.borrow().state.accepts_file_load(epoch) {
                log::info!("Dropping stale file read for {}", file.name);
                return;
            }
            let preview = file.text_preview();
            dispatch(ctx, AppEvent::AttachFile(file));
            if let Some(text) = preview {
                dispatch(ctx, AppEvent::SetText(text));
            }
        }
        BackendEvent::FileLoadFailed { epoch, message } => {
            if !ctx.borrow().state.accepts_file_load(epoch) {
                return;
            }
            log::warn!("File load failed: {message}");
            show_toast(ctx, &message);
        }
        BackendEvent::HealthChecked(healthy) => {
            let upload = ctx.borrow().upload.clone();
            if let Some(ref upload) = upload {
                ui::upload::set_server_status(upload, healthy);
            }
        }
    }
}

/// The Summarize control was activated.
pub fn on_submit(ctx: &Rc<RefCell<AppContext>>) {
    if !ctx.borrow().state.can_submit() {
        return;
    }
    dispatch(ctx, AppEvent::Submit);
    dispatch_summarize(ctx);
}

/// Text in the editor changed.
pub fn on_text_edited(ctx: &Rc<RefCell<AppContext>>, text: String) {
    dispatch(ctx, AppEvent::SetText(text));
}

/// A file was picked in the chooser; its contents load off-thread.
pub fn on_file_picked(ctx: &Rc<RefCell<AppContext>>, path: PathBuf) {
    dispatch(ctx, AppEvent::FileLoadStarted);
    let epoch = ctx.borrow().state.input_epoch;
    dispatch_file_load(ctx, path, epoch);
}

pub fn on_remove_file(ctx: &Rc<RefCell<AppContext>>) {
    dispatch(ctx, AppEvent::DetachFile);
}

pub fn on_clear_input(ctx: &Rc<RefCell<AppContext>>) {
    dispatch(ctx, AppEvent::ClearInput);
}

/// Repaint every widget from current state, without an event.
pub fn refresh(ctx: &Rc<RefCell<AppContext>>) {
    render(ctx);
}

pub fn on_back(ctx: &Rc<RefCell<AppContext>>) {
    dispatch(ctx, AppEvent::Back);
}

pub fn on_new_transcript(ctx: &Rc<RefCell<AppContext>>) {
    dispatch(ctx, AppEvent::NewTranscript);
}

/// Clear the whole session back to its initial state.
pub fn on_clear_session(ctx: &Rc<RefCell<AppContext>>) {
    dispatch(ctx, AppEvent::Reset);
    show_toast(ctx, "Session cleared");
}

/// A new service URL was applied in the upload screen.
pub fn on_server_url_applied(ctx: &Rc<RefCell<AppContext>>, url: &str) {
    {
        let mut c = ctx.borrow_mut();
        let url = url.trim();
        c.config.api_base_url = if url.is_empty() {
            crate::config::DEFAULT_API_BASE_URL.to_string()
        } else {
            url.trim_end_matches('/').to_string()
        };
        if let Err(e) = c.config.save() {
            log::warn!("Failed to save config: {e}");
        }
    }
    dispatch_health_check(ctx);
}

fn record_summary(ctx: &Rc<RefCell<AppContext>>, words: u64) {
    let mut c = ctx.borrow_mut();
    c.stats.record_summary(words);
    if let Err(e) = c.stats.save() {
        log::warn!("Failed to save stats: {e}");
    }
}

/// Redraw from a snapshot taken up front: widget setters can fire
/// change signals that come straight back through [`dispatch`], so no
/// borrow may be held while they run.
fn render(ctx: &Rc<RefCell<AppContext>>) {
    let (stack, upload, results, screen, summary, view) = {
        let c = ctx.borrow();
        let view = UploadView {
            text: c.state.transcript.text.clone(),
            file: c
                .state
                .transcript
                .file
                .as_ref()
                .map(|f| format!("{} ({})", f.name, ui::format_size(f.bytes.len()))),
            is_processing: c.state.is_processing,
            can_submit: c.state.can_submit(),
            error: c.state.error.clone(),
            stats_line: format!(
                "{} summaries, {} words processed",
                c.stats.total_summaries, c.stats.total_words
            ),
        };
        (
            c.stack.clone(),
            c.upload.clone(),
            c.results.clone(),
            c.state.screen,
            c.state.summary.clone(),
            view,
        )
    };

    if let Some(ref stack) = stack {
        let name = match screen {
            Screen::Upload => "upload",
            Screen::Results => "results",
        };
        if stack.visible_child_name().as_deref() != Some(name) {
            stack.set_visible_child_name(name);
        }
    }

    if let Some(ref upload) = upload {
        ui::upload::sync(upload, &view);
    }

    if let (Some(ref results), Some(ref result)) = (results, summary) {
        ui::results::show_result(results, result);
    }
}
