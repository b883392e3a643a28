use std::cell::RefCell;
use std::rc::Rc;

use crate::app::store::AppState;
use crate::config::Config;
use crate::input::AttachedFile;
use crate::stats::Stats;
use crate::summary::SummaryResult;
use crate::ui::results::ResultsWidgets;
use crate::ui::upload::UploadWidgets;

/// Events sent from background tasks to the GTK main thread.
#[derive(Debug, Clone)]
pub enum BackendEvent {
    SummaryReady(SummaryResult),
    SummaryFailed(String),
    FileLoaded { epoch: u64, file: AttachedFile },
    FileLoadFailed { epoch: u64, message: String },
    HealthChecked(bool),
}

/// Everything the GTK side holds on to. Lives on the main thread inside
/// Rc<RefCell<>>; background tasks report back through `backend_sender`.
pub struct AppContext {
    pub state: AppState,
    pub config: Config,
    pub stats: Stats,
    pub tokio_rt: tokio::runtime::Runtime,
    pub backend_sender: async_channel::Sender<BackendEvent>,

    // UI handles
    pub stack: Option<gtk4::Stack>,
    pub toast_overlay: Option<libadwaita::ToastOverlay>,
    pub upload: Option<UploadWidgets>,
    pub results: Option<ResultsWidgets>,
}

impl AppContext {
    pub fn new(sender: async_channel::Sender<BackendEvent>) -> Self {
        let config = Config::load();
        let stats = Stats::load();
        let tokio_rt = tokio::runtime::Runtime::new()
            .expect("Failed to create tokio runtime");

        Self {
            state: AppState::default(),
            config,
            stats,
            tokio_rt,
            backend_sender: sender,
            stack: None,
            toast_overlay: None,
            upload: None,
            results: None,
        }
    }
}

/// Show a toast over the window, once the overlay exists.
pub fn show_toast(ctx: &Rc<RefCell<AppContext>>, message: &str) {
    if let Some(ref overlay) = ctx.borrow().toast_overlay {
        overlay.add_toast(libadwaita::Toast::new(message));
    }
}
