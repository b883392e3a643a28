mod event_handler;
mod pipeline;
mod state;
pub mod store;

pub use event_handler::{
    handle_backend_event, on_back, on_clear_input, on_clear_session, on_file_picked,
    on_new_transcript, on_remove_file, on_server_url_applied, on_submit, on_text_edited, refresh,
};
pub use pipeline::dispatch_health_check;
pub use state::{show_toast, AppContext, BackendEvent};
