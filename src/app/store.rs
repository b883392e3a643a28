use chrono::{DateTime, Utc};

use crate::input::{AttachedFile, TranscriptInput};
use crate::summary::{HistoryEntry, SummaryResult};

/// Most entries the session history keeps.
pub const HISTORY_CAPACITY: usize = 10;

/// Shown when a failure carries no message of its own.
pub const DEFAULT_ERROR_MESSAGE: &str = "An error occurred while processing the transcript";

/// Which screen the window shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    Upload,
    Results,
}

/// The whole session state. One instance lives at the application root;
/// every mutation goes through [`transition`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppState {
    pub screen: Screen,
    pub transcript: TranscriptInput,
    pub summary: Option<SummaryResult>,
    pub is_processing: bool,
    pub error: Option<String>,
    /// Newest first, never longer than [`HISTORY_CAPACITY`].
    pub history: Vec<HistoryEntry>,
    /// Epoch of the transcript input. File reads capture it when they
    /// start; a completion whose epoch no longer matches is stale.
    pub input_epoch: u64,
    next_entry_seq: u64,
}

impl AppState {
    /// Whether a submission may start right now: nothing in flight and
    /// something to send. The Summarize control mirrors this.
    pub fn can_submit(&self) -> bool {
        !self.is_processing && self.transcript.is_submittable()
    }

    /// Whether a file read that started under `epoch` may still land.
    pub fn accepts_file_load(&self, epoch: u64) -> bool {
        self.input_epoch == epoch
    }
}

/// Everything that can happen to the session state.
#[derive(Debug, Clone)]
pub enum AppEvent {
    SetText(String),
    AttachFile(AttachedFile),
    /// Remove the attachment only; typed text stays.
    DetachFile,
    ClearInput,
    /// A new asynchronous file read is starting; outdates pending ones.
    FileLoadStarted,
    Submit,
    GatewayResolved {
        result: SummaryResult,
        /// When the response landed; the history entry's id and
        /// timestamp both derive from this one instant.
        received_at: DateTime<Utc>,
    },
    GatewayRejected(String),
    Back,
    NewTranscript,
    Reset,
}

/// Pure transition function. An event outside its precondition returns
/// the state unchanged; nothing here performs I/O or reads the clock.
pub fn transition(mut state: AppState, event: AppEvent) -> AppState {
    match event {
        AppEvent::SetText(text) => {
            state.transcript.set_text(text);
        }
        AppEvent::AttachFile(file) => {
            state.transcript.attach(file);
        }
        AppEvent::DetachFile => {
            state.transcript.detach();
            state.input_epoch += 1;
        }
        AppEvent::ClearInput => {
            state.transcript.clear();
            state.input_epoch += 1;
        }
        AppEvent::FileLoadStarted => {
            state.input_epoch += 1;
        }
        AppEvent::Submit => {
            if state.can_submit() {
                state.is_processing = true;
                state.error = None;
            }
        }
        AppEvent::GatewayResolved {
            result,
            received_at,
        } => {
            if state.is_processing {
                state.next_entry_seq += 1;
                let entry = HistoryEntry {
                    id: format!(
                        "{}-{:04}",
                        received_at.timestamp_millis(),
                        state.next_entry_seq
                    ),
                    timestamp: received_at.to_rfc3339(),
                    result: result.clone(),
                };
                state.history.insert(0, entry);
                state.history.truncate(HISTORY_CAPACITY);
                state.screen = Screen::Results;
                state.summary = Some(result);
                state.is_processing = false;
                state.error = None;
            }
        }
        AppEvent::GatewayRejected(message) => {
            if state.is_processing {
                let message = message.trim();
                state.error = Some(if message.is_empty() {
                    DEFAULT_ERROR_MESSAGE.to_string()
                } else {
                    message.to_string()
                });
                state.is_processing = false;
            }
        }
        AppEvent::Back => {
            if state.screen == Screen::Results {
                state.screen = Screen::Upload;
                state.summary = None;
                state.error = None;
            }
        }
        AppEvent::NewTranscript => {
            state.screen = Screen::Upload;
            state.summary = None;
            state.error = None;
        }
        AppEvent::Reset => {
            // Fresh defaults, but pending file reads must stay outdated
            // and entry ids unique for the whole process lifetime.
            let mut fresh = AppState::default();
            fresh.input_epoch = state.input_epoch + 1;
            fresh.next_entry_seq = state.next_entry_seq;
            state = fresh;
        }
    }
    state
}
