//! The UI seam for collecting feedback from the user.
//!
//! The host UI toolkit implements [`FeedbackPrompt`] and drives the dialog;
//! this module only defines the exchange. Instead of a raw callback the
//! outcome travels through a channel: the prompt receives a single-use
//! [`PromptResponder`] whose `submit` and `cancel` consume it, so a dialog can
//! deliver its result at most once and a canceled dialog delivers nothing.

use crate::request::FeedbackData;
use std::sync::mpsc::{self, Receiver, SyncSender, TryRecvError};

pub const NOTES_HINT: &str = "Enter any feedback...";
pub const NOTES_VISIBLE_LINES: u32 = 5;

/// Presents a modal feedback dialog.
///
/// `show` must return immediately; the dialog delivers its outcome later
/// through the responder, from whatever thread the UI events run on.
pub trait FeedbackPrompt {
    fn show(&self, request: PromptRequest, responder: PromptResponder);
}

/// What the dialog should display.
#[derive(Debug, Clone)]
pub struct PromptRequest {
    pub title: String,
    /// Hint text for the notes field.
    pub hint: String,
    /// Visible line count for the notes field.
    pub visible_lines: u32,
    /// Initial state of the send-screenshot toggle.
    pub send_screenshot_default: bool,
}

impl Default for PromptRequest {
    fn default() -> Self {
        Self {
            title: "Feedback".to_string(),
            hint: NOTES_HINT.to_string(),
            visible_lines: NOTES_VISIBLE_LINES,
            send_screenshot_default: true,
        }
    }
}

/// Single-use handle for delivering the dialog outcome.
#[derive(Debug)]
pub struct PromptResponder {
    data: FeedbackData,
    tx: SyncSender<FeedbackData>,
}

impl PromptResponder {
    /// Fills the held feedback data with what the user entered and delivers it.
    pub fn submit(mut self, notes: String, send_screenshot: bool) {
        self.data.notes = notes;
        self.data.send_screenshot = send_screenshot;
        // a dropped receiver means the caller lost interest, nothing to do
        let _ = self.tx.send(self.data);
    }

    /// Discards the dialog outcome. Equivalent to dropping the responder.
    pub fn cancel(self) {}
}

/// Non-blocking view of a dialog's state.
#[derive(Debug)]
pub enum PromptStatus {
    /// The dialog is still open.
    Pending,
    Submitted(FeedbackData),
    Canceled,
}

/// Receives the outcome of one dialog.
#[derive(Debug)]
pub struct PromptHandle {
    rx: Receiver<FeedbackData>,
}

impl PromptHandle {
    /// Blocks until the dialog is confirmed or canceled.
    /// Returns `None` when it was canceled.
    pub fn wait(self) -> Option<FeedbackData> {
        self.rx.recv().ok()
    }

    /// Non-blocking check for the outcome.
    pub fn status(&self) -> PromptStatus {
        match self.rx.try_recv() {
            Ok(data) => PromptStatus::Submitted(data),
            Err(TryRecvError::Empty) => PromptStatus::Pending,
            Err(TryRecvError::Disconnected) => PromptStatus::Canceled,
        }
    }
}

/// Shows the prompt and returns a handle for the outcome.
///
/// When `initial` is given its screenshot and file name are carried through to
/// the delivered data; otherwise a fresh [`FeedbackData`] is created.
pub fn collect_feedback(
    prompt: &impl FeedbackPrompt,
    initial: Option<FeedbackData>,
) -> PromptHandle {
    let (tx, rx) = mpsc::sync_channel(1);
    let responder = PromptResponder {
        data: initial.unwrap_or_default(),
        tx,
    };
    prompt.show(PromptRequest::default(), responder);
    PromptHandle { rx }
}
