#![deny(clippy::print_stdout, clippy::print_stderr, clippy::unwrap_used)]

//! Used to collect and submit user feedback to the feedback service.
//! See the FeedbackClient struct for more details.
//!
//! ```rust,no_run
//! use feedback_client::{AppIdentity, FeedbackClient, FeedbackData};
//!
//! let identity = AppIdentity::new("my-app-id", "android", "shared-secret");
//! let client = FeedbackClient::new("https://feedback.example.com".to_string(), identity, "my-sdk".to_string(), "1.0.0".to_string()).unwrap();
//! let accepted = client.submit_feedback(&FeedbackData::new("the app crashed on startup"));
//! ```
//!

mod auth;
mod device_log;
mod error;
mod feedback_client;
mod multipart;
mod prompt;
mod request;
mod screenshot;

pub use self::{
    auth::{hmac_auth_header, AppIdentity},
    device_log::{read_recent_log, try_read_recent_log, LogDumpCommand},
    error::{FeedbackClientError, FeedbackClientResult},
    feedback_client::{api, FeedbackClient},
    multipart::{random_boundary, MultipartBody, Part},
    prompt::{
        collect_feedback, FeedbackPrompt, PromptHandle, PromptRequest, PromptResponder,
        PromptStatus, NOTES_HINT, NOTES_VISIBLE_LINES,
    },
    request::{CustomParams, FeedbackData},
    screenshot::{encode_png, new_screenshot_file_name, screenshot_file_location},
};
// the screenshot bitmap type is part of the API and thus re-exported
pub use image::RgbaImage;
