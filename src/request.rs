//! Contains types used to build feedback submissions.

use crate::error::{FeedbackClientError, FeedbackClientResult};
use image::RgbaImage;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// User feedback collected by the prompt and submitted to the service.
/// See FeedbackClient::submit_feedback.
#[derive(Debug, Clone, Default)]
pub struct FeedbackData {
    /// Free-form notes entered by the user. May be empty, but is always sent.
    pub notes: String,
    /// Screenshot captured before the prompt was shown, if any.
    pub screenshot: Option<RgbaImage>,
    /// Whether the user confirmed sending the screenshot.
    pub send_screenshot: bool,
    /// File name for the screenshot part. A placeholder is used when unset.
    pub screenshot_name: Option<String>,
}

impl FeedbackData {
    pub fn new(notes: impl Into<String>) -> Self {
        Self {
            notes: notes.into(),
            ..Self::default()
        }
    }
}

/// Arbitrary key-value payload attached to a submission as JSON.
///
/// Keys are kept ordered so the serialization is deterministic,
/// which matters because the request signature covers the body bytes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CustomParams(BTreeMap<String, Value>);

impl CustomParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.into(), value.into())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Serializes the params to UTF-8 JSON bytes.
    pub fn to_json_bytes(&self) -> FeedbackClientResult<Vec<u8>> {
        serde_json::to_vec(&self.0).map_err(FeedbackClientError::JsonEncode)
    }
}
