//! Contains the FeedbackClient struct for communicating with the feedback service.

pub mod api;

use crate::{
    auth::AppIdentity,
    request::{CustomParams, FeedbackData},
};
use reqwest::blocking::Client;
use std::sync::Arc;
use url::Url;

/// A struct for submitting feedback to the service.
///
/// Submission is best-effort by design: `submit_feedback` makes exactly one
/// attempt and reports the outcome as a boolean, never an error. Callers that
/// need the failure reason can use [`api::post_feedback`] directly.
#[derive(Clone)]
pub struct FeedbackClient(Arc<FeedbackCore>);

struct FeedbackCore {
    client: Client,
    root_url: Url,
    identity: AppIdentity,
    sdk_name: String,
    sdk_version: String,
}

impl FeedbackClient {
    /// Creates a new FeedbackClient for the service at the given root URL.
    ///
    /// # Examples
    /// ```rust,no_run
    /// use feedback_client::{AppIdentity, FeedbackClient};
    ///
    /// let identity = AppIdentity::new("my-app-id", "android", "shared-secret");
    /// let client = FeedbackClient::new("https://feedback.example.com".to_string(), identity, "my-sdk".to_string(), "1.0.0".to_string()).unwrap();
    /// ```
    pub fn new(
        root_url: String,
        identity: AppIdentity,
        sdk_name: String,
        sdk_version: String,
    ) -> crate::FeedbackClientResult<Self> {
        // guarantee a trailing slash, otherwise join will drop the last component
        let root_url = if root_url.ends_with('/') {
            root_url
        } else {
            format!("{root_url}/")
        };
        let root_url = Url::parse(&root_url)
            .map_err(|e| crate::FeedbackClientError::UrlParse(root_url.clone(), e))?;

        Ok(Self(Arc::new(FeedbackCore {
            client: Client::new(),
            root_url,
            identity,
            sdk_name,
            sdk_version,
        })))
    }

    /// Submits the feedback, returning whether the service accepted it.
    pub fn submit_feedback(&self, data: &FeedbackData) -> bool {
        self.submit_feedback_with_params(data, None)
    }

    /// Submits the feedback with custom parameters attached,
    /// returning whether the service accepted it.
    pub fn submit_feedback_with_params(
        &self,
        data: &FeedbackData,
        params: Option<&CustomParams>,
    ) -> bool {
        match api::post_feedback(self, data, params) {
            Ok(()) => true,
            Err(err) => {
                log::warn!("failed to post feedback: {err}");
                false
            }
        }
    }
}
