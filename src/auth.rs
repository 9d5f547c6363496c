//! Request signing.

use crate::error::FeedbackClientResult;
use base64::{engine::general_purpose::STANDARD, Engine};
use hmac::{Hmac, Mac};
use reqwest::Method;
use sha2::{Digest, Sha256};

/// Identifies the application to the service and holds the shared secret used
/// to sign requests. Passed explicitly into the client, never read from
/// process-wide state.
#[derive(Debug, Clone)]
pub struct AppIdentity {
    /// Application id issued by the service.
    pub app_id: String,
    /// Issuance extension, part of the request path.
    pub issuance_ext: String,
    /// Shared secret used as the HMAC key.
    pub shared_secret: String,
}

impl AppIdentity {
    pub fn new(
        app_id: impl Into<String>,
        issuance_ext: impl Into<String>,
        shared_secret: impl Into<String>,
    ) -> Self {
        Self {
            app_id: app_id.into(),
            issuance_ext: issuance_ext.into(),
            shared_secret: shared_secret.into(),
        }
    }
}

/// Computes the Authorization header value for a request.
///
/// The signature is an HMAC-SHA256 keyed with the app's shared secret over the
/// method, the request path and a hash of the body bytes, so any change to the
/// body after signing invalidates the header.
///
/// # Errors
/// Should never fail as any key length is accepted, but returns an error to be
/// safe against changes in external libraries.
pub fn hmac_auth_header(
    identity: &AppIdentity,
    path: &str,
    body: &[u8],
    method: &Method,
) -> FeedbackClientResult<String> {
    let body_hash = STANDARD.encode(Sha256::digest(body));
    let mut mac = Hmac::<Sha256>::new_from_slice(identity.shared_secret.as_bytes())?;
    mac.update(format!("{method} {path}\n{body_hash}").as_bytes());
    let mac = STANDARD.encode(mac.finalize().into_bytes());
    Ok(format!("HMAC id=\"{}\", mac=\"{}\"", identity.app_id, mac))
}
