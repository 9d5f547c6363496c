//! Hand-assembled multipart/form-data bodies.
//!
//! The submission endpoint authenticates requests with a signature computed
//! over the exact body bytes, so the body has to be serialized to a buffer
//! before sending instead of being streamed by the HTTP client.

use uuid::Uuid;

pub const CONTENT_TYPE_MULTIPART_FORM_DATA: &str = "multipart/form-data";
pub const CONTENT_TYPE_OCTET_STREAM: &str = "application/octet-stream";
pub const CONTENT_TYPE_JSON: &str = "application/json";
pub const CONTENT_TYPE_TEXT: &str = "text/plain; charset=utf-8";

/// Generates a fresh boundary token.
///
/// A new token is generated for every request so user-controlled part content
/// cannot collide with a known delimiter.
pub fn random_boundary() -> String {
    format!("------------------------{}", Uuid::new_v4().simple())
}

/// A single named part of a multipart body.
#[derive(Debug, Clone)]
pub struct Part {
    name: String,
    file_name: Option<String>,
    content_type: Option<String>,
    data: Vec<u8>,
}

impl Part {
    pub fn text(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            file_name: None,
            content_type: Some(CONTENT_TYPE_TEXT.to_string()),
            data: value.into().into_bytes(),
        }
    }

    pub fn bytes(name: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            file_name: None,
            content_type: None,
            data,
        }
    }

    pub fn file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = Some(file_name.into());
        self
    }

    pub fn content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn file_name_ref(&self) -> Option<&str> {
        self.file_name.as_deref()
    }

    pub fn content_type_ref(&self) -> Option<&str> {
        self.content_type.as_deref()
    }
}

/// An ordered list of parts sharing one boundary token.
#[derive(Debug, Clone)]
pub struct MultipartBody {
    boundary: String,
    parts: Vec<Part>,
}

impl MultipartBody {
    pub fn new(boundary: impl Into<String>) -> Self {
        Self {
            boundary: boundary.into(),
            parts: vec![],
        }
    }

    pub fn part(mut self, part: Part) -> Self {
        self.parts.push(part);
        self
    }

    pub fn boundary(&self) -> &str {
        &self.boundary
    }

    pub fn parts(&self) -> &[Part] {
        &self.parts
    }

    /// The value for the request's Content-Type header. The boundary here and
    /// the delimiters written by `to_bytes` always match by construction.
    pub fn content_type_header(&self) -> String {
        format!(
            "{}; boundary={}",
            CONTENT_TYPE_MULTIPART_FORM_DATA, self.boundary
        )
    }

    /// Serializes the body to raw bytes.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        for part in &self.parts {
            buf.extend_from_slice(format!("--{}\r\n", self.boundary).as_bytes());
            match &part.file_name {
                Some(file_name) => buf.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
                        part.name, file_name
                    )
                    .as_bytes(),
                ),
                None => buf.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{}\"\r\n", part.name)
                        .as_bytes(),
                ),
            }
            if let Some(content_type) = &part.content_type {
                buf.extend_from_slice(format!("Content-Type: {content_type}\r\n").as_bytes());
            }
            buf.extend_from_slice(b"\r\n");
            buf.extend_from_slice(&part.data);
            buf.extend_from_slice(b"\r\n");
        }
        buf.extend_from_slice(format!("--{}--\r\n", self.boundary).as_bytes());
        buf
    }
}
