use crate::{
    auth,
    error::{FeedbackClientError, FeedbackClientResult},
    multipart::{self, MultipartBody, Part, CONTENT_TYPE_JSON, CONTENT_TYPE_OCTET_STREAM},
    request::{CustomParams, FeedbackData},
    screenshot, FeedbackClient,
};
use base64::{engine::general_purpose::STANDARD, Engine};
use reqwest::{
    header::{AUTHORIZATION, CONTENT_TYPE},
    Method,
};
use url::Url;

/// Placeholder part file name used when the feedback data has no screenshot name.
pub const DEFAULT_SCREENSHOT_NAME: &str = "FeedbackScreenshot";
/// Fixed part file name for the custom params JSON.
pub const CUSTOM_PARAMS_FILE_NAME: &str = "custom_params.json";

// joins the URL "tail" with the API url root from the client
fn make_url(client: &FeedbackClient, tail: impl AsRef<str>) -> FeedbackClientResult<Url> {
    client
        .0
        .root_url
        .join(tail.as_ref())
        .map_err(|e| FeedbackClientError::UrlParse(tail.as_ref().to_string(), e))
}

fn feedback_path(client: &FeedbackClient) -> String {
    format!(
        "feedback/{}/{}",
        client.0.identity.app_id, client.0.identity.issuance_ext
    )
}

/// Assembles the multipart body for a feedback submission.
///
/// The notes part is always present, even with empty notes. The screenshot
/// part is included only when a screenshot exists and the user confirmed
/// sending it; its content is the base64 of the PNG encoding, declared as an
/// octet-stream with a `base64:` file name prefix so the service knows to
/// decode it. A part whose content fails to encode is logged and left out
/// rather than failing the whole submission.
pub fn build_feedback_body(
    data: &FeedbackData,
    params: Option<&CustomParams>,
    boundary: &str,
) -> MultipartBody {
    let mut body =
        MultipartBody::new(boundary).part(Part::text("feedback[notes]", data.notes.clone()));

    if let Some(screenshot) = data.screenshot.as_ref().filter(|_| data.send_screenshot) {
        match screenshot::encode_png(screenshot) {
            Ok(png) => {
                let name = data
                    .screenshot_name
                    .as_deref()
                    .filter(|n| !n.is_empty())
                    .unwrap_or(DEFAULT_SCREENSHOT_NAME);
                // the service expects the PNG bytes re-encoded as base64
                let encoded = STANDARD.encode(png).into_bytes();
                body = body.part(
                    Part::bytes("feedback[screenshot]", encoded)
                        .file_name(format!("base64:{name}"))
                        .content_type(CONTENT_TYPE_OCTET_STREAM),
                );
            }
            Err(err) => log::warn!("leaving screenshot out of feedback: {err}"),
        }
    }

    if let Some(params) = params {
        match params.to_json_bytes() {
            Ok(json) => {
                body = body.part(
                    Part::bytes("custom_params", json)
                        .file_name(CUSTOM_PARAMS_FILE_NAME)
                        .content_type(CONTENT_TYPE_JSON),
                );
            }
            Err(err) => log::warn!("leaving custom params out of feedback: {err}"),
        }
    }

    body
}

/// post feedback/{app_id}/{issuance_ext}
///
/// Builds, signs and sends one feedback submission.
pub fn post_feedback(
    client: &FeedbackClient,
    data: &FeedbackData,
    params: Option<&CustomParams>,
) -> FeedbackClientResult<()> {
    let boundary = multipart::random_boundary();
    let body = build_feedback_body(data, params, &boundary);
    let raw_body = body.to_bytes();

    let path = feedback_path(client);
    let url = make_url(client, &path)?;
    // the signature covers the exact bytes sent, so the body is serialized first
    let auth_header = auth::hmac_auth_header(&client.0.identity, &path, &raw_body, &Method::POST)?;

    log::debug!("posting feedback to {url}");

    let res = client
        .0
        .client
        .post(url.clone())
        .query(&[
            ("client", &client.0.sdk_name),
            ("client_version", &client.0.sdk_version),
        ])
        .header(CONTENT_TYPE, body.content_type_header())
        .header(AUTHORIZATION, auth_header)
        .body(raw_body)
        .send()
        .map_err(|e| FeedbackClientError::ConnectionError(Method::POST, url.clone(), e))?;

    let status = res.status();
    log::debug!("feedback returned {status}");
    if status.is_success() {
        Ok(())
    } else {
        Err(FeedbackClientError::HttpError { url, status })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod test {
    use super::*;
    use crate::AppIdentity;
    use image::RgbaImage;
    use mockito::{Matcher, Server};

    fn init() {
        use log::*;
        use simple_logger::*;
        let _ = SimpleLogger::new()
            .with_level(LevelFilter::Debug)
            .with_module_level("mockito", LevelFilter::Warn)
            .with_module_level("reqwest", LevelFilter::Warn)
            .init();
    }

    fn make_client(url: String) -> FeedbackClient {
        FeedbackClient::new(
            url,
            AppIdentity::new("some-app", "android", "some secret"),
            "client".to_string(),
            "version".to_string(),
        )
        .unwrap()
    }

    fn part<'a>(body: &'a MultipartBody, name: &str) -> &'a Part {
        body.parts().iter().find(|p| p.name() == name).unwrap()
    }

    #[test]
    fn empty_feedback_has_exactly_the_notes_part() {
        init();

        let data = FeedbackData::default();
        let body = build_feedback_body(&data, None, "boundary");

        assert_eq!(body.parts().len(), 1);
        let notes = part(&body, "feedback[notes]");
        assert_eq!(notes.data(), b"");
    }

    #[test]
    fn notes_are_always_sent() {
        init();

        let data = FeedbackData::new("the app crashed");
        let body = build_feedback_body(&data, None, "boundary");

        let notes = part(&body, "feedback[notes]");
        assert_eq!(notes.data(), b"the app crashed");
    }

    #[test]
    fn confirmed_screenshot_roundtrips_through_base64_png() {
        init();

        let image = RgbaImage::from_fn(8, 6, |x, y| image::Rgba([x as u8, y as u8, 3, 255]));
        let mut data = FeedbackData::new("notes");
        data.screenshot = Some(image.clone());
        data.send_screenshot = true;
        data.screenshot_name = Some("shot.png".to_string());

        let body = build_feedback_body(&data, None, "boundary");
        assert_eq!(body.parts().len(), 2);

        let shot = part(&body, "feedback[screenshot]");
        assert_eq!(shot.file_name_ref(), Some("base64:shot.png"));
        assert_eq!(shot.content_type_ref(), Some(CONTENT_TYPE_OCTET_STREAM));

        let png = STANDARD.decode(shot.data()).unwrap();
        let decoded = image::load_from_memory(&png).unwrap().to_rgba8();
        assert_eq!(decoded, image);
    }

    #[test]
    fn unconfirmed_screenshot_is_not_sent() {
        init();

        let mut data = FeedbackData::new("notes");
        data.screenshot = Some(RgbaImage::new(2, 2));
        data.send_screenshot = false;

        let body = build_feedback_body(&data, None, "boundary");
        assert_eq!(body.parts().len(), 1);
        assert_eq!(body.parts()[0].name(), "feedback[notes]");
    }

    #[test]
    fn unnamed_screenshot_gets_the_placeholder_name() {
        init();

        let mut data = FeedbackData::new("notes");
        data.screenshot = Some(RgbaImage::new(2, 2));
        data.send_screenshot = true;

        let body = build_feedback_body(&data, None, "boundary");
        let shot = part(&body, "feedback[screenshot]");
        assert_eq!(shot.file_name_ref(), Some("base64:FeedbackScreenshot"));
    }

    #[test]
    fn custom_params_are_sent_as_json() {
        init();

        let data = FeedbackData::default();
        let mut params = CustomParams::new();
        params.insert("build", "1204");

        let body = build_feedback_body(&data, Some(&params), "boundary");
        let custom = part(&body, "custom_params");
        assert_eq!(custom.file_name_ref(), Some(CUSTOM_PARAMS_FILE_NAME));
        assert_eq!(custom.content_type_ref(), Some(CONTENT_TYPE_JSON));

        let value: serde_json::Value = serde_json::from_slice(custom.data()).unwrap();
        assert_eq!(value, serde_json::json!({ "build": "1204" }));
    }

    #[test]
    fn posts_signed_multipart_feedback() {
        init();
        let mut server = Server::new();

        let _m = server
            .mock("POST", "/feedback/some-app/android")
            .match_query(Matcher::Any)
            .match_header(
                "content-type",
                Matcher::Regex("multipart/form-data; boundary=.+".to_string()),
            )
            .match_header(
                "authorization",
                Matcher::Regex("HMAC id=\"some-app\", mac=\".+\"".to_string()),
            )
            .match_body(Matcher::Regex("feedback\\[notes\\]".to_string()))
            .create();

        let client = make_client(server.url());
        let data = FeedbackData::new("some notes");
        post_feedback(&client, &data, None).unwrap();
    }

    #[test]
    fn any_2xx_status_is_a_success() {
        init();
        let mut server = Server::new();
        let client = make_client(server.url());
        let data = FeedbackData::default();

        for status in [200, 201, 204] {
            let _m = server
                .mock("POST", "/feedback/some-app/android")
                .match_query(Matcher::Any)
                .with_status(status)
                .create();
            assert!(client.submit_feedback(&data));
        }
    }

    #[test]
    fn non_2xx_status_is_a_failure() {
        init();
        let mut server = Server::new();
        let client = make_client(server.url());
        let data = FeedbackData::default();

        for status in [404, 500] {
            let _m = server
                .mock("POST", "/feedback/some-app/android")
                .match_query(Matcher::Any)
                .with_status(status)
                .create();

            let err = post_feedback(&client, &data, None).unwrap_err();
            assert!(matches!(err, FeedbackClientError::HttpError { .. }));
            assert!(!client.submit_feedback(&data));
        }
    }

    #[test]
    fn unreachable_server_is_a_failure_not_a_panic() {
        init();

        // nothing listens here
        let client = make_client("http://127.0.0.1:9".to_string());
        let data = FeedbackData::default();

        let err = post_feedback(&client, &data, None).unwrap_err();
        assert!(matches!(err, FeedbackClientError::ConnectionError(..)));
        assert!(!client.submit_feedback(&data));
    }

    #[test]
    fn each_submission_gets_a_fresh_boundary() {
        init();
        let mut server = Server::new();

        let m = server
            .mock("POST", "/feedback/some-app/android")
            .match_query(Matcher::Any)
            .expect(2)
            .create();

        let client = make_client(server.url());
        let data = FeedbackData::default();
        assert!(client.submit_feedback(&data));
        assert!(client.submit_feedback(&data));
        m.assert();
        // boundary freshness itself is covered by multipart::random_boundary,
        // this checks both requests went through independently
    }
}
