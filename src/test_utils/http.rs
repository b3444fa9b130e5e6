use axum::{body::Body, http::StatusCode, response::Response};

#[track_caller]
pub(crate) fn assert_status_ok(response: &Response<Body>) {
    assert_eq!(response.status(), StatusCode::OK);
}

#[track_caller]
pub(crate) fn assert_content_type(response: &Response<Body>, content_type: &str) {
    let got = response
        .headers()
        .get("content-type")
        .expect("content-type header missing");
    assert_eq!(got, content_type);
}

#[track_caller]
pub(crate) fn assert_hx_redirect(response: &Response<Body>, url: &str) {
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let got = response
        .headers()
        .get("hx-redirect")
        .expect("hx-redirect header missing")
        .to_str()
        .expect("Could not convert to str");
    assert_eq!(got, url);
}
