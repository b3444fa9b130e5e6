#![allow(missing_docs)]

pub(crate) mod form;
pub(crate) mod html;
pub(crate) mod http;

pub(crate) use form::{
    assert_form_input, assert_hx_endpoint, assert_submit_button_text, must_select_one,
    visible_input_values,
};
pub(crate) use html::{assert_valid_html, parse_html_document, parse_html_fragment, select_text};
pub(crate) use http::{assert_content_type, assert_hx_redirect, assert_status_ok};
