#![allow(missing_docs)]

pub(crate) mod fixtures;
pub(crate) mod http;

pub(crate) use fixtures::{amount, test_now, test_state};
pub(crate) use http::{assert_content_type, assert_status_ok, response_json};
