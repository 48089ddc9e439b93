#![allow(dead_code)]

pub mod app;

pub use app::{StubProvider, body_json, make_test_app, make_test_app_with_provider, post_json};
