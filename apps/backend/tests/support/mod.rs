#![allow(dead_code)]

pub mod auth;
pub mod websocket;
pub mod websocket_client;

pub use app_builder::{create_test_app, test_state};
