// src/lib.rs

pub mod db;
pub mod repositories;
pub mod http;
pub mod config;
pub mod services;
pub mod api;
pub mod server;

pub use db::Database;
pub use callboard_common::error::Error;
pub use http::{DefaultHttpClient, HttpClient};
