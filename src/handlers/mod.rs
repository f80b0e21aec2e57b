//! HTTP handlers for the directory API

pub mod auth;
pub mod user;
