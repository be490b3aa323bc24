//! Core library for the `openuv` CLI.
//!
//! This crate defines:
//! - The OpenUV `/uv` response model
//! - A client that requests a report for a pair of coordinates
//! - The fixed-layout text rendering of a report
//!
//! Reading credentials or locations from files and environment is left to
//! the caller; `openuv-cli` is one such caller.

pub mod client;
pub mod error;
pub mod format;
pub mod model;

pub use client::{OPENUV_API_URL, UvClient, get_uv_report, http_client};
pub use error::ClientError;
pub use format::format_report;
pub use model::{
    Coordinates, SafeExposureTime, SkinType, SunInfo, SunPosition, SunTimes, UvReport, UvResult,
};
