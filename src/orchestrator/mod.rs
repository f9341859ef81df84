//! Application-level orchestration utilities.
//!
//! This module owns the role and submission lifecycles, the view-model that
//! front ends render from, and post-screening processing such as exports.
//! UI/CLI layers call into this module to keep responsibilities separated.

mod controller;
mod post_process;
pub mod session;

pub(crate) use controller::{run_controller, UiCommand};
pub(crate) use post_process::{export_json, process_screening};
pub use session::Session;
