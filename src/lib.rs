//! tocsin: floating outline navigation for rendered documents.
//!
//! The crate is built around a small table-of-contents engine with three
//! cooperating parts: an extractor that scans a rendered content tree for
//! headings and assigns stable anchors, a tracker that decides which heading
//! the reader is currently on, and a panel controller that owns the floating
//! panel's drag/collapse state and dispatches navigation. The engine talks to
//! its host only through the capability seams in [`watch`], so the same core
//! drives the terminal reading view shipped here and is testable without one.
#![allow(clippy::multiple_crate_versions)]

pub mod app_state;
pub mod config;
pub mod content;
pub mod engine;
pub mod formats;
pub mod input;
pub mod outline;
pub mod panel;
pub mod schedule;
pub mod scroll;
pub mod tracker;
pub mod ui;
pub mod watch;
