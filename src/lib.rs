//! gigdash - Freelancer Dashboard Library
//!
//! This library provides the rollup engine behind the gigdash CLI: pure
//! aggregations that turn a user's tasks and projects into dashboard
//! summaries.
//!
//! # Core Concepts
//!
//! - **Snapshot**: the tasks and projects one user can see
//! - **Rollup**: a pure function from a snapshot (and `now`) to a summary
//! - **Client**: the free-text `client` label on a project
//! - **Reference instant**: the `now` whose offset defines days and months
//!
//! # Module Organization
//!
//! - `cli`: Command-line interface using clap
//! - `config`: Configuration loading from `.gigdash.toml`
//! - `error`: Error types and result aliases
//! - `humanize`: Relative day labels
//! - `model`: Task and project records
//! - `output`: JSON envelope and human-readable rendering
//! - `rollup`: Summary, monthly, deadline, client and insight rollups
//! - `snapshot`: Loading and user scoping of snapshot files

pub mod cli;
pub mod config;
pub mod error;
pub mod humanize;
pub mod model;
pub mod output;
pub mod rollup;
pub mod snapshot;

pub use error::{Error, Result};
