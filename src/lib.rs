// src/lib.rs
pub mod artifact;
pub mod calendar;
pub mod config;
pub mod error;
pub mod extract;
pub mod generator;
pub mod models;
pub mod scanner;
pub mod summary;

pub use artifact::{ArtifactFormat, publish, serialize};
pub use config::AppConfig;
pub use error::{PlanError, PlanResult};
pub use models::*;
pub use scanner::{DiscoveryMode, PlanScanner, ScanIssue, ScanReport};
