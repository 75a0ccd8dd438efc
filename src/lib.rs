//! # contract-drift
//!
//! Static API-contract drift detection.
//!
//! Compares a reference service's declared routes and schema classes with a
//! client's request calls and mirrored schemas, reading both as Python
//! source and never running either.
//!
//! ## What is checked
//!
//! - **Schemas**: every client class with a same-named reference class must
//!   declare all of the reference's annotated fields and base classes.
//! - **Endpoints**: every route declared through the router receiver must be
//!   reached by some request call in the client file of the same name.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use contract_drift::{scan, DriftConfig};
//!
//! let config = DriftConfig::load(std::path::Path::new("drift.toml")).unwrap();
//! let report = scan(&config).unwrap();
//!
//! for issue in &report.issues {
//!     println!("{issue}");
//! }
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod matching;
pub mod model;
pub mod parser;
pub mod report;
pub mod scan;

// Re-exports for convenience
pub use config::{DriftConfig, LayoutConfig, MatchingConfig, NamingConfig, PathsConfig};
pub use error::{DriftError, Result};
pub use matching::normalize_path;
pub use model::{ClassSymbol, EndpointSymbol, FileModel, RequestCallSymbol, RouteMethod};
pub use parser::{extract_classes, extract_endpoints, extract_file, extract_request_calls};
pub use report::{DriftReport, Issue, IssueKind};
pub use scan::scan;
