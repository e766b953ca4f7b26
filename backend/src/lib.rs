//! PR reviewer service library modules.
//!
//! Assigns and reassigns code-review responsibility for pull requests
//! within a team, and tracks the pull request lifecycle to merge. Layout is
//! hexagonal: `domain` holds the rules, `inbound`/`outbound` hold the
//! adapters, and `middleware` carries the cross-cutting request concerns.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

/// Public OpenAPI surface used by tooling and debug builds.
pub use doc::ApiDoc;
pub use middleware::{Deadline, Trace};
