//! # Navigation Commands
//!
//! Route table lookups and status badge resolution. Neither touches the
//! session store.

use tracing::debug;

use medmap_core::routes::{self, Resolved, Route};
use medmap_core::status::{self, EntityKind, StatusDescriptor};

use crate::error::ApiError;

/// Every known route, in navigation order.
pub fn list_routes() -> Vec<Route> {
    debug!("list_routes command");
    routes::ROUTES.to_vec()
}

pub fn resolve_route(path: &str) -> Resolved {
    debug!(path, "resolve_route command");
    routes::resolve(path)
}

/// The badge for one tag, or with no tag, every badge of the vocabulary.
///
/// An unknown tag is not an error: it gets the fallback badge, the way the
/// dashboard renders it. An unknown kind is.
pub fn describe_status(kind: &str, tag: Option<&str>) -> Result<Vec<StatusDescriptor>, ApiError> {
    debug!(kind, ?tag, "describe_status command");
    let kind: EntityKind = kind.parse()?;

    Ok(match tag {
        Some(tag) => vec![status::resolve(kind, tag)],
        None => kind
            .tags()
            .into_iter()
            .map(|tag| status::resolve(kind, tag))
            .collect(),
    })
}
