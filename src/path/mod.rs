// Wed Oct 14 2026 - Alex

pub mod cache;
pub mod error;
pub mod resolver;
pub mod token;

pub use cache::PathCache;
pub use error::PathError;
pub use resolver::PathResolver;
pub use token::{RelationOp, Segment, TokenPath};

use crate::tree::NodeRef;

/// Resolves `path` from `start` without caching the parsed path.
pub fn resolve<'t>(start: &[NodeRef<'t>], path: Option<&str>) -> Result<Vec<NodeRef<'t>>, PathError> {
    PathResolver::uncached().resolve(start, path)
}
