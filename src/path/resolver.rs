// Wed Oct 14 2026 - Alex

use crate::path::{PathCache, PathError, RelationOp, Segment, TokenPath};
use crate::tree::NodeRef;
use std::sync::Arc;

/// Walks a tree following a relational path.
///
/// Every start node is resolved independently and the per-node results are
/// concatenated in input order. Duplicates are kept.
pub struct PathResolver {
    cache: Option<PathCache>,
}

impl PathResolver {
    pub fn new() -> Self {
        Self {
            cache: Some(PathCache::default()),
        }
    }

    pub fn uncached() -> Self {
        Self { cache: None }
    }

    pub fn with_cache_size(size: usize) -> Self {
        Self {
            cache: Some(PathCache::new(size)),
        }
    }

    pub fn cache(&self) -> Option<&PathCache> {
        self.cache.as_ref()
    }

    pub fn parse(&self, path: &str) -> Result<Arc<TokenPath>, PathError> {
        match &self.cache {
            Some(cache) => cache.get_or_parse(path),
            None => TokenPath::parse(path).map(Arc::new),
        }
    }

    /// An empty or missing path returns `start` unchanged.
    pub fn resolve<'t>(
        &self,
        start: &[NodeRef<'t>],
        path: Option<&str>,
    ) -> Result<Vec<NodeRef<'t>>, PathError> {
        let path = match path {
            Some(path) if !path.trim().is_empty() => path,
            _ => return Ok(start.to_vec()),
        };

        let parsed = self.parse(path)?;
        self.resolve_parsed(start, &parsed)
    }

    pub fn resolve_from<'t>(&self, node: NodeRef<'t>, path: &str) -> Result<Vec<NodeRef<'t>>, PathError> {
        self.resolve(&[node], Some(path))
    }

    pub fn resolve_parsed<'t>(
        &self,
        start: &[NodeRef<'t>],
        path: &TokenPath,
    ) -> Result<Vec<NodeRef<'t>>, PathError> {
        let mut resolved = Vec::new();

        for &node in start {
            let mut working = vec![node];

            for segment in path.segments() {
                working = apply_segment(&working, segment)?;
                log::trace!("'{}' after {}: {} node(s)", path.source(), segment, working.len());
                if working.is_empty() {
                    break;
                }
            }

            resolved.extend(working);
        }

        Ok(resolved)
    }
}

impl Default for PathResolver {
    fn default() -> Self {
        Self::new()
    }
}

fn apply_segment<'t>(working: &[NodeRef<'t>], segment: &Segment) -> Result<Vec<NodeRef<'t>>, PathError> {
    let mut next = Vec::new();

    match segment {
        Segment::Descendant(selector) => {
            for node in working {
                next.extend(node.query(selector)?);
            }
        }
        Segment::Relational { op: RelationOp::Closest, argument: Some(selector) } => {
            for node in working {
                if let Some(ancestor) = closest_ancestor(*node, selector)? {
                    next.push(ancestor);
                }
            }
        }
        Segment::Relational { op: RelationOp::Siblings, argument: Some(selector) } => {
            for node in working {
                for sibling in node.siblings() {
                    if sibling.matches(selector)? {
                        next.push(sibling);
                    }
                }
            }
        }
        Segment::Relational { op: RelationOp::Parent, argument } => {
            for node in working {
                let parent = match node.parent() {
                    Some(parent) => parent,
                    None => continue,
                };
                let keep = match argument {
                    Some(selector) => parent.matches(selector)?,
                    None => true,
                };
                if keep {
                    next.push(parent);
                }
            }
        }
        // closest / siblings without a selector contribute nothing
        Segment::Relational { argument: None, .. } => {}
    }

    Ok(next)
}

/// Nearest strict ancestor of `node` matching `selector`.
fn closest_ancestor<'t>(node: NodeRef<'t>, selector: &str) -> Result<Option<NodeRef<'t>>, PathError> {
    let mut current = node.parent();
    while let Some(ancestor) = current {
        if ancestor.matches(selector)? {
            return Ok(Some(ancestor));
        }
        current = ancestor.parent();
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::{Document, ElementSpec, TreeError};

    fn fixture() -> Document {
        Document::from_elements(vec![ElementSpec::new("section")
            .with_class("bibi")
            .with_child(
                ElementSpec::new("div")
                    .with_class("form")
                    .with_child(ElementSpec::new("div").with_id("divA").with_class("bibi"))
                    .with_child(ElementSpec::new("input").with_id("in1").with_value("x"))
                    .with_child(
                        ElementSpec::new("p").with_child(ElementSpec::new("input").with_id("in2").with_value("y")),
                    )
                    .with_child(ElementSpec::new("span").with_class("gigi").with_id("g1")),
            )
            .with_child(ElementSpec::new("span").with_class("gigi").with_id("g2"))])
    }

    fn node<'d>(doc: &'d Document, selector: &str) -> NodeRef<'d> {
        doc.node(doc.find(selector).unwrap().unwrap())
    }

    fn names(nodes: &[NodeRef<'_>]) -> Vec<String> {
        nodes.iter().map(|n| n.describe()).collect()
    }

    #[test]
    fn test_parent_then_descendant() {
        let doc = fixture();
        let div_a = node(&doc, "#divA");
        let resolver = PathResolver::new();

        let inputs = resolver.resolve(&[div_a], Some("{{parent@.form}} input")).unwrap();
        assert_eq!(names(&inputs), vec!["input#in1", "input#in2"]);
    }

    #[test]
    fn test_empty_path_is_identity() {
        let doc = fixture();
        let start = vec![node(&doc, "#in1"), node(&doc, "#in2")];
        let resolver = PathResolver::new();

        assert_eq!(resolver.resolve(&start, None).unwrap(), start);
        assert_eq!(resolver.resolve(&start, Some("")).unwrap(), start);
        assert_eq!(resolver.resolve(&start, Some("   ")).unwrap(), start);
    }

    #[test]
    fn test_plain_path_is_descendant_query() {
        let doc = fixture();
        let form = node(&doc, ".form");
        let section = node(&doc, "section");
        let resolver = PathResolver::uncached();

        let resolved = resolver.resolve(&[form, section], Some(".gigi")).unwrap();
        let mut expected = form.query(".gigi").unwrap();
        expected.extend(section.query(".gigi").unwrap());

        assert_eq!(resolved, expected);
        assert_eq!(names(&resolved), vec!["span#g1.gigi", "span#g1.gigi", "span#g2.gigi"]);
    }

    #[test]
    fn test_closest_skips_the_node_itself() {
        let doc = fixture();
        let div_a = node(&doc, "#divA");
        let resolver = PathResolver::new();

        let found = resolver.resolve_from(div_a, "{{closest@.bibi}}").unwrap();
        assert_eq!(names(&found), vec!["section.bibi"]);

        let gigis = resolver.resolve_from(div_a, "{{closest@.bibi}} .gigi").unwrap();
        assert_eq!(names(&gigis), vec!["span#g1.gigi", "span#g2.gigi"]);

        assert!(resolver.resolve_from(div_a, "{{closest@table}}").unwrap().is_empty());
    }

    #[test]
    fn test_siblings_and_missing_arguments() {
        let doc = fixture();
        let in1 = node(&doc, "#in1");
        let resolver = PathResolver::new();

        let siblings = resolver.resolve_from(in1, "{{siblings@div, span}}").unwrap();
        assert_eq!(names(&siblings), vec!["div#divA.bibi", "span#g1.gigi"]);

        assert!(resolver.resolve_from(in1, "{{siblings}}").unwrap().is_empty());
        assert!(resolver.resolve_from(in1, "{{closest}}").unwrap().is_empty());

        let parent = resolver.resolve_from(in1, "{{parent}}").unwrap();
        assert_eq!(names(&parent), vec!["div.form"]);
        assert!(resolver.resolve_from(in1, "{{parent@section}}").unwrap().is_empty());
    }

    #[test]
    fn test_top_level_node_has_no_parent_step() {
        let doc = Document::from_elements(vec![
            ElementSpec::new("input").with_id("top").with_value(""),
            ElementSpec::new("input").with_id("other").with_value(""),
        ]);
        let top = node(&doc, "#top");
        let resolver = PathResolver::new();

        assert!(resolver.resolve_from(top, "{{parent}}").unwrap().is_empty());
        assert!(resolver.resolve_from(top, "{{parent}} input").unwrap().is_empty());
        assert!(resolver.resolve_from(top, "{{closest@*}}").unwrap().is_empty());
        assert_eq!(names(&resolver.resolve_from(top, "{{siblings@input}}").unwrap()), vec!["input#other"]);
    }

    #[test]
    fn test_duplicates_are_kept_in_start_order() {
        let doc = fixture();
        let start = vec![node(&doc, "#in1"), node(&doc, "#divA")];
        let resolver = PathResolver::new();

        let parents = resolver.resolve(&start, Some("{{parent}}")).unwrap();
        assert_eq!(names(&parents), vec!["div.form", "div.form"]);
    }

    #[test]
    fn test_errors_are_reported() {
        let doc = fixture();
        let in1 = node(&doc, "#in1");
        let resolver = PathResolver::new();

        assert!(matches!(
            resolver.resolve_from(in1, "{{parents@.lulu}} .fifi"),
            Err(PathError::UnknownOperator { .. })
        ));
        assert!(matches!(
            resolver.resolve_from(in1, "{{parent}} input:focus"),
            Err(PathError::Tree(TreeError::InvalidSelector { .. }))
        ));
    }

    #[test]
    fn test_free_function_matches_resolver() {
        let doc = fixture();
        let div_a = node(&doc, "#divA");
        let via_fn = crate::path::resolve(&[div_a], Some("{{parent}} input")).unwrap();
        assert_eq!(names(&via_fn), vec!["input#in1", "input#in2"]);
    }
}
