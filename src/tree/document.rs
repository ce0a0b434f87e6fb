// Wed Oct 14 2026 - Alex

use crate::tree::selector::{ElementView, SelectorList};
use crate::tree::{NodeId, NodeRef, TreeAccess, TreeError};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fs;
use std::path::Path;

/// Declarative description of an element, used both by the builder API and
/// by the JSON document format.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ElementSpec {
    pub tag: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub attributes: IndexMap<String, String>,
    #[serde(default)]
    pub value: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ElementSpec>,
}

impl ElementSpec {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            ..Default::default()
        }
    }

    pub fn with_id(mut self, id: &str) -> Self {
        self.id = Some(id.to_string());
        self
    }

    pub fn with_class(mut self, class: &str) -> Self {
        self.class = Some(match self.class.take() {
            Some(existing) => format!("{} {}", existing, class),
            None => class.to_string(),
        });
        self
    }

    pub fn with_attr(mut self, name: &str, value: &str) -> Self {
        self.attributes.insert(name.to_string(), value.to_string());
        self
    }

    pub fn with_value(mut self, value: &str) -> Self {
        self.value = value.to_string();
        self
    }

    pub fn with_child(mut self, child: ElementSpec) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_children(mut self, children: impl IntoIterator<Item = ElementSpec>) -> Self {
        self.children.extend(children);
        self
    }
}

#[derive(Debug, Clone)]
struct Element {
    // None only for the synthetic root
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
    attributes: IndexMap<String, String>,
    value: String,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl Element {
    fn root() -> Self {
        Self {
            tag: None,
            id: None,
            classes: Vec::new(),
            attributes: IndexMap::new(),
            value: String::new(),
            parent: None,
            children: Vec::new(),
        }
    }

    fn from_spec(spec: &ElementSpec, parent: NodeId) -> Self {
        Self {
            tag: Some(spec.tag.to_ascii_lowercase()),
            id: spec.id.clone().filter(|id| !id.is_empty()),
            classes: spec
                .class
                .as_deref()
                .unwrap_or("")
                .split_whitespace()
                .map(str::to_string)
                .collect(),
            attributes: spec.attributes.clone(),
            value: spec.value.clone(),
            parent: Some(parent),
            children: Vec::new(),
        }
    }
}

/// In-memory element tree stored as an arena. Node ids are indices into the
/// arena and stay valid for the lifetime of the document.
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Element>,
}

impl Document {
    pub const ROOT: NodeId = NodeId(0);

    pub fn new() -> Self {
        Self {
            nodes: vec![Element::root()],
        }
    }

    pub fn from_elements(elements: impl IntoIterator<Item = ElementSpec>) -> Self {
        let mut document = Self::new();
        for spec in elements {
            document.insert_spec(Self::ROOT, &spec);
        }
        document
    }

    /// Parses a JSON array of top-level elements.
    pub fn from_json(json: &str) -> Result<Self, TreeError> {
        let elements: Vec<ElementSpec> =
            serde_json::from_str(json).map_err(|e| TreeError::Parse(e.to_string()))?;
        Ok(Self::from_elements(elements))
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, TreeError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .map_err(|e| TreeError::Parse(format!("{}: {}", path.display(), e)))?;
        Self::from_json(&contents)
    }

    pub fn append(&mut self, parent: NodeId, spec: ElementSpec) -> Result<NodeId, TreeError> {
        self.element(parent)?;
        Ok(self.insert_spec(parent, &spec))
    }

    fn insert_spec(&mut self, parent: NodeId, spec: &ElementSpec) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Element::from_spec(spec, parent));
        self.nodes[parent.0].children.push(id);

        for child in &spec.children {
            self.insert_spec(id, child);
        }

        id
    }

    pub fn node(&self, id: NodeId) -> NodeRef<'_> {
        NodeRef::new(self, id)
    }

    pub fn root_node(&self) -> NodeRef<'_> {
        NodeRef::new(self, Self::ROOT)
    }

    /// First element in document order matching `selector`.
    pub fn find(&self, selector: &str) -> Result<Option<NodeId>, TreeError> {
        Ok(self.find_all(selector)?.into_iter().next())
    }

    pub fn find_all(&self, selector: &str) -> Result<Vec<NodeId>, TreeError> {
        self.query(Self::ROOT, selector)
    }

    pub fn set_value(&mut self, node: NodeId, value: &str) -> Result<(), TreeError> {
        let element = self
            .nodes
            .get_mut(node.0)
            .ok_or(TreeError::UnknownNode(node.0))?;
        element.value = value.to_string();
        Ok(())
    }

    pub fn tag(&self, node: NodeId) -> Option<&str> {
        self.nodes.get(node.0).and_then(|e| e.tag.as_deref())
    }

    pub fn children(&self, node: NodeId) -> &[NodeId] {
        self.nodes
            .get(node.0)
            .map(|e| e.children.as_slice())
            .unwrap_or(&[])
    }

    /// Number of elements, not counting the root.
    pub fn len(&self) -> usize {
        self.nodes.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn element(&self, node: NodeId) -> Result<&Element, TreeError> {
        self.nodes.get(node.0).ok_or(TreeError::UnknownNode(node.0))
    }

    fn descendants(&self, node: NodeId) -> Vec<NodeId> {
        let mut result = Vec::new();
        let mut stack: Vec<NodeId> = self.children(node).iter().rev().copied().collect();

        while let Some(current) = stack.pop() {
            result.push(current);
            stack.extend(self.children(current).iter().rev().copied());
        }

        result
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl ElementView for Document {
    fn tag_name(&self, node: NodeId) -> Option<&str> {
        self.tag(node)
    }

    fn attribute(&self, node: NodeId, name: &str) -> Option<Cow<'_, str>> {
        let element = self.nodes.get(node.0)?;
        match name {
            "id" => element.id.as_deref().map(Cow::Borrowed),
            "class" if !element.classes.is_empty() => Some(Cow::Owned(element.classes.join(" "))),
            _ => element.attributes.get(name).map(|v| Cow::Borrowed(v.as_str())),
        }
    }

    fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.nodes
            .get(node.0)
            .map_or(false, |e| e.classes.iter().any(|c| c == class))
    }

    fn parent_element(&self, node: NodeId) -> Option<NodeId> {
        self.nodes.get(node.0).and_then(|e| e.parent)
    }
}

impl TreeAccess for Document {
    fn query(&self, node: NodeId, selector: &str) -> Result<Vec<NodeId>, TreeError> {
        self.element(node)?;
        let selectors = SelectorList::parse(selector)?;

        Ok(self
            .descendants(node)
            .into_iter()
            .filter(|&candidate| selectors.matches(self, candidate))
            .collect())
    }

    fn matches(&self, node: NodeId, selector: &str) -> Result<bool, TreeError> {
        self.element(node)?;
        let selectors = SelectorList::parse(selector)?;
        Ok(selectors.matches(self, node))
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.parent_element(node).filter(|&parent| parent != Self::ROOT)
    }

    fn siblings(&self, node: NodeId) -> Vec<NodeId> {
        match self.parent_element(node) {
            Some(parent) => self
                .children(parent)
                .iter()
                .copied()
                .filter(|&sibling| sibling != node)
                .collect(),
            None => Vec::new(),
        }
    }

    fn value(&self, node: NodeId) -> String {
        self.nodes
            .get(node.0)
            .map(|e| e.value.clone())
            .unwrap_or_default()
    }

    fn root(&self) -> NodeId {
        Self::ROOT
    }

    fn contains(&self, node: NodeId) -> bool {
        node != Self::ROOT && node.0 < self.nodes.len()
    }

    fn describe(&self, node: NodeId) -> String {
        let element = match self.nodes.get(node.0) {
            Some(element) => element,
            None => return format!("<unknown {}>", node),
        };

        let mut out = match &element.tag {
            Some(tag) => tag.clone(),
            None => return "#document".to_string(),
        };
        if let Some(id) = &element.id {
            out.push('#');
            out.push_str(id);
        }
        for class in &element.classes {
            out.push('.');
            out.push_str(class);
        }
        out
    }
}
