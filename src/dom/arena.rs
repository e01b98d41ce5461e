//! Arena-backed document tree.
//!
//! html5ever builds into this tree; section extraction and selector
//! matching both walk it through index links instead of pointers.

use html5ever::{LocalName, Namespace, QualName};

/// Index of a node in its [`ArenaDom`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ArenaNodeId(pub u32);

impl ArenaNodeId {
    /// Link value meaning "no node".
    pub const NONE: ArenaNodeId = ArenaNodeId(u32::MAX);

    pub fn is_some(&self) -> bool {
        *self != Self::NONE
    }

    pub fn is_none(&self) -> bool {
        *self == Self::NONE
    }
}

/// HTML attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: QualName,
    pub value: String,
}

/// Tag name and attributes of an element.
#[derive(Debug, Clone)]
pub struct ElementData {
    pub name: QualName,
    attrs: Vec<Attribute>,
    /// Split `class` attribute, kept in sync with `attrs`.
    classes: Vec<String>,
}

impl ElementData {
    pub fn new(name: QualName, attrs: Vec<Attribute>) -> Self {
        let mut element = Self {
            name,
            attrs,
            classes: Vec::new(),
        };
        element.sync_classes();
        element
    }

    pub fn local_name(&self) -> &str {
        &self.name.local
    }

    pub fn attrs(&self) -> &[Attribute] {
        &self.attrs
    }

    /// Value of the first attribute with this local name.
    pub fn attr(&self, local: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|a| &*a.name.local == local)
            .map(|a| a.value.as_str())
    }

    pub fn id(&self) -> Option<&str> {
        self.attr("id")
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// Add `attr` unless an attribute with the same name exists.
    pub fn add_attr_if_missing(&mut self, attr: Attribute) {
        if self.attrs.iter().any(|a| a.name == attr.name) {
            return;
        }
        self.attrs.push(attr);
        self.sync_classes();
    }

    fn sync_classes(&mut self) {
        self.classes = self
            .attr("class")
            .map(|v| v.split_whitespace().map(str::to_string).collect())
            .unwrap_or_default();
    }
}

/// Payload of an arena node.
#[derive(Debug, Clone)]
pub enum ArenaNodeData {
    Document,
    Element(ElementData),
    Text(String),
    /// Kept so that serialized section markup matches the source.
    Comment(String),
    Doctype { name: String },
}

/// A node and its tree links.
#[derive(Debug)]
pub struct ArenaNode {
    pub data: ArenaNodeData,
    pub parent: ArenaNodeId,
    pub first_child: ArenaNodeId,
    pub last_child: ArenaNodeId,
    pub prev_sibling: ArenaNodeId,
    pub next_sibling: ArenaNodeId,
}

impl ArenaNode {
    fn detached(data: ArenaNodeData) -> Self {
        Self {
            data,
            parent: ArenaNodeId::NONE,
            first_child: ArenaNodeId::NONE,
            last_child: ArenaNodeId::NONE,
            prev_sibling: ArenaNodeId::NONE,
            next_sibling: ArenaNodeId::NONE,
        }
    }
}

/// Document tree stored in one vector; links are indices into it.
///
/// Nodes are never removed, so an [`ArenaNodeId`] stays valid for the
/// lifetime of the tree.
pub struct ArenaDom {
    nodes: Vec<ArenaNode>,
}

impl ArenaDom {
    /// The document root is always node 0.
    const DOCUMENT: ArenaNodeId = ArenaNodeId(0);

    pub fn new() -> Self {
        Self {
            nodes: vec![ArenaNode::detached(ArenaNodeData::Document)],
        }
    }

    fn push(&mut self, data: ArenaNodeData) -> ArenaNodeId {
        let id = ArenaNodeId(self.nodes.len() as u32);
        self.nodes.push(ArenaNode::detached(data));
        id
    }

    pub fn document(&self) -> ArenaNodeId {
        Self::DOCUMENT
    }

    pub fn get(&self, id: ArenaNodeId) -> Option<&ArenaNode> {
        self.nodes.get(id.0 as usize)
    }

    pub fn get_mut(&mut self, id: ArenaNodeId) -> Option<&mut ArenaNode> {
        self.nodes.get_mut(id.0 as usize)
    }

    pub fn create_element(&mut self, name: QualName, attrs: Vec<Attribute>) -> ArenaNodeId {
        self.push(ArenaNodeData::Element(ElementData::new(name, attrs)))
    }

    pub fn create_text(&mut self, text: String) -> ArenaNodeId {
        self.push(ArenaNodeData::Text(text))
    }

    pub fn create_comment(&mut self, text: String) -> ArenaNodeId {
        self.push(ArenaNodeData::Comment(text))
    }

    pub fn create_doctype(&mut self, name: String) -> ArenaNodeId {
        self.push(ArenaNodeData::Doctype { name })
    }

    fn link(&self, id: ArenaNodeId, pick: fn(&ArenaNode) -> ArenaNodeId) -> ArenaNodeId {
        self.get(id).map_or(ArenaNodeId::NONE, pick)
    }

    /// Make `child` the last child of `parent`.
    pub fn append(&mut self, parent: ArenaNodeId, child: ArenaNodeId) {
        let prev = self.link(parent, |n| n.last_child);

        if let Some(node) = self.get_mut(child) {
            node.parent = parent;
            node.prev_sibling = prev;
        }
        if let Some(node) = self.get_mut(prev) {
            node.next_sibling = child;
        }
        if let Some(node) = self.get_mut(parent) {
            if node.first_child.is_none() {
                node.first_child = child;
            }
            node.last_child = child;
        }
    }

    /// Link `new_node` in directly before `sibling`.
    pub fn insert_before(&mut self, sibling: ArenaNodeId, new_node: ArenaNodeId) {
        let parent = self.link(sibling, |n| n.parent);
        let prev = self.link(sibling, |n| n.prev_sibling);

        if let Some(node) = self.get_mut(new_node) {
            node.parent = parent;
            node.prev_sibling = prev;
            node.next_sibling = sibling;
        }
        if let Some(node) = self.get_mut(sibling) {
            node.prev_sibling = new_node;
        }
        match self.get_mut(prev) {
            Some(node) => node.next_sibling = new_node,
            None => {
                if let Some(node) = self.get_mut(parent) {
                    node.first_child = new_node;
                }
            }
        }
    }

    /// Unlink `id` from its parent and siblings. Its own children stay attached.
    pub fn detach(&mut self, id: ArenaNodeId) {
        let Some((parent, prev, next)) = self
            .get(id)
            .map(|n| (n.parent, n.prev_sibling, n.next_sibling))
        else {
            return;
        };

        match self.get_mut(prev) {
            Some(node) => node.next_sibling = next,
            None => {
                if let Some(node) = self.get_mut(parent) {
                    node.first_child = next;
                }
            }
        }
        match self.get_mut(next) {
            Some(node) => node.prev_sibling = prev,
            None => {
                if let Some(node) = self.get_mut(parent) {
                    node.last_child = prev;
                }
            }
        }
        if let Some(node) = self.get_mut(id) {
            node.parent = ArenaNodeId::NONE;
            node.prev_sibling = ArenaNodeId::NONE;
            node.next_sibling = ArenaNodeId::NONE;
        }
    }

    /// Append text under `parent`, merging into a trailing text node.
    pub fn append_text(&mut self, parent: ArenaNodeId, text: &str) {
        let last = self.link(parent, |n| n.last_child);
        if let Some(ArenaNode {
            data: ArenaNodeData::Text(existing),
            ..
        }) = self.get_mut(last)
        {
            existing.push_str(text);
            return;
        }

        let node = self.create_text(text.to_string());
        self.append(parent, node);
    }

    pub fn children(&self, parent: ArenaNodeId) -> ChildrenIter<'_> {
        ChildrenIter {
            dom: self,
            next: self.link(parent, |n| n.first_child),
        }
    }

    /// Element children of a node, in order. Text and comments are skipped.
    pub fn element_children(&self, parent: ArenaNodeId) -> Vec<ArenaNodeId> {
        self.children(parent)
            .filter(|&child| self.is_element(child))
            .collect()
    }

    /// Every node below `root` in document (pre-order) order, `root` excluded.
    pub fn descendants(&self, root: ArenaNodeId) -> Vec<ArenaNodeId> {
        let mut out = Vec::new();
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            if id != root {
                out.push(id);
            }
            let first = stack.len();
            stack.extend(self.children(id));
            stack[first..].reverse();
        }
        out
    }

    /// First element with this tag name, in document order.
    pub fn find_by_tag(&self, tag: &str) -> Option<ArenaNodeId> {
        self.descendants(Self::DOCUMENT)
            .into_iter()
            .find(|&id| self.element_name(id).is_some_and(|n| &**n == tag))
    }

    pub fn element(&self, id: ArenaNodeId) -> Option<&ElementData> {
        match &self.get(id)?.data {
            ArenaNodeData::Element(element) => Some(element),
            _ => None,
        }
    }

    pub fn element_mut(&mut self, id: ArenaNodeId) -> Option<&mut ElementData> {
        match &mut self.get_mut(id)?.data {
            ArenaNodeData::Element(element) => Some(element),
            _ => None,
        }
    }

    pub fn is_element(&self, id: ArenaNodeId) -> bool {
        self.element(id).is_some()
    }

    pub fn element_name(&self, id: ArenaNodeId) -> Option<&LocalName> {
        self.element(id).map(|e| &e.name.local)
    }

    pub fn element_namespace(&self, id: ArenaNodeId) -> Option<&Namespace> {
        self.element(id).map(|e| &e.name.ns)
    }

    pub fn get_attr(&self, id: ArenaNodeId, local: &str) -> Option<&str> {
        self.element(id)?.attr(local)
    }

    pub fn element_id(&self, id: ArenaNodeId) -> Option<&str> {
        self.element(id)?.id()
    }

    pub fn element_classes(&self, id: ArenaNodeId) -> &[String] {
        self.element(id)
            .map(ElementData::classes)
            .unwrap_or_default()
    }

    /// Text of a text node.
    pub fn text_content(&self, id: ArenaNodeId) -> Option<&str> {
        match &self.get(id)?.data {
            ArenaNodeData::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Concatenated text of every text node under `id` (inclusive).
    pub fn text(&self, id: ArenaNodeId) -> String {
        self.text_excluding(id, |_| false)
    }

    /// Like [`ArenaDom::text`], but elements satisfying `skip` contribute
    /// nothing, children included.
    pub fn text_excluding<F>(&self, id: ArenaNodeId, skip: F) -> String
    where
        F: Fn(ArenaNodeId) -> bool,
    {
        let mut out = String::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            let Some(node) = self.get(current) else {
                continue;
            };
            match &node.data {
                ArenaNodeData::Text(text) => out.push_str(text),
                ArenaNodeData::Element(_) if skip(current) => {}
                ArenaNodeData::Element(_) | ArenaNodeData::Document => {
                    let first = stack.len();
                    stack.extend(self.children(current));
                    stack[first..].reverse();
                }
                ArenaNodeData::Comment(_) | ArenaNodeData::Doctype { .. } => {}
            }
        }
        out
    }

    /// Heading level for `h1`..`h6` elements, taken from the tag's numeric suffix.
    pub fn heading_level(&self, id: ArenaNodeId) -> Option<u8> {
        let name = self.element_name(id)?;
        match name.as_bytes() {
            [b'h', digit @ b'1'..=b'6'] => Some(digit - b'0'),
            _ => None,
        }
    }
}

impl Default for ArenaDom {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over the children of one node.
pub struct ChildrenIter<'a> {
    dom: &'a ArenaDom,
    next: ArenaNodeId,
}

impl Iterator for ChildrenIter<'_> {
    type Item = ArenaNodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.next;
        self.next = self.dom.get(id)?.next_sibling;
        Some(id)
    }
}
