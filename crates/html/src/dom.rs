use crate::selector::Selector;
use crate::serialize;
use crate::tokenizer::tokenize;
use crate::types::{Id, NodeKind, Token};
use std::fmt;

#[derive(Debug, Clone)]
struct NodeData {
    kind: NodeKind,
    parent: Option<Id>,
    children: Vec<Id>,
}

/// Arena-backed document tree.
///
/// Node ids are stable for the lifetime of the document; removing children only unlinks them.
/// Nodes created with [`Document::create_element`] start detached until appended.
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<NodeData>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// A fresh, empty document with no `<html>`, `<head>` or `<body>`.
    pub fn new() -> Self {
        Self {
            nodes: vec![NodeData {
                kind: NodeKind::Document { doctype: None },
                parent: None,
                children: Vec::new(),
            }],
        }
    }

    pub fn parse(input: &str) -> Self {
        let mut doc = Self::new();
        let tokens = tokenize(input);
        doc.build_into(Id::ROOT, &tokens);
        doc
    }

    pub fn root(&self) -> Id {
        Id::ROOT
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    pub fn kind(&self, id: Id) -> Option<&NodeKind> {
        self.nodes.get(id.index()).map(|n| &n.kind)
    }

    pub fn children(&self, id: Id) -> &[Id] {
        self.nodes
            .get(id.index())
            .map(|n| n.children.as_slice())
            .unwrap_or(&[])
    }

    pub fn parent(&self, id: Id) -> Option<Id> {
        self.nodes.get(id.index()).and_then(|n| n.parent)
    }

    pub fn doctype(&self) -> Option<&str> {
        match &self.nodes[Id::ROOT.index()].kind {
            NodeKind::Document { doctype } => doctype.as_deref(),
            _ => None,
        }
    }

    pub fn element(&self, id: Id) -> Option<ElementRef<'_>> {
        match self.kind(id)? {
            NodeKind::Element { .. } => Some(ElementRef { doc: self, id }),
            _ => None,
        }
    }

    /// Descendants of `scope` in document (pre-)order, `scope` itself excluded.
    pub fn descendants(&self, scope: Id) -> Descendants<'_> {
        let mut stack: Vec<Id> = self.children(scope).to_vec();
        stack.reverse();
        Descendants { doc: self, stack }
    }

    pub fn query_selector_all(&self, scope: Id, selector: &Selector) -> Vec<ElementRef<'_>> {
        self.descendants(scope)
            .filter_map(|id| self.element(id))
            .filter(|el| selector.matches(*el))
            .collect()
    }

    /// First element in document order with the given (lowercase) tag name.
    pub fn find_element(&self, scope: Id, name: &str) -> Option<ElementRef<'_>> {
        self.descendants(scope)
            .filter_map(|id| self.element(id))
            .find(|el| el.name().eq_ignore_ascii_case(name))
    }

    pub fn create_element(&mut self, name: &str) -> Id {
        self.push(
            NodeKind::Element {
                name: name.to_ascii_lowercase(),
                attributes: Vec::new(),
            },
            None,
        )
    }

    /// Sets or replaces an attribute on an element node. No-op for other node kinds.
    pub fn set_attribute(&mut self, id: Id, name: &str, value: &str) {
        let Some(NodeData {
            kind: NodeKind::Element { attributes, .. },
            ..
        }) = self.nodes.get_mut(id.index())
        else {
            return;
        };
        let name = name.to_ascii_lowercase();
        match attributes.iter_mut().find(|(k, _)| *k == name) {
            Some((_, v)) => *v = Some(value.to_string()),
            None => attributes.push((name, Some(value.to_string()))),
        }
    }

    pub fn append_child(&mut self, parent: Id, child: Id) {
        if parent.index() >= self.nodes.len() || child.index() >= self.nodes.len() {
            return;
        }
        self.detach(child);
        self.nodes[child.index()].parent = Some(parent);
        self.nodes[parent.index()].children.push(child);
    }

    /// Replaces the children of `id` with the parse of `markup`.
    pub fn set_inner_html(&mut self, id: Id, markup: &str) {
        if id.index() >= self.nodes.len() {
            return;
        }
        let old = std::mem::take(&mut self.nodes[id.index()].children);
        for child in old {
            self.nodes[child.index()].parent = None;
        }
        let tokens = tokenize(markup);
        self.build_into(id, &tokens);
    }

    pub fn inner_html(&self, id: Id) -> String {
        serialize::inner_html(self, id)
    }

    pub fn outer_html(&self, id: Id) -> String {
        serialize::outer_html(self, id)
    }

    /// Makes sure the document has an `<html>` element with a `<head>` and returns the head.
    ///
    /// An existing `<head>` anywhere in the tree wins; otherwise one is inserted as the first
    /// child of `<html>` (created at the root if needed).
    pub fn ensure_head(&mut self) -> Id {
        if let Some(head) = self.find_element(Id::ROOT, "head") {
            return head.id();
        }
        let html = match self.find_element(Id::ROOT, "html") {
            Some(html) => html.id(),
            None => {
                let html = self.create_element("html");
                self.append_child(Id::ROOT, html);
                html
            }
        };
        let head = self.create_element("head");
        self.nodes[head.index()].parent = Some(html);
        self.nodes[html.index()].children.insert(0, head);
        head
    }

    /// Builds a detached element from a selector such as `meta[name="x"]`.
    ///
    /// Only the leading tag name and the well-formed `[name="value"]` groups are used; see
    /// [`Selector::parse_lenient`]. Returns `None` when no leading tag name can be extracted.
    pub fn create_element_from_selector(&mut self, selector: &str) -> Option<Id> {
        let parsed = Selector::parse_lenient(selector);
        let tag = parsed.tag()?;
        let id = self.create_element(tag);
        for attr in parsed.attributes() {
            self.set_attribute(id, &attr.name, attr.value.as_deref().unwrap_or(""));
        }
        Some(id)
    }

    fn push(&mut self, kind: NodeKind, parent: Option<Id>) -> Id {
        let id = Id(self.nodes.len() as u32);
        self.nodes.push(NodeData {
            kind,
            parent,
            children: Vec::new(),
        });
        if let Some(parent) = parent {
            self.nodes[parent.index()].children.push(id);
        }
        id
    }

    fn detach(&mut self, child: Id) {
        if let Some(old_parent) = self.nodes[child.index()].parent.take() {
            self.nodes[old_parent.index()]
                .children
                .retain(|c| *c != child);
        }
    }

    fn is_element_named(&self, id: Id, target: &str) -> bool {
        self.nodes[id.index()].kind.element_name() == Some(target)
    }

    /// Tree construction over a token list, rooted at `context`.
    ///
    /// End tags close the nearest open element with the same name; an end tag with no open
    /// match is ignored, and `context` itself is never closed.
    fn build_into(&mut self, context: Id, tokens: &[Token]) {
        let mut open_elements: Vec<Id> = Vec::new();
        for token in tokens {
            let parent = open_elements.last().copied().unwrap_or(context);
            match token {
                Token::Doctype(value) => {
                    if context == Id::ROOT {
                        if let NodeKind::Document { doctype } = &mut self.nodes[0].kind {
                            *doctype = Some(value.clone());
                        }
                    }
                }
                Token::Comment(text) => {
                    self.push(NodeKind::Comment { text: text.clone() }, Some(parent));
                }
                Token::Text(text) => {
                    let last = self.nodes[parent.index()].children.last().copied();
                    if let Some(NodeKind::Text { text: prev }) =
                        last.map(|id| &mut self.nodes[id.index()].kind)
                    {
                        prev.push_str(text);
                    } else {
                        self.push(NodeKind::Text { text: text.clone() }, Some(parent));
                    }
                }
                Token::StartTag {
                    name,
                    attributes,
                    self_closing,
                } => {
                    let id = self.push(
                        NodeKind::Element {
                            name: name.clone(),
                            attributes: attributes.clone(),
                        },
                        Some(parent),
                    );
                    if !*self_closing {
                        open_elements.push(id);
                    }
                }
                Token::EndTag(name) => {
                    if let Some(pos) = open_elements
                        .iter()
                        .rposition(|id| self.is_element_named(*id, name))
                    {
                        open_elements.truncate(pos);
                    }
                }
            }
        }
    }
}

pub struct Descendants<'a> {
    doc: &'a Document,
    stack: Vec<Id>,
}

impl Iterator for Descendants<'_> {
    type Item = Id;

    fn next(&mut self) -> Option<Id> {
        let id = self.stack.pop()?;
        self.stack
            .extend(self.doc.children(id).iter().rev().copied());
        Some(id)
    }
}

/// Borrowed handle to an element node.
///
/// Equality is node identity: two handles are equal only when they point at the same node of
/// the same document.
#[derive(Clone, Copy)]
pub struct ElementRef<'a> {
    doc: &'a Document,
    id: Id,
}

impl<'a> ElementRef<'a> {
    pub fn id(&self) -> Id {
        self.id
    }

    pub fn document(&self) -> &'a Document {
        self.doc
    }

    pub fn name(&self) -> &'a str {
        self.doc.nodes[self.id.index()]
            .kind
            .element_name()
            .unwrap_or("")
    }

    pub fn attributes(&self) -> &'a [(String, Option<String>)] {
        match &self.doc.nodes[self.id.index()].kind {
            NodeKind::Element { attributes, .. } => attributes,
            _ => &[],
        }
    }

    /// Attribute value by (case-insensitive) name; bare attributes read as `""`.
    pub fn attr(&self, name: &str) -> Option<&'a str> {
        self.attributes()
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_deref().unwrap_or(""))
    }

    pub fn child_elements(&self) -> impl Iterator<Item = ElementRef<'a>> + 'a {
        let doc = self.doc;
        doc.children(self.id)
            .iter()
            .filter_map(move |id| doc.element(*id))
    }

    pub fn inner_html(&self) -> String {
        self.doc.inner_html(self.id)
    }

    pub fn outer_html(&self) -> String {
        self.doc.outer_html(self.id)
    }

    /// The serialized start tag only, e.g. `<meta name="x">`.
    pub fn start_tag(&self) -> String {
        let mut out = String::new();
        serialize::push_start_tag(self.name(), self.attributes(), &mut out);
        out
    }

    pub fn same_node(&self, other: &ElementRef<'_>) -> bool {
        std::ptr::eq(self.doc, other.doc) && self.id == other.id
    }
}

impl PartialEq for ElementRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.same_node(other)
    }
}

impl Eq for ElementRef<'_> {}

impl fmt::Debug for ElementRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ElementRef({:?} {})", self.id, self.start_tag())
    }
}

impl fmt::Display for ElementRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.outer_html())
    }
}
