use std::fmt;
use std::io::Write;
use std::num::{NonZeroU32, NonZeroUsize};

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use super::{Namespace, WsdlError};

/// A reference to a node stored in a [`Document`]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(NonZeroU32);

impl NodeId {
    fn from_index(index: usize) -> Self {
        let inner = u32::try_from(index + 1).expect("Document node count exceeds u32 range");
        Self(NonZeroU32::new(inner).expect("Node index + 1 cannot be zero"))
    }

    fn index(self) -> usize {
        let size: NonZeroUsize = self
            .0
            .try_into()
            .expect("Could not convert node reference to usize index");
        usize::from(size) - 1
    }
}

#[derive(Clone, Debug)]
enum NodeKind {
    Element {
        namespace: Namespace,
        local_name: String,
        attributes: Vec<(String, String)>,
    },
    Text(String),
}

#[derive(Clone, Debug)]
struct Node {
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// A mutable XML tree in which every element belongs to one of the fixed WSDL [`Namespace`]s.
///
/// Nodes are created detached and have to be attached with [`Document::append_child`] or
/// [`Document::insert_child`] to become part of the serialized output.
#[derive(Clone, Debug)]
pub struct Document {
    nodes: Vec<Node>,
    root: NodeId,
}

impl Document {
    pub fn new(namespace: Namespace, local_name: &str) -> Self {
        let mut document = Self {
            nodes: Vec::new(),
            root: NodeId::from_index(0),
        };
        document.root = document.create_element(namespace, local_name);
        document
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    fn node(&self, id: NodeId) -> &Node {
        self.nodes
            .get(id.index())
            .expect("Invalid node reference (out-of-bounds)")
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Node {
        self.nodes
            .get_mut(id.index())
            .expect("Invalid node reference (out-of-bounds)")
    }

    fn push(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId::from_index(self.nodes.len());
        self.nodes.push(Node {
            kind,
            parent: None,
            children: Vec::new(),
        });
        id
    }

    pub fn create_element(&mut self, namespace: Namespace, local_name: &str) -> NodeId {
        self.push(NodeKind::Element {
            namespace,
            local_name: local_name.to_owned(),
            attributes: Vec::new(),
        })
    }

    pub fn create_text(&mut self, text: &str) -> NodeId {
        self.push(NodeKind::Text(text.to_owned()))
    }

    fn detach(&mut self, child: NodeId) {
        if let Some(parent) = self.node_mut(child).parent.take() {
            self.node_mut(parent).children.retain(|&c| c != child);
        }
    }

    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        let index = self.node(parent).children.len();
        self.insert_child(parent, index, child);
    }

    /// Inserts `child` at `index` among the children of `parent`, moving it if already attached.
    pub fn insert_child(&mut self, parent: NodeId, index: usize, child: NodeId) {
        assert_ne!(parent, child, "A node cannot be its own child");
        let mut ancestor = self.parent(parent);
        while let Some(node) = ancestor {
            assert_ne!(node, child, "A node cannot be attached below its own descendant");
            ancestor = self.parent(node);
        }
        self.detach(child);
        let children = &mut self.node_mut(parent).children;
        let index = index.min(children.len());
        children.insert(index, child);
        self.node_mut(child).parent = Some(parent);
    }

    pub fn insert_first(&mut self, parent: NodeId, child: NodeId) {
        self.insert_child(parent, 0, child);
    }

    /// Sets an unqualified attribute, replacing a previous value of the same name.
    pub fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) {
        let NodeKind::Element { attributes, .. } = &mut self.node_mut(node).kind else {
            panic!("Attributes can only be set on element nodes");
        };
        match attributes.iter_mut().find(|(n, _)| n == name) {
            Some((_, v)) => *v = value.to_owned(),
            None => attributes.push((name.to_owned(), value.to_owned())),
        }
    }

    /// Sets an attribute in `namespace`, written with the namespace's fixed prefix.
    pub fn set_attribute_ns(&mut self, node: NodeId, namespace: Namespace, name: &str, value: &str) {
        let qualified = format!("{}:{name}", namespace.prefix());
        self.set_attribute(node, &qualified, value);
    }

    pub fn attribute(&self, node: NodeId, name: &str) -> Option<&str> {
        match &self.node(node).kind {
            NodeKind::Element { attributes, .. } => attributes
                .iter()
                .find(|(n, _)| n == name)
                .map(|(_, v)| v.as_str()),
            NodeKind::Text(_) => None,
        }
    }

    pub fn namespace(&self, node: NodeId) -> Option<Namespace> {
        match &self.node(node).kind {
            NodeKind::Element { namespace, .. } => Some(*namespace),
            NodeKind::Text(_) => None,
        }
    }

    pub fn local_name(&self, node: NodeId) -> Option<&str> {
        match &self.node(node).kind {
            NodeKind::Element { local_name, .. } => Some(local_name),
            NodeKind::Text(_) => None,
        }
    }

    pub fn is_element(&self, node: NodeId, namespace: Namespace, local_name: &str) -> bool {
        self.namespace(node) == Some(namespace) && self.local_name(node) == Some(local_name)
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.node(node).parent
    }

    pub fn children(&self, node: NodeId) -> &[NodeId] {
        &self.node(node).children
    }

    pub fn child_elements<'a>(
        &'a self,
        node: NodeId,
        namespace: Namespace,
        local_name: &'a str,
    ) -> impl Iterator<Item = NodeId> + 'a {
        self.children(node)
            .iter()
            .copied()
            .filter(move |&c| self.is_element(c, namespace, local_name))
    }

    pub fn first_child_element(
        &self,
        node: NodeId,
        namespace: Namespace,
        local_name: &str,
    ) -> Option<NodeId> {
        self.child_elements(node, namespace, local_name).next()
    }

    /// Concatenation of all descendant text nodes.
    pub fn text_content(&self, node: NodeId) -> String {
        let mut text = String::new();
        self.collect_text(node, &mut text);
        text
    }

    fn collect_text(&self, node: NodeId, out: &mut String) {
        match &self.node(node).kind {
            NodeKind::Text(text) => out.push_str(text),
            NodeKind::Element { .. } => {
                for &child in self.children(node) {
                    self.collect_text(child, out);
                }
            }
        }
    }

    /// Serializes the document (XML declaration included) without indentation.
    pub fn write<W: Write>(&self, inner: W) -> Result<(), WsdlError> {
        let mut writer = Writer::new(inner);
        writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
            .map_err(serialization)?;
        self.write_node(&mut writer, self.root)
    }

    fn write_node<W: Write>(&self, writer: &mut Writer<W>, id: NodeId) -> Result<(), WsdlError> {
        let node = self.node(id);
        match &node.kind {
            NodeKind::Text(text) => writer
                .write_event(Event::Text(BytesText::new(text)))
                .map_err(serialization),
            NodeKind::Element {
                namespace,
                local_name,
                attributes,
            } => {
                let name = namespace.qualify(local_name);
                let mut start = BytesStart::new(name.as_str());
                start.extend_attributes(attributes.iter().map(|(n, v)| (n.as_str(), v.as_str())));
                if node.children.is_empty() {
                    return writer
                        .write_event(Event::Empty(start))
                        .map_err(serialization);
                }
                writer
                    .write_event(Event::Start(start))
                    .map_err(serialization)?;
                for &child in &node.children {
                    self.write_node(writer, child)?;
                }
                writer
                    .write_event(Event::End(BytesEnd::new(name.as_str())))
                    .map_err(serialization)
            }
        }
    }

    pub fn to_xml(&self) -> Result<String, WsdlError> {
        let mut buffer = Vec::new();
        self.write(&mut buffer)?;
        String::from_utf8(buffer).map_err(serialization)
    }
}

fn serialization(error: impl fmt::Display) -> WsdlError {
    WsdlError::Serialization(error.to_string())
}
