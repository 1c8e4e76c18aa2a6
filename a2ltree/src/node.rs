use serde_json::{Map, Value as JsonValue};
use std::fmt::Debug;
use std::sync::Arc;

use crate::a2ml::A2mlRegistry;
use crate::behavior::{DEFAULT_BEHAVIOR, NodeBehavior};
use crate::grammar::{FieldKind, Multiplicity, NodeSchema, Special};
use crate::ifdata::{IfDataContent, float_to_json};
use crate::writer::Writer;

/// The tag of the root node. The root is never written with a tag of its own
pub(crate) const ROOT_TAG: &str = "A2L_FILE";

/// Index of a node in the arena of an [`A2lTree`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

/// An integer value, together with the information whether it was written in hex
///
/// Unsigned values above `i64::MAX` are stored as their bit pattern and `is_u64` is set.
/// The notation is only used when the value is written; two values are equal if the numbers are equal.
#[derive(Debug, Clone, Copy, Default, Eq)]
pub struct IntValue {
    pub value: i64,
    pub is_hex: bool,
    pub is_u64: bool,
}

impl IntValue {
    /// a decimal value
    #[must_use]
    pub fn new(value: i64) -> Self {
        Self {
            value,
            ..Self::default()
        }
    }

    /// the value as a json number, unsigned if it does not fit into an i64
    pub(crate) fn to_json(self) -> JsonValue {
        if self.is_u64 {
            JsonValue::from(self.value as u64)
        } else {
            JsonValue::from(self.value)
        }
    }
}

impl PartialEq for IntValue {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value && self.is_u64 == other.is_u64
    }
}

/// The text of an A2ML block together with the types it declares
#[derive(Debug, Clone)]
pub struct A2mlSource {
    pub text: String,
    pub registry: Arc<A2mlRegistry>,
}

impl PartialEq for A2mlSource {
    // formatting and comments in the text don't matter
    fn eq(&self, other: &Self) -> bool {
        self.registry == other.registry
    }
}

/// The value of a field of a node
#[derive(Debug, Clone)]
pub enum Value {
    /// an optional field that is not present
    None,
    Int(IntValue),
    Float(f64),
    String(String),
    Ident(String),
    Enum(&'static str),
    List(Vec<Value>),
    /// one element of a repeated group of values, e.g. a value pair of `COMPU_TAB`
    Record(Vec<(&'static str, Value)>),
    Node(NodeId),
    /// the `IF_DATA` children of a node, by tag
    NodeMap(Vec<(String, NodeId)>),
    IfData(IfDataContent),
    A2ml(A2mlSource),
}

#[derive(Debug)]
pub(crate) struct NodeData {
    pub(crate) schema: &'static NodeSchema,
    pub(crate) fields: Vec<(&'static str, Value)>,
    pub(crate) parent: Option<NodeId>,
    pub(crate) line: u32,
    pub(crate) behavior: Option<Arc<dyn NodeBehavior>>,
}

/// A parsed a2l file
///
/// All nodes are stored in one arena; nodes refer to their children and to their parent by [`NodeId`].
#[derive(Debug)]
pub struct A2lTree {
    pub(crate) nodes: Vec<NodeData>,
    pub(crate) root: NodeId,
}

/// Handle to one node of an [`A2lTree`]
#[derive(Clone, Copy)]
pub struct NodeRef<'a> {
    tree: &'a A2lTree,
    id: NodeId,
}

/// Lazy line-by-line output of a node and all of its children
///
/// Each item is a pair of indentation level and line text.
#[derive(Debug, Clone)]
pub struct Dump<'a> {
    tree: &'a A2lTree,
    stack: Vec<DumpItem>,
}

#[derive(Debug, Clone)]
enum DumpItem {
    Node(NodeId, usize),
    Line(usize, String),
}

impl Value {
    fn remap_nodes(&mut self, remap: &impl Fn(NodeId) -> NodeId) {
        match self {
            Value::Node(id) => *id = remap(*id),
            Value::List(items) => {
                for item in items {
                    item.remap_nodes(remap);
                }
            }
            Value::NodeMap(entries) => {
                for (_, id) in entries {
                    *id = remap(*id);
                }
            }
            _ => {}
        }
    }

    #[must_use]
    pub fn is_none(&self) -> bool {
        matches!(self, Value::None)
    }

    #[must_use]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(intval) => Some(intval.value),
            _ => None,
        }
    }

    /// Get the value of a float field. Integers are converted
    #[must_use]
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(value) => Some(*value),
            Value::Int(intval) if intval.is_u64 => Some(intval.value as u64 as f64),
            Value::Int(intval) => Some(intval.value as f64),
            _ => None,
        }
    }

    /// Get the text of a string, identifier or enum value
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(text) | Value::Ident(text) => Some(text),
            Value::Enum(item) => Some(item),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_record(&self) -> Option<&[(&'static str, Value)]> {
        match self {
            Value::Record(members) => Some(members),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_if_data(&self) -> Option<&IfDataContent> {
        match self {
            Value::IfData(content) => Some(content),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_a2ml(&self) -> Option<&A2mlSource> {
        match self {
            Value::A2ml(source) => Some(source),
            _ => None,
        }
    }
}

impl A2lTree {
    // from_arena()
    // Nodes that were replaced by a later occurrence of the same keyword or IF_DATA tag stay in the
    // parser arena without a parent. They and their descendants are dropped here, and the ids are renumbered
    pub(crate) fn from_arena(mut nodes: Vec<NodeData>, root: NodeId) -> Self {
        let mut reachable = vec![false; nodes.len()];
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            reachable[id.0] = true;
            stack.extend(child_ids(&nodes[id.0].fields));
        }
        if reachable.iter().all(|r| *r) {
            return Self { nodes, root };
        }

        let mut new_ids = Vec::with_capacity(nodes.len());
        let mut count = 0;
        for keep in &reachable {
            new_ids.push(NodeId(count));
            if *keep {
                count += 1;
            }
        }
        let remap = |id: NodeId| new_ids[id.0];

        nodes = nodes
            .into_iter()
            .zip(reachable)
            .filter_map(|(node, keep)| keep.then_some(node))
            .collect();
        for node in &mut nodes {
            node.parent = node.parent.map(remap);
            for (_, value) in &mut node.fields {
                value.remap_nodes(&remap);
            }
        }

        Self {
            nodes,
            root: remap(root),
        }
    }

    #[must_use]
    pub fn root(&self) -> NodeRef<'_> {
        self.node(self.root)
    }

    /// Get the node with the given id
    ///
    /// # Panics
    ///
    /// If the id belongs to a different tree and is out of range
    #[must_use]
    pub fn node(&self, id: NodeId) -> NodeRef<'_> {
        assert!(id.0 < self.nodes.len(), "invalid node id {}", id.0);
        NodeRef { tree: self, id }
    }

    /// Number of nodes in the tree. Every node is reachable from the root
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All nodes, in the order in which their parsing was completed
    pub fn nodes(&self) -> impl Iterator<Item = NodeRef<'_>> {
        (0..self.nodes.len()).map(|idx| NodeRef {
            tree: self,
            id: NodeId(idx),
        })
    }

    /// Write the whole tree as a2l text
    #[must_use]
    pub fn write_to_string(&self) -> String {
        self.root().write_to_string()
    }
}

impl PartialEq for A2lTree {
    fn eq(&self, other: &Self) -> bool {
        self.root().structurally_equal(other.root())
    }
}

impl<'a> NodeRef<'a> {
    fn data(&self) -> &'a NodeData {
        &self.tree.nodes[self.id.0]
    }

    #[must_use]
    pub fn id(&self) -> NodeId {
        self.id
    }

    #[must_use]
    pub fn tree(&self) -> &'a A2lTree {
        self.tree
    }

    #[must_use]
    pub fn tag(&self) -> &'static str {
        self.data().schema.tag
    }

    #[must_use]
    pub fn schema(&self) -> &'static NodeSchema {
        self.data().schema
    }

    /// The line on which the node starts in the input
    #[must_use]
    pub fn line(&self) -> u32 {
        self.data().line
    }

    #[must_use]
    pub fn field(&self, name: &str) -> Option<&'a Value> {
        self.data()
            .fields
            .iter()
            .find(|(fieldname, _)| *fieldname == name)
            .map(|(_, value)| value)
    }

    /// All fields of the node in schema order, including absent optional fields
    pub fn properties(&self) -> impl Iterator<Item = (&'static str, &'a Value)> {
        self.data().fields.iter().map(|(name, value)| (*name, value))
    }

    /// All child nodes, in field order
    #[must_use]
    pub fn children(&self) -> Vec<NodeRef<'a>> {
        let tree = self.tree;
        let mut children = Vec::new();
        for (_, value) in &self.data().fields {
            match value {
                Value::Node(id) => children.push(tree.node(*id)),
                Value::List(items) => {
                    for item in items {
                        if let Value::Node(id) = item {
                            children.push(tree.node(*id));
                        }
                    }
                }
                Value::NodeMap(entries) => {
                    children.extend(entries.iter().map(|(_, id)| tree.node(*id)));
                }
                _ => {}
            }
        }
        children
    }

    #[must_use]
    pub fn parent(&self) -> Option<NodeRef<'a>> {
        self.data().parent.map(|id| self.tree.node(id))
    }

    /// Get the child node stored in a single-valued field, e.g. `child("byte_order")`
    #[must_use]
    pub fn child(&self, name: &str) -> Option<NodeRef<'a>> {
        match self.field(name)? {
            Value::Node(id) => Some(self.tree.node(*id)),
            _ => None,
        }
    }

    /// Get the child nodes of a list field, e.g. `child_list("characteristic")`
    #[must_use]
    pub fn child_list(&self, name: &str) -> Vec<NodeRef<'a>> {
        match self.field(name) {
            Some(Value::List(items)) => items
                .iter()
                .filter_map(|item| match item {
                    Value::Node(id) => Some(self.tree.node(*id)),
                    _ => None,
                })
                .collect(),
            Some(Value::Node(id)) => vec![self.tree.node(*id)],
            _ => Vec::new(),
        }
    }

    /// Get the `IF_DATA` child with the given tag
    #[must_use]
    pub fn if_data(&self, tag: &str) -> Option<NodeRef<'a>> {
        match self.field("if_data")? {
            Value::NodeMap(entries) => entries
                .iter()
                .find(|(entrytag, _)| entrytag == tag)
                .map(|(_, id)| self.tree.node(*id)),
            _ => None,
        }
    }

    /// The behavior attached to the node, or the default behavior
    #[must_use]
    pub fn behavior(&self) -> &'a dyn NodeBehavior {
        match &self.data().behavior {
            Some(behavior) => behavior.as_ref(),
            None => &DEFAULT_BEHAVIOR,
        }
    }

    #[must_use]
    pub fn node_name(&self) -> String {
        self.behavior().node_name(*self)
    }

    #[must_use]
    pub fn describe(&self) -> String {
        self.behavior().describe(*self)
    }

    /// Compare the tags and all field values recursively
    ///
    /// The parent, line numbers, hex or decimal notation and attached behaviors are ignored.
    /// The nodes may belong to different trees.
    #[must_use]
    pub fn structurally_equal(&self, other: NodeRef<'_>) -> bool {
        let data = self.data();
        let otherdata = other.data();
        data.schema.tag == otherdata.schema.tag
            && data.fields.len() == otherdata.fields.len()
            && data
                .fields
                .iter()
                .zip(&otherdata.fields)
                .all(|((name, value), (othername, othervalue))| {
                    name == othername && values_equal(self.tree, value, other.tree, othervalue)
                })
    }

    /// Structured representation of the node and all of its children
    ///
    /// Each node is an object whose "node" member holds the tag, followed by all fields.
    #[must_use]
    pub fn to_mapping(&self) -> JsonValue {
        let mut map = Map::new();
        map.insert("node".to_string(), JsonValue::from(self.tag()));
        for (name, value) in &self.data().fields {
            map.insert((*name).to_string(), value_to_json(self.tree, value));
        }
        JsonValue::Object(map)
    }

    /// Lazily produce the a2l text of the node as (indent, line) pairs
    ///
    /// Every call starts a new traversal.
    #[must_use]
    pub fn dump(&self) -> Dump<'a> {
        Dump {
            tree: self.tree,
            stack: vec![DumpItem::Node(self.id, 0)],
        }
    }

    #[must_use]
    pub fn write_to_string(&self) -> String {
        let mut output = String::with_capacity(1024);
        for (indent, line) in self.dump() {
            for _ in 0..indent {
                output.push_str("  ");
            }
            output.push_str(&line);
            output.push('\n');
        }
        output
    }
}

impl PartialEq for NodeRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.structurally_equal(*other)
    }
}

impl Debug for NodeRef<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NodeRef")
            .field("tag", &self.tag())
            .field("id", &self.id.0)
            .field("line", &self.line())
            .finish()
    }
}

fn values_equal(tree: &A2lTree, value: &Value, othertree: &A2lTree, othervalue: &Value) -> bool {
    match (value, othervalue) {
        (Value::None, Value::None) => true,
        (Value::Int(a), Value::Int(b)) => a == b,
        (Value::Float(a), Value::Float(b)) => a == b || (a.is_nan() && b.is_nan()),
        (Value::String(a), Value::String(b)) | (Value::Ident(a), Value::Ident(b)) => a == b,
        (Value::Enum(a), Value::Enum(b)) => a == b,
        (Value::List(a), Value::List(b)) => {
            a.len() == b.len()
                && a.iter()
                    .zip(b)
                    .all(|(x, y)| values_equal(tree, x, othertree, y))
        }
        (Value::Record(a), Value::Record(b)) => {
            a.len() == b.len()
                && a.iter().zip(b).all(|((namea, x), (nameb, y))| {
                    namea == nameb && values_equal(tree, x, othertree, y)
                })
        }
        (Value::Node(a), Value::Node(b)) => tree.node(*a).structurally_equal(othertree.node(*b)),
        (Value::NodeMap(a), Value::NodeMap(b)) => {
            // the order of the IF_DATA blocks is not significant
            a.len() == b.len()
                && a.iter().all(|(tag, id)| {
                    b.iter().any(|(othertag, otherid)| {
                        tag == othertag && tree.node(*id).structurally_equal(othertree.node(*otherid))
                    })
                })
        }
        (Value::IfData(a), Value::IfData(b)) => a == b,
        (Value::A2ml(a), Value::A2ml(b)) => a == b,
        _ => false,
    }
}

fn value_to_json(tree: &A2lTree, value: &Value) -> JsonValue {
    match value {
        Value::None => JsonValue::Null,
        Value::Int(intval) => intval.to_json(),
        Value::Float(floatval) => float_to_json(*floatval),
        Value::String(text) | Value::Ident(text) => JsonValue::from(text.as_str()),
        Value::Enum(item) => JsonValue::from(*item),
        Value::List(items) => {
            JsonValue::Array(items.iter().map(|item| value_to_json(tree, item)).collect())
        }
        Value::Record(members) => JsonValue::Object(
            members
                .iter()
                .map(|(name, member)| ((*name).to_string(), value_to_json(tree, member)))
                .collect(),
        ),
        Value::Node(id) => tree.node(*id).to_mapping(),
        Value::NodeMap(entries) => JsonValue::Object(
            entries
                .iter()
                .map(|(tag, id)| {
                    let content = tree
                        .node(*id)
                        .field("content")
                        .map_or(JsonValue::Null, |content| value_to_json(tree, content));
                    (tag.clone(), content)
                })
                .collect(),
        ),
        Value::IfData(content) => content.to_json(),
        Value::A2ml(source) => JsonValue::from(source.text.as_str()),
    }
}

// write the positional values of a node
fn write_value(writer: &mut Writer, value: &Value) {
    match value {
        Value::Int(intval) => writer.add_integer(*intval),
        Value::Float(floatval) => writer.add_float(*floatval),
        Value::String(text) => writer.add_quoted_string(text),
        Value::Ident(text) => writer.add_str(text),
        Value::Enum(item) => writer.add_str(item),
        Value::List(items) => {
            for item in items {
                write_value(writer, item);
            }
        }
        Value::Record(members) => {
            for (_, member) in members {
                write_value(writer, member);
            }
        }
        Value::None | Value::Node(_) | Value::NodeMap(_) | Value::IfData(_) | Value::A2ml(_) => {}
    }
}

impl<'a> Dump<'a> {
    // produce the lines of one node. Child nodes are placed on the stack between the lines of the node and its end line
    fn expand(&mut self, id: NodeId, indent: usize) {
        let tree: &'a A2lTree = self.tree;
        let node = tree.node(id);
        let data = node.data();
        let tag = data.schema.tag;

        // the root node contributes only its children
        if tag == ROOT_TAG && data.parent.is_none() {
            self.push_children(node, indent);
            return;
        }

        let mut writer = Writer::new(indent);
        let mut end_line = None;
        match data.schema.special {
            Special::A2ml => {
                writer.add_str("/begin A2ML");
                writer.indent();
                if let Some(Value::A2ml(source)) = node.field("text") {
                    for line in source.text.lines().map(str::trim).filter(|line| !line.is_empty()) {
                        writer.newline();
                        writer.add_str(line);
                    }
                }
                end_line = Some((indent, "/end A2ML".to_string()));
            }
            Special::IfData => {
                let iftag = node.field("tag").and_then(Value::as_str).unwrap_or_default();
                writer.add_str("/begin IF_DATA");
                writer.add_str(iftag);
                writer.indent();
                writer.newline();
                if let Some(Value::IfData(content)) = node.field("content") {
                    content.write(&mut writer, iftag);
                }
                end_line = Some((indent, "/end IF_DATA".to_string()));
            }
            Special::None if data.schema.is_block => {
                writer.add_str("/begin");
                writer.add_str(tag);
                writer.indent();
                // positional values are written on the first line until the first repeated value.
                // Each repeated value and every value after it gets its own line
                let mut on_first_line = true;
                for (field, (_, value)) in data.schema.fields.iter().zip(&data.fields) {
                    if field.kind != FieldKind::Positional {
                        continue;
                    }
                    if field.multiplicity == Multiplicity::List {
                        on_first_line = false;
                        for item in value.as_list().unwrap_or_default() {
                            writer.newline();
                            write_value(&mut writer, item);
                        }
                    } else {
                        if !on_first_line {
                            writer.newline();
                        }
                        write_value(&mut writer, value);
                    }
                }
                end_line = Some((indent, format!("/end {tag}")));
            }
            Special::None => {
                writer.add_str(tag);
                for (field, (_, value)) in data.schema.fields.iter().zip(&data.fields) {
                    if field.kind == FieldKind::Positional {
                        write_value(&mut writer, value);
                    }
                }
            }
        }

        let child_indent = if end_line.is_some() { indent + 1 } else { indent };
        if let Some((end_indent, end_text)) = end_line {
            self.stack.push(DumpItem::Line(end_indent, end_text));
        }
        self.push_children(node, child_indent);
        for (line_indent, text) in writer.finish().into_iter().rev() {
            self.stack.push(DumpItem::Line(line_indent, text));
        }
    }

    fn push_children(&mut self, node: NodeRef<'_>, indent: usize) {
        for child in node.children().into_iter().rev() {
            self.stack.push(DumpItem::Node(child.id, indent));
        }
    }
}

impl Iterator for Dump<'_> {
    type Item = (usize, String);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.stack.pop()? {
                DumpItem::Line(indent, text) => return Some((indent, text)),
                DumpItem::Node(id, indent) => self.expand(id, indent),
            }
        }
    }
}

// ids of all child nodes that are referenced by the fields of a node
pub(crate) fn child_ids(fields: &[(&'static str, Value)]) -> Vec<NodeId> {
    let mut ids = Vec::new();
    for (_, value) in fields {
        match value {
            Value::Node(id) => ids.push(*id),
            Value::List(items) => ids.extend(items.iter().filter_map(|item| match item {
                Value::Node(id) => Some(*id),
                _ => None,
            })),
            Value::NodeMap(entries) => ids.extend(entries.iter().map(|(_, id)| *id)),
            _ => {}
        }
    }
    ids
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::lookup_schema;

    fn int(value: i64) -> Value {
        Value::Int(IntValue::new(value))
    }

    // build a small tree by hand: MODULE with one COMPU_TAB and a BYTE_ORDER inside MOD_COMMON
    fn make_tree(hex: bool) -> A2lTree {
        let mut nodes = Vec::new();
        nodes.push(NodeData {
            schema: lookup_schema("BYTE_ORDER").unwrap(),
            fields: vec![("byte_order", Value::Enum("MSB_LAST"))],
            parent: Some(NodeId(2)),
            line: 4,
            behavior: None,
        });
        nodes.push(NodeData {
            schema: lookup_schema("COMPU_TAB").unwrap(),
            fields: vec![
                ("name", Value::Ident("tab".to_string())),
                ("long_identifier", Value::String("a \"table\"".to_string())),
                ("conversion_type", Value::Enum("TAB_INTP")),
                (
                    "number_value_pair",
                    Value::Int(IntValue {
                        value: 2,
                        is_hex: hex,
                        is_u64: false,
                    }),
                ),
                (
                    "in_val_out_val",
                    Value::List(vec![
                        Value::Record(vec![("in_val", int(1)), ("out_val", Value::Float(0.5))]),
                        Value::Record(vec![("in_val", int(2)), ("out_val", Value::Float(1.5))]),
                    ]),
                ),
                ("default_value", Value::None),
                ("default_value_numeric", Value::None),
            ],
            parent: Some(NodeId(3)),
            line: 2,
            behavior: None,
        });
        let mod_common_schema = lookup_schema("MOD_COMMON").unwrap();
        let mut mod_common_fields: Vec<(&'static str, Value)> = mod_common_schema
            .fields
            .iter()
            .map(|field| (field.name, Value::None))
            .collect();
        mod_common_fields[0].1 = Value::String("common".to_string());
        for (name, value) in &mut mod_common_fields {
            if *name == "byte_order" {
                *value = Value::Node(NodeId(0));
            }
        }
        nodes.push(NodeData {
            schema: mod_common_schema,
            fields: mod_common_fields,
            parent: Some(NodeId(3)),
            line: 3,
            behavior: None,
        });
        let module_schema = lookup_schema("MODULE").unwrap();
        let module_fields = module_schema
            .fields
            .iter()
            .map(|field| {
                let value = match field.name {
                    "name" => Value::Ident("m".to_string()),
                    "long_identifier" => Value::String(String::new()),
                    "compu_tab" => Value::List(vec![Value::Node(NodeId(1))]),
                    "mod_common" => Value::Node(NodeId(2)),
                    "if_data" => Value::NodeMap(Vec::new()),
                    _ if field.multiplicity == Multiplicity::List => Value::List(Vec::new()),
                    _ => Value::None,
                };
                (field.name, value)
            })
            .collect();
        nodes.push(NodeData {
            schema: module_schema,
            fields: module_fields,
            parent: None,
            line: 1,
            behavior: None,
        });
        A2lTree {
            nodes,
            root: NodeId(3),
        }
    }

    #[test]
    fn accessors() {
        let tree = make_tree(false);
        let module = tree.root();
        assert_eq!(module.tag(), "MODULE");
        assert_eq!(module.field("name").and_then(Value::as_str), Some("m"));
        assert!(module.field("no_such_field").is_none());
        let children: Vec<&str> = module.children().iter().map(NodeRef::tag).collect();
        assert_eq!(children, vec!["COMPU_TAB", "MOD_COMMON"]);
        let tab = module.child_list("compu_tab")[0];
        assert_eq!(tab.parent().map(|p| p.tag()), Some("MODULE"));
        assert_eq!(tab.line(), 2);
        let byte_order = module.child("mod_common").unwrap().child("byte_order").unwrap();
        assert_eq!(byte_order.field("byte_order").and_then(Value::as_str), Some("MSB_LAST"));
        assert!(module.child("frame").is_none());
        assert!(module.if_data("XCP").is_none());
        assert_eq!(tab.node_name(), "COMPU_TAB");
        assert_eq!(tab.describe(), "COMPU_TAB tab");
        assert_eq!(tree.nodes().count(), 4);
    }

    #[test]
    fn equality() {
        let tree = make_tree(false);
        let tree_hex = make_tree(true);
        // the number notation is ignored
        assert_eq!(tree, tree_hex);
        assert!(tree.node(NodeId(1)).structurally_equal(tree_hex.node(NodeId(1))));
        assert!(!tree.node(NodeId(1)).structurally_equal(tree_hex.node(NodeId(2))));
    }

    #[test]
    fn dump() {
        let tree = make_tree(true);
        let lines: Vec<(usize, String)> = tree.root().dump().collect();
        let expected = vec![
            (0, "/begin MODULE m \"\""),
            (1, "/begin COMPU_TAB tab \"a \\\"table\\\"\" TAB_INTP 0x2"),
            (2, "1 0.5"),
            (2, "2 1.5"),
            (1, "/end COMPU_TAB"),
            (1, "/begin MOD_COMMON \"common\""),
            (2, "BYTE_ORDER MSB_LAST"),
            (1, "/end MOD_COMMON"),
            (0, "/end MODULE"),
        ];
        let expected: Vec<(usize, String)> = expected
            .into_iter()
            .map(|(indent, text)| (indent, text.to_string()))
            .collect();
        assert_eq!(lines, expected);

        // the dump can be restarted, and starting from an inner node works
        let mut dump = tree.node(NodeId(2)).dump();
        assert_eq!(dump.next(), Some((0, "/begin MOD_COMMON \"common\"".to_string())));
        assert_eq!(tree.root().dump().count(), 9);

        let text = tree.node(NodeId(0)).write_to_string();
        assert_eq!(text, "BYTE_ORDER MSB_LAST\n");
    }

    #[test]
    fn mapping() {
        let tree = make_tree(false);
        let mapping = tree.node(NodeId(1)).to_mapping();
        assert_eq!(
            mapping,
            serde_json::json!({
                "node": "COMPU_TAB",
                "name": "tab",
                "long_identifier": "a \"table\"",
                "conversion_type": "TAB_INTP",
                "number_value_pair": 2,
                "in_val_out_val": [{"in_val": 1, "out_val": 0.5}, {"in_val": 2, "out_val": 1.5}],
                "default_value": null,
                "default_value_numeric": null
            })
        );
        let module = tree.root().to_mapping();
        assert_eq!(module["node"], "MODULE");
        assert_eq!(module["if_data"], serde_json::json!({}));
        assert_eq!(module["characteristic"], serde_json::json!([]));
        assert_eq!(module["mod_common"]["byte_order"]["byte_order"], "MSB_LAST");
    }
}
