//! Static description of the a2l node types
//!
//! The tables themselves are generated from the catalog in `specification.rs` by the
//! `a2l_grammar!` macro. Everything here is read-only and shared between all parses.

pub use crate::specification::lookup_schema;

/// Schema of one node type
#[derive(Debug, PartialEq)]
pub struct NodeSchema {
    /// the tag of the node, e.g. `CHARACTERISTIC`
    pub tag: &'static str,
    /// block nodes are enclosed in `/begin TAG ... /end TAG`, keyword nodes are written as `TAG values...`
    pub is_block: bool,
    pub special: Special,
    /// positional fields first, in the order in which they appear in the file, followed by the keyword fields
    pub fields: &'static [FieldSchema],
}

/// Nodes that are not handled by the generic field parser
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Special {
    None,
    /// the node contains the A2ML type declarations
    A2ml,
    /// the node contains vendor data that is interpreted with the A2ML declarations
    IfData,
}

#[derive(Debug, PartialEq)]
pub struct FieldSchema {
    pub name: &'static str,
    pub kind: FieldKind,
    pub multiplicity: Multiplicity,
    pub value_type: ValueType,
    /// fixed number of elements for array fields, 1 otherwise
    pub dim: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Positional,
    Keyword,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Multiplicity {
    One,
    Optional,
    List,
}

#[derive(Debug, PartialEq)]
pub enum ValueType {
    Int,
    Float,
    String,
    Ident,
    Enum(&'static EnumSchema),
    /// a record of several values; used for repeated positional groups like the value pairs of `COMPU_TAB`
    Group(&'static [FieldSchema]),
    /// a child node with the given tag
    Node(&'static str),
}

#[derive(Debug, PartialEq)]
pub struct EnumSchema {
    pub name: &'static str,
    pub items: &'static [&'static str],
}

impl NodeSchema {
    pub fn positional_fields(&self) -> impl Iterator<Item = &'static FieldSchema> {
        self.fields
            .iter()
            .filter(|field| field.kind == FieldKind::Positional)
    }

    /// Find the keyword field that holds child nodes with the given tag
    pub fn keyword_field(&self, tag: &str) -> Option<(usize, &'static FieldSchema)> {
        self.fields.iter().enumerate().find(|(_, field)| {
            field.kind == FieldKind::Keyword && matches!(field.value_type, ValueType::Node(t) if t == tag)
        })
    }

    pub fn has_keywords(&self) -> bool {
        self.fields
            .iter()
            .any(|field| field.kind == FieldKind::Keyword)
    }

    /// true if a child of this node can contain A2ML declarations
    pub fn holds_a2ml(&self) -> bool {
        self.keyword_field("A2ML").is_some()
    }
}

impl EnumSchema {
    pub fn contains(&self, item: &str) -> bool {
        self.items.contains(&item)
    }
}

/// Schema of the root node `A2L_FILE`, which is the first entry of the catalog
pub fn root_schema() -> &'static NodeSchema {
    &crate::specification::GRAMMAR[0]
}

/// Iterate over all node schemas
pub fn all_schemas() -> impl Iterator<Item = &'static NodeSchema> {
    crate::specification::GRAMMAR.iter()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup() {
        let schema = lookup_schema("CHARACTERISTIC").unwrap();
        assert!(schema.is_block);
        let positionals: Vec<&str> = schema.positional_fields().map(|f| f.name).collect();
        assert_eq!(
            positionals,
            vec![
                "name",
                "long_identifier",
                "type",
                "address",
                "deposit",
                "max_diff",
                "conversion",
                "lower_limit",
                "upper_limit"
            ]
        );
        let (_, axis_descr) = schema.keyword_field("AXIS_DESCR").unwrap();
        assert_eq!(axis_descr.name, "axis_descr");
        assert_eq!(axis_descr.multiplicity, Multiplicity::List);
        let (_, bit_mask) = schema.keyword_field("BIT_MASK").unwrap();
        assert_eq!(bit_mask.multiplicity, Multiplicity::Optional);

        assert!(lookup_schema("NOT_A_TAG").is_none());
    }

    #[test]
    fn keyword_nodes() {
        let schema = lookup_schema("BYTE_ORDER").unwrap();
        assert!(!schema.is_block);
        assert!(!schema.has_keywords());
        assert!(matches!(schema.fields[0].value_type, ValueType::Enum(e) if e.contains("MSB_LAST")));

        let schema = lookup_schema("AXIS_PTS_Z").unwrap();
        assert_eq!(schema.fields.len(), 4);
    }

    #[test]
    fn special_nodes() {
        assert_eq!(lookup_schema("A2ML").unwrap().special, Special::A2ml);
        assert_eq!(lookup_schema("IF_DATA").unwrap().special, Special::IfData);
        assert!(lookup_schema("MODULE").unwrap().holds_a2ml());
        assert_eq!(root_schema().tag, "A2L_FILE");
        assert!(!lookup_schema("PROJECT").unwrap().holds_a2ml());
    }

    #[test]
    fn catalog_consistency() {
        // every referenced tag resolves, and every group has at least one member
        for schema in all_schemas() {
            for field in schema.fields {
                match field.value_type {
                    ValueType::Node(tag) => assert!(lookup_schema(tag).is_some(), "{tag}"),
                    ValueType::Group(members) => assert!(!members.is_empty()),
                    _ => {}
                }
            }
            assert_eq!(lookup_schema(schema.tag), Some(schema));
        }
        assert!(all_schemas().count() > 150);
    }
}
