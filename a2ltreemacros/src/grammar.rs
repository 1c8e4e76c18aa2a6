use proc_macro2::{Delimiter, TokenStream, TokenTree};
use quote::{format_ident, quote};
use std::collections::HashSet;

use super::util::*;

#[derive(Debug)]
struct Block {
    names: Vec<String>,
    is_keyword: bool,
    special: Special,
    items: Vec<BlockItem>,
    references: Vec<BlockRef>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Special {
    None,
    A2ml,
    IfData,
}

#[derive(Debug, Clone)]
enum BlockItemData {
    Single(String),
    Group(Vec<(String, String)>),
}

#[derive(Debug, Clone)]
struct BlockItem {
    datatype: BlockItemData,
    name: String,
    arraydim: usize,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Multiplicity {
    One,
    Optional,
    List,
}

#[derive(Debug, Clone)]
struct BlockRef {
    tag: String,
    multiplicity: Multiplicity,
}

#[derive(Debug)]
struct Enum {
    name: String,
    items: Vec<String>,
}

#[derive(Debug)]
struct Grammar {
    blocks: Vec<Block>,
    enums: Vec<Enum>,
}

const BUILTIN_TYPES: [&str; 10] = [
    "ident", "string", "float", "double", "int", "uint", "long", "ulong", "int64", "uint64",
];

//----------------------------------------------------------------------------------------------------

pub(crate) fn a2l_grammar(tokens: TokenStream) -> TokenStream {
    let mut iter: TokenStreamIter = tokens.into_iter().peekable();
    let grammar = parse_grammar(&mut iter);

    consistency_check(&grammar);

    generate_tables(&grammar)
}

//----------------------------------------------------------------------------------------------------

fn parse_grammar(token_iter: &mut TokenStreamIter) -> Grammar {
    let mut grammar = Grammar {
        blocks: Vec::new(),
        enums: Vec::new(),
    };

    loop {
        // doc comments in front of the definitions are accepted and dropped
        let _ = parse_attributes(token_iter);
        if token_iter.peek().is_none() {
            break;
        }
        let ident = get_ident(token_iter);
        match &*ident {
            "block" => grammar.blocks.push(parse_block(token_iter, false)),
            "keyword" => grammar.blocks.push(parse_block(token_iter, true)),
            "enum" => grammar.enums.push(parse_enum(token_iter)),
            _ => panic!("expected one of block, keyword or enum in this position, got {ident}"),
        }
    }

    grammar
}

fn parse_block(token_iter: &mut TokenStreamIter, is_keyword: bool) -> Block {
    let mut items = Vec::new();
    let mut references = Vec::new();
    let mut special = Special::None;

    let names = parse_blockname(token_iter);

    let block_tokens = get_group(token_iter, Delimiter::Brace);
    let mut block_token_iter = block_tokens.into_iter().peekable();

    while let Some(nexttok) = block_token_iter.peek() {
        match nexttok {
            TokenTree::Ident(_) => {
                // a single item (uint foo) or an array (long[5] foo)
                items.push(parse_blockitem_single(&mut block_token_iter));
            }
            TokenTree::Group(grp) if grp.delimiter() == Delimiter::Brace => {
                // a group of repeated items ({float a float b}* foo)
                items.push(parse_blockitem_group(&mut block_token_iter));
            }
            TokenTree::Group(grp) if grp.delimiter() == Delimiter::Bracket => {
                // a reference to another block ([-> BLOCK_NAME])
                references.append(&mut parse_reference(&mut block_token_iter));
            }
            TokenTree::Punct(_) => {
                // #[A2ML] marks the block that contains the A2ML text, #[IF_DATA] marks the IF_DATA block
                for attr in parse_attributes(&mut block_token_iter) {
                    match &*attr {
                        "A2ML" => special = Special::A2ml,
                        "IF_DATA" => special = Special::IfData,
                        _ => panic!("unknown attribute {attr} inside block {}", names[0]),
                    }
                }
            }
            _ => panic!(
                "{:#?} is not allowed in this position while parsing the definition of {}",
                nexttok.to_string(),
                names[0]
            ),
        }
    }

    Block {
        names,
        is_keyword,
        special,
        items,
        references,
    }
}

// one definition can be used for several tags, e.g. AXIS_PTS_X / _Y / _Z / _4 / _5
// the suffix replaces the same number of characters at the end of the first name
fn parse_blockname(token_iter: &mut TokenStreamIter) -> Vec<String> {
    let first = get_ident(token_iter);
    let mut names = vec![first.clone()];

    while let Some(TokenTree::Punct(p)) = token_iter.peek() {
        if p.as_char() != '/' {
            break;
        }
        require_punct(token_iter, '/');
        let suffix = get_ident(token_iter);
        assert!(
            suffix.len() < first.len(),
            "suffix {suffix} is longer than the name {first}"
        );
        let prefix = &first[..first.len() - suffix.len()];
        names.push(format!("{prefix}{suffix}"));
    }

    names
}

fn parse_blockitem_single(block_token_iter: &mut TokenStreamIter) -> BlockItem {
    let datatype = get_ident(block_token_iter);
    let mut arraydim = 1;

    if let Some(TokenTree::Group(g)) = block_token_iter.peek() {
        if g.delimiter() == Delimiter::Bracket {
            let arrspec_tokens = get_group(block_token_iter, Delimiter::Bracket);
            arraydim = get_integer(&mut arrspec_tokens.into_iter().peekable());
        }
    }

    BlockItem {
        datatype: BlockItemData::Single(datatype),
        name: get_ident(block_token_iter),
        arraydim,
    }
}

fn parse_blockitem_group(block_token_iter: &mut TokenStreamIter) -> BlockItem {
    let grp_tokens = get_group(block_token_iter, Delimiter::Brace);
    let mut grp_token_iter = grp_tokens.into_iter().peekable();
    require_punct(block_token_iter, '*');
    let name = get_ident(block_token_iter);

    let mut groupitems = Vec::new();
    while grp_token_iter.peek().is_some() {
        let itemtype = get_ident(&mut grp_token_iter);
        let itemname = get_ident(&mut grp_token_iter);
        groupitems.push((itemtype, itemname));
        // commas between the group members are optional
        if let Some(TokenTree::Punct(_)) = grp_token_iter.peek() {
            require_punct(&mut grp_token_iter, ',');
        }
    }
    assert!(!groupitems.is_empty(), "group {name} has no members");

    BlockItem {
        datatype: BlockItemData::Group(groupitems),
        name,
        arraydim: 1,
    }
}

fn parse_reference(block_token_iter: &mut TokenStreamIter) -> Vec<BlockRef> {
    let ref_tokens = get_group(block_token_iter, Delimiter::Bracket);
    let mut ref_token_iter = ref_tokens.into_iter().peekable();
    require_punct(&mut ref_token_iter, '-');
    require_punct(&mut ref_token_iter, '>');
    let tags = parse_blockname(&mut ref_token_iter);

    let mut multiplicity = Multiplicity::Optional;
    if let Some(TokenTree::Punct(p)) = block_token_iter.peek() {
        multiplicity = match p.as_char() {
            '!' => Multiplicity::One,
            '*' => Multiplicity::List,
            '#' => Multiplicity::Optional,
            other => panic!("multiplicity constraints must be one of ! or *, got {other}"),
        };
        if multiplicity != Multiplicity::Optional {
            block_token_iter.next();
        }
    }

    tags.into_iter()
        .map(|tag| BlockRef { tag, multiplicity })
        .collect()
}

fn parse_enum(token_iter: &mut TokenStreamIter) -> Enum {
    let name = get_ident(token_iter);
    let mut items = Vec::new();

    let enum_tokens = get_group(token_iter, Delimiter::Brace);
    let mut enum_token_iter = enum_tokens.into_iter().peekable();

    while enum_token_iter.peek().is_some() {
        items.push(get_ident(&mut enum_token_iter));
        // if there are further items in the enum, there must be a ',' as a separator
        if enum_token_iter.peek().is_some() {
            require_punct(&mut enum_token_iter, ',');
        }
    }

    Enum { name, items }
}

//----------------------------------------------------------------------------------------------------

fn consistency_check(grammar: &Grammar) {
    let mut typeset: HashSet<String> = BUILTIN_TYPES.iter().map(|&x| x.to_string()).collect();
    for e in &grammar.enums {
        if !typeset.insert(e.name.clone()) {
            panic!("duplicate enum name {} in the a2l grammar", e.name);
        }
        let mut itemset = HashSet::new();
        for item in &e.items {
            if !itemset.insert(item) {
                panic!("duplicate item {item} in enum {}", e.name);
            }
        }
    }

    let mut tagset = HashSet::<String>::new();
    for b in &grammar.blocks {
        for name in &b.names {
            if !tagset.insert(name.clone()) {
                panic!("duplicate definition of {name} in the a2l grammar");
            }
        }
    }

    for b in &grammar.blocks {
        let blockname = &b.names[0];
        if b.special != Special::None && (!b.items.is_empty() || !b.references.is_empty()) {
            panic!("the special block {blockname} may not contain any other items");
        }

        let mut itemset = HashSet::<String>::new();
        for item in &b.items {
            let types: Vec<&String> = match &item.datatype {
                BlockItemData::Single(datatype) => vec![datatype],
                BlockItemData::Group(grp) => grp.iter().map(|(datatype, _)| datatype).collect(),
            };
            for datatype in types {
                if !typeset.contains(datatype) {
                    panic!(
                        "data item {} in block {blockname} uses the unknown type {datatype}",
                        item.name
                    );
                }
            }
            if !itemset.insert(item.name.clone()) {
                panic!("duplicate data item name {} in block {blockname}", item.name);
            }
        }

        for blockref in &b.references {
            if !tagset.contains(&blockref.tag) {
                panic!(
                    "block {blockname} references {}, which is not defined",
                    blockref.tag
                );
            }
            if !itemset.insert(blockref.tag.to_ascii_lowercase()) {
                panic!(
                    "the reference to {} in block {blockname} collides with another item",
                    blockref.tag
                );
            }
        }
    }
}

//----------------------------------------------------------------------------------------------------

fn generate_tables(grammar: &Grammar) -> TokenStream {
    let mut result = quote! {};

    for e in &grammar.enums {
        let staticname = format_ident!("ENUM_{}", typename_to_ucname(&e.name));
        let name = &e.name;
        let items = &e.items;
        result.extend(quote! {
            pub(crate) static #staticname: crate::grammar::EnumSchema = crate::grammar::EnumSchema {
                name: #name,
                items: &[#(#items),*],
            };
        });
    }

    let mut schemas = Vec::new();
    let mut match_arms = Vec::new();
    let mut index = 0usize;
    for blk in &grammar.blocks {
        for tag in &blk.names {
            let fields_name = format_ident!("FIELDS_{}", tag);
            let mut fields = Vec::new();

            for item in &blk.items {
                let itemname = &item.name;
                let arraydim = item.arraydim;
                let (value_type, multiplicity) = match &item.datatype {
                    BlockItemData::Single(datatype) => {
                        (generate_value_type(datatype), quote! { crate::grammar::Multiplicity::One })
                    }
                    BlockItemData::Group(grp) if grp.len() == 1 => {
                        // a repeated single value is stored as a plain list, e.g. {ident identifier}* identifier
                        (
                            generate_value_type(&grp[0].0),
                            quote! { crate::grammar::Multiplicity::List },
                        )
                    }
                    BlockItemData::Group(grp) => {
                        let group_name = format_ident!("GROUP_{}_{}", tag, itemname.to_ascii_uppercase());
                        let group_len = grp.len();
                        let group_fields: Vec<TokenStream> = grp
                            .iter()
                            .map(|(datatype, name)| {
                                let value_type = generate_value_type(datatype);
                                quote! {
                                    crate::grammar::FieldSchema {
                                        name: #name,
                                        kind: crate::grammar::FieldKind::Positional,
                                        multiplicity: crate::grammar::Multiplicity::One,
                                        value_type: #value_type,
                                        dim: 1,
                                    }
                                }
                            })
                            .collect();
                        result.extend(quote! {
                            static #group_name: [crate::grammar::FieldSchema; #group_len] = [#(#group_fields),*];
                        });
                        (
                            quote! { crate::grammar::ValueType::Group(&#group_name) },
                            quote! { crate::grammar::Multiplicity::List },
                        )
                    }
                };
                fields.push(quote! {
                    crate::grammar::FieldSchema {
                        name: #itemname,
                        kind: crate::grammar::FieldKind::Positional,
                        multiplicity: #multiplicity,
                        value_type: #value_type,
                        dim: #arraydim,
                    }
                });
            }

            for blockref in &blk.references {
                let fieldname = blockref.tag.to_ascii_lowercase();
                let reftag = &blockref.tag;
                let multiplicity = match blockref.multiplicity {
                    Multiplicity::One => quote! { crate::grammar::Multiplicity::One },
                    Multiplicity::Optional => quote! { crate::grammar::Multiplicity::Optional },
                    Multiplicity::List => quote! { crate::grammar::Multiplicity::List },
                };
                fields.push(quote! {
                    crate::grammar::FieldSchema {
                        name: #fieldname,
                        kind: crate::grammar::FieldKind::Keyword,
                        multiplicity: #multiplicity,
                        value_type: crate::grammar::ValueType::Node(#reftag),
                        dim: 1,
                    }
                });
            }

            let fields_len = fields.len();
            result.extend(quote! {
                static #fields_name: [crate::grammar::FieldSchema; #fields_len] = [#(#fields),*];
            });

            let is_block = !blk.is_keyword;
            let special = match blk.special {
                Special::None => quote! { crate::grammar::Special::None },
                Special::A2ml => quote! { crate::grammar::Special::A2ml },
                Special::IfData => quote! { crate::grammar::Special::IfData },
            };
            schemas.push(quote! {
                crate::grammar::NodeSchema {
                    tag: #tag,
                    is_block: #is_block,
                    special: #special,
                    fields: &#fields_name,
                }
            });
            match_arms.push(quote! { #tag => Some(&GRAMMAR[#index]), });
            index += 1;
        }
    }

    let grammar_len = schemas.len();
    result.extend(quote! {
        /// All node schemas of the grammar, in definition order
        pub(crate) static GRAMMAR: [crate::grammar::NodeSchema; #grammar_len] = [#(#schemas),*];

        /// Find the schema of a tag
        pub fn lookup_schema(tag: &str) -> Option<&'static crate::grammar::NodeSchema> {
            match tag {
                #(#match_arms)*
                _ => None,
            }
        }
    });

    result
}

fn generate_value_type(datatype: &str) -> TokenStream {
    match datatype {
        "ident" => quote! { crate::grammar::ValueType::Ident },
        "string" => quote! { crate::grammar::ValueType::String },
        "float" | "double" => quote! { crate::grammar::ValueType::Float },
        "int" | "uint" | "long" | "ulong" | "int64" | "uint64" => {
            quote! { crate::grammar::ValueType::Int }
        }
        enumname => {
            let staticname = format_ident!("ENUM_{}", typename_to_ucname(enumname));
            quote! { crate::grammar::ValueType::Enum(&#staticname) }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_small_grammar() {
        let input: TokenStream = "
            /// the root
            keyword ROOT_NODE { [-> ITEM_X / _Y]* [-> SINGLE]! }
            enum Mode { ON, OFF }
            block ITEM_X / _Y { ident name Mode mode long[3] offsets { float a float b }* pairs }
            keyword SINGLE {}
            block A2ML { #[A2ML] }
        "
        .parse()
        .unwrap();
        let mut iter: TokenStreamIter = input.into_iter().peekable();
        let grammar = parse_grammar(&mut iter);
        consistency_check(&grammar);

        assert_eq!(grammar.enums.len(), 1);
        assert_eq!(grammar.enums[0].items, vec!["ON", "OFF"]);
        assert_eq!(grammar.blocks.len(), 4);
        assert_eq!(grammar.blocks[0].references.len(), 3);
        assert_eq!(grammar.blocks[0].references[1].tag, "ITEM_Y");
        assert_eq!(grammar.blocks[0].references[2].multiplicity, Multiplicity::One);
        assert_eq!(grammar.blocks[1].names, vec!["ITEM_X", "ITEM_Y"]);
        assert_eq!(grammar.blocks[1].items[2].arraydim, 3);
        assert!(matches!(&grammar.blocks[1].items[3].datatype, BlockItemData::Group(g) if g.len() == 2));
        assert_eq!(grammar.blocks[3].special, Special::A2ml);

        let output = generate_tables(&grammar).to_string();
        assert!(output.contains("lookup_schema"));
        assert!(output.contains("ENUM_MODE"));
    }

    #[test]
    #[should_panic]
    fn reference_to_unknown_tag() {
        let input: TokenStream = "block ROOT_NODE { [-> MISSING] }".parse().unwrap();
        let mut iter: TokenStreamIter = input.into_iter().peekable();
        let grammar = parse_grammar(&mut iter);
        consistency_check(&grammar);
    }
}
