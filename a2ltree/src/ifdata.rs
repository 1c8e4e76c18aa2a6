use serde_json::{Map, Value as JsonValue};
use std::sync::Arc;

use crate::A2lError;
use crate::a2ml::{A2mlError, A2mlRegistry, A2mlTagged, A2mlType};
use crate::node::IntValue;
use crate::parser::{ParseContext, ParserError, ParserState};
use crate::tokenizer::{A2lToken, A2lTokenType};
use crate::writer::Writer;

/// Data of an `IF_DATA` block, decoded according to an A2ML declaration
#[derive(Debug, Clone, PartialEq)]
pub enum A2mlValue {
    None,
    Int(IntValue),
    Float(f64),
    String(String),
    EnumItem { name: String, value: i64 },
    Struct(Vec<(Option<String>, A2mlValue)>),
    Array(Vec<A2mlValue>),
    Sequence(Vec<A2mlValue>),
    TaggedStruct(Vec<A2mlTaggedValue>),
    TaggedUnion(Box<A2mlTaggedValue>),
}

/// One item of a taggedstruct or taggedunion
#[derive(Debug, Clone, PartialEq)]
pub struct A2mlTaggedValue {
    pub tag: String,
    pub value: A2mlValue,
    pub is_block: bool,
}

/// The content of an `IF_DATA` block
#[derive(Debug, Clone, PartialEq)]
pub enum IfDataContent {
    /// no matching declaration was found; the token texts are kept so that they can be written again
    Raw(Vec<String>),
    /// `wrapped` is set if the content was enclosed in `/begin TAG ... /end TAG`
    Decoded { value: A2mlValue, wrapped: bool },
}

// what kind of declaration describes the data of an IF_DATA block
enum IfDataDecl {
    // a member of block "IF_DATA" or a named type; decoding errors are fatal
    Exact(Arc<A2mlRegistry>),
    // the untagged declaration of block "IF_DATA"; if decoding fails, the content is kept unparsed
    Fallback(Arc<A2mlRegistry>),
}

// parse_ifdata()
// entry point for ifdata parsing. "/begin IF_DATA" has already been consumed, and the caller handles "/end IF_DATA"
// The declaration of the data is searched in
// 1) the built-in A2ML specification
// 2) the A2ML block of the enclosing MODULE
// If neither knows the tag, the content is kept as a list of tokens
pub(crate) fn parse_ifdata(
    parser: &mut ParserState,
    context: &ParseContext,
) -> Result<(String, IfDataContent), ParserError> {
    let tag_token = parser.expect_token(context, A2lTokenType::Identifier)?;
    let tag = parser.get_token_text(tag_token);
    let newcontext = context.nested(tag, tag_token);

    let content = match find_declaration(parser, tag) {
        Some(IfDataDecl::Exact(registry)) => {
            let typ = registry
                .ifdata_member(tag)
                .map(|member| &member.item)
                .or_else(|| registry.find_named(tag));
            match typ {
                Some(typ) => decode_content(parser, &newcontext, &registry, typ, tag)?,
                None => parse_raw_content(parser, &newcontext)?,
            }
        }
        Some(IfDataDecl::Fallback(registry)) => {
            let checkpoint = parser.get_tokenpos();
            let typ = registry.fallback().unwrap_or(&A2mlType::None);
            match decode_content(parser, &newcontext, &registry, typ, tag) {
                Ok(content) if next_is_end(parser) => content,
                result => {
                    let reason = match result {
                        Err(error) => error.to_string(),
                        Ok(_) => "unexpected additional data".to_string(),
                    };
                    parser.set_tokenpos(checkpoint);
                    parser.log_warning(ParserError::IfDataMismatch {
                        filename: parser.filename.to_owned(),
                        error_line: newcontext.line,
                        tag: tag.to_string(),
                        reason,
                    });
                    parse_raw_content(parser, &newcontext)?
                }
            }
        }
        None => {
            parser.log_msgs.push(A2lError::UnknownExtension {
                filename: parser.filename.to_owned(),
                line: newcontext.line,
                tag: tag.to_string(),
            });
            parse_raw_content(parser, &newcontext)?
        }
    };

    Ok((tag.to_string(), content))
}

// find_declaration()
// the tag of the IF_DATA block selects a member of block "IF_DATA", or a named type.
// The untagged declaration of block "IF_DATA" is only used if no registry knows the tag
fn find_declaration(parser: &ParserState, tag: &str) -> Option<IfDataDecl> {
    let registries: Vec<Arc<A2mlRegistry>> = parser
        .builtin_a2ml
        .iter()
        .cloned()
        .chain(parser.current_a2ml())
        .collect();

    registries
        .iter()
        .find(|registry| registry.ifdata_member(tag).is_some() || registry.find_named(tag).is_some())
        .map(|registry| IfDataDecl::Exact(registry.clone()))
        .or_else(|| {
            registries
                .into_iter()
                .find(|registry| registry.fallback().is_some())
                .map(IfDataDecl::Fallback)
        })
}

// decode_content()
// the content may optionally be wrapped in "/begin TAG ... /end TAG"
fn decode_content(
    parser: &mut ParserState,
    context: &ParseContext,
    registry: &A2mlRegistry,
    typ: &A2mlType,
    tag: &str,
) -> Result<IfDataContent, ParserError> {
    let wrapped = matches!(
        (parser.peek_token(), parser.peek_second_token()),
        (Some(A2lToken { ttype: A2lTokenType::Begin, .. }), Some(second))
            if second.ttype == A2lTokenType::Identifier && parser.get_token_text(second) == tag
    );
    if wrapped {
        parser.get_token(context)?;
        parser.get_token(context)?;
    }
    let value = decode_item(parser, context, registry, typ)?;
    if wrapped {
        parser.expect_end_tag(context, tag)?;
    }
    Ok(IfDataContent::Decoded { value, wrapped })
}

fn next_is_end(parser: &ParserState) -> bool {
    matches!(
        parser.peek_token(),
        Some(A2lToken {
            ttype: A2lTokenType::End,
            ..
        })
    )
}

// decode_item()
// decode one item together with all of its dependent elements according to an A2mlType
fn decode_item(
    parser: &mut ParserState,
    context: &ParseContext,
    registry: &A2mlRegistry,
    typ: &A2mlType,
) -> Result<A2mlValue, ParserError> {
    Ok(match typ {
        A2mlType::None => A2mlValue::None,
        A2mlType::Char => A2mlValue::Int(parser.get_integer_ranged::<i8>(context)?),
        A2mlType::Int => A2mlValue::Int(parser.get_integer_ranged::<i16>(context)?),
        A2mlType::Long => A2mlValue::Int(parser.get_integer_ranged::<i32>(context)?),
        A2mlType::Int64 => A2mlValue::Int(parser.get_integer_ranged::<i64>(context)?),
        A2mlType::UChar => A2mlValue::Int(parser.get_integer_ranged::<u8>(context)?),
        A2mlType::UInt => A2mlValue::Int(parser.get_integer_ranged::<u16>(context)?),
        A2mlType::ULong => A2mlValue::Int(parser.get_integer_ranged::<u32>(context)?),
        A2mlType::UInt64 => A2mlValue::Int(parser.get_integer_ranged::<u64>(context)?),
        A2mlType::Float | A2mlType::Double => A2mlValue::Float(parser.get_float(context)?),
        A2mlType::Array(arraytype, dim) => {
            if **arraytype == A2mlType::Char {
                A2mlValue::String(parser.get_string_maxlen(context, *dim)?)
            } else {
                let mut arrayitems = Vec::with_capacity(*dim);
                for _ in 0..*dim {
                    arrayitems.push(decode_item(parser, context, registry, arraytype)?);
                }
                A2mlValue::Array(arrayitems)
            }
        }
        A2mlType::Enum(enumitems) => {
            let name = parser.get_identifier(context)?;
            match enumitems.iter().find(|item| item.name == name) {
                Some(item) => A2mlValue::EnumItem {
                    name,
                    value: item.value,
                },
                None => return Err(ParserError::invalid_enum_value(parser, context, &name)),
            }
        }
        A2mlType::Struct(members) => {
            let mut structitems = Vec::with_capacity(members.len());
            for member in members {
                let value = decode_item(parser, context, registry, &member.item)?;
                structitems.push((member.name.clone(), value));
            }
            A2mlValue::Struct(structitems)
        }
        A2mlType::Sequence(seqtype) => {
            let mut seqitems = Vec::new();
            let mut checkpoint = parser.get_tokenpos();
            while let Ok(item) = decode_item(parser, context, registry, seqtype) {
                if parser.get_tokenpos() == checkpoint {
                    // an item that does not consume any tokens would repeat forever
                    break;
                }
                seqitems.push(item);
                checkpoint = parser.get_tokenpos();
            }
            parser.set_tokenpos(checkpoint);
            A2mlValue::Sequence(seqitems)
        }
        A2mlType::TaggedStruct(members) => {
            A2mlValue::TaggedStruct(decode_taggedstruct(parser, context, registry, members)?)
        }
        A2mlType::TaggedUnion(members) => {
            A2mlValue::TaggedUnion(Box::new(decode_taggedunion(parser, context, registry, members)?))
        }
        A2mlType::Ref(kind, name) => match registry.resolve(*kind, name) {
            Some(reftype) => decode_item(parser, context, registry, reftype)?,
            None => {
                let a2ml_error = A2mlError::UndefinedType {
                    kind: *kind,
                    name: name.clone(),
                    line: parser.last_token_position,
                };
                return Err(ParserError::a2ml_error(parser, a2ml_error));
            }
        },
    })
}

// decode_taggedstruct()
// decode all the tagged items of a TaggedStruct. The loop ends at the first tag that is not a member
fn decode_taggedstruct(
    parser: &mut ParserState,
    context: &ParseContext,
    registry: &A2mlRegistry,
    members: &[A2mlTagged],
) -> Result<Vec<A2mlTaggedValue>, ParserError> {
    let mut result: Vec<A2mlTaggedValue> = Vec::new();
    loop {
        let checkpoint = parser.get_tokenpos();
        let Ok(Some((token, is_block))) = parser.get_next_tag(context) else {
            parser.set_tokenpos(checkpoint);
            break;
        };
        let tag = parser.get_token_text(token);

        // check if the tag is valid inside this TaggedStruct. If it is not, decoding stops so that the caller sees the tag
        let Some(member) = members
            .iter()
            .find(|member| member.tag == tag && member.is_block == is_block)
        else {
            parser.set_tokenpos(checkpoint);
            break;
        };

        if !member.repeat && result.iter().any(|item| item.tag == tag) {
            parser.log_warning(ParserError::RepeatedTaggedItem {
                filename: parser.filename.to_owned(),
                error_line: token.line,
                tag: tag.to_string(),
                block: context.element.clone(),
            });
        }
        result.push(decode_tagged_item(parser, context, registry, member, token)?);
    }

    Ok(result)
}

// decode_taggedunion()
// exactly one tagged item must follow, and it must be one of the members
fn decode_taggedunion(
    parser: &mut ParserState,
    context: &ParseContext,
    registry: &A2mlRegistry,
    members: &[A2mlTagged],
) -> Result<A2mlTaggedValue, ParserError> {
    let checkpoint = parser.get_tokenpos();
    let Ok(Some((token, is_block))) = parser.get_next_tag(context) else {
        parser.set_tokenpos(checkpoint);
        let found = parser
            .peek_token()
            .map_or_else(|| "end of input".to_string(), |token| parser.get_token_text(token).to_string());
        return Err(ParserError::a2ml_error(
            parser,
            A2mlError::NoMatchingMember { found },
        ));
    };
    let tag = parser.get_token_text(token);
    match members
        .iter()
        .find(|member| member.tag == tag && member.is_block == is_block)
    {
        Some(member) => decode_tagged_item(parser, context, registry, member, token),
        None => Err(ParserError::a2ml_error(
            parser,
            A2mlError::UnionTagMismatch {
                tag: tag.to_string(),
            },
        )),
    }
}

// decode_tagged_item()
// decode the content of a tagged item whose tag has already been consumed
fn decode_tagged_item(
    parser: &mut ParserState,
    context: &ParseContext,
    registry: &A2mlRegistry,
    member: &A2mlTagged,
    token: &A2lToken,
) -> Result<A2mlTaggedValue, ParserError> {
    let newcontext = context.nested(&member.tag, token);
    let value = decode_item(parser, &newcontext, registry, &member.item)?;
    // make sure that blocks that started with /begin end with /end
    if member.is_block {
        parser.expect_end_tag(&newcontext, &member.tag)?;
    }
    Ok(A2mlTaggedValue {
        tag: member.tag.clone(),
        value,
        is_block: member.is_block,
    })
}

// parse_raw_content()
// keep the content of an IF_DATA block whose format is unknown. The /begin and /end tokens
// inside of it have to match, so that the final /end IF_DATA can be found
fn parse_raw_content(
    parser: &mut ParserState,
    context: &ParseContext,
) -> Result<IfDataContent, ParserError> {
    let mut tokens = Vec::new();
    let mut depth = 0usize;
    loop {
        let token = parser.get_token(context)?;
        match token.ttype {
            A2lTokenType::Begin => depth += 1,
            A2lTokenType::End if depth == 0 => {
                // the end of the IF_DATA block, which is handled by the caller
                parser.undo_get_token();
                break;
            }
            A2lTokenType::End => depth -= 1,
            _ => {}
        }
        tokens.push(parser.get_token_text(token).to_string());
    }
    Ok(IfDataContent::Raw(tokens))
}

impl A2mlValue {
    /// Get a named member of a struct
    #[must_use]
    pub fn member(&self, name: &str) -> Option<&A2mlValue> {
        match self {
            A2mlValue::Struct(items) => items
                .iter()
                .find(|(itemname, _)| itemname.as_deref() == Some(name))
                .map(|(_, value)| value),
            _ => None,
        }
    }

    /// Get all items with the given tag from a taggedstruct or taggedunion
    pub fn tagged<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a A2mlValue> {
        let items: &[A2mlTaggedValue] = match self {
            A2mlValue::TaggedStruct(items) => items,
            A2mlValue::TaggedUnion(item) => std::slice::from_ref(&**item),
            _ => &[],
        };
        items
            .iter()
            .filter(move |item| item.tag == tag)
            .map(|item| &item.value)
    }

    #[must_use]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            A2mlValue::Int(intval) => Some(intval.value),
            A2mlValue::EnumItem { value, .. } => Some(*value),
            _ => None,
        }
    }

    pub(crate) fn write(&self, writer: &mut Writer) {
        match self {
            A2mlValue::None => {}
            A2mlValue::Int(intval) => writer.add_integer(*intval),
            A2mlValue::Float(value) => writer.add_float(*value),
            A2mlValue::String(text) => writer.add_quoted_string(text),
            A2mlValue::EnumItem { name, .. } => writer.add_str(name),
            A2mlValue::Struct(items) => {
                for (_, item) in items {
                    item.write(writer);
                }
            }
            A2mlValue::Array(items) | A2mlValue::Sequence(items) => {
                for item in items {
                    item.write(writer);
                }
            }
            A2mlValue::TaggedStruct(items) => {
                for item in items {
                    item.write(writer);
                }
            }
            A2mlValue::TaggedUnion(item) => item.write(writer),
        }
    }

    pub(crate) fn to_json(&self) -> JsonValue {
        match self {
            A2mlValue::None => JsonValue::Null,
            A2mlValue::Int(intval) => intval.to_json(),
            A2mlValue::Float(value) => float_to_json(*value),
            A2mlValue::String(text) => JsonValue::from(text.as_str()),
            A2mlValue::EnumItem { name, .. } => JsonValue::from(name.as_str()),
            A2mlValue::Struct(items) => {
                if !items.is_empty() && items.iter().all(|(name, _)| name.is_some()) {
                    let map: Map<String, JsonValue> = items
                        .iter()
                        .map(|(name, value)| (name.clone().unwrap_or_default(), value.to_json()))
                        .collect();
                    JsonValue::Object(map)
                } else {
                    JsonValue::Array(items.iter().map(|(_, value)| value.to_json()).collect())
                }
            }
            A2mlValue::Array(items) | A2mlValue::Sequence(items) => {
                JsonValue::Array(items.iter().map(A2mlValue::to_json).collect())
            }
            A2mlValue::TaggedStruct(items) => {
                let mut map = Map::new();
                for item in items {
                    let value = item.value.to_json();
                    // a tag that occurs several times is represented by an array of all occurrences
                    if items.iter().filter(|other| other.tag == item.tag).count() > 1 {
                        if let JsonValue::Array(list) = map
                            .entry(item.tag.clone())
                            .or_insert_with(|| JsonValue::Array(Vec::new()))
                        {
                            list.push(value);
                        }
                    } else {
                        map.insert(item.tag.clone(), value);
                    }
                }
                JsonValue::Object(map)
            }
            A2mlValue::TaggedUnion(item) => {
                let mut map = Map::new();
                map.insert(item.tag.clone(), item.value.to_json());
                JsonValue::Object(map)
            }
        }
    }
}

impl A2mlTaggedValue {
    // each tagged item starts on a new line
    fn write(&self, writer: &mut Writer) {
        writer.newline();
        if self.is_block {
            writer.add_str("/begin");
            writer.add_str(&self.tag);
            writer.indent();
            writer.newline();
            self.value.write(writer);
            writer.outdent();
            writer.newline();
            writer.add_str("/end");
            writer.add_str(&self.tag);
            writer.newline();
        } else {
            writer.add_str(&self.tag);
            self.value.write(writer);
        }
    }
}

impl IfDataContent {
    /// The decoded value, if the content could be decoded
    #[must_use]
    pub fn value(&self) -> Option<&A2mlValue> {
        match self {
            IfDataContent::Decoded { value, .. } => Some(value),
            IfDataContent::Raw(_) => None,
        }
    }

    pub(crate) fn write(&self, writer: &mut Writer, tag: &str) {
        match self {
            IfDataContent::Raw(tokens) => {
                for token in tokens {
                    writer.add_str(token);
                }
            }
            IfDataContent::Decoded { value, wrapped } => {
                if *wrapped {
                    writer.add_str("/begin");
                    writer.add_str(tag);
                    writer.indent();
                    writer.newline();
                    value.write(writer);
                    writer.outdent();
                    writer.newline();
                    writer.add_str("/end");
                    writer.add_str(tag);
                } else {
                    value.write(writer);
                }
            }
        }
    }

    pub(crate) fn to_json(&self) -> JsonValue {
        match self {
            IfDataContent::Raw(tokens) => {
                JsonValue::Array(tokens.iter().map(|token| JsonValue::from(token.as_str())).collect())
            }
            IfDataContent::Decoded { value, .. } => value.to_json(),
        }
    }
}

pub(crate) fn float_to_json(value: f64) -> JsonValue {
    serde_json::Number::from_f64(value).map_or(JsonValue::Null, JsonValue::Number)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::a2ml::parse_a2ml;
    use crate::behavior::NodeOverrides;
    use crate::tokenizer;

    struct DecodeResult {
        result: Result<(String, IfDataContent), ParserError>,
        log: Vec<A2lError>,
        at_end: bool,
    }

    fn decode(a2ml: &str, ifdata: &str) -> DecodeResult {
        let registry = Arc::new(parse_a2ml(a2ml, 1).unwrap());
        let tokenresult = tokenizer::tokenize("test".to_string(), ifdata).unwrap();
        let mut log = Vec::new();
        let overrides = NodeOverrides::default();
        let mut parser = ParserState::new(&tokenresult, &mut log, &overrides);
        parser.a2ml_scopes.push(Some(registry));
        let context = ParseContext::root("IF_DATA", 1);
        let result = parse_ifdata(&mut parser, &context);
        let at_end = next_is_end(&parser);
        drop(parser);
        DecodeResult {
            result,
            log,
            at_end,
        }
    }

    fn decoded_value(result: DecodeResult) -> (A2mlValue, bool) {
        assert!(result.at_end);
        match result.result.unwrap().1 {
            IfDataContent::Decoded { value, wrapped } => (value, wrapped),
            IfDataContent::Raw(tokens) => panic!("not decoded: {tokens:?}"),
        }
    }

    #[test]
    fn named_struct() {
        let result = decode(
            "struct Foo { int a; };",
            "Foo /begin Foo 7 /end Foo /end IF_DATA",
        );
        let (value, wrapped) = decoded_value(result);
        assert!(wrapped);
        assert_eq!(value.member("a").and_then(A2mlValue::as_int), Some(7));
    }

    #[test]
    fn taggedstruct() {
        let result = decode(
            r#"block "IF_DATA" taggedunion {
                "XCP" taggedstruct {
                    ("ITEM" uint)*;
                    "ONCE" uint;
                    block "BLK" struct { char[4]; enum { "A", "B" = 3 }; };
                };
            };"#,
            r#"XCP ITEM 1 ITEM 2 ONCE 3 ONCE 4 /begin BLK "abc" B /end BLK /end IF_DATA"#,
        );
        let log_len = result.log.len();
        let (value, wrapped) = decoded_value(result);
        assert!(!wrapped);
        // the repeated ONCE is kept, but a warning is logged
        assert_eq!(log_len, 1);
        // the value of the member selected by the tag XCP
        let A2mlValue::TaggedStruct(items) = &value else {
            panic!("expected a taggedstruct");
        };
        assert_eq!(items.len(), 5);
        let items: Vec<i64> = value.tagged("ITEM").filter_map(A2mlValue::as_int).collect();
        assert_eq!(items, vec![1, 2]);
        let blk = value.tagged("BLK").next().unwrap();
        assert_eq!(
            *blk,
            A2mlValue::Struct(vec![
                (None, A2mlValue::String("abc".to_string())),
                (
                    None,
                    A2mlValue::EnumItem {
                        name: "B".to_string(),
                        value: 3
                    }
                )
            ])
        );
    }

    #[test]
    fn recursive_type() {
        let result = decode(
            r#"taggedstruct Tree { block "NODE" taggedstruct Tree; "LEAF" uint; };
            block "IF_DATA" taggedunion { "T" taggedstruct Tree; };"#,
            "T /begin NODE LEAF 1 /begin NODE LEAF 2 /end NODE /end NODE /end IF_DATA",
        );
        let (value, _) = decoded_value(result);
        let outer = value.tagged("NODE").next().unwrap();
        assert_eq!(outer.tagged("LEAF").next().and_then(A2mlValue::as_int), Some(1));
        let inner = outer.tagged("NODE").next().unwrap();
        assert_eq!(inner.tagged("LEAF").next().and_then(A2mlValue::as_int), Some(2));
    }

    #[test]
    fn arrays_and_sequences() {
        let a2ml = r#"block "IF_DATA" taggedunion { "ARR" struct { uint[3]; double; }; "SEQ" (uint)*; };"#;
        let (value, _) = decoded_value(decode(a2ml, "ARR 1 2 3 4.5 /end IF_DATA"));
        let A2mlValue::Struct(members) = &value else {
            panic!("expected a struct");
        };
        assert!(matches!(&members[0].1, A2mlValue::Array(items) if items.len() == 3));
        assert_eq!(members[1].1, A2mlValue::Float(4.5));

        let (value, _) = decoded_value(decode(a2ml, "SEQ 1 2 0x3 /end IF_DATA"));
        let A2mlValue::Sequence(items) = &value else {
            panic!("expected a sequence");
        };
        assert_eq!(items.len(), 3);
        assert!(matches!(items[2], A2mlValue::Int(IntValue { value: 3, is_hex: true, .. })));

        // too few array elements
        let result = decode(a2ml, "ARR 1 2 /end IF_DATA");
        assert!(result.result.is_err());
    }

    #[test]
    fn union_mismatch() {
        let a2ml = r#"block "IF_DATA" taggedunion { "XCP" taggedunion { "CAN" uint; "ETH" uint; }; };"#;
        let result = decode(a2ml, "XCP USB 1 /end IF_DATA");
        assert!(matches!(
            result.result,
            Err(ParserError::A2mlError {
                a2ml_error: A2mlError::UnionTagMismatch { .. },
                ..
            })
        ));
        let result = decode(a2ml, "XCP 1 /end IF_DATA");
        assert!(matches!(
            result.result,
            Err(ParserError::A2mlError {
                a2ml_error: A2mlError::NoMatchingMember { .. },
                ..
            })
        ));
    }

    #[test]
    fn string_too_long() {
        let result = decode(
            r#"block "IF_DATA" taggedunion { "S" char[2]; };"#,
            r#"S "abc" /end IF_DATA"#,
        );
        assert!(matches!(
            result.result,
            Err(ParserError::StringTooLong { length: 3, .. })
        ));
    }

    #[test]
    fn unknown_tag() {
        let result = decode(
            r#"block "IF_DATA" taggedunion { "XCP" uint; };"#,
            r#"VENDOR /begin X 1 "s" /end X 2.5 /end IF_DATA"#,
        );
        assert!(result.at_end);
        assert_eq!(result.log.len(), 1);
        assert!(matches!(&result.log[0], A2lError::UnknownExtension { tag, .. } if tag == "VENDOR"));
        let (tag, content) = result.result.unwrap();
        assert_eq!(tag, "VENDOR");
        assert_eq!(
            content,
            IfDataContent::Raw(
                ["/begin", "X", "1", "\"s\"", "/end", "X", "2.5"]
                    .iter()
                    .map(|s| s.to_string())
                    .collect()
            )
        );
    }

    #[test]
    fn untagged_declaration() {
        let a2ml = r#"block "IF_DATA" struct { uint; };"#;
        let (value, _) = decoded_value(decode(a2ml, "ANY 5 /end IF_DATA"));
        assert_eq!(value.to_json(), serde_json::json!([5]));

        // data that does not match is kept unparsed
        let result = decode(a2ml, "ANY abc /end IF_DATA");
        assert!(result.at_end);
        assert!(matches!(
            &result.log[0],
            A2lError::ParserError {
                parser_error: ParserError::IfDataMismatch { .. }
            }
        ));
        assert_eq!(
            result.result.unwrap().1,
            IfDataContent::Raw(vec!["abc".to_string()])
        );
    }

    #[test]
    fn large_unsigned_values() {
        let a2ml = r#"block "IF_DATA" taggedunion { "U" struct { uint64; int64; uint64; }; };"#;
        let (value, _) = decoded_value(decode(
            a2ml,
            "U 18446744073709551615 -1 0xFFFFFFFFFFFFFFFF /end IF_DATA",
        ));
        assert_eq!(
            value.to_json(),
            serde_json::json!([18446744073709551615u64, -1, 18446744073709551615u64])
        );

        let content = IfDataContent::Decoded {
            value,
            wrapped: false,
        };
        let mut writer = Writer::new(0);
        content.write(&mut writer, "U");
        let lines: Vec<String> = writer.finish().into_iter().map(|(_, line)| line).collect();
        assert_eq!(lines.join(" "), "18446744073709551615 -1 0xFFFFFFFFFFFFFFFF");

        // int64 has no decimal values above i64::MAX
        let result = decode(
            r#"block "IF_DATA" taggedunion { "I" int64; };"#,
            "I 18446744073709551615 /end IF_DATA",
        );
        assert!(matches!(result.result, Err(ParserError::MalformedNumber { .. })));
    }

    #[test]
    fn write_and_export() {
        let a2ml = r#"struct Rec { uint count; taggedstruct { ("P" uint)*; block "B" ulong; } opts; };
            block "IF_DATA" taggedunion { "REC" struct Rec; };"#;
        let (value, _) = decoded_value(decode(
            a2ml,
            "REC 2 P 1 P 0x10 /begin B 7 /end B /end IF_DATA",
        ));
        assert_eq!(
            value.to_json(),
            serde_json::json!({"count": 2, "opts": {"P": [1, 16], "B": 7}})
        );

        let content = IfDataContent::Decoded {
            value,
            wrapped: false,
        };
        let mut writer = Writer::new(0);
        content.write(&mut writer, "REC");
        let lines: Vec<String> = writer.finish().into_iter().map(|(_, line)| line).collect();
        assert_eq!(
            lines,
            vec!["2", "P 1", "P 0x10", "/begin B", "7", "/end B"]
        );
    }
}
