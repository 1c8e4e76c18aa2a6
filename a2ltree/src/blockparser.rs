use std::sync::Arc;

use crate::a2ml::parse_a2ml;
use crate::grammar::{self, FieldKind, FieldSchema, Multiplicity, NodeSchema, Special, ValueType};
use crate::ifdata;
use crate::node::{A2mlSource, NodeData, NodeId, ROOT_TAG, Value, child_ids};
use crate::parser::{ParseContext, ParserError, ParserState};
use crate::tokenizer::{A2lToken, A2lTokenType};

// parse_file()
// parse the content of a whole file. The root node has no tag in the file; its keyword
// fields (ASAP2_VERSION, A2ML_VERSION, PROJECT) are read from the top level
pub(crate) fn parse_file(parser: &mut ParserState) -> Result<NodeId, ParserError> {
    let context = ParseContext::root(ROOT_TAG, 1);
    let root = parse_node(parser, grammar::root_schema(), &context, false)?;

    if let Some(token) = parser.peek_token() {
        let text = parser.get_token_text(token);
        return Err(ParserError::AdditionalTokensError {
            filename: parser.filename.to_owned(),
            error_line: token.line,
            text: text.to_owned(),
        });
    }

    Ok(root)
}

// parse_node()
// build one node according to its schema. "/begin TAG" or "TAG" has already been consumed by the caller.
// The node is only added to the arena once all of its fields have been parsed
pub(crate) fn parse_node(
    parser: &mut ParserState,
    schema: &'static NodeSchema,
    context: &ParseContext,
    is_block: bool,
) -> Result<NodeId, ParserError> {
    let fields = match schema.special {
        Special::A2ml => parse_a2ml_fields(parser, context)?,
        Special::IfData => {
            let (tag, content) = ifdata::parse_ifdata(parser, context)?;
            vec![("tag", Value::Ident(tag)), ("content", Value::IfData(content))]
        }
        Special::None => {
            let holds_a2ml = schema.holds_a2ml();
            if holds_a2ml {
                parser.a2ml_scopes.push(None);
            }
            let result = parse_fields(parser, schema, context);
            if holds_a2ml {
                parser.a2ml_scopes.pop();
            }
            result?
        }
    };

    if is_block {
        parser.expect_end_tag(context, schema.tag)?;
    }

    let behavior = parser.overrides.instantiate(schema.tag);
    let id = NodeId(parser.arena.len());
    let child_ids = child_ids(&fields);
    parser.arena.push(NodeData {
        schema,
        fields,
        parent: None,
        line: context.line,
        behavior,
    });
    for child in child_ids {
        parser.arena[child.0].parent = Some(id);
    }

    Ok(id)
}

// the A2ML block contains a single token with the raw text of the declarations.
// The resulting registry belongs to the innermost enclosing node that can hold A2ML
fn parse_a2ml_fields(
    parser: &mut ParserState,
    context: &ParseContext,
) -> Result<Vec<(&'static str, Value)>, ParserError> {
    let (text, first_line) = match parser.peek_token() {
        Some(token @ A2lToken {
            ttype: A2lTokenType::String,
            ..
        }) => {
            parser.get_token(context)?;
            (parser.get_token_text(token).to_string(), token.line)
        }
        _ => (String::new(), context.line),
    };

    let registry = parse_a2ml(&text, first_line)
        .map_err(|a2ml_error| ParserError::a2ml_error(parser, a2ml_error))?;
    let registry = Arc::new(registry);
    if let Some(scope) = parser.a2ml_scopes.last_mut() {
        *scope = Some(registry.clone());
    }

    Ok(vec![("text", Value::A2ml(A2mlSource { text, registry }))])
}

fn parse_fields(
    parser: &mut ParserState,
    schema: &'static NodeSchema,
    context: &ParseContext,
) -> Result<Vec<(&'static str, Value)>, ParserError> {
    let mut fields: Vec<(&'static str, Value)> = Vec::with_capacity(schema.fields.len());

    // positional fields, in the declared order
    for field in schema.positional_fields() {
        let value = if field.multiplicity == Multiplicity::List {
            let mut items = Vec::new();
            while can_start(parser, schema, context, &field.value_type) {
                items.push(parse_scalar(parser, &field.value_type, context)?);
            }
            Value::List(items)
        } else if field.dim > 1 {
            let mut items = Vec::with_capacity(field.dim);
            for _ in 0..field.dim {
                items.push(parse_scalar(parser, &field.value_type, context)?);
            }
            Value::List(items)
        } else {
            parse_scalar(parser, &field.value_type, context)?
        };
        fields.push((field.name, value));
    }

    // keyword fields start out empty
    for field in schema.fields.iter().filter(|f| f.kind == FieldKind::Keyword) {
        let initial = match (field.multiplicity, &field.value_type) {
            (Multiplicity::List, ValueType::Node("IF_DATA")) => Value::NodeMap(Vec::new()),
            (Multiplicity::List, _) => Value::List(Vec::new()),
            _ => Value::None,
        };
        fields.push((field.name, initial));
    }

    if schema.is_block || schema.has_keywords() {
        parse_keywords(parser, schema, context, &mut fields)?;
    }

    // required keyword fields
    for (field, (_, value)) in schema.fields.iter().zip(&fields) {
        if field.kind == FieldKind::Keyword
            && field.multiplicity == Multiplicity::One
            && value.is_none()
        {
            let tag = match field.value_type {
                ValueType::Node(tag) => tag,
                _ => field.name,
            };
            return Err(ParserError::invalid_multiplicity_not_present(
                parser, context, tag,
            ));
        }
    }

    Ok(fields)
}

// parse_keywords()
// the optional part of a node: any number of tagged child nodes in any order
fn parse_keywords(
    parser: &mut ParserState,
    schema: &'static NodeSchema,
    context: &ParseContext,
    fields: &mut [(&'static str, Value)],
) -> Result<(), ParserError> {
    loop {
        let checkpoint = parser.get_tokenpos();
        let Some((token, is_block)) = parser.get_next_tag(context)? else {
            break;
        };
        let tag = parser.get_token_text(token);

        let Some((index, field)) = schema.keyword_field(tag) else {
            if schema.is_block {
                return Err(ParserError::unknown_sub_block(parser, context, tag));
            }
            // the keyword region of a flat production ends at the first foreign tag
            parser.set_tokenpos(checkpoint);
            break;
        };
        let Some(child_schema) = grammar::lookup_schema(tag) else {
            return Err(ParserError::unknown_sub_block(parser, context, tag));
        };
        if child_schema.is_block && !is_block {
            return Err(ParserError::incorrect_block(parser, context, tag));
        }
        if !child_schema.is_block && is_block {
            return Err(ParserError::incorrect_keyword(parser, context, tag));
        }

        let newcontext = ParseContext {
            parent: Some(schema),
            ..context.nested(tag, token)
        };
        let child = parse_node(parser, child_schema, &newcontext, is_block)?;
        store_child(parser, context, field, &mut fields[index].1, child);
    }

    Ok(())
}

fn store_child(
    parser: &mut ParserState,
    context: &ParseContext,
    field: &FieldSchema,
    slot: &mut Value,
    child: NodeId,
) {
    match slot {
        Value::NodeMap(entries) => {
            let iftag = parser.arena[child.0]
                .fields
                .iter()
                .find(|(name, _)| *name == "tag")
                .and_then(|(_, value)| value.as_str())
                .unwrap_or_default()
                .to_string();
            if let Some(entry) = entries.iter_mut().find(|(tag, _)| *tag == iftag) {
                parser.log_warning(ParserError::RepeatedIfData {
                    filename: parser.filename.to_owned(),
                    error_line: parser.arena[child.0].line,
                    tag: iftag,
                    block: context.element.clone(),
                });
                entry.1 = child;
            } else {
                entries.push((iftag, child));
            }
        }
        Value::List(items) => items.push(Value::Node(child)),
        _ => {
            if !slot.is_none() {
                let tag = parser.arena[child.0].schema.tag;
                parser.log_warning(ParserError::RepeatedKeyword {
                    filename: parser.filename.to_owned(),
                    error_line: parser.arena[child.0].line,
                    tag: tag.to_string(),
                    block: context.element.clone(),
                    block_line: context.line,
                });
            }
            debug_assert!(field.multiplicity != Multiplicity::List);
            *slot = Value::Node(child);
        }
    }
}

// can_start()
// check if the next token can be the first token of a value of the given type. Used to find the end of repeated positional values.
// An identifier list ends at a keyword of the node itself; in a flat node it also ends at a keyword of the enclosing node
fn can_start(
    parser: &ParserState,
    schema: &NodeSchema,
    context: &ParseContext,
    value_type: &ValueType,
) -> bool {
    let Some(token) = parser.peek_token() else {
        return false;
    };
    match value_type {
        ValueType::Int => token.ttype == A2lTokenType::Int,
        ValueType::Float => matches!(token.ttype, A2lTokenType::Int | A2lTokenType::Float),
        ValueType::String => token.ttype == A2lTokenType::String,
        ValueType::Ident => {
            token.ttype == A2lTokenType::Identifier && {
                let text = parser.get_token_text(token);
                schema.keyword_field(text).is_none()
                    && (schema.is_block
                        || context
                            .parent
                            .is_none_or(|parent| parent.keyword_field(text).is_none()))
            }
        }
        ValueType::Enum(enumschema) => {
            token.ttype == A2lTokenType::Identifier
                && enumschema.contains(parser.get_token_text(token))
        }
        ValueType::Group(members) => members
            .first()
            .is_some_and(|member| can_start(parser, schema, context, &member.value_type)),
        ValueType::Node(_) => false,
    }
}

// parse_scalar()
// parse a single value of a positional field
fn parse_scalar(
    parser: &mut ParserState,
    value_type: &ValueType,
    context: &ParseContext,
) -> Result<Value, ParserError> {
    let value = match value_type {
        ValueType::Int => Value::Int(parser.get_integer(context)?),
        ValueType::Float => Value::Float(parser.get_float(context)?),
        ValueType::String => Value::String(parser.get_string(context)?),
        ValueType::Ident => Value::Ident(parser.get_identifier(context)?),
        ValueType::Enum(enumschema) => {
            let token = parser.expect_token(context, A2lTokenType::Identifier)?;
            let text = parser.get_token_text(token);
            match enumschema.items.iter().find(|item| **item == text) {
                Some(item) => Value::Enum(item),
                None => return Err(ParserError::invalid_enum_value(parser, context, text)),
            }
        }
        ValueType::Group(members) => {
            let mut record = Vec::with_capacity(members.len());
            for member in *members {
                record.push((member.name, parse_scalar(parser, &member.value_type, context)?));
            }
            Value::Record(record)
        }
        ValueType::Node(tag) => {
            // node references are always keyword fields
            return Err(ParserError::unknown_sub_block(parser, context, tag));
        }
    };
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::A2lError;
    use crate::behavior::NodeOverrides;
    use crate::node::{A2lTree, IntValue};
    use crate::tokenizer;

    // parse a single node of the given type; the text starts after "/begin TAG" or "TAG"
    fn parse_single(tag: &str, text: &str) -> Result<(A2lTree, Vec<A2lError>), ParserError> {
        let schema = grammar::lookup_schema(tag).unwrap();
        let tokenresult = tokenizer::tokenize("test_input".to_string(), text).unwrap();
        let mut log_msgs = Vec::new();
        let overrides = NodeOverrides::default();
        let mut parser = ParserState::new(&tokenresult, &mut log_msgs, &overrides);
        let context = ParseContext::root(tag, 1);
        let root = parse_node(&mut parser, schema, &context, schema.is_block)?;
        let nodes = std::mem::take(&mut parser.arena);
        Ok((A2lTree::from_arena(nodes, root), log_msgs))
    }

    #[test]
    fn characteristic_limits() {
        let (tree, log_msgs) = parse_single(
            "CHARACTERISTIC",
            r#"c "description" VALUE 0x1000 RL_VALUE 0 CM_IDENT -4.5 12.0
                EXTENDED_LIMITS -10 20
                DISPLAY_IDENTIFIER disp
            /end CHARACTERISTIC"#,
        )
        .unwrap();
        assert!(log_msgs.is_empty());
        let node = tree.root();
        assert_eq!(node.tag(), "CHARACTERISTIC");
        assert_eq!(node.field("name").unwrap().as_str(), Some("c"));
        assert_eq!(node.field("type").unwrap().as_str(), Some("VALUE"));
        assert!(matches!(
            node.field("address"),
            Some(Value::Int(IntValue {
                value: 0x1000,
                is_hex: true,
                ..
            }))
        ));
        assert!(matches!(node.field("lower_limit"), Some(Value::Float(v)) if *v == -4.5));
        assert!(matches!(node.field("upper_limit"), Some(Value::Float(v)) if *v == 12.0));
        let extended_limits = node.child("extended_limits").unwrap();
        assert_eq!(extended_limits.field("lower_limit").unwrap().as_float(), Some(-10.0));
        assert_eq!(extended_limits.parent(), Some(node));
        assert!(node.field("bit_mask").unwrap().is_none());
        assert_eq!(node.children().len(), 2);
    }

    #[test]
    fn repeated_keyword() {
        let (tree, log_msgs) = parse_single(
            "MOD_COMMON",
            r#""" BYTE_ORDER MSB_LAST BYTE_ORDER MSB_FIRST /end MOD_COMMON"#,
        )
        .unwrap();
        let byte_order = tree.root().child("byte_order").unwrap();
        assert_eq!(byte_order.field("byte_order").unwrap().as_str(), Some("MSB_FIRST"));
        assert_eq!(log_msgs.len(), 1);
        assert!(matches!(
            &log_msgs[0],
            A2lError::ParserError {
                parser_error: ParserError::RepeatedKeyword { tag, .. }
            } if tag == "BYTE_ORDER"
        ));
    }

    #[test]
    fn list_order() {
        let (tree, _) = parse_single(
            "CHARACTERISTIC",
            r#"c "" VALUE 0 RL 0 CM 0 1
                /begin ANNOTATION ANNOTATION_LABEL "first" /end ANNOTATION
                /begin ANNOTATION ANNOTATION_LABEL "second" /end ANNOTATION
                /begin ANNOTATION
                    ANNOTATION_LABEL "third"
                    /begin ANNOTATION_TEXT "line 1" "line 2" /end ANNOTATION_TEXT
                /end ANNOTATION
            /end CHARACTERISTIC"#,
        )
        .unwrap();
        let annotations = tree.root().child_list("annotation");
        let labels: Vec<&str> = annotations
            .iter()
            .map(|annotation| {
                let label = annotation.child("annotation_label").unwrap();
                label.field("label").unwrap().as_str().unwrap()
            })
            .collect();
        assert_eq!(labels, vec!["first", "second", "third"]);
        let text = annotations[2].child("annotation_text").unwrap();
        let lines: Vec<&str> = text
            .field("text")
            .unwrap()
            .as_list()
            .unwrap()
            .iter()
            .filter_map(Value::as_str)
            .collect();
        assert_eq!(lines, vec!["line 1", "line 2"]);
    }

    #[test]
    fn repeated_groups_and_arrays() {
        let (tree, _) = parse_single(
            "COMPU_TAB",
            r#"tab "" TAB_INTP 2 1 0.5 2 1.5 DEFAULT_VALUE "x" /end COMPU_TAB"#,
        )
        .unwrap();
        let node = tree.root();
        let pairs = node.field("in_val_out_val").unwrap().as_list().unwrap();
        assert_eq!(pairs.len(), 2);
        let record = pairs[1].as_record().unwrap();
        assert_eq!(record[0].0, "in_val");
        assert_eq!(record[1].1.as_float(), Some(1.5));
        assert!(node.child("default_value").is_some());

        let (tree, _) = parse_single(
            "MEMORY_SEGMENT",
            r#"seg "" DATA FLASH INTERN 0x8000 0x100 -1 -1 -1 -1 -1 /end MEMORY_SEGMENT"#,
        )
        .unwrap();
        let offset = tree.root().field("offset").unwrap().as_list().unwrap();
        assert_eq!(offset.len(), 5);
        assert_eq!(offset[4].as_int(), Some(-1));

        // a list in a flat keyword ends at the next tag
        let (tree, _) = parse_single(
            "CHARACTERISTIC",
            r#"c "" VAL_BLK 0 RL 0 CM 0 1 MATRIX_DIM 2 3 4 NUMBER 24 /end CHARACTERISTIC"#,
        )
        .unwrap();
        let matrix_dim = tree.root().child("matrix_dim").unwrap();
        let dims: Vec<i64> = matrix_dim
            .field("dim")
            .unwrap()
            .as_list()
            .unwrap()
            .iter()
            .filter_map(Value::as_int)
            .collect();
        assert_eq!(dims, vec![2, 3, 4]);
        assert!(tree.root().child("number").is_some());
    }

    #[test]
    fn ident_lists() {
        let (tree, _) = parse_single("FUNCTION_LIST", "f1 f2 f3 /end FUNCTION_LIST").unwrap();
        assert_eq!(tree.root().field("name").unwrap().as_list().unwrap().len(), 3);

        let (tree, _) = parse_single("FUNCTION_LIST", "/end FUNCTION_LIST").unwrap();
        assert_eq!(tree.root().field("name").unwrap().as_list().unwrap().len(), 0);
    }

    #[test]
    fn ident_list_with_keyword_names() {
        // measurement names may coincide with a2l keywords that FRAME does not accept
        let (tree, log_msgs) = parse_single(
            "FRAME",
            r#"fr "" 1 2 FRAME_MEASUREMENT m1 NUMBER UNIT m3 /end FRAME"#,
        )
        .unwrap();
        assert!(log_msgs.is_empty());
        let frame_measurement = tree.root().child("frame_measurement").unwrap();
        let names: Vec<&str> = frame_measurement
            .field("identifier")
            .and_then(Value::as_list)
            .unwrap()
            .iter()
            .filter_map(Value::as_str)
            .collect();
        assert_eq!(names, vec!["m1", "NUMBER", "UNIT", "m3"]);

        // a keyword of the enclosing block still ends the list
        let (tree, _) = parse_single(
            "FRAME",
            r#"fr "" 1 2 FRAME_MEASUREMENT m1 FRAME_MEASUREMENT m2 /end FRAME"#,
        )
        .unwrap();
        let frame_measurement = tree.root().child("frame_measurement").unwrap();
        assert_eq!(
            frame_measurement.field("identifier").and_then(Value::as_list).map(<[Value]>::len),
            Some(1)
        );
    }

    #[test]
    fn syntax_errors() {
        // keyword before the last positional value
        let result = parse_single(
            "MEASUREMENT",
            r#"m "" UBYTE NO_COMPU_METHOD 1 0 0 BYTE_ORDER MSB_LAST 255 /end MEASUREMENT"#,
        );
        assert!(matches!(
            result,
            Err(ParserError::UnexpectedTokenType {
                expected_ttype: A2lTokenType::Float,
                ..
            })
        ));

        let result = parse_single(
            "MEASUREMENT",
            r#"m "" UBYTE NO_COMPU_METHOD 1 0 0 255 NOT_A_KEYWORD /end MEASUREMENT"#,
        );
        assert!(matches!(result, Err(ParserError::UnknownSubBlock { tag, .. }) if tag == "NOT_A_KEYWORD"));

        let result = parse_single("FUNCTION_LIST", "f1 /end GROUP");
        assert!(matches!(result, Err(ParserError::IncorrectEndTag { tag, .. }) if tag == "GROUP"));

        let result = parse_single(
            "MOD_COMMON",
            r#""" /begin BYTE_ORDER MSB_LAST /end BYTE_ORDER /end MOD_COMMON"#,
        );
        assert!(matches!(result, Err(ParserError::IncorrectKeywordError { .. })));

        let result = parse_single(
            "CHARACTERISTIC",
            r#"c "" VALUE 0 RL 0 CM 0 1 ANNOTATION /end CHARACTERISTIC"#,
        );
        assert!(matches!(result, Err(ParserError::IncorrectBlockError { .. })));

        let result = parse_single("MOD_COMMON", r#""" BYTE_ORDER MSB_LAST"#);
        assert!(matches!(result, Err(ParserError::UnexpectedEOF { .. })));

        let result = parse_single("BYTE_ORDER", "LITTLE_END");
        assert!(matches!(result, Err(ParserError::InvalidEnumValue { enumtxt, .. }) if enumtxt == "LITTLE_END"));
    }

    #[test]
    fn file_root() {
        let text = r#"ASAP2_VERSION 1 71
            /begin PROJECT p "" /end PROJECT"#;
        let tokenresult = tokenizer::tokenize("test_input".to_string(), text).unwrap();
        let mut log_msgs = Vec::new();
        let overrides = NodeOverrides::default();
        let mut parser = ParserState::new(&tokenresult, &mut log_msgs, &overrides);
        let root = parse_file(&mut parser).unwrap();
        let tree = A2lTree {
            nodes: std::mem::take(&mut parser.arena),
            root,
        };
        assert_eq!(tree.root().tag(), ROOT_TAG);
        assert!(tree.root().child("project").is_some());
        assert!(tree.root().child("a2ml_version").is_none());

        // PROJECT is required
        let tokenresult = tokenizer::tokenize("test_input".to_string(), "ASAP2_VERSION 1 71").unwrap();
        let mut parser = ParserState::new(&tokenresult, &mut log_msgs, &overrides);
        assert!(matches!(
            parse_file(&mut parser),
            Err(ParserError::InvalidMultiplicityNotPresent { tag, .. }) if tag == "PROJECT"
        ));

        let tokenresult = tokenizer::tokenize(
            "test_input".to_string(),
            r#"/begin PROJECT p "" /end PROJECT 1 2 3"#,
        )
        .unwrap();
        let mut parser = ParserState::new(&tokenresult, &mut log_msgs, &overrides);
        assert!(matches!(
            parse_file(&mut parser),
            Err(ParserError::AdditionalTokensError { text, .. }) if text == "1"
        ));
    }

    #[test]
    fn a2ml_scope() {
        let text = r#"/begin PROJECT p ""
            /begin MODULE m ""
                /begin A2ML
                    block "IF_DATA" taggedunion { "XCP" struct { uint; }; };
                /end A2ML
                /begin IF_DATA XCP 42 /end IF_DATA
            /end MODULE
            /begin MODULE m2 ""
                /begin IF_DATA XCP 42 /end IF_DATA
            /end MODULE
        /end PROJECT"#;
        let tokenresult = tokenizer::tokenize("test_input".to_string(), text).unwrap();
        let mut log_msgs = Vec::new();
        let overrides = NodeOverrides::default();
        let mut parser = ParserState::new(&tokenresult, &mut log_msgs, &overrides);
        let root = parse_file(&mut parser).unwrap();
        assert!(parser.a2ml_scopes.is_empty());
        let tree = A2lTree {
            nodes: std::mem::take(&mut parser.arena),
            root,
        };
        let project = tree.root().child("project").unwrap();
        let modules = project.child_list("module");
        let decoded = modules[0].if_data("XCP").unwrap();
        assert!(matches!(
            decoded.field("content"),
            Some(Value::IfData(ifdata::IfDataContent::Decoded { .. }))
        ));
        // the A2ML of the first module does not apply to the second one
        let raw = modules[1].if_data("XCP").unwrap();
        assert!(matches!(
            raw.field("content"),
            Some(Value::IfData(ifdata::IfDataContent::Raw(_)))
        ));
        assert_eq!(log_msgs.len(), 1);
        assert!(matches!(&log_msgs[0], A2lError::UnknownExtension { tag, .. } if tag == "XCP"));
    }

    #[test]
    fn repeated_if_data() {
        let (tree, log_msgs) = parse_single(
            "MEMORY_SEGMENT",
            r#"seg "" DATA FLASH INTERN 0 0 -1 -1 -1 -1 -1
                /begin IF_DATA ABC 1 /end IF_DATA
                /begin IF_DATA DEF 2 /end IF_DATA
                /begin IF_DATA ABC 3 /end IF_DATA
            /end MEMORY_SEGMENT"#,
        )
        .unwrap();
        let Some(Value::NodeMap(entries)) = tree.root().field("if_data") else {
            panic!("if_data is not a map");
        };
        assert_eq!(entries.len(), 2);
        let abc = tree.root().if_data("ABC").unwrap();
        assert_eq!(abc.parent(), Some(tree.root()));
        assert!(matches!(
            abc.field("content"),
            Some(Value::IfData(ifdata::IfDataContent::Raw(tokens))) if tokens == &vec!["3".to_string()]
        ));
        // the replaced IF_DATA ABC is not part of the tree
        assert_eq!(tree.len(), 3);
        assert!(tree
            .nodes()
            .filter(|node| node.id() != tree.root().id())
            .all(|node| node.parent().is_some()));
        // three unknown extensions and one repeated tag
        assert_eq!(log_msgs.len(), 4);
        assert!(log_msgs.iter().any(|msg| matches!(
            msg,
            A2lError::ParserError {
                parser_error: ParserError::RepeatedIfData { .. }
            }
        )));
    }
}
