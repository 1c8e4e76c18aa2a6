//! Parser for the A2ML meta-language
//!
//! An `A2ML` block declares the types that describe the content of `IF_DATA` blocks.
//! The declarations are collected in an [`A2mlRegistry`], which the `IF_DATA` decoder uses later on.

use fnv::FnvHashMap;
use std::fmt::Display;
use thiserror::Error;

// tokenizer types
#[derive(Debug, Clone, PartialEq)]
enum TokenType {
    Semicolon,
    Comma,
    OpenCurlyBracket,
    ClosedCurlyBracket,
    OpenSquareBracket,
    ClosedSquareBracket,
    OpenRoundBracket,
    ClosedRoundBracket,
    Repeat,
    Equals,
    Char,
    Int,
    Long,
    Int64,
    Uchar,
    Uint,
    Ulong,
    Uint64,
    Double,
    Float,
    Block,
    Enum,
    Struct,
    Taggedstruct,
    Taggedunion,
    Constant(i64),
    Identifier(String),
    Tag(String),
}

#[derive(Debug)]
struct A2mlToken {
    ttype: TokenType,
    line: u32,
}

/// The four kinds of named A2ML types. Each kind has its own namespace
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum A2mlKind {
    Struct,
    TaggedStruct,
    TaggedUnion,
    Enum,
}

#[derive(Debug, Clone, PartialEq)]
pub struct A2mlMember {
    /// members may optionally be named, e.g. `uint count;` or `uint;`
    pub name: Option<String>,
    pub item: A2mlType,
}

/// A member of a taggedstruct or taggedunion
#[derive(Debug, Clone, PartialEq)]
pub struct A2mlTagged {
    pub tag: String,
    pub item: A2mlType,
    /// the member is enclosed in `/begin TAG ... /end TAG`
    pub is_block: bool,
    /// the member may occur multiple times: `("TAG" ...)*`
    pub repeat: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct A2mlEnumItem {
    pub name: String,
    pub value: i64,
}

/// Type descriptor of an A2ML type
#[derive(Debug, Clone, PartialEq)]
pub enum A2mlType {
    None,
    Char,
    Int,
    Long,
    Int64,
    UChar,
    UInt,
    ULong,
    UInt64,
    Float,
    Double,
    Struct(Vec<A2mlMember>),
    TaggedStruct(Vec<A2mlTagged>),
    TaggedUnion(Vec<A2mlTagged>),
    Enum(Vec<A2mlEnumItem>),
    Array(Box<A2mlType>, usize),
    Sequence(Box<A2mlType>),
    /// reference to a named type; it is resolved through the registry when data is decoded
    Ref(A2mlKind, String),
}

/// All types declared by one A2ML block
#[derive(Debug, Clone, Default, PartialEq)]
pub struct A2mlRegistry {
    types: FnvHashMap<(A2mlKind, String), A2mlType>,
    // names in the order of their declaration
    declared: Vec<(A2mlKind, String)>,
    // members of the block "IF_DATA" taggedunion / taggedstruct, by tag
    ifdata: FnvHashMap<String, A2mlTagged>,
    // the type of block "IF_DATA" if it is not tagged
    fallback: Option<A2mlType>,
}

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum A2mlError {
    #[error("line {line}: {kind} {name} was referenced but not defined")]
    UndefinedType {
        kind: A2mlKind,
        name: String,
        line: u32,
    },

    #[error("line {line}: expected {expected}, got {found}")]
    UnexpectedToken {
        expected: String,
        found: String,
        line: u32,
    },

    #[error("unexpected end of input, expected {expected}")]
    UnexpectedEnd { expected: String },

    #[error("line {line}: tag \"{tag}\" is used more than once in the same taggedunion")]
    DuplicateTag { tag: String, line: u32 },

    #[error("line {line}: invalid constant \"{text}\"")]
    InvalidConstant { text: String, line: u32 },

    #[error("line {line}: unclosed block comment")]
    UnclosedComment { line: u32 },

    #[error("line {line}: unclosed tag string \"{text}\"")]
    UnclosedTag { text: String, line: u32 },

    #[error("line {line}: unable to tokenize \"{text}\"")]
    InvalidCharacter { text: String, line: u32 },

    #[error("line {line}: /include is not supported")]
    IncludeNotSupported { line: u32 },

    #[error("tag {tag} does not match any member of the taggedunion")]
    UnionTagMismatch { tag: String },

    #[error("expected a tag for a taggedunion, but found {found}")]
    NoMatchingMember { found: String },
}

impl Display for A2mlKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            A2mlKind::Struct => "struct",
            A2mlKind::TaggedStruct => "taggedstruct",
            A2mlKind::TaggedUnion => "taggedunion",
            A2mlKind::Enum => "enum",
        };
        f.write_str(text)
    }
}

// tokenize_a2ml()
// Tokenize the text of the a2ml section. Line numbers continue from first_line, so that they match the a2l file
fn tokenize_a2ml(input: &str, first_line: u32) -> Result<Vec<A2mlToken>, A2mlError> {
    let mut amltokens = Vec::<A2mlToken>::new();
    let input_bytes = input.as_bytes();
    let datalen = input_bytes.len();
    let mut bytepos = 0;
    let mut line = first_line;

    while bytepos < datalen {
        let startpos = bytepos;
        let c = input_bytes[bytepos];

        if c.is_ascii_whitespace() {
            /* skip whitespace */
            while bytepos < datalen && input_bytes[bytepos].is_ascii_whitespace() {
                if input_bytes[bytepos] == b'\n' {
                    line += 1;
                }
                bytepos += 1;
            }
            continue;
        } else if input_bytes[bytepos..].starts_with(b"/*") {
            /* skip a block comment */
            let startline = line;
            bytepos += 2; // just past the initial "/*"
            while bytepos < datalen && !input_bytes[bytepos..].starts_with(b"*/") {
                if input_bytes[bytepos] == b'\n' {
                    line += 1;
                }
                bytepos += 1;
            }
            if bytepos >= datalen {
                return Err(A2mlError::UnclosedComment { line: startline });
            }
            // chomp the closing "*/"
            bytepos += 2;
            continue;
        } else if input_bytes[bytepos..].starts_with(b"//") {
            /* skip a line comment; the '\n' is handled as whitespace */
            while bytepos < datalen && input_bytes[bytepos] != b'\n' {
                bytepos += 1;
            }
            continue;
        } else if input_bytes[bytepos..].starts_with(b"/include") {
            return Err(A2mlError::IncludeNotSupported { line });
        }

        let ttype = match c {
            b'"' => tokenize_tag(input, &mut bytepos, line)?,
            b';' => TokenType::Semicolon,
            b',' => TokenType::Comma,
            b'{' => TokenType::OpenCurlyBracket,
            b'}' => TokenType::ClosedCurlyBracket,
            b'[' => TokenType::OpenSquareBracket,
            b']' => TokenType::ClosedSquareBracket,
            b'(' => TokenType::OpenRoundBracket,
            b')' => TokenType::ClosedRoundBracket,
            b'*' => TokenType::Repeat,
            b'=' => TokenType::Equals,
            _ if c.is_ascii_digit() || c == b'-' => tokenize_number(input, &mut bytepos, line)?,
            _ if c.is_ascii_alphabetic() || c == b'_' => tokenize_keyword_ident(input, &mut bytepos),
            _ => {
                let errtxt = make_errtxt(startpos, input_bytes);
                return Err(A2mlError::InvalidCharacter {
                    text: errtxt,
                    line,
                });
            }
        };
        if bytepos == startpos {
            // single character tokens
            bytepos += 1;
        }
        amltokens.push(A2mlToken { ttype, line });
    }

    Ok(amltokens)
}

fn tokenize_tag(input: &str, bytepos: &mut usize, line: u32) -> Result<TokenType, A2mlError> {
    let input_bytes = input.as_bytes();
    let startpos = *bytepos;

    /* tag - it is enclosed in double quotes, but contains neither spaces nor escape characters */
    match input_bytes[startpos + 1..].iter().position(|&c| c == b'"' || c == b'\n') {
        Some(len) if input_bytes[startpos + 1 + len] == b'"' => {
            let tag = &input[(startpos + 1)..(startpos + 1 + len)];
            *bytepos = startpos + len + 2;
            Ok(TokenType::Tag(tag.to_string()))
        }
        _ => Err(A2mlError::UnclosedTag {
            text: make_errtxt(startpos, input_bytes),
            line,
        }),
    }
}

fn tokenize_number(input: &str, bytepos: &mut usize, line: u32) -> Result<TokenType, A2mlError> {
    let input_bytes = input.as_bytes();
    let datalen = input_bytes.len();
    let startpos = *bytepos;

    *bytepos += 1;
    while *bytepos < datalen {
        let c = input_bytes[*bytepos];
        if !c.is_ascii_alphanumeric() && c != b'_' {
            break;
        }
        *bytepos += 1;
    }
    let num_text = &input[startpos..*bytepos];
    let (negative, digits) = match num_text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, num_text),
    };
    let value = if let Some(hexval) = digits
        .strip_prefix("0x")
        .or_else(|| digits.strip_prefix("0X"))
    {
        // hex constant
        u64::from_str_radix(hexval, 16).ok().map(|v| v as i64)
    } else {
        // not hex format -> must be decimal
        digits.parse::<i64>().ok()
    };
    let value = if negative {
        value.and_then(i64::checked_neg)
    } else {
        value
    };
    match value {
        Some(number) => Ok(TokenType::Constant(number)),
        None => Err(A2mlError::InvalidConstant {
            text: num_text.to_string(),
            line,
        }),
    }
}

fn tokenize_keyword_ident(input: &str, bytepos: &mut usize) -> TokenType {
    let input_bytes = input.as_bytes();
    let datalen = input_bytes.len();
    let startpos = *bytepos;
    while *bytepos < datalen {
        let c = input_bytes[*bytepos];
        if !c.is_ascii_alphanumeric() && c != b'_' {
            break;
        }
        *bytepos += 1;
    }
    let kw_or_ident = &input[startpos..*bytepos];
    match kw_or_ident {
        "char" => TokenType::Char,
        "int" => TokenType::Int,
        "long" => TokenType::Long,
        "int64" => TokenType::Int64,
        "uint" => TokenType::Uint,
        "uchar" => TokenType::Uchar,
        "ulong" => TokenType::Ulong,
        "uint64" => TokenType::Uint64,
        "double" => TokenType::Double,
        "float" => TokenType::Float,
        "block" => TokenType::Block,
        "enum" => TokenType::Enum,
        "struct" => TokenType::Struct,
        "taggedstruct" => TokenType::Taggedstruct,
        "taggedunion" => TokenType::Taggedunion,
        _ => TokenType::Identifier(kw_or_ident.to_string()),
    }
}

fn make_errtxt(pos: usize, input_bytes: &[u8]) -> String {
    let endpos = (pos + 16).min(input_bytes.len());
    // the end might be in the middle of a utf-8 sequence, so from_utf8_lossy is needed
    String::from_utf8_lossy(&input_bytes[pos..endpos]).into_owned()
}

/// Parse the text of an A2ML block
///
/// `first_line` is the line of the a2l file on which the A2ML text starts; it is used in error messages.
pub fn parse_a2ml(input: &str, first_line: u32) -> Result<A2mlRegistry, A2mlError> {
    let tokens = tokenize_a2ml(input, first_line)?;
    let mut parser = A2mlParser {
        tokens: &tokens,
        pos: 0,
        line: first_line,
        registry: A2mlRegistry::default(),
        in_progress: Vec::new(),
    };
    parser.parse_declarations()?;
    Ok(parser.registry)
}

struct A2mlParser<'a> {
    tokens: &'a [A2mlToken],
    pos: usize,
    line: u32,
    registry: A2mlRegistry,
    // named types whose definition is currently being parsed. They may refer to themselves
    in_progress: Vec<(A2mlKind, String)>,
}

impl<'a> A2mlParser<'a> {
    // parse_declarations()
    // at the top level the applicable grammar rule is
    //    declaration = type_definition ";" | block_definition ";"
    fn parse_declarations(&mut self) -> Result<(), A2mlError> {
        while let Some(tok) = self.next_token() {
            match tok {
                TokenType::Block => {
                    let tag = self.require_tag()?;
                    let blk = self.parse_tagged_def()?;
                    if tag == "IF_DATA" {
                        self.register_ifdata(blk);
                    }
                }
                TokenType::Struct
                | TokenType::Taggedstruct
                | TokenType::Taggedunion
                | TokenType::Enum => {
                    // named types are stored in the registry by parse_type
                    self.parse_type(tok)?;
                }

                // the grammar allows any type to be defined at the top level, even basic types.
                // however these do not have names, and storing them would not help in any way
                TokenType::Char
                | TokenType::Int
                | TokenType::Long
                | TokenType::Int64
                | TokenType::Uchar
                | TokenType::Uint
                | TokenType::Ulong
                | TokenType::Uint64
                | TokenType::Double
                | TokenType::Float => {}
                _ => {
                    return Err(self.unexpected("a declaration", tok));
                }
            }
            self.require_token_type(&TokenType::Semicolon)?;
        }
        Ok(())
    }

    // register_ifdata()
    // The integration point between the custom blocks in A2ML and the a2l file is the IF_DATA block.
    // Each member of a tagged IF_DATA type can be selected by the tag that follows "/begin IF_DATA"
    fn register_ifdata(&mut self, blk: A2mlType) {
        let resolved = match &blk {
            A2mlType::Ref(kind, name) => self.registry.resolve(*kind, name).cloned(),
            _ => Some(blk.clone()),
        };
        match resolved {
            Some(A2mlType::TaggedUnion(items) | A2mlType::TaggedStruct(items)) => {
                for item in items {
                    self.registry.ifdata.insert(item.tag.clone(), item);
                }
            }
            _ => self.registry.fallback = Some(blk),
        }
    }

    // parse_type()
    // Implements the grammar rules
    //    type_name = predefined_type_name | struct_type_name | taggedstruct_type_name | taggedunion_type_name | enum_type_name
    //    predefined_type_name = "char" | "int" | "long" | "int64" | "uchar" | "uint" | "ulong" | "uint64" | "double" | "float"
    fn parse_type(&mut self, tok_start: &TokenType) -> Result<A2mlType, A2mlError> {
        match tok_start {
            TokenType::Char => Ok(A2mlType::Char),
            TokenType::Int => Ok(A2mlType::Int),
            TokenType::Long => Ok(A2mlType::Long),
            TokenType::Int64 => Ok(A2mlType::Int64),
            TokenType::Uchar => Ok(A2mlType::UChar),
            TokenType::Uint => Ok(A2mlType::UInt),
            TokenType::Ulong => Ok(A2mlType::ULong),
            TokenType::Uint64 => Ok(A2mlType::UInt64),
            TokenType::Float => Ok(A2mlType::Float),
            TokenType::Double => Ok(A2mlType::Double),
            TokenType::Enum => self.parse_complex_type(A2mlKind::Enum),
            TokenType::Struct => self.parse_complex_type(A2mlKind::Struct),
            TokenType::Taggedstruct => self.parse_complex_type(A2mlKind::TaggedStruct),
            TokenType::Taggedunion => self.parse_complex_type(A2mlKind::TaggedUnion),
            _ => Err(self.unexpected("a type name", tok_start)),
        }
    }

    // parse_complex_type()
    // enums, structs, taggedstructs and taggedunions all follow the same pattern:
    //    struct_type_name = "struct" [ identifier ] "{" [struct_member_list ] "}" | "struct" identifier
    // If the short form "struct identifier" is found, then it must refer to a previously declared type,
    // or to the type that is currently being declared
    fn parse_complex_type(&mut self, kind: A2mlKind) -> Result<A2mlType, A2mlError> {
        let name = self.parse_optional_name();

        // check if this is a reference to a previous declaration or if there is also a definition enclosed in {}
        if self.peek_token() != Some(&TokenType::OpenCurlyBracket) {
            return match name {
                Some(name) => self.make_reference(kind, name),
                None => {
                    let found = self.describe_next();
                    Err(A2mlError::UnexpectedToken {
                        expected: format!("an identifier or '{{' after {kind}"),
                        found,
                        line: self.line,
                    })
                }
            };
        }
        self.require_token_type(&TokenType::OpenCurlyBracket)?;

        if let Some(name) = &name {
            self.in_progress.push((kind, name.clone()));
        }
        let result = match kind {
            A2mlKind::Enum => self.parse_enum_body(),
            A2mlKind::Struct => self.parse_struct_body(),
            A2mlKind::TaggedStruct => self.parse_tagged_body(true).map(A2mlType::TaggedStruct),
            A2mlKind::TaggedUnion => self.parse_tagged_body(false).map(A2mlType::TaggedUnion),
        };
        if name.is_some() {
            self.in_progress.pop();
        }
        let typ = result?;

        if let Some(name) = name {
            self.registry.insert(kind, name, typ.clone());
        }
        Ok(typ)
    }

    fn make_reference(&self, kind: A2mlKind, name: String) -> Result<A2mlType, A2mlError> {
        let key = (kind, name);
        if self.registry.types.contains_key(&key) || self.in_progress.contains(&key) {
            Ok(A2mlType::Ref(key.0, key.1))
        } else {
            Err(A2mlError::UndefinedType {
                kind: key.0,
                name: key.1,
                line: self.line,
            })
        }
    }

    // parse_enum_body()
    //    enumerator_list = enumerator | enumerator "," enumerator_list
    //    enumerator = keyword [ "=" constant ]
    // Items without a constant get the value of the previous item + 1; the first item defaults to 0
    fn parse_enum_body(&mut self) -> Result<A2mlType, A2mlError> {
        let mut enumitems = Vec::new();
        let mut next_value = 0;
        loop {
            let name = self.require_tag_or_ident()?;
            let mut value = next_value;
            let mut token = self.require_next("',' or '}'")?;
            /* optionally each enum item may include a constant. */
            if *token == TokenType::Equals {
                value = self.require_constant()?;
                token = self.require_next("',' or '}'")?;
            }
            enumitems.push(A2mlEnumItem { name, value });
            next_value = value.wrapping_add(1);
            match token {
                TokenType::Comma => {}
                TokenType::ClosedCurlyBracket => break,
                _ => return Err(self.unexpected("',' or '}' in enum list", token)),
            }
        }
        Ok(A2mlType::Enum(enumitems))
    }

    // parse_struct_body()
    //    struct_member_list = struct_member | struct_member struct_member_list
    //    struct_member = member ";"
    fn parse_struct_body(&mut self) -> Result<A2mlType, A2mlError> {
        let mut structdata = Vec::new();
        while self.peek_token() != Some(&TokenType::ClosedCurlyBracket) {
            let (name, item) = self.parse_member()?;
            structdata.push(A2mlMember { name, item });
            self.require_token_type(&TokenType::Semicolon)?;
        }
        self.require_token_type(&TokenType::ClosedCurlyBracket)?;
        Ok(A2mlType::Struct(structdata))
    }

    // parse_tagged_body()
    //    taggedstruct_member_list = taggedstruct_member | taggedstruct_member taggedstruct_member_list
    //    taggedunion_member_list = tagged_union_member | tagged_union_member taggedunion_member_list
    fn parse_tagged_body(&mut self, is_struct: bool) -> Result<Vec<A2mlTagged>, A2mlError> {
        let mut items: Vec<A2mlTagged> = Vec::new();
        while self.peek_token() != Some(&TokenType::ClosedCurlyBracket) {
            let line = self.peek_line();
            let member = self.parse_tagged_member(is_struct)?;
            self.require_token_type(&TokenType::Semicolon)?;
            if let Some(pos) = items.iter().position(|item| item.tag == member.tag) {
                if !is_struct {
                    return Err(A2mlError::DuplicateTag {
                        tag: member.tag,
                        line,
                    });
                }
                items[pos] = member;
            } else {
                items.push(member);
            }
        }
        self.require_token_type(&TokenType::ClosedCurlyBracket)?;
        Ok(items)
    }

    // parse_tagged_member()
    // Parses taggedstruct members according to the grammar:
    //    taggedstruct_member = taggedstruct_definition ";" | "(" taggedstruct_definition ")*;" | block_definition ";" | "(" block_definition ")*;"
    //    tagged_union_member = tag [ member ] ";" | block_definition ";"
    fn parse_tagged_member(&mut self, allow_repeat: bool) -> Result<A2mlTagged, A2mlError> {
        let mut repeat = false;
        if allow_repeat && self.peek_token() == Some(&TokenType::OpenRoundBracket) {
            repeat = true;
            self.next_token();
        }

        let mut is_block = false;
        if self.peek_token() == Some(&TokenType::Block) {
            is_block = true;
            self.next_token();
        }

        let tag = self.require_tag_or_ident()?;
        let item = match self.peek_token() {
            Some(TokenType::Semicolon | TokenType::ClosedRoundBracket) => A2mlType::None,
            _ => self.parse_tagged_def()?,
        };

        if repeat {
            self.require_token_type(&TokenType::ClosedRoundBracket)?;
            self.require_token_type(&TokenType::Repeat)?;
        }

        Ok(A2mlTagged {
            tag,
            item,
            is_block,
            repeat,
        })
    }

    // parse_tagged_def()
    // Parses taggedstruct definitions according to the grammar:
    //    taggedstruct_definition = tag [ member ] | tag "(" member ")*;"
    // the tag has already been consumed by the caller
    fn parse_tagged_def(&mut self) -> Result<A2mlType, A2mlError> {
        let mut inner_repeat = false;
        if self.peek_token() == Some(&TokenType::OpenRoundBracket) {
            inner_repeat = true;
            self.next_token();
        }

        let (_, mut member) = self.parse_member()?;

        if inner_repeat {
            self.require_token_type(&TokenType::ClosedRoundBracket)?;
            self.require_token_type(&TokenType::Repeat)?;
            member = A2mlType::Sequence(Box::new(member));
        }

        Ok(member)
    }

    // parse_member()
    // Parse a member of some other data structure. Each member could potentially have an arbitrary number of array dimensions
    //    member = type_name [ identifier ] [ array_specifier ]
    //    array_specifier = "[" constant "]" | "[" constant "]" array_specifier
    fn parse_member(&mut self) -> Result<(Option<String>, A2mlType), A2mlError> {
        let tok_start = self.require_next("a type name")?;
        let base_type = self.parse_type(tok_start)?;
        let mut name = self.parse_optional_name();

        let mut dims = Vec::new();
        while self.peek_token() == Some(&TokenType::OpenSquareBracket) {
            /* get the array dim */
            self.require_token_type(&TokenType::OpenSquareBracket)?;
            let dim = self.require_constant()?;
            self.require_token_type(&TokenType::ClosedSquareBracket)?;
            let dim = usize::try_from(dim).map_err(|_| A2mlError::InvalidConstant {
                text: dim.to_string(),
                line: self.line,
            })?;
            dims.push(dim);
        }
        if name.is_none() {
            // char[8] name;
            name = self.parse_optional_name();
        }
        // int x[2][3] is an array of 2 elements, each of which is an array of 3 ints
        let member = dims
            .into_iter()
            .rev()
            .fold(base_type, |inner, dim| A2mlType::Array(Box::new(inner), dim));

        Ok((name, member))
    }

    // parse_optional_name()
    // For enums, structs, taggedstructs and taggedunions the typename is optional, and so are the names of members.
    fn parse_optional_name(&mut self) -> Option<String> {
        if let Some(TokenType::Identifier(ident)) = self.peek_token() {
            let ident = ident.clone();
            self.next_token();
            Some(ident)
        } else {
            None
        }
    }

    fn next_token(&mut self) -> Option<&'a TokenType> {
        let token = self.tokens.get(self.pos)?;
        self.pos += 1;
        self.line = token.line;
        Some(&token.ttype)
    }

    fn peek_token(&self) -> Option<&'a TokenType> {
        self.tokens.get(self.pos).map(|token| &token.ttype)
    }

    fn peek_line(&self) -> u32 {
        self.tokens.get(self.pos).map_or(self.line, |token| token.line)
    }

    fn require_next(&mut self, expected: &str) -> Result<&'a TokenType, A2mlError> {
        self.next_token().ok_or_else(|| A2mlError::UnexpectedEnd {
            expected: expected.to_string(),
        })
    }

    // require_token_type()
    // get the next token, which is required to be of the provided type
    fn require_token_type(&mut self, reference: &TokenType) -> Result<(), A2mlError> {
        let expected = format!("{reference:?}");
        let token = self.require_next(&expected)?;
        if *token != *reference {
            return Err(self.unexpected(&expected, token));
        }
        Ok(())
    }

    // require_tag()
    // get the content of the next token, which is required to be a tag
    fn require_tag(&mut self) -> Result<String, A2mlError> {
        match self.require_next("a tag")? {
            TokenType::Tag(tag) => Ok(tag.clone()),
            tok => Err(self.unexpected("a tag", tok)),
        }
    }

    // tags of tagged members and enum items are sometimes written without quotes
    fn require_tag_or_ident(&mut self) -> Result<String, A2mlError> {
        match self.require_next("a tag")? {
            TokenType::Tag(tag) | TokenType::Identifier(tag) => Ok(tag.clone()),
            tok => Err(self.unexpected("a tag", tok)),
        }
    }

    // require_constant()
    // get the content of the next token, which is required to be a constant
    fn require_constant(&mut self) -> Result<i64, A2mlError> {
        match self.require_next("a constant")? {
            TokenType::Constant(c) => Ok(*c),
            tok => Err(self.unexpected("a constant", tok)),
        }
    }

    fn unexpected(&self, expected: &str, found: &TokenType) -> A2mlError {
        A2mlError::UnexpectedToken {
            expected: expected.to_string(),
            found: format!("{found:?}"),
            line: self.line,
        }
    }

    fn describe_next(&self) -> String {
        self.peek_token()
            .map_or_else(|| "end of input".to_string(), |tok| format!("{tok:?}"))
    }
}

impl A2mlRegistry {
    fn insert(&mut self, kind: A2mlKind, name: String, typ: A2mlType) {
        let key = (kind, name);
        if !self.types.contains_key(&key) {
            self.declared.push(key.clone());
        }
        self.types.insert(key, typ);
    }

    /// Get the declaration of a named type
    pub fn resolve(&self, kind: A2mlKind, name: &str) -> Option<&A2mlType> {
        self.types.get(&(kind, name.to_string()))
    }

    /// Find a named type of any kind
    pub fn find_named(&self, name: &str) -> Option<&A2mlType> {
        [
            A2mlKind::Struct,
            A2mlKind::TaggedStruct,
            A2mlKind::TaggedUnion,
            A2mlKind::Enum,
        ]
        .into_iter()
        .find_map(|kind| self.resolve(kind, name))
    }

    /// The member of `block "IF_DATA"` that is selected by `tag`
    pub fn ifdata_member(&self, tag: &str) -> Option<&A2mlTagged> {
        self.ifdata.get(tag)
    }

    /// The type of `block "IF_DATA"`, if it is neither a taggedstruct nor a taggedunion
    pub fn fallback(&self) -> Option<&A2mlType> {
        self.fallback.as_ref()
    }

    /// Names of all declared types, in declaration order
    pub fn declared_types(&self) -> impl Iterator<Item = (A2mlKind, &str)> {
        self.declared.iter().map(|(kind, name)| (*kind, name.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty() && self.ifdata.is_empty() && self.fallback.is_none()
    }
}
