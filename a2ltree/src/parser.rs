use num_traits::{Bounded, NumCast};
use std::sync::Arc;
use thiserror::Error;

use crate::A2lError;
use crate::a2ml::{A2mlError, A2mlRegistry};
use crate::behavior::NodeOverrides;
use crate::grammar::NodeSchema;
use crate::node::{IntValue, NodeData};
use crate::tokenizer::{A2lToken, A2lTokenType, TokenResult};

struct TokenIter<'a> {
    tokens: &'a [A2lToken],
    pos: usize,
}

pub(crate) struct ParserState<'a> {
    token_cursor: TokenIter<'a>,
    filedata: &'a str,
    pub(crate) filename: &'a str,
    pub(crate) last_token_position: u32,
    pub(crate) last_token_column: u32,
    pub(crate) log_msgs: &'a mut Vec<A2lError>,
    pub(crate) overrides: &'a NodeOverrides,
    pub(crate) builtin_a2ml: Option<Arc<A2mlRegistry>>,
    // one entry for each open node that can hold an A2ML block; the innermost scope is last
    pub(crate) a2ml_scopes: Vec<Option<Arc<A2mlRegistry>>>,
    pub(crate) arena: Vec<NodeData>,
}

/// describes the current parser context, giving the chain of enclosing elements and the line where the current one started
#[derive(Debug, Clone)]
pub struct ParseContext {
    pub element: String,
    pub line: u32,
    /// schema of the node that contains the current element, if that is a node of the a2l grammar
    pub parent: Option<&'static NodeSchema>,
}

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ParserError {
    #[error("{filename}:{error_line}:{column}: expected token of type {expected_ttype:?}, got {actual_ttype:?} (\"{actual_text}\") inside block {element} starting on line {block_line}")]
    UnexpectedTokenType {
        filename: String,
        error_line: u32,
        column: u32,
        block_line: u32,
        element: String,
        actual_ttype: A2lTokenType,
        actual_text: String,
        expected_ttype: A2lTokenType,
    },

    #[error("{filename}:{error_line}:{column}: string \"{numstr}\" could not be interpreted as a number")]
    MalformedNumber {
        filename: String,
        error_line: u32,
        column: u32,
        numstr: String,
    },

    #[error("{filename}:{error_line}:{column}: expected an enum value, but \"{enumtxt}\" is not part of the enum (located inside block {block} starting on line {block_line})")]
    InvalidEnumValue {
        filename: String,
        error_line: u32,
        column: u32,
        enumtxt: String,
        block: String,
        block_line: u32,
    },

    #[error("{filename}:{error_line}: element {tag} is missing in block {block} starting on line {block_line}")]
    InvalidMultiplicityNotPresent {
        filename: String,
        error_line: u32,
        tag: String,
        block: String,
        block_line: u32,
    },

    #[error("{filename}:{error_line}: element {tag} in block {block} starting on line {block_line} must be enclosed in /begin and /end")]
    IncorrectBlockError {
        filename: String,
        error_line: u32,
        tag: String,
        block: String,
        block_line: u32,
    },

    #[error("{filename}:{error_line}: element {tag} in block {block} starting on line {block_line} may not be enclosed in /begin and /end")]
    IncorrectKeywordError {
        filename: String,
        error_line: u32,
        tag: String,
        block: String,
        block_line: u32,
    },

    #[error("{filename}:{error_line}: Wrong end tag {tag} found at the end of block {block} starting on line {block_line}")]
    IncorrectEndTag {
        filename: String,
        error_line: u32,
        tag: String,
        block: String,
        block_line: u32,
    },

    #[error("{filename}:{error_line}:{column}: Unknown sub-block {tag} found inside block {block} starting on line {block_line}")]
    UnknownSubBlock {
        filename: String,
        error_line: u32,
        column: u32,
        tag: String,
        block: String,
        block_line: u32,
    },

    #[error("{filename}:{error_line}: encountered end of file while not done parsing block {block} starting on line {block_line}")]
    UnexpectedEOF {
        filename: String,
        error_line: u32,
        block: String,
        block_line: u32,
    },

    #[error("{filename}:{error_line}: String \"{text}\" in block {block} is {length} bytes long, but the maximum allowed length is {max_length}")]
    StringTooLong {
        filename: String,
        error_line: u32,
        block: String,
        text: String,
        length: usize,
        max_length: usize,
    },

    #[error("{filename}:{error_line}: A2ML error: {a2ml_error}")]
    A2mlError {
        filename: String,
        error_line: u32,
        #[source]
        a2ml_error: A2mlError,
    },

    /// `AdditionalTokensError` parsing finished without consuming all data in the file
    #[error("{filename}:{error_line}: unexpected additional data \"{text}...\" after parsed a2l file content")]
    AdditionalTokensError {
        filename: String,
        error_line: u32,
        text: String,
    },

    /// warning: a keyword that may only occur once was found again; the later value replaces the earlier one
    #[error("{filename}:{error_line}: element {tag} occurs more than once in block {block} starting on line {block_line}, the last occurrence is used")]
    RepeatedKeyword {
        filename: String,
        error_line: u32,
        tag: String,
        block: String,
        block_line: u32,
    },

    /// warning: a non-repeating member of an A2ML taggedstruct occurs more than once
    #[error("{filename}:{error_line}: tagged item {tag} in {block} is not declared as repeating, but occurs more than once")]
    RepeatedTaggedItem {
        filename: String,
        error_line: u32,
        tag: String,
        block: String,
    },

    /// warning: the content of an IF_DATA block could not be decoded with the generic IF_DATA declaration and is kept unparsed
    #[error("{filename}:{error_line}: the content of IF_DATA {tag} does not match the A2ML declaration and is kept unparsed: {reason}")]
    IfDataMismatch {
        filename: String,
        error_line: u32,
        tag: String,
        reason: String,
    },

    /// warning: a second IF_DATA block with the same tag replaces the first one
    #[error("{filename}:{error_line}: IF_DATA {tag} occurs more than once in block {block}, the last occurrence is used")]
    RepeatedIfData {
        filename: String,
        error_line: u32,
        tag: String,
        block: String,
    },
}

// it pretends to be an Iter, but it really isn't
impl<'a> TokenIter<'a> {
    fn next(&mut self) -> Option<&'a A2lToken> {
        let item = self.tokens.get(self.pos);
        if item.is_some() {
            self.pos += 1;
        }
        item
    }

    fn peek(&self) -> Option<&'a A2lToken> {
        self.tokens.get(self.pos)
    }

    fn back(&mut self) {
        self.pos -= 1;
    }
}

impl<'a> ParserState<'a> {
    pub(crate) fn new<'b>(
        tokenresult: &'b TokenResult,
        log_msgs: &'b mut Vec<A2lError>,
        overrides: &'b NodeOverrides,
    ) -> ParserState<'b> {
        ParserState {
            token_cursor: TokenIter {
                tokens: &tokenresult.tokens,
                pos: 0,
            },
            filedata: &tokenresult.filedata,
            filename: &tokenresult.filename,
            last_token_position: 0,
            last_token_column: 0,
            log_msgs,
            overrides,
            builtin_a2ml: None,
            a2ml_scopes: Vec::new(),
            arena: Vec::with_capacity(tokenresult.tokens.len() / 8),
        }
    }

    // get_token
    // get one token from the list of tokens and unwrap it
    pub(crate) fn get_token(
        &mut self,
        context: &ParseContext,
    ) -> Result<&'a A2lToken, ParserError> {
        if let Some(token) = self.token_cursor.next() {
            self.last_token_position = token.line;
            self.last_token_column = token.column;
            Ok(token)
        } else {
            Err(ParserError::unexpected_eof(self, context))
        }
    }

    pub(crate) fn undo_get_token(&mut self) {
        self.token_cursor.back();
    }

    pub(crate) fn peek_token(&self) -> Option<&'a A2lToken> {
        self.token_cursor.peek()
    }

    // peek at the token after the next one; used to see the tag following /begin
    pub(crate) fn peek_second_token(&self) -> Option<&'a A2lToken> {
        self.token_cursor.tokens.get(self.token_cursor.pos + 1)
    }

    pub(crate) fn log_warning(&mut self, parse_error: ParserError) {
        self.log_msgs.push(A2lError::ParserError {
            parser_error: parse_error,
        });
    }

    pub(crate) fn get_tokenpos(&self) -> usize {
        self.token_cursor.pos
    }

    pub(crate) fn set_tokenpos(&mut self, newpos: usize) {
        self.token_cursor.pos = newpos;
    }

    pub(crate) fn get_token_text(&self, token: &A2lToken) -> &'a str {
        &self.filedata[token.startpos..token.endpos]
    }

    // expect_token get a token which has to be of a particular type (hence: expect)
    // getting a token of any other type is a ParserError
    pub(crate) fn expect_token(
        &mut self,
        context: &ParseContext,
        token_type: A2lTokenType,
    ) -> Result<&'a A2lToken, ParserError> {
        let token = self.get_token(context)?;

        if token.ttype != token_type {
            return Err(ParserError::unexpected_token_type(
                self, context, token, token_type,
            ));
        }

        Ok(token)
    }

    // get_string()
    // Get the content of a String token as a string
    pub(crate) fn get_string(&mut self, context: &ParseContext) -> Result<String, ParserError> {
        let token = self.expect_token(context, A2lTokenType::String)?;
        let mut text = self.get_token_text(token);
        if text.len() >= 2 && text.starts_with('"') {
            text = &text[1..text.len() - 1];
        }
        Ok(unescape_string(text))
    }

    // get_string_maxlen()
    // Get the content of a String token as a string. Trigger an error if the string is longer than maxlen
    pub(crate) fn get_string_maxlen(
        &mut self,
        context: &ParseContext,
        maxlen: usize,
    ) -> Result<String, ParserError> {
        let text = self.get_string(context)?;
        if text.len() > maxlen {
            return Err(ParserError::StringTooLong {
                filename: self.filename.to_owned(),
                error_line: self.last_token_position,
                block: context.element.clone(),
                length: text.len(),
                text,
                max_length: maxlen,
            });
        }
        Ok(text)
    }

    // get_identifier()
    // Get the content of an Identifier token as a string
    pub(crate) fn get_identifier(&mut self, context: &ParseContext) -> Result<String, ParserError> {
        let token = self.expect_token(context, A2lTokenType::Identifier)?;
        Ok(String::from(self.get_token_text(token)))
    }

    // get_integer()
    // Get the value of an Int token, together with its notation
    pub(crate) fn get_integer(&mut self, context: &ParseContext) -> Result<IntValue, ParserError> {
        let token = self.get_token(context)?;
        let text = self.get_token_text(token);
        match token.ttype {
            A2lTokenType::Int => parse_integer_text(text)
                .ok_or_else(|| ParserError::malformed_number(self, context, text)),
            // a number, but not one that can be stored in an integer field
            A2lTokenType::Float => Err(ParserError::malformed_number(self, context, text)),
            _ => Err(ParserError::unexpected_token_type(
                self,
                context,
                token,
                A2lTokenType::Int,
            )),
        }
    }

    // get_integer_ranged()
    // get an integer and verify that it fits into the integer type T. This implements the A2ML types char, uint, long, etc.
    pub(crate) fn get_integer_ranged<T: Bounded + NumCast>(
        &mut self,
        context: &ParseContext,
    ) -> Result<IntValue, ParserError> {
        let intval = self.get_integer(context)?;
        if integer_fits::<T>(intval) {
            Ok(intval)
        } else {
            let text = self.get_token_text(&self.token_cursor.tokens[self.token_cursor.pos - 1]);
            Err(ParserError::malformed_number(self, context, text))
        }
    }

    // get_float()
    // Get the value of a Float token. Int tokens are also accepted here, including unsigned hex:
    // some vendor tools use 0xNNN for the limits of characteristics that are actually integers.
    pub(crate) fn get_float(&mut self, context: &ParseContext) -> Result<f64, ParserError> {
        let token = self.get_token(context)?;
        let text = self.get_token_text(token);
        if !matches!(token.ttype, A2lTokenType::Int | A2lTokenType::Float) {
            return Err(ParserError::unexpected_token_type(
                self,
                context,
                token,
                A2lTokenType::Float,
            ));
        }
        let value = if let Some(hexdigits) = text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
            u64::from_str_radix(hexdigits, 16).ok().map(|num| num as f64)
        } else {
            // a signed hex number is not a valid float
            text.parse::<f64>().ok()
        };
        value.ok_or_else(|| ParserError::malformed_number(self, context, text))
    }

    // get_next_tag()
    // get the tag of the next item of a taggedstruct or taggedunion
    // returns None without consuming anything if the next tokens are not "/begin TAG" or "TAG"
    pub(crate) fn get_next_tag(
        &mut self,
        context: &ParseContext,
    ) -> Result<Option<(&'a A2lToken, bool)>, ParserError> {
        let mut is_block = false;
        let tokenpos = self.get_tokenpos();

        // if the next token is /begin, then set is_block and skip the token
        if let Some(A2lToken {
            ttype: A2lTokenType::Begin,
            ..
        }) = self.token_cursor.peek()
        {
            is_block = true;
            self.get_token(context)?;
        }

        match self.token_cursor.next() {
            Some(token @ A2lToken {
                ttype: A2lTokenType::Identifier,
                ..
            }) => {
                self.last_token_position = token.line;
                self.last_token_column = token.column;
                Ok(Some((token, is_block)))
            }
            Some(token) if is_block => {
                // an Identifier must follow after a /begin
                self.set_tokenpos(tokenpos);
                Err(ParserError::unexpected_token_type(
                    self,
                    context,
                    token,
                    A2lTokenType::Identifier,
                ))
            }
            None if is_block => {
                self.set_tokenpos(tokenpos);
                Err(ParserError::unexpected_eof(self, context))
            }
            _ => {
                // no tag? no problem!
                self.set_tokenpos(tokenpos);
                Ok(None)
            }
        }
    }

    // expect_end_tag()
    // consume "/end TAG" at the end of a block that started with "/begin TAG"
    pub(crate) fn expect_end_tag(
        &mut self,
        context: &ParseContext,
        tag: &str,
    ) -> Result<(), ParserError> {
        self.expect_token(context, A2lTokenType::End)?;
        let endident = self.expect_token(context, A2lTokenType::Identifier)?;
        let endtag = self.get_token_text(endident);
        if endtag != tag {
            return Err(ParserError::incorrect_end_tag(self, context, endtag));
        }
        Ok(())
    }

    /// the registry of the innermost scope that has one
    pub(crate) fn current_a2ml(&self) -> Option<Arc<A2mlRegistry>> {
        self.a2ml_scopes.iter().rev().flatten().next().cloned()
    }
}

impl ParseContext {
    pub(crate) fn root(element: &str, line: u32) -> ParseContext {
        ParseContext {
            element: element.to_string(),
            line,
            parent: None,
        }
    }

    // create the context for an element inside of the current one. The element name is the chain of all enclosing tags
    pub(crate) fn nested(&self, tag: &str, token: &A2lToken) -> ParseContext {
        ParseContext {
            element: format!("{}/{tag}", self.element),
            line: token.line,
            parent: None,
        }
    }
}

impl ParserError {
    pub(crate) fn unexpected_token_type(
        parser: &ParserState,
        context: &ParseContext,
        token: &A2lToken,
        expected_ttype: A2lTokenType,
    ) -> Self {
        Self::UnexpectedTokenType {
            filename: parser.filename.to_owned(),
            error_line: token.line,
            column: token.column,
            block_line: context.line,
            element: context.element.clone(),
            actual_ttype: token.ttype,
            actual_text: parser.get_token_text(token).to_owned(),
            expected_ttype,
        }
    }

    pub(crate) fn malformed_number(
        parser: &ParserState,
        _context: &ParseContext,
        numstr: &str,
    ) -> Self {
        Self::MalformedNumber {
            filename: parser.filename.to_owned(),
            error_line: parser.last_token_position,
            column: parser.last_token_column,
            numstr: numstr.to_owned(),
        }
    }

    pub(crate) fn invalid_enum_value(
        parser: &ParserState,
        context: &ParseContext,
        enumitem: &str,
    ) -> Self {
        Self::InvalidEnumValue {
            filename: parser.filename.to_owned(),
            error_line: parser.last_token_position,
            column: parser.last_token_column,
            enumtxt: enumitem.to_owned(),
            block: context.element.clone(),
            block_line: context.line,
        }
    }

    pub(crate) fn invalid_multiplicity_not_present(
        parser: &ParserState,
        context: &ParseContext,
        tag: &str,
    ) -> Self {
        Self::InvalidMultiplicityNotPresent {
            filename: parser.filename.to_owned(),
            error_line: parser.last_token_position,
            tag: tag.to_string(),
            block: context.element.clone(),
            block_line: context.line,
        }
    }

    pub(crate) fn incorrect_block(parser: &ParserState, context: &ParseContext, tag: &str) -> Self {
        Self::IncorrectBlockError {
            filename: parser.filename.to_owned(),
            error_line: parser.last_token_position,
            tag: tag.to_owned(),
            block: context.element.clone(),
            block_line: context.line,
        }
    }

    pub(crate) fn incorrect_keyword(
        parser: &ParserState,
        context: &ParseContext,
        tag: &str,
    ) -> Self {
        Self::IncorrectKeywordError {
            filename: parser.filename.to_owned(),
            error_line: parser.last_token_position,
            tag: tag.to_owned(),
            block: context.element.clone(),
            block_line: context.line,
        }
    }

    pub(crate) fn incorrect_end_tag(
        parser: &ParserState,
        context: &ParseContext,
        tag: &str,
    ) -> Self {
        Self::IncorrectEndTag {
            filename: parser.filename.to_owned(),
            error_line: parser.last_token_position,
            tag: tag.to_owned(),
            block: context.element.clone(),
            block_line: context.line,
        }
    }

    pub(crate) fn unknown_sub_block(
        parser: &ParserState,
        context: &ParseContext,
        tag: &str,
    ) -> Self {
        Self::UnknownSubBlock {
            filename: parser.filename.to_owned(),
            error_line: parser.last_token_position,
            column: parser.last_token_column,
            tag: tag.to_owned(),
            block: context.element.clone(),
            block_line: context.line,
        }
    }

    pub(crate) fn unexpected_eof(parser: &ParserState, context: &ParseContext) -> Self {
        Self::UnexpectedEOF {
            filename: parser.filename.to_owned(),
            error_line: parser.last_token_position,
            block: context.element.clone(),
            block_line: context.line,
        }
    }

    pub(crate) fn a2ml_error(parser: &ParserState, a2ml_error: A2mlError) -> Self {
        Self::A2mlError {
            filename: parser.filename.to_owned(),
            error_line: parser.last_token_position,
            a2ml_error,
        }
    }
}

// parse_integer_text()
// decimal or hex (0x...) integers with an optional sign. Unsigned values above i64::MAX are kept as their bit pattern
fn parse_integer_text(text: &str) -> Option<IntValue> {
    let (negative, digits) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };
    let (magnitude, is_hex) = if let Some(hexdigits) = digits
        .strip_prefix("0x")
        .or_else(|| digits.strip_prefix("0X"))
    {
        (u64::from_str_radix(hexdigits, 16).ok()?, true)
    } else {
        (digits.parse::<u64>().ok()?, false)
    };
    let value = magnitude as i64;
    if negative {
        if magnitude > i64::MAX as u64 + 1 {
            return None;
        }
        Some(IntValue {
            value: value.wrapping_neg(),
            is_hex,
            is_u64: false,
        })
    } else {
        Some(IntValue {
            value,
            is_hex,
            is_u64: value < 0,
        })
    }
}

// integer_fits()
// hex values of signed types may have the high bit set, e.g. 0xFFFF is a valid int (i16).
// For 64 bit types every bit pattern is valid, but only uint64 has decimal values above i64::MAX
fn integer_fits<T: Bounded + NumCast>(intval: IntValue) -> bool {
    let IntValue {
        value,
        is_hex,
        is_u64,
    } = intval;
    let min: i64 = <i64 as NumCast>::from(T::min_value()).unwrap_or(i64::MIN);
    if std::mem::size_of::<T>() >= 8 {
        return !is_u64 || is_hex || min == 0;
    }
    if !is_u64 && <T as NumCast>::from(value).is_some() {
        return true;
    }
    let max: i64 = <i64 as NumCast>::from(T::max_value()).unwrap_or(i64::MAX);
    is_hex && min < 0 && value > max && value <= max * 2 + 1
}

pub(crate) fn unescape_string(text: &str) -> String {
    // first check if any unescaping is needed at all
    if !text.contains(['\\', '"']) {
        return text.to_owned();
    }

    let input_chars: Vec<char> = text.chars().collect();
    let mut output = String::with_capacity(text.len());
    let mut idx = 1;
    while idx < input_chars.len() {
        let prev = input_chars[idx - 1];
        let cur = input_chars[idx];
        let escaped = match (prev, cur) {
            ('\\' | '"', '"') => Some('"'),
            ('\\', '\'') => Some('\''),
            ('\\', '\\') => Some('\\'),
            ('\\', 'n') => Some('\n'),
            ('\\', 'r') => Some('\r'),
            ('\\', 't') => Some('\t'),
            _ => None,
        };
        if let Some(c) = escaped {
            output.push(c);
            idx += 1;
        } else {
            output.push(prev);
        }
        idx += 1;
    }
    if idx == input_chars.len() {
        output.push(input_chars[idx - 1]);
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer;

    fn with_parser(input_text: &str, test: impl FnOnce(&mut ParserState, &ParseContext)) {
        let tokenresult = tokenizer::tokenize("test_input".to_string(), input_text).unwrap();
        let mut log_msgs = Vec::<A2lError>::new();
        let overrides = NodeOverrides::default();
        let mut parser = ParserState::new(&tokenresult, &mut log_msgs, &overrides);
        let context = ParseContext::root("TEST", 1);
        test(&mut parser, &context);
    }

    #[test]
    fn parsing_numbers_test() {
        with_parser(
            "0 0x1 1.0e+2 -5 0.1 0x11 1.0e+2 0X1f 7 abc",
            |parser, context| {
                assert_eq!(parser.get_integer(context).unwrap(), IntValue::new(0));
                assert!(parser.get_integer(context).unwrap().is_hex);
                // 1.0e+2 is a float
                assert!(matches!(
                    parser.get_integer(context),
                    Err(ParserError::MalformedNumber { .. })
                ));
                assert_eq!(parser.get_integer(context).unwrap(), IntValue::new(-5));

                assert_eq!(parser.get_float(context).unwrap(), 0.1);
                assert_eq!(parser.get_float(context).unwrap(), 17.0);
                assert_eq!(parser.get_float(context).unwrap(), 100.0);
                assert_eq!(parser.get_float(context).unwrap(), 31.0);
                assert_eq!(parser.get_float(context).unwrap(), 7.0);
                assert!(matches!(
                    parser.get_float(context),
                    Err(ParserError::UnexpectedTokenType { .. })
                ));
                assert!(matches!(
                    parser.get_float(context),
                    Err(ParserError::UnexpectedEOF { .. })
                ));
            },
        );
    }

    #[test]
    fn float_from_integer_tokens() {
        with_parser(
            "-16 18446744073709551615 0xFFFFFFFFFFFFFFFF -0x10 +0x10",
            |parser, context| {
                assert_eq!(parser.get_float(context).unwrap(), -16.0);
                assert_eq!(parser.get_float(context).unwrap(), 18446744073709551615.0);
                assert_eq!(parser.get_float(context).unwrap(), 18446744073709551615.0);
                // hex limits must be unsigned
                assert!(matches!(
                    parser.get_float(context),
                    Err(ParserError::MalformedNumber { .. })
                ));
                assert!(matches!(
                    parser.get_float(context),
                    Err(ParserError::MalformedNumber { .. })
                ));
            },
        );
    }

    #[test]
    fn ranged_integers() {
        with_parser(
            "255 256 0xFFFF 0x1FFFF -129 0xFFFFFFFFFFFFFFFF 18446744073709551615 18446744073709551615",
            |parser, context| {
                assert!(parser.get_integer_ranged::<u8>(context).is_ok());
                assert!(parser.get_integer_ranged::<u8>(context).is_err());
                // hex notation can set the sign bit
                assert_eq!(parser.get_integer_ranged::<i16>(context).unwrap().value, 0xFFFF);
                assert!(parser.get_integer_ranged::<i16>(context).is_err());
                assert!(parser.get_integer_ranged::<i8>(context).is_err());
                let intval = parser.get_integer_ranged::<u64>(context).unwrap();
                assert_eq!((intval.value, intval.is_hex, intval.is_u64), (-1, true, true));
                // decimal values above i64::MAX are only valid for uint64
                assert!(parser.get_integer_ranged::<i64>(context).is_err());
                assert!(parser.get_integer_ranged::<u64>(context).unwrap().is_u64);
            },
        );
    }

    #[test]
    fn parsing_strings_and_identifiers() {
        with_parser(r#"ident "a ""quoted"" text" 123"#, |parser, context| {
            assert_eq!(parser.get_identifier(context).unwrap(), "ident");
            assert_eq!(parser.get_string(context).unwrap(), r#"a "quoted" text"#);
            let result = parser.get_identifier(context);
            assert!(matches!(
                result,
                Err(ParserError::UnexpectedTokenType {
                    expected_ttype: A2lTokenType::Identifier,
                    actual_ttype: A2lTokenType::Int,
                    ..
                })
            ));
        });
    }

    #[test]
    fn string_max_length() {
        with_parser(r#""abcd" "abcde""#, |parser, context| {
            assert_eq!(parser.get_string_maxlen(context, 4).unwrap(), "abcd");
            assert!(matches!(
                parser.get_string_maxlen(context, 4),
                Err(ParserError::StringTooLong { length: 5, .. })
            ));
        });
    }

    #[test]
    fn next_tag() {
        with_parser("/begin TAG1 TAG2 \"str\" /begin 5", |parser, context| {
            let (token, is_block) = parser.get_next_tag(context).unwrap().unwrap();
            assert!(is_block);
            assert_eq!(parser.get_token_text(token), "TAG1");
            let (token, is_block) = parser.get_next_tag(context).unwrap().unwrap();
            assert!(!is_block);
            assert_eq!(parser.get_token_text(token), "TAG2");
            // a string is not a tag, and nothing is consumed
            assert!(parser.get_next_tag(context).unwrap().is_none());
            assert_eq!(parser.get_string(context).unwrap(), "str");
            // /begin must be followed by a tag
            assert!(parser.get_next_tag(context).is_err());
        });
    }

    #[test]
    fn error_positions() {
        with_parser("a\n   b", |parser, context| {
            let _ = parser.get_identifier(context);
            let result = parser.get_string(context);
            assert!(matches!(
                result,
                Err(ParserError::UnexpectedTokenType {
                    error_line: 2,
                    column: 4,
                    ..
                })
            ));
        });
    }

    #[test]
    fn test_unescape_string() {
        assert_eq!(unescape_string(" "), " ");
        // "" -> "
        assert_eq!(unescape_string(r#""""#), r#"""#);
        // \" -> "
        assert_eq!(unescape_string(r#"\""#), r#"""#);
        // \' -> '
        assert_eq!(unescape_string(r#"\'"#), "'");
        // \\ -> \
        assert_eq!(unescape_string(r#"\\"#), r#"\"#);
        assert_eq!(unescape_string(r#"\n"#), "\n");
        assert_eq!(unescape_string(r#"\r"#), "\r");
        assert_eq!(unescape_string(r#"\txx"#), "\txx");
    }

    #[test]
    fn integer_text() {
        let negative_hex = parse_integer_text("-0x10").unwrap();
        assert_eq!((negative_hex.value, negative_hex.is_hex), (-16, true));
        assert_eq!(parse_integer_text("+12"), Some(IntValue::new(12)));
        let large = parse_integer_text("18446744073709551615").unwrap();
        assert_eq!((large.value, large.is_u64), (-1, true));
        assert_ne!(large, IntValue::new(-1));
        assert_eq!(parse_integer_text("-9223372036854775808"), Some(IntValue::new(i64::MIN)));
        assert_eq!(parse_integer_text("-9223372036854775809"), None);
        assert_eq!(parse_integer_text("0x"), None);
    }
}
