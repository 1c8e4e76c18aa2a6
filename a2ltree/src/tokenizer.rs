use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TokenizerError {
    #[error("{filename}:{line}:{column}: Input text \"{tokentext}...\" was not recognized as an a2l token")]
    InvalidA2lToken {
        filename: String,
        line: u32,
        column: u32,
        tokentext: String,
    },

    #[error("{filename}:{line}:{column}: Invalid numerical constant \"{tokentext}\"")]
    InvalidNumericalConstant {
        filename: String,
        line: u32,
        column: u32,
        tokentext: String,
    },

    #[error("{filename}:{line}: Block comment was not closed before the end of input was reached")]
    UnclosedComment { filename: String, line: u32 },

    #[error("{filename}:{line}: String was not closed before the end of input was reached")]
    UnclosedString { filename: String, line: u32 },

    #[error("{filename}:{line}:{column}: There is no whitespace separating the input tokens")]
    MissingWhitespace {
        filename: String,
        line: u32,
        column: u32,
    },

    #[error("{filename}:{line}: /include directives are not supported")]
    IncludeNotSupported { filename: String, line: u32 },
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum A2lTokenType {
    Identifier,
    Begin,
    End,
    /// a quoted string, or the raw text of an A2ML block
    String,
    Int,
    Float,
}

/// One token of the input. The text of the token is `filedata[startpos..endpos]`
#[derive(Debug, Clone)]
pub struct A2lToken {
    pub ttype: A2lTokenType,
    pub startpos: usize,
    pub endpos: usize,
    pub line: u32,
    pub column: u32,
}

#[derive(Debug)]
pub(crate) struct TokenResult {
    pub(crate) tokens: Vec<A2lToken>,
    pub(crate) filedata: String,
    pub(crate) filename: String,
}

// keeps track of the current line and the byte offset at which it starts, so that every token gets a line and a column
struct LinePos {
    line: u32,
    line_start: usize,
}

impl LinePos {
    fn advance(&mut self, filebytes: &[u8], from: usize, to: usize) {
        for (offset, c) in filebytes[from..to].iter().enumerate() {
            if *c == b'\n' {
                self.line += 1;
                self.line_start = from + offset + 1;
            }
        }
    }

    fn column(&self, bytepos: usize) -> u32 {
        (bytepos - self.line_start + 1) as u32
    }
}

// tokenize()
// Convert the text of an a2l file to tokens.
// During tokenization the text is treated as ASCII, even though it is actually UTF-8. It is
// possible to do this because characters outside of basic ASCII can actually only occur in
// strings and comments. UTF-8 in strings is directly copied to the output, while comments are discarded.
pub(crate) fn tokenize(filename: String, filetext: &str) -> Result<TokenResult, TokenizerError> {
    let filebytes = filetext.as_bytes();
    let datalen = filebytes.len();

    let mut tokens: Vec<A2lToken> = Vec::with_capacity(datalen / 20);
    let mut bytepos = 0;
    let mut separated = true;
    let mut pos = LinePos {
        line: 1,
        line_start: 0,
    };

    while bytepos < datalen {
        let startpos = bytepos;
        let line = pos.line;
        let column = pos.column(startpos);

        if filebytes[bytepos].is_ascii_whitespace() {
            separated = true;
            while bytepos < datalen && filebytes[bytepos].is_ascii_whitespace() {
                bytepos += 1;
            }
            pos.advance(filebytes, startpos, bytepos);
        } else if filebytes[bytepos] == b'/' && bytepos + 1 < datalen {
            bytepos += 1;
            if filebytes[bytepos] == b'*' {
                // block comment
                separated = true;
                bytepos = skip_block_comment(filebytes, bytepos + 1).ok_or_else(|| {
                    TokenizerError::UnclosedComment {
                        filename: filename.clone(),
                        line,
                    }
                })?;
                pos.advance(filebytes, startpos, bytepos);
            } else if filebytes[bytepos] == b'/' {
                // line comment
                separated = true;
                while bytepos < datalen && filebytes[bytepos] != b'\n' {
                    bytepos += 1;
                }
            } else if filebytes[bytepos..].starts_with(b"begin") {
                separator_check(separated, &filename, line, column)?;
                bytepos += 5;
                tokens.push(A2lToken {
                    ttype: A2lTokenType::Begin,
                    startpos,
                    endpos: bytepos,
                    line,
                    column,
                });
                separated = false;
            } else if filebytes[bytepos..].starts_with(b"end") {
                separator_check(separated, &filename, line, column)?;
                bytepos += 3;
                tokens.push(A2lToken {
                    ttype: A2lTokenType::End,
                    startpos,
                    endpos: bytepos,
                    line,
                    column,
                });
                separated = false;
            } else if filebytes[bytepos..].starts_with(b"include") {
                return Err(TokenizerError::IncludeNotSupported { filename, line });
            } else {
                return Err(invalid_token(filename, filebytes, startpos, line, column));
            }
        } else if filebytes[bytepos] == b'"' {
            separator_check(separated, &filename, line, column)?;
            bytepos = find_string_end(filebytes, bytepos + 1).ok_or_else(|| {
                TokenizerError::UnclosedString {
                    filename: filename.clone(),
                    line,
                }
            })?;
            pos.advance(filebytes, startpos, bytepos);
            tokens.push(A2lToken {
                ttype: A2lTokenType::String,
                startpos,
                endpos: bytepos,
                line,
                column,
            });
            separated = false;
        } else if !filebytes[bytepos].is_ascii_digit() && is_identchar(filebytes[bytepos]) {
            separator_check(separated, &filename, line, column)?;
            while bytepos < datalen && is_identchar(filebytes[bytepos]) {
                bytepos += 1;
            }
            tokens.push(A2lToken {
                ttype: A2lTokenType::Identifier,
                startpos,
                endpos: bytepos,
                line,
                column,
            });
            separated = false;

            let new_bytepos = handle_a2ml(filetext, bytepos, &mut pos, &mut tokens);
            if bytepos != new_bytepos {
                separated = true;
            }
            bytepos = new_bytepos;
        } else if is_numchar(filebytes[bytepos]) {
            // a number, in any format (integer, floating point or hexadecimal)
            separator_check(separated, &filename, line, column)?;
            bytepos += 1;
            while bytepos < datalen && is_numchar(filebytes[bytepos]) {
                bytepos += 1;
            }
            let mut ttype = classify_number(&filetext[startpos..bytepos]);
            if bytepos < datalen && is_identchar(filebytes[bytepos]) {
                // identifiers that start with a digit are not standard compliant, but they do occur
                while bytepos < datalen && is_identchar(filebytes[bytepos]) {
                    bytepos += 1;
                }
                ttype = Some(A2lTokenType::Identifier);
            }
            let Some(ttype) = ttype else {
                return Err(TokenizerError::InvalidNumericalConstant {
                    filename,
                    line,
                    column,
                    tokentext: filetext[startpos..bytepos].to_owned(),
                });
            };
            tokens.push(A2lToken {
                ttype,
                startpos,
                endpos: bytepos,
                line,
                column,
            });
            separated = false;
        } else {
            return Err(invalid_token(filename, filebytes, startpos, line, column));
        }
    }

    Ok(TokenResult {
        tokens,
        filedata: filetext.to_owned(),
        filename,
    })
}

fn invalid_token(
    filename: String,
    filebytes: &[u8],
    startpos: usize,
    line: u32,
    column: u32,
) -> TokenizerError {
    let endpos = (startpos + 10).min(filebytes.len());
    TokenizerError::InvalidA2lToken {
        filename,
        line,
        column,
        tokentext: String::from_utf8_lossy(&filebytes[startpos..endpos]).into(),
    }
}

// classify_number()
// decimal and hex integers become Int tokens, everything else that Rust can read as a float becomes a Float token
fn classify_number(text: &str) -> Option<A2lTokenType> {
    let digits = text.strip_prefix(&['-', '+'][..]).unwrap_or(text);
    if let Some(hexdigits) = digits
        .strip_prefix("0x")
        .or_else(|| digits.strip_prefix("0X"))
    {
        if !hexdigits.is_empty() && hexdigits.bytes().all(|c| c.is_ascii_hexdigit()) {
            return Some(A2lTokenType::Int);
        }
        return None;
    }
    if !digits.is_empty() && digits.bytes().all(|c| c.is_ascii_digit()) {
        Some(A2lTokenType::Int)
    } else if digits.starts_with(|c: char| c.is_ascii_digit() || c == '.') && text.parse::<f64>().is_ok() {
        Some(A2lTokenType::Float)
    } else {
        None
    }
}

// skip_block_comment
// finds the first byte position after the end of a block comment
fn skip_block_comment(filebytes: &[u8], mut bytepos: usize) -> Option<usize> {
    let datalen = filebytes.len();

    bytepos += 1;
    while bytepos < datalen && !(filebytes[bytepos - 1] == b'*' && filebytes[bytepos] == b'/') {
        bytepos += 1;
    }

    if bytepos >= datalen {
        return None;
    }

    // currently filebytes[bytepos] == b'/', but the result is the first character after the block comment
    Some(bytepos + 1)
}

// find_string_end
// finds the end of a string. Quotes can be escaped either as "" or as \"
fn find_string_end(filebytes: &[u8], mut bytepos: usize) -> Option<usize> {
    let datalen = filebytes.len();
    let mut end_found = false;
    let mut prev_quote = false;
    let mut prev_bkslash = false;

    while bytepos < datalen && !end_found {
        if filebytes[bytepos] == b'"' {
            // if either prev_quote or prev_bkslash is set, then this quote is escaped
            // otherwise it's the start of a double quote escape sequence or the end of the string
            prev_quote = !(prev_quote || prev_bkslash);
            prev_bkslash = false;
        } else {
            if prev_quote {
                // the previous char was a quote, but this one isn't: the end has been found
                end_found = true;
            } else if filebytes[bytepos] == b'\\' {
                prev_bkslash = !prev_bkslash;
            } else {
                prev_bkslash = false;
            }
            prev_quote = false;
        }
        bytepos += 1;
    }
    if bytepos == datalen && !end_found {
        if prev_quote {
            // the closing quote was the last character of the input
            bytepos += 1;
        } else {
            return None;
        }
    }

    Some(bytepos - 1)
}

// handle_a2ml()
// the data inside the A2ML block can't be tokenized according to the rules for A2L, because it is a completely different format
// handle_a2ml finds the end of the A2ML block and stores its content as a single String token
fn handle_a2ml(
    filedata: &str,
    mut bytepos: usize,
    pos: &mut LinePos,
    tokens: &mut Vec<A2lToken>,
) -> usize {
    let tokcount = tokens.len();
    if tokcount < 2 || tokens[tokcount - 2].ttype != A2lTokenType::Begin {
        return bytepos;
    }
    let tag = &filedata[tokens[tokcount - 1].startpos..tokens[tokcount - 1].endpos];
    if tag != "A2ML" {
        return bytepos;
    }

    let startpos = bytepos;
    let filebytes = filedata.as_bytes();
    let datalen = filebytes.len();
    let mut done = false;
    while !done && bytepos < datalen {
        // find the next '/', which should be the start of one of "/*", "//", or "/end"
        while bytepos < datalen && filebytes[bytepos] != b'/' {
            bytepos += 1;
        }
        if filebytes[bytepos..].starts_with(b"//") {
            while bytepos < datalen && filebytes[bytepos] != b'\n' {
                bytepos += 1;
            }
        } else if filebytes[bytepos..].starts_with(b"/*") {
            bytepos += 2;
            while bytepos + 1 < datalen
                && !(filebytes[bytepos] == b'*' && filebytes[bytepos + 1] == b'/')
            {
                bytepos += 1;
            }
            bytepos = (bytepos + 2).min(datalen);
        } else if filebytes[bytepos..].starts_with(b"/end") {
            done = true;
        } else if bytepos < datalen {
            // a solitary '/' will cause an error in the A2ML parser
            bytepos += 1;
        }
    }

    // trailing whitespace up to and including the last newline belongs to "/end A2ML"
    while bytepos > startpos
        && filebytes[bytepos - 1].is_ascii_whitespace()
        && filebytes[bytepos - 1] != b'\n'
    {
        bytepos -= 1;
    }
    if bytepos > startpos && filebytes[bytepos - 1] == b'\n' {
        bytepos -= 1;
        if bytepos > startpos && filebytes[bytepos - 1] == b'\r' {
            bytepos -= 1;
        }
    }

    if bytepos > startpos {
        tokens.push(A2lToken {
            ttype: A2lTokenType::String,
            startpos,
            endpos: bytepos,
            line: pos.line,
            column: pos.column(startpos),
        });
        pos.advance(filebytes, startpos, bytepos);
    }

    bytepos
}

// separator_check
// generate an error message if there is no whitespace (or a block comment) separating two tokens
fn separator_check(
    separated: bool,
    filename: &str,
    line: u32,
    column: u32,
) -> Result<(), TokenizerError> {
    if !separated {
        return Err(TokenizerError::MissingWhitespace {
            filename: filename.to_owned(),
            line,
            column,
        });
    }
    Ok(())
}

// is_identchar()
// is this char allowed in an identifier
pub(crate) fn is_identchar(c: u8) -> bool {
    c.is_ascii_alphanumeric() || c == b'.' || c == b'[' || c == b']' || c == b'_'
}

// is_numchar()
// in addition to decimal format, numbers can also be written as hex, or as floats with exponents
fn is_numchar(c: u8) -> bool {
    c.is_ascii_hexdigit() || c == b'x' || c == b'X' || c == b'.' || c == b'+' || c == b'-'
}
