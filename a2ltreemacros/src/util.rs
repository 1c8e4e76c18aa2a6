use proc_macro2::{Delimiter, TokenStream, TokenTree};

pub(crate) type TokenStreamIter = std::iter::Peekable<proc_macro2::token_stream::IntoIter>;

pub(crate) fn get_ident(token_iter: &mut TokenStreamIter) -> String {
    match token_iter.next() {
        Some(TokenTree::Ident(ident)) => ident.to_string(),
        Some(tok) => panic!("Expected an Ident, got: {:#?}", tok.to_string()),
        None => panic!("Expected an Ident, but reached the end of input"),
    }
}

pub(crate) fn get_integer(token_iter: &mut TokenStreamIter) -> usize {
    match token_iter.next() {
        Some(TokenTree::Literal(literal)) => {
            let strval = literal.to_string();
            match strval.parse() {
                Ok(value) => value,
                Err(_) => panic!("Expected an int literal, got {strval}"),
            }
        }
        Some(tok) => panic!("Expected an int literal, got: {:#?}", tok.to_string()),
        None => panic!("Expected an int literal, but reached the end of input"),
    }
}

pub(crate) fn get_group(token_iter: &mut TokenStreamIter, delim: Delimiter) -> TokenStream {
    match token_iter.next() {
        Some(TokenTree::Group(grp)) => {
            assert_eq!(
                grp.delimiter(),
                delim,
                "Expected a group inside of {:#?}, but got a group inside {:#?}",
                delim,
                grp.delimiter()
            );
            grp.stream()
        }
        Some(tok) => panic!("Expected a group, got {:#?}", tok.to_string()),
        None => panic!("Expected a group, but reached the end of input"),
    }
}

pub(crate) fn get_punct(token_iter: &mut TokenStreamIter) -> char {
    match token_iter.next() {
        Some(TokenTree::Punct(p)) => p.as_char(),
        Some(TokenTree::Group(_)) => panic!("Expected Punct, got a Group(...)"),
        Some(tok) => panic!("Expected Punct, got: {:#?}", tok.to_string()),
        None => panic!("Expected Punct, but reached the end of input"),
    }
}

pub(crate) fn require_punct(token_iter: &mut TokenStreamIter, reqchar: char) {
    let cur_pkchar = get_punct(token_iter);
    assert_eq!(
        cur_pkchar, reqchar,
        "Punctuation character '{}' is required in this position, but '{}' was found instead",
        reqchar, cur_pkchar
    );
}

// parse_attributes()
// doc comments ("///") arrive as #[doc = "..."]; they are dropped here.
// Any other attribute name is returned to the caller.
pub(crate) fn parse_attributes(token_iter: &mut TokenStreamIter) -> Vec<String> {
    let mut attributes = Vec::new();
    while let Some(TokenTree::Punct(p)) = token_iter.peek() {
        if p.as_char() != '#' {
            break;
        }
        require_punct(token_iter, '#');
        let attr_tokens = get_group(token_iter, Delimiter::Bracket);
        let attr_iter = &mut attr_tokens.into_iter().peekable();
        let attr = get_ident(attr_iter);
        if attr != "doc" {
            attributes.push(attr);
        }
    }
    attributes
}

// convert a CamelCase type name to an uppercase name with underscores (e.g. DataType -> DATA_TYPE)
pub(crate) fn typename_to_ucname(typename: &str) -> String {
    let mut outname = String::with_capacity(typename.len() + 4);
    for (idx, c) in typename.chars().enumerate() {
        if c.is_ascii_uppercase() && idx > 0 {
            outname.push('_');
        }
        outname.push(c.to_ascii_uppercase());
    }
    outname
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ucname_conversion() {
        assert_eq!(typename_to_ucname("DataType"), "DATA_TYPE");
        assert_eq!(typename_to_ucname("AddrType"), "ADDR_TYPE");
        assert_eq!(typename_to_ucname("Monotony"), "MONOTONY");
    }
}
