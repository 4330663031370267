//! Conversions between the pointer forms and normalized paths.

use crate::error::PointerError;
use crate::json_pointer::JsonPointer;
use crate::path_pointer::{PathPointer, Token};
use arbor_jpath::{NormalizedPath, PathElement};
use log::debug;

impl From<&PathPointer> for JsonPointer {
    fn from(pointer: &PathPointer) -> Self {
        let tokens = pointer
            .tokens()
            .iter()
            .map(|token| match token {
                Token::Name(name) => name.clone(),
                Token::Index(index) => index.to_string(),
                Token::Append => "-".to_string(),
            })
            .collect();
        JsonPointer::new(tokens)
    }
}

/// Digit tokens become indices. A JSON Pointer does not say whether `/0` names a member
/// or an element, so `{"0": ..}` lookups go through [`crate::resolve_pointer`] instead.
impl From<&JsonPointer> for PathPointer {
    fn from(pointer: &JsonPointer) -> Self {
        let mut tokens: Vec<Token> = pointer
            .tokens()
            .iter()
            .map(|token| Token::from_pointer_token(token))
            .collect();
        // `-` before the end cannot be an append marker
        let last = tokens.len().saturating_sub(1);
        for token in &mut tokens[..last] {
            if *token == Token::Append {
                *token = Token::Name("-".to_string());
            }
        }
        PathPointer::new(tokens).unwrap_or_default()
    }
}

impl From<&NormalizedPath> for PathPointer {
    fn from(path: &NormalizedPath) -> Self {
        let tokens = path
            .elements()
            .iter()
            .map(|element| match element {
                PathElement::Name(name) => Token::Name(name.clone()),
                PathElement::Index(index) => Token::Index(*index),
            })
            .collect();
        PathPointer::new(tokens).unwrap_or_default()
    }
}

impl From<&NormalizedPath> for JsonPointer {
    fn from(path: &NormalizedPath) -> Self {
        JsonPointer::from(&PathPointer::from(path))
    }
}

/// Rewrites a path pointer such as `$.a['b c'][0]` as the JSON Pointer `/a/b c/0`.
pub fn path_to_pointer(path: &str) -> Result<String, PointerError> {
    let pointer = JsonPointer::from(&PathPointer::parse(path)?);
    debug!("Path '{}' is pointer '{}'", path, pointer);
    Ok(pointer.to_string())
}

/// Rewrites a JSON Pointer such as `/a/b c/0` as the path pointer `$.a['b c'][0]`.
pub fn pointer_to_path(pointer: &str) -> Result<String, PointerError> {
    let path = PathPointer::from(&JsonPointer::parse(pointer)?);
    debug!("Pointer '{}' is path '{}'", pointer, path);
    Ok(path.to_string())
}
