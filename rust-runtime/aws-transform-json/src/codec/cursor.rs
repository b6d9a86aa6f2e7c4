/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use crate::codec::error::DecodingError;
use crate::deserialize::{SyntaxError, Token};
use aws_transform_schema::MAX_NESTING_DEPTH;

/// Position of one decode call in a JSON token stream.
///
/// The cursor tracks how many objects and arrays are open, and for each one the name of the
/// element that owns it: the key it is the value of, or for array elements the name of the
/// enclosing array. When a container closes, its owner becomes the
/// [last parsed parent](Self::last_parsed_parent). A decoder uses the pair to tell its own
/// closing token apart from one that belongs to a nested value.
///
/// A cursor lives for one decode call and is never shared.
#[derive(Debug)]
pub struct DecoderCursor<I> {
    tokens: I,
    elements: Vec<Option<String>>,
    pending_element: Option<String>,
    last_parsed_parent: Option<String>,
}

impl<'a, I> DecoderCursor<I>
where
    I: Iterator<Item = Result<Token<'a>, SyntaxError>>,
{
    /// Creates a cursor at depth zero.
    pub fn new(tokens: I) -> Self {
        DecoderCursor {
            tokens,
            elements: Vec::new(),
            pending_element: None,
            last_parsed_parent: None,
        }
    }

    /// Number of objects and arrays currently open.
    pub fn depth(&self) -> usize {
        self.elements.len()
    }

    /// Owner of the innermost open container, if it has one. The top-level object doesn't.
    pub fn current_parent(&self) -> Option<&str> {
        self.elements.last().and_then(Option::as_deref)
    }

    /// Owner of the container whose closing token was consumed most recently.
    pub fn last_parsed_parent(&self) -> Option<&str> {
        self.last_parsed_parent.as_deref()
    }

    /// Unescaped name of the object key just consumed, until its value has been read.
    pub fn pending_element(&self) -> Option<&str> {
        self.pending_element.as_deref()
    }

    /// Advances to the next token, updating depth and element names.
    ///
    /// Returns `Ok(None)` once the stream is exhausted, whatever the depth.
    pub fn next_token(&mut self) -> Result<Option<Token<'a>>, DecodingError> {
        let token = match self.tokens.next().transpose()? {
            Some(token) => token,
            None => return Ok(None),
        };
        match &token {
            Token::ObjectKey { key, offset } => {
                let key = key
                    .to_unescaped()
                    .map_err(|err| SyntaxError::invalid_escape(offset.0, err))?;
                self.pending_element = Some(key.into_owned());
            }
            Token::StartObject { .. } | Token::StartArray { .. } => {
                if self.elements.len() >= MAX_NESTING_DEPTH {
                    return Err(DecodingError::nesting_too_deep(&token));
                }
                let owner = match self.pending_element.take() {
                    Some(key) => Some(key),
                    None => self.current_parent().map(str::to_owned),
                };
                self.elements.push(owner);
            }
            Token::EndObject { .. } | Token::EndArray { .. } => {
                let owner = self
                    .elements
                    .pop()
                    .ok_or_else(|| DecodingError::unbalanced_close(&token))?;
                self.last_parsed_parent = owner;
                self.pending_element = None;
            }
            Token::ValueBool { .. }
            | Token::ValueNull { .. }
            | Token::ValueNumber { .. }
            | Token::ValueString { .. } => self.pending_element = None,
        }
        Ok(Some(token))
    }
}
