////////////////////////////////////////////////////////////////////////////
// This file is part of "stir", a STIR model loader and state-space         //
// explorer for partitioned-state model checking front-ends.                //
//                                                                          //
// Licensed under the MIT license or the Apache License, Version 2.0,       //
// at your option. See the LICENSE-MIT and LICENSE-APACHE files.            //
////////////////////////////////////////////////////////////////////////////

//! A minimal whitespace/newline-aware cursor over the STIR text buffer.
//!
//! The grammar is line-oriented and every directive is a fixed sequence of
//! whitespace-separated tokens, so the cursor only needs to hand out one
//! token at a time and know where the current line ends.

use crate::error::StirError;

/// Reads tokens out of a `&str` buffer, tracking a byte offset for
/// diagnostics. Never borrows past the call that constructed it into
/// anything the [`crate::model::Model`] retains: every parsed value is
/// copied out as it's consumed.
pub struct Cursor<'a> {
    text: &'a str,
    offset: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(text: &'a str) -> Self {
        Self { text, offset: 0 }
    }

    /// Current byte offset, for error messages.
    pub fn offset(&self) -> usize {
        self.offset
    }

    fn remaining(&self) -> &'a str {
        &self.text[self.offset..]
    }

    /// Skips a single ASCII space character if present, leaving everything
    /// else (including newlines) untouched — the grammar is strict about
    /// where whitespace may appear.
    fn skip_one_space(&mut self) {
        if self.remaining().starts_with(' ') {
            self.offset += 1;
        }
    }

    /// Consumes one whitespace-delimited token from the current position,
    /// without crossing a newline.
    fn take_token(&mut self) -> Result<&'a str, StirError> {
        let rest = self.remaining();
        let end = rest
            .find(|c: char| c == ' ' || c == '\n')
            .unwrap_or(rest.len());

        if end == 0 {
            return Err(StirError::parse(self.offset, "expected a token, found none"));
        }

        let token = &rest[..end];
        self.offset += end;
        Ok(token)
    }

    /// Expects the literal `keyword` as the next token.
    pub fn expect_keyword(&mut self, keyword: &str) -> Result<(), StirError> {
        let token = self.take_token()?;
        if token != keyword {
            return Err(StirError::parse(
                self.offset - token.len(),
                format!("expected keyword '{keyword}', found '{token}'"),
            ));
        }
        self.skip_one_space();
        Ok(())
    }

    /// Parses the next token as an unsigned size (`%zu`).
    pub fn parse_usize(&mut self) -> Result<usize, StirError> {
        let token = self.take_token()?;
        let value = token.parse::<usize>().map_err(|_| {
            StirError::parse(
                self.offset - token.len(),
                format!("expected an unsigned integer, found '{token}'"),
            )
        })?;
        self.skip_one_space();
        Ok(value)
    }

    /// Parses the next token as a signed integer (`%d`).
    pub fn parse_i32(&mut self) -> Result<i32, StirError> {
        let token = self.take_token()?;
        let value = token.parse::<i32>().map_err(|_| {
            StirError::parse(
                self.offset - token.len(),
                format!("expected a signed integer, found '{token}'"),
            )
        })?;
        self.skip_one_space();
        Ok(value)
    }

    /// Peeks whether the remaining text starts with `prefix`, without
    /// consuming anything.
    pub fn starts_with(&self, prefix: &str) -> bool {
        self.remaining().starts_with(prefix)
    }

    /// Consumes the rest of the current line, including its terminating
    /// newline if present. Used for `do_instr` payloads, which the grammar
    /// treats as opaque.
    pub fn skip_rest_of_line(&mut self) {
        let rest = self.remaining();
        match rest.find('\n') {
            Some(pos) => self.offset += pos + 1,
            None => self.offset = self.text.len(),
        }
    }

    /// Expects and consumes the line-terminating newline.
    pub fn expect_newline(&mut self) -> Result<(), StirError> {
        if !self.remaining().starts_with('\n') {
            return Err(StirError::parse(self.offset, "expected end of line"));
        }
        self.offset += 1;
        Ok(())
    }

    /// A checkpoint usable with [`Cursor::restore`] to backtrack a failed
    /// speculative parse (the slot-body grammar tries `bool` before `node`).
    pub fn save(&self) -> usize {
        self.offset
    }

    pub fn restore(&mut self, checkpoint: usize) {
        self.offset = checkpoint;
    }
}
