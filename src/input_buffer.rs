//! # Input Buffer Module
//!
//! A forward-only character cursor over a sanitized ingredient line, with
//! nested checkpoints for backtracking.
//!
//! ## Checkpoints
//!
//! [`InputBuffer::checkpoint`] pushes the current position onto a LIFO stack
//! and returns a [`Checkpoint`] guard. The guard dereferences to the buffer,
//! so reads inside the checkpointed region go through it. When the guard is
//! dropped without [`Checkpoint::commit`] the cursor is restored to the saved
//! position; the checkpoint is popped either way.
//!
//! ```rust
//! use ingredient_templates::input_buffer::InputBuffer;
//!
//! let mut buffer = InputBuffer::new("1/2 cup");
//! {
//!     let mut checkpoint = buffer.checkpoint();
//!     checkpoint.next().unwrap();
//!     checkpoint.next().unwrap();
//!     // dropped without commit: rewinds
//! }
//! assert_eq!(buffer.position(), 0);
//! ```

use std::ops::{Deref, DerefMut};

/// Errors raised by misuse of the buffer protocol
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BufferError {
    /// A read was attempted after every character was consumed
    #[error("unable to read character at position {position}: all characters have been consumed")]
    OutOfBounds { position: usize },

    /// The character at the cursor was not the one expected
    #[error("unable to consume '{expected}' at position {position} (found {found:?})")]
    ConsumptionMismatch {
        expected: char,
        found: Option<char>,
        position: usize,
    },
}

/// Character cursor with checkpoint/rollback support
#[derive(Debug, Clone)]
pub struct InputBuffer {
    characters: Vec<char>,
    position: usize,
    checkpoints: Vec<usize>,
}

impl InputBuffer {
    /// Create a buffer positioned at the first character of `input`
    pub fn new(input: &str) -> Self {
        Self {
            characters: input.chars().collect(),
            position: 0,
            checkpoints: Vec::new(),
        }
    }

    /// Current cursor position, in characters
    pub fn position(&self) -> usize {
        self.position
    }

    /// Number of characters in the underlying input
    pub fn len(&self) -> usize {
        self.characters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.characters.is_empty()
    }

    /// Number of checkpoints currently held
    pub fn checkpoint_depth(&self) -> usize {
        self.checkpoints.len()
    }

    /// Whether another character is available
    pub fn has_next(&self) -> bool {
        self.position < self.characters.len()
    }

    /// Read the next character without consuming it
    pub fn peek(&self) -> Result<char, BufferError> {
        self.characters
            .get(self.position)
            .copied()
            .ok_or(BufferError::OutOfBounds {
                position: self.position,
            })
    }

    /// Read up to `count` characters starting `offset` characters past the
    /// cursor. Returns a shorter (possibly empty) slice near the end of input.
    pub fn peek_ahead(&self, offset: usize, count: usize) -> &[char] {
        let start = (self.position + offset).min(self.characters.len());
        let end = (start + count).min(self.characters.len());
        &self.characters[start..end]
    }

    /// Consume `expected`, failing if the next character differs
    pub fn consume(&mut self, expected: char) -> Result<(), BufferError> {
        match self.characters.get(self.position) {
            Some(&c) if c == expected => {
                self.position += 1;
                Ok(())
            }
            found => Err(BufferError::ConsumptionMismatch {
                expected,
                found: found.copied(),
                position: self.position,
            }),
        }
    }

    /// Consume `expected` if it is the next character
    pub fn try_consume(&mut self, expected: char) -> bool {
        self.consume(expected).is_ok()
    }

    /// Consume `expected` if present; always succeeds
    pub fn optionally_consume(&mut self, expected: char) -> bool {
        self.try_consume(expected);
        true
    }

    /// Consume and return the next character
    pub fn next(&mut self) -> Result<char, BufferError> {
        let c = self.peek()?;
        self.consume(c)?;
        Ok(c)
    }

    /// Whether the next character satisfies `predicate`. False at end of input.
    pub fn matches<F>(&self, predicate: F) -> bool
    where
        F: FnOnce(char) -> bool,
    {
        self.peek().map(predicate).unwrap_or(false)
    }

    pub fn is_digit(&self) -> bool {
        self.matches(|c| c.is_ascii_digit())
    }

    pub fn is_letter(&self) -> bool {
        self.matches(char::is_alphabetic)
    }

    pub fn is_whitespace(&self) -> bool {
        self.matches(char::is_whitespace)
    }

    /// Unconsumed input from the cursor to the end
    pub fn remaining(&self) -> String {
        self.characters[self.position..].iter().collect()
    }

    /// Save the current position. The returned guard rewinds on drop unless
    /// committed.
    pub fn checkpoint(&mut self) -> Checkpoint<'_> {
        self.checkpoints.push(self.position);
        let depth = self.checkpoints.len();
        let saved_position = self.position;
        Checkpoint {
            buffer: self,
            depth,
            saved_position,
            committed: false,
        }
    }
}

/// Scoped checkpoint over an [`InputBuffer`]
///
/// Released in strict LIFO order. Dropping a guard that is not the top of
/// the checkpoint stack panics.
#[derive(Debug)]
pub struct Checkpoint<'a> {
    buffer: &'a mut InputBuffer,
    depth: usize,
    saved_position: usize,
    committed: bool,
}

impl Checkpoint<'_> {
    /// Keep every advance made since the checkpoint was taken
    pub fn commit(mut self) {
        self.committed = true;
    }
}

impl Deref for Checkpoint<'_> {
    type Target = InputBuffer;

    fn deref(&self) -> &InputBuffer {
        self.buffer
    }
}

impl DerefMut for Checkpoint<'_> {
    fn deref_mut(&mut self) -> &mut InputBuffer {
        self.buffer
    }
}

impl Drop for Checkpoint<'_> {
    fn drop(&mut self) {
        let held = self.buffer.checkpoints.len();
        if held != self.depth && !std::thread::panicking() {
            panic!(
                "checkpoint released out of order: releasing depth {} while {} checkpoint(s) are held",
                self.depth, held
            );
        }

        self.buffer.checkpoints.truncate(self.depth - 1);
        if !self.committed {
            self.buffer.position = self.saved_position;
        }
    }
}
