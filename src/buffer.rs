// Copyright 2021 Matthew Ingwersen.
//
// Licensed under the Apache License, Version 2.0 (the "License"); you
// may not use this file except in compliance with the License. You may
// obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or
// implied. See the License for the specific language governing
// permissions and limitations under the License.

//! Bounds-checked cursors for reading and writing on-the-wire data.
//!
//! [`InputBuffer`] reads big-endian integers and octet runs from a
//! borrowed slice; [`OutputBuffer`] appends them to an owned, growing
//! buffer. Neither ever panics on bad positions: every operation that
//! could go out of range returns an [`Error`] instead.

use std::fmt;

////////////////////////////////////////////////////////////////////////
// INPUT BUFFERS                                                      //
////////////////////////////////////////////////////////////////////////

/// A read cursor over an on-the-wire DNS message.
///
/// The cursor starts at the beginning of the slice. Failed reads leave
/// the cursor where it was.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InputBuffer<'a> {
    octets: &'a [u8],
    position: usize,
}

impl<'a> InputBuffer<'a> {
    /// Creates a new `InputBuffer` positioned at the start of `octets`.
    pub fn new(octets: &'a [u8]) -> Self {
        Self {
            octets,
            position: 0,
        }
    }

    /// Returns the entire underlying buffer, regardless of the cursor.
    pub fn data(&self) -> &'a [u8] {
        self.octets
    }

    /// Returns the total length of the underlying buffer.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.octets.len()
    }

    /// Returns the current cursor position.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Moves the cursor to `position`, which may be at most the length
    /// of the buffer.
    pub fn set_position(&mut self, position: usize) -> Result<()> {
        if position > self.octets.len() {
            Err(Error::OutOfRange)
        } else {
            self.position = position;
            Ok(())
        }
    }

    /// Returns the number of octets after the cursor.
    pub fn remaining(&self) -> usize {
        self.octets.len() - self.position
    }

    /// Advances the cursor by `n` octets.
    pub fn skip(&mut self, n: usize) -> Result<()> {
        self.read_bytes(n).map(|_| ())
    }

    /// Reads `n` octets at the cursor.
    pub fn read_bytes(&mut self, n: usize) -> Result<&'a [u8]> {
        if self.remaining() < n {
            Err(Error::UnexpectedEnd)
        } else {
            let start = self.position;
            self.position += n;
            Ok(&self.octets[start..self.position])
        }
    }

    /// Reads a single octet.
    pub fn read_u8(&mut self) -> Result<u8> {
        self.read_bytes(1).map(|octets| octets[0])
    }

    /// Reads a 16-bit integer in network byte order.
    pub fn read_u16(&mut self) -> Result<u16> {
        self.read_bytes(2)
            .map(|octets| u16::from_be_bytes([octets[0], octets[1]]))
    }

    /// Reads a 32-bit integer in network byte order.
    pub fn read_u32(&mut self) -> Result<u32> {
        self.read_bytes(4)
            .map(|octets| u32::from_be_bytes([octets[0], octets[1], octets[2], octets[3]]))
    }
}

////////////////////////////////////////////////////////////////////////
// OUTPUT BUFFERS                                                     //
////////////////////////////////////////////////////////////////////////

/// A growing buffer into which on-the-wire data is written.
///
/// Appending never fails. Random access ([`OutputBuffer::at`],
/// [`OutputBuffer::write_u16_at`]) and [`OutputBuffer::trim`] are
/// limited to the region that has already been written.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct OutputBuffer {
    octets: Vec<u8>,
}

impl OutputBuffer {
    /// Creates an empty `OutputBuffer` with room for `capacity` octets
    /// before reallocating.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            octets: Vec::with_capacity(capacity),
        }
    }

    /// Returns the data written so far.
    pub fn data(&self) -> &[u8] {
        &self.octets
    }

    /// Returns the number of octets written so far.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.octets.len()
    }

    /// Discards everything written so far.
    pub fn clear(&mut self) {
        self.octets.clear();
    }

    /// Consumes the `OutputBuffer`, returning the written data.
    pub fn into_vec(self) -> Vec<u8> {
        self.octets
    }

    /// Returns the octet at `position`.
    pub fn at(&self, position: usize) -> Result<u8> {
        self.octets.get(position).copied().ok_or(Error::OutOfRange)
    }

    /// Appends `n` zero octets, typically to be filled in later with
    /// [`OutputBuffer::write_u16_at`].
    pub fn skip(&mut self, n: usize) {
        self.octets.resize(self.octets.len() + n, 0);
    }

    /// Removes the last `n` octets.
    pub fn trim(&mut self, n: usize) -> Result<()> {
        if n > self.octets.len() {
            Err(Error::OutOfRange)
        } else {
            self.octets.truncate(self.octets.len() - n);
            Ok(())
        }
    }

    pub fn write_u8(&mut self, value: u8) {
        self.octets.push(value);
    }

    pub fn write_u16(&mut self, value: u16) {
        self.octets.extend_from_slice(&value.to_be_bytes());
    }

    pub fn write_u32(&mut self, value: u32) {
        self.octets.extend_from_slice(&value.to_be_bytes());
    }

    pub fn write_data(&mut self, data: &[u8]) {
        self.octets.extend_from_slice(data);
    }

    /// Overwrites the two octets at `position` with `value` in network
    /// byte order. Both octets must already have been written.
    pub fn write_u16_at(&mut self, value: u16, position: usize) -> Result<()> {
        match position.checked_add(2) {
            Some(end) if end <= self.octets.len() => {
                self.octets[position..end].copy_from_slice(&value.to_be_bytes());
                Ok(())
            }
            _ => Err(Error::OutOfRange),
        }
    }
}

////////////////////////////////////////////////////////////////////////
// ERRORS                                                             //
////////////////////////////////////////////////////////////////////////

/// An error signaling that a buffer operation went out of bounds.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Error {
    /// A read needed more octets than remain in the buffer.
    UnexpectedEnd,

    /// A position lies outside the valid region of the buffer.
    OutOfRange,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Self::UnexpectedEnd => f.write_str("unexpected end of data"),
            Self::OutOfRange => f.write_str("position out of range"),
        }
    }
}

impl std::error::Error for Error {}

/// The type returned by fallible buffer operations.
pub type Result<T> = std::result::Result<T, Error>;

////////////////////////////////////////////////////////////////////////
// TESTS                                                              //
////////////////////////////////////////////////////////////////////////
