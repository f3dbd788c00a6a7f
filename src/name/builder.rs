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

//! Implementation of the [`NameBuilder`] structure.

use arrayvec::ArrayVec;

use super::{Error, Name, MAX_LABEL_LEN, MAX_N_LABELS, MAX_WIRE_LEN};

/// A facility to build [`Name`]s label by label.
///
/// The `NameBuilder` accumulates the on-the-wire representation and
/// label offsets of a [`Name`] in fixed-size stack buffers large
/// enough for any valid name, so that only the finished name touches
/// the heap. It backs the [`FromStr`](std::str::FromStr) implementation
/// as well as [`Name::concat`] and [`Name::reverse`].
///
/// A new `NameBuilder` starts with a single null label. If the build is
/// finished at this point, the root name is constructed:
///
/// ```
/// use dnsmsg::name::{Name, NameBuilder};
/// assert_eq!(&NameBuilder::new().finish().unwrap(), Name::root());
/// ```
///
/// Octets are added to the current label with
/// [`NameBuilder::try_push`] and [`NameBuilder::try_push_slice`]; a new
/// label is started with [`NameBuilder::next_label`]. Any call that
/// would produce an invalid name fails and leaves the builder as it
/// was.
///
/// ```
/// use dnsmsg::name::{Name, NameBuilder};
/// let mut builder = NameBuilder::new();
/// builder.try_push_slice(b"www").unwrap();
/// builder.next_label().unwrap();
/// builder.try_push_slice(b"knet").unwrap();
/// let suffix: Name = "cn.".parse().unwrap();
/// let name = builder.finish_with_suffix(&suffix).unwrap();
/// assert_eq!(name, "www.knet.cn.".parse().unwrap());
/// ```
pub struct NameBuilder {
    wire: ArrayVec<u8, MAX_WIRE_LEN>,
    offsets: ArrayVec<u8, MAX_N_LABELS>,
    label_start: usize,
    label_len: u8,
}

impl NameBuilder {
    /// Constructs a new `NameBuilder`, which initially contains a
    /// single null label.
    pub fn new() -> Self {
        let mut wire = ArrayVec::new();
        wire.push(0);
        let mut offsets = ArrayVec::new();
        offsets.push(0);
        Self {
            wire,
            offsets,
            label_start: 0,
            label_len: 0,
        }
    }

    /// Determines whether the name currently stored in the
    /// `NameBuilder` ends with the null label.
    pub fn is_fully_qualified(&self) -> bool {
        self.label_len == 0
    }

    /// Tries to add the given octet to the current label.
    pub fn try_push(&mut self, octet: u8) -> Result<(), Error> {
        if self.label_len as usize >= MAX_LABEL_LEN {
            Err(Error::LabelTooLong)
        } else if self.wire.try_push(octet).is_ok() {
            self.label_len += 1;
            Ok(())
        } else {
            Err(Error::NameTooLong)
        }
    }

    /// Tries to add the given octets to the current label.
    pub fn try_push_slice(&mut self, octets: &[u8]) -> Result<(), Error> {
        if self.label_len as usize + octets.len() > MAX_LABEL_LEN {
            Err(Error::LabelTooLong)
        } else if self.wire.try_extend_from_slice(octets).is_ok() {
            self.label_len += octets.len() as u8;
            Ok(())
        } else {
            Err(Error::NameTooLong)
        }
    }

    /// Writes the length of the current label into its length octet.
    fn update_label_len(&mut self) {
        self.wire[self.label_start] = self.label_len;
    }

    /// Finishes the current label and starts a new one. This fails if
    /// the current label is null (only the last label may be null) or
    /// if there is no room left for another label.
    pub fn next_label(&mut self) -> Result<(), Error> {
        if self.is_fully_qualified() {
            Err(Error::NullNonTerminal)
        } else if self.wire.is_full() {
            Err(Error::NameTooLong)
        } else {
            self.update_label_len();
            self.label_start = self.wire.len();
            self.label_len = 0;

            // Every label before this one has at least two octets, so
            // a wire form that fits also fits its offsets.
            self.wire.push(0);
            self.offsets.push(self.label_start as u8);
            Ok(())
        }
    }

    /// Finishes construction, returning the [`Name`]. The last label
    /// must be null.
    pub fn finish(self) -> Result<Name, Error> {
        if !self.is_fully_qualified() {
            Err(Error::NonNullTerminal)
        } else {
            Ok(Name::from_parts(&self.wire, &self.offsets))
        }
    }

    /// Finishes the current label and then appends the labels of
    /// `suffix`. The current label must not be null.
    pub fn finish_with_suffix(mut self, suffix: &Name) -> Result<Name, Error> {
        if self.is_fully_qualified() {
            return Err(Error::NullNonTerminal);
        }
        self.update_label_len();
        let base = self.wire.len();
        self.wire
            .try_extend_from_slice(suffix.wire_repr())
            .map_err(|_| Error::NameTooLong)?;
        for offset in suffix.label_offsets() {
            self.offsets
                .try_push((base + *offset as usize) as u8)
                .map_err(|_| Error::NameTooLong)?;
        }
        Ok(Name::from_parts(&self.wire, &self.offsets))
    }
}

impl Default for NameBuilder {
    fn default() -> Self {
        Self::new()
    }
}

////////////////////////////////////////////////////////////////////////
// TESTS                                                              //
////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_label_by_label() {
        let mut builder = NameBuilder::new();
        for c in b"knet".iter() {
            builder.try_push(*c).unwrap();
        }
        builder.next_label().unwrap();
        builder.try_push_slice(b"cn").unwrap();
        builder.next_label().unwrap();
        let name = builder.finish().unwrap();
        assert_eq!(name.wire_repr(), b"\x04knet\x02cn\x00");
        assert_eq!(name.label_count(), 3);
    }

    #[test]
    fn finish_with_suffix_rebases_offsets() {
        let mut builder = NameBuilder::new();
        let suffix: Name = "knet.cn.".parse().unwrap();
        builder.try_push_slice(b"www").unwrap();
        let name = builder.finish_with_suffix(&suffix).unwrap();
        assert_eq!(name.wire_repr(), b"\x03www\x04knet\x02cn\x00");
        assert_eq!(name.label_offsets(), &[0, 4, 9, 12]);
    }

    #[test]
    fn finish_rejects_unterminated_name() {
        let mut builder = NameBuilder::new();
        builder.try_push(b'x').unwrap();
        assert_eq!(builder.finish().unwrap_err(), Error::NonNullTerminal);
    }

    #[test]
    fn finish_with_suffix_rejects_terminated_name() {
        let mut builder = NameBuilder::new();
        let suffix: Name = "cn.".parse().unwrap();
        builder.try_push(b'x').unwrap();
        builder.next_label().unwrap();
        assert_eq!(
            builder.finish_with_suffix(&suffix).unwrap_err(),
            Error::NullNonTerminal
        );
    }

    #[test]
    fn finish_with_suffix_rejects_long_result() {
        let mut builder = NameBuilder::new();
        for _ in 0..60 {
            builder.try_push_slice(b"xxx").unwrap();
            builder.next_label().unwrap();
        }
        builder.try_push_slice(b"x").unwrap();
        let suffix: Name = "abcdefghijklmnop.".parse().unwrap();
        assert_eq!(
            builder.finish_with_suffix(&suffix).unwrap_err(),
            Error::NameTooLong
        );
    }

    #[test]
    fn try_push_rejects_long_label() {
        let mut builder = NameBuilder::new();
        for _ in 0..MAX_LABEL_LEN {
            builder.try_push(b'x').unwrap();
        }
        assert_eq!(builder.try_push(b'x'), Err(Error::LabelTooLong));
    }

    #[test]
    fn try_push_rejects_long_name() {
        let mut builder = NameBuilder::new();
        for _ in 0..MAX_N_LABELS - 1 {
            builder.try_push(b'x').unwrap();
            builder.next_label().unwrap();
        }

        // Only the null label fits now.
        assert_eq!(builder.try_push(b'x'), Err(Error::NameTooLong));
    }

    #[test]
    fn next_label_rejects_null_non_terminal() {
        let mut builder = NameBuilder::new();
        assert_eq!(builder.next_label(), Err(Error::NullNonTerminal));
    }
}
