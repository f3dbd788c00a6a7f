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

//! Domain names: the [`Name`] type and friends.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::iter::FusedIterator;
use std::str::FromStr;

use lazy_static::lazy_static;

use crate::buffer::{InputBuffer, OutputBuffer};

mod builder;
mod compare;
mod error;
mod label;
mod wire;
pub use builder::NameBuilder;
pub use compare::{NameComparison, NameRelation};
pub use error::Error;
pub use label::Label;

/// The type returned by fallible name operations.
pub type Result<T> = std::result::Result<T, Error>;

/// The maximum number of labels in a domain name.
pub const MAX_N_LABELS: usize = 128;

/// The maximum length of the uncompressed on-the-wire representation of
/// a domain name.
pub const MAX_WIRE_LEN: usize = 255;

/// The maximum length of a label in a domain name (not including the
/// octet that provides the length).
pub const MAX_LABEL_LEN: usize = 63;

const FNV_OFFSET_BASIS: u32 = 0x811c_9dc5;
const FNV_PRIME: u32 = 0x0100_0193;

lazy_static! {
    static ref ROOT: Name = Name::from_parts(&[0], &[0]);
}

////////////////////////////////////////////////////////////////////////
// NAME STRUCTURE                                                     //
////////////////////////////////////////////////////////////////////////

/// A domain name.
///
/// `Name`s can be constructed in several ways:
///
/// * through the [`FromStr`] implementation;
/// * through a [`NameBuilder`];
/// * from (possibly compressed) on-the-wire names through
///   [`Name::from_wire`]; and
/// * from other names through the structural operations
///   ([`Name::split`], [`Name::concat`], and so on).
///
/// Internally, a `Name` holds its uncompressed on-the-wire
/// representation, as defined in [RFC 1035 § 3.1], and an array
/// giving the offset of each label within it. This follows the
/// representation used by the [NSD] authoritative nameserver. The
/// representation always ends with the null (root) label, and the
/// label count includes it: `www.knet.cn.` has four labels.
///
/// Equality, hashing, and ordering are ASCII-case-insensitive, while
/// case is preserved in the stored octets.
///
/// [NSD]: https://www.nlnetlabs.nl/projects/nsd/about/
/// [RFC 1035 § 3.1]: https://datatracker.ietf.org/doc/html/rfc1035#section-3.1
#[derive(Clone)]
pub struct Name {
    wire: Box<[u8]>,
    offsets: Box<[u8]>,
}

/// Private helpers.
impl Name {
    /// Assembles a `Name` from a wire representation and label offsets
    /// that the caller has already validated.
    fn from_parts(wire: &[u8], offsets: &[u8]) -> Self {
        Self {
            wire: wire.into(),
            offsets: offsets.into(),
        }
    }

    /// Returns the offset of the `n`th label in the on-the-wire
    /// representation, or the wire length when `n` is the label count.
    fn label_offset(&self, n: usize) -> usize {
        self.offsets
            .get(n)
            .map_or(self.wire.len(), |offset| *offset as usize)
    }

    fn label_offsets(&self) -> &[u8] {
        &self.offsets
    }

    /// Builds the name made of labels `first..first + count`, none of
    /// which is the root label, followed by the root label.
    fn subname_with_root(&self, first: usize, count: usize) -> Self {
        let start = self.label_offset(first);
        let end = self.label_offset(first + count);
        let mut wire = Vec::with_capacity(end - start + 1);
        wire.extend_from_slice(&self.wire[start..end]);
        wire.push(0);
        let mut offsets: Vec<u8> = self.offsets[first..first + count]
            .iter()
            .map(|offset| offset - start as u8)
            .collect();
        offsets.push((end - start) as u8);
        Self {
            wire: wire.into(),
            offsets: offsets.into(),
        }
    }
}

impl Name {
    /// Returns the root name.
    pub fn root() -> &'static Name {
        &ROOT
    }

    /// Determines whether this is the root name.
    pub fn is_root(&self) -> bool {
        self.wire.len() == 1
    }

    /// Returns the number of labels in the name, including the null
    /// label.
    pub fn label_count(&self) -> usize {
        self.offsets.len()
    }

    /// Returns the length of the on-the-wire representation.
    pub fn wire_len(&self) -> usize {
        self.wire.len()
    }

    /// Returns the uncompressed on-the-wire representation.
    pub fn wire_repr(&self) -> &[u8] {
        &self.wire
    }

    /// Returns the on-the-wire representation of the suffix starting at
    /// label `n`.
    pub(crate) fn wire_repr_from(&self, n: usize) -> &[u8] {
        &self.wire[self.label_offset(n)..]
    }

    /// Returns an iterator over the labels of the name.
    pub fn labels(&self) -> Labels {
        Labels::new(self)
    }

    /// Returns the `n`th label of the name.
    pub fn label(&self, n: usize) -> Result<Label> {
        if n >= self.label_count() {
            return Err(Error::OutOfRange);
        }
        let start = self.label_offset(n) + 1;
        let len = self.wire[start - 1] as usize;
        Ok(Label::from_unchecked(&self.wire[start..start + len]))
    }

    /// Reads a name from `buffer` at its cursor. See
    /// [`wire::parse_name`] for the rules; on success the cursor is
    /// left just past the name (or past its first pointer).
    pub fn from_wire(buffer: &mut InputBuffer, allow_compression: bool) -> Result<Self> {
        let (name, consumed) = wire::parse_name(buffer.data(), buffer.position(), allow_compression)?;
        buffer.skip(consumed)?;
        Ok(name)
    }

    /// Writes the uncompressed on-the-wire representation to `buffer`.
    pub fn to_wire(&self, buffer: &mut OutputBuffer) {
        buffer.write_data(&self.wire);
    }

    /// Returns the textual form of the name, with the trailing dot
    /// omitted if `omit_final_dot` is set. The root is always `.`.
    pub fn to_text(&self, omit_final_dot: bool) -> String {
        let text = self.to_string();
        if omit_final_dot && !self.is_root() {
            text[..text.len() - 1].to_owned()
        } else {
            text
        }
    }

    /// Computes the 32-bit FNV-1a hash of the on-the-wire
    /// representation, folding ASCII case unless `case_sensitive` is
    /// set.
    pub fn hash(&self, case_sensitive: bool) -> u32 {
        hash_wire(&self.wire, case_sensitive)
    }

    /// Converts the name to lowercase in place.
    pub fn downcase(&mut self) {
        // Length octets are at most 63 and never fall in the ASCII
        // uppercase range, so the whole buffer can be folded at once.
        self.wire.make_ascii_lowercase();
    }

    /// Returns a lowercase copy of the name.
    pub fn to_lowercase(&self) -> Self {
        let mut lower = self.clone();
        lower.downcase();
        lower
    }

    ////////////////////////////////////////////////////////////////////
    // STRUCTURAL OPERATIONS                                          //
    ////////////////////////////////////////////////////////////////////

    /// Returns the name made of `count` labels starting at label
    /// `first`. The root label is appended if the range does not
    /// include it.
    pub fn split(&self, first: usize, count: usize) -> Result<Self> {
        let n_labels = self.label_count();
        if count == 0 || first >= n_labels || count > n_labels - first {
            Err(Error::OutOfRange)
        } else if first + count == n_labels {
            Ok(self.subname_with_root(first, count - 1))
        } else {
            Ok(self.subname_with_root(first, count))
        }
    }

    /// Removes `n` labels from the left. Removing every non-root label
    /// yields the root.
    pub fn strip_left(&self, n: usize) -> Result<Self> {
        if n >= self.label_count() {
            Err(Error::OutOfRange)
        } else {
            self.split(n, self.label_count() - n)
        }
    }

    /// Removes `n` non-root labels from the right, keeping the root.
    pub fn strip_right(&self, n: usize) -> Result<Self> {
        if n >= self.label_count() {
            Err(Error::OutOfRange)
        } else if n == self.label_count() - 1 {
            Ok(Name::root().clone())
        } else {
            self.split(0, self.label_count() - 1 - n)
        }
    }

    /// Returns the ancestor `level` steps up the tree.
    pub fn parent(&self, level: usize) -> Result<Self> {
        self.strip_left(level)
    }

    /// Returns this name with `suffix` appended in place of its root
    /// label.
    pub fn concat(&self, suffix: &Name) -> Result<Self> {
        if self.is_root() {
            return Ok(suffix.clone());
        }
        let mut builder = NameBuilder::new();
        let mut labels = self.labels().filter(|label| !label.is_null()).peekable();
        while let Some(label) = labels.next() {
            builder.try_push_slice(label.octets())?;
            if labels.peek().is_some() {
                builder.next_label()?;
            }
        }
        builder.finish_with_suffix(suffix)
    }

    /// Returns the name with its non-root labels in reverse order.
    pub fn reverse(&self) -> Result<Self> {
        let mut builder = NameBuilder::new();
        for label in self.labels().rev().filter(|label| !label.is_null()) {
            builder.try_push_slice(label.octets())?;
            builder.next_label()?;
        }
        builder.finish()
    }
}

/// Computes the 32-bit FNV-1a hash of on-the-wire octets, folding ASCII
/// case unless `case_sensitive` is set.
pub(crate) fn hash_wire(octets: &[u8], case_sensitive: bool) -> u32 {
    octets.iter().fold(FNV_OFFSET_BASIS, |hash, octet| {
        let octet = if case_sensitive {
            *octet
        } else {
            octet.to_ascii_lowercase()
        };
        (hash ^ octet as u32).wrapping_mul(FNV_PRIME)
    })
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.is_root() {
            f.write_str(".")
        } else {
            // The null label at the end produces the final dot.
            let mut labels = self.labels();
            if let Some(first) = labels.next() {
                first.fmt(f)?;
            }
            for label in labels {
                write!(f, ".{}", label)?;
            }
            Ok(())
        }
    }
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "\"{}\"", self)
    }
}

impl PartialEq for Name {
    fn eq(&self, other: &Self) -> bool {
        self.wire.eq_ignore_ascii_case(&other.wire)
    }
}

impl Eq for Name {}

impl PartialOrd for Name {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// The [`Ord`] implementation for `Name` employs DNSSEC's canonical
/// ordering of domain names. Per [RFC 4034 § 6.1], `Name`s are ordered
/// as strings of labels read from right to left.
///
/// [RFC 4034 § 6.1]: https://datatracker.ietf.org/doc/html/rfc4034#section-6.1
impl Ord for Name {
    fn cmp(&self, other: &Self) -> Ordering {
        self.compare(other, false).order
    }
}

impl Hash for Name {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for label in self.labels() {
            label.hash(state);
        }
    }
}

////////////////////////////////////////////////////////////////////////
// ITERATION OVER A NAME'S LABELS                                     //
////////////////////////////////////////////////////////////////////////

/// An iterator over the [`Label`]s in a [`Name`].
///
/// To use this iterator, construct one from a [`Name`] using
/// [`Name::labels`].
#[derive(Clone, Debug)]
pub struct Labels<'a> {
    name: &'a Name,
    front: usize,
    back: usize,
}

impl Labels<'_> {
    fn new(name: &Name) -> Labels {
        Labels {
            name,
            front: 0,
            back: name.label_count(),
        }
    }
}

impl<'a> Iterator for Labels<'a> {
    type Item = Label<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.front < self.back {
            self.front += 1;
            self.name.label(self.front - 1).ok()
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.back - self.front;
        (len, Some(len))
    }
}

impl DoubleEndedIterator for Labels<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.back > self.front {
            self.back -= 1;
            self.name.label(self.back).ok()
        } else {
            None
        }
    }
}

impl ExactSizeIterator for Labels<'_> {}

impl FusedIterator for Labels<'_> {}

////////////////////////////////////////////////////////////////////////
// PARSING OF NAMES FROM RUST STRINGS                                 //
////////////////////////////////////////////////////////////////////////

/// Allows for conversion of a Rust [`str`] into a [`Name`]. The passed
/// string must be strictly ASCII. Escape sequences as defined by
/// [RFC 4343 § 2.1] are supported. A missing final dot is implied.
///
/// [RFC 4343 § 2.1]: https://datatracker.ietf.org/doc/html/rfc4343#section-2.1
impl FromStr for Name {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        if s.is_empty() {
            return Err(Error::StrEmpty);
        } else if s == "." {
            return Ok(Name::root().clone());
        }

        let mut remaining_octets: &[u8] = s.as_ref();
        let mut builder = NameBuilder::new();

        // NOTE: to check that the string is ASCII, it suffices to check
        // that each octet is ASCII as we go. This is because all
        // multi-byte characters start with an octet that is not ASCII.
        while let Some(&octet) = remaining_octets.first() {
            if octet == b'\\' {
                let (value, consumed) = parse_escape(&remaining_octets[1..])?;
                builder.try_push(value)?;
                remaining_octets = &remaining_octets[consumed + 1..];
            } else if octet == b'.' {
                builder.next_label()?;
                remaining_octets = &remaining_octets[1..];
            } else if !octet.is_ascii() {
                return Err(Error::StrNotAscii);
            } else {
                builder.try_push(octet)?;
                remaining_octets = &remaining_octets[1..];
            }
        }
        if !builder.is_fully_qualified() {
            builder.next_label()?;
        }
        builder.finish()
    }
}

/// Parses an escape sequence. We expect `remaining_octets` to start
/// with the octet immediately *after* the backslash that introduces the
/// escape sequence.
fn parse_escape(remaining_octets: &[u8]) -> Result<(u8, usize)> {
    match remaining_octets {
        [] => Err(Error::InvalidEscape),
        [first, rest @ ..] if first.is_ascii_digit() => match rest {
            [second, third, ..] if second.is_ascii_digit() && third.is_ascii_digit() => {
                let value = 100 * (first - b'0') as usize
                    + 10 * (second - b'0') as usize
                    + (third - b'0') as usize;
                if value > 255 {
                    Err(Error::InvalidEscape)
                } else {
                    Ok((value as u8, 3))
                }
            }
            _ => Err(Error::InvalidEscape),
        },
        [first, ..] => Ok((*first, 1)),
    }
}

////////////////////////////////////////////////////////////////////////
// TESTS                                                              //
////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::hash_map::DefaultHasher;

    lazy_static! {
        static ref WWW_KNET_CN: Name = "www.knet.cn".parse().unwrap();
    }

    fn name(s: &str) -> Name {
        s.parse().unwrap()
    }

    fn std_hash(name: &Name) -> u64 {
        let mut hasher = DefaultHasher::new();
        Hash::hash(name, &mut hasher);
        hasher.finish()
    }

    #[test]
    fn root_has_expected_characteristics() {
        let root = Name::root();
        assert!(root.is_root());
        assert_eq!(root.label_count(), 1);
        assert_eq!(root.label_offsets(), &[0]);
        assert_eq!(root.wire_repr(), &[0]);
        assert_eq!(root.to_string(), ".");
    }

    #[test]
    fn label_count_includes_root() {
        assert_eq!(WWW_KNET_CN.label_count(), 4);
        assert_eq!(WWW_KNET_CN.wire_len(), 13);
        assert_eq!(WWW_KNET_CN.label(0).unwrap().octets(), b"www");
        assert!(WWW_KNET_CN.label(3).unwrap().is_null());
        assert_eq!(WWW_KNET_CN.label(4).unwrap_err(), Error::OutOfRange);
    }

    #[test]
    fn labels_iterator_works_both_ways() {
        let labels: Vec<String> = WWW_KNET_CN.labels().map(|l| l.to_string()).collect();
        assert_eq!(labels, ["www", "knet", "cn", ""]);
        let reversed: Vec<String> = WWW_KNET_CN.labels().rev().map(|l| l.to_string()).collect();
        assert_eq!(reversed, ["", "cn", "knet", "www"]);
    }

    #[test]
    fn split_works() {
        assert_eq!(WWW_KNET_CN.split(0, 1).unwrap().to_text(true), "www");
        assert_eq!(WWW_KNET_CN.split(0, 4).unwrap(), name("www.knet.cn"));
        assert_eq!(WWW_KNET_CN.split(1, 3).unwrap(), name("knet.cn"));
        assert_eq!(WWW_KNET_CN.split(1, 2).unwrap(), name("knet.cn"));
        assert_eq!(WWW_KNET_CN.split(3, 1).unwrap(), *Name::root());
    }

    #[test]
    fn split_rejects_bad_ranges() {
        assert_eq!(WWW_KNET_CN.split(0, 5), Err(Error::OutOfRange));
        assert_eq!(WWW_KNET_CN.split(4, 1), Err(Error::OutOfRange));
        assert_eq!(WWW_KNET_CN.split(2, 3), Err(Error::OutOfRange));
        assert_eq!(WWW_KNET_CN.split(1, 0), Err(Error::OutOfRange));
    }

    #[test]
    fn split_produces_consistent_offsets() {
        let middle = WWW_KNET_CN.split(1, 1).unwrap();
        assert_eq!(middle.wire_repr(), b"\x04knet\x00");
        assert_eq!(middle.label_offsets(), &[0, 5]);
    }

    #[test]
    fn parent_works() {
        assert_eq!(WWW_KNET_CN.parent(0).unwrap(), name("www.knet.cn"));
        assert_eq!(WWW_KNET_CN.parent(1).unwrap(), name("knet.cn"));
        assert_eq!(WWW_KNET_CN.parent(2).unwrap(), name("cn"));
        assert_eq!(WWW_KNET_CN.parent(3).unwrap(), *Name::root());
        assert_eq!(WWW_KNET_CN.parent(4), Err(Error::OutOfRange));
    }

    #[test]
    fn strip_left_works() {
        assert_eq!(WWW_KNET_CN.strip_left(1).unwrap(), name("knet.cn"));
        assert_eq!(WWW_KNET_CN.strip_left(2).unwrap(), name("cn"));
        assert_eq!(WWW_KNET_CN.strip_left(3).unwrap(), *Name::root());
        assert_eq!(WWW_KNET_CN.strip_left(4), Err(Error::OutOfRange));
    }

    #[test]
    fn strip_left_composes() {
        for a in 0..4 {
            for b in 0..4 - a {
                assert_eq!(
                    WWW_KNET_CN.strip_left(a).unwrap().strip_left(b).unwrap(),
                    WWW_KNET_CN.strip_left(a + b).unwrap()
                );
            }
        }
    }

    #[test]
    fn strip_right_works() {
        assert_eq!(WWW_KNET_CN.strip_right(1).unwrap(), name("www.knet"));
        assert_eq!(WWW_KNET_CN.strip_right(2).unwrap(), name("www"));
        assert_eq!(WWW_KNET_CN.strip_right(3).unwrap(), *Name::root());
        assert_eq!(WWW_KNET_CN.strip_right(4), Err(Error::OutOfRange));
    }

    #[test]
    fn concat_works() {
        let joined = name("www.knet").concat(&name("cn")).unwrap();
        let target = name("www.knet.Cn");
        assert_eq!(joined, target);
        assert_eq!(joined.compare(&target, false).common_label_count, 4);
        assert_eq!(Name::root().concat(&target).unwrap(), target);
        assert_eq!(target.concat(Name::root()).unwrap(), target);
    }

    #[test]
    fn concat_rejects_long_result() {
        let long = name(&["abcdefghijklmnopqrstuvwxyzabcdefghijklmnopqrstuvwxyz"; 4].join("."));
        assert_eq!(long.concat(&long), Err(Error::NameTooLong));
    }

    #[test]
    fn reverse_works() {
        assert_eq!(WWW_KNET_CN.reverse().unwrap().to_string(), "cn.knet.www.");
        assert_eq!(Name::root().reverse().unwrap(), *Name::root());
    }

    #[test]
    fn to_text_works() {
        assert_eq!(name("www").to_text(true), "www");
        assert_eq!(name("www").to_text(false), "www.");
        assert_eq!(Name::root().to_text(true), ".");
    }

    #[test]
    fn fnv_hash_distinguishes_suffixes() {
        let suffix = name("knet.cn");
        assert_ne!(WWW_KNET_CN.hash(false), suffix.hash(false));
        assert_eq!(WWW_KNET_CN.hash(false), name("WWW.Knet.CN").hash(false));
        assert_ne!(WWW_KNET_CN.hash(true), name("WWW.Knet.CN").hash(true));
    }

    #[test]
    fn equality_and_std_hash_ignore_case() {
        let mixed = name("WwW.KNET.cn.");
        assert_eq!(*WWW_KNET_CN, mixed);
        assert_eq!(std_hash(&WWW_KNET_CN), std_hash(&mixed));
        assert_eq!(mixed.wire_repr(), b"\x03WwW\x04KNET\x02cn\x00");
    }

    #[test]
    fn downcase_works() {
        let mut upper = name("UPPERCASE.Domain.Test.");
        let copy = upper.to_lowercase();
        upper.downcase();
        assert_eq!(upper.wire_repr(), b"\x09uppercase\x06domain\x04test\x00");
        assert_eq!(copy.wire_repr(), upper.wire_repr());
    }

    #[test]
    fn to_wire_writes_uncompressed_form() {
        let mut buffer = OutputBuffer::default();
        name("Mail.knet.cn").to_wire(&mut buffer);
        Name::root().to_wire(&mut buffer);
        assert_eq!(buffer.data(), b"\x04Mail\x04knet\x02cn\x00\x00");
    }

    #[test]
    fn from_wire_advances_past_first_chunk() {
        let octets = b"\x04test\x00\x07example\xc0\x00\xff";
        let mut buffer = InputBuffer::new(octets);
        buffer.set_position(6).unwrap();
        let parsed = Name::from_wire(&mut buffer, true).unwrap();
        assert_eq!(parsed, name("example.test."));
        assert_eq!(buffer.position(), 16);
    }

    #[test]
    fn from_wire_leaves_cursor_on_error() {
        let mut buffer = InputBuffer::new(b"\x03www\xc0\x00");
        assert_eq!(
            Name::from_wire(&mut buffer, true),
            Err(Error::InvalidPointer)
        );
        assert_eq!(buffer.position(), 0);
    }

    #[test]
    fn ord_works() {
        // This ordered list is from RFC 4034 § 6.1, which defines the
        // canonical ordering of domain names.
        let names: Vec<Name> = [
            "example.",
            "a.example.",
            "yljkjljk.a.example.",
            "Z.a.example.",
            "zABC.a.EXAMPLE.",
            "z.example.",
            "\\001.z.example.",
            "*.z.example.",
            "\\200.z.example.",
        ]
        .into_iter()
        .map(name)
        .collect();

        for (i, ni) in names.iter().enumerate() {
            for (j, nj) in names.iter().enumerate() {
                assert_eq!(i.cmp(&j), ni.cmp(nj));
            }
        }
    }

    #[test]
    fn fromstr_implies_final_dot() {
        assert_eq!(name("example.test").wire_repr(), b"\x07example\x04test\x00");
        assert_eq!(name("example.test."), name("example.test"));
    }

    #[test]
    fn fromstr_rejects_bad_input() {
        assert_eq!("".parse::<Name>(), Err(Error::StrEmpty));
        assert_eq!("✈.aero.".parse::<Name>(), Err(Error::StrNotAscii));
        assert_eq!("a.b..c.".parse::<Name>(), Err(Error::NullNonTerminal));
        assert_eq!("..".parse::<Name>(), Err(Error::NullNonTerminal));
        assert_eq!(
            "xxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxx.".parse::<Name>(),
            Err(Error::LabelTooLong)
        );
    }

    #[test]
    fn fromstr_escaping_works() {
        let escaped = name("\\000.\\\\\\..");
        assert_eq!(escaped.wire_repr(), b"\x01\x00\x02\\.\x00");
        assert_eq!(escaped.to_string(), "\\000.\\\\\\..");
    }

    #[test]
    fn fromstr_rejects_invalid_escapes() {
        assert_eq!("\\00".parse::<Name>(), Err(Error::InvalidEscape));
        assert_eq!("\\00x.".parse::<Name>(), Err(Error::InvalidEscape));
        assert_eq!("\\256.".parse::<Name>(), Err(Error::InvalidEscape));
        assert_eq!("a\\".parse::<Name>(), Err(Error::InvalidEscape));
    }
}
