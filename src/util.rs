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

//! Crate-private utilities.

use std::num::ParseIntError;

/// Defines constants for a `u16` newtype (such as
/// [`Type`](crate::rr::Type)) along with the mnemonic table used to
/// parse and display them.
macro_rules! define_mnemonics {
    ($ty:ident { $($name:ident = $value:expr, $mnemonic:expr;)* }) => {
        impl $ty {
            $(pub const $name: $ty = $ty($value);)*

            /// Returns the mnemonic for a known value.
            fn mnemonic(self) -> Option<&'static str> {
                match self {
                    $(Self::$name => Some($mnemonic),)*
                    _ => None,
                }
            }

            /// Looks up a value by its mnemonic, ignoring ASCII case.
            fn from_mnemonic(text: &str) -> Option<Self> {
                $(
                    if $crate::util::Caseless(text) == $crate::util::Caseless($mnemonic) {
                        return Some(Self::$name);
                    }
                )*
                None
            }
        }
    };
}

/// Parses the generic presentation form of [RFC 3597 § 5], i.e.
/// `prefix` (in any case) followed by a decimal `u16`. Returns [`None`]
/// if `text` does not start with `prefix`.
///
/// [RFC 3597 § 5]: https://datatracker.ietf.org/doc/html/rfc3597#section-5
pub fn parse_generic(text: &str, prefix: &str) -> Option<Result<u16, ParseIntError>> {
    let head = text.get(..prefix.len())?;
    if head.eq_ignore_ascii_case(prefix) {
        Some(text[prefix.len()..].parse())
    } else {
        None
    }
}

/// A wrapper around [`str`] references whose [`PartialEq`] and [`Eq`]
/// implementations are ASCII-case-insensitive.
pub struct Caseless<'a>(pub &'a str);

impl PartialEq for Caseless<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.0.eq_ignore_ascii_case(other.0)
    }
}

impl Eq for Caseless<'_> {}

/// Splits presentation-format text into whitespace-separated fields.
/// A field starting with a double quote runs to the matching closing
/// quote and may contain whitespace; the quotes are kept so that
/// callers can tell quoted strings apart. Inside quotes a backslash
/// escapes the next character. Returns [`None`] if a quote is left
/// unterminated.
pub fn split_fields(text: &str) -> Option<Vec<&str>> {
    let mut fields = Vec::new();
    let mut rest = text.trim_start();
    while !rest.is_empty() {
        let end = if rest.starts_with('"') {
            closing_quote(rest.as_bytes())? + 1
        } else {
            rest.find(char::is_whitespace).unwrap_or(rest.len())
        };
        fields.push(&rest[..end]);
        rest = rest[end..].trim_start();
    }
    Some(fields)
}

/// Finds the index of the quote closing the one at index 0.
fn closing_quote(octets: &[u8]) -> Option<usize> {
    let mut i = 1;
    while i < octets.len() {
        match octets[i] {
            b'\\' => i += 2,
            b'"' => return Some(i),
            _ => i += 1,
        }
    }
    None
}
