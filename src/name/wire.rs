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

//! Parsing of (possibly compressed) on-the-wire names.

use arrayvec::ArrayVec;

use super::{Error, Name, MAX_LABEL_LEN, MAX_N_LABELS, MAX_WIRE_LEN};

/// Parses a name starting at index `start` of `octets`. Pointers are
/// followed when `allow_compression` is set and rejected otherwise.
/// Indices given in pointers are treated as indices of `octets`, so the
/// whole message should be passed in `octets`.
///
/// On success, returns the name and the number of octets it occupies
/// at `start` (that is, up to and including the first pointer or the
/// terminating null label).
pub fn parse_name(
    octets: &[u8],
    start: usize,
    allow_compression: bool,
) -> Result<(Name, usize), Error> {
    let mut next_chunk = Some(start);
    let mut first_chunk_len = None;

    let mut offsets = ArrayVec::<u8, MAX_N_LABELS>::new();
    let mut wire = ArrayVec::<u8, MAX_WIRE_LEN>::new();

    while let Some(chunk_start) = next_chunk {
        let mut index = chunk_start;

        loop {
            let len = *octets.get(index).ok_or(Error::UnexpectedEom)?;
            if len & 0xc0 == 0xc0 {
                if !allow_compression {
                    return Err(Error::InvalidPointer);
                }
                next_chunk = Some(parse_pointer(octets, chunk_start, index)?);
                index += 2;
                break;
            } else if len as usize > MAX_LABEL_LEN {
                return Err(Error::LabelTooLong);
            }

            let end_of_label = index + len as usize + 1;
            let label = octets.get(index..end_of_label).ok_or(Error::UnexpectedEom)?;
            offsets
                .try_push(wire.len() as u8)
                .map_err(|_| Error::NameTooLong)?;
            wire.try_extend_from_slice(label)
                .map_err(|_| Error::NameTooLong)?;
            index = end_of_label;
            if len == 0 {
                next_chunk = None;
                break;
            }
        }

        first_chunk_len.get_or_insert(index - chunk_start);
    }

    let consumed = first_chunk_len.unwrap_or_default();
    Ok((Name::from_parts(&wire, &offsets), consumed))
}

/// Parses a pointer at `index` in `octets`, checking that it refers to
/// an index strictly before the chunk it appears in (`chunk_start`).
fn parse_pointer(octets: &[u8], chunk_start: usize, index: usize) -> Result<usize, Error> {
    match octets.get(index..index + 2) {
        Some(&[high, low]) => {
            let pointer = (u16::from_be_bytes([high, low]) & 0x3fff) as usize;

            // Pointers refer to a *prior* occurrence of a name (RFC
            // 1035 § 4.1.4), which also rules out loops.
            if pointer >= chunk_start {
                Err(Error::InvalidPointer)
            } else {
                Ok(pointer)
            }
        }
        _ => Err(Error::UnexpectedEom),
    }
}

////////////////////////////////////////////////////////////////////////
// TESTS                                                              //
////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::*;

    fn name(s: &str) -> Name {
        s.parse().unwrap()
    }

    #[test]
    fn parse_name_accepts_uncompressed_names() {
        let octets = b"junk\x07example\x04test\x00junk";
        assert_eq!(
            parse_name(octets, 4, false),
            Ok((name("example.test."), 14))
        );
    }

    #[test]
    fn parse_name_follows_pointers() {
        let octets = b"junk\x04test\x00junk\x07example\xc0\x04junk";
        assert_eq!(parse_name(octets, 14, true), Ok((name("example.test."), 10)));
    }

    #[test]
    fn parse_name_follows_chained_pointers() {
        let octets = b"\x02cn\x00\x04knet\xc0\x00\x03www\xc0\x04";
        assert_eq!(parse_name(octets, 11, true), Ok((name("www.knet.cn."), 6)));
    }

    #[test]
    fn parse_name_rejects_pointers_when_compression_disallowed() {
        let octets = b"\x04test\x00\x07example\xc0\x00";
        assert_eq!(parse_name(octets, 6, false), Err(Error::InvalidPointer));
    }

    #[test]
    fn parse_name_rejects_long_label() {
        let mut octets = vec![0x40];
        octets.extend_from_slice(&[b'x'; 64]);
        octets.push(0);
        assert_eq!(parse_name(&octets, 0, true), Err(Error::LabelTooLong));
    }

    #[test]
    fn parse_name_rejects_long_name_with_pointers() {
        let mut octets = Vec::new();
        for _ in 0..100 {
            octets.extend_from_slice(b"\x01x");
        }
        octets.push(0);
        let start = octets.len();
        for _ in 0..30 {
            octets.extend_from_slice(b"\x01y");
        }
        octets.extend_from_slice(b"\xc0\x00");
        assert_eq!(parse_name(&octets, start, true), Err(Error::NameTooLong));
    }

    #[test]
    fn parse_name_rejects_unexpected_eom() {
        assert_eq!(
            parse_name(b"\x07example\x04tes", 0, true),
            Err(Error::UnexpectedEom)
        );
        assert_eq!(
            parse_name(b"\x07example", 0, true),
            Err(Error::UnexpectedEom)
        );
        assert_eq!(parse_name(b"\x01a\xc0", 0, true), Err(Error::UnexpectedEom));
        assert_eq!(parse_name(b"", 0, true), Err(Error::UnexpectedEom));
    }

    #[test]
    fn parse_name_rejects_self_pointers() {
        assert_eq!(parse_name(b"\xc0\x00", 0, true), Err(Error::InvalidPointer));
        assert_eq!(
            parse_name(b"\x01a\x01b\xc0\x00", 2, true),
            Err(Error::InvalidPointer),
        );
    }

    #[test]
    fn parse_name_rejects_forward_pointers() {
        assert_eq!(
            parse_name(b"\x01x\xc0\x08junk\x00", 0, true),
            Err(Error::InvalidPointer),
        );
    }
}
