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

//! Implementation of the [`CompressionTable`] used by
//! [`MessageRender`](super::MessageRender).

/// The value returned by [`CompressionTable::find_offset`] on a miss.
pub const NO_OFFSET: u16 = 65535;

/// The largest offset a compression pointer can hold.
pub const POINTER_MAX: usize = 0x3fff;

const BUCKETS: usize = 64;
const RESERVED_ENTRIES: usize = 16;

/// One previously written name suffix: its hash, where it starts in the
/// output, and its uncompressed length.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct Entry {
    hash: u32,
    pos: u16,
    len: u16,
}

/// An index of the names written so far into a message, used to find
/// targets for compression pointers.
///
/// Entries are bucketed by hash and only ever appended; lookups scan a
/// bucket from the newest entry to the oldest. The table stores offsets
/// into the output buffer, not references, so each lookup is checked
/// against the buffer's current contents.
#[derive(Clone, Debug)]
pub struct CompressionTable {
    buckets: Vec<Vec<Entry>>,
}

impl CompressionTable {
    pub fn new() -> Self {
        Self {
            buckets: (0..BUCKETS)
                .map(|_| Vec::with_capacity(RESERVED_ENTRIES))
                .collect(),
        }
    }

    /// Forgets every entry.
    pub fn clear(&mut self) {
        for bucket in &mut self.buckets {
            bucket.clear();
        }
    }

    /// Forgets every entry at or after `pos`, for when the output has
    /// been trimmed back to `pos` octets.
    pub fn forget_from(&mut self, pos: usize) {
        for bucket in &mut self.buckets {
            bucket.retain(|entry| (entry.pos as usize) < pos);
        }
    }

    /// Returns the total number of entries.
    pub fn len(&self) -> usize {
        self.buckets.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Records that a name suffix with the given hash and uncompressed
    /// length was written at `pos`.
    pub fn add_offset(&mut self, hash: u32, pos: u16, len: u16) {
        self.buckets[bucket_index(hash)].push(Entry { hash, pos, len });
    }

    /// Finds where an earlier copy of `suffix` (an uncompressed
    /// on-the-wire name) was written in `output`, or returns
    /// [`NO_OFFSET`].
    pub fn find_offset(
        &self,
        output: &[u8],
        suffix: &[u8],
        hash: u32,
        case_sensitive: bool,
    ) -> u16 {
        self.buckets[bucket_index(hash)]
            .iter()
            .rev()
            .find(|entry| {
                entry.hash == hash
                    && entry.len as usize == suffix.len()
                    && matches_at(output, entry.pos as usize, suffix, case_sensitive)
            })
            .map_or(NO_OFFSET, |entry| entry.pos)
    }
}

impl Default for CompressionTable {
    fn default() -> Self {
        Self::new()
    }
}

fn bucket_index(hash: u32) -> usize {
    hash as usize % BUCKETS
}

/// Compares the name written at `pos` in `output` (following any
/// pointers it contains) against the uncompressed `suffix`. A pointer
/// that does not point strictly backward fails the match.
fn matches_at(output: &[u8], mut pos: usize, suffix: &[u8], case_sensitive: bool) -> bool {
    let mut index = 0;
    loop {
        let len = match output.get(pos) {
            Some(len) => *len,
            None => return false,
        };
        if len & 0xc0 == 0xc0 {
            let target = match output.get(pos + 1) {
                Some(low) => ((len as usize & 0x3f) << 8) | *low as usize,
                None => return false,
            };
            if target >= pos {
                return false;
            }
            pos = target;
            continue;
        }

        let end = pos + len as usize + 1;
        let (written, wanted) = match (output.get(pos..end), suffix.get(index..index + end - pos)) {
            (Some(written), Some(wanted)) => (written, wanted),
            _ => return false,
        };
        let equal = if case_sensitive {
            written == wanted
        } else {
            written.eq_ignore_ascii_case(wanted)
        };
        if !equal {
            return false;
        } else if len == 0 {
            return index + 1 == suffix.len();
        }
        index += end - pos;
        pos = end;
    }
}

////////////////////////////////////////////////////////////////////////
// TESTS                                                              //
////////////////////////////////////////////////////////////////////////
