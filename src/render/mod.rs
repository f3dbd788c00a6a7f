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

//! Implementation of the [`MessageRender`] type to write on-the-wire
//! DNS messages with name compression.

use crate::buffer::{self, OutputBuffer};
use crate::name::{hash_wire, Name, MAX_N_LABELS};

mod compression;
pub use compression::{CompressionTable, NO_OFFSET, POINTER_MAX};

/// The default soft limit on message length (the classic UDP limit).
pub const DEFAULT_LEN_LIMIT: usize = 512;

/// How a [`MessageRender`] may (when allowed by the DNS standard)
/// compress domain names in a message.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum CompressionMode {
    /// Perform standard compression. Names are matched without regard
    /// to ASCII case.
    Standard,

    /// Perform case-preserving compression. This is recommended for
    /// AXFR; see [RFC 5936 § 3.4].
    ///
    /// [RFC 5936 § 3.4]: https://datatracker.ietf.org/doc/html/rfc5936#section-3.4
    CasePreserving,

    /// Do not compress domain names, even where the record format
    /// allows it. Note that [RFC 1123 § 6.1.2.4] requires name servers
    /// to use compression in responses.
    ///
    /// [RFC 1123 § 6.1.2.4]: https://datatracker.ietf.org/doc/html/rfc1123#section-6.1.2.4
    Disabled,
}

impl Default for CompressionMode {
    fn default() -> Self {
        Self::Standard
    }
}

/// A growing buffer that serializes a DNS message, compressing domain
/// names as it goes.
///
/// The renderer holds a soft length limit: writes never fail because of
/// it, but callers (see [`Message::render`](crate::message::Message::render))
/// compare the finished length against [`MessageRender::len_limit`] and
/// set the truncation flag. Names are registered in a
/// [`CompressionTable`] as they are written, so later occurrences of
/// the same suffix can be replaced with a pointer.
///
/// One `MessageRender` renders one message at a time; use
/// [`MessageRender::clear`] to reuse it.
pub struct MessageRender {
    buffer: OutputBuffer,
    truncated: bool,
    len_limit: usize,
    compression_mode: CompressionMode,
    table: CompressionTable,
    suffix_hashes: [u32; MAX_N_LABELS],
}

impl MessageRender {
    pub fn new() -> Self {
        Self {
            buffer: OutputBuffer::with_capacity(DEFAULT_LEN_LIMIT),
            truncated: false,
            len_limit: DEFAULT_LEN_LIMIT,
            compression_mode: CompressionMode::default(),
            table: CompressionTable::new(),
            suffix_hashes: [0; MAX_N_LABELS],
        }
    }

    /// Resets the renderer to its initial state: empty output, default
    /// length limit and compression mode, no truncation, and an empty
    /// compression table.
    pub fn clear(&mut self) {
        self.buffer.clear();
        self.truncated = false;
        self.len_limit = DEFAULT_LEN_LIMIT;
        self.compression_mode = CompressionMode::default();
        self.table.clear();
    }

    /// Returns the message written so far.
    pub fn data(&self) -> &[u8] {
        self.buffer.data()
    }

    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn len_limit(&self) -> usize {
        self.len_limit
    }

    pub fn set_len_limit(&mut self, len_limit: usize) {
        self.len_limit = len_limit;
    }

    pub fn is_truncated(&self) -> bool {
        self.truncated
    }

    pub fn set_truncated(&mut self) {
        self.truncated = true;
    }

    pub fn compression_mode(&self) -> CompressionMode {
        self.compression_mode
    }

    /// Sets how names are compressed. Compression is enabled and
    /// case-insensitive by default. Changing the mode in the middle of
    /// a message is allowed but rarely useful.
    pub fn set_compression_mode(&mut self, mode: CompressionMode) {
        self.compression_mode = mode;
    }

    /// Appends `n` zero octets, to be patched later with
    /// [`MessageRender::write_u16_at`].
    pub fn skip(&mut self, n: usize) {
        self.buffer.skip(n);
    }

    /// Removes the last `n` octets of output, along with any
    /// compression targets they held.
    pub fn trim(&mut self, n: usize) -> buffer::Result<()> {
        self.buffer.trim(n)?;
        self.table.forget_from(self.buffer.len());
        Ok(())
    }

    pub fn write_u8(&mut self, value: u8) {
        self.buffer.write_u8(value);
    }

    pub fn write_u16(&mut self, value: u16) {
        self.buffer.write_u16(value);
    }

    pub fn write_u32(&mut self, value: u32) {
        self.buffer.write_u32(value);
    }

    pub fn write_data(&mut self, data: &[u8]) {
        self.buffer.write_data(data);
    }

    pub fn write_u16_at(&mut self, value: u16, position: usize) -> buffer::Result<()> {
        self.buffer.write_u16_at(value, position)
    }

    /// Writes `name`. When `compress` is set (and compression is not
    /// disabled), the longest suffix of `name` already present in the
    /// message is replaced by a pointer to it. Every newly written
    /// suffix that starts at an offset a pointer can reach is then
    /// registered for later names, whether or not this name was
    /// compressed.
    pub fn write_name(&mut self, name: &Name, compress: bool) {
        let case_sensitive = self.compression_mode == CompressionMode::CasePreserving;
        let compress = compress && self.compression_mode != CompressionMode::Disabled;
        let n_labels = name.label_count();

        let mut n_uncompressed = 0;
        let mut pointer = NO_OFFSET;
        while n_uncompressed < n_labels {
            let suffix = name.wire_repr_from(n_uncompressed);
            if suffix.len() == 1 {
                // Only the root label remains; it is never compressed.
                n_uncompressed += 1;
                break;
            }
            let hash = hash_wire(suffix, case_sensitive);
            self.suffix_hashes[n_uncompressed] = hash;
            if compress {
                pointer = self
                    .table
                    .find_offset(self.buffer.data(), suffix, hash, case_sensitive);
                if pointer != NO_OFFSET {
                    break;
                }
            }
            n_uncompressed += 1;
        }

        let start = self.buffer.len();
        if pointer == NO_OFFSET {
            name.to_wire(&mut self.buffer);
        } else {
            let prefix_len = name.wire_len() - name.wire_repr_from(n_uncompressed).len();
            self.buffer.write_data(&name.wire_repr()[..prefix_len]);
            self.buffer.write_u16(0xc000 | pointer);
        }

        let mut offset = start;
        let mut suffix_len = name.wire_len();
        for (i, label) in name.labels().take(n_uncompressed).enumerate() {
            if label.is_null() || offset > POINTER_MAX {
                break;
            }
            self.table
                .add_offset(self.suffix_hashes[i], offset as u16, suffix_len as u16);
            offset += label.len() + 1;
            suffix_len -= label.len() + 1;
        }
    }
}

impl Default for MessageRender {
    fn default() -> Self {
        Self::new()
    }
}

////////////////////////////////////////////////////////////////////////
// TESTS                                                              //
////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use lazy_static::lazy_static;

    use super::*;

    lazy_static! {
        static ref WWW_KNET_CN: Name = "www.knet.cn.".parse().unwrap();
        static ref MAIL_KNET_CN: Name = "mail.knet.cn.".parse().unwrap();
    }

    #[test]
    fn repeated_name_becomes_pointer() {
        let mut render = MessageRender::new();
        render.write_name(&WWW_KNET_CN, true);
        render.write_name(&WWW_KNET_CN, true);
        assert_eq!(render.data(), b"\x03www\x04knet\x02cn\x00\xc0\x00");
    }

    #[test]
    fn shared_suffix_is_compressed() {
        let mut render = MessageRender::new();
        render.write_name(&WWW_KNET_CN, true);
        render.write_name(&MAIL_KNET_CN, true);
        assert_eq!(
            render.data(),
            b"\x03www\x04knet\x02cn\x00\x04mail\xc0\x04"
        );
    }

    #[test]
    fn names_written_with_pointers_are_registered() {
        let mut render = MessageRender::new();
        render.write_name(&WWW_KNET_CN, true);
        render.write_name(&MAIL_KNET_CN, true);
        render.write_name(&MAIL_KNET_CN, true);
        assert_eq!(&render.data()[20..], b"\xc0\x0d");
    }

    #[test]
    fn compression_is_smaller_than_plain_writes() {
        let mut compressed = MessageRender::new();
        let mut plain = MessageRender::new();
        for name in [&*WWW_KNET_CN, &*MAIL_KNET_CN, &*WWW_KNET_CN] {
            compressed.write_name(name, true);
            plain.write_name(name, false);
        }
        assert!(compressed.len() < plain.len());
        assert_eq!(plain.len(), 13 + 14 + 13);
    }

    #[test]
    fn standard_mode_ignores_case() {
        let mut render = MessageRender::new();
        render.write_name(&WWW_KNET_CN, true);
        render.write_name(&"WWW.KNET.CN.".parse().unwrap(), true);
        assert_eq!(&render.data()[13..], b"\xc0\x00");
    }

    #[test]
    fn case_preserving_mode_respects_case() {
        let mut render = MessageRender::new();
        render.set_compression_mode(CompressionMode::CasePreserving);
        render.write_name(&WWW_KNET_CN, true);
        render.write_name(&"WWW.knet.cn.".parse().unwrap(), true);
        assert_eq!(&render.data()[13..], b"\x03WWW\xc0\x04");
    }

    #[test]
    fn disabled_mode_never_emits_pointers() {
        let mut render = MessageRender::new();
        render.set_compression_mode(CompressionMode::Disabled);
        render.write_name(&WWW_KNET_CN, true);
        render.write_name(&WWW_KNET_CN, true);
        assert_eq!(render.len(), 26);
        assert_eq!(render.data()[..13], render.data()[13..]);
    }

    #[test]
    fn uncompressed_write_still_registers_offsets() {
        let mut render = MessageRender::new();
        render.write_name(&WWW_KNET_CN, false);
        render.write_name(&MAIL_KNET_CN, true);
        assert_eq!(&render.data()[13..], b"\x04mail\xc0\x04");
    }

    #[test]
    fn root_is_written_as_single_octet() {
        let mut render = MessageRender::new();
        render.write_name(Name::root(), true);
        render.write_name(Name::root(), true);
        assert_eq!(render.data(), b"\x00\x00");
    }

    #[test]
    fn offsets_beyond_pointer_range_are_not_registered() {
        let mut render = MessageRender::new();
        render.skip(POINTER_MAX + 1);
        render.write_name(&WWW_KNET_CN, true);
        render.write_name(&WWW_KNET_CN, true);
        assert_eq!(render.len(), POINTER_MAX + 1 + 26);
    }

    #[test]
    fn clear_resets_everything() {
        let mut render = MessageRender::new();
        render.set_len_limit(4096);
        render.set_truncated();
        render.set_compression_mode(CompressionMode::Disabled);
        render.write_name(&WWW_KNET_CN, true);
        render.clear();
        assert_eq!(render.len(), 0);
        assert_eq!(render.len_limit(), DEFAULT_LEN_LIMIT);
        assert!(!render.is_truncated());
        assert_eq!(render.compression_mode(), CompressionMode::Standard);
        render.write_name(&WWW_KNET_CN, true);
        assert_eq!(render.len(), 13);
    }

    #[test]
    fn write_u16_at_patches_length() {
        let mut render = MessageRender::new();
        render.skip(2);
        render.write_data(b"abc");
        render.write_u16_at(3, 0).unwrap();
        assert_eq!(render.data(), b"\x00\x03abc");
        assert!(render.write_u16_at(0, 4).is_err());
    }

    #[test]
    fn trim_forgets_compression_targets() {
        let mut render = MessageRender::new();
        render.write_name(&WWW_KNET_CN, true);
        render.write_name(&MAIL_KNET_CN, false);
        render.trim(14).unwrap();
        assert_eq!(render.len(), 13);
        render.skip(1);
        render.write_name(&MAIL_KNET_CN, true);
        assert_eq!(&render.data()[14..], b"\x04mail\xc0\x04");
        assert!(render.trim(100).is_err());
    }
}
