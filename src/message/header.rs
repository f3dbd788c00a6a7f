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

//! Implementation of the DNS message [`Header`].

use std::fmt;

use super::{Error, Opcode, Rcode, Result};
use crate::buffer::InputBuffer;
use crate::render::MessageRender;

pub const HEADER_SIZE: usize = 12;

/// The bits of the flags word that hold single-bit flags.
pub const FLAG_MASK: u16 = 0x87f0;
pub const OPCODE_MASK: u16 = 0x7800;
pub const OPCODE_SHIFT: u16 = 11;
pub const RCODE_MASK: u16 = 0x000f;

////////////////////////////////////////////////////////////////////////
// FLAGS                                                              //
////////////////////////////////////////////////////////////////////////

/// A single-bit flag of the message header.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Flag {
    Qr,
    Aa,
    Tc,
    Rd,
    Ra,

    /// A private flag asking a recursive server to fetch fresh data.
    Fetch,

    Ad,
    Cd,
}

impl Flag {
    /// Every flag, in the order dig prints them.
    pub const ALL: [Flag; 8] = [
        Flag::Qr,
        Flag::Aa,
        Flag::Tc,
        Flag::Rd,
        Flag::Ra,
        Flag::Fetch,
        Flag::Ad,
        Flag::Cd,
    ];

    /// Returns the bit of the flag in the flags word.
    pub fn mask(self) -> u16 {
        match self {
            Flag::Qr => 0x8000,
            Flag::Aa => 0x0400,
            Flag::Tc => 0x0200,
            Flag::Rd => 0x0100,
            Flag::Ra => 0x0080,
            Flag::Fetch => 0x0040,
            Flag::Ad => 0x0020,
            Flag::Cd => 0x0010,
        }
    }

    fn mnemonic(self) -> &'static str {
        match self {
            Flag::Qr => "qr",
            Flag::Aa => "aa",
            Flag::Tc => "tc",
            Flag::Rd => "rd",
            Flag::Ra => "ra",
            Flag::Fetch => "fe",
            Flag::Ad => "ad",
            Flag::Cd => "cd",
        }
    }
}

////////////////////////////////////////////////////////////////////////
// HEADER                                                             //
////////////////////////////////////////////////////////////////////////

/// The fixed 12-octet header of a DNS message ([RFC 1035 § 4.1.1]).
///
/// The section counts are only meaningful right after decoding or
/// rendering; [`Message::render`](super::Message::render) recomputes
/// them from the sections it writes.
///
/// [RFC 1035 § 4.1.1]: https://datatracker.ietf.org/doc/html/rfc1035#section-4.1.1
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Header {
    pub id: u16,
    flags: u16,
    pub opcode: Opcode,
    pub rcode: Rcode,
    pub qdcount: u16,
    pub ancount: u16,
    pub nscount: u16,
    pub arcount: u16,
}

impl Default for Header {
    fn default() -> Self {
        Self {
            id: 0,
            flags: 0,
            opcode: Opcode::Query,
            rcode: Rcode::NoError,
            qdcount: 0,
            ancount: 0,
            nscount: 0,
            arcount: 0,
        }
    }
}

impl Header {
    pub fn flag(&self, flag: Flag) -> bool {
        self.flags & flag.mask() != 0
    }

    pub fn set_flag(&mut self, flag: Flag, set: bool) {
        if set {
            self.flags |= flag.mask();
        } else {
            self.flags &= !flag.mask();
        }
    }

    /// Clears the flags and section counts. The ID, opcode, and RCODE
    /// are kept.
    pub fn clear(&mut self) {
        self.flags = 0;
        self.qdcount = 0;
        self.ancount = 0;
        self.nscount = 0;
        self.arcount = 0;
    }

    /// Reads a header from `buffer`. Fails with
    /// [`Error::HeaderTooShort`] if fewer than 12 octets remain.
    pub fn from_wire(buffer: &mut InputBuffer) -> Result<Self> {
        if buffer.remaining() < HEADER_SIZE {
            return Err(Error::HeaderTooShort);
        }
        let id = buffer.read_u16()?;
        let word = buffer.read_u16()?;
        Ok(Self {
            id,
            flags: word & FLAG_MASK,
            opcode: Opcode::from_flags_word(word),
            rcode: Rcode::from_flags_word(word),
            qdcount: buffer.read_u16()?,
            ancount: buffer.read_u16()?,
            nscount: buffer.read_u16()?,
            arcount: buffer.read_u16()?,
        })
    }

    /// Returns the second 16-bit word of the header.
    pub fn flags_word(&self) -> u16 {
        let opcode = (u8::from(self.opcode) as u16) << OPCODE_SHIFT & OPCODE_MASK;
        let rcode = u8::from(self.rcode) as u16 & RCODE_MASK;
        opcode | rcode | (self.flags & FLAG_MASK)
    }

    pub fn render(&self, render: &mut MessageRender) {
        render.write_u16(self.id);
        render.write_u16(self.flags_word());
        render.write_u16(self.qdcount);
        render.write_u16(self.ancount);
        render.write_u16(self.nscount);
        render.write_u16(self.arcount);
    }
}

/// Formats the header the way dig does, over two lines.
impl fmt::Display for Header {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(
            f,
            ";; ->>HEADER<<- opcode: {}, status: {}, id: {}",
            self.opcode, self.rcode, self.id
        )?;
        f.write_str(";; flags:")?;
        for flag in Flag::ALL {
            if self.flag(flag) {
                write!(f, " {}", flag.mnemonic())?;
            }
        }
        writeln!(
            f,
            "; QUERY: {}, ANSWER: {}, AUTHORITY: {}, ADDITIONAL: {}",
            self.qdcount, self.ancount, self.nscount, self.arcount
        )
    }
}

////////////////////////////////////////////////////////////////////////
// TESTS                                                              //
////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::*;

    const WIRE: &[u8] = b"\x04\xb0\x85\x00\x00\x01\x00\x02\x00\x03\x00\x04";

    #[test]
    fn from_wire_reads_all_fields() {
        let mut buffer = InputBuffer::new(WIRE);
        let header = Header::from_wire(&mut buffer).unwrap();
        assert_eq!(header.id, 1200);
        assert!(header.flag(Flag::Qr));
        assert!(header.flag(Flag::Aa));
        assert!(header.flag(Flag::Rd));
        assert!(!header.flag(Flag::Ra));
        assert_eq!(header.opcode, Opcode::Query);
        assert_eq!(header.rcode, Rcode::NoError);
        assert_eq!(
            (header.qdcount, header.ancount, header.nscount, header.arcount),
            (1, 2, 3, 4)
        );
    }

    #[test]
    fn from_wire_rejects_short_input() {
        let mut buffer = InputBuffer::new(&WIRE[..11]);
        assert_eq!(Header::from_wire(&mut buffer), Err(Error::HeaderTooShort));
        assert_eq!(buffer.position(), 0);
    }

    #[test]
    fn render_writes_what_was_read() {
        let mut buffer = InputBuffer::new(WIRE);
        let header = Header::from_wire(&mut buffer).unwrap();
        let mut render = MessageRender::new();
        header.render(&mut render);
        assert_eq!(render.data(), WIRE);
    }

    #[test]
    fn flags_word_packs_opcode_and_rcode() {
        let mut header = Header::default();
        header.opcode = Opcode::Notify;
        header.rcode = Rcode::Refused;
        header.set_flag(Flag::Qr, true);
        header.set_flag(Flag::Fetch, true);
        assert_eq!(header.flags_word(), 0x8000 | 0x2000 | 0x0040 | 0x0005);
        header.set_flag(Flag::Fetch, false);
        assert_eq!(header.flags_word(), 0xa005);
    }

    #[test]
    fn clear_resets_flags_and_counts() {
        let mut buffer = InputBuffer::new(WIRE);
        let mut header = Header::from_wire(&mut buffer).unwrap();
        header.clear();
        assert_eq!(header.id, 1200);
        assert_eq!(header.flags_word(), 0);
        assert_eq!(header.arcount, 0);
    }

    #[test]
    fn display_is_dig_style() {
        let mut header = Header::default();
        header.id = 7;
        header.rcode = Rcode::NxDomain;
        header.set_flag(Flag::Qr, true);
        header.set_flag(Flag::Rd, true);
        header.set_flag(Flag::Ra, true);
        header.qdcount = 1;
        assert_eq!(
            header.to_string(),
            ";; ->>HEADER<<- opcode: QUERY, status: NXDOMAIN, id: 7\n\
             ;; flags: qr rd ra; QUERY: 1, ANSWER: 0, AUTHORITY: 0, ADDITIONAL: 0\n"
        );
    }
}
