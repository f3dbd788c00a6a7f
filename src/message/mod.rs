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

//! Implementation of reading and writing of DNS messages.

use std::fmt;

use log::debug;

use crate::buffer::{self, InputBuffer};
use crate::class::Class;
use crate::name::{self, Name};
use crate::render::MessageRender;
use crate::rr::{rdata, Rdata, RRset, Ttl, Type};

pub mod edns;
mod header;
mod opcode;
mod question;
mod rcode;
pub use edns::Edns;
pub use header::{Flag, Header, HEADER_SIZE};
pub use opcode::{IntoOpcodeError, Opcode};
pub use question::Question;
pub use rcode::{IntoRcodeError, Rcode};

////////////////////////////////////////////////////////////////////////
// SECTIONS                                                           //
////////////////////////////////////////////////////////////////////////

/// One of the three record sections of a message.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Section {
    Answer,
    Authority,
    Additional,
}

impl Section {
    /// The sections in wire order.
    pub const ALL: [Section; 3] = [Section::Answer, Section::Authority, Section::Additional];

    fn index(self) -> usize {
        match self {
            Self::Answer => 0,
            Self::Authority => 1,
            Self::Additional => 2,
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Answer => f.write_str("ANSWER"),
            Self::Authority => f.write_str("AUTHORITY"),
            Self::Additional => f.write_str("ADDITIONAL"),
        }
    }
}

////////////////////////////////////////////////////////////////////////
// MESSAGES                                                           //
////////////////////////////////////////////////////////////////////////

/// A DNS message.
///
/// A message holds a [`Header`], at most one [`Question`], three
/// sections of [`RRset`]s, and optional [`Edns`] information. The OPT
/// record never appears in the additional section: it is decoded into
/// [`Message::edns`] and rendered from it.
///
/// The header's section counts are recomputed by [`Message::render`];
/// after decoding they reflect the counts found on the wire.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Message {
    pub header: Header,
    pub question: Option<Question>,
    sections: [Vec<RRset>; 3],
    pub edns: Option<Edns>,
}

impl Message {
    /// Creates a recursive query for `name` and `qtype` in class IN,
    /// with a random ID and EDNS advertising `udp_size`.
    pub fn make_query(name: Name, qtype: Type, udp_size: u16, dnssec_aware: bool) -> Self {
        let mut header = Header::default();
        header.id = rand::random();
        header.set_flag(Flag::Rd, true);
        Self {
            header,
            question: Some(Question::new(name, qtype, Class::IN)),
            sections: Default::default(),
            edns: Some(Edns::new(udp_size, dnssec_aware)),
        }
    }

    /// Creates an empty response to this message. The ID, question, and
    /// RD flag are carried over; QR is set.
    pub fn make_response(&self) -> Self {
        let mut header = Header::default();
        header.id = self.header.id;
        header.set_flag(Flag::Qr, true);
        header.set_flag(Flag::Rd, self.header.flag(Flag::Rd));
        header.qdcount = self.question.is_some() as u16;
        Self {
            header,
            question: self.question.clone(),
            sections: Default::default(),
            edns: None,
        }
    }

    /// Decodes a message.
    ///
    /// Consecutive records with the same owner and type are merged into
    /// one [`RRset`]. An OPT record in the additional section becomes
    /// the message's [`Edns`].
    pub fn from_wire(octets: &[u8]) -> Result<Self> {
        let mut buffer = InputBuffer::new(octets);
        let header = Header::from_wire(&mut buffer)?;
        let question = match header.qdcount {
            0 => None,
            1 => Some(Question::from_wire(&mut buffer)?),
            n => return Err(Error::TooManyQuestions(n)),
        };

        let mut message = Self {
            header,
            question,
            ..Default::default()
        };
        for section in Section::ALL {
            message.read_section(section, &mut buffer)?;
        }
        if buffer.remaining() > 0 {
            debug!(
                "ignoring {} octets after the last record of the message",
                buffer.remaining()
            );
        }
        Ok(message)
    }

    fn read_section(&mut self, section: Section, buffer: &mut InputBuffer) -> Result<()> {
        let count = match section {
            Section::Answer => self.header.ancount,
            Section::Authority => self.header.nscount,
            Section::Additional => self.header.arcount,
        };

        let mut last: Option<RRset> = None;
        for _ in 0..count {
            let rrset = RRset::from_wire(buffer)?;
            if let Some(previous) = last.as_mut() {
                if previous.is_same_rrset(&rrset) {
                    previous.rdatas.extend(rrset.rdatas);
                    continue;
                }
            }
            if let Some(previous) = last.replace(rrset) {
                self.add_decoded(section, previous)?;
            }
        }
        if let Some(previous) = last {
            self.add_decoded(section, previous)?;
        }
        Ok(())
    }

    fn add_decoded(&mut self, section: Section, rrset: RRset) -> Result<()> {
        if section == Section::Additional && rrset.rr_type == Type::OPT {
            self.edns = Some(Edns::from_rrset(&rrset)?);
        } else {
            self.sections[section.index()].push(rrset);
        }
        Ok(())
    }

    /// Renders the message into `render`, first updating the header's
    /// section counts. If the result is longer than the renderer's
    /// length limit, the renderer is marked as truncated; nothing is
    /// dropped.
    pub fn render(&mut self, render: &mut MessageRender) -> Result<()> {
        self.header.qdcount = self.question.is_some() as u16;
        self.header.ancount = self.record_count(Section::Answer)?;
        self.header.nscount = self.record_count(Section::Authority)?;
        self.header.arcount = self.record_count(Section::Additional)?;
        if self.edns.is_some() {
            self.header.arcount = self
                .header
                .arcount
                .checked_add(1)
                .ok_or(Error::TooManyRecords)?;
        }

        self.header.render(render);
        if let Some(ref question) = self.question {
            question.render(render);
        }
        for rrset in self.sections.iter().flatten() {
            rrset.render(render)?;
        }
        if let Some(ref edns) = self.edns {
            edns.render(render)?;
        }

        if render.len() > render.len_limit() {
            debug!(
                "rendered message is {} octets, over the limit of {}",
                render.len(),
                render.len_limit()
            );
            render.set_truncated();
        }
        Ok(())
    }

    fn record_count(&self, section: Section) -> Result<u16> {
        let count: usize = self.section(section).iter().map(RRset::rr_count).sum();
        u16::try_from(count).or(Err(Error::TooManyRecords))
    }

    pub fn section(&self, section: Section) -> &[RRset] {
        &self.sections[section.index()]
    }

    pub fn section_mut(&mut self, section: Section) -> &mut Vec<RRset> {
        &mut self.sections[section.index()]
    }

    pub fn add_rrset(&mut self, section: Section, rrset: RRset) {
        self.sections[section.index()].push(rrset);
    }

    /// Adds a single record to `section`. When `merge` is set and the
    /// section already has an RRset with the same owner, type, and
    /// class, the RDATA joins that RRset (keeping its TTL); otherwise a
    /// new RRset is appended.
    #[allow(clippy::too_many_arguments)]
    pub fn add_rr(
        &mut self,
        section: Section,
        name: Name,
        rr_type: Type,
        class: Class,
        ttl: Ttl,
        rdata: Rdata,
        merge: bool,
    ) {
        if merge {
            if let Some(index) = self.rrset_index(section, &name, rr_type, class) {
                self.sections[section.index()][index].add_rdata(rdata);
                return;
            }
        }
        let mut rrset = RRset::new(name, rr_type, class, ttl);
        rrset.add_rdata(rdata);
        self.add_rrset(section, rrset);
    }

    /// Determines whether `section` has an RRset with the owner, type,
    /// and class of `rrset`.
    pub fn has_rrset(&self, section: Section, rrset: &RRset) -> bool {
        self.rrset_index(section, &rrset.name, rrset.rr_type, rrset.class)
            .is_some()
    }

    fn rrset_index(&self, section: Section, name: &Name, rr_type: Type, class: Class) -> Option<usize> {
        self.section(section).iter().position(|rrset| {
            rrset.class == class && rrset.rr_type == rr_type && rrset.name == *name
        })
    }

    /// Empties `section` and zeroes its header count. Clearing the
    /// additional section also removes the EDNS information.
    pub fn clear_section(&mut self, section: Section) {
        self.sections[section.index()].clear();
        match section {
            Section::Answer => self.header.ancount = 0,
            Section::Authority => self.header.nscount = 0,
            Section::Additional => {
                self.header.arcount = 0;
                self.edns = None;
            }
        }
    }

    /// Clears the header flags and counts, the question, and every
    /// section. The EDNS information is kept.
    pub fn clear(&mut self) {
        self.header.clear();
        self.question = None;
        for section in &mut self.sections {
            section.clear();
        }
    }
}

/// Formats the message the way dig prints a response.
impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{}", self.header)?;
        if let Some(ref edns) = self.edns {
            writeln!(f, ";; OPT PSEUDOSECTION:")?;
            write!(f, "{}", edns)?;
        }
        writeln!(f, ";; QUESTION SECTION:")?;
        if let Some(ref question) = self.question {
            writeln!(f, "{}", question)?;
        }
        for section in Section::ALL {
            let rrsets = self.section(section);
            if !rrsets.is_empty() {
                writeln!(f, "\n;; {} SECTION:", section)?;
                for rrset in rrsets {
                    write!(f, "{}", rrset)?;
                }
            }
        }
        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////
// ERRORS                                                             //
////////////////////////////////////////////////////////////////////////

/// An error signaling that a message could not be read or rendered.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Error {
    HeaderTooShort,
    TooManyQuestions(u16),
    TooManyRecords,
    InvalidSubnet,
    NotOpt,
    OptionTooLong,
    Name(name::Error),
    Rdata(rdata::Error),
    Buffer(buffer::Error),
}

impl From<name::Error> for Error {
    fn from(err: name::Error) -> Self {
        Self::Name(err)
    }
}

impl From<rdata::Error> for Error {
    fn from(err: rdata::Error) -> Self {
        Self::Rdata(err)
    }
}

impl From<buffer::Error> for Error {
    fn from(err: buffer::Error) -> Self {
        Self::Buffer(err)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::HeaderTooShort => f.write_str("header too short"),
            Self::TooManyQuestions(n) => write!(f, "message has {} questions", n),
            Self::TooManyRecords => f.write_str("too many records for a section count"),
            Self::InvalidSubnet => f.write_str("invalid client subnet option"),
            Self::NotOpt => f.write_str("EDNS record is not of type OPT"),
            Self::OptionTooLong => f.write_str("EDNS option data too long"),
            Self::Name(err) => write!(f, "invalid name: {}", err),
            Self::Rdata(err) => write!(f, "invalid record: {}", err),
            Self::Buffer(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Name(err) => Some(err),
            Self::Rdata(err) => Some(err),
            Self::Buffer(err) => Some(err),
            _ => None,
        }
    }
}

/// The type returned by fallible message operations.
pub type Result<T> = std::result::Result<T, Error>;

////////////////////////////////////////////////////////////////////////
// TESTS                                                              //
////////////////////////////////////////////////////////////////////////
