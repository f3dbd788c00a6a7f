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

//! Implementation of EDNS(0) ([RFC 6891]) as carried in the OPT
//! pseudo-record of a message's additional section.
//!
//! [RFC 6891]: https://datatracker.ietf.org/doc/html/rfc6891

use std::fmt;
use std::net::{IpAddr, Ipv4Addr};

use log::trace;

use super::{Error, Result};
use crate::buffer::InputBuffer;
use crate::name::Name;
use crate::render::MessageRender;
use crate::rr::{Rdata, RRset, Type};

mod subnet;
mod view;
pub use subnet::{SubnetOption, SUBNET_CODE};
pub use view::{ViewOption, VIEW_CODE};

pub const VERSION_SHIFT: u32 = 16;
pub const EXTENDED_RCODE_SHIFT: u32 = 24;
pub const VERSION_MASK: u32 = 0x00ff_0000;
pub const DO_FLAG: u32 = 0x0000_8000;

////////////////////////////////////////////////////////////////////////
// OPTIONS                                                            //
////////////////////////////////////////////////////////////////////////

/// An EDNS option this crate understands. Options with other codes
/// are skipped when reading.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum EdnsOption {
    Subnet(SubnetOption),
    View(ViewOption),
}

impl EdnsOption {
    /// Reads one option (code, length, and data) from `buffer`.
    /// Returns `None` for an unrecognized option code.
    fn read(buffer: &mut InputBuffer) -> Result<Option<Self>> {
        let code = buffer.read_u16()?;
        let len = buffer.read_u16()?;
        let data = buffer.read_bytes(len as usize)?;
        match code {
            SUBNET_CODE => Ok(Some(Self::Subnet(SubnetOption::from_data(data)?))),
            VIEW_CODE => Ok(Some(Self::View(ViewOption::from_data(data)))),
            _ => {
                trace!("skipping EDNS option with code {}", code);
                Ok(None)
            }
        }
    }

    fn render(&self, render: &mut MessageRender) -> Result<()> {
        match self {
            Self::Subnet(subnet) => {
                subnet.render(render);
                Ok(())
            }
            Self::View(view) => view.render(render),
        }
    }
}

impl fmt::Display for EdnsOption {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Subnet(subnet) => write!(f, "; CLIENT-SUBNET: {}", subnet),
            Self::View(view) => write!(f, "; CLIENT-VIEW: {}", view),
        }
    }
}

////////////////////////////////////////////////////////////////////////
// EDNS                                                               //
////////////////////////////////////////////////////////////////////////

/// The EDNS information of a message.
///
/// On the wire this is an OPT record owned by the root name. Its CLASS
/// field holds the requestor's UDP payload size, and its TTL field
/// packs the upper eight bits of the RCODE, the EDNS version, and the
/// DO bit.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Edns {
    pub version: u8,
    pub extended_rcode: u8,
    pub udp_size: u16,
    pub dnssec_aware: bool,
    pub options: Vec<EdnsOption>,
}

impl Edns {
    /// Creates version 0 EDNS information with no options.
    pub fn new(udp_size: u16, dnssec_aware: bool) -> Self {
        Self {
            version: 0,
            extended_rcode: 0,
            udp_size,
            dnssec_aware,
            options: Vec::new(),
        }
    }

    fn from_class_and_ttl(udp_size: u16, ttl: u32) -> Self {
        Self {
            version: ((ttl & VERSION_MASK) >> VERSION_SHIFT) as u8,
            extended_rcode: (ttl >> EXTENDED_RCODE_SHIFT) as u8,
            udp_size,
            dnssec_aware: ttl & DO_FLAG != 0,
            options: Vec::new(),
        }
    }

    /// Returns the value of the OPT record's TTL field.
    pub fn ttl(&self) -> u32 {
        let mut ttl = (self.extended_rcode as u32) << EXTENDED_RCODE_SHIFT;
        ttl |= ((self.version as u32) << VERSION_SHIFT) & VERSION_MASK;
        if self.dnssec_aware {
            ttl |= DO_FLAG;
        }
        ttl
    }

    /// Reads an OPT record from `buffer`. At most the first option of
    /// the RDATA is kept; the cursor always ends after the record.
    pub fn from_wire(buffer: &mut InputBuffer) -> Result<Self> {
        Name::from_wire(buffer, true)?;
        if Type::from(buffer.read_u16()?) != Type::OPT {
            return Err(Error::NotOpt);
        }
        let udp_size = buffer.read_u16()?;
        let ttl = buffer.read_u32()?;
        let rdlength = buffer.read_u16()?;
        let rdata = buffer.read_bytes(rdlength as usize)?;

        let mut edns = Self::from_class_and_ttl(udp_size, ttl);
        if !rdata.is_empty() {
            if let Some(option) = EdnsOption::read(&mut InputBuffer::new(rdata))? {
                edns.options.push(option);
            }
        }
        Ok(edns)
    }

    /// Builds EDNS information from a decoded OPT RRset. Each RDATA may
    /// contribute its first option.
    pub fn from_rrset(rrset: &RRset) -> Result<Self> {
        if rrset.rr_type != Type::OPT {
            return Err(Error::NotOpt);
        }
        let mut edns = Self::from_class_and_ttl(rrset.class.payload_size(), rrset.ttl.into());
        for rdata in &rrset.rdatas {
            if let Rdata::Opt(opt) = rdata {
                if opt.data.is_empty() {
                    continue;
                }
                if let Some(option) = EdnsOption::read(&mut InputBuffer::new(&opt.data))? {
                    edns.options.push(option);
                }
            }
        }
        Ok(edns)
    }

    /// Writes the OPT record.
    pub fn render(&self, render: &mut MessageRender) -> Result<()> {
        render.write_name(Name::root(), false);
        render.write_u16(Type::OPT.into());
        render.write_u16(self.udp_size);
        render.write_u32(self.ttl());

        let rdlength_pos = render.len();
        render.skip(2);
        for option in &self.options {
            option.render(render)?;
        }
        let rdlength = render.len() - rdlength_pos - 2;
        let rdlength = u16::try_from(rdlength).or(Err(Error::OptionTooLong))?;
        render.write_u16_at(rdlength, rdlength_pos)?;
        Ok(())
    }

    /// Adds a client subnet option for a single IPv4 host.
    pub fn add_subnet_v4(&mut self, address: Ipv4Addr) {
        self.set_subnet(SubnetOption::host(IpAddr::V4(address)));
    }

    /// Adds a client subnet option covering the first `source_prefix`
    /// bits of `address`. Any previous subnet option is replaced.
    pub fn add_subnet(&mut self, address: IpAddr, source_prefix: u8) -> Result<()> {
        let subnet = SubnetOption::new(address, source_prefix)?;
        self.set_subnet(subnet);
        Ok(())
    }

    pub fn add_view(&mut self, view: impl Into<Vec<u8>>) {
        self.options.push(EdnsOption::View(ViewOption::new(view)));
    }

    pub fn subnet(&self) -> Option<&SubnetOption> {
        self.options.iter().find_map(|option| match option {
            EdnsOption::Subnet(subnet) => Some(subnet),
            _ => None,
        })
    }

    fn set_subnet(&mut self, subnet: SubnetOption) {
        self.options
            .retain(|option| !matches!(option, EdnsOption::Subnet(_)));
        self.options.push(EdnsOption::Subnet(subnet));
    }
}

impl fmt::Display for Edns {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "; EDNS: version: {}, ", self.version)?;
        if self.dnssec_aware {
            f.write_str("flags: do; ")?;
        }
        writeln!(f, "udp: {}", self.udp_size)?;
        for option in &self.options {
            writeln!(f, "{}", option)?;
        }
        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////
// TESTS                                                              //
////////////////////////////////////////////////////////////////////////
