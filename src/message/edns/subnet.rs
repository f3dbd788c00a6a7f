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

//! The EDNS client subnet option ([RFC 7871]).
//!
//! [RFC 7871]: https://datatracker.ietf.org/doc/html/rfc7871

use std::fmt;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use super::super::{Error, Result};
use crate::buffer::InputBuffer;
use crate::render::MessageRender;

pub const SUBNET_CODE: u16 = 8;

const FAMILY_IPV4: u16 = 1;
const FAMILY_IPV6: u16 = 2;

/// A client subnet: an address, the number of leading bits of it that
/// are significant (the source prefix), and the scope prefix a server
/// answers with.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct SubnetOption {
    address: IpAddr,
    source_prefix: u8,
    scope_prefix: u8,
}

impl SubnetOption {
    /// Creates a subnet option with a scope prefix of zero. Fails with
    /// [`Error::InvalidSubnet`] if `source_prefix` is longer than the
    /// address.
    pub fn new(address: IpAddr, source_prefix: u8) -> Result<Self> {
        if source_prefix > max_prefix(address) {
            return Err(Error::InvalidSubnet);
        }
        Ok(Self {
            address,
            source_prefix,
            scope_prefix: 0,
        })
    }

    /// Creates a subnet option for a single host.
    pub fn host(address: IpAddr) -> Self {
        Self {
            address,
            source_prefix: max_prefix(address),
            scope_prefix: 0,
        }
    }

    pub fn address(&self) -> IpAddr {
        self.address
    }

    pub fn source_prefix(&self) -> u8 {
        self.source_prefix
    }

    pub fn scope_prefix(&self) -> u8 {
        self.scope_prefix
    }

    pub fn family(&self) -> u16 {
        match self.address {
            IpAddr::V4(_) => FAMILY_IPV4,
            IpAddr::V6(_) => FAMILY_IPV6,
        }
    }

    /// Parses the option data (everything after OPTION-LENGTH). The
    /// address may be shorter than the family's full length; missing
    /// octets are zero.
    pub(super) fn from_data(data: &[u8]) -> Result<Self> {
        let mut buffer = InputBuffer::new(data);
        let family = buffer.read_u16()?;
        let source_prefix = buffer.read_u8()?;
        let scope_prefix = buffer.read_u8()?;
        let octets = buffer.read_bytes(buffer.remaining())?;

        let address = match family {
            FAMILY_IPV4 if octets.len() <= 4 => {
                let mut full = [0; 4];
                full[..octets.len()].copy_from_slice(octets);
                IpAddr::V4(Ipv4Addr::from(full))
            }
            FAMILY_IPV6 if octets.len() <= 16 => {
                let mut full = [0; 16];
                full[..octets.len()].copy_from_slice(octets);
                IpAddr::V6(Ipv6Addr::from(full))
            }
            _ => return Err(Error::InvalidSubnet),
        };
        if source_prefix > max_prefix(address) {
            return Err(Error::InvalidSubnet);
        }
        Ok(Self {
            address,
            source_prefix,
            scope_prefix,
        })
    }

    /// Writes the option, including its code and length. Only the
    /// first ceil(source prefix / 8) octets of the masked address are
    /// sent.
    pub(super) fn render(&self, render: &mut MessageRender) {
        let address_len = (self.source_prefix as usize + 7) / 8;
        render.write_u16(SUBNET_CODE);
        render.write_u16(4 + address_len as u16);
        render.write_u16(self.family());
        render.write_u8(self.source_prefix);
        render.write_u8(self.scope_prefix);
        match self.masked_address() {
            IpAddr::V4(v4) => render.write_data(&v4.octets()[..address_len]),
            IpAddr::V6(v6) => render.write_data(&v6.octets()[..address_len]),
        }
    }

    fn masked_address(&self) -> IpAddr {
        let prefix = self.source_prefix as u32;
        match self.address {
            IpAddr::V4(v4) => {
                let mask = u32::MAX.checked_shl(32 - prefix).unwrap_or(0);
                IpAddr::V4(Ipv4Addr::from(u32::from(v4) & mask))
            }
            IpAddr::V6(v6) => {
                let mask = u128::MAX.checked_shl(128 - prefix).unwrap_or(0);
                IpAddr::V6(Ipv6Addr::from(u128::from(v6) & mask))
            }
        }
    }
}

impl fmt::Display for SubnetOption {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}/{}", self.address, self.source_prefix)
    }
}

fn max_prefix(address: IpAddr) -> u8 {
    match address {
        IpAddr::V4(_) => 32,
        IpAddr::V6(_) => 128,
    }
}

////////////////////////////////////////////////////////////////////////
// TESTS                                                              //
////////////////////////////////////////////////////////////////////////
