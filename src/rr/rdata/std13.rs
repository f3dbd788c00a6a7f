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

//! RDATA of the types defined in [RFC 1035 § 3.3] and [§ 3.4].
//!
//! [RFC 1035 § 3.3]: https://datatracker.ietf.org/doc/html/rfc1035#section-3.3
//! [§ 3.4]: https://datatracker.ietf.org/doc/html/rfc1035#section-3.4

use std::net::Ipv4Addr;

use super::field::{FieldCoding, FieldDisplay, FieldValue};
use super::{Fields, Result, Values};
use crate::name::Name;
use crate::rr::Type;

/// The IPv4 address of an A record.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct A {
    pub address: Ipv4Addr,
}

impl Fields for A {
    const RR_TYPE: Type = Type::A;
    const LAYOUT: &'static [(FieldCoding, FieldDisplay)] = &[(FieldCoding::Ipv4, FieldDisplay::Ip)];

    fn from_values(mut values: Values) -> Result<Self> {
        Ok(Self {
            address: values.v4_addr()?,
        })
    }

    fn to_values(&self) -> Vec<FieldValue> {
        vec![FieldValue::V4Addr(self.address)]
    }
}

/// Defines a record type whose RDATA is a single compressible domain
/// name.
macro_rules! name_record {
    ($(#[$doc:meta])* $record:ident, $rr_type:expr) => {
        $(#[$doc])*
        #[derive(Clone, Debug, Eq, Hash, PartialEq)]
        pub struct $record {
            pub name: Name,
        }

        impl Fields for $record {
            const RR_TYPE: Type = $rr_type;
            const LAYOUT: &'static [(FieldCoding, FieldDisplay)] =
                &[(FieldCoding::Name, FieldDisplay::Name)];

            fn from_values(mut values: Values) -> Result<Self> {
                Ok(Self {
                    name: values.name()?,
                })
            }

            fn to_values(&self) -> Vec<FieldValue> {
                vec![FieldValue::Name(self.name.clone())]
            }
        }
    };
}

name_record! {
    /// The name of an authoritative server, from an NS record.
    Ns, Type::NS
}

name_record! {
    /// The canonical name an alias points to.
    Cname, Type::CNAME
}

name_record! {
    Ptr, Type::PTR
}

/// The start of a zone of authority.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Soa {
    pub mname: Name,
    pub rname: Name,
    pub serial: u32,
    pub refresh: u32,
    pub retry: u32,
    pub expire: u32,
    pub minimum: u32,
}

impl Fields for Soa {
    const RR_TYPE: Type = Type::SOA;
    const LAYOUT: &'static [(FieldCoding, FieldDisplay)] = &[
        (FieldCoding::Name, FieldDisplay::Name),
        (FieldCoding::Name, FieldDisplay::Name),
        (FieldCoding::U32, FieldDisplay::Int),
        (FieldCoding::U32, FieldDisplay::Int),
        (FieldCoding::U32, FieldDisplay::Int),
        (FieldCoding::U32, FieldDisplay::Int),
        (FieldCoding::U32, FieldDisplay::Int),
    ];

    fn from_values(mut values: Values) -> Result<Self> {
        Ok(Self {
            mname: values.name()?,
            rname: values.name()?,
            serial: values.u32()?,
            refresh: values.u32()?,
            retry: values.u32()?,
            expire: values.u32()?,
            minimum: values.u32()?,
        })
    }

    fn to_values(&self) -> Vec<FieldValue> {
        vec![
            FieldValue::Name(self.mname.clone()),
            FieldValue::Name(self.rname.clone()),
            FieldValue::U32(self.serial),
            FieldValue::U32(self.refresh),
            FieldValue::U32(self.retry),
            FieldValue::U32(self.expire),
            FieldValue::U32(self.minimum),
        ]
    }
}

/// A mail exchange and its preference.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Mx {
    pub preference: u16,
    pub exchange: Name,
}

impl Fields for Mx {
    const RR_TYPE: Type = Type::MX;
    const LAYOUT: &'static [(FieldCoding, FieldDisplay)] = &[
        (FieldCoding::U16, FieldDisplay::Int),
        (FieldCoding::Name, FieldDisplay::Name),
    ];

    fn from_values(mut values: Values) -> Result<Self> {
        Ok(Self {
            preference: values.u16()?,
            exchange: values.name()?,
        })
    }

    fn to_values(&self) -> Vec<FieldValue> {
        vec![
            FieldValue::U16(self.preference),
            FieldValue::Name(self.exchange.clone()),
        ]
    }
}

/// One or more `<character-string>`s.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Txt {
    pub strings: Vec<Vec<u8>>,
}

impl Fields for Txt {
    const RR_TYPE: Type = Type::TXT;
    const LAYOUT: &'static [(FieldCoding, FieldDisplay)] = &[(FieldCoding::Txt, FieldDisplay::Txt)];

    fn from_values(mut values: Values) -> Result<Self> {
        Ok(Self {
            strings: values.char_string_list()?,
        })
    }

    fn to_values(&self) -> Vec<FieldValue> {
        vec![FieldValue::CharStringList(self.strings.clone())]
    }
}

////////////////////////////////////////////////////////////////////////
// TESTS                                                              //
////////////////////////////////////////////////////////////////////////
