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

//! RDATA of the AAAA type ([RFC 3596]).
//!
//! [RFC 3596]: https://datatracker.ietf.org/doc/html/rfc3596

use std::net::Ipv6Addr;

use super::field::{FieldCoding, FieldDisplay, FieldValue};
use super::{Fields, Result, Values};
use crate::rr::Type;

/// The IPv6 address of an AAAA record.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Aaaa {
    pub address: Ipv6Addr,
}

impl Fields for Aaaa {
    const RR_TYPE: Type = Type::AAAA;
    const LAYOUT: &'static [(FieldCoding, FieldDisplay)] = &[(FieldCoding::Ipv6, FieldDisplay::Ip)];

    fn from_values(mut values: Values) -> Result<Self> {
        Ok(Self {
            address: values.v6_addr()?,
        })
    }

    fn to_values(&self) -> Vec<FieldValue> {
        vec![FieldValue::V6Addr(self.address)]
    }
}

////////////////////////////////////////////////////////////////////////
// TESTS                                                              //
////////////////////////////////////////////////////////////////////////
