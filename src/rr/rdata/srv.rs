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

//! RDATA of the SRV type ([RFC 2782]).
//!
//! [RFC 2782]: https://datatracker.ietf.org/doc/html/rfc2782

use super::field::{FieldCoding, FieldDisplay, FieldValue};
use super::{Fields, Result, Values};
use crate::name::Name;
use crate::rr::Type;

/// The location of a service. The target is never compressed.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Srv {
    pub priority: u16,
    pub weight: u16,
    pub port: u16,
    pub target: Name,
}

impl Fields for Srv {
    const RR_TYPE: Type = Type::SRV;
    const LAYOUT: &'static [(FieldCoding, FieldDisplay)] = &[
        (FieldCoding::U16, FieldDisplay::Int),
        (FieldCoding::U16, FieldDisplay::Int),
        (FieldCoding::U16, FieldDisplay::Int),
        (FieldCoding::NameUncompressed, FieldDisplay::Name),
    ];

    fn from_values(mut values: Values) -> Result<Self> {
        Ok(Self {
            priority: values.u16()?,
            weight: values.u16()?,
            port: values.u16()?,
            target: values.name()?,
        })
    }

    fn to_values(&self) -> Vec<FieldValue> {
        vec![
            FieldValue::U16(self.priority),
            FieldValue::U16(self.weight),
            FieldValue::U16(self.port),
            FieldValue::Name(self.target.clone()),
        ]
    }
}

////////////////////////////////////////////////////////////////////////
// TESTS                                                              //
////////////////////////////////////////////////////////////////////////
