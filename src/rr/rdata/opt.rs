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

//! RDATA of the OPT pseudo-record type ([RFC 6891 § 6.1.2]).
//!
//! The options themselves are interpreted by
//! [`Edns`](crate::message::edns::Edns); here the RDATA is just octets.
//!
//! [RFC 6891 § 6.1.2]: https://datatracker.ietf.org/doc/html/rfc6891#section-6.1.2

use super::field::{FieldCoding, FieldDisplay, FieldValue};
use super::{Fields, Result, Values};
use crate::rr::Type;

/// The raw option data of an OPT pseudo-record.
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct Opt {
    pub data: Vec<u8>,
}

impl Fields for Opt {
    const RR_TYPE: Type = Type::OPT;
    const LAYOUT: &'static [(FieldCoding, FieldDisplay)] = &[(FieldCoding::Binary, FieldDisplay::Hex)];

    fn from_values(mut values: Values) -> Result<Self> {
        Ok(Self {
            data: values.bytes()?,
        })
    }

    fn to_values(&self) -> Vec<FieldValue> {
        vec![FieldValue::Bytes(self.data.clone())]
    }
}
