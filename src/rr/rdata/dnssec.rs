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

//! RDATA of the RRSIG type ([RFC 4034 § 3]).
//!
//! Signatures are carried and printed, never verified.
//!
//! [RFC 4034 § 3]: https://datatracker.ietf.org/doc/html/rfc4034#section-3

use super::field::{FieldCoding, FieldDisplay, FieldValue};
use super::{Fields, Result, Values};
use crate::name::Name;
use crate::rr::Type;

/// A signature over an RRset.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Rrsig {
    pub type_covered: Type,
    pub algorithm: u8,
    pub labels: u8,
    pub original_ttl: u32,
    pub expiration: u32,
    pub inception: u32,
    pub key_tag: u16,
    pub signer: Name,
    pub signature: Vec<u8>,
}

impl Fields for Rrsig {
    const RR_TYPE: Type = Type::RRSIG;
    const LAYOUT: &'static [(FieldCoding, FieldDisplay)] = &[
        (FieldCoding::U16, FieldDisplay::RrType),
        (FieldCoding::U8, FieldDisplay::Int),
        (FieldCoding::U8, FieldDisplay::Int),
        (FieldCoding::U32, FieldDisplay::Int),
        (FieldCoding::U32, FieldDisplay::Int),
        (FieldCoding::U32, FieldDisplay::Int),
        (FieldCoding::U16, FieldDisplay::Int),
        (FieldCoding::NameUncompressed, FieldDisplay::Name),
        (FieldCoding::Binary, FieldDisplay::Base64),
    ];

    fn from_values(mut values: Values) -> Result<Self> {
        Ok(Self {
            type_covered: values.u16()?.into(),
            algorithm: values.u8()?,
            labels: values.u8()?,
            original_ttl: values.u32()?,
            expiration: values.u32()?,
            inception: values.u32()?,
            key_tag: values.u16()?,
            signer: values.name()?,
            signature: values.bytes()?,
        })
    }

    fn to_values(&self) -> Vec<FieldValue> {
        vec![
            FieldValue::U16(self.type_covered.into()),
            FieldValue::U8(self.algorithm),
            FieldValue::U8(self.labels),
            FieldValue::U32(self.original_ttl),
            FieldValue::U32(self.expiration),
            FieldValue::U32(self.inception),
            FieldValue::U16(self.key_tag),
            FieldValue::Name(self.signer.clone()),
            FieldValue::Bytes(self.signature.clone()),
        ]
    }
}

////////////////////////////////////////////////////////////////////////
// TESTS                                                              //
////////////////////////////////////////////////////////////////////////
