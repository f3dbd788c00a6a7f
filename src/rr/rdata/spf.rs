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

//! RDATA of the SPF type ([RFC 4408 § 3.1.1]).
//!
//! [RFC 4408 § 3.1.1]: https://datatracker.ietf.org/doc/html/rfc4408#section-3.1.1

use super::field::{FieldCoding, FieldDisplay, FieldValue};
use super::{Fields, Result, Values};
use crate::rr::Type;

/// An SPF policy. The format is identical to TXT.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Spf {
    pub strings: Vec<Vec<u8>>,
}

impl Fields for Spf {
    const RR_TYPE: Type = Type::SPF;
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
