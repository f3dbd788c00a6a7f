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

//! RDATA of the DNAME type ([RFC 6672]).
//!
//! [RFC 6672]: https://datatracker.ietf.org/doc/html/rfc6672

use super::field::{FieldCoding, FieldDisplay, FieldValue};
use super::{Fields, Result, Values};
use crate::name::Name;
use crate::rr::Type;

/// The target of a subtree redirection. Unlike CNAME, the target is
/// never compressed ([RFC 6672 § 2.5]).
///
/// [RFC 6672 § 2.5]: https://datatracker.ietf.org/doc/html/rfc6672#section-2.5
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Dname {
    pub target: Name,
}

impl Fields for Dname {
    const RR_TYPE: Type = Type::DNAME;
    const LAYOUT: &'static [(FieldCoding, FieldDisplay)] =
        &[(FieldCoding::NameUncompressed, FieldDisplay::Name)];

    fn from_values(mut values: Values) -> Result<Self> {
        Ok(Self {
            target: values.name()?,
        })
    }

    fn to_values(&self) -> Vec<FieldValue> {
        vec![FieldValue::Name(self.target.clone())]
    }
}
