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

//! RDATA of the NAPTR type ([RFC 3403 § 4.1]).
//!
//! [RFC 3403 § 4.1]: https://datatracker.ietf.org/doc/html/rfc3403#section-4.1

use super::field::{FieldCoding, FieldDisplay, FieldValue};
use super::{Fields, Result, Values};
use crate::name::Name;
use crate::rr::Type;

/// A naming authority pointer.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Naptr {
    pub order: u16,
    pub preference: u16,
    pub flags: Vec<u8>,
    pub services: Vec<u8>,
    pub regexp: Vec<u8>,
    pub replacement: Name,
}

impl Fields for Naptr {
    const RR_TYPE: Type = Type::NAPTR;
    const LAYOUT: &'static [(FieldCoding, FieldDisplay)] = &[
        (FieldCoding::U16, FieldDisplay::Int),
        (FieldCoding::U16, FieldDisplay::Int),
        (FieldCoding::CharString, FieldDisplay::Str),
        (FieldCoding::CharString, FieldDisplay::Str),
        (FieldCoding::CharString, FieldDisplay::Str),
        (FieldCoding::NameUncompressed, FieldDisplay::Name),
    ];

    fn from_values(mut values: Values) -> Result<Self> {
        Ok(Self {
            order: values.u16()?,
            preference: values.u16()?,
            flags: values.char_string()?,
            services: values.char_string()?,
            regexp: values.char_string()?,
            replacement: values.name()?,
        })
    }

    fn to_values(&self) -> Vec<FieldValue> {
        vec![
            FieldValue::U16(self.order),
            FieldValue::U16(self.preference),
            FieldValue::CharString(self.flags.clone()),
            FieldValue::CharString(self.services.clone()),
            FieldValue::CharString(self.regexp.clone()),
            FieldValue::Name(self.replacement.clone()),
        ]
    }
}

////////////////////////////////////////////////////////////////////////
// TESTS                                                              //
////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use lazy_static::lazy_static;

    use super::super::{Error, Rdata};
    use super::*;
    use crate::buffer::InputBuffer;
    use crate::render::MessageRender;

    const TEXT: &str = r#"100 10 "S" "SIP+D2U" "" _sip._udp.knet.cn."#;

    lazy_static! {
        static ref NAPTR: Rdata = Rdata::Naptr(Naptr {
            order: 100,
            preference: 10,
            flags: b"S".to_vec(),
            services: b"SIP+D2U".to_vec(),
            regexp: Vec::new(),
            replacement: "_sip._udp.knet.cn.".parse().unwrap(),
        });
    }

    #[test]
    fn naptr_text() {
        assert_eq!(Rdata::from_str_typed(Type::NAPTR, TEXT), Ok(NAPTR.clone()));
        assert_eq!(NAPTR.to_string(), TEXT);
    }

    #[test]
    fn naptr_wire() {
        let mut render = MessageRender::new();
        NAPTR.render(&mut render).unwrap();
        assert_eq!(
            render.data(),
            b"\x00\x64\x00\x0a\x01S\x07SIP+D2U\x00\x04_sip\x04_udp\x04knet\x02cn\x00"
        );

        let mut wire = vec![0, render.len() as u8];
        wire.extend_from_slice(render.data());
        let mut buffer = InputBuffer::new(&wire);
        assert_eq!(Rdata::from_wire(Type::NAPTR, &mut buffer), Ok(NAPTR.clone()));
    }

    #[test]
    fn naptr_needs_six_fields() {
        assert_eq!(
            Rdata::from_str_typed(Type::NAPTR, r#"100 10 "S" "SIP+D2U" _sip._udp.knet.cn."#),
            Err(Error::FieldCount {
                rr_type: Type::NAPTR,
                expected: 6,
                found: 5
            })
        );
    }
}
