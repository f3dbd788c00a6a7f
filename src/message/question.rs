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

//! Implementation of the [`Question`] type.

use std::fmt;

use super::Result;
use crate::buffer::InputBuffer;
use crate::class::Class;
use crate::name::Name;
use crate::render::MessageRender;
use crate::rr::Type;

////////////////////////////////////////////////////////////////////////
// QUESTIONS                                                          //
////////////////////////////////////////////////////////////////////////

/// The question of a DNS query.
///
/// Defined in [RFC 1035 § 4.1.2], a DNS question includes
///
/// * the QNAME, which is the domain name whose records are being
///   queried;
/// * the QTYPE, which specifies what types of records are desired; and
/// * the QCLASS, which specifies which DNS class(es) to search.
///
/// Meta-types such as AXFR and ANY are ordinary [`Type`] constants
/// here. A [`Message`](super::Message) carries at most one question.
///
/// [RFC 1035 § 4.1.2]: https://datatracker.ietf.org/doc/html/rfc1035#section-4.1.2
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Question {
    pub name: Name,
    pub qtype: Type,
    pub qclass: Class,
}

impl Question {
    pub fn new(name: Name, qtype: Type, qclass: Class) -> Self {
        Self {
            name,
            qtype,
            qclass,
        }
    }

    /// Reads a question from `buffer`. The QNAME may be compressed.
    pub fn from_wire(buffer: &mut InputBuffer) -> Result<Self> {
        let name = Name::from_wire(buffer, true)?;
        let qtype = Type::from(buffer.read_u16()?);
        let qclass = Class::from(buffer.read_u16()?);
        Ok(Self::new(name, qtype, qclass))
    }

    pub fn render(&self, render: &mut MessageRender) {
        render.write_name(&self.name, true);
        render.write_u16(self.qtype.into());
        render.write_u16(self.qclass.into());
    }
}

impl fmt::Display for Question {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {} {}", self.name, self.qclass, self.qtype)
    }
}

////////////////////////////////////////////////////////////////////////
// TESTS                                                              //
////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::super::Error;
    use super::*;
    use crate::name;

    const WWW_KNET_CN_A: &[u8] = b"\x03www\x04knet\x02cn\x00\x00\x01\x00\x01";

    #[test]
    fn from_wire_reads_name_type_and_class() {
        let mut buffer = InputBuffer::new(WWW_KNET_CN_A);
        let question = Question::from_wire(&mut buffer).unwrap();
        assert_eq!(question.name, "www.knet.cn.".parse().unwrap());
        assert_eq!(question.qtype, Type::A);
        assert_eq!(question.qclass, Class::IN);
        assert_eq!(buffer.remaining(), 0);
    }

    #[test]
    fn from_wire_follows_pointers() {
        let message = b"\x04knet\x02cn\x00\x03www\xc0\x00\x00\x10\x00\x01";
        let mut buffer = InputBuffer::new(message);
        buffer.set_position(9).unwrap();
        let question = Question::from_wire(&mut buffer).unwrap();
        assert_eq!(question.to_string(), "www.knet.cn. IN TXT");
    }

    #[test]
    fn from_wire_reports_truncation() {
        let mut buffer = InputBuffer::new(&WWW_KNET_CN_A[..15]);
        assert!(matches!(
            Question::from_wire(&mut buffer),
            Err(Error::Buffer(_))
        ));
        let mut buffer = InputBuffer::new(&WWW_KNET_CN_A[..5]);
        assert_eq!(
            Question::from_wire(&mut buffer),
            Err(Error::Name(name::Error::UnexpectedEom))
        );
    }

    #[test]
    fn render_writes_wire_form() {
        let question = Question::new("www.knet.cn.".parse().unwrap(), Type::A, Class::IN);
        let mut render = MessageRender::new();
        question.render(&mut render);
        assert_eq!(render.data(), WWW_KNET_CN_A);
    }

    #[test]
    fn display_puts_class_before_type() {
        let question = Question::new("knet.cn.".parse().unwrap(), Type::MX, Class::CH);
        assert_eq!(question.to_string(), "knet.cn. CH MX");
    }
}
