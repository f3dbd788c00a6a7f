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

//! Implementation of the [`Rdata`] type and DNS RDATA processing.

use std::fmt;
use std::net::{Ipv4Addr, Ipv6Addr};

use super::Type;
use crate::buffer::{self, InputBuffer};
use crate::name::{self, Name};
use crate::render::MessageRender;
use crate::util::split_fields;

pub mod field;
use field::{decode_field, format_field, parse_field, render_field};
use field::{FieldCoding, FieldDisplay, FieldValue};

// Implementations of RR types.
mod dname;
mod dnssec;
mod ipv6;
mod naptr;
mod opt;
mod spf;
mod srv;
mod std13;
pub use dname::*;
pub use dnssec::*;
pub use ipv6::*;
pub use naptr::*;
pub use opt::*;
pub use spf::*;
pub use srv::*;
pub use std13::*;

////////////////////////////////////////////////////////////////////////
// ERRORS                                                             //
////////////////////////////////////////////////////////////////////////

/// An error signaling that RDATA could not be read, written, or parsed.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Error {
    /// The RDATA (or the message holding it) ended in the middle of a
    /// field.
    Truncated,

    /// Octets were left over after the last field.
    TrailingData,

    /// A `<character-string>` is longer than 255 octets.
    StringTooLong,

    /// A field value does not match the kind of the field.
    FieldMismatch,

    /// A field's text could not be parsed.
    InvalidText,

    /// The text form has the wrong number of fields.
    FieldCount {
        rr_type: Type,
        expected: usize,
        found: usize,
    },

    /// The RR type has no RDATA support.
    UnknownType(Type),

    /// The rendered RDATA does not fit in 65,535 octets.
    RdataTooLong,

    /// An [`Rdata`] was stored in an RRset of a different type.
    TypeMismatch { expected: Type, found: Type },

    /// A position outside the rendered output was accessed.
    OutOfRange,

    /// An embedded domain name is invalid.
    Name(name::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Truncated => f.write_str("RDATA is truncated"),
            Self::TrailingData => f.write_str("extra data after the RDATA fields"),
            Self::StringTooLong => f.write_str("character string is too long"),
            Self::FieldMismatch => f.write_str("field value does not match the field kind"),
            Self::InvalidText => f.write_str("invalid RDATA text"),
            Self::FieldCount {
                rr_type,
                expected,
                found,
            } => write!(
                f,
                "{rr_type} RDATA needs {expected} fields but {found} were given"
            ),
            Self::UnknownType(rr_type) => write!(f, "unsupported RR type {rr_type}"),
            Self::RdataTooLong => f.write_str("RDATA is too long"),
            Self::TypeMismatch { expected, found } => {
                write!(f, "{found} RDATA in an RRset of type {expected}")
            }
            Self::OutOfRange => f.write_str("position out of range of the output"),
            Self::Name(err) => write!(f, "invalid name in RDATA: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Name(err) => Some(err),
            _ => None,
        }
    }
}

impl From<name::Error> for Error {
    fn from(err: name::Error) -> Self {
        Self::Name(err)
    }
}

impl From<buffer::Error> for Error {
    fn from(err: buffer::Error) -> Self {
        match err {
            buffer::Error::UnexpectedEnd => Self::Truncated,
            buffer::Error::OutOfRange => Self::OutOfRange,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

////////////////////////////////////////////////////////////////////////
// RECORD LAYOUTS                                                     //
////////////////////////////////////////////////////////////////////////

/// A record type described as a sequence of fields. The wire and text
/// conversions of every supported type are derived from its `LAYOUT`.
trait Fields: Sized {
    const RR_TYPE: Type;
    const LAYOUT: &'static [(FieldCoding, FieldDisplay)];

    fn from_values(values: Values) -> Result<Self>;

    fn to_values(&self) -> Vec<FieldValue>;

    fn decode(buffer: &mut InputBuffer, rdlength: u16) -> Result<Self> {
        let mut values = Vec::with_capacity(Self::LAYOUT.len());
        let mut remaining = rdlength;
        for &(coding, _) in Self::LAYOUT {
            let (value, rest) = decode_field(coding, buffer, remaining)?;
            values.push(value);
            remaining = rest;
        }
        if remaining != 0 {
            return Err(Error::TrailingData);
        }
        Self::from_values(Values(values.into_iter()))
    }

    fn render(&self, render: &mut MessageRender) -> Result<()> {
        for (&(coding, _), value) in Self::LAYOUT.iter().zip(self.to_values()) {
            render_field(coding, &value, render)?;
        }
        Ok(())
    }

    /// Parses the text form. A trailing `Txt` or `Binary` field takes
    /// all the remaining words, so it may be given as zero or more.
    fn parse(text: &str) -> Result<Self> {
        let words = split_fields(text).ok_or(Error::InvalidText)?;
        let expected = Self::LAYOUT.len();
        let open_ended = matches!(
            Self::LAYOUT.last(),
            Some((FieldCoding::Txt | FieldCoding::Binary, _))
        );
        let count_ok = if open_ended {
            words.len() + 1 >= expected
        } else {
            words.len() == expected
        };
        if !count_ok {
            return Err(Error::FieldCount {
                rr_type: Self::RR_TYPE,
                expected,
                found: words.len(),
            });
        }

        let mut values = Vec::with_capacity(expected);
        for (i, &(coding, display)) in Self::LAYOUT.iter().enumerate() {
            let value = if i + 1 == expected && open_ended {
                let separator = if coding == FieldCoding::Txt { " " } else { "" };
                parse_field(display, &words[i..].join(separator), coding)?
            } else {
                parse_field(display, words[i], coding)?
            };
            values.push(value);
        }
        Self::from_values(Values(values.into_iter()))
    }

    fn format(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (i, (&(_, display), value)) in Self::LAYOUT.iter().zip(self.to_values()).enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            f.write_str(&format_field(display, &value))?;
        }
        Ok(())
    }
}

/// The field values of one record, consumed in layout order.
struct Values(std::vec::IntoIter<FieldValue>);

impl Values {
    fn name(&mut self) -> Result<Name> {
        match self.0.next() {
            Some(FieldValue::Name(name)) => Ok(name),
            _ => Err(Error::FieldMismatch),
        }
    }

    fn u8(&mut self) -> Result<u8> {
        match self.0.next() {
            Some(FieldValue::U8(value)) => Ok(value),
            _ => Err(Error::FieldMismatch),
        }
    }

    fn u16(&mut self) -> Result<u16> {
        match self.0.next() {
            Some(FieldValue::U16(value)) => Ok(value),
            _ => Err(Error::FieldMismatch),
        }
    }

    fn u32(&mut self) -> Result<u32> {
        match self.0.next() {
            Some(FieldValue::U32(value)) => Ok(value),
            _ => Err(Error::FieldMismatch),
        }
    }

    fn char_string(&mut self) -> Result<Vec<u8>> {
        match self.0.next() {
            Some(FieldValue::CharString(string)) => Ok(string),
            _ => Err(Error::FieldMismatch),
        }
    }

    fn char_string_list(&mut self) -> Result<Vec<Vec<u8>>> {
        match self.0.next() {
            Some(FieldValue::CharStringList(strings)) => Ok(strings),
            _ => Err(Error::FieldMismatch),
        }
    }

    fn bytes(&mut self) -> Result<Vec<u8>> {
        match self.0.next() {
            Some(FieldValue::Bytes(octets)) => Ok(octets),
            _ => Err(Error::FieldMismatch),
        }
    }

    fn v4_addr(&mut self) -> Result<Ipv4Addr> {
        match self.0.next() {
            Some(FieldValue::V4Addr(address)) => Ok(address),
            _ => Err(Error::FieldMismatch),
        }
    }

    fn v6_addr(&mut self) -> Result<Ipv6Addr> {
        match self.0.next() {
            Some(FieldValue::V6Addr(address)) => Ok(address),
            _ => Err(Error::FieldMismatch),
        }
    }
}

////////////////////////////////////////////////////////////////////////
// RDATA TYPE                                                         //
////////////////////////////////////////////////////////////////////////

/// The RDATA of a record, for each RR type this crate understands.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Rdata {
    A(A),
    Aaaa(Aaaa),
    Ns(Ns),
    Cname(Cname),
    Ptr(Ptr),
    Dname(Dname),
    Soa(Soa),
    Mx(Mx),
    Srv(Srv),
    Naptr(Naptr),
    Rrsig(Rrsig),
    Txt(Txt),
    Spf(Spf),
    Opt(Opt),
}

/// Calls a [`Fields`] method on whichever record `$rdata` holds.
macro_rules! dispatch {
    ($rdata:expr, $record:ident => $body:expr) => {
        match $rdata {
            Rdata::A($record) => $body,
            Rdata::Aaaa($record) => $body,
            Rdata::Ns($record) => $body,
            Rdata::Cname($record) => $body,
            Rdata::Ptr($record) => $body,
            Rdata::Dname($record) => $body,
            Rdata::Soa($record) => $body,
            Rdata::Mx($record) => $body,
            Rdata::Srv($record) => $body,
            Rdata::Naptr($record) => $body,
            Rdata::Rrsig($record) => $body,
            Rdata::Txt($record) => $body,
            Rdata::Spf($record) => $body,
            Rdata::Opt($record) => $body,
        }
    };
}

/// Builds the [`Rdata`] variant for `$rr_type` with `$make`, which is
/// called as a generic function over the record type.
macro_rules! by_type {
    ($rr_type:expr, $make:ident ( $($arg:expr),* )) => {
        match $rr_type {
            Type::A => $make::<A>($($arg),*).map(Rdata::A),
            Type::AAAA => $make::<Aaaa>($($arg),*).map(Rdata::Aaaa),
            Type::NS => $make::<Ns>($($arg),*).map(Rdata::Ns),
            Type::CNAME => $make::<Cname>($($arg),*).map(Rdata::Cname),
            Type::PTR => $make::<Ptr>($($arg),*).map(Rdata::Ptr),
            Type::DNAME => $make::<Dname>($($arg),*).map(Rdata::Dname),
            Type::SOA => $make::<Soa>($($arg),*).map(Rdata::Soa),
            Type::MX => $make::<Mx>($($arg),*).map(Rdata::Mx),
            Type::SRV => $make::<Srv>($($arg),*).map(Rdata::Srv),
            Type::NAPTR => $make::<Naptr>($($arg),*).map(Rdata::Naptr),
            Type::RRSIG => $make::<Rrsig>($($arg),*).map(Rdata::Rrsig),
            Type::TXT => $make::<Txt>($($arg),*).map(Rdata::Txt),
            Type::SPF => $make::<Spf>($($arg),*).map(Rdata::Spf),
            Type::OPT => $make::<Opt>($($arg),*).map(Rdata::Opt),
            other => Err(Error::UnknownType(other)),
        }
    };
}

fn decode<R: Fields>(buffer: &mut InputBuffer, rdlength: u16) -> Result<R> {
    R::decode(buffer, rdlength)
}

fn parse<R: Fields>(text: &str) -> Result<R> {
    R::parse(text)
}

impl Rdata {
    /// Reads RDATA of type `rr_type` from `buffer`, starting with its
    /// two-octet RDLENGTH. Embedded names may be compressed.
    pub fn from_wire(rr_type: Type, buffer: &mut InputBuffer) -> Result<Self> {
        let rdlength = buffer.read_u16()?;
        Self::from_wire_with_len(rr_type, buffer, rdlength)
    }

    /// Reads `rdlength` octets of RDATA of type `rr_type` from
    /// `buffer`, for callers that have already consumed RDLENGTH.
    pub fn from_wire_with_len(rr_type: Type, buffer: &mut InputBuffer, rdlength: u16) -> Result<Self> {
        if rr_type.has_rdata_support() && buffer.remaining() < rdlength as usize {
            return Err(Error::Truncated);
        }
        by_type!(rr_type, decode(buffer, rdlength))
    }

    /// Parses the presentation form of RDATA of type `rr_type`, e.g.
    /// `10 mail.example.com.` for MX.
    pub fn from_str_typed(rr_type: Type, text: &str) -> Result<Self> {
        by_type!(rr_type, parse(text))
    }

    /// Writes the RDATA (without RDLENGTH) into `render`.
    pub fn render(&self, render: &mut MessageRender) -> Result<()> {
        dispatch!(self, record => record.render(render))
    }

    /// Returns the RR type of this RDATA.
    pub fn rr_type(&self) -> Type {
        fn type_of<R: Fields>(_: &R) -> Type {
            R::RR_TYPE
        }
        dispatch!(self, record => type_of(record))
    }
}

impl Type {
    /// Whether [`Rdata`] can represent records of this type.
    pub fn has_rdata_support(self) -> bool {
        matches!(
            self,
            Type::A
                | Type::AAAA
                | Type::NS
                | Type::CNAME
                | Type::PTR
                | Type::DNAME
                | Type::SOA
                | Type::MX
                | Type::SRV
                | Type::NAPTR
                | Type::RRSIG
                | Type::TXT
                | Type::SPF
                | Type::OPT
        )
    }
}

impl fmt::Display for Rdata {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        dispatch!(self, record => record.format(f))
    }
}

////////////////////////////////////////////////////////////////////////
// TESTS                                                              //
////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::*;

    fn decode_all(rr_type: Type, wire: &[u8]) -> Result<Rdata> {
        let mut buffer = InputBuffer::new(wire);
        let rdata = Rdata::from_wire(rr_type, &mut buffer)?;
        assert_eq!(buffer.remaining(), 0);
        Ok(rdata)
    }

    fn rendered(rdata: &Rdata) -> Vec<u8> {
        let mut render = MessageRender::new();
        rdata.render(&mut render).unwrap();
        render.data().to_vec()
    }

    #[test]
    fn unknown_type_is_rejected() {
        let mut buffer = InputBuffer::new(b"\x00\x01\x00");
        assert_eq!(
            Rdata::from_wire(Type::HINFO, &mut buffer),
            Err(Error::UnknownType(Type::HINFO))
        );
        assert_eq!(
            Rdata::from_str_typed(Type::from(65280), "x"),
            Err(Error::UnknownType(Type::from(65280)))
        );
    }

    #[test]
    fn rdlength_past_end_of_message_is_truncated() {
        assert_eq!(
            decode_all(Type::A, b"\x00\x05\x01\x02\x03\x04"),
            Err(Error::Truncated)
        );
    }

    #[test]
    fn short_rdlength_is_truncated() {
        assert_eq!(
            decode_all(Type::MX, b"\x00\x01\x00\x0a\x00"),
            Err(Error::Truncated)
        );
    }

    #[test]
    fn extra_rdata_is_rejected() {
        let mut buffer = InputBuffer::new(b"\x00\x05\xc0\x00\x02\x01\xff");
        assert_eq!(
            Rdata::from_wire(Type::A, &mut buffer),
            Err(Error::TrailingData)
        );
    }

    #[test]
    fn field_count_mismatch_is_reported() {
        assert_eq!(
            Rdata::from_str_typed(Type::MX, "10"),
            Err(Error::FieldCount {
                rr_type: Type::MX,
                expected: 2,
                found: 1
            })
        );
        assert_eq!(
            Rdata::from_str_typed(Type::A, "192.0.2.1 192.0.2.2"),
            Err(Error::FieldCount {
                rr_type: Type::A,
                expected: 1,
                found: 2
            })
        );
    }

    #[test]
    fn rr_type_matches_variant() {
        let rdata = Rdata::from_str_typed(Type::SPF, "\"v=spf1 -all\"").unwrap();
        assert_eq!(rdata.rr_type(), Type::SPF);
        let rdata = Rdata::from_str_typed(Type::DNAME, "example.com.").unwrap();
        assert_eq!(rdata.rr_type(), Type::DNAME);
    }

    #[test]
    fn text_and_wire_forms_agree() {
        let rdata = Rdata::from_str_typed(Type::MX, "10 mail.knet.cn.").unwrap();
        let wire = rendered(&rdata);
        assert_eq!(wire, b"\x00\x0a\x04mail\x04knet\x02cn\x00");
        let mut with_len = vec![0, wire.len() as u8];
        with_len.extend_from_slice(&wire);
        assert_eq!(decode_all(Type::MX, &with_len), Ok(rdata.clone()));
        assert_eq!(rdata.to_string(), "10 mail.knet.cn.");
    }

    #[test]
    fn errors_display() {
        let err = Error::FieldCount {
            rr_type: Type::SOA,
            expected: 7,
            found: 6,
        };
        assert_eq!(err.to_string(), "SOA RDATA needs 7 fields but 6 were given");
        assert_eq!(
            Error::from(buffer::Error::UnexpectedEnd),
            Error::Truncated
        );
    }
}
