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

//! The generic RDATA field codec.
//!
//! Every supported record type is described as a sequence of fields,
//! each with a wire coding ([`FieldCoding`]) and a presentation format
//! ([`FieldDisplay`]). The functions here convert a single field
//! between the wire, a [`FieldValue`], and text.

use std::fmt::Write;
use std::net::{Ipv4Addr, Ipv6Addr};

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use data_encoding::{BASE32, HEXLOWER, HEXLOWER_PERMISSIVE};

use super::{Error, Result};
use crate::buffer::InputBuffer;
use crate::name::Name;
use crate::render::MessageRender;
use crate::rr::Type;
use crate::util::split_fields;

/// The longest `<character-string>` payload.
pub const MAX_CHAR_STRING_LEN: usize = 255;

/// How a field is laid out on the wire.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum FieldCoding {
    /// A domain name that may be compressed when rendered.
    Name,

    /// A domain name that is always rendered uncompressed.
    NameUncompressed,

    U8,
    U16,
    U32,
    Ipv4,
    Ipv6,

    /// A single `<character-string>`: a length octet and that many
    /// octets.
    CharString,

    /// One or more `<character-string>`s filling the rest of the RDATA.
    Txt,

    /// Raw octets filling the rest of the RDATA.
    Binary,
}

/// How a field is written in presentation format.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum FieldDisplay {
    Name,
    Int,
    Ip,
    Txt,
    Hex,
    Base32,
    Base64,
    Str,

    /// A 16-bit RR type written as its mnemonic (e.g. `A`, `TYPE65280`).
    RrType,
}

/// The decoded payload of one field.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum FieldValue {
    Name(Name),
    U8(u8),
    U16(u16),
    U32(u32),
    V4Addr(Ipv4Addr),
    V6Addr(Ipv6Addr),
    CharString(Vec<u8>),
    CharStringList(Vec<Vec<u8>>),
    Bytes(Vec<u8>),
}

////////////////////////////////////////////////////////////////////////
// WIRE                                                               //
////////////////////////////////////////////////////////////////////////

/// Reads one field of kind `coding` from `buffer`, where `remaining` is
/// the number of RDATA octets not yet consumed. Returns the value along
/// with the new `remaining`.
pub fn decode_field(
    coding: FieldCoding,
    buffer: &mut InputBuffer,
    remaining: u16,
) -> Result<(FieldValue, u16)> {
    match coding {
        FieldCoding::Name | FieldCoding::NameUncompressed => {
            let start = buffer.position();
            let name = Name::from_wire(buffer, true)?;
            let consumed = buffer.position() - start;
            let remaining = checked_remaining(remaining, consumed)?;
            Ok((FieldValue::Name(name), remaining))
        }
        FieldCoding::U8 => {
            let remaining = checked_remaining(remaining, 1)?;
            Ok((FieldValue::U8(buffer.read_u8()?), remaining))
        }
        FieldCoding::U16 => {
            let remaining = checked_remaining(remaining, 2)?;
            Ok((FieldValue::U16(buffer.read_u16()?), remaining))
        }
        FieldCoding::U32 => {
            let remaining = checked_remaining(remaining, 4)?;
            Ok((FieldValue::U32(buffer.read_u32()?), remaining))
        }
        FieldCoding::Ipv4 => {
            let remaining = checked_remaining(remaining, 4)?;
            let octets: [u8; 4] = buffer.read_bytes(4)?.try_into().or(Err(Error::Truncated))?;
            Ok((FieldValue::V4Addr(octets.into()), remaining))
        }
        FieldCoding::Ipv6 => {
            let remaining = checked_remaining(remaining, 16)?;
            let octets: [u8; 16] = buffer.read_bytes(16)?.try_into().or(Err(Error::Truncated))?;
            Ok((FieldValue::V6Addr(octets.into()), remaining))
        }
        FieldCoding::CharString => {
            let (string, remaining) = decode_char_string(buffer, remaining)?;
            Ok((FieldValue::CharString(string), remaining))
        }
        FieldCoding::Txt => {
            let mut strings = Vec::new();
            let mut remaining = remaining;
            while remaining > 0 {
                let (string, rest) = decode_char_string(buffer, remaining)?;
                strings.push(string);
                remaining = rest;
            }
            Ok((FieldValue::CharStringList(strings), 0))
        }
        FieldCoding::Binary => {
            let octets = buffer.read_bytes(remaining as usize)?;
            Ok((FieldValue::Bytes(octets.to_vec()), 0))
        }
    }
}

fn checked_remaining(remaining: u16, consumed: usize) -> Result<u16> {
    (remaining as usize)
        .checked_sub(consumed)
        .map(|rest| rest as u16)
        .ok_or(Error::Truncated)
}

fn decode_char_string(buffer: &mut InputBuffer, remaining: u16) -> Result<(Vec<u8>, u16)> {
    let remaining = checked_remaining(remaining, 1)?;
    let len = buffer.read_u8()? as usize;
    let remaining = checked_remaining(remaining, len)?;
    Ok((buffer.read_bytes(len)?.to_vec(), remaining))
}

/// Writes one field of kind `coding` into `render`. Nothing is written
/// if an error is returned.
pub fn render_field(
    coding: FieldCoding,
    value: &FieldValue,
    render: &mut MessageRender,
) -> Result<()> {
    match (coding, value) {
        (FieldCoding::Name, FieldValue::Name(name)) => render.write_name(name, true),
        (FieldCoding::NameUncompressed, FieldValue::Name(name)) => render.write_name(name, false),
        (FieldCoding::U8, FieldValue::U8(value)) => render.write_u8(*value),
        (FieldCoding::U16, FieldValue::U16(value)) => render.write_u16(*value),
        (FieldCoding::U32, FieldValue::U32(value)) => render.write_u32(*value),
        (FieldCoding::Ipv4, FieldValue::V4Addr(address)) => render.write_data(&address.octets()),
        (FieldCoding::Ipv6, FieldValue::V6Addr(address)) => render.write_data(&address.octets()),
        (FieldCoding::CharString, FieldValue::CharString(string)) => {
            check_char_string(string)?;
            render_char_string(string, render);
        }
        (FieldCoding::Txt, FieldValue::CharStringList(strings)) => {
            for string in strings {
                check_char_string(string)?;
            }
            for string in strings {
                render_char_string(string, render);
            }
        }
        (FieldCoding::Binary, FieldValue::Bytes(octets)) => render.write_data(octets),
        _ => return Err(Error::FieldMismatch),
    }
    Ok(())
}

fn check_char_string(string: &[u8]) -> Result<()> {
    if string.len() > MAX_CHAR_STRING_LEN {
        Err(Error::StringTooLong)
    } else {
        Ok(())
    }
}

fn render_char_string(string: &[u8], render: &mut MessageRender) {
    render.write_u8(string.len() as u8);
    render.write_data(string);
}

////////////////////////////////////////////////////////////////////////
// TEXT                                                               //
////////////////////////////////////////////////////////////////////////

/// Parses the presentation form `text` of a field shown as `display`
/// into a value suitable for `coding`.
pub fn parse_field(display: FieldDisplay, text: &str, coding: FieldCoding) -> Result<FieldValue> {
    match (display, coding) {
        (FieldDisplay::Name, FieldCoding::Name | FieldCoding::NameUncompressed) => {
            Ok(FieldValue::Name(text.parse()?))
        }
        (FieldDisplay::Int, FieldCoding::U8) => parse_text(text).map(FieldValue::U8),
        (FieldDisplay::Int, FieldCoding::U16) => parse_text(text).map(FieldValue::U16),
        (FieldDisplay::Int, FieldCoding::U32) => parse_text(text).map(FieldValue::U32),
        (FieldDisplay::RrType, FieldCoding::U16) => text
            .parse::<Type>()
            .map(|rr_type| FieldValue::U16(rr_type.into()))
            .or(Err(Error::InvalidText)),
        (FieldDisplay::Ip, FieldCoding::Ipv4) => parse_text(text).map(FieldValue::V4Addr),
        (FieldDisplay::Ip, FieldCoding::Ipv6) => parse_text(text).map(FieldValue::V6Addr),
        (FieldDisplay::Str, FieldCoding::CharString) => {
            parse_char_string(text).map(FieldValue::CharString)
        }
        (FieldDisplay::Txt, FieldCoding::Txt) => split_fields(text)
            .ok_or(Error::InvalidText)?
            .into_iter()
            .map(parse_char_string)
            .collect::<Result<Vec<_>>>()
            .map(FieldValue::CharStringList),
        (FieldDisplay::Hex, FieldCoding::Binary) => HEXLOWER_PERMISSIVE
            .decode(text.as_bytes())
            .map(FieldValue::Bytes)
            .or(Err(Error::InvalidText)),
        (FieldDisplay::Base32, FieldCoding::Binary) => BASE32
            .decode(text.as_bytes())
            .map(FieldValue::Bytes)
            .or(Err(Error::InvalidText)),
        (FieldDisplay::Base64, FieldCoding::Binary) => BASE64
            .decode(text)
            .map(FieldValue::Bytes)
            .or(Err(Error::InvalidText)),
        _ => Err(Error::FieldMismatch),
    }
}

fn parse_text<T: std::str::FromStr>(text: &str) -> Result<T> {
    text.parse().or(Err(Error::InvalidText))
}

/// Parses a `<character-string>` in presentation format: either a bare
/// word or a double-quoted string. Escapes of the form `\X` and `\DDD`
/// are honored in both.
fn parse_char_string(text: &str) -> Result<Vec<u8>> {
    let inner = match text.strip_prefix('"') {
        Some(quoted) => quoted.strip_suffix('"').ok_or(Error::InvalidText)?,
        None => text,
    };

    let mut string = Vec::with_capacity(inner.len());
    let mut octets = inner.as_bytes();
    while let Some((&octet, rest)) = octets.split_first() {
        if octet != b'\\' {
            string.push(octet);
            octets = rest;
            continue;
        }
        match rest {
            [a, b, c, tail @ ..] if a.is_ascii_digit() && b.is_ascii_digit() && c.is_ascii_digit() => {
                let value = (a - b'0') as u16 * 100 + (b - b'0') as u16 * 10 + (c - b'0') as u16;
                string.push(u8::try_from(value).or(Err(Error::InvalidText))?);
                octets = tail;
            }
            [escaped, tail @ ..] => {
                string.push(*escaped);
                octets = tail;
            }
            [] => return Err(Error::InvalidText),
        }
    }

    check_char_string(&string)?;
    Ok(string)
}

/// Produces the presentation form of `value`, shown as `display`. A
/// value that does not fit `display` is written in the natural form of
/// its variant.
pub fn format_field(display: FieldDisplay, value: &FieldValue) -> String {
    match (display, value) {
        (FieldDisplay::RrType, FieldValue::U16(raw)) => Type::from(*raw).to_string(),
        (FieldDisplay::Hex, FieldValue::Bytes(octets)) => HEXLOWER.encode(octets),
        (FieldDisplay::Base32, FieldValue::Bytes(octets)) => BASE32.encode(octets),
        (FieldDisplay::Base64, FieldValue::Bytes(octets)) => BASE64.encode(octets),
        (_, FieldValue::Name(name)) => name.to_string(),
        (_, FieldValue::U8(value)) => value.to_string(),
        (_, FieldValue::U16(value)) => value.to_string(),
        (_, FieldValue::U32(value)) => value.to_string(),
        (_, FieldValue::V4Addr(address)) => address.to_string(),
        (_, FieldValue::V6Addr(address)) => address.to_string(),
        (_, FieldValue::CharString(string)) => {
            let mut text = String::new();
            format_char_string(string, &mut text);
            text
        }
        (_, FieldValue::CharStringList(strings)) => {
            let mut text = String::new();
            for (i, string) in strings.iter().enumerate() {
                if i > 0 {
                    text.push(' ');
                }
                format_char_string(string, &mut text);
            }
            text
        }
        (_, FieldValue::Bytes(octets)) => HEXLOWER.encode(octets),
    }
}

/// Writes a double-quoted `<character-string>`, escaping quotes and
/// backslashes and writing non-printable octets as `\DDD`.
fn format_char_string(string: &[u8], out: &mut String) {
    out.push('"');
    for &octet in string {
        match octet {
            b'"' | b'\\' => {
                out.push('\\');
                out.push(octet as char);
            }
            0x20..=0x7e => out.push(octet as char),
            _ => {
                let _ = write!(out, "\\{:03}", octet);
            }
        }
    }
    out.push('"');
}

////////////////////////////////////////////////////////////////////////
// TESTS                                                              //
////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_field_reports_remaining() {
        let mut buffer = InputBuffer::new(b"\x01\x02\x03\x04\x05\x06\x07");
        let (value, remaining) = decode_field(FieldCoding::U16, &mut buffer, 7).unwrap();
        assert_eq!(value, FieldValue::U16(0x0102));
        assert_eq!(remaining, 5);
        let (value, remaining) = decode_field(FieldCoding::U32, &mut buffer, remaining).unwrap();
        assert_eq!(value, FieldValue::U32(0x03040506));
        assert_eq!(remaining, 1);
    }

    #[test]
    fn decode_field_rejects_field_longer_than_rdata() {
        let mut buffer = InputBuffer::new(b"\x01\x02\x03\x04");
        assert_eq!(
            decode_field(FieldCoding::U32, &mut buffer, 3),
            Err(Error::Truncated)
        );
        assert_eq!(buffer.position(), 0);
    }

    #[test]
    fn decode_field_rejects_name_longer_than_rdata() {
        let mut buffer = InputBuffer::new(b"\x04knet\x02cn\x00");
        assert_eq!(
            decode_field(FieldCoding::Name, &mut buffer, 5),
            Err(Error::Truncated)
        );
    }

    #[test]
    fn decode_field_follows_pointers_in_names() {
        let message = b"\x02cn\x00\x04knet\xc0\x00";
        let mut buffer = InputBuffer::new(message);
        buffer.set_position(4).unwrap();
        let (value, remaining) = decode_field(FieldCoding::NameUncompressed, &mut buffer, 7).unwrap();
        assert_eq!(value, FieldValue::Name("knet.cn.".parse().unwrap()));
        assert_eq!(remaining, 0);
    }

    #[test]
    fn decode_field_reads_txt_strings() {
        let mut buffer = InputBuffer::new(b"\x05hello\x00\x05world");
        let (value, remaining) = decode_field(FieldCoding::Txt, &mut buffer, 13).unwrap();
        assert_eq!(
            value,
            FieldValue::CharStringList(vec![b"hello".to_vec(), vec![], b"world".to_vec()])
        );
        assert_eq!(remaining, 0);
    }

    #[test]
    fn decode_field_rejects_overlong_char_string() {
        let mut buffer = InputBuffer::new(b"\x05hello");
        assert_eq!(
            decode_field(FieldCoding::CharString, &mut buffer, 4),
            Err(Error::Truncated)
        );
    }

    #[test]
    fn decode_field_binary_consumes_rest() {
        let mut buffer = InputBuffer::new(b"\xde\xad\xbe\xef");
        let (value, remaining) = decode_field(FieldCoding::Binary, &mut buffer, 4).unwrap();
        assert_eq!(value, FieldValue::Bytes(vec![0xde, 0xad, 0xbe, 0xef]));
        assert_eq!(remaining, 0);
    }

    #[test]
    fn decode_field_propagates_end_of_input() {
        let mut buffer = InputBuffer::new(b"\x01");
        assert_eq!(
            decode_field(FieldCoding::U16, &mut buffer, 2),
            Err(Error::Truncated)
        );
    }

    #[test]
    fn render_field_writes_values() {
        let mut render = MessageRender::new();
        render_field(FieldCoding::U16, &FieldValue::U16(10), &mut render).unwrap();
        render_field(
            FieldCoding::Ipv4,
            &FieldValue::V4Addr(Ipv4Addr::new(192, 0, 2, 1)),
            &mut render,
        )
        .unwrap();
        render_field(
            FieldCoding::CharString,
            &FieldValue::CharString(b"abc".to_vec()),
            &mut render,
        )
        .unwrap();
        assert_eq!(render.data(), b"\x00\x0a\xc0\x00\x02\x01\x03abc");
    }

    #[test]
    fn render_field_rejects_mismatch() {
        let mut render = MessageRender::new();
        assert_eq!(
            render_field(FieldCoding::U8, &FieldValue::U16(1), &mut render),
            Err(Error::FieldMismatch)
        );
        assert_eq!(render.len(), 0);
    }

    #[test]
    fn render_field_rejects_long_strings() {
        let mut render = MessageRender::new();
        let strings = FieldValue::CharStringList(vec![b"ok".to_vec(), vec![b'x'; 256]]);
        assert_eq!(
            render_field(FieldCoding::Txt, &strings, &mut render),
            Err(Error::StringTooLong)
        );
        assert_eq!(render.len(), 0);
    }

    #[test]
    fn render_field_compresses_only_compressible_names() {
        let name: Name = "knet.cn.".parse().unwrap();
        let value = FieldValue::Name(name);
        let mut render = MessageRender::new();
        render_field(FieldCoding::Name, &value, &mut render).unwrap();
        render_field(FieldCoding::NameUncompressed, &value, &mut render).unwrap();
        render_field(FieldCoding::Name, &value, &mut render).unwrap();
        assert_eq!(render.len(), 9 + 9 + 2);
    }

    #[test]
    fn parse_field_checks_integer_width() {
        assert_eq!(
            parse_field(FieldDisplay::Int, "255", FieldCoding::U8),
            Ok(FieldValue::U8(255))
        );
        assert_eq!(
            parse_field(FieldDisplay::Int, "256", FieldCoding::U8),
            Err(Error::InvalidText)
        );
        assert_eq!(
            parse_field(FieldDisplay::Int, "65536", FieldCoding::U16),
            Err(Error::InvalidText)
        );
        assert_eq!(
            parse_field(FieldDisplay::Int, "-1", FieldCoding::U32),
            Err(Error::InvalidText)
        );
    }

    #[test]
    fn parse_field_reads_addresses() {
        assert_eq!(
            parse_field(FieldDisplay::Ip, "192.0.2.1", FieldCoding::Ipv4),
            Ok(FieldValue::V4Addr(Ipv4Addr::new(192, 0, 2, 1)))
        );
        assert_eq!(
            parse_field(FieldDisplay::Ip, "2001:db8::1", FieldCoding::Ipv6),
            Ok(FieldValue::V6Addr("2001:db8::1".parse().unwrap()))
        );
        assert_eq!(
            parse_field(FieldDisplay::Ip, "2001:db8::1", FieldCoding::Ipv4),
            Err(Error::InvalidText)
        );
    }

    #[test]
    fn parse_field_reads_txt_strings() {
        assert_eq!(
            parse_field(FieldDisplay::Txt, r#""hello world" bare "say \"hi\"""#, FieldCoding::Txt),
            Ok(FieldValue::CharStringList(vec![
                b"hello world".to_vec(),
                b"bare".to_vec(),
                b"say \"hi\"".to_vec(),
            ]))
        );
        assert_eq!(
            parse_field(FieldDisplay::Txt, "\"open", FieldCoding::Txt),
            Err(Error::InvalidText)
        );
    }

    #[test]
    fn parse_field_reads_decimal_escapes() {
        assert_eq!(
            parse_field(FieldDisplay::Str, r#""a\009b""#, FieldCoding::CharString),
            Ok(FieldValue::CharString(b"a\tb".to_vec()))
        );
        assert_eq!(
            parse_field(FieldDisplay::Str, r#""\256""#, FieldCoding::CharString),
            Err(Error::InvalidText)
        );
    }

    #[test]
    fn parse_field_rejects_long_strings() {
        let text = "x".repeat(256);
        assert_eq!(
            parse_field(FieldDisplay::Str, &text, FieldCoding::CharString),
            Err(Error::StringTooLong)
        );
    }

    #[test]
    fn parse_field_decodes_binary() {
        assert_eq!(
            parse_field(FieldDisplay::Hex, "00ff0A", FieldCoding::Binary),
            Ok(FieldValue::Bytes(vec![0x00, 0xff, 0x0a]))
        );
        assert_eq!(
            parse_field(FieldDisplay::Base64, "3q2+7w==", FieldCoding::Binary),
            Ok(FieldValue::Bytes(vec![0xde, 0xad, 0xbe, 0xef]))
        );
        assert_eq!(
            parse_field(FieldDisplay::Base32, "32W353Y=", FieldCoding::Binary),
            Ok(FieldValue::Bytes(vec![0xde, 0xad, 0xbe, 0xef]))
        );
        assert_eq!(
            parse_field(FieldDisplay::Hex, "abc", FieldCoding::Binary),
            Err(Error::InvalidText)
        );
    }

    #[test]
    fn parse_field_reads_type_mnemonics() {
        assert_eq!(
            parse_field(FieldDisplay::RrType, "AAAA", FieldCoding::U16),
            Ok(FieldValue::U16(28))
        );
        assert_eq!(
            parse_field(FieldDisplay::RrType, "TYPE65280", FieldCoding::U16),
            Ok(FieldValue::U16(65280))
        );
    }

    #[test]
    fn parse_field_rejects_mismatch() {
        assert_eq!(
            parse_field(FieldDisplay::Base64, "AA==", FieldCoding::U8),
            Err(Error::FieldMismatch)
        );
    }

    #[test]
    fn format_field_pads_hex() {
        assert_eq!(
            format_field(FieldDisplay::Hex, &FieldValue::Bytes(vec![0x00, 0x0a, 0xff])),
            "000aff"
        );
    }

    #[test]
    fn format_field_quotes_strings() {
        let strings = FieldValue::CharStringList(vec![
            b"hello world".to_vec(),
            b"q\"\\".to_vec(),
            b"\x07".to_vec(),
        ]);
        assert_eq!(
            format_field(FieldDisplay::Txt, &strings),
            r#""hello world" "q\"\\" "\007""#
        );
    }

    #[test]
    fn format_field_shows_types_and_names() {
        assert_eq!(format_field(FieldDisplay::RrType, &FieldValue::U16(1)), "A");
        assert_eq!(format_field(FieldDisplay::Int, &FieldValue::U16(1)), "1");
        assert_eq!(
            format_field(FieldDisplay::Name, &FieldValue::Name("knet.cn".parse().unwrap())),
            "knet.cn."
        );
    }
}
