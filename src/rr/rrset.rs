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

//! Implementation of the [`RRset`] type.

use std::fmt;

#[cfg(feature = "serde")]
use serde::ser::{Serialize, SerializeSeq, SerializeStruct, Serializer};

use super::rdata::{Error, Rdata, Result};
use super::{Ttl, Type};
use crate::buffer::InputBuffer;
use crate::class::Class;
use crate::name::Name;
use crate::render::MessageRender;

////////////////////////////////////////////////////////////////////////
// RRSETS                                                             //
////////////////////////////////////////////////////////////////////////

/// A data structure for resource record sets.
///
/// [RFC 2181 § 5] defined an RRset as a group of records with the same
/// owner, class, and type, and also stipulated that all records in an
/// RRset have the same TTL. Multiple records are stored in the same
/// [`RRset`] by setting their common owner, [`Type`], [`Class`], and
/// [`Ttl`], and then pushing their [`Rdata`]s, one for each record.
/// Every [`Rdata`] is expected to be of the RRset's type.
///
/// [RFC 2181 § 5]: https://datatracker.ietf.org/doc/html/rfc2181#section-5
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RRset {
    pub name: Name,
    pub rr_type: Type,
    pub class: Class,
    pub ttl: Ttl,
    pub rdatas: Vec<Rdata>,
}

impl RRset {
    /// Creates a new [`RRset`] with no record data.
    pub fn new(name: Name, rr_type: Type, class: Class, ttl: Ttl) -> Self {
        Self {
            name,
            rr_type,
            class,
            ttl,
            rdatas: Vec::new(),
        }
    }

    /// Reads one resource record from `buffer`, producing an RRset
    /// with a single [`Rdata`]. The owner name may be compressed.
    pub fn from_wire(buffer: &mut InputBuffer) -> Result<Self> {
        let name = Name::from_wire(buffer, true)?;
        let rr_type = Type::from(buffer.read_u16()?);
        let class = Class::from(buffer.read_u16()?);
        let ttl = Ttl::from(buffer.read_u32()?);
        let rdata = Rdata::from_wire(rr_type, buffer)?;
        Ok(Self {
            name,
            rr_type,
            class,
            ttl,
            rdatas: vec![rdata],
        })
    }

    /// Writes one resource record per [`Rdata`] into `render`. The
    /// owner name is compressed whenever the renderer allows it. On
    /// error, the record that failed is removed from the output.
    pub fn render(&self, render: &mut MessageRender) -> Result<()> {
        for rdata in &self.rdatas {
            let found = rdata.rr_type();
            if found != self.rr_type {
                return Err(Error::TypeMismatch {
                    expected: self.rr_type,
                    found,
                });
            }
            let record_start = render.len();
            if let Err(err) = self.render_record(rdata, render) {
                render.trim(render.len() - record_start)?;
                return Err(err);
            }
        }
        Ok(())
    }

    fn render_record(&self, rdata: &Rdata, render: &mut MessageRender) -> Result<()> {
        render.write_name(&self.name, true);
        render.write_u16(self.rr_type.into());
        render.write_u16(self.class.into());
        render.write_u32(self.ttl.into());

        let rdlength_pos = render.len();
        render.skip(2);
        rdata.render(render)?;
        let rdlength = render.len() - rdlength_pos - 2;
        let rdlength = u16::try_from(rdlength).or(Err(Error::RdataTooLong))?;
        render.write_u16_at(rdlength, rdlength_pos)?;
        Ok(())
    }

    /// Returns the number of records in the RRset.
    pub fn rr_count(&self) -> usize {
        self.rdatas.len()
    }

    /// Determines whether `other` belongs to the same RRset, i.e. it
    /// has the same type and an equal owner name.
    pub fn is_same_rrset(&self, other: &RRset) -> bool {
        self.rr_type == other.rr_type && self.name == other.name
    }

    pub fn add_rdata(&mut self, rdata: Rdata) {
        self.rdatas.push(rdata);
    }

    /// Moves the last [`Rdata`] to the front, so that repeated calls
    /// cycle through every ordering used for round-robin answers.
    pub fn rotate(&mut self) {
        if self.rdatas.len() > 1 {
            self.rdatas.rotate_right(1);
        }
    }
}

/// Formats the RRset in master-file style, one line per record.
impl fmt::Display for RRset {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for rdata in &self.rdatas {
            writeln!(
                f,
                "{}\t{}\t{}\t{}\t{}",
                self.name, self.ttl, self.class, self.rr_type, rdata
            )?;
        }
        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////
// SERIALIZATION                                                      //
////////////////////////////////////////////////////////////////////////

/// Serializes the RRset as a sequence of records, each with `name`
/// (without the final dot), `type`, `class`, `ttl` and `rdata` in
/// presentation format.
#[cfg(feature = "serde")]
impl Serialize for RRset {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.rdatas.len()))?;
        for rdata in &self.rdatas {
            seq.serialize_element(&Record { rrset: self, rdata })?;
        }
        seq.end()
    }
}

#[cfg(feature = "serde")]
struct Record<'a> {
    rrset: &'a RRset,
    rdata: &'a Rdata,
}

#[cfg(feature = "serde")]
impl Serialize for Record<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut record = serializer.serialize_struct("Record", 5)?;
        record.serialize_field("name", &self.rrset.name.to_text(true))?;
        record.serialize_field("type", &self.rrset.rr_type.to_string())?;
        record.serialize_field("class", &self.rrset.class.to_string())?;
        record.serialize_field("ttl", &u32::from(self.rrset.ttl))?;
        record.serialize_field("rdata", &self.rdata.to_string())?;
        record.end()
    }
}

////////////////////////////////////////////////////////////////////////
// TESTS                                                              //
////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use lazy_static::lazy_static;

    use super::*;
    use crate::render::CompressionMode;

    lazy_static! {
        static ref WWW_KNET_CN: Name = "www.knet.cn.".parse().unwrap();
    }

    fn a(text: &str) -> Rdata {
        Rdata::from_str_typed(Type::A, text).unwrap()
    }

    fn a_rrset(addresses: &[&str]) -> RRset {
        let mut rrset = RRset::new(WWW_KNET_CN.clone(), Type::A, Class::IN, Ttl::from(3600));
        for address in addresses {
            rrset.add_rdata(a(address));
        }
        rrset
    }

    const A_RECORD: &[u8] =
        b"\x03www\x04knet\x02cn\x00\x00\x01\x00\x01\x00\x00\x0e\x10\x00\x04\xc0\x00\x02\x01";

    #[test]
    fn from_wire_reads_one_record() {
        let mut buffer = InputBuffer::new(A_RECORD);
        let rrset = RRset::from_wire(&mut buffer).unwrap();
        assert_eq!(rrset, a_rrset(&["192.0.2.1"]));
        assert_eq!(buffer.remaining(), 0);
    }

    #[test]
    fn from_wire_propagates_truncation() {
        let mut buffer = InputBuffer::new(&A_RECORD[..A_RECORD.len() - 1]);
        assert_eq!(RRset::from_wire(&mut buffer), Err(Error::Truncated));
        let mut buffer = InputBuffer::new(&A_RECORD[..14]);
        assert_eq!(RRset::from_wire(&mut buffer), Err(Error::Truncated));
    }

    #[test]
    fn render_writes_one_record_per_rdata() {
        let rrset = a_rrset(&["192.0.2.1", "192.0.2.2"]);
        let mut render = MessageRender::new();
        rrset.render(&mut render).unwrap();
        let data = render.data();
        assert_eq!(&data[..A_RECORD.len()], A_RECORD);
        assert_eq!(
            &data[A_RECORD.len()..],
            b"\xc0\x00\x00\x01\x00\x01\x00\x00\x0e\x10\x00\x04\xc0\x00\x02\x02"
        );
    }

    #[test]
    fn render_rejects_oversized_rdata() {
        let mut rrset = RRset::new(WWW_KNET_CN.clone(), Type::OPT, Class::from(4096), Ttl::from(0));
        rrset.add_rdata(Rdata::Opt(crate::rr::rdata::Opt {
            data: vec![0; 65536],
        }));
        let mut render = MessageRender::new();
        render.write_data(b"\x00\x01");
        assert_eq!(rrset.render(&mut render), Err(Error::RdataTooLong));
        assert_eq!(render.data(), b"\x00\x01");
    }

    #[test]
    fn render_rejects_rdata_of_another_type() {
        let mut rrset = a_rrset(&["192.0.2.1"]);
        rrset.add_rdata(Rdata::from_str_typed(Type::MX, "10 mail.knet.cn.").unwrap());
        let mut render = MessageRender::new();
        assert_eq!(
            rrset.render(&mut render),
            Err(Error::TypeMismatch {
                expected: Type::A,
                found: Type::MX,
            })
        );
        assert_eq!(render.data(), A_RECORD);
    }

    #[test]
    fn example_record_round_trips_without_compression() {
        let wire: &[u8] = b"\x04test\x07example\x03com\x00\x00\x01\x00\x01\
                            \x00\x00\x0e\x10\x00\x04\xc0\x00\x02\x01";
        let mut buffer = InputBuffer::new(wire);
        let rrset = RRset::from_wire(&mut buffer).unwrap();
        assert_eq!(rrset.name, "test.example.com.".parse().unwrap());
        assert_eq!(rrset.rr_type, Type::A);
        assert_eq!(rrset.class, Class::IN);
        assert_eq!(rrset.ttl, Ttl::from(3600));
        assert_eq!(rrset.rdatas, vec![a("192.0.2.1")]);

        let mut render = MessageRender::new();
        render.set_compression_mode(CompressionMode::Disabled);
        rrset.render(&mut render).unwrap();
        assert_eq!(render.data(), wire);
    }

    #[test]
    fn rotate_moves_last_to_front() {
        let mut rrset = a_rrset(&["192.0.2.1", "192.0.2.2", "192.0.2.3"]);
        rrset.rotate();
        assert_eq!(
            rrset.rdatas,
            vec![a("192.0.2.3"), a("192.0.2.1"), a("192.0.2.2")]
        );
        rrset.rotate();
        rrset.rotate();
        assert_eq!(rrset, a_rrset(&["192.0.2.1", "192.0.2.2", "192.0.2.3"]));

        let mut single = a_rrset(&["192.0.2.1"]);
        single.rotate();
        assert_eq!(single, a_rrset(&["192.0.2.1"]));
    }

    #[test]
    fn is_same_rrset_ignores_case_class_and_ttl() {
        let rrset = a_rrset(&["192.0.2.1"]);
        let mut other = RRset::new("WWW.KNET.CN.".parse().unwrap(), Type::A, Class::CH, Ttl::from(1));
        assert!(rrset.is_same_rrset(&other));
        other.rr_type = Type::AAAA;
        assert!(!rrset.is_same_rrset(&other));
    }

    #[test]
    fn rr_count_counts_rdatas() {
        assert_eq!(a_rrset(&[]).rr_count(), 0);
        assert_eq!(a_rrset(&["192.0.2.1", "192.0.2.2"]).rr_count(), 2);
    }

    #[test]
    fn display_is_one_line_per_record() {
        let rrset = a_rrset(&["192.0.2.1", "192.0.2.2"]);
        assert_eq!(
            rrset.to_string(),
            "www.knet.cn.\t3600\tIN\tA\t192.0.2.1\nwww.knet.cn.\t3600\tIN\tA\t192.0.2.2\n"
        );
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serializes_one_object_per_record() {
        let rrset = a_rrset(&["192.0.2.1", "192.0.2.2"]);
        assert_eq!(
            serde_json::to_string(&rrset).unwrap(),
            "[{\"name\":\"www.knet.cn\",\"type\":\"A\",\"class\":\"IN\",\"ttl\":3600,\"rdata\":\"192.0.2.1\"},\
             {\"name\":\"www.knet.cn\",\"type\":\"A\",\"class\":\"IN\",\"ttl\":3600,\"rdata\":\"192.0.2.2\"}]"
        );
        assert_eq!(serde_json::to_string(&a_rrset(&[])).unwrap(), "[]");
    }
}
