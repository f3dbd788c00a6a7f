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

//! Provides the [`Type`] structure for DNS RR types.

use std::fmt;
use std::str::FromStr;

use crate::util::parse_generic;

////////////////////////////////////////////////////////////////////////
// RR TYPES                                                           //
////////////////////////////////////////////////////////////////////////

/// Represents the RR type of a DNS record.
///
/// An RR type is represented on the wire as an unsigned 16-bit integer.
/// Hence this is basically a wrapper around `u16` with nice
/// [`Debug`](fmt::Debug), [`Display`](fmt::Display), and [`FromStr`]
/// implementations for working with the common textual representations
/// of RR types. In addition, constants for registered RR types (e.g.
/// [`Type::A`]) are provided. Only some of them have RDATA support in
/// [`Rdata`](super::Rdata).
#[derive(Clone, Copy, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub struct Type(u16);

define_mnemonics! {
    Type {
        A = 1, "A";
        NS = 2, "NS";
        MD = 3, "MD";
        MF = 4, "MF";
        CNAME = 5, "CNAME";
        SOA = 6, "SOA";
        MB = 7, "MB";
        MG = 8, "MG";
        MR = 9, "MR";
        NULL = 10, "NULL";
        WKS = 11, "WKS";
        PTR = 12, "PTR";
        HINFO = 13, "HINFO";
        MINFO = 14, "MINFO";
        MX = 15, "MX";
        TXT = 16, "TXT";
        RP = 17, "RP";
        AFSDB = 18, "AFSDB";
        X25 = 19, "X25";
        ISDN = 20, "ISDN";
        RT = 21, "RT";
        NSAP = 22, "NSAP";
        NSAP_PTR = 23, "NSAP-PTR";
        SIG = 24, "SIG";
        KEY = 25, "KEY";
        PX = 26, "PX";
        GPOS = 27, "GPOS";
        AAAA = 28, "AAAA";
        LOC = 29, "LOC";
        NXT = 30, "NXT";
        EID = 31, "EID";
        NIMLOC = 32, "NIMLOC";
        SRV = 33, "SRV";
        ATMA = 34, "ATMA";
        NAPTR = 35, "NAPTR";
        KX = 36, "KX";
        CERT = 37, "CERT";
        A6 = 38, "A6";
        DNAME = 39, "DNAME";
        SINK = 40, "SINK";
        OPT = 41, "OPT";
        APL = 42, "APL";
        DS = 43, "DS";
        SSHFP = 44, "SSHFP";
        IPSECKEY = 45, "IPSECKEY";
        RRSIG = 46, "RRSIG";
        NSEC = 47, "NSEC";
        DNSKEY = 48, "DNSKEY";
        DHCID = 49, "DHCID";
        NSEC3 = 50, "NSEC3";
        NSEC3PARAM = 51, "NSEC3PARAM";
        TLSA = 52, "TLSA";
        HIP = 55, "HIP";
        NINFO = 56, "NINFO";
        RKEY = 57, "RKEY";
        TALINK = 58, "TALINK";
        CDS = 59, "CDS";
        SPF = 99, "SPF";
        UINFO = 100, "UINFO";
        UID = 101, "UID";
        GID = 102, "GID";
        UNSPEC = 103, "UNSPEC";
        NID = 104, "NID";
        L32 = 105, "L32";
        L64 = 106, "L64";
        LP = 107, "LP";
        EUI48 = 108, "EUI48";
        EUI64 = 109, "EUI64";
        TKEY = 249, "TKEY";
        TSIG = 250, "TSIG";
        IXFR = 251, "IXFR";
        AXFR = 252, "AXFR";
        MAILB = 253, "MAILB";
        MAILA = 254, "MAILA";
        ANY = 255, "ANY";
        URI = 256, "URI";
        CAA = 257, "CAA";
        TA = 32768, "TA";
        DLV = 32769, "DLV";
    }
}

impl From<u16> for Type {
    fn from(raw: u16) -> Self {
        Self(raw)
    }
}

impl From<Type> for u16 {
    fn from(rr_type: Type) -> Self {
        rr_type.0
    }
}

impl FromStr for Type {
    type Err = &'static str;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        if let Some(rr_type) = Self::from_mnemonic(text) {
            return Ok(rr_type);
        }
        match parse_generic(text, "TYPE") {
            Some(Ok(value)) => Ok(Self(value)),
            Some(Err(_)) => Err("type value is not a valid unsigned 16-bit integer"),
            None => Err("unknown type"),
        }
    }
}

impl fmt::Debug for Type {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{self}")
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.mnemonic() {
            Some(mnemonic) => f.write_str(mnemonic),
            None => write!(f, "TYPE{}", self.0), // RFC 3597 § 5
        }
    }
}

////////////////////////////////////////////////////////////////////////
// TESTS                                                              //
////////////////////////////////////////////////////////////////////////
