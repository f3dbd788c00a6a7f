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

//! Implementation of the [`Class`] type for DNS classes.

use std::fmt;
use std::str::FromStr;

use crate::util::parse_generic;

/// Represents a class in the DNS.
///
/// A class is an unsigned 16-bit integer on the wire. The only class in
/// common use is [`IN`](Class::IN); [`NONE`](Class::NONE) and
/// [`ANY`](Class::ANY) only appear in questions and dynamic updates.
///
/// The class field of an OPT pseudo-record is not a class at all but
/// the sender's UDP payload size, so every `u16` is a valid `Class`
/// and [`Class::payload_size`] reads it back.
#[derive(Clone, Copy, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub struct Class(u16);

define_mnemonics! {
    Class {
        IN = 1, "IN";
        CH = 3, "CH";
        HS = 4, "HS";
        NONE = 254, "NONE";
        ANY = 255, "ANY";
    }
}

impl Class {
    /// Interprets the class field of an OPT record.
    pub fn payload_size(self) -> u16 {
        self.0
    }
}

impl From<u16> for Class {
    fn from(value: u16) -> Self {
        Self(value)
    }
}

impl From<Class> for u16 {
    fn from(class: Class) -> Self {
        class.0
    }
}

impl FromStr for Class {
    type Err = &'static str;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        if let Some(class) = Self::from_mnemonic(text) {
            return Ok(class);
        }
        match parse_generic(text, "CLASS") {
            Some(Ok(value)) => Ok(Self(value)),
            Some(Err(_)) => Err("class value is not a valid unsigned 16-bit integer"),
            None => Err("unknown class"),
        }
    }
}

impl fmt::Debug for Class {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{self}")
    }
}

impl fmt::Display for Class {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.mnemonic() {
            Some(mnemonic) => f.write_str(mnemonic),
            None => write!(f, "CLASS{}", self.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Class;

    #[test]
    fn unknown_classes_use_generic_form() {
        assert_eq!(Class::from(0xff00).to_string(), "CLASS65280");
        assert_eq!("class65280".parse::<Class>(), Ok(Class::from(65280)));
        assert_eq!("CLASS1".parse::<Class>(), Ok(Class::IN));
        assert!("CLASS65536".parse::<Class>().is_err());
    }

    #[test]
    fn mnemonics_are_case_insensitive() {
        assert_eq!("in".parse::<Class>(), Ok(Class::IN));
        assert_eq!("Any".parse::<Class>(), Ok(Class::ANY));
        assert_eq!(Class::NONE.to_string(), "NONE");
        assert!("BOGUS".parse::<Class>().is_err());
    }

    #[test]
    fn opt_payload_size_is_the_raw_value() {
        let class = Class::from(4096);
        assert_eq!(class.payload_size(), 4096);
        assert_eq!(class.to_string(), "CLASS4096");
    }
}
