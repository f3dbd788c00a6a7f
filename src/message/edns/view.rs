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

//! The private client view EDNS option.

use std::fmt;

use super::super::{Error, Result};
use crate::render::MessageRender;

pub const VIEW_CODE: u16 = 53;

/// Names the view a client wants its query answered from. The view is
/// carried as raw octets.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct ViewOption {
    pub view: Vec<u8>,
}

impl ViewOption {
    pub fn new(view: impl Into<Vec<u8>>) -> Self {
        Self { view: view.into() }
    }

    pub(super) fn from_data(data: &[u8]) -> Self {
        Self::new(data)
    }

    pub(super) fn render(&self, render: &mut MessageRender) -> Result<()> {
        let len = u16::try_from(self.view.len()).or(Err(Error::OptionTooLong))?;
        render.write_u16(VIEW_CODE);
        render.write_u16(len);
        render.write_data(&self.view);
        Ok(())
    }
}

impl fmt::Display for ViewOption {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&String::from_utf8_lossy(&self.view))
    }
}
