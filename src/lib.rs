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

//! A library for reading, writing, and printing DNS messages.
//!
//! The pieces build on each other: [`buffer`] provides the cursors,
//! [`name`] the domain name type, [`render`] the compressing message
//! writer, [`rr`] record types and RDATA, and [`message`] whole
//! messages with EDNS.
//!
//! ```
//! use dnsmsg::message::Message;
//! use dnsmsg::render::MessageRender;
//! use dnsmsg::rr::Type;
//!
//! let mut query = Message::make_query("www.knet.cn.".parse().unwrap(), Type::A, 4096, false);
//! let mut render = MessageRender::new();
//! query.render(&mut render).unwrap();
//! let decoded = Message::from_wire(render.data()).unwrap();
//! assert_eq!(decoded.question, query.question);
//! ```

#[macro_use]
mod util;

pub mod buffer;
pub mod class;
pub mod message;
pub mod name;
pub mod render;
pub mod rr;
