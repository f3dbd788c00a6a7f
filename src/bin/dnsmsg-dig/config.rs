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

//! Implements the configuration file and the merging of its defaults
//! with the command line.

use std::fs;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use log::debug;
use serde::Deserialize;

use crate::args::Args;

const DEFAULT_SERVER: IpAddr = IpAddr::V4(Ipv4Addr::LOCALHOST);
const DEFAULT_PORT: u16 = 53;
const DEFAULT_UDP_SIZE: u16 = 4096;
const DEFAULT_TIMEOUT_SECS: u64 = 5;

/// The configuration file. Every setting is optional; anything given
/// on the command line takes precedence.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    pub server: Option<IpAddr>,
    pub port: Option<u16>,
    pub udp_size: Option<u16>,
    pub timeout: Option<u64>,
}

/// Loads the configuration file given by `path`.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<Config> {
    let raw_config =
        fs::read_to_string(path.as_ref()).context("failed to read the configuration file")?;
    toml::from_str(&raw_config).context("failed to parse the configuration file")
}

/// The settings used to send a query.
#[derive(Debug, Eq, PartialEq)]
pub struct Settings {
    pub server: SocketAddr,
    pub udp_size: u16,
    pub timeout: Duration,
}

/// Combines the command line, the configuration file, and built-in
/// defaults, in that order of precedence.
pub fn resolve(args: &Args, config: &Config) -> Settings {
    let ip = args.server.or(config.server).unwrap_or(DEFAULT_SERVER);
    let port = args.port.or(config.port).unwrap_or(DEFAULT_PORT);
    let udp_size = args.udp_size.or(config.udp_size).unwrap_or(DEFAULT_UDP_SIZE);
    let timeout = args
        .timeout
        .or(config.timeout)
        .unwrap_or(DEFAULT_TIMEOUT_SECS);

    let settings = Settings {
        server: SocketAddr::new(ip, port),
        udp_size,
        timeout: Duration::from_secs(timeout),
    };
    debug!(
        "Settings resolved:\n\
         Server:   {}\n\
         UDP size: {}\n\
         Timeout:  {:?}",
        settings.server, settings.udp_size, settings.timeout,
    );
    settings
}
