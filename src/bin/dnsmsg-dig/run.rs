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

//! Implements sending the query and printing the response.

use std::fmt::Write;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr, UdpSocket};
use std::process;
use std::time::Instant;

use anyhow::{anyhow, Context, Result};
use env_logger::Env;
use log::{debug, error, warn};

use dnsmsg::message::{Flag, Message};
use dnsmsg::render::MessageRender;

use crate::args::Args;
use crate::config::{self, Config, Settings};

/// The largest datagram we accept.
const MAX_RESPONSE_LEN: usize = 65535;

/// Runs the client.
pub fn run(args: Args) {
    env_logger::init_from_env(Env::new().default_filter_or("warn"));

    if let Err(e) = try_running(args) {
        let mut message = String::from("Query failed:");
        for (i, cause) in e.chain().enumerate() {
            write!(message, "\n[{}] {}", i + 1, cause).unwrap();
        }
        error!("{}", message);
        process::exit(1);
    }
}

fn try_running(args: Args) -> Result<()> {
    let config = match args.config {
        Some(ref path) => {
            config::load_from_path(path).context("failed to load the configuration")?
        }
        None => Config::default(),
    };
    let settings = config::resolve(&args, &config);

    let mut query = build_query(&args, settings.udp_size)?;
    let start = Instant::now();
    let response = exchange(&mut query, &settings)?;
    let elapsed = start.elapsed();

    print!("{}", response);
    println!();
    println!(";; Query time: {} msec", elapsed.as_millis());
    println!(";; SERVER: {}#{}", settings.server.ip(), settings.server.port());
    Ok(())
}

/// Builds the query described by the command line.
fn build_query(args: &Args, udp_size: u16) -> Result<Message> {
    let mut query = Message::make_query(args.name.clone(), args.rr_type, udp_size, args.dnssec);
    query.header.set_flag(Flag::Fetch, args.fetch);

    if let Some(ref mut edns) = query.edns {
        if let Some(ref subnet) = args.subnet {
            match (subnet.address, subnet.prefix) {
                (IpAddr::V4(address), None) => edns.add_subnet_v4(address),
                (address, prefix) => edns
                    .add_subnet(address, prefix.unwrap_or(128))
                    .context("invalid client subnet")?,
            }
        }
        if let Some(ref view) = args.view {
            edns.add_view(view.as_bytes());
        }
    }
    Ok(query)
}

/// Sends `query` to the server once and waits for the matching
/// response.
fn exchange(query: &mut Message, settings: &Settings) -> Result<Message> {
    let mut render = MessageRender::new();
    render.set_len_limit(settings.udp_size as usize);
    query
        .render(&mut render)
        .context("failed to render the query")?;
    if render.is_truncated() {
        warn!("The query is larger than the advertised UDP payload size.");
    }

    let local: SocketAddr = match settings.server {
        SocketAddr::V4(_) => (Ipv4Addr::UNSPECIFIED, 0).into(),
        SocketAddr::V6(_) => (Ipv6Addr::UNSPECIFIED, 0).into(),
    };
    let socket = UdpSocket::bind(local).context("failed to bind a UDP socket")?;
    socket
        .set_read_timeout(Some(settings.timeout))
        .context("failed to set the socket timeout")?;
    socket
        .send_to(render.data(), settings.server)
        .context("failed to send the query")?;
    debug!(
        "Sent a {}-octet query with ID {} to {}.",
        render.len(),
        query.header.id,
        settings.server
    );

    let mut buf = vec![0; MAX_RESPONSE_LEN];
    loop {
        let (len, from) = socket
            .recv_from(&mut buf)
            .context("no response received")?;
        if from != settings.server {
            warn!("Ignoring a datagram from unexpected source {}.", from);
            continue;
        }
        let response = Message::from_wire(&buf[..len]).context("failed to decode the response")?;
        if response.header.id != query.header.id {
            warn!(
                "Ignoring a response with ID {} (expected {}).",
                response.header.id, query.header.id
            );
            continue;
        }
        if response.question != query.question {
            return Err(anyhow!("the response is for a different question"));
        }
        return Ok(response);
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;
    use dnsmsg::message::edns::EdnsOption;

    #[test]
    fn build_query_applies_flags_and_options() {
        let args = Args::try_parse_from([
            "dnsmsg-dig",
            "--fetch",
            "--dnssec",
            "--subnet",
            "192.0.2.1",
            "--view",
            "lan",
            "knet.cn.",
        ])
        .unwrap();
        let query = build_query(&args, 1232).unwrap();
        assert!(query.header.flag(Flag::Fetch));
        assert!(query.header.flag(Flag::Rd));
        let edns = query.edns.as_ref().unwrap();
        assert!(edns.dnssec_aware);
        assert_eq!(edns.udp_size, 1232);
        assert_eq!(edns.subnet().unwrap().to_string(), "192.0.2.1/32");
        assert!(matches!(edns.options[1], EdnsOption::View(_)));
    }

    #[test]
    fn build_query_rejects_long_prefix() {
        let args =
            Args::try_parse_from(["dnsmsg-dig", "--subnet", "192.0.2.0/33", "knet.cn."]).unwrap();
        assert!(build_query(&args, 4096).is_err());
    }

    #[test]
    fn ipv6_subnet_without_prefix_covers_the_host() {
        let args =
            Args::try_parse_from(["dnsmsg-dig", "--subnet", "2001:db8::1", "knet.cn."]).unwrap();
        let query = build_query(&args, 4096).unwrap();
        let subnet = query.edns.as_ref().and_then(|edns| edns.subnet()).unwrap();
        assert_eq!(subnet.source_prefix(), 128);
    }
}
