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

//! Implements command-line argument parsing.

use std::net::IpAddr;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::anyhow;
use clap::Parser;

use dnsmsg::name::Name;
use dnsmsg::rr::Type;

/// Parses the command line arguments.
pub fn parse() -> Args {
    Args::parse()
}

/// Send a DNS query and print the response
#[derive(Debug, Parser)]
#[clap(author, version)]
pub struct Args {
    /// The domain name to query
    #[clap(value_name = "NAME", value_parser)]
    pub name: Name,

    /// Set the server IP address [default: 127.0.0.1]
    #[clap(short, long, value_name = "IP")]
    pub server: Option<IpAddr>,

    /// Set the server port [default: 53]
    #[clap(short, long, value_name = "PORT")]
    pub port: Option<u16>,

    /// Set the query type
    #[clap(short = 't', long = "type", default_value = "A", value_name = "TYPE", value_parser)]
    pub rr_type: Type,

    /// Set the advertised EDNS UDP payload size [default: 4096]
    #[clap(long, value_name = "OCTETS")]
    pub udp_size: Option<u16>,

    /// Set the DO bit to request DNSSEC records
    #[clap(long)]
    pub dnssec: bool,

    /// Set the private FETCH header flag
    #[clap(long)]
    pub fetch: bool,

    /// Send a client subnet option
    #[clap(long, value_name = "IP[/PREFIX]", value_parser)]
    pub subnet: Option<SubnetArg>,

    /// Send a client view option
    #[clap(long, value_name = "VIEW")]
    pub view: Option<String>,

    /// Set how long to wait for a response, in seconds [default: 5]
    #[clap(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Set the configuration file to use
    #[clap(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

/// A client subnet given on the command line with `--subnet`. Without
/// an explicit prefix, the subnet covers the single host.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SubnetArg {
    pub address: IpAddr,
    pub prefix: Option<u8>,
}

impl FromStr for SubnetArg {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (address, prefix) = match s.split_once('/') {
            Some((address, prefix)) => {
                let prefix = prefix
                    .parse()
                    .map_err(|e| anyhow!("invalid subnet prefix: {}", e))?;
                (address, Some(prefix))
            }
            None => (s, None),
        };
        let address = address
            .parse()
            .map_err(|e| anyhow!("invalid subnet address: {}", e))?;
        Ok(Self { address, prefix })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_left_for_the_config_layer() {
        let args = Args::try_parse_from(["dnsmsg-dig", "www.knet.cn"]).unwrap();
        assert_eq!(args.name, "www.knet.cn.".parse().unwrap());
        assert_eq!(args.rr_type, Type::A);
        assert!(args.server.is_none());
        assert!(args.port.is_none());
        assert!(!args.dnssec);
        assert!(args.subnet.is_none());
    }

    #[test]
    fn every_option_is_parsed() {
        let args = Args::try_parse_from([
            "dnsmsg-dig",
            "-s",
            "192.0.2.53",
            "-p",
            "5353",
            "-t",
            "mx",
            "--udp-size",
            "1232",
            "--dnssec",
            "--fetch",
            "--subnet",
            "10.1.0.0/16",
            "--view",
            "internal",
            "--timeout",
            "2",
            "knet.cn.",
        ])
        .unwrap();
        assert_eq!(args.server, Some("192.0.2.53".parse().unwrap()));
        assert_eq!(args.port, Some(5353));
        assert_eq!(args.rr_type, Type::MX);
        assert_eq!(args.udp_size, Some(1232));
        assert!(args.dnssec && args.fetch);
        assert_eq!(
            args.subnet,
            Some(SubnetArg {
                address: "10.1.0.0".parse().unwrap(),
                prefix: Some(16),
            })
        );
        assert_eq!(args.view.as_deref(), Some("internal"));
        assert_eq!(args.timeout, Some(2));
    }

    #[test]
    fn bad_values_are_rejected() {
        assert!(Args::try_parse_from(["dnsmsg-dig", "-t", "bogus", "knet.cn."]).is_err());
        assert!(Args::try_parse_from(["dnsmsg-dig", "a..b"]).is_err());
        assert!(Args::try_parse_from(["dnsmsg-dig"]).is_err());
    }

    #[test]
    fn subnet_arg_prefix_is_optional() {
        let subnet: SubnetArg = "2001:db8::1".parse().unwrap();
        assert_eq!(subnet.prefix, None);
        assert!("192.0.2.1/abc".parse::<SubnetArg>().is_err());
        assert!("not-an-ip/24".parse::<SubnetArg>().is_err());
    }
}
