// wifcrypt/src/network.rs
// 20261015
// ceca69ec8e1bcad6c6d79e1dcf7214ff67766580a62b7d19a6fb094c97b4f2dc

//! Version prefixes of the supported secp256k1 coins.

use std::fmt;
use std::str::FromStr;

use crate::Error;

/// Version bytes and leading wif characters of one coin.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Network {
    /// Lowercase name, as accepted on the command line.
    pub name: &'static str,
    /// First byte of a p2pkh address payload.
    pub address: u8,
    /// First byte of a wif secret key payload.
    pub secret: u8,
    /// Possible first characters of a compressed wif.
    pub wif_compressed: &'static str,
    /// Possible first characters of an uncompressed wif.
    pub wif_uncompressed: &'static str,
}

impl Network {
    /// Bitcoin main net.
    pub const BITCOIN: Network = Network {
        name: "bitcoin",
        address: 0x00,
        secret: 0x80,
        wif_compressed: "KL",
        wif_uncompressed: "5",
    };

    /// Litecoin main net.
    pub const LITECOIN: Network = Network {
        name: "litecoin",
        address: 0x30,
        secret: 0xb0,
        wif_compressed: "T",
        wif_uncompressed: "6",
    };

    /// True if the first character of `key` can start a wif of this network.
    pub fn is_wif_start(&self, key: &str, compress: bool) -> bool {
        let set = if compress { self.wif_compressed } else { self.wif_uncompressed };
        key.chars().next().is_some_and(|c| set.contains(c))
    }
}

impl Default for Network {
    fn default() -> Self {
        Network::BITCOIN
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

impl FromStr for Network {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "bitcoin" | "btc" => Ok(Network::BITCOIN),
            "litecoin" | "ltc" => Ok(Network::LITECOIN),
            _ => Err(Error::Network)
        }
    }
}
