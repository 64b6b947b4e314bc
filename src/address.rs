// wifcrypt/src/address.rs
// 20261015
// ceca69ec8e1bcad6c6d79e1dcf7214ff67766580a62b7d19a6fb094c97b4f2dc

//! Addresses derived from secret keys: base 58 check p2pkh for bitcoin-like
//! coins and eip-55 checksummed hexadecimal for ethereum.

use crate::codec::BytesManipulation;
use crate::wif::PrivateKeyManipulation;
use crate::{Error, Network, NBBY_PUBC, NBBY_PUBU};

/// Functions to manipulate public keys (33 or 65 bytes).
pub trait PublicKeyManipulation {
    /// Ethereum address of an uncompressed public key.
    fn eth_address(&self) -> Result<String, Error>;

    /// Create a p2pkh address according to inserted self key bytes.
    fn p2pkh(&self, network: &Network) -> Result<String, Error>;
}

/// Functions deriving addresses straight from a secret key.
pub trait AddressManipulation {
    /// P2pkh address of the public key in the requested form.
    fn address(&self, compress: bool, network: &Network) -> Result<String, Error>;

    /// Ethereum address (always based on the uncompressed point).
    fn eth_address(&self) -> Result<String, Error>;
}

impl PublicKeyManipulation for [u8] {
    #[inline]
    fn eth_address(&self) -> Result<String, Error> {
        if self.len() != NBBY_PUBU { return Err(Error::Length); }
        let mut address = [0x00; 20];
        address.copy_from_slice(&self[1..].keccak256()[12..]);
        Ok(eip55(&address))
    }

    #[inline]
    fn p2pkh(&self, network: &Network) -> Result<String, Error> {
        if self.len() != NBBY_PUBC && self.len() != NBBY_PUBU {
            return Err(Error::Length);
        }
        let mut address_bytes = vec![network.address];
        address_bytes.extend_from_slice(&self.hash160());
        Ok(address_bytes.encode_base58ck())
    }
}

impl AddressManipulation for [u8; 32] {
    #[inline]
    fn address(&self, compress: bool, network: &Network) -> Result<String, Error> {
        self.public(compress)?.p2pkh(network)
    }

    #[inline]
    fn eth_address(&self) -> Result<String, Error> {
        self.public(false)?.eth_address()
    }
}

/// Mixed case checksum encoding of a 20 byte ethereum address.
///
/// Every hexadecimal letter is uppercased when the matching nibble of the
/// keccak-256 of the lowercase address is 8 or above.
pub fn eip55(address: &[u8; 20]) -> String {
    let lower = address.hex_string();
    let hash = lower.as_bytes().keccak256();

    let mut result = String::with_capacity(42);
    result.push_str("0x");
    for (idx, c) in lower.chars().enumerate() {
        let nibble = if idx % 2 == 0 { hash[idx / 2] >> 4 } else { hash[idx / 2] & 0x0f };
        if nibble >= 8 {
            result.push(c.to_ascii_uppercase());
        } else {
            result.push(c);
        }
    }
    result
}
