// wifcrypt/src/wif.rs
// 20261015
// ceca69ec8e1bcad6c6d79e1dcf7214ff67766580a62b7d19a6fb094c97b4f2dc

//! Wallet import format and public key derivation of 32 byte secrets.

use secp256k1::{PublicKey, Secp256k1, SecretKey};

use crate::codec::{BytesManipulation, StringManipulation, NBBY_CHECK};
use crate::{Error, Network, NBBY_WIFC, NBBY_WIFU};

/// Suffix appended to the secret of a compressed wif.
const SUFFIX_COMPRESSED: u8 = 0x01;

/// Functions to manipulate private keys (32 bytes).
pub trait PrivateKeyManipulation {
    /// Generate secp256k1 point based on target secret key.
    fn public(&self, compress: bool) -> Result<Vec<u8>, Error>;

    /// Generate a representation of secret key in wif format.
    fn wif(&self, compress: bool, network: &Network) -> String;
}

/// Functions to manipulate wif encoded secret keys.
pub trait WifManipulation {
    /// Decode a secret key encoded in base 58 returning bytes and compression.
    fn decode_wif(&self, network: &Network) -> Result<([u8; 32], bool), Error>;
}

impl PrivateKeyManipulation for [u8; 32] {
    #[inline]
    fn public(&self, compress: bool) -> Result<Vec<u8>, Error> {
        let secp_pub = PublicKey::from_secret_key(
            &Secp256k1::new(),
            &SecretKey::from_slice(self).map_err(|_| Error::SecEnt)?
        );

        if compress {
            Ok(secp_pub.serialize().to_vec())
        } else {
            Ok(secp_pub.serialize_uncompressed().to_vec())
        }
    }

    #[inline]
    fn wif(&self, compress: bool, network: &Network) -> String {
        let mut decoded: Vec<u8> = vec![network.secret];
        decoded.extend_from_slice(self);
        if compress { decoded.push(SUFFIX_COMPRESSED); }
        decoded.encode_base58ck()
    }
}

impl WifManipulation for str {
    #[inline]
    fn decode_wif(&self, network: &Network) -> Result<([u8; 32], bool), Error> {
        let raw = self.decode_base58()?;

        let compress = match raw.len() {
            NBBY_WIFC => true,
            NBBY_WIFU => false,
            _ => return Err(Error::Length)
        };
        if compress && raw[33] != SUFFIX_COMPRESSED {
            return Err(Error::Suffix);
        }
        if raw[0] != network.secret {
            return Err(Error::Version);
        }

        let split = raw.len() - NBBY_CHECK;
        if raw[split..] != raw[..split].checksum4() {
            return Err(Error::Check);
        }

        let mut result = [0x00; 32];
        result.copy_from_slice(&raw[1..33]);

        Ok((result, compress))
    }
}
