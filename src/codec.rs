// wifcrypt/src/codec.rs
// 20261015
// ceca69ec8e1bcad6c6d79e1dcf7214ff67766580a62b7d19a6fb094c97b4f2dc

//! Base 58 (check), hashing and hexadecimal helpers shared by every key form.

use ripemd::Ripemd160;
use sha2::{Digest, Sha256};
use tiny_keccak::{Hasher, Keccak};

use crate::Error;

/// Number of bytes of the checksum appended to base 58 check payloads.
pub const NBBY_CHECK: usize = 4;

/// Functions to manipulate data in form of arbitrary number of bytes [u8].
pub trait BytesManipulation {
    /// First four bytes of a dual sha256 of informed data.
    fn checksum4(&self) -> [u8; NBBY_CHECK];

    /// Encode informed data in base 58 (no checksum appended).
    fn encode_base58(&self) -> String;

    /// Encode informed data in base 58 check.
    fn encode_base58ck(&self) -> String;

    /// Sha256 and ripemd160 in sequence.
    fn hash160(&self) -> [u8; 20];

    /// Receives bytes and return 32 bytes of a dual sha256 hash.
    fn hash256(&self) -> [u8; 32];

    /// Receives bytes and return string of hexadecimal characters.
    fn hex_string(&self) -> String;

    /// Keccak-256 (pre-standard sha3) digest used by ethereum.
    fn keccak256(&self) -> [u8; 32];
}

/// Functions to manipulate strings.
pub trait StringManipulation {
    /// Decode base 58 string into bytes, checksum left in place.
    fn decode_base58(&self) -> Result<Vec<u8>, Error>;

    /// Decode base 58 string into bytes (payload only, checksum verified).
    fn decode_base58ck(&self) -> Result<Vec<u8>, Error>;

    /// Transform 64 hexadecimal characters into the 32 bytes of a secret.
    fn hex_secret(&self) -> Result<[u8; 32], Error>;

    /// Test if an string of arbitrary length contains only hexadecimal chars.
    fn is_hex(&self) -> bool;
}

impl BytesManipulation for [u8] {
    #[inline]
    fn checksum4(&self) -> [u8; NBBY_CHECK] {
        let mut result = [0x00; NBBY_CHECK];
        result.copy_from_slice(&self.hash256()[..NBBY_CHECK]);
        result
    }

    #[inline]
    fn encode_base58(&self) -> String {
        bs58::encode(self).into_string()
    }

    #[inline]
    fn encode_base58ck(&self) -> String {
        let mut decoded: Vec<u8> = Vec::with_capacity(self.len() + NBBY_CHECK);
        decoded.extend_from_slice(self);
        decoded.extend_from_slice(&self.checksum4());
        decoded.encode_base58()
    }

    #[inline]
    fn hash160(&self) -> [u8; 20] {
        let mut result = [0x00; 20];
        result.copy_from_slice(&Ripemd160::digest(Sha256::digest(self)));
        result
    }

    #[inline]
    fn hash256(&self) -> [u8; 32] {
        let mut result = [0x00; 32];
        result.copy_from_slice(&Sha256::digest(Sha256::digest(self)));
        result
    }

    #[inline]
    fn hex_string(&self) -> String {
        hex::encode(self)
    }

    #[inline]
    fn keccak256(&self) -> [u8; 32] {
        let mut hasher = Keccak::v256();
        let mut result = [0x00; 32];
        hasher.update(self);
        hasher.finalize(&mut result);
        result
    }
}

impl StringManipulation for str {
    #[inline]
    fn decode_base58(&self) -> Result<Vec<u8>, Error> {
        if self.is_empty() {
            return Err(Error::Base58);
        }
        bs58::decode(self).into_vec().map_err(|err| match err {
            bs58::decode::Error::InvalidCharacter { .. } |
            bs58::decode::Error::NonAsciiCharacter { .. } => Error::Base58Char,
            _ => Error::Base58
        })
    }

    #[inline]
    fn decode_base58ck(&self) -> Result<Vec<u8>, Error> {
        let mut raw = self.decode_base58()?;
        if raw.len() <= NBBY_CHECK { return Err(Error::Base58); }
        let split = raw.len() - NBBY_CHECK;
        if raw[split..] != raw[..split].checksum4() { return Err(Error::Check); }
        raw.truncate(split);
        Ok(raw)
    }

    #[inline]
    fn hex_secret(&self) -> Result<[u8; 32], Error> {
        let mut result = [0x00; 32];
        hex::decode_to_slice(self, &mut result).map_err(|err| match err {
            hex::FromHexError::InvalidStringLength => Error::Length,
            _ => Error::HexStr
        })?;
        Ok(result)
    }

    #[inline]
    fn is_hex(&self) -> bool {
        self.chars().all(|c| c.is_ascii_hexdigit())
    }
}
