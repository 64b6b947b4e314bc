// wifcrypt/src/lib.rs
// 20261015
// ceca69ec8e1bcad6c6d79e1dcf7214ff67766580a62b7d19a6fb094c97b4f2dc

//! Library of the 'wifcrypt' project.
//!
//! Conversions between raw secp256k1 private keys, hexadecimal, wif,
//! addresses and bip-0038 encrypted private keys. Every conversion is a pure
//! function of its inputs and reports failures through [`Error`].

pub mod address;
pub mod bip38;
pub mod cli;
pub mod codec;
pub mod network;
pub mod wif;

pub use address::{eip55, AddressManipulation, PublicKeyManipulation};
pub use bip38::{convert, Decrypt, Encrypt, EncryptWif, KeyInput};
pub use cli::{handle_arguments, init_clap};
pub use codec::{BytesManipulation, StringManipulation};
pub use network::Network;
pub use wif::{PrivateKeyManipulation, WifManipulation};

/// Number of characters of an encrypted private key.
pub const LEN_EKEY: usize = 58;

/// Number of characters of a raw secret key in hexadecimal.
pub const LEN_HEX: usize = 64;

/// Number of characters in wif compressed secret key.
pub const LEN_WIF_C: usize = 52;

/// Number of characters in wif uncompressed secret key.
pub const LEN_WIF_U: usize = 51;

/// Number of bytes of a decoded encrypted private key (checksum included).
pub const NBBY_EKEY: usize = 43;

/// Number of bytes of a public key compressed.
pub const NBBY_PUBC: usize = 33;

/// Number of bytes of a public key uncompressed.
pub const NBBY_PUBU: usize = 65;

/// Number of bytes contained in a decoded wif compressed key (with checksum).
pub const NBBY_WIFC: usize = 38;

/// Number of bytes contained in a decoded wif uncompressed key (with checksum).
pub const NBBY_WIFU: usize = 37;

/// Errors of 'wifcrypt' project.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, thiserror::Error)]
pub enum Error {
    /// Character outside of the bitcoin base 58 alphabet.
    #[error("invalid base58 character")]
    Base58Char,
    /// Empty or otherwise undecodable base 58 string.
    #[error("empty or malformed base58 string")]
    Base58,
    /// Invalid checksum was found.
    #[error("invalid checksum")]
    Check,
    /// Flag byte of an encrypted key disagrees with its prefix.
    #[error("invalid flag byte")]
    FlagByte,
    /// Flag 'u' invalid in the context (encrypted or wif private keys).
    #[error("invalid flag 'u' in this context")]
    FlagU,
    /// Found invalid hexadecimal value represented in string.
    #[error("invalid hexadecimal string")]
    HexStr,
    /// Decoded data has an unexpected number of bytes.
    #[error("invalid number of decoded bytes")]
    Length,
    /// Unknown network name.
    #[error("unknown network")]
    Network,
    /// Error while parsing the arguments.
    #[error("fatal problem while parsing arguments")]
    Parser,
    /// Passphrase missing for an encrypted private key.
    #[error("passphrase required to decrypt")]
    PassReq,
    /// Address hash does not match the salt: wrong passphrase or data.
    #[error("invalid passphrase")]
    Passwd,
    /// Input is not a known kind of private key.
    #[error("unsupported key prefix")]
    Prefix,
    /// Trowed if an error occurs when using scrypt function.
    #[error("failure on scrypt function")]
    ScryptF,
    /// Trowed if an invalid scrypt Param is inserted.
    #[error("invalid scrypt parameter")]
    ScryptP,
    /// Invalid secret entropy found (could not generate public key).
    #[error("invalid secret entropy")]
    SecEnt,
    /// Byte following the secret of a compressed wif is not '0x01'.
    #[error("invalid compression suffix")]
    Suffix,
    /// Version prefix does not match the expected one.
    #[error("invalid version prefix")]
    Version,
}

impl Error {
    /// Exit status used by the command line interface, above clap's usage
    /// error (2).
    pub fn status(&self) -> i32 {
        match self {
            Error::Base58Char => 3,
            Error::Base58 => 4,
            Error::Check => 5,
            Error::FlagByte => 6,
            Error::FlagU => 7,
            Error::HexStr => 8,
            Error::Length => 9,
            Error::Network => 10,
            Error::Parser => 11,
            Error::PassReq => 12,
            Error::Passwd => 13,
            Error::Prefix => 14,
            Error::ScryptF => 15,
            Error::ScryptP => 16,
            Error::SecEnt => 17,
            Error::Suffix => 18,
            Error::Version => 19,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_distinct() {
        let all = [
            Error::Base58Char, Error::Base58, Error::Check, Error::FlagByte,
            Error::FlagU, Error::HexStr, Error::Length, Error::Network,
            Error::Parser, Error::PassReq, Error::Passwd, Error::Prefix,
            Error::ScryptF, Error::ScryptP, Error::SecEnt, Error::Suffix,
            Error::Version
        ];
        let mut codes: Vec<i32> = all.iter().map(|e| e.status()).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), all.len());
        assert!(codes.iter().all(|&code| code > 2));
    }

    #[test]
    fn test_display() {
        assert_eq!(Error::Passwd.to_string(), "invalid passphrase");
        assert_eq!(Error::Check.to_string(), "invalid checksum");
    }
}
