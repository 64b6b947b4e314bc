// wifcrypt/src/bip38.rs
// 20261015
// ceca69ec8e1bcad6c6d79e1dcf7214ff67766580a62b7d19a6fb094c97b4f2dc

//! Encryption and decryption of secret keys with bip-0038 (non ec multiply).
//!
//! The salt of an encrypted key is the address hash of the secret it
//! protects, so a wrong passphrase is detected when the decrypted secret
//! derives an address whose hash differs from the salt.

use aes::Aes256;
use aes::cipher::{BlockDecrypt, BlockEncrypt, KeyInit, generic_array::GenericArray};
use scrypt::Params;
use tracing::debug;
use unicode_normalization::UnicodeNormalization;
use zeroize::Zeroizing;

use crate::address::AddressManipulation;
use crate::codec::{BytesManipulation, StringManipulation, NBBY_CHECK};
use crate::wif::{PrivateKeyManipulation, WifManipulation};
use crate::{Error, Network, LEN_HEX, NBBY_EKEY};

/// Flag byte of encrypted keys related to compressed public keys.
const FLAG_C: u8 = 0xe0;

/// Flag byte of encrypted keys related to uncompressed public keys.
const FLAG_U: u8 = 0xc0;

/// Prefix of encrypted keys related to compressed public keys.
const PRE_EKEY_C: &str = "6PY";

/// Prefix of encrypted keys related to uncompressed public keys.
const PRE_EKEY_U: &str = "6PR";

/// Prefix of all non ec encrypted keys.
const PRE_NON_EC: [u8; 2] = [0x01, 0x42];

/// Log2 of the scrypt cost parameter 'N' (16384).
const SCRYPT_LOG_N: u8 = 14;

/// Scrypt block size parameter.
const SCRYPT_R: u32 = 8;

/// Scrypt parallelization parameter.
const SCRYPT_P: u32 = 8;

/// Kind of private key informed by the user, decided before any conversion.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum KeyInput {
    /// Wif secret key of the configured network.
    PlainWif { compressed: bool },
    /// Bip-0038 encrypted private key.
    Encrypted { compressed: bool },
    /// 64 hexadecimal characters of a raw secret.
    Hex,
    /// Nothing recognizable.
    Invalid,
}

/// Encrypt raw secret keys.
pub trait Encrypt {
    /// Encrypt private key with passphrase, resulting in a '6P' string.
    fn encrypt(
        &self,
        pass: &str,
        compress: bool,
        network: &Network
    ) -> Result<String, Error>;
}

/// Encrypt wif encoded secret keys.
pub trait EncryptWif {
    /// Decode self as wif and encrypt the resulting secret.
    fn encrypt_wif(&self, pass: &str, network: &Network) -> Result<String, Error>;
}

/// Decrypt bip-0038 encrypted private keys.
pub trait Decrypt {
    /// Decrypt encrypted private key returning secret bytes and compression.
    fn decrypt(
        &self,
        pass: &str,
        network: &Network
    ) -> Result<([u8; 32], bool), Error>;

    /// Decrypt encrypted private key returning it in wif format.
    fn decrypt_wif(&self, pass: &str, network: &Network) -> Result<String, Error>;
}

impl KeyInput {
    /// Classify `key` by its leading characters.
    ///
    /// Lengths and version bytes are left to the decoders, which report
    /// them as their own error kinds.
    pub fn parse(key: &str, network: &Network) -> KeyInput {
        if key.starts_with(PRE_EKEY_C) {
            KeyInput::Encrypted { compressed: true }
        } else if key.starts_with(PRE_EKEY_U) {
            KeyInput::Encrypted { compressed: false }
        } else if key.len() == LEN_HEX && key.is_hex() {
            KeyInput::Hex
        } else if network.is_wif_start(key, true) {
            KeyInput::PlainWif { compressed: true }
        } else if network.is_wif_start(key, false) {
            KeyInput::PlainWif { compressed: false }
        } else {
            KeyInput::Invalid
        }
    }
}

impl Encrypt for [u8; 32] {
    #[inline]
    fn encrypt(
        &self,
        pass: &str,
        compress: bool,
        network: &Network
    ) -> Result<String, Error> {
        debug!(%network, compress, "encrypting secret key");
        let salt = self.address(compress, network)?.as_bytes().checksum4();
        let scrypt_key = derive_key(pass, &salt)?;

        let mut half1 = Zeroizing::new([0x00; 32]);
        for idx in 0..32 {
            half1[idx] = self[idx] ^ scrypt_key[idx];
        }

        let cipher = Aes256::new(GenericArray::from_slice(&scrypt_key[32..]));
        let (part1, part2) = half1.split_at_mut(16);
        cipher.encrypt_block(GenericArray::from_mut_slice(part1));
        cipher.encrypt_block(GenericArray::from_mut_slice(part2));

        let mut buffer = [0x00; NBBY_EKEY - NBBY_CHECK];
        buffer[..2].copy_from_slice(&PRE_NON_EC);
        buffer[2] = if compress { FLAG_C } else { FLAG_U };
        buffer[3..7].copy_from_slice(&salt);
        buffer[7..].copy_from_slice(&half1[..]);

        Ok(buffer.encode_base58ck())
    }
}

impl EncryptWif for str {
    #[inline]
    fn encrypt_wif(&self, pass: &str, network: &Network) -> Result<String, Error> {
        let (prvk, compress) = self.decode_wif(network)?;
        let prvk = Zeroizing::new(prvk);
        prvk.encrypt(pass, compress, network)
    }
}

impl Decrypt for str {
    #[inline]
    fn decrypt(
        &self,
        pass: &str,
        network: &Network
    ) -> Result<([u8; 32], bool), Error> {
        let compress = if self.starts_with(PRE_EKEY_C) {
            true
        } else if self.starts_with(PRE_EKEY_U) {
            false
        } else {
            return Err(Error::Prefix);
        };

        let eprvk = self.decode_base58()?;
        if eprvk.len() != NBBY_EKEY { return Err(Error::Length); }
        if eprvk[..2] != PRE_NON_EC { return Err(Error::Version); }
        let flag = if compress { FLAG_C } else { FLAG_U };
        if eprvk[2] != flag { return Err(Error::FlagByte); }
        let split = NBBY_EKEY - NBBY_CHECK;
        if eprvk[split..] != eprvk[..split].checksum4() {
            return Err(Error::Check);
        }

        debug!(%network, compress, "decrypting secret key");
        let salt = &eprvk[3..7];
        let scrypt_key = derive_key(pass, salt)?;

        let mut prvk = Zeroizing::new([0x00; 32]);
        prvk.copy_from_slice(&eprvk[7..split]);

        let cipher = Aes256::new(GenericArray::from_slice(&scrypt_key[32..]));
        let (part1, part2) = prvk.split_at_mut(16);
        cipher.decrypt_block(GenericArray::from_mut_slice(part1));
        cipher.decrypt_block(GenericArray::from_mut_slice(part2));

        for idx in 0..32 {
            prvk[idx] ^= scrypt_key[idx];
        }

        // an out of range secret can only come from a wrong passphrase
        let address = prvk.address(compress, network).map_err(|_| Error::Passwd)?;
        if address.as_bytes().checksum4() != salt {
            debug!("address hash does not match the salt");
            return Err(Error::Passwd);
        }

        Ok((*prvk, compress))
    }

    #[inline]
    fn decrypt_wif(&self, pass: &str, network: &Network) -> Result<String, Error> {
        let (prvk, compress) = self.decrypt(pass, network)?;
        let prvk = Zeroizing::new(prvk);
        Ok(prvk.wif(compress, network))
    }
}

/// Encrypt plain keys and decrypt encrypted ones, returning the opposite form.
///
/// `compress` only applies to hexadecimal secrets; wif and encrypted keys
/// carry their own compression.
pub fn convert(
    key: &str,
    pass: &str,
    compress: bool,
    network: &Network
) -> Result<String, Error> {
    let input = KeyInput::parse(key, network);
    debug!(?input, "converting key");
    match input {
        KeyInput::Encrypted { .. } => key.decrypt_wif(pass, network),
        KeyInput::PlainWif { .. } => key.encrypt_wif(pass, network),
        KeyInput::Hex => {
            Zeroizing::new(key.hex_secret()?).encrypt(pass, compress, network)
        }
        KeyInput::Invalid => Err(Error::Prefix)
    }
}

/// Scrypt of the nfc normalized passphrase, 64 bytes split in two halves.
fn derive_key(pass: &str, salt: &[u8]) -> Result<Zeroizing<[u8; 64]>, Error> {
    let pass: Zeroizing<String> = Zeroizing::new(pass.nfc().collect());
    let params = Params::new(SCRYPT_LOG_N, SCRYPT_R, SCRYPT_P, 64)
        .map_err(|_| Error::ScryptP)?;
    let mut scrypt_key = Zeroizing::new([0x00; 64]);

    scrypt::scrypt(pass.as_bytes(), salt, &params, &mut scrypt_key[..])
        .map_err(|_| Error::ScryptF)?;

    Ok(scrypt_key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{LEN_EKEY, LEN_WIF_C, LEN_WIF_U};

    /// Encrypted secret keys acquired on test vectors of bip-0038.
    const TV_38_ENCRYPTED: [&str; 5] = [
        "6PRVWUbkzzsbcVac2qwfssoUJAN1Xhrg6bNk8J7Nzm5H7kxEbn2Nh2ZoGg",
        "6PRNFFkZc2NZ6dJqFfhRoFNMR9Lnyj7dYGrzdgXXVMXcxoKTePPX1dWByq",
        "6PRW5o9FLp4gJDDVqJQKJFTpMvdsSGJxMYHtHaQBF3ooa8mwD69bapcDQn",
        "6PYNKZ1EAgYgmQfmNVamxyXVWHzK5s6DGhwP4J5o44cvXdoY7sRzhtpUeo",
        "6PYLtMnXvfG3oJde97zRyLYFZCYizPU5T3LwgdYJz1fRhh16bU7u6PPmY7"
    ];

    /// Ec multiply encrypted key of bip-0038 (not supported).
    const TV_38_EC: &str = "6PfQu77ygVyJLZjfvMLyhLMQbYnu5uguoJJ4kMCLqWwPEdfpwANVS76gTX";

    /// Passphrases acquired on test vectors of bip-0038.
    const TV_38_PASS: [&str; 5] = [
        "TestingOneTwoThree", "Satoshi",
        "\u{03d2}\u{0301}\u{0000}\u{010400}\u{01f4a9}", "TestingOneTwoThree",
        "Satoshi"
    ];

    /// Resulting wif keys obtained in test vectors of bip-0038.
    const TV_38_WIF: [&str; 5] = [
        "5KN7MzqK5wt2TP1fQCYyHBtDrXdJuXbUzm4A9rKAteGu3Qi5CVR",
        "5HtasZ6ofTHP6HCwTqTkLDuLQisYPah7aUnSKfC7h4hMUVw2gi5",
        "5Jajm8eQ22H3pGWLEVCXyvND8dQZhiQhoLJNKjYXk9roUFTMSZ4",
        "L44B5gGEpqEDRS9vVPz7QT35jcBG2r3CZwSwQ4fCewXAhAhqGVpP",
        "KwYgW8gcxj1JWJXhPSu4Fqwzfhp5Yfi42mdYmMa4XqK7NJxXUSK7"
    ];

    /// Secret of the first test vector in hexadecimal.
    const TV_38_HEX: &str =
        "cbf4b9f70470856bb4f40f80b87edb90865997ffee6df315ab166d713af433a5";

    /// Encrypted key with a valid '6PY' prefix but '0xe1' flag byte.
    fn bad_flag_key() -> String {
        let mut payload = vec![0x01u8, 0x42, 0xe1];
        payload.extend_from_slice(&[0x00; 36]);
        payload.encode_base58ck()
    }

    #[test]
    fn test_decrypt() {
        let btc = &Network::BITCOIN;
        for (idx, ekey) in TV_38_ENCRYPTED.iter().enumerate() {
            assert_eq!(ekey.decrypt_wif(TV_38_PASS[idx], btc).unwrap(), TV_38_WIF[idx]);
        }
        assert_eq!(
            TV_38_ENCRYPTED[0].decrypt(TV_38_PASS[0], btc).unwrap(),
            (TV_38_WIF[0].decode_wif(btc).unwrap().0, false)
        );
    }

    #[test]
    fn test_decrypt_wrong_pass() {
        let btc = &Network::BITCOIN;
        assert_eq!(
            TV_38_ENCRYPTED[0].decrypt("wrong", btc).unwrap_err(), Error::Passwd
        );
        assert_eq!(
            TV_38_ENCRYPTED[3].decrypt_wif(TV_38_PASS[4], btc).unwrap_err(),
            Error::Passwd
        );
    }

    #[test]
    fn test_decrypt_errors() {
        let btc = &Network::BITCOIN;
        assert_eq!(TV_38_WIF[0].decrypt("pass", btc).unwrap_err(), Error::Prefix);
        assert_eq!(TV_38_EC.decrypt("pass", btc).unwrap_err(), Error::Prefix);
        assert_eq!(
            TV_38_ENCRYPTED[3].replacen('N', "0", 1).decrypt("pass", btc).unwrap_err(),
            Error::Base58Char
        );
        assert_eq!(
            [TV_38_ENCRYPTED[3], "aa"].concat().decrypt("pass", btc).unwrap_err(),
            Error::Length
        );
        assert_eq!(
            TV_38_ENCRYPTED[3][..LEN_EKEY - 2].decrypt("pass", btc).unwrap_err(),
            Error::Length
        );
        assert_eq!(
            [TV_38_ENCRYPTED[3], "a"].concat().decrypt("pass", btc).unwrap_err(),
            Error::Version
        );
        assert_eq!(bad_flag_key().decrypt("pass", btc).unwrap_err(), Error::FlagByte);
    }

    #[test]
    fn test_decrypt_bit_flip() {
        let btc = &Network::BITCOIN;
        let raw = TV_38_ENCRYPTED[4].decode_base58().unwrap();
        for idx in 7..NBBY_EKEY {
            for bit in 0..8 {
                let mut flipped = raw.clone();
                flipped[idx] ^= 1 << bit;
                assert_eq!(
                    flipped.encode_base58().decrypt("pass", btc).unwrap_err(),
                    Error::Check
                );
            }
        }
    }

    #[test]
    fn test_encrypt() {
        let btc = &Network::BITCOIN;
        for (idx, wif) in TV_38_WIF.iter().enumerate() {
            assert_eq!(
                wif.encrypt_wif(TV_38_PASS[idx], btc).unwrap(),
                TV_38_ENCRYPTED[idx]
            );
        }
    }

    #[test]
    fn test_encrypt_deterministic() {
        let btc = &Network::BITCOIN;
        let first = [0x11; 32].encrypt("バンドメイド", true, btc).unwrap();
        let second = [0x11; 32].encrypt("バンドメイド", true, btc).unwrap();
        assert_eq!(first, second);
        assert!(first.starts_with(PRE_EKEY_C));
        assert_eq!(first.len(), LEN_EKEY);
    }

    #[test]
    fn test_encrypt_errors() {
        let btc = &Network::BITCOIN;
        assert_eq!([0x00; 32].encrypt("pass", true, btc).unwrap_err(), Error::SecEnt);
        assert_eq!(
            TV_38_WIF[0].encrypt_wif("pass", &Network::LITECOIN).unwrap_err(),
            Error::Version
        );
        assert_eq!("".encrypt_wif("pass", btc).unwrap_err(), Error::Base58);
    }

    #[test]
    fn test_round_trip() {
        let btc = &Network::BITCOIN;
        for compress in [true, false] {
            let ekey = [0x69; 32].encrypt("MOLON LABE", compress, btc).unwrap();
            assert_eq!(
                ekey.decrypt("MOLON LABE", btc).unwrap(),
                ([0x69; 32], compress)
            );
            assert_eq!(ekey.decrypt("ΜΟΛΩΝ ΛΑΒΕ", btc).unwrap_err(), Error::Passwd);
        }
    }

    #[test]
    fn test_round_trip_litecoin() {
        let ltc = &Network::LITECOIN;
        let wif = [0x11; 32].wif(true, ltc);
        let ekey = wif.encrypt_wif("Satoshi", ltc).unwrap();
        assert_ne!(ekey, [0x11; 32].encrypt("Satoshi", true, &Network::BITCOIN).unwrap());
        assert_eq!(ekey.decrypt_wif("Satoshi", ltc).unwrap(), wif);
    }

    #[test]
    fn test_convert() {
        let btc = &Network::BITCOIN;
        assert_eq!(
            convert(TV_38_ENCRYPTED[3], TV_38_PASS[3], true, btc).unwrap(),
            TV_38_WIF[3]
        );
        assert_eq!(
            convert(TV_38_WIF[1], TV_38_PASS[1], true, btc).unwrap(),
            TV_38_ENCRYPTED[1]
        );
        assert_eq!(
            convert(TV_38_HEX, TV_38_PASS[0], false, btc).unwrap(),
            TV_38_ENCRYPTED[0]
        );
        assert_eq!(convert(TV_38_EC, "pass", true, btc).unwrap_err(), Error::Prefix);
        assert_eq!(convert("everything else", "pass", true, btc).unwrap_err(), Error::Prefix);
        assert_eq!(
            convert(&[TV_38_ENCRYPTED[3], "a"].concat(), "pass", true, btc).unwrap_err(),
            Error::Version
        );
        assert_eq!(
            convert(&TV_38_ENCRYPTED[3][..LEN_EKEY - 2], "pass", true, btc).unwrap_err(),
            Error::Length
        );
        assert_eq!(
            convert(&TV_38_WIF[0][..LEN_WIF_U - 1], "pass", true, btc).unwrap_err(),
            Error::Version
        );
        assert_eq!(
            convert(&["a"; 63].concat(), "pass", true, btc).unwrap_err(),
            Error::Prefix
        );
    }

    #[test]
    fn test_key_input() {
        let btc = &Network::BITCOIN;
        assert_eq!(
            KeyInput::parse(TV_38_ENCRYPTED[0], btc),
            KeyInput::Encrypted { compressed: false }
        );
        assert_eq!(
            KeyInput::parse(TV_38_ENCRYPTED[3], btc),
            KeyInput::Encrypted { compressed: true }
        );
        assert_eq!(
            KeyInput::parse(TV_38_WIF[0], btc),
            KeyInput::PlainWif { compressed: false }
        );
        assert_eq!(
            KeyInput::parse(TV_38_WIF[3], btc),
            KeyInput::PlainWif { compressed: true }
        );
        assert_eq!(KeyInput::parse(TV_38_HEX, btc), KeyInput::Hex);
        assert_eq!(KeyInput::parse(TV_38_EC, btc), KeyInput::Invalid);
        assert_eq!(
            KeyInput::parse(&TV_38_WIF[0][..LEN_WIF_U - 1], btc),
            KeyInput::PlainWif { compressed: false }
        );
        assert_eq!(
            KeyInput::parse(&TV_38_WIF[3][..LEN_WIF_C - 1], btc),
            KeyInput::PlainWif { compressed: true }
        );
        assert_eq!(
            KeyInput::parse(&[TV_38_ENCRYPTED[3], "a"].concat(), btc),
            KeyInput::Encrypted { compressed: true }
        );
        assert_eq!(
            KeyInput::parse(&["5"; 64].concat(), btc),
            KeyInput::Hex
        );
        assert_eq!(KeyInput::parse(&TV_38_ENCRYPTED[0][1..], btc), KeyInput::Invalid);
        assert_eq!(KeyInput::parse(&["x"; 64].concat(), btc), KeyInput::Invalid);
        assert_eq!(KeyInput::parse(&["a"; 63].concat(), btc), KeyInput::Invalid);
        assert_eq!(KeyInput::parse("", btc), KeyInput::Invalid);
        assert_eq!(
            KeyInput::parse(TV_38_WIF[3], &Network::LITECOIN),
            KeyInput::Invalid
        );
        assert_eq!(
            KeyInput::parse(&[0x11; 32].wif(false, &Network::LITECOIN), &Network::LITECOIN),
            KeyInput::PlainWif { compressed: false }
        );
    }
}
