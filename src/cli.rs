// wifcrypt/src/cli.rs
// 20261015
// ceca69ec8e1bcad6c6d79e1dcf7214ff67766580a62b7d19a6fb094c97b4f2dc

//! Command line front end: argument definition and result presentation.

use clap::{crate_version, Arg, ArgAction, ArgMatches, Command};
use tracing::info;
use zeroize::Zeroizing;

use crate::address::AddressManipulation;
use crate::bip38::{convert, KeyInput};
use crate::codec::{BytesManipulation, StringManipulation};
use crate::wif::{PrivateKeyManipulation, WifManipulation};
use crate::{Error, Network, LEN_EKEY, LEN_HEX, LEN_WIF_C, LEN_WIF_U};

/// Information to user.
const ABOUT: &str =
"Insert encrypted, hexadecimal or wif private key and passphrase to decrypt or
encrypt accordingly. Insert only an hexadecimal or wif private key to show its
public key and addresses.";

/// Environment variable read when '--network' is not informed.
const ENV_NETWORK: &str = "WIFCRYPT_NETWORK";

/// Default string used to separate resulting information.
const SEP_DEFAULT: &str = " | ";

/// Treat arguments informed by user and print the result.
pub fn handle_arguments(matches: ArgMatches) -> Result<(), Error> {
    let compress = !matches.get_flag("uncompressed");
    let separator = matches.get_one::<String>("separator")
        .map(String::as_str)
        .unwrap_or(SEP_DEFAULT);
    let network = matches.get_one::<Network>("network").copied().unwrap_or_default();
    let pass = matches.get_one::<String>("passphrase").map(String::as_str);
    let prv = matches.get_one::<String>("PRIVATE_KEY").ok_or(Error::Parser)?;

    println!("{}", render(prv, pass, compress, &network, separator)?);
    Ok(())
}

/// Create the default clap app for the project
pub fn init_clap() -> Command {
    Command::new("wifcrypt")
        .about(ABOUT)
        .arg(
            Arg::new("separator")
                .help("Use specific character (or string) to separate results")
                .short('s')
                .long("separator")
        ).arg(
            Arg::new("network")
                .help("Coin whose version prefixes are used (bitcoin, litecoin)")
                .short('n')
                .long("network")
                .env(ENV_NETWORK)
                .default_value("bitcoin")
                .value_parser(parse_network)
        ).arg(
            Arg::new("passphrase")
                .help("Used to encrypt and decrypt the private key")
                .short('p')
                .long("passphrase")
        ).arg(
            Arg::new("PRIVATE_KEY")
                .help("Hexadecimal, wif or encrypted private key")
                .required(true)
                .value_parser(validate_prvk)
        ).arg(
            Arg::new("uncompressed")
                .help("Hexadecimal private key related to an uncompressed public key")
                .long("uncompressed")
                .short('u')
                .action(ArgAction::SetTrue)
        ).version(crate_version!())
}

/// Text showed to the user for one private key.
fn render(
    prv: &str,
    pass: Option<&str>,
    compress: bool,
    network: &Network,
    separator: &str
) -> Result<String, Error> {
    let input = KeyInput::parse(prv, network);
    info!(?input, %network, "processing private key");

    match (input, pass) {
        (KeyInput::Invalid, _) => Err(Error::Prefix),
        (KeyInput::Encrypted { .. } | KeyInput::PlainWif { .. }, _) if !compress => {
            Err(Error::FlagU)
        }
        (KeyInput::Encrypted { .. }, None) => Err(Error::PassReq),
        (KeyInput::Encrypted { .. }, Some(pass)) => {
            let wif = Zeroizing::new(convert(prv, pass, compress, network)?);
            let (prvk, compress) = wif.decode_wif(network)?;
            let prvk = Zeroizing::new(prvk);
            Ok(format!(
                "{}\n{}{}{}{}{}",
                prvk.hex_string(),
                prvk.address(compress, network)?,
                separator,
                prvk.public(compress)?.hex_string(),
                separator,
                wif.as_str()
            ))
        }
        (_, Some(pass)) => {
            let eprvk = convert(prv, pass, compress, network)?;
            let (prvk, compress) = plain_secret(prv, input, compress, network)?;
            Ok(format!(
                "{}{}{}{}{}",
                prvk.address(compress, network)?,
                separator,
                prvk.public(compress)?.hex_string(),
                separator,
                eprvk
            ))
        }
        (_, None) => {
            let (prvk, compress) = plain_secret(prv, input, compress, network)?;
            Ok(format!(
                "{}\n{}{}{}{}{}\n{}",
                prvk.hex_string(),
                prvk.address(compress, network)?,
                separator,
                prvk.public(compress)?.hex_string(),
                separator,
                prvk.wif(compress, network),
                prvk.eth_address()?
            ))
        }
    }
}

/// Secret bytes and compression of a wif or hexadecimal private key.
fn plain_secret(
    prv: &str,
    input: KeyInput,
    compress: bool,
    network: &Network
) -> Result<(Zeroizing<[u8; 32]>, bool), Error> {
    match input {
        KeyInput::PlainWif { .. } => {
            let (prvk, compress) = prv.decode_wif(network)?;
            Ok((Zeroizing::new(prvk), compress))
        }
        KeyInput::Hex => Ok((Zeroizing::new(prv.hex_secret()?), compress)),
        _ => Err(Error::Prefix)
    }
}

/// Parse the name of a network.
fn parse_network(name: &str) -> Result<Network, Error> {
    name.parse()
}

/// Validate if provided string has the shape of a supported private key.
fn validate_prvk(prvk: &str) -> Result<String, String> {
    if (prvk.len() == LEN_EKEY && prvk.starts_with("6P")) ||
        (prvk.len() == LEN_HEX && prvk.is_hex()) ||
        prvk.len() == LEN_WIF_C || prvk.len() == LEN_WIF_U {
        Ok(prvk.to_string())
    } else {
        Err(Error::Prefix.to_string())
    }
}
