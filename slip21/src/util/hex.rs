//! hexadecimal encoding and decoding of key material and seeds
//!
//! # Example
//!
//! ```
//! use slip21::util::hex::{encode, decode};
//!
//! let example = b"Symmetric key seed";
//!
//! assert!(example.as_ref() == decode(&encode(example)).unwrap().as_slice());
//! ```
//!
use std::{error, fmt, result};

const ALPHABET: &[u8] = b"0123456789abcdef";

/// hexadecimal encoding/decoding potential errors
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy)]
pub enum Error {
    /// error when a given character is not part of the supported
    /// hexadecimal alphabet. Contains the index of the faulty byte
    UnknownSymbol(usize),
    /// the input ends in the middle of a byte
    OddLength,
}
impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::UnknownSymbol(idx) => write!(f, "Unknown symbol at byte index {}", idx),
            Error::OddLength => write!(f, "Odd number of hexadecimal digits"),
        }
    }
}
impl error::Error for Error {}

pub type Result<T> = result::Result<T, Error>;

/// encode bytes into an hexadecimal string
///
/// ```
/// use slip21::util::hex::encode;
///
/// assert_eq!("6d2f534c49502d30303231", encode(b"m/SLIP-0021"));
/// ```
pub fn encode(input: &[u8]) -> String {
    let mut s = String::with_capacity(input.len() * 2);
    for &byte in input.iter() {
        s.push(ALPHABET[(byte >> 4) as usize] as char);
        s.push(ALPHABET[(byte & 0xf) as usize] as char);
    }
    s
}

/// decode the given hexadecimal string
///
/// Whitespace is skipped so seeds can be pasted over several lines.
///
/// ```
/// use slip21::util::hex::{Error, decode};
///
/// assert_eq!(decode("c7 6c\n4a").unwrap(), vec![0xc7, 0x6c, 0x4a]);
/// assert_eq!(decode("c7z"), Err(Error::UnknownSymbol(2)));
/// ```
pub fn decode(input: &str) -> Result<Vec<u8>> {
    let mut b = Vec::with_capacity(input.len() / 2);
    let mut modulus = 0;
    let mut buf = 0u8;

    for (idx, byte) in input.bytes().enumerate() {
        let nibble = match byte {
            b'A'..=b'F' => byte - b'A' + 10,
            b'a'..=b'f' => byte - b'a' + 10,
            b'0'..=b'9' => byte - b'0',
            b' ' | b'\r' | b'\n' | b'\t' => continue,
            _ => return Err(Error::UnknownSymbol(idx)),
        };
        buf = (buf << 4) | nibble;

        modulus += 1;
        if modulus == 2 {
            modulus = 0;
            b.push(buf);
            buf = 0;
        }
    }

    if modulus != 0 {
        return Err(Error::OddLength);
    }
    Ok(b)
}
