//! SLIP-0021: hierarchical derivation of symmetric keys
//!
//! From a seed and a path of labels such as
//! `m/SLIP-0021/Master encryption key`, derive a 256 bits symmetric key.
//! The same seed and path always give the same key, and different paths
//! give independent keys.
//!
//! # Example
//!
//! ```
//! use slip21::{derive_for_path, util::hex};
//!
//! let seed = hex::decode("c76c4ac4f4e4a00d6b274d5c39c700bb4a7ddc04fbc6f78e85ca75007b5b495f\
//!                         74a9043eeb77bdd53aa6fc3a0e31462270316fa04b8c19114c8798706cd02ac8").unwrap();
//!
//! let node = derive_for_path("m/SLIP-0021/Authentication key", &seed).unwrap();
//!
//! assert_eq!(
//!     hex::encode(node.symmetric_key()),
//!     "47194e938ab24cc82bfa25f6486ed54bebe79c40ae2a5a32ea6db294d81861a6"
//! );
//! ```
#![cfg_attr(feature = "with-bench", feature(test))]

#[macro_use]
extern crate log;

#[cfg(test)]
#[macro_use]
extern crate quickcheck;

#[cfg(test)]
#[cfg(feature = "with-bench")]
extern crate test;

pub mod node;
pub mod path;
pub mod util;

pub use crate::node::{symmetric_key, Node};
pub use crate::path::{is_valid_path, Path};

use std::{error, fmt, result};

/// the conventional namespace under which SLIP-0021 keys are derived.
///
/// Paths are not required to start with it, any path starting with `m`
/// is accepted.
pub const PREFIX: &str = "m/SLIP-0021";

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Error {
    /// the derivation path is not well formed, nothing was derived
    InvalidPath(path::Error),
}
impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::InvalidPath(err) => write!(f, "invalid derivation path: {}", err),
        }
    }
}
impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Error::InvalidPath(err) => Some(err),
        }
    }
}
impl From<path::Error> for Error {
    fn from(e: path::Error) -> Error {
        Error::InvalidPath(e)
    }
}

pub type Result<T> = result::Result<T, Error>;

/// derive the node at the given path for the given seed
///
/// The path is checked first: an invalid path returns `Error::InvalidPath`
/// and the seed is not used.
pub fn derive_for_path(path: &str, seed: &[u8]) -> Result<Node> {
    let path: Path = path.parse().map_err(|err| {
        debug!("rejecting derivation path: {}", err);
        Error::InvalidPath(err)
    })?;
    Ok(Node::new_master(seed).derive_path(&path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::hex;

    const SEED: &str = "c76c4ac4f4e4a00d6b274d5c39c700bb4a7ddc04fbc6f78e85ca75007b5b495f\
                        74a9043eeb77bdd53aa6fc3a0e31462270316fa04b8c19114c8798706cd02ac8";

    struct TestVector {
        path: &'static str,
        key: Option<&'static str>,
    }

    const TEST_VECTORS: [TestVector; 5] = [
        TestVector {
            path: "m",
            key: Some("dbf12b44133eaab506a740f6565cc117228cbf1dd70635cfa8ddfdc9af734756"),
        },
        TestVector {
            path: "m/SLIP-0021",
            key: Some("1d065e3ac1bbe5c7fad32cf2305f7d709dc070d672044a19e610c77cdf33de0d"),
        },
        TestVector {
            path: "m/SLIP-0021/Master encryption key",
            key: Some("ea163130e35bbafdf5ddee97a17b39cef2be4b4f390180d65b54cf05c6a82fde"),
        },
        TestVector {
            path: "m/SLIP-0021/Authentication key",
            key: Some("47194e938ab24cc82bfa25f6486ed54bebe79c40ae2a5a32ea6db294d81861a6"),
        },
        TestVector {
            path: "invalid",
            key: None,
        },
    ];

    #[test]
    fn slip21_test_vectors() {
        let seed = hex::decode(SEED).unwrap();
        assert_eq!(seed.len(), 64);
        for vector in TEST_VECTORS.iter() {
            let node = derive_for_path(vector.path, &seed);
            match vector.key {
                Some(expected) => {
                    let node = node.unwrap();
                    assert_eq!(hex::encode(node.symmetric_key()), expected, "{}", vector.path);
                }
                None => {
                    assert_eq!(node, Err(Error::InvalidPath(path::Error::MissingRoot)));
                    assert_eq!(symmetric_key(node.as_ref().ok()), None);
                }
            }
        }
    }

    #[test]
    fn master_node_test_vector() {
        let seed = hex::decode(SEED).unwrap();
        assert_eq!(
            hex::encode(Node::new_master(&seed).symmetric_key()),
            TEST_VECTORS[0].key.unwrap()
        );
    }

    #[test]
    fn prefix_is_a_valid_path() {
        assert!(is_valid_path(PREFIX));
        let seed = hex::decode(SEED).unwrap();
        assert_eq!(
            derive_for_path(PREFIX, &seed).unwrap(),
            Node::new_master(&seed).derive(b"SLIP-0021")
        );
    }

    #[test]
    fn invalid_paths_are_rejected() {
        for path in ["invalid", "", "n/x", "m//x", "m/", "m/a/"].iter() {
            assert!(!is_valid_path(path), "{:?}", path);
            assert!(derive_for_path(path, b"seed").is_err(), "{:?}", path);
        }
    }

    #[test]
    fn error_display() {
        let err = derive_for_path("m/a//b", b"seed").unwrap_err();
        assert_eq!(err, Error::InvalidPath(path::Error::EmptyLabel(1)));
        assert_eq!(
            err.to_string(),
            "invalid derivation path: label 1 of the path is empty"
        );
    }

    quickcheck! {
        fn same_seed_and_path_same_key(seed: Vec<u8>, path: Path) -> bool {
            let s = path.to_string();
            derive_for_path(&s, &seed).unwrap().symmetric_key()
                == derive_for_path(&s, &seed).unwrap().symmetric_key()
        }

        fn derive_for_path_folds_labels(seed: Vec<u8>, path: Path) -> bool {
            let expected = path
                .labels()
                .fold(Node::new_master(&seed), |node, label| node.derive(label.as_bytes()));
            derive_for_path(&path.to_string(), &seed) == Ok(expected)
        }
    }
}
