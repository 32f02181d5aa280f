//! SLIP-0021 node derivation
//!
//! Every node is the 64 bytes output of one HMAC-SHA512: the first half
//! is the chain code, only ever used as the HMAC key of the children, the
//! second half is the symmetric key of the node.
//!
//! * the master node is `HMAC-SHA512(key = "Symmetric key seed", seed)`
//! * a child node is `HMAC-SHA512(key = parent chain code, 0x00 || label)`
//!
//! The key of a node is never an input of any derivation, so holding the
//! key of a node tells nothing about its parent or its siblings.
//!
use cryptoxide::hmac::Hmac;
use cryptoxide::mac::Mac;
use cryptoxide::sha2::Sha512;
use cryptoxide::util::fixed_time_eq;

use std::fmt;

use crate::path::Path;
use crate::util::securemem;

/// the HMAC key of the master node derivation
pub const SEED_MODIFIER: &[u8] = b"Symmetric key seed";

pub const CHAIN_CODE_SIZE: usize = 32;
pub const SYMMETRIC_KEY_SIZE: usize = 32;
pub const NODE_SIZE: usize = CHAIN_CODE_SIZE + SYMMETRIC_KEY_SIZE;

/// prefix of the child derivation input, keeps it apart from other
/// uses of the chain code
const CHILD_TAG: u8 = 0x00;

fn hmac_sha512(key: &[u8], parts: &[&[u8]]) -> [u8; NODE_SIZE] {
    let mut mac = Hmac::new(Sha512::new(), key);
    for part in parts {
        mac.input(part);
    }
    let mut out = [0u8; NODE_SIZE];
    mac.raw_result(&mut out);
    mac.reset();
    out
}

/// A node of the SLIP-0021 hierarchy: a chain code followed by a symmetric key.
///
/// Nodes are immutable, derivation always returns a new node. A node keeps
/// no link to its parent; replaying the labels from the master node gives
/// the same node back.
///
/// The buffer is zeroed when the node is dropped.
pub struct Node([u8; NODE_SIZE]);
impl Node {
    /// create the master node of the hierarchy associated to this seed
    ///
    /// Any seed is accepted, including the empty one.
    ///
    /// ```
    /// use slip21::Node;
    ///
    /// let master = Node::new_master(b"some seed bytes");
    ///
    /// assert_eq!(master.symmetric_key().len(), 32);
    /// ```
    pub fn new_master(seed: &[u8]) -> Self {
        Node(hmac_sha512(SEED_MODIFIER, &[seed]))
    }

    /// derive the child node under the given label
    ///
    /// The label bytes are hashed verbatim; this does not look for the path
    /// separator, see `derive_path` for derivation along a validated `Path`.
    ///
    /// ```
    /// use slip21::{Node, derive_for_path};
    ///
    /// let seed = b"some seed bytes";
    /// let node = Node::new_master(seed).derive(b"SLIP-0021");
    ///
    /// assert_eq!(node, derive_for_path("m/SLIP-0021", seed).unwrap());
    /// ```
    pub fn derive(&self, label: &[u8]) -> Self {
        Node(hmac_sha512(self.chain_code(), &[&[CHILD_TAG][..], label]))
    }

    /// derive down the given path, one label after the other
    pub fn derive_path(&self, path: &Path) -> Self {
        let mut node = self.clone();
        for (idx, label) in path.labels().enumerate() {
            trace!("deriving label {} of {}", idx + 1, path.depth());
            node = node.derive(label.as_bytes());
        }
        node
    }

    /// the 256 bits symmetric key of this node
    pub fn symmetric_key(&self) -> &[u8] {
        &self.0[CHAIN_CODE_SIZE..]
    }

    pub(crate) fn chain_code(&self) -> &[u8] {
        &self.0[..CHAIN_CODE_SIZE]
    }
}
impl PartialEq for Node {
    fn eq(&self, rhs: &Node) -> bool {
        fixed_time_eq(&self.0, &rhs.0)
    }
}
impl Eq for Node {}
impl Clone for Node {
    fn clone(&self) -> Self {
        Node(self.0)
    }
}
impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Node(<{} secret bytes>)", NODE_SIZE)
    }
}
impl Drop for Node {
    fn drop(&mut self) {
        securemem::zero(&mut self.0);
    }
}

/// the symmetric key of a node that may be absent
///
/// ```
/// use slip21::{symmetric_key, derive_for_path};
///
/// let node = derive_for_path("invalid", b"seed").ok();
///
/// assert_eq!(symmetric_key(node.as_ref()), None);
/// ```
pub fn symmetric_key(node: Option<&Node>) -> Option<&[u8]> {
    node.map(Node::symmetric_key)
}
