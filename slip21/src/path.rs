//! SLIP-0021 derivation paths
//!
//! A path is the root marker `m` followed by zero or more segments, each
//! segment being the separator `/` and a non empty label. The labels are
//! the walk from the master node down to the requested node:
//!
//! ```
//! use slip21::path::Path;
//!
//! let path : Path = "m/SLIP-0021/Master encryption key".parse().unwrap();
//!
//! assert_eq!(path.depth(), 2);
//! assert_eq!(path[1], "Master encryption key");
//! assert_eq!(path.to_string(), "m/SLIP-0021/Master encryption key");
//! ```
//!
//! Labels are kept exactly as given: no trimming, no case folding and no
//! Unicode normalization. Two paths that only differ by the normalization
//! of a label derive different keys.

use std::{error, fmt, ops::Deref, result, str::FromStr};

/// the root marker every path starts with
pub const ROOT: &str = "m";
/// the segment separator. It can not appear inside a label.
pub const SEPARATOR: char = '/';

/// Error relating to parsing or building a `Path`
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy)]
pub enum Error {
    /// the path does not start with the root marker `m`, or the
    /// root marker is not followed by the end of the path or a `/`.
    MissingRoot,

    /// the label at the given zero based position is empty
    /// (e.g. `m//x` or a trailing `/`).
    EmptyLabel(usize),

    /// the label given to `Path::push` at the given zero based position
    /// contains the separator `/`.
    SeparatorInLabel(usize),
}
impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::MissingRoot => write!(
                f,
                "path should start with `{}` followed by `{}` or nothing",
                ROOT, SEPARATOR
            ),
            Error::EmptyLabel(idx) => write!(f, "label {} of the path is empty", idx),
            Error::SeparatorInLabel(idx) => write!(
                f,
                "label {} contains the separator `{}`",
                idx, SEPARATOR
            ),
        }
    }
}
impl error::Error for Error {}

pub type Result<T> = result::Result<T, Error>;

/// cut the root marker and return the labels, numbered from 0.
///
/// The labels are not checked yet, see `check_label`.
fn segments(path: &str) -> Result<impl Iterator<Item = (usize, &str)>> {
    let rest = path.strip_prefix(ROOT).ok_or(Error::MissingRoot)?;
    let rest = if rest.is_empty() {
        None
    } else {
        Some(rest.strip_prefix(SEPARATOR).ok_or(Error::MissingRoot)?)
    };
    Ok(rest
        .into_iter()
        .flat_map(|rest| rest.split(SEPARATOR))
        .enumerate())
}

fn check_label(idx: usize, label: &str) -> Result<()> {
    if label.is_empty() {
        return Err(Error::EmptyLabel(idx));
    }
    if label.contains(SEPARATOR) {
        return Err(Error::SeparatorInLabel(idx));
    }
    Ok(())
}

/// check the given path string is well formed, without allocating.
pub fn validate(path: &str) -> Result<()> {
    segments(path)?.try_for_each(|(idx, label)| check_label(idx, label))
}

/// tell whether the given string is a well formed derivation path
///
/// ```
/// use slip21::is_valid_path;
///
/// assert!(is_valid_path("m"));
/// assert!(is_valid_path("m/SLIP-0021/Authentication key"));
/// assert!(!is_valid_path("invalid"));
/// assert!(!is_valid_path("m//x"));
/// ```
pub fn is_valid_path(path: &str) -> bool {
    validate(path).is_ok()
}

/// A validated derivation path: the ordered labels under the master node.
///
/// The root path `m` has no label.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Default)]
pub struct Path(Vec<String>);
impl Path {
    /// the path of the master node, `m`
    pub fn root() -> Self {
        Path(Vec::new())
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// number of labels below the master node
    pub fn depth(&self) -> usize {
        self.0.len()
    }

    /// iterate over the labels from the master node down
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|label| label.as_str())
    }

    /// append a label at the end of the path
    ///
    /// ```
    /// use slip21::path::{Path, Error};
    ///
    /// let mut path = Path::root();
    /// path.push("SLIP-0021").unwrap();
    ///
    /// assert_eq!(path.push(""), Err(Error::EmptyLabel(1)));
    /// assert_eq!(path.push("a/b"), Err(Error::SeparatorInLabel(1)));
    /// assert_eq!(path.to_string(), slip21::PREFIX);
    /// ```
    pub fn push(&mut self, label: &str) -> Result<()> {
        check_label(self.depth(), label)?;
        self.0.push(label.to_owned());
        Ok(())
    }

    /// new path with the given label appended
    pub fn join(&self, label: &str) -> Result<Self> {
        let mut path = self.clone();
        path.push(label)?;
        Ok(path)
    }

    /// the path one level up, `None` for the root path
    pub fn parent(&self) -> Option<Self> {
        match self.0.split_last() {
            None => None,
            Some((_, init)) => Some(Path(init.to_vec())),
        }
    }
}
impl Deref for Path {
    type Target = [String];
    fn deref(&self) -> &Self::Target {
        self.0.deref()
    }
}
impl AsRef<[String]> for Path {
    fn as_ref(&self) -> &[String] {
        self.0.as_ref()
    }
}
impl FromStr for Path {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let mut labels = Vec::new();
        for (idx, label) in segments(s)? {
            check_label(idx, label)?;
            labels.push(label.to_owned());
        }
        Ok(Path(labels))
    }
}
impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", ROOT)?;
        for label in self.labels() {
            write!(f, "{}{}", SEPARATOR, label)?;
        }
        Ok(())
    }
}

#[cfg(test)]
impl ::quickcheck::Arbitrary for Path {
    fn arbitrary<G: ::quickcheck::Gen>(g: &mut G) -> Self {
        let labels: Vec<String> = ::quickcheck::Arbitrary::arbitrary(g);
        let mut path = Path::root();
        for label in labels {
            let label: String = label.chars().filter(|c| *c != SEPARATOR).collect();
            if !label.is_empty() {
                path.push(&label).unwrap();
            }
        }
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(path: &str) -> Vec<String> {
        path.parse::<Path>().unwrap().to_vec()
    }

    #[test]
    fn valid_paths() {
        assert!(is_valid_path("m"));
        assert!(is_valid_path("m/SLIP-0021"));
        assert!(is_valid_path("m/SLIP-0021/Master encryption key"));
        assert!(is_valid_path("m/ /!?.,;:"));
        assert!(is_valid_path("m/m/m"));
        assert!(is_valid_path("m/line\nbreak"));
        assert!(is_valid_path("m/clé/ключ/鍵"));
    }

    #[test]
    fn invalid_paths() {
        assert_eq!(validate("invalid"), Err(Error::MissingRoot));
        assert_eq!(validate(""), Err(Error::MissingRoot));
        assert_eq!(validate("n/x"), Err(Error::MissingRoot));
        assert_eq!(validate("M/x"), Err(Error::MissingRoot));
        assert_eq!(validate("mx"), Err(Error::MissingRoot));
        assert_eq!(validate("/m/x"), Err(Error::MissingRoot));
        assert_eq!(validate(" m/x"), Err(Error::MissingRoot));
        assert_eq!(validate("m/"), Err(Error::EmptyLabel(0)));
        assert_eq!(validate("m//x"), Err(Error::EmptyLabel(0)));
        assert_eq!(validate("m/a//b"), Err(Error::EmptyLabel(1)));
        assert_eq!(validate("m/a/b/"), Err(Error::EmptyLabel(2)));
    }

    #[test]
    fn tokenize_in_order() {
        assert!(labels("m").is_empty());
        assert_eq!(labels("m/SLIP-0021"), vec!["SLIP-0021"]);
        assert_eq!(
            labels("m/SLIP-0021/Master encryption key"),
            vec!["SLIP-0021", "Master encryption key"]
        );
        assert_eq!(labels("m/ a / b "), vec![" a ", " b "]);
    }

    #[test]
    fn parse_rejects_like_validate() {
        assert_eq!("invalid".parse::<Path>(), Err(Error::MissingRoot));
        assert_eq!("m/a//b".parse::<Path>(), Err(Error::EmptyLabel(1)));
    }

    #[test]
    fn root() {
        let root: Path = "m".parse().unwrap();
        assert_eq!(root, Path::root());
        assert!(root.is_root());
        assert_eq!(root.parent(), None);
        assert_eq!(root.to_string(), ROOT);
    }

    #[test]
    fn push_join_parent() {
        let prefix = Path::root().join("SLIP-0021").unwrap();
        let key = prefix.join("Authentication key").unwrap();
        assert_eq!(key.to_string(), "m/SLIP-0021/Authentication key");
        assert_eq!(key.depth(), 2);
        assert_eq!(key.parent(), Some(prefix.clone()));
        assert_eq!(prefix.join("a/b"), Err(Error::SeparatorInLabel(1)));
        assert_eq!(prefix.join(""), Err(Error::EmptyLabel(1)));
    }

    quickcheck! {
        fn display_then_parse(path: Path) -> bool {
            let s = path.to_string();
            is_valid_path(&s) && s.parse::<Path>() == Ok(path)
        }

        fn parent_of_join(path: Path) -> bool {
            path.join("label").unwrap().parent() == Some(path)
        }
    }
}
