use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Number of leading hash characters used as the shard directory name.
pub const SHARD_LEN: usize = 2;

/// Content hash naming a blob in the object store.
///
/// The hash is taken verbatim from the manifest (case is preserved) and is
/// never recomputed from the blob. Construction guarantees at least
/// [`SHARD_LEN`] ASCII alphanumeric characters, so [`ObjectHash::shard`]
/// cannot fail and the hash can never name a path outside its shard.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ObjectHash(String);

impl ObjectHash {
    /// Validate and wrap a hash string.
    pub fn new(hash: impl Into<String>) -> Result<Self, TypeError> {
        let hash = hash.into();
        if hash.len() < SHARD_LEN {
            return Err(TypeError::HashTooShort(hash));
        }
        if !hash.bytes().all(|b| b.is_ascii_alphanumeric()) {
            return Err(TypeError::HashCharset(hash));
        }
        Ok(Self(hash))
    }

    /// The two-character shard directory name.
    pub fn shard(&self) -> &str {
        &self.0[..SHARD_LEN]
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Short representation (first 8 characters) for log lines.
    pub fn short(&self) -> &str {
        &self.0[..self.0.len().min(8)]
    }
}

impl fmt::Debug for ObjectHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ObjectHash({})", self.short())
    }
}

impl fmt::Display for ObjectHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for ObjectHash {
    type Error = TypeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for ObjectHash {
    type Error = TypeError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ObjectHash> for String {
    fn from(hash: ObjectHash) -> Self {
        hash.0
    }
}

impl AsRef<str> for ObjectHash {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
