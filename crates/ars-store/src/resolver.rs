use std::path::{Path, PathBuf};

use ars_types::ObjectHash;

/// Compute the sharded location of a blob: `<store_root>/<hash[0:2]>/<hash>`.
///
/// Pure function, no I/O. The shard is the first two characters of the hash
/// taken verbatim, so `AB12..` and `ab12..` land in different shards.
///
/// Precondition: the hash has at least two characters. [`ObjectHash`]
/// enforces this at construction.
pub fn resolve(store_root: &Path, hash: &ObjectHash) -> PathBuf {
    store_root.join(hash.shard()).join(hash.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hash(s: &str) -> ObjectHash {
        ObjectHash::new(s).unwrap()
    }

    #[test]
    fn two_level_sharding() {
        let path = resolve(Path::new("/assets/objects"), &hash("aa11bb"));
        assert_eq!(path, PathBuf::from("/assets/objects/aa/aa11bb"));
    }

    #[test]
    fn deterministic() {
        let root = Path::new("objects");
        let h = hash("bdf48ef6b5d0d23bbb02e17d04865216179f510a");
        assert_eq!(resolve(root, &h), resolve(root, &h));
    }

    #[test]
    fn shard_is_case_sensitive() {
        let root = Path::new("objects");
        let upper = resolve(root, &hash("AB12"));
        let lower = resolve(root, &hash("ab12"));
        assert_eq!(upper, PathBuf::from("objects/AB/AB12"));
        assert_ne!(upper, lower);
    }

    #[test]
    fn two_character_hash_shards_to_itself() {
        let path = resolve(Path::new("objects"), &hash("ff"));
        assert_eq!(path, PathBuf::from("objects/ff/ff"));
    }
}
