use crc::{CRC_32_ISO_HDLC, Crc};
use std::collections::HashMap;

/// Hash function projecting arbitrary bytes onto the ring.
pub type HashFn = fn(&[u8]) -> u32;

const CRC32: Crc<u32> = Crc::<u32>::new(&CRC_32_ISO_HDLC);

/// Default ring hash (CRC-32, IEEE polynomial).
pub fn crc32_hash(data: &[u8]) -> u32 {
    CRC32.checksum(data)
}

/// A consistent-hash ring over string member identifiers.
///
/// Every member is inserted `replicas` times, each virtual node hashed from
/// the member id with a decimal counter suffix. Lookups walk clockwise: the
/// owner of a key is the member at the first ring position not below the
/// key's hash, wrapping to the lowest position past the top.
///
/// The ring is built once per member-set change and is immutable afterwards;
/// the enclosing pool swaps whole rings under its own lock.
pub struct HashRing {
    replicas: usize,
    hash: HashFn,
    // Sorted virtual-node positions. Kept as a plain vector because the ring
    // is rebuilt wholesale on membership changes and only binary-searched in
    // between.
    positions: Vec<u32>,
    owners: HashMap<u32, String>,
}

impl HashRing {
    /// Creates an empty ring with `replicas` virtual nodes per member and the
    /// CRC-32 default hash.
    pub fn new(replicas: usize) -> Self {
        Self::with_hash(replicas, crc32_hash)
    }

    /// Creates an empty ring with a caller-chosen hash function.
    pub fn with_hash(replicas: usize, hash: HashFn) -> Self {
        Self {
            replicas,
            hash,
            positions: Vec::new(),
            owners: HashMap::new(),
        }
    }

    /// Inserts the given members, `replicas` virtual nodes each.
    ///
    /// When two virtual nodes collide on the same position, the one inserted
    /// last owns it; the outcome is deterministic for identical input order.
    pub fn add<S: AsRef<str>>(&mut self, members: &[S]) {
        for member in members {
            for i in 0..self.replicas {
                let position = (self.hash)(format!("{}{}", member.as_ref(), i).as_bytes());
                self.positions.push(position);
                self.owners.insert(position, member.as_ref().to_owned());
            }
        }
        self.positions.sort_unstable();
    }

    /// Returns the member owning `key`, or `""` when the ring is empty.
    pub fn get(&self, key: &str) -> &str {
        if self.positions.is_empty() {
            return "";
        }

        let hash = (self.hash)(key.as_bytes());
        let idx = self.positions.partition_point(|&position| position < hash);
        let position = self.positions[idx % self.positions.len()];
        self.owners.get(&position).map(String::as_str).unwrap_or("")
    }

    /// Number of virtual-node positions on the ring.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}
