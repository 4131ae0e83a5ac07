use serde::Deserialize;

/// A vault's position specification on the ring: routable address plus the
/// number of virtual points it occupies. Higher weight draws proportionally
/// more sharding keys.
#[derive(Debug, Clone, Deserialize)]
pub struct RingNode {
    pub address: String,
    #[serde(default = "default_weight")]
    pub weight: u32,
}

fn default_weight() -> u32 {
    1
}

/// Virtual points contributed per unit of weight. A node's share of the key
/// space stays proportional to its weight; the spread keeps arc lengths
/// statistically smooth even on small fleets.
const POINTS_PER_WEIGHT: u32 = 40;

/// Consistent hash ring over the configured vault fleet.
///
/// Built once at startup from the configuration and never mutated, so it can
/// be shared read-only across tasks without locking. Each node contributes
/// `weight * POINTS_PER_WEIGHT` virtual points; a key is owned by the node
/// holding the first point at or after the key's hash, wrapping past the end
/// of the ring.
///
/// The point hash is the first 8 bytes of `blake3("{address}#{replica}")`,
/// which keeps placement identical across processes and restarts.
pub struct HashRing {
    /// (hash point, index into `nodes`), sorted by hash point.
    points: Vec<(u64, usize)>,
    nodes: Vec<String>,
}

impl HashRing {
    pub fn new(members: &[RingNode]) -> Self {
        let nodes: Vec<String> = members.iter().map(|m| m.address.clone()).collect();

        let mut points = Vec::new();
        for (idx, member) in members.iter().enumerate() {
            for replica in 0..member.weight * POINTS_PER_WEIGHT {
                let point = ring_hash(&format!("{}#{}", member.address, replica));
                points.push((point, idx));
            }
        }
        points.sort_unstable();

        Self { points, nodes }
    }

    /// Resolves a sharding key to the owning vault address. `None` only when
    /// the ring has no nodes.
    pub fn resolve(&self, key: &str) -> Option<&str> {
        if self.points.is_empty() {
            return None;
        }

        let hash = ring_hash(key);
        let idx = self.points.partition_point(|(point, _)| *point < hash);
        let (_, node_idx) = if idx == self.points.len() {
            self.points[0]
        } else {
            self.points[idx]
        };

        Some(self.nodes[node_idx].as_str())
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

fn ring_hash(key: &str) -> u64 {
    let digest = blake3::hash(key.as_bytes());
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&digest.as_bytes()[..8]);
    u64::from_le_bytes(bytes)
}
