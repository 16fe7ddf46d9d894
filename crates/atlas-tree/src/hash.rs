//! # Tree Hashing — Domain-Separated SHA-256
//!
//! The two hash primitives every tree in the stack is built from, plus the
//! binary fold that turns a level of child digests into a root.
//!
//! ## Algorithm
//!
//! Domain-separated SHA-256:
//! - Leaf: `SHA256(0x00 || canonical_bytes)`.
//! - Node: `SHA256(0x01 || left || right)` over raw 32-byte children.
//!
//! Domain separation prevents a crafted leaf payload from colliding with
//! an interior node encoding.
//!
//! ## Fold Rule
//!
//! Levels are reduced pairwise left-to-right. An odd node count promotes
//! the last node unchanged to the next level — a fixed rule, not random
//! padding — so depth and root are fully determined by leaf content and
//! count.

use sha2::{Digest, Sha256};

use atlas_core::{CanonicalBytes, ContentDigest, DIGEST_WIDTH};

/// Compute a leaf hash: `SHA256(0x00 || canonical_bytes)`.
///
/// Accepts only `CanonicalBytes`, so every leaf in every tree went through
/// the canonicalization pipeline.
pub fn leaf_hash(payload: &CanonicalBytes) -> ContentDigest {
    let mut input = Vec::with_capacity(1 + payload.len());
    input.push(0x00);
    input.extend_from_slice(payload.as_bytes());
    digest_raw(&input)
}

/// Compute a parent node hash: `SHA256(0x01 || left || right)`.
pub fn node_hash(left: &ContentDigest, right: &ContentDigest) -> ContentDigest {
    let mut input = Vec::with_capacity(1 + 2 * DIGEST_WIDTH);
    input.push(0x01);
    input.extend_from_slice(left.as_bytes());
    input.extend_from_slice(right.as_bytes());
    digest_raw(&input)
}

/// Fold a level of child digests into a single root.
///
/// Returns `None` for an empty level; a single child is its own root.
pub fn fold_root(children: &[ContentDigest]) -> Option<ContentDigest> {
    if children.is_empty() {
        return None;
    }
    let mut level: Vec<ContentDigest> = children.to_vec();
    while level.len() > 1 {
        let mut next = Vec::with_capacity(level.len() / 2 + 1);
        let mut pairs = level.chunks_exact(2);
        for pair in &mut pairs {
            next.push(node_hash(&pair[0], &pair[1]));
        }
        // Odd count: the trailing node is promoted unchanged.
        if let [last] = pairs.remainder() {
            next.push(*last);
        }
        level = next;
    }
    Some(level[0])
}

fn digest_raw(input: &[u8]) -> ContentDigest {
    let hash = Sha256::digest(input);
    let mut bytes = [0u8; DIGEST_WIDTH];
    bytes.copy_from_slice(&hash);
    ContentDigest(bytes)
}
