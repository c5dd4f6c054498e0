use crate::hash::hash_hex;

/// Fold a list of hex-string leaves into a single root.
///
/// Leaves are paired left to right and hashed as concatenated strings. An
/// odd trailing leaf is carried to the next level unhashed — a deliberate
/// departure from a canonical Merkle tree that existing signatures depend
/// on, so it must never be "fixed" to hash-with-self. A single leaf is its
/// own root; an empty list folds to the hash of the empty string.
pub fn merkle_root(leaves: &[String]) -> String {
    if leaves.is_empty() {
        return hash_hex("");
    }

    let mut nodes: Vec<String> = leaves.to_vec();
    while nodes.len() > 1 {
        let mut parents = Vec::with_capacity(nodes.len() / 2 + 1);
        for pair in nodes.chunks(2) {
            match pair {
                [left, right] => parents.push(hash_hex(&format!("{}{}", left, right))),
                [odd] => parents.push(odd.clone()),
                _ => unreachable!(),
            }
        }
        nodes = parents;
    }
    nodes.remove(0)
}
