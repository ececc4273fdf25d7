//! Helpers shared by the integration tests.

#![allow(dead_code)]

/// Planar code of one graph in the 1-byte form, without the stream header.
pub fn short_record(neighbours: &[Vec<u8>]) -> Vec<u8> {
    let mut bytes = vec![neighbours.len() as u8];
    for rotation in neighbours {
        bytes.extend_from_slice(rotation);
        bytes.push(0);
    }
    bytes
}

/// Planar code of one graph in the 2-byte form, without the stream header.
pub fn long_record(neighbours: &[Vec<u8>]) -> Vec<u8> {
    let mut bytes = vec![0u8];
    bytes.extend_from_slice(&(neighbours.len() as u16).to_ne_bytes());
    for rotation in neighbours {
        for &id in rotation {
            bytes.extend_from_slice(&u16::from(id).to_ne_bytes());
        }
        bytes.extend_from_slice(&0u16.to_ne_bytes());
    }
    bytes
}

/// A complete stream holding `records`.
pub fn stream(records: &[Vec<u8>]) -> Vec<u8> {
    let mut bytes = b">>planar_code<<".to_vec();
    for record in records {
        bytes.extend_from_slice(record);
    }
    bytes
}

/// Symmetric neighbour lists on `n` vertices for the given 1-based edges.
pub fn adjacency(n: usize, edges: &[(u8, u8)]) -> Vec<Vec<u8>> {
    let mut neighbours = vec![Vec::new(); n];
    for &(a, b) in edges {
        neighbours[usize::from(a) - 1].push(b);
        neighbours[usize::from(b) - 1].push(a);
    }
    neighbours
}

pub fn isolated() -> Vec<Vec<u8>> {
    vec![Vec::new(); 12]
}

/// 12-cycle 1-2-...-12-1.
pub fn twelve_cycle() -> Vec<Vec<u8>> {
    let edges: Vec<_> = (1..=12u8).map(|v| (v, v % 12 + 1)).collect();
    adjacency(12, &edges)
}

/// Triangle 1-2-3 plus nine singletons.
pub fn triangle() -> Vec<Vec<u8>> {
    adjacency(12, &[(1, 2), (2, 3), (3, 1)])
}

/// Hexagon on 1..=6 plus six singletons.
pub fn hexagon() -> Vec<Vec<u8>> {
    adjacency(12, &[(1, 2), (2, 3), (3, 4), (4, 5), (5, 6), (6, 1)])
}
