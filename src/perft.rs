//! Perft testing module.
//!
//! This module implements the **perft (performance test)** routine, which is used to
//! validate move generation correctness by counting the number of leaf nodes reachable
//! from a given position at a specified search depth.
//!
//! `generate_legal_moves` already filters to legal moves, so perft simply sums leaf counts
//! without any post-hoc king-safety check.

use std::time::Instant;

use crate::attack::AttackTables;
use crate::board::Position;
use crate::movegen::generate_legal_moves;

pub fn benchmark_perft(depth: u64) {
    let tables = AttackTables::new();
    let mut position = Position::new();

    const RUNS: usize = 5;

    let mut nodes_vec: Vec<u64> = Vec::new();
    let mut time_vec: Vec<f64> = Vec::new();

    // Warmup run
    let _ = perft(&mut position, &tables, depth);

    for _ in 0..RUNS {
        let mut position_clone = Position::new();

        let start = Instant::now();
        let nodes = perft(&mut position_clone, &tables, depth);
        let elapsed = start.elapsed().as_secs_f64();

        nodes_vec.push(nodes);
        time_vec.push(elapsed);
    }

    // Sort times to remove fastest and slowest run
    time_vec.sort_by(|a, b| a.partial_cmp(b).unwrap());

    // Remove fastest and slowest
    let trimmed_times = &time_vec[1..RUNS - 1];

    if trimmed_times.is_empty() {
        panic!("Not enough runs for stable benchmark");
    }

    let avg_time: f64 = trimmed_times.iter().sum::<f64>() / trimmed_times.len() as f64;
    assert!(nodes_vec.iter().all(|&n| n == nodes_vec[0]));
    let nodes = nodes_vec[0];

    let nps = if avg_time > 0.0 { nodes as f64 / avg_time } else { 0.0 };

    log::info!("depth: {depth}");
    log::info!("nodes: {nodes}");
    log::info!("avg time: {avg_time:.6} s");
    log::info!("avg nps: {nps:.2} nodes/sec");
}

pub fn perft(position: &mut Position, tables: &AttackTables, depth: u64) -> u64 {
    if depth == 0 {
        return 1;
    }

    let moves = generate_legal_moves(position, tables);

    let mut nodes = 0;
    for &m in moves.iter() {
        position.make(m);
        nodes += perft(position, tables, depth - 1);
        position.unmake(m);
    }

    nodes
}

pub fn perft_n(depth: u64) -> u64 {
    let tables = AttackTables::new();
    let mut position = Position::new();
    position.print();

    let mut total = 0;
    for d in 1..=depth {
        let nodes = perft(&mut position, &tables, d);
        total += nodes;
        log::info!("perft({d}): {nodes}");
    }

    total
}

pub fn kiwipete(depth: u64) {
    let tables = AttackTables::new();
    let kiwipete_pos = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";
    let mut position = Position::from_fen(kiwipete_pos).unwrap();
    position.print();

    for d in 1..=depth {
        let nodes = perft(&mut position, &tables, d);
        log::info!("perft({d}): {nodes}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn startpos_perft_depth_1_is_20() {
        let tables = AttackTables::new();
        let mut position = Position::new();
        assert_eq!(perft(&mut position, &tables, 1), 20);
    }

    #[test]
    fn startpos_perft_depth_2_is_400() {
        let tables = AttackTables::new();
        let mut position = Position::new();
        assert_eq!(perft(&mut position, &tables, 2), 400);
    }
}
