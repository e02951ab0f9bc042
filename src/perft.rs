use rayon::prelude::*;

use crate::position::Position;

/// Count the leaf nodes of the legal-move tree `depth` plies deep.
pub fn run_perft_test(position: &Position, depth: u8) -> u64 {
    if depth == 0 {
        return 1;
    }

    let moves = position.all_legal_moves();
    if depth == 1 {
        return moves.len() as u64;
    }

    moves
        .into_iter()
        .map(|m| run_perft_test(&position.apply_unchecked(m), depth - 1))
        .sum()
}

/// Same count as [`run_perft_test`], with the root moves split across the
/// rayon thread pool.
pub fn run_perft_parallel(position: &Position, depth: u8) -> u64 {
    if depth <= 1 {
        return run_perft_test(position, depth);
    }

    position
        .all_legal_moves()
        .into_par_iter()
        .map(|m| run_perft_test(&position.apply_unchecked(m), depth - 1))
        .sum()
}

/// Per root move node counts, sorted by move, for comparing against another
/// move generator.
pub fn divide(position: &Position, depth: u8) -> Vec<(String, u64)> {
    let mut counts: Vec<(String, u64)> = position
        .all_legal_moves()
        .into_par_iter()
        .map(|m| {
            let nodes = run_perft_test(&position.apply_unchecked(m), depth.saturating_sub(1));
            (m.to_coordinate(), nodes)
        })
        .collect();
    counts.sort();
    counts
}

/// Perft from starting position
///
/// https://www.chessprogramming.org/Perft_Results
///
/// Only depths without en passant, castling or promotion in the tree are
/// listed, those match this rule set exactly.
///
/// | Depth | Nodes   | Captures | Checks | Checkmates |
/// | ----- | ------- | -------- | ------ | ---------- |
/// | 0     | 1       | 0        | 0      | 0          |
/// | 1     | 20      | 0        | 0      | 0          |
/// | 2     | 400     | 0        | 0      | 0          |
/// | 3     | 8,902   | 34       | 12     | 0          |
/// | 4     | 197,281 | 1576     | 469    | 8          |
pub fn expected_start_node_count(depth: u8) -> Option<u64> {
    match depth {
        0 => Some(1),
        1 => Some(20),
        2 => Some(400),
        3 => Some(8902),
        4 => Some(197_281),
        _ => None,
    }
}
