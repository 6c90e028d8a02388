//! Perft (performance test) for move generation correctness verification.

use std::ops::AddAssign;
use std::thread;

use tracing::{debug, trace};

use crate::board::Board;
use crate::chess_move::Move;
use crate::error::MoveError;

/// Leaf count of a perft run plus how the leaves were reached.
///
/// Statistics describe the move that produced each leaf. Checks and mates
/// are counted only when the board's annotations have them enabled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct PerftCounts {
    pub nodes: u64,
    pub captures: u64,
    pub en_passant: u64,
    pub castles: u64,
    pub promotions: u64,
    pub checks: u64,
    pub mates: u64,
}

impl PerftCounts {
    /// Count one leaf reached by `mv`.
    pub fn record(&mut self, mv: &Move) {
        self.nodes += 1;
        self.captures += u64::from(mv.is_capture());
        self.en_passant += u64::from(mv.is_en_passant());
        self.castles += u64::from(mv.is_castle());
        self.promotions += u64::from(mv.is_promotion());
        self.checks += u64::from(mv.is_check());
        self.mates += u64::from(mv.is_mate());
    }
}

impl AddAssign for PerftCounts {
    fn add_assign(&mut self, other: PerftCounts) {
        self.nodes += other.nodes;
        self.captures += other.captures;
        self.en_passant += other.en_passant;
        self.castles += other.castles;
        self.promotions += other.promotions;
        self.checks += other.checks;
        self.mates += other.mates;
    }
}

/// Count the leaves of the legal move tree `depth` plies deep.
///
/// Depth 0 returns a single node (the current position). At depth 1 the
/// annotated legal moves are tallied directly without being made.
pub fn perft(board: &mut Board, depth: usize) -> Result<PerftCounts, MoveError> {
    let counts = perft_inner(board, depth)?;
    debug!(depth, nodes = counts.nodes, "perft complete");
    Ok(counts)
}

fn perft_inner(board: &mut Board, depth: usize) -> Result<PerftCounts, MoveError> {
    let mut counts = PerftCounts::default();
    if depth == 0 {
        counts.nodes = 1;
        return Ok(counts);
    }

    let side = board.side_to_move();
    let moves = board.all_legal_moves(side)?;

    if depth == 1 {
        for mv in &moves {
            counts.record(mv);
        }
        return Ok(counts);
    }

    perft_share(board, &moves, depth - 1)
}

/// Sum perft below each of `moves`.
fn perft_share(board: &mut Board, moves: &[Move], depth: usize) -> Result<PerftCounts, MoveError> {
    let mut counts = PerftCounts::default();
    for mv in moves {
        board.make(mv)?;
        counts += perft_inner(board, depth)?;
        board.unmake(mv)?;
    }
    Ok(counts)
}

/// Run perft with per-move breakdown (useful for debugging).
///
/// Returns `(uci_move, node_count)` pairs sorted alphabetically. At depth 0
/// there are no root moves to break down and the result is empty.
pub fn divide(board: &mut Board, depth: usize) -> Result<Vec<(String, u64)>, MoveError> {
    if depth == 0 {
        return Ok(Vec::new());
    }
    let side = board.side_to_move();
    let moves = board.all_legal_moves(side)?;
    let mut results = Vec::with_capacity(moves.len());
    for mv in &moves {
        let nodes = if depth == 1 {
            1
        } else {
            board.make(mv)?;
            let nodes = perft_inner(board, depth - 1)?.nodes;
            board.unmake(mv)?;
            nodes
        };
        trace!(mv = %mv.to_uci(), nodes, "divide");
        results.push((mv.to_uci(), nodes));
    }
    results.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(results)
}

/// Perft with the root moves split across `threads` workers.
///
/// Each worker searches its share on its own clone of the board. The result
/// equals [`perft`] on the same position.
pub fn perft_parallel(board: &Board, depth: usize, threads: usize) -> Result<PerftCounts, MoveError> {
    if depth < 2 || threads <= 1 {
        return perft(&mut board.clone(), depth);
    }

    let mut root = board.clone();
    let side = root.side_to_move();
    let moves = root.all_legal_moves(side)?;
    let workers = threads.min(moves.len()).max(1);
    let chunk = moves.len().div_ceil(workers);
    debug!(depth, root_moves = moves.len(), workers, "splitting perft");

    let results: Vec<Result<PerftCounts, MoveError>> = thread::scope(|scope| {
        let handles: Vec<_> = moves
            .chunks(chunk.max(1))
            .map(|share| {
                let mut local = board.clone();
                scope.spawn(move || perft_share(&mut local, share, depth - 1))
            })
            .collect();
        handles
            .into_iter()
            .map(|handle| match handle.join() {
                Ok(result) => result,
                Err(payload) => std::panic::resume_unwind(payload),
            })
            .collect()
    });

    let mut total = PerftCounts::default();
    for result in results {
        total += result?;
    }
    debug!(depth, nodes = total.nodes, "perft complete");
    Ok(total)
}
