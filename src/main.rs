mod cli;

use std::time::Instant;

use anyhow::{Context, Result};
use arbiter_core::{Annotations, Board, divide, perft_parallel};
use tracing::info;

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let argv: Vec<String> = std::env::args().skip(1).collect();
    let args = cli::parse_args(&argv[..]).context("failed to parse arguments")?;
    if args.help {
        println!("{}", cli::USAGE);
        return Ok(());
    }

    let mut board: Board = args
        .fen
        .parse()
        .with_context(|| format!("invalid position: {}", args.fen))?;
    for text in &args.moves {
        let mv = board
            .parse_move(text)
            .with_context(|| format!("cannot play {text} in {board}"))?;
        board
            .make(&mv)
            .with_context(|| format!("failed to make {text}"))?;
    }
    if !args.annotations {
        board.set_annotations(Annotations::NONE);
    }

    if args.show {
        println!("{}", board.pretty());
        println!("{board}");
        println!("status: {:?}", board.status().context("failed to classify position")?);
    }

    info!(fen = %board, depth = args.depth, threads = args.threads, "perft starting");
    let start = Instant::now();

    if args.divide {
        let parts = divide(&mut board, args.depth).context("divide failed")?;
        let mut total = 0u64;
        for (mv, nodes) in &parts {
            println!("{mv}: {nodes}");
            total += *nodes;
        }
        println!();
        println!("moves: {}", parts.len());
        println!("nodes: {total}");
        info!(
            depth = args.depth,
            nodes = total,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "divide complete"
        );
        return Ok(());
    }

    let counts = perft_parallel(&board, args.depth, args.threads).context("perft failed")?;
    let elapsed = start.elapsed();

    println!("nodes:      {}", counts.nodes);
    println!("captures:   {}", counts.captures);
    println!("en passant: {}", counts.en_passant);
    println!("castles:    {}", counts.castles);
    println!("promotions: {}", counts.promotions);
    if args.annotations {
        println!("checks:     {}", counts.checks);
        println!("mates:      {}", counts.mates);
    }

    let nps = counts.nodes as f64 / elapsed.as_secs_f64().max(1e-9);
    info!(
        depth = args.depth,
        nodes = counts.nodes,
        elapsed_ms = elapsed.as_millis() as u64,
        nps = nps as u64,
        "perft complete"
    );
    Ok(())
}
