//! Terminal front end for a human-vs-engine session
//!
//! Thin glue over the library: reads coordinate-notation moves from stdin,
//! drives the opponent through the engine client, and prints the session
//! view after every ply.

use std::io::{self, BufRead, Write};

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use chess_session::{
    EngineClient, EngineConfig, HttpRecommender, MoveSource, SessionController, SessionPhase,
};
use chess_session::types::{Color, Move};

#[derive(Debug, Parser)]
#[command(name = "chess-session", about = "Play against a remote recommendation service")]
struct Args {
    /// Base URL of the recommendation service
    #[arg(long)]
    url: Option<String>,

    /// Search depth forwarded to the service
    #[arg(long)]
    depth: Option<u32>,

    /// Play the black pieces instead of white
    #[arg(long)]
    black: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let args = Args::parse();
    let mut config = EngineConfig::from_env();
    if let Some(url) = args.url {
        config.base_url = url;
    }
    if let Some(depth) = args.depth {
        config.depth = depth;
    }

    let player_color = if args.black {
        Color::Black
    } else {
        config.player_color()
    };
    let client = EngineClient::new(HttpRecommender::from_config(&config), config.depth);
    let mut session = SessionController::new(player_color);

    info!(
        "[SESSION] playing {player_color} against {} at depth {}",
        config.base_url, config.depth
    );

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        let view = session.view(None);
        println!("{}", view.status_line);

        match session.phase() {
            SessionPhase::Terminal(_) => {
                if let Some(message) = view.game_over {
                    println!("{message}");
                }
                println!("moves: {}", view.moves.join(" "));
                break;
            }
            SessionPhase::AwaitingOpponentMove => {
                if let Some(recommendation) = session.play_opponent_ply(&client).await? {
                    match recommendation.source {
                        MoveSource::Engine { score, nodes } => println!(
                            "engine plays {} (score {score}, {nodes} nodes)",
                            recommendation.mv
                        ),
                        MoveSource::Fallback => {
                            println!("engine plays {} (fallback)", recommendation.mv)
                        }
                    }
                }
            }
            SessionPhase::AwaitingHumanMove => {
                print!("your move> ");
                io::stdout().flush().context("flushing prompt")?;

                let Some(line) = lines.next() else { break };
                let line = line.context("reading stdin")?;
                let input = line.trim();

                match input {
                    "" => continue,
                    "quit" | "exit" => break,
                    "reset" => {
                        session.reset(player_color);
                        continue;
                    }
                    _ => match input.parse::<Move>() {
                        Ok(mv) => {
                            if let Err(e) = session.submit_move(mv) {
                                println!("{e}");
                            }
                        }
                        Err(e) => println!("{e}"),
                    },
                }
            }
        }
    }

    Ok(())
}
