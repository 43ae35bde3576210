// Simple command-line application to play chess
//
// Moves are entered in UCI format (`e2e4`, `e7e8q`). `undo` takes back the last move. If the
// `GRIDCHESS_ENGINE` environment variable points to a UCI engine, it plays Black and is not
// allowed to retreat.

use gridchess::{
    board::PrettyStyle, Color, DirectionRules, EngineConfig, Game, UciEngine,
};
use std::env;
use std::io::{self, BufRead, Write};

fn main() {
    env_logger::init();

    let mut engine = env::var_os("GRIDCHESS_ENGINE").and_then(|path| {
        match UciEngine::spawn(EngineConfig::new(path)) {
            Ok(engine) => Some(engine),
            Err(e) => {
                eprintln!("Cannot start engine: {}", e);
                None
            }
        }
    });
    let rules = DirectionRules::no_retreat(Color::Black);

    let mut stdin = io::stdin().lock();
    let mut game = Game::new_initial();

    loop {
        if let Some(outcome) = game.outcome() {
            println!("{}", game.board().pretty(PrettyStyle::Utf8));
            println!("Game finished: {}", outcome);
            println!("Moves: {}", game.uci_list());
            break;
        }

        if let (Some(engine), Color::Black) = (engine.as_mut(), game.side()) {
            match game.play_selected(engine, Some(&rules)) {
                Ok(Some(record)) => {
                    println!("Engine plays {}", record);
                    continue;
                }
                Ok(None) => println!("Engine has no move, your turn for Black"),
                Err(e) => println!("Engine move failed: {}", e),
            }
        }

        println!("{}", game.board().pretty(PrettyStyle::Utf8));
        if game.board().is_check() {
            println!("Check!");
        }
        print!(
            "{} move ({}): ",
            game.side().name(),
            game.board().move_number()
        );
        io::stdout().flush().unwrap();
        let mut s = String::new();
        if stdin.read_line(&mut s).unwrap() == 0 {
            break;
        }
        let s = s.trim();

        if s == "undo" {
            // With the engine on, take back its reply too
            let count = if engine.is_some() { 2 } else { 1 };
            if (0..count).filter_map(|_| game.pop()).count() == 0 {
                println!("Nothing to undo");
            }
            println!();
            continue;
        }

        match game.push_uci(s) {
            Ok(record) => println!("{}", record),
            Err(e) => println!("Bad move: {}", e),
        }
        println!();
    }
}
