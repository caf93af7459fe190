//! Beam Puzzle entry point
//!
//! Natively this is a headless runner: it loads a level set, traces every
//! level as shipped and reports which targets light up. The browser build
//! is driven through `beam_puzzle::web` instead.
//!
//! Usage: `beam-puzzle [levels.json] [settings.json] [--dump]`

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Beam Puzzle (native) starting...");

    let args: Vec<String> = std::env::args().skip(1).collect();
    if let Err(e) = native::run(&args) {
        log::error!("{e}");
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is web::wasm_start, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::Path;

    use beam_puzzle::sim::PuzzleState;
    use beam_puzzle::{DEFAULT_LEVELS, LevelSet, Settings};

    pub fn run(args: &[String]) -> Result<(), Box<dyn std::error::Error>> {
        let dump = args.iter().any(|a| a == "--dump");
        let mut paths = args.iter().filter(|a| !a.starts_with("--"));

        let levels = match paths.next() {
            Some(path) => LevelSet::from_json(&std::fs::read_to_string(path)?)?,
            None => {
                log::info!("No level file given, using built-in levels");
                LevelSet::from_json(DEFAULT_LEVELS)?
            }
        };
        let settings = paths
            .next()
            .map(|p| Settings::load_from(Path::new(p)))
            .unwrap_or_default();

        let mut state = PuzzleState::new(levels, settings);
        for index in 0..state.levels().len() {
            state.load_level(index);
            state.retrace();

            let name = state
                .level()
                .and_then(|l| l.name.clone())
                .unwrap_or_else(|| "untitled".to_string());
            println!(
                "Level {} ({name}): {}/{} targets lit{}",
                index + 1,
                state.lit_count(),
                state.targets.len(),
                if state.all_lit { ", solved as shipped" } else { "" }
            );
            for (i, beam) in state.beams.iter().enumerate() {
                println!(
                    "  beam {i} [{}]: {:?} after {} interactions, {} waypoints",
                    beam.color.as_str(),
                    beam.outcome,
                    beam.interactions,
                    beam.path.len()
                );
            }
            if dump {
                println!("{}", serde_json::to_string_pretty(&state.beams)?);
            }
        }
        Ok(())
    }
}
