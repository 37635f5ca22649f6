//! Territory Rush entry point
//!
//! Runs a headless session driven by a scripted autopilot and logs what
//! happens. Usage: `territory-rush [config.json] [seed]`.

#[cfg(not(target_arch = "wasm32"))]
use std::process::ExitCode;

#[cfg(not(target_arch = "wasm32"))]
use territory_rush::{
    GameConfig,
    sim::{GameEvent, Session, SessionPhase, TickInput, tick},
};

/// Give up after five minutes of simulated play
#[cfg(not(target_arch = "wasm32"))]
const MAX_DEMO_TICKS: u64 = 60 * 60 * 5;

/// Walks rectangular loops out of the safe zone, rotating through the four
/// quadrants and widening each lap.
#[cfg(not(target_arch = "wasm32"))]
struct Autopilot {
    lap: u32,
    leg: usize,
    remaining: u32,
}

#[cfg(not(target_arch = "wasm32"))]
impl Autopilot {
    fn new() -> Self {
        Self {
            lap: 0,
            leg: 0,
            remaining: 0,
        }
    }

    /// Forget the current loop (after a respawn or a new stage)
    fn reset(&mut self) {
        self.leg = 0;
        self.remaining = 0;
    }

    fn next_input(&mut self) -> TickInput {
        // Out, across, back, home: returning along the first leg's axis closes the loop
        let reach = 30 + (self.lap % 6) * 12;
        let span = 20 + (self.lap % 4) * 8;
        let (out, across) = match self.lap % 4 {
            0 => (Dir::Right, Dir::Down),
            1 => (Dir::Down, Dir::Left),
            2 => (Dir::Left, Dir::Up),
            _ => (Dir::Up, Dir::Right),
        };
        let legs = [(out, reach), (across, span), (out.opposite(), reach), (across.opposite(), span)];

        if self.remaining == 0 {
            if self.leg == legs.len() {
                self.leg = 0;
                self.lap += 1;
                return self.next_input();
            }
            self.remaining = legs[self.leg].1;
            self.leg += 1;
        }
        self.remaining -= 1;
        legs[self.leg - 1].0.input()
    }
}

#[cfg(not(target_arch = "wasm32"))]
#[derive(Clone, Copy)]
enum Dir {
    Left,
    Right,
    Up,
    Down,
}

#[cfg(not(target_arch = "wasm32"))]
impl Dir {
    fn opposite(self) -> Self {
        match self {
            Dir::Left => Dir::Right,
            Dir::Right => Dir::Left,
            Dir::Up => Dir::Down,
            Dir::Down => Dir::Up,
        }
    }

    fn input(self) -> TickInput {
        TickInput {
            left: matches!(self, Dir::Left),
            right: matches!(self, Dir::Right),
            up: matches!(self, Dir::Up),
            down: matches!(self, Dir::Down),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> ExitCode {
    env_logger::init();
    log::info!("Territory Rush (headless) starting...");

    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => match GameConfig::load(&path) {
            Ok(config) => config,
            Err(e) => {
                log::error!("{e}");
                return ExitCode::FAILURE;
            }
        },
        None => GameConfig::default(),
    };
    let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(0x5eed);

    let mut session = match Session::new(config, seed) {
        Ok(session) => session,
        Err(e) => {
            log::error!("Invalid configuration: {e}");
            return ExitCode::FAILURE;
        }
    };
    log::info!("Session seed: {seed}");

    let mut pilot = Autopilot::new();
    while session.time_ticks < MAX_DEMO_TICKS {
        match session.phase {
            SessionPhase::Running => {
                let input = pilot.next_input();
                tick(&mut session, &input);
            }
            SessionPhase::StageClearPrompt => {
                if let Err(e) = session.resolve_stage_prompt(true) {
                    log::error!("Could not load next stage: {e}");
                    return ExitCode::FAILURE;
                }
            }
            SessionPhase::Declined | SessionPhase::AllStagesCleared | SessionPhase::GameOver => break,
        }

        for event in session.drain_events() {
            match event {
                GameEvent::LifeLost { .. } | GameEvent::StageAdvanced { .. } => pilot.reset(),
                GameEvent::AreaClaimed { cells, coverage } => {
                    log::info!("Claimed {cells} cells, {coverage:.1}% revealed");
                }
                _ => {}
            }
        }

        if session.time_ticks % 60 == 0 {
            log::debug!("{}", session.snapshot());
        }
    }

    log::info!("Final: {} ({:?})", session.snapshot(), session.phase);
    ExitCode::SUCCESS
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The simulation is driven by the embedding page on the web
}
