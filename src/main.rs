//! Hemisphere Hunter headless runner
//!
//! Plays matches with the autopilot steering both circles, feeds every frame
//! through the view layer and prints a JSON summary.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use glam::Vec2;
use serde::Serialize;

use hemisphere_hunter::consts::{DEFAULT_ARENA_HEIGHT, DEFAULT_ARENA_WIDTH};
use hemisphere_hunter::highscores::HighScoreEntry;
use hemisphere_hunter::sim::{
    ArcadePhysics, Autopilot, MatchObserver, MatchReport, MatchState, finish_match, tick,
};
use hemisphere_hunter::view::{FrameStats, Presenter, build_frame};
use hemisphere_hunter::{ConfigError, HighScores, JoystickMode, QualityPreset, Settings, Tuning};

#[derive(Parser, Debug)]
#[command(name = "hemisphere-hunter")]
#[command(about = "Headless autopilot runner for Hemisphere Hunter")]
struct Cli {
    /// RNG seed for the first match
    #[arg(long, default_value_t = 1)]
    seed: u64,
    /// Number of matches to play
    #[arg(long, default_value_t = 1)]
    matches: u32,
    /// Tuning JSON file (defaults are used when omitted)
    #[arg(long)]
    tuning: Option<PathBuf>,
    #[arg(long, default_value_t = DEFAULT_ARENA_WIDTH)]
    width: f32,
    #[arg(long, default_value_t = DEFAULT_ARENA_HEIGHT)]
    height: f32,
    /// Simulated frame rate
    #[arg(long, default_value_t = 60.0)]
    fps: f32,
    /// Give up on a match after this many frames
    #[arg(long, default_value_t = 36_000)]
    max_frames: u64,
    #[arg(long, value_enum, default_value_t = CliQuality::Medium)]
    quality: CliQuality,
    #[arg(long, value_enum)]
    joystick: Option<CliJoystick>,
    #[arg(long)]
    sensitivity: Option<f32>,
    #[arg(long, default_value_t = false)]
    no_particles: bool,
    #[arg(long, default_value_t = false)]
    reduced_motion: bool,
    /// Fraction of full joystick deflection the autopilot uses
    #[arg(long, default_value_t = 1.0)]
    aggression: f32,
    /// Pretty-print the JSON summary
    #[arg(long, default_value_t = false)]
    pretty: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum CliQuality {
    Low,
    Medium,
    High,
}

impl From<CliQuality> for QualityPreset {
    fn from(value: CliQuality) -> Self {
        match value {
            CliQuality::Low => QualityPreset::Low,
            CliQuality::Medium => QualityPreset::Medium,
            CliQuality::High => QualityPreset::High,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum CliJoystick {
    FreeRoam,
    FixedZone,
}

impl From<CliJoystick> for JoystickMode {
    fn from(value: CliJoystick) -> Self {
        match value {
            CliJoystick::FreeRoam => JoystickMode::FreeRoam,
            CliJoystick::FixedZone => JoystickMode::FixedZone,
        }
    }
}

#[derive(Serialize)]
struct RunSummary {
    seed: u64,
    settings: Settings,
    matches: Vec<MatchReport>,
    /// Matches cut off by `--max-frames`
    abandoned: u32,
    best: Option<u32>,
    leaderboard: Vec<HighScoreEntry>,
    frames: FrameStats,
}

/// Fan a finished match out to the leaderboard and the summary
struct Session {
    scores: HighScores,
    reports: Vec<MatchReport>,
}

impl MatchObserver for Session {
    fn match_ended(&mut self, report: &MatchReport) {
        self.scores.match_ended(report);
        self.reports.push(*report);
    }
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    match run(&cli) {
        Ok(summary) => {
            let json = if cli.pretty {
                serde_json::to_string_pretty(&summary)
            } else {
                serde_json::to_string(&summary)
            };
            match json {
                Ok(json) => {
                    println!("{json}");
                    ExitCode::SUCCESS
                }
                Err(err) => {
                    log::error!("Failed to encode summary: {err}");
                    ExitCode::FAILURE
                }
            }
        }
        Err(err) => {
            log::error!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<RunSummary, ConfigError> {
    let base = match &cli.tuning {
        Some(path) => Tuning::load(path)?,
        None => Tuning::default(),
    };

    let settings = Settings {
        quality: cli.quality.into(),
        particles: !cli.no_particles,
        joystick_mode: cli.joystick.map(Into::into),
        sensitivity: cli.sensitivity,
        reduced_motion: cli.reduced_motion,
    };
    let tuning = settings.apply_to(&base);
    tuning.validate()?;

    if !(cli.fps.is_finite() && cli.fps > 0.0) {
        return Err(ConfigError::Invalid {
            field: "fps",
            reason: format!("must be positive, got {}", cli.fps),
        });
    }
    let frame_ms = 1000.0 / cli.fps;

    let arena = Vec2::new(cli.width, cli.height);
    if !(arena.is_finite() && arena.x > 0.0 && arena.y > 0.0) {
        return Err(ConfigError::Invalid {
            field: "width/height",
            reason: format!("arena must be positive, got {}x{}", cli.width, cli.height),
        });
    }
    let mut state =
        MatchState::new(cli.seed, arena, tuning).with_particle_cap(settings.max_particles());

    let mut physics = ArcadePhysics::new();
    let pilot = Autopilot::new(cli.aggression);
    let mut stats = FrameStats::default();
    let mut session = Session {
        scores: HighScores::new(),
        reports: Vec::with_capacity(cli.matches as usize),
    };
    let mut abandoned = 0;

    for match_index in 0..cli.matches {
        if match_index > 0 {
            state.begin();
        }

        loop {
            let input = pilot.input_for(&state);
            if let Some(report) = tick(&mut state, &mut physics, &input, frame_ms) {
                session.match_ended(&report);
                break;
            }
            stats.present(&build_frame(&state));

            if state.frame >= cli.max_frames {
                log::warn!(
                    "Match {} still running after {} frames; ending it",
                    match_index + 1,
                    cli.max_frames
                );
                abandoned += 1;
                if let Some(report) = finish_match(&mut state) {
                    session.match_ended(&report);
                }
                break;
            }
        }
    }

    Ok(RunSummary {
        seed: cli.seed,
        settings,
        best: session.scores.top_score(),
        leaderboard: session.scores.entries,
        matches: session.reports,
        abandoned,
        frames: stats,
    })
}
