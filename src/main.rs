mod app;
mod input;
mod logging;
mod ui;

use app::App;
use crossterm::event::{self, Event};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use fencing::build_info;
use fencing::core::constants::{FRAME_INTERVAL_MS, MAX_TICK_SECONDS};
use fencing::duel::{MatchConfig, PointsToWin};
use fencing::error::MatchError;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

/// Command line options for the game binary.
#[derive(Debug, Default)]
struct CliOptions {
    points: Option<PointsToWin>,
    seed: Option<u64>,
    config_path: Option<PathBuf>,
}

fn main() -> io::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let options = match parse_args(&args) {
        Ok(options) => options,
        Err(message) => {
            eprintln!("{}", message);
            eprintln!("Run 'fencing --help' for usage.");
            std::process::exit(1);
        }
    };

    let base_config = match &options.config_path {
        Some(path) => match MatchConfig::load(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Could not load {}: {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => MatchConfig::default(),
    };

    // A missing data directory only costs us the log file. The guard lives
    // until main returns so the last lines reach the file.
    let _log_guard = match logging::init() {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("Warning: logging disabled ({})", e);
            None
        }
    };
    tracing::info!("{}", build_info::version_string());

    let mut app = App::new(base_config, options.seed);
    if let Some(points) = options.points {
        app.start_match(points).map_err(into_io)?;
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, &mut app);

    // Cleanup terminal, even when the loop failed
    disable_raw_mode()?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = &result {
        tracing::error!("game loop failed: {}", e);
    }
    result
}

/// Frame loop: draw, collect key presses until the frame deadline, then tick
/// the match with the measured frame time.
fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> io::Result<()> {
    let frame_interval = Duration::from_millis(FRAME_INTERVAL_MS);
    let mut last_frame = Instant::now();

    while !app.should_quit {
        terminal.draw(|frame| ui::draw(frame, app))?;

        let deadline = last_frame + frame_interval;
        loop {
            let timeout = deadline.saturating_duration_since(Instant::now());
            if !event::poll(timeout)? {
                break;
            }
            if let Event::Key(key_event) = event::read()? {
                app.handle_key(key_event).map_err(into_io)?;
            }
            if app.should_quit {
                return Ok(());
            }
        }

        // A stalled terminal must not fast-forward the match clock.
        let now = Instant::now();
        let dt = now
            .duration_since(last_frame)
            .as_secs_f64()
            .min(MAX_TICK_SECONDS);
        last_frame = now;

        app.update(dt).map_err(into_io)?;
    }

    Ok(())
}

fn into_io(error: MatchError) -> io::Error {
    io::Error::other(error)
}

fn parse_args(args: &[String]) -> Result<CliOptions, String> {
    let mut options = CliOptions::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-p" | "--points" => {
                let points: u32 = parse_value(args, &mut i)?;
                options.points = Some(PointsToWin::try_from(points).map_err(|e| e.to_string())?);
            }
            "-s" | "--seed" => {
                options.seed = Some(parse_value(args, &mut i)?);
            }
            "-c" | "--config" => {
                options.config_path = Some(PathBuf::from(parse_value::<String>(args, &mut i)?));
            }
            "--version" | "-v" => {
                println!("{}", build_info::version_string());
                std::process::exit(0);
            }
            "--help" | "-h" => {
                print_help();
                std::process::exit(0);
            }
            other => return Err(format!("Unknown option: {}", other)),
        }
        i += 1;
    }

    Ok(options)
}

fn parse_value<T: std::str::FromStr>(args: &[String], i: &mut usize) -> Result<T, String> {
    let flag = &args[*i];
    let value = args
        .get(*i + 1)
        .ok_or_else(|| format!("{} needs a value", flag))?;
    *i += 1;
    value
        .parse()
        .map_err(|_| format!("Invalid value for {}: {}", flag, value))
}

fn print_help() {
    println!("Fencing - Two-Player Terminal Fencing Duel\n");
    println!("Usage: fencing [options]\n");
    println!("Options:");
    println!("  -p, --points <5|10|15>  Skip the menu and fence to this many touches");
    println!("  -s, --seed <N>          Reproducible hit rolls");
    println!("  -c, --config <PATH>     Load match timings from a JSON file");
    println!("  -v, --version           Show version information");
    println!("  -h, --help              Show this help message");
    println!();
    println!("Controls:");
    println!("  Player 1  W lunge   E fleche   S parry   D forward   A back");
    println!("  Player 2  Up lunge  / fleche   Down parry  Left forward  Right back");
    println!("  Esc       Abandon the match / quit");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        std::iter::once("fencing")
            .chain(list.iter().copied())
            .map(String::from)
            .collect()
    }

    #[test]
    fn test_parse_points_and_seed() {
        let options = parse_args(&args(&["--points", "15", "-s", "42"])).unwrap();
        assert_eq!(options.points, Some(PointsToWin::Fifteen));
        assert_eq!(options.seed, Some(42));
        assert!(options.config_path.is_none());
    }

    #[test]
    fn test_parse_rejects_unsupported_points() {
        let err = parse_args(&args(&["--points", "7"])).unwrap_err();
        assert!(err.contains('7'));
    }

    #[test]
    fn test_parse_missing_value() {
        let err = parse_args(&args(&["--seed"])).unwrap_err();
        assert!(err.contains("needs a value"));
    }

    #[test]
    fn test_parse_unknown_option() {
        assert!(parse_args(&args(&["--turbo"])).is_err());
    }
}
