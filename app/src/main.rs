mod view;

use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

use engine::config::ConfigManager;
use engine::game::{Direction, Game, GameCommand, GameSettings, SessionRng, run_game_loop};
use engine::log;
use engine::logger::init_logger;

use view::TerminalView;

#[derive(Parser)]
#[command(
    name = "snake_wallpaper",
    about = "Tick-driven snake simulation for idle screens"
)]
struct Args {
    /// YAML settings file; built-in defaults are used when it does not exist
    #[arg(long, default_value = "snake.yaml")]
    config: String,

    /// Write the default settings to the config path and exit
    #[arg(long)]
    write_default_config: bool,

    /// Session RNG seed; random when omitted
    #[arg(long)]
    seed: Option<u64>,

    /// Take control of the snake (w/a/s/d + enter; p releases control, q quits)
    #[arg(long)]
    play: bool,

    /// Log deaths instead of drawing the arena
    #[arg(long)]
    headless: bool,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    init_logger(None);

    let manager = ConfigManager::<_, GameSettings>::from_yaml_file(&args.config);

    if args.write_default_config {
        match manager.store(&GameSettings::default()) {
            Ok(()) => log!("wrote default settings to {}", args.config),
            Err(e) => log!("{}", e),
        }
        return;
    }

    let mut settings = match manager.load() {
        Ok(settings) => settings,
        Err(e) => {
            log!("{}", e);
            std::process::exit(1);
        }
    };
    if args.play {
        settings.player_controlled = true;
    }
    let player_controlled = settings.player_controlled;

    let rng = match args.seed {
        Some(seed) => SessionRng::new(seed),
        None => SessionRng::from_random(),
    };
    let game = Game::new(settings, rng);

    let (command_tx, command_rx) = mpsc::unbounded_channel();
    let session = tokio::spawn(run_game_loop(
        game,
        command_rx,
        TerminalView::new(args.headless),
    ));
    // Keep one sender in hand so the session outlives a closed stdin.
    tokio::spawn(read_keys(command_tx.clone(), player_controlled));

    let _ = session.await;
}

/// Forwards line-buffered key presses into the session. Directions are
/// buffered by the game whether or not the player is in control; only the
/// player mode consumes them.
async fn read_keys(commands: mpsc::UnboundedSender<GameCommand>, initially_playing: bool) {
    let mut playing = initially_playing;
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Ok(Some(line)) = lines.next_line().await {
        for key in line.trim().chars() {
            let command = match key {
                'w' => GameCommand::Turn(Direction::Up),
                's' => GameCommand::Turn(Direction::Down),
                'a' => GameCommand::Turn(Direction::Left),
                'd' => GameCommand::Turn(Direction::Right),
                'p' => {
                    playing = !playing;
                    GameCommand::SetUsingInput(playing)
                }
                'q' => GameCommand::Stop,
                _ => continue,
            };
            if commands.send(command).is_err() {
                return;
            }
        }
    }
}
