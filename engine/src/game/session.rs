use std::future::Future;
use std::time::Instant;

use tokio::sync::mpsc;

use crate::log;

use super::game_state::{Game, TickSchedule};
use super::settings::GameSettings;
use super::snapshot::GameSnapshot;
use super::types::Direction;

/// Everything the outside world may ask of a running session. Commands are
/// applied between ticks, so the state machine never sees a mutation
/// mid-step.
#[derive(Clone, Debug)]
pub enum GameCommand {
    Turn(Direction),
    SetUsingInput(bool),
    UpdateSettings(GameSettings),
    Stop,
}

/// Receives a snapshot after every tick. Implemented by whatever wants to
/// observe the game (a terminal view, a test probe).
pub trait SnapshotSink: Send + Sync + 'static {
    fn publish(&self, snapshot: GameSnapshot) -> impl Future<Output = ()> + Send;
}

/// Drives the game until a `Stop` command arrives or every sender is
/// dropped. The loop sleeps exactly as long as the core asked for and keeps
/// absorbing commands while it waits, so input submission stays responsive
/// between ticks.
pub async fn run_game_loop<S: SnapshotSink>(
    mut game: Game,
    mut commands: mpsc::UnboundedReceiver<GameCommand>,
    sink: S,
) {
    log!("game session started with seed {}", game.seed());

    loop {
        let schedule = game.advance_tick();
        sink.publish(game.snapshot()).await;

        match schedule {
            TickSchedule::Immediate => {
                while let Ok(command) = commands.try_recv() {
                    if !handle_command(&mut game, command) {
                        return;
                    }
                }
            }
            TickSchedule::After(delay) => {
                let deadline = tokio::time::Instant::now() + delay;
                loop {
                    tokio::select! {
                        _ = tokio::time::sleep_until(deadline) => break,
                        command = commands.recv() => match command {
                            Some(command) => {
                                if !handle_command(&mut game, command) {
                                    return;
                                }
                            }
                            None => return,
                        },
                    }
                }
            }
        }
    }
}

fn handle_command(game: &mut Game, command: GameCommand) -> bool {
    match command {
        GameCommand::Turn(direction) => game.submit_input(direction, Instant::now()),
        GameCommand::SetUsingInput(enabled) => game.set_using_input(enabled),
        GameCommand::UpdateSettings(settings) => game.update_settings(settings),
        GameCommand::Stop => return false,
    }
    true
}
