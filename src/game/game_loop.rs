use std::fs::File;
use std::io::BufWriter;

use log::warn;

use crate::game::display::GameDisplay;
use crate::game::engine::{Engine, EngineConfig, EngineError, GameEnding};
use crate::game::input_source::InputSource;
use crate::game::recorder::MoveRecorder;
use crate::game::renderer::GameRenderer;
use crate::input_handler::InputError;

pub struct GameLoop<I: InputSource, R: GameRenderer> {
    engine: Engine,
    display: GameDisplay,
    input: I,
    renderer: R,
    recorder: Option<MoveRecorder<BufWriter<File>>>,
}

impl<I: InputSource, R: GameRenderer> GameLoop<I, R> {
    pub fn new(input: I, renderer: R, config: EngineConfig) -> Result<Self, EngineError> {
        Ok(Self {
            engine: Engine::with_config(config)?,
            display: GameDisplay::clearing(),
            input,
            renderer,
            recorder: None,
        })
    }

    pub fn with_recorder(mut self, recorder: MoveRecorder<BufWriter<File>>) -> Self {
        self.recorder = Some(recorder);
        self
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    /// Plays until a side wins or the user quits. Returns the ending, if any.
    pub fn run(&mut self) -> Option<GameEnding> {
        loop {
            let current_turn = self.engine.side_to_move();
            let last_move = self.engine.last_move();

            if let Some(ending) = self.engine.check_game_over() {
                self.display
                    .render_game_state(self.engine.board(), current_turn, last_move.as_ref(), None);
                match ending {
                    GameEnding::Surrounded { winner } => {
                        println!("Side {} wins, every opposing queen is surrounded!", winner)
                    }
                    GameEnding::NoLegalMoves { winner } => {
                        println!("Side {} cannot move. Side {} wins!", winner.opposite(), winner)
                    }
                }
                return Some(ending);
            }

            self.renderer
                .render(&mut self.display, &self.engine, current_turn, last_move.as_ref());

            match self.input.get_move(self.engine.session()) {
                Ok(Some(input)) => match self.engine.make_move_from_input(input) {
                    Ok(committed) => {
                        if let Some(recorder) = self.recorder.as_mut() {
                            if let Err(error) = recorder.record(&committed) {
                                warn!("{}", error);
                            }
                        }
                        if let Some(delay) = self.renderer.frame_delay() {
                            std::thread::sleep(delay);
                        }
                    }
                    Err(error) => println!("error: {}", error),
                },
                Ok(None) => println!("Invalid input"),
                Err(InputError::UserExit) => return None,
                Err(error) => println!("error: {}", error),
            }
        }
    }
}
