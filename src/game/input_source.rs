use crate::game::session::{MatchContext, PlayerKind};
use crate::input_handler::{InputError, MoveInput};

pub trait InputSource {
    fn get_move(&self, session: &MatchContext) -> Result<Option<MoveInput>, InputError>;
}

pub struct HumanInput;

impl InputSource for HumanInput {
    fn get_move(&self, _session: &MatchContext) -> Result<Option<MoveInput>, InputError> {
        match crate::input_handler::parse_move_input() {
            Ok(move_input) => Ok(Some(move_input)),
            Err(InputError::UserExit) => Err(InputError::UserExit),
            Err(_) => Ok(None), // Other errors treated as invalid input
        }
    }
}

pub struct EngineInput;

impl InputSource for EngineInput {
    fn get_move(&self, _session: &MatchContext) -> Result<Option<MoveInput>, InputError> {
        Ok(Some(MoveInput::UseEngine))
    }
}

/// Asks `human` when the session's player registry gives the side to move to
/// a human, and the engine otherwise.
pub struct ConditionalInput<H: InputSource = HumanInput> {
    pub human: H,
}

impl<H: InputSource> InputSource for ConditionalInput<H> {
    fn get_move(&self, session: &MatchContext) -> Result<Option<MoveInput>, InputError> {
        match session.current_player() {
            PlayerKind::Human => self.human.get_move(session),
            PlayerKind::Engine => Ok(Some(MoveInput::UseEngine)),
        }
    }
}
