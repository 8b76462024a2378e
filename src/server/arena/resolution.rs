/// Outcome resolution for a pair of simultaneous moves.
///
/// Pure lookup against the cyclic beats table; no state, no side effects.
use super::types::Move;

/// Which seat won a resolved match.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Winner {
    Player1,
    Player2,
}

/// Resolve two submitted moves. `None` is a tie.
pub fn resolve(move1: Move, move2: Move) -> Option<Winner> {
    if move1 == move2 {
        return None;
    }
    if move1.beats(move2) {
        Some(Winner::Player1)
    } else {
        Some(Winner::Player2)
    }
}
