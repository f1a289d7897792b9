use crate::battle::Side;
use thiserror::Error;

/// Refusals from [`crate::battle::Battle`]. None of them mutate the battle.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BattleError {
    #[error("move index {index} is out of range ({available} moves known)")]
    InvalidMoveSelection { index: usize, available: usize },
    #[error("it is not side {side:?}'s turn")]
    OutOfTurn { side: Side },
    #[error("the battle has already concluded")]
    AlreadyConcluded,
    #[error("{name} has no damaging moves to choose from")]
    EmptyEligibleMoveSet { name: String },
}

/// Refusals from [`crate::tournament::Tournament`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TournamentError {
    #[error("the tournament is already complete")]
    Complete,
    #[error("the current match does not involve the player")]
    NotPlayerMatch,
    #[error("participant {0} is not part of the current match")]
    NotInMatch(usize),
    #[error("the battle has not concluded yet")]
    BattleInProgress,
    #[error("unknown participant {0}")]
    UnknownParticipant(usize),
}

pub type BattleResult<T> = Result<T, BattleError>;
pub type TournamentResult<T> = Result<T, TournamentError>;
