/// Arena configuration constants.
///
/// This module defines the credit deltas applied after a resolved match
/// and the parameters used when generating match identifiers.
pub const WINNER_CREDITS: i64 = 50; // Credits awarded to the winner of a match.

/// Credits taken from the loser of a match (the ledger clamps balances at zero).
pub const LOSER_CREDITS: i64 = -20;

/// Length of the random token appended to a generated match id.
pub const MATCH_TOKEN_LEN: usize = 9;
