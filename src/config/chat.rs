/// Chat configuration constants.
pub const MAX_HISTORY: usize = 100; // Messages retained for the history endpoint.
