/// Economy module: credit accounts and post-match adjustments.

pub mod ledger;
