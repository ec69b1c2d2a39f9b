//! # CLI Module
//!
//! User-facing command implementations. `auth` drives the OAuth flow,
//! `generate` runs the discovery pipeline end to end: followed artists →
//! related-artist expansion → release scan → dedup/rank → summary →
//! playlist. Commands print progress with `indicatif` and report through
//! the `info!`/`success!`/`warning!`/`error!` macros; `error!` terminates
//! the run, everything else degrades to skip-and-continue.

mod auth;
mod generate;

pub use auth::auth;
pub use generate::generate;
