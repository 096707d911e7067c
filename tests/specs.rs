//! Behavioral specifications for mlc.
//!
//! These specs drive mlc-core end to end against the fake backend, plus a
//! few black-box checks of the CLI surface.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

#[path = "specs/prelude.rs"]
mod prelude;

// cli/
// The black-box CLI surface specs live in `crates/cli/tests/surface.rs`:
// `assert_cmd`'s `Command::cargo_bin("mlc")` needs `CARGO_BIN_EXE_mlc`, which
// cargo only sets for integration tests of the crate that builds the binary.

// state/
#[path = "specs/state/derivation.rs"]
mod state_derivation;
#[path = "specs/state/jumps.rs"]
mod state_jumps;

// wizard/
#[path = "specs/wizard/flow.rs"]
mod wizard_flow;
#[path = "specs/wizard/rollback.rs"]
mod wizard_rollback;
#[path = "specs/wizard/stale.rs"]
mod wizard_stale;
