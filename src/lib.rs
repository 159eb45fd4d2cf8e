//! Text Patcher: swap one known block of text in one file
//!
//! Reads an artifact fully as UTF-8, replaces the first occurrence of a
//! pattern block with a replacement block, and writes the artifact back in
//! place. When the pattern is absent nothing is written and the run reports
//! [`PatchOutcome::NotFound`], so applying the same patch twice is harmless.
//!
//! # Architecture
//!
//! The replacement compiles down to a single primitive, [`Edit`]: a verified
//! byte-span splice on an in-memory string. [`patcher`] finds the span and
//! owns the file I/O. [`builtin`] carries the About-section rewrite the CLI
//! applies by default, and [`config`] loads other patches from TOML.
//!
//! # Example
//!
//! ```no_run
//! use text_patcher::{patch, PatchOutcome};
//!
//! match patch("app/page.tsx", "old paragraph", "new paragraph") {
//!     Ok(PatchOutcome::Patched { .. }) => println!("patched"),
//!     Ok(PatchOutcome::NotFound { .. }) => println!("pattern not found"),
//!     Err(e) => eprintln!("patch failed: {}", e),
//! }
//! ```

pub mod builtin;
pub mod config;
pub mod edit;
pub mod patcher;

// Re-exports
pub use config::{load_from_path, load_from_str, ConfigError, PatchFile};
pub use edit::{Edit, EditError, EditVerification};
pub use patcher::{
    apply_to_str, inspect, patch, plan, PatchError, PatchOutcome, PatchStatus, Plan, Replaced,
    TextPatch,
};
