//! # www Architecture
//!
//! `www` routes whatever arrives on standard input to one destination: a
//! paste service, a mailbox, an object store or a chat channel. Every
//! destination sits behind the same [`provider::Provider`] trait and is picked
//! by name on the command line:
//!
//! ```text
//! make 2>&1 | www slack --channel builds
//! www setup s3
//! ```
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses the command, builds the terminal capabilities     │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Owns the registry and the config file location           │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - The send and setup lifecycles, the config round-trip     │
//! │  - Returns `CmdResult`, never prints                        │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Providers (providers/*.rs) + Config Store (config.rs)      │
//! │  - One network call per send                                │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Key Principle: Capabilities Are Injected
//!
//! Commands get stdin as an [`input::InputSource`] and prompting as a
//! [`credentials::Prompter`]. The binary passes the real terminal; tests pass
//! [`test_utils`] fixtures. Nothing below `api.rs` reads process state.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade
//! - [`commands`]: send, setup and providers
//! - [`registry`]: name to provider mapping
//! - [`provider`]: the provider contract
//! - [`providers`]: gist, gmail, s3 and slack
//! - [`config`]: the JSON config store
//! - [`credentials`]: flag/config/prompt precedence
//! - [`input`]: stdin capture
//! - [`content`]: the captured bytes
//! - [`logging`]: tracing setup
//! - [`init`]: config location and API construction
//! - [`error`]: Error types
//! - `cli`: Argument parsing and printing for the binary (not part of the lib API)

pub mod api;
pub mod commands;
pub mod config;
pub mod content;
pub mod credentials;
pub mod error;
pub mod init;
pub mod input;
pub mod logging;
pub mod provider;
pub mod providers;
pub mod registry;

#[cfg(any(test, feature = "test_utils"))]
pub mod test_utils;
