//! # hce-uid - UID management for an HCE card emulator
//!
//! A phone running host card emulation answers a door reader with a stored
//! identifier. This crate keeps that identifier and offers three ways to
//! replace it: typing hex text, generating a random one, or copying the UID
//! of a physical card held against the NFC adapter.
//!
//! ## Features
//!
//! - **Hex codec**: validation, normalization, and the display transform that
//!   reverses the first four bytes the way readers print them
//! - **Acquisition state machine**: a pure transition function over
//!   `Idle`, `Editing` and `Scanning`, with a thread-safe wrapper
//! - **Async scan sessions**: first tag or cancellation wins
//! - **Persistence**: JSON identifier record with source and timestamp
//! - **Door credentials**: the PIN + UID hash a reader checks against its
//!   allow-list
//!
//! ## Example Usage
//!
//! ```rust
//! use hce_uid::controller::{Controller, Outcome};
//! use hce_uid::hardware::{SimulatedHardware, TagEvent};
//! use hce_uid::storage::MemoryStore;
//!
//! let mut controller = Controller::new(MemoryStore::new(), SimulatedHardware::available());
//!
//! assert_eq!(controller.scan(), Some(Outcome::ScanStarted));
//! let outcome = controller.tag_detected(TagEvent::new(vec![0x04, 0xA1, 0xB2, 0xC3]));
//!
//! match outcome {
//!     Some(Outcome::Updated { identifier, display, .. }) => {
//!         assert_eq!(identifier, "04A1B2C3");
//!         assert_eq!(display, "C3B2A104");
//!     }
//!     other => panic!("unexpected outcome: {:?}", other),
//! }
//! ```
//!
//! ## Architecture
//!
//! - [`codec`] - Hex text validation and the display transform
//! - [`types`] - The validated [`Identifier`] newtype
//! - [`storage`] - The `IdentifierStore` trait, in-memory and JSON stores
//! - [`hardware`] - NFC adapter capabilities and tag event sources
//! - [`controller`] - The acquisition state machine and scan sessions
//! - [`credential`] - Door credential hashing and allow-lists
//! - [`reader`] - SELECT AID command and response handling
//! - [`config`] - Settings and paths
//! - [`error`] - Error types
//! - [`output`] - Plain and JSON output

pub mod cli;
pub mod codec;
pub mod config;
pub mod controller;
pub mod credential;
pub mod error;
pub mod hardware;
pub mod output;
pub mod reader;
pub mod storage;
pub mod types;

// Re-export commonly used types
pub use controller::{AcquisitionState, Controller, Input, Outcome, SharedController};
pub use error::{AcquisitionError, CodecError, StorageError};
pub use storage::{IdentifierStore, JsonStore, MemoryStore};
pub use types::Identifier;
