//! # Core Application Logic
//!
//! The simulator's business logic. It knows nothing about any specific UI
//! technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • DialBuffer (keys)    │
//!                    │  • ussd (interpreter)   │
//!                    │  • Navigator (menus)    │
//!                    │  • App + update()       │
//!                    │                         │
//!                    │  No I/O. No UI. Pure.   │
//!                    └───────────┬─────────────┘
//!                                │ Effect
//!            ┌───────────────────┴───────────────────┐
//!            ▼                                       ▼
//!     ┌────────────┐                          ┌────────────┐
//!     │    TUI     │                          │   Advice   │
//!     │  Adapter   │                          │   Source   │
//!     │ (ratatui)  │                          │ (table/API)│
//!     └────────────┘                          └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`dial_buffer`]: keystrokes of the code being dialed
//! - [`ussd`]: code → navigation intent
//! - [`navigator`]: the menu state machine
//! - [`state`]: The `App` struct, all session state in one place
//! - [`action`]: The `Action` enum and the `update()` reducer
//! - [`config`]: settings and their override hierarchy

pub mod action;
pub mod config;
pub mod dial_buffer;
pub mod navigator;
pub mod state;
pub mod ussd;
