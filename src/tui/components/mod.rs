//! # TUI Components
//!
//! All UI components for the terminal interface.
//!
//! ## Component Architecture
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! Receive everything they draw as props:
//! - `TitleBar`: app name, advice source, status, spinner
//! - `DialPad`: typed code and keypad buttons
//! - `VoicePanel`: listening state, transcript, reply
//!
//! ### Stateful Components (Event-Driven)
//!
//! - `MenuScreen` + `MenuCursor`: the phone display and its highlighted row
//! - `KeypadInput`: maps terminal keys onto keypad buttons
//!
//! ## Module Structure
//!
//! ```text
//! components/
//! ├── mod.rs          (this file)
//! ├── title_bar.rs    (top status bar)
//! ├── menu_screen.rs  (phone display)
//! ├── dial_pad.rs     (keypad)
//! └── voice_panel.rs  (voice page)
//! ```

pub mod dial_pad;
pub mod menu_screen;
mod title_bar;
pub mod voice_panel;

pub use dial_pad::{DIAL_PAD_HEIGHT, DialPad, KeypadEvent, KeypadInput};
pub use menu_screen::{MenuCursor, MenuEvent, MenuScreen};
pub use title_bar::TitleBar;
pub use voice_panel::VoicePanel;
