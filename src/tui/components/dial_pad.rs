//! # DialPad Component
//!
//! The phone keypad: a display showing the code typed so far, a 4×3 key
//! grid and a Delete row. Greyed out while a lookup is in flight.
//!
//! Rendering (`DialPad`) and key mapping (`KeypadInput`) are separate so
//! the mapping can be tested without a terminal.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Paragraph};

use crate::core::dial_buffer::DialBuffer;
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

const KEY_ROWS: [[char; 3]; 4] = [
    ['1', '2', '3'],
    ['4', '5', '6'],
    ['7', '8', '9'],
    ['*', '0', '#'],
];

const PLACEHOLDER: &str = "Dial *123#";

/// Display + keypad height: 3 for the display box, 4 key rows, Delete, borders.
pub const DIAL_PAD_HEIGHT: u16 = 3 + KEY_ROWS.len() as u16 + 1 + 2;

/// High-level events emitted by the keypad.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeypadEvent {
    Key(char),
    Delete,
    Clear,
    Send,
}

/// Maps terminal keys onto keypad buttons.
pub struct KeypadInput;

impl EventHandler for KeypadInput {
    type Event = KeypadEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<KeypadEvent> {
        match event {
            TuiEvent::InputChar(c) if DialBuffer::accepts(*c) => Some(KeypadEvent::Key(*c)),
            TuiEvent::Backspace | TuiEvent::Delete => Some(KeypadEvent::Delete),
            TuiEvent::ClearLine => Some(KeypadEvent::Clear),
            TuiEvent::Submit => Some(KeypadEvent::Send),
            _ => None,
        }
    }
}

pub struct DialPad<'a> {
    pub buffer: &'a str,
    pub disabled: bool,
}

impl<'a> DialPad<'a> {
    pub fn new(buffer: &'a str, disabled: bool) -> Self {
        Self { buffer, disabled }
    }

    fn key_lines(&self) -> Vec<Line<'static>> {
        let key_style = if self.disabled {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
        };

        let mut lines: Vec<Line> = KEY_ROWS
            .iter()
            .map(|row| {
                let spans: Vec<Span> = row
                    .iter()
                    .map(|key| Span::styled(format!("[ {key} ]"), key_style))
                    .collect();
                Line::from(spans)
            })
            .collect();

        let delete_style = if self.disabled || self.buffer.is_empty() {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default().fg(Color::Red)
        };
        lines.push(Line::from(Span::styled("[   Delete    ]", delete_style)));
        lines
    }
}

impl Component for DialPad<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let outer = Block::bordered()
            .border_type(BorderType::Rounded)
            .title(" Keypad ");
        let inner = outer.inner(area);
        frame.render_widget(outer, area);

        let [display_area, keys_area] =
            Layout::vertical([Constraint::Length(3), Constraint::Min(0)]).areas(inner);

        let (display_text, display_style) = if self.buffer.is_empty() {
            (PLACEHOLDER, Style::default().fg(Color::DarkGray))
        } else {
            (self.buffer, Style::default().fg(Color::Green).add_modifier(Modifier::BOLD))
        };
        let send_hint = if self.buffer.is_empty() || self.disabled {
            ""
        } else {
            " Enter: Send "
        };
        let display = Paragraph::new(display_text)
            .style(display_style)
            .alignment(Alignment::Center)
            .block(Block::bordered().title_bottom(Line::from(send_hint).right_aligned()));
        frame.render_widget(display, display_area);

        let keys = Paragraph::new(self.key_lines()).alignment(Alignment::Center);
        frame.render_widget(keys, keys_area);
    }
}
