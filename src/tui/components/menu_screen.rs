//! # Menu Screen Component
//!
//! The phone display. Renders whichever screen the navigator is on:
//! the welcome prompt, the language list, the symptom list, or the advice.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `MenuCursor` lives in `TuiState` and tracks the highlighted row
//! - `MenuScreen` is created each frame with borrowed state

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, List, ListItem, ListState, Padding, Paragraph};

use crate::core::navigator::Screen;
use crate::core::state::App;
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

/// Events emitted by the menu cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuEvent {
    /// Enter on the highlighted row.
    Activate(usize),
}

/// Highlighted row of the current menu. Reset whenever the screen changes.
pub struct MenuCursor {
    pub selected: usize,
    pub list_state: ListState,
    screen: Screen,
    len: usize,
}

impl MenuCursor {
    pub fn new() -> Self {
        Self {
            selected: 0,
            list_state: ListState::default().with_selected(Some(0)),
            screen: Screen::Welcome,
            len: 1,
        }
    }

    /// Bring the cursor in line with the screen being shown.
    pub fn sync(&mut self, screen: Screen, len: usize) {
        if screen != self.screen {
            self.screen = screen;
            self.selected = 0;
        }
        self.len = len;
        self.selected = self.selected.min(len.saturating_sub(1));
        self.list_state
            .select(if len == 0 { None } else { Some(self.selected) });
    }
}

impl Default for MenuCursor {
    fn default() -> Self {
        Self::new()
    }
}

impl EventHandler for MenuCursor {
    type Event = MenuEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<MenuEvent> {
        match event {
            TuiEvent::CursorUp => {
                self.selected = self.selected.saturating_sub(1);
                self.list_state.select(Some(self.selected));
                None
            }
            TuiEvent::CursorDown => {
                if self.len > 0 {
                    self.selected = (self.selected + 1).min(self.len - 1);
                    self.list_state.select(Some(self.selected));
                }
                None
            }
            TuiEvent::Submit if self.len > 0 => Some(MenuEvent::Activate(self.selected)),
            _ => None,
        }
    }
}

/// Number of selectable rows on `screen`.
pub fn row_count(app: &App, screen: Screen) -> usize {
    match screen {
        Screen::Welcome => 1,
        Screen::LanguageSelect => app.catalog.languages.len(),
        Screen::SymptomSelect => app.catalog.symptoms.len(),
        Screen::Feedback => 0,
    }
}

/// Transient render wrapper for the phone display.
pub struct MenuScreen<'a> {
    app: &'a App,
    cursor: &'a mut MenuCursor,
}

impl<'a> MenuScreen<'a> {
    pub fn new(app: &'a App, cursor: &'a mut MenuCursor) -> Self {
        Self { app, cursor }
    }

    fn header_lines(&self) -> Vec<Line<'static>> {
        let mut lines = Vec::new();
        if let Some(code) = &self.app.last_dialed {
            lines.push(Line::from(vec![
                Span::styled("Last dialed: ", Style::default().fg(Color::DarkGray)),
                Span::styled(code.clone(), Style::default().fg(Color::Gray)),
            ]));
        }
        if let Some(error) = &self.app.error {
            lines.push(Line::from(Span::styled(
                error.clone(),
                Style::default().fg(Color::Red),
            )));
        }
        lines
    }

    /// Rows for the current list plus the matching quick-dial codes.
    fn rows(&self) -> Vec<(String, String)> {
        let app = self.app;
        let root = &app.root_code;
        match app.navigator.screen() {
            Screen::Welcome => vec![(
                format!("Quick Dial: {}", app.root_dial_code()),
                app.root_dial_code(),
            )],
            Screen::LanguageSelect => app
                .catalog
                .languages
                .iter()
                .enumerate()
                .map(|(i, lang)| {
                    (
                        format!("{}. {}", i + 1, lang.name),
                        format!("*{}*{}#", root, i + 1),
                    )
                })
                .collect(),
            Screen::SymptomSelect => {
                let language_index = app
                    .catalog
                    .language_position(app.navigator.language())
                    .map_or(1, |i| i + 1);
                app.catalog
                    .symptoms
                    .iter()
                    .enumerate()
                    .map(|(i, symptom)| {
                        (
                            format!("{}. {}", i + 1, symptom.name),
                            format!("*{}*{}*{}#", root, language_index, i + 1),
                        )
                    })
                    .collect()
            }
            Screen::Feedback => Vec::new(),
        }
    }

    fn render_welcome(&mut self, frame: &mut Frame, area: Rect) {
        let [intro_area, list_area] =
            Layout::vertical([Constraint::Length(3), Constraint::Min(1)]).areas(area);
        let intro = Paragraph::new(vec![
            Line::from(Span::styled(
                "Welcome to JUVO Health",
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(format!("Dial {} to begin", self.app.root_dial_code())),
        ]);
        frame.render_widget(intro, intro_area);
        self.render_list(frame, list_area);
    }

    fn render_list(&mut self, frame: &mut Frame, area: Rect) {
        let items: Vec<ListItem> = self
            .rows()
            .into_iter()
            .enumerate()
            .map(|(i, (label, code))| {
                let style = if i == self.cursor.selected {
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD | Modifier::REVERSED)
                } else {
                    Style::default().fg(Color::Gray)
                };
                ListItem::new(Line::from(vec![
                    Span::styled(label, style),
                    Span::styled(format!("  {code}"), Style::default().fg(Color::Green)),
                ]))
            })
            .collect();
        frame.render_stateful_widget(List::new(items), area, &mut self.cursor.list_state);
    }

    fn render_feedback(&self, frame: &mut Frame, area: Rect) {
        let app = self.app;
        let language = app.catalog.language_name(app.navigator.language());
        let symptom = app
            .navigator
            .symptom()
            .map(|id| app.catalog.symptom_name(id))
            .unwrap_or_default();

        let mut lines = vec![
            Line::from(Span::styled(
                format!("{symptom} ({language})"),
                Style::default().fg(Color::Cyan),
            )),
            Line::default(),
        ];

        if app.is_loading {
            lines.push(Line::from(Span::styled(
                "Loading advice...",
                Style::default().fg(Color::Yellow),
            )));
        } else if let Some(advice) = &app.advice {
            let width = area.width.max(1) as usize;
            lines.extend(
                textwrap::wrap(advice, width)
                    .into_iter()
                    .map(|line| Line::from(line.into_owned())),
            );
        }

        lines.push(Line::default());
        lines.push(Line::from(Span::styled(
            "b Back  r Start Over",
            Style::default().fg(Color::DarkGray),
        )));
        frame.render_widget(Paragraph::new(lines), area);
    }
}

impl Component for MenuScreen<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let screen = self.app.navigator.screen();
        self.cursor.sync(screen, row_count(self.app, screen));

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .title(format!(" {} ", screen.title()))
            .padding(Padding::horizontal(1));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let header = self.header_lines();
        let [header_area, body_area] = Layout::vertical([
            Constraint::Length(header.len() as u16),
            Constraint::Min(0),
        ])
        .areas(inner);
        frame.render_widget(Paragraph::new(header), header_area);

        match screen {
            Screen::Welcome => self.render_welcome(frame, body_area),
            Screen::LanguageSelect | Screen::SymptomSelect => self.render_list(frame, body_area),
            Screen::Feedback => self.render_feedback(frame, body_area),
        }
    }
}
