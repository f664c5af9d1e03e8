//! Country search box.
//!
//! Collects free text and, when the user submits (Enter or the `[ Search ]`
//! button), emits a single [`Message::Search`] carrying the trimmed value.
//! Blank input emits nothing and is left in place.
//!
//! # Example
//!
//! ```ignore
//! // In the parent's update:
//! match msg {
//!     AppMsg::Input(search_input::Message::Search(country)) => {
//!         // hand `country` to the data widgets
//!     }
//!     AppMsg::Input(m) => self.input.update(m).map(AppMsg::Input),
//! }
//! ```

use covidash_core::command::Command;
use covidash_core::component::Component;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;
use unicode_width::UnicodeWidthChar;

/// Messages for the search input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    /// A keyboard event to process.
    KeyPress(KeyEvent),
    /// Paste text at the cursor position.
    Paste(String),
    /// The search button was activated.
    Submit,
    /// Emitted with the trimmed, non-empty query for the parent.
    Search(String),
}

/// Style configuration for the search input.
#[derive(Debug, Clone)]
pub struct SearchInputStyle {
    /// Text as typed.
    pub text: Style,
    /// Placeholder shown while empty and unfocused.
    pub placeholder: Style,
    /// The cell under the cursor.
    pub cursor: Style,
    /// The button label.
    pub button: Style,
    /// Border when focused.
    pub focused_border: Style,
    /// Border when not focused.
    pub unfocused_border: Style,
}

impl Default for SearchInputStyle {
    fn default() -> Self {
        Self {
            text: Style::default(),
            placeholder: Style::default().fg(Color::DarkGray),
            cursor: Style::default().add_modifier(Modifier::REVERSED),
            button: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            focused_border: Style::default().fg(Color::Cyan),
            unfocused_border: Style::default().fg(Color::DarkGray),
        }
    }
}

const BUTTON_LABEL: &str = "[ Search ]";

/// A single-line input with a search button.
pub struct SearchInput {
    value: Vec<char>,
    cursor: usize,
    focus: bool,
    placeholder: String,
    style: SearchInputStyle,
}

impl Default for SearchInput {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchInput {
    /// Create an empty, unfocused input with the default placeholder.
    pub fn new() -> Self {
        Self {
            value: Vec::new(),
            cursor: 0,
            focus: false,
            placeholder: "Enter country name".to_string(),
            style: SearchInputStyle::default(),
        }
    }

    /// Replace the placeholder text.
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    /// Set the style configuration.
    pub fn with_style(mut self, style: SearchInputStyle) -> Self {
        self.style = style;
        self
    }

    /// Give keyboard focus.
    pub fn focus(&mut self) {
        self.focus = true;
    }

    /// Remove keyboard focus.
    pub fn blur(&mut self) {
        self.focus = false;
    }

    /// The raw (untrimmed) text.
    pub fn value(&self) -> String {
        self.value.iter().collect()
    }

    /// Replace the text and move the cursor to its end.
    pub fn set_value(&mut self, value: &str) {
        self.value = value.chars().collect();
        self.cursor = self.value.len();
    }

    /// The placeholder text.
    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    /// Shared by Enter and the button: trim, validate, notify.
    fn submit(&self) -> Command<Message> {
        let value = self.value();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            Command::none()
        } else {
            Command::message(Message::Search(trimmed.to_string()))
        }
    }

    fn insert(&mut self, text: impl IntoIterator<Item = char>) {
        for c in text {
            self.value.insert(self.cursor, c);
            self.cursor += 1;
        }
    }

    /// Index of the first character shown so the cursor cell fits in `width` columns.
    fn scroll_start(&self, width: usize) -> usize {
        let mut used = 1; // the cursor cell itself
        let mut start = self.cursor;
        while start > 0 {
            let w = self.value[start - 1].width().unwrap_or(0);
            if used + w > width {
                break;
            }
            used += w;
            start -= 1;
        }
        start
    }
}

impl Component for SearchInput {
    type Message = Message;

    fn update(&mut self, msg: Message) -> Command<Message> {
        match msg {
            Message::KeyPress(key) => {
                // Release events arrive on Windows and with keyboard enhancement on.
                if !self.focus || key.kind == KeyEventKind::Release {
                    return Command::none();
                }
                match (key.code, key.modifiers) {
                    (KeyCode::Enter, _) if key.kind == KeyEventKind::Press => {
                        return self.submit()
                    }
                    (KeyCode::Char(c), KeyModifiers::NONE | KeyModifiers::SHIFT) => {
                        self.insert([c]);
                    }
                    (KeyCode::Backspace, _) => {
                        if self.cursor > 0 {
                            self.cursor -= 1;
                            self.value.remove(self.cursor);
                        }
                    }
                    (KeyCode::Delete, _) => {
                        if self.cursor < self.value.len() {
                            self.value.remove(self.cursor);
                        }
                    }
                    (KeyCode::Left, _) => self.cursor = self.cursor.saturating_sub(1),
                    (KeyCode::Right, _) => self.cursor = (self.cursor + 1).min(self.value.len()),
                    (KeyCode::Home, _) => self.cursor = 0,
                    (KeyCode::End, _) => self.cursor = self.value.len(),
                    _ => {}
                }
                Command::none()
            }
            Message::Paste(text) => {
                if self.focus {
                    self.insert(text.chars().filter(|c| !c.is_control()));
                }
                Command::none()
            }
            Message::Submit => self.submit(),
            Message::Search(_) => Command::none(),
        }
    }

    fn view(&self, frame: &mut Frame, area: Rect) {
        let border_style = if self.focus {
            self.style.focused_border
        } else {
            self.style.unfocused_border
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title("Search");
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let [text_area, button_area] = Layout::horizontal([
            Constraint::Fill(1),
            Constraint::Length(BUTTON_LABEL.len() as u16 + 1),
        ])
        .areas(inner);

        let mut spans = Vec::new();
        if self.value.is_empty() && !self.focus {
            spans.push(Span::styled(self.placeholder.as_str(), self.style.placeholder));
        } else if self.focus {
            let start = self.scroll_start(text_area.width as usize);
            let before: String = self.value[start..self.cursor].iter().collect();
            if !before.is_empty() {
                spans.push(Span::styled(before, self.style.text));
            }
            match self.value.get(self.cursor) {
                Some(c) => {
                    spans.push(Span::styled(c.to_string(), self.style.cursor));
                    let after: String = self.value[self.cursor + 1..].iter().collect();
                    if !after.is_empty() {
                        spans.push(Span::styled(after, self.style.text));
                    }
                }
                None => spans.push(Span::styled(" ", self.style.cursor)),
            }
        } else {
            spans.push(Span::styled(self.value(), self.style.text));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), text_area);

        frame.render_widget(
            Paragraph::new(Span::styled(BUTTON_LABEL, self.style.button)).right_aligned(),
            button_area,
        );
    }

    fn focused(&self) -> bool {
        self.focus
    }
}
