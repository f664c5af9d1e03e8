//! Animated loading indicator.
//!
//! The owner decides when the spinner is visible: it renders the spinner and
//! includes its [`subscriptions`](Component::subscriptions) only while
//! something is loading, so the timer stops with the animation.

use covidash_core::command::Command;
use covidash_core::component::Component;
use covidash_core::subscription::{subscribe, Subscription};
use covidash_core::subscriptions::Every;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::Span;
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use std::time::Duration;

/// Braille dot frames, cycling through ten positions.
pub const FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

const INTERVAL: Duration = Duration::from_millis(80);

/// Messages for the spinner component.
#[derive(Debug, Clone)]
pub enum Message {
    /// Advance to the next frame.
    Tick,
}

/// A spinner glyph followed by a title, e.g. `⠹ Loading data...`.
pub struct Spinner {
    frame_index: usize,
    title: String,
    style: Style,
    id: &'static str,
}

impl Spinner {
    /// Create a spinner; `id` keeps its timer distinct from other spinners.
    pub fn new(id: &'static str) -> Self {
        Self {
            frame_index: 0,
            title: String::new(),
            style: Style::default().fg(Color::Yellow),
            id,
        }
    }

    /// Set the text displayed after the glyph.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Restart the animation from the first frame.
    pub fn reset(&mut self) {
        self.frame_index = 0;
    }

    /// The text currently shown.
    pub fn text(&self) -> String {
        let glyph = FRAMES[self.frame_index];
        if self.title.is_empty() {
            glyph.to_string()
        } else {
            format!("{glyph} {}", self.title)
        }
    }
}

impl Component for Spinner {
    type Message = Message;

    fn update(&mut self, msg: Message) -> Command<Message> {
        match msg {
            Message::Tick => {
                self.frame_index = (self.frame_index + 1) % FRAMES.len();
                Command::none()
            }
        }
    }

    fn view(&self, frame: &mut Frame, area: Rect) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        frame.render_widget(Paragraph::new(Span::styled(self.text(), self.style)), area);
    }

    fn subscriptions(&self) -> Vec<Subscription<Message>> {
        vec![subscribe(Every::new(INTERVAL, self.id)).map(|_| Message::Tick)]
    }
}
