//! Statistics table for the selected country.
//!
//! The widget is a four-state machine and its view is a pure function of the
//! state:
//!
//! | State | Shown |
//! |-------|-------|
//! | [`TableState::Idle`] | "Enter a country to see data." |
//! | [`TableState::Loading`] | spinner and "Loading data..." |
//! | [`TableState::Loaded`] | one-row table titled `covid-data-table` |
//! | [`TableState::Error`] | "Error fetching data." |
//!
//! Clearing the selector returns to `Idle` without touching the data source.

use crate::format::group_thousands;
use crate::selector::{Change, Selector, Ticket};
use crate::spinner::{self, Spinner};
use covidash_api::{CountryStats, FetchError, StatsSource};
use covidash_core::command::Command;
use covidash_core::component::Component;
use covidash_core::subscription::Subscription;
use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table};
use ratatui::Frame;
use std::sync::Arc;

/// Title of the rendered data table.
pub const TABLE_TITLE: &str = "covid-data-table";

const IDLE_TEXT: &str = "Enter a country to see data.";
const LOADING_TEXT: &str = "Loading data...";
const ERROR_TEXT: &str = "Error fetching data.";
const HEADERS: [&str; 4] = ["Country", "Cases", "Deaths", "Recovered"];

/// What the table is currently showing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TableState {
    #[default]
    Idle,
    Loading,
    Loaded(CountryStats),
    Error,
}

/// Messages for the table widget.
#[derive(Debug, Clone)]
pub enum Message {
    /// The parent's country selector changed.
    CountryChanged(String),
    /// A statistics fetch finished.
    Loaded {
        generation: u64,
        result: Result<CountryStats, FetchError>,
    },
    /// Animation tick for the loading spinner.
    Spinner(spinner::Message),
}

/// Style configuration for the table widget.
#[derive(Debug, Clone)]
pub struct TableStyle {
    pub header: Style,
    pub row: Style,
    pub notice: Style,
    pub error: Style,
    pub border: Style,
}

impl Default for TableStyle {
    fn default() -> Self {
        Self {
            header: Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
            row: Style::default(),
            notice: Style::default().fg(Color::DarkGray),
            error: Style::default().fg(Color::Red),
            border: Style::default().fg(Color::DarkGray),
        }
    }
}

/// Shows the statistics of the selected country as a table.
pub struct TableWidget {
    selector: Selector,
    source: Arc<dyn StatsSource>,
    state: TableState,
    spinner: Spinner,
    style: TableStyle,
}

impl TableWidget {
    pub fn new(source: Arc<dyn StatsSource>) -> Self {
        Self {
            selector: Selector::new(),
            source,
            state: TableState::Idle,
            spinner: Spinner::new("table-spinner").with_title(LOADING_TEXT),
            style: TableStyle::default(),
        }
    }

    /// Set the style configuration.
    pub fn with_style(mut self, style: TableStyle) -> Self {
        self.style = style;
        self
    }

    pub fn state(&self) -> &TableState {
        &self.state
    }

    fn fetch(&mut self, ticket: Ticket) -> Command<Message> {
        let generation = ticket.generation();
        tracing::debug!(country = ticket.country(), generation, "table fetch");
        self.state = TableState::Loading;
        self.spinner.reset();
        Command::perform(
            self.source.country_stats(ticket.country()),
            move |result| Message::Loaded { generation, result },
        )
    }

    fn render_notice(&self, frame: &mut Frame, area: Rect, text: &str, style: Style) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.style.border);
        frame.render_widget(Paragraph::new(text).style(style).block(block), area);
    }

    fn render_stats(&self, frame: &mut Frame, area: Rect, stats: &CountryStats) {
        let header = Row::new(
            HEADERS
                .iter()
                .map(|h| Cell::from(*h).style(self.style.header)),
        )
        .bottom_margin(1);

        let row = Row::new([
            Cell::from(stats.country.clone()),
            Cell::from(group_thousands(stats.cases)),
            Cell::from(group_thousands(stats.deaths)),
            Cell::from(group_thousands(stats.recovered)),
        ])
        .style(self.style.row);

        let widths = [
            Constraint::Percentage(31),
            Constraint::Percentage(23),
            Constraint::Percentage(23),
            Constraint::Percentage(23),
        ];

        let table = Table::new([row], widths).header(header).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(self.style.border)
                .title(TABLE_TITLE),
        );
        frame.render_widget(table, area);
    }
}

impl Component for TableWidget {
    type Message = Message;

    fn update(&mut self, msg: Message) -> Command<Message> {
        match msg {
            Message::CountryChanged(country) => match self.selector.set(country) {
                Change::Requested(ticket) => self.fetch(ticket),
                Change::Cleared => {
                    self.state = TableState::Idle;
                    Command::none()
                }
                Change::Unchanged => Command::none(),
            },
            Message::Loaded { generation, result } => {
                if !self.selector.is_current(generation) {
                    tracing::debug!(generation, "discarding stale table result");
                    return Command::none();
                }
                self.state = match result {
                    Ok(stats) => TableState::Loaded(stats),
                    Err(err) => {
                        tracing::warn!(country = self.selector.current(), error = %err, "table fetch failed");
                        TableState::Error
                    }
                };
                Command::none()
            }
            Message::Spinner(msg) => self.spinner.update(msg).map(Message::Spinner),
        }
    }

    fn view(&self, frame: &mut Frame, area: Rect) {
        match &self.state {
            TableState::Idle => self.render_notice(frame, area, IDLE_TEXT, self.style.notice),
            TableState::Loading => {
                let block = Block::default()
                    .borders(Borders::ALL)
                    .border_style(self.style.border);
                let inner = block.inner(area);
                frame.render_widget(block, area);
                self.spinner.view(frame, inner);
            }
            TableState::Error => self.render_notice(frame, area, ERROR_TEXT, self.style.error),
            TableState::Loaded(stats) => self.render_stats(frame, area, stats),
        }
    }

    fn subscriptions(&self) -> Vec<Subscription<Message>> {
        if self.state != TableState::Loading {
            return vec![];
        }
        self.spinner
            .subscriptions()
            .into_iter()
            .map(|sub| sub.map(Message::Spinner))
            .collect()
    }
}
