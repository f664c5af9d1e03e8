//! The dashboard screen: search box, statistics table, chart and map.
//!
//! Submitting a country hands it to all three data widgets in one batch;
//! each fetches on its own.

use covidash_api::{GeoSource, StatsSource};
use covidash_core::{terminal_events, Command, Component, Model, Subscription, TerminalEvent};
use covidash_widgets::{chart, map, search_input, table};
use covidash_widgets::{ChartWidget, MapWidget, SearchInput, TableWidget};
use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::layout::{Alignment, Constraint, Layout};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use std::sync::Arc;

/// What the dashboard is started with.
pub struct Flags {
    pub stats: Arc<dyn StatsSource>,
    pub geo: Arc<dyn GeoSource>,
    /// Country searched for on startup, as if typed and submitted.
    pub initial: Option<String>,
}

pub struct Dashboard {
    input: SearchInput,
    chart: ChartWidget,
    map: MapWidget,
    table: TableWidget,
}

#[derive(Debug)]
pub enum Msg {
    Input(search_input::Message),
    Chart(chart::Message),
    Map(map::Message),
    Table(table::Message),
    Quit,
}

impl Dashboard {
    /// Hand the country to every data widget.
    fn select(&mut self, country: String) -> Command<Msg> {
        Command::batch([
            self.table
                .update(table::Message::CountryChanged(country.clone()))
                .map(Msg::Table),
            self.chart
                .update(chart::Message::CountryChanged(country.clone()))
                .map(Msg::Chart),
            self.map
                .update(map::Message::CountryChanged(country))
                .map(Msg::Map),
        ])
    }
}

/// Esc and Ctrl+C quit; every other key and paste goes to the search box.
fn route_event(event: TerminalEvent) -> Option<Msg> {
    match event {
        TerminalEvent::Key(key) => match key.code {
            KeyCode::Esc => Some(Msg::Quit),
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Some(Msg::Quit),
            _ => Some(Msg::Input(search_input::Message::KeyPress(key))),
        },
        TerminalEvent::Paste(text) => Some(Msg::Input(search_input::Message::Paste(text))),
        TerminalEvent::Resize(..) => None,
    }
}

impl Model for Dashboard {
    type Message = Msg;
    type Flags = Flags;

    fn init(flags: Flags) -> (Self, Command<Msg>) {
        let mut input = SearchInput::new();
        input.focus();
        let mut app = Dashboard {
            input,
            chart: ChartWidget::new(flags.stats.clone()),
            map: MapWidget::new(flags.geo),
            table: TableWidget::new(flags.stats),
        };

        let cmd = match flags.initial {
            Some(country) => {
                app.input.set_value(&country);
                app.input.update(search_input::Message::Submit).map(Msg::Input)
            }
            None => Command::none(),
        };
        (app, cmd)
    }

    fn update(&mut self, msg: Msg) -> Command<Msg> {
        match msg {
            Msg::Input(search_input::Message::Search(country)) => {
                tracing::info!(%country, "country selected");
                self.select(country)
            }
            Msg::Input(msg) => self.input.update(msg).map(Msg::Input),
            Msg::Chart(msg) => self.chart.update(msg).map(Msg::Chart),
            Msg::Map(msg) => self.map.update(msg).map(Msg::Map),
            Msg::Table(msg) => self.table.update(msg).map(Msg::Table),
            Msg::Quit => Command::quit(),
        }
    }

    fn view(&self, frame: &mut Frame) {
        let [search, stats, visuals, footer] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Length(5),
            Constraint::Fill(1),
            Constraint::Length(1),
        ])
        .areas(frame.area());
        let [chart, map] =
            Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)]).areas(visuals);

        self.input.view(frame, search);
        self.table.view(frame, stats);
        self.chart.view(frame, chart);
        self.map.view(frame, map);

        let key = Style::default().fg(Color::Cyan);
        let help = Paragraph::new(Line::from(vec![
            Span::styled("enter", key),
            Span::raw(" search  "),
            Span::styled("esc", key),
            Span::raw(" quit"),
        ]))
        .alignment(Alignment::Center);
        frame.render_widget(help, footer);
    }

    fn subscriptions(&self) -> Vec<Subscription<Msg>> {
        let mut subs = vec![terminal_events(route_event)];
        subs.extend(
            self.table
                .subscriptions()
                .into_iter()
                .map(|sub| sub.map(Msg::Table)),
        );
        subs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use covidash_api::{CountryLocation, CountryStats, FetchError, LatLng};
    use covidash_core::testing::TestProgram;
    use crossterm::event::KeyEvent;
    use futures::future::{BoxFuture, FutureExt};
    use std::sync::Mutex;

    /// Answers every lookup and records it as `stats:<country>` / `geo:<country>`.
    #[derive(Clone, Default)]
    struct Recorder {
        calls: Arc<Mutex<Vec<String>>>,
    }

    impl Recorder {
        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl StatsSource for Recorder {
        fn country_stats(&self, country: &str) -> BoxFuture<'static, Result<CountryStats, FetchError>> {
            self.calls.lock().unwrap().push(format!("stats:{country}"));
            futures::future::ready(Ok(CountryStats {
                country: country.to_string(),
                cases: 38_997_490,
                deaths: 167_985,
                recovered: 38_828_332,
            }))
            .boxed()
        }
    }

    impl GeoSource for Recorder {
        fn locate(&self, country: &str) -> BoxFuture<'static, Result<CountryLocation, FetchError>> {
            self.calls.lock().unwrap().push(format!("geo:{country}"));
            futures::future::ready(Ok(CountryLocation {
                name: country.to_string(),
                center: LatLng::new(46.0, 2.0),
            }))
            .boxed()
        }
    }

    fn start(initial: Option<&str>) -> (TestProgram<Dashboard>, Recorder) {
        let recorder = Recorder::default();
        let flags = Flags {
            stats: Arc::new(recorder.clone()),
            geo: Arc::new(recorder.clone()),
            initial: initial.map(str::to_string),
        };
        (TestProgram::new(flags), recorder)
    }

    fn key(code: KeyCode) -> Msg {
        Msg::Input(search_input::Message::KeyPress(KeyEvent::new(
            code,
            KeyModifiers::NONE,
        )))
    }

    #[test]
    fn search_reaches_every_data_widget_once() {
        let (mut prog, recorder) = start(None);
        for c in "France".chars() {
            prog.send(key(KeyCode::Char(c)));
        }
        prog.send(key(KeyCode::Enter));
        prog.drain_messages();

        assert_eq!(prog.pending_tasks(), 3);
        let mut calls = recorder.calls();
        calls.sort();
        assert_eq!(calls, vec!["geo:France", "stats:France", "stats:France"]);

        prog.resolve_all();
        let screen = prog.render_string(100, 30);
        assert!(screen.contains("covid-data-table"));
        assert!(screen.contains("38,997,490"));
        assert!(screen.contains("COVID-19 Stats for France"));
        assert!(screen.contains("covid-map: France"));
    }

    #[test]
    fn initial_country_is_submitted_trimmed() {
        let (mut prog, recorder) = start(Some("  Peru "));
        prog.drain_messages();
        assert_eq!(prog.pending_tasks(), 3);
        assert!(recorder.calls().iter().all(|call| call.ends_with(":Peru")));
    }

    #[test]
    fn blank_initial_country_fetches_nothing() {
        let (mut prog, recorder) = start(Some("   "));
        prog.drain_messages();
        assert_eq!(prog.pending_tasks(), 0);
        assert!(recorder.calls().is_empty());
    }

    #[test]
    fn escape_and_ctrl_c_quit() {
        let esc = TerminalEvent::Key(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE));
        let ctrl_c = TerminalEvent::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(matches!(route_event(esc), Some(Msg::Quit)));
        assert!(matches!(route_event(ctrl_c), Some(Msg::Quit)));
        assert!(route_event(TerminalEvent::Resize(80, 24)).is_none());

        let (mut prog, _) = start(None);
        prog.send(Msg::Quit);
        assert!(prog.quit_requested());
    }

    #[test]
    fn plain_keys_go_to_the_search_box() {
        let c = TerminalEvent::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::NONE));
        assert!(matches!(
            route_event(c),
            Some(Msg::Input(search_input::Message::KeyPress(_)))
        ));
    }
}
