//! Bar chart of a country's case, death and recovery totals.
//!
//! The chart itself lives behind [`ChartLibrary`] / [`ChartInstance`]: the
//! widget only decides *when* an instance exists. Every successful fetch
//! replaces the instance wholesale: the previous one is destroyed before the
//! library is asked for the next, so at most one is ever alive.
//!
//! Failed fetches leave whatever chart is showing untouched.

use crate::format::group_thousands;
use crate::selector::{Change, Selector, Ticket};
use crate::surface::Surface;
use covidash_api::{CountryStats, FetchError, StatsSource};
use covidash_core::command::Command;
use covidash_core::component::Component;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Bar, BarChart, BarGroup, Block, Borders};
use ratatui::Frame;
use std::sync::Arc;

/// Surface name the chart is created on.
pub const CHART_SURFACE: &str = "covid-chart";

/// What a chart library needs to build one chart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartConfig {
    /// Category labels, one per bar.
    pub labels: Vec<String>,
    /// Bar values, aligned with `labels`.
    pub values: Vec<u64>,
    /// Name of the single dataset.
    pub dataset_label: String,
}

impl ChartConfig {
    /// Cases, deaths and recovered for one country.
    pub fn from_stats(stats: &CountryStats) -> Self {
        Self {
            labels: vec!["Cases".into(), "Deaths".into(), "Recovered".into()],
            values: vec![stats.cases, stats.deaths, stats.recovered],
            dataset_label: format!("COVID-19 Stats for {}", stats.country),
        }
    }
}

/// A live chart owned by a [`ChartWidget`].
pub trait ChartInstance: Send {
    /// Release the chart. Called exactly once; the instance is dropped right after.
    fn destroy(&mut self);

    /// Render the chart into `area`.
    fn draw(&self, frame: &mut Frame, area: Rect);
}

/// Builds chart instances on a named surface.
pub trait ChartLibrary: Send + 'static {
    /// Create a chart from `config` on `surface`.
    fn create(&mut self, surface: &Surface, config: ChartConfig) -> Box<dyn ChartInstance>;
}

/// Terminal chart library drawing a ratatui [`BarChart`].
#[derive(Debug, Clone)]
pub struct BarChartLibrary {
    bar_style: Style,
    value_style: Style,
}

impl Default for BarChartLibrary {
    fn default() -> Self {
        Self {
            bar_style: Style::default().fg(Color::Cyan),
            value_style: Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        }
    }
}

impl BarChartLibrary {
    /// Style used for the bars.
    pub fn with_bar_style(mut self, style: Style) -> Self {
        self.bar_style = style;
        self
    }

    /// Style used for the value printed inside each bar.
    pub fn with_value_style(mut self, style: Style) -> Self {
        self.value_style = style;
        self
    }
}

impl ChartLibrary for BarChartLibrary {
    fn create(&mut self, surface: &Surface, config: ChartConfig) -> Box<dyn ChartInstance> {
        tracing::debug!(surface = surface.name(), label = %config.dataset_label, "creating bar chart");
        Box::new(BarChartInstance {
            surface: surface.clone(),
            config,
            bar_style: self.bar_style,
            value_style: self.value_style,
            destroyed: false,
        })
    }
}

struct BarChartInstance {
    surface: Surface,
    config: ChartConfig,
    bar_style: Style,
    value_style: Style,
    destroyed: bool,
}

const BAR_GAP: u16 = 2;

impl ChartInstance for BarChartInstance {
    fn destroy(&mut self) {
        tracing::debug!(surface = self.surface.name(), "destroying bar chart");
        self.destroyed = true;
    }

    fn draw(&self, frame: &mut Frame, area: Rect) {
        if self.destroyed {
            return;
        }
        let block = Block::default()
            .borders(Borders::ALL)
            .title(self.config.dataset_label.as_str());

        let count = self.config.values.len().max(1) as u16;
        let inner_width = area.width.saturating_sub(2);
        let bar_width = (inner_width.saturating_sub(BAR_GAP * (count - 1)) / count).max(1);

        let bars: Vec<Bar> = self
            .config
            .labels
            .iter()
            .zip(&self.config.values)
            .map(|(label, value)| {
                Bar::default()
                    .value(*value)
                    .label(Line::from(label.as_str()))
                    .text_value(group_thousands(*value))
                    .style(self.bar_style)
                    .value_style(self.value_style)
            })
            .collect();

        let chart = BarChart::default()
            .block(block)
            .data(BarGroup::default().bars(&bars))
            .bar_width(bar_width)
            .bar_gap(BAR_GAP);
        frame.render_widget(chart, area);
    }
}

/// Messages for the chart widget.
#[derive(Debug, Clone)]
pub enum Message {
    /// The parent's country selector changed.
    CountryChanged(String),
    /// A statistics fetch finished.
    Loaded {
        /// Generation of the request that produced `result`.
        generation: u64,
        /// What the data source answered.
        result: Result<CountryStats, FetchError>,
    },
}

/// Owns at most one chart and rebuilds it for each newly selected country.
pub struct ChartWidget {
    selector: Selector,
    source: Arc<dyn StatsSource>,
    library: Box<dyn ChartLibrary>,
    surface: Surface,
    chart: Option<Box<dyn ChartInstance>>,
}

impl ChartWidget {
    /// A chart widget drawing with [`BarChartLibrary`].
    pub fn new(source: Arc<dyn StatsSource>) -> Self {
        Self::with_library(source, BarChartLibrary::default())
    }

    /// A chart widget drawing with a custom library.
    pub fn with_library(source: Arc<dyn StatsSource>, library: impl ChartLibrary) -> Self {
        Self {
            selector: Selector::new(),
            source,
            library: Box::new(library),
            surface: Surface::new(CHART_SURFACE),
            chart: None,
        }
    }

    /// Whether a chart instance currently exists.
    pub fn has_chart(&self) -> bool {
        self.chart.is_some()
    }

    /// The country last handed to the widget.
    pub fn country(&self) -> &str {
        self.selector.current()
    }

    fn fetch(&self, ticket: Ticket) -> Command<Message> {
        let generation = ticket.generation();
        tracing::debug!(country = ticket.country(), generation, "chart fetch");
        Command::perform(
            self.source.country_stats(ticket.country()),
            move |result| Message::Loaded { generation, result },
        )
    }

    fn rebuild(&mut self, stats: &CountryStats) {
        if let Some(mut old) = self.chart.take() {
            old.destroy();
        }
        let config = ChartConfig::from_stats(stats);
        self.chart = Some(self.library.create(&self.surface, config));
    }
}

impl Component for ChartWidget {
    type Message = Message;

    fn update(&mut self, msg: Message) -> Command<Message> {
        match msg {
            Message::CountryChanged(country) => match self.selector.set(country) {
                Change::Requested(ticket) => self.fetch(ticket),
                Change::Cleared | Change::Unchanged => Command::none(),
            },
            Message::Loaded { generation, result } => {
                if !self.selector.is_current(generation) {
                    tracing::debug!(generation, "discarding stale chart result");
                    return Command::none();
                }
                match result {
                    Ok(stats) => self.rebuild(&stats),
                    Err(err) => tracing::debug!(error = %err, "chart fetch failed"),
                }
                Command::none()
            }
        }
    }

    fn view(&self, frame: &mut Frame, area: Rect) {
        match &self.chart {
            Some(chart) => chart.draw(frame, area),
            None => frame.render_widget(
                Block::default()
                    .borders(Borders::ALL)
                    .title(self.surface.name())
                    .border_style(Style::default().fg(Color::DarkGray)),
                area,
            ),
        }
    }
}

impl Drop for ChartWidget {
    fn drop(&mut self) {
        if let Some(mut chart) = self.chart.take() {
            chart.destroy();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fakes::{stats, testland, CallLog, ChartCall, FakeStats, RecordingCharts};
    use covidash_core::testing::TestComponent;

    fn widget(source: FakeStats) -> (TestComponent<ChartWidget>, CallLog<ChartCall>) {
        let charts = RecordingCharts::new();
        let log = charts.log.clone();
        (
            TestComponent::new(ChartWidget::with_library(Arc::new(source), charts)),
            log,
        )
    }

    fn changed(country: &str) -> Message {
        Message::CountryChanged(country.to_string())
    }

    #[test]
    fn nothing_is_created_on_mount() {
        let source = FakeStats::new();
        let calls = source.calls.clone();
        let (harness, charts) = widget(source);
        assert!(!harness.component().has_chart());
        assert_eq!(calls.len(), 0);
        assert_eq!(charts.len(), 0);
    }

    #[test]
    fn switching_country_destroys_before_creating() {
        let source = FakeStats::new()
            .with("USA", Ok(stats("USA", 1_000)))
            .with("Canada", Ok(stats("Canada", 500)));
        let calls = source.calls.clone();
        let (mut harness, charts) = widget(source);

        harness.send(changed("USA"));
        harness.resolve_all();
        harness.send(changed("Canada"));
        harness.resolve_all();

        assert_eq!(calls.calls(), vec!["USA", "Canada"]);
        let log = charts.calls();
        assert_eq!(log.len(), 3);
        assert!(matches!(&log[0], ChartCall::Create { id: 1, .. }));
        assert_eq!(log[1], ChartCall::Destroy(1));
        assert!(matches!(&log[2], ChartCall::Create { id: 2, .. }));
    }

    #[test]
    fn chart_config_matches_stats() {
        let source = FakeStats::new().with("Testland", Ok(testland()));
        let (mut harness, charts) = widget(source);
        harness.send(changed("Testland"));
        harness.resolve_all();

        assert_eq!(
            charts.calls(),
            vec![ChartCall::Create {
                id: 1,
                surface: "covid-chart".into(),
                config: ChartConfig {
                    labels: vec!["Cases".into(), "Deaths".into(), "Recovered".into()],
                    values: vec![1_234_567, 98_765, 1_100_000],
                    dataset_label: "COVID-19 Stats for Testland".into(),
                },
            }]
        );
    }

    #[test]
    fn failed_fetch_leaves_chart_alone() {
        let source = FakeStats::new()
            .with("USA", Ok(stats("USA", 1_000)))
            .with("Atlantis", Err(FetchError::status(404)));
        let (mut harness, charts) = widget(source);

        harness.send(changed("USA"));
        harness.resolve_all();
        harness.send(changed("Atlantis"));
        harness.resolve_all();

        assert_eq!(charts.len(), 1);
        assert!(harness.component().has_chart());
    }

    #[test]
    fn blank_selection_neither_fetches_nor_destroys() {
        let source = FakeStats::new().with("USA", Ok(stats("USA", 1_000)));
        let calls = source.calls.clone();
        let (mut harness, charts) = widget(source);

        harness.send(changed("USA"));
        harness.resolve_all();
        harness.send(changed(""));
        harness.send(changed("   "));
        harness.resolve_all();

        assert_eq!(calls.len(), 1);
        assert_eq!(charts.len(), 1);
        assert!(harness.component().has_chart());
    }

    #[test]
    fn same_country_twice_fetches_once() {
        let source = FakeStats::new().with("USA", Ok(stats("USA", 1_000)));
        let calls = source.calls.clone();
        let (mut harness, _charts) = widget(source);
        harness.send(changed("USA"));
        harness.send(changed("USA"));
        assert_eq!(harness.pending_tasks(), 1);
        assert_eq!(calls.len(), 1);
    }

    #[test]
    fn stale_result_is_discarded() {
        let source = FakeStats::new()
            .with("USA", Ok(stats("USA", 1_000)))
            .with("Canada", Ok(stats("Canada", 500)));
        let (mut harness, charts) = widget(source);

        harness.send(changed("USA"));
        harness.send(changed("Canada"));
        // Canada answers first, USA straggles in afterwards.
        assert!(harness.resolve(1));
        assert!(harness.resolve(0));

        let log = charts.calls();
        assert_eq!(log.len(), 1);
        match &log[0] {
            ChartCall::Create { config, .. } => {
                assert_eq!(config.dataset_label, "COVID-19 Stats for Canada")
            }
            other => panic!("unexpected call {other:?}"),
        }
    }

    #[test]
    fn unmount_destroys_exactly_once() {
        let source = FakeStats::new().with("USA", Ok(stats("USA", 1_000)));
        let (mut harness, charts) = widget(source);
        harness.send(changed("USA"));
        harness.resolve_all();

        drop(harness.into_inner());

        let destroys = charts
            .calls()
            .into_iter()
            .filter(|call| matches!(call, ChartCall::Destroy(_)))
            .count();
        assert_eq!(destroys, 1);
    }

    #[test]
    fn unmount_without_chart_destroys_nothing() {
        let (harness, charts) = widget(FakeStats::new());
        drop(harness);
        assert_eq!(charts.len(), 0);
    }

    #[test]
    fn bar_chart_renders_dataset_label_and_values() {
        let source = FakeStats::new().with("Testland", Ok(testland()));
        let mut harness = TestComponent::new(ChartWidget::new(Arc::new(source)));
        harness.send(changed("Testland"));
        harness.resolve_all();

        let screen = harness.render_string(60, 12);
        assert!(screen.contains("COVID-19 Stats for Testland"));
        assert!(screen.contains("Cases"));
        assert!(screen.contains("1,234,567"));
    }
}
