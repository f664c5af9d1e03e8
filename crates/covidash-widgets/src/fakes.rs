//! Recording test doubles for the data sources and the chart/map libraries.
//!
//! Every double appends to a shared, ordered call log so tests can assert on
//! both counts and ordering (e.g. destroy before create).

use crate::chart::{ChartConfig, ChartInstance, ChartLibrary};
use crate::map::{Layer, LayerId, MapLibrary, MapOptions, MapSurface};
use crate::surface::Surface;
use covidash_api::{CountryLocation, CountryStats, FetchError, GeoSource, LatLng, StatsSource};
use futures::future::{BoxFuture, FutureExt};
use ratatui::layout::Rect;
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Ordered record of calls, shared between a double and the test.
#[derive(Debug, Clone)]
pub struct CallLog<T>(Arc<Mutex<Vec<T>>>);

impl<T: Clone> CallLog<T> {
    pub fn new() -> Self {
        Self(Arc::new(Mutex::new(Vec::new())))
    }

    pub fn push(&self, call: T) {
        self.0.lock().unwrap().push(call);
    }

    pub fn calls(&self) -> Vec<T> {
        self.0.lock().unwrap().clone()
    }

    pub fn len(&self) -> usize {
        self.0.lock().unwrap().len()
    }
}

pub fn testland() -> CountryStats {
    CountryStats {
        country: "Testland".into(),
        cases: 1_234_567,
        deaths: 98_765,
        recovered: 1_100_000,
    }
}

pub fn stats(country: &str, cases: u64) -> CountryStats {
    CountryStats {
        country: country.into(),
        cases,
        deaths: cases / 100,
        recovered: cases / 2,
    }
}

/// Answers from a fixed table; unknown countries fail with a 404.
pub struct FakeStats {
    answers: HashMap<String, Result<CountryStats, FetchError>>,
    pub calls: CallLog<String>,
}

impl FakeStats {
    pub fn new() -> Self {
        Self {
            answers: HashMap::new(),
            calls: CallLog::new(),
        }
    }

    pub fn with(mut self, country: &str, answer: Result<CountryStats, FetchError>) -> Self {
        self.answers.insert(country.to_string(), answer);
        self
    }
}

impl StatsSource for FakeStats {
    fn country_stats(&self, country: &str) -> BoxFuture<'static, Result<CountryStats, FetchError>> {
        self.calls.push(country.to_string());
        let answer = self
            .answers
            .get(country)
            .cloned()
            .unwrap_or_else(|| Err(FetchError::status(404)));
        futures::future::ready(answer).boxed()
    }
}

/// Answers from a fixed table; unknown countries fail with a 404.
pub struct FakeGeo {
    answers: HashMap<String, Result<CountryLocation, FetchError>>,
    pub calls: CallLog<String>,
}

impl FakeGeo {
    pub fn new() -> Self {
        Self {
            answers: HashMap::new(),
            calls: CallLog::new(),
        }
    }

    pub fn with(mut self, country: &str, name: &str, lat: f64, lng: f64) -> Self {
        self.answers.insert(
            country.to_string(),
            Ok(CountryLocation {
                name: name.to_string(),
                center: LatLng::new(lat, lng),
            }),
        );
        self
    }
}

impl GeoSource for FakeGeo {
    fn locate(&self, country: &str) -> BoxFuture<'static, Result<CountryLocation, FetchError>> {
        self.calls.push(country.to_string());
        let answer = self
            .answers
            .get(country)
            .cloned()
            .unwrap_or_else(|| Err(FetchError::status(404)));
        futures::future::ready(answer).boxed()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ChartCall {
    Create {
        id: usize,
        surface: String,
        config: ChartConfig,
    },
    Destroy(usize),
}

/// Chart library whose instances only record their lifecycle.
pub struct RecordingCharts {
    next_id: usize,
    pub log: CallLog<ChartCall>,
}

impl RecordingCharts {
    pub fn new() -> Self {
        Self {
            next_id: 0,
            log: CallLog::new(),
        }
    }
}

struct RecordedChart {
    id: usize,
    label: String,
    log: CallLog<ChartCall>,
}

impl ChartLibrary for RecordingCharts {
    fn create(&mut self, surface: &Surface, config: ChartConfig) -> Box<dyn ChartInstance> {
        self.next_id += 1;
        let id = self.next_id;
        let label = config.dataset_label.clone();
        self.log.push(ChartCall::Create {
            id,
            surface: surface.name().to_string(),
            config,
        });
        Box::new(RecordedChart {
            id,
            label,
            log: self.log.clone(),
        })
    }
}

impl ChartInstance for RecordedChart {
    fn destroy(&mut self) {
        self.log.push(ChartCall::Destroy(self.id));
    }

    fn draw(&self, frame: &mut Frame, area: Rect) {
        frame.render_widget(Paragraph::new(self.label.as_str()), area);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum MapCall {
    Create { surface: String, options: MapOptions },
    SetView { center: LatLng, zoom: u8 },
    AddLayer(Layer),
    SetLatLng { layer: LayerId, position: LatLng },
}

/// Map library whose surfaces only record what was asked of them.
pub struct RecordingMaps {
    pub log: CallLog<MapCall>,
}

impl RecordingMaps {
    pub fn new() -> Self {
        Self { log: CallLog::new() }
    }
}

struct RecordedMap {
    layers: usize,
    log: CallLog<MapCall>,
}

impl MapLibrary for RecordingMaps {
    fn create(&mut self, surface: &Surface, options: MapOptions) -> Box<dyn MapSurface> {
        self.log.push(MapCall::Create {
            surface: surface.name().to_string(),
            options,
        });
        Box::new(RecordedMap {
            layers: 0,
            log: self.log.clone(),
        })
    }
}

impl MapSurface for RecordedMap {
    fn set_view(&mut self, center: LatLng, zoom: u8) {
        self.log.push(MapCall::SetView { center, zoom });
    }

    fn add_layer(&mut self, layer: Layer) -> LayerId {
        self.log.push(MapCall::AddLayer(layer));
        self.layers += 1;
        LayerId::new(self.layers)
    }

    fn set_lat_lng(&mut self, layer: LayerId, position: LatLng) {
        self.log.push(MapCall::SetLatLng { layer, position });
    }

    fn draw(&self, frame: &mut Frame, area: Rect) {
        frame.render_widget(Paragraph::new("map"), area);
    }
}
