//! World map with a marker on the selected country.
//!
//! Unlike the chart, the map is long-lived: the base map and its tile layer
//! are created when the widget is, and every successful lookup moves the same
//! marker and re-centres the view instead of rebuilding anything.
//!
//! ```text
//!   mount ──► create(covid-map, center 20°N 0°E, zoom 2) ──► add tiles
//!   lookup ok ──► first time: add marker │ later: move marker
//!             └─► set_view(center, 5)
//!   lookup failed ──► log, change nothing
//! ```

use crate::selector::{Change, Selector, Ticket};
use crate::surface::Surface;
use covidash_api::{CountryLocation, FetchError, GeoSource, LatLng};
use covidash_core::command::Command;
use covidash_core::component::Component;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::symbols;
use ratatui::text::Span;
use ratatui::widgets::canvas::{Canvas, Map, MapResolution};
use ratatui::widgets::{Block, Borders};
use ratatui::Frame;
use std::sync::Arc;

/// Surface name the map is created on.
pub const MAP_SURFACE: &str = "covid-map";
/// Centre of the initial world overview.
pub const OVERVIEW_CENTER: LatLng = LatLng::new(20.0, 0.0);
/// Zoom of the initial world overview.
pub const OVERVIEW_ZOOM: u8 = 2;
/// Zoom used once a country has been located.
pub const COUNTRY_ZOOM: u8 = 5;

/// Initial view handed to [`MapLibrary::create`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapOptions {
    pub center: LatLng,
    pub zoom: u8,
}

impl Default for MapOptions {
    fn default() -> Self {
        Self {
            center: OVERVIEW_CENTER,
            zoom: OVERVIEW_ZOOM,
        }
    }
}

/// Base map drawing: coastlines at a given resolution.
#[derive(Debug, Clone, PartialEq)]
pub struct TileLayer {
    pub resolution: MapResolution,
    pub attribution: String,
}

impl Default for TileLayer {
    fn default() -> Self {
        Self {
            resolution: MapResolution::High,
            attribution: "Natural Earth".to_string(),
        }
    }
}

impl TileLayer {
    /// Attach this layer to `map`.
    pub fn add_to(self, map: &mut dyn MapSurface) -> LayerId {
        map.add_layer(Layer::Tiles(self))
    }
}

/// Anything a map surface can display.
#[derive(Debug, Clone, PartialEq)]
pub enum Layer {
    Tiles(TileLayer),
    Marker(LatLng),
}

/// Handle to a layer previously added to a [`MapSurface`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LayerId(usize);

impl LayerId {
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn index(self) -> usize {
        self.0
    }
}

/// A point marker living on a map surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Marker {
    layer: LayerId,
    position: LatLng,
}

impl Marker {
    /// Place a new marker at `position`.
    pub fn add_to(position: LatLng, map: &mut dyn MapSurface) -> Self {
        let layer = map.add_layer(Layer::Marker(position));
        Self { layer, position }
    }

    /// Move the marker.
    pub fn set_lat_lng(&mut self, map: &mut dyn MapSurface, position: LatLng) {
        map.set_lat_lng(self.layer, position);
        self.position = position;
    }

    pub fn position(&self) -> LatLng {
        self.position
    }
}

/// A live, mutable map owned by a [`MapWidget`].
pub trait MapSurface: Send {
    /// Centre the view on `center` at `zoom`.
    fn set_view(&mut self, center: LatLng, zoom: u8);

    /// Add a layer and return its handle.
    fn add_layer(&mut self, layer: Layer) -> LayerId;

    /// Move a marker layer. Unknown or non-marker layers are ignored.
    fn set_lat_lng(&mut self, layer: LayerId, position: LatLng);

    /// Render the current view into `area`.
    fn draw(&self, frame: &mut Frame, area: Rect);
}

/// Builds map surfaces.
pub trait MapLibrary {
    fn create(&mut self, surface: &Surface, options: MapOptions) -> Box<dyn MapSurface>;
}

/// Terminal map library drawing the world on a ratatui [`Canvas`].
#[derive(Debug, Clone)]
pub struct CanvasMapLibrary {
    coast_color: Color,
    marker_style: Style,
}

impl Default for CanvasMapLibrary {
    fn default() -> Self {
        Self {
            coast_color: Color::Green,
            marker_style: Style::default().fg(Color::Red),
        }
    }
}

impl CanvasMapLibrary {
    pub fn with_coast_color(mut self, color: Color) -> Self {
        self.coast_color = color;
        self
    }

    pub fn with_marker_style(mut self, style: Style) -> Self {
        self.marker_style = style;
        self
    }
}

impl MapLibrary for CanvasMapLibrary {
    fn create(&mut self, surface: &Surface, options: MapOptions) -> Box<dyn MapSurface> {
        tracing::debug!(surface = surface.name(), zoom = options.zoom, "creating canvas map");
        Box::new(CanvasMap {
            center: options.center,
            zoom: options.zoom,
            layers: Vec::new(),
            coast_color: self.coast_color,
            marker_style: self.marker_style,
        })
    }
}

const MARKER_GLYPH: &str = "●";

struct CanvasMap {
    center: LatLng,
    zoom: u8,
    layers: Vec<Layer>,
    coast_color: Color,
    marker_style: Style,
}

impl CanvasMap {
    /// Visible longitude range at the current zoom; zoom 1 shows the whole world.
    fn lng_span(&self) -> f64 {
        360.0 / 2f64.powi(i32::from(self.zoom.max(1)) - 1)
    }
}

impl MapSurface for CanvasMap {
    fn set_view(&mut self, center: LatLng, zoom: u8) {
        self.center = center;
        self.zoom = zoom;
    }

    fn add_layer(&mut self, layer: Layer) -> LayerId {
        self.layers.push(layer);
        LayerId::new(self.layers.len() - 1)
    }

    fn set_lat_lng(&mut self, layer: LayerId, position: LatLng) {
        if let Some(Layer::Marker(at)) = self.layers.get_mut(layer.index()) {
            *at = position;
        }
    }

    fn draw(&self, frame: &mut Frame, area: Rect) {
        let half_lng = self.lng_span() / 2.0;
        let half_lat = half_lng / 2.0;
        let LatLng { lat, lng } = self.center;

        let canvas = Canvas::default()
            .marker(symbols::Marker::Braille)
            .x_bounds([lng - half_lng, lng + half_lng])
            .y_bounds([lat - half_lat, lat + half_lat])
            .paint(|ctx| {
                for layer in &self.layers {
                    if let Layer::Tiles(tiles) = layer {
                        ctx.draw(&Map {
                            resolution: tiles.resolution,
                            color: self.coast_color,
                        });
                    }
                }
                ctx.layer();
                for layer in &self.layers {
                    if let Layer::Marker(at) = layer {
                        ctx.print(at.lng, at.lat, Span::styled(MARKER_GLYPH, self.marker_style));
                    }
                }
            });
        frame.render_widget(canvas, area);
    }
}

/// Messages for the map widget.
#[derive(Debug, Clone)]
pub enum Message {
    /// The parent's country selector changed.
    CountryChanged(String),
    /// A geodata lookup finished.
    Loaded {
        generation: u64,
        result: Result<CountryLocation, FetchError>,
    },
}

/// Owns one map surface for its whole life and keeps one marker on it.
pub struct MapWidget {
    selector: Selector,
    source: Arc<dyn GeoSource>,
    surface: Surface,
    map: Box<dyn MapSurface>,
    marker: Option<Marker>,
    place: Option<String>,
}

impl MapWidget {
    /// A map widget drawing with [`CanvasMapLibrary`].
    pub fn new(source: Arc<dyn GeoSource>) -> Self {
        Self::with_library(source, &mut CanvasMapLibrary::default())
    }

    /// A map widget whose surface comes from `library`.
    pub fn with_library(source: Arc<dyn GeoSource>, library: &mut dyn MapLibrary) -> Self {
        let surface = Surface::new(MAP_SURFACE);
        let mut map = library.create(&surface, MapOptions::default());
        TileLayer::default().add_to(map.as_mut());
        Self {
            selector: Selector::new(),
            source,
            surface,
            map,
            marker: None,
            place: None,
        }
    }

    /// Where the marker currently is, once a country has been located.
    pub fn marker_position(&self) -> Option<LatLng> {
        self.marker.as_ref().map(Marker::position)
    }

    /// Common name of the last located country.
    pub fn place(&self) -> Option<&str> {
        self.place.as_deref()
    }

    fn fetch(&self, ticket: Ticket) -> Command<Message> {
        let generation = ticket.generation();
        tracing::debug!(country = ticket.country(), generation, "map lookup");
        Command::perform(self.source.locate(ticket.country()), move |result| {
            Message::Loaded { generation, result }
        })
    }

    fn show(&mut self, location: CountryLocation) {
        match self.marker.as_mut() {
            Some(marker) => marker.set_lat_lng(self.map.as_mut(), location.center),
            None => self.marker = Some(Marker::add_to(location.center, self.map.as_mut())),
        }
        self.map.set_view(location.center, COUNTRY_ZOOM);
        self.place = Some(location.name);
    }
}

impl Component for MapWidget {
    type Message = Message;

    fn update(&mut self, msg: Message) -> Command<Message> {
        match msg {
            Message::CountryChanged(country) => match self.selector.set(country) {
                Change::Requested(ticket) => self.fetch(ticket),
                Change::Cleared | Change::Unchanged => Command::none(),
            },
            Message::Loaded { generation, result } => {
                if !self.selector.is_current(generation) {
                    tracing::debug!(generation, "discarding stale map result");
                    return Command::none();
                }
                match result {
                    Ok(location) => self.show(location),
                    Err(err) => tracing::error!(
                        country = self.selector.current(),
                        error = %err,
                        "failed to locate country"
                    ),
                }
                Command::none()
            }
        }
    }

    fn view(&self, frame: &mut Frame, area: Rect) {
        let title = match &self.place {
            Some(place) => format!("{}: {place}", self.surface.name()),
            None => self.surface.name().to_string(),
        };
        let block = Block::default().borders(Borders::ALL).title(title);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        self.map.draw(frame, inner);
    }
}
