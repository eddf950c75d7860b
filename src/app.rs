use _model::{Dataset, RegionChoice};
use tracing::{debug, info, warn};

use crate::{
    category::{self, Category},
    config::{LayerConfig, ProjectConfig},
    filter::RegionFilter,
    layer::{LayerFactory, Overlay},
    legend::{LegendEntry, LegendEvent, LegendView, RegionSelect},
    surface::{DisplaySurface, UiSurface},
};

/// Owns every layer's dataset, filter and overlay, and is the only writer of
/// them. The display and UI surfaces are only ever told what changed.
pub struct App<D, U> {
    config: ProjectConfig,
    layers: Vec<LayerState>,
    factory: LayerFactory,
    display: D,
    ui: U,
}

struct LayerState {
    config: LayerConfig,
    category: Box<dyn Category>,
    dataset: Option<Dataset>,
    filter: Option<RegionFilter>,
    overlay: Option<Overlay>,
}

impl<D: DisplaySurface, U: UiSurface> App<D, U> {
    pub fn new(config: ProjectConfig, mut display: D, ui: U) -> Self {
        display.set_view(&config.initial_view());

        let layers = config
            .layers
            .iter()
            .map(|x| LayerState {
                config: x.clone(),
                category: category::for_layer(x),
                dataset: None,
                filter: None,
                overlay: None,
            })
            .collect();

        let mut app = Self {
            config,
            layers,
            factory: LayerFactory::default(),
            display,
            ui,
        };
        app.render_legend();
        app
    }

    pub fn config(&self) -> &ProjectConfig {
        &self.config
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn ui(&self) -> &U {
        &self.ui
    }

    pub fn overlay(&self, layer: &str) -> Option<&Overlay> {
        self.layers
            .iter()
            .find(|x| x.config.id == layer)?
            .overlay
            .as_ref()
    }

    pub fn region_filter(&self, layer: &str) -> Option<&RegionFilter> {
        self.layers
            .iter()
            .find(|x| x.config.id == layer)?
            .filter
            .as_ref()
    }

    /// Stores a layer's dataset and shows its first overlay. Only the first
    /// load of each layer counts.
    pub fn load_dataset(&mut self, layer: &str, dataset: Dataset) {
        let Some(state) = self.layers.iter_mut().find(|x| x.config.id == layer) else {
            warn!(layer, "no such layer");
            return;
        };
        if state.dataset.is_some() {
            warn!(layer, "dataset already loaded");
            return;
        }

        let mut filter = state.config.filterable.then(|| RegionFilter::new(&dataset));
        if let (Some(filter), Some(region)) = (&mut filter, &state.config.initial_region) {
            if !filter.select(region.clone()) {
                warn!(layer, region = %region, "initial region not in dataset");
            }
        }

        let features: Vec<_> = match &filter {
            Some(filter) => filter.apply(&dataset).collect(),
            None => dataset.features().iter().collect(),
        };
        let overlay = self.factory.build(
            &state.config.id,
            &state.config.pane,
            state.category.as_ref(),
            features,
        );
        if state.config.default_visible {
            self.display.attach(&overlay);
        }
        info!(layer, features = dataset.len(), "loaded layer");

        state.filter = filter;
        state.dataset = Some(dataset);
        state.overlay = Some(overlay);
        self.render_legend();
    }

    /// Selects a region and rebuilds the layer's overlay, keeping it shown or
    /// hidden as before. Returns false when the value was ignored.
    pub fn set_filter(&mut self, layer: &str, value: &str) -> bool {
        let Some(state) = self.layers.iter_mut().find(|x| x.config.id == layer) else {
            debug!(layer, "no such layer");
            return false;
        };
        let (Some(dataset), Some(filter)) = (&state.dataset, &mut state.filter) else {
            debug!(layer, "layer is not loaded or not filterable");
            return false;
        };
        if !filter.select(RegionChoice::from(value)) {
            debug!(layer, value, "ignored unknown region");
            return false;
        }

        let overlay = self.factory.build(
            &state.config.id,
            &state.config.pane,
            state.category.as_ref(),
            filter.apply(dataset),
        );
        debug!(layer, value, markers = overlay.markers.len(), "rebuilt overlay");

        let mut visible = false;
        if let Some(old) = state.overlay.take() {
            visible = self.display.is_attached(old.id);
            if visible {
                self.display.detach(old.id);
            }
        }
        if visible {
            self.display.attach(&overlay);
        }
        state.overlay = Some(overlay);

        self.render_legend();
        true
    }

    pub fn set_visible(&mut self, layer: &str, visible: bool) {
        let Some(overlay) = self
            .layers
            .iter()
            .find(|x| x.config.id == layer)
            .and_then(|x| x.overlay.as_ref())
        else {
            debug!(layer, "no overlay to toggle");
            return;
        };

        match (visible, self.display.is_attached(overlay.id)) {
            (true, false) => self.display.attach(overlay),
            (false, true) => self.display.detach(overlay.id),
            _ => return,
        }
        self.render_legend();
    }

    pub fn reset_view(&mut self) {
        self.display.set_view(&self.config.initial_view());
    }

    pub fn handle(&mut self, event: LegendEvent) {
        match event {
            LegendEvent::Toggle { layer, checked } => self.set_visible(&layer, checked),
            LegendEvent::SelectRegion { layer, value } => {
                self.set_filter(&layer, &value);
            }
            LegendEvent::ResetView => self.reset_view(),
        }
    }

    pub fn legend(&self) -> LegendView {
        let entries = self
            .layers
            .iter()
            .filter_map(|state| {
                let overlay = state.overlay.as_ref()?;
                Some(LegendEntry {
                    layer: state.config.id.clone(),
                    name: state.config.name.clone(),
                    checked: self.display.is_attached(overlay.id),
                    note: state.config.legend.as_ref().map(|x| x.note.clone()),
                    regions: state.filter.as_ref().map(|x| RegionSelect {
                        options: x.options().iter().map(ToString::to_string).collect(),
                        selected: x.selected().to_string(),
                    }),
                })
            })
            .collect();

        LegendView {
            title: self.config.title.clone(),
            entries,
        }
    }

    fn render_legend(&mut self) {
        let legend = self.legend();
        self.ui.render_legend(&legend);
    }
}
