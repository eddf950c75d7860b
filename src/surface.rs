use crate::{
    config::View,
    layer::{Overlay, OverlayId},
    legend::LegendView,
};

/// The map the overlays are drawn on.
pub trait DisplaySurface {
    /// Adding an overlay that is already attached does nothing.
    fn attach(&mut self, overlay: &Overlay);

    fn detach(&mut self, id: OverlayId);

    fn is_attached(&self, id: OverlayId) -> bool;

    fn set_view(&mut self, view: &View);
}

/// Where the legend is shown. Each call replaces the previous legend.
pub trait UiSurface {
    fn render_legend(&mut self, legend: &LegendView);
}
