//! GTK4 glue: a `DrawingArea` that paints a chart facade through cairo and
//! routes primary clicks into its hit-test layer.

use std::cell::RefCell;
use std::rc::Rc;

use gtk4 as gtk;
use gtk4::prelude::*;
use tracing::warn;

use crate::api::{BarChart, ChartEvent, LineChart, PieChart};
use crate::core::Viewport;
use crate::error::ChartResult;
use crate::render::{CairoContextRenderer, Renderer};

/// What the adapter needs from a chart facade.
pub trait GtkChart {
    fn viewport(&self) -> Viewport;
    fn set_viewport(&mut self, viewport: Viewport) -> ChartResult<()>;
    fn draw(&mut self, context: &cairo::Context) -> ChartResult<()>;
    fn press(&mut self, x: f64, y: f64) -> Option<ChartEvent>;
}

impl<R: Renderer + CairoContextRenderer> GtkChart for LineChart<R> {
    fn viewport(&self) -> Viewport {
        self.config().viewport
    }

    fn set_viewport(&mut self, viewport: Viewport) -> ChartResult<()> {
        LineChart::set_viewport(self, viewport)
    }

    fn draw(&mut self, context: &cairo::Context) -> ChartResult<()> {
        self.render_on_cairo_context(context)
    }

    fn press(&mut self, x: f64, y: f64) -> Option<ChartEvent> {
        LineChart::press(self, x, y)
    }
}

impl<R: Renderer + CairoContextRenderer> GtkChart for BarChart<R> {
    fn viewport(&self) -> Viewport {
        self.config().viewport
    }

    fn set_viewport(&mut self, viewport: Viewport) -> ChartResult<()> {
        BarChart::set_viewport(self, viewport)
    }

    fn draw(&mut self, context: &cairo::Context) -> ChartResult<()> {
        self.render_on_cairo_context(context)
    }

    fn press(&mut self, x: f64, y: f64) -> Option<ChartEvent> {
        BarChart::press(self, x, y)
    }
}

impl<R: Renderer + CairoContextRenderer> GtkChart for PieChart<R> {
    fn viewport(&self) -> Viewport {
        self.config().viewport
    }

    fn set_viewport(&mut self, viewport: Viewport) -> ChartResult<()> {
        PieChart::set_viewport(self, viewport)
    }

    fn draw(&mut self, context: &cairo::Context) -> ChartResult<()> {
        self.render_on_cairo_context(context)
    }

    fn press(&mut self, x: f64, y: f64) -> Option<ChartEvent> {
        PieChart::press(self, x, y)
    }
}

/// Owns a `DrawingArea` bound to one chart. The chart is shared with the
/// widget callbacks, so hosts update data through [`GtkChartAdapter::chart`]
/// and call [`GtkChartAdapter::queue_draw`] afterwards.
pub struct GtkChartAdapter<C: GtkChart + 'static> {
    chart: Rc<RefCell<C>>,
    drawing_area: gtk::DrawingArea,
}

impl<C: GtkChart + 'static> GtkChartAdapter<C> {
    #[must_use]
    pub fn new(chart: C) -> Self {
        let chart = Rc::new(RefCell::new(chart));
        let drawing_area = gtk::DrawingArea::new();
        drawing_area.set_hexpand(true);
        drawing_area.set_vexpand(true);

        drawing_area.set_draw_func({
            let chart = Rc::clone(&chart);
            move |_widget, context, width, height| {
                if width <= 0 || height <= 0 {
                    return;
                }
                let Ok(mut chart) = chart.try_borrow_mut() else {
                    return;
                };

                let viewport = Viewport::new(width as u32, height as u32);
                if chart.viewport() != viewport
                    && let Err(err) = chart.set_viewport(viewport)
                {
                    warn!(error = %err, width, height, "skipping draw with invalid viewport");
                    return;
                }
                if let Err(err) = chart.draw(context) {
                    warn!(error = %err, "chart draw failed");
                }
            }
        });

        let click = gtk::GestureClick::new();
        {
            let chart = Rc::clone(&chart);
            let drawing_area = drawing_area.clone();
            click.connect_pressed(move |_, _n_press, x, y| {
                let event = match chart.try_borrow_mut() {
                    Ok(mut chart) => chart.press(x, y),
                    Err(_) => return,
                };
                if event.is_some() {
                    drawing_area.queue_draw();
                }
            });
        }
        drawing_area.add_controller(click);

        Self {
            chart,
            drawing_area,
        }
    }

    #[must_use]
    pub fn widget(&self) -> &gtk::DrawingArea {
        &self.drawing_area
    }

    #[must_use]
    pub fn chart(&self) -> Rc<RefCell<C>> {
        Rc::clone(&self.chart)
    }

    pub fn queue_draw(&self) {
        self.drawing_area.queue_draw();
    }
}
