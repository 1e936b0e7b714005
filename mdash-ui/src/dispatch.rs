//! Hands UI events to the cascade controller.

use crate::js_bridge::ChartJsSurface;
use crate::state::AppState;
use crate::view::DioxusView;
use dioxus::prelude::*;
use log::info;
use mdash_client::{ClientConfig, HttpSource};
use mdash_core::{
    CascadeController, Command, DashboardConfig, FetchResult, SelectionStore, Surfaces,
};
use std::rc::Rc;

/// Shared handle to the controller, provided via context.
#[derive(Clone)]
pub struct Dispatcher {
    controller: Rc<CascadeController>,
}

impl PartialEq for Dispatcher {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.controller, &other.controller)
    }
}

impl Dispatcher {
    /// Wire an HTTP backend, the Chart.js surface and the signal view into
    /// a controller.
    pub fn connect(
        state: AppState,
        client: ClientConfig,
        config: DashboardConfig,
    ) -> FetchResult<Self> {
        let source = Rc::new(HttpSource::new(client)?);
        info!("dashboard backend at {:?}", source.base_url());
        let view = Rc::new(DioxusView::new(state));
        let surfaces = Surfaces {
            chart: Rc::new(ChartJsSurface::new()),
            kpis: view.clone(),
            view,
        };
        let controller =
            CascadeController::new(source, Rc::new(SelectionStore::new()), surfaces, config);
        Ok(Self {
            controller: Rc::new(controller),
        })
    }

    /// Run `command` on the Dioxus runtime. Commands overlap freely; the
    /// controller discards superseded results.
    pub fn send(&self, command: Command) {
        let controller = self.controller.clone();
        spawn(async move {
            controller.handle(command).await;
        });
    }
}
