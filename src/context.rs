//! Application Context
//!
//! Shared handles provided via Leptos Context API.

use std::future::Future;

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::commands::HttpBackend;
use crate::controller::SyncController;
use crate::mirror::BrowserStorage;
use crate::renderer::StoreRenderer;

/// Controller wired to the browser: fetch backend, store renderer, localStorage mirror
pub type AppController = SyncController<HttpBackend, StoreRenderer, BrowserStorage>;

/// App-wide handles provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    /// Controller lives in local (non-Send) storage since it holds browser handles
    controller: StoredValue<AppController, LocalStorage>,
}

impl AppContext {
    pub fn new(controller: AppController) -> Self {
        Self {
            controller: StoredValue::new_local(controller),
        }
    }

    pub fn controller(&self) -> AppController {
        self.controller.get_value()
    }

    /// Run a controller operation in the background; the page stays responsive
    pub fn spawn<F, Fut>(&self, op: F)
    where
        F: FnOnce(AppController) -> Fut,
        Fut: Future<Output = ()> + 'static,
    {
        spawn_local(op(self.controller()));
    }
}
