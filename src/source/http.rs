//! Trivia source backed by the browser's `fetch`
//!
//! Talks to a jService-compatible API. Requests can be given a timeout, which
//! aborts the fetch through an `AbortController`.

use std::cell::Cell;
use std::rc::Rc;

use serde::de::DeserializeOwned;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{AbortController, Request, RequestInit, RequestMode, Response, Window};

use super::{
    CategoryDetail, CategoryId, CategorySummary, TriviaSource, categories_url, category_url,
};
use crate::error::{GameError, Result};
use crate::settings::Settings;

#[derive(Debug, Clone)]
pub struct HttpSource {
    base_url: String,
    timeout_ms: Option<u32>,
}

impl HttpSource {
    pub fn new(base_url: impl Into<String>, timeout_ms: Option<u32>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout_ms,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.api_base_url.clone(), settings.timeout())
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let window = web_sys::window().ok_or_else(|| GameError::Network("no window".into()))?;

        let opts = RequestInit::new();
        opts.set_method("GET");
        opts.set_mode(RequestMode::Cors);

        let timer = match self.timeout_ms {
            Some(ms) => Some(AbortTimer::arm(&window, ms)?),
            None => None,
        };
        if let Some(timer) = &timer {
            opts.set_signal(Some(&timer.controller.signal()));
        }

        let request = Request::new_with_str_and_init(url, &opts).map_err(js_error)?;
        let timed_out = |err: JsValue| match &timer {
            Some(t) if t.fired() => GameError::Timeout {
                url: url.to_string(),
                ms: t.ms,
            },
            _ => js_error(err),
        };

        let response: Response = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(timed_out)?
            .dyn_into()
            .map_err(js_error)?;

        if !response.ok() {
            return Err(GameError::Http {
                status: response.status(),
                url: url.to_string(),
            });
        }

        let body = JsFuture::from(response.text().map_err(js_error)?)
            .await
            .map_err(timed_out)?
            .as_string()
            .ok_or_else(|| GameError::Decode(format!("non-text body from {url}")))?;

        Ok(serde_json::from_str(&body)?)
    }
}

impl TriviaSource for HttpSource {
    async fn list_categories(&self, count: usize) -> Result<Vec<CategorySummary>> {
        let url = categories_url(&self.base_url, count);
        log::debug!("GET {}", url);
        self.get_json(&url).await
    }

    async fn get_category(&self, id: CategoryId) -> Result<CategoryDetail> {
        let url = category_url(&self.base_url, id);
        log::debug!("GET {}", url);
        self.get_json(&url).await
    }
}

/// Aborts a fetch after `ms` unless dropped first
struct AbortTimer {
    window: Window,
    controller: AbortController,
    handle: i32,
    ms: u32,
    fired: Rc<Cell<bool>>,
    _callback: Closure<dyn FnMut()>,
}

impl AbortTimer {
    fn arm(window: &Window, ms: u32) -> Result<Self> {
        let controller = AbortController::new().map_err(js_error)?;
        let fired = Rc::new(Cell::new(false));

        let callback = {
            let controller = controller.clone();
            let fired = fired.clone();
            Closure::<dyn FnMut()>::new(move || {
                fired.set(true);
                controller.abort();
            })
        };
        let handle = window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                callback.as_ref().unchecked_ref(),
                i32::try_from(ms).unwrap_or(i32::MAX),
            )
            .map_err(js_error)?;

        Ok(Self {
            window: window.clone(),
            controller,
            handle,
            ms,
            fired,
            _callback: callback,
        })
    }

    fn fired(&self) -> bool {
        self.fired.get()
    }
}

impl Drop for AbortTimer {
    fn drop(&mut self) {
        self.window.clear_timeout_with_handle(self.handle);
    }
}

fn js_error(value: JsValue) -> GameError {
    GameError::Network(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
}
