//! Browser adapter: mounts the pager on the live document.
//!
//! ```javascript
//! import init, { mount } from './folio.js';
//!
//! await init();
//! const pager = mount({ hashWatch: 'poll', pollIntervalMs: 250 });
//! if (pager) console.log(pager.activePage, '/', pager.pageCount);
//! ```

mod document;
mod error;
mod pager;

use std::rc::Rc;

use serde::Deserialize;
use tracing::level_filters::LevelFilter;
use wasm_bindgen::prelude::*;

use crate::{
    application::settings::{PagerSettings, RawPagerOptions},
    domain::types::PageNumber,
    infra::telemetry::{self, LogFormat, LoggingSettings},
};

pub use error::{ErrorCode, FolioError};

use pager::Pager;

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
}

/// Crate version, for diagnostics.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Logging keys read from the same options object as the pager settings.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct LogOptions {
    log_level: Option<String>,
    log_json: bool,
}

/// Mount the pager on the current document.
///
/// Resolves to `undefined` when the archive has no articles.
#[wasm_bindgen]
pub fn mount(options: JsValue) -> Result<Option<PagerHandle>, JsValue> {
    let (log, raw) = if options.is_undefined() || options.is_null() {
        (LogOptions::default(), RawPagerOptions::default())
    } else {
        (
            serde_wasm_bindgen::from_value::<LogOptions>(options.clone())
                .map_err(FolioError::from)?,
            serde_wasm_bindgen::from_value::<RawPagerOptions>(options)
                .map_err(FolioError::from)?,
        )
    };

    let logging = logging_settings(&log)?;
    // A second mount finds the subscriber already installed.
    if let Err(err) = telemetry::init(&logging) {
        tracing::debug!(error = %err, "tracing already initialised");
    }

    let settings = PagerSettings::from_raw(raw).map_err(FolioError::from)?;
    let window = web_sys::window().ok_or_else(|| FolioError::dom("no global window"))?;
    let pager = Pager::mount(window, &settings).map_err(FolioError::from)?;
    Ok(pager.map(|inner| PagerHandle { inner }))
}

fn logging_settings(options: &LogOptions) -> Result<LoggingSettings, FolioError> {
    let level = match options.log_level.as_deref() {
        Some(raw) => raw
            .parse::<LevelFilter>()
            .map_err(|err| FolioError::options(format!("invalid logLevel `{raw}`: {err}")))?,
        None => LevelFilter::INFO,
    };
    let format = if options.log_json {
        LogFormat::Json
    } else {
        LogFormat::Compact
    };
    Ok(LoggingSettings { level, format })
}

/// Handle to a mounted pager.
#[wasm_bindgen]
pub struct PagerHandle {
    inner: Rc<Pager>,
}

#[wasm_bindgen]
impl PagerHandle {
    #[wasm_bindgen(getter, js_name = activePage)]
    pub fn active_page(&self) -> Option<u32> {
        self.inner.state().active_page.map(PageNumber::get)
    }

    #[wasm_bindgen(getter, js_name = pageCount)]
    pub fn page_count(&self) -> usize {
        self.inner.page_count()
    }

    /// Snapshot of the controller state as a plain object.
    pub fn state(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.inner.state())
            .map_err(|err| FolioError::from(err).into())
    }

    /// Activate `page` as if its control had been clicked.
    #[wasm_bindgen(js_name = goTo)]
    pub fn go_to(&self, page: u32) -> Result<(), JsValue> {
        let page = PageNumber::new(page)
            .ok_or_else(|| FolioError::options("page numbers start at 1"))?;
        self.inner.go_to(page).map_err(|err| FolioError::from(err).into())
    }
}
