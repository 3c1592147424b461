//! Headless Chrome implementation of the [`Renderer`] seam.
//!
//! One launched browser, one tab. HTML text goes to the engine as a base64
//! `data:text/html` URL, so nothing touches the filesystem on the way in.

use std::sync::Arc;

use base64::{engine::general_purpose::STANDARD as BASE64_STD, Engine as _};
use headless_chrome::browser::tab::Tab;
use headless_chrome::protocol::cdp::Page;
use headless_chrome::types::Bounds;
use headless_chrome::{Browser, LaunchOptions};
use image::RgbaImage;

use crate::renderer::{ContentSize, Renderer};

/// Initial window size; capture resizes the view to the content anyway.
const DEFAULT_VIEW_WIDTH: u32 = 1280;
const DEFAULT_VIEW_HEIGHT: u32 = 720;

/// Returns `JSON.stringify({width, height})` of the document's natural size.
const CONTENT_SIZE_JS: &str = r#"
(function () {
    const doc = document.documentElement;
    const body = document.body;
    const width = Math.max(doc ? doc.scrollWidth : 0, body ? body.scrollWidth : 0);
    const height = Math.max(doc ? doc.scrollHeight : 0, body ? body.scrollHeight : 0);
    return JSON.stringify({ width: width, height: height });
})()
"#;

/// Forces a layout flush and schedules a frame, the protocol-level stand-in
/// for "repaint now".
const REQUEST_REPAINT_JS: &str = r#"
(function () {
    if (document.body) { void document.body.offsetHeight; }
    window.requestAnimationFrame(function () {});
    return true;
})()
"#;

/// A headless Chrome instance driving one tab.
pub struct ChromeRenderer {
    // Declared before `browser` so the tab handle drops first.
    tab: Arc<Tab>,
    browser: Browser,
}

impl ChromeRenderer {
    /// Launch a headless browser and open the tab used for rendering.
    pub fn launch() -> Result<Self, String> {
        let launch_options = LaunchOptions::default_builder()
            .headless(true)
            .window_size(Some((DEFAULT_VIEW_WIDTH, DEFAULT_VIEW_HEIGHT)))
            .build()
            .map_err(|e| format!("failed to build launch options: {e}"))?;

        let browser =
            Browser::new(launch_options).map_err(|e| format!("failed to launch browser: {e}"))?;

        let tab = browser
            .new_tab()
            .map_err(|e| format!("failed to create tab: {e}"))?;

        Ok(Self { tab, browser })
    }

    /// Shut the browser down explicitly, tab before browser.
    pub fn close(self) {
        log::info!("shutting down the rendering engine");
        drop(self.tab);
        drop(self.browser);
    }

    fn evaluate_string(&self, script: &str) -> Result<String, String> {
        let eval = self
            .tab
            .evaluate(script, false)
            .map_err(|e| format!("evaluation failed: {e}"))?;

        match eval.value {
            Some(val) if val.is_string() => Ok(val.as_str().unwrap_or_default().to_string()),
            Some(val) => Ok(val.to_string()),
            None => Err("no value returned from evaluation".to_string()),
        }
    }
}

impl Renderer for ChromeRenderer {
    fn load_html(&mut self, html: &str) -> Result<(), String> {
        let url = format!("data:text/html;base64,{}", BASE64_STD.encode(html));

        self.tab
            .navigate_to(&url)
            .map_err(|e| format!("navigation failed: {e}"))?;
        self.tab
            .wait_until_navigated()
            .map_err(|e| format!("document did not finish loading: {e}"))?;

        Ok(())
    }

    fn request_repaint(&mut self) -> Result<(), String> {
        self.tab
            .evaluate(REQUEST_REPAINT_JS, false)
            .map_err(|e| format!("repaint request failed: {e}"))?;
        Ok(())
    }

    fn content_size(&mut self) -> Result<ContentSize, String> {
        let json = self.evaluate_string(CONTENT_SIZE_JS)?;
        serde_json::from_str(&json).map_err(|e| format!("bad content size payload '{json}': {e}"))
    }

    fn resize_view(&mut self, size: ContentSize) -> Result<(), String> {
        self.tab
            .set_bounds(Bounds::Normal {
                left: None,
                top: None,
                width: Some(size.width as f64),
                height: Some(size.height as f64),
            })
            .map_err(|e| format!("view resize failed: {e}"))?;
        Ok(())
    }

    fn capture(&mut self, size: ContentSize) -> Result<RgbaImage, String> {
        let clip = Page::Viewport {
            x: 0.0,
            y: 0.0,
            width: size.width as f64,
            height: size.height as f64,
            scale: 1.0,
        };

        let png = self
            .tab
            .capture_screenshot(Page::CaptureScreenshotFormatOption::Png, None, Some(clip), true)
            .map_err(|e| format!("screenshot failed: {e}"))?;

        let decoded = image::load_from_memory(&png)
            .map_err(|e| format!("screenshot decode failed: {e}"))?;

        Ok(decoded.to_rgba8())
    }
}
