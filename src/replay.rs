//! Scripted sessions against an in-memory page.
//!
//! A script describes the page and a timed list of user events. Events are
//! applied on a virtual clock, so a replay is deterministic and instant.

use std::{fs::File, io::BufReader, path::Path, rc::Rc, time::Duration};

use folio_shared::{Document, ElementSpec, MemoryPage, PageSnapshot, VirtualScheduler};
use serde::Deserialize;

use crate::{App, AppOptions, PageEvent};

#[derive(Debug, Clone, Copy, Deserialize, PartialEq)]
pub struct ViewportSize {
    pub width: f64,
    pub height: f64,
}

impl Default for ViewportSize {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 800.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ReplayEvent {
    Scroll { y: f64 },
    Click { target: String },
    Input { target: String, value: String },
    Submit { target: String },
    Resize { width: f64 },
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct TimedEvent {
    #[serde(default)]
    pub at_ms: u64,
    #[serde(flatten)]
    pub event: ReplayEvent,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct ReplayScript {
    #[serde(default)]
    pub viewport: ViewportSize,
    #[serde(default)]
    pub elements: Vec<ElementSpec>,
    #[serde(default)]
    pub events: Vec<TimedEvent>,
    /// Virtual time to run to once every event has been applied.
    #[serde(default)]
    pub run_for_ms: u64,
}

impl ReplayScript {
    pub fn from_path(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let reader = BufReader::new(File::open(path)?);

        Ok(serde_json::from_reader(reader)?)
    }

    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Builds the page, mounts the app, replays the events in time order and
/// returns the final state of the page.
pub fn run(script: &ReplayScript, options: AppOptions) -> folio_shared::Result<PageSnapshot> {
    let page = MemoryPage::new(script.viewport.width, script.viewport.height);
    page.extend(script.elements.iter().cloned())?;

    let page = Rc::new(page);
    let scheduler = Rc::new(VirtualScheduler::new());
    let app = App::mount(page.clone(), scheduler.clone(), options);

    let mut events: Vec<&TimedEvent> = script.events.iter().collect();
    events.sort_by_key(|event| event.at_ms);

    for timed in events {
        scheduler.advance_to(Duration::from_millis(timed.at_ms));
        apply(&app, &page, &timed.event);
    }

    scheduler.advance_to(Duration::from_millis(script.run_for_ms));
    app.dispose();

    tracing::debug!(
        elapsed_ms = scheduler.now().as_millis() as u64,
        pending = scheduler.pending(),
        "replay finished"
    );

    Ok(page.snapshot())
}

fn apply(app: &App<MemoryPage>, page: &MemoryPage, event: &ReplayEvent) {
    let resolve = |target: &str| {
        let element = page.query(target);
        if element.is_none() {
            tracing::warn!(selector = target, "replay target not found");
        }
        element
    };

    match event {
        ReplayEvent::Scroll { y } => {
            page.set_scroll_y(*y);
            app.dispatch(PageEvent::Scroll);
        }
        ReplayEvent::Click { target } => {
            if let Some(element) = resolve(target.as_str()) {
                app.dispatch(PageEvent::Click(element));
            }
        }
        ReplayEvent::Input { target, value } => {
            if let Some(element) = resolve(target.as_str()) {
                page.set_value(&element, value.as_str());
            }
        }
        ReplayEvent::Submit { target } => {
            if let Some(form) = resolve(target.as_str()) {
                app.dispatch(PageEvent::Submit(form));
            }
        }
        ReplayEvent::Resize { width } => {
            page.set_inner_width(*width);
            app.dispatch(PageEvent::Resize);
        }
    }
}
