//! Browser bindings: the page behind `web_sys`, timers behind
//! `setTimeout`, and the listeners that feed [`App::dispatch`].

use std::{
    cell::{Cell, RefCell},
    collections::HashMap,
    rc::Rc,
    time::Duration,
};

use folio_shared::{
    Display, Document, Rect, ScrollBehavior, Scheduler, Task, TaskHandle, Viewport,
};
use wasm_bindgen::{JsCast, prelude::*};
use web_sys::{
    Element, Event, EventTarget, HtmlElement, HtmlFormElement, HtmlInputElement,
    HtmlSelectElement, HtmlTextAreaElement, ScrollToOptions, Window,
};

use crate::{App, AppOptions, CLICK_TARGETS, PageEvent};

fn report(result: Result<(), JsValue>, action: &str) {
    if let Err(err) = result {
        tracing::warn!(?err, action, "dom call failed");
    }
}

pub struct BrowserPage {
    window: Window,
    document: web_sys::Document,
}

impl BrowserPage {
    pub fn new(window: Window, document: web_sys::Document) -> Self {
        Self { window, document }
    }

    fn query_all(&self, selector: &str) -> Vec<Element> {
        let Ok(nodes) = self.document.query_selector_all(selector) else {
            return vec![];
        };

        (0..nodes.length())
            .filter_map(|index| nodes.get(index))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect()
    }
}

impl Document for BrowserPage {
    type Element = Element;

    fn element_by_id(&self, id: &str) -> Option<Element> {
        self.document.get_element_by_id(id)
    }

    fn query(&self, selector: &str) -> Option<Element> {
        self.document.query_selector(selector).ok().flatten()
    }

    fn elements_by_class(&self, class: &str) -> Vec<Element> {
        self.query_all(&format!(".{class}"))
    }

    fn sections(&self) -> Vec<Element> {
        self.query_all("section[id]")
    }

    fn attribute(&self, element: &Element, name: &str) -> Option<String> {
        element.get_attribute(name)
    }

    fn set_attribute(&self, element: &Element, name: &str, value: &str) {
        report(element.set_attribute(name, value), "set_attribute");
    }

    fn has_class(&self, element: &Element, class: &str) -> bool {
        element.class_list().contains(class)
    }

    fn add_class(&self, element: &Element, class: &str) {
        report(element.class_list().add_1(class), "add_class");
    }

    fn remove_class(&self, element: &Element, class: &str) {
        report(element.class_list().remove_1(class), "remove_class");
    }

    fn set_class_name(&self, element: &Element, class_name: &str) {
        element.set_class_name(class_name);
    }

    fn set_display(&self, element: &Element, display: Display) {
        if let Some(element) = element.dyn_ref::<HtmlElement>() {
            report(
                element.style().set_property("display", display.as_ref()),
                "set_display",
            );
        }
    }

    fn set_inner_html(&self, element: &Element, html: &str) {
        element.set_inner_html(html);
    }

    fn value(&self, element: &Element) -> String {
        if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
            return input.value();
        }
        if let Some(textarea) = element.dyn_ref::<HtmlTextAreaElement>() {
            return textarea.value();
        }
        if let Some(select) = element.dyn_ref::<HtmlSelectElement>() {
            return select.value();
        }

        String::new()
    }

    fn reset_form(&self, form: &Element) {
        if let Some(form) = form.dyn_ref::<HtmlFormElement>() {
            form.reset();
        }
    }

    fn offset_top(&self, element: &Element) -> f64 {
        element
            .dyn_ref::<HtmlElement>()
            .map(|element| f64::from(element.offset_top()))
            .unwrap_or(0.0)
    }

    fn offset_height(&self, element: &Element) -> f64 {
        element
            .dyn_ref::<HtmlElement>()
            .map(|element| f64::from(element.offset_height()))
            .unwrap_or(0.0)
    }

    fn bounding_rect(&self, element: &Element) -> Rect {
        let rect = element.get_bounding_client_rect();

        Rect {
            top: rect.top(),
            left: rect.left(),
            bottom: rect.bottom(),
            right: rect.right(),
        }
    }
}

impl Viewport for BrowserPage {
    fn scroll_y(&self) -> f64 {
        self.window.scroll_y().unwrap_or(0.0)
    }

    fn inner_width(&self) -> f64 {
        self.window
            .inner_width()
            .ok()
            .and_then(|width| width.as_f64())
            .unwrap_or(0.0)
    }

    fn inner_height(&self) -> f64 {
        self.window
            .inner_height()
            .ok()
            .and_then(|height| height.as_f64())
            .unwrap_or(0.0)
    }

    fn scroll_to(&self, top: f64, behavior: ScrollBehavior) {
        let options = ScrollToOptions::new();
        options.set_top(top);
        options.set_behavior(match behavior {
            ScrollBehavior::Auto => web_sys::ScrollBehavior::Auto,
            ScrollBehavior::Smooth => web_sys::ScrollBehavior::Smooth,
        });

        self.window.scroll_to_with_scroll_to_options(&options);
    }
}

type Timers = Rc<RefCell<HashMap<u64, (i32, Closure<dyn FnMut()>)>>>;

/// `setTimeout`/`clearTimeout` on the window.
///
/// Every pending callback is owned here until it fires or is cancelled, so
/// cancelled tasks are dropped with everything they capture.
pub struct BrowserScheduler {
    window: Window,
    next_id: Cell<u64>,
    timers: Timers,
}

impl BrowserScheduler {
    pub fn new(window: Window) -> Self {
        Self {
            window,
            next_id: Cell::new(1),
            timers: Rc::default(),
        }
    }

    /// Tasks scheduled and neither run nor cancelled yet.
    pub fn pending(&self) -> usize {
        self.timers.borrow().len()
    }
}

impl Scheduler for BrowserScheduler {
    fn schedule(&self, delay: Duration, task: Task) -> TaskHandle {
        let id = self.next_id.get();
        self.next_id.set(id + 1);

        let timers = Rc::downgrade(&self.timers);
        let mut task = Some(task);
        let callback = Closure::<dyn FnMut()>::new(move || {
            let Some(task) = task.take() else {
                return;
            };
            task();

            // The closure running right now is freed once it returns.
            if let Some(timers) = timers.upgrade() {
                timers.borrow_mut().remove(&id);
            }
        });

        let timeout = i32::try_from(delay.as_millis()).unwrap_or(i32::MAX);
        let result = self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                callback.as_ref().unchecked_ref(),
                timeout,
            );

        match result {
            Ok(timeout_id) => {
                self.timers.borrow_mut().insert(id, (timeout_id, callback));
            }
            Err(err) => tracing::warn!(?err, "setTimeout failed"),
        }

        TaskHandle::new(id)
    }

    fn cancel(&self, handle: TaskHandle) {
        let removed = self.timers.borrow_mut().remove(&handle.id());

        if let Some((timeout_id, _callback)) = removed {
            self.window.clear_timeout_with_handle(timeout_id);
        }
    }
}

impl Drop for BrowserScheduler {
    fn drop(&mut self) {
        for (timeout_id, _callback) in self.timers.borrow().values() {
            self.window.clear_timeout_with_handle(*timeout_id);
        }
    }
}

type Listener = Closure<dyn FnMut(Event)>;

/// The mounted app and the listeners that drive it.
pub struct WebApp {
    app: Rc<App<BrowserPage>>,
    listeners: Vec<(EventTarget, &'static str, Listener)>,
}

impl WebApp {
    pub fn mount(window: Window, options: AppOptions) -> Result<Self, JsValue> {
        let document = window.document().ok_or("no document")?;
        let page = Rc::new(BrowserPage::new(window.clone(), document.clone()));
        let scheduler = Rc::new(BrowserScheduler::new(window.clone()));
        let app = Rc::new(App::mount(page, scheduler, options));

        let mut web_app = Self {
            app,
            listeners: vec![],
        };

        web_app.listen(&document, "click", |app, event| {
            let target = event
                .target()
                .and_then(|target| target.dyn_into::<Element>().ok())
                .and_then(|element| element.closest(CLICK_TARGETS).ok().flatten());

            target.is_some_and(|element| app.dispatch(PageEvent::Click(element)))
        })?;

        web_app.listen(&document, "submit", |app, event| {
            event
                .target()
                .and_then(|target| target.dyn_into::<Element>().ok())
                .is_some_and(|form| app.dispatch(PageEvent::Submit(form)))
        })?;

        web_app.listen(&window, "scroll", |app, _| app.dispatch(PageEvent::Scroll))?;
        web_app.listen(&window, "resize", |app, _| app.dispatch(PageEvent::Resize))?;

        Ok(web_app)
    }

    /// Removes every listener and disposes the app.
    pub fn dispose(self) {
        for (target, kind, listener) in &self.listeners {
            report(
                target.remove_event_listener_with_callback(kind, listener.as_ref().unchecked_ref()),
                "remove_event_listener",
            );
        }

        self.app.dispose();
    }

    fn listen(
        &mut self,
        target: &EventTarget,
        kind: &'static str,
        handler: impl Fn(&App<BrowserPage>, &Event) -> bool + 'static,
    ) -> Result<(), JsValue> {
        let app = self.app.clone();
        let listener = Listener::wrap(Box::new(move |event: Event| {
            if handler(&app, &event) {
                event.prevent_default();
            }
        }));

        target.add_event_listener_with_callback(kind, listener.as_ref().unchecked_ref())?;
        self.listeners.push((target.clone(), kind, listener));

        Ok(())
    }
}

thread_local! {
    static MOUNTED: RefCell<Option<WebApp>> = const { RefCell::new(None) };
}

fn mount(window: Window) -> Result<(), JsValue> {
    let web_app = WebApp::mount(window, AppOptions::default())?;

    MOUNTED.with(|mounted| mounted.replace(Some(web_app)));

    Ok(())
}

/// Runs `f` now if the document is parsed, otherwise on `DOMContentLoaded`.
pub fn when_parsed(
    document: &web_sys::Document,
    f: impl FnOnce() + 'static,
) -> Result<(), JsValue> {
    if document.ready_state() != "loading" {
        f();
        return Ok(());
    }

    let on_ready = Closure::once_into_js(f);
    document.add_event_listener_with_callback("DOMContentLoaded", on_ready.unchecked_ref())
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    let window = web_sys::window().ok_or("no window")?;
    let document = window.document().ok_or("no document")?;

    when_parsed(&document, move || {
        if let Err(err) = mount(window) {
            tracing::warn!(?err, "mount failed");
        }
    })
}

/// Detaches the page behaviors mounted by [`start`].
#[wasm_bindgen]
pub fn dispose() {
    if let Some(web_app) = MOUNTED.with(|mounted| mounted.take()) {
        web_app.dispose();
    }
}
