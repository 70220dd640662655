use std::{rc::Rc, time::Duration};

use folio_shared::{HIDDEN_CLASS, Page, Scheduler};

use crate::{
    SectionBounds, ScrollTarget, Throttled, active_section, current_href, smooth_scroll_to,
    throttle,
};

pub const MENU_TOGGLE_ID: &str = "menu-toggle";
pub const MOBILE_MENU_ID: &str = "mobile-menu";
pub const NAV_LINK_CLASS: &str = "nav-link";

const CURRENT_LINK_CLASSES: [&str; 2] = ["text-primary", "font-semibold"];
const DEFAULT_LINK_CLASS: &str = "text-gray-700";

#[derive(Debug, Clone, PartialEq)]
pub struct NavigationOptions {
    /// Viewport width from which the desktop menu takes over.
    pub desktop_breakpoint: f64,
    /// Extra room above a section that already counts as inside it.
    pub highlight_offset: f64,
    /// Quiet period after the last scroll event before highlighting.
    pub scroll_wait: Duration,
}

impl Default for NavigationOptions {
    fn default() -> Self {
        Self {
            desktop_breakpoint: 768.0,
            highlight_offset: 100.0,
            scroll_wait: Duration::from_millis(100),
        }
    }
}

struct Shared<P: Page> {
    page: Rc<P>,
    menu_toggle: Option<P::Element>,
    mobile_menu: Option<P::Element>,
    links: Vec<P::Element>,
    options: NavigationOptions,
}

/// Mobile menu, anchor scrolling and active-link highlighting.
pub struct NavigationController<P: Page> {
    shared: Rc<Shared<P>>,
    highlight: Throttled<()>,
}

impl<P: Page + 'static> NavigationController<P> {
    pub fn init(page: Rc<P>, scheduler: Rc<dyn Scheduler>, options: NavigationOptions) -> Self {
        let shared = Rc::new(Shared {
            menu_toggle: page.element_by_id(MENU_TOGGLE_ID),
            mobile_menu: page.element_by_id(MOBILE_MENU_ID),
            links: page.elements_by_class(NAV_LINK_CLASS),
            page,
            options,
        });

        if shared.menu_toggle.is_none() || shared.mobile_menu.is_none() {
            tracing::debug!("mobile menu toggle inactive");
        }

        let highlight = {
            let shared = shared.clone();
            throttle(scheduler, shared.options.scroll_wait, move |_: ()| {
                shared.highlight_active_section();
            })
        };

        tracing::debug!(links = shared.links.len(), "navigation initialized");

        Self { shared, highlight }
    }

    pub fn is_menu_toggle(&self, element: &P::Element) -> bool {
        self.shared.menu_toggle.as_ref() == Some(element)
    }

    pub fn is_nav_link(&self, element: &P::Element) -> bool {
        self.shared.links.contains(element)
    }

    pub fn is_menu_open(&self) -> bool {
        self.shared
            .mobile_menu
            .as_ref()
            .is_some_and(|menu| !self.shared.page.has_class(menu, HIDDEN_CLASS))
    }

    /// Click on `#menu-toggle`. Inactive unless both the toggle and the
    /// mobile menu exist.
    pub fn on_toggle_click(&self) {
        if self.shared.menu_toggle.is_some() && self.shared.mobile_menu.is_some() {
            self.toggle_mobile_menu();
        }
    }

    pub fn toggle_mobile_menu(&self) {
        let Some(menu) = self.shared.mobile_menu.as_ref() else {
            return;
        };

        let page = &self.shared.page;
        let expanded = page.has_class(menu, HIDDEN_CLASS);

        if expanded {
            page.remove_class(menu, HIDDEN_CLASS);
        } else {
            page.add_class(menu, HIDDEN_CLASS);
        }

        self.set_expanded(expanded);

        tracing::debug!(expanded, "mobile menu toggled");
    }

    /// Click on a nav link. Always suppresses the browser's own navigation.
    pub fn on_link_click(&self, link: &P::Element) -> bool {
        let page = &*self.shared.page;
        let Some(href) = page.attribute(link, "href") else {
            return true;
        };
        let Some(target) = page.query(&href) else {
            tracing::debug!(href = %href, "nav link target not found");
            return true;
        };

        smooth_scroll_to(page, ScrollTarget::Element(target));

        if self.is_menu_open() {
            self.toggle_mobile_menu();
        }

        true
    }

    /// Scroll event. Highlighting runs once scrolling has settled.
    pub fn on_scroll(&self) {
        self.highlight.call(());
    }

    pub fn on_resize(&self) {
        let page = &self.shared.page;
        if page.inner_width() < self.shared.options.desktop_breakpoint {
            return;
        }

        if let Some(menu) = self.shared.mobile_menu.as_ref() {
            page.add_class(menu, HIDDEN_CLASS);
            self.set_expanded(false);
        }
    }

    /// Styles the nav link of the current section and returns its id.
    pub fn highlight_active_section(&self) -> Option<String> {
        self.shared.highlight_active_section()
    }

    pub fn has_pending_highlight(&self) -> bool {
        self.highlight.is_pending()
    }

    pub fn dispose(&self) {
        self.highlight.cancel();
    }

    fn set_expanded(&self, expanded: bool) {
        if let Some(toggle) = self.shared.menu_toggle.as_ref() {
            self.shared.page.set_attribute(
                toggle,
                "aria-expanded",
                if expanded { "true" } else { "false" },
            );
        }
    }
}

impl<P: Page> Shared<P> {
    fn highlight_active_section(&self) -> Option<String> {
        let page = &*self.page;
        let sections = SectionBounds::collect(page);
        let active = active_section(
            &sections,
            page.scroll_y(),
            page.navbar_height(),
            self.options.highlight_offset,
        );
        let href = current_href(active);

        for link in page.elements_by_class(NAV_LINK_CLASS) {
            page.remove_classes(&link, &CURRENT_LINK_CLASSES);
            page.add_class(&link, DEFAULT_LINK_CLASS);

            if page.attribute(&link, "href").as_deref() == Some(href.as_str()) {
                page.remove_class(&link, DEFAULT_LINK_CLASS);
                page.add_classes(&link, &CURRENT_LINK_CLASSES);
            }
        }

        tracing::debug!(section = active, "active section highlighted");

        active.map(str::to_owned)
    }
}
