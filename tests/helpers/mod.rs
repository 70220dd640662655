use std::rc::Rc;

use folio::{App, AppOptions};
use folio_shared::{Document, ElementSpec, MemoryPage, NodeId, VirtualScheduler};

pub struct Harness {
    pub page: Rc<MemoryPage>,
    pub scheduler: Rc<VirtualScheduler>,
    pub app: App<MemoryPage>,
}

impl Harness {
    pub fn by_id(&self, id: &str) -> NodeId {
        self.page.element_by_id(id).unwrap()
    }

    #[allow(dead_code)]
    pub fn find(&self, class: &str, attribute: &str, value: &str) -> NodeId {
        self.page
            .elements_by_class(class)
            .into_iter()
            .find(|element| self.page.attribute(element, attribute).as_deref() == Some(value))
            .unwrap()
    }
}

/// The whole portfolio page on a 375x700 phone screen.
pub fn portfolio_page() -> anyhow::Result<MemoryPage> {
    let page = MemoryPage::new(375.0, 700.0);
    page.extend([
        ElementSpec::new("nav").id("navbar").at(0.0, 64.0),
        ElementSpec::new("button")
            .id("menu-toggle")
            .attr("aria-expanded", "false"),
        ElementSpec::new("div").id("mobile-menu").class("hidden"),
        nav_link("#home"),
        nav_link("#about"),
        nav_link("#projects"),
        nav_link("#contact"),
        ElementSpec::new("section").id("home").at(0.0, 700.0),
        ElementSpec::new("section").id("about").at(700.0, 600.0),
        ElementSpec::new("section").id("projects").at(1300.0, 900.0),
        filter_button("all").class("bg-primary").class("text-white"),
        filter_button("web").class("bg-white").class("text-gray-700"),
        filter_button("mobile").class("bg-white").class("text-gray-700"),
        project_card("shop", "web"),
        project_card("tracker", "mobile"),
        ElementSpec::new("section").id("contact").at(2200.0, 700.0),
        ElementSpec::new("form").id("contact-form").parent("contact"),
        ElementSpec::new("input").id("name").parent("contact-form"),
        ElementSpec::new("input").id("email").parent("contact-form"),
        ElementSpec::new("input").id("subject").parent("contact-form"),
        ElementSpec::new("textarea").id("message").parent("contact-form"),
        ElementSpec::new("div")
            .id("form-message")
            .class("hidden")
            .parent("contact"),
        ElementSpec::new("button").id("back-to-top"),
    ])?;

    Ok(page)
}

fn nav_link(href: &str) -> ElementSpec {
    ElementSpec::new("a")
        .class("nav-link")
        .class("text-gray-700")
        .attr("href", href)
}

fn filter_button(category: &str) -> ElementSpec {
    ElementSpec::new("button")
        .class("filter-btn")
        .attr("data-category", category)
        .parent("projects")
}

fn project_card(id: &str, category: &str) -> ElementSpec {
    ElementSpec::new("article")
        .id(id)
        .class("project-card")
        .attr("data-category", category)
        .parent("projects")
}

pub fn harness() -> anyhow::Result<Harness> {
    with_page(portfolio_page()?)
}

pub fn with_page(page: MemoryPage) -> anyhow::Result<Harness> {
    let page = Rc::new(page);
    let scheduler = Rc::new(VirtualScheduler::new());
    let app = App::mount(page.clone(), scheduler.clone(), AppOptions::default());

    Ok(Harness {
        page,
        scheduler,
        app,
    })
}
