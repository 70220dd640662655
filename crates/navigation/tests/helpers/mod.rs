use std::rc::Rc;

use folio_navigation::{NavigationController, NavigationOptions};
use folio_shared::{ElementSpec, MemoryPage, VirtualScheduler};

pub struct Harness {
    pub page: Rc<MemoryPage>,
    pub scheduler: Rc<VirtualScheduler>,
    pub nav: NavigationController<MemoryPage>,
}

/// Navbar 64px tall, mobile menu closed, four consecutive sections.
#[allow(dead_code)]
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
        ElementSpec::new("section").id("contact").at(2200.0, 700.0),
    ])?;

    Ok(page)
}

#[allow(dead_code)]
pub fn nav_link(href: &str) -> ElementSpec {
    ElementSpec::new("a")
        .class("nav-link")
        .class("text-gray-700")
        .attr("href", href)
}

#[allow(dead_code)]
pub fn harness() -> anyhow::Result<Harness> {
    with_page(portfolio_page()?)
}

#[allow(dead_code)]
pub fn with_page(page: MemoryPage) -> anyhow::Result<Harness> {
    let page = Rc::new(page);
    let scheduler = Rc::new(VirtualScheduler::new());
    let nav = NavigationController::init(
        page.clone(),
        scheduler.clone(),
        NavigationOptions::default(),
    );

    Ok(Harness {
        page,
        scheduler,
        nav,
    })
}

#[allow(dead_code)]
pub fn link(page: &MemoryPage, href: &str) -> folio_shared::NodeId {
    use folio_shared::Document;

    page.elements_by_class("nav-link")
        .into_iter()
        .find(|link| page.attribute(link, "href").as_deref() == Some(href))
        .expect("nav link exists")
}
