use std::rc::Rc;

use folio_contact::{ContactForm, ContactOptions};
use folio_navigation::{BackToTop, NavigationController, NavigationOptions};
use folio_projects::ProjectFilter;
use folio_shared::{Page, Scheduler};

/// Elements a click can be routed to. Browser clicks often land on a child
/// of the element that owns the behavior, so adapters resolve the target
/// with `closest(CLICK_TARGETS)` first.
pub const CLICK_TARGETS: &str = "#menu-toggle, .nav-link, .filter-btn, #back-to-top";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppOptions {
    pub navigation: NavigationOptions,
    pub contact: ContactOptions,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PageEvent<E> {
    Click(E),
    Submit(E),
    Scroll,
    Resize,
}

/// Every behavior of the page, mounted once.
pub struct App<P: Page> {
    navigation: NavigationController<P>,
    back_to_top: Option<BackToTop<P>>,
    projects: ProjectFilter<P>,
    contact: Option<ContactForm<P>>,
}

impl<P: Page + 'static> App<P> {
    pub fn mount(page: Rc<P>, scheduler: Rc<dyn Scheduler>, options: AppOptions) -> Self {
        let navigation =
            NavigationController::init(page.clone(), scheduler.clone(), options.navigation);
        let back_to_top = BackToTop::init(page.clone());
        let projects = ProjectFilter::init(page.clone());
        let contact = ContactForm::init(page, scheduler, options.contact);

        tracing::info!(
            back_to_top = back_to_top.is_some(),
            contact = contact.is_some(),
            "个人主页已加载"
        );

        Self {
            navigation,
            back_to_top,
            projects,
            contact,
        }
    }

    /// Routes an event to every unit that owns its target. Returns whether
    /// the browser's default action must be suppressed.
    pub fn dispatch(&self, event: PageEvent<P::Element>) -> bool {
        match event {
            PageEvent::Click(element) => self.on_click(&element),
            PageEvent::Submit(form) => {
                let Some(contact) = self.contact.as_ref().filter(|c| c.is_form(&form)) else {
                    return false;
                };

                let submission = contact.on_submit();
                tracing::debug!(?submission, "contact form submitted");

                true
            }
            PageEvent::Scroll => {
                self.navigation.on_scroll();
                false
            }
            PageEvent::Resize => {
                self.navigation.on_resize();
                false
            }
        }
    }

    pub fn navigation(&self) -> &NavigationController<P> {
        &self.navigation
    }

    pub fn projects(&self) -> &ProjectFilter<P> {
        &self.projects
    }

    pub fn contact(&self) -> Option<&ContactForm<P>> {
        self.contact.as_ref()
    }

    /// Cancels the pending highlight. Scheduled message hides still run.
    pub fn dispose(&self) {
        self.navigation.dispose();

        tracing::debug!("app disposed");
    }

    fn on_click(&self, element: &P::Element) -> bool {
        let mut prevent_default = false;

        if self.navigation.is_menu_toggle(element) {
            self.navigation.on_toggle_click();
        }

        if self.navigation.is_nav_link(element) {
            prevent_default |= self.navigation.on_link_click(element);
        }

        if self.projects.is_filter_button(element) {
            self.projects.on_button_click(element);
        }

        if let Some(back_to_top) = self
            .back_to_top
            .as_ref()
            .filter(|button| button.is_button(element))
        {
            back_to_top.on_click();
        }

        prevent_default
    }
}
