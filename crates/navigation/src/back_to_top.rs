use std::rc::Rc;

use folio_shared::Page;

use crate::scroll_to_top;

pub const BACK_TO_TOP_ID: &str = "back-to-top";

/// `#back-to-top` button. Always visible; clicking it returns to the top.
pub struct BackToTop<P: Page> {
    page: Rc<P>,
    button: P::Element,
}

impl<P: Page> BackToTop<P> {
    /// `None` when the page has no such button.
    pub fn init(page: Rc<P>) -> Option<Self> {
        let button = page.element_by_id(BACK_TO_TOP_ID)?;

        Some(Self { page, button })
    }

    pub fn is_button(&self, element: &P::Element) -> bool {
        &self.button == element
    }

    pub fn on_click(&self) {
        scroll_to_top(&*self.page);
    }
}
