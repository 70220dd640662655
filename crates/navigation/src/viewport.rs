use folio_shared::{Document, Page, ScrollBehavior, Viewport};

/// What [`smooth_scroll_to`] should scroll to.
#[derive(Clone, Debug, PartialEq)]
pub enum ScrollTarget<'a, E> {
    Selector(&'a str),
    Element(E),
}

impl<'a, E> From<&'a str> for ScrollTarget<'a, E> {
    fn from(selector: &'a str) -> Self {
        Self::Selector(selector)
    }
}

/// Smoothly scrolls so `target` sits right below the fixed navigation bar.
///
/// Selectors that match nothing leave the page untouched. Returns the
/// requested scroll position.
pub fn smooth_scroll_to<P: Page + ?Sized>(
    page: &P,
    target: ScrollTarget<'_, P::Element>,
) -> Option<f64> {
    let element = match target {
        ScrollTarget::Selector(selector) => page.query(selector)?,
        ScrollTarget::Element(element) => element,
    };

    let top = page.offset_top(&element) - page.navbar_height();
    page.scroll_to(top, ScrollBehavior::Smooth);

    tracing::debug!(top, "smooth scroll requested");

    Some(top)
}

/// True when the element's box lies entirely inside the viewport.
pub fn is_in_viewport<P: Page + ?Sized>(page: &P, element: &P::Element) -> bool {
    let rect = page.bounding_rect(element);

    rect.top >= 0.0
        && rect.left >= 0.0
        && rect.bottom <= page.inner_height()
        && rect.right <= page.inner_width()
}

pub fn scroll_to_top<V: Viewport + ?Sized>(viewport: &V) {
    viewport.scroll_to(0.0, ScrollBehavior::Smooth);
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_shared::{ElementSpec, MemoryPage};

    fn page(with_navbar: bool) -> MemoryPage {
        let page = MemoryPage::new(800.0, 600.0);
        if with_navbar {
            page.append(ElementSpec::new("nav").id("navbar").at(0.0, 80.0))
                .unwrap();
        }
        page.extend([
            ElementSpec::new("section")
                .id("projects")
                .at(1200.0, 500.0)
                .size(0.0, 800.0),
            ElementSpec::new("div")
                .id("card")
                .at(100.0, 200.0)
                .size(10.0, 300.0),
        ])
        .unwrap();
        page
    }

    #[test]
    fn test_scroll_by_selector_subtracts_navbar() {
        let page = page(true);

        assert_eq!(smooth_scroll_to(&page, "#projects".into()), Some(1120.0));
        assert_eq!(page.scroll_requests()[0].behavior, ScrollBehavior::Smooth);
    }

    #[test]
    fn test_scroll_without_navbar() {
        let page = page(false);
        let projects = page.element_by_id("projects").unwrap();

        assert_eq!(
            smooth_scroll_to(&page, ScrollTarget::Element(projects)),
            Some(1200.0)
        );
    }

    #[test]
    fn test_unresolved_selector_is_noop() {
        let page = page(true);

        assert_eq!(smooth_scroll_to(&page, "#nowhere".into()), None);
        assert!(page.scroll_requests().is_empty());
    }

    #[test]
    fn test_is_in_viewport() {
        let page = page(true);
        let card = page.element_by_id("card").unwrap();
        let projects = page.element_by_id("projects").unwrap();

        assert!(is_in_viewport(&page, &card));
        assert!(!is_in_viewport(&page, &projects));

        page.set_scroll_y(150.0);
        assert!(!is_in_viewport(&page, &card));

        page.set_scroll_y(1200.0);
        assert!(is_in_viewport(&page, &projects));
    }

    #[test]
    fn test_scroll_to_top() {
        let page = page(true);
        page.set_scroll_y(900.0);

        scroll_to_top(&page);

        assert_eq!(page.scroll_y(), 0.0);
        assert_eq!(page.scroll_requests()[0].top, 0.0);
    }
}
