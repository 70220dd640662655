use std::rc::Rc;

use folio_shared::{Display, Document};

pub const FILTER_BUTTON_CLASS: &str = "filter-btn";
pub const PROJECT_CARD_CLASS: &str = "project-card";
pub const CATEGORY_ATTRIBUTE: &str = "data-category";

/// Category that matches every card.
pub const ALL_CATEGORIES: &str = "all";

pub const FADE_IN_CLASS: &str = "fade-in";

const ACTIVE_BUTTON_CLASSES: [&str; 2] = ["bg-primary", "text-white"];
const INACTIVE_BUTTON_CLASSES: [&str; 2] = ["bg-white", "text-gray-700"];

/// Whether a card stays visible under the selected category.
///
/// A missing category on both sides counts as a match.
pub fn is_visible(selected: Option<&str>, card: Option<&str>) -> bool {
    selected == Some(ALL_CATEGORIES) || card == selected
}

/// Category buttons and the project cards they show or hide.
///
/// Filter state lives only in the classes and inline styles on the page.
pub struct ProjectFilter<D: Document> {
    document: Rc<D>,
    buttons: Vec<D::Element>,
    cards: Vec<D::Element>,
}

impl<D: Document> ProjectFilter<D> {
    pub fn init(document: Rc<D>) -> Self {
        let buttons = document.elements_by_class(FILTER_BUTTON_CLASS);
        let cards = document.elements_by_class(PROJECT_CARD_CLASS);

        tracing::debug!(
            buttons = buttons.len(),
            cards = cards.len(),
            "project filter initialized"
        );

        Self {
            document,
            buttons,
            cards,
        }
    }

    pub fn is_filter_button(&self, element: &D::Element) -> bool {
        self.buttons.contains(element)
    }

    /// Click on a filter button: selects the button's `data-category`.
    pub fn on_button_click(&self, button: &D::Element) {
        let category = self.document.attribute(button, CATEGORY_ATTRIBUTE);

        self.style_buttons(button);
        self.show_category(category.as_deref());
    }

    /// Selects `category` as if its button had been clicked. Buttons are
    /// restyled only when one carries that category.
    pub fn set_active_category(&self, category: &str) {
        let button = self.buttons.iter().find(|button| {
            self.document.attribute(button, CATEGORY_ATTRIBUTE).as_deref() == Some(category)
        });

        if let Some(button) = button {
            self.style_buttons(button);
        }

        self.show_category(Some(category));
    }

    /// Number of cards currently shown by the filter.
    pub fn visible_cards(&self, category: Option<&str>) -> usize {
        self.cards
            .iter()
            .filter(|card| {
                is_visible(
                    category,
                    self.document.attribute(card, CATEGORY_ATTRIBUTE).as_deref(),
                )
            })
            .count()
    }

    fn style_buttons(&self, active: &D::Element) {
        for button in &self.buttons {
            self.document.remove_classes(button, &ACTIVE_BUTTON_CLASSES);
            self.document.add_classes(button, &INACTIVE_BUTTON_CLASSES);
        }

        self.document.remove_classes(active, &INACTIVE_BUTTON_CLASSES);
        self.document.add_classes(active, &ACTIVE_BUTTON_CLASSES);
    }

    fn show_category(&self, category: Option<&str>) {
        for card in &self.cards {
            let card_category = self.document.attribute(card, CATEGORY_ATTRIBUTE);

            if is_visible(category, card_category.as_deref()) {
                self.document.set_display(card, Display::Block);
                self.document.add_class(card, FADE_IN_CLASS);
            } else {
                self.document.set_display(card, Display::None);
            }
        }

        tracing::debug!(category, "projects filtered");
    }
}
