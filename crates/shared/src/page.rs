use std::fmt::Debug;

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display as StrumDisplay, EnumString};

/// Class that hides an element on the page (mobile menu, form message).
pub const HIDDEN_CLASS: &str = "hidden";

/// Id of the fixed top bar whose height offsets every scroll target.
pub const NAVBAR_ID: &str = "navbar";

/// CSS `display` values the behavior layer writes.
#[derive(
    EnumString,
    StrumDisplay,
    AsRefStr,
    Default,
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Display {
    #[default]
    Block,
    None,
}

#[derive(EnumString, StrumDisplay, AsRefStr, Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ScrollBehavior {
    Auto,
    Smooth,
}

/// Viewport-relative bounding box, as returned by `getBoundingClientRect`.
#[derive(Default, Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub top: f64,
    pub left: f64,
    pub bottom: f64,
    pub right: f64,
}

impl Rect {
    pub fn new(top: f64, left: f64, width: f64, height: f64) -> Self {
        Self {
            top,
            left,
            bottom: top + height,
            right: left + width,
        }
    }
}

/// The document tree the behavior units read and write.
///
/// Mutating methods take `&self`: like the DOM, implementations own their
/// state behind interior mutability and are only touched from one thread.
/// Lookups that find nothing return `None`/empty, never an error.
pub trait Document {
    type Element: Clone + PartialEq + Debug + 'static;

    fn element_by_id(&self, id: &str) -> Option<Self::Element>;

    /// First element matching a CSS selector. Invalid selectors match nothing.
    fn query(&self, selector: &str) -> Option<Self::Element>;

    fn elements_by_class(&self, class: &str) -> Vec<Self::Element>;

    /// Every `section` carrying an `id`, in document order.
    fn sections(&self) -> Vec<Self::Element>;

    fn attribute(&self, element: &Self::Element, name: &str) -> Option<String>;
    fn set_attribute(&self, element: &Self::Element, name: &str, value: &str);

    fn has_class(&self, element: &Self::Element, class: &str) -> bool;
    fn add_class(&self, element: &Self::Element, class: &str);
    fn remove_class(&self, element: &Self::Element, class: &str);

    /// Replaces the whole class list.
    fn set_class_name(&self, element: &Self::Element, class_name: &str);

    fn set_display(&self, element: &Self::Element, display: Display);
    fn set_inner_html(&self, element: &Self::Element, html: &str);

    /// Current value of a form control; empty for anything else.
    fn value(&self, element: &Self::Element) -> String;

    /// Restores every control of the form to its empty state.
    fn reset_form(&self, form: &Self::Element);

    /// Document-relative top edge in pixels.
    fn offset_top(&self, element: &Self::Element) -> f64;
    fn offset_height(&self, element: &Self::Element) -> f64;
    fn bounding_rect(&self, element: &Self::Element) -> Rect;

    fn add_classes(&self, element: &Self::Element, classes: &[&str]) {
        for class in classes {
            self.add_class(element, class);
        }
    }

    fn remove_classes(&self, element: &Self::Element, classes: &[&str]) {
        for class in classes {
            self.remove_class(element, class);
        }
    }

    /// Height of the fixed `#navbar`, or 0 when the page has none.
    fn navbar_height(&self) -> f64 {
        self.element_by_id(NAVBAR_ID)
            .map(|navbar| self.offset_height(&navbar))
            .unwrap_or(0.0)
    }
}

/// The window the document is shown in.
pub trait Viewport {
    fn scroll_y(&self) -> f64;
    fn inner_width(&self) -> f64;
    fn inner_height(&self) -> f64;
    fn scroll_to(&self, top: f64, behavior: ScrollBehavior);
}

/// A document together with its viewport.
pub trait Page: Document + Viewport {}

impl<T: Document + Viewport> Page for T {}
