use std::rc::Rc;

use folio_shared::{Document, HIDDEN_CLASS};
use strum::{AsRefStr, Display, EnumString};

pub const FORM_MESSAGE_ID: &str = "form-message";

#[derive(EnumString, Display, AsRefStr, Clone, Copy, Debug, PartialEq, Eq)]
#[strum(serialize_all = "lowercase")]
pub enum MessageKind {
    Success,
    Error,
}

impl MessageKind {
    /// Full class list of the message panel for this kind.
    pub fn class_name(&self) -> &'static str {
        match self {
            MessageKind::Success => "p-4 bg-green-100 text-green-800 rounded-lg",
            MessageKind::Error => "p-4 bg-red-100 text-red-800 rounded-lg",
        }
    }
}

/// The `#form-message` panel under the contact form.
pub struct FormMessage<D: Document> {
    document: Rc<D>,
    panel: Option<D::Element>,
}

impl<D: Document> FormMessage<D> {
    pub fn init(document: Rc<D>) -> Self {
        let panel = document.element_by_id(FORM_MESSAGE_ID);

        Self { document, panel }
    }

    /// Replaces the panel content with `html` and styles it as `kind`.
    pub fn show(&self, html: &str, kind: MessageKind) {
        let Some(panel) = self.panel.as_ref() else {
            return;
        };

        self.document.set_inner_html(panel, html);
        self.document.set_class_name(panel, kind.class_name());
        self.document.remove_class(panel, HIDDEN_CLASS);
    }

    pub fn hide(&self) {
        if let Some(panel) = self.panel.as_ref() {
            self.document.add_class(panel, HIDDEN_CLASS);
        }
    }

    pub fn is_visible(&self) -> bool {
        self.panel
            .as_ref()
            .is_some_and(|panel| !self.document.has_class(panel, HIDDEN_CLASS))
    }
}
