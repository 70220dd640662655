use std::{cell::Cell, rc::Rc, time::Duration};

use folio_shared::{Document, Scheduler};
use strum::{AsRefStr, Display};

use crate::{FormData, FormMessage, MessageKind, sent_message, validate_form};

pub const CONTACT_FORM_ID: &str = "contact-form";
pub const NAME_FIELD_ID: &str = "name";
pub const EMAIL_FIELD_ID: &str = "email";
pub const SUBJECT_FIELD_ID: &str = "subject";
pub const MESSAGE_FIELD_ID: &str = "message";

/// Error lines are joined into the panel's HTML with this separator.
const ERROR_SEPARATOR: &str = "<br>";

#[derive(Display, AsRefStr, Default, Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormState {
    #[default]
    Idle,
    Validating,
    ShowingError,
    ShowingSuccess,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ContactOptions {
    /// How long the success message stays up.
    pub message_timeout: Duration,
    pub locale: String,
}

impl Default for ContactOptions {
    fn default() -> Self {
        Self {
            message_timeout: Duration::from_millis(3000),
            locale: "zh-CN".to_owned(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Submission {
    /// Accepted and "sent"; nothing leaves the page.
    Sent,
    Rejected(Vec<String>),
}

/// Client-side handling of `#contact-form`.
///
/// Submitting never reaches a server: a valid form shows a success message
/// for a while and is cleared, an invalid one lists what to fix.
pub struct ContactForm<D: Document> {
    document: Rc<D>,
    scheduler: Rc<dyn Scheduler>,
    form: D::Element,
    message: Rc<FormMessage<D>>,
    state: Rc<Cell<FormState>>,
    options: ContactOptions,
}

impl<D: Document + 'static> ContactForm<D> {
    /// `None` when the page has no contact form.
    pub fn init(
        document: Rc<D>,
        scheduler: Rc<dyn Scheduler>,
        options: ContactOptions,
    ) -> Option<Self> {
        let Some(form) = document.element_by_id(CONTACT_FORM_ID) else {
            tracing::debug!("contact form inactive");
            return None;
        };

        let message = Rc::new(FormMessage::init(document.clone()));

        Some(Self {
            document,
            scheduler,
            form,
            message,
            state: Rc::new(Cell::new(FormState::Idle)),
            options,
        })
    }

    pub fn is_form(&self, element: &D::Element) -> bool {
        &self.form == element
    }

    pub fn state(&self) -> FormState {
        self.state.get()
    }

    /// Current field values, untrimmed. Missing fields read as empty.
    pub fn read_fields(&self) -> FormData {
        let value = |id: &str| {
            self.document
                .element_by_id(id)
                .map(|field| self.document.value(&field))
                .unwrap_or_default()
        };

        FormData {
            name: value(NAME_FIELD_ID),
            email: value(EMAIL_FIELD_ID),
            subject: value(SUBJECT_FIELD_ID),
            message: value(MESSAGE_FIELD_ID),
        }
    }

    pub fn on_submit(&self) -> Submission {
        self.state.set(FormState::Validating);

        let data = self.read_fields();
        let errors = validate_form(&data, &self.options.locale);

        if !errors.is_empty() {
            self.state.set(FormState::ShowingError);
            self.show_form_message(&errors.join(ERROR_SEPARATOR), MessageKind::Error);
            self.state.set(FormState::Idle);

            tracing::debug!(errors = errors.len(), "contact form rejected");

            return Submission::Rejected(errors);
        }

        self.state.set(FormState::ShowingSuccess);
        self.show_form_message(&sent_message(&self.options.locale), MessageKind::Success);
        self.document.reset_form(&self.form);

        let message = self.message.clone();
        let state = self.state.clone();
        self.scheduler.schedule(
            self.options.message_timeout,
            Box::new(move || {
                message.hide();
                state.set(FormState::Idle);
            }),
        );

        tracing::debug!("contact form accepted");

        Submission::Sent
    }

    pub fn show_form_message(&self, html: &str, kind: MessageKind) {
        self.message.show(html, kind);
    }

    pub fn hide_form_message(&self) {
        self.message.hide();
    }

    pub fn is_message_visible(&self) -> bool {
        self.message.is_visible()
    }
}
