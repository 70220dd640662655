use std::rc::Rc;

use folio_contact::{ContactForm, ContactOptions};
use folio_shared::{Document, ElementSpec, MemoryPage, NodeId, VirtualScheduler};

pub struct Harness {
    pub page: Rc<MemoryPage>,
    pub scheduler: Rc<VirtualScheduler>,
    pub form: ContactForm<MemoryPage>,
}

impl Harness {
    pub fn fill(&self, name: &str, email: &str, subject: &str, message: &str) {
        for (id, value) in [
            ("name", name),
            ("email", email),
            ("subject", subject),
            ("message", message),
        ] {
            self.page.set_value(&self.field(id), value);
        }
    }

    pub fn field(&self, id: &str) -> NodeId {
        self.page.element_by_id(id).unwrap()
    }

    pub fn panel(&self) -> NodeId {
        self.page.element_by_id("form-message").unwrap()
    }

    #[allow(dead_code)]
    pub fn values(&self) -> Vec<String> {
        ["name", "email", "subject", "message"]
            .into_iter()
            .map(|id| self.page.value(&self.field(id)))
            .collect()
    }
}

pub fn contact_page() -> anyhow::Result<MemoryPage> {
    let page = MemoryPage::new(1280.0, 800.0);
    page.extend([
        ElementSpec::new("section").id("contact"),
        ElementSpec::new("form").id("contact-form").parent("contact"),
        ElementSpec::new("input").id("name").parent("contact-form"),
        ElementSpec::new("input").id("email").parent("contact-form"),
        ElementSpec::new("input").id("subject").parent("contact-form"),
        ElementSpec::new("textarea").id("message").parent("contact-form"),
        ElementSpec::new("div")
            .id("form-message")
            .class("hidden")
            .parent("contact"),
    ])?;

    Ok(page)
}

pub fn harness() -> anyhow::Result<Harness> {
    with_page(contact_page()?)
}

pub fn with_page(page: MemoryPage) -> anyhow::Result<Harness> {
    let page = Rc::new(page);
    let scheduler = Rc::new(VirtualScheduler::default());
    let form = ContactForm::init(page.clone(), scheduler.clone(), ContactOptions::default())
        .ok_or_else(|| anyhow::anyhow!("contact form not found"))?;

    Ok(Harness {
        page,
        scheduler,
        form,
    })
}
