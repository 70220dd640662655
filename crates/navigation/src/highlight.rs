use folio_shared::Document;

/// Vertical extent of a page section, in document coordinates.
#[derive(Clone, Debug, PartialEq)]
pub struct SectionBounds {
    pub id: String,
    pub top: f64,
    pub height: f64,
}

impl SectionBounds {
    /// Reads every `section[id]` of the document, in document order.
    pub fn collect<D: Document + ?Sized>(document: &D) -> Vec<Self> {
        document
            .sections()
            .iter()
            .filter_map(|section| {
                Some(Self {
                    id: document.attribute(section, "id")?,
                    top: document.offset_top(section),
                    height: document.offset_height(section),
                })
            })
            .collect()
    }

    /// Whether `scroll_y` falls in this section's window, which starts
    /// `navbar_height + offset` pixels above the section and is as tall as
    /// the section itself.
    pub fn contains(&self, scroll_y: f64, navbar_height: f64, offset: f64) -> bool {
        let top = self.top - navbar_height - offset;
        scroll_y >= top && scroll_y < top + self.height
    }
}

/// The section the reader is currently in.
///
/// Windows of neighbouring sections may overlap; the last match in document
/// order wins.
pub fn active_section(
    sections: &[SectionBounds],
    scroll_y: f64,
    navbar_height: f64,
    offset: f64,
) -> Option<&str> {
    sections
        .iter()
        .filter(|section| section.contains(scroll_y, navbar_height, offset))
        .last()
        .map(|section| section.id.as_str())
}

/// The `href` a nav link must carry to be styled as current.
///
/// With no active section this is a bare `#`.
pub fn current_href(active: Option<&str>) -> String {
    format!("#{}", active.unwrap_or_default())
}
