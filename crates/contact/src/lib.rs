//! Contact form of the portfolio page: validation of the four fields and the
//! simulated submission with its transient message panel.

rust_i18n::i18n!("locales", fallback = "zh-CN");

mod form;
mod input;
mod message;

pub use form::*;
pub use input::*;
pub use message::*;

/// Locales the form messages are available in.
pub fn available_locales() -> Vec<&'static str> {
    rust_i18n::available_locales!()
}
