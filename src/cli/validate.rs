use std::process::ExitCode;

use anyhow::Result;
use folio_contact::{FormData, sent_message, validate_form};

pub fn run(data: &FormData, locale: &str) -> Result<ExitCode> {
    if !folio_contact::available_locales().contains(&locale) {
        anyhow::bail!("unknown locale {locale}");
    }

    let errors = validate_form(data, locale);

    if errors.is_empty() {
        println!("{}", sent_message(locale));

        return Ok(ExitCode::SUCCESS);
    }

    tracing::debug!(errors = errors.len(), "submission rejected");

    for error in errors {
        println!("{error}");
    }

    Ok(ExitCode::FAILURE)
}
