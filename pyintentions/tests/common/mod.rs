//! Shared helpers: sources are written with a `<caret>` marker where the
//! cursor sits.
#![allow(dead_code, clippy::unwrap_used, clippy::expect_used)]

use pyintentions::config::Settings;
use pyintentions::intentions::{apply_intention, available_at, Context, Offer};
use pyintentions::syntax::PyFile;

pub const CARET: &str = "<caret>";

/// Source without the marker, and the byte offset the marker stood at.
pub fn split_caret(text: &str) -> (String, usize) {
    let offset = text.find(CARET).expect("source has no <caret> marker");
    (text.replacen(CARET, "", 1), offset)
}

/// Offers available at the caret.
pub fn offers_with(text: &str, settings: &Settings) -> Vec<Offer> {
    let (source, offset) = split_caret(text);
    let file = PyFile::parse(source);
    available_at(&Context::new(&file, offset, settings))
}

/// Labels of the offers available at the caret.
pub fn labels(text: &str) -> Vec<String> {
    offers_with(text, &Settings::default())
        .into_iter()
        .map(|offer| offer.label)
        .collect()
}

/// Whether intention `id` is offered at the caret.
pub fn is_available(text: &str, id: &str) -> bool {
    offers_with(text, &Settings::default())
        .iter()
        .any(|offer| offer.id == id)
}

/// Applies intention `id` at the caret with custom settings.
pub fn launch_with(text: &str, id: &str, settings: &Settings) -> String {
    let (source, offset) = split_caret(text);
    let file = PyFile::parse(source);
    let context = Context::new(&file, offset, settings);
    assert!(
        available_at(&context).iter().any(|offer| offer.id == id),
        "{id} is not offered at the caret"
    );
    apply_intention(id, &context).unwrap()
}

/// Applies intention `id` at the caret.
pub fn launch(text: &str, id: &str) -> String {
    launch_with(text, id, &Settings::default())
}
