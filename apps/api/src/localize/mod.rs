//! Location templating. Turns a generic `ServiceDocument` into a city-specific one.
//!
//! Marketing copy carries `[City Name]` and `[Your Area]` tokens. `localize` returns a fresh,
//! independently owned document with every templated field substituted; the source document is
//! only borrowed. Unknown tokens are left verbatim. A missing hero subtitle or section description
//! comes out as an empty string; absent optional blocks stay absent.

use std::sync::LazyLock;

use regex::{NoExpand, Regex};

use crate::catalog::services::ServiceDocument;

/// Label used on pages that are not tied to a specific town.
pub const DEFAULT_LABEL: &str = "NJ";
const STATE_SUFFIX: &str = "NJ";

static PLACEHOLDER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\[(?:city name|your area)\]").expect("placeholder pattern is valid")
});

/// The location a page is rendered for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocationLabel<'a> {
    /// A town display name; rendered as `"<name>, NJ"`.
    City(&'a str),
    /// Generic statewide page; rendered as the bare default label.
    Default,
}

impl LocationLabel<'_> {
    pub fn render(&self) -> String {
        match self {
            LocationLabel::City(name) => format!("{name}, {STATE_SUFFIX}"),
            LocationLabel::Default => DEFAULT_LABEL.to_string(),
        }
    }
}

/// Replaces every recognized placeholder in `text` with `label`.
pub fn substitute_placeholders(text: &str, label: &str) -> String {
    PLACEHOLDER_RE.replace_all(text, NoExpand(label)).into_owned()
}

/// Returns a localized copy of `document` with all templated fields substituted by `label`.
pub fn localize(document: &ServiceDocument, label: &str) -> ServiceDocument {
    let mut localized = document.clone();
    // Scalar text fields come out as "" when absent; whole blocks stay absent.
    localized.hero_subtitle.get_or_insert_with(String::new);
    for section in localized.content.sections.iter_mut() {
        section.description.get_or_insert_with(String::new);
    }
    for_each_templated_field(&mut localized, &mut |field| {
        if PLACEHOLDER_RE.is_match(field) {
            *field = substitute_placeholders(field, label);
        }
    });
    localized
}

/// Visits every field that may carry placeholders.
///
/// `slug`, `short_description`, `icon_identifier`, `hero_title` and `call_to_action_number`
/// are never templated and are not visited.
pub fn for_each_templated_field(doc: &mut ServiceDocument, f: &mut dyn FnMut(&mut String)) {
    f(&mut doc.title);
    f(&mut doc.meta_description);
    if let Some(subtitle) = doc.hero_subtitle.as_mut() {
        f(subtitle);
    }

    let content = &mut doc.content;
    f(&mut content.introduction);
    f(&mut content.final_call_to_action);

    if let Some(why) = content.why_choose_us.as_mut() {
        f(&mut why.title);
        why.points.iter_mut().for_each(|p| f(p));
    }
    if let Some(process) = content.process.as_mut() {
        f(&mut process.title);
        process.steps.iter_mut().for_each(|s| f(s));
    }

    for section in content.sections.iter_mut() {
        f(&mut section.title);
        if let Some(description) = section.description.as_mut() {
            f(description);
        }
        if let Some(points) = section.points.as_mut() {
            points.iter_mut().for_each(|p| f(p));
        }
        for sub in section.subsections.iter_mut().flatten() {
            f(&mut sub.title);
            f(&mut sub.description);
            if let Some(items) = sub.items.as_mut() {
                items.iter_mut().for_each(|i| f(i));
            }
        }
    }
}

/// Display name for a city path segment with no catalog match:
/// hyphens become spaces and each word is capitalized (`"point-pleasant"` → `"Point Pleasant"`).
pub fn fallback_city_name(segment: &str) -> String {
    let spaced = segment.replace('-', " ");
    let mut out = String::with_capacity(spaced.len());
    let mut prev_is_word = false;
    for c in spaced.chars() {
        let is_word = c.is_alphanumeric() || c == '_';
        if is_word && !prev_is_word {
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
        prev_is_word = is_word;
    }
    out
}
