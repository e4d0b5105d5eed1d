//! Assertion helpers over render items.

use ao_core::view::RenderItem;

/// Whether the list ends with a loading indicator.
#[allow(dead_code)]
pub fn has_loading(items: &[RenderItem<'_>]) -> bool {
    items.iter().any(|i| matches!(i, RenderItem::Loading))
}

/// The summary text, if the turn settled successfully.
#[allow(dead_code)]
pub fn summary<'a>(items: &[RenderItem<'a>]) -> Option<&'a str> {
    items.iter().find_map(|i| match i {
        RenderItem::Summary(text) => Some(*text),
        _ => None,
    })
}

/// The failure text, if the turn settled with an error.
#[allow(dead_code)]
pub fn failure<'a>(items: &[RenderItem<'a>]) -> Option<&'a str> {
    items.iter().find_map(|i| match i {
        RenderItem::Failure(text) => Some(*text),
        _ => None,
    })
}
