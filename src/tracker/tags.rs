use super::item::Item;
use super::settings::TagFilter;

/// Distinct tags in use, ordered case-insensitively with original case kept
///
/// Rebuilt from the full item list on every call.
pub fn distinct_tags(items: &[Item]) -> Vec<String> {
    let mut tags: Vec<String> = items
        .iter()
        .flat_map(|it| it.tags().iter().cloned())
        .collect();
    tags.sort_by(|a, b| {
        a.to_lowercase()
            .cmp(&b.to_lowercase())
            .then_with(|| a.cmp(b))
    });
    tags.dedup();
    tags
}

/// Filter choices: the "All" wildcard followed by every distinct tag
pub fn filter_options(items: &[Item]) -> Vec<String> {
    std::iter::once(TagFilter::ALL_LABEL.to_string())
        .chain(distinct_tags(items))
        .collect()
}

/// Whether an item passes the tag filter
pub fn is_visible(item: &Item, filter: &TagFilter) -> bool {
    match filter {
        TagFilter::All => true,
        TagFilter::Tag(tag) => item.has_tag(tag),
    }
}

/// Whether the filter still names a tag in use
pub fn filter_in_use(items: &[Item], filter: &TagFilter) -> bool {
    match filter {
        TagFilter::All => true,
        TagFilter::Tag(tag) => items.iter().any(|it| it.has_tag(tag)),
    }
}
