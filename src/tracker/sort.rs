use super::item::Item;
use super::settings::SortKey;
use std::cmp::Ordering;

/// Stable sort of the full list. Descending reverses the comparison for every
/// key, except that undated items stay after dated ones in both directions.
pub fn sort_items(items: &mut [Item], key: SortKey, ascending: bool) {
    items.sort_by(|a, b| compare(a, b, key, ascending));
}

fn compare(a: &Item, b: &Item, key: SortKey, ascending: bool) -> Ordering {
    let directed = |ord: Ordering| if ascending { ord } else { ord.reverse() };
    match key {
        SortKey::Name => directed(a.name().to_lowercase().cmp(&b.name().to_lowercase())),
        SortKey::Weight => directed(a.weight().total_cmp(&b.weight())),
        SortKey::Estimate => directed(a.est_hours().total_cmp(&b.est_hours())),
        SortKey::Done => directed(a.is_done().cmp(&b.is_done())),
        SortKey::Status => directed(a.status().cmp(&b.status())),
        SortKey::DueDate => match (a.due(), b.due()) {
            (Some(x), Some(y)) => directed(x.cmp(&y)),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        },
    }
}
