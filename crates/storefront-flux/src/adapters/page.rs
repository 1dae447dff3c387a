use crate::requests::MAX_RECORDS;
use crate::state::PageWindow;

/// Page bounds for `record_count` records split into pages of `page_size`
///
/// Only the first `MAX_RECORDS` records are reachable, so the page count is
/// capped accordingly. `from`/`to` are 1-based and inclusive; both are 0 when
/// there are no records.
pub fn extract_page(record_count: u64, page_size: u64, current: u64) -> PageWindow {
    let total = record_count.min(MAX_RECORDS);
    let page_size = page_size.max(1);
    let last = total.div_ceil(page_size).max(1);
    let skip = current.saturating_sub(1).saturating_mul(page_size);

    let (from, to) = if total == 0 {
        (0, 0)
    } else {
        (
            skip.saturating_add(1).min(total),
            skip.saturating_add(page_size).min(total),
        )
    };

    PageWindow {
        last,
        from,
        to,
        previous: (current > 1).then(|| (current - 1).min(last)),
        next: (current < last).then_some(current + 1),
    }
}
