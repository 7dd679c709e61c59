use crate::Page;

/// **VALUE**: Verifies page count arithmetic derived from the total.
///
/// **WHY THIS MATTERS**: Page navigation is only offered for pages that exist; an
/// off-by-one makes the last page unreachable or adds an empty one.
///
/// **BUG THIS CATCHES**: Would catch floor division instead of ceiling.
#[test]
fn given_totals_when_computing_total_pages_then_rounds_up() {
    let cases = [(0, 0), (1, 1), (10, 1), (11, 2), (20, 2), (21, 3)];

    for (total, expected) in cases {
        let page: Page<u8> = Page::empty(1, 10, total);
        assert_eq!(page.total_pages(), expected, "total {total}");
    }
}

#[test]
fn given_last_page_when_checking_has_next_then_returns_false() {
    let page: Page<u8> = Page::empty(2, 10, 20);
    assert!(!page.has_next());

    let page: Page<u8> = Page::empty(1, 10, 20);
    assert!(page.has_next());
}
