// Unit tests for pagination arithmetic and the thread list query

use crate::listing::{ThreadListQuery, last_page_after_create, page_after_delete, total_page_count};

#[test]
fn given_totals_when_counting_pages_then_rounds_up() {
    assert_eq!(total_page_count(0, 10), 0);
    assert_eq!(total_page_count(1, 10), 1);
    assert_eq!(total_page_count(10, 10), 1);
    assert_eq!(total_page_count(11, 10), 2);
}

/// **VALUE**: Verifies a zero page size cannot cause a division by zero.
#[test]
fn given_zero_page_size_when_counting_pages_then_treated_as_one() {
    assert_eq!(total_page_count(3, 0), 3);
}

/// **VALUE**: Verifies a new comment is shown on the page it lands on.
///
/// **WHY THIS MATTERS**: Comments are appended, so after posting the user expects
/// to see their comment, which may open a new page.
///
/// **BUG THIS CATCHES**: Would catch using the count before the create.
#[test]
fn given_full_last_page_when_creating_then_jumps_to_new_page() {
    assert_eq!(last_page_after_create(0, 10), 1);
    assert_eq!(last_page_after_create(9, 10), 1);
    assert_eq!(last_page_after_create(10, 10), 2);
}

/// **VALUE**: Verifies deleting the only item on the last page steps back one page.
///
/// **WHY THIS MATTERS**: Staying on a page that no longer exists shows an empty list
/// with no way to tell what happened.
///
/// **BUG THIS CATCHES**: Would catch stepping back when deleting from an earlier page,
/// where the current page still exists.
#[test]
fn given_single_item_on_last_page_when_deleting_then_steps_back() {
    assert_eq!(page_after_delete(2, 11, 10), 1);
    assert_eq!(page_after_delete(1, 11, 10), 1);
    assert_eq!(page_after_delete(2, 12, 10), 2);
    assert_eq!(page_after_delete(1, 1, 10), 1);
}

// ============================================
// ThreadListQuery
// ============================================

/// **VALUE**: Verifies changing the tag filter resets to the first page.
///
/// **BUG THIS CATCHES**: Would catch a stale page number being sent for a smaller
/// filtered result set.
#[test]
fn given_query_on_page_three_when_tag_added_then_page_resets() {
    let mut query = ThreadListQuery::new();
    query.set_page(3).unwrap();

    query.add_tag("rust").unwrap();
    assert_eq!(query.page(), 1);
}

#[test]
fn given_tags_when_building_query_param_then_joined_with_commas() {
    let mut query = ThreadListQuery::new();
    assert_eq!(query.tags_query(), None);

    query.add_tag("a").unwrap();
    query.add_tag("b").unwrap();

    assert_eq!(query.tags_query().as_deref(), Some("a,b"));
}

/// **VALUE**: Verifies the filter stops accepting tags at the API limit.
#[test]
fn given_five_tags_when_adding_sixth_then_rejected() {
    let mut query = ThreadListQuery::new();
    for tag in ["a", "b", "c", "d", "e"] {
        query.add_tag(tag).unwrap();
    }

    assert!(query.add_tag("f").is_err());
    assert_eq!(query.tags().len(), 5);
}
