//! Pagination window tests.

use lostfound_client::{PageLink, Pagination};

fn page(number: u32, active: bool) -> PageLink {
    PageLink::Page { number, active }
}

#[test]
fn middle_page_shows_both_ellipses() {
    let p = Pagination::new(5, 10);
    assert_eq!(
        p.links,
        vec![
            PageLink::Previous {
                target: 4,
                enabled: true
            },
            page(1, false),
            PageLink::Ellipsis,
            page(3, false),
            page(4, false),
            page(5, true),
            page(6, false),
            page(7, false),
            PageLink::Ellipsis,
            page(10, false),
            PageLink::Next {
                target: 6,
                enabled: true
            },
        ]
    );
    assert!(p.previous_enabled());
    assert!(p.next_enabled());
}

#[test]
fn last_page_disables_next() {
    let p = Pagination::new(10, 10);
    assert_eq!(p.page_numbers(), vec![1, 8, 9, 10]);
    assert!(p.previous_enabled());
    assert!(!p.next_enabled());
    assert_eq!(p.links[2], PageLink::Ellipsis);
}

#[test]
fn near_end_window_has_no_trailing_ellipsis() {
    let p = Pagination::new(7, 9);
    assert_eq!(p.page_numbers(), vec![1, 5, 6, 7, 8, 9]);
    let ellipses = p.links.iter().filter(|l| **l == PageLink::Ellipsis).count();
    assert_eq!(ellipses, 1);
}

#[test]
fn out_of_range_current_is_clamped() {
    let p = Pagination::new(42, 3);
    assert_eq!(p.current, 3);
    assert!(!p.next_enabled());
}

#[test]
fn huge_page_numbers_do_not_overflow() {
    let p = Pagination::new(u32::MAX, u32::MAX);
    assert_eq!(
        p.page_numbers(),
        vec![1, u32::MAX - 2, u32::MAX - 1, u32::MAX]
    );
    assert!(!p.next_enabled());
    assert_eq!(
        p.links.last(),
        Some(&PageLink::Next {
            target: u32::MAX,
            enabled: false
        })
    );
}
