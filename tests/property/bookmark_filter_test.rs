//! Property-based tests for bookmark text filtering.
//!
//! `filter` keeps exactly the bookmarks whose title or description contains
//! the term case-insensitively, in input order; an empty term keeps all.

use linkdeck::managers::bookmark_collection::filter;
use linkdeck::types::bookmark::Bookmark;
use proptest::prelude::*;

fn arb_text() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        "[A-Za-z ]{1,24}",
        "(Rust|rust|RUST|go|Docs) [a-z]{0,8}",
    ]
}

fn arb_bookmarks() -> impl Strategy<Value = Vec<Bookmark>> {
    proptest::collection::vec((arb_text(), arb_text()), 0..12).prop_map(|pairs| {
        pairs
            .into_iter()
            .enumerate()
            .map(|(i, (title, description))| Bookmark {
                id: i as i64 + 1,
                title,
                url: format!("https://rust{}.example", i),
                description,
                owner_id: 1,
                folder_id: None,
            })
            .collect()
    })
}

fn arb_term() -> impl Strategy<Value = String> {
    prop_oneof!["[A-Za-z]{1,4}", Just("rust".to_string()), Just("RuSt".to_string())]
}

fn matches(bookmark: &Bookmark, term: &str) -> bool {
    let term = term.to_lowercase();
    bookmark.title.to_lowercase().contains(&term)
        || bookmark.description.to_lowercase().contains(&term)
}

// **Filter keeps exactly the matching records**
//
// *For any* list and non-empty term, every returned bookmark matches, every
// matching bookmark is returned, and relative order is preserved.
proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn filter_is_sound_and_complete(list in arb_bookmarks(), term in arb_term()) {
        let result = filter(&list, &term);

        let expected: Vec<i64> = list.iter().filter(|b| matches(b, &term)).map(|b| b.id).collect();
        let actual: Vec<i64> = result.iter().map(|b| b.id).collect();
        prop_assert_eq!(actual, expected);
    }

    #[test]
    fn empty_term_returns_everything_in_order(list in arb_bookmarks()) {
        let result = filter(&list, "");

        prop_assert_eq!(result.len(), list.len());
        for (got, want) in result.iter().zip(list.iter()) {
            prop_assert_eq!(*got, want);
        }
    }

    #[test]
    fn filter_ignores_case_of_term(list in arb_bookmarks(), term in arb_term()) {
        let lower: Vec<i64> = filter(&list, &term.to_lowercase()).iter().map(|b| b.id).collect();
        let upper: Vec<i64> = filter(&list, &term.to_uppercase()).iter().map(|b| b.id).collect();
        prop_assert_eq!(lower, upper);
    }

    #[test]
    fn bookmark_without_description_filters_on_title_only(title in arb_text(), term in arb_term()) {
        let bookmark = Bookmark {
            id: 1,
            title: title.clone(),
            url: format!("https://{}.example", term),
            description: String::new(),
            owner_id: 1,
            folder_id: None,
        };
        let list = vec![bookmark];

        let hit = !filter(&list, &term).is_empty();
        prop_assert_eq!(hit, title.to_lowercase().contains(&term.to_lowercase()));
    }
}
