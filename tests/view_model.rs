use ffstat_terminal::provider::seed_stats;
use ffstat_terminal::stats::{
    PAGE_SIZE, PlayerStatRecord, SortDirection, SortSpec, StatField, filter_records, page_count,
    paginate, sort_records,
};

fn sample() -> Vec<PlayerStatRecord> {
    let mut records = seed_stats(95, 11);
    // A couple of rows with holes, to exercise missing-as-zero ordering.
    records[3].set(StatField::RushingYards, None);
    records[40].set(StatField::FantasyPpr, None);
    records
}

#[test]
fn descending_sort_is_non_increasing_for_every_field() {
    let records = sample();
    for field in StatField::ALL {
        let sorted = sort_records(
            &records,
            SortSpec {
                field,
                direction: SortDirection::Desc,
            },
        );
        assert_eq!(sorted.len(), records.len());
        for pair in sorted.windows(2) {
            assert!(
                pair[0].value_or_zero(field) >= pair[1].value_or_zero(field),
                "{} not descending",
                field.label()
            );
        }
    }
}

#[test]
fn ascending_sort_is_non_decreasing_for_every_field() {
    let records = sample();
    for field in StatField::ALL {
        let sorted = sort_records(
            &records,
            SortSpec {
                field,
                direction: SortDirection::Asc,
            },
        );
        for pair in sorted.windows(2) {
            assert!(
                pair[0].value_or_zero(field) <= pair[1].value_or_zero(field),
                "{} not ascending",
                field.label()
            );
        }
    }
}

#[test]
fn sorting_leaves_source_untouched() {
    let records = sample();
    let before = records.clone();
    let _ = sort_records(
        &records,
        SortSpec {
            field: StatField::Fumbles,
            direction: SortDirection::Asc,
        },
    );
    assert_eq!(records, before);
}

#[test]
fn filter_is_case_insensitive_substring() {
    let records = vec![
        PlayerStatRecord::named("Tyreek Hill"),
        PlayerStatRecord::named("Taysom HILL"),
        PlayerStatRecord::named("Josh Allen"),
        PlayerStatRecord::named("Hillary Example"),
    ];
    let all: Vec<&PlayerStatRecord> = records.iter().collect();

    let hits = filter_records(&all, "hIlL");
    let names: Vec<&str> = hits.iter().map(|r| r.player.as_str()).collect();
    assert_eq!(names, ["Tyreek Hill", "Taysom HILL", "Hillary Example"]);

    assert_eq!(filter_records(&all, "").len(), 4);
    assert!(filter_records(&all, "zzz").is_empty());
}

#[test]
fn filter_only_returns_matching_names() {
    let records = sample();
    let sorted = sort_records(&records, SortSpec::default());
    for term in ["jo", "ALLEN", "st. b", "a"] {
        let needle = term.to_lowercase();
        for r in filter_records(&sorted, term) {
            assert!(r.player.to_lowercase().contains(&needle));
        }
    }
}

#[test]
fn pages_hold_at_most_page_size_and_cover_everything() {
    let records = sample();
    let sorted = sort_records(&records, SortSpec::default());
    let pages = page_count(sorted.len());
    assert_eq!(pages, 4);

    let mut seen = 0;
    for page in 1..=pages {
        let window = paginate(&sorted, page);
        assert!(window.len() <= PAGE_SIZE);
        assert!(!window.is_empty());
        seen += window.len();
    }
    assert_eq!(seen, sorted.len());
    assert_eq!(paginate(&sorted, pages).len(), 95 - 3 * PAGE_SIZE);
    assert!(paginate(&sorted, pages + 1).is_empty());
}
