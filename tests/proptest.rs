//! Property-based tests for field encodings and the search pipeline.

mod common;

use std::cmp::Ordering;
use std::ops::Bound;
use chrono::{DateTime, Utc};
use common::Person;
use findit::fields::date::{encode_date, DateField, Granularity};
use findit::fields::number::{encode_number, NumField};
use findit::fields::partial::PartialField;
use findit::fields::text::TextField;
use findit::{Field, FieldValue, Index, Number, SearchQuery};
use proptest::prelude::*;

// ============================================================================
// Test helpers
// ============================================================================

fn number_strategy() -> impl Strategy<Value = Number> {
    prop_oneof![
        any::<i64>().prop_map(Number::Int),
        any::<u64>().prop_map(Number::UInt),
        any::<f64>().prop_filter("NaN has no order", |v| !v.is_nan()).prop_map(Number::Float),
    ]
}

/// Years 1900..2100
fn date_strategy() -> impl Strategy<Value = DateTime<Utc>> {
    (-2_208_988_800i64..4_102_444_800i64)
        .prop_map(|secs| DateTime::from_timestamp(secs, 0).unwrap_or_default())
}

/// Exact comparison, including floats against integers beyond 2^53
fn exact_cmp(a: Number, b: Number) -> Ordering {
    fn integer(n: Number) -> Option<i128> {
        match n {
            Number::Int(v) => Some(v as i128),
            Number::UInt(v) => Some(v as i128),
            Number::Float(_) => None,
        }
    }

    fn float_vs_int(f: f64, i: i128) -> Ordering {
        const LIMIT: f64 = 1e30;
        if f >= LIMIT {
            return Ordering::Greater;
        }
        if f <= -LIMIT {
            return Ordering::Less;
        }
        let whole = f.trunc();
        match (whole as i128).cmp(&i) {
            Ordering::Equal => f.partial_cmp(&whole).unwrap_or(Ordering::Equal),
            other => other,
        }
    }

    match (integer(a), integer(b)) {
        (Some(x), Some(y)) => x.cmp(&y),
        (None, Some(y)) => float_vs_int(a.as_f64(), y),
        (Some(x), None) => float_vs_int(b.as_f64(), x).reverse(),
        (None, None) => a.as_f64().partial_cmp(&b.as_f64()).unwrap_or(Ordering::Equal),
    }
}

fn processed_number(n: Number) -> NumField {
    let mut field = NumField::new();
    field.process(&FieldValue::Number(n)).unwrap();
    field
}

fn ages_index(ages: &[i64]) -> Index<Person> {
    let index = Index::<Person>::new().unwrap();
    for (i, age) in ages.iter().enumerate() {
        index.put(&i.to_string(), Person::new(&format!("{i:03}"), *age)).unwrap();
    }
    index
}

// ============================================================================
// Property tests
// ============================================================================

proptest! {
    /// A processed number is found by its own search bytes.
    #[test]
    fn number_round_trip(n in number_strategy()) {
        let field = processed_number(n);
        let bytes = field.to_search_bytes(&FieldValue::Number(n)).unwrap();
        prop_assert!(field.search(&bytes).unwrap());
    }

    /// Text and partial fields find their own value regardless of case.
    #[test]
    fn text_round_trip(s in "[a-zA-Z0-9 ]{0,24}") {
        let mut text = TextField::new();
        text.process(&FieldValue::from(s.as_str())).unwrap();
        let upper = text.to_search_bytes(&FieldValue::from(s.to_uppercase())).unwrap();
        prop_assert!(text.search(&upper).unwrap());

        let mut partial = PartialField::new();
        partial.process(&FieldValue::from(s.as_str())).unwrap();
        let bytes = partial.to_search_bytes(&FieldValue::from(s.as_str())).unwrap();
        prop_assert!(partial.search(&bytes).unwrap());
    }

    /// Dates are found by any instant in the same bucket.
    #[test]
    fn date_round_trip(date in date_strategy()) {
        let mut field = DateField::with_granularity(Granularity::Hour);
        field.process(&FieldValue::Date(date)).unwrap();
        let bytes = field.to_search_bytes(&FieldValue::Date(Granularity::Hour.truncate(date))).unwrap();
        prop_assert!(field.search(&bytes).unwrap());
    }

    /// Byte order of encodings equals numeric order, across widths.
    #[test]
    fn number_encoding_preserves_order(a in number_strategy(), b in number_strategy()) {
        let ea = encode_number(a).unwrap();
        let eb = encode_number(b).unwrap();
        prop_assert_eq!(ea.cmp(&eb), exact_cmp(a, b), "{:?} vs {:?}", a, b);
    }

    /// Date encodings order like the truncated instants.
    #[test]
    fn date_encoding_preserves_order(a in date_strategy(), b in date_strategy()) {
        let g = Granularity::Day;
        prop_assert_eq!(encode_date(a, g).cmp(&encode_date(b, g)), g.truncate(a).cmp(&g.truncate(b)));
    }

    /// A value inside [a, c] matches; a range starting above it does not.
    #[test]
    fn range_monotonicity(mut values in prop::array::uniform3(any::<i64>())) {
        values.sort();
        let [a, b, c] = values;
        let field = processed_number(Number::Int(b));

        let lo = encode_number(Number::Int(a)).unwrap();
        let hi = encode_number(Number::Int(c)).unwrap();
        prop_assert!(field.search_range(Bound::Included(lo.as_slice()), Bound::Included(hi.as_slice())).unwrap());

        if b < i64::MAX {
            let above = encode_number(Number::Int(b + 1)).unwrap();
            let top = encode_number(Number::Int(i64::MAX)).unwrap();
            prop_assert!(!field.search_range(Bound::Included(above.as_slice()), Bound::Included(top.as_slice())).unwrap());
        }
    }

    /// Same for dates: a day inside [a, c] matches; ranges after it do not.
    #[test]
    fn date_range_monotonicity(
        a in date_strategy(),
        b in date_strategy(),
        c in date_strategy(),
    ) {
        let g = Granularity::Day;
        let mut dates = [a, b, c];
        dates.sort();
        let [a, b, c] = dates;

        let mut field = DateField::with_granularity(g);
        field.process(&FieldValue::Date(b)).unwrap();

        let lo = encode_date(a, g);
        let hi = encode_date(c, g);
        prop_assert!(field.search_range(Bound::Included(lo.as_slice()), Bound::Included(hi.as_slice())).unwrap());

        let next_day = g.truncate(b) + chrono::Duration::days(1);
        let above = encode_date(next_day, g);
        let top = encode_date(next_day + chrono::Duration::days(36_500), g);
        prop_assert!(!field.search_range(Bound::Included(above.as_slice()), Bound::Included(top.as_slice())).unwrap());
    }

    /// len(search(skip, limit)) == min(limit, max(0, total - skip)).
    #[test]
    fn pagination_invariant(
        ages in prop::collection::vec(1i64..60, 0..40),
        skip in 0usize..50,
        limit in 1usize..50,
        low in 1i64..60,
    ) {
        let index = ages_index(&ages);
        let total = ages.iter().filter(|age| **age >= low).count();
        let query = SearchQuery::new()
            .range("age", low, findit::FieldValue::Null)
            .skip(skip)
            .limit(limit);

        let results = index.search_results(&query).unwrap();
        prop_assert_eq!(results.total_hits, total);
        prop_assert_eq!(results.len(), limit.min(total.saturating_sub(skip)));
    }

    /// Equal sort keys keep insertion order in both directions.
    #[test]
    fn sort_is_stable(ages in prop::collection::vec(1i64..4, 0..30), desc in any::<bool>()) {
        let index = ages_index(&ages);
        let mut query = SearchQuery::new().range("age", 1, 10).sort_by("age").limit(100);
        query = if desc { query.desc() } else { query.asc() };

        let results = index.search(&query).unwrap();
        prop_assert_eq!(results.len(), ages.len());
        for pair in results.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            if a.age == b.age {
                prop_assert!(a.name < b.name, "{} before {}", a.name, b.name);
            } else if desc {
                prop_assert!(a.age > b.age);
            } else {
                prop_assert!(a.age < b.age);
            }
        }
    }
}
