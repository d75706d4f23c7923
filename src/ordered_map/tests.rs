// ═══════════════════════════════════════════════════════════════════════
// Helpers
// ═══════════════════════════════════════════════════════════════════════
mod ordered_map_tests {
    use crate::arr;
    use crate::arr_value::ArrValue;
    use crate::error::ArrError;
    use crate::ordered_map::{ArrReadable, ArrTransform, Constructible, OrderedMap};
    use crate::types::ArrKey;

    /// `[0, 1, ..., 9]`
    fn range_ten() -> OrderedMap {
        OrderedMap::from_values(0..10usize)
    }

    /// `{test1: "test1", ..., test5: "test5"}`
    fn named_five() -> OrderedMap {
        ["test1", "test2", "test3", "test4", "test5"]
            .into_iter()
            .map(|s| (s, s))
            .collect()
    }

    fn int_values(map: &OrderedMap) -> Vec<i64> {
        map.values().map(|v| v.as_i64().unwrap()).collect()
    }

    fn keys_of(map: &OrderedMap) -> Vec<ArrKey> {
        map.keys().cloned().collect()
    }

    /// Wrapper type: derived collections must come back as `Row`.
    #[derive(Debug, Clone, PartialEq)]
    struct Row(OrderedMap);

    impl ArrReadable for Row {
        fn store(&self) -> &OrderedMap {
            &self.0
        }
    }

    impl Constructible for Row {
        fn create(map: OrderedMap) -> Self {
            Row(map)
        }
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Construction
    // ═══════════════════════════════════════════════════════════════════════

    #[test]
    fn test_construct_empty() {
        let map = OrderedMap::new();
        assert!(map.is_empty());
        assert_eq!(map.count(), 0);
        assert!(map.to_array().is_empty());
        assert_eq!(arr![], map);
    }

    #[test]
    fn test_construct_from_values() {
        let map = range_ten();
        assert_eq!(map.count(), 10);
        assert_eq!(map.length(), 10);
        assert_eq!(map.sizeof(), 10);
        assert!(map.is_indexed(true));
    }

    #[test]
    fn test_construct_from_other_instance() {
        let source = arr!["test array"];
        let copy = OrderedMap::factory(&source);
        assert_eq!(copy, source);

        let row = Row(source.clone());
        assert_eq!(OrderedMap::factory(&row), source);
    }

    #[test]
    fn test_construct_from_string_is_invalid() {
        let err = OrderedMap::try_from(ArrValue::from("teststring")).unwrap_err();
        assert!(matches!(err, ArrError::InvalidArgument(_)));

        let err = OrderedMap::try_from(serde_json::json!("teststring")).unwrap_err();
        assert!(matches!(err, ArrError::InvalidArgument(_)));
    }

    #[test]
    fn test_construct_from_map_value() {
        let value = ArrValue::Map(arr!["a" => 1]);
        let map = OrderedMap::try_from(value).unwrap();
        assert_eq!(map.get_by_key("a"), Some(&ArrValue::from(1)));
    }

    #[test]
    fn test_to_array_roundtrip() {
        let pairs = vec![
            (ArrKey::from("b"), ArrValue::from(2)),
            (ArrKey::Int(7), ArrValue::from("seven")),
            (ArrKey::from("a"), ArrValue::Null),
        ];
        let map = OrderedMap::from_pairs(pairs.clone());
        assert_eq!(map.to_array(), pairs.as_slice());
    }

    #[test]
    fn test_duplicate_key_keeps_first_position() {
        let map = arr!["a" => 1, "b" => 2, "a" => 3];
        assert_eq!(map.count(), 2);
        assert_eq!(keys_of(&map), vec![ArrKey::from("a"), ArrKey::from("b")]);
        assert_eq!(map.first(), Some(&ArrValue::from(3)));
    }

    #[test]
    fn test_iteration_is_restartable() {
        let map = arr!["x" => 1, "y" => 2];
        let first: Vec<_> = map.iter().map(|(k, _)| k.clone()).collect();
        let second: Vec<_> = (&map).into_iter().map(|(k, _)| k.clone()).collect();
        assert_eq!(first, second);
        assert_eq!(map.iter().len(), 2);
        assert_eq!(
            map.iter().rev().next().map(|(k, _)| k),
            Some(&ArrKey::from("y"))
        );
    }

    #[test]
    fn test_into_entries_keeps_order_and_key_kinds() {
        let map = arr![3 => "c", "b" => 2, 0 => "a"];
        let entries = map.clone().into_entries();
        let kinds: Vec<bool> = entries.iter().map(|(k, _)| k.is_int()).collect();
        assert_eq!(kinds, vec![true, false, true]);
        let owned: Vec<(ArrKey, ArrValue)> = map.into_iter().collect();
        assert_eq!(owned, entries);
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Shape predicates
    // ═══════════════════════════════════════════════════════════════════════

    #[test]
    fn test_is_empty_matches_count() {
        for map in [OrderedMap::new(), range_ten(), named_five(), arr![ArrValue::Null]] {
            assert_eq!(map.is_empty(), map.count() == 0);
        }
    }

    #[test]
    fn test_is_multi_dimensional() {
        assert!(!range_ten().is_multi_dimensional());
        assert!(!OrderedMap::new().is_multi_dimensional());
        assert!(arr![1, arr![2, 3]].is_multi_dimensional());
        assert!(arr!["nested" => arr![]].is_multi_dimensional());
    }

    #[test]
    fn test_is_scalar() {
        let mixed = arr![1, "two", 3.0, true];
        assert!(mixed.is_scalar(true));
        assert!(mixed.is_scalar(false));

        let with_null = arr![1, ArrValue::Null];
        assert!(with_null.is_scalar(true));
        assert!(!with_null.is_scalar(false));

        assert!(!arr![1, arr![2]].is_scalar(true));
        assert!(OrderedMap::new().is_scalar(false));
    }

    #[test]
    fn test_is_indexed_sequential() {
        assert!(arr![0 => "a", 1 => "b", 2 => "c"].is_indexed(true));
        assert!(!arr![1 => "a", 0 => "b"].is_indexed(true));
        assert!(OrderedMap::new().is_indexed(true));
        // first key must be 0
        assert!(!arr![1 => "a", 2 => "b"].is_indexed(true));
        assert!(!arr![0 => "a", 2 => "b"].is_indexed(true));
    }

    #[test]
    fn test_is_indexed_non_sequential() {
        assert!(arr![1 => "a", 0 => "b"].is_indexed(false));
        assert!(arr![5 => "a", 9 => "b"].is_indexed(false));
        assert!(!arr![-1 => "a"].is_indexed(false));
        assert!(!arr!["0" => "a"].is_indexed(false));
        assert!(!named_five().is_indexed(false));
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Index queries
    // ═══════════════════════════════════════════════════════════════════════

    #[test]
    fn test_has_index_bounds() {
        let map = range_ten();
        for index in -10..=9 {
            assert!(map.has_index(index), "index {index} should exist");
        }
        assert!(!map.has_index(10));
        assert!(!map.has_index(-11));
        assert!(!map.has_index(i64::MIN));
        assert!(!OrderedMap::new().has_index(0));
    }

    #[test]
    fn test_has_index_dynamic_argument() {
        let map = range_ten();
        assert_eq!(map.try_has_index(&ArrValue::from("3")), Ok(true));
        assert_eq!(map.try_has_index(&ArrValue::from(-10.0)), Ok(true));
        assert_eq!(map.try_has_index(&ArrValue::from(42)), Ok(false));
        assert!(matches!(
            map.try_has_index(&ArrValue::from("three")),
            Err(ArrError::InvalidArgument(_))
        ));
        assert!(map.try_has_index(&ArrValue::from(2.5)).is_err());
    }

    #[test]
    fn test_index_ignores_key_values() {
        let map = arr![10 => "ten", 20 => "twenty", 30 => "thirty"];
        assert_eq!(map.get_by_index(1), Some(&ArrValue::from("twenty")));
        assert_eq!(map.get_by_index(-3), Some(&ArrValue::from("ten")));
        assert_eq!(map.get_by_index(10), None);
        assert!(map.has_index(2));
        assert!(!map.has_index(10));
    }

    #[test]
    fn test_first_and_last() {
        let map = named_five();
        assert_eq!(map.first(), Some(&ArrValue::from("test1")));
        assert_eq!(map.last(), Some(&ArrValue::from("test5")));
        assert_eq!(OrderedMap::new().first(), None);
        assert_eq!(OrderedMap::new().last(), None);
    }

    #[test]
    fn test_try_get_by_index() {
        let map = range_ten();
        assert_eq!(
            map.try_get_by_index(&ArrValue::from("-1")).unwrap(),
            Some(&ArrValue::from(9usize))
        );
        assert!(map.try_get_by_index(&ArrValue::Null).is_err());
    }

    #[test]
    fn test_slice_of_one_matches_get_by_index() {
        let map = named_five();
        for index in -5..5 {
            assert!(map.has_index(index));
            assert_eq!(
                map.slice(index, Some(1), false).first(),
                map.get_by_index(index)
            );
        }
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Key / value queries
    // ═══════════════════════════════════════════════════════════════════════

    #[test]
    fn test_has_key_is_exact() {
        let map = arr![1 => "int", "2" => "str"];
        assert!(map.has_key(1));
        assert!(!map.has_key("1"));
        assert!(map.has_key("2"));
        assert!(!map.has_key(2));
    }

    #[test]
    fn test_get_by_key_missing_is_none() {
        let map = named_five();
        assert_eq!(map.get_by_key("test3"), Some(&ArrValue::from("test3")));
        assert_eq!(map.get_by_key("nope"), None);
        assert_eq!(OrderedMap::new().get_by_key(0), None);
    }

    #[test]
    fn test_has_value_loose_and_strict() {
        let map = arr!["a" => 1, "b" => "2", "c" => ArrValue::Null];
        assert!(map.has_value(&ArrValue::from("1"), false));
        assert!(!map.has_value(&ArrValue::from("1"), true));
        assert!(map.has_value(&ArrValue::from(2), false));
        assert!(!map.has_value(&ArrValue::from(2), true));
        assert!(map.has_value(&ArrValue::Null, true));
        assert!(!map.has_value(&ArrValue::from("missing"), false));
    }

    #[test]
    fn test_get_key_from_value() {
        let map = arr![0 => "zero", "k" => 5, 7 => 5];
        assert_eq!(
            map.get_key_from_value(&ArrValue::from("zero"), true),
            Some(&ArrKey::Int(0))
        );
        assert_eq!(
            map.get_key_from_value(&ArrValue::from(5), true),
            Some(&ArrKey::from("k"))
        );
        assert_eq!(
            map.get_key_from_value(&ArrValue::from("5"), false),
            Some(&ArrKey::from("k"))
        );
        assert_eq!(map.get_key_from_value(&ArrValue::from("5"), true), None);
        assert_eq!(map.get_key_from_value(&ArrValue::from(false), true), None);
    }

    #[test]
    fn test_get_index_from_value() {
        let map = arr![10 => "a", 20 => "b", 30 => "b"];
        assert_eq!(map.get_index_from_value(&ArrValue::from("a"), false), Some(0));
        assert_eq!(map.get_index_from_value(&ArrValue::from("b"), true), Some(1));
        assert_eq!(map.get_index_from_value(&ArrValue::from("c"), false), None);
    }

    #[test]
    fn test_value_lookup_in_nested_maps() {
        let map = arr!["row" => arr![1, 2]];
        assert!(map.has_value(&ArrValue::Map(arr![1, 2]), true));
        assert!(map.has_value(&ArrValue::Map(arr![1 => 2, 0 => 1]), false));
        assert!(!map.has_value(&ArrValue::Map(arr![1 => 2, 0 => 1]), true));
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Views
    // ═══════════════════════════════════════════════════════════════════════

    #[test]
    fn test_get_indexes() {
        let map = named_five();
        let indexes = map.get_indexes();
        assert_eq!(int_values(&indexes), vec![0, 1, 2, 3, 4]);
        assert!(indexes.is_indexed(true));
        assert!(OrderedMap::new().get_indexes().is_empty());
    }

    #[test]
    fn test_get_keys_and_values() {
        let map = arr!["a" => 1, 5 => "five", "c" => ArrValue::Null];
        let keys = map.get_keys();
        assert_eq!(keys, arr!["a", 5, "c"]);
        assert!(keys.is_indexed(true));

        let values = map.get_values();
        assert_eq!(values, arr![1, "five", ArrValue::Null]);
        assert!(values.is_indexed(true));
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Slicing
    // ═══════════════════════════════════════════════════════════════════════

    #[test]
    fn test_slice_no_length() {
        let map = range_ten();
        assert_eq!(int_values(&map.slice(5, None, false)), vec![5, 6, 7, 8, 9]);

        let named = named_five();
        assert_eq!(
            named.slice(3, None, true),
            arr!["test4" => "test4", "test5" => "test5"]
        );
    }

    #[test]
    fn test_slice_with_length() {
        let map = range_ten();
        assert_eq!(int_values(&map.slice(5, Some(1), false)), vec![5]);
        assert_eq!(int_values(&map.slice(4, Some(2), false)), vec![4, 5]);
        assert_eq!(int_values(&map.slice(8, Some(100), false)), vec![8, 9]);
        assert!(map.slice(3, Some(0), false).is_empty());

        let named = named_five();
        assert_eq!(named.slice(3, Some(1), true), arr!["test4" => "test4"]);
        assert_eq!(
            named.slice(3, Some(2), true),
            arr!["test4" => "test4", "test5" => "test5"]
        );
    }

    #[test]
    fn test_slice_negative_index_preserving_keys() {
        let named = named_five();
        assert_eq!(named.slice(-1, None, true), arr!["test5" => "test5"]);
        assert_eq!(
            named.slice(-2, None, true),
            arr!["test4" => "test4", "test5" => "test5"]
        );
        assert_eq!(named.slice(-5, Some(1), true), arr!["test1" => "test1"]);
    }

    #[test]
    fn test_slice_resets_keys_unless_preserved() {
        let map = arr![10 => "a", "k" => "b", 30 => "c"];
        let reset = map.slice(1, None, false);
        assert_eq!(reset, arr!["b", "c"]);
        let kept = map.slice(1, None, true);
        assert_eq!(kept, arr!["k" => "b", 30 => "c"]);
    }

    #[test]
    fn test_slice_out_of_range_is_empty() {
        let map = range_ten();
        assert!(map.slice(10, None, false).is_empty());
        assert!(map.slice(-11, Some(3), false).is_empty());
        assert!(OrderedMap::new().slice(0, None, false).is_empty());
    }

    #[test]
    fn test_slice_does_not_mutate_source() {
        let map = named_five();
        let before = map.clone();
        let _ = map.slice(1, Some(2), false);
        let _ = map.chunk(2, true);
        let _ = map.get_values();
        assert_eq!(map, before);
    }

    #[test]
    fn test_try_slice_coerces_arguments() {
        let map = range_ten();
        let sliced = map
            .try_slice(&ArrValue::from("4"), &ArrValue::from("2"), false)
            .unwrap();
        assert_eq!(int_values(&sliced), vec![4, 5]);

        let to_end = map.try_slice(&ArrValue::from(7), &ArrValue::Null, false).unwrap();
        assert_eq!(int_values(&to_end), vec![7, 8, 9]);

        assert!(matches!(
            map.try_slice(&ArrValue::from("x"), &ArrValue::Null, false),
            Err(ArrError::InvalidArgument(_))
        ));
        assert!(matches!(
            map.try_slice(&ArrValue::from(0), &ArrValue::from(-1), false),
            Err(ArrError::InvalidArgument(_))
        ));
        assert!(map
            .try_slice(&ArrValue::from(3), &ArrValue::from(1.1), false)
            .is_err());
    }

    #[test]
    fn test_slice_first_and_last() {
        let named = named_five();
        assert_eq!(named.slice_first(true), arr!["test1" => "test1"]);
        assert_eq!(named.slice_last(true), arr!["test5" => "test5"]);
        assert_eq!(named.slice_last(false), arr!["test5"]);
        assert!(OrderedMap::new().slice_first(false).is_empty());
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Chunking
    // ═══════════════════════════════════════════════════════════════════════

    #[test]
    fn test_chunk_fixed_size() {
        let chunks = range_ten().chunk(4, false).unwrap().unwrap();
        let groups: Vec<Vec<i64>> = chunks.iter().map(int_values).collect();
        assert_eq!(groups, vec![vec![0, 1, 2, 3], vec![4, 5, 6, 7], vec![8, 9]]);
        assert!(chunks.iter().all(|c| c.is_indexed(true)));
    }

    #[test]
    fn test_chunk_preserves_keys() {
        let chunks = named_five().chunk(2, true).unwrap().unwrap();
        assert_eq!(chunks.len(), 3);
        assert_eq!(keys_of(&chunks[1]), vec![ArrKey::from("test3"), ArrKey::from("test4")]);
        assert_eq!(chunks[2], arr!["test5" => "test5"]);

        let reset = named_five().chunk(2, false).unwrap().unwrap();
        assert_eq!(reset[1], arr!["test3", "test4"]);
    }

    #[test]
    fn test_chunk_empty_returns_no_chunks() {
        assert_eq!(OrderedMap::new().chunk(5, false), Ok(None));
    }

    #[test]
    fn test_chunk_rejects_zero_length() {
        assert!(matches!(
            range_ten().chunk(0, false),
            Err(ArrError::InvalidArgument(_))
        ));
        assert!(matches!(
            OrderedMap::new().chunk(0, false),
            Err(ArrError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_try_chunk_arguments() {
        let map = range_ten();
        assert_eq!(map.try_chunk(&ArrValue::from("5"), false).unwrap().unwrap().len(), 2);
        assert!(map.try_chunk(&ArrValue::from(-2), false).is_err());
        assert!(map.try_chunk(&ArrValue::from(2.5), false).is_err());
        assert!(map.try_chunk(&ArrValue::from("abc"), false).is_err());
    }

    #[test]
    fn test_chunk_columns_distributes_remainder() {
        let columns = range_ten().chunk_columns(3, false).unwrap().unwrap();
        let groups: Vec<Vec<i64>> = columns.iter().map(int_values).collect();
        assert_eq!(groups, vec![vec![0, 1, 2, 3], vec![4, 5, 6], vec![7, 8, 9]]);
    }

    #[test]
    fn test_chunk_columns_more_columns_than_entries() {
        let columns = arr!["a", "b"].chunk_columns(10, false).unwrap().unwrap();
        assert_eq!(columns.len(), 10);
        assert_eq!(columns[0], arr!["a"]);
        assert_eq!(columns[1], arr!["b"]);
        assert!(columns[2..].iter().all(ArrReadable::is_empty));
    }

    #[test]
    fn test_chunk_columns_sizes_differ_by_at_most_one() {
        for n in 1..25usize {
            let map = OrderedMap::from_values(0..n);
            for columns in 1..8usize {
                let groups = map.chunk_columns(columns, false).unwrap().unwrap();
                assert_eq!(groups.len(), columns);
                let sizes: Vec<usize> = groups.iter().map(ArrReadable::count).collect();
                let max = *sizes.iter().max().unwrap();
                let min = *sizes.iter().min().unwrap();
                assert!(max - min <= 1, "n={n} columns={columns} sizes={sizes:?}");
                assert!(sizes.windows(2).all(|w| w[0] >= w[1]));

                let flattened: Vec<i64> = groups.iter().flat_map(int_values).collect();
                assert_eq!(flattened, (0..n as i64).collect::<Vec<_>>());
            }
        }
    }

    #[test]
    fn test_chunk_columns_preserves_keys() {
        let columns = named_five().chunk_columns(2, true).unwrap().unwrap();
        assert_eq!(
            columns[0],
            arr!["test1" => "test1", "test2" => "test2", "test3" => "test3"]
        );
        assert_eq!(columns[1], arr!["test4" => "test4", "test5" => "test5"]);
    }

    #[test]
    fn test_chunk_columns_empty_and_invalid() {
        assert_eq!(OrderedMap::new().chunk_columns(3, false), Ok(None));
        assert!(matches!(
            range_ten().chunk_columns(0, false),
            Err(ArrError::InvalidArgument(_))
        ));
        assert!(range_ten()
            .try_chunk_columns(&ArrValue::from(0), false)
            .is_err());
        assert_eq!(
            range_ten()
                .try_chunk_columns(&ArrValue::from("4"), false)
                .unwrap()
                .unwrap()
                .len(),
            4
        );
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Creation hook
    // ═══════════════════════════════════════════════════════════════════════

    #[test]
    fn test_wrapper_type_gets_its_own_type_back() {
        let row = Row(named_five());
        let sliced: Row = row.slice(-2, None, true);
        assert_eq!(sliced, Row(arr!["test4" => "test4", "test5" => "test5"]));

        let chunks: Vec<Row> = row.chunk_columns(2, false).unwrap().unwrap();
        assert_eq!(chunks[1], Row(arr!["test4", "test5"]));

        let keys: Row = row.get_keys();
        assert_eq!(keys.first(), Some(&ArrValue::from("test1")));
        assert_eq!(row.last(), Some(&ArrValue::from("test5")));
    }
}
