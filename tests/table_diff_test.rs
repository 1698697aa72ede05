/// 差分検出とレポート整形のテスト
///
/// このテストは、2つのインベントリの比較結果が集合として正しく分割され、
/// 辞書順・対称性・冪等性を満たし、不一致行だけが強調されることを確認します。

#[cfg(test)]
mod table_diff_tests {
    use rowtally::core::inventory::{Inventory, LabeledInventory};
    use rowtally::core::report::{
        render, PlainMarker, ABSENT_SENTINEL, DIVERGENCE_POINTER, MISSING_SECTION_TITLE,
    };
    use rowtally::core::table_diff::{compare, DiffResult};
    use std::collections::BTreeSet;

    fn inventory(counts: &[(&str, u64)]) -> Inventory {
        Inventory::from_counts(counts.iter().map(|(n, c)| (n.to_string(), *c))).unwrap()
    }

    fn labeled(a: Inventory, b: Inventory) -> [LabeledInventory; 2] {
        [
            LabeledInventory::new(None, 0, a),
            LabeledInventory::new(None, 1, b),
        ]
    }

    /// 表示された行のうち、指定したテーブルの行を取得
    fn row_for<'a>(output: &'a str, table: &str) -> &'a str {
        output
            .lines()
            .find(|line| line.trim_start().starts_with(&format!("{}:", table)))
            .unwrap_or_else(|| panic!("row for {} not found in:\n{}", table, output))
    }

    fn is_sorted(names: &[String]) -> bool {
        names.windows(2).all(|w| w[0] < w[1])
    }

    fn sample_pairs() -> Vec<(Inventory, Inventory)> {
        vec![
            (
                inventory(&[("users", 10), ("orders", 5)]),
                inventory(&[("users", 10), ("orders", 7)]),
            ),
            (inventory(&[("users", 3)]), inventory(&[("logs", 9)])),
            (
                inventory(&[("b", 1), ("a", 2), ("Z", 3), ("m", 0)]),
                inventory(&[("m", 0), ("z", 3), ("a", 2), ("c", 8)]),
            ),
            (Inventory::new(), inventory(&[("only", 1)])),
            (Inventory::new(), Inventory::new()),
        ]
    }

    /// common / only_in が和集合を互いに素に分割することを確認
    #[test]
    fn test_partition_of_union() {
        for (a, b) in sample_pairs() {
            let result = compare(&a, &b);

            let common: BTreeSet<&String> = result.common.iter().collect();
            let first: BTreeSet<&String> = result.only_in[0].iter().collect();
            let second: BTreeSet<&String> = result.only_in[1].iter().collect();

            assert!(common.is_disjoint(&first));
            assert!(common.is_disjoint(&second));
            assert!(first.is_disjoint(&second));

            let union: BTreeSet<String> = a
                .table_names()
                .chain(b.table_names())
                .map(str::to_string)
                .collect();
            let covered: BTreeSet<String> = result
                .common
                .iter()
                .chain(result.only_in[0].iter())
                .chain(result.only_in[1].iter())
                .cloned()
                .collect();
            assert_eq!(union, covered);
            assert_eq!(
                union.len(),
                result.common.len() + result.only_in[0].len() + result.only_in[1].len()
            );
        }
    }

    /// 結果が辞書順に並ぶことを確認
    #[test]
    fn test_sequences_are_sorted() {
        for (a, b) in sample_pairs() {
            let result = compare(&a, &b);
            assert!(is_sorted(&result.common));
            assert!(is_sorted(&result.only_in[0]));
            assert!(is_sorted(&result.only_in[1]));
        }
    }

    /// 引数を入れ替えると only_in が入れ替わることを確認
    #[test]
    fn test_symmetry() {
        for (a, b) in sample_pairs() {
            let forward = compare(&a, &b);
            let backward = compare(&b, &a);

            assert_eq!(forward.common, backward.common);
            assert_eq!(forward.only_in[0], backward.only_in[1]);
            assert_eq!(forward.only_in[1], backward.only_in[0]);
        }
    }

    /// 同じ入力に対して同じ結果を返すことを確認
    #[test]
    fn test_idempotence() {
        for (a, b) in sample_pairs() {
            assert_eq!(compare(&a, &b), compare(&a, &b));
        }
    }

    /// 共通テーブルは行数が異なる場合のみ強調されることを確認
    #[test]
    fn test_marks_only_differing_common_rows() {
        for (a, b) in sample_pairs() {
            let result = compare(&a, &b);
            let inventories = labeled(a.clone(), b.clone());
            let output = render(&result, &inventories, &PlainMarker);

            for table in &result.common {
                let marked = row_for(&output, table).ends_with(DIVERGENCE_POINTER);
                assert_eq!(marked, a.get(table) != b.get(table), "table {}", table);
            }
        }
    }

    /// シナリオ1: 行数の異なる共通テーブル
    #[test]
    fn test_scenario_row_count_mismatch() {
        let a = inventory(&[("users", 10), ("orders", 5)]);
        let b = inventory(&[("users", 10), ("orders", 7)]);

        let result = compare(&a, &b);
        assert_eq!(result.common, vec!["orders", "users"]);

        let output = render(&result, &labeled(a, b), &PlainMarker);
        assert!(row_for(&output, "orders").ends_with(DIVERGENCE_POINTER));
        assert!(!row_for(&output, "users").ends_with(DIVERGENCE_POINTER));
        assert!(!output.contains(MISSING_SECTION_TITLE));
    }

    /// シナリオ2: 共通テーブルが無い場合
    #[test]
    fn test_scenario_disjoint_tables() {
        let a = inventory(&[("users", 3)]);
        let b = inventory(&[("logs", 9)]);

        let result = compare(&a, &b);
        assert!(result.common.is_empty());
        assert_eq!(result.only_in[0], vec!["users"]);
        assert_eq!(result.only_in[1], vec!["logs"]);

        let output = render(&result, &labeled(a, b), &PlainMarker);
        let section_start = output.find(MISSING_SECTION_TITLE).unwrap();
        let missing_section = &output[section_start..];

        for table in ["users", "logs"] {
            let row = row_for(missing_section, table);
            assert!(row.contains(ABSENT_SENTINEL));
            assert!(row.ends_with(DIVERGENCE_POINTER));
        }
    }

    /// シナリオ3: 完全に一致する場合
    #[test]
    fn test_scenario_identical_inventories() {
        let a = inventory(&[("users", 10), ("orders", 5)]);

        let result = compare(&a, &a);
        let output = render(&result, &labeled(a.clone(), a), &PlainMarker);

        assert!(!output.contains(DIVERGENCE_POINTER));
        assert!(!output.contains(MISSING_SECTION_TITLE));
    }

    /// シナリオ4: 両方とも空の場合
    #[test]
    fn test_scenario_empty_inventories() {
        let result = compare(&Inventory::new(), &Inventory::new());
        assert_eq!(result, DiffResult::default());

        let output = render(
            &result,
            &labeled(Inventory::new(), Inventory::new()),
            &PlainMarker,
        );
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("target 1"));
        assert!(lines[0].contains("target 2"));
    }

    /// レンダリングが入力を変更しないことを確認
    #[test]
    fn test_render_does_not_mutate_inputs() {
        let a = inventory(&[("users", 3)]);
        let b = inventory(&[("users", 4), ("logs", 1)]);
        let inventories = labeled(a.clone(), b.clone());
        let result = compare(&a, &b);
        let snapshot = result.clone();

        let _ = render(&result, &inventories, &PlainMarker);

        assert_eq!(result, snapshot);
        assert_eq!(inventories[0].inventory, a);
        assert_eq!(inventories[1].inventory, b);
    }
}
