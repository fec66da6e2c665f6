//! Unit tests for ledger operations.

use super::*;

fn ledger_with(items: Vec<Item>) -> Ledger {
    Ledger::from_items(items, Thresholds::default())
}

fn flavor(name: &str, reserve: u32, stock: Stock) -> Item {
    Item::new(name, reserve, stock)
}

mod promote_tests {
    use super::*;

    #[test]
    fn moves_one_tub_from_reserve_to_stock() {
        let mut ledger = ledger_with(vec![flavor("VANILLA", 2, Stock::default())]);
        let item = ledger.promote(0).unwrap();
        assert_eq!(item.reserve(), 1);
        assert_eq!(item.stock(), Stock::whole_tubs(1));
    }

    #[test]
    fn keeps_open_tub_open() {
        let mut ledger = ledger_with(vec![flavor("VANILLA", 1, Stock::new(0, true))]);
        let item = ledger.promote(0).unwrap();
        assert_eq!(item.stock(), Stock::new(1, true));
    }

    #[test]
    fn rejects_empty_reserve() {
        let mut ledger = ledger_with(vec![flavor("VANILLA", 0, Stock::whole_tubs(2))]);
        let err = ledger.promote(0).unwrap_err();
        assert!(matches!(err, LedgerError::InvalidPrecondition { .. }));
        assert_eq!(ledger.get(0).unwrap().stock(), Stock::whole_tubs(2));
    }

    #[test]
    fn rejects_unknown_position() {
        let mut ledger = ledger_with(vec![flavor("VANILLA", 1, Stock::default())]);
        let err = ledger.promote(5).unwrap_err();
        assert!(matches!(err, LedgerError::InvalidInput(_)));
    }
}

mod scoop_and_toss_tests {
    use super::*;

    #[test]
    fn scoop_opens_a_whole_tub() {
        let mut ledger = ledger_with(vec![flavor("MANGO", 1, Stock::whole_tubs(2))]);
        let item = ledger.scoop(0).unwrap();
        assert_eq!(item.stock(), Stock::new(1, true));
        assert_eq!(item.stock().as_f64(), 1.5);
    }

    #[test]
    fn scoop_rejected_when_already_scooped() {
        let mut ledger = ledger_with(vec![flavor("MANGO", 1, Stock::new(1, true))]);
        let before = ledger.clone();
        let err = ledger.scoop(0).unwrap_err();
        assert!(matches!(err, LedgerError::InvalidPrecondition { .. }));
        assert_eq!(ledger, before);
    }

    #[test]
    fn scoop_rejected_without_whole_tub() {
        let mut ledger = ledger_with(vec![flavor("MANGO", 3, Stock::default())]);
        let err = ledger.scoop(0).unwrap_err();
        assert!(matches!(err, LedgerError::InvalidPrecondition { .. }));
        assert_eq!(ledger.get(0).unwrap().stock(), Stock::default());
    }

    #[test]
    fn toss_discards_open_tub() {
        let mut ledger = ledger_with(vec![flavor("MANGO", 1, Stock::new(2, true))]);
        let item = ledger.toss(0).unwrap();
        assert_eq!(item.stock(), Stock::whole_tubs(2));
        assert_eq!(item.tossed(), 0.5);
    }

    #[test]
    fn toss_accumulates() {
        let mut ledger = ledger_with(vec![flavor("MANGO", 0, Stock::whole_tubs(2))]);
        ledger.scoop(0).unwrap();
        ledger.toss(0).unwrap();
        ledger.scoop(0).unwrap();
        ledger.toss(0).unwrap();
        let item = ledger.get(0).unwrap();
        assert_eq!(item.tossed(), 1.0);
        assert!(item.stock().is_empty());
    }

    #[test]
    fn toss_rejected_without_open_tub() {
        let mut ledger = ledger_with(vec![flavor("MANGO", 1, Stock::whole_tubs(1))]);
        let err = ledger.toss(0).unwrap_err();
        assert!(matches!(err, LedgerError::InvalidPrecondition { .. }));
        assert_eq!(ledger.get(0).unwrap().tossed_halves(), 0);
    }

    #[test]
    fn tap_scoops_when_nothing_open() {
        let mut ledger = ledger_with(vec![flavor("MANGO", 1, Stock::whole_tubs(1))]);
        assert_eq!(ledger.tap_stock(0).unwrap(), StockTap::Scooped);
        assert_eq!(ledger.get(0).unwrap().stock(), Stock::new(0, true));
    }

    #[test]
    fn tap_asks_for_toss_when_open() {
        let mut ledger = ledger_with(vec![flavor("MANGO", 1, Stock::new(1, true))]);
        let before = ledger.clone();
        assert_eq!(ledger.tap_stock(0).unwrap(), StockTap::TossPending);
        assert_eq!(ledger, before);
    }

    #[test]
    fn tap_on_empty_stock_is_rejected() {
        let mut ledger = ledger_with(vec![flavor("MANGO", 1, Stock::default())]);
        assert!(ledger.tap_stock(0).is_err());
    }
}

mod delivery_and_threshold_tests {
    use super::*;

    #[test]
    fn delivery_adds_to_reserve() {
        let mut ledger = ledger_with(vec![flavor("PISTACHIO", 0, Stock::default())]);
        assert_eq!(ledger.record_delivery(0, 5).unwrap().reserve(), 5);
        assert_eq!(ledger.record_delivery(0, 0).unwrap().reserve(), 5);
    }

    #[test]
    fn negative_delivery_is_rejected() {
        let mut ledger = ledger_with(vec![flavor("PISTACHIO", 2, Stock::default())]);
        let err = ledger.record_delivery(0, -1).unwrap_err();
        assert!(matches!(err, LedgerError::InvalidInput(_)));
        assert_eq!(ledger.get(0).unwrap().reserve(), 2);
    }

    #[test]
    fn overflowing_delivery_is_rejected() {
        let mut ledger = ledger_with(vec![flavor("PISTACHIO", u32::MAX, Stock::default())]);
        assert!(ledger.record_delivery(0, 1).is_err());
        assert_eq!(ledger.get(0).unwrap().reserve(), u32::MAX);
    }

    #[test]
    fn thresholds_are_replaced_without_validation() {
        let mut ledger = ledger_with(vec![flavor("PISTACHIO", 2, Stock::default())]);
        let item = ledger.update_thresholds(0, 9, 3).unwrap();
        assert_eq!(item.low(), 9);
        assert_eq!(item.high(), 3);
    }
}

mod create_item_tests {
    use super::*;

    #[test]
    fn appends_with_defaults() {
        let mut ledger = Ledger::new(Thresholds { low: 2, high: 5 });
        let index = ledger.create_item("  cookie dough ", 3, 1).unwrap();
        assert_eq!(index, 0);

        let item = ledger.get(0).unwrap();
        assert_eq!(item.name(), "COOKIE DOUGH");
        assert_eq!(item.reserve(), 3);
        assert_eq!(item.stock(), Stock::whole_tubs(1));
        assert_eq!(item.tossed_halves(), 0);
        assert_eq!(item.low(), 2);
        assert_eq!(item.high(), 5);
    }

    #[test]
    fn empty_name_is_rejected() {
        let mut ledger = ledger_with(vec![flavor("VANILLA", 1, Stock::default())]);
        let err = ledger.create_item("   ", 1, 1).unwrap_err();
        assert!(matches!(err, LedgerError::InvalidInput(_)));
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn negative_quantities_are_rejected() {
        let mut ledger = Ledger::default();
        assert!(ledger.create_item("MINT", -1, 0).is_err());
        assert!(ledger.create_item("MINT", 0, -2).is_err());
        assert!(ledger.is_empty());
    }

    #[test]
    fn position_of_ignores_case() {
        let mut ledger = Ledger::default();
        ledger.create_item("mint", 0, 0).unwrap();
        ledger.create_item("mango", 0, 0).unwrap();
        assert_eq!(ledger.position_of("Mango"), Some(1));
        assert_eq!(ledger.position_of("lemon"), None);
    }
}

mod query_tests {
    use super::*;

    fn names<'a>(entries: &[(usize, &'a Item)]) -> Vec<&'a str> {
        entries.iter().map(|&(_, item)| item.name()).collect()
    }

    #[test]
    fn display_order_is_stable_partition() {
        let ledger = ledger_with(vec![
            flavor("A", 1, Stock::default()),
            flavor("B", 1, Stock::whole_tubs(2)),
            flavor("C", 1, Stock::default()),
            flavor("D", 1, Stock::whole_tubs(1)),
        ]);
        let order = ledger.display_order();
        assert_eq!(names(&order), vec!["B", "D", "A", "C"]);
        let positions: Vec<usize> = order.iter().map(|(i, _)| *i).collect();
        assert_eq!(positions, vec![1, 3, 0, 2]);
    }

    #[test]
    fn half_tub_counts_as_stocked() {
        let ledger = ledger_with(vec![
            flavor("A", 1, Stock::default()),
            flavor("B", 1, Stock::new(0, true)),
        ]);
        assert_eq!(names(&ledger.display_order()), vec!["B", "A"]);
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        let ledger = ledger_with(vec![
            flavor("MINT CHIP", 1, Stock::default()),
            flavor("VANILLA", 1, Stock::default()),
            flavor("CHOC CHIP", 1, Stock::default()),
        ]);
        assert_eq!(names(&ledger.search("chip")), vec!["MINT CHIP", "CHOC CHIP"]);
        assert_eq!(ledger.search("").len(), 3);
        assert!(ledger.search("lemon").is_empty());
    }

    #[test]
    fn search_keeps_surrounding_spaces() {
        let ledger = ledger_with(vec![
            flavor("MINT CHIP", 1, Stock::default()),
            flavor("VANILLA", 1, Stock::default()),
        ]);
        assert!(ledger.search(" vanilla").is_empty());
        assert!(ledger.search("chip ").is_empty());
        assert_eq!(names(&ledger.search(" chip")), vec!["MINT CHIP"]);
        assert_eq!(ledger.search("").len(), 2);
    }

    #[test]
    fn filtered_display_searches_then_partitions() {
        let ledger = ledger_with(vec![
            flavor("MINT CHIP", 1, Stock::default()),
            flavor("VANILLA", 1, Stock::whole_tubs(1)),
            flavor("CHOC CHIP", 1, Stock::whole_tubs(1)),
        ]);
        assert_eq!(
            names(&ledger.filtered_display("CHIP")),
            vec!["CHOC CHIP", "MINT CHIP"]
        );
    }

    #[test]
    fn attention_flags() {
        let ledger = ledger_with(vec![
            flavor("EMPTY RESERVE", 0, Stock::whole_tubs(3)),
            flavor("HEALTHY", 2, Stock::default()),
        ]);
        assert_eq!(ledger.needs_attention(0), Some(true));
        assert_eq!(ledger.needs_attention(1), Some(false));
        assert_eq!(ledger.needs_attention(2), None);
    }
}
