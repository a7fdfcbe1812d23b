#[cfg(test)]
mod tests {
    use crate::{Order, OrderBook, OrderBookSnapshot, OrderType, Side};

    fn create_test_order_book() -> OrderBook {
        OrderBook::new("TEST-SYMBOL")
    }

    fn gtc(id: u64, side: Side, price: i32, quantity: u32) -> Order {
        Order::new(OrderType::GoodTillCancel, id, side, price, quantity)
    }

    fn populated_book() -> OrderBook {
        let book = create_test_order_book();
        book.add_order(gtc(1, Side::Buy, 100, 10)).unwrap();
        book.add_order(gtc(2, Side::Buy, 100, 5)).unwrap();
        book.add_order(gtc(3, Side::Buy, 99, 20)).unwrap();
        book.add_order(gtc(4, Side::Sell, 101, 7)).unwrap();
        book.add_order(gtc(5, Side::Sell, 102, 3)).unwrap();
        book.add_order(gtc(6, Side::Sell, 103, 9)).unwrap();
        book
    }

    #[test]
    fn test_snapshot_orders_bids_descending_asks_ascending() {
        let snapshot = populated_book().create_snapshot(0);

        let bid_prices: Vec<i32> = snapshot.bids.iter().map(|level| level.price).collect();
        let ask_prices: Vec<i32> = snapshot.asks.iter().map(|level| level.price).collect();
        assert_eq!(bid_prices, vec![100, 99]);
        assert_eq!(ask_prices, vec![101, 102, 103]);
    }

    #[test]
    fn test_snapshot_sums_level_quantities() {
        let snapshot = populated_book().create_snapshot(0);

        assert_eq!(snapshot.bids[0].quantity, 15, "100s aggregate both bids");
        assert_eq!(snapshot.bids[1].quantity, 20);
        assert_eq!(snapshot.asks[0].quantity, 7);
    }

    #[test]
    fn test_snapshot_depth_truncates_levels() {
        let book = populated_book();

        let snapshot = book.create_snapshot(2);
        assert_eq!(snapshot.bids.len(), 2);
        assert_eq!(snapshot.asks.len(), 2);
        assert_eq!(snapshot.asks[1].price, 102);

        let full = book.create_snapshot(0);
        assert_eq!(full.asks.len(), 3, "Depth 0 means every level");
    }

    #[test]
    fn test_snapshot_helpers() {
        let snapshot = populated_book().create_snapshot(0);

        assert_eq!(snapshot.best_bid(), Some((100, 15)));
        assert_eq!(snapshot.best_ask(), Some((101, 7)));
        assert_eq!(snapshot.spread(), Some(1));
        assert_eq!(snapshot.total_bid_volume(), 35);
        assert_eq!(snapshot.total_ask_volume(), 19);
    }

    #[test]
    fn test_snapshot_of_empty_book() {
        let snapshot = create_test_order_book().create_snapshot(0);

        assert!(snapshot.bids.is_empty());
        assert!(snapshot.asks.is_empty());
        assert_eq!(snapshot.best_bid(), None);
        assert_eq!(snapshot.spread(), None);
        assert_eq!(snapshot.total_bid_volume(), 0);
    }

    #[test]
    fn test_snapshot_is_detached_from_the_book() {
        let book = populated_book();
        let snapshot = book.create_snapshot(0);

        // Mutate the book after the snapshot; the copy must not move.
        book.cancel_order(1);
        book.cancel_order(4);

        assert_eq!(snapshot.bids[0].quantity, 15);
        assert_eq!(snapshot.asks[0].price, 101);
    }

    #[test]
    fn test_snapshot_reflects_partial_fills() {
        let book = populated_book();
        book.add_order(gtc(7, Side::Sell, 100, 12)).unwrap();

        // 15 rested at 100; 12 traded away.
        let snapshot = book.create_snapshot(0);
        assert_eq!(snapshot.bids[0].price, 100);
        assert_eq!(snapshot.bids[0].quantity, 3);
        book.assert_invariants();
    }

    #[test]
    fn test_snapshot_serializes_to_json() {
        let snapshot = populated_book().create_snapshot(1);

        let json = serde_json::to_string(&snapshot).expect("snapshot should serialize");
        let parsed: OrderBookSnapshot =
            serde_json::from_str(&json).expect("snapshot should deserialize");

        assert_eq!(parsed.symbol, "TEST-SYMBOL");
        assert_eq!(parsed.bids, snapshot.bids);
        assert_eq!(parsed.asks, snapshot.asks);
    }
}
