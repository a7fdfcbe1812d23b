#[cfg(test)]
mod tests {
    use crate::{Order, OrderBook, OrderBookError, OrderType, Side, INVALID_PRICE};

    fn create_test_order_book() -> OrderBook {
        OrderBook::new("TEST-SYMBOL")
    }

    fn gtc(id: u64, side: Side, price: i32, quantity: u32) -> Order {
        Order::new(OrderType::GoodTillCancel, id, side, price, quantity)
    }

    #[test]
    fn test_add_resting_order_produces_no_trades() {
        let book = create_test_order_book();
        let trades = book.add_order(gtc(1, Side::Buy, 100, 10)).unwrap();

        assert!(trades.is_empty(), "A lone order cannot trade");
        assert_eq!(book.len(), 1);
    }

    #[test]
    fn test_add_duplicate_id_is_a_no_op() {
        let book = create_test_order_book();
        book.add_order(gtc(1, Side::Buy, 100, 10)).unwrap();

        let trades = book.add_order(gtc(1, Side::Sell, 100, 10)).unwrap();
        assert!(trades.is_empty(), "Duplicate ids must not trade");
        assert_eq!(book.len(), 1, "Duplicate ids must not change the book");
        assert_eq!(book.get_order(1).unwrap().side(), Side::Buy);
    }

    #[test]
    fn test_add_zero_quantity_is_rejected() {
        let book = create_test_order_book();
        let result = book.add_order(gtc(1, Side::Buy, 100, 0));

        assert!(matches!(
            result,
            Err(OrderBookError::InvalidQuantity { order_id: 1, .. })
        ));
        assert!(book.is_empty());
    }

    #[test]
    fn test_add_priced_order_with_sentinel_price_is_rejected() {
        let book = create_test_order_book();
        let result = book.add_order(gtc(1, Side::Buy, INVALID_PRICE, 10));

        assert!(matches!(
            result,
            Err(OrderBookError::InvalidPrice { order_id: 1, .. })
        ));
        assert!(book.is_empty());
    }

    #[test]
    fn test_add_market_order_with_real_price_is_rejected() {
        let book = create_test_order_book();
        let result = book.add_order(Order::new(OrderType::Market, 1, Side::Buy, 100, 10));

        assert!(matches!(result, Err(OrderBookError::InvalidPrice { .. })));
    }

    #[test]
    fn test_market_order_against_empty_book_is_dropped() {
        let book = create_test_order_book();
        let trades = book.submit_market_order(1, Side::Buy, 10).unwrap();

        assert!(trades.is_empty());
        assert!(book.is_empty(), "A market order never rests");
    }

    #[test]
    fn test_market_order_sweeps_to_the_worst_price() {
        let book = create_test_order_book();
        book.add_order(gtc(1, Side::Sell, 100, 3)).unwrap();
        book.add_order(gtc(2, Side::Sell, 101, 3)).unwrap();

        // Converted to GTC at the worst ask (101), so both levels are swept.
        let trades = book.submit_market_order(3, Side::Buy, 5).unwrap();

        assert_eq!(trades.len(), 2);
        assert_eq!(trades[0].ask.price, 100);
        assert_eq!(trades[0].quantity(), 3);
        assert_eq!(trades[1].ask.price, 101);
        assert_eq!(trades[1].quantity(), 2);

        // One unit of the second seller survives; the market order is gone.
        assert_eq!(book.len(), 1);
        assert_eq!(book.get_order(2).unwrap().remaining_quantity(), 1);
        assert!(book.get_order(3).is_none());
        book.assert_invariants();
    }

    #[test]
    fn test_market_order_residue_rests_as_gtc() {
        let book = create_test_order_book();
        book.add_order(gtc(1, Side::Sell, 100, 5)).unwrap();

        // Bigger than the whole opposite side: the leftover rests at the
        // conversion price as a GoodTillCancel.
        let trades = book.submit_market_order(2, Side::Buy, 8).unwrap();

        assert_eq!(trades.len(), 1);
        assert_eq!(trades[0].quantity(), 5);
        let residue = book.get_order(2).expect("converted order should rest");
        assert_eq!(residue.order_type(), OrderType::GoodTillCancel);
        assert_eq!(residue.price(), 100);
        assert_eq!(residue.remaining_quantity(), 3);
        book.assert_invariants();
    }

    #[test]
    fn test_fill_and_kill_that_cannot_cross_is_rejected() {
        let book = create_test_order_book();
        book.add_order(gtc(1, Side::Sell, 105, 10)).unwrap();

        let trades = book
            .add_order(Order::new(OrderType::FillAndKill, 2, Side::Buy, 100, 10))
            .unwrap();

        assert!(trades.is_empty());
        assert_eq!(book.len(), 1, "The rejected FAK must not rest");
    }

    #[test]
    fn test_fill_and_kill_partial_residue_is_cancelled() {
        let book = create_test_order_book();
        book.add_order(gtc(1, Side::Buy, 100, 5)).unwrap();

        let trades = book
            .add_order(Order::new(OrderType::FillAndKill, 2, Side::Sell, 100, 10))
            .unwrap();

        assert_eq!(trades.len(), 1);
        assert_eq!(trades[0].quantity(), 5);
        assert!(book.is_empty(), "The FAK residue must not rest");
        book.assert_invariants();
    }

    #[test]
    fn test_fill_or_kill_insufficient_depth_is_rejected() {
        let book = create_test_order_book();
        book.add_order(gtc(1, Side::Sell, 100, 5)).unwrap();

        let trades = book
            .add_order(Order::new(OrderType::FillOrKill, 2, Side::Buy, 100, 10))
            .unwrap();

        assert!(trades.is_empty());
        assert_eq!(book.len(), 1);
        assert_eq!(
            book.get_order(1).unwrap().remaining_quantity(),
            5,
            "A rejected FOK must leave the book untouched"
        );
    }

    #[test]
    fn test_fill_or_kill_fills_across_levels() {
        let book = create_test_order_book();
        book.add_order(gtc(1, Side::Sell, 100, 5)).unwrap();
        book.add_order(gtc(2, Side::Sell, 101, 5)).unwrap();

        let trades = book
            .add_order(Order::new(OrderType::FillOrKill, 3, Side::Buy, 101, 10))
            .unwrap();

        assert_eq!(trades.len(), 2);
        assert_eq!(trades.iter().map(|t| t.quantity()).sum::<u32>(), 10);
        assert!(book.is_empty());
        book.assert_invariants();
    }

    #[test]
    fn test_fill_or_kill_ignores_levels_past_the_limit() {
        let book = create_test_order_book();
        book.add_order(gtc(1, Side::Sell, 100, 5)).unwrap();
        book.add_order(gtc(2, Side::Sell, 102, 5)).unwrap();

        // Depth exists, but not within the limit of 101.
        let trades = book
            .add_order(Order::new(OrderType::FillOrKill, 3, Side::Buy, 101, 10))
            .unwrap();

        assert!(trades.is_empty());
        assert_eq!(book.len(), 2);
    }

    #[test]
    fn test_fill_or_kill_ignores_same_side_depth() {
        let book = create_test_order_book();
        book.add_order(gtc(1, Side::Buy, 99, 50)).unwrap();
        book.add_order(gtc(2, Side::Sell, 100, 5)).unwrap();

        // The bid at 99 sits in the level data too; it must not count
        // towards filling a buy.
        let trades = book
            .add_order(Order::new(OrderType::FillOrKill, 3, Side::Buy, 100, 10))
            .unwrap();

        assert!(trades.is_empty());
        assert_eq!(book.len(), 2);
        book.assert_invariants();
    }

    #[test]
    fn test_good_for_day_rests_like_gtc() {
        let book = create_test_order_book();
        let trades = book
            .add_order(Order::new(OrderType::GoodForDay, 1, Side::Buy, 100, 10))
            .unwrap();

        assert!(trades.is_empty());
        assert_eq!(book.len(), 1);
        assert_eq!(book.get_order(1).unwrap().order_type(), OrderType::GoodForDay);
    }
}
