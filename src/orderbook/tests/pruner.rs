#[cfg(test)]
mod tests {
    use crate::orderbook::pruner::time_until_close;
    use crate::{Clock, Order, OrderBook, OrderType, Side};
    use chrono::{NaiveDate, NaiveDateTime};
    use std::thread;
    use std::time::{Duration, Instant};

    /// Clock pinned to a fixed local instant.
    #[derive(Debug, Clone, Copy)]
    struct FixedClock(NaiveDateTime);

    impl Clock for FixedClock {
        fn local_now(&self) -> NaiveDateTime {
            self.0
        }
    }

    fn at(hour: u32, minute: u32, second: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 10)
            .unwrap()
            .and_hms_opt(hour, minute, second)
            .unwrap()
    }

    #[test]
    fn test_deadline_before_the_close_is_same_day() {
        let wait = time_until_close(at(10, 0, 0));
        assert_eq!(wait, Duration::from_secs(6 * 3600) + Duration::from_millis(100));
    }

    #[test]
    fn test_deadline_at_the_close_rolls_to_next_day() {
        let wait = time_until_close(at(16, 0, 0));
        assert_eq!(wait, Duration::from_secs(24 * 3600) + Duration::from_millis(100));
    }

    #[test]
    fn test_deadline_after_the_close_is_next_day() {
        let wait = time_until_close(at(17, 30, 0));
        assert_eq!(
            wait,
            Duration::from_secs(22 * 3600 + 30 * 60) + Duration::from_millis(100)
        );
    }

    #[test]
    fn test_pruning_cancels_only_good_for_day_orders() {
        // A clock pinned just before the close makes the first pruning pass
        // fire within a couple hundred milliseconds.
        let now = NaiveDate::from_ymd_opt(2024, 1, 10)
            .unwrap()
            .and_hms_milli_opt(15, 59, 59, 900)
            .unwrap();
        let book = OrderBook::with_clock("TEST-SYMBOL", FixedClock(now));

        book.add_order(Order::new(OrderType::GoodForDay, 1, Side::Buy, 100, 10))
            .unwrap();
        book.add_order(Order::new(OrderType::GoodForDay, 2, Side::Sell, 200, 10))
            .unwrap();
        book.add_order(Order::new(OrderType::GoodTillCancel, 3, Side::Sell, 300, 10))
            .unwrap();
        assert_eq!(book.len(), 3);

        // Give the pruner time to hit its deadline and run.
        thread::sleep(Duration::from_millis(700));

        assert_eq!(book.len(), 1);
        assert!(book.get_order(1).is_none());
        assert!(book.get_order(2).is_none());
        assert!(book.get_order(3).is_some(), "GTC orders survive the close");
        book.assert_invariants();
    }

    #[test]
    fn test_shutdown_is_prompt_regardless_of_deadline() {
        // The system clock could be hours from the close; teardown must not
        // wait for the timeout to elapse.
        let started = Instant::now();
        {
            let book = OrderBook::new("TEST-SYMBOL");
            book.add_order(Order::new(OrderType::GoodForDay, 1, Side::Buy, 100, 10))
                .unwrap();
        }
        assert!(
            started.elapsed() < Duration::from_secs(5),
            "dropping the book must join the pruner promptly"
        );
    }

    #[test]
    fn test_commands_work_while_pruner_sleeps() {
        let book = OrderBook::new("TEST-SYMBOL");

        // The pruner holds the condvar wait, not the mutex; normal traffic
        // must proceed underneath it.
        for id in 1..=50 {
            book.add_order(Order::new(
                OrderType::GoodTillCancel,
                id,
                Side::Buy,
                100 + (id % 5) as i32,
                10,
            ))
            .unwrap();
        }
        assert_eq!(book.len(), 50);
        book.assert_invariants();
    }
}
