use std::sync::mpsc::{self, Receiver, Sender};

/// Latest live price for the active instrument.
#[derive(Debug, Clone, PartialEq)]
pub struct Quote {
    pub symbol_code: String,
    pub price: f64,
    pub time: i64,
    pub change_pct: f64,
}

/// Publish/subscribe fan-out of live quotes to any screen that wants them.
///
/// Subscribers whose receiver has been dropped are pruned on the next publish.
#[derive(Default)]
pub struct QuoteBoard {
    subscribers: Vec<Sender<Quote>>,
}

impl QuoteBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self) -> Receiver<Quote> {
        let (tx, rx) = mpsc::channel();
        self.subscribers.push(tx);
        rx
    }

    pub fn publish(&mut self, quote: &Quote) {
        self.subscribers.retain(|tx| tx.send(quote.clone()).is_ok());
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quote(price: f64) -> Quote {
        Quote {
            symbol_code: "BTCUSDT".into(),
            price,
            time: 1,
            change_pct: 0.0,
        }
    }

    #[test]
    fn every_subscriber_receives_each_quote() {
        let mut board = QuoteBoard::new();
        let a = board.subscribe();
        let b = board.subscribe();
        board.publish(&quote(1.0));
        board.publish(&quote(2.0));
        assert_eq!(a.try_iter().map(|q| q.price).collect::<Vec<_>>(), vec![1.0, 2.0]);
        assert_eq!(b.try_iter().count(), 2);
    }

    #[test]
    fn dropped_subscribers_are_pruned() {
        let mut board = QuoteBoard::new();
        let keep = board.subscribe();
        drop(board.subscribe());
        board.publish(&quote(1.0));
        assert_eq!(board.subscriber_count(), 1);
        assert!(keep.try_recv().is_ok());
    }
}
