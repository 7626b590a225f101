//! A user's booking history as returned by the ledger.

use crate::model::Booking;
use std::sync::Arc;

/// The bookings of one user in commit order.
///
/// The ledger answers with an eager copy of the matching bookings, taken in one pass of its
/// mailbox, so the history never observes a booking committed after the query. Walking it is
/// lazy: [`iter`](Self::iter) borrows the shared slice and yields one booking at a time, and
/// every call starts again from the first booking. Clones share the same slice.
#[derive(Debug, Clone, Default)]
pub struct BookingHistory {
    bookings: Arc<[Booking]>,
}

impl BookingHistory {
    pub fn new(bookings: Vec<Booking>) -> Self {
        Self {
            bookings: bookings.into(),
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Booking> {
        self.bookings.iter()
    }

    pub fn len(&self) -> usize {
        self.bookings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bookings.is_empty()
    }

    /// Sum of `num_tickets` over all bookings.
    pub fn total_tickets(&self) -> u64 {
        self.iter().map(|b| u64::from(b.num_tickets)).sum()
    }
}

impl<'a> IntoIterator for &'a BookingHistory {
    type Item = &'a Booking;
    type IntoIter = std::slice::Iter<'a, Booking>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BookingId, EventId, UserId};
    use chrono::Utc;
    use rust_decimal::Decimal;

    fn booking(num_tickets: u32) -> Booking {
        Booking {
            id: BookingId::new(),
            user_id: UserId::new(),
            event_id: EventId::new(),
            num_tickets,
            total_price: Decimal::from(num_tickets),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_history_can_be_walked_twice() {
        let history = BookingHistory::new(vec![booking(2), booking(3)]);

        let first: Vec<_> = history.iter().map(|b| b.num_tickets).collect();
        let second: Vec<_> = (&history).into_iter().map(|b| b.num_tickets).collect();
        assert_eq!(first, [2, 3]);
        assert_eq!(first, second);
        assert_eq!(history.total_tickets(), 5);
    }

    #[test]
    fn test_iterators_are_independent() {
        let history = BookingHistory::new(vec![booking(1), booking(2), booking(3)]);

        let mut partial = history.iter();
        assert_eq!(partial.next().map(|b| b.num_tickets), Some(1));

        let fresh: Vec<_> = history.iter().map(|b| b.num_tickets).collect();
        assert_eq!(fresh, [1, 2, 3]);
        assert_eq!(partial.next().map(|b| b.num_tickets), Some(2));
    }

    #[test]
    fn test_clones_share_the_same_view() {
        let history = BookingHistory::new(vec![booking(1)]);
        let clone = history.clone();
        assert_eq!(clone.len(), 1);
        assert!(BookingHistory::default().is_empty());
    }
}
