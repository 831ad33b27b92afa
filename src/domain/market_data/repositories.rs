use crate::domain::market_data::{Instrument, Symbol};

/// Read-only view of the live instrument store.
///
/// The store itself is owned and updated by an external feed; the drill-down
/// engine only ever reads the current snapshot.
pub trait InstrumentFeed {
    /// Current record for a symbol, if the feed has published one yet
    fn get(&self, symbol: &Symbol) -> Option<&Instrument>;

    /// Every record in the current snapshot
    fn snapshot(&self) -> Vec<&Instrument>;

    fn len(&self) -> usize {
        self.snapshot().len()
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
