//! Stateful cursors with fail-fast structural-change detection.
//!
//! Borrowing iterators cannot observe foreign mutation (the borrow checker
//! forbids it), so the full iteration protocol lives in detached cursors:
//! small state machines validated against the owning table on every call,
//! the way a handle is validated against its map. A cursor remembers the
//! table's structural stamp; any put/remove/clear/rehash/reorder performed
//! outside the cursor changes the stamp and every later cursor operation
//! reports [`StructuralChange`]. That error is fatal for the cursor only;
//! the table stays fully usable.
//!
//! A cursor's own `remove` goes through the table's gap-closing routine
//! with a move callback, then re-syncs its stamp. Cursor removal skips the
//! shrink check so that the slot indices the cursor holds stay meaningful.
//!
//! [`Cursor`] (unordered tables) scans slots from the top down. Backward
//! shifts triggered by its own removals can wrap an unvisited entry around
//! the array end into the already-scanned region; the cursor records that
//! entry's slot in an overflow list (the slot array is the arena, the list
//! holds indices) and yields it after the primary scan, keeping the list
//! current as later shifts move entries again. Each live entry is visited
//! exactly once.
//!
//! [`LinkedCursor`] (insertion-ordered tables) walks the order links in
//! either direction; its anchors are repaired through the same move
//! callback.

use crate::error::StructuralChange;
use crate::order::{InsertionOrder, OrderStore, Unordered};
use crate::table::ProbeTable;

impl<K, V, P> ProbeTable<K, V, P, Unordered> {
    /// A detached forward cursor over this table's current state.
    pub fn cursor(&self) -> Cursor {
        Cursor {
            stamp: self.stamp,
            scan: self.capacity().checked_sub(1),
            displaced: Vec::new(),
            current: None,
        }
    }
}

impl<K, V, P> ProbeTable<K, V, P, InsertionOrder> {
    /// A detached cursor positioned before the oldest entry.
    pub fn cursor(&self) -> LinkedCursor {
        LinkedCursor {
            stamp: self.stamp,
            next: self.order.first(),
            prev: None,
            current: None,
        }
    }

    /// A detached cursor positioned after the newest entry; useful for
    /// walking backwards via [`LinkedCursor::prev`].
    pub fn cursor_back(&self) -> LinkedCursor {
        LinkedCursor {
            stamp: self.stamp,
            next: None,
            prev: self.order.last(),
            current: None,
        }
    }
}

/// Forward cursor over an unordered [`ProbeTable`].
///
/// Yield order is unspecified but repeatable for a fixed table state.
#[derive(Debug)]
pub struct Cursor {
    stamp: u64,
    /// Highest slot index not yet examined by the primary scan.
    scan: Option<usize>,
    /// Slots of unvisited entries relocated into the scanned region by this
    /// cursor's own removals.
    displaced: Vec<usize>,
    current: Option<usize>,
}

impl Cursor {
    fn check<K, V, P, O: OrderStore>(
        &self,
        table: &ProbeTable<K, V, P, O>,
    ) -> Result<(), StructuralChange> {
        if self.stamp != table.stamp {
            return Err(StructuralChange);
        }
        Ok(())
    }

    /// Advance to the next live entry, or `Ok(None)` once exhausted.
    pub fn next<'a, K, V, P>(
        &mut self,
        table: &'a ProbeTable<K, V, P, Unordered>,
    ) -> Result<Option<(&'a K, &'a V)>, StructuralChange> {
        self.check(table)?;
        if let Some(from) = self.scan {
            if let Some(slot) = table.prev_occupied(from) {
                self.scan = slot.checked_sub(1);
                self.current = Some(slot);
                return Ok(Some(table.entry_at(slot)));
            }
            self.scan = None;
        }
        match self.displaced.pop() {
            Some(slot) => {
                debug_assert!(table.is_live(slot));
                self.current = Some(slot);
                Ok(Some(table.entry_at(slot)))
            }
            None => {
                self.current = None;
                Ok(None)
            }
        }
    }

    /// Remove the entry last yielded by [`next`](Cursor::next). Returns
    /// `Ok(None)` if there is no current entry (not yet started, exhausted,
    /// or already removed).
    pub fn remove<K, V, P>(
        &mut self,
        table: &mut ProbeTable<K, V, P, Unordered>,
    ) -> Result<Option<(K, V)>, StructuralChange> {
        self.check(table)?;
        let Some(slot) = self.current.take() else {
            return Ok(None);
        };
        let scan = self.scan;
        let displaced = &mut self.displaced;
        let entry = table.take_slot(slot, |from, to| {
            if let Some(i) = displaced.iter().position(|&d| d == from) {
                // A tracked entry moved again; keep its record current. If
                // it slid back into the unscanned region the primary scan
                // will find it, so the record is dropped instead.
                displaced.swap_remove(i);
                if scan.map_or(true, |s| to > s) {
                    displaced.push(to);
                }
            } else if let Some(s) = scan {
                // Wrap move: an unvisited entry landed in the scanned
                // region and would otherwise be skipped.
                if from <= s && to > s {
                    displaced.push(to);
                }
            }
        });
        self.stamp = table.stamp;
        Ok(Some(entry))
    }
}

/// Bidirectional cursor over a [`LinkedProbeTable`](crate::LinkedProbeTable).
#[derive(Debug)]
pub struct LinkedCursor {
    stamp: u64,
    next: Option<usize>,
    prev: Option<usize>,
    current: Option<usize>,
}

impl LinkedCursor {
    fn check<K, V, P>(
        &self,
        table: &ProbeTable<K, V, P, InsertionOrder>,
    ) -> Result<(), StructuralChange> {
        if self.stamp != table.stamp {
            return Err(StructuralChange);
        }
        Ok(())
    }

    /// Advance toward the newest entry.
    pub fn next<'a, K, V, P>(
        &mut self,
        table: &'a ProbeTable<K, V, P, InsertionOrder>,
    ) -> Result<Option<(&'a K, &'a V)>, StructuralChange> {
        self.check(table)?;
        match self.next {
            Some(slot) => {
                self.current = Some(slot);
                self.prev = Some(slot);
                self.next = table.order.next(slot);
                Ok(Some(table.entry_at(slot)))
            }
            None => {
                self.current = None;
                Ok(None)
            }
        }
    }

    /// Step back toward the oldest entry.
    pub fn prev<'a, K, V, P>(
        &mut self,
        table: &'a ProbeTable<K, V, P, InsertionOrder>,
    ) -> Result<Option<(&'a K, &'a V)>, StructuralChange> {
        self.check(table)?;
        match self.prev {
            Some(slot) => {
                self.current = Some(slot);
                self.next = Some(slot);
                self.prev = table.order.prev(slot);
                Ok(Some(table.entry_at(slot)))
            }
            None => {
                self.current = None;
                Ok(None)
            }
        }
    }

    /// Remove the entry last yielded by `next`/`prev`.
    pub fn remove<K, V, P>(
        &mut self,
        table: &mut ProbeTable<K, V, P, InsertionOrder>,
    ) -> Result<Option<(K, V)>, StructuralChange> {
        self.check(table)?;
        let Some(slot) = self.current.take() else {
            return Ok(None);
        };
        // Detach the anchors from the doomed slot while its links are
        // still intact.
        if self.prev == Some(slot) {
            self.prev = table.order.prev(slot);
        }
        if self.next == Some(slot) {
            self.next = table.order.next(slot);
        }
        let prev = &mut self.prev;
        let next = &mut self.next;
        let entry = table.take_slot(slot, |from, to| {
            if *prev == Some(from) {
                *prev = Some(to);
            }
            if *next == Some(from) {
                *next = Some(to);
            }
        });
        self.stamp = table.stamp;
        Ok(Some(entry))
    }
}
