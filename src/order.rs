//! Slot-lifecycle order tracking.
//!
//! The table calls back into its order store at precise moments: when a slot
//! becomes live (`on_added`), when it is cleared (`on_removed`), and when a
//! live entry changes slots during backward-shift deletion (`on_moved`).
//! [`Unordered`] compiles all of it away; [`InsertionOrder`] threads an
//! intrusive doubly-linked list through the same slot index space, turning
//! the table into an insertion-ordered map.

/// Index value standing for "no slot".
pub(crate) const NIL: usize = usize::MAX;

/// Order bookkeeping driven by the table's slot lifecycle.
///
/// Implemented by [`Unordered`] and [`InsertionOrder`]; not intended for
/// implementation outside this crate.
pub trait OrderStore: Default {
    /// Whether iteration must follow this store instead of slot order.
    const ORDERED: bool;

    /// Reset to an empty list over `capacity` slots.
    fn resize(&mut self, capacity: usize);

    /// Forget all entries, keeping capacity.
    fn clear(&mut self);

    /// `slot` became live; append it to the logical end.
    fn on_added(&mut self, slot: usize);

    /// `slot` was cleared; splice it out.
    fn on_removed(&mut self, slot: usize);

    /// A live entry moved from `from` to `to` during backward-shift
    /// deletion. Mandatory for ordered stores: skipping it silently corrupts
    /// the list.
    fn on_moved(&mut self, from: usize, to: usize);

    fn first(&self) -> Option<usize>;
    fn last(&self) -> Option<usize>;
    fn next(&self, slot: usize) -> Option<usize>;
    fn prev(&self, slot: usize) -> Option<usize>;
}

/// No order tracking. Zero-sized; every hook is a no-op.
#[derive(Clone, Copy, Debug, Default)]
pub struct Unordered;

impl OrderStore for Unordered {
    const ORDERED: bool = false;

    #[inline]
    fn resize(&mut self, _capacity: usize) {}
    #[inline]
    fn clear(&mut self) {}
    #[inline]
    fn on_added(&mut self, _slot: usize) {}
    #[inline]
    fn on_removed(&mut self, _slot: usize) {}
    #[inline]
    fn on_moved(&mut self, _from: usize, _to: usize) {}

    #[inline]
    fn first(&self) -> Option<usize> {
        None
    }
    #[inline]
    fn last(&self) -> Option<usize> {
        None
    }
    #[inline]
    fn next(&self, _slot: usize) -> Option<usize> {
        None
    }
    #[inline]
    fn prev(&self, _slot: usize) -> Option<usize> {
        None
    }
}

#[derive(Clone, Copy, Debug)]
struct Link {
    prev: usize,
    next: usize,
}

const UNLINKED: Link = Link {
    prev: NIL,
    next: NIL,
};

/// Intrusive doubly-linked insertion order over slot indices.
///
/// One `Link` per slot, `head`/`tail` as endpoints. An empty list has
/// `head == tail == NIL`; a single element has both of its own links `NIL`.
#[derive(Clone, Debug)]
pub struct InsertionOrder {
    links: Vec<Link>,
    head: usize,
    tail: usize,
}

impl Default for InsertionOrder {
    fn default() -> Self {
        Self {
            links: Vec::new(),
            head: NIL,
            tail: NIL,
        }
    }
}

impl InsertionOrder {
    /// Splice `slot` out of the list, reconnecting its neighbors.
    pub(crate) fn unlink(&mut self, slot: usize) {
        let Link { prev, next } = self.links[slot];
        if prev == NIL {
            self.head = next;
        } else {
            self.links[prev].next = next;
        }
        if next == NIL {
            self.tail = prev;
        } else {
            self.links[next].prev = prev;
        }
        self.links[slot] = UNLINKED;
    }

    /// Make an unlinked `slot` the new head.
    pub(crate) fn push_front(&mut self, slot: usize) {
        self.links[slot] = Link {
            prev: NIL,
            next: self.head,
        };
        if self.head == NIL {
            self.tail = slot;
        } else {
            self.links[self.head].prev = slot;
        }
        self.head = slot;
    }

    /// Make an unlinked `slot` the new tail.
    pub(crate) fn push_back(&mut self, slot: usize) {
        self.links[slot] = Link {
            prev: self.tail,
            next: NIL,
        };
        if self.tail == NIL {
            self.head = slot;
        } else {
            self.links[self.tail].next = slot;
        }
        self.tail = slot;
    }
}

impl OrderStore for InsertionOrder {
    const ORDERED: bool = true;

    fn resize(&mut self, capacity: usize) {
        self.links.clear();
        self.links.resize(capacity, UNLINKED);
        self.head = NIL;
        self.tail = NIL;
    }

    fn clear(&mut self) {
        for link in &mut self.links {
            *link = UNLINKED;
        }
        self.head = NIL;
        self.tail = NIL;
    }

    #[inline]
    fn on_added(&mut self, slot: usize) {
        self.push_back(slot);
    }

    #[inline]
    fn on_removed(&mut self, slot: usize) {
        self.unlink(slot);
    }

    fn on_moved(&mut self, from: usize, to: usize) {
        let link = self.links[from];
        self.links[to] = link;
        self.links[from] = UNLINKED;
        if link.prev == NIL {
            self.head = to;
        } else {
            self.links[link.prev].next = to;
        }
        if link.next == NIL {
            self.tail = to;
        } else {
            self.links[link.next].prev = to;
        }
    }

    #[inline]
    fn first(&self) -> Option<usize> {
        (self.head != NIL).then_some(self.head)
    }

    #[inline]
    fn last(&self) -> Option<usize> {
        (self.tail != NIL).then_some(self.tail)
    }

    #[inline]
    fn next(&self, slot: usize) -> Option<usize> {
        let next = self.links[slot].next;
        (next != NIL).then_some(next)
    }

    #[inline]
    fn prev(&self, slot: usize) -> Option<usize> {
        let prev = self.links[slot].prev;
        (prev != NIL).then_some(prev)
    }
}
