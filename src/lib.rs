//! probe-table: an open-addressing hash-table kernel with linear probing,
//! backward-shift deletion, and optional insertion-order links.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: one probing kernel serving several map flavors, built in safe,
//!   verifiable layers so each piece can be reasoned about independently.
//! - Layers:
//!   - HashPolicy<K>: pluggable hash/equality strategy. NaturalPolicy
//!     delegates to the key's own Hash/Eq through a BuildHasher; FnPolicy
//!     wraps plain closures for one-off strategies.
//!   - ProbeTable<K, V, P, O>: the kernel. Power-of-two slot array, linear
//!     probing, backward-shift deletion (no tombstones), threshold-driven
//!     grow/shrink rehashing; includes a debug-only reentrancy guard to
//!     keep internals consistent while mutating.
//!   - OrderStore: slot-lifecycle hooks the kernel drives. Unordered is a
//!     zero-sized no-op; InsertionOrder threads an intrusive doubly-linked
//!     list through the slot indices, yielding LinkedProbeTable.
//!   - Cursors: detached iteration state machines validated against a
//!     structural stamp; foreign mutation surfaces as StructuralChange.
//!   - FrozenTable / ProbeSet: thin wrappers (build-once reads, `()`
//!     values) that add no probing logic of their own.
//!
//! Constraints
//! - Single-threaded: tables are `Send` but not `Sync`; cross-thread use
//!   goes through an external lock or per-thread clones.
//! - Capacity is always a power of two, floored at the configured minimum;
//!   masking replaces modulo.
//! - Absent keys read back as `None`; a configured default value is
//!   surfaced only by `get_or_default`.
//! - No partial mutation: every operation completes fully or leaves the
//!   table exactly as before.
//! - Reentrancy: disallowed while the kernel probes (only policy
//!   `hash`/`eq` may run); allowed elsewhere.
//!
//! Why this split?
//! - Localize invariants: the probing and shifting logic exists once, in
//!   ProbeTable; ordering, freezing, and set semantics cannot break it.
//! - Zero-cost ordering: the `O` parameter monomorphizes away for
//!   unordered tables instead of branching at runtime.
//! - Clear failure boundaries: the kernel never calls into user code once
//!   the structure is consistent.
//!
//! Hasher and rehashing invariants
//! - Each entry stores its avalanche-mixed `u64` hash and probing always
//!   uses the stored hash; policy code is never invoked during rehashing
//!   or gap closing. This avoids resize-time calls into user code and
//!   keeps backward shifts pure.
//! - Raw policy hashes pass through a murmur3 finalizer before masking, so
//!   low-entropy policies (identity hashes on sequential integers) do not
//!   cluster into one probe run.
//!
//! Cursor protocol
//! - Every structural change (insert of a new key, removal, rehash, clear,
//!   order move) bumps a stamp; overwriting a value does not. A cursor
//!   created at stamp `s` fails with StructuralChange once the table moves
//!   past `s` through any path other than the cursor's own `remove`.
//! - A cursor's own removal backward-shifts entries under it; the cursor
//!   tracks relocations through a move callback so each live entry is
//!   still visited exactly once.
//!
//! Notes and non-goals
//! - No tombstone reclamation or incremental rehashing; a rehash is one
//!   eager pass over the slots.
//! - No entry API; `get_mut`/`put` cover in-place updates.
//! - Policies must be pure and must not panic; a policy that disagrees
//!   with itself leaves the table in a state the caller owns.

mod cursor;
mod error;
mod frozen;
mod linked;
mod order;
mod policy;
mod reentry;
mod set;
mod table;
mod table_proptest;

// Public surface
pub use cursor::{Cursor, LinkedCursor};
pub use error::{StructuralChange, TableError};
pub use frozen::FrozenTable;
pub use linked::{LinkedIter, LinkedProbeTable, RevIter};
pub use order::{InsertionOrder, OrderStore, Unordered};
pub use policy::{FnPolicy, HashPolicy, NaturalPolicy};
pub use set::{LinkedProbeSet, ProbeSet};
pub use table::{IntoIter, Iter, ProbeTable};
