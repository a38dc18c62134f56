//! Slip storage with at-most-one-slip-per-line semantics.
//!
//! A stored slip stays valid until one of its input fields changes; the
//! [`SlipKey`] names exactly those fields. On change the slip is replaced
//! with a freshly computed value. A previously handed-out `Arc<Slip>` is
//! never mutated, so concurrent readers keep a consistent snapshot.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::context::PaymentContext;
use crate::slip::Slip;

/// The context fields a stored slip depends on.
///
/// Two contexts with equal keys yield byte-identical slips (the slip is a
/// pure function of them plus layout, and layout only affects rendering).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SlipKey {
    pub line_id: String,
    pub invoice_number: Option<String>,
    pub amount_cents: u64,
}

impl SlipKey {
    pub fn of(ctx: &PaymentContext) -> Self {
        Self {
            line_id: ctx.line_id.clone(),
            invoice_number: ctx.invoice_number().map(str::to_string),
            amount_cents: ctx.amount_cents(),
        }
    }
}

/// Persistence collaborator for computed slips.
///
/// Implementations store at most one slip per line. The provided
/// [`get_or_create`](SlipStore::get_or_create) carries the lookup/compute
/// policy so implementations only deal with storage.
pub trait SlipStore {
    /// Stored slip for a line, with the key it was computed under.
    fn lookup(&self, line_id: &str) -> Option<(SlipKey, Arc<Slip>)>;

    /// Replace whatever is stored for the key's line.
    fn store(&self, key: SlipKey, slip: Arc<Slip>);

    /// Return the stored slip when its key still matches the context,
    /// otherwise compute, store, and return a replacement.
    fn get_or_create(&self, ctx: &PaymentContext) -> Arc<Slip> {
        let key = SlipKey::of(ctx);
        if let Some((stored_key, slip)) = self.lookup(&ctx.line_id) {
            if stored_key == key {
                return slip;
            }
        }

        let slip = Arc::new(Slip::compute(ctx));
        self.store(key, Arc::clone(&slip));
        slip
    }
}

/// In-memory slip store.
#[derive(Default)]
pub struct MemoryStore {
    slips: RwLock<HashMap<String, (SlipKey, Arc<Slip>)>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of lines with a stored slip.
    pub fn len(&self) -> usize {
        self.slips.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.slips.read().is_empty()
    }
}

impl SlipStore for MemoryStore {
    fn lookup(&self, line_id: &str) -> Option<(SlipKey, Arc<Slip>)> {
        self.slips.read().get(line_id).cloned()
    }

    fn store(&self, key: SlipKey, slip: Arc<Slip>) {
        self.slips.write().insert(key.line_id.clone(), (key, slip));
    }
}

// ============================================================================
// TESTS
// ============================================================================
