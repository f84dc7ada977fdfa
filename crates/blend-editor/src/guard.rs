//! Re-entrancy guard for the editor's event handlers.
//!
//! Whenever the editor pushes state into the line or the property panel it
//! would see that state come straight back as change notifications. Those
//! echoes must not be mistaken for user input, so the editor blocks its own
//! handlers around every sync-back:
//!
//! ```rust
//! use blend_editor::guard::HandlerBlock;
//!
//! let handlers = HandlerBlock::new();
//! {
//!     let _blocked = handlers.block();
//!     assert!(handlers.is_blocked());
//!     // ... write into the widget; handlers return early meanwhile ...
//! }
//! assert!(!handlers.is_blocked());
//! ```
//!
//! Blocks nest. The count is shared through an `Rc`, so a guard does not
//! borrow the editor and `&mut self` methods stay callable while it lives.

use std::cell::Cell;
use std::rc::Rc;

/// Nestable "handlers are blocked" counter.
#[derive(Debug, Default, Clone)]
pub struct HandlerBlock {
    depth: Rc<Cell<u32>>,
}

impl HandlerBlock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Blocks handlers until the returned guard is dropped.
    #[must_use = "handlers are unblocked as soon as the guard is dropped"]
    pub fn block(&self) -> BlockGuard {
        self.depth.set(self.depth.get().saturating_add(1));
        BlockGuard {
            depth: Rc::clone(&self.depth),
        }
    }

    #[inline]
    pub fn is_blocked(&self) -> bool {
        self.depth.get() > 0
    }
}

/// Scope of one [`HandlerBlock::block`] call.
#[derive(Debug)]
pub struct BlockGuard {
    depth: Rc<Cell<u32>>,
}

impl Drop for BlockGuard {
    fn drop(&mut self) {
        let depth = self.depth.get();
        assert!(depth > 0, "handler block underflow");
        self.depth.set(depth - 1);
    }
}
