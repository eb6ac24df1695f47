//! Variable Name Interning
//!
//! Linked variables intern their names once; the registry table and the
//! override map are keyed by the resulting [`Symbol`]. Lookups by a caller's
//! `&str` go through [`get`], which never grows the table: a name nobody
//! interned cannot match any variable.

use std::sync::LazyLock;

use lasso::{Spur, ThreadedRodeo};

static NAMES: LazyLock<ThreadedRodeo> = LazyLock::new(ThreadedRodeo::new);

pub type Symbol = Spur;

#[inline]
pub fn intern(name: &str) -> Symbol {
    NAMES.get_or_intern(name)
}

#[inline]
pub fn get(name: &str) -> Option<Symbol> {
    NAMES.get(name)
}
