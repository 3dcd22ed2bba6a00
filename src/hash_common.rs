//! Pieces shared by both open-addressing hash tables: the entry type
//! and its recycling pool, the comparer/hasher callback seams, and the
//! prime table-size search.
//!
//! Keys are compared and hashed through caller-supplied callbacks
//! rather than trait bounds because the tables' contract is the probe
//! math itself: the hasher maps a key directly to a bucket index for
//! the current table size, and the comparer decides probe-chain
//! equality.

use crate::pool::Pool;
use std::cmp::Ordering;
use std::cell::RefCell;
use std::rc::Rc;

/// One table entry. `element == None` marks a tombstone: the slot was
/// occupied once and stays part of the probe chain until a rehash.
/// `key` is the integer key reserved for keyed table variants; the
/// element-keyed tables here carry it but never read it.
#[derive(Debug)]
pub struct Entry<K> {
    pub element: Option<K>,
    pub key: i64,
}

impl<K> Entry<K> {
    pub fn new(element: K) -> Self {
        Self {
            element: Some(element),
            key: 0,
        }
    }
}

/// Entry pool shared by any number of tables of one key type. The
/// default pool is bounded so idle entries do not accumulate without
/// limit.
pub type SharedEntryPool<K> = Rc<RefCell<Pool<Entry<K>>>>;

/// Idle cap of the default entry pool.
pub const DEFAULT_ENTRY_POOL_CAP: usize = 128;

/// A fresh bounded entry pool.
pub fn entry_pool<K>() -> SharedEntryPool<K> {
    Rc::new(RefCell::new(Pool::bounded(DEFAULT_ENTRY_POOL_CAP)))
}

/// Three-way key comparison callback.
pub type Comparer<K> = Rc<dyn Fn(&K, &K) -> Ordering>;

/// Key-to-bucket hash callback; the second argument is the current
/// table size.
pub type HashFn<K> = Rc<dyn Fn(&K, usize) -> usize>;

/// Canonical comparer: the key type's own ordering. Covers both
/// handle-identity and string ordering.
pub fn ord_comparer<K: Ord + 'static>() -> Comparer<K> {
    Rc::new(|a: &K, b: &K| a.cmp(b))
}

/// Canonical comparer for string keys.
pub fn str_comparer() -> Comparer<String> {
    ord_comparer::<String>()
}

/// Polynomial string hash with multiplier 37.
pub fn string_hash(s: &str, table_size: usize) -> usize {
    let mut h: usize = 0;
    for b in s.bytes() {
        h = h.wrapping_mul(37).wrapping_add(b as usize);
    }
    h % table_size.max(1)
}

/// Length-prefixed ("Pascal string") byte hash: the first byte is the
/// length, only that many following bytes participate.
pub fn pascal_string_hash(bytes: &[u8], table_size: usize) -> usize {
    let mut h: usize = 0;
    let len = bytes.first().copied().unwrap_or(0) as usize;
    for &b in bytes.iter().skip(1).take(len) {
        h = h.wrapping_mul(37).wrapping_add(b as usize);
    }
    h % table_size.max(1)
}

/// Address/handle hash for integer handle keys: multiplicative mix of
/// the handle value.
pub fn handle_hash(handle: usize, table_size: usize) -> usize {
    handle.wrapping_mul(0x9e37_79b9_7f4a_7c15) % table_size.max(1)
}

/// [`string_hash`] as a table callback.
pub fn string_hasher() -> HashFn<String> {
    Rc::new(|s: &String, size| string_hash(s, size))
}

/// [`pascal_string_hash`] as a table callback.
pub fn pascal_hasher() -> HashFn<Vec<u8>> {
    Rc::new(|bytes: &Vec<u8>, size| pascal_string_hash(bytes, size))
}

/// [`handle_hash`] as a table callback.
pub fn handle_hasher() -> HashFn<usize> {
    Rc::new(|&h: &usize, size| handle_hash(h, size))
}

/// Smallest prime not below `at_least`, the table-size search run
/// after doubling on rehash.
pub fn next_table_size(at_least: usize) -> usize {
    let mut candidate = at_least.max(2);
    if candidate > 2 && candidate % 2 == 0 {
        candidate += 1;
    }
    while !is_prime(candidate) {
        candidate += 2;
    }
    candidate
}

fn is_prime(n: usize) -> bool {
    if n < 2 {
        return false;
    }
    if n % 2 == 0 {
        return n == 2;
    }
    let mut d = 3;
    while d * d <= n {
        if n % d == 0 {
            return false;
        }
        d += 2;
    }
    true
}
