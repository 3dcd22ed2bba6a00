//! Debug allocation tracker.
//!
//! Every container and pool in the crate embeds a [`Tracked`] token.
//! In debug builds the token registers a record (sequence id, kind tag,
//! byte size, timestamp, referenced flag) in a process-wide registry;
//! in release builds the token is zero-sized and every operation here
//! is a no-op.
//!
//! The registry supports a mark/verify leak pass:
//! 1. [`clear_marks`] clears every record's referenced flag,
//! 2. each live container marks its own token (`note_refs` on the
//!    container, [`Tracked::mark`] underneath),
//! 3. [`sweep_unmarked`] reports whatever stayed unmarked.
//!
//! The registry is the one piece of shared mutable state in the crate
//! and is guarded by a single `Mutex`; everything else is
//! single-threaded by contract.

#[cfg(debug_assertions)]
use hashbrown::HashMap;
use std::io::{self, Write};
#[cfg(debug_assertions)]
use std::sync::{Mutex, OnceLock};
use std::time::SystemTime;

/// Snapshot of a live registry record, as returned by the leak pass.
#[derive(Clone, Debug)]
pub struct LeakRecord {
    /// Allocation sequence id (monotonically increasing per process).
    pub id: u64,
    /// Call-site kind tag, e.g. `"ArrayList"` or `"Pool"`.
    pub kind: &'static str,
    /// Last reported byte size of the backing storage.
    pub bytes: usize,
    /// When the token was registered.
    pub at: SystemTime,
}

#[cfg(debug_assertions)]
struct Record {
    kind: &'static str,
    bytes: usize,
    at: SystemTime,
    marked: bool,
}

#[cfg(debug_assertions)]
#[derive(Default)]
struct Registry {
    records: HashMap<u64, Record>,
    next_id: u64,
}

#[cfg(debug_assertions)]
fn registry() -> &'static Mutex<Registry> {
    static REGISTRY: OnceLock<Mutex<Registry>> = OnceLock::new();
    REGISTRY.get_or_init(|| Mutex::new(Registry::default()))
}

#[cfg(debug_assertions)]
fn with_registry<R>(f: impl FnOnce(&mut Registry) -> R) -> R {
    // Recover from poisoning: a panicking test elsewhere must not take
    // the tracker down with it.
    let mut guard = registry().lock().unwrap_or_else(|e| e.into_inner());
    f(&mut guard)
}

/// RAII registration token. Containers embed one and drop it with
/// themselves; the record lives exactly as long as the container.
#[derive(Debug)]
pub struct Tracked {
    #[cfg(debug_assertions)]
    id: u64,
}

impl Tracked {
    /// Register a record for a container of the given kind and size.
    pub fn new(kind: &'static str, bytes: usize) -> Self {
        #[cfg(debug_assertions)]
        {
            let id = with_registry(|r| {
                let id = r.next_id;
                r.next_id += 1;
                r.records.insert(
                    id,
                    Record {
                        kind,
                        bytes,
                        at: SystemTime::now(),
                        marked: false,
                    },
                );
                id
            });
            Tracked { id }
        }
        #[cfg(not(debug_assertions))]
        {
            let _ = (kind, bytes);
            Tracked {}
        }
    }

    /// Update the recorded byte size after growth or rehash.
    pub fn set_bytes(&self, bytes: usize) {
        #[cfg(debug_assertions)]
        with_registry(|r| {
            if let Some(rec) = r.records.get_mut(&self.id) {
                rec.bytes = bytes;
            }
        });
        #[cfg(not(debug_assertions))]
        let _ = bytes;
    }

    /// Set the referenced flag during a mark/verify pass.
    pub fn mark(&self) {
        #[cfg(debug_assertions)]
        with_registry(|r| {
            if let Some(rec) = r.records.get_mut(&self.id) {
                rec.marked = true;
            }
        });
    }
}

impl Drop for Tracked {
    fn drop(&mut self) {
        #[cfg(debug_assertions)]
        with_registry(|r| {
            r.records.remove(&self.id);
        });
    }
}

/// Number of live tracked allocations. Always 0 in release builds.
pub fn live_count() -> usize {
    #[cfg(debug_assertions)]
    {
        with_registry(|r| r.records.len())
    }
    #[cfg(not(debug_assertions))]
    {
        0
    }
}

/// Clear every record's referenced flag (start of a leak pass).
pub fn clear_marks() {
    #[cfg(debug_assertions)]
    with_registry(|r| {
        for rec in r.records.values_mut() {
            rec.marked = false;
        }
    });
}

/// Records left unmarked since the last [`clear_marks`]: the leak
/// candidates. Empty in release builds.
pub fn sweep_unmarked() -> Vec<LeakRecord> {
    #[cfg(debug_assertions)]
    {
        with_registry(|r| {
            let mut leaks: Vec<LeakRecord> = r
                .records
                .iter()
                .filter(|(_, rec)| !rec.marked)
                .map(|(&id, rec)| LeakRecord {
                    id,
                    kind: rec.kind,
                    bytes: rec.bytes,
                    at: rec.at,
                })
                .collect();
            leaks.sort_by_key(|l| l.id);
            leaks
        })
    }
    #[cfg(not(debug_assertions))]
    {
        Vec::new()
    }
}

/// Log every unmarked record via `log::warn!` and return how many there
/// were.
pub fn report_leaks() -> usize {
    let leaks = sweep_unmarked();
    for leak in &leaks {
        log::warn!(
            "unreferenced allocation #{}: {} ({} bytes)",
            leak.id,
            leak.kind,
            leak.bytes
        );
    }
    leaks.len()
}

/// Write the full live-allocation listing, oldest first.
pub fn dump(w: &mut impl Write) -> io::Result<()> {
    #[cfg(debug_assertions)]
    {
        let mut live: Vec<(u64, &'static str, usize)> = with_registry(|r| {
            r.records
                .iter()
                .map(|(&id, rec)| (id, rec.kind, rec.bytes))
                .collect()
        });
        live.sort_by_key(|&(id, _, _)| id);
        for (id, kind, bytes) in live {
            writeln!(w, "#{id} {kind} {bytes} bytes")?;
        }
    }
    #[cfg(not(debug_assertions))]
    let _ = w;
    Ok(())
}
