//! Deferred deallocation for values dropped on the audio thread
//!
//! Parameter snapshots and crossover designs are published to the audio
//! thread as `basedrop::Shared<T>`. When the audio thread lets go of an old
//! one, the drop only enqueues a pointer; the memory is freed here, on a
//! background collector thread.
//!
//! ```ignore
//! use basedrop::Shared;
//! use crate::engine::gc::gc_handle;
//!
//! let design = Shared::new(&gc_handle(), design);
//! ```

use basedrop::{Collector, Handle};
use std::sync::mpsc;
use std::sync::OnceLock;
use std::thread;
use std::time::Duration;

static GC_HANDLE: OnceLock<Handle> = OnceLock::new();

/// How often the collector frees queued values
const COLLECT_INTERVAL: Duration = Duration::from_millis(50);

fn init_gc() -> Handle {
    let (tx, rx) = mpsc::channel();

    thread::Builder::new()
        .name("polar-gc".to_string())
        .spawn(move || {
            // Collector is !Sync, so it lives and dies on this thread
            let mut collector = Collector::new();
            tx.send(collector.handle()).expect("Failed to send GC handle");

            log::info!("Polar GC thread started");

            loop {
                collector.collect();
                thread::sleep(COLLECT_INTERVAL);
            }
        })
        .expect("Failed to spawn polar GC thread");

    rx.recv().expect("Failed to receive GC handle")
}

/// Handle for wrapping values in `Shared<T>` / `SharedCell<T>`
pub fn gc_handle() -> Handle {
    GC_HANDLE.get_or_init(init_gc).clone()
}

#[cfg(test)]
mod tests {
    use super::*;
    use basedrop::{Shared, SharedCell};

    #[test]
    fn test_shared_cell_swap_from_another_thread() {
        let handle = gc_handle();
        let cell = std::sync::Arc::new(SharedCell::new(Shared::new(&handle, vec![0.0_f32; 1024])));

        let reader = {
            let cell = std::sync::Arc::clone(&cell);
            thread::spawn(move || {
                for _ in 0..1000 {
                    let value = cell.get();
                    assert!(value.len() == 1024 || value.len() == 2048);
                }
            })
        };
        for _ in 0..100 {
            cell.set(Shared::new(&handle, vec![1.0_f32; 2048]));
        }
        reader.join().unwrap();
        assert_eq!(cell.get().len(), 2048);
    }
}
