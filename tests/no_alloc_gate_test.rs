use std::alloc::{GlobalAlloc, Layout, System};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use bulling::core::{GameSnapshot, GameState};
use bulling::input::{pins_for_hit, PinRack};
use bulling::types::DartHit;

struct CountingAlloc;

static COUNT_ENABLED: AtomicBool = AtomicBool::new(false);
static ALLOC_COUNT: AtomicUsize = AtomicUsize::new(0);

#[global_allocator]
static GLOBAL: CountingAlloc = CountingAlloc;

unsafe impl GlobalAlloc for CountingAlloc {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        if COUNT_ENABLED.load(Ordering::Relaxed) {
            ALLOC_COUNT.fetch_add(1, Ordering::Relaxed);
        }
        System.alloc(layout)
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        System.dealloc(ptr, layout)
    }

    unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
        if COUNT_ENABLED.load(Ordering::Relaxed) {
            ALLOC_COUNT.fetch_add(1, Ordering::Relaxed);
        }
        System.realloc(ptr, layout, new_size)
    }
}

fn with_alloc_counting<F: FnOnce()>(f: F) -> usize {
    ALLOC_COUNT.store(0, Ordering::Relaxed);
    COUNT_ENABLED.store(true, Ordering::Relaxed);
    f();
    COUNT_ENABLED.store(false, Ordering::Relaxed);
    ALLOC_COUNT.load(Ordering::Relaxed)
}

#[test]
fn throw_and_snapshot_paths_do_not_allocate() {
    // Setup (outside counting) so one-time allocations don't trip the gate.
    let mut gs = GameState::new();
    for name in ["Ana", "Bo", "Cy"] {
        gs.add_player(name).unwrap();
    }
    gs.start_game().unwrap();

    let mut snap = GameSnapshot::default();
    let mut rack = PinRack::new();

    // Warm-up.
    gs.submit_throw(3).unwrap();
    let _ = gs.submit_throw(9);
    let _ = gs.submit_throw(11);
    gs.snapshot_into(&mut snap);

    let allocs = with_alloc_counting(|| {
        // Rejections and accepted throws, short of finishing the game.
        for _ in 0..40 {
            let _ = gs.submit_throw(11);
            let _ = gs.submit_throw(3);
            gs.snapshot_into(&mut snap);
        }

        for _ in 0..50 {
            let _ = rack.knock_down_all(pins_for_hit(DartHit::OuterBull));
            let _ = rack.toggle(10);
            let _ = rack.take_throw();
            rack.reset();
        }
    });

    assert!(!gs.game_over());
    assert!(allocs == 0);
}
