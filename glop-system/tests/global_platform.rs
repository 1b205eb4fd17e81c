use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;

use glop_core::GlopConfig;
use glop_system::native::headless::HeadlessDisplay;
use glop_system::{ManualClock, Platform, SystemError};

static FACTORY_RUNS: AtomicUsize = AtomicUsize::new(0);

fn init() -> Result<Arc<Platform>, SystemError> {
    Platform::init_global_with(|| {
        FACTORY_RUNS.fetch_add(1, Ordering::SeqCst);
        Ok(Platform::new(
            Box::new(HeadlessDisplay::new()),
            Arc::new(ManualClock::starting_at_millis(77)),
            GlopConfig::default(),
        ))
    })
}

#[test]
fn concurrent_initialization_yields_one_instance() {
    let barrier = Arc::new(Barrier::new(8));
    let handles: Vec<_> = (0..8)
        .map(|_| {
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                init().unwrap()
            })
        })
        .collect();

    let platforms: Vec<Arc<Platform>> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    let first = &platforms[0];
    assert!(platforms.iter().all(|p| Arc::ptr_eq(p, first)));
    assert_eq!(FACTORY_RUNS.load(Ordering::SeqCst), 1);
    assert_eq!(first.initial_timestamp(), 77);
}

#[test]
fn later_calls_return_the_existing_instance() {
    let first = init().unwrap();
    let again = Platform::init_global_with(|| panic!("factory must not run twice")).unwrap();
    assert!(Arc::ptr_eq(&first, &again));

    // The default-backend entry point also short-circuits once initialized.
    let default = Platform::init_global().unwrap();
    assert!(Arc::ptr_eq(&first, &default));

    let global = Platform::global().unwrap();
    assert!(Arc::ptr_eq(&first, &global));
    assert_eq!(FACTORY_RUNS.load(Ordering::SeqCst), 1);
}
