use std::panic;
use std::path::PathBuf;
use std::thread;

use idnakit::{shared, IdnaConfig, IdnaError};

fn sample_config() -> IdnaConfig {
    IdnaConfig::default()
        .with_data_dir(PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../data/ucd-sample"))
}

// One test so the steps run in order within this process.
#[test]
fn test_shared_lifecycle() {
    assert!(shared::try_get().is_none());
    assert!(panic::catch_unwind(shared::get).is_err());

    let missing = IdnaConfig::default().with_data_dir("/nonexistent/idnakit-ucd");
    assert!(matches!(
        shared::init(&missing),
        Err(IdnaError::Initialization(_))
    ));
    assert!(shared::try_get().is_none());

    let handles: Vec<_> = (0..4)
        .map(|_| thread::spawn(|| shared::init(&sample_config()).unwrap()))
        .collect();
    let contexts: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    for ctx in &contexts {
        assert!(std::ptr::eq(ctx.classifier(), contexts[0].classifier()));
    }

    let again = shared::init(&missing).unwrap();
    assert!(std::ptr::eq(again.classifier(), shared::get().classifier()));
    assert!(shared::get().check_label(&[0x61, 0x62]).is_ok());
}
