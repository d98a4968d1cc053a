use rateposter_common::error::PosterError;
use rateposter_layers::{extract_layers, try_extract_layers};

fn scratch(name: &str, bytes: &[u8]) -> std::path::PathBuf {
    let path = std::env::temp_dir().join(format!(
        "rateposter-layers-{name}-{}.psd",
        std::process::id()
    ));
    std::fs::write(&path, bytes).unwrap();
    path
}

#[test]
fn missing_file_yields_none() {
    let path = std::env::temp_dir().join("rateposter-layers-does-not-exist.psd");
    assert!(extract_layers(&path).is_none());
    assert!(matches!(
        try_extract_layers(&path),
        Err(PosterError::FileNotFound { .. })
    ));
}

#[test]
fn non_psd_bytes_yield_none() {
    let path = scratch("garbage", b"this is plainly not a photoshop document");
    assert!(extract_layers(&path).is_none());
    std::fs::remove_file(&path).ok();
}

#[test]
fn truncated_header_yields_none() {
    // Valid signature and version, then nothing.
    let path = scratch("truncated", b"8BPS\x00\x01");
    assert!(extract_layers(&path).is_none());
    assert!(try_extract_layers(&path).is_err());
    std::fs::remove_file(&path).ok();
}

#[test]
fn empty_file_yields_none() {
    let path = scratch("empty", b"");
    assert!(extract_layers(&path).is_none());
    std::fs::remove_file(&path).ok();
}
