//! 目录后端测试：真实文件系统上的打开、缓存与释放

use mop_cache::{directory_cache, CacheError, DirectoryArchives, ResourceOpener};
use mop_config::CacheConfig;
use std::fs;

#[test]
fn test_open_nested_archive() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir_all(dir.path().join("lib")).unwrap();
    fs::write(dir.path().join("lib").join("shapes.json"), b"{\"classes\":[]}").unwrap();

    let archives = DirectoryArchives::new(dir.path());
    let archive = archives.open("lib/shapes.json").unwrap();
    assert_eq!(archive.name(), "lib/shapes.json");
    assert_eq!(archive.text().unwrap(), "{\"classes\":[]}");
}

#[test]
fn test_missing_file_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let archives = DirectoryArchives::new(dir.path());
    assert_eq!(
        archives.open("absent.json"),
        Err(CacheError::NotFound {
            name: "absent.json".to_string()
        })
    );
}

#[test]
fn test_directory_is_not_an_archive() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir_all(dir.path().join("sub")).unwrap();
    let archives = DirectoryArchives::new(dir.path());
    assert!(matches!(archives.open("sub"), Err(CacheError::NotFound { .. })));
}

#[test]
fn test_escape_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let archives = DirectoryArchives::new(dir.path());
    assert!(matches!(
        archives.open("../outside.json"),
        Err(CacheError::InvalidName { .. })
    ));
}

#[test]
fn test_size_limit_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("big.json"), vec![b' '; 64]).unwrap();
    let archives = DirectoryArchives::with_config(
        dir.path(),
        CacheConfig {
            max_archive_bytes: 16,
        },
    );
    assert!(matches!(
        archives.open("big.json"),
        Err(CacheError::TooLarge { size: 64, limit: 16, .. })
    ));
}

#[test]
fn test_cache_reads_file_once_while_held() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("unit.json");
    fs::write(&path, b"v1").unwrap();

    let cache = directory_cache(dir.path());
    let first = cache.acquire("unit.json").unwrap();
    fs::write(&path, b"v2").unwrap();
    let second = cache.acquire("unit.json").unwrap();
    assert_eq!(second.bytes(), b"v1");
    assert_eq!(cache.ref_count("unit.json"), 2);
    drop((first, second));

    cache.release("unit.json");
    cache.release("unit.json");
    let fresh = cache.acquire("unit.json").unwrap();
    assert_eq!(fresh.bytes(), b"v2");
}
