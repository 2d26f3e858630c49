use std::fs;
use std::sync::{Arc, Barrier};
use std::thread;
use std::time::Duration;
use syncroot_fs::io::{self, RobustnessConfig};
use syncroot_fs::{ConfigStore, Error, NormalizedPath};
use tempfile::TempDir;

#[test]
fn write_atomic_creates_file_and_parents() {
    let temp = TempDir::new().unwrap();
    let path = NormalizedPath::new(temp.path().join("nested/state/deploy.json"));

    io::write_atomic(&path, b"{}", RobustnessConfig::default()).unwrap();

    assert_eq!(fs::read_to_string(path.to_native()).unwrap(), "{}");
}

#[test]
fn write_atomic_overwrites_and_leaves_no_temp_file() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("deploy.json");
    fs::write(&file_path, "original").unwrap();

    let path = NormalizedPath::new(&file_path);
    io::write_text(&path, "updated").unwrap();

    assert_eq!(fs::read_to_string(&file_path).unwrap(), "updated");
    let leftovers: Vec<_> = fs::read_dir(temp.path())
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
        .collect();
    assert!(leftovers.is_empty());
}

#[test]
fn write_atomic_times_out_on_held_lock() {
    use fs2::FileExt;

    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("busy.json");
    let lock = fs::File::create(temp.path().join("busy.json.lock")).unwrap();
    FileExt::lock_exclusive(&lock).unwrap();

    let config = RobustnessConfig {
        lock_timeout: Duration::from_millis(100),
        enable_fsync: false,
    };
    let result = io::write_atomic(&NormalizedPath::new(&file_path), b"x", config);

    assert!(matches!(result, Err(Error::LockFailed { .. })));
    assert!(!file_path.exists());
    FileExt::unlock(&lock).unwrap();
}

#[test]
fn concurrent_writers_never_interleave() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("concurrent.txt");
    let path = Arc::new(NormalizedPath::new(&file_path));
    let threads = 8;
    let barrier = Arc::new(Barrier::new(threads));

    let handles: Vec<_> = (0..threads)
        .map(|id| {
            let path = Arc::clone(&path);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                for i in 0..10 {
                    let _ = io::write_text(&path, &format!("thread{id}:write{i}\n"));
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let content = fs::read_to_string(&file_path).unwrap();
    assert!(content.starts_with("thread"));
    assert_eq!(content.matches("thread").count(), 1);
}

#[test]
fn read_text_missing_file_is_io_error() {
    let result = io::read_text(&NormalizedPath::new("/nonexistent/syncroot/file.txt"));
    assert!(matches!(result, Err(Error::Io { .. })));
}

#[derive(Debug, PartialEq, serde::Serialize, serde::Deserialize)]
struct Sample {
    cachedir: String,
    timeout: u64,
}

#[test]
fn config_store_roundtrips_each_format() {
    let temp = TempDir::new().unwrap();
    let store = ConfigStore::new();
    let value = Sample {
        cachedir: "/var/cache/syncroot".into(),
        timeout: 300,
    };

    for name in ["settings.toml", "settings.json", "settings.yaml"] {
        let path = NormalizedPath::new(temp.path().join(name));
        store.save(&path, &value).unwrap();
        let loaded: Sample = store.load(&path).unwrap();
        assert_eq!(loaded, value, "{name}");
    }
}

#[test]
fn config_store_reports_parse_errors() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("broken.yaml");
    fs::write(&path, "timeout: [unterminated").unwrap();

    let result: Result<Sample, _> = ConfigStore::new().load(&NormalizedPath::new(&path));
    let err = result.unwrap_err();
    assert!(matches!(err, Error::ConfigParse { ref format, .. } if format == "YAML"));
    assert!(err.is_configuration());
}
