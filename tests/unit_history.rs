use bench_plot::{BenchHistory, Y_FLOOR};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

const HEADER: &str = "timestamp,mode,max_us,avg_us,min_us\n";

fn write_csv(dir: &TempDir, content: &str) -> PathBuf {
    let path = dir.path().join("history.csv");
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_rows_sorted_by_timestamp() {
    let dir = TempDir::new().unwrap();
    let path = write_csv(
        &dir,
        &format!(
            "{}20240103_000000,baseline,30.0,15.0,3.0\n\
             20240101_000000,baseline,10.0,5.0,1.0\n\
             20240102_000000,profiled,20.0,8.0,2.0\n",
            HEADER
        ),
    );
    let history = BenchHistory::from_csv(&path).unwrap();
    assert_eq!(history.samples.len(), 3);
    let stamps: Vec<&str> = history.samples.iter().map(|s| s.timestamp.as_str()).collect();
    assert_eq!(
        stamps,
        vec!["20240101_000000", "20240102_000000", "20240103_000000"]
    );
}

#[test]
fn test_bad_rows_skipped_without_aborting() {
    // non-numeric statistic, wrong timestamp format, short row; one good row last
    let dir = TempDir::new().unwrap();
    let path = write_csv(
        &dir,
        &format!(
            "{}20240101_000000,baseline,oops,5.0,1.0\n\
             2024-01-02 00:00:00,profiled,20.0,8.0,2.0\n\
             20240103_000000,baseline\n\
             20240104_000000,profiled,30.0,9.0,3.0\n",
            HEADER
        ),
    );
    let history = BenchHistory::from_csv(&path).unwrap();
    assert_eq!(history.samples.len(), 1);
    assert_eq!(history.samples[0].timestamp, "20240104_000000");
    assert_eq!(history.samples[0].mode, "profiled");
    assert_eq!(history.samples[0].max_us, 30.0);
}

#[test]
fn test_empty_timestamp_rejected() {
    let dir = TempDir::new().unwrap();
    let path = write_csv(&dir, &format!("{},baseline,10.0,5.0,1.0\n", HEADER));
    let history = BenchHistory::from_csv(&path).unwrap();
    assert!(history.samples.is_empty());
}

#[test]
fn test_header_only_yields_no_samples() {
    let dir = TempDir::new().unwrap();
    let path = write_csv(&dir, HEADER);
    let history = BenchHistory::from_csv(&path).unwrap();
    assert!(history.samples.is_empty());
}

#[test]
fn test_extra_columns_ignored() {
    let dir = TempDir::new().unwrap();
    let path = write_csv(
        &dir,
        "timestamp,mode,max_us,avg_us,min_us,notes\n\
         20240101_000000,baseline,10.0,5.0,1.0,warmup\n",
    );
    let history = BenchHistory::from_csv(&path).unwrap();
    assert_eq!(history.samples.len(), 1);
    assert_eq!(history.samples[0].avg_us, 5.0);
    assert_eq!(history.samples[0].min_us, 1.0);
}

#[test]
fn test_split_modes_drops_unknown_labels() {
    let dir = TempDir::new().unwrap();
    let path = write_csv(
        &dir,
        &format!(
            "{}20240101_000000,baseline,10.0,5.0,1.0\n\
             20240102_000000,dev,50.0,25.0,5.0\n\
             20240103_000000,profiled,20.0,8.0,2.0\n",
            HEADER
        ),
    );
    let history = BenchHistory::from_csv(&path).unwrap();
    let (baseline, profiled) = history.split_modes();
    assert_eq!(history.samples.len(), 3);
    assert_eq!(baseline.len(), 1);
    assert_eq!(profiled.len(), 1);
    assert_eq!(baseline[0].mode, "baseline");
    assert_eq!(profiled[0].mode, "profiled");
}

#[test]
fn test_scale_max_floored() {
    let dir = TempDir::new().unwrap();
    let path = write_csv(
        &dir,
        &format!(
            "{}20240101_000000,baseline,0.0,0.0,0.0\n\
             20240102_000000,profiled,0.0,0.0,0.0\n",
            HEADER
        ),
    );
    let history = BenchHistory::from_csv(&path).unwrap();
    assert_eq!(history.scale_max(), Y_FLOOR);
}

#[test]
fn test_scale_max_covers_all_modes() {
    // the unrecognized mode carries the largest max_us and still sets the ceiling
    let dir = TempDir::new().unwrap();
    let path = write_csv(
        &dir,
        &format!(
            "{}20240101_000000,baseline,10.0,5.0,1.0\n\
             20240102_000000,dev,250.0,100.0,10.0\n\
             20240103_000000,profiled,20.0,8.0,2.0\n",
            HEADER
        ),
    );
    let history = BenchHistory::from_csv(&path).unwrap();
    assert_eq!(history.scale_max(), 250.0);
    for s in &history.samples {
        assert!(history.scale_max() >= s.max_us);
    }
}
