#![allow(dead_code)]

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::NaiveDate;
use tempfile::{NamedTempFile, TempDir};

static CWD_LOCK: Mutex<()> = Mutex::new(());

pub const HEADER: &str = "Ticket ID,Request Date,Category,Status,L1/L2/L3";

/// Sheet around Wednesday 2024-06-12 mixing date formats, spellings and one
/// unparsable date.
pub const SAMPLE_SHEET: &str = "\
Ticket ID,Request Date,Category,Status,L1/L2/L3
T-1,2024-06-03,Billing,Open,L1
T-2,10/06/2024,billing,Closed,L1
T-3,2024-06-11 09:30:00,Access,In Progress,l2
T-4,2024/06/12,Billing,closed,L3
T-5,someday,Access,Open,L1
T-6,2024-05-20,Network,Open,L2
T-7,2024-01-02,Network,Closed,L3
";

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn wednesday() -> NaiveDate {
    date(2024, 6, 12)
}

/// Write `content` to a temporary `.csv` file kept alive by the returned handle.
pub fn write_sheet(content: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".csv")
        .tempfile()
        .expect("create temp sheet");
    file.write_all(content.as_bytes()).expect("write temp sheet");
    file.flush().expect("flush temp sheet");
    file
}

/// Build a sheet from `(id, date, category, status, level)` rows.
pub fn sheet(rows: &[(&str, &str, &str, &str, &str)]) -> String {
    let mut out = String::from(HEADER);
    out.push('\n');
    for (id, request_date, category, status, level) in rows {
        out.push_str(&format!(
            "{},{},{},{},{}\n",
            id, request_date, category, status, level
        ));
    }
    out
}

/// Runs `f` with the current directory set to `dir`.
///
/// Serializes access to the process-global working directory and restores it
/// afterwards, also on unwind.
pub fn with_current_dir<F, R>(dir: &Path, f: F) -> R
where
    F: FnOnce() -> R,
{
    let _lock = CWD_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    let _guard = ScopedDir::enter(dir);
    f()
}

struct ScopedDir {
    previous: PathBuf,
}

impl ScopedDir {
    fn enter(dir: &Path) -> Self {
        let previous = std::env::current_dir().expect("current dir");
        std::env::set_current_dir(dir).expect("enter dir");
        Self { previous }
    }
}

impl Drop for ScopedDir {
    fn drop(&mut self) {
        let _ = std::env::set_current_dir(&self.previous);
    }
}

pub fn temp_dir() -> TempDir {
    TempDir::new().expect("create temp dir")
}
