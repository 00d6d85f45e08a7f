use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::time::{Duration, Instant};

use calamine::{open_workbook_auto_from_rs, Data, Reader};

use crate::error::{GridlookError, Result};
use crate::settings::Settings;
use crate::table::ConsumerTable;

/// How long a downloaded workbook stays fresh before it is re-fetched.
pub const CACHE_TTL: Duration = Duration::from_secs(60 * 60);

const WORKBOOK_CACHE_FILE: &str = "consumers.xlsx";

// ---------------------------------------------------------------------------
// Fetch
// ---------------------------------------------------------------------------

/// Rewrite a GitHub web URL (`github.com/.../blob/...`) to its raw-content
/// form. URLs already in raw form pass through unchanged.
pub fn normalize_github_url(url: &str) -> String {
    url.replace("github.com", "raw.githubusercontent.com")
        .replace("/blob/", "/")
}

/// Download the workbook bytes. Non-2xx status and network failures both
/// surface as `Fetch` errors.
pub fn fetch_workbook(url: &str) -> Result<Vec<u8>> {
    let url = normalize_github_url(url);
    let resp = reqwest::blocking::get(&url)?.error_for_status()?;
    Ok(resp.bytes()?.to_vec())
}

// ---------------------------------------------------------------------------
// Parse
// ---------------------------------------------------------------------------

/// Parse the first sheet of an xlsx/xls workbook into a `ConsumerTable`.
/// The first row is the header; every cell is stringified and missing cells
/// become the empty string.
pub fn parse_workbook(bytes: &[u8]) -> Result<ConsumerTable> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))
        .map_err(|e| GridlookError::Parse(format!("failed to open workbook: {e}")))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| GridlookError::Parse("workbook has no sheets".to_string()))?
        .map_err(|e| GridlookError::Parse(format!("failed to read first sheet: {e}")))?;

    let mut rows = range.rows();
    let header = rows
        .next()
        .ok_or_else(|| GridlookError::Parse("workbook is empty".to_string()))?;
    let columns: Vec<String> = header.iter().map(cell_to_string).collect();

    let data: Vec<Vec<String>> = rows
        .map(|row| row.iter().map(cell_to_string).collect())
        .collect();
    if data.is_empty() {
        return Err(GridlookError::Parse(
            "workbook contains no data rows".to_string(),
        ));
    }

    ConsumerTable::new(columns, data)
}

fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty | Data::Error(_) => String::new(),
        Data::String(s) => s.trim().to_string(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => {
            // Integral floats print without the trailing ".0" so numeric
            // account ids compare equal to what the operator types.
            if f.fract() == 0.0 && f.abs() < i64::MAX as f64 {
                (*f as i64).to_string()
            } else {
                f.to_string()
            }
        }
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => excel_serial_to_string(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
    }
}

fn excel_serial_to_string(serial: f64) -> String {
    // Excel epoch is 1899-12-30 (accounting for the 1900 leap year bug)
    let base = chrono::NaiveDate::from_ymd_opt(1899, 12, 30).unwrap();
    let days = serial.floor() as i64;
    let date = base + chrono::Duration::days(days);
    let secs = ((serial - serial.floor()) * 86_400.0).round() as u32 % 86_400;
    if secs == 0 {
        date.format("%Y-%m-%d").to_string()
    } else {
        let time = chrono::NaiveTime::from_num_seconds_from_midnight_opt(secs, 0).unwrap();
        chrono::NaiveDateTime::new(date, time)
            .format("%Y-%m-%d %H:%M:%S")
            .to_string()
    }
}

// ---------------------------------------------------------------------------
// Load with disk cache
// ---------------------------------------------------------------------------

pub fn resolve_url<'a>(settings: &'a Settings, url_override: Option<&'a str>) -> &'a str {
    url_override.unwrap_or(&settings.source_url)
}

pub fn workbook_cache_path(settings: &Settings) -> PathBuf {
    PathBuf::from(&settings.cache_dir).join(WORKBOOK_CACHE_FILE)
}

pub fn cache_file_age(path: &Path) -> Option<Duration> {
    std::fs::metadata(path).ok()?.modified().ok()?.elapsed().ok()
}

/// Fetch, parse and validate the consumer table. Within the TTL the raw
/// workbook is served from the disk cache instead of the network; `force`
/// bypasses the cache. A failed fetch aborts the load — no stale table is
/// substituted.
pub fn load(settings: &Settings, url_override: Option<&str>, force: bool) -> Result<ConsumerTable> {
    let url = resolve_url(settings, url_override);
    let path = workbook_cache_path(settings);
    let bytes = cached_bytes(&path, CACHE_TTL, force, || fetch_workbook(url))?;
    parse_workbook(&bytes)
}

fn cached_bytes<F>(path: &Path, ttl: Duration, force: bool, fetch: F) -> Result<Vec<u8>>
where
    F: FnOnce() -> Result<Vec<u8>>,
{
    if !force {
        if let Some(age) = cache_file_age(path) {
            if age < ttl {
                return Ok(std::fs::read(path)?);
            }
        }
    }
    let bytes = fetch()?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, &bytes)?;
    Ok(bytes)
}

// ---------------------------------------------------------------------------
// In-memory table cache (interactive sessions)
// ---------------------------------------------------------------------------

/// Time-bounded cache holding the last loaded table. Entries are replaced
/// wholesale on expiry; a failed load leaves the cache empty so the next
/// call retries.
pub struct TableCache {
    ttl: Duration,
    slot: Option<(Instant, Rc<ConsumerTable>)>,
}

impl TableCache {
    pub fn new(ttl: Duration) -> Self {
        Self { ttl, slot: None }
    }

    pub fn get_or_load<F>(&mut self, load: F) -> Result<Rc<ConsumerTable>>
    where
        F: FnOnce() -> Result<ConsumerTable>,
    {
        self.get_or_load_at(Instant::now(), load)
    }

    /// Same as `get_or_load` with an explicit clock, so expiry is testable.
    pub fn get_or_load_at<F>(&mut self, now: Instant, load: F) -> Result<Rc<ConsumerTable>>
    where
        F: FnOnce() -> Result<ConsumerTable>,
    {
        if let Some((loaded_at, table)) = &self.slot {
            if now.saturating_duration_since(*loaded_at) < self.ttl {
                return Ok(Rc::clone(table));
            }
        }
        let table = Rc::new(load()?);
        self.slot = Some((now, Rc::clone(&table)));
        Ok(table)
    }
}
