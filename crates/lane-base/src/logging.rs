use log::{LevelFilter, Log, Metadata, Record};
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

/// Where log lines go.
pub enum LogTarget {
    Stdout,
    /// One `YYYY-MM-DD.log` file per day inside the given directory.
    Daily(Mutex<DailyFile>),
}

pub struct DailyFile {
    dir: PathBuf,
    date: String,
    file: File,
}

impl DailyFile {
    pub fn open(dir: impl Into<PathBuf>) -> std::io::Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        let date = format_date(unix_secs());
        let file = open_append(&dir, &date)?;
        Ok(Self { dir, date, file })
    }

    fn write_line(&mut self, line: &str) {
        let today = format_date(unix_secs());
        if today != self.date {
            match open_append(&self.dir, &today) {
                Ok(file) => {
                    self.file = file;
                    self.date = today;
                }
                Err(e) => eprintln!("cannot roll log over to {today}: {e}"),
            }
        }
        if let Err(e) = self.file.write_all(line.as_bytes()) {
            eprintln!("cannot write log file: {e}");
            eprint!("{line}");
        }
    }
}

fn open_append(dir: &std::path::Path, date: &str) -> std::io::Result<File> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join(format!("{date}.log")))
}

/// `log` backend for the lane pipeline.
pub struct LaneLogger {
    level: LevelFilter,
    target: LogTarget,
}

impl LaneLogger {
    pub fn stdout(level: LevelFilter) -> Self {
        Self {
            level,
            target: LogTarget::Stdout,
        }
    }

    pub fn daily(dir: impl Into<PathBuf>, level: LevelFilter) -> std::io::Result<Self> {
        Ok(Self {
            level,
            target: LogTarget::Daily(Mutex::new(DailyFile::open(dir)?)),
        })
    }

    pub fn level(&self) -> LevelFilter {
        self.level
    }
}

impl Log for LaneLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format_record(record);
        match &self.target {
            LogTarget::Stdout => print!("{line}"),
            LogTarget::Daily(daily) => daily
                .lock()
                .unwrap_or_else(|e| e.into_inner())
                .write_line(&line),
        }
    }

    fn flush(&self) {
        match &self.target {
            LogTarget::Stdout => {
                std::io::stdout().flush().ok();
            }
            LogTarget::Daily(daily) => {
                daily
                    .lock()
                    .unwrap_or_else(|e| e.into_inner())
                    .file
                    .flush()
                    .ok();
            }
        }
    }
}

/// `2026-01-31T08:15:02.123 [WARN] [ThreadId(3)] src/pipeline.rs:88 - message\n`
pub fn format_record(record: &Record) -> String {
    format!(
        "{} [{}] [{:?}] {}:{} - {}\n",
        format_timestamp(),
        record.level(),
        std::thread::current().id(),
        record.file().unwrap_or("unknown"),
        record.line().unwrap_or(0),
        record.args()
    )
}

fn unix_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// Current UTC time as `YYYY-MM-DDTHH:MM:SS.mmm`.
pub fn format_timestamp() -> String {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    let secs = now.as_secs();
    let of_day = secs % 86_400;
    format!(
        "{}T{:02}:{:02}:{:02}.{:03}",
        format_date(secs),
        of_day / 3600,
        (of_day % 3600) / 60,
        of_day % 60,
        now.subsec_millis()
    )
}

/// UTC calendar date of a unix timestamp as `YYYY-MM-DD`.
pub fn format_date(unix_secs: u64) -> String {
    let (year, month, day) = civil_from_days((unix_secs / 86_400) as i64);
    format!("{year:04}-{month:02}-{day:02}")
}

// Howard Hinnant's days-to-civil conversion.
fn civil_from_days(days: i64) -> (i64, u32, u32) {
    let z = days + 719_468;
    let era = z.div_euclid(146_097);
    let doe = z.rem_euclid(146_097) as u32;
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = doy - (153 * mp + 2) / 5 + 1;
    let month = if mp < 10 { mp + 3 } else { mp - 9 };
    let year = yoe as i64 + era * 400 + i64::from(month <= 2);
    (year, month, day)
}

fn install(logger: LaneLogger) {
    let level = logger.level();
    // only the first installation in a process wins; a rejected logger stays leaked
    if log::set_logger(Box::leak(Box::new(logger))).is_ok() {
        log::set_max_level(level);
    }
}

/// Route `log` records to stdout. Later calls in the same process are ignored.
pub fn init_stdout_logger(level: LevelFilter) {
    install(LaneLogger::stdout(level));
}

/// Route `log` records to daily files in `dir`.
pub fn init_file_logger(dir: impl Into<PathBuf>, level: LevelFilter) -> std::io::Result<()> {
    install(LaneLogger::daily(dir, level)?);
    Ok(())
}
