use {
    anyhow::Result,
    std::{
        fs::{File, OpenOptions, create_dir_all},
        io::Write,
        path::PathBuf,
        sync::{
            Mutex,
            atomic::{AtomicU8, Ordering},
        },
        time::{SystemTime, UNIX_EPOCH},
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    Debug,
    Info,
    Warn,
    Error,
    Fatal,
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Level::Debug => write!(f, "DEBUG"),
            Level::Info => write!(f, "INFO"),
            Level::Warn => write!(f, "WARN"),
            Level::Error => write!(f, "ERROR"),
            Level::Fatal => write!(f, "FATAL"),
        }
    }
}

impl Level {
    fn from_u8(value: u8) -> Self {
        match value {
            0 => Level::Debug,
            1 => Level::Info,
            2 => Level::Warn,
            3 => Level::Error,
            _ => Level::Fatal,
        }
    }
}

pub trait Logger: Send + Sync {
    fn log(&self, level: Level, file: &str, line: usize, message: &str);
}

pub static LOGGER: Mutex<Option<Box<dyn Logger>>> = Mutex::new(None);

static MAX_LEVEL: AtomicU8 = AtomicU8::new(Level::Debug as u8);

/// Drop every message below `level`.
pub fn set_max_level(level: Level) {
    MAX_LEVEL.store(level as u8, Ordering::Relaxed);
}

pub fn max_level() -> Level {
    Level::from_u8(MAX_LEVEL.load(Ordering::Relaxed))
}

pub fn enabled(level: Level) -> bool {
    level >= max_level()
}

/// Dispatch a message to the installed logger, if any.
///
/// This is what the `log_*!` macros expand to.
pub fn dispatch(level: Level, file: &str, line: usize, message: &str) {
    if !enabled(level) {
        return;
    }
    if let Some(logger) = LOGGER.lock().unwrap_or_else(|e| e.into_inner()).as_ref() {
        logger.log(level, file, line, message);
    }
}

fn unix_seconds() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .unwrap_or_default()
}

pub fn format_timestamp() -> String {
    let secs = unix_seconds();
    let days = secs / 86400;
    let time_of_day = secs % 86400;
    let (year, month, day) = civil_from_days(days as i64);
    let hours = time_of_day / 3600;
    let minutes = (time_of_day % 3600) / 60;
    let seconds = time_of_day % 60;
    format!(
        "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}",
        year, month, day, hours, minutes, seconds
    )
}

pub fn format_today() -> String {
    let days = unix_seconds() / 86400;
    let (year, month, day) = civil_from_days(days as i64);
    format!("{:04}-{:02}-{:02}", year, month, day)
}

// Howard Hinnant's days-to-civil algorithm
fn civil_from_days(z: i64) -> (i64, u32, u32) {
    let z = z + 719468;
    let era = if z >= 0 { z } else { z - 146096 } / 146097;
    let doe = (z - era * 146097) as u32;
    let yoe = (doe - doe / 1460 + doe / 36524 - doe / 146096) / 365;
    let y = yoe as i64 + era * 400;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let d = doy - (153 * mp + 2) / 5 + 1;
    let m = if mp < 10 { mp + 3 } else { mp - 9 };
    let y = if m <= 2 { y + 1 } else { y };
    (y, m, d)
}

fn format_line(level: Level, file: &str, line: usize, message: &str) -> String {
    let timestamp = format_timestamp();
    let thread_id = std::thread::current().id();
    format!(
        "[{:?}:{}:{} - {}:{}] {}",
        thread_id, level, timestamp, file, line, message
    )
}

pub struct StdoutLogger;

impl Logger for StdoutLogger {
    fn log(&self, level: Level, file: &str, line: usize, message: &str) {
        println!("{}", format_line(level, file, line, message));
    }
}

/// Install `logger` as the process-wide logger, replacing any previous one.
pub fn init_logger(logger: impl Logger + 'static) {
    LOGGER
        .lock()
        .unwrap_or_else(|e| e.into_inner())
        .replace(Box::new(logger));
}

pub fn init_stdout_logger() {
    init_logger(StdoutLogger);
}

struct FileLoggerState {
    dir: PathBuf,
    current_date: String,
    file: File,
}

/// Appends to `<dir>/<YYYY-MM-DD>.log`, rolling over to a new file at UTC midnight.
pub struct FileLogger {
    state: Mutex<FileLoggerState>,
}

impl FileLogger {
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        create_dir_all(&dir)?;
        let current_date = format_today();
        let path = dir.join(format!("{}.log", current_date));
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        Ok(FileLogger {
            state: Mutex::new(FileLoggerState {
                dir,
                current_date,
                file,
            }),
        })
    }
}

impl Logger for FileLogger {
    fn log(&self, level: Level, file: &str, line: usize, message: &str) {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        let today = format_today();
        if today != state.current_date {
            let new_path = state.dir.join(format!("{}.log", today));
            match OpenOptions::new().create(true).append(true).open(&new_path) {
                Ok(new_file) => {
                    state.file = new_file;
                    state.current_date = today;
                }
                Err(error) => {
                    eprintln!("Failed to open new log file {:?}: {}", new_path, error);
                }
            }
        }
        let log_line = format_line(level, file, line, message);
        if let Err(error) = writeln!(state.file, "{}", log_line) {
            eprintln!("Failed to write to log file: {}", error);
            eprintln!("{}", log_line);
        }
    }
}

pub fn init_file_logger(dir: impl Into<PathBuf>) -> Result<()> {
    init_logger(FileLogger::new(dir)?);
    Ok(())
}

#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {{ if $crate::log::enabled($crate::log::Level::Debug) { let message = format_args!($($arg)*).to_string(); $crate::log::dispatch($crate::log::Level::Debug, file!(), line!() as usize, &message); } }};
}

#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {{ if $crate::log::enabled($crate::log::Level::Info) { let message = format_args!($($arg)*).to_string(); $crate::log::dispatch($crate::log::Level::Info, file!(), line!() as usize, &message); } }};
}

#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {{ if $crate::log::enabled($crate::log::Level::Warn) { let message = format_args!($($arg)*).to_string(); $crate::log::dispatch($crate::log::Level::Warn, file!(), line!() as usize, &message); } }};
}

#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {{ if $crate::log::enabled($crate::log::Level::Error) { let message = format_args!($($arg)*).to_string(); $crate::log::dispatch($crate::log::Level::Error, file!(), line!() as usize, &message); } }};
}

#[macro_export]
macro_rules! log_fatal {
    ($($arg:tt)*) => {{ let message = format_args!($($arg)*).to_string(); $crate::log::dispatch($crate::log::Level::Fatal, file!(), line!() as usize, &message); println!("FATAL ERROR: {}", message); std::process::exit(1); }};
}
