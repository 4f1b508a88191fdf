//! Synthetic "trading application" log generator.
//!
//! Produces realistic input for the scanner: weighted log levels, occasional tab-indented
//! stack traces after ERROR/ERR entries, `ERR ...` lines without a component, and a single
//! configuration dump early in the file.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use chrono::{Duration, Local, NaiveDateTime};
use rand::distributions::{Distribution, WeightedIndex};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::prelude::*;
use crate::settings::{GeneratorSettings, LevelWeights};

/// Timestamp layout of every generated entry
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// Entry index that is replaced by the configuration dump
const CONFIG_DUMP_INDEX: usize = 10;

/// Maximum clock advance between two entries, in milliseconds
const MAX_STEP_MS: i64 = 500;

const ERR_PATTERN_PROBABILITY: f64 = 0.5;
const STACK_TRACE_PROBABILITY: f64 = 0.15;
const OMIT_COMPONENT_PROBABILITY: f64 = 0.05;
const STACK_TRACE_LENGTHS: [usize; 3] = [3, 4, 5];

const COMPONENTS: &[&str] = &[
    "com.tradingapp.order.OrderService",
    "com.tradingapp.marketdata.MarketDataHandler",
    "com.tradingapp.execution.ExecutionEngine",
    "com.tradingapp.utils.DatabaseConnector",
    "com.tradingapp.auth.AuthenticationService",
    "com.tradingapp.alert.AlertManager",
    "com.tradingapp.config.ConfigLoader",
    "com.tradingapp.cache.CacheManager",
    "com.tradingapp.network.NetworkManager",
    "com.tradingapp.analytics.AnalyticsProcessor",
];

const THREADS: &[&str] = &[
    "main",
    "OrderThread-1",
    "ExecThread-2",
    "MarketDataThread-3",
    "AuthThread-4",
    "CacheThread-5",
    "AlertThread-6",
    "AnalyticsThread-7",
    "NetworkThread-8",
    "DBThread-9",
    "TradeProcessor-10",
    "RiskManager-11",
    "DataIngestion-12",
    "NotificationService-13",
    "ReportGenerator-14",
    "BackupThread-15",
];

const SEPARATORS: &[&str] = &[" ", "\t"];

const INFO_MESSAGES: &[&str] = &[
    "Order received for execution",
    "Market data update processed",
    "User logged in successfully",
    "Heartbeat received from exchange",
    "Configuration loaded successfully",
    "Cache initialized",
    "New trading session started",
    "Historical data loaded",
    "Connection established with exchange",
    "Order book updated",
    "Price feed subscribed",
    "Trade confirmation received",
    "Balance updated",
    "User preferences saved",
    "Session token refreshed",
    "Trade settled successfully",
    "Position updated in portfolio",
    "Market summary generated",
    "Risk parameters evaluated",
    "Trade history archived",
    "Portfolio rebalanced",
    "Compliance check passed",
    "Liquidity provision optimized",
    "Asset allocation adjusted",
    "Margin requirements updated",
    "Trade limit reset",
    "Order status synchronized",
    "External API call successful",
    "Scheduled maintenance completed",
    "User notification sent",
    "Exchange rate updated",
];

const DEBUG_MESSAGES: &[&str] = &[
    "Order validation passed",
    "Processing trade execution",
    "Fetching market data snapshot",
    "Cache refreshed",
    "Session token generated",
    "Debugging authentication flow",
    "Calculating trade metrics",
    "Parsing configuration file",
    "Serializing order object",
    "Deserializing market data",
    "Thread started",
    "Memory usage checked",
    "Latency measurement taken",
    "Message queue size: 42",
    "Temporary file created",
    "Garbage collection initiated",
    "Lock acquired on resource",
    "Thread synchronization complete",
    "Retrying failed operation",
    "Loading user preferences",
    "Updating cache entries",
    "Monitoring system health",
    "Analyzing trade patterns",
    "Executing background job",
    "Refreshing API tokens",
    "Validating input parameters",
    "Encrypting sensitive data",
    "Decompressing data stream",
    "Optimizing query performance",
    "Profiling memory usage",
    "Tracking user session",
    "Resolving DNS query",
    "Handling socket connection",
    "Dispatching event handler",
    "Updating UI components",
    "Parsing JSON response",
    "Compressing log data",
    "Managing thread pool",
    "Synchronizing database state",
    "Processing batch job",
    "Validating transaction integrity",
    "Initializing module dependencies",
    "Capturing screenshot for debugging",
    "Loading external libraries",
    "Setting up test environment",
    "Executing unit tests",
    "Aggregating metrics data",
    "Rotating log files",
    "Scaling application instances",
    "Balancing load across servers",
    "Configuring network settings",
    "Establishing secure connection",
    "Decrypting received data",
    "Serializing response payload",
    "Deserializing request payload",
];

const WARN_MESSAGES: &[&str] = &[
    "Latency spike detected",
    "Market data delayed",
    "Order quantity exceeds threshold",
    "Price deviation detected",
    "Partial fill received",
    "High memory usage",
    "Disk space running low",
    "Unrecognized message type",
    "Retrying connection to exchange",
    "Deprecated API used",
    "Configuration parameter missing, using default",
    "User session about to expire",
    "Thread pool exhausted",
    "Cache miss occurred",
    "Failed to send heartbeat",
    "Slow response from database",
    "Potential deadlock detected",
    "Unexpected user input received",
    "Service latency above threshold",
    "Failed to retrieve user data",
    "Insufficient permissions for operation",
    "High CPU usage detected",
    "Unusual trading volume observed",
    "Failed to write to log file",
    "Memory leak detected in module",
    "External service response delayed",
    "Invalid trade signal received",
    "Connection timeout with broker",
    "Data inconsistency found",
    "Failed to acquire necessary locks",
    "Unsupported protocol version",
    "Resource utilization exceeds limits",
];

const ERROR_MESSAGES: &[&str] = &[
    "Failed to connect to database",
    "NullPointerException in OrderService",
    "ArrayIndexOutOfBoundsException in MarketDataHandler",
    "User authentication failed",
    "Order rejection from exchange",
    "Timeout while waiting for response",
    "Failed to parse configuration",
    "Transaction rollback due to error",
    "Network unreachable",
    "IOException in NetworkManager",
    "Failed to load security keys",
    "Order validation error",
    "Unable to update balance",
    "Failed to initialize cache",
    "Data corruption detected",
    "Service unavailable",
    "Failed to serialize object",
    "Unhandled exception in thread",
    "Error committing transaction",
    "Failed to start listener",
    "Disk read failure",
    "Memory allocation failed",
    "Unexpected shutdown of service",
    "Permission denied when accessing resource",
    "Failed to acquire database lock",
    "Corrupted log file detected",
    "Dependency resolution failed",
    "Failed to allocate buffer memory",
    "Error writing to output stream",
    "Unhandled error in request handler",
    "Failed to terminate process",
    "Error initializing network interface",
];

const ERR_MESSAGES: &[&str] = &[
    "Failed to process order",
    "Error retrieving market data",
    "Unexpected null value encountered",
    "Error in trade execution module",
    "Failed to authenticate user",
    "Error writing to database",
    "Invalid configuration detected",
    "Error in network communication",
    "Failed to start service",
    "Error during shutdown process",
    "Resource not found",
    "Dependency injection failed",
    "Failed to allocate memory",
    "Invalid user input format",
    "Error loading external resource",
    "Failed to initialize module",
    "Configuration validation failed",
    "Error parsing user request",
    "Failed to retrieve asset details",
    "Error updating trade status",
    "Service crash detected",
    "Failed to bind to port",
    "Error in data serialization",
    "Failed to delete temporary files",
    "Invalid response from external API",
    "Error handling client request",
    "Failed to restart service",
    "Error during data migration",
    "Failed to release resources",
    "Error in authentication middleware",
    "Failed to log user activity",
    "Error processing webhook",
];

const CONFIG_DUMP: &[(&str, &str)] = &[
    ("max_connections", "100"),
    ("timeout_seconds", "30"),
    ("enable_logging", "true"),
    ("log_level", "DEBUG"),
    ("database_url", "jdbc:mysql://localhost:3306/tradingdb"),
    ("cache_size", "1024"),
    ("retry_attempts", "5"),
    ("api_key", "abcd1234efgh5678"),
    ("secret_key", "wxyz9876tsrq5432"),
    ("exchange_endpoint", "wss://exchange.example.com/socket"),
    ("allowed_ip_addresses", "192.168.1.1,192.168.1.2"),
    ("feature_flag_new_ui", "false"),
    ("maintenance_mode", "false"),
    ("backup_schedule", "02:00 AM daily"),
    ("security_protocol", "TLS1.2"),
    ("session_timeout", "45"),
    ("data_retention_days", "365"),
    ("max_trade_volume", "1000000"),
    ("min_order_size", "10"),
    ("currency_supported", "USD, EUR, GBP, JPY"),
    ("notification_emails", "admin@tradingapp.com,support@tradingapp.com"),
];

// ─────────────────────────────────────────────────────────────────────────────
// Types
// ─────────────────────────────────────────────────────────────────────────────

/// Level written into a generated entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GenLevel {
    Info,
    Debug,
    Warn,
    Error,
    Err,
}

impl GenLevel {
    /// All levels, in `LevelWeights::as_array` order
    pub const ALL: [GenLevel; 5] = [
        GenLevel::Info,
        GenLevel::Debug,
        GenLevel::Warn,
        GenLevel::Error,
        GenLevel::Err,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            GenLevel::Info => "INFO",
            GenLevel::Debug => "DEBUG",
            GenLevel::Warn => "WARN",
            GenLevel::Error => "ERROR",
            GenLevel::Err => "ERR",
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, GenLevel::Error | GenLevel::Err)
    }

    fn messages(&self) -> &'static [&'static str] {
        match self {
            GenLevel::Info => INFO_MESSAGES,
            GenLevel::Debug => DEBUG_MESSAGES,
            GenLevel::Warn => WARN_MESSAGES,
            GenLevel::Error => ERROR_MESSAGES,
            GenLevel::Err => ERR_MESSAGES,
        }
    }
}

/// What a generation run wrote
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationSummary {
    pub lines_requested: usize,
    pub info: usize,
    pub debug: usize,
    pub warn: usize,
    pub error: usize,
    pub err: usize,

    /// Error entries followed by a stack trace
    pub with_stack_trace: usize,

    pub config_dump: bool,
}

impl GenerationSummary {
    /// Entries tagged ERROR or ERR
    pub fn error_entries(&self) -> usize {
        self.error + self.err
    }

    /// All log entries written (excluding the config dump)
    pub fn entries(&self) -> usize {
        self.info + self.debug + self.warn + self.error + self.err
    }

    fn record(&mut self, level: GenLevel) {
        match level {
            GenLevel::Info => self.info += 1,
            GenLevel::Debug => self.debug += 1,
            GenLevel::Warn => self.warn += 1,
            GenLevel::Error => self.error += 1,
            GenLevel::Err => self.err += 1,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Generator
// ─────────────────────────────────────────────────────────────────────────────

/// Weighted random log writer
#[derive(Debug)]
pub struct LogGenerator {
    rng: StdRng,
    levels: WeightedIndex<u32>,
    clock: NaiveDateTime,
}

impl LogGenerator {
    /// Create a generator; `seed` and `start` make the output reproducible
    pub fn new(
        weights: &LevelWeights,
        seed: Option<u64>,
        start: Option<NaiveDateTime>,
    ) -> Result<Self> {
        weights.validate()?;
        let levels = WeightedIndex::new(weights.as_array())
            .map_err(|e| Error::config_invalid(format!("level weights: {}", e)))?;

        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Ok(Self {
            rng,
            levels,
            clock: start.unwrap_or_else(|| Local::now().naive_local()),
        })
    }

    /// Write `lines` entries to `out`
    pub fn write_log<W: Write>(&mut self, out: &mut W, lines: usize) -> Result<GenerationSummary> {
        let mut summary = GenerationSummary {
            lines_requested: lines,
            ..Default::default()
        };

        for index in 0..lines {
            self.clock += Duration::milliseconds(self.rng.gen_range(1..=MAX_STEP_MS));
            let level = self.pick_level();

            if index == CONFIG_DUMP_INDEX && !summary.config_dump {
                out.write_all(config_dump().as_bytes())?;
                summary.config_dump = true;
                continue;
            }

            let component = self.choose(COMPONENTS);
            let entry = self.entry_line(level, component);
            out.write_all(entry.as_bytes())?;
            out.write_all(b"\n")?;
            summary.record(level);

            if level.is_error() && self.rng.gen_bool(STACK_TRACE_PROBABILITY) {
                let depth = *STACK_TRACE_LENGTHS
                    .choose(&mut self.rng)
                    .unwrap_or(&STACK_TRACE_LENGTHS[0]);
                for frame in self.stack_trace(component, depth) {
                    out.write_all(frame.as_bytes())?;
                    out.write_all(b"\n")?;
                }
                summary.with_stack_trace += 1;
            }
        }

        out.flush()?;
        debug!(
            entries = summary.entries(),
            errors = summary.error_entries(),
            "Generated sample log"
        );
        Ok(summary)
    }

    fn pick_level(&mut self) -> GenLevel {
        GenLevel::ALL[self.levels.sample(&mut self.rng)]
    }

    fn choose(&mut self, items: &'static [&'static str]) -> &'static str {
        items.choose(&mut self.rng).copied().unwrap_or_default()
    }

    fn entry_line(&mut self, level: GenLevel, component: &str) -> String {
        let timestamp = self.clock.format(TIMESTAMP_FORMAT).to_string();
        let separator = self.choose(SEPARATORS);
        let thread = self.choose(THREADS);
        let message = self.choose(level.messages());
        let tag = level.as_str();

        if level == GenLevel::Err && self.rng.gen_bool(ERR_PATTERN_PROBABILITY) {
            return format!("{timestamp}{separator}[{thread}] {tag} ... - {message}");
        }

        if !level.is_error() && self.rng.gen_bool(OMIT_COMPONENT_PROBABILITY) {
            return format!("{timestamp}{separator}[{thread}] {tag} - {message}");
        }

        format!("{timestamp}{separator}[{thread}] {tag} {component} - {message}")
    }

    fn stack_trace(&mut self, component: &str, depth: usize) -> Vec<String> {
        let simple = simple_component_name(component);
        let mut frames = vec![
            format!("\tat {component}.methodA({simple}.java:56)"),
            format!("\tat {component}.methodB({simple}.java:78)"),
            "\tat com.tradingapp.utils.HelperClass.methodC(HelperClass.java:102)".to_string(),
            "\tat java.base/java.util.concurrent.ThreadPoolExecutor.runWorker(ThreadPoolExecutor.java:1128)".to_string(),
            "\tat java.base/java.util.concurrent.ThreadPoolExecutor$Worker.run(ThreadPoolExecutor.java:628)".to_string(),
            "\tat java.base/java.lang.Thread.run(Thread.java:834)".to_string(),
        ];
        frames.shuffle(&mut self.rng);
        frames.truncate(depth);
        frames
    }
}

/// Generate a log file from settings
pub fn generate_file(
    path: &Path,
    settings: &GeneratorSettings,
    start: Option<NaiveDateTime>,
) -> Result<GenerationSummary> {
    let mut generator = LogGenerator::new(&settings.weights, settings.generator.seed, start)?;

    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let mut out = BufWriter::new(file);
    let summary = generator.write_log(&mut out, settings.generator.lines)?;

    info!(
        "Wrote {} entries ({} errors) to {}",
        summary.entries(),
        summary.error_entries(),
        path.display()
    );
    Ok(summary)
}

/// `Current Configuration:` header, one `key = value` line per setting, then a blank line
fn config_dump() -> String {
    let mut dump = String::from("Current Configuration:\n");
    for (key, value) in CONFIG_DUMP {
        dump.push_str(&format!("{} = {}\n", key, value));
    }
    dump.push('\n');
    dump
}

/// Last segment of a dotted class path
fn simple_component_name(full_name: &str) -> &str {
    full_name.rsplit('.').next().unwrap_or(full_name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner::{is_candidate_line, scan};
    use chrono::NaiveDate;

    fn start() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 1)
            .and_then(|d| d.and_hms_milli_opt(9, 30, 0, 0))
            .unwrap()
    }

    fn generate(weights: LevelWeights, seed: u64, lines: usize) -> (String, GenerationSummary) {
        let mut generator = LogGenerator::new(&weights, Some(seed), Some(start())).unwrap();
        let mut buf = Vec::new();
        let summary = generator.write_log(&mut buf, lines).unwrap();
        (String::from_utf8(buf).unwrap(), summary)
    }

    fn errors_only() -> LevelWeights {
        LevelWeights {
            info: 0,
            debug: 0,
            warn: 0,
            error: 1,
            err: 1,
        }
    }

    #[test]
    fn test_same_seed_same_output() {
        let (a, _) = generate(LevelWeights::default(), 42, 200);
        let (b, _) = generate(LevelWeights::default(), 42, 200);
        assert_eq!(a, b);

        let (c, _) = generate(LevelWeights::default(), 43, 200);
        assert_ne!(a, c);
    }

    #[test]
    fn test_config_dump_written_once_at_index_ten() {
        let (log, summary) = generate(LevelWeights::default(), 1, 50);

        assert!(summary.config_dump);
        assert_eq!(summary.entries(), 49);
        assert_eq!(log.matches("Current Configuration:").count(), 1);
        assert!(log.contains("log_level = DEBUG\n"));
    }

    #[test]
    fn test_short_run_has_no_config_dump() {
        let (log, summary) = generate(LevelWeights::default(), 1, 10);

        assert!(!summary.config_dump);
        assert_eq!(summary.entries(), 10);
        assert!(!log.contains("Current Configuration:"));
    }

    #[test]
    fn test_config_dump_has_no_error_markers() {
        assert!(!config_dump().lines().any(is_candidate_line));
    }

    #[test]
    fn test_pools_keep_full_variety() {
        assert_eq!(COMPONENTS.len(), 10);
        assert_eq!(THREADS.len(), 16);
        assert_eq!(CONFIG_DUMP.len(), 21);

        let sizes: Vec<usize> = GenLevel::ALL.iter().map(|l| l.messages().len()).collect();
        assert_eq!(sizes, vec![31, 55, 32, 32, 32]);
    }

    #[test]
    fn test_non_error_pools_have_no_markers() {
        let non_error = GenLevel::ALL.iter().filter(|l| !l.is_error());
        for level in non_error {
            assert!(!level.messages().iter().any(|m| is_candidate_line(m)));
        }
        assert!(!THREADS.iter().chain(COMPONENTS).any(|t| is_candidate_line(t)));

        // Every message must survive last-dash extraction intact
        for level in GenLevel::ALL {
            assert!(level.messages().iter().all(|m| !m.contains('-')));
        }
    }

    #[test]
    fn test_scanner_finds_every_generated_error() {
        for seed in [3, 17, 99] {
            let (log, summary) = generate(LevelWeights::default(), seed, 1000);
            let result = scan(log.lines());

            assert_eq!(result.total_errors, summary.error_entries());
            assert_eq!(result.records.len(), result.total_errors);
            assert_eq!(
                result.records.iter().filter(|r| r.has_stack_trace()).count(),
                summary.with_stack_trace
            );
        }
    }

    #[test]
    fn test_only_error_levels() {
        let (log, summary) = generate(errors_only(), 5, 300);

        assert_eq!(summary.info + summary.debug + summary.warn, 0);
        assert_eq!(summary.error_entries(), 299);
        assert!(summary.with_stack_trace > 0);
        assert!(log.contains("] ERR ... - "));
    }

    #[test]
    fn test_stack_trace_frames_are_tab_indented() {
        let (log, _) = generate(errors_only(), 8, 300);

        let frames: Vec<&str> = log.lines().filter(|l| l.starts_with('\t')).collect();
        assert!(!frames.is_empty());
        assert!(frames.iter().all(|f| f.starts_with("\tat ")));
    }

    #[test]
    fn test_timestamps_advance() {
        let (log, _) = generate(LevelWeights::default(), 11, 30);

        let stamps: Vec<NaiveDateTime> = log
            .lines()
            .filter(|l| l.starts_with("2024-"))
            .map(|l| NaiveDateTime::parse_from_str(&l[..23], TIMESTAMP_FORMAT).unwrap())
            .collect();

        assert_eq!(stamps.len(), 29);
        assert!(stamps.windows(2).all(|w| w[0] < w[1]));
        assert!(stamps[0] > start());
    }

    #[test]
    fn test_rejects_all_zero_weights() {
        let weights = LevelWeights {
            info: 0,
            debug: 0,
            warn: 0,
            error: 0,
            err: 0,
        };
        let err = LogGenerator::new(&weights, Some(1), None).unwrap_err();
        assert!(matches!(err, Error::ConfigInvalid { .. }));
    }

    #[test]
    fn test_generate_file() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("sample.log");

        let mut settings = GeneratorSettings::default();
        settings.generator.lines = 120;
        settings.generator.seed = Some(9);

        let summary = generate_file(&path, &settings, Some(start())).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();

        assert_eq!(summary.entries(), 119);
        assert_eq!(scan(content.lines()).total_errors, summary.error_entries());
    }

    #[test]
    fn test_simple_component_name() {
        assert_eq!(
            simple_component_name("com.tradingapp.order.OrderService"),
            "OrderService"
        );
        assert_eq!(simple_component_name("Plain"), "Plain");
    }
}
