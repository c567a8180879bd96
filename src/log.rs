use env_logger::Builder;
use std::io::Write;

/// Installs the crate's `env_logger` format: level, target, and call site
/// on every line. Intended for demo binaries and tests; library code never
/// initializes logging on its own.
pub fn init_log() {
    let mut builder = Builder::from_default_env();
    builder
        .format_timestamp_secs()
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} - {}] [{}:{}] {}",
                record.level(),
                record.target(),
                record.file().unwrap_or("?"),
                record.line().unwrap_or(0),
                record.args()
            )
        })
        .init();
}
