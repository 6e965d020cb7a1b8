use env_logger::Builder;
use std::io::Write;

/// Initialize logging with app-wide defaults.
///
/// Records at or above `level` are displayed. Setting the env var
/// RUST_LOG overrides this.
///
/// Output format can be made systemd-friendly by setting
/// RUST_LOG_FORMAT to SYSTEMD.
pub fn init(level: log::LevelFilter) {
    init_with_info_modules(level, &[])
}

/// Initialize logging, showing info logs of some modules.
///
/// Works like [init], with `info_modules` logged at info level by
/// default.
pub fn init_with_info_modules(level: log::LevelFilter, info_modules: &[&str]) {
    let mut builder = Builder::new();

    if std::env::var("RUST_LOG_FORMAT").is_ok_and(|format| format == "SYSTEMD") {
        enable_systemd_log_format(&mut builder);
    }

    builder.filter_level(level);
    for module in info_modules {
        builder.filter_module(module, log::LevelFilter::Info);
    }

    builder.parse_default_env();
    builder.init();
}

/// Prefix records with their syslog priority (RFC 5424) and leave
/// timestamps to the logging facility.
fn enable_systemd_log_format(builder: &mut Builder) {
    builder.format(|fmt, record| {
        let priority = match record.level() {
            log::Level::Error => 3,
            log::Level::Warn => 4,
            log::Level::Info => 5,
            log::Level::Debug | log::Level::Trace => 7,
        };
        writeln!(fmt, "<{priority}>{}: {}", record.target(), record.args())
    });
}
