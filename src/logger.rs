use tracing_subscriber::{EnvFilter, fmt};

pub fn init() {
    // 默认 info 级别，可通过 RUST_LOG 覆盖
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    // 标准输出只留给报告，日志写到标准错误
    let result = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
    if let Err(e) = result {
        eprintln!("Failed to initialize logger: {e}");
    }
}
