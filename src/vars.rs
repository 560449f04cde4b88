macro_rules! env_config {
    ($name:ident, $default:expr) => {
        paste::paste! {
            pub static [<PURGER_ $name>]: ::std::sync::LazyLock<&'static str> = ::std::sync::LazyLock::new(|| {
                ::std::boxed::Box::leak(
                    ::std::env::var(stringify!([<PURGER_ $name>]))
                        .unwrap_or_else(|_| $default.to_string())
                        .into_boxed_str()
                )
            });
        }
    };
}

// 聚合日志根目录
env_config!(REMOTE_APP_LOG_DIR, "/tmp/logs");
// 每个用户目录下存放应用日志的子目录
env_config!(REMOTE_APP_LOG_DIR_SUFFIX, "logs");
