use taskmate::prelude::*;

#[test]
fn prelude_exports_expected_items() {
    let mut cfg = Config::default();
    let _ = LogLevel::Debug;
    let _err = TaskError::Interrupted;
    // Use type inference to ensure signatures are visible.
    let _relocate_fn: fn(&std::path::Path, &std::path::Path, &std::ffi::OsStr) -> MoveOutcome =
        relocate;
    let _load: fn() -> TMResult<taskmate::config::LoadResult> = load_or_init;
    let _ = default_config_path();
    let _shutdown_fn: fn() = request_shutdown;
    let _ = RetryPolicy::default();
    let _ = FallbackPrices.current_price("AAPL");
    let _ = SessionState::default();
    cfg.retry_attempts = 1;
}
