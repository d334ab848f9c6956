use super::{Config, SketchBox};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

/// Creates a new test configuration.
pub fn new_test_config() -> Config {
    Config {
        sketch: SketchBox {
            env: super::TEST.to_string(),
            logs: Some(super::Logs {
                level: Some("debug".to_string()),
            }),
            admission: Some(super::Admission {
                enabled: true,
                is_enabled: Arc::new(AtomicBool::new(true)),
                maximum_size: Some(1024),
            }),
            stats: Some(super::Stats { enabled: true }),
            trace: Some(super::Trace {
                keys: Some(10_000),
                accesses: Some(100_000),
                skew: Some(0.9),
                seed: Some(42),
            }),
        },
    }
}
