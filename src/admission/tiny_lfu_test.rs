//! Tests for the TinyLFU admitter.
//

#[cfg(test)]
mod tests {
    use crate::admission::{new_admission, Admission, SketchError, TinyLfu};
    use crate::config::Admission as AdmissionConfig;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::time::timeout;

    // Sized so no aging pass runs during a single test.
    fn cfg_test() -> AdmissionConfig {
        AdmissionConfig {
            enabled: true,
            is_enabled: Arc::new(AtomicBool::new(true)),
            maximum_size: Some(100_000),
        }
    }

    // key returns a deterministic key for index i (1-based to avoid zero).
    fn key(i: usize) -> u64 {
        (i + 1) as u64
    }

    fn record_twice(tlfu: &TinyLfu, keys: &[u64]) {
        for k in keys {
            tlfu.record(k);
            tlfu.record(k);
        }
    }

    fn record_once(tlfu: &TinyLfu, keys: &[u64]) {
        for k in keys {
            tlfu.record(k);
        }
    }

    // AdmitStats tracks allow() outcomes.
    #[derive(Default)]
    struct AdmitStats {
        yes: usize,
        no: usize,
    }

    impl AdmitStats {
        fn observe(&mut self, admitted: bool) {
            if admitted {
                self.yes += 1;
            } else {
                self.no += 1;
            }
        }

        fn rate(&self) -> f64 {
            let total = self.yes + self.no;
            if total == 0 {
                return 0.0;
            }
            self.yes as f64 / total as f64
        }
    }

    /// Brand-new candidates against warm victims are almost always rejected.
    #[test]
    fn test_tiny_lfu_unique_stream_rejects_after_warmup() {
        let tlfu = TinyLfu::new(&cfg_test()).unwrap();

        const WARM_N: usize = 80_000;
        const TRIALS: usize = 50_000;

        let warm: Vec<u64> = (0..WARM_N).map(key).collect();
        record_twice(&tlfu, &warm);

        let mut stats = AdmitStats::default();
        let mut rng = StdRng::seed_from_u64(1);
        for i in 0..TRIALS {
            let candidate = key(WARM_N + 1 + i);
            let victim = warm[rng.gen_range(0..WARM_N)];
            stats.observe(tlfu.allow(&candidate, &victim));
        }

        let rate = stats.rate();
        assert!(
            rate < 0.10,
            "unique-stream admit rate too high: got={:.2}% want<10% (yes={} no={})",
            100.0 * rate,
            stats.yes,
            stats.no
        );
    }

    /// Hot keys beat cold keys, and cold keys lose to hot ones.
    #[test]
    fn test_tiny_lfu_prefers_hot_over_cold() {
        let tlfu = TinyLfu::new(&cfg_test()).unwrap();

        const HOT_N: usize = 2_000;
        const COLD_N: usize = 60_000;
        const TRIALS: usize = 50_000;

        let hot: Vec<u64> = (0..HOT_N).map(|i| key(i + 1)).collect();
        let cold: Vec<u64> = (0..COLD_N).map(|i| key(10_000 + i + 1)).collect();

        for _ in 0..8 {
            record_twice(&tlfu, &hot);
        }
        record_once(&tlfu, &cold);

        let mut rng = StdRng::seed_from_u64(2);

        let mut hot_wins = AdmitStats::default();
        for _ in 0..TRIALS {
            let candidate = hot[rng.gen_range(0..HOT_N)];
            let victim = cold[rng.gen_range(0..COLD_N)];
            hot_wins.observe(tlfu.allow(&candidate, &victim));
        }

        let mut cold_wins = AdmitStats::default();
        for _ in 0..TRIALS {
            let candidate = cold[rng.gen_range(0..COLD_N)];
            let victim = hot[rng.gen_range(0..HOT_N)];
            cold_wins.observe(tlfu.allow(&candidate, &victim));
        }

        assert!(
            hot_wins.rate() >= 0.85,
            "hot vs cold admit too low: got={:.2}% want>=85%",
            100.0 * hot_wins.rate()
        );
        assert!(
            cold_wins.rate() <= 0.15,
            "cold vs hot admit too high: got={:.2}% want<=15%",
            100.0 * cold_wins.rate()
        );
    }

    /// Ties reject the candidate.
    #[test]
    fn test_tiny_lfu_tie_rejects() {
        let tlfu = TinyLfu::with_capacity(1024).unwrap();
        assert!(!tlfu.allow("a", "b"), "two unseen keys tie at zero");
        tlfu.record("a");
        tlfu.record("a");
        tlfu.record("b");
        tlfu.record("b");
        assert_eq!(tlfu.estimate("a"), tlfu.estimate("b"));
        assert!(!tlfu.allow("a", "b"));
        tlfu.record("a");
        assert!(tlfu.allow("a", "b"));
    }

    #[test]
    fn test_tiny_lfu_disabled_admits_everything() {
        let mut cfg = cfg_test();
        cfg.enabled = false;
        cfg.is_enabled = Arc::new(AtomicBool::new(false));
        let tlfu = TinyLfu::new(&cfg).unwrap();

        tlfu.record("a");
        tlfu.record("a");
        assert_eq!(tlfu.estimate("a"), 0, "disabled admitter records nothing");
        assert!(tlfu.allow("z", "a"));
    }

    /// The shared flag toggles admission at runtime.
    #[test]
    fn test_tiny_lfu_runtime_toggle() {
        let cfg = cfg_test();
        let tlfu = TinyLfu::new(&cfg).unwrap();
        for _ in 0..4 {
            tlfu.record("victim");
        }
        assert!(!tlfu.allow("candidate", "victim"));

        cfg.is_enabled.store(false, Ordering::Relaxed);
        assert!(!tlfu.is_enabled());
        assert!(tlfu.allow("candidate", "victim"));

        cfg.is_enabled.store(true, Ordering::Relaxed);
        assert!(!tlfu.allow("candidate", "victim"));
    }

    #[test]
    fn test_tiny_lfu_rejects_negative_capacity() {
        let mut cfg = cfg_test();
        cfg.maximum_size = Some(-5);
        assert_eq!(TinyLfu::new(&cfg).err(), Some(SketchError::InvalidCapacity(-5)));
    }

    /// Without config the sketch waits for ensure_capacity and admits nothing.
    #[test]
    fn test_new_admission_without_config() {
        let adm: Box<dyn Admission<str>> = new_admission(None).unwrap();
        adm.record("a");
        adm.record("a");
        assert_eq!(adm.estimate("a"), 0);
        assert!(!adm.allow("a", "b"));

        adm.ensure_capacity(128).unwrap();
        adm.record("a");
        adm.record("a");
        assert_eq!(adm.estimate("a"), 2);
        assert!(adm.allow("a", "b"));

        adm.reset();
        assert_eq!(adm.estimate("a"), 1, "aging halves 1 to 0; doorkeeper adds one");
    }

    #[test]
    fn test_new_admission_from_config() {
        let cfg = cfg_test();
        let adm: Box<dyn Admission<u64>> = new_admission(Some(&cfg)).unwrap();
        adm.record(&7);
        adm.record(&7);
        assert_eq!(adm.estimate(&7), 2);
    }

    /// Not a correctness proof for frequencies, but a fast concurrency check.
    #[tokio::test]
    async fn test_tiny_lfu_concurrent_smoke() {
        let tlfu = Arc::new(TinyLfu::new(&cfg_test()).unwrap());
        let workers = num_cpus::get().max(2);

        let mut join_set = tokio::task::JoinSet::new();

        for i in 0..workers {
            let tlfu_clone = tlfu.clone();
            join_set.spawn(async move {
                let mut rng = StdRng::seed_from_u64((i + 1) as u64);
                for _ in 0..50_000 {
                    let k: u64 = rng.gen();
                    tlfu_clone.record(&k);
                }
            });
        }

        for i in 0..(workers / 2 + 1) {
            let tlfu_clone = tlfu.clone();
            join_set.spawn(async move {
                let mut rng = StdRng::seed_from_u64((1u64 << 32) + (i + 1) as u64);
                for _ in 0..50_000 {
                    let a: u64 = rng.gen();
                    let b: u64 = rng.gen();
                    let _ = tlfu_clone.allow(&a, &b);
                }
            });
        }

        let result = timeout(Duration::from_secs(10), async {
            while let Some(result) = join_set.join_next().await {
                result.unwrap();
            }
        })
        .await;

        assert!(result.is_ok(), "timeout: concurrent smoke took too long");
    }
}
