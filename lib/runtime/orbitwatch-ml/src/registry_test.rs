use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;

use rand::SeedableRng;

use orbitwatch_domain::config::ScoringConfig;

use crate::registry::ModelRegistry;
use crate::scorer::Scorer;
use crate::scorer_test::{healthy_corpus, healthy_sample};
use crate::trainer::Trainer;

#[test]
fn install_and_get_round_trip() {
    let registry = ModelRegistry::new();
    assert!(registry.is_empty());
    assert!(registry.get(25544).is_none());

    let trainer = Trainer::new(1, 42);
    registry.install(25544, trainer.fit(&healthy_corpus(32, 1)).unwrap());
    assert_eq!(registry.len(), 1);
    assert_eq!(registry.trained_ids(), vec![25544]);
    assert!(registry.get(25544).is_some());

    registry.clear();
    assert!(registry.is_empty());
}

#[test]
fn retraining_swaps_atomically_under_concurrent_scoring() {
    let registry = ModelRegistry::new();
    let trainer = Trainer::new(1, 42);
    // Two generations distinguishable by corpus length.
    let old_len = 32;
    let new_len = 64;
    registry.install(25544, trainer.fit(&healthy_corpus(old_len, 1)).unwrap());

    let scorer = Scorer::from_config(&ScoringConfig::default());
    let done = AtomicBool::new(false);

    thread::scope(|scope| {
        let readers: Vec<_> = (0..4)
            .map(|seed| {
                let registry = &registry;
                let scorer = &scorer;
                let done = &done;
                scope.spawn(move || {
                    let mut noise =
                        rand_chacha::ChaCha8Rng::seed_from_u64(seed);
                    while !done.load(Ordering::Relaxed) {
                        let set = registry.get(25544).expect("entry must always exist");
                        // Either generation is fine; a half-installed set
                        // would break the corpus-length invariant or panic.
                        assert!(set.corpus_len == old_len || set.corpus_len == new_len);
                        let report =
                            scorer.score_with(&set, 25544, &healthy_sample(&mut noise));
                        assert!((0.0..=100.0).contains(&report.aggregate_health));
                    }
                })
            })
            .collect();

        for generation in 0..10 {
            let len = if generation % 2 == 0 { new_len } else { old_len };
            let set = trainer.fit(&healthy_corpus(len, generation)).unwrap();
            registry.install(25544, set);
        }
        done.store(true, Ordering::Relaxed);
        for reader in readers {
            reader.join().unwrap();
        }
    });
}
