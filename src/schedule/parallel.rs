use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;
use std::thread;

use log::debug;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Runs up to `budget` independent attempts across one thread per seed.
///
/// Attempts are claimed from a shared counter, so the total never exceeds the
/// budget no matter how many workers run. The first attempt that returns
/// `Some` wins and every worker stops before claiming another attempt.
pub fn first_success<T, F>(budget: usize, seeds: &[u64], attempt: F) -> Option<T>
where
    T: Send,
    F: Fn(&mut StdRng) -> Option<T> + Sync,
{
    let claimed = AtomicUsize::new(0);
    let stop = AtomicBool::new(false);
    let found: Mutex<Option<T>> = Mutex::new(None);

    thread::scope(|scope| {
        for (worker, &seed) in seeds.iter().enumerate() {
            let (claimed, stop, found, attempt) = (&claimed, &stop, &found, &attempt);
            scope.spawn(move || {
                let mut rng = StdRng::seed_from_u64(seed);
                while !stop.load(Ordering::Relaxed) {
                    if claimed.fetch_add(1, Ordering::Relaxed) >= budget {
                        break;
                    }
                    if let Some(result) = attempt(&mut rng) {
                        if !stop.swap(true, Ordering::AcqRel) {
                            debug!("Worker {} found a schedule", worker);
                            let mut slot = found.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
                            *slot = Some(result);
                        }
                        break;
                    }
                }
            });
        }
    });

    found.into_inner().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn test_never_exceeds_budget() {
        let calls = AtomicUsize::new(0);
        let result: Option<()> = first_success(25, &[1, 2, 3, 4], |_| {
            calls.fetch_add(1, Ordering::Relaxed);
            None
        });
        assert!(result.is_none());
        assert_eq!(calls.load(Ordering::Relaxed), 25);
    }

    #[test]
    fn test_returns_first_success() {
        let result = first_success(1_000, &[10, 20], |rng| {
            let roll: u32 = rng.gen_range(0..10);
            (roll == 3).then_some(roll)
        });
        assert_eq!(result, Some(3));
    }

    #[test]
    fn test_zero_budget_runs_nothing() {
        let result = first_success(0, &[1], |_| Some(1));
        assert_eq!(result, None);
    }
}
