// src/core/pool.rs
use std::{
    panic,
    thread,
    sync::{ mpsc, Arc, atomic::{ AtomicBool, AtomicUsize, Ordering }},
};

/// Map `f` over `items` on at most `workers` threads.
///
/// Results come back in input order. The first error stops workers from
/// picking up new items and is returned once in-flight calls have drained.
/// A panic in `f` is re-raised on the calling thread after the workers
/// have stopped.
/// `on_done` runs on the calling thread after every successful item, with
/// the item and the number completed so far.
pub fn map_bounded<T, R, E, F, D>(
    items: Vec<T>,
    workers: usize,
    f: F,
    mut on_done: D,
) -> Result<Vec<R>, E>
where
    T: Send + Sync + 'static,
    R: Send + 'static,
    E: Send + 'static,
    F: Fn(&T) -> Result<R, E> + Send + Sync + 'static,
    D: FnMut(&T, usize),
{
    let total = items.len();
    if total == 0 {
        return Ok(Vec::new());
    }

    let items = Arc::new(items);
    let f = Arc::new(f);
    let next = Arc::new(AtomicUsize::new(0));
    let abort = Arc::new(AtomicBool::new(false));
    let (tx, rx) = mpsc::channel::<(usize, Result<R, E>)>();

    let workers = workers.min(total).max(1);
    let mut handles = Vec::with_capacity(workers);

    for _ in 0..workers {
        let items = Arc::clone(&items);
        let f = Arc::clone(&f);
        let next = Arc::clone(&next);
        let abort = Arc::clone(&abort);
        let tx = tx.clone();

        handles.push(thread::spawn(move || {
            loop {
                if abort.load(Ordering::Relaxed) {
                    break;
                }
                let i = next.fetch_add(1, Ordering::Relaxed);
                if i >= items.len() {
                    break;
                }
                let result = f(&items[i]);
                if tx.send((i, result)).is_err() {
                    break;
                }
            }
        }));
    }
    drop(tx); // main thread is sole receiver now

    let mut slots: Vec<Option<R>> = (0..total).map(|_| None).collect();
    let mut done = 0usize;
    let mut first_err: Option<E> = None;

    for (i, result) in rx {
        match result {
            Ok(value) => {
                slots[i] = Some(value);
                done += 1;
                if first_err.is_none() {
                    on_done(&items[i], done);
                }
            }
            Err(e) => {
                abort.store(true, Ordering::Relaxed);
                if first_err.is_none() {
                    first_err = Some(e);
                }
            }
        }
    }

    // a panicking worker leaves its slot empty
    for h in handles {
        if let Err(payload) = h.join() {
            panic::resume_unwind(payload);
        }
    }

    if let Some(e) = first_err {
        return Err(e);
    }

    Ok(slots.into_iter().flatten().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn order_is_restored() {
        let items: Vec<u64> = (0..50).collect();
        // later items finish first
        let out: Result<Vec<u64>, String> = map_bounded(items, 8, |n| {
            thread::sleep(Duration::from_millis(50 - *n));
            Ok(n * 2)
        }, |_, _| {});
        assert_eq!(out.unwrap(), (0..50).map(|n| n * 2).collect::<Vec<_>>());
    }

    #[test]
    fn progress_counts_every_item() {
        let mut seen = Vec::new();
        let out: Result<Vec<u32>, String> =
            map_bounded(vec![1, 2, 3], 2, |n| Ok(*n), |_, done| seen.push(done));
        assert_eq!(out.unwrap().len(), 3);
        assert_eq!(seen, vec![1, 2, 3]);
    }

    #[test]
    fn first_error_wins() {
        let out: Result<Vec<u32>, String> = map_bounded(
            (0..20).collect(),
            1,
            |n| if *n == 3 { Err(format!("boom {n}")) } else { Ok(*n) },
            |_, _| {},
        );
        assert_eq!(out.unwrap_err(), "boom 3");
    }

    #[test]
    fn empty_input() {
        let out: Result<Vec<u32>, String> = map_bounded(Vec::<u32>::new(), 4, |n| Ok(*n), |_, _| {});
        assert!(out.unwrap().is_empty());
    }

    #[test]
    #[should_panic(expected = "bad item 2")]
    fn worker_panic_reaches_caller() {
        let _: Result<Vec<u32>, String> = map_bounded(
            vec![1, 2, 3],
            2,
            |n| {
                if *n == 2 {
                    panic!("bad item {n}");
                }
                Ok(*n)
            },
            |_, _| {},
        );
    }
}
