use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use super::*;

#[tokio::test]
async fn preserves_positions_when_later_items_finish_first() {
    let items: Vec<usize> = (0..6).collect();
    let failing = 3usize;

    let outcomes = run_in_batches(&items, 6, Duration::ZERO, |&i| async move {
        // Earlier indices sleep longer, so completion order is reversed.
        tokio::time::sleep(Duration::from_millis(((6 - i) * 15) as u64)).await;
        if i == failing {
            Err(format!("boom {i}"))
        } else {
            Ok(i * 10)
        }
    })
    .await;

    assert_eq!(outcomes.len(), 6);
    for (i, outcome) in outcomes.iter().enumerate() {
        if i == failing {
            assert_eq!(outcome.as_ref().unwrap_err(), "boom 3");
        } else {
            assert_eq!(*outcome.as_ref().unwrap(), i * 10);
        }
    }
}

#[tokio::test]
async fn runs_group_members_concurrently() {
    let items: Vec<u32> = (0..4).collect();
    let started = Instant::now();

    let outcomes = run_in_batches(&items, 4, Duration::ZERO, |&i| async move {
        tokio::time::sleep(Duration::from_millis(200)).await;
        Ok::<u32, ()>(i)
    })
    .await;

    assert_eq!(outcomes.len(), 4);
    assert!(
        started.elapsed() < Duration::from_millis(700),
        "four 200ms calls in one group should overlap, took {:?}",
        started.elapsed()
    );
}

#[tokio::test]
async fn never_exceeds_batch_size_in_flight() {
    let items: Vec<u32> = (0..7).collect();
    let in_flight = Arc::new(AtomicUsize::new(0));
    let peak = Arc::new(AtomicUsize::new(0));

    let outcomes = run_in_batches(&items, 3, Duration::from_millis(5), |&i| {
        let in_flight = Arc::clone(&in_flight);
        let peak = Arc::clone(&peak);
        async move {
            let now = in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            peak.fetch_max(now, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(20)).await;
            in_flight.fetch_sub(1, Ordering::SeqCst);
            Ok::<u32, ()>(i)
        }
    })
    .await;

    let values: Vec<u32> = outcomes.into_iter().map(Result::unwrap).collect();
    assert_eq!(values, vec![0, 1, 2, 3, 4, 5, 6]);
    assert_eq!(peak.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn waits_between_groups_but_not_after_last() {
    let items: Vec<u32> = (0..5).collect();
    let starts: Arc<Mutex<Vec<(u32, Instant)>>> = Arc::new(Mutex::new(Vec::new()));
    let delay = Duration::from_millis(120);
    let began = Instant::now();

    run_in_batches(&items, 2, delay, |&i| {
        let starts = Arc::clone(&starts);
        async move {
            starts.lock().unwrap().push((i, Instant::now()));
            Ok::<(), ()>(())
        }
    })
    .await;

    let total = began.elapsed();
    let starts = starts.lock().unwrap();
    let start_of = |i: u32| starts.iter().find(|(n, _)| *n == i).unwrap().1;

    // Groups: [0,1] [2,3] [4] => two pauses.
    assert!(start_of(2).duration_since(start_of(1)) >= delay);
    assert!(start_of(4).duration_since(start_of(3)) >= delay);
    assert!(total >= delay * 2);
    assert!(
        total < delay * 3,
        "no pause expected after the final group, took {total:?}"
    );
}

#[tokio::test]
async fn zero_batch_size_is_treated_as_one() {
    let items = vec!["a", "b"];
    let outcomes =
        run_in_batches(&items, 0, Duration::ZERO, |s| async move { Ok::<_, ()>(s.len()) }).await;
    assert_eq!(outcomes.len(), 2);
}

#[tokio::test]
async fn empty_input_yields_empty_output() {
    let items: Vec<u32> = Vec::new();
    let calls = AtomicUsize::new(0);
    let outcomes = run_in_batches(&items, 20, Duration::from_secs(5), |_| {
        calls.fetch_add(1, Ordering::SeqCst);
        async { Ok::<(), ()>(()) }
    })
    .await;
    assert!(outcomes.is_empty());
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}
