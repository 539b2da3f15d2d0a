//! Combinators driven end to end.

use std::cell::{Cell, RefCell};

use coro::{Coro, Yield};
use futures::StreamExt;

#[test]
fn test_seq_five_has_four_suspensions() {
    let seen = RefCell::new(Vec::new());
    let seen = &seen;

    let mut co = Coro::new(|y| async move {
        let mut seq = y.seq(5);
        while let Some(i) = seq.next().await {
            seen.borrow_mut().push(i);
        }
    });

    assert_eq!(co.run_to_end(), 4);
    assert_eq!(*seen.borrow(), [0, 1, 2, 3, 4]);
}

#[test]
fn test_seq_steps_one_item_per_resume() {
    let seen = RefCell::new(Vec::new());
    let seen = &seen;

    let mut co = Coro::new(|y| async move {
        let mut seq = y.seq(3);
        while let Some(i) = seq.next().await {
            seen.borrow_mut().push(i);
        }
    });

    assert!(co.resume());
    assert_eq!(*seen.borrow(), [0]);
    assert!(co.resume());
    assert_eq!(*seen.borrow(), [0, 1]);
    assert!(!co.resume());
    assert_eq!(*seen.borrow(), [0, 1, 2]);
}

#[test]
fn test_unbounded_seq_until_stopped() {
    let last = Cell::new(None);
    let last = &last;

    let mut co = Coro::new(|y| async move {
        let mut seq = y.seq_unbounded();
        while let Some(i) = seq.next().await {
            last.set(Some(i));
        }
        "stopped"
    });

    assert_eq!(co.run_steps(100), 100);
    assert_eq!(last.get(), Some(99));

    co.stop();
    assert_eq!(last.get(), Some(99));
    assert_eq!(co.take_output(), Some("stopped"));
}

#[test]
fn test_repeat_until_waits_for_driver_flag() {
    let door_open = Cell::new(false);
    let entered = Cell::new(false);
    let (door_open, entered) = (&door_open, &entered);

    let mut co = Coro::new(|y| async move {
        if y.repeat_until(|| door_open.get(), true).await {
            entered.set(true);
        }
    });

    for _ in 0..5 {
        assert!(co.resume());
    }
    assert!(!entered.get());

    door_open.set(true);
    assert!(!co.resume());
    assert!(entered.get());
}

#[test]
fn test_repeat_while_stopped_midway() {
    let entered = Cell::new(false);
    let entered = &entered;

    let mut co = Coro::new(|y| async move {
        if y.repeat_while(|| true, false).await {
            entered.set(true);
        }
    });

    assert_eq!(co.run_steps(3), 3);
    co.stop();

    assert!(!entered.get());
    assert!(co.is_exhausted());
}

async fn wait_frames(
    y: &Yield,
    frames: usize,
    label: &'static str,
    log: &RefCell<Vec<&'static str>>,
) -> bool {
    log.borrow_mut().push(label);
    y.skip(frames).await
}

#[test]
fn test_scripted_sequence() {
    let log = RefCell::new(Vec::new());
    let log = &log;

    let mut co = Coro::new(|y| async move {
        wait_frames(&y, 2, "fade in", log).await
            && wait_frames(&y, 1, "talk", log).await
            && wait_frames(&y, 3, "fade out", log).await
    });

    assert_eq!(co.run_to_end(), 6);
    assert_eq!(*log.borrow(), ["fade in", "talk", "fade out"]);
    assert_eq!(co.take_output(), Some(true));
}

#[test]
fn test_scripted_sequence_abandoned() {
    let log = RefCell::new(Vec::new());
    let log = &log;

    let mut co = Coro::new(|y| async move {
        wait_frames(&y, 2, "fade in", log).await
            && wait_frames(&y, 1, "talk", log).await
            && wait_frames(&y, 3, "fade out", log).await
    });

    assert_eq!(co.run_steps(2), 2);
    co.stop();

    assert_eq!(*log.borrow(), ["fade in"]);
    assert_eq!(co.take_output(), Some(false));
}
