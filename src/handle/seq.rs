//! Counting sequences that suspend between items.

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures_core::stream::{FusedStream, Stream};

use crate::handle::suspend::{Suspend, Yield};

/// A single-pass stream of indices, one suspension apart.
///
/// The first item is produced without suspending. Every later item is
/// preceded by exactly one suspension, which only happens when the consumer
/// asks for that item: a consumer that stops polling (breaks out of its
/// loop) causes no further suspensions, and the last index of a bounded
/// sequence is not followed by one. If a suspension reports that the
/// coroutine is being stopped, the stream ends.
///
/// Created by [`Yield::seq`] and [`Yield::seq_unbounded`].
#[derive(Debug)]
#[must_use = "streams do nothing unless polled"]
pub struct Seq {
    handle: Yield,
    next: usize,
    end: Option<usize>,
    pending: Option<Suspend>,
    done: bool,
}

impl Seq {
    pub(crate) fn new(handle: Yield, end: Option<usize>) -> Self {
        Self {
            handle,
            next: 0,
            end,
            pending: None,
            done: false,
        }
    }

    fn remaining(&self) -> Option<usize> {
        if self.done {
            return Some(0);
        }
        self.end.map(|end| end.saturating_sub(self.next))
    }
}

impl Stream for Seq {
    type Item = usize;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();

        if this.remaining() == Some(0) {
            this.done = true;
            return Poll::Ready(None);
        }

        if this.next > 0 {
            let handle = &this.handle;
            let suspend = this.pending.get_or_insert_with(|| handle.suspend());
            match Pin::new(suspend).poll(cx) {
                Poll::Pending => return Poll::Pending,
                Poll::Ready(granted) => {
                    this.pending = None;
                    if !granted {
                        this.done = true;
                        return Poll::Ready(None);
                    }
                }
            }
        }

        let index = this.next;
        this.next += 1;
        Poll::Ready(Some(index))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        // A stop can cut the sequence short at any point
        (0, self.remaining())
    }
}

impl FusedStream for Seq {
    fn is_terminated(&self) -> bool {
        self.done
    }
}

#[cfg(test)]
mod tests {
    use crate::engine::Coro;
    use futures::stream::{FusedStream, Stream, StreamExt};
    use std::cell::RefCell;

    #[test]
    fn test_seq_full_consumption() {
        let seen = RefCell::new(Vec::new());
        let seen = &seen;
        let mut co = Coro::new(|y| async move {
            let mut seq = y.seq(5);
            while let Some(i) = seq.next().await {
                seen.borrow_mut().push(i);
            }
            seq.is_terminated()
        });

        assert_eq!(co.run_to_end(), 4);
        assert_eq!(*seen.borrow(), [0, 1, 2, 3, 4]);
        assert_eq!(co.take_output(), Some(true));
    }

    #[test]
    fn test_seq_empty() {
        let mut co = Coro::new(|y| async move { y.seq(0).next().await });

        assert!(!co.resume());
        assert_eq!(co.take_output(), Some(None));
    }

    #[test]
    fn test_seq_consumer_break() {
        let mut co = Coro::new(|y| async move {
            let mut seq = y.seq(10);
            let mut last = None;
            while let Some(i) = seq.next().await {
                last = Some(i);
                if i == 2 {
                    break;
                }
            }
            last
        });

        assert_eq!(co.run_to_end(), 2);
        assert_eq!(co.take_output(), Some(Some(2)));
    }

    #[test]
    fn test_seq_ends_on_stop() {
        let seen = RefCell::new(Vec::new());
        let seen = &seen;
        let mut co = Coro::new(|y| async move {
            let mut seq = y.seq(10);
            while let Some(i) = seq.next().await {
                seen.borrow_mut().push(i);
            }
        });

        assert_eq!(co.run_steps(2), 2);
        co.stop();

        assert_eq!(*seen.borrow(), [0, 1]);
        assert!(co.is_exhausted());
    }

    #[test]
    fn test_seq_unbounded_collects_prefix() {
        let mut co = Coro::new(|y| async move {
            y.seq_unbounded().take(4).collect::<Vec<_>>().await
        });

        assert_eq!(co.run_to_end(), 3);
        assert_eq!(co.take_output(), Some(vec![0, 1, 2, 3]));
    }

    #[test]
    fn test_seq_size_hint() {
        let mut co = Coro::new(|y| async move {
            let mut seq = y.seq(3);
            let before = seq.size_hint();
            seq.next().await;
            (before, seq.size_hint(), y.seq_unbounded().size_hint())
        });

        assert!(!co.resume());
        assert_eq!(
            co.take_output(),
            Some(((0, Some(3)), (0, Some(2)), (0, None)))
        );
    }
}
