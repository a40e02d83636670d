use futures_core::stream::Stream;
use pin_project::pin_project;
use std::pin::Pin;
use std::task::{Context, Poll};

/// Extension trait that provides additional utility methods for Stream types.
pub trait ExecRxStreamExt: Stream {
    /// Creates a stream that skips consecutive duplicates and every item equal to `except`.
    ///
    /// An item is compared against the last item the inner stream produced, whether or
    /// not that item was yielded, so `[1, 0, 1]` with `except = 0` yields `1` twice.
    ///
    /// ## Examples
    ///
    /// ```
    /// use execrx::ExecRxStreamExt;
    /// use futures::{stream, StreamExt};
    ///
    /// # futures::executor::block_on(async {
    /// let items: Vec<i32> = stream::iter([0, 3, 3, 5, 0, 5])
    ///     .distinct_except(0)
    ///     .collect()
    ///     .await;
    /// assert_eq!(items, vec![3, 5, 5]);
    /// # });
    /// ```
    fn distinct_except(self, except: Self::Item) -> DistinctExcept<Self, Self::Item>
    where
        Self::Item: Clone + PartialEq,
        Self: Sized,
    {
        DistinctExcept {
            stream: self,
            last: None,
            except,
        }
    }
}
impl<T: ?Sized> ExecRxStreamExt for T where T: Stream {}

/// A stream that drops consecutive duplicates and a sentinel value.
///
/// This stream is created by the `distinct_except` method on `ExecRxStreamExt`.
#[pin_project(project = DistinctExceptProj)]
#[derive(Debug)]
#[must_use = "Streams do nothing unless polled"]
pub struct DistinctExcept<A, T> {
    #[pin]
    stream: A,
    last: Option<T>,
    except: T,
}

impl<A, T> Stream for DistinctExcept<A, T>
where
    A: Stream<Item = T>,
    T: Clone + PartialEq,
{
    type Item = T;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let DistinctExceptProj {
            mut stream,
            last,
            except,
        } = self.project();

        loop {
            match stream.as_mut().poll_next(cx) {
                Poll::Ready(Some(value)) => {
                    if last.as_ref() == Some(&value) {
                        continue;
                    }
                    *last = Some(value.clone());
                    if value == *except {
                        continue;
                    }
                    return Poll::Ready(Some(value));
                }
                Poll::Ready(None) => return Poll::Ready(None),
                Poll::Pending => return Poll::Pending,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::{stream, StreamExt};

    #[tokio::test]
    async fn test_distinct_except_drops_duplicates() {
        let items: Vec<i32> = stream::iter([1, 1, 2, 2, 2, 3, 1])
            .distinct_except(-1)
            .collect()
            .await;
        assert_eq!(items, vec![1, 2, 3, 1]);
    }

    #[tokio::test]
    async fn test_distinct_except_drops_sentinel() {
        let items: Vec<&str> = stream::iter(["", "a", "", "", "b"])
            .distinct_except("")
            .collect()
            .await;
        assert_eq!(items, vec!["a", "b"]);
    }

    #[tokio::test]
    async fn test_distinct_except_empty() {
        let items: Vec<u8> = stream::iter(Vec::<u8>::new())
            .distinct_except(0)
            .collect()
            .await;
        assert!(items.is_empty());
    }
}
