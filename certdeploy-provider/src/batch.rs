//! Fixed-size batching for provider calls that accept several resources at once.

use std::future::Future;

use crate::error::{Result, ResultExt};

/// Split `items` into consecutive chunks of at most `size` elements.
///
/// Order is preserved and every element appears exactly once. A `size` of zero
/// is treated as one.
pub fn chunk<T>(items: &[T], size: usize) -> std::slice::Chunks<'_, T> {
    items.chunks(size.max(1))
}

/// Run `f` over each chunk in order, stopping at the first failure.
///
/// Errors are wrapped with the one-based chunk number (`"batch 2"`). Chunks
/// submitted before the failure are not rolled back.
pub async fn for_each_batch<'a, T, F, Fut>(items: &'a [T], size: usize, mut f: F) -> Result<()>
where
    F: FnMut(&'a [T]) -> Fut,
    Fut: Future<Output = Result<()>>,
{
    for (index, batch) in chunk(items, size).enumerate() {
        log::debug!("Submitting batch {} ({} items)", index + 1, batch.len());
        f(batch)
            .await
            .with_context(|| format!("batch {}", index + 1))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DeployError;

    #[test]
    fn chunk_sizes() {
        let items: Vec<u32> = (0..120).collect();
        let sizes: Vec<usize> = chunk(&items, 50).map(<[u32]>::len).collect();
        assert_eq!(sizes, vec![50, 50, 20]);
    }

    #[test]
    fn chunk_preserves_order() {
        let items = ["a", "b", "c", "d", "e"];
        let flat: Vec<&str> = chunk(&items, 2).flatten().copied().collect();
        assert_eq!(flat, items);
    }

    #[test]
    fn chunk_empty_and_zero_size() {
        let empty: [u8; 0] = [];
        assert_eq!(chunk(&empty, 10).count(), 0);

        let items = [1, 2, 3];
        assert_eq!(chunk(&items, 0).count(), 3);
    }

    #[tokio::test]
    async fn stops_on_first_failing_batch() {
        let items: Vec<u32> = (0..7).collect();
        let mut seen = Vec::new();
        let result = for_each_batch(&items, 3, |batch| {
            seen.push(batch.to_vec());
            let fail = batch.contains(&4);
            async move {
                if fail {
                    Err(DeployError::configuration("rejected"))
                } else {
                    Ok(())
                }
            }
        })
        .await;

        assert_eq!(seen, vec![vec![0, 1, 2], vec![3, 4, 5]]);
        let err = result.unwrap_err();
        assert_eq!(err.to_string(), "batch 2: Configuration error: rejected");
    }
}
