//! Splitting a byte stream into chunks.

use async_trait::async_trait;
use tokio::io::{AsyncRead, AsyncReadExt};

/// A source of chunks.
///
/// Chunks are produced lazily and in stream order.
#[async_trait]
pub trait Splitter: Send {
    /// The next chunk, or `None` once the stream is exhausted.
    ///
    /// Returned chunks are never empty.
    async fn next_bytes(&mut self) -> std::io::Result<Option<Vec<u8>>>;
}

/// Fixed-size splitter.
///
/// Every chunk is exactly `size` bytes except possibly the last one.
/// Short reads from the underlying stream are accumulated until a chunk is
/// full, so chunk boundaries depend only on the content.
pub struct SizeSplitter<R> {
    reader: R,
    size: usize,
    exhausted: bool,
}

impl<R> SizeSplitter<R>
where
    R: AsyncRead + Unpin + Send,
{
    pub fn new(reader: R, size: usize) -> Self {
        Self {
            reader,
            size,
            exhausted: false,
        }
    }
}

#[async_trait]
impl<R> Splitter for SizeSplitter<R>
where
    R: AsyncRead + Unpin + Send,
{
    async fn next_bytes(&mut self) -> std::io::Result<Option<Vec<u8>>> {
        if self.exhausted || self.size == 0 {
            return Ok(None);
        }

        let mut buf = vec![0u8; self.size];
        let mut filled = 0;
        while filled < self.size {
            let n = self.reader.read(&mut buf[filled..]).await?;
            if n == 0 {
                self.exhausted = true;
                break;
            }
            filled += n;
        }

        if filled == 0 {
            return Ok(None);
        }
        if filled < self.size {
            // Leaves keep their buffer, so a short tail must not pin a full chunk.
            buf.truncate(filled);
            buf.shrink_to_fit();
        }
        Ok(Some(buf))
    }
}
