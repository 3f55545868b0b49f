use bytes::{Bytes, BytesMut};
use futures_util::stream::{Stream, TryStreamExt};
use std::pin::Pin;

/// Accumulates a body stream into one contiguous buffer.
pub(crate) struct StreamBuffer<'r> {
    pub(crate) buf: BytesMut,
    pub(crate) stream: Pin<Box<dyn Stream<Item = Result<Bytes, crate::Error>> + Send + 'r>>,
    pub(crate) whole_stream_size_limit: u64,
    pub(crate) stream_size_counter: u64,
}

impl<'r> StreamBuffer<'r> {
    pub fn new<S>(stream: S, whole_stream_size_limit: u64) -> Self
    where
        S: Stream<Item = Result<Bytes, crate::Error>> + Send + 'r,
    {
        StreamBuffer {
            buf: BytesMut::new(),
            stream: Box::pin(stream),
            whole_stream_size_limit,
            stream_size_counter: 0,
        }
    }

    /// Reads the stream to its end and returns everything it yielded.
    pub async fn read_to_end(mut self) -> crate::Result<Bytes> {
        while let Some(data) = self.stream.try_next().await? {
            self.stream_size_counter += data.len() as u64;

            if self.stream_size_counter > self.whole_stream_size_limit {
                return Err(crate::Error::StreamSizeExceeded {
                    limit: self.whole_stream_size_limit,
                });
            }

            self.buf.extend_from_slice(&data);
        }

        trace!("buffered {} body bytes", self.buf.len());

        Ok(self.buf.freeze())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_util::stream;

    fn chunks(data: &'static str) -> impl Stream<Item = Result<Bytes, crate::Error>> + Send {
        stream::iter(data.as_bytes().chunks(3).map(|chunk| Ok(Bytes::copy_from_slice(chunk))))
    }

    #[tokio::test]
    async fn test_read_to_end() {
        let buffer = StreamBuffer::new(chunks("hello multipart"), u64::MAX);
        assert_eq!(buffer.read_to_end().await.unwrap(), Bytes::from_static(b"hello multipart"));
    }

    #[tokio::test]
    async fn test_read_to_end_size_limit() {
        let buffer = StreamBuffer::new(chunks("hello multipart"), 10);
        assert_eq!(
            buffer.read_to_end().await,
            Err(crate::Error::StreamSizeExceeded { limit: 10 })
        );
    }

    #[tokio::test]
    async fn test_read_to_end_stream_error() {
        let stream = stream::iter(vec![
            Ok(Bytes::from_static(b"abc")),
            Err(crate::Error::StreamReadFailed("connection reset".into())),
        ]);
        let buffer = StreamBuffer::new(stream, u64::MAX);

        assert!(matches!(
            buffer.read_to_end().await,
            Err(crate::Error::StreamReadFailed(_))
        ));
    }
}
