//! Stream wrappers, useful for file uploading.
use bytes::Bytes;
use futures::{ready, Stream, TryStreamExt};
use pin_project::pin_project;
use sha1::Sha1;
use std::io::Error as IoError;
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio::io::AsyncRead;
use tokio_util::codec::{BytesCodec, FramedRead};

/// Wraps an [Stream] of [Result<Bytes, std::io::Error>], computing the Sha1 hash along the way and returning it when the inner stream is done
///
/// The hash is returned as 40 hexadecimal digits, use it with [Sha1Variant::HexAtEnd](crate::api::Sha1Variant::HexAtEnd)
#[pin_project]
pub struct BytesStreamHashAtEnd<R>
where
    R: Stream<Item = Result<Bytes, IoError>>,
{
    #[pin]
    inner: R,
    hash: Sha1,
    done: bool,
}

impl<R> BytesStreamHashAtEnd<R>
where
    R: Stream<Item = Result<Bytes, IoError>>,
{
    pub fn wrap(inner: R) -> Self {
        Self {
            inner,
            hash: Sha1::new(),
            done: false,
        }
    }
}

impl<R> Stream for BytesStreamHashAtEnd<R>
where
    R: Stream<Item = Result<Bytes, IoError>>,
{
    type Item = Result<Bytes, IoError>;
    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.project();
        if *this.done {
            return Poll::Ready(None);
        }
        let bytes: Option<Result<Bytes, IoError>> = ready!(this.inner.poll_next(cx));
        match bytes {
            Some(Ok(bytes)) => {
                this.hash.update(&bytes);
                Poll::Ready(Some(Ok(bytes)))
            }
            None => {
                let digest = this.hash.hexdigest();
                *this.done = true;
                Poll::Ready(Some(Ok(Bytes::copy_from_slice(digest.as_bytes()))))
            }
            other => Poll::Ready(other),
        }
    }
}

/// Wrap an [AsyncRead] into a [Stream] of [Result<Bytes, IoError>].
pub fn reader_to_stream<R: AsyncRead + Send + Sync + 'static>(
    file: R,
) -> impl Stream<Item = Result<Bytes, IoError>> + Send + Sync + 'static {
    FramedRead::new(file, BytesCodec::new()).map_ok(bytes::BytesMut::freeze)
}

/// Turn an [AsyncRead] into a streaming [reqwest::Body] \
/// With `hash_at_end` the Sha1 of the content is appended, see [BytesStreamHashAtEnd]
pub fn body_from_reader<R: AsyncRead + Send + Sync + 'static>(
    reader: R,
    hash_at_end: bool,
) -> reqwest::Body {
    let stream = reader_to_stream(reader);
    if hash_at_end {
        reqwest::Body::wrap_stream(BytesStreamHashAtEnd::wrap(stream))
    } else {
        reqwest::Body::wrap_stream(stream)
    }
}
