//! Lazily decompressed zone file bodies.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use std::task::{Context, Poll};

use bytes::Bytes;
use flate2::write::MultiGzDecoder;
use futures_util::stream::BoxStream;
use futures_util::{Stream, StreamExt};
use tokio::fs::File;
use tokio::io::{AsyncWriteExt, BufWriter};
use tracing::{debug, info};

use super::template::FileNameTemplate;
use crate::models::ZoneId;
use crate::{Error, Result};

/// A stream of decompressed zone file bytes.
///
/// The response body is inflated chunk by chunk as the stream is polled.
/// Bodies made of several concatenated gzip members decode to the
/// concatenation of their contents;
/// nothing beyond the chunk in flight is held in memory. The stream is
/// single-pass: once exhausted (or failed) it yields `None`.
pub struct ZoneStream {
    zone: ZoneId,
    body: BoxStream<'static, reqwest::Result<Bytes>>,
    /// `None` once the body is finished or has failed.
    decoder: Option<MultiGzDecoder<Vec<u8>>>,
    peeked: Option<Bytes>,
}

impl ZoneStream {
    pub(crate) fn new<S>(zone: ZoneId, body: S) -> Self
    where
        S: Stream<Item = reqwest::Result<Bytes>> + Send + 'static,
    {
        Self {
            zone,
            body: body.boxed(),
            decoder: Some(MultiGzDecoder::new(Vec::new())),
            peeked: None,
        }
    }

    /// Decode up to the first output chunk so that a body which is not gzip
    /// at all is reported before the stream is handed out.
    pub(crate) async fn primed(mut self) -> Result<Self> {
        match self.next().await {
            Some(Ok(chunk)) => self.peeked = Some(chunk),
            Some(Err(e)) => return Err(e),
            None => {}
        }
        Ok(self)
    }

    /// The zone this stream belongs to.
    pub fn zone(&self) -> &ZoneId {
        &self.zone
    }

    fn fail(&mut self, error: Error) -> Poll<Option<Result<Bytes>>> {
        self.decoder = None;
        Poll::Ready(Some(Err(error)))
    }
}

impl Stream for ZoneStream {
    type Item = Result<Bytes>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = &mut *self;

        if let Some(chunk) = this.peeked.take() {
            return Poll::Ready(Some(Ok(chunk)));
        }

        loop {
            if this.decoder.is_none() {
                return Poll::Ready(None);
            }

            match this.body.poll_next_unpin(cx) {
                Poll::Pending => return Poll::Pending,
                Poll::Ready(Some(Ok(compressed))) => {
                    let Some(decoder) = this.decoder.as_mut() else {
                        return Poll::Ready(None);
                    };
                    if let Err(e) = decoder
                        .write_all(&compressed)
                        .and_then(|()| decoder.flush())
                    {
                        let error = Error::gzip(&this.zone, e);
                        return this.fail(error);
                    }
                    let inflated = std::mem::take(decoder.get_mut());
                    if !inflated.is_empty() {
                        return Poll::Ready(Some(Ok(Bytes::from(inflated))));
                    }
                    // Header or partial block only; pull more input
                }
                Poll::Ready(Some(Err(e))) => return this.fail(Error::Http(e)),
                Poll::Ready(None) => {
                    let Some(mut decoder) = this.decoder.take() else {
                        return Poll::Ready(None);
                    };
                    // Verifies the trailer; a truncated body fails here
                    if let Err(e) = decoder.try_finish() {
                        return Poll::Ready(Some(Err(Error::gzip(&this.zone, e))));
                    }
                    let inflated = std::mem::take(decoder.get_mut());
                    if inflated.is_empty() {
                        return Poll::Ready(None);
                    }
                    return Poll::Ready(Some(Ok(Bytes::from(inflated))));
                }
            }
        }
    }
}

impl std::fmt::Debug for ZoneStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ZoneStream")
            .field("zone", &self.zone)
            .field("finished", &self.decoder.is_none())
            .finish()
    }
}

/// A successfully opened zone download.
///
/// Consume it exactly once: stream it, read it fully, or save it.
#[derive(Debug)]
pub struct ZoneFile {
    stream: ZoneStream,
}

impl ZoneFile {
    pub(crate) fn new(stream: ZoneStream) -> Self {
        Self { stream }
    }

    /// The zone identifier.
    pub fn zone(&self) -> &ZoneId {
        self.stream.zone()
    }

    /// The decompressed bytes as a stream.
    pub fn into_stream(self) -> ZoneStream {
        self.stream
    }

    /// Read the whole decompressed zone into memory.
    ///
    /// Zone files of large TLDs run into gigabytes; prefer
    /// [`save`](Self::save) or [`into_stream`](Self::into_stream) for those.
    pub async fn read_to_end(self) -> Result<Vec<u8>> {
        let mut stream = self.stream;
        let mut out = Vec::new();
        while let Some(chunk) = stream.next().await {
            out.extend_from_slice(&chunk?);
        }
        Ok(out)
    }

    /// Write the decompressed zone to `dir`, naming the file with `template`.
    ///
    /// The file is created or truncated. If the stream fails half way, or
    /// the save is dropped before it completes, the partial file is removed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if the zone cannot be rendered into a
    /// file name, [`Error::Io`] on file system errors, and any stream error.
    pub async fn save(self, dir: &Path, template: &FileNameTemplate) -> Result<PathBuf> {
        let path = dir.join(template.render(self.zone())?);
        self.save_to(path).await
    }

    /// Write the decompressed zone to an already rendered `path`.
    pub(crate) async fn save_to(self, path: PathBuf) -> Result<PathBuf> {
        let zone = self.zone().clone();

        let file = File::create(&path)
            .await
            .map_err(|e| Error::io(path.clone(), e))?;
        let mut partial = PartialFile {
            path: &path,
            keep: false,
        };

        let bytes = write_stream(self.stream, file, &path).await?;
        partial.keep = true;
        drop(partial);

        info!(zone = %zone, path = %path.display(), bytes, "zone saved");
        Ok(path)
    }
}

/// Removes a zone file on drop unless it was completely written.
struct PartialFile<'a> {
    path: &'a Path,
    keep: bool,
}

impl Drop for PartialFile<'_> {
    fn drop(&mut self) {
        if !self.keep {
            debug!(path = %self.path.display(), "removing partial zone file");
            let _ = std::fs::remove_file(self.path);
        }
    }
}

async fn write_stream(mut stream: ZoneStream, file: File, path: &Path) -> Result<u64> {
    let mut writer = BufWriter::new(file);
    let mut written = 0u64;

    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        writer
            .write_all(&chunk)
            .await
            .map_err(|e| Error::io(path, e))?;
        written += chunk.len() as u64;
    }

    writer.flush().await.map_err(|e| Error::io(path, e))?;
    Ok(written)
}
