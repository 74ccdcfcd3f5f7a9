use super::B2Service;
use crate::api::{self, B2Auth, B2FileInfo, FileParameters, PartParameters, Sha1Variant, UploadAuth};
use crate::utils::body_from_reader;
use crate::Error;
use bytes::Bytes;
use reqwest::Client;
use std::io::SeekFrom;
use std::path::Path;
use tokio::io::{AsyncReadExt, AsyncSeekExt};

// B2 refuses parts numbered above this
const MAX_PARTS: u64 = 10_000;
// 10TB, the largest large file B2 stores
const MAX_LARGE_FILE_SIZE: u64 = 10 * 1000 * 1000 * 1000 * 1000;

impl B2Service {
    /// Uploads 'content' as 'file_name' into the bucket and returns the stored file's metadata
    ///
    /// The upload url is fetched on first use and kept for later uploads to the same bucket. \
    /// If an upload fails a fresh url is fetched and the upload is tried once more, the url a
    /// failed upload used may point at a storage pod that is busy or gone \
    /// When the retry fails as well the cached url is dropped and its error returned
    #[tracing::instrument(level = "debug", skip(self, content))]
    pub async fn insert<C: Into<Bytes>>(
        &mut self,
        bucket_id: &str,
        content: C,
        file_name: &str,
    ) -> Result<B2FileInfo, Error> {
        let content: Bytes = content.into();
        let auth = self.ensure_authorized().await?;

        let upload = match self.session.upload_for(bucket_id) {
            Some(upload) => upload.clone(),
            None => match api::b2_get_upload_url(&self.client, &auth, bucket_id).await {
                Ok(upload) => {
                    tracing::info!(bucket_id, "obtained upload url");
                    upload
                }
                Err(e) => {
                    self.drop_upload();
                    return Err(e);
                }
            },
        };

        let sha1 = sha1::Sha1::from(&content[..]).hexdigest();
        tracing::debug!(size = content.len(), sha1 = %sha1, "uploading");
        let client = &self.client;
        let auth = &auth;
        let sha1 = sha1.as_str();
        let result = self
            .retry
            .run(
                upload,
                move || api::b2_get_upload_url(client, auth, bucket_id),
                move |upload: UploadAuth| {
                    let body = content.clone();
                    let params = FileParameters {
                        file_path: file_name,
                        file_size: body.len() as u64,
                        content_type: None,
                        content_sha1: Sha1Variant::Precomputed(sha1),
                        last_modified_millis: None,
                    };
                    async move { api::b2_upload_file(client, &upload, body, params).await }
                },
            )
            .await;

        match result {
            Ok((info, upload)) => {
                self.session = std::mem::take(&mut self.session).with_upload(upload);
                Ok(info)
            }
            Err(e) => {
                self.drop_upload();
                Err(e)
            }
        }
    }

    fn drop_upload(&mut self) {
        self.session = std::mem::take(&mut self.session).without_upload();
    }

    /// Uploads the file at 'file_path' as a large file, in parts, and returns the finished file's metadata
    ///
    /// Large files can range in size from 5MB to 10TB. Each large file must consist of at least 2 parts
    /// and at most 10000, all of the parts except the last one are the same size \
    /// The part size starts at the minimum part size handed out when authorizing and grows for files
    /// that would need more than 10000 parts. Files below twice the minimum are split in two halves,
    /// as long as those stay above the absolute minimum part size
    ///
    /// Once the large file is started, any failure cancels it so B2 can drop the parts uploaded so far \
    /// A failing cancel is logged, the error returned is always the one that caused it
    #[tracing::instrument(
        level = "debug",
        skip(self, file_path),
        fields(file_path = %file_path.as_ref().display())
    )]
    pub async fn insert_large<P: AsRef<Path>>(
        &mut self,
        bucket_id: &str,
        file_path: P,
        file_name: &str,
    ) -> Result<B2FileInfo, Error> {
        let auth = self.ensure_authorized().await?;
        let file_path = file_path.as_ref();
        let file_size = tokio::fs::metadata(file_path).await?.len();
        let part_size = part_size_for(
            file_size,
            auth.minimum_part_size,
            auth.absolute_minimum_part_size,
        )?;
        let parts = split_into_parts(file_size, part_size)?;

        let started =
            api::b2_start_large_file(&self.client, &auth, bucket_id, file_name, None).await?;
        // Nothing to cancel without an id
        let file_id = started.file_id.ok_or_else(|| {
            Error::SerdeError(<serde_json::Error as serde::de::Error>::missing_field("fileId"))
        })?;
        tracing::info!(file_id = %file_id, parts = parts.len(), part_size, "started large file");

        match upload_parts(&self.client, &auth, &file_id, file_path, &parts).await {
            Ok(info) => {
                tracing::info!(file_id = %file_id, "finished large file");
                Ok(info)
            }
            Err(e) => {
                tracing::warn!(file_id = %file_id, error = %e, "large file failed, cancelling");
                let cancelled = api::b2_cancel_large_file(&self.client, &auth, &file_id).await;
                if let Err(cancel_err) = cancelled {
                    tracing::warn!(file_id = %file_id, error = %cancel_err, "could not cancel");
                }
                Err(e)
            }
        }
    }
}

// Size of every part but the last
fn part_size_for(
    file_size: u64,
    minimum_part_size: u64,
    absolute_minimum_part_size: Option<u64>,
) -> Result<u64, Error> {
    if file_size > MAX_LARGE_FILE_SIZE {
        return Err(Error::InvalidInput(format!(
            "a large file can be at most {} bytes, file has {} bytes",
            MAX_LARGE_FILE_SIZE, file_size
        )));
    }
    match absolute_minimum_part_size {
        Some(absolute) if file_size < minimum_part_size.saturating_mul(2) => {
            Ok(absolute.max(ceil_div(file_size, 2)))
        }
        _ => Ok(minimum_part_size.max(ceil_div(file_size, MAX_PARTS))),
    }
}

fn ceil_div(n: u64, d: u64) -> u64 {
    n / d + u64::from(n % d != 0)
}

// Everything between starting and finishing a large file
// Any error returned here means the large file has to be cancelled
async fn upload_parts(
    client: &Client,
    auth: &B2Auth,
    file_id: &str,
    file_path: &Path,
    parts: &[(u64, u64)],
) -> Result<B2FileInfo, Error> {
    let part_auth = api::b2_get_upload_part_url(client, auth, file_id).await?;

    let mut part_sha1_array = Vec::with_capacity(parts.len());
    for (index, &(offset, length)) in parts.iter().enumerate() {
        let mut file = tokio::fs::File::open(file_path).await?;
        file.seek(SeekFrom::Start(offset)).await?;
        let body = body_from_reader(file.take(length), true);

        let params = PartParameters {
            part_number: index as u32 + 1,
            part_size: length,
            content_sha1: Sha1Variant::HexAtEnd,
        };
        let part = api::b2_upload_part(client, &part_auth, body, params).await?;
        part_sha1_array.push(part.content_sha1);
    }

    api::b2_finish_large_file(client, auth, file_id, &part_sha1_array).await
}
