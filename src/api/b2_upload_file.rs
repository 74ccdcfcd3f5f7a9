use crate::api::request::{decode_body, encode_file_name, header_value};
use crate::api::{B2FileInfo, UploadAuth};
use crate::Error;
use reqwest::header::HeaderMap;
use reqwest::Client;

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
/// Information about a file being uploaded with [b2_upload_file]
///
/// 'file_size' **has to match the size of the upload** \
/// If it doesn't, it **will** result in an error \
/// The extra size from using hex-digits-at-end is added automatically \
/// If 'content_type' is None, "b2/x-auto" is used as default \
/// If 'last_modified_millis' is None, no src_last_modified_millis info is stored
pub struct FileParameters<'a> {
    pub file_path: &'a str,
    pub file_size: u64,
    pub content_type: Option<&'a str>,
    pub content_sha1: Sha1Variant<'a>,
    pub last_modified_millis: Option<u64>,
}

/// Different ways to handle Sha1-hashing for verifying file integrity
///
/// * Precomputed requires the hash computed before you start the upload \
/// * HexAtEnd expects the body to provide the Sha1 as 40-characters hexadecimal at the end (See: [BytesStreamHashAtEnd][crate::utils::BytesStreamHashAtEnd]) \
/// * DoNotVerify will use no hash at all. Note that this is **not recommended by Backblaze**
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Sha1Variant<'a> {
    Precomputed(&'a str),
    HexAtEnd,
    DoNotVerify,
}

impl<'a> Sha1Variant<'a> {
    /// The value of the X-Bz-Content-Sha1 header
    pub fn header(&self) -> &'a str {
        match *self {
            Sha1Variant::Precomputed(hash) => hash,
            Sha1Variant::HexAtEnd => "hex_digits_at_end",
            Sha1Variant::DoNotVerify => "do_not_verify",
        }
    }

    /// The Content-Length for a body of 'size' bytes
    ///
    /// If we use hex digits at end, we need to add 40 bytes to account for the hex characters
    pub fn body_length(&self, size: u64) -> u64 {
        match self {
            Sha1Variant::HexAtEnd => size + 40,
            _ => size,
        }
    }
}

/// <https://www.backblaze.com/b2/docs/b2_upload_file.html>
///
/// Needs a [FileParameters] containing metadata and a `body` that is [Into<reqwest::Body>] containing the file bytes. \
/// You can use [body_from_reader][crate::utils::body_from_reader] to turn a file or other [AsyncRead][tokio::io::AsyncRead]s to a body.
///
/// Be aware of Sha1-checksum behavior, see [Sha1Variant]. \
/// Requires an [UploadAuth] instead of a B2Auth.
pub async fn b2_upload_file<B: Into<reqwest::Body>>(
    client: &Client,
    auth: &UploadAuth,
    body: B,
    params: FileParameters<'_>,
) -> Result<B2FileInfo, Error> {
    let mut headers = HeaderMap::new();
    headers.insert(
        reqwest::header::AUTHORIZATION,
        header_value(&auth.authorization_token)?,
    );
    headers.insert(
        reqwest::header::CONTENT_TYPE,
        header_value(params.content_type.unwrap_or("b2/x-auto"))?,
    );
    headers.insert(
        reqwest::header::CONTENT_LENGTH,
        params.content_sha1.body_length(params.file_size).into(),
    );
    headers.insert(
        "x-bz-file-name",
        header_value(encode_file_name(params.file_path))?,
    );
    headers.insert("x-bz-content-sha1", header_value(params.content_sha1.header())?);
    if let Some(millis) = params.last_modified_millis {
        headers.insert("x-bz-info-src_last_modified_millis", millis.into());
    }

    tracing::debug!(url = %auth.upload_url, file_name = params.file_path, "uploading file");
    let resp = client
        .post(&auth.upload_url)
        .headers(headers)
        .body(body)
        .send()
        .await?;
    if !resp.status().is_success() {
        return Err(Error::from_response(resp).await);
    }

    decode_body(resp).await
}
