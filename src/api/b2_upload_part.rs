use crate::api::request::{decode_body, header_value};
use crate::api::{Sha1Variant, UploadPartAuth};
use crate::Error;
use reqwest::header::HeaderMap;
use reqwest::Client;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
/// Information about a part being uploaded with [b2_upload_part]
///
/// Part numbers start at 1 \
/// 'part_size' is the size of the part itself, the hex-digits-at-end size is added automatically
pub struct PartParameters<'a> {
    pub part_number: u32,
    pub part_size: u64,
    pub content_sha1: Sha1Variant<'a>,
}

#[derive(Deserialize, Serialize, Debug, Clone, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
/// Result object from [b2_upload_part]
///
/// 'content_sha1' is needed, in part order, to finish the large file
pub struct B2PartInfo {
    pub file_id: String,
    pub part_number: u32,
    pub content_length: u64,
    pub content_sha1: String,
    pub upload_timestamp: Option<u64>,
}

/// <https://www.backblaze.com/b2/docs/b2_upload_part.html>
///
/// Requires an [UploadPartAuth] from [b2_get_upload_part_url](super::b2_get_upload_part_url)
pub async fn b2_upload_part<B: Into<reqwest::Body>>(
    client: &Client,
    auth: &UploadPartAuth,
    body: B,
    params: PartParameters<'_>,
) -> Result<B2PartInfo, Error> {
    let mut headers = HeaderMap::new();
    headers.insert(
        reqwest::header::AUTHORIZATION,
        header_value(&auth.authorization_token)?,
    );
    headers.insert("x-bz-part-number", params.part_number.into());
    headers.insert(
        reqwest::header::CONTENT_LENGTH,
        params.content_sha1.body_length(params.part_size).into(),
    );
    headers.insert("x-bz-content-sha1", header_value(params.content_sha1.header())?);

    tracing::debug!(file_id = %auth.file_id, part_number = params.part_number, "uploading part");
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
