use crate::api::request::header_value;
use crate::api::B2Auth;
use crate::Error;
use bytes::Bytes;
use reqwest::header::HeaderMap;
use reqwest::Client;

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
/// Parameters for b2_download_file_by_name
///
/// `authorization` is only needed for private buckets, public files are fetched without a token \
/// With `metadata_only` a HEAD request is made: you get the headers and an empty body
pub struct B2DownloadFileByNameParams<'a> {
    pub bucket_name: &'a str,
    pub file_name: &'a str,
    pub authorization: Option<&'a str>,
    pub metadata_only: bool,
}

#[derive(Debug, Clone, Default, Eq, PartialEq)]
/// Information on a downloaded file
///
/// This comes from headers in a non-json format, so we manually construct this
pub struct B2DownloadInfo {
    pub file_id: Option<String>,
    pub file_name: Option<String>,
    pub content_sha1: Option<String>,
    pub upload_timestamp: Option<u64>,
    pub src_last_modified_millis: Option<u64>,
    pub content_type: Option<String>,
    pub content_length: Option<u64>,
}

impl B2DownloadInfo {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        B2DownloadInfo {
            file_id: header_to_string(headers, "x-bz-file-id"),
            file_name: header_to_string(headers, "x-bz-file-name"),
            content_sha1: header_to_string(headers, "x-bz-content-sha1"),
            upload_timestamp: header_to_u64(headers, "x-bz-upload-timestamp"),
            src_last_modified_millis: header_to_u64(headers, "x-bz-info-src_last_modified_millis"),
            content_type: header_to_string(headers, "content-type"),
            content_length: header_to_u64(headers, "content-length"),
        }
    }
}

#[derive(Debug, Clone)]
/// A downloaded file: the decoded info, every header as received and the body
pub struct B2Download {
    pub info: B2DownloadInfo,
    pub headers: HeaderMap,
    pub content: Bytes,
}

/// <https://www.backblaze.com/b2/docs/b2_download_file_by_name.html>
///
/// The whole body is read into memory
pub async fn b2_download_file_by_name(
    client: &Client,
    auth: &B2Auth,
    params: B2DownloadFileByNameParams<'_>,
) -> Result<B2Download, Error> {
    let url = auth.download_url_by_name(params.bucket_name, params.file_name)?;

    let mut req = if params.metadata_only {
        client.head(&url)
    } else {
        client.get(&url)
    };
    if let Some(token) = params.authorization {
        req = req.header(reqwest::header::AUTHORIZATION, header_value(token)?);
    }

    tracing::debug!(url = %url, metadata_only = params.metadata_only, "downloading file");
    let resp = req.send().await?;
    if !resp.status().is_success() {
        return Err(Error::from_response(resp).await);
    }

    let headers = resp.headers().clone();
    let content = if params.metadata_only {
        Bytes::new()
    } else {
        resp.bytes().await?
    };
    Ok(B2Download {
        info: B2DownloadInfo::from_headers(&headers),
        headers,
        content,
    })
}

// Returns a String if the header exists and is valid utf-8, None otherwise
fn header_to_string(headers: &HeaderMap, header: &str) -> Option<String> {
    headers
        .get(header)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned)
}

fn header_to_u64(headers: &HeaderMap, header: &str) -> Option<u64> {
    header_to_string(headers, header).and_then(|s| s.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn info_from_headers() {
        let mut headers = HeaderMap::new();
        let file_id = concat!(
            "4_z27c88f1d182b150646ff0b16_f1004ba650fe24e6b",
            "_d20180109_m193512_c001_v0001075_t0027"
        );
        headers.insert("x-bz-file-id", file_id.parse().unwrap());
        headers.insert("x-bz-file-name", "typing_test.txt".parse().unwrap());
        headers.insert("x-bz-upload-timestamp", "1515526512000".parse().unwrap());
        headers.insert("x-bz-info-src_last_modified_millis", "not-a-number".parse().unwrap());
        headers.insert("content-length", "46".parse().unwrap());

        let info = B2DownloadInfo::from_headers(&headers);
        assert!(info.file_id.unwrap().starts_with("4_z27c88f1d"));
        assert_eq!(info.file_name.as_deref(), Some("typing_test.txt"));
        assert_eq!(info.upload_timestamp, Some(1515526512000));
        assert_eq!(info.src_last_modified_millis, None);
        assert_eq!(info.content_length, Some(46));
        assert_eq!(info.content_sha1, None);
    }
}
