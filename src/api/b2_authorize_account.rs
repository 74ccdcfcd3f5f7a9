use crate::api::request::{decode_body, header_value};
use crate::config::DEFAULT_API_URL;
use crate::Error;
use base64::encode;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use url::Url;

// B2 documents 100MB as the part size to use when the response omits it
fn default_minimum_part_size() -> u64 {
    100 * 1000 * 1000
}

#[derive(Deserialize, Serialize, Debug, Clone, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
/// An authorization from [b2_authorize_account] - Required for most other calls
///
/// `minimum_part_size` is the part size used for large files \
/// Note: 'allowed' object is currently *unsupported*
pub struct B2Auth {
    pub account_id: String,
    pub authorization_token: String,
    pub api_url: String,
    pub download_url: String,
    #[serde(default = "default_minimum_part_size")]
    pub minimum_part_size: u64,
    pub absolute_minimum_part_size: Option<u64>,
    pub recommended_part_size: Option<u64>,
}

impl B2Auth {
    // Given the name of an api call, return the full url for it
    // See https://www.backblaze.com/b2/docs/calling.html "Constructing the URL"
    pub fn api_url_for(&self, call_name: &str) -> String {
        format!("{}/b2api/v1/{}", self.api_url, call_name)
    }

    // Given a bucket name and a file name, returns a url for downloading the file
    // See https://www.backblaze.com/b2/docs/calling.html "Download Files by Name"
    // Each '/'-separated piece of the file name is percent-encoded on its own, the slashes are kept
    pub fn download_url_by_name<T: AsRef<str>, Q: AsRef<str>>(
        &self,
        bucket_name: T,
        file_name: Q,
    ) -> Result<String, Error> {
        let mut url = Url::parse(&self.download_url)
            .map_err(|e| Error::InvalidInput(format!("bad download url: {}", e)))?;
        url.path_segments_mut()
            .map_err(|_| Error::InvalidInput("download url cannot be a base".to_owned()))?
            .pop_if_empty()
            .push("file")
            .push(bucket_name.as_ref())
            .extend(file_name.as_ref().split('/'));
        Ok(url.to_string())
    }
}

/// Authenticate with the API - B2Auth is required by other commands
///
/// 'keystring' is a string with the format "applicationKeyId:applicationKey" (Remember the colon)
///
/// <https://www.backblaze.com/b2/docs/b2_authorize_account.html>
pub async fn b2_authorize_account<T: AsRef<str>>(
    client: &Client,
    keystring: T,
) -> Result<B2Auth, Error> {
    b2_authorize_account_at(client, DEFAULT_API_URL, keystring).await
}

/// Same as [b2_authorize_account], against the given api host instead of the public one
pub async fn b2_authorize_account_at<T: AsRef<str>, Q: AsRef<str>>(
    client: &Client,
    api_url: T,
    keystring: Q,
) -> Result<B2Auth, Error> {
    // Encode the key
    let encoded = format!("{}{}", "Basic ", encode(keystring.as_ref()));
    let url = format!(
        "{}/b2api/v1/b2_authorize_account",
        api_url.as_ref().trim_end_matches('/')
    );

    tracing::debug!(url = %url, "authorizing account");
    let resp = client
        .get(&url)
        .header(reqwest::header::AUTHORIZATION, header_value(encoded)?)
        .send()
        .await?;
    if !resp.status().is_success() {
        return Err(Error::from_response(resp).await);
    }

    decode_body(resp).await
}
