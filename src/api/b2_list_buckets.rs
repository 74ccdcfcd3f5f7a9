use crate::api::request::post_json;
use crate::api::{B2Auth, BucketResult};
use crate::Error;
use reqwest::Client;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Debug, Clone, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
struct ListBucketsBody<'a> {
    account_id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    bucket_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    bucket_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    bucket_types: Option<Vec<String>>,
}

#[derive(Deserialize, Debug, Clone, Eq, PartialEq)]
struct ListBucketsResult {
    buckets: Vec<BucketResult>,
}

/// Represents the optional parameters
///
/// Leave everything as None to list every bucket of the account
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct ListBucketParams {
    pub bucket_id: Option<String>,
    pub bucket_name: Option<String>,
    pub bucket_types: Option<Vec<String>>,
}

/// <https://www.backblaze.com/b2/docs/b2_list_buckets.html>
pub async fn b2_list_buckets(
    client: &Client,
    auth: &B2Auth,
    params: ListBucketParams,
) -> Result<Vec<BucketResult>, Error> {
    let body = ListBucketsBody {
        account_id: &auth.account_id,
        bucket_id: params.bucket_id,
        bucket_name: params.bucket_name,
        bucket_types: params.bucket_types,
    };

    let result: ListBucketsResult = post_json(
        client,
        &auth.api_url_for("b2_list_buckets"),
        &auth.authorization_token,
        &body,
    )
    .await?;
    Ok(result.buckets)
}
