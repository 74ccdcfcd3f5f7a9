use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Deserialize, Serialize, Debug, Clone, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
/// Contains information about a file stored on the B2 server
///
/// Returned by uploads, by finishing a large file and by the list calls \
/// Which fields are present depends on the call, hence the Options
pub struct B2FileInfo {
    pub account_id: Option<String>,
    pub action: Option<String>,
    pub bucket_id: Option<String>,
    #[serde(default)]
    pub content_length: u64,
    pub content_sha1: Option<String>,
    pub content_type: Option<String>,
    pub file_id: Option<String>,
    pub file_info: Option<HashMap<String, String>>,
    pub file_name: String,
    #[serde(default)]
    pub upload_timestamp: u64,
}

#[derive(Deserialize, Serialize, Debug, Clone, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
/// A bucket, as returned by [b2_list_buckets](super::b2_list_buckets)
///
/// Note: lifecycle rules and cors rules are not decoded
pub struct BucketResult {
    pub account_id: String,
    pub bucket_id: String,
    pub bucket_name: String,
    pub bucket_type: B2BucketType,
    #[serde(default)]
    pub bucket_info: HashMap<String, String>,
    #[serde(default)]
    pub revision: u64,
}

/// The type of bucket, per BackBlaze API
///
/// For more info, see [b2_update_bucket](https://www.backblaze.com/b2/docs/b2_update_bucket.html)
#[derive(Deserialize, Serialize, Debug, Clone, Copy, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
pub enum B2BucketType {
    AllPublic,
    AllPrivate,
    Snapshot,
    #[serde(other)]
    Other,
}
