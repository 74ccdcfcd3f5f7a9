//! The service facade
//!
//! A [B2Service] owns the HTTP client and a [Session]. Every operation makes sure the session is
//! authorized before issuing its calls, so there is no need to call [B2Service::authorize] yourself
//!
//! Failures are returned as [Error](crate::Error)s, nothing is retried automatically except the
//! upload url refresh described on [B2Service::insert]

mod files;
mod retry;
mod session;
mod upload;

pub use self::retry::RetryPolicy;
pub use self::session::Session;

use crate::api::{
    self, B2Auth, B2Download, B2DownloadFileByNameParams, BucketResult, ListBucketParams,
};
use crate::config::B2Config;
use crate::Error;
use reqwest::Client;

/// An object-like struct.
/// Keeps the session with B2 and is what all operations are made through
#[derive(Debug)]
pub struct B2Service {
    config: B2Config,
    client: Client,
    session: Session,
    retry: RetryPolicy,
}

impl B2Service {
    /// Create a new, not yet authorized, service
    ///
    /// No request is made until the first operation
    pub fn new(config: B2Config) -> Result<B2Service, Error> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(B2Service::with_client(config, client))
    }

    /// Same as [new](B2Service::new) but with your own client. The configured timeout is not applied to it
    pub fn with_client(config: B2Config, client: Client) -> B2Service {
        B2Service {
            config,
            client,
            session: Session::Unauthorized,
            retry: RetryPolicy::default(),
        }
    }

    pub fn config(&self) -> &B2Config {
        &self.config
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn is_authorized(&self) -> bool {
        self.session.is_authorized()
    }

    /// Authorize with the account id and application key from the config
    ///
    /// On success any cached upload url is dropped \
    /// On failure the session is left unauthorized
    pub async fn authorize(&mut self) -> Result<(), Error> {
        self.authorize_session().await.map(|_| ())
    }

    #[tracing::instrument(
        level = "debug",
        skip(self),
        fields(account_id = %self.config.account_id)
    )]
    async fn authorize_session(&mut self) -> Result<B2Auth, Error> {
        let keystring = self.config.key_string();
        match api::b2_authorize_account_at(&self.client, &self.config.api_url, keystring).await {
            Ok(auth) => {
                tracing::info!(api_url = %auth.api_url, "authorized");
                self.session = Session::Authorized { auth: auth.clone() };
                Ok(auth)
            }
            Err(e) => {
                tracing::warn!(error = %e, "authorization failed");
                self.session = Session::Unauthorized;
                Err(e)
            }
        }
    }

    /// Authorize only if the session isn't already
    ///
    /// Returns a copy of the authorization so the caller can keep using `self.client`
    pub(crate) async fn ensure_authorized(&mut self) -> Result<B2Auth, Error> {
        match self.session.auth() {
            Some(auth) => Ok(auth.clone()),
            None => self.authorize_session().await,
        }
    }

    /// Returns true if the account has a bucket with this id
    pub async fn bucket_exists(&mut self, bucket_id: &str) -> Result<bool, Error> {
        Ok(self.get_bucket_by_id(bucket_id).await?.is_some())
    }

    /// Looks up a bucket of the account by its id
    ///
    /// All buckets are listed with one call, B2 accounts have at most a few hundred
    #[tracing::instrument(level = "debug", skip(self))]
    pub async fn get_bucket_by_id(
        &mut self,
        bucket_id: &str,
    ) -> Result<Option<BucketResult>, Error> {
        let auth = self.ensure_authorized().await?;
        let buckets = api::b2_list_buckets(&self.client, &auth, ListBucketParams::default()).await?;
        Ok(buckets.into_iter().find(|b| b.bucket_id == bucket_id))
    }

    /// Returns the file content and its metadata
    ///
    /// 'private' sends the account token along, needed for buckets that aren't public \
    /// 'metadata_only' only fetches the headers, the content is left empty
    ///
    /// The download host is only known after authorizing, so even public downloads authorize once
    #[tracing::instrument(level = "debug", skip(self))]
    pub async fn get(
        &mut self,
        bucket_name: &str,
        file_name: &str,
        private: bool,
        metadata_only: bool,
    ) -> Result<B2Download, Error> {
        let auth = self.ensure_authorized().await?;
        let params = B2DownloadFileByNameParams {
            bucket_name,
            file_name,
            authorization: if private {
                Some(auth.authorization_token.as_str())
            } else {
                None
            },
            metadata_only,
        };
        api::b2_download_file_by_name(&self.client, &auth, params).await
    }
}
