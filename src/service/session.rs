use crate::api::{B2Auth, UploadAuth};

/// What a [B2Service](super::B2Service) currently holds
///
/// * Unauthorized: nothing, the next operation authorizes first
/// * Authorized: an account authorization
/// * UploadReady: an account authorization plus an upload url for one bucket
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub enum Session {
    #[default]
    Unauthorized,
    Authorized {
        auth: B2Auth,
    },
    UploadReady {
        auth: B2Auth,
        upload: UploadAuth,
    },
}

impl Session {
    pub fn is_authorized(&self) -> bool {
        self.auth().is_some()
    }

    pub fn auth(&self) -> Option<&B2Auth> {
        match self {
            Session::Unauthorized => None,
            Session::Authorized { auth } | Session::UploadReady { auth, .. } => Some(auth),
        }
    }

    /// The cached upload url, but only if it belongs to 'bucket_id'
    pub fn upload_for(&self, bucket_id: &str) -> Option<&UploadAuth> {
        match self {
            Session::UploadReady { upload, .. } if upload.bucket_id == bucket_id => Some(upload),
            _ => None,
        }
    }

    /// Cache an upload url. Without an authorization there is nothing to attach it to
    pub fn with_upload(self, upload: UploadAuth) -> Session {
        match self {
            Session::Unauthorized => Session::Unauthorized,
            Session::Authorized { auth } | Session::UploadReady { auth, .. } => {
                Session::UploadReady { auth, upload }
            }
        }
    }

    /// Forget the upload url, keep the authorization
    pub fn without_upload(self) -> Session {
        match self {
            Session::UploadReady { auth, .. } => Session::Authorized { auth },
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn auth() -> B2Auth {
        B2Auth {
            account_id: "acc".to_owned(),
            authorization_token: "tok".to_owned(),
            api_url: "http://api".to_owned(),
            download_url: "http://download".to_owned(),
            minimum_part_size: 100,
            absolute_minimum_part_size: None,
            recommended_part_size: None,
        }
    }

    fn upload(bucket_id: &str) -> UploadAuth {
        UploadAuth {
            bucket_id: bucket_id.to_owned(),
            upload_url: format!("http://pod/{}", bucket_id),
            authorization_token: "up".to_owned(),
        }
    }

    #[test]
    fn transitions() {
        let session = Session::default();
        assert!(!session.is_authorized());
        // No upload url without authorization
        assert_eq!(session.with_upload(upload("b1")), Session::Unauthorized);

        let session = Session::Authorized { auth: auth() };
        assert!(session.is_authorized());
        assert!(session.upload_for("b1").is_none());

        let session = session.with_upload(upload("b1"));
        assert!(session.is_authorized());
        assert_eq!(session.upload_for("b1"), Some(&upload("b1")));
        assert!(session.upload_for("b2").is_none());

        let session = session.with_upload(upload("b2"));
        assert!(session.upload_for("b1").is_none());
        assert!(session.upload_for("b2").is_some());

        let session = session.without_upload();
        assert_eq!(session, Session::Authorized { auth: auth() });
    }
}
