//! Raw API calls
//!
//! Each call lives in its own file named after the official call \
//! Calls take a [reqwest::Client], an authorization and their parameters and return the decoded result

mod request;
mod structs;
pub use self::structs::*;

// Auth is used elsewhere, export it
pub use self::b2_authorize_account::B2Auth;

// Export API calls
mod b2_authorize_account;
pub use self::b2_authorize_account::{b2_authorize_account, b2_authorize_account_at};

mod b2_list_buckets;
pub use self::b2_list_buckets::*;

mod b2_list_file_names;
pub use self::b2_list_file_names::*;

mod b2_download_file_by_name;
pub use self::b2_download_file_by_name::*;

mod b2_get_upload_url;
pub use self::b2_get_upload_url::*;

mod b2_upload_file;
pub use self::b2_upload_file::*;

mod b2_start_large_file;
pub use self::b2_start_large_file::*;

mod b2_get_upload_part_url;
pub use self::b2_get_upload_part_url::*;

mod b2_upload_part;
pub use self::b2_upload_part::*;

mod b2_finish_large_file;
pub use self::b2_finish_large_file::*;

mod b2_cancel_large_file;
pub use self::b2_cancel_large_file::*;

mod b2_delete_file_version;
pub use self::b2_delete_file_version::*;
