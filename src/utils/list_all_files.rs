use crate::api::{self, B2Auth, B2FileInfo};
use crate::Error;
use reqwest::Client;

/// List *all* files inside a given bucket by repeating [b2_list_file_names](crate::api::b2_list_file_names)
///
/// Keeps calling the API until no 'next_file_name' comes back, appending every page \
/// Note billing behavior regarding 'max_file_count', recommended value is 1000 \
/// <https://www.backblaze.com/b2/docs/b2_list_file_names.html>
pub async fn list_all_files<T: AsRef<str>>(
    client: &Client,
    auth: &B2Auth,
    bucket_id: T,
    max_file_count: u32,
) -> Result<Vec<B2FileInfo>, Error> {
    let bucket_id = bucket_id.as_ref();
    let mut list = api::b2_list_file_names(client, auth, bucket_id, None, max_file_count).await?;
    let mut pages = 1;

    while let Some(next_file_name) = list.next_file_name.take() {
        let mut next_list = api::b2_list_file_names(
            client,
            auth,
            bucket_id,
            Some(&next_file_name),
            max_file_count,
        )
        .await?;
        list.files.append(&mut next_list.files);
        list.next_file_name = next_list.next_file_name;
        pages += 1;
    }

    tracing::debug!(bucket_id, pages, files = list.files.len(), "listed all files");
    Ok(list.files)
}
