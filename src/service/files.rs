use super::B2Service;
use crate::api::{self, B2FileInfo};
use crate::utils::list_all_files;
use crate::Error;

// Page size used when listing a whole bucket
const LIST_PAGE_SIZE: u32 = 1000;

impl B2Service {
    /// Deletes the current version of 'file_name'
    ///
    /// The file id is read from the headers of a metadata-only download, then exactly that version is deleted \
    /// Older versions of the same name stay
    #[tracing::instrument(level = "debug", skip(self))]
    pub async fn delete(
        &mut self,
        bucket_name: &str,
        file_name: &str,
        private: bool,
    ) -> Result<(), Error> {
        let download = self.get(bucket_name, file_name, private, true).await?;
        let file_id = download.info.file_id.ok_or(Error::MissingFileId)?;

        let auth = self.ensure_authorized().await?;
        api::b2_delete_file_version(&self.client, &auth, file_name, &file_id).await?;
        tracing::info!(file_id = %file_id, "deleted file version");
        Ok(())
    }

    /// Renames a file by copying it to 'new_file_name' in 'target_bucket_id' and then deleting the original version
    ///
    /// B2 has no rename. The two steps are not atomic: if the delete fails, or the process dies in between,
    /// both copies exist. If the copy fails nothing is deleted \
    /// 'bucket_id' is the id of 'bucket_name', it is only used for logging
    #[tracing::instrument(level = "debug", skip(self))]
    pub async fn rename(
        &mut self,
        bucket_name: &str,
        bucket_id: &str,
        file_name: &str,
        target_bucket_id: &str,
        new_file_name: &str,
        private: bool,
    ) -> Result<(), Error> {
        let download = self.get(bucket_name, file_name, private, false).await?;
        let file_id = download.info.file_id.ok_or(Error::MissingFileId)?;

        let copy = self.insert(target_bucket_id, download.content, new_file_name).await?;
        tracing::debug!(new_file_id = ?copy.file_id, "copied file, deleting original");

        let auth = self.ensure_authorized().await?;
        api::b2_delete_file_version(&self.client, &auth, file_name, &file_id).await?;
        Ok(())
    }

    /// Returns every file in the bucket, paging through b2_list_file_names 1000 names at a time
    ///
    /// Only the latest version of each file name is listed
    #[tracing::instrument(level = "debug", skip(self))]
    pub async fn all(&mut self, bucket_id: &str) -> Result<Vec<B2FileInfo>, Error> {
        let auth = self.ensure_authorized().await?;
        list_all_files(&self.client, &auth, bucket_id, LIST_PAGE_SIZE).await
    }

    /// Returns true if a file with exactly this name is in the bucket
    ///
    /// Costs one listing call starting at 'file_name'. A name that merely starts with 'file_name' doesn't count
    #[tracing::instrument(level = "debug", skip(self))]
    pub async fn exists(&mut self, bucket_id: &str, file_name: &str) -> Result<bool, Error> {
        let auth = self.ensure_authorized().await?;
        let list =
            api::b2_list_file_names(&self.client, &auth, bucket_id, Some(file_name), 1).await?;
        Ok(list
            .files
            .first()
            .map_or(false, |file| file.file_name == file_name))
    }
}
