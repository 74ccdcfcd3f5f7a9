// Streaming bodies for uploads
mod readers;
pub use self::readers::*;

// Paging over b2_list_file_names
mod list_all_files;
pub use self::list_all_files::*;
