mod feed_import;

pub use feed_import::FeedImportTask;
