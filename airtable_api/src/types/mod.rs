mod record;
pub use self::record::{Record, RecordID, RecordPage};

mod listing;
pub use self::listing::{Attachment, Listing, ListingFields};
