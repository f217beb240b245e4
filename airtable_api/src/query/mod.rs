mod common;
pub use self::common::{Query, QueryCommon};

mod records;
pub use self::records::RecordQuery;
