pub mod delimiters;
pub mod interchange;
pub mod loop_record;
pub mod segment;
pub mod transaction;
pub mod version;

pub use delimiters::*;
pub use interchange::*;
pub use loop_record::*;
pub use segment::*;
pub use transaction::*;
pub use version::*;
