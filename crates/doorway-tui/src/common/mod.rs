mod request_id;
mod text;

pub use request_id::{LatestOnly, RequestId};
pub use text::{mask, truncate_start_with_ellipsis};
