mod dispatch;

pub use dispatch::{classify, Disposition, LinkDispatch};
