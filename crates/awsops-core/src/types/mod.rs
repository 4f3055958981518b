mod change;
mod dns;
mod ec2;
mod summary;

pub use change::*;
pub use dns::*;
pub use ec2::*;
pub use summary::*;
