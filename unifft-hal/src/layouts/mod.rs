mod aligned;
mod axes;
mod buffer;
mod context;
mod desc;
mod dimensions;
mod exec;
mod plan;
mod selection;
mod target;
mod transform;

pub use aligned::*;
pub use axes::*;
pub use buffer::*;
pub use context::*;
pub use desc::*;
pub use dimensions::*;
pub use exec::*;
pub use plan::*;
pub use selection::*;
pub use target::*;
pub use transform::*;
