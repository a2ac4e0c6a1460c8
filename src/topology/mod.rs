/*!
Topology module

Structure:
- `source`: `TopologySource`, the async trait that yields the controller's IETF L2 document.
- `ietf`: path-tracking read view of that document.
- `clab`: the containerlab topology written to disk.
- `translate`: the pure mapping between the two.
*/

pub mod clab;
pub mod ietf;
pub mod source;
pub mod translate;

pub use clab::ClabDocument;
pub use ietf::SchemaError;
pub use source::TopologySource;
pub use translate::translate;
