mod reader;
mod trio;
mod writer;

pub use reader::{read_outlier_table, OutlierRecord};
pub use trio::{build_trio_loci, LocusCall, MemberCall, TrioLocus};
pub use writer::ResultWriter;
