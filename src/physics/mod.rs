pub mod gravity;
pub mod legendre;

pub use gravity::PotentialGradient;
pub use legendre::LegendreTable;
