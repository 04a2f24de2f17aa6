pub(crate) mod boundeduniform;
pub(crate) mod precomputed;

pub use boundeduniform::Bounds;
