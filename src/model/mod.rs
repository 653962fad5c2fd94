pub mod loader;
pub mod mask;
pub mod session;
pub mod xray;

pub use loader::FileImageLoader;
pub use mask::LabelMask;
pub use session::PatientSession;
pub use xray::XrayRecord;
