mod cancel;
mod processor;

pub use cancel::CancelFlag;
pub use processor::BatchProcessor;
