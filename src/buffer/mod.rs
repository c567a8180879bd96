mod pool;

pub use pool::BufferPoolManager;
