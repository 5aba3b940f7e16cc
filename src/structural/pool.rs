use std::sync::{Arc, Mutex};

use crate::field::Field;

/// Configuration for [`RecordPool`].
#[derive(Debug, Clone, Copy)]
pub struct RecordPoolConfig {
    /// Initial capacity of a freshly allocated field buffer.
    pub field_capacity: usize,
    /// Maximum number of buffers kept for reuse.
    pub max_pooled: usize,
}

impl Default for RecordPoolConfig {
    fn default() -> Self {
        Self { field_capacity: 16, max_pooled: 64 }
    }
}

/// A thread-safe pool of reusable field buffers.
#[derive(Clone, Debug)]
pub struct RecordPool {
    inner: Arc<Mutex<PoolInner>>,
}

#[derive(Debug)]
struct PoolInner {
    buffers: Vec<Vec<Field>>,
    config: RecordPoolConfig,
}

impl Default for RecordPool {
    fn default() -> Self {
        Self::new(RecordPoolConfig::default())
    }
}

impl RecordPool {
    pub fn new(config: RecordPoolConfig) -> Self {
        Self {
            inner: Arc::new(Mutex::new(PoolInner {
                buffers: Vec::with_capacity(config.max_pooled),
                config,
            })),
        }
    }

    /// Take an empty buffer from the pool, or allocate one.
    pub fn acquire(&self) -> Vec<Field> {
        let mut inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        match inner.buffers.pop() {
            Some(buf) => buf,
            None => Vec::with_capacity(inner.config.field_capacity),
        }
    }

    /// Return a buffer. It is cleared first and dropped when the pool is
    /// already full.
    pub fn release(&self, mut buf: Vec<Field>) {
        buf.clear();
        let mut inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        if inner.buffers.len() >= inner.config.max_pooled {
            return;
        }
        inner.buffers.push(buf);
    }

    /// Number of buffers currently waiting in the pool.
    pub fn count(&self) -> usize {
        self.inner.lock().unwrap_or_else(|e| e.into_inner()).buffers.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reuses_released_buffer() {
        let pool = RecordPool::default();

        let mut buf = pool.acquire();
        buf.push(Field::bool("ok", true));
        let capacity = buf.capacity();
        pool.release(buf);
        assert_eq!(pool.count(), 1);

        let buf = pool.acquire();
        assert!(buf.is_empty());
        assert_eq!(buf.capacity(), capacity);
        assert_eq!(pool.count(), 0);
    }

    #[test]
    fn keeps_at_most_max_pooled() {
        let pool = RecordPool::new(RecordPoolConfig { field_capacity: 4, max_pooled: 2 });
        for _ in 0..5 {
            pool.release(Vec::with_capacity(4));
        }
        assert_eq!(pool.count(), 2);
    }
}
