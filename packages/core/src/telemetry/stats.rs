//! Statistics types for buffer and reader monitoring

/// Chunk buffer utilization snapshot
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BufferStats {
    /// Bytes currently held (read and unread)
    pub retained: usize,
    /// Bytes appended but not yet tokenized
    pub unread: usize,
    /// Buffer capacity in bytes
    pub capacity: usize,
    /// Total bytes appended since creation
    pub total_appended: u64,
    /// Total bytes released from the front of the buffer
    pub released: u64,
}

/// Extraction progress snapshot
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReaderStats {
    /// Chunks pulled from upstream
    pub chunks_received: u64,
    /// Bytes pulled from upstream
    pub bytes_received: u64,
    /// Structural tokens handed to the navigator
    pub tokens_processed: u64,
    /// Values delivered downstream
    pub values_emitted: u64,
    /// Deepest nesting seen
    pub max_depth: usize,
    /// Largest number of bytes held behind the cursor at once
    pub peak_retained: usize,
}
