/// Run options with sensible defaults and builder chaining.
#[derive(Clone, Debug)]
pub struct AugmentOptions {
    pub oxidation: bool,              // emit oxidation numbers + oxidation-specific ionic radii
    pub decimal_places: usize,        // rounding precision for float tokens
    pub workers: usize,               // size of the worker pool (>= 1)
    pub progress: bool,               // show progress bar
    pub progress_label: Option<String>, // optional label for progress bar

    // IO tuning
    pub read_buffer_bytes: usize,     // BufReader capacity
    pub write_buffer_bytes: usize,    // BufWriter capacity
    pub zstd_level: i32,              // output compression level
}

impl Default for AugmentOptions {
    fn default() -> Self {
        Self {
            oxidation: false,
            decimal_places: 4,
            workers: 4,
            progress: true,
            progress_label: None,

            read_buffer_bytes: 256 * 1024,
            write_buffer_bytes: 256 * 1024,
            zstd_level: 3,
        }
    }
}

impl AugmentOptions {
    pub fn with_oxidation(mut self, yes: bool) -> Self {
        self.oxidation = yes;
        self
    }
    pub fn with_decimal_places(mut self, places: usize) -> Self {
        self.decimal_places = places;
        self
    }
    pub fn with_workers(mut self, n: usize) -> Self {
        self.workers = n.max(1);
        self
    }
    pub fn with_progress(mut self, yes: bool) -> Self {
        self.progress = yes;
        self
    }
    pub fn with_progress_label(mut self, label: impl Into<String>) -> Self {
        self.progress_label = Some(label.into());
        self
    }

    // IO buffers tuning
    pub fn with_io_read_buffer(mut self, bytes: usize) -> Self {
        self.read_buffer_bytes = bytes.max(8 * 1024);
        self
    }
    pub fn with_io_write_buffer(mut self, bytes: usize) -> Self {
        self.write_buffer_bytes = bytes.max(8 * 1024);
        self
    }
    pub fn with_io_buffers(mut self, read_bytes: usize, write_bytes: usize) -> Self {
        self.read_buffer_bytes = read_bytes.max(8 * 1024);
        self.write_buffer_bytes = write_bytes.max(8 * 1024);
        self
    }
    pub fn with_zstd_level(mut self, level: i32) -> Self {
        self.zstd_level = level.clamp(1, 22);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_cli_defaults() {
        let o = AugmentOptions::default();
        assert_eq!(o.decimal_places, 4);
        assert_eq!(o.workers, 4);
        assert!(!o.oxidation);
    }

    #[test]
    fn builder_clamps() {
        let o = AugmentOptions::default().with_workers(0).with_io_read_buffer(1).with_zstd_level(99);
        assert_eq!(o.workers, 1);
        assert_eq!(o.read_buffer_bytes, 8 * 1024);
        assert_eq!(o.zstd_level, 22);
    }
}
