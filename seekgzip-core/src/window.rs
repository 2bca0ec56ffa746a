//! The sliding 32 KiB output buffer fed directly by the block-stepping
//! inflate loop, used both as inflate's output target and as the source of
//! each access point's dictionary snapshot.

use crate::config::WINSIZE;

/// Fixed-size circular buffer tracking the most recent uncompressed output.
pub(crate) struct Window {
    buf: Box<[u8; WINSIZE]>,
    /// Bytes of room left in `buf` before it must wrap back to the start.
    avail: usize,
}

impl Window {
    pub(crate) fn new() -> Self {
        Self {
            buf: Box::new([0u8; WINSIZE]),
            avail: WINSIZE,
        }
    }

    /// The writable region inflate should target next. Wraps to the start
    /// of the buffer when the current pass is full.
    pub(crate) fn output_slice(&mut self) -> &mut [u8] {
        if self.avail == 0 {
            self.avail = WINSIZE;
        }
        let start = WINSIZE - self.avail;
        &mut self.buf[start..]
    }

    /// Record that inflate consumed `n` bytes of the slice last returned by
    /// [`Self::output_slice`].
    pub(crate) fn record_produced(&mut self, n: usize) {
        debug_assert!(n <= self.avail);
        self.avail -= n;
    }

    /// Linearize the most recent `WINSIZE` bytes of output into a fresh,
    /// independently owned snapshot.
    ///
    /// Mirrors the two-`memcpy` tail-then-head layout of the original
    /// `addpoint` routine: the region written before the most recent wrap
    /// comes first, followed by the region written since.
    pub(crate) fn snapshot(&self) -> Box<[u8; WINSIZE]> {
        let mut out = Box::new([0u8; WINSIZE]);
        let head_len = WINSIZE - self.avail;
        let tail_len = WINSIZE - head_len;
        out[..tail_len].copy_from_slice(&self.buf[head_len..]);
        out[tail_len..].copy_from_slice(&self.buf[..head_len]);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_window_has_full_room() {
        let mut w = Window::new();
        assert_eq!(w.output_slice().len(), WINSIZE);
    }

    #[test]
    fn partial_fill_then_snapshot_places_tail_first() {
        let mut w = Window::new();
        {
            let out = w.output_slice();
            out[..3].copy_from_slice(b"abc");
        }
        w.record_produced(3);

        let snap = w.snapshot();
        // Only 3 bytes written so far; they sit at the tail of a
        // full-length snapshot (head_len == 3, tail_len == WINSIZE - 3).
        assert_eq!(&snap[WINSIZE - 3..], b"abc");
    }

    #[test]
    fn wrap_resets_availability() {
        let mut w = Window::new();
        w.record_produced(WINSIZE);
        assert_eq!(w.avail, 0);
        assert_eq!(w.output_slice().len(), WINSIZE);
    }
}
