//! Telomere boundary scanning.
//!
//! A chromosome's telomere is an unbroken run of a fixed repeat unit
//! starting at the physical start (or end) of the sequence, possibly
//! beginning mid-occurrence where the sequence was truncated. The scanner
//! walks fixed-size windows from the relevant edge inward and binary
//! searches each window for the boundary where the run stops, carrying
//! occurrences split across window boundaries.

use crate::base::Base;
use crate::stream::HelixStream;
use crate::view::SequenceView;

/// The canonical vertebrate telomere repeat unit
pub const TELOMERE_MOTIF: [Base; 6] = [Base::T, Base::T, Base::A, Base::G, Base::G, Base::G];

/// Bytes per scan window (2048 bases)
const WINDOW_BYTES: usize = 512;

/// Bytes inspected by the alignment probe (12 bases)
const PROBE_BYTES: usize = 3;

/// Carry state between scan windows
enum Carry {
    /// First window only: this many bases at the stream edge belong to an
    /// occurrence truncated by the physical start/end
    Edge(usize),
    /// An occurrence is split across the window boundary; this many of its
    /// bases were left unconfirmed in the previous window
    Split(usize),
    /// The previous window ended exactly on an occurrence boundary
    Clean,
}

/// Counts the bases of the telomere run at the start of the stream
///
/// The count includes the bases of a motif occurrence truncated by the
/// physical start. Returns `None` when the alignment probe finds no motif
/// occurrence within the first 12 bases; "no telomere" is an expected
/// outcome, not an error. The stream is repositioned internally, so
/// repeated calls are idempotent.
#[must_use]
pub fn leading_telomere_bases<S: HelixStream + ?Sized>(
    stream: &S,
    motif: &[Base],
) -> Option<usize> {
    if motif.is_empty() {
        return Some(0);
    }
    stream.seek(0);
    let probe = stream.read(PROBE_BYTES);
    let rotation = probe_leading(&probe, motif)?;

    let mut total = 0;
    let mut carry = Carry::Edge(rotation);
    stream.seek(0);
    loop {
        let window = stream.read(WINDOW_BYTES);
        let len = window.len();
        if len == 0 {
            // stream exhausted: the entire stream is telomere
            return Some(total);
        }

        let carried = match carry {
            Carry::Edge(rotation) => {
                // a truncated occurrence at the physical edge counts only
                // when it matches the motif tail exactly
                if rotation > 0 && matches_at(&window, 0, &motif[motif.len() - rotation..]) {
                    total += rotation;
                }
                rotation
            }
            Carry::Split(pending) => {
                let needed = motif.len() - pending;
                if matches_at(&window, 0, &motif[pending..]) {
                    total += motif.len();
                    needed
                } else {
                    // the split occurrence never completed; its pending
                    // bases stay uncounted
                    return Some(total);
                }
            }
            Carry::Clean => 0,
        };

        let avail = len.saturating_sub(carried);
        let slots = avail / motif.len();
        let remainder = avail % motif.len();

        let matched = matching_slots(slots, |slot| {
            matches_at(&window, carried + slot * motif.len(), motif)
        });
        if matched < slots {
            return Some(total + matched * motif.len());
        }
        total += slots * motif.len();

        carry = if remainder == 0 {
            Carry::Clean
        } else if matches_at(&window, len - remainder, &motif[..remainder]) {
            Carry::Split(remainder)
        } else {
            return Some(total);
        };
    }
}

/// Counts the bases of the telomere run at the end of the stream
///
/// Mirror of [`leading_telomere_bases`]: windows march from the stream's
/// end toward its interior and occurrences are matched right to left.
#[must_use]
pub fn trailing_telomere_bases<S: HelixStream + ?Sized>(
    stream: &S,
    motif: &[Base],
) -> Option<usize> {
    if motif.is_empty() {
        return Some(0);
    }
    let total_bytes = stream.len();
    stream.seek(total_bytes.saturating_sub(PROBE_BYTES));
    let probe = stream.read(PROBE_BYTES);
    let rotation = probe_trailing(&probe, motif)?;

    let mut total = 0;
    let mut carry = Carry::Edge(rotation);
    let mut consumed = 0;
    loop {
        let window_bytes = WINDOW_BYTES.min(total_bytes - consumed);
        if window_bytes == 0 {
            return Some(total);
        }
        stream.seek(total_bytes - consumed - window_bytes);
        let window = stream.read(window_bytes);
        consumed += window_bytes;
        let len = window.len();

        let carried = match carry {
            Carry::Edge(rotation) => {
                if rotation > 0
                    && len >= rotation
                    && matches_at(&window, len - rotation, &motif[..rotation])
                {
                    total += rotation;
                }
                rotation
            }
            Carry::Split(pending) => {
                let needed = motif.len() - pending;
                if len >= needed && matches_at(&window, len - needed, &motif[..needed]) {
                    total += motif.len();
                    needed
                } else {
                    return Some(total);
                }
            }
            Carry::Clean => 0,
        };

        let avail = len.saturating_sub(carried);
        let slots = avail / motif.len();
        let remainder = avail % motif.len();

        let matched = matching_slots(slots, |slot| {
            matches_at(&window, len - carried - (slot + 1) * motif.len(), motif)
        });
        if matched < slots {
            return Some(total + matched * motif.len());
        }
        total += slots * motif.len();

        carry = if remainder == 0 {
            Carry::Clean
        } else if matches_at(&window, 0, &motif[motif.len() - remainder..]) {
            Carry::Split(remainder)
        } else {
            return Some(total);
        };
    }
}

/// Smallest rotation at which the motif matches inside the probe window,
/// or `None` when the probe finds no occurrence at all
fn probe_leading(probe: &SequenceView<'_>, motif: &[Base]) -> Option<usize> {
    (0..motif.len()).find(|&rotation| matches_at(probe, rotation, motif))
}

/// Mirror of [`probe_leading`]: rotations are measured back from the end
fn probe_trailing(probe: &SequenceView<'_>, motif: &[Base]) -> Option<usize> {
    (0..motif.len()).find(|&rotation| {
        probe.len() >= rotation + motif.len()
            && matches_at(probe, probe.len() - rotation - motif.len(), motif)
    })
}

fn matches_at(window: &SequenceView<'_>, start: usize, pattern: &[Base]) -> bool {
    if start + pattern.len() > window.len() {
        return false;
    }
    pattern
        .iter()
        .enumerate()
        .all(|(i, &base)| window.get(start + i) == Some(base))
}

/// Length of the contiguous prefix of matching slots, by binary search
///
/// Sound only under the unbroken-run invariant: once one slot fails to
/// match, no later slot belongs to the run.
fn matching_slots<F>(slots: usize, slot_matches: F) -> usize
where
    F: Fn(usize) -> bool,
{
    let mut start = 0;
    let mut end = slots;
    // invariant: slots below `start` match, slots at or past `end` do not
    while start < end {
        let mid = start + (end - start) / 2;
        if slot_matches(mid) {
            start = mid + 1;
        } else {
            end = mid;
        }
    }
    start
}

#[cfg(test)]
mod testing {
    use super::*;
    use crate::base::pack;
    use crate::stream::ChunkStream;
    use Base::{A, C, G, T};

    fn motif_base(k: usize) -> Base {
        TELOMERE_MOTIF[k % TELOMERE_MOTIF.len()]
    }

    /// Leading edge cut mid-motif, one full repeat, then a break at the
    /// repeat's final base
    #[test]
    fn test_leading_break_in_first_repeats() {
        let mut data = vec![0u8; 512];
        // ends a telomere occurrence
        data[0] = pack(G, T, T, A);
        // last base breaks the run
        data[1] = pack(G, G, G, G);
        for byte in &mut data[2..] {
            *byte = pack(T, T, A, A);
        }

        let stream = ChunkStream::new(data);
        assert_eq!(leading_telomere_bases(&stream, &TELOMERE_MOTIF), Some(7));
    }

    /// 1 edge base + 341 full repeats + a final base breaking the run:
    /// 2047 of the 2048 bases are telomere
    #[test]
    fn test_leading_break_at_final_base() {
        let mut data = vec![0u8; 512];
        data[0] = pack(G, T, T, A);
        data[1] = pack(G, G, G, T);
        let mut k = 1;
        for byte in &mut data[2..=510] {
            let [a, b, c, d] = std::array::from_fn(|i| motif_base(k + i));
            k += 4;
            *byte = pack(a, b, c, d);
        }
        // last base doesn't start a new occurrence
        data[511] = pack(G, G, G, A);

        let stream = ChunkStream::new(data);
        assert_eq!(leading_telomere_bases(&stream, &TELOMERE_MOTIF), Some(2047));
    }

    /// Trailing edge: two bases of a truncated occurrence plus one full
    /// repeat before the run breaks
    #[test]
    fn test_trailing_break_in_first_repeats() {
        let mut data = vec![0u8; 512];
        for byte in &mut data[..=509] {
            *byte = pack(A, T, C, G);
        }
        // breaks the run at its outward side
        data[510] = pack(T, T, A, G);
        // last two bases start a new occurrence
        data[511] = pack(G, G, T, T);

        let stream = ChunkStream::new(data);
        assert_eq!(trailing_telomere_bases(&stream, &TELOMERE_MOTIF), Some(8));
    }

    /// 4 non-matching bases + 340 full repeats + 4 edge bases = 2044
    #[test]
    fn test_trailing_break_at_first_base() {
        let mut data = vec![0u8; 512];
        data[0] = pack(A, C, G, G);
        let mut k = 0;
        for byte in &mut data[1..=510] {
            let [a, b, c, d] = std::array::from_fn(|i| motif_base(k + i));
            k += 4;
            *byte = pack(a, b, c, d);
        }
        data[511] = pack(T, T, A, G);

        let stream = ChunkStream::new(data);
        assert_eq!(trailing_telomere_bases(&stream, &TELOMERE_MOTIF), Some(2044));
    }

    /// 4 edge bases (a repeat cut after its second base) followed by
    /// exactly `n` full repeats, then filler
    fn leading_run_data(n: usize) -> Vec<u8> {
        let mut data = vec![0u8; 1024];
        data[0] = pack(A, G, G, G);
        let mut k = 0;
        let mut complete = 0;
        let mut i = 1;
        while i < data.len() {
            let mut bases = [A; 4];
            for base in &mut bases {
                *base = motif_base(k);
                if k % 6 == 5 {
                    complete += 1;
                }
                k += 1;
            }
            data[i] = pack(bases[0], bases[1], bases[2], bases[3]);
            i += 1;
            if complete >= n {
                break;
            }
        }
        for byte in &mut data[i..] {
            *byte = pack(C, C, T, T);
        }
        data
    }

    #[test]
    fn test_leading_parametrized_repeats() {
        for n in 1..=600 {
            let stream = ChunkStream::new(leading_run_data(n));
            assert_eq!(
                leading_telomere_bases(&stream, &TELOMERE_MOTIF),
                Some(4 + 6 * n),
                "with {n} complete repeats"
            );
        }
    }

    /// Mirror of [`leading_run_data`]: `n` full repeats ending in 4 edge
    /// bases at the very end of the stream, filler in front
    fn trailing_run_data(n: usize) -> Vec<u8> {
        let mut data = vec![0u8; 1024];
        let last = data.len() - 1;
        data[last] = pack(T, T, A, G);
        let mut k = 6005usize;
        let mut complete = 0;
        let mut i = last;
        while i > 0 {
            i -= 1;
            let mut bases = [A; 4];
            for base in bases.iter_mut().rev() {
                *base = motif_base(k);
                if k % 6 == 0 {
                    complete += 1;
                }
                k -= 1;
            }
            data[i] = pack(bases[0], bases[1], bases[2], bases[3]);
            if complete >= n {
                break;
            }
        }
        for byte in &mut data[..i] {
            *byte = pack(C, T, T, C);
        }
        data
    }

    #[test]
    fn test_trailing_parametrized_repeats() {
        for n in 1..=600 {
            let stream = ChunkStream::new(trailing_run_data(n));
            assert_eq!(
                trailing_telomere_bases(&stream, &TELOMERE_MOTIF),
                Some(4 + 6 * n),
                "with {n} complete repeats"
            );
        }
    }

    #[test]
    fn test_no_telomere_found() {
        let data = vec![pack(A, C, G, T); 64];
        let stream = ChunkStream::new(data);
        assert_eq!(leading_telomere_bases(&stream, &TELOMERE_MOTIF), None);
        assert_eq!(trailing_telomere_bases(&stream, &TELOMERE_MOTIF), None);
    }

    #[test]
    fn test_stream_shorter_than_probe() {
        let stream = ChunkStream::new(vec![pack(T, T, A, G)]);
        assert_eq!(leading_telomere_bases(&stream, &TELOMERE_MOTIF), None);
    }

    #[test]
    fn test_whole_stream_is_telomere() {
        // 24 bases, exactly 4 repeats
        let data = vec![
            pack(T, T, A, G),
            pack(G, G, T, T),
            pack(A, G, G, G),
            pack(T, T, A, G),
            pack(G, G, T, T),
            pack(A, G, G, G),
        ];
        let stream = ChunkStream::new(data);
        assert_eq!(leading_telomere_bases(&stream, &TELOMERE_MOTIF), Some(24));
        assert_eq!(trailing_telomere_bases(&stream, &TELOMERE_MOTIF), Some(24));
    }

    #[test]
    fn test_short_stream_with_partial_tail() {
        // 8 bases: one repeat then two bases that never complete another
        let data = vec![pack(T, T, A, G), pack(G, G, A, A)];
        let stream = ChunkStream::new(data);
        assert_eq!(leading_telomere_bases(&stream, &TELOMERE_MOTIF), Some(6));
    }

    #[test]
    fn test_scans_are_idempotent() {
        let stream = ChunkStream::new(leading_run_data(400));
        let first = leading_telomere_bases(&stream, &TELOMERE_MOTIF);
        let second = leading_telomere_bases(&stream, &TELOMERE_MOTIF);
        assert_eq!(first, second);

        // a dirtied cursor position must not change the result
        stream.seek(17);
        assert_eq!(leading_telomere_bases(&stream, &TELOMERE_MOTIF), first);
    }
}
