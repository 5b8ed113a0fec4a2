//! Rendering statistics.

use alloc::{format, string::String};
use core::fmt::{self, Display, Formatter};
use core::ops::AddAssign;
use core::time::Duration;
#[cfg(feature = "std")]
use std::time::Instant;

/// Collects and accumulates rendering statistics and performance data.
#[derive(Clone, Debug, Default)]
pub struct Stats {
    /// Time spent rendering.
    pub time: Duration,
    /// Number of frames presented.
    pub frames: f32,
    /// Triangles submitted, and triangles that survived culling and
    /// clipping and were rasterized.
    pub prims: Throughput,
    /// Fragments depth-tested, and fragments written to the color buffer.
    pub frags: Throughput,

    #[cfg(feature = "std")]
    start: Option<Instant>,
}

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct Throughput {
    // Count of items submitted for rendering.
    pub i: usize,
    // Count of items output to the render target.
    pub o: usize,
}

impl Stats {
    /// Creates a new zeroed `Stats` instance.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a `Stats` instance that records the time of its creation.
    ///
    /// Call [`finish`][Self::finish] to write the elapsed time to
    /// `self.time`. Equivalent to [`Stats::new`] if the `std` feature
    /// is not enabled.
    pub fn start() -> Self {
        Self {
            #[cfg(feature = "std")]
            start: Some(Instant::now()),
            ..Self::default()
        }
    }

    /// Records the time elapsed since [`start`][Self::start] to
    /// `self.time`.
    ///
    /// No-op if the timer was not started, or unless the `std` feature
    /// is enabled.
    #[must_use]
    pub fn finish(self) -> Self {
        Self {
            #[cfg(feature = "std")]
            time: self.start.map(|st| st.elapsed()).unwrap_or(self.time),
            ..self
        }
    }

    /// Returns the average throughput in items per second.
    pub fn per_sec(&self) -> Self {
        let secs = if self.time.is_zero() {
            1.0
        } else {
            self.time.as_secs_f32()
        };
        Self {
            time: Duration::from_secs(1),
            frames: self.frames / secs,
            prims: self.prims.per_sec(secs),
            frags: self.frags.per_sec(secs),
            #[cfg(feature = "std")]
            start: None,
        }
    }

    /// Returns the average throughput in items per frame.
    pub fn per_frame(&self) -> Self {
        let frames = self.frames.max(1.0);
        Self {
            time: self.time.div_f32(frames),
            frames: 1.0,
            prims: self.prims.per_frame(frames),
            frags: self.frags.per_frame(frames),
            #[cfg(feature = "std")]
            start: None,
        }
    }
}

impl Throughput {
    fn per_sec(&self, secs: f32) -> Self {
        Self {
            i: (self.i as f32 / secs) as usize,
            o: (self.o as f32 / secs) as usize,
        }
    }
    fn per_frame(&self, frames: f32) -> Self {
        Self {
            i: self.i / frames as usize,
            o: self.o / frames as usize,
        }
    }
}

impl Display for Stats {
    #[rustfmt::skip]
    #[inline(never)]
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let w = f.width().unwrap_or(16);
        let per_s = self.per_sec();
        let per_f = self.per_frame();
        write!(f,
            " STATS  {:>w$} │ {:>w$} │ {:>w$}\n\
             ────────{empty:─>w$}─┼─{empty:─>w$}─┼─{empty:─>w$}─\n \
              time   {:>w$} │ {empty:w$} │ {:>w$}\n \
              frames {:>w$} │ {:>w$.1} │\n\
             ────────{empty:─>w$}─┼─{empty:─>w$}─┼─{empty:─>w$}─\n",
            "TOTAL", "PER SEC", "PER FRAME",
            human_time(self.time), human_time(per_f.time),
            self.frames, per_s.frames,
            empty = ""
        )?;

        let rows = [
            ("prims", [self.prims, per_s.prims, per_f.prims]),
            ("frags", [self.frags, per_s.frags, per_f.frags]),
        ];
        for (lbl, [tot, per_s, per_f]) in rows {
            if f.alternate() {
                writeln!(f, " {lbl:6} {tot:#w$} │ {per_s:#w$} │ {per_f:#w$}")?;
            } else {
                writeln!(f, " {lbl:6} {tot:w$} │ {per_s:w$} │ {per_f:w$}")?;
            }
        }
        Ok(())
    }
}

impl Display for Throughput {
    #[inline(never)]
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let &Self { i, o } = self;
        let w = f.width().unwrap_or(10);
        if f.alternate() {
            if i == 0 {
                write!(f, "{:>w$}", "--")
            } else {
                let pct = 100.0 * o as f32 / i as f32;
                write!(f, "{pct:>w$.1}%", w = w - 1)
            }
        } else {
            let io = format!("{} / {}", human_num(i), human_num(o));
            write!(f, "{io:>w$}")
        }
    }
}

impl AddAssign for Stats {
    /// Appends the stats of `other` to `self`.
    fn add_assign(&mut self, other: Self) {
        self.time += other.time;
        self.frames += other.frames;
        self.prims += other.prims;
        self.frags += other.frags;
    }
}

impl AddAssign for Throughput {
    fn add_assign(&mut self, rhs: Self) {
        self.i += rhs.i;
        self.o += rhs.o;
    }
}

#[inline(never)]
fn human_num(n: usize) -> String {
    if n < 1_000 {
        format!("{n:5}")
    } else if n < 100_000 {
        format!("{:4.1}k", n as f32 / 1_000.)
    } else if n < 1_000_000 {
        format!("{:4}k", n / 1_000)
    } else if n < 100_000_000 {
        format!("{:4.1}M", n as f32 / 1_000_000.)
    } else {
        format!("{:4}M", n / 1_000_000)
    }
}

#[inline(never)]
fn human_time(d: Duration) -> String {
    let secs = d.as_secs_f32();
    if secs < 1e-3 {
        format!("{:4.1}μs", secs * 1_000_000.)
    } else if secs < 1.0 {
        format!("{:4.1}ms", secs * 1_000.)
    } else if secs < 60.0 {
        format!("{:.1}s", secs)
    } else {
        format!("{:.0}min {:02.0}s", (secs / 60.0) as u32, secs % 60.0)
    }
}

#[cfg(test)]
mod tests {
    use core::time::Duration;

    use super::*;

    fn stats() -> Stats {
        Stats {
            time: Duration::from_secs(2),
            frames: 100.0,
            prims: Throughput { i: 6_000, o: 3_000 },
            frags: Throughput { i: 1_000_000, o: 800_000 },
            ..Stats::default()
        }
    }

    #[test]
    fn per_sec_and_per_frame() {
        let s = stats();
        let per_s = s.per_sec();
        assert_eq!(per_s.frames, 50.0);
        assert_eq!(per_s.prims, Throughput { i: 3_000, o: 1_500 });

        let per_f = s.per_frame();
        let ms = per_f.time.as_secs_f32() * 1000.0;
        assert!((ms - 20.0).abs() < 1e-3, "{ms}");
        assert_eq!(per_f.frags, Throughput { i: 10_000, o: 8_000 });
    }

    #[test]
    fn stats_display() {
        assert_eq!(
            format!("{}", stats()),
            " \
 STATS             TOTAL │          PER SEC │        PER FRAME
─────────────────────────┼──────────────────┼──────────────────
 time               2.0s │                  │           20.0ms
 frames              100 │             50.0 │
─────────────────────────┼──────────────────┼──────────────────
 prims      6.0k /  3.0k │     3.0k /  1.5k │       60 /    30
 frags      1.0M /  800k │     500k /  400k │    10.0k /  8.0k
"
        );

        assert_eq!(
            format!("{:#}", stats()),
            " \
 STATS             TOTAL │          PER SEC │        PER FRAME
─────────────────────────┼──────────────────┼──────────────────
 time               2.0s │                  │           20.0ms
 frames              100 │             50.0 │
─────────────────────────┼──────────────────┼──────────────────
 prims             50.0% │            50.0% │            50.0%
 frags             80.0% │            80.0% │            80.0%
"
        );
    }

    #[test]
    fn add_assign() {
        let mut s = stats();
        s += stats();
        assert_eq!(s.frames, 200.0);
        assert_eq!(s.time, Duration::from_secs(4));
        assert_eq!(s.prims, Throughput { i: 12_000, o: 6_000 });
    }

    #[test]
    fn human_nums() {
        assert_eq!(human_num(10), "   10");
        assert_eq!(human_num(1_234), " 1.2k");
        assert_eq!(human_num(123_456), " 123k");
        assert_eq!(human_num(1_234_567), " 1.2M");
        assert_eq!(human_num(123_456_789), " 123M");
    }

    #[test]
    fn human_times() {
        assert_eq!(human_time(Duration::from_micros(123)), "123.0μs");
        assert_eq!(human_time(Duration::from_millis(123)), "123.0ms");
        assert_eq!(human_time(Duration::from_millis(1234)), "1.2s");
        assert_eq!(human_time(Duration::from_secs(1234)), "20min 34s");
    }
}
