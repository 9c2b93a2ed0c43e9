//! Performance counters for the render pipeline.
//!
//! Every draw call tallies how many primitives, vertices, and fragments it
//! received and how many survived to the render target. The tallies
//! accumulate in [`Context::stats`][super::ctx::Context] across calls and
//! frames, and the [`Display`] impl prints a short end-of-run report.

use alloc::{format, string::String};
use core::{
    fmt::{self, Display, Formatter},
    ops::AddAssign,
    time::Duration,
};
#[cfg(feature = "std")]
use std::time::Instant;

/// Accumulated render statistics.
#[derive(Clone, Debug, Default)]
pub struct Stats {
    /// Wall-clock time spent rendering.
    pub time: Duration,
    /// Draw calls issued.
    pub calls: f32,
    /// Frames completed.
    pub frames: f32,

    /// Triangles in and out.
    pub prims: Throughput,
    /// Vertices in and out.
    pub verts: Throughput,
    /// Fragments in and out.
    pub frags: Throughput,

    #[cfg(feature = "std")]
    start: Option<Instant>,
}

/// Items received by a pipeline stage versus items it emitted.
///
/// The difference is work discarded by clipping, culling, and depth tests.
#[derive(Copy, Clone, Debug, Default)]
pub struct Throughput {
    pub i: usize,
    pub o: usize,
}

impl Stats {
    /// Returns zeroed stats.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns zeroed stats with the timer running.
    ///
    /// [`finish`][Self::finish] stores the elapsed time in `self.time`.
    /// Without the `std` feature there is no clock and this is the same
    /// as [`Stats::new`].
    pub fn start() -> Self {
        Self {
            #[cfg(feature = "std")]
            start: Some(Instant::now()),
            ..Self::default()
        }
    }

    /// Stops the timer, recording the elapsed time in `self.time`.
    ///
    /// Does nothing if the timer is not running or the `std` feature is
    /// disabled.
    pub fn finish(self) -> Self {
        Self {
            #[cfg(feature = "std")]
            time: self.start.map_or(self.time, |at| at.elapsed()),
            ..self
        }
    }

    /// Returns these stats averaged over `self.time`, as per-second rates.
    ///
    /// With a zero elapsed time the totals are returned as they are.
    pub fn per_sec(&self) -> Self {
        let secs = self.time.as_secs_f32();
        let secs = if secs > 0.0 { secs } else { 1.0 };
        Self {
            time: Duration::from_secs(1),
            calls: self.calls / secs,
            frames: self.frames / secs,
            prims: self.prims.div(secs),
            verts: self.verts.div(secs),
            frags: self.frags.div(secs),
            #[cfg(feature = "std")]
            start: None,
        }
    }

    /// Returns these stats averaged over `self.frames`, as per-frame counts.
    pub fn per_frame(&self) -> Self {
        let frames = self.frames.max(1.0);
        Self {
            time: self.time.div_f32(frames),
            calls: self.calls / frames,
            frames: 1.0,
            prims: self.prims.div(frames),
            verts: self.verts.div(frames),
            frags: self.frags.div(frames),
            #[cfg(feature = "std")]
            start: None,
        }
    }
}

impl Throughput {
    fn div(&self, by: f32) -> Self {
        Self {
            i: (self.i as f32 / by) as usize,
            o: (self.o as f32 / by) as usize,
        }
    }
}

impl Display for Stats {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let fps = self.per_sec().frames;
        let per_f = self.per_frame();
        writeln!(
            f,
            "render stats: {}, {} frames ({fps:.1} fps), {} calls",
            human_time(self.time),
            self.frames,
            self.calls,
        )?;
        let rows = [
            ("prims", self.prims, per_f.prims),
            ("verts", self.verts, per_f.verts),
            ("frags", self.frags, per_f.frags),
        ];
        for (label, total, by_frame) in rows {
            writeln!(f, " {label}: {total}; per frame {by_frame}")?;
        }
        Ok(())
    }
}

impl Display for Throughput {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} in, {} out", human_num(self.i), human_num(self.o))
    }
}

impl AddAssign for Stats {
    fn add_assign(&mut self, other: Self) {
        self.time += other.time;
        self.calls += other.calls;
        self.frames += other.frames;
        self.prims += other.prims;
        self.verts += other.verts;
        self.frags += other.frags;
    }
}

impl AddAssign for Throughput {
    fn add_assign(&mut self, other: Self) {
        self.i += other.i;
        self.o += other.o;
    }
}

/// Formats `n` with three significant digits and a metric suffix.
fn human_num(n: usize) -> String {
    for (div, unit) in [(1_000_000_000, 'G'), (1_000_000, 'M'), (1_000, 'k')] {
        if n >= div {
            let scaled = n as f64 / div as f64;
            return if scaled < 10.0 {
                format!("{scaled:.2}{unit}")
            } else if scaled < 100.0 {
                format!("{scaled:.1}{unit}")
            } else {
                format!("{scaled:.0}{unit}")
            };
        }
    }
    format!("{n}")
}

/// Formats `d` in the largest unit that keeps the value above one.
fn human_time(d: Duration) -> String {
    let secs = d.as_secs_f32();
    if secs >= 60.0 {
        format!("{}m{:02}s", secs as u32 / 60, secs as u32 % 60)
    } else if secs >= 1.0 {
        format!("{secs:.2}s")
    } else if secs >= 1e-3 {
        format!("{:.2}ms", secs * 1e3)
    } else {
        format!("{:.0}µs", secs * 1e6)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Stats {
        Stats {
            time: Duration::from_secs(2),
            calls: 200.0,
            frames: 100.0,
            prims: Throughput { i: 50_000, o: 20_000 },
            verts: Throughput { i: 150_000, o: 60_000 },
            frags: Throughput { i: 4_000_000, o: 1_000_000 },
            #[cfg(feature = "std")]
            start: None,
        }
    }

    #[test]
    fn per_frame_averages() {
        let avg = sample().per_frame();
        assert_eq!(avg.time, Duration::from_millis(20));
        assert_eq!(avg.calls, 2.0);
        assert_eq!(avg.prims.i, 500);
        assert_eq!(avg.frags.o, 10_000);
    }

    #[test]
    fn per_sec_rates() {
        let rate = sample().per_sec();
        assert_eq!(rate.frames, 50.0);
        assert_eq!(rate.verts.i, 75_000);
    }

    #[test]
    fn accumulation() {
        let mut total = Stats::new();
        total += sample();
        total += sample();
        assert_eq!(total.frames, 200.0);
        assert_eq!(total.prims.i, 100_000);
        assert_eq!(total.time, Duration::from_secs(4));
    }

    #[test]
    fn report_format() {
        assert_eq!(
            format!("{}", sample()),
            "render stats: 2.00s, 100 frames (50.0 fps), 200 calls\n \
             prims: 50.0k in, 20.0k out; per frame 500 in, 200 out\n \
             verts: 150k in, 60.0k out; per frame 1.50k in, 600 out\n \
             frags: 4.00M in, 1.00M out; per frame 40.0k in, 10.0k out\n"
        );
    }

    #[test]
    fn number_formatting() {
        assert_eq!(human_num(0), "0");
        assert_eq!(human_num(999), "999");
        assert_eq!(human_num(1_234), "1.23k");
        assert_eq!(human_num(56_789), "56.8k");
        assert_eq!(human_num(654_321), "654k");
        assert_eq!(human_num(7_654_321), "7.65M");
        assert_eq!(human_num(9_876_543_210), "9.88G");
    }

    #[test]
    fn time_formatting() {
        assert_eq!(human_time(Duration::from_micros(250)), "250µs");
        assert_eq!(human_time(Duration::from_millis(42)), "42.00ms");
        assert_eq!(human_time(Duration::from_secs_f32(1.5)), "1.50s");
        assert_eq!(human_time(Duration::from_secs(150)), "2m30s");
    }
}
