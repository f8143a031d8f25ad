//! Colors for the distribution plot.

pub type Rgb = [u8; 3];

pub const BACKGROUND: Rgb = [255, 255, 255];
pub const AXES_BG: Rgb = [234, 234, 242];
pub const GRID_LINE: Rgb = [255, 255, 255];
pub const TEXT: Rgb = [38, 38, 38];
pub const BORDER: Rgb = [0, 0, 0];

/// Qualitative `tab10` palette.
///
/// More than ten threads reuse colors from the start, so two threads can share
/// a color; the y axis still tells them apart.
pub const THREAD_COLORS: [Rgb; 10] = [
    [31, 119, 180],
    [255, 127, 14],
    [44, 160, 44],
    [214, 39, 40],
    [148, 103, 189],
    [140, 86, 75],
    [227, 119, 194],
    [127, 127, 127],
    [188, 189, 34],
    [23, 190, 207],
];

/// Color for the thread with the given rank among the sorted distinct threads.
pub fn thread_color(rank: usize) -> Rgb {
    THREAD_COLORS[rank % THREAD_COLORS.len()]
}

/// How far into the loop an iteration index lies, relative to the number of
/// logged iterations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress {
    /// Above 90%.
    Final,
    /// Above 75%.
    Late,
    /// Above 50%.
    Middle,
    Early,
}

impl Progress {
    pub fn classify(iteration: u64, total: usize) -> Self {
        let v = iteration as f64;
        let total = total as f64;
        if v > 0.9 * total {
            Progress::Final
        } else if v > 0.75 * total {
            Progress::Late
        } else if v > 0.5 * total {
            Progress::Middle
        } else {
            Progress::Early
        }
    }

    pub fn text_color(self) -> Rgb {
        match self {
            Progress::Final => [0, 0, 0],
            Progress::Late => [255, 0, 0],
            Progress::Middle => [255, 255, 0],
            Progress::Early => [0, 128, 0],
        }
    }
}
