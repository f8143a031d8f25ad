use crate::model::Distribution;
use crate::render::canvas::{Canvas, Rect, text_extent};
use crate::render::palette::{self, Progress};
use anyhow::bail;

pub const IMG_W: u32 = 1800;
pub const IMG_H: u32 = 1200;

const MARGIN_LEFT: i32 = 120;
const MARGIN_RIGHT: i32 = 40;
const MARGIN_TOP: i32 = 70;
const MARGIN_BOTTOM: i32 = 100;

/// Height of an iteration cell in thread units.
const CELL_HEIGHT: f64 = 0.5;
/// Every n-th execution position gets an x tick.
const X_TICK_STEP: usize = 5;

const LABEL_SCALE: u32 = 2;
const TITLE_SCALE: u32 = 3;
const CELL_TEXT_SCALE: u32 = 2;

/// Maps plot coordinates (execution position, thread) onto the pixel area.
#[derive(Debug, Clone, Copy)]
pub struct PlotFrame {
    pub area: Rect,
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl PlotFrame {
    /// x spans [-1, max iteration + 2] and y spans [-1, max thread + 1].
    pub fn for_distribution(d: &Distribution) -> Option<Self> {
        let max_iteration = d.max_iteration()?;
        let max_thread = d.max_thread()?;
        Some(Self {
            area: Rect::new(
                MARGIN_LEFT,
                MARGIN_TOP,
                IMG_W as i32 - MARGIN_RIGHT,
                IMG_H as i32 - MARGIN_BOTTOM,
            ),
            x_min: -1.0,
            x_max: max_iteration as f64 + 2.0,
            y_min: -1.0,
            y_max: max_thread as f64 + 1.0,
        })
    }

    pub fn px(&self, x: f64) -> i32 {
        let frac = (x - self.x_min) / (self.x_max - self.x_min);
        self.area.x0 + (frac * (self.area.x1 - self.area.x0) as f64).round() as i32
    }

    pub fn py(&self, y: f64) -> i32 {
        let frac = (self.y_max - y) / (self.y_max - self.y_min);
        self.area.y0 + (frac * (self.area.y1 - self.area.y0) as f64).round() as i32
    }

    fn contains_x(&self, x: f64) -> bool {
        x >= self.x_min && x <= self.x_max
    }

    fn contains_y(&self, y: f64) -> bool {
        y >= self.y_min && y <= self.y_max
    }
}

/// Draw one distribution: a cell per logged event at its execution position,
/// on the row of the thread that ran it, labeled with the iteration index.
pub fn render_png(d: &Distribution) -> crate::Result<Canvas> {
    let Some(frame) = PlotFrame::for_distribution(d) else {
        bail!("distribution {} has no execution points", d.key());
    };
    let threads = d.distinct_threads();

    let mut canvas = Canvas::new(IMG_W, IMG_H, palette::BACKGROUND);
    canvas.fill_rect(frame.area, palette::AXES_BG);

    canvas.set_clip(frame.area);
    draw_grid(&mut canvas, &frame, d.len(), &threads);
    draw_cells(&mut canvas, &frame, d, &threads);
    canvas.reset_clip();

    draw_tick_labels(&mut canvas, &frame, d.len(), &threads);
    draw_titles(&mut canvas, &frame, d);

    Ok(canvas)
}

fn x_ticks(len: usize) -> impl Iterator<Item = usize> {
    (0..len).step_by(X_TICK_STEP)
}

fn draw_grid(canvas: &mut Canvas, frame: &PlotFrame, len: usize, threads: &[u32]) {
    let area = frame.area;
    for pos in x_ticks(len) {
        let x = pos as f64;
        if frame.contains_x(x) {
            canvas.draw_vline(frame.px(x), area.y0, area.y1, palette::GRID_LINE);
        }
    }
    for &t in threads {
        canvas.draw_hline(area.x0, area.x1, frame.py(t as f64), palette::GRID_LINE);
    }
}

fn draw_cells(canvas: &mut Canvas, frame: &PlotFrame, d: &Distribution, threads: &[u32]) {
    let total = d.len();
    for (pos, point) in d.points().enumerate() {
        // Threads come from the same distribution, so the search always hits.
        let rank = threads.binary_search(&point.thread).unwrap_or_default();
        let x = pos as f64;
        let t = point.thread as f64;

        let cell = Rect::new(
            frame.px(x),
            frame.py(t + CELL_HEIGHT / 2.0),
            frame.px(x + 1.0),
            frame.py(t - CELL_HEIGHT / 2.0),
        );
        canvas.fill_rect(cell, palette::thread_color(rank));
        canvas.stroke_rect(cell, palette::BORDER);

        let text_color = Progress::classify(point.iteration, total).text_color();
        canvas.draw_text_vertical(
            frame.px(x + 0.5),
            frame.py(t),
            &point.iteration.to_string(),
            CELL_TEXT_SCALE,
            true,
            text_color,
        );
    }
}

fn draw_tick_labels(canvas: &mut Canvas, frame: &PlotFrame, len: usize, threads: &[u32]) {
    let area = frame.area;
    for pos in x_ticks(len) {
        let x = pos as f64;
        if !frame.contains_x(x) {
            continue;
        }
        let label = pos.to_string();
        let (w, _) = text_extent(&label, LABEL_SCALE);
        canvas.draw_text(frame.px(x) - w / 2, area.y1 + 8, &label, LABEL_SCALE, palette::TEXT);
    }
    for &t in threads {
        let y = t as f64;
        if !frame.contains_y(y) {
            continue;
        }
        let label = t.to_string();
        let (w, h) = text_extent(&label, LABEL_SCALE);
        canvas.draw_text(area.x0 - 10 - w, frame.py(y) - h / 2, &label, LABEL_SCALE, palette::TEXT);
    }
}

fn draw_titles(canvas: &mut Canvas, frame: &PlotFrame, d: &Distribution) {
    let area = frame.area;
    let mid_x = (area.x0 + area.x1) / 2;
    let mid_y = (area.y0 + area.y1) / 2;

    let title = format!("Thread iteration execution: {}", d.key());
    canvas.draw_text_centered(mid_x, MARGIN_TOP / 2, &title, TITLE_SCALE, palette::TEXT);
    canvas.draw_text_centered(mid_x, area.y1 + 60, "Iteration order", LABEL_SCALE, palette::TEXT);
    canvas.draw_text_vertical(
        MARGIN_LEFT / 3,
        mid_y,
        "Thread number",
        LABEL_SCALE,
        false,
        palette::TEXT,
    );
}
