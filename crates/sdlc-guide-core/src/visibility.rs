use serde::Serialize;

/// Vertical extent of an element relative to the viewport top.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Rect {
    pub top: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(top: f64, height: f64) -> Self {
        Self { top, height }
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

/// Fraction of `rect` inside a viewport of `viewport_height`. Elements with
/// no height have no meaningful fraction and yield `None`.
pub fn visible_fraction(rect: Rect, viewport_height: f64) -> Option<f64> {
    if rect.height <= 0.0 {
        return None;
    }
    let visible_top = rect.top.max(0.0);
    let visible_bottom = rect.bottom().min(viewport_height);
    let visible = (visible_bottom - visible_top).max(0.0);
    Some(visible / rect.height)
}

/// Pick the candidate with the strictly greatest fraction; ties keep the
/// first one seen. Returns `None` unless the winner exceeds `floor`.
pub fn most_visible<T>(
    candidates: impl IntoIterator<Item = (T, f64)>,
    floor: f64,
) -> Option<(T, f64)> {
    let mut best: Option<(T, f64)> = None;
    for (item, fraction) in candidates {
        let better = match &best {
            Some((_, current)) => fraction > *current,
            None => true,
        };
        if better {
            best = Some((item, fraction));
        }
    }
    best.filter(|(_, fraction)| *fraction > floor)
}
