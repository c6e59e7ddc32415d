use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Regions of the question screen. The feedback pane only exists once an
/// answer is confirmed; the progress bar is dropped on short terminals.
/// The footer is as tall as its packed hint lines.
pub struct QuizLayout {
    pub header: Rect,
    pub card: Rect,
    pub feedback: Option<Rect>,
    pub score: Rect,
    pub progress: Option<Rect>,
    pub footer: Rect,
}

impl QuizLayout {
    pub const FEEDBACK_HEIGHT: u16 = 4;
    pub const SCORE_HEIGHT: u16 = 5;
    pub const PROGRESS_HEIGHT: u16 = 3;

    pub fn new(area: Rect, show_feedback: bool, footer_lines: u16) -> Self {
        let show_progress = area.height >= 28;

        let mut constraints = vec![Constraint::Length(1), Constraint::Min(8)];
        if show_feedback {
            constraints.push(Constraint::Length(Self::FEEDBACK_HEIGHT));
        }
        constraints.push(Constraint::Length(Self::SCORE_HEIGHT));
        if show_progress {
            constraints.push(Constraint::Length(Self::PROGRESS_HEIGHT));
        }
        constraints.push(Constraint::Length(footer_lines.max(1)));

        let body = content_column(area);
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(body);

        let mut idx = 2;
        let feedback = show_feedback.then(|| {
            idx += 1;
            rows[idx - 1]
        });
        let score = rows[idx];
        idx += 1;
        let progress = show_progress.then(|| {
            idx += 1;
            rows[idx - 1]
        });

        Self {
            header: Rect::new(area.x, area.y, area.width, 1),
            card: rows[1],
            feedback,
            score,
            progress,
            footer: rows[idx],
        }
    }

    /// Width of the column everything below the header is drawn in.
    pub fn content_width(area: Rect) -> u16 {
        content_column(area).width
    }
}

/// Keep long lines readable on wide terminals.
fn content_column(area: Rect) -> Rect {
    const MAX_WIDTH: u16 = 100;
    if area.width <= MAX_WIDTH {
        return area;
    }
    let left = area.x + (area.width - MAX_WIDTH) / 2;
    Rect::new(left, area.y, MAX_WIDTH, area.height)
}

pub fn pack_hint_lines(hints: &[&str], width: usize) -> Vec<String> {
    if width == 0 || hints.is_empty() {
        return Vec::new();
    }

    let prefix = " ";
    let separator = "  ";
    let mut out: Vec<String> = Vec::new();
    let mut current = prefix.to_string();
    let mut has_hint = false;

    for hint in hints.iter().filter(|h| !h.is_empty()) {
        let candidate = if has_hint {
            format!("{current}{separator}{hint}")
        } else {
            format!("{current}{hint}")
        };
        if candidate.chars().count() <= width || !has_hint {
            current = candidate;
        } else {
            out.push(current);
            current = format!("{prefix}{hint}");
        }
        has_hint = true;
    }

    if has_hint {
        out.push(current);
    }
    out
}

pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    const MIN_POPUP_WIDTH: u16 = 48;
    const MIN_POPUP_HEIGHT: u16 = 12;

    let requested_w = area.width.saturating_mul(percent_x.min(100)) / 100;
    let requested_h = area.height.saturating_mul(percent_y.min(100)) / 100;

    let target_w = requested_w.max(MIN_POPUP_WIDTH).min(area.width);
    let target_h = requested_h.max(MIN_POPUP_HEIGHT).min(area.height);

    let left = area.x + area.width.saturating_sub(target_w) / 2;
    let top = area.y + area.height.saturating_sub(target_h) / 2;

    Rect::new(left, top, target_w, target_h)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feedback_region_only_when_requested() {
        let area = Rect::new(0, 0, 80, 30);
        let without = QuizLayout::new(area, false, 1);
        assert!(without.feedback.is_none());
        assert!(without.progress.is_some());

        let with = QuizLayout::new(area, true, 1);
        let fb = with.feedback.unwrap();
        assert_eq!(fb.height, QuizLayout::FEEDBACK_HEIGHT);
        assert!(fb.y > with.card.y);
        assert!(with.score.y > fb.y);
        assert_eq!(with.footer.y, 29);
    }

    #[test]
    fn test_short_terminal_drops_progress_bar() {
        let layout = QuizLayout::new(Rect::new(0, 0, 80, 20), true, 1);
        assert!(layout.progress.is_none());
        assert_eq!(layout.score.height, QuizLayout::SCORE_HEIGHT);
    }

    #[test]
    fn test_wide_terminal_is_centered() {
        let layout = QuizLayout::new(Rect::new(0, 0, 160, 30), false, 1);
        assert_eq!(layout.card.width, 100);
        assert_eq!(layout.card.x, 30);
        assert_eq!(layout.header.width, 160);
    }

    #[test]
    fn test_footer_grows_to_fit_wrapped_hints() {
        let area = Rect::new(0, 0, 40, 30);
        let hints = [
            "[1-9] Pick",
            "[j/k] Move",
            "[Enter] Select/Confirm",
            "[s] Skip",
            "[Esc] Restart",
        ];
        let lines = pack_hint_lines(&hints, QuizLayout::content_width(area) as usize);
        assert!(lines.len() > 1);
        assert!(lines.last().unwrap().contains("[Esc] Restart"));

        let layout = QuizLayout::new(area, false, lines.len() as u16);
        assert_eq!(layout.footer.height, lines.len() as u16);
        assert_eq!(layout.footer.y + layout.footer.height, 30);
        assert!(layout.progress.is_some());
    }

    #[test]
    fn test_content_width_is_capped() {
        assert_eq!(QuizLayout::content_width(Rect::new(0, 0, 60, 20)), 60);
        assert_eq!(QuizLayout::content_width(Rect::new(0, 0, 160, 20)), 100);
    }

    #[test]
    fn test_pack_hint_lines_wraps() {
        let lines = pack_hint_lines(&["[a] One", "[b] Two", "[c] Three"], 18);
        assert_eq!(lines, vec![" [a] One  [b] Two", " [c] Three"]);
        assert!(pack_hint_lines(&[], 40).is_empty());
    }

    #[test]
    fn test_centered_rect_stays_inside() {
        let area = Rect::new(0, 0, 40, 10);
        let r = centered_rect(50, 50, area);
        assert_eq!(r, area);
        let big = Rect::new(0, 0, 200, 60);
        let r = centered_rect(50, 50, big);
        assert_eq!((r.x, r.y, r.width, r.height), (50, 15, 100, 30));
    }
}
