//! TUI dialog components

mod class_form;
mod confirm;
mod new_task;
mod task_edit;

pub use class_form::{ClassFormDialog, ClassFormOutcome};
pub use confirm::{ConfirmAction, ConfirmDialog};
pub use new_task::{NewTaskData, NewTaskDialog};
pub use task_edit::TaskEditDialog;

use ratatui::layout::Rect;

pub enum DialogResult<T> {
    Continue,
    Cancel,
    Submit(T),
}

/// A `width` x `height` rect centered in `area`, clamped to fit.
pub fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect {
        x,
        y,
        width: width.min(area.width),
        height: height.min(area.height),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_rect_fits() {
        let area = Rect::new(0, 0, 100, 40);
        let r = centered_rect(area, 50, 10);
        assert_eq!(r, Rect::new(25, 15, 50, 10));
    }

    #[test]
    fn test_centered_rect_clamps_to_small_area() {
        let area = Rect::new(2, 3, 20, 5);
        let r = centered_rect(area, 50, 10);
        assert_eq!(r, Rect::new(2, 3, 20, 5));
    }
}
