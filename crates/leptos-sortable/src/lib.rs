//! Leptos Sortable Lists
//!
//! Flat-list drag reordering for Leptos using mouse events. A movement
//! threshold distinguishes click from drag; on release the drop target is
//! resolved by nearest bounding-box center among the items of the dragged
//! scope. Sortable items advertise themselves through `data-sort-scope` /
//! `data-sort-id` attributes, so independent lists (and lists nested inside
//! other lists) never interfere.

use leptos::prelude::*;
use wasm_bindgen::JsCast;

/// Attribute naming the list an item belongs to
pub const SORT_SCOPE_ATTR: &str = "data-sort-scope";
/// Attribute carrying the item's stable id
pub const SORT_ID_ATTR: &str = "data-sort-id";

/// Movement threshold in pixels to start dragging
const DRAG_THRESHOLD_PX: i32 = 5;

/// Scope + item identity of a drag participant
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DragHandle {
    pub scope: String,
    pub id: String,
}

/// Axis-aligned bounding box in viewport coordinates
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.left && x <= self.left + self.width && y >= self.top && y <= self.top + self.height
    }

    pub fn center(&self) -> (f64, f64) {
        (self.left + self.width / 2.0, self.top + self.height / 2.0)
    }
}

/// Resolve a drop target. The release point must land inside at least one
/// candidate's bounding region; among the candidates the one whose center is
/// nearest to the point wins.
pub fn closest_center(candidates: &[(String, Rect)], x: f64, y: f64) -> Option<String> {
    if !candidates.iter().any(|(_, rect)| rect.contains(x, y)) {
        return None;
    }
    candidates
        .iter()
        .map(|(id, rect)| {
            let (cx, cy) = rect.center();
            (id, (cx - x).powi(2) + (cy - y).powi(2))
        })
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(id, _)| id.clone())
}

/// DnD state signals
#[derive(Clone, Copy)]
pub struct SortSignals {
    pub dragging_read: ReadSignal<Option<DragHandle>>,
    pub dragging_write: WriteSignal<Option<DragHandle>>,
    /// Item currently resolved as the drop target (for highlighting)
    pub over_read: ReadSignal<Option<DragHandle>>,
    pub over_write: WriteSignal<Option<DragHandle>>,
    pub drag_just_ended_read: ReadSignal<bool>,
    pub drag_just_ended_write: WriteSignal<bool>,
    /// Pending item (mousedown but not yet dragging)
    pub pending_read: ReadSignal<Option<DragHandle>>,
    pub pending_write: WriteSignal<Option<DragHandle>>,
    /// Start position for movement detection
    pub start_x_read: ReadSignal<i32>,
    pub start_x_write: WriteSignal<i32>,
    pub start_y_read: ReadSignal<i32>,
    pub start_y_write: WriteSignal<i32>,
}

pub fn create_sort_signals() -> SortSignals {
    let (dragging_read, dragging_write) = signal(None::<DragHandle>);
    let (over_read, over_write) = signal(None::<DragHandle>);
    let (drag_just_ended_read, drag_just_ended_write) = signal(false);
    let (pending_read, pending_write) = signal(None::<DragHandle>);
    let (start_x_read, start_x_write) = signal(0i32);
    let (start_y_read, start_y_write) = signal(0i32);
    SortSignals {
        dragging_read,
        dragging_write,
        over_read,
        over_write,
        drag_just_ended_read,
        drag_just_ended_write,
        pending_read,
        pending_write,
        start_x_read,
        start_x_write,
        start_y_read,
        start_y_write,
    }
}

/// End drag operation
pub fn end_drag(sort: &SortSignals) {
    sort.dragging_write.set(None);
    sort.over_write.set(None);
    sort.pending_write.set(None);
    sort.drag_just_ended_write.set(true);

    if let Some(win) = web_sys::window() {
        let clear = sort.drag_just_ended_write;
        let cb = wasm_bindgen::closure::Closure::<dyn FnMut()>::new(move || {
            clear.set(false);
        });
        let _ = win.set_timeout_with_callback_and_timeout_and_arguments_0(cb.as_ref().unchecked_ref(), 100);
        cb.forget();
    }
}

/// Collect the bounding boxes of every item registered under one scope.
fn scope_rects(scope: &str) -> Vec<(String, Rect)> {
    let Some(doc) = web_sys::window().and_then(|w| w.document()) else {
        return Vec::new();
    };
    let selector = format!("[{}=\"{}\"]", SORT_SCOPE_ATTR, scope);
    let Ok(nodes) = doc.query_selector_all(&selector) else {
        return Vec::new();
    };
    let mut rects = Vec::new();
    for i in 0..nodes.length() {
        let Some(node) = nodes.item(i) else { continue };
        let Ok(element) = node.dyn_into::<web_sys::Element>() else {
            continue;
        };
        let Some(id) = element.get_attribute(SORT_ID_ATTR) else {
            continue;
        };
        let rect = element.get_bounding_client_rect();
        rects.push((
            id,
            Rect {
                left: rect.left(),
                top: rect.top(),
                width: rect.width(),
                height: rect.height(),
            },
        ));
    }
    rects
}

fn resolve_target(scope: &str, x: f64, y: f64) -> Option<String> {
    closest_center(&scope_rects(scope), x, y)
}

/// Create mousedown handler for sortable items.
/// Records pending drag with start position.
pub fn make_on_mousedown(
    sort: SortSignals,
    scope: String,
    id: String,
) -> impl Fn(web_sys::MouseEvent) + Clone + 'static {
    move |ev: web_sys::MouseEvent| {
        if ev.button() == 0 {
            // Ignore if target is a form control
            if let Some(target) = ev.target() {
                if target.dyn_ref::<web_sys::HtmlInputElement>().is_some() {
                    return;
                }
                if target.dyn_ref::<web_sys::HtmlButtonElement>().is_some() {
                    return;
                }
                if target.dyn_ref::<web_sys::HtmlSelectElement>().is_some() {
                    return;
                }
            }
            // Nested scopes: an option row lives inside a question row, so the
            // inner item must claim the gesture
            ev.stop_propagation();
            sort.pending_write.set(Some(DragHandle {
                scope: scope.clone(),
                id: id.clone(),
            }));
            sort.start_x_write.set(ev.client_x());
            sort.start_y_write.set(ev.client_y());
        }
    }
}

/// Create mousemove handler for document - starts the drag once the pointer
/// moved far enough, then keeps the hovered target resolved for highlighting.
fn bind_global_mousemove(sort: SortSignals) {
    use wasm_bindgen::closure::Closure;

    let on_mousemove = Closure::<dyn FnMut(web_sys::MouseEvent)>::new(move |ev: web_sys::MouseEvent| {
        let pending = sort.pending_read.get_untracked();

        // If we have a pending drag and haven't started dragging yet
        if pending.is_some() && sort.dragging_read.get_untracked().is_none() {
            let start_x = sort.start_x_read.get_untracked();
            let start_y = sort.start_y_read.get_untracked();
            let dx = (ev.client_x() - start_x).abs();
            let dy = (ev.client_y() - start_y).abs();

            // Start dragging if moved beyond threshold
            if dx > DRAG_THRESHOLD_PX || dy > DRAG_THRESHOLD_PX {
                sort.dragging_write.set(pending);
            }
        }

        if let Some(dragging) = sort.dragging_read.get_untracked() {
            let target = resolve_target(&dragging.scope, ev.client_x() as f64, ev.client_y() as f64)
                .filter(|id| *id != dragging.id)
                .map(|id| DragHandle {
                    scope: dragging.scope.clone(),
                    id,
                });
            sort.over_write.set(target);
        }
    });

    if let Some(win) = web_sys::window() {
        if let Some(doc) = win.document() {
            let _ = doc.add_event_listener_with_callback("mousemove", on_mousemove.as_ref().unchecked_ref());
        }
    }
    on_mousemove.forget();
}

/// Bind global mouseup handler for drop detection. `on_drop` receives the
/// dragged handle and the id of the item under the release point; it fires at
/// most once per gesture, and never when the release point is outside every
/// item of the scope or on the dragged item itself.
pub fn bind_global_mouseup<F>(sort: SortSignals, on_drop: F)
where
    F: Fn(DragHandle, String) + 'static,
{
    use wasm_bindgen::closure::Closure;

    let on_mouseup = Closure::<dyn FnMut(web_sys::MouseEvent)>::new(move |ev: web_sys::MouseEvent| {
        let dragging = sort.dragging_read.get_untracked();

        // Clear pending state first
        sort.pending_write.set(None);

        if let Some(dragged) = dragging {
            let target = resolve_target(&dragged.scope, ev.client_x() as f64, ev.client_y() as f64);
            end_drag(&sort);
            if let Some(target_id) = target {
                if target_id != dragged.id {
                    on_drop(dragged, target_id);
                }
            }
        } else {
            // Not dragging - just end any pending state
            end_drag(&sort);
            // Click event will fire naturally on the element
        }
    });

    if let Some(win) = web_sys::window() {
        if let Some(doc) = win.document() {
            let _ = doc.add_event_listener_with_callback("mouseup", on_mouseup.as_ref().unchecked_ref());
        }
    }
    on_mouseup.forget();

    // Also bind global mousemove
    bind_global_mousemove(sort);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(left: f64, top: f64, width: f64, height: f64) -> Rect {
        Rect {
            left,
            top,
            width,
            height,
        }
    }

    fn row(id: &str, top: f64) -> (String, Rect) {
        (id.to_string(), rect(0.0, top, 100.0, 40.0))
    }

    #[test]
    fn test_rect_contains_edges() {
        let r = rect(10.0, 10.0, 100.0, 40.0);
        assert!(r.contains(10.0, 10.0));
        assert!(r.contains(110.0, 50.0));
        assert!(!r.contains(9.9, 10.0));
        assert!(!r.contains(10.0, 50.1));
    }

    #[test]
    fn test_closest_center_picks_containing_row() {
        let rows = vec![row("a", 0.0), row("b", 40.0), row("c", 80.0)];
        assert_eq!(closest_center(&rows, 50.0, 60.0), Some("b".to_string()));
        assert_eq!(closest_center(&rows, 50.0, 95.0), Some("c".to_string()));
    }

    #[test]
    fn test_release_outside_every_item_is_no_target() {
        let rows = vec![row("a", 0.0), row("b", 40.0)];
        assert_eq!(closest_center(&rows, 500.0, 20.0), None);
        assert_eq!(closest_center(&rows, 50.0, 300.0), None);
        assert_eq!(closest_center(&[], 50.0, 20.0), None);
    }

    #[test]
    fn test_overlapping_candidates_resolve_by_nearest_center() {
        // two overlapping boxes: the point sits in both, nearer to b's center
        let candidates = vec![
            ("a".to_string(), rect(0.0, 0.0, 100.0, 100.0)),
            ("b".to_string(), rect(50.0, 0.0, 100.0, 100.0)),
        ];
        assert_eq!(closest_center(&candidates, 90.0, 50.0), Some("b".to_string()));
        assert_eq!(closest_center(&candidates, 60.0, 50.0), Some("a".to_string()));
    }
}
