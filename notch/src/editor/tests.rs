//! Tests for notch set editing and display-space interaction.

use super::*;

fn editor(spec: usize, display: f32) -> NotchSetEditor {
    NotchSetEditor::new(
        SpectrumDescriptor::new(spec, spec),
        display,
        display,
        EditorSettings::default(),
    )
}

fn circles(editor: &NotchSetEditor) -> Vec<Circle> {
    editor.notches().circles().to_vec()
}

#[test]
fn test_mirrored_add_appends_conjugate() {
    let mut ed = editor(512, 512.0);

    assert_eq!(ed.add(10, 10, 8.0, true), Change::Modified);

    assert_eq!(
        circles(&ed),
        vec![Circle::new(10, 10, 8.0), Circle::new(501, 501, 8.0)]
    );
}

#[test]
fn test_mirrored_add_grows_by_two_for_asymmetric_points() {
    let mut ed = editor(64, 64.0);
    for &(x, y) in &[(0, 0), (5, 40), (63, 1), (32, 32)] {
        let before = ed.notches().len();
        ed.add(x, y, 3.0, true);
        assert_eq!(ed.notches().len(), before + 2);
        assert_eq!(
            ed.notches().circles()[before + 1],
            Circle::new(63 - x, 63 - y, 3.0)
        );
    }
}

#[test]
fn test_self_symmetric_point_is_not_duplicated() {
    let mut ed = NotchSetEditor::new(
        SpectrumDescriptor::new(65, 33),
        65.0,
        33.0,
        EditorSettings::default(),
    );

    ed.add(32, 16, 4.0, true);

    assert_eq!(circles(&ed), vec![Circle::new(32, 16, 4.0)]);
}

#[test]
fn test_unmirrored_add_appends_one() {
    let mut ed = editor(128, 128.0);
    ed.add(3, 4, 5.0, false);
    ed.add(3, 4, 5.0, false);
    assert_eq!(
        circles(&ed),
        vec![Circle::new(3, 4, 5.0), Circle::new(3, 4, 5.0)]
    );
}

#[test]
fn test_add_at_display_uses_session_defaults() {
    let mut ed = editor(512, 256.0);
    ed.set_settings(EditorSettings {
        default_radius: 12.0,
        mirror_enabled: false,
        hit_slack: 6.0,
    });

    ed.add_at_display(Vec2::new(50.0, 25.0));

    assert_eq!(circles(&ed), vec![Circle::new(100, 50, 12.0)]);
}

#[test]
fn test_remove_nearest_removes_only_the_hit_circle() {
    let mut ed = editor(512, 256.0);
    ed.add(100, 100, 8.0, false);
    ed.add(400, 400, 8.0, false);

    assert_eq!(ed.remove_nearest(Vec2::new(50.0, 50.0)), Change::Modified);

    assert_eq!(circles(&ed), vec![Circle::new(400, 400, 8.0)]);
}

#[test]
fn test_remove_nearest_misses_outside_tolerance() {
    let mut ed = editor(512, 256.0);
    ed.add(100, 100, 8.0, false);

    // Radius 8 displays as 4; tolerance is 4 + 6 display pixels.
    assert_eq!(ed.remove_nearest(Vec2::new(60.5, 50.0)), Change::Unchanged);
    assert_eq!(ed.notches().len(), 1);
    assert_eq!(ed.remove_nearest(Vec2::new(59.5, 50.0)), Change::Modified);
    assert!(ed.notches().is_empty());
}

#[test]
fn test_remove_nearest_prefers_latest_on_ties() {
    let mut ed = editor(100, 100.0);
    ed.add(20, 20, 5.0, false);
    ed.add(30, 20, 6.0, false);
    ed.add(20, 20, 5.0, false);

    ed.remove_nearest(Vec2::new(20.0, 20.0));

    assert_eq!(
        circles(&ed),
        vec![Circle::new(20, 20, 5.0), Circle::new(30, 20, 6.0)]
    );
}

#[test]
fn test_remove_nearest_picks_closest_not_latest() {
    let mut ed = editor(100, 100.0);
    ed.add(20, 20, 10.0, false);
    ed.add(26, 20, 10.0, false);

    ed.remove_nearest(Vec2::new(21.0, 20.0));

    assert_eq!(circles(&ed), vec![Circle::new(26, 20, 10.0)]);
}

#[test]
fn test_resize_tracks_horizontal_drag_in_spectrum_units() {
    let mut ed = editor(512, 256.0);
    ed.add(100, 100, 8.0, false);

    assert_eq!(ed.begin_resize(Vec2::new(52.0, 50.0)), Change::Redraw);
    assert_eq!(ed.dragging().map(|d| d.index), Some(0));

    // 5 display pixels right is 10 spectrum pixels; vertical motion is ignored.
    assert_eq!(ed.update_resize(Vec2::new(57.0, 90.0)), Change::Modified);
    assert_eq!(ed.notches().circles()[0].r, 18.0);

    assert_eq!(ed.update_resize(Vec2::new(57.0, 10.0)), Change::Unchanged);

    // Dragging far left clamps to the minimum radius.
    ed.update_resize(Vec2::new(-100.0, 50.0));
    assert_eq!(ed.notches().circles()[0].r, MIN_RADIUS);

    assert_eq!(ed.end_resize(), Change::Redraw);
    assert!(ed.dragging().is_none());
    assert_eq!(ed.update_resize(Vec2::new(80.0, 50.0)), Change::Unchanged);
    assert_eq!(ed.notches().circles()[0].r, MIN_RADIUS);
}

#[test]
fn test_resize_rounds_to_whole_pixels() {
    let mut ed = editor(300, 200.0);
    ed.add(150, 150, 6.0, false);
    let scale = ed.mapper().radius_scale();

    ed.begin_resize(Vec2::new(100.0, 100.0));
    ed.update_resize(Vec2::new(100.0 + 2.4 * scale, 100.0));

    assert_eq!(ed.notches().circles()[0].r, 8.0);
}

#[test]
fn test_begin_resize_miss_does_not_start_a_drag() {
    let mut ed = editor(128, 128.0);
    ed.add(10, 10, 4.0, false);

    assert_eq!(ed.begin_resize(Vec2::new(100.0, 100.0)), Change::Unchanged);
    assert!(ed.dragging().is_none());
}

#[test]
fn test_new_drag_replaces_active_one() {
    let mut ed = editor(128, 128.0);
    ed.add(10, 10, 4.0, false);
    ed.add(100, 100, 4.0, false);

    ed.begin_resize(Vec2::new(10.0, 10.0));
    ed.begin_resize(Vec2::new(100.0, 100.0));
    assert_eq!(ed.dragging().map(|d| d.index), Some(1));

    // A missed begin still ends the previous drag.
    assert_eq!(ed.begin_resize(Vec2::new(60.0, 60.0)), Change::Redraw);
    assert!(ed.dragging().is_none());
}

#[test]
fn test_removing_or_clearing_ends_the_drag() {
    let mut ed = editor(128, 128.0);
    ed.add(10, 10, 4.0, false);
    ed.add(100, 100, 4.0, false);

    ed.begin_resize(Vec2::new(100.0, 100.0));
    ed.remove_nearest(Vec2::new(10.0, 10.0));
    assert!(ed.dragging().is_none());

    ed.begin_resize(Vec2::new(100.0, 100.0));
    assert_eq!(ed.clear(), Change::Modified);
    assert!(ed.dragging().is_none());
    assert!(ed.notches().is_empty());
    assert_eq!(ed.clear(), Change::Unchanged);
}

#[test]
fn test_load_replaces_and_tolerates_garbage() {
    let mut ed = editor(512, 512.0);
    ed.add(1, 2, 3.0, false);

    assert_eq!(
        ed.load(r#"[{"x":64,"y":64,"r":8},{"x":192,"y":192,"r":8}]"#),
        Change::Modified
    );
    assert_eq!(
        circles(&ed),
        vec![Circle::new(64, 64, 8.0), Circle::new(192, 192, 8.0)]
    );

    assert_eq!(ed.load("{oops"), Change::Modified);
    assert!(ed.notches().is_empty());
    assert_eq!(ed.serialize(), "[]");
}

#[test]
fn test_serialized_state_round_trips_through_a_new_session() {
    let mut ed = editor(256, 256.0);
    ed.add(10, 20, 8.0, true);
    ed.add(40, 30, 4.5, false);

    let restored = editor(256, 256.0).with_notches(NotchSet::parse(&ed.serialize()).unwrap());

    assert_eq!(restored.notches(), ed.notches());
}

#[test]
fn test_apply_dispatches_actions() {
    let mut ed = editor(100, 100.0);
    let changes: Vec<Change> = [
        EditorAction::Add {
            x: 10,
            y: 10,
            r: 5.0,
            mirror: false,
        },
        EditorAction::BeginResize(Vec2::new(10.0, 10.0)),
        EditorAction::UpdateResize(Vec2::new(13.0, 10.0)),
        EditorAction::EndResize,
        EditorAction::RemoveNearest(Vec2::new(90.0, 90.0)),
    ]
    .into_iter()
    .map(|action| ed.apply(action))
    .collect();

    assert_eq!(
        changes,
        vec![
            Change::Modified,
            Change::Redraw,
            Change::Modified,
            Change::Redraw,
            Change::Unchanged
        ]
    );
    assert_eq!(circles(&ed), vec![Circle::new(10, 10, 8.0)]);
    assert_eq!(ed.apply(EditorAction::Clear), Change::Modified);
}

#[test]
fn test_render_frame_is_in_display_space() {
    let mut ed = NotchSetEditor::new(
        SpectrumDescriptor::new(200, 100),
        400.0,
        100.0,
        EditorSettings::default(),
    );
    ed.add(50, 20, 10.0, false);
    ed.add(150, 80, 4.0, false);
    ed.begin_resize(Vec2::new(300.0, 80.0));

    let frame = ed.render_frame();

    assert_eq!(frame.display_size, Vec2::new(400.0, 100.0));
    assert_eq!(frame.dc_center, Vec2::new(200.0, 50.0));
    assert_eq!(
        frame.circles,
        vec![
            RenderedCircle {
                index: 0,
                center: Vec2::new(100.0, 20.0),
                radius: 10.0,
                active: false,
            },
            RenderedCircle {
                index: 1,
                center: Vec2::new(300.0, 80.0),
                radius: 4.0,
                active: true,
            },
        ]
    );
}

#[test]
fn test_display_resize_keeps_notches_in_spectrum_space() {
    let mut ed = editor(512, 512.0);
    ed.add(100, 100, 8.0, false);

    assert_eq!(ed.set_display_size(256.0, 256.0), Change::Redraw);
    assert_eq!(ed.set_display_size(256.0, 256.0), Change::Unchanged);
    assert_eq!(circles(&ed), vec![Circle::new(100, 100, 8.0)]);
    assert_eq!(ed.render_frame().circles[0].center, Vec2::new(50.0, 50.0));
}

#[test]
fn test_far_off_surface_add_mirrors_without_overflow() {
    let mut ed = editor(512, 512.0);

    assert_eq!(ed.add_at_display(Vec2::new(-1.0e12, 5.0)), Change::Modified);

    assert_eq!(
        circles(&ed),
        vec![
            Circle::new(i32::MIN, 5, 8.0),
            Circle::new(i32::MAX, 506, 8.0),
        ]
    );
}
