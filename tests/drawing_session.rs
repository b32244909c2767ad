use eframe_sketch::{Document, DrawCommand, SurfaceKind, Tool, ToolController};
use egui::{Color32, Pos2, pos2};

fn setup(width: u32, height: u32) -> (ToolController, Document) {
    let controller = ToolController::new(Color32::WHITE);
    let document = Document::new(width, height, Color32::WHITE).unwrap();
    (controller, document)
}

fn drag(controller: &mut ToolController, document: &mut Document, points: &[Pos2]) {
    let (first, rest) = points.split_first().unwrap();
    document.apply(controller.pointer_down(*first));
    for p in rest {
        document.apply(controller.pointer_move(*p));
    }
    document.apply(controller.pointer_up(*points.last().unwrap()));
}

#[test]
fn test_rectangle_scenario_previews_then_commits() {
    let (mut controller, mut document) = setup(200, 120);
    document.apply(controller.set_tool(Tool::Rectangle));
    controller.set_color(Color32::RED);
    controller.set_width(4.0);

    document.apply(controller.pointer_down(pos2(10.0, 10.0)));
    document.apply(controller.pointer_move(pos2(110.0, 60.0)));

    // live preview shows an unfilled red rectangle
    let preview = document.preview();
    assert_eq!(preview.pixel(60, 10), Some(Color32::RED));
    assert_eq!(preview.pixel(10, 35), Some(Color32::RED));
    assert_eq!(preview.pixel(110, 35), Some(Color32::RED));
    assert_eq!(preview.pixel(60, 60), Some(Color32::RED));
    assert_eq!(preview.pixel(60, 35), Some(Color32::TRANSPARENT));
    assert_eq!(document.committed().pixel(60, 10), Some(Color32::WHITE));

    document.apply(controller.pointer_up(pos2(110.0, 60.0)));

    assert_eq!(document.preview().pixel(60, 10), Some(Color32::TRANSPARENT));
    let committed = document.committed();
    assert_eq!(committed.pixel(60, 10), Some(Color32::RED));
    assert_eq!(committed.pixel(10, 35), Some(Color32::RED));
    assert_eq!(committed.pixel(110, 35), Some(Color32::RED));
    assert_eq!(committed.pixel(60, 60), Some(Color32::RED));
    assert_eq!(committed.pixel(60, 35), Some(Color32::WHITE));
    assert_eq!(committed.pixel(150, 90), Some(Color32::WHITE));
}

#[test]
fn test_preview_never_holds_stale_shapes() {
    let (mut controller, mut document) = setup(200, 200);
    controller.set_width(6.0);
    document.apply(controller.set_tool(Tool::Oval));
    document.apply(controller.pointer_down(pos2(20.0, 20.0)));
    document.apply(controller.pointer_move(pos2(180.0, 180.0)));
    assert_eq!(document.preview().pixel(100, 20), Some(Color32::BLACK));

    // shrinking the drag redraws from a clean preview
    document.apply(controller.pointer_move(pos2(60.0, 60.0)));
    assert_eq!(document.preview().pixel(100, 20), Some(Color32::TRANSPARENT));

    // switching tools wipes the preview before anything else is drawn
    let commands = controller.set_tool(Tool::Pen);
    assert_eq!(commands.first(), Some(&DrawCommand::Clear(SurfaceKind::Preview)));
    document.apply(commands);
    assert_eq!(document.preview().pixel(40, 20), Some(Color32::TRANSPARENT));
    assert_eq!(document.committed().pixel(40, 20), Some(Color32::WHITE));
}

#[test]
fn test_pen_strokes_accumulate_on_committed_surface() {
    let (mut controller, mut document) = setup(100, 100);
    controller.set_width(6.0);
    drag(
        &mut controller,
        &mut document,
        &[pos2(10.0, 50.0), pos2(50.0, 50.0), pos2(50.0, 90.0)],
    );
    let committed = document.committed();
    assert_eq!(committed.pixel(30, 50), Some(Color32::BLACK));
    assert_eq!(committed.pixel(50, 70), Some(Color32::BLACK));
    assert_eq!(committed.pixel(80, 20), Some(Color32::WHITE));
    assert_eq!(document.preview().pixel(30, 50), Some(Color32::TRANSPARENT));
}

#[test]
fn test_eraser_restores_background_only_along_its_path() {
    let (mut controller, mut document) = setup(100, 100);
    controller.set_width(20.0);
    // a thick black band across the middle
    drag(&mut controller, &mut document, &[pos2(0.0, 50.0), pos2(100.0, 50.0)]);
    assert_eq!(document.committed().pixel(50, 50), Some(Color32::BLACK));

    document.apply(controller.set_tool(Tool::Eraser));
    controller.set_width(4.0);
    drag(&mut controller, &mut document, &[pos2(50.0, 30.0), pos2(50.0, 70.0)]);

    let committed = document.committed();
    // on the eraser path
    assert_eq!(committed.pixel(50, 45), Some(Color32::WHITE));
    assert_eq!(committed.pixel(50, 55), Some(Color32::WHITE));
    // well outside the eraser width the band is untouched
    assert_eq!(committed.pixel(40, 50), Some(Color32::BLACK));
    assert_eq!(committed.pixel(60, 50), Some(Color32::BLACK));
    // the eraser color does not leak into the next pen stroke
    assert_eq!(controller.color(), Color32::BLACK);
}

#[test]
fn test_invisible_shape_is_never_committed() {
    let (mut controller, mut document) = setup(100, 100);
    document.apply(controller.set_tool(Tool::Rectangle));
    controller.set_color(Color32::WHITE);
    drag(&mut controller, &mut document, &[pos2(10.0, 10.0), pos2(90.0, 90.0)]);
    controller.set_color(Color32::TRANSPARENT);
    drag(&mut controller, &mut document, &[pos2(10.0, 10.0), pos2(90.0, 90.0)]);

    let expected = Document::new(100, 100, Color32::WHITE).unwrap().snapshot();
    assert_eq!(document.snapshot(), expected);
}

#[test]
fn test_zero_size_drag_commits_nothing() {
    let (mut controller, mut document) = setup(100, 100);
    document.apply(controller.set_tool(Tool::Oval));
    drag(&mut controller, &mut document, &[pos2(40.0, 40.0), pos2(40.0, 40.0)]);
    drag(&mut controller, &mut document, &[pos2(10.0, 40.0), pos2(90.0, 40.0)]);

    let expected = Document::new(100, 100, Color32::WHITE).unwrap().snapshot();
    assert_eq!(document.snapshot(), expected);
}

#[test]
fn test_zoomed_drag_produces_identical_pixels() {
    let (mut plain, mut plain_doc) = setup(150, 100);
    plain_doc.apply(plain.set_tool(Tool::Rectangle));
    drag(&mut plain, &mut plain_doc, &[pos2(10.0, 10.0), pos2(110.0, 60.0)]);

    let (mut zoomed, mut zoomed_doc) = setup(150, 100);
    zoomed_doc.apply(zoomed.set_tool(Tool::Rectangle));
    zoomed.set_scale(2.0);
    drag(&mut zoomed, &mut zoomed_doc, &[pos2(20.0, 20.0), pos2(220.0, 120.0)]);

    assert_eq!(plain_doc.snapshot(), zoomed_doc.snapshot());
}

#[test]
fn test_clear_resets_both_surfaces() {
    let (mut controller, mut document) = setup(80, 80);
    drag(&mut controller, &mut document, &[pos2(0.0, 40.0), pos2(80.0, 40.0)]);
    document.apply(controller.clear());
    let expected = Document::new(80, 80, Color32::WHITE).unwrap().snapshot();
    assert_eq!(document.snapshot(), expected);
}
