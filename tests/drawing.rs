use std::cell::RefCell;
use std::rc::Rc;
use tempfile::TempDir;
use vecdraw::canvas::{CairoBackbuffer, CanvasRenderer, RenderState};
use vecdraw::document::Workspace;
use vecdraw::draw::{ColorSource, GREEN, ShapeKind, WHITE};
use vecdraw::export;
use vecdraw::model::DrawingModel;
use vecdraw::ui::{ObjectList, window_title};

type Canvas = Rc<RefCell<CanvasRenderer<CairoBackbuffer>>>;

fn editor() -> (Workspace, Canvas, Rc<RefCell<ObjectList>>) {
    let mut model = DrawingModel::default();
    let canvas = Rc::new(RefCell::new(CanvasRenderer::new(
        CairoBackbuffer::new(80, 60).unwrap(),
    )));
    let objects = Rc::new(RefCell::new(ObjectList::new()));
    model.add_listener(canvas.clone());
    model.add_listener(objects.clone());
    (Workspace::new(model), canvas, objects)
}

#[test]
fn editing_session_keeps_canvas_list_and_file_in_step() {
    let dir = TempDir::new().unwrap();
    let (mut workspace, canvas, objects) = editor();

    let model = workspace.model_mut();
    model.select_kind(ShapeKind::Rectangle);
    model.start_drawing(10, 10);
    model.update_drawing(30, 20);
    assert_eq!(canvas.borrow().state(), RenderState::Previewing);
    model.finish_drawing();

    model.select_kind(ShapeKind::FilledCircle);
    model.notify_color_changed(ColorSource::Background, WHITE, GREEN);
    model.start_drawing(50, 40);
    model.update_drawing(50, 48);
    model.finish_drawing();

    assert_eq!(canvas.borrow().state(), RenderState::Idle);
    assert_eq!(objects.borrow().labels(), ["Rectangle 1", "Circle 1"]);
    assert_eq!(window_title(workspace.model()), "*Untitled - vecdraw");

    let committed = canvas.borrow().backbuffer().committed_image().unwrap();
    assert_eq!(committed.get_pixel(50, 40).0, [0, 255, 0]);
    assert_eq!(committed.get_pixel(20, 10).0, [255, 0, 0]);

    let path = workspace
        .save_as(&dir.path().join("session"), false)
        .unwrap();
    assert_eq!(window_title(workspace.model()), "session.jvd - vecdraw");

    let mut reopened = Workspace::default();
    reopened.open(&path).unwrap();
    assert_eq!(reopened.model().serialize(), workspace.model().serialize());
}

#[test]
fn reopening_a_file_repaints_the_canvas() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("line.jvd");
    std::fs::write(&path, "LINE 5 5 5 50 0 0 255\n").unwrap();

    let (mut workspace, canvas, objects) = editor();
    workspace.model_mut().start_drawing(70, 5);
    workspace.model_mut().update_drawing(70, 50);
    workspace.model_mut().finish_drawing();

    workspace.open(&path).unwrap();

    let committed = canvas.borrow().backbuffer().committed_image().unwrap();
    assert_eq!(committed.get_pixel(5, 20).0, [0, 0, 255]);
    assert_eq!(committed.get_pixel(70, 20).0, [255, 255, 255]);
    assert_eq!(objects.borrow().labels(), ["Line 1"]);
    assert!(!workspace.model().is_changed());
}

#[test]
fn export_matches_canvas_contents_shifted_to_origin() {
    let (mut workspace, _canvas, _objects) = editor();
    let model = workspace.model_mut();
    model.select_kind(ShapeKind::FilledCircle);
    model.start_drawing(40, 30);
    model.update_drawing(46, 30);
    model.finish_drawing();

    let layout = export::layout(workspace.model().shapes());
    assert_eq!(layout.offset, (-34, -24));
    assert_eq!(layout.image_size(), (13, 13));

    let image = export::render(workspace.model().shapes()).unwrap();
    assert_eq!(image.get_pixel(6, 6).0, [0, 0, 255]);
}
