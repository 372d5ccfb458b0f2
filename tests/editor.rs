use scribble::render::recording::{Operation, RecordingSurface};
use scribble::{
    Document, Editor, EditorConfig, EditorMode, ElementKind, InputEvent, Key, Modifiers,
    MonospaceMetrics, Named, Point, Shape, Sloppiness, Style, Tool,
};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn editor() -> Editor {
    init_logging();
    Editor::new(&EditorConfig {
        seed: Some(1234),
        ..EditorConfig::default()
    })
}

fn press(editor: &mut Editor, doc: &mut Document, c: char) {
    editor.handle(doc, InputEvent::Key(Key::Character(c), Modifiers::NONE));
}

fn drag(editor: &mut Editor, doc: &mut Document, from: (f32, f32), to: (f32, f32)) {
    editor.handle(doc, InputEvent::PointerDown(from.into()));
    editor.handle(doc, InputEvent::PointerMove(to.into()));
    editor.handle(doc, InputEvent::PointerUp(to.into()));
}

#[test]
fn test_annotation_session() {
    let mut editor = editor();
    let mut doc = Document::default();

    press(&mut editor, &mut doc, 'r');
    drag(&mut editor, &mut doc, (10.0, 10.0), (110.0, 60.0));
    press(&mut editor, &mut doc, '4');
    drag(&mut editor, &mut doc, (200.0, 200.0), (260.0, 240.0));
    press(&mut editor, &mut doc, 'P');
    editor.handle(&mut doc, InputEvent::PointerDown(Point::new(300.0, 10.0)));
    for i in 1..10 {
        let x = 300.0 + i as f32 * 4.0;
        editor.handle(&mut doc, InputEvent::PointerMove(Point::new(x, 10.0 + i as f32)));
    }
    editor.handle(&mut doc, InputEvent::PointerLeave);

    assert_eq!(
        doc.scene[0].shape,
        Shape::Rectangle {
            anchor: Point::new(10.0, 10.0),
            corner: Point::new(110.0, 60.0),
        }
    );

    let kinds: Vec<_> = doc.scene.iter().map(|e| e.kind()).collect();
    assert_eq!(
        kinds,
        [ElementKind::Rectangle, ElementKind::Arrow, ElementKind::Freehand]
    );

    let mut ids: Vec<_> = doc.scene.iter().map(|e| e.id).collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 3);

    // Select the arrow, then delete it
    press(&mut editor, &mut doc, 'v');
    drag(&mut editor, &mut doc, (230.0, 220.0), (230.0, 220.0));
    assert_eq!(doc.selected().map(|e| e.kind()), Some(ElementKind::Arrow));
    editor.handle(
        &mut doc,
        InputEvent::Key(Key::Named(Named::Backspace), Modifiers::NONE),
    );
    assert_eq!(doc.scene.len(), 2);
    assert!(doc.selection.is_none());
}

#[test]
fn test_freehand_stroke_moves_as_a_whole() {
    let mut editor = editor();
    let mut doc = Document::default();
    editor.handle(&mut doc, InputEvent::SelectTool(Tool::Freehand));
    editor.handle(&mut doc, InputEvent::PointerDown(Point::new(10.0, 10.0)));
    editor.handle(&mut doc, InputEvent::PointerMove(Point::new(40.0, 20.0)));
    editor.handle(&mut doc, InputEvent::PointerUp(Point::new(60.0, 50.0)));

    editor.handle(&mut doc, InputEvent::SelectTool(Tool::Select));
    drag(&mut editor, &mut doc, (40.0, 20.0), (50.0, 40.0));

    let points = doc.scene[0].shape.points().expect("freehand points");
    assert_eq!(points.first(), Some(&Point::new(20.0, 30.0)));
    assert_eq!(points.last(), Some(&Point::new(70.0, 70.0)));
}

#[test]
fn test_escape_clears_selection_and_prompt() {
    let mut editor = editor();
    let mut doc = Document::default();
    editor.handle(&mut doc, InputEvent::SelectTool(Tool::Ellipse));
    drag(&mut editor, &mut doc, (0.0, 0.0), (40.0, 40.0));
    doc.selection = Some(doc.scene[0].id);

    editor.handle(&mut doc, InputEvent::SelectTool(Tool::Text));
    editor.handle(&mut doc, InputEvent::PointerDown(Point::new(100.0, 100.0)));
    assert_eq!(editor.mode(), EditorMode::TextEditorOpen);

    let outcome = editor.handle(
        &mut doc,
        InputEvent::Key(Key::Named(Named::Escape), Modifiers::NONE),
    );
    assert!(outcome.prompt_changed);
    assert!(outcome.selection_changed);
    assert_eq!(editor.mode(), EditorMode::Idle);
    assert!(doc.selection.is_none());
    assert_eq!(doc.scene.len(), 1);
}

#[test]
fn test_selecting_tool_closes_prompt_without_commit() {
    let mut editor = editor();
    let mut doc = Document::default();
    editor.handle(&mut doc, InputEvent::SelectTool(Tool::Text));
    editor.handle(&mut doc, InputEvent::PointerDown(Point::new(5.0, 5.0)));

    let outcome = editor.handle(&mut doc, InputEvent::SelectTool(Tool::Line));
    assert!(outcome.tool_changed);
    assert!(outcome.prompt_changed);
    assert!(editor.text_prompt().is_none());

    let submitted = editor.submit_text(&mut doc, "dropped", 20.0, &MonospaceMetrics::default());
    assert!(submitted.is_noop());
    assert!(doc.scene.is_empty());
}

#[test]
fn test_text_label_renders_each_line() {
    let mut editor = editor();
    let mut doc = Document::default();
    editor.handle(&mut doc, InputEvent::SelectTool(Tool::Text));
    editor.handle(&mut doc, InputEvent::PointerDown(Point::new(20.0, 20.0)));
    editor.submit_text(&mut doc, "first\nsecond", 200.0, &MonospaceMetrics::default());

    let Shape::Text { font_size, .. } = &doc.scene[0].shape else {
        panic!("expected a text element");
    };
    assert_eq!(*font_size, 72.0);

    let mut surface = RecordingSurface::new();
    editor.render(&doc, Some(&mut surface));
    let lines: Vec<_> = surface
        .operations()
        .iter()
        .filter_map(|op| match op {
            Operation::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(lines, ["first", "second"]);
}

#[test]
fn test_style_applies_to_new_elements_only() {
    let mut editor = editor();
    let mut doc = Document::default();
    editor.handle(&mut doc, InputEvent::SelectTool(Tool::Line));
    drag(&mut editor, &mut doc, (0.0, 0.0), (50.0, 0.0));

    let style = Style {
        stroke_width: 6.0,
        sloppiness: Sloppiness::High,
        ..Style::default()
    };
    editor.handle(&mut doc, InputEvent::SetStyle(style));
    drag(&mut editor, &mut doc, (0.0, 20.0), (50.0, 20.0));

    assert_eq!(doc.scene[0].style, Style::default());
    assert_eq!(doc.scene[1].style, style);
}

#[test]
fn test_same_seed_reproduces_session() {
    let run = || {
        let mut editor = editor();
        let mut doc = Document::default();
        editor.handle(&mut doc, InputEvent::SelectTool(Tool::Rectangle));
        drag(&mut editor, &mut doc, (10.0, 10.0), (80.0, 50.0));
        let mut surface = RecordingSurface::new();
        editor.render(&doc, Some(&mut surface));
        (doc, surface.operations().to_vec())
    };

    let (doc_a, ops_a) = run();
    let (doc_b, ops_b) = run();
    assert_eq!(doc_a, doc_b);
    assert_eq!(ops_a, ops_b);
}

#[test]
fn test_eraser_removes_only_topmost_of_three() {
    let mut editor = editor();
    let mut doc = Document::default();
    editor.handle(&mut doc, InputEvent::SelectTool(Tool::Rectangle));
    drag(&mut editor, &mut doc, (0.0, 0.0), (60.0, 60.0));
    editor.handle(&mut doc, InputEvent::SelectTool(Tool::Ellipse));
    drag(&mut editor, &mut doc, (10.0, 10.0), (70.0, 70.0));
    editor.handle(&mut doc, InputEvent::SelectTool(Tool::Redact));
    drag(&mut editor, &mut doc, (20.0, 20.0), (80.0, 80.0));
    let before: Vec<_> = doc.scene.iter().map(|e| e.id).collect();
    assert_eq!(before.len(), 3);

    editor.handle(&mut doc, InputEvent::SelectTool(Tool::Eraser));
    let outcome = editor.handle(&mut doc, InputEvent::PointerDown(Point::new(40.0, 40.0)));
    editor.handle(&mut doc, InputEvent::PointerUp(Point::new(40.0, 40.0)));

    assert!(outcome.scene_changed);
    let after: Vec<_> = doc.scene.iter().map(|e| e.id).collect();
    assert_eq!(after, before[..2]);
}
