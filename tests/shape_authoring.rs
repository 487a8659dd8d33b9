use egui::{Color32, Modifiers, PointerButton, Pos2, Vec2};
use infinite_canvas::config::EditorConfig;
use infinite_canvas::element::ShapeKind;
use infinite_canvas::file_handler::ImagePayload;
use infinite_canvas::input::{InputEvent, InputLocation};
use infinite_canvas::state::{DocumentStore, EditorContext, MemoryStore, Request};
use infinite_canvas::tools::{Tool, ToolAction, ToolState};

fn create_editor() -> (EditorContext, MemoryStore) {
    let memory = MemoryStore::new();
    let store = DocumentStore::new(Box::new(memory.clone()), "infiniteCanvas");
    (EditorContext::new(store, EditorConfig::default()), memory)
}

fn tool(tool: Tool) -> ToolState {
    ToolState::default().apply(ToolAction::SelectTool(tool))
}

fn down(x: f32, y: f32) -> InputEvent {
    InputEvent::PointerDown {
        location: InputLocation::canvas(x, y),
        button: PointerButton::Primary,
        modifiers: Modifiers::NONE,
    }
}

fn move_to(x: f32, y: f32) -> InputEvent {
    InputEvent::PointerMove {
        location: InputLocation::canvas(x, y),
        held_buttons: vec![PointerButton::Primary],
    }
}

fn up(x: f32, y: f32) -> InputEvent {
    InputEvent::PointerUp {
        location: InputLocation::canvas(x, y),
        button: PointerButton::Primary,
    }
}

fn drag(editor: &mut EditorContext, tools: ToolState, from: (f32, f32), to: (f32, f32)) -> ToolState {
    [down(from.0, from.1), move_to(to.0, to.1), up(to.0, to.1)]
        .iter()
        .fold(tools, |tools, event| editor.handle_event(tools, event).tools)
}

fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let mut bytes = Vec::new();
    image::RgbaImage::new(width, height)
        .write_to(&mut std::io::Cursor::new(&mut bytes), image::ImageFormat::Png)
        .unwrap();
    bytes
}

#[test]
fn test_rectangle_drag_in_either_direction() {
    for (from, to) in [((10.0, 10.0), (110.0, 60.0)), ((110.0, 60.0), (10.0, 10.0))] {
        let (mut editor, _) = create_editor();
        drag(&mut editor, tool(Tool::Rectangle), from, to);

        let shapes = editor.document().shapes();
        assert_eq!(shapes.len(), 1);
        match &shapes[0].kind {
            ShapeKind::Rectangle(rect) => {
                assert_eq!(rect.origin, Pos2::new(10.0, 10.0));
                assert_eq!(rect.size, Vec2::new(100.0, 50.0));
            }
            other => panic!("expected a rectangle, got {other:?}"),
        }
    }
}

#[test]
fn test_circle_radius_is_half_the_drag() {
    let (mut editor, _) = create_editor();
    drag(&mut editor, tool(Tool::Circle), (0.0, 0.0), (6.0, 8.0));

    match &editor.document().shapes()[0].kind {
        ShapeKind::Circle(circle) => {
            assert_eq!(circle.radius, 5.0);
            assert_eq!(circle.origin, Pos2::ZERO);
        }
        other => panic!("expected a circle, got {other:?}"),
    }
}

#[test]
fn test_triangle_and_line_follow_the_pointer() {
    let (mut editor, _) = create_editor();
    drag(&mut editor, tool(Tool::Triangle), (40.0, 30.0), (10.0, 90.0));
    drag(&mut editor, tool(Tool::Line), (5.0, 5.0), (-20.0, 40.0));

    let shapes = editor.document().shapes();
    match &shapes[0].kind {
        ShapeKind::Triangle(triangle) => {
            assert_eq!(triangle.origin, Pos2::new(10.0, 30.0));
            assert_eq!(triangle.size, Vec2::new(30.0, 60.0));
        }
        other => panic!("expected a triangle, got {other:?}"),
    }
    match &shapes[1].kind {
        ShapeKind::Line(line) => {
            assert_eq!(line.start, Pos2::new(5.0, 5.0));
            assert_eq!(line.end, Pos2::new(-20.0, 40.0));
        }
        other => panic!("expected a line, got {other:?}"),
    }
}

#[test]
fn test_draft_is_committed_only_on_release() {
    let (mut editor, memory) = create_editor();
    let tools = tool(Tool::Rectangle).apply(ToolAction::SetStroke(Color32::RED));

    editor.handle_event(tools, &down(0.0, 0.0));
    editor.handle_event(tools, &move_to(30.0, 20.0));
    assert!(editor.document().is_empty());
    let preview = editor.state().preview().expect("draft while dragging");
    assert!(!preview.selectable);
    assert!(memory.raw("infiniteCanvas").is_none());

    editor.handle_event(tools, &up(30.0, 20.0));
    let shape = &editor.document().shapes()[0];
    assert!(shape.selectable);
    assert_eq!(shape.style.stroke, Color32::RED);
    assert!(editor.state().is_idle());
    assert_eq!(editor.store().write_count(), 1);
}

#[test]
fn test_text_tool_places_placeholder_and_returns_to_select() {
    let (mut editor, _) = create_editor();
    let tools = tool(Tool::Text).apply(ToolAction::SetStroke(Color32::BLUE));

    let response = editor.handle_event(tools, &down(50.0, 50.0));

    assert_eq!(response.tools.active, Tool::Select);
    let shapes = editor.document().shapes();
    assert_eq!(shapes.len(), 1);
    let text = shapes[0].kind.as_text().expect("text shape");
    assert_eq!(text.origin, Pos2::new(50.0, 50.0));
    assert_eq!(text.content, "Double click to edit");
    assert_eq!(text.font_size, 20.0);
    assert_eq!(shapes[0].style.fill, Some(Color32::BLUE));
    assert!(editor.is_selected(shapes[0].id));
}

#[test]
fn test_pen_skips_points_closer_than_a_pixel() {
    let (mut editor, _) = create_editor();
    let tools = tool(Tool::Pen);
    for event in [
        down(0.0, 0.0),
        move_to(0.5, 0.0),
        move_to(5.0, 0.0),
        move_to(5.0, 5.0),
        up(5.0, 5.0),
    ] {
        editor.handle_event(tools, &event);
    }

    match &editor.document().shapes()[0].kind {
        ShapeKind::FreehandPath(path) => assert_eq!(
            path.points(),
            &[Pos2::ZERO, Pos2::new(5.0, 0.0), Pos2::new(5.0, 5.0)]
        ),
        other => panic!("expected a path, got {other:?}"),
    }
    assert!(editor.selection().is_empty());
}

#[test]
fn test_release_without_gesture_does_nothing() {
    let (mut editor, _) = create_editor();
    editor.handle_event(tool(Tool::Rectangle), &up(10.0, 10.0));
    assert!(editor.document().is_empty());
    assert_eq!(editor.store().write_count(), 0);
}

#[test]
fn test_presses_over_chrome_or_with_other_buttons_start_nothing() {
    let (mut editor, _) = create_editor();
    let tools = tool(Tool::Rectangle);

    editor.handle_event(
        tools,
        &InputEvent::PointerDown {
            location: InputLocation::chrome(10.0, 10.0),
            button: PointerButton::Primary,
            modifiers: Modifiers::NONE,
        },
    );
    assert!(editor.state().is_idle());

    editor.handle_event(
        tools,
        &InputEvent::PointerDown {
            location: InputLocation::canvas(10.0, 10.0),
            button: PointerButton::Secondary,
            modifiers: Modifiers::NONE,
        },
    );
    assert!(editor.state().is_idle());
    editor.handle_event(tools, &up(40.0, 40.0));
    assert!(editor.document().is_empty());
}

#[test]
fn test_image_tool_requests_one_load_at_a_time() {
    let (mut editor, _) = create_editor();
    let tools = tool(Tool::Image);

    let first = editor.handle_event(tools, &down(300.0, 300.0));
    let second = editor.handle_event(tools, &down(310.0, 300.0));
    assert_eq!(first.request, Some(Request::PickImage));
    assert_eq!(second.request, None);
    assert!(editor.is_image_pending());

    let payload = ImagePayload::from_bytes("photo.png", &png_bytes(40, 20)).unwrap();
    editor.finish_image_load(Ok(payload));

    assert!(!editor.is_image_pending());
    let shape = &editor.document().shapes()[0];
    let image = shape.kind.as_image().expect("image shape");
    assert_eq!(image.origin, Pos2::new(100.0, 100.0));
    assert_eq!(image.scale, 0.5);
    assert_eq!(image.display_size(), Vec2::new(20.0, 10.0));
    assert!(image.src.starts_with("data:image/png;base64,"));
    assert!(editor.is_selected(shape.id));
}
